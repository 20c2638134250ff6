pub mod dom;
pub mod host;
pub mod nav;
pub mod render;
pub mod engine;
pub mod net;

#[cfg(test)]
mod testing;

pub use engine::pipeline::{NavEngine, PageError, PageResult};
pub use engine::runtime::{PageEvent, PageRuntime};
pub use host::{Document, Geometry, Host, Viewport};
pub use nav::config::NavConfig;
pub use nav::widget::ScrollPathNav;
