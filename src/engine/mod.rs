pub mod page;
pub mod pipeline;
pub mod runtime;
pub mod scheduler;
pub mod report;
