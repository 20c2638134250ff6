pub mod layout;
pub mod nav_layout;
pub mod path;
pub mod markup;
