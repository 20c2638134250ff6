//! The scroll path nav: collection, hierarchy, visibility and path sync.

pub mod config;
pub mod collector;
pub mod ids;
pub mod hierarchy;
pub mod visibility;
pub mod sync;
pub mod widget;
