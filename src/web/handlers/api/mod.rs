//! JSON API 处理器

pub mod cache;
pub mod stories;

pub use cache::*;
pub use stories::*;
