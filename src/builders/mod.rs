//! # 构建器模块
//!
//! - `html_builder` - 故事列表页面的 HTML 构建

pub mod html_builder;

// Re-export commonly used items for convenience
pub use html_builder::*;
