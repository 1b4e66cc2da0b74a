//! # Hacker News 数据源
//!
//! - `client` - 只读 JSON 接口的 HTTP 客户端
//! - `types` - 故事记录

pub mod client;
pub mod types;

pub use client::{HnClient, SourceError, SourceResult};
pub use types::{Story, ERROR_TITLE};

/// 官方 API 基础地址
pub const DEFAULT_API_BASE: &str = "https://hacker-news.firebaseio.com/v0";
