//! # hackernews-zh
//!
//! 抓取 Hacker News 热门故事，逐条翻译标题，缓存聚合结果并渲染为 HTML 页面。
//!
//! ## 模块组织
//!
//! - `hn` - Hacker News 数据源客户端与故事记录
//! - `translation` - 外部翻译服务客户端
//! - `pipeline` - 并发抓取-翻译流水线与聚合
//! - `cache` - 定时清空的故事列表缓存
//! - `builders` - 页面构建
//! - `web` - Web 服务器
//! - `env` - 环境变量配置

pub mod builders;
pub mod cache;
pub mod env;
pub mod hn;
pub mod pipeline;
pub mod translation;
pub mod web;

// Re-export commonly used items for convenience
pub use cache::{CachedPage, StoryCache};
pub use hn::{HnClient, Story};
pub use pipeline::{AggregateError, Aggregator, StoryDigest};
pub use translation::Translator;
