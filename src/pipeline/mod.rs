//! 抓取-翻译流水线
//!
//! - `worker` - 单条故事的抓取与翻译
//! - `aggregator` - 并发扇出、按排名扇入
//! - `digest` - 缓存优先的页面数据入口

pub mod aggregator;
pub mod digest;
pub mod worker;

pub use aggregator::{AggregateError, Aggregator};
pub use digest::StoryDigest;
pub use worker::fetch_and_translate;
