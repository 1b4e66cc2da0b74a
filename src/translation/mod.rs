//! 翻译模块
//!
//! 将单条文本提交给外部翻译服务：
//! - **config**: 提供方、地址、语言配置
//! - **error**: 错误类型与日志级别
//! - **service**: 翻译客户端
//!
//! 每次调用只提交一条文本；不重试、不批量、不缓存。

pub mod config;
pub mod error;
pub mod service;

pub use config::{TranslationConfig, TranslationProvider};
pub use error::{TranslationError, TranslationResult};
pub use service::Translator;
