//! 翻译模块统一错误处理

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone)]
pub enum TranslationError {
    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 网络错误
    #[error("网络错误: {0}")]
    NetworkError(String),

    /// 服务返回了空的翻译结果
    #[error("翻译服务返回空结果: {0}")]
    EmptyResponse(String),

    /// 翻译服务错误
    #[error("翻译服务错误: {0}")]
    ServiceError(String),

    /// 解析错误
    #[error("解析错误: {0}")]
    ParseError(String),
}

impl TranslationError {
    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::NetworkError(_) => ErrorSeverity::Warning,
            TranslationError::EmptyResponse(_) => ErrorSeverity::Warning,
            TranslationError::ServiceError(_) => ErrorSeverity::Error,
            TranslationError::ParseError(_) => ErrorSeverity::Error,
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Warning,
    Error,
    Critical,
}

impl From<reqwest::Error> for TranslationError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            TranslationError::ParseError(error.to_string())
        } else {
            TranslationError::NetworkError(error.to_string())
        }
    }
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::ParseError(format!("JSON解析错误: {}", error))
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录错误
    pub fn log_error(error: &TranslationError, story_id: u64) {
        match error.severity() {
            ErrorSeverity::Warning => tracing::warn!(story_id, "翻译警告: {}", error),
            ErrorSeverity::Error => tracing::error!(story_id, "翻译错误: {}", error),
            ErrorSeverity::Critical => tracing::error!(story_id, "翻译严重错误: {}", error),
        }
    }
}
