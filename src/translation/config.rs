//! 翻译配置

use std::fmt;
use std::str::FromStr;

/// 翻译配置常量
pub mod constants {
    pub const GOOGLE_API_URL: &str = "https://translation.googleapis.com/language/translate/v2";
    pub const DEEPLX_API_URL: &str = "http://localhost:1188/translate";
    pub const DEFAULT_TARGET_LANG: &str = "zh-CN";
    pub const DEFAULT_SOURCE_LANG: &str = "auto";
}

/// 翻译服务提供方
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationProvider {
    /// Google Cloud Translation v2 REST 接口，使用 API key 认证
    Google,
    /// 自建 DeepLX 服务
    DeepLx,
}

impl TranslationProvider {
    pub fn default_api_url(&self) -> &'static str {
        match self {
            TranslationProvider::Google => constants::GOOGLE_API_URL,
            TranslationProvider::DeepLx => constants::DEEPLX_API_URL,
        }
    }
}

impl fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TranslationProvider::Google => write!(f, "google"),
            TranslationProvider::DeepLx => write!(f, "deeplx"),
        }
    }
}

impl FromStr for TranslationProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "google" => Ok(TranslationProvider::Google),
            "deeplx" => Ok(TranslationProvider::DeepLx),
            other => Err(format!("Unknown translation provider '{}'. Use: google, deeplx", other)),
        }
    }
}

/// 翻译配置
#[derive(Debug, Clone)]
pub struct TranslationConfig {
    pub provider: TranslationProvider,
    pub api_url: String,
    pub api_key: Option<String>,
    pub source_lang: String,
    pub target_lang: String,
}

impl TranslationConfig {
    /// 指定提供方与地址，其余取默认值
    pub fn new(provider: TranslationProvider, api_url: impl Into<String>) -> Self {
        Self {
            provider,
            api_url: api_url.into(),
            api_key: None,
            source_lang: constants::DEFAULT_SOURCE_LANG.to_string(),
            target_lang: constants::DEFAULT_TARGET_LANG.to_string(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_source_lang(mut self, source_lang: impl Into<String>) -> Self {
        self.source_lang = source_lang.into();
        self
    }

    pub fn with_target_lang(mut self, target_lang: impl Into<String>) -> Self {
        self.target_lang = target_lang.into();
        self
    }

    /// 源语言是否为自动检测
    pub fn detects_source(&self) -> bool {
        self.source_lang == "auto"
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self::new(TranslationProvider::Google, constants::GOOGLE_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_round_trip_through_display() {
        for provider in [TranslationProvider::Google, TranslationProvider::DeepLx] {
            assert_eq!(provider.to_string().parse::<TranslationProvider>().unwrap(), provider);
        }
    }

    #[test]
    fn test_builder_defaults() {
        let config = TranslationConfig::new(TranslationProvider::DeepLx, "http://127.0.0.1:1188/translate")
            .with_target_lang("ja");
        assert_eq!(config.target_lang, "ja");
        assert!(config.detects_source());
        assert!(config.api_key.is_none());

        let config = TranslationConfig::default()
            .with_source_lang("en")
            .with_api_key("k");
        assert!(!config.detects_source());
        assert_eq!(config.api_key.as_deref(), Some("k"));

        let config = TranslationConfig::default();
        assert_eq!(config.provider, TranslationProvider::Google);
        assert_eq!(config.api_url, constants::GOOGLE_API_URL);
        assert_eq!(config.target_lang, "zh-CN");
    }
}
