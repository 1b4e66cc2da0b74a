//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问，所有变量使用 `HNZH_` 前缀

use std::env;
use std::fmt;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    /// 未设置时返回 `None`；设置了但无法解析时返回错误
    fn get_optional() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value).map(Some),
            Err(_) => Ok(None),
        }
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "HNZH_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 页面时间戳使用的时区（相对 UTC 的小时数）
    pub struct DisplayUtcOffset;
    impl EnvVar<i32> for DisplayUtcOffset {
        const NAME: &'static str = "HNZH_DISPLAY_UTC_OFFSET";
        const DEFAULT: Option<i32> = Some(8);
        const DESCRIPTION: &'static str = "Hours east of UTC used for the page timestamp";

        fn parse(value: &str) -> EnvResult<i32> {
            let hours: i32 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a whole number of hours".to_string(),
            })?;

            if !(-12..=14).contains(&hours) {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!("Offset {} is outside -12..=14", hours),
                });
            }

            Ok(hours)
        }
    }
}

/// Hacker News 数据源相关环境变量
pub mod hn {
    use super::*;

    /// API 基础地址
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "HNZH_HN_API_URL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(crate::hn::DEFAULT_API_BASE.to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Hacker News API base URL";

        fn parse(value: &str) -> EnvResult<String> {
            parse_http_url(value, Self::NAME)
        }
    }

    /// 每页故事数
    pub struct PageSize;
    impl EnvVar<usize> for PageSize {
        const NAME: &'static str = "HNZH_PAGE_SIZE";
        const DEFAULT: Option<usize> = Some(20);
        const DESCRIPTION: &'static str = "Number of top stories fetched and translated per page";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 100)
        }
    }
}

/// 翻译相关环境变量
pub mod translation {
    use super::*;
    use crate::translation::TranslationProvider;

    /// 翻译服务提供方
    pub struct Provider;
    impl EnvVar<TranslationProvider> for Provider {
        const NAME: &'static str = "HNZH_TRANSLATION_PROVIDER";
        const DEFAULT: Option<TranslationProvider> = Some(TranslationProvider::Google);
        const DESCRIPTION: &'static str = "Translation backend: google, deeplx";

        fn parse(value: &str) -> EnvResult<TranslationProvider> {
            value.parse().map_err(|message| EnvError {
                variable: Self::NAME.to_string(),
                message,
            })
        }
    }

    /// API URL
    pub struct ApiUrl;
    impl EnvVar<String> for ApiUrl {
        const NAME: &'static str = "HNZH_TRANSLATION_API_URL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok(Provider::get()?.default_api_url().to_string()),
            }
        }
        const DESCRIPTION: &'static str =
            "Translation API endpoint URL (defaults to the provider's public endpoint)";

        fn parse(value: &str) -> EnvResult<String> {
            parse_http_url(value, Self::NAME)
        }
    }

    /// API 密钥
    pub struct ApiKey;
    impl EnvVar<String> for ApiKey {
        const NAME: &'static str = "HNZH_TRANSLATION_API_KEY";
        const DEFAULT: Option<String> = None; // 无默认值
        const DESCRIPTION: &'static str = "API key sent to the Google translation endpoint";

        fn parse(value: &str) -> EnvResult<String> {
            let key = value.trim();
            if key.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "API key cannot be empty".to_string(),
                });
            }
            Ok(key.to_string())
        }
    }

    /// 源语言
    pub struct SourceLang;
    impl EnvVar<String> for SourceLang {
        const NAME: &'static str = "HNZH_TRANSLATION_SOURCE_LANG";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("auto".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Source language ('auto' for detection)";

        fn parse(value: &str) -> EnvResult<String> {
            let lang = value.trim();
            if lang.eq_ignore_ascii_case("auto") {
                return Ok("auto".to_string());
            }
            parse_language_tag(lang, Self::NAME)
        }
    }

    /// 目标语言
    pub struct TargetLang;
    impl EnvVar<String> for TargetLang {
        const NAME: &'static str = "HNZH_TRANSLATION_TARGET_LANG";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("zh-CN".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Target language tag, e.g. zh-CN";

        fn parse(value: &str) -> EnvResult<String> {
            parse_language_tag(value.trim(), Self::NAME)
        }
    }
}

/// 缓存相关环境变量
pub mod cache {
    use super::*;

    /// 缓存清理周期
    pub struct Ttl;
    impl EnvVar<Duration> for Ttl {
        const NAME: &'static str = "HNZH_CACHE_TTL";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(3600));
        const DESCRIPTION: &'static str = "Seconds between unconditional cache clears";

        fn parse(value: &str) -> EnvResult<Duration> {
            let seconds: u64 = value.parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid number of seconds".to_string(),
            })?;

            if seconds < 60 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "TTL too short (minimum 60 seconds)".to_string(),
                });
            }

            if seconds > 86400 * 7 {
                // 7 days
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "TTL too long (maximum 7 days)".to_string(),
                });
            }

            Ok(Duration::from_secs(seconds))
        }
    }
}

/// Web服务器相关环境变量
pub mod web {
    use super::*;

    /// 绑定地址
    pub struct BindAddress;
    impl EnvVar<String> for BindAddress {
        const NAME: &'static str = "HNZH_WEB_BIND_ADDRESS";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("127.0.0.1".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Web server bind address";

        fn parse(value: &str) -> EnvResult<String> {
            let addr = value.trim();
            if addr.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Address cannot be empty".to_string(),
                });
            }
            Ok(addr.to_string())
        }
    }

    /// 端口
    pub struct Port;
    impl EnvVar<u16> for Port {
        const NAME: &'static str = "HNZH_WEB_PORT";
        const DEFAULT: Option<u16> = Some(2001);
        const DESCRIPTION: &'static str = "Web server port";

        fn parse(value: &str) -> EnvResult<u16> {
            let port: u16 = value.trim().parse().map_err(|_| EnvError {
                variable: Self::NAME.to_string(),
                message: "Must be a valid port number (1-65535)".to_string(),
            })?;

            if port == 0 {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "Port cannot be 0".to_string(),
                });
            }

            Ok(port)
        }
    }

    /// 静态文件目录
    pub struct StaticDir;
    impl EnvVar<String> for StaticDir {
        const NAME: &'static str = "HNZH_WEB_STATIC_DIR";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("static".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Directory whose files override the bundled /static assets (empty serves bundled assets only)";

        fn parse(value: &str) -> EnvResult<String> {
            Ok(value.trim().to_string())
        }
    }
}

/// 辅助函数
fn parse_positive_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

fn parse_http_url(value: &str, var_name: &str) -> EnvResult<String> {
    let url = value.trim();
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.trim_end_matches('/').to_string())
    } else {
        Err(EnvError {
            variable: var_name.to_string(),
            message: "URL must start with http:// or https://".to_string(),
        })
    }
}

/// 语言标签：主标签 2-3 个字母，可选地区子标签，例如 `zh`、`zh-CN`、`pt-BR`
fn parse_language_tag(value: &str, var_name: &str) -> EnvResult<String> {
    let mut parts = value.split('-');
    let primary = parts.next().unwrap_or_default();
    let primary_ok = (2..=3).contains(&primary.len()) && primary.chars().all(|c| c.is_ascii_alphabetic());
    let rest_ok = parts.all(|p| !p.is_empty() && p.len() <= 8 && p.chars().all(|c| c.is_ascii_alphanumeric()));

    if primary_ok && rest_ok {
        Ok(value.to_string())
    } else {
        Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Invalid language tag '{}'", value),
        })
    }
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    // 核心配置
    pub log_level: String,
    pub display_utc_offset: i32,

    // 数据源配置
    pub hn_api_url: String,
    pub page_size: usize,

    // 翻译配置
    pub translation_provider: crate::translation::TranslationProvider,
    pub translation_api_url: String,
    pub translation_api_key: Option<String>,
    pub translation_source_lang: String,
    pub translation_target_lang: String,

    // 缓存配置
    pub cache_ttl: Duration,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: core::LogLevel::get()?,
            display_utc_offset: core::DisplayUtcOffset::get()?,

            hn_api_url: hn::ApiUrl::get()?,
            page_size: hn::PageSize::get()?,

            translation_provider: translation::Provider::get()?,
            translation_api_url: translation::ApiUrl::get()?,
            translation_api_key: translation::ApiKey::get_optional()?,
            translation_source_lang: translation::SourceLang::get()?,
            translation_target_lang: translation::TargetLang::get()?,

            cache_ttl: cache::Ttl::get()?,
        })
    }

    /// 跨字段验证
    pub fn validate(&self) -> EnvResult<()> {
        if self.translation_provider == crate::translation::TranslationProvider::Google
            && self.translation_api_key.is_none()
        {
            tracing::warn!(
                "{} is not set; Google translation requests will be rejected",
                translation::ApiKey::NAME
            );
        }
        Ok(())
    }

    /// 记录配置摘要（隐藏敏感信息）
    pub fn log_summary(&self) {
        let api_key = if self.translation_api_key.is_some() {
            "[configured]"
        } else {
            "[unset]"
        };
        tracing::info!(
            page_size = self.page_size,
            hn_api = %self.hn_api_url,
            provider = %self.translation_provider,
            target_lang = %self.translation_target_lang,
            cache_ttl_secs = self.cache_ttl.as_secs(),
            api_key,
            "configuration loaded"
        );
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    fn line<T: fmt::Debug>(name: &str, description: &str, default: Option<T>) -> String {
        match default {
            Some(value) => format!("- `{}`: {} (default: {:?})\n", name, description, value),
            None => format!("- `{}`: {}\n", name, description),
        }
    }

    let mut docs = String::new();
    docs.push_str("# Environment Variables\n\n");

    docs.push_str("## Core Configuration\n\n");
    docs.push_str(&line(core::LogLevel::NAME, core::LogLevel::DESCRIPTION, Some("info")));
    docs.push_str(&line(
        core::DisplayUtcOffset::NAME,
        core::DisplayUtcOffset::DESCRIPTION,
        core::DisplayUtcOffset::DEFAULT,
    ));

    docs.push_str("\n## Story Source\n\n");
    docs.push_str(&line(hn::ApiUrl::NAME, hn::ApiUrl::DESCRIPTION, Some(crate::hn::DEFAULT_API_BASE)));
    docs.push_str(&line(hn::PageSize::NAME, hn::PageSize::DESCRIPTION, hn::PageSize::DEFAULT));

    docs.push_str("\n## Translation\n\n");
    docs.push_str(&line(
        translation::Provider::NAME,
        translation::Provider::DESCRIPTION,
        translation::Provider::DEFAULT,
    ));
    docs.push_str(&line(translation::ApiUrl::NAME, translation::ApiUrl::DESCRIPTION, None::<&str>));
    docs.push_str(&line(translation::ApiKey::NAME, translation::ApiKey::DESCRIPTION, None::<&str>));
    docs.push_str(&line(translation::SourceLang::NAME, translation::SourceLang::DESCRIPTION, Some("auto")));
    docs.push_str(&line(translation::TargetLang::NAME, translation::TargetLang::DESCRIPTION, Some("zh-CN")));

    docs.push_str("\n## Cache\n\n");
    docs.push_str(&line(cache::Ttl::NAME, cache::Ttl::DESCRIPTION, cache::Ttl::DEFAULT));

    docs.push_str("\n## Web Server\n\n");
    docs.push_str(&line(web::BindAddress::NAME, web::BindAddress::DESCRIPTION, Some("127.0.0.1")));
    docs.push_str(&line(web::Port::NAME, web::Port::DESCRIPTION, web::Port::DEFAULT));
    docs.push_str(&line(web::StaticDir::NAME, web::StaticDir::DESCRIPTION, Some("static")));

    docs
}
