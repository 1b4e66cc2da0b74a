//! 翻译客户端
//!
//! 封装单次远程翻译调用。支持两种提供方：
//!
//! - **Google**: `POST {api_url}?key=...`，请求体 `{"q": [text], "target": ..., "format": "text"}`，
//!   响应 `{"data": {"translations": [{"translatedText": ...}]}}`
//! - **DeepLX**: `POST {api_url}`，请求体 `{"text", "source_lang", "target_lang"}`，
//!   响应 `{"code": 200, "data": ...}`
//!
//! 接口虽然支持批量输入，这里每次只提交一条文本。

use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};

use super::config::{TranslationConfig, TranslationProvider};
use super::error::{TranslationError, TranslationResult};

#[derive(Serialize)]
struct GoogleRequest<'a> {
    q: [&'a str; 1],
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<&'a str>,
}

#[derive(Deserialize)]
struct GoogleResponse {
    data: GoogleData,
}

#[derive(Deserialize)]
struct GoogleData {
    #[serde(default)]
    translations: Vec<GoogleTranslation>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleTranslation {
    translated_text: String,
}

#[derive(Deserialize)]
struct GoogleErrorBody {
    error: GoogleErrorDetail,
}

#[derive(Deserialize)]
struct GoogleErrorDetail {
    message: String,
}

#[derive(Serialize)]
struct DeepLxRequest<'a> {
    text: &'a str,
    source_lang: String,
    target_lang: String,
}

#[derive(Deserialize)]
struct DeepLxResponse {
    code: u16,
    #[serde(default)]
    data: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// 翻译客户端
///
/// 克隆开销很小，连接池在克隆之间共享。
#[derive(Debug, Clone)]
pub struct Translator {
    client: Client,
    config: TranslationConfig,
}

impl Translator {
    /// 创建新的翻译客户端
    pub fn new(config: TranslationConfig) -> TranslationResult<Self> {
        let client = Client::builder()
            .user_agent(concat!("hackernews-zh/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TranslationError::ConfigError(e.to_string()))?;

        Ok(Self::with_client(client, config))
    }

    /// 复用已有的 HTTP 客户端
    pub fn with_client(client: Client, config: TranslationConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &TranslationConfig {
        &self.config
    }

    /// 翻译为配置中的目标语言
    pub async fn translate_title(&self, text: &str) -> TranslationResult<String> {
        self.translate(text, &self.config.target_lang).await
    }

    /// 翻译单条文本
    pub async fn translate(&self, text: &str, target_lang: &str) -> TranslationResult<String> {
        if target_lang.trim().is_empty() {
            return Err(TranslationError::ConfigError("目标语言为空".to_string()));
        }

        match self.config.provider {
            TranslationProvider::Google => self.translate_google(text, target_lang).await,
            TranslationProvider::DeepLx => self.translate_deeplx(text, target_lang).await,
        }
    }

    async fn translate_google(&self, text: &str, target_lang: &str) -> TranslationResult<String> {
        let body = GoogleRequest {
            q: [text],
            target: target_lang,
            format: "text",
            source: (!self.config.detects_source()).then_some(self.config.source_lang.as_str()),
        };

        let mut request = self.client.post(&self.config.api_url).json(&body);
        if let Some(key) = &self.config.api_key {
            request = request.query(&[("key", key)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }

        let parsed: GoogleResponse = response.json().await?;
        parsed
            .data
            .translations
            .into_iter()
            .next()
            .map(|t| t.translated_text)
            .ok_or_else(|| TranslationError::EmptyResponse(text.to_string()))
    }

    async fn translate_deeplx(&self, text: &str, target_lang: &str) -> TranslationResult<String> {
        let body = DeepLxRequest {
            text,
            source_lang: deeplx_lang(&self.config.source_lang),
            target_lang: deeplx_lang(target_lang),
        };

        let response = self.client.post(&self.config.api_url).json(&body).send().await?;
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }

        let parsed: DeepLxResponse = response.json().await?;
        if parsed.code != 200 {
            return Err(TranslationError::ServiceError(format!(
                "code {}: {}",
                parsed.code,
                parsed.message.unwrap_or_default()
            )));
        }

        match parsed.data {
            Some(data) if !data.is_empty() => Ok(data),
            _ => Err(TranslationError::EmptyResponse(text.to_string())),
        }
    }
}

/// 把非 2xx 响应转换为服务错误，尽量带上服务端给出的消息
async fn service_error(response: Response) -> TranslationError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<GoogleErrorBody>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);

    TranslationError::ServiceError(format!("HTTP {}: {}", status, message))
}

/// DeepLX 使用大写的主语言代码，例如 `zh-CN` -> `ZH`，`auto` 保持不变
fn deeplx_lang(lang: &str) -> String {
    if lang.eq_ignore_ascii_case("auto") {
        return "auto".to_string();
    }
    lang.split('-').next().unwrap_or(lang).to_uppercase()
}
