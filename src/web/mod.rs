//! Web 服务器模块
//!
//! 渲染翻译后的热门故事页面，并提供静态资源与 JSON 接口

pub mod assets;
pub mod config;
pub mod handlers;
pub mod routes;
pub mod types;

pub use assets::*;
pub use config::*;
pub use handlers::*;
pub use routes::*;
pub use types::*;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use chrono::FixedOffset;
use thiserror::Error;
use tower_http::services::ServeDir;

use crate::builders::HtmlBuilderConfig;
use crate::cache::{spawn_sweeper, StoryCache};
use crate::env::{EnvConfig, EnvError, EnvVar};
use crate::hn::{HnClient, SourceError};
use crate::pipeline::{Aggregator, StoryDigest};
use crate::translation::{TranslationConfig, TranslationError, Translator};

/// 服务器启动与运行错误
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("configuration error: {0}")]
    Config(#[from] EnvError),

    #[error("failed to build story source client: {0}")]
    Source(#[from] SourceError),

    #[error("failed to build translation client: {0}")]
    Translation(#[from] TranslationError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// 根据环境配置组装应用状态
pub fn build_state(env: &EnvConfig) -> Result<AppState, ServerError> {
    let client = HnClient::new(env.hn_api_url.clone())?;

    let mut translation =
        TranslationConfig::new(env.translation_provider, env.translation_api_url.clone())
            .with_source_lang(env.translation_source_lang.clone())
            .with_target_lang(env.translation_target_lang.clone());
    if let Some(api_key) = &env.translation_api_key {
        translation = translation.with_api_key(api_key.clone());
    }
    let translator = Translator::new(translation)?;

    let utc_offset = FixedOffset::east_opt(env.display_utc_offset * 3600).ok_or_else(|| EnvError {
        variable: crate::env::core::DisplayUtcOffset::NAME.to_string(),
        message: format!("Offset {} is out of range", env.display_utc_offset),
    })?;

    let aggregator = Aggregator::new(client, translator, env.page_size);
    let digest = StoryDigest::new(aggregator, Arc::new(StoryCache::new()), utc_offset);

    Ok(AppState {
        digest,
        html: HtmlBuilderConfig::default(),
    })
}

/// Web 服务器
pub struct WebServer {
    config: WebConfig,
    state: Arc<AppState>,
    cache_ttl: Duration,
}

impl WebServer {
    /// 创建新的 Web 服务器
    pub fn new(config: WebConfig, state: AppState, cache_ttl: Duration) -> Self {
        Self {
            config,
            state: Arc::new(state),
            cache_ttl,
        }
    }

    /// 启动 Web 服务器，直到收到 Ctrl+C
    pub async fn start(&self) -> Result<(), ServerError> {
        let sweeper = spawn_sweeper(self.state.digest.cache().clone(), self.cache_ttl);

        let app = create_router(self.state.clone(), &self.config);

        let addr = self.config.listen_address();
        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;

        tracing::info!("Web server starting at http://{}", addr);

        let result = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Serve);

        sweeper.abort();
        result
    }
}

/// 创建路由器
pub fn create_router(app_state: Arc<AppState>, config: &WebConfig) -> Router {
    let app = create_routes().with_state(app_state);

    // 静态目录优先，缺失的文件回退到内置资源
    match &config.static_dir {
        Some(static_dir) => app.nest_service(
            "/static",
            ServeDir::new(static_dir).fallback(bundled_assets()),
        ),
        None => app.nest("/static", bundled_assets()),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
