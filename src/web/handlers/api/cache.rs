//! 缓存相关API处理器

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::cache::CacheSnapshot;
use crate::web::types::{AppState, CacheClearResponse};

/// 获取缓存统计信息
pub async fn get_cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheSnapshot> {
    Json(state.digest.cache().snapshot().await)
}

/// 清理缓存，下一次页面请求会重新聚合
pub async fn clear_cache(State(state): State<Arc<AppState>>) -> Json<CacheClearResponse> {
    let cleared = state.digest.cache().clear().await;
    tracing::info!(cleared, "story cache cleared on request");

    Json(CacheClearResponse {
        success: true,
        message: if cleared {
            "缓存已清空".to_string()
        } else {
            "缓存原本为空".to_string()
        },
        cleared,
    })
}
