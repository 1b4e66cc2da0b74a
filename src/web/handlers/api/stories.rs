//! 故事列表 API 处理器

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use chrono::SecondsFormat;

use crate::web::types::{AppState, StoriesResponse};

/// 以 JSON 返回当前页面数据，与主页共用缓存
pub async fn list_stories(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StoriesResponse>, (StatusCode, Json<serde_json::Value>)> {
    match state.digest.current_page().await {
        Ok(page) => Ok(Json(StoriesResponse {
            cached_at: page.cached_at.to_rfc3339_opts(SecondsFormat::Secs, true),
            stories: page.stories.as_ref().clone(),
        })),
        Err(e) => {
            tracing::error!("failed to assemble top stories: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Json(serde_json::json!({
                    "error": true,
                    "message": e.to_string()
                })),
            ))
        }
    }
}
