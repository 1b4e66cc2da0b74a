//! 页面处理器

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Html};

use crate::builders::HtmlBuilder;
use crate::web::types::AppState;

/// 主页处理器
///
/// 上游 id 列表不可用时返回 502 错误页，进程继续服务后续请求。
pub async fn index(
    State(state): State<Arc<AppState>>,
) -> Result<Html<String>, (StatusCode, Html<String>)> {
    let builder = HtmlBuilder::new(state.html.clone());

    match state.digest.current_page().await {
        Ok(page) => Ok(Html(builder.build_index_page(&page))),
        Err(e) => {
            tracing::error!("failed to assemble top stories: {}", e);
            Err((
                StatusCode::BAD_GATEWAY,
                Html(builder.build_error_page(&e.to_string())),
            ))
        }
    }
}
