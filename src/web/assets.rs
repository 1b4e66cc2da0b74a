//! 编译进二进制的静态资源
//!
//! 挂载在 `/static` 下；配置了静态目录时，目录中缺失的文件由这里兜底。

use axum::{http::header, response::IntoResponse, routing::get, Router};

/// 页面样式表
pub const MAIN_CSS: &str = include_str!("../../static/css/main.css");

/// 内置资源路由，路径相对于 `/static`
pub fn bundled_assets() -> Router {
    Router::new().route("/css/main.css", get(main_css))
}

async fn main_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], MAIN_CSS)
}
