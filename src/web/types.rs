//! Web 模块的数据类型定义

use serde::Serialize;

use crate::builders::HtmlBuilderConfig;
use crate::hn::Story;
use crate::pipeline::StoryDigest;

/// 应用状态
pub struct AppState {
    pub digest: StoryDigest,
    pub html: HtmlBuilderConfig,
}

/// 故事列表响应
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoriesResponse {
    pub cached_at: String,
    pub stories: Vec<Story>,
}

/// 缓存清理响应
#[derive(Serialize)]
pub struct CacheClearResponse {
    pub success: bool,
    pub message: String,
    pub cleared: bool,
}
