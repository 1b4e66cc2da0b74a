//! 缓存优先的页面数据入口

use std::sync::Arc;

use chrono::{FixedOffset, Utc};
use tokio::sync::Mutex;

use super::aggregator::{AggregateError, Aggregator};
use crate::cache::{CachedPage, StoryCache};

/// 页面数据入口
///
/// 缓存命中直接返回；未命中时在刷新锁内重新检查缓存，再执行聚合，
/// 因此并发的未命中请求只触发一次聚合。
pub struct StoryDigest {
    aggregator: Aggregator,
    cache: Arc<StoryCache>,
    refresh_lock: Mutex<()>,
    utc_offset: FixedOffset,
}

impl StoryDigest {
    pub fn new(aggregator: Aggregator, cache: Arc<StoryCache>, utc_offset: FixedOffset) -> Self {
        Self {
            aggregator,
            cache,
            refresh_lock: Mutex::new(()),
            utc_offset,
        }
    }

    pub fn cache(&self) -> &Arc<StoryCache> {
        &self.cache
    }

    /// 当前页面数据；缓存为空时聚合并写入缓存
    pub async fn current_page(&self) -> Result<CachedPage, AggregateError> {
        if let Some(page) = self.cache.get().await {
            return Ok(page);
        }

        let _guard = self.refresh_lock.lock().await;
        if let Some(page) = self.cache.peek().await {
            tracing::debug!("story cache filled by a concurrent request");
            return Ok(page);
        }

        let stories = self.aggregator.assemble().await?;
        let page = CachedPage::new(stories, Utc::now().with_timezone(&self.utc_offset));
        self.cache.set(page.clone()).await;

        Ok(page)
    }
}
