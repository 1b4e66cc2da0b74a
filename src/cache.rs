//! 故事列表缓存
//!
//! 进程内唯一的缓存槽，保存最近一次聚合的有序故事列表及其时间戳。
//! 没有按条目过期；由后台清理任务按固定周期无条件清空。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, FixedOffset, SecondsFormat};
use serde::Serialize;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use crate::hn::Story;

/// 一次聚合的结果
#[derive(Debug, Clone)]
pub struct CachedPage {
    pub stories: Arc<Vec<Story>>,
    pub cached_at: DateTime<FixedOffset>,
}

impl CachedPage {
    pub fn new(stories: Vec<Story>, cached_at: DateTime<FixedOffset>) -> Self {
        Self {
            stories: Arc::new(stories),
            cached_at,
        }
    }
}

/// 缓存统计
#[derive(Debug, Default)]
struct CacheStats {
    hits: AtomicU64,
    misses: AtomicU64,
    sets: AtomicU64,
    clears: AtomicU64,
}

/// 缓存状态快照
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CacheSnapshot {
    pub populated: bool,
    pub cached_at: Option<String>,
    pub story_count: usize,
    pub hits: u64,
    pub misses: u64,
    pub sets: u64,
    pub clears: u64,
}

/// 故事列表缓存
///
/// `get`/`set`/`clear` 在锁内完成，读者不会看到写到一半的列表。
#[derive(Debug, Default)]
pub struct StoryCache {
    slot: RwLock<Option<CachedPage>>,
    stats: CacheStats,
}

impl StoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取缓存并记录命中/未命中
    pub async fn get(&self) -> Option<CachedPage> {
        let page = self.peek().await;
        let counter = if page.is_some() {
            &self.stats.hits
        } else {
            &self.stats.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        page
    }

    /// 读取缓存，不计入统计
    pub async fn peek(&self) -> Option<CachedPage> {
        self.slot.read().await.clone()
    }

    pub async fn set(&self, page: CachedPage) {
        *self.slot.write().await = Some(page);
        self.stats.sets.fetch_add(1, Ordering::Relaxed);
    }

    /// 清空缓存，返回清空前是否有内容
    pub async fn clear(&self) -> bool {
        let previous = self.slot.write().await.take();
        self.stats.clears.fetch_add(1, Ordering::Relaxed);
        previous.is_some()
    }

    pub async fn snapshot(&self) -> CacheSnapshot {
        let slot = self.slot.read().await;
        CacheSnapshot {
            populated: slot.is_some(),
            cached_at: slot
                .as_ref()
                .map(|p| p.cached_at.to_rfc3339_opts(SecondsFormat::Secs, true)),
            story_count: slot.as_ref().map_or(0, |p| p.stories.len()),
            hits: self.stats.hits.load(Ordering::Relaxed),
            misses: self.stats.misses.load(Ordering::Relaxed),
            sets: self.stats.sets.load(Ordering::Relaxed),
            clears: self.stats.clears.load(Ordering::Relaxed),
        }
    }
}

/// 启动后台清理任务：立即清空一次，此后每个周期清空一次，与请求流量无关
pub fn spawn_sweeper(cache: Arc<StoryCache>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            if cache.clear().await {
                tracing::info!(period_secs = period.as_secs(), "story cache expired");
            } else {
                tracing::debug!("story cache sweep found nothing to clear");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn page(ids: &[u64]) -> CachedPage {
        let stories = ids
            .iter()
            .enumerate()
            .map(|(index, &id)| Story {
                id,
                index,
                title: format!("story {}", id),
                ..Default::default()
            })
            .collect();
        let offset = FixedOffset::east_opt(8 * 3600).unwrap();
        CachedPage::new(stories, offset.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn test_get_set_clear() {
        let cache = StoryCache::new();
        assert!(cache.get().await.is_none());

        cache.set(page(&[1, 2, 3])).await;
        let cached = cache.get().await.expect("page should be cached");
        assert_eq!(cached.stories.len(), 3);
        assert_eq!(cached.stories[2].id, 3);

        assert!(cache.clear().await);
        assert!(cache.get().await.is_none());
        assert!(!cache.clear().await);
    }

    #[tokio::test]
    async fn test_cached_page_is_shared_not_copied() {
        let cache = StoryCache::new();
        cache.set(page(&[10, 11])).await;
        let first = cache.get().await.unwrap();
        let second = cache.get().await.unwrap();
        assert!(Arc::ptr_eq(&first.stories, &second.stories));
    }

    #[tokio::test]
    async fn test_snapshot_counts() {
        let cache = StoryCache::new();
        cache.get().await;
        cache.set(page(&[1])).await;
        cache.get().await;
        cache.peek().await;

        let snapshot = cache.snapshot().await;
        assert_eq!(
            snapshot,
            CacheSnapshot {
                populated: true,
                cached_at: Some("2024-05-01T12:00:00+08:00".to_string()),
                story_count: 1,
                hits: 1,
                misses: 1,
                sets: 1,
                clears: 0,
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_clears_on_every_period() {
        let cache = Arc::new(StoryCache::new());
        let handle = spawn_sweeper(cache.clone(), Duration::from_secs(60));

        // 第一次 tick 立即触发
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(cache.snapshot().await.clears, 1);

        cache.set(page(&[1])).await;
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(cache.peek().await.is_some(), "cleared before the period elapsed");

        tokio::time::sleep(Duration::from_secs(31)).await;
        assert!(cache.peek().await.is_none(), "not cleared after the period");
        assert_eq!(cache.snapshot().await.clears, 2);

        handle.abort();
    }
}
