//! 并发扇出 / 按排名扇入

use thiserror::Error;
use tokio::sync::mpsc;

use super::worker::fetch_and_translate;
use crate::hn::{HnClient, SourceError, Story};
use crate::translation::Translator;

/// 聚合错误
#[derive(Error, Debug)]
pub enum AggregateError {
    /// 热门 id 列表获取失败
    #[error("upstream story list unavailable: {0}")]
    Upstream(#[from] SourceError),
}

/// 聚合器：每个 id 一个任务，结果按携带的排名写回
#[derive(Debug, Clone)]
pub struct Aggregator {
    client: HnClient,
    translator: Translator,
    page_size: usize,
}

impl Aggregator {
    pub fn new(client: HnClient, translator: Translator, page_size: usize) -> Self {
        Self {
            client,
            translator,
            page_size,
        }
    }

    /// 获取热门 id，并发抓取前 `page_size` 条，按原始排名返回
    ///
    /// 等待全部任务完成，没有超时和取消。只有 id 列表获取失败才返回错误。
    pub async fn assemble(&self) -> Result<Vec<Story>, AggregateError> {
        let ids = self.client.top_story_ids().await?;
        let ids: Vec<u64> = ids.into_iter().take(self.page_size).collect();
        let count = ids.len();

        tracing::info!(count, "assembling top stories");

        if count == 0 {
            return Ok(Vec::new());
        }

        let (tx, mut rx) = mpsc::channel::<Story>(count);

        for (rank, id) in ids.into_iter().enumerate() {
            let tx = tx.clone();
            let client = self.client.clone();
            let translator = self.translator.clone();
            tokio::spawn(async move {
                let story = fetch_and_translate(&client, &translator, id, rank).await;
                // 接收端只在聚合被放弃时关闭
                let _ = tx.send(story).await;
            });
        }
        drop(tx);

        let mut slots: Vec<Option<Story>> = vec![None; count];
        while let Some(story) = rx.recv().await {
            let rank = story.index;
            match slots.get_mut(rank) {
                Some(slot) => *slot = Some(story),
                None => tracing::error!(rank, "worker reported an out-of-range rank"),
            }
        }

        let stories: Vec<Story> = slots
            .into_iter()
            .enumerate()
            .map(|(rank, slot)| {
                slot.unwrap_or_else(|| {
                    // 任务 panic 时发送端被丢弃而没有结果
                    tracing::error!(rank, "worker exited without a result");
                    Story::placeholder(rank)
                })
            })
            .collect();

        let failed = stories.iter().filter(|s| s.is_placeholder()).count();
        let untranslated = stories
            .iter()
            .filter(|s| !s.is_placeholder() && s.title_translated.is_empty())
            .count();
        tracing::info!(count, failed, untranslated, "top stories assembled");

        Ok(stories)
    }
}
