//! 单条故事的抓取与翻译

use crate::hn::{HnClient, Story};
use crate::translation::error::helpers::log_error;
use crate::translation::Translator;

/// 抓取一条故事并翻译标题
///
/// 永不失败：条目抓取或解码失败时返回占位故事；翻译失败只记录日志，
/// `title_translated` 保持为空。无论结果如何 `index` 都等于 `rank`。
pub async fn fetch_and_translate(
    client: &HnClient,
    translator: &Translator,
    id: u64,
    rank: usize,
) -> Story {
    let mut story = match client.item(id).await {
        Ok(story) => story,
        Err(e) => {
            tracing::warn!(story_id = id, rank, "failed to fetch story: {}", e);
            return Story::placeholder(rank);
        }
    };

    if !story.title.is_empty() {
        match translator.translate_title(&story.title).await {
            Ok(translated) => story.title_translated = translated,
            Err(e) => log_error(&e, id),
        }
    }

    story.index = rank;
    story
}
