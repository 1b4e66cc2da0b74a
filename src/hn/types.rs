//! 故事记录

use serde::{Deserialize, Deserializer, Serialize};

/// 条目获取失败时占位故事使用的标题
pub const ERROR_TITLE: &str = "error";

/// 一条热门故事
///
/// 反序列化直接读取 `item/<id>.json` 的负载；缺失或为 `null` 的字段取零值。
/// `title_translated` 与 `index` 不来自上游，由流水线填写。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Story {
    #[serde(deserialize_with = "null_as_default")]
    pub by: String,
    #[serde(deserialize_with = "null_as_default")]
    pub descendants: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub id: u64,
    #[serde(deserialize_with = "null_as_default")]
    pub score: i64,
    /// Unix 秒
    #[serde(deserialize_with = "null_as_default")]
    pub time: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title_translated: String,
    #[serde(rename = "type", deserialize_with = "null_as_default")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// 原始排名
    #[serde(deserialize_with = "null_as_default")]
    pub index: usize,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl Story {
    /// 条目获取或解码失败时的占位记录：标题为 `"error"`，其余字段为零值
    pub fn placeholder(rank: usize) -> Self {
        Self {
            title: ERROR_TITLE.to_string(),
            index: rank,
            ..Default::default()
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.title == ERROR_TITLE && self.id == 0
    }

    /// 讨论页地址
    pub fn discussion_url(&self) -> String {
        format!("https://news.ycombinator.com/item?id={}", self.id)
    }

    /// 只接受 http/https 外链
    fn external_url(&self) -> Option<&str> {
        let url = self.url.as_deref()?;
        let (scheme, _) = url.split_once("://")?;
        if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") {
            Some(url)
        } else {
            None
        }
    }

    /// 标题链接：有可用外链时指向外链，否则指向讨论页
    pub fn link(&self) -> String {
        match self.external_url() {
            Some(url) => url.to_string(),
            None => self.discussion_url(),
        }
    }

    /// 外链的域名部分，用于在标题旁展示
    pub fn domain(&self) -> Option<&str> {
        let url = self.external_url()?;
        let rest = url.split_once("://").map(|(_, rest)| rest)?;
        let host = rest.split(['/', '?', '#']).next()?;
        let host = host.strip_prefix("www.").unwrap_or(host);
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}
