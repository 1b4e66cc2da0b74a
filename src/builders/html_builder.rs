//! HTML 构建器模块
//!
//! 负责把缓存的故事列表渲染为页面，样式表通过 `/static/` 引用

use chrono::{DateTime, FixedOffset};
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::cache::CachedPage;
use crate::hn::Story;

#[derive(Debug, Clone)]
pub struct HtmlBuilderConfig {
    /// 页面标题
    pub page_title: String,
    /// 静态资源基础路径
    pub asset_base_path: String,
}

impl Default for HtmlBuilderConfig {
    fn default() -> Self {
        Self {
            page_title: "Hacker News 热门".to_string(),
            asset_base_path: "/static/".to_string(),
        }
    }
}

pub struct HtmlBuilder {
    config: HtmlBuilderConfig,
}

impl HtmlBuilder {
    pub fn new(config: HtmlBuilderConfig) -> Self {
        Self { config }
    }

    /// 构建故事列表页面
    pub fn build_index_page(&self, page: &CachedPage) -> String {
        let css = self.get_css_links();

        let items: String = page
            .stories
            .iter()
            .map(|story| render_story(story, page.cached_at.offset()))
            .collect();

        format!(
            r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    {css}
</head>
<body>
    <header class="header">
        <h1><a href="/">{title}</a></h1>
        <p class="cached-at">更新于 <time datetime="{cached_at_iso}">{cached_at}</time></p>
    </header>
    <main class="container">
        <ol class="stories">
{items}        </ol>
    </main>
    <footer class="footer">
        数据来自 <a href="https://news.ycombinator.com/">Hacker News</a>
    </footer>
</body>
</html>"#,
            title = text(&self.config.page_title),
            css = css,
            cached_at_iso = page.cached_at.to_rfc3339(),
            cached_at = page.cached_at.format("%Y-%m-%d %H:%M:%S"),
            items = items,
        )
    }

    /// 构建错误页面
    pub fn build_error_page(&self, message: &str) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    {css}
</head>
<body>
    <main class="container">
        <div class="error">
            <h2>暂时无法获取热门故事</h2>
            <p>{message}</p>
            <p><a href="/">重试</a></p>
        </div>
    </main>
</body>
</html>"#,
            title = text(&self.config.page_title),
            css = self.get_css_links(),
            message = text(message),
        )
    }

    /// 生成 CSS 外部链接
    fn get_css_links(&self) -> String {
        format!(
            r#"<link rel="stylesheet" href="{}css/main.css">"#,
            attr(&self.config.asset_base_path)
        )
    }
}

fn render_story(story: &Story, offset: &FixedOffset) -> String {
    let rank = story.index + 1;

    if story.is_placeholder() {
        return format!(
            "            <li class=\"story story-error\" value=\"{}\"><span class=\"title\">{}</span></li>\n",
            rank,
            text(&story.title)
        );
    }

    let (headline, original) = if story.title_translated.is_empty() {
        (story.title.as_str(), String::new())
    } else {
        (
            story.title_translated.as_str(),
            format!("<div class=\"original\">{}</div>", text(&story.title)),
        )
    };

    let domain = story
        .domain()
        .map(|d| format!(" <span class=\"domain\">({})</span>", text(d)))
        .unwrap_or_default();

    format!(
        "            <li class=\"story\" value=\"{rank}\">\
<div class=\"title\"><a href=\"{link}\" rel=\"noopener\">{headline}</a>{domain}</div>\
{original}\
<div class=\"meta\">{score} points by {by} · {posted} · <a href=\"{discussion}\">{comments} comments</a></div>\
</li>\n",
        rank = rank,
        link = attr(&story.link()),
        headline = text(headline),
        domain = domain,
        original = original,
        score = story.score,
        by = text(&story.by),
        posted = format_unix(story.time, offset),
        discussion = attr(&story.discussion_url()),
        comments = story.descendants,
    )
}

fn format_unix(secs: i64, offset: &FixedOffset) -> String {
    DateTime::from_timestamp(secs, 0)
        .map(|dt| dt.with_timezone(offset).format("%m-%d %H:%M").to_string())
        .unwrap_or_default()
}
