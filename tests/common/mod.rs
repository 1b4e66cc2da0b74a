// 集成测试公共模块
//
// 在本地临时端口启动一个模拟上游（Hacker News + 翻译服务），
// 让真实的 reqwest 客户端对着它运行。

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::FixedOffset;
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use hackernews_zh::builders::HtmlBuilderConfig;
use hackernews_zh::cache::StoryCache;
use hackernews_zh::hn::HnClient;
use hackernews_zh::pipeline::{Aggregator, StoryDigest};
use hackernews_zh::translation::{TranslationConfig, TranslationProvider, Translator};
use hackernews_zh::web::AppState;

/// 模拟翻译结果的前缀
pub const TRANSLATED_PREFIX: &str = "译: ";

/// 模拟上游的可调状态
#[derive(Default)]
pub struct MockState {
    pub top_ids: Mutex<Vec<u64>>,
    pub top_fails: AtomicBool,
    pub item_delays: Mutex<HashMap<u64, Duration>>,
    pub failing_items: Mutex<HashSet<u64>>,
    pub null_items: Mutex<HashSet<u64>>,
    pub titles: Mutex<HashMap<u64, String>>,
    pub untranslatable: Mutex<HashSet<String>>,
    pub empty_translations: Mutex<HashSet<String>>,
    pub top_requests: AtomicUsize,
    pub item_requests: AtomicUsize,
    pub translate_requests: AtomicUsize,
    pub completion_order: Mutex<Vec<u64>>,
    pub last_api_key: Mutex<Option<String>>,
    pub last_target_lang: Mutex<Option<String>>,
}

impl MockState {
    pub fn set_top_ids(&self, ids: &[u64]) {
        *self.top_ids.lock().unwrap() = ids.to_vec();
    }

    pub fn delay_item(&self, id: u64, delay: Duration) {
        self.item_delays.lock().unwrap().insert(id, delay);
    }

    pub fn fail_item(&self, id: u64) {
        self.failing_items.lock().unwrap().insert(id);
    }

    pub fn null_item(&self, id: u64) {
        self.null_items.lock().unwrap().insert(id);
    }

    pub fn set_title(&self, id: u64, title: &str) {
        self.titles.lock().unwrap().insert(id, title.to_string());
    }

    pub fn fail_translation(&self, text: &str) {
        self.untranslatable.lock().unwrap().insert(text.to_string());
    }

    pub fn empty_translation(&self, text: &str) {
        self.empty_translations.lock().unwrap().insert(text.to_string());
    }

    pub fn top_requests(&self) -> usize {
        self.top_requests.load(Ordering::SeqCst)
    }

    pub fn item_requests(&self) -> usize {
        self.item_requests.load(Ordering::SeqCst)
    }

    pub fn translate_requests(&self) -> usize {
        self.translate_requests.load(Ordering::SeqCst)
    }

    pub fn completion_order(&self) -> Vec<u64> {
        self.completion_order.lock().unwrap().clone()
    }

    pub fn title_for(&self, id: u64) -> String {
        self.titles
            .lock()
            .unwrap()
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("Story {}", id))
    }
}

/// 模拟上游服务器
pub struct MockUpstream {
    pub base_url: String,
    pub state: Arc<MockState>,
    handle: JoinHandle<()>,
}

impl MockUpstream {
    pub async fn start() -> Self {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/v0/topstories.json", get(top_stories))
            .route("/v0/item/:file", get(item))
            .route("/translate/google", post(google_translate))
            .route("/translate/deeplx", post(deeplx_translate))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock upstream");
        let addr = listener.local_addr().expect("mock upstream address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock upstream crashed");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
            handle,
        }
    }

    pub fn hn_api_url(&self) -> String {
        format!("{}/v0", self.base_url)
    }

    pub fn hn_client(&self) -> HnClient {
        HnClient::new(self.hn_api_url()).expect("hn client")
    }

    pub fn translation_config(&self, provider: TranslationProvider) -> TranslationConfig {
        let path = match provider {
            TranslationProvider::Google => "google",
            TranslationProvider::DeepLx => "deeplx",
        };
        TranslationConfig::new(provider, format!("{}/translate/{}", self.base_url, path))
    }

    pub fn translator(&self) -> Translator {
        Translator::new(self.translation_config(TranslationProvider::Google)).expect("translator")
    }

    pub fn aggregator(&self, page_size: usize) -> Aggregator {
        Aggregator::new(self.hn_client(), self.translator(), page_size)
    }

    pub fn digest(&self, page_size: usize) -> StoryDigest {
        StoryDigest::new(
            self.aggregator(page_size),
            Arc::new(StoryCache::new()),
            FixedOffset::east_opt(8 * 3600).unwrap(),
        )
    }

    pub fn app_state(&self, page_size: usize) -> AppState {
        AppState {
            digest: self.digest(page_size),
            html: HtmlBuilderConfig::default(),
        }
    }
}

impl Drop for MockUpstream {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn top_stories(State(state): State<Arc<MockState>>) -> Response {
    state.top_requests.fetch_add(1, Ordering::SeqCst);
    if state.top_fails.load(Ordering::SeqCst) {
        return (StatusCode::SERVICE_UNAVAILABLE, "down").into_response();
    }
    let ids = state.top_ids.lock().unwrap().clone();
    Json(ids).into_response()
}

async fn item(State(state): State<Arc<MockState>>, Path(file): Path<String>) -> Response {
    state.item_requests.fetch_add(1, Ordering::SeqCst);

    let Some(id) = file.strip_suffix(".json").and_then(|id| id.parse::<u64>().ok()) else {
        return (StatusCode::BAD_REQUEST, "bad item path").into_response();
    };

    let delay = state.item_delays.lock().unwrap().get(&id).copied();
    if let Some(delay) = delay {
        tokio::time::sleep(delay).await;
    }
    state.completion_order.lock().unwrap().push(id);

    if state.failing_items.lock().unwrap().contains(&id) {
        return (StatusCode::INTERNAL_SERVER_ERROR, "item backend error").into_response();
    }
    if state.null_items.lock().unwrap().contains(&id) {
        return Json(Value::Null).into_response();
    }

    Json(json!({
        "by": format!("user{}", id),
        "descendants": id % 7,
        "id": id,
        "kids": [id * 100, id * 100 + 1],
        "score": id * 10,
        "time": 1_700_000_000 + id,
        "title": state.title_for(id),
        "type": "story",
        "url": format!("https://example.com/{}", id)
    }))
    .into_response()
}

async fn google_translate(
    State(state): State<Arc<MockState>>,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<Value>,
) -> Response {
    state.translate_requests.fetch_add(1, Ordering::SeqCst);
    *state.last_api_key.lock().unwrap() = query.get("key").cloned();
    *state.last_target_lang.lock().unwrap() = body["target"].as_str().map(str::to_string);

    let text = body["q"][0].as_str().unwrap_or_default().to_string();
    if state.untranslatable.lock().unwrap().contains(&text) {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": {"code": 500, "message": "backend unavailable"}})),
        )
            .into_response();
    }
    if state.empty_translations.lock().unwrap().contains(&text) {
        return Json(json!({"data": {"translations": []}})).into_response();
    }

    Json(json!({
        "data": {
            "translations": [
                {"translatedText": format!("{}{}", TRANSLATED_PREFIX, text), "detectedSourceLanguage": "en"}
            ]
        }
    }))
    .into_response()
}

async fn deeplx_translate(State(state): State<Arc<MockState>>, Json(body): Json<Value>) -> Response {
    state.translate_requests.fetch_add(1, Ordering::SeqCst);
    *state.last_target_lang.lock().unwrap() = body["target_lang"].as_str().map(str::to_string);

    let text = body["text"].as_str().unwrap_or_default().to_string();
    if state.untranslatable.lock().unwrap().contains(&text) {
        return Json(json!({"code": 503, "message": "quota exceeded"})).into_response();
    }
    if state.empty_translations.lock().unwrap().contains(&text) {
        return Json(json!({"code": 200, "data": ""})).into_response();
    }

    Json(json!({"code": 200, "id": 1, "data": format!("{}{}", TRANSLATED_PREFIX, text)})).into_response()
}
