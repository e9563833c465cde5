use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::extract::{Path, State};
use axum::http::{header, Request, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower::ServiceExt;

use boardgame_quiz::config::Config;
use boardgame_quiz::infrastructure::{HttpBlobStore, SeededRandom, SystemClock};
use boardgame_quiz::orchestrator::{build_state, router};
use boardgame_quiz::services::HttpRecordFetcher;

const BUCKET: &str = "boardgame-quiz";
const KEY: &str = "data/game-ids.json";

/// 在随机端口上启动一个桩服务，返回 `http://127.0.0.1:port`
async fn spawn_stub(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("绑定端口失败");
    let addr = listener.local_addr().expect("获取地址失败");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("桩服务异常退出");
    });
    format!("http://{}", addr)
}

type Records = Arc<HashMap<String, Value>>;

async fn stub_record(State(records): State<Records>, Path(id): Path<String>) -> impl IntoResponse {
    match records.get(&id) {
        Some(record) => (StatusCode::OK, Json(record.clone())).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

fn record(id: &str, name: &str, average: &str) -> Value {
    json!({
        "type": "boardgame",
        "id": id,
        "name": [{"type": "primary", "value": name}],
        "yearpublished": "2017",
        "statistics": {"ratings": {"average": average, "usersrated": "1000"}}
    })
}

/// 启动记录提供方与对象存储两个桩服务，返回可直接调用的路由
async fn quiz_app(corpus: Value, records: Vec<Value>, max_attempts: usize) -> Router {
    let records: Records = Arc::new(
        records
            .into_iter()
            .map(|r| (r["id"].as_str().unwrap_or_default().to_string(), r))
            .collect(),
    );
    let provider_url = spawn_stub(
        Router::new()
            .route("/api/game/:id", get(stub_record))
            .with_state(records),
    )
    .await;

    let blob_path = format!("/{}/{}", BUCKET, KEY);
    let blob_url = spawn_stub(Router::new().route(&blob_path, get(move || async move { Json(corpus) }))).await;

    let config = Config {
        record_api_base_url: format!("{}/api/game", provider_url),
        corpus_store_url: blob_url.clone(),
        corpus_bucket: BUCKET.to_string(),
        corpus_key: KEY.to_string(),
        max_attempts,
        ..Config::default()
    };

    let timeout = Duration::from_secs(5);
    let store = HttpBlobStore::new(&blob_url, timeout).expect("创建对象存储失败");
    let fetcher = HttpRecordFetcher::new(&config.record_api_base_url, timeout).expect("创建抓取服务失败");
    let state = build_state(
        &config,
        Arc::new(store),
        Arc::new(fetcher),
        Arc::new(SystemClock),
        Arc::new(SeededRandom::new(42)),
    );
    router(state)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, Option<String>, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("构造请求失败"))
        .await
        .expect("请求失败");
    let status = response.status();
    let cache_control = response
        .headers()
        .get(header::CACHE_CONTROL)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("读取响应失败");
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("响应不是 JSON")
    };
    (status, cache_control, body)
}

fn sample_corpus() -> Value {
    json!({
        "updatedAt": "2024-05-01T00:00:00Z",
        "ids": {"easy": ["1", "2"], "normal": ["3"], "hard": ["4", "2"]}
    })
}

fn sample_records() -> Vec<Value> {
    vec![
        record("1", "Catan", "7.1"),
        record("2", "Gloomhaven", "8.7"),
        record("3", "Azul", "7.8"),
        record("4", "Twilight Imperium", "8.6"),
    ]
}

#[tokio::test]
async fn test_question_returns_higher_rated_game() {
    let app = quiz_app(sample_corpus(), sample_records(), 10).await;

    for _ in 0..5 {
        let (status, cache_control, body) = get_json(&app, "/api/quiz/question?difficulty=easy").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cache_control.as_deref(), Some("no-store"));
        assert_eq!(body["questionText"], "評価が高いのはどっち？");

        // easy 只有 1 和 2，评分更高的是 2
        let a = body["gameA"]["id"].as_str().unwrap().to_string();
        let b = body["gameB"]["id"].as_str().unwrap().to_string();
        assert_ne!(a, b);
        let mut pair = vec![a, b];
        pair.sort();
        assert_eq!(pair, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(body["correctAnswerId"], "2");
        assert!(body["requestId"].as_str().is_some());
    }
}

#[tokio::test]
async fn test_question_without_difficulty_uses_default() {
    let app = quiz_app(sample_corpus(), sample_records(), 10).await;

    let (status, _, body) = get_json(&app, "/api/quiz/question").await;
    assert_eq!(status, StatusCode::OK);

    // 默认难度 normal 覆盖 easy + normal
    let allowed = ["1", "2", "3"];
    for side in ["gameA", "gameB"] {
        let id = body[side]["id"].as_str().unwrap();
        assert!(allowed.contains(&id), "{} 不在 normal 范围内", id);
    }
}

#[tokio::test]
async fn test_question_rejects_invalid_difficulty() {
    let app = quiz_app(sample_corpus(), sample_records(), 10).await;

    let (status, cache_control, body) = get_json(&app, "/api/quiz/question?difficulty=expert").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(cache_control.as_deref(), Some("no-store"));
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("easy, normal, hard"));
}

#[tokio::test]
async fn test_game_ids_are_cumulative_and_deduplicated() {
    let app = quiz_app(sample_corpus(), sample_records(), 10).await;

    let (status, _, body) = get_json(&app, "/api/game/ids?difficulty=hard").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"gameIds": ["1", "2", "3", "4"]}));

    let (status, _, body) = get_json(&app, "/api/game/ids?difficulty=easy").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"gameIds": ["1", "2"]}));
}

#[tokio::test]
async fn test_game_ids_requires_difficulty() {
    let app = quiz_app(sample_corpus(), sample_records(), 10).await;

    let (status, _, _) = get_json(&app, "/api/game/ids").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_game_record_proxy() {
    let app = quiz_app(sample_corpus(), sample_records(), 10).await;

    let (status, _, body) = get_json(&app, "/api/game/3").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], "3");
    assert_eq!(body["name"][0]["value"], "Azul");

    let (status, _, _) = get_json(&app, "/api/game/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_question_fails_when_records_never_resolve() {
    // 语料中的 ID 在提供方都不存在
    let corpus = json!({"updatedAt": "", "ids": {"easy": ["100", "101", "102"]}});
    let app = quiz_app(corpus, sample_records(), 3).await;

    let (status, cache_control, body) = get_json(&app, "/api/quiz/question?difficulty=easy").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(cache_control.as_deref(), Some("no-store"));
    assert!(body["error"].as_str().is_some());
}

#[tokio::test]
async fn test_question_with_single_identifier_fails() {
    let corpus = json!({"updatedAt": "", "ids": {"easy": ["1"]}});
    let app = quiz_app(corpus, sample_records(), 10).await;

    let (status, _, _) = get_json(&app, "/api/quiz/question?difficulty=easy").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_health() {
    let app = quiz_app(sample_corpus(), sample_records(), 10).await;

    let (status, _, body) = get_json(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
