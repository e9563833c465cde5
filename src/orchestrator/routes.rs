//! HTTP 接口
//!
//! - `GET /api/health`
//! - `GET /api/game/ids?difficulty=<easy|normal|hard>`
//! - `GET /api/game/:id`
//! - `GET /api/quiz/question[?difficulty=<easy|normal|hard>]`

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::error::{FetchError, QuizError};
use crate::models::difficulty::Difficulty;
use crate::workflow::{QuestionCtx, QuestionFlow};

const NO_STORE: [(header::HeaderName, &str); 1] = [(header::CACHE_CONTROL, "no-store")];

/// 路由共享状态
#[derive(Clone)]
pub struct AppState {
    pub flow: Arc<QuestionFlow>,
    pub default_difficulty: Difficulty,
}

#[derive(Debug, Deserialize)]
struct DifficultyQuery {
    difficulty: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GameIdsResponse {
    game_ids: Vec<String>,
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

/// 接口错误响应
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, NO_STORE, Json(ErrorBody { error: self.message })).into_response()
    }
}

impl From<QuizError> for ApiError {
    fn from(err: QuizError) -> Self {
        let status = if err.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        ApiError::new(status, err.to_string())
    }
}

impl From<FetchError> for ApiError {
    fn from(err: FetchError) -> Self {
        let status = match err {
            FetchError::NotFound { .. } => StatusCode::NOT_FOUND,
            FetchError::Transient { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::new(status, err.to_string())
    }
}

/// 解析难度参数，缺失时使用 `default`（为 `None` 时缺失即非法）
fn parse_difficulty(raw: Option<&str>, default: Option<Difficulty>) -> Result<Difficulty, QuizError> {
    match raw {
        Some(value) => Difficulty::parse(value).ok_or_else(|| QuizError::InvalidDifficulty {
            given: Some(value.to_string()),
        }),
        None => default.ok_or(QuizError::InvalidDifficulty { given: None }),
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/game/ids", get(game_ids))
        .route("/api/game/:id", get(game_record))
        .route("/api/quiz/question", get(quiz_question))
        .with_state(state)
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn game_ids(
    State(state): State<AppState>,
    Query(query): Query<DifficultyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let difficulty = parse_difficulty(query.difficulty.as_deref(), None).map_err(|e| {
        warn!("⚠️ {}", e);
        ApiError::from(e)
    })?;

    let game_ids = state
        .flow
        .corpus()
        .get_cumulative_ids(difficulty)
        .await
        .map_err(|e| {
            error!("❌ 获取游戏 ID 列表失败: {}", e);
            ApiError::from(QuizError::from(e))
        })?;

    Ok((NO_STORE, Json(GameIdsResponse { game_ids })))
}

async fn game_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.flow.fetcher().fetch(&id).await?;
    Ok((NO_STORE, Json(record)))
}

async fn quiz_question(
    State(state): State<AppState>,
    Query(query): Query<DifficultyQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let difficulty = parse_difficulty(query.difficulty.as_deref(), Some(state.default_difficulty)).map_err(|e| {
        warn!("⚠️ {}", e);
        ApiError::from(e)
    })?;

    let ctx = QuestionCtx::new(difficulty);
    let payload = state.flow.run(&ctx).await?;
    Ok((NO_STORE, Json(payload)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(parse_difficulty(Some("hard"), None).unwrap(), Difficulty::Hard);
        assert_eq!(
            parse_difficulty(None, Some(Difficulty::Normal)).unwrap(),
            Difficulty::Normal
        );
        assert!(matches!(
            parse_difficulty(None, None),
            Err(QuizError::InvalidDifficulty { given: None })
        ));
        assert!(matches!(
            parse_difficulty(Some("HARD"), Some(Difficulty::Easy)),
            Err(QuizError::InvalidDifficulty { given: Some(_) })
        ));
    }

    #[test]
    fn test_error_status_mapping() {
        let bad_input = ApiError::from(QuizError::InvalidDifficulty { given: None });
        assert_eq!(bad_input.status, StatusCode::BAD_REQUEST);

        let exhausted = ApiError::from(QuizError::Exhausted { attempts: 10 });
        assert_eq!(exhausted.status, StatusCode::INTERNAL_SERVER_ERROR);

        let not_found = ApiError::from(FetchError::NotFound { id: "1".into() });
        assert_eq!(not_found.status, StatusCode::NOT_FOUND);
    }
}
