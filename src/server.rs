use std::net::SocketAddr;

use anyhow::Result;
use askama::Template;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use serde_json::Value;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::ask::{parse_ask_body, AskService};
use crate::config::AppConfig;
use crate::models::AskResponse;

#[derive(Clone)]
struct AppState {
    ask: AskService,
    max_question_chars: usize,
}

pub fn router(ask: AskService) -> Router {
    let state = AppState {
        max_question_chars: ask.config().limits.max_question_chars,
        ask,
    };

    Router::new()
        .route("/", get(index_page))
        .route("/api/ask", post(ask_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: AppConfig, ask: AskService) -> Result<()> {
    let app = router(ask);

    let addr: SocketAddr = config.bind_addr.parse()?;
    tracing::info!("listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

async fn index_page() -> Result<Html<String>, ApiError> {
    let body = IndexTemplate {
        title: "Video Game Wingman",
    }
    .render()?;
    Ok(Html(body))
}

async fn ask_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<AskResponse>, ApiError> {
    let body: Value = serde_json::from_slice(&body)
        .map_err(|_| ApiError::bad_request("Invalid JSON body".to_string()))?;

    let request = parse_ask_body(&body).ok_or_else(|| {
        ApiError::bad_request(
            "Body must be { question: string } with non-empty question.".to_string(),
        )
    })?;

    if question_length(&request.question) > state.max_question_chars {
        return Err(ApiError::bad_request(format!(
            "Question must be at most {} characters.",
            state.max_question_chars
        )));
    }

    let request_id = Uuid::new_v4();
    tracing::debug!("ask {} received: {}", request_id, request.question);

    let outcome = state.ask.answer(&request.question).await.map_err(|err| {
        tracing::error!("ask {} failed: {:#}", request_id, err);
        ApiError::from(err)
    })?;

    Ok(Json(AskResponse {
        answer: outcome.answer,
        fact: outcome.fact,
    }))
}

/// Length in UTF-16 code units, so astral characters count twice.
fn question_length(question: &str) -> usize {
    question.encode_utf16().count()
}

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate {
    title: &'static str,
}

#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: value.to_string(),
        }
    }
}

impl From<askama::Error> for ApiError {
    fn from(value: askama::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: value.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}
