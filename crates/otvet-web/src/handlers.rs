//! HTTP handlers: the page and the ask endpoint

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

use crate::router::AppContext;

/// Fixed user-facing answer when the inference endpoint is unreachable or
/// failing on its side
pub const FALLBACK_ANSWER: &str = "Сервер временно недоступен, попробуйте позже";

const INDEX_HTML: &str = include_str!("../static/index.html");

#[derive(Deserialize)]
pub struct AskRequest {
    pub question: String,
}

#[derive(Serialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Serve the one-page UI
pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Answer a question
///
/// Transient upstream failures degrade to the fixed fallback answer;
/// invalid input and permanent failures become proper error responses.
pub async fn ask(
    State(context): State<Arc<AppContext>>,
    Json(request): Json<AskRequest>,
) -> Response {
    match context.engine.answer(&request.question).await {
        Ok(answer) => (StatusCode::OK, Json(AskResponse { answer })).into_response(),
        Err(err) if err.is_transient() => {
            warn!(%err, "inference unavailable, serving fallback answer");
            (
                StatusCode::OK,
                Json(AskResponse {
                    answer: FALLBACK_ANSWER.to_string(),
                }),
            )
                .into_response()
        }
        Err(otvet_core::Error::InvalidInput(_)) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "Введите вопрос".to_string(),
            }),
        )
            .into_response(),
        Err(err) => {
            error!(%err, "request failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qa::QaEngine;
    use crate::qa::tests::{EchoProvider, FailingProvider, StaticRetriever};
    use otvet_core::Error;

    fn context_with(engine: QaEngine) -> Arc<AppContext> {
        Arc::new(AppContext { engine })
    }

    async fn call(context: Arc<AppContext>, question: &str) -> (StatusCode, serde_json::Value) {
        let response = ask(
            State(context),
            Json(AskRequest {
                question: question.to_string(),
            }),
        )
        .await;

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn success_returns_extracted_answer() {
        let engine = QaEngine::new(
            Arc::new(StaticRetriever),
            Arc::new(EchoProvider {
                continuation: "Москва. И ещё немного.".to_string(),
            }),
        );

        let (status, body) = call(context_with(engine), "Какая столица России?").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], "Москва.");
    }

    #[tokio::test]
    async fn transient_failure_serves_fallback_without_erroring() {
        let engine = QaEngine::new(
            Arc::new(StaticRetriever),
            Arc::new(FailingProvider {
                error: || Error::Upstream {
                    status: 500,
                    body: "internal".to_string(),
                },
            }),
        );

        let (status, body) = call(context_with(engine), "Любой вопрос").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn timeout_serves_fallback_without_erroring() {
        let engine = QaEngine::new(
            Arc::new(StaticRetriever),
            Arc::new(FailingProvider {
                error: || Error::Timeout("30s elapsed".to_string()),
            }),
        );

        let (status, body) = call(context_with(engine), "Любой вопрос").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["answer"], FALLBACK_ANSWER);
    }

    #[tokio::test]
    async fn empty_question_is_a_bad_request() {
        let engine = QaEngine::new(
            Arc::new(StaticRetriever),
            Arc::new(EchoProvider {
                continuation: String::new(),
            }),
        );

        let (status, body) = call(context_with(engine), "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Введите вопрос");
    }

    #[tokio::test]
    async fn permanent_failure_is_an_internal_error() {
        let engine = QaEngine::new(
            Arc::new(StaticRetriever),
            Arc::new(FailingProvider {
                error: || Error::MalformedResponse("no generated_text".to_string()),
            }),
        );

        let (status, body) = call(context_with(engine), "Любой вопрос").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("no generated_text")
        );
    }

    #[tokio::test]
    async fn index_serves_the_page() {
        let page = index().await;
        assert!(page.0.contains("Спросить"));
        assert!(page.0.contains("textarea"));
    }
}
