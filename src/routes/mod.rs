//! HTTP surface for the financial insights API
//!
//! Route handlers stay thin: negotiate the representation, run the
//! validator, delegate computation or the advisor call, and shape the
//! outcome. All policy lives in the shared modules, not per route.

mod calc;
mod chat;
mod general;

use crate::advisor::Advisor;
use crate::config::AppConfig;
use crate::error::ApiError;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub chat_advisor: Arc<dyn Advisor>,
    pub agent_advisor: Arc<dyn Advisor>,
}

/// Shape an error as the structured-data representation.
pub(crate) fn error_response(err: &ApiError) -> Response {
    (err.status_code(), Json(json!({ "error": err.to_string() }))).into_response()
}

/// Shape a validator failure, naming the parameter that failed.
pub(crate) fn field_error_response(field: &str, err: &ApiError) -> Response {
    (
        err.status_code(),
        Json(json!({ "error": format!("{}: {}", field, err) })),
    )
        .into_response()
}

/// Collect missing required parameters into one semicolon-joined 400.
pub(crate) fn missing_params_response(missing: &[&str]) -> Response {
    let message = missing
        .iter()
        .map(|name| ApiError::MissingParameter(name.to_string()).to_string())
        .collect::<Vec<_>>()
        .join("; ");

    (
        axum::http::StatusCode::BAD_REQUEST,
        Json(json!({ "error": message })),
    )
        .into_response()
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/sum", get(calc::sum))
        .route("/calc", get(calc::calc))
        .route("/chat", get(chat::chat))
        .route("/agent", get(chat::agent))
        .route("/hello-world", get(general::hello_world))
        .route("/health", get(general::health))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

pub async fn start_server(
    state: AppState,
) -> std::result::Result<(), Box<dyn std::error::Error>> {
    let port = state.config.port;
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", port)).await?;

    info!("API Server listening on http://0.0.0.0:{}", port);
    info!("Local: http://127.0.0.1:{}", port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Result;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    struct CannedAdvisor {
        reply: &'static str,
    }

    #[async_trait::async_trait]
    impl Advisor for CannedAdvisor {
        async fn answer(&self, _query: &str) -> Result<String> {
            Ok(self.reply.to_string())
        }
    }

    struct FailingAdvisor;

    #[async_trait::async_trait]
    impl Advisor for FailingAdvisor {
        async fn answer(&self, _query: &str) -> Result<String> {
            Err(ApiError::Provider("Nebius API key not configured".into()))
        }
    }

    fn test_router() -> Router {
        let state = AppState {
            config: Arc::new(AppConfig::default()),
            chat_advisor: Arc::new(CannedAdvisor {
                reply: "Consider broad index funds.",
            }),
            agent_advisor: Arc::new(FailingAdvisor),
        };
        create_router(state)
    }

    async fn get_json(uri: &str) -> (StatusCode, Value) {
        let response = test_router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap();
        (status, body)
    }

    async fn get_html(uri: &str) -> (StatusCode, String) {
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::ACCEPT, "text/html,application/xml;q=0.9,*/*;q=0.8")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn sum_happy_path() {
        let (status, body) = get_json("/sum?num1=5&num2=7").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"num1": 5, "num2": 7, "total": 12}));
    }

    #[tokio::test]
    async fn sum_rejects_invalid_number() {
        let (status, body) = get_json("/sum?num1=abc&num2=7").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "num1: Invalid number format");
    }

    #[tokio::test]
    async fn sum_lists_missing_parameters() {
        let (status, body) = get_json("/sum?num1=5").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required parameter 'num2'");
    }

    #[tokio::test]
    async fn calc_divide() {
        let (status, body) = get_json("/calc?num1=10&num2=4&operation=divide").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["operation"], "divide");
        assert_eq!(body["num1"], 10);
        assert_eq!(body["num2"], 4);
        assert_eq!(body["res"], 2.5);
    }

    #[tokio::test]
    async fn calc_divide_by_zero() {
        let (status, body) = get_json("/calc?num1=5&num2=0&operation=divide").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Cannot divide by zero");
    }

    #[tokio::test]
    async fn calc_lists_all_missing_parameters() {
        let (status, body) = get_json("/calc?operation=add").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Missing required parameter 'num1'; Missing required parameter 'num2'"
        );
    }

    #[tokio::test]
    async fn calc_rejects_unknown_operation() {
        let (status, body) = get_json("/calc?num1=1&num2=2&operation=modulo").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("modulo"));
        assert!(message.contains("add, subtract, multiply, divide"));
    }

    #[tokio::test]
    async fn docs_view_without_params_shows_usage() {
        for uri in ["/sum", "/calc", "/chat", "/agent", "/hello-world"] {
            let (status, page) = get_html(uri).await;
            assert_eq!(status, StatusCode::OK, "uri: {}", uri);
            assert!(page.contains("<h2>Parameters</h2>"), "uri: {}", uri);
            assert!(page.contains("Example"), "uri: {}", uri);
        }
    }

    #[tokio::test]
    async fn docs_view_with_params_still_validates() {
        // Default policy: parameters present means validation proceeds even
        // for HTML-preferring requests, and errors come back structured.
        let response = test_router()
            .oneshot(
                Request::builder()
                    .uri("/sum?num1=abc&num2=7")
                    .header(header::ACCEPT, "text/html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "num1: Invalid number format");
    }

    #[tokio::test]
    async fn docs_policy_always_overrides_errors() {
        let state = AppState {
            config: Arc::new(AppConfig {
                docs_policy: crate::negotiate::DocsPolicy::Always,
                ..AppConfig::default()
            }),
            chat_advisor: Arc::new(CannedAdvisor { reply: "ok" }),
            agent_advisor: Arc::new(FailingAdvisor),
        };

        let response = create_router(state)
            .oneshot(
                Request::builder()
                    .uri("/sum?num1=abc&num2=7")
                    .header(header::ACCEPT, "text/html")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let page = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(page.contains("<h2>Parameters</h2>"));
    }

    #[tokio::test]
    async fn chat_returns_question_and_answer() {
        let (status, body) = get_json("/chat?query=what%20is%20RSI").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["question"], "what is RSI");
        assert_eq!(body["answer"], "Consider broad index funds.");
    }

    #[tokio::test]
    async fn chat_requires_query() {
        let (status, body) = get_json("/chat").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Query parameter is required");
    }

    #[tokio::test]
    async fn agent_surfaces_provider_failure() {
        let (status, body) = get_json("/agent?query=diversification").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("not configured"));
    }

    #[tokio::test]
    async fn hello_world_greets() {
        let (status, body) = get_json("/hello-world?name=Alice").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Hello Alice");

        let (status, body) = get_json("/hello-world").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Hello World");
    }

    #[tokio::test]
    async fn health_reports_status_and_services() {
        let (status, body) = get_json("/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["api"]["nebius_api"], "not configured");
        assert_eq!(body["services"]["calc"], "/calc");
    }
}
