//! General-purpose endpoints: `/hello-world` and `/health`

use crate::docs::{ParamDoc, RouteDoc};
use crate::negotiate::{self, Representation};
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use super::AppState;

#[derive(Debug, Deserialize)]
pub(super) struct HelloParams {
    name: Option<String>,
}

fn greeting(name: Option<&str>) -> String {
    match name {
        Some(name) => format!("Hello {}", name),
        None => "Hello World".to_string(),
    }
}

fn hello_doc(name: Option<&str>) -> RouteDoc {
    RouteDoc {
        path: "/hello-world",
        method: "GET",
        description: "A simple greeting endpoint that returns a personalized message.",
        parameters: vec![ParamDoc {
            name: "name",
            ty: "string",
            description: "Optional name for personalized greeting",
        }],
        example_query: "",
        example_response: json!({ "message": greeting(name) }),
    }
}

pub(super) async fn hello_world(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HelloParams>,
) -> Response {
    let representation = negotiate::negotiate(&headers);
    let has_params = params.name.is_some();

    if state
        .config
        .docs_policy
        .wants_docs(representation, has_params)
    {
        return hello_doc(params.name.as_deref()).render().into_response();
    }

    Json(json!({ "message": greeting(params.name.as_deref()) })).into_response()
}

fn health_payload(state: &AppState) -> Value {
    let configured = |key: &Option<String>| {
        if key.is_some() {
            "connected"
        } else {
            "not configured"
        }
    };

    json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptime": "OK",
        "api": {
            "nebius_api": configured(&state.config.nebius_api_key),
            "grok_api": configured(&state.config.grok_api_key),
        },
        "services": {
            "chat": "/chat",
            "agent": "/agent",
            "calc": "/calc",
            "sum": "/sum",
        },
    })
}

pub(super) async fn health(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let payload = health_payload(&state);

    // The documentation view embeds the live payload as its example, so the
    // page reflects the current provider configuration.
    if negotiate::negotiate(&headers) == Representation::Html {
        let doc = RouteDoc {
            path: "/health",
            method: "GET",
            description: "Health check endpoint to verify the API server status and connections.",
            parameters: vec![],
            example_query: "",
            example_response: payload,
        };
        return doc.render().into_response();
    }

    Json(payload).into_response()
}
