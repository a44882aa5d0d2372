//! LLM-backed endpoints: `/chat` and `/agent`
//!
//! Both forward the caller's question to an injected `Advisor` and echo the
//! question alongside the answer. No retries: an upstream failure surfaces
//! directly as a provider error.

use crate::advisor::Advisor;
use crate::docs::{ParamDoc, RouteDoc};
use crate::negotiate;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use super::{error_response, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct ChatParams {
    query: Option<String>,
}

const QUERY_DOC: ParamDoc = ParamDoc {
    name: "query",
    ty: "string",
    description: "The investment question to ask",
};

fn chat_doc() -> RouteDoc {
    RouteDoc {
        path: "/chat",
        method: "GET",
        description: "Chat endpoint that uses Nebius's LLaMa model to answer investment questions.",
        parameters: vec![QUERY_DOC],
        example_query: "?query=What%20are%20good%20tech%20stocks%20to%20invest%20in%3F",
        example_response: json!({
            "question": "What are good tech stocks to invest in?",
            "answer": "Some popular tech stocks to consider include Apple (AAPL), \
                Microsoft (MSFT), Google (GOOGL), and Amazon (AMZN). However, you \
                should always do your own research and consider your investment \
                goals and risk tolerance before investing."
        }),
    }
}

fn agent_doc() -> RouteDoc {
    RouteDoc {
        path: "/agent",
        method: "GET",
        description: "Agent endpoint that uses a Grok-backed advisor to provide investment advice.",
        parameters: vec![QUERY_DOC],
        example_query: "?query=Should%20I%20invest%20in%20index%20funds%3F",
        example_response: json!({
            "question": "Should I invest in index funds?",
            "answer": "Index funds are often a good choice for passive investors \
                looking for broad market exposure with low fees. The suitability \
                depends on your investment goals, time horizon, and risk tolerance."
        }),
    }
}

pub(super) async fn chat(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ChatParams>,
) -> Response {
    let advisor = state.chat_advisor.clone();
    answer_query(&state, &headers, params, chat_doc, advisor.as_ref()).await
}

pub(super) async fn agent(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<ChatParams>,
) -> Response {
    let advisor = state.agent_advisor.clone();
    answer_query(&state, &headers, params, agent_doc, advisor.as_ref()).await
}

async fn answer_query(
    state: &AppState,
    headers: &HeaderMap,
    params: ChatParams,
    doc: fn() -> RouteDoc,
    advisor: &dyn Advisor,
) -> Response {
    let representation = negotiate::negotiate(headers);
    let has_params = params.query.is_some();

    if state
        .config
        .docs_policy
        .wants_docs(representation, has_params)
    {
        return doc().render().into_response();
    }

    let query = match params.query.as_deref() {
        Some(q) if !q.trim().is_empty() => q,
        _ => {
            return (
                axum::http::StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Query parameter is required" })),
            )
                .into_response();
        }
    };

    match advisor.answer(query).await {
        Ok(answer) => {
            info!("advisor answered query: {}", query);
            Json(json!({ "question": query, "answer": answer })).into_response()
        }
        Err(e) => {
            warn!("advisor call failed: {}", e);
            error_response(&e)
        }
    }
}
