//! Arithmetic endpoints: `/sum` and `/calc`

use crate::calculator::{self, Operation};
use crate::docs::{ParamDoc, RouteDoc};
use crate::negotiate;
use crate::validator::validate_number;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use super::{error_response, field_error_response, missing_params_response, AppState};

const NUM1_DOC: ParamDoc = ParamDoc {
    name: "num1",
    ty: "number",
    description: "First number for calculation",
};

const NUM2_DOC: ParamDoc = ParamDoc {
    name: "num2",
    ty: "number",
    description: "Second number for calculation",
};

#[derive(Debug, Deserialize)]
pub(super) struct SumParams {
    num1: Option<String>,
    num2: Option<String>,
}

fn sum_doc() -> RouteDoc {
    RouteDoc {
        path: "/sum",
        method: "GET",
        description: "Sum two numbers provided as query parameters and return JSON result.",
        parameters: vec![NUM1_DOC, NUM2_DOC],
        example_query: "?num1=5&num2=7",
        example_response: json!({"num1": 5, "num2": 7, "total": 12}),
    }
}

pub(super) async fn sum(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SumParams>,
) -> Response {
    let representation = negotiate::negotiate(&headers);
    let has_params = params.num1.is_some() || params.num2.is_some();

    if state
        .config
        .docs_policy
        .wants_docs(representation, has_params)
    {
        return sum_doc().render().into_response();
    }

    let missing: Vec<&str> = [("num1", &params.num1), ("num2", &params.num2)]
        .iter()
        .filter(|(_, v)| v.is_none())
        .map(|(name, _)| *name)
        .collect();
    if !missing.is_empty() {
        return missing_params_response(&missing);
    }

    let max = state.config.max_magnitude;
    let num1 = match validate_number(params.num1.as_deref(), max) {
        Ok(n) => n,
        Err(e) => return field_error_response("num1", &e),
    };
    let num2 = match validate_number(params.num2.as_deref(), max) {
        Ok(n) => n,
        Err(e) => return field_error_response("num2", &e),
    };

    match calculator::checked_sum(num1.value(), num2.value()) {
        Ok(total) => {
            info!(%num1, %num2, total, "sum computed");
            let total = calculator::preserve_integer_form(num1, num2, total);
            Json(json!({ "num1": num1, "num2": num2, "total": total })).into_response()
        }
        Err(e) => error_response(&e),
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct CalcParams {
    num1: Option<String>,
    num2: Option<String>,
    operation: Option<String>,
}

fn calc_doc() -> RouteDoc {
    RouteDoc {
        path: "/calc",
        method: "GET",
        description: "Calculator endpoint that performs basic arithmetic operations on two numbers.",
        parameters: vec![
            NUM1_DOC,
            NUM2_DOC,
            ParamDoc {
                name: "operation",
                ty: "string",
                description: "One of 'add', 'subtract', 'multiply', or 'divide'",
            },
        ],
        example_query: "?num1=5&num2=3&operation=add",
        example_response: json!({"operation": "add", "num1": 5, "num2": 3, "res": 8}),
    }
}

pub(super) async fn calc(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CalcParams>,
) -> Response {
    let representation = negotiate::negotiate(&headers);
    let has_params =
        params.num1.is_some() || params.num2.is_some() || params.operation.is_some();

    if state
        .config
        .docs_policy
        .wants_docs(representation, has_params)
    {
        return calc_doc().render().into_response();
    }

    let missing: Vec<&str> = [
        ("num1", &params.num1),
        ("num2", &params.num2),
        ("operation", &params.operation),
    ]
    .iter()
    .filter(|(_, v)| v.is_none())
    .map(|(name, _)| *name)
    .collect();
    if !missing.is_empty() {
        return missing_params_response(&missing);
    }

    let operation: Operation = match params.operation.as_deref().unwrap_or_default().parse() {
        Ok(op) => op,
        Err(e) => return error_response(&e),
    };

    let max = state.config.max_magnitude;
    let num1 = match validate_number(params.num1.as_deref(), max) {
        Ok(n) => n,
        Err(e) => return field_error_response("num1", &e),
    };
    let num2 = match validate_number(params.num2.as_deref(), max) {
        Ok(n) => n,
        Err(e) => return field_error_response("num2", &e),
    };

    match calculator::calculate(operation, num1, num2) {
        Ok(result) => {
            info!(%operation, %num1, %num2, res = %result.res, "calculation computed");
            Json(result).into_response()
        }
        Err(e) => error_response(&e),
    }
}
