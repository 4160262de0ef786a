//! Request handlers

use super::AppState;
use crate::i18n::MessageKey;
use crate::types::CreativeBrief;
use crate::Error;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

pub const ALLOW_HEADERS: &str = "Content-Type";
pub const ALLOW_METHODS: &str = "POST, OPTIONS";

pub async fn health_handler() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Single entry point for every method on the generate paths.
pub async fn generate_handler(
    State(state): State<AppState>,
    method: Method,
    body: Bytes,
) -> Response {
    if method == Method::OPTIONS {
        return (
            StatusCode::OK,
            [
                (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
                (header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOW_HEADERS),
                (header::ACCESS_CONTROL_ALLOW_METHODS, ALLOW_METHODS),
            ],
            "",
        )
            .into_response();
    }

    if method != Method::POST {
        return (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed").into_response();
    }

    let brief: CreativeBrief = match serde_json::from_slice(&body) {
        Ok(brief) => brief,
        Err(e) => {
            warn!(error = %e, "rejecting malformed brief");
            return error_response(&state, Error::invalid_request(e.to_string()));
        }
    };

    match state.director.generate(&brief).await {
        Ok(result) => (StatusCode::OK, Json(json!({ "result": result }))).into_response(),
        Err(e) => error_response(&state, e),
    }
}

/// 500 with the localized message only; no internal detail leaves the process.
fn error_response(state: &AppState, err: Error) -> Response {
    error!(class = err.class(), error = %err, "request failed");
    let locale = state.director.locale();
    let message = format!(
        "{}: {}",
        locale.text(MessageKey::FailurePrefix),
        err.localized(locale)
    );
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}
