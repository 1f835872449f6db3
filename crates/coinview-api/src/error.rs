//! Error types for coinview-api

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use coinview_core::{ErrorDetails, FetchError};
use coinview_utils::escape_html;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Fetch(e) => fetch_status(e),
        }
    }
}

/// Status for a page or endpoint whose loader failed
pub fn fetch_status(err: &FetchError) -> StatusCode {
    if err.is_client_error() {
        StatusCode::BAD_REQUEST
    } else {
        StatusCode::BAD_GATEWAY
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = match &self {
            ApiError::NotFound { .. } => serde_json::json!({
                "code": "NOT_FOUND",
                "message": self.to_string(),
            }),
            ApiError::Fetch(e) => serde_json::to_value(e.to_details())
                .unwrap_or_else(|_| serde_json::json!({ "message": e.to_string() })),
        };
        (self.status(), Json(body)).into_response()
    }
}

/// Error panel shown in place of a page whose data could not be loaded
pub fn error_panel(heading: &str, details: &ErrorDetails) -> String {
    let suggestions: String = details
        .suggestions
        .iter()
        .map(|s| format!("<li>{}</li>", escape_html(s)))
        .collect();

    format!(
        r#"<div class='bg-red-50 border border-red-200 rounded-xl p-6' role='alert'>
            <h1 class='text-xl font-bold text-red-700 mb-2'>{}</h1>
            <p class='text-sm text-red-600 mb-1'><code>{}</code></p>
            <p class='text-red-700'>{}</p>
            <ul class='list-disc ml-6 mt-3 text-sm text-gray-600'>{}</ul>
        </div>"#,
        escape_html(heading),
        details.code,
        escape_html(&details.message),
        suggestions
    )
}
