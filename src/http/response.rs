//! Response bodies and error mapping.
//!
//! # Responsibilities
//! - Shape the `/convert` success body
//! - Map request failures to status codes and JSON bodies
//!
//! # Design Decisions
//! - Invalid input and out-of-range sizes share one 404 body; clients
//!   cannot tell them apart
//! - Missing fields are a client error (400) detected before any lookup
//! - Bodies cut off by the body limit keep their 413, whichever layer
//!   notices first

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::observability::metrics::Outcome;
use crate::sizing::{Gender, MatchError, SizeRow};

pub const MISSING_FIELDS_MESSAGE: &str = "Missing required fields";
pub const MALFORMED_BODY_MESSAGE: &str = "Malformed request body";
pub const BODY_TOO_LARGE_MESSAGE: &str = "Request body too large";
pub const NO_MATCH_MESSAGE: &str = "Size out of range or invalid.";

/// Successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConvertResponse {
    pub success: bool,
    pub input: ConversionInput,
    pub conversions: SizeRow,
    /// Chart the row came from. Not part of the body.
    #[serde(skip)]
    pub chart: Gender,
}

/// The request fields, echoed back as received.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionInput {
    pub scale: serde_json::Value,
    pub size: serde_json::Value,
    pub gender: serde_json::Value,
}

/// Why a `/convert` request failed.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// `scale`, `size` or `gender` absent or falsy (`null`, `false`, `0`,
    /// `""`, `[]`, `{}`).
    #[error("missing required fields")]
    MissingField,

    /// Body was not a JSON object of the expected shape.
    #[error("malformed request body: {0}")]
    Malformed(String),

    /// Body exceeded `limits.max_body_size` while being read.
    #[error("request body too large: {0}")]
    PayloadTooLarge(String),

    /// No chart row matched.
    #[error(transparent)]
    NoMatch(#[from] MatchError),
}

impl ConvertError {
    pub fn status(&self) -> StatusCode {
        match self {
            ConvertError::MissingField | ConvertError::Malformed(_) => StatusCode::BAD_REQUEST,
            ConvertError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ConvertError::NoMatch(_) => StatusCode::NOT_FOUND,
        }
    }

    pub fn outcome(&self) -> Outcome {
        match self {
            ConvertError::MissingField => Outcome::MissingField,
            ConvertError::Malformed(_) | ConvertError::PayloadTooLarge(_) => Outcome::Malformed,
            ConvertError::NoMatch(_) => Outcome::NoMatch,
        }
    }
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        let body = match &self {
            ConvertError::MissingField => json!({ "error": MISSING_FIELDS_MESSAGE }),
            ConvertError::Malformed(_) => json!({ "error": MALFORMED_BODY_MESSAGE }),
            ConvertError::PayloadTooLarge(_) => json!({ "error": BODY_TOO_LARGE_MESSAGE }),
            ConvertError::NoMatch(_) => json!({
                "success": false,
                "error": NO_MATCH_MESSAGE
            }),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<JsonRejection> for ConvertError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ConvertError::PayloadTooLarge(rejection.body_text())
        } else {
            ConvertError::Malformed(rejection.body_text())
        }
    }
}

/// `GET /status` body.
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub version: &'static str,
    pub status: &'static str,
}

impl StatusResponse {
    pub fn operational() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION"),
            status: "operational",
        }
    }
}
