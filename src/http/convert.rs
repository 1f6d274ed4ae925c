//! `POST /convert` handler.
//!
//! # Responsibilities
//! - Require `scale`, `size` and `gender` before any lookup
//! - Pick the chart for the requested gender
//! - Run the nearest-row match and shape the response
//!
//! # Design Decisions
//! - Fields stay raw JSON until the lookup, so a wrong type is an invalid
//!   value (404) rather than a malformed body (400)
//! - Only the literal `men` selects the men's chart unless
//!   `matching.strict_gender` is set
//! - Pure core (`convert_request`) wrapped by a thin async handler that
//!   adds logging and metrics

use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderMap,
    Json,
};
use serde_json::{Map, Value};
use std::time::Instant;

use crate::config::MatchingConfig;
use crate::http::request::RequestIdExt;
use crate::http::response::{ConversionInput, ConvertError, ConvertResponse};
use crate::http::server::AppState;
use crate::observability::metrics::{self, Outcome};
use crate::sizing::{Gender, MatchError, SizeChart, SizeInput};

/// Body of `POST /convert`, one raw JSON value per field. Any JSON object
/// is accepted; unknown keys are ignored.
#[derive(Debug, Clone, Default)]
pub struct ConvertRequest {
    pub scale: Option<Value>,
    pub size: Option<Value>,
    pub gender: Option<Value>,
}

impl From<Map<String, Value>> for ConvertRequest {
    fn from(mut body: Map<String, Value>) -> Self {
        Self {
            scale: body.remove("scale"),
            size: body.remove("size"),
            gender: body.remove("gender"),
        }
    }
}

impl ConvertRequest {
    /// The three fields, or `MissingField` if any is absent or falsy.
    fn required(&self) -> Result<(&Value, &Value, &Value), ConvertError> {
        fn present(field: &Option<Value>) -> Option<&Value> {
            field.as_ref().filter(|v| is_truthy(v))
        }

        match (present(&self.scale), present(&self.size), present(&self.gender)) {
            (Some(scale), Some(size), Some(gender)) => Ok((scale, size, gender)),
            _ => Err(ConvertError::MissingField),
        }
    }
}

/// `null`, `false`, zero and empty strings, arrays and objects are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() != Some(0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Chart selection for a gender value.
///
/// A non-string gender can never be `men`, so it falls back to the women's
/// chart like any other unrecognized value.
pub fn select_gender(value: &Value, matching: &MatchingConfig) -> Result<Gender, ConvertError> {
    match (value.as_str(), matching.strict_gender) {
        (Some(gender), true) => Ok(gender.parse::<Gender>()?),
        (Some(gender), false) => Ok(Gender::from_selector(gender)),
        (None, true) => Err(MatchError::InvalidInput(format!("unknown gender `{}`", value)).into()),
        (None, false) => Ok(Gender::Women),
    }
}

/// Convert one request against the static charts.
pub fn convert_request(
    request: &ConvertRequest,
    matching: &MatchingConfig,
) -> Result<ConvertResponse, ConvertError> {
    let (scale, size, gender) = request.required()?;

    let gender_choice = select_gender(gender, matching)?;
    let scale_name = scale
        .as_str()
        .ok_or_else(|| MatchError::InvalidInput(format!("unsupported scale `{}`", scale)))?;
    let size_input = SizeInput::try_from(size)?;

    let row = SizeChart::for_gender(gender_choice).closest(scale_name, &size_input)?;

    Ok(ConvertResponse {
        success: true,
        input: ConversionInput {
            scale: scale.clone(),
            size: size.clone(),
            gender: gender.clone(),
        },
        conversions: *row,
        chart: gender_choice,
    })
}

/// Axum handler for `POST /convert`.
pub async fn convert(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<Map<String, Value>>, JsonRejection>,
) -> Result<Json<ConvertResponse>, ConvertError> {
    let start = Instant::now();
    let request_id = headers.request_id();

    let result = payload
        .map_err(ConvertError::from)
        .and_then(|Json(body)| convert_request(&ConvertRequest::from(body), &state.config.matching));

    match &result {
        Ok(response) => {
            tracing::debug!(
                request_id = %request_id,
                scale = %response.input.scale,
                gender = %response.chart,
                us = response.conversions.us,
                "Size converted"
            );
            metrics::record_conversion(Outcome::Converted, Some(response.chart.as_str()), start);
        }
        Err(e) => {
            tracing::debug!(request_id = %request_id, error = %e, "Conversion rejected");
            metrics::record_conversion(e.outcome(), None, start);
        }
    }

    result.map(Json)
}
