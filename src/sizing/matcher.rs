//! Nearest-row matching.
//!
//! # Responsibilities
//! - Coerce the user-supplied size (number or numeric text) to `f64`
//! - Scan a chart for the row closest to the query on one scale
//! - Reject matches further than [`MAX_DIFF`] away
//!
//! # Design Decisions
//! - Linear scan: charts hold 16 rows
//! - Strict `<` comparison, so ties resolve to the earlier (smaller) row
//! - Failures are values, never panics

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sizing::chart::{Scale, SizeRow};

/// Largest accepted distance between the query and the nearest row, in the
/// units of the queried scale.
pub const MAX_DIFF: f64 = 5.0;

/// Why a lookup produced no row.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    /// Unparseable size, unsupported scale or an empty chart.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The nearest row is further than [`MAX_DIFF`] away.
    #[error("nearest {scale} size is {diff} away")]
    OutOfRange { scale: Scale, diff: f64 },
}

/// A size as it arrives on the wire.
///
/// Numbers are kept as [`serde_json::Number`] so the request can be echoed
/// back exactly as it was sent (`9` stays `9`, not `9.0`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SizeInput {
    Number(serde_json::Number),
    Text(String),
}

impl SizeInput {
    /// Coerce to a finite float. Text is trimmed before parsing.
    pub fn to_f64(&self) -> Result<f64, MatchError> {
        let value = match self {
            SizeInput::Number(n) => n
                .as_f64()
                .ok_or_else(|| MatchError::InvalidInput(format!("size `{}` is not representable", n)))?,
            SizeInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| MatchError::InvalidInput(format!("size `{}` is not a number", s)))?,
        };

        if !value.is_finite() {
            return Err(MatchError::InvalidInput(format!("size `{}` is not finite", value)));
        }
        Ok(value)
    }

}

impl TryFrom<&serde_json::Value> for SizeInput {
    type Error = MatchError;

    /// Only JSON numbers and strings can carry a size.
    fn try_from(value: &serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::Number(n) => Ok(SizeInput::Number(n.clone())),
            serde_json::Value::String(s) => Ok(SizeInput::Text(s.clone())),
            other => Err(MatchError::InvalidInput(format!("size `{}` is not a number", other))),
        }
    }
}

impl From<f64> for SizeInput {
    fn from(value: f64) -> Self {
        match serde_json::Number::from_f64(value) {
            Some(n) => SizeInput::Number(n),
            None => SizeInput::Text(value.to_string()),
        }
    }
}

impl From<&str> for SizeInput {
    fn from(value: &str) -> Self {
        SizeInput::Text(value.to_string())
    }
}

/// Find the row of `table` whose value on `scale` is nearest to `value`.
///
/// The returned reference points into `table`; rows are never synthesized.
pub fn find_closest<'a>(
    table: &'a [SizeRow],
    scale: &str,
    value: &SizeInput,
) -> Result<&'a SizeRow, MatchError> {
    let scale: Scale = scale.parse()?;
    let query = value.to_f64()?;

    let mut best: Option<(&'a SizeRow, f64)> = None;
    for row in table {
        let diff = (row.value(scale) - query).abs();
        match best {
            Some((_, min_diff)) if diff >= min_diff => {}
            _ => best = Some((row, diff)),
        }
    }

    let (row, diff) = best.ok_or_else(|| MatchError::InvalidInput("size chart is empty".to_string()))?;

    if diff > MAX_DIFF {
        return Err(MatchError::OutOfRange { scale, diff });
    }

    Ok(row)
}
