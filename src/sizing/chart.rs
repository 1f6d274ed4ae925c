//! Reference size charts.
//!
//! Each chart is an ordered list of equivalent-size rows, ascending by size.
//! Sizing is non-linear, so rows are listed explicitly instead of being
//! derived from formulas. Some scales repeat a value across adjacent rows
//! (e.g. men's EU 39); lookups resolve those to the first row.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::sizing::matcher::{find_closest, MatchError, SizeInput};

/// Regional sizing scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Scale {
    #[serde(rename = "US")]
    Us,
    #[serde(rename = "EU")]
    Eu,
    #[serde(rename = "UK")]
    Uk,
    #[serde(rename = "CM")]
    Cm,
}

impl Scale {
    /// All supported scales, in response order.
    pub const ALL: [Scale; 4] = [Scale::Us, Scale::Eu, Scale::Uk, Scale::Cm];

    /// Wire name of the scale.
    pub fn as_str(&self) -> &'static str {
        match self {
            Scale::Us => "US",
            Scale::Eu => "EU",
            Scale::Uk => "UK",
            Scale::Cm => "CM",
        }
    }
}

impl fmt::Display for Scale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scale {
    type Err = MatchError;

    /// Case-sensitive: `"us"` is not a supported scale.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Scale::ALL
            .into_iter()
            .find(|scale| scale.as_str() == s)
            .ok_or_else(|| MatchError::InvalidInput(format!("unsupported scale `{}`", s)))
    }
}

/// Size chart category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    Men,
    Women,
}

impl Gender {
    /// Chart selection as the public API has always done it: the literal
    /// `men` selects the men's chart, every other value the women's chart.
    pub fn from_selector(value: &str) -> Self {
        if value == "men" {
            Gender::Men
        } else {
            Gender::Women
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Men => "men",
            Gender::Women => "women",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = MatchError;

    /// Strict parse, accepting only `men` and `women`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "men" => Ok(Gender::Men),
            "women" => Ok(Gender::Women),
            other => Err(MatchError::InvalidInput(format!("unsupported gender `{}`", other))),
        }
    }
}

/// One point of equivalent sizes across all four scales.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct SizeRow {
    pub us: f64,
    pub eu: f64,
    pub uk: f64,
    pub cm: f64,
}

impl SizeRow {
    pub const fn new(us: f64, eu: f64, uk: f64, cm: f64) -> Self {
        Self { us, eu, uk, cm }
    }

    /// Value of this row on the given scale.
    pub fn value(&self, scale: Scale) -> f64 {
        match scale {
            Scale::Us => self.us,
            Scale::Eu => self.eu,
            Scale::Uk => self.uk,
            Scale::Cm => self.cm,
        }
    }
}

/// Men's chart, ascending by size.
pub static MENS_SIZES: [SizeRow; 16] = [
    SizeRow::new(6.0, 39.0, 5.5, 24.0),
    SizeRow::new(6.5, 39.0, 6.0, 24.5),
    SizeRow::new(7.0, 40.0, 6.5, 25.0),
    SizeRow::new(7.5, 40.5, 7.0, 25.5),
    SizeRow::new(8.0, 41.0, 7.5, 26.0),
    SizeRow::new(8.5, 42.0, 8.0, 26.5),
    SizeRow::new(9.0, 42.5, 8.5, 27.0),
    SizeRow::new(9.5, 43.0, 9.0, 27.5),
    SizeRow::new(10.0, 44.0, 9.5, 28.0),
    SizeRow::new(10.5, 44.5, 10.0, 28.5),
    SizeRow::new(11.0, 45.0, 10.5, 29.0),
    SizeRow::new(11.5, 45.5, 11.0, 29.5),
    SizeRow::new(12.0, 46.0, 11.5, 30.0),
    SizeRow::new(13.0, 47.5, 12.5, 31.0),
    SizeRow::new(14.0, 48.5, 13.5, 32.0),
    SizeRow::new(15.0, 49.5, 14.5, 33.0),
];

/// Women's chart, ascending by size.
pub static WOMENS_SIZES: [SizeRow; 16] = [
    SizeRow::new(4.0, 35.0, 2.0, 20.8),
    SizeRow::new(4.5, 35.0, 2.5, 21.3),
    SizeRow::new(5.0, 35.5, 3.0, 21.6),
    SizeRow::new(5.5, 36.0, 3.5, 22.2),
    SizeRow::new(6.0, 36.5, 4.0, 22.5),
    SizeRow::new(6.5, 37.0, 4.5, 23.0),
    SizeRow::new(7.0, 37.5, 5.0, 23.5),
    SizeRow::new(7.5, 38.0, 5.5, 23.8),
    SizeRow::new(8.0, 38.5, 6.0, 24.1),
    SizeRow::new(8.5, 39.0, 6.5, 24.6),
    SizeRow::new(9.0, 40.0, 7.0, 25.1),
    SizeRow::new(9.5, 40.5, 7.5, 25.4),
    SizeRow::new(10.0, 41.0, 8.0, 25.9),
    SizeRow::new(10.5, 42.0, 8.5, 26.2),
    SizeRow::new(11.0, 42.5, 9.0, 26.7),
    SizeRow::new(12.0, 44.0, 10.0, 27.6),
];

/// A gender's chart, borrowed from static data.
#[derive(Debug, Clone, Copy)]
pub struct SizeChart {
    gender: Gender,
    rows: &'static [SizeRow],
}

impl SizeChart {
    /// Chart for the given gender.
    pub fn for_gender(gender: Gender) -> Self {
        let rows: &'static [SizeRow] = match gender {
            Gender::Men => &MENS_SIZES,
            Gender::Women => &WOMENS_SIZES,
        };
        Self { gender, rows }
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn rows(&self) -> &'static [SizeRow] {
        self.rows
    }

    /// Nearest row on `scale` to `value`. See [`find_closest`].
    pub fn closest(&self, scale: &str, value: &SizeInput) -> Result<&'static SizeRow, MatchError> {
        find_closest(self.rows, scale, value)
    }
}
