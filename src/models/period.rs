//! Calendar month used for subscription ranges and cost windows.

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use thiserror::Error;

use crate::error::AppError;

static PERIOD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(0[1-9]|1[0-2])-(\d{4})$").unwrap());

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid period {value:?}, expected MM-YYYY")]
pub struct PeriodParseError {
    pub value: String,
}

/// A `(month, year)` pair. Field order gives the derived `Ord` chronological order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Returns `None` unless `month` is within 1..=12.
    pub fn new(month: u32, year: i32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Linear month index; the difference of two ordinals is a month count.
    pub fn ordinal(&self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month)
    }

    /// Parses a request field, naming it in the validation message.
    pub fn parse_field(value: &str, field: &str) -> Result<Self, AppError> {
        value
            .parse()
            .map_err(|_| AppError::ValidationError(format!("{field} must be in MM-YYYY format")))
    }
}

impl FromStr for Period {
    type Err = PeriodParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || PeriodParseError {
            value: s.to_string(),
        };
        let caps = PERIOD_PATTERN.captures(s).ok_or_else(err)?;
        let month: u32 = caps[1].parse().map_err(|_| err())?;
        let year: i32 = caps[2].parse().map_err(|_| err())?;
        Period::new(month, year).ok_or_else(err)
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
