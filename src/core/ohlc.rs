use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::primitives::{decimal_to_f64, parse_period_start};
use crate::error::{ChartError, ChartResult};

/// Bullish/bearish classification of one bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CandleDirection {
    Bullish,
    Bearish,
}

/// Aggregated trading activity for one time bucket.
///
/// Deserialization goes through `OhlcRecord::new`, so serde input obeys the
/// same invariants as direct construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "OhlcRecordFields")]
pub struct OhlcRecord {
    pub period_start: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl OhlcRecord {
    /// Builds a record from raw floating values.
    ///
    /// Invariants:
    /// - all values are finite
    /// - all values are `>= 0`
    ///
    /// `low <= open, close <= high` is intentionally not checked; an
    /// inconsistent record renders as an inverted candle.
    pub fn new(
        period_start: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> ChartResult<Self> {
        for (field, value) in [
            ("open", open),
            ("high", high),
            ("low", low),
            ("close", close),
            ("volume", volume),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "ohlc {field} must be finite"
                )));
            }
            if value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "ohlc {field} must be >= 0"
                )));
            }
        }

        Ok(Self {
            period_start,
            open,
            high,
            low,
            close,
            volume,
        })
    }

    /// Converts decimal prices and volume into a record.
    pub fn from_decimal(
        period_start: DateTime<Utc>,
        open: Decimal,
        high: Decimal,
        low: Decimal,
        close: Decimal,
        volume: Decimal,
    ) -> ChartResult<Self> {
        Self::new(
            period_start,
            decimal_to_f64(open, "open")?,
            decimal_to_f64(high, "high")?,
            decimal_to_f64(low, "low")?,
            decimal_to_f64(close, "close")?,
            decimal_to_f64(volume, "volume")?,
        )
    }

    /// Returns `true` when close price is greater than or equal to open price.
    #[must_use]
    pub fn is_bullish(self) -> bool {
        self.close >= self.open
    }

    #[must_use]
    pub fn direction(self) -> CandleDirection {
        if self.is_bullish() {
            CandleDirection::Bullish
        } else {
            CandleDirection::Bearish
        }
    }

    #[must_use]
    pub fn body_high(self) -> f64 {
        self.open.max(self.close)
    }

    #[must_use]
    pub fn body_low(self) -> f64 {
        self.open.min(self.close)
    }
}

/// Strict wire shape of `OhlcRecord`, checked before it becomes one.
#[derive(Deserialize)]
struct OhlcRecordFields {
    period_start: DateTime<Utc>,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl TryFrom<OhlcRecordFields> for OhlcRecord {
    type Error = ChartError;

    fn try_from(fields: OhlcRecordFields) -> ChartResult<Self> {
        Self::new(
            fields.period_start,
            fields.open,
            fields.high,
            fields.low,
            fields.close,
            fields.volume,
        )
    }
}

/// Number as it arrives from REST payloads: either a JSON number or a
/// numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawNumber {
    Number(f64),
    Text(String),
}

impl RawNumber {
    fn to_f64(&self, field: &'static str) -> ChartResult<f64> {
        match self {
            Self::Number(value) => Ok(*value),
            Self::Text(text) => text.trim().parse::<f64>().map_err(|err| {
                ChartError::InvalidData(format!("ohlc {field} `{text}` is not numeric: {err}"))
            }),
        }
    }
}

/// Loosely typed record accepted at the data boundary.
///
/// Every field is optional and unknown fields are ignored; conversion into
/// `OhlcRecord` rejects anything missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawOhlcRecord {
    #[serde(default, alias = "periodStart")]
    pub period_start: Option<String>,
    #[serde(default)]
    pub open: Option<RawNumber>,
    #[serde(default)]
    pub high: Option<RawNumber>,
    #[serde(default)]
    pub low: Option<RawNumber>,
    #[serde(default)]
    pub close: Option<RawNumber>,
    #[serde(default)]
    pub volume: Option<RawNumber>,
}

fn required_number(value: Option<&RawNumber>, field: &'static str) -> ChartResult<f64> {
    value
        .ok_or(ChartError::MissingField { field })?
        .to_f64(field)
}

impl TryFrom<RawOhlcRecord> for OhlcRecord {
    type Error = ChartError;

    fn try_from(raw: RawOhlcRecord) -> ChartResult<Self> {
        let period_start = raw
            .period_start
            .as_deref()
            .ok_or(ChartError::MissingField {
                field: "period_start",
            })?;

        Self::new(
            parse_period_start(period_start)?,
            required_number(raw.open.as_ref(), "open")?,
            required_number(raw.high.as_ref(), "high")?,
            required_number(raw.low.as_ref(), "low")?,
            required_number(raw.close.as_ref(), "close")?,
            required_number(raw.volume.as_ref(), "volume")?,
        )
    }
}
