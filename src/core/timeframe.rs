use std::fmt;
use std::str::FromStr;

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::ChartError;

/// Bucket granularity requested from the upstream data layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[default]
    #[serde(rename = "1d")]
    OneDay,
    #[serde(rename = "1w")]
    OneWeek,
}

impl Timeframe {
    pub const ALL: [Timeframe; 4] = [
        Timeframe::OneHour,
        Timeframe::FourHours,
        Timeframe::OneDay,
        Timeframe::OneWeek,
    ];

    #[must_use]
    pub fn token(self) -> &'static str {
        match self {
            Self::OneHour => "1h",
            Self::FourHours => "4h",
            Self::OneDay => "1d",
            Self::OneWeek => "1w",
        }
    }

    #[must_use]
    pub fn bucket_duration(self) -> TimeDelta {
        match self {
            Self::OneHour => TimeDelta::hours(1),
            Self::FourHours => TimeDelta::hours(4),
            Self::OneDay => TimeDelta::days(1),
            Self::OneWeek => TimeDelta::weeks(1),
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Timeframe {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|timeframe| timeframe.token() == s.trim())
            .ok_or_else(|| ChartError::InvalidData(format!("unknown timeframe token `{s}`")))
    }
}
