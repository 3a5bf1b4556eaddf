use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{OhlcRecord, RawOhlcRecord};
use crate::error::{ChartError, ChartResult};

/// Ordered, immutable sequence of OHLC records for one render pass.
///
/// Buckets are strictly increasing by `period_start`. Gaps between buckets
/// are allowed; each record still gets its own horizontal slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<OhlcRecord>", into = "Vec<OhlcRecord>")]
pub struct ChartSeries {
    records: Vec<OhlcRecord>,
}

impl ChartSeries {
    pub fn new(records: Vec<OhlcRecord>) -> ChartResult<Self> {
        if let Some(position) = records
            .windows(2)
            .position(|pair| pair[1].period_start <= pair[0].period_start)
        {
            return Err(ChartError::InvalidData(format!(
                "series must be strictly increasing by period_start: record {} ({}) does not follow record {} ({})",
                position + 1,
                records[position + 1].period_start,
                position,
                records[position].period_start,
            )));
        }

        Ok(Self { records })
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Parses a JSON array of loosely typed records.
    ///
    /// Every element goes through `RawOhlcRecord` normalization, so missing
    /// fields are rejected and unknown fields are ignored.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let raw: Vec<RawOhlcRecord> = serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse series json: {e}")))?;
        let raw_count = raw.len();
        let records = raw
            .into_iter()
            .map(OhlcRecord::try_from)
            .collect::<ChartResult<Vec<_>>>()?;
        debug!(raw_count, "parsed series json");
        Self::new(records)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&OhlcRecord> {
        self.records.get(index)
    }

    #[must_use]
    pub fn first(&self) -> Option<&OhlcRecord> {
        self.records.first()
    }

    #[must_use]
    pub fn last(&self) -> Option<&OhlcRecord> {
        self.records.last()
    }

    #[must_use]
    pub fn records(&self) -> &[OhlcRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OhlcRecord> {
        self.records.iter()
    }
}

impl TryFrom<Vec<OhlcRecord>> for ChartSeries {
    type Error = ChartError;

    fn try_from(records: Vec<OhlcRecord>) -> ChartResult<Self> {
        Self::new(records)
    }
}

impl From<ChartSeries> for Vec<OhlcRecord> {
    fn from(series: ChartSeries) -> Self {
        series.records
    }
}

impl<'a> IntoIterator for &'a ChartSeries {
    type Item = &'a OhlcRecord;
    type IntoIter = std::slice::Iter<'a, OhlcRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
