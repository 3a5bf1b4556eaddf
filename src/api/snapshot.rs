use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{CandleShape, ChartLayout, Timeframe, Viewport};
use crate::error::{ChartError, ChartResult};
use crate::interaction::HoverSelection;
use crate::render::Renderer;

use super::PriceChart;

pub const CHART_SNAPSHOT_JSON_SCHEMA_V1: u32 = 1;

/// Serializable deterministic chart state used by regression tests and
/// debugging tooling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshot {
    pub viewport: Viewport,
    pub layout: ChartLayout,
    pub timeframe: Option<Timeframe>,
    pub series_len: usize,
    /// Padded `(min_price, max_price)`; `None` for an empty series.
    pub price_domain: Option<(f64, f64)>,
    pub max_volume: Option<f64>,
    pub candles: Vec<CandleShape>,
    pub hover: Option<HoverSelection>,
    pub series_metadata: IndexMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSnapshotJsonContractV1 {
    pub schema_version: u32,
    pub snapshot: ChartSnapshot,
}

impl ChartSnapshot {
    pub fn to_json_contract_v1_pretty(&self) -> ChartResult<String> {
        let payload = ChartSnapshotJsonContractV1 {
            schema_version: CHART_SNAPSHOT_JSON_SCHEMA_V1,
            snapshot: self.clone(),
        };
        serde_json::to_string_pretty(&payload).map_err(|e| {
            ChartError::InvalidData(format!("failed to serialize snapshot contract v1: {e}"))
        })
    }

    /// Parses either a bare snapshot or a versioned contract payload.
    pub fn from_json_compat_str(input: &str) -> ChartResult<Self> {
        if let Ok(snapshot) = serde_json::from_str::<ChartSnapshot>(input) {
            return Ok(snapshot);
        }
        let payload: ChartSnapshotJsonContractV1 = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidData(format!("failed to parse snapshot json payload: {e}"))
        })?;
        if payload.schema_version != CHART_SNAPSHOT_JSON_SCHEMA_V1 {
            return Err(ChartError::InvalidData(format!(
                "unsupported snapshot schema version: {}",
                payload.schema_version
            )));
        }
        Ok(payload.snapshot)
    }
}

impl<R: Renderer> PriceChart<R> {
    pub fn snapshot(&self) -> ChartResult<ChartSnapshot> {
        let (price_domain, max_volume, candles) = if self.series.is_empty() {
            (None, None, Vec::new())
        } else {
            let mapper = self.scale_mapper()?;
            (
                Some((mapper.min_price(), mapper.max_price())),
                Some(mapper.max_volume()),
                self.candle_shapes()?,
            )
        };

        Ok(ChartSnapshot {
            viewport: self.config.viewport,
            layout: self.layout,
            timeframe: self.config.timeframe,
            series_len: self.series.len(),
            price_domain,
            max_volume,
            candles,
            hover: self.hover,
            series_metadata: self.series_metadata.clone(),
        })
    }

    pub fn snapshot_json_pretty(&self) -> ChartResult<String> {
        let snapshot = self.snapshot()?;
        serde_json::to_string_pretty(&snapshot)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize snapshot: {e}")))
    }

    pub fn snapshot_json_contract_v1_pretty(&self) -> ChartResult<String> {
        self.snapshot()?.to_json_contract_v1_pretty()
    }
}
