use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel-projection")]
use rayon::prelude::*;

use crate::core::{CandleDirection, ChartSeries, OhlcRecord, ScaleMapper, SlotLayout};

/// Minimum rendered body height so `open == close` candles stay visible.
pub const MIN_BODY_HEIGHT: f64 = 0.5;

/// Axis-aligned rectangle in virtual units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ShapeRect {
    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }
}

/// Vertical high-low segment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WickSegment {
    pub x: f64,
    pub top: f64,
    pub bottom: f64,
}

/// Geometry for one record: candle wick, body and optional volume bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CandleShape {
    pub index: usize,
    pub center_x: f64,
    pub wick: WickSegment,
    pub body: ShapeRect,
    pub volume: Option<ShapeRect>,
    pub direction: CandleDirection,
}

/// Projects every record of `series` into candle geometry.
///
/// Pure and deterministic; the caller guarantees `slots` was built for
/// `series.len()` records.
#[must_use]
pub fn generate_candle_shapes(
    series: &ChartSeries,
    mapper: &ScaleMapper,
    slots: SlotLayout,
) -> Vec<CandleShape> {
    #[cfg(feature = "parallel-projection")]
    {
        series
            .records()
            .par_iter()
            .enumerate()
            .map(|(index, record)| candle_shape(record, index, mapper, slots))
            .collect()
    }

    #[cfg(not(feature = "parallel-projection"))]
    {
        series
            .iter()
            .enumerate()
            .map(|(index, record)| candle_shape(record, index, mapper, slots))
            .collect()
    }
}

/// Geometry for the record at `index`.
#[must_use]
pub fn candle_shape(
    record: &OhlcRecord,
    index: usize,
    mapper: &ScaleMapper,
    slots: SlotLayout,
) -> CandleShape {
    let center_x = slots.center_x(index);
    let body_width = slots.body_width();
    let body_left = center_x - body_width / 2.0;

    let body_top = mapper.price_to_y(record.body_high());
    let body_bottom = mapper.price_to_y(record.body_low());

    let layout = mapper.layout();
    let volume = layout.shows_volume().then(|| {
        let height = mapper.volume_to_bar_height(record.volume);
        ShapeRect {
            left: body_left,
            top: layout.volume_track_bottom() - height,
            width: body_width,
            height,
        }
    });

    CandleShape {
        index,
        center_x,
        wick: WickSegment {
            x: center_x,
            top: mapper.price_to_y(record.high),
            bottom: mapper.price_to_y(record.low),
        },
        body: ShapeRect {
            left: body_left,
            top: body_top,
            width: body_width,
            height: (body_bottom - body_top).max(MIN_BODY_HEIGHT),
        },
        volume,
        direction: record.direction(),
    }
}
