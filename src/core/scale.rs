use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, ChartSeries, OhlcRecord};
use crate::error::{ChartError, ChartResult};

/// Linear map from a value domain onto a coordinate range.
///
/// The range may be inverted (`range_span < 0`), which is how price maps onto
/// a top-down Y axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_span: f64,
    range_start: f64,
    range_span: f64,
}

impl LinearScale {
    pub fn new(
        domain_start: f64,
        domain_end: f64,
        range_start: f64,
        range_end: f64,
    ) -> ChartResult<Self> {
        Self::from_spans(
            domain_start,
            domain_end - domain_start,
            range_start,
            range_end - range_start,
        )
    }

    pub fn from_spans(
        domain_start: f64,
        domain_span: f64,
        range_start: f64,
        range_span: f64,
    ) -> ChartResult<Self> {
        if !domain_start.is_finite() || !domain_span.is_finite() || domain_span == 0.0 {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_span.is_finite() {
            return Err(ChartError::InvalidData(
                "scale range must be finite".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_span,
            range_start,
            range_span,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_start + self.domain_span)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_start + self.range_span)
    }

    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / self.domain_span;
        self.range_start + normalized * self.range_span
    }

    /// Inverse of `map`. A zero-length range maps every coordinate to the
    /// domain start.
    #[must_use]
    pub fn invert(self, coordinate: f64) -> f64 {
        if self.range_span == 0.0 {
            return self.domain_start;
        }
        let normalized = (coordinate - self.range_start) / self.range_span;
        self.domain_start + normalized * self.domain_span
    }
}

/// Price and volume mapping onto the virtual drawing surface.
///
/// The price domain is padded by half a percent on each side so extreme
/// candles are not clipped. Degenerate ranges (flat prices, zero volume)
/// fall back to a denominator of `1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScaleMapper {
    layout: ChartLayout,
    min_price: f64,
    max_price: f64,
    price_range: f64,
    max_volume: f64,
    price: LinearScale,
    volume: LinearScale,
}

impl ScaleMapper {
    pub const LOW_PADDING_FACTOR: f64 = 0.995;
    pub const HIGH_PADDING_FACTOR: f64 = 1.005;

    pub fn from_series(series: &ChartSeries, layout: ChartLayout) -> ChartResult<Self> {
        Self::from_records(series.records(), layout)
    }

    pub fn from_records(records: &[OhlcRecord], layout: ChartLayout) -> ChartResult<Self> {
        let layout = layout.validate()?;
        let lowest = records
            .iter()
            .map(|record| OrderedFloat(record.low))
            .min()
            .ok_or(ChartError::EmptySeries)?;
        let highest = records
            .iter()
            .map(|record| OrderedFloat(record.high))
            .max()
            .ok_or(ChartError::EmptySeries)?;
        let loudest = records
            .iter()
            .map(|record| OrderedFloat(record.volume))
            .max()
            .ok_or(ChartError::EmptySeries)?;

        let min_price = lowest.0 * Self::LOW_PADDING_FACTOR;
        // Saturates so prices near `f64::MAX` keep a finite domain.
        let max_price = (highest.0 * Self::HIGH_PADDING_FACTOR).min(f64::MAX);
        let price_range = floor_denominator(max_price - min_price);
        let max_volume = floor_denominator(loudest.0);

        let plot_height = layout.plot_height();
        let price = LinearScale::from_spans(
            min_price,
            price_range,
            layout.top_padding + plot_height,
            -plot_height,
        )?;
        let volume = LinearScale::from_spans(0.0, max_volume, 0.0, layout.volume_track_height)?;

        Ok(Self {
            layout,
            min_price,
            max_price,
            price_range,
            max_volume,
            price,
            volume,
        })
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn min_price(&self) -> f64 {
        self.min_price
    }

    #[must_use]
    pub fn max_price(&self) -> f64 {
        self.max_price
    }

    #[must_use]
    pub fn price_range(&self) -> f64 {
        self.price_range
    }

    #[must_use]
    pub fn max_volume(&self) -> f64 {
        self.max_volume
    }

    #[must_use]
    pub fn price_to_y(&self, price: f64) -> f64 {
        self.price.map(price)
    }

    #[must_use]
    pub fn y_to_price(&self, y: f64) -> f64 {
        self.price.invert(y)
    }

    #[must_use]
    pub fn volume_to_bar_height(&self, volume: f64) -> f64 {
        self.volume.map(volume)
    }
}

fn floor_denominator(value: f64) -> f64 {
    if value > 0.0 { value } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn linear_scale_round_trip_within_tolerance() {
        let scale = LinearScale::new(10.0, 110.0, 0.0, 1000.0).expect("valid scale");
        let px = scale.map(42.5);
        assert_relative_eq!(scale.invert(px), 42.5, epsilon = 1e-9);
    }

    #[test]
    fn linear_scale_rejects_zero_domain() {
        assert!(LinearScale::new(5.0, 5.0, 0.0, 1.0).is_err());
    }

    #[test]
    fn inverted_range_maps_start_to_bottom() {
        let scale = LinearScale::new(0.0, 100.0, 200.0, 0.0).expect("valid scale");
        assert_eq!(scale.map(0.0), 200.0);
        assert_eq!(scale.map(100.0), 0.0);
        assert_eq!(scale.domain(), (0.0, 100.0));
        assert_eq!(scale.range(), (200.0, 0.0));
    }

    #[test]
    fn extreme_high_saturates_padded_domain() {
        let start = chrono::Utc::now();
        let record = OhlcRecord::new(start, 1.0, 1.79e308, 1.0, 2.0, 1.0).expect("record");
        let layout = ChartLayout::new(800.0, 300.0, true).expect("layout");
        let mapper = ScaleMapper::from_records(&[record], layout).expect("mapper");

        assert_eq!(mapper.max_price(), f64::MAX);
        assert!(mapper.price_range().is_finite());
        assert!(mapper.price_to_y(record.high).is_finite());
    }
}
