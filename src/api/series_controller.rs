use indexmap::IndexMap;
use tracing::debug;

use crate::core::{
    CandleShape, ChartSeries, ScaleMapper, SlotLayout, Timeframe, generate_candle_shapes,
};
use crate::error::ChartResult;
use crate::render::Renderer;

use super::PriceChart;

impl<R: Renderer> PriceChart<R> {
    /// Replaces the whole series. There is no merge: the previous records
    /// and any hover selection over them are dropped.
    pub fn set_series(&mut self, series: ChartSeries) {
        debug!(
            count = series.len(),
            first = ?series.first().map(|record| record.period_start),
            last = ?series.last().map(|record| record.period_start),
            "set series"
        );
        self.series = series;
        self.clear_hover();
    }

    /// Replaces the series together with the timeframe it was fetched for.
    pub fn set_series_for_timeframe(&mut self, timeframe: Timeframe, series: ChartSeries) {
        self.config.timeframe = Some(timeframe);
        self.set_series(series);
    }

    pub fn clear_series(&mut self) {
        self.set_series(ChartSeries::empty());
    }

    #[must_use]
    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    pub fn set_series_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.series_metadata.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn series_metadata(&self) -> &IndexMap<String, String> {
        &self.series_metadata
    }

    /// Scale mapping for the current series; `EmptySeries` when there is none.
    pub fn scale_mapper(&self) -> ChartResult<ScaleMapper> {
        ScaleMapper::from_series(&self.series, self.layout)
    }

    pub fn slot_layout(&self) -> ChartResult<SlotLayout> {
        SlotLayout::new(self.layout, self.series.len())
    }

    /// Candle and volume geometry in virtual units.
    pub fn candle_shapes(&self) -> ChartResult<Vec<CandleShape>> {
        let mapper = self.scale_mapper()?;
        let slots = self.slot_layout()?;
        Ok(generate_candle_shapes(&self.series, &mapper, slots))
    }
}
