use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{OhlcRecord, PixelPoint, Viewport};

use super::TooltipConfig;

/// Tooltip rows in display order.
pub const TOOLTIP_ROW_COUNT: usize = 6;

/// Human-readable bucket start, always in UTC: `Jan 1, 2024 00:00`.
#[must_use]
pub fn format_period_start(period_start: DateTime<Utc>) -> String {
    period_start.format("%b %-d, %Y %H:%M").to_string()
}

/// Fixed two-decimal currency value: `$10.00`.
#[must_use]
pub fn format_price(price: f64, currency_prefix: &str) -> String {
    format!("{currency_prefix}{price:.2}")
}

/// Volume with `K`/`M` abbreviation from one thousand/one million upward,
/// otherwise the rounded integer.
///
/// The unit is picked from the rounded value, so `999_960` reads `1.0M`
/// rather than `1000.0K`.
#[must_use]
pub fn format_volume(volume: f64) -> String {
    let thousands = round_tenths(volume / 1_000.0);
    if thousands >= 1_000.0 {
        format!("{:.1}M", round_tenths(volume / 1_000_000.0))
    } else if volume.round() >= 1_000.0 {
        format!("{thousands:.1}K")
    } else {
        format!("{:.0}", volume.round())
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// One labeled tooltip line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TooltipRow<'a> {
    pub label: &'static str,
    pub value: &'a str,
}

impl TooltipRow<'_> {
    #[must_use]
    pub fn text(&self) -> String {
        format!("{}: {}", self.label, self.value)
    }
}

/// Formatted fields of the hovered record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipContent {
    pub period_start: String,
    pub open: String,
    pub high: String,
    pub low: String,
    pub close: String,
    pub volume: String,
}

impl TooltipContent {
    #[must_use]
    pub fn from_record(record: &OhlcRecord, currency_prefix: &str) -> Self {
        Self {
            period_start: format_period_start(record.period_start),
            open: format_price(record.open, currency_prefix),
            high: format_price(record.high, currency_prefix),
            low: format_price(record.low, currency_prefix),
            close: format_price(record.close, currency_prefix),
            volume: format_volume(record.volume),
        }
    }

    #[must_use]
    pub fn rows(&self) -> SmallVec<[TooltipRow<'_>; TOOLTIP_ROW_COUNT]> {
        [
            ("Time", &self.period_start),
            ("Open", &self.open),
            ("High", &self.high),
            ("Low", &self.low),
            ("Close", &self.close),
            ("Volume", &self.volume),
        ]
        .into_iter()
        .map(|(label, value)| TooltipRow {
            label,
            value: value.as_str(),
        })
        .collect()
    }
}

/// Tooltip box in rendered pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TooltipPlacement {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

/// Anchors the tooltip at the pointer plus the configured offset.
///
/// The box is pulled back so it never passes the right or bottom edge of the
/// viewport, and never starts above or left of it.
#[must_use]
pub fn place_tooltip(
    pointer: PixelPoint,
    viewport: Viewport,
    config: &TooltipConfig,
    row_count: usize,
) -> TooltipPlacement {
    let width = config.width_estimate_px;
    let height = config.height_estimate_px(row_count);

    let max_left = (f64::from(viewport.width) - width).max(0.0);
    let max_top = (f64::from(viewport.height) - height).max(0.0);

    TooltipPlacement {
        left: (pointer.x + config.offset_x_px).min(max_left).max(0.0),
        top: (pointer.y + config.offset_y_px).min(max_top).max(0.0),
        width,
        height,
    }
}

/// Tooltip for the current hover selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tooltip {
    pub index: usize,
    pub content: TooltipContent,
    pub placement: TooltipPlacement,
}

impl Tooltip {
    #[must_use]
    pub fn new(
        index: usize,
        record: &OhlcRecord,
        pointer: PixelPoint,
        viewport: Viewport,
        config: &TooltipConfig,
    ) -> Self {
        Self {
            index,
            content: TooltipContent::from_record(record, &config.currency_prefix),
            placement: place_tooltip(pointer, viewport, config, TOOLTIP_ROW_COUNT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn volume_abbreviation() {
        assert_eq!(format_volume(500.0), "500");
        assert_eq!(format_volume(1_500.0), "1.5K");
        assert_eq!(format_volume(2_500_000.0), "2.5M");
        assert_eq!(format_volume(0.0), "0");
        assert_eq!(format_volume(999.4), "999");
        assert_eq!(format_volume(1_000.0), "1.0K");
    }

    #[test]
    fn volume_unit_follows_rounded_value() {
        assert_eq!(format_volume(999.6), "1.0K");
        assert_eq!(format_volume(999_940.0), "999.9K");
        assert_eq!(format_volume(999_960.0), "1.0M");
        assert_eq!(format_volume(999_999.0), "1.0M");
        assert_eq!(format_volume(1_049_999.0), "1.0M");
    }

    #[test]
    fn price_uses_two_decimals() {
        assert_eq!(format_price(10.0, "$"), "$10.00");
        assert_eq!(format_price(0.126, ""), "0.13");
        assert_eq!(format_price(1234.5, "€"), "€1234.50");
    }

    #[test]
    fn period_start_is_readable() {
        let start = Utc
            .with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
            .single()
            .expect("valid date");
        assert_eq!(format_period_start(start), "Jan 1, 2024 00:00");
    }

    #[test]
    fn placement_is_clamped_to_right_edge() {
        let config = TooltipConfig::default();
        let viewport = Viewport::new(400, 300);
        let placement = place_tooltip(PixelPoint::new(390.0, 10.0), viewport, &config, 6);
        assert_eq!(placement.left, 400.0 - config.width_estimate_px);
        assert_eq!(placement.top, 22.0);
    }

    #[test]
    fn placement_follows_pointer_when_room() {
        let config = TooltipConfig::default();
        let placement = place_tooltip(PixelPoint::new(20.0, 30.0), Viewport::new(400, 300), &config, 6);
        assert_eq!(placement.left, 32.0);
        assert_eq!(placement.top, 42.0);
    }

    #[test]
    fn narrow_viewport_pins_tooltip_at_origin() {
        let config = TooltipConfig::default();
        let placement = place_tooltip(PixelPoint::new(50.0, 50.0), Viewport::new(100, 60), &config, 6);
        assert_eq!(placement.left, 0.0);
        assert_eq!(placement.top, 0.0);
    }
}
