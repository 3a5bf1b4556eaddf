use serde::{Deserialize, Serialize};

use crate::core::CandleDirection;
use crate::error::{ChartError, ChartResult};
use crate::render::Color;

/// Colors and stroke widths for one chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub bullish_color: Color,
    pub bearish_color: Color,
    /// Alpha multiplier applied to candle colors for volume bars.
    pub volume_alpha: f64,
    pub wick_width_px: f64,
    pub separator_color: Color,
    pub separator_width_px: f64,
    pub hover_line_color: Color,
    pub hover_line_width_px: f64,
    pub tooltip_background_color: Color,
    pub tooltip_border_color: Color,
    pub tooltip_text_color: Color,
    pub tooltip_corner_radius_px: f64,
    pub font_size_px: f64,
    pub placeholder_text_color: Color,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            bullish_color: Color::rgb(0.133, 0.773, 0.369),
            bearish_color: Color::rgb(0.937, 0.267, 0.267),
            volume_alpha: 0.4,
            wick_width_px: 1.0,
            separator_color: Color::rgba(0.5, 0.5, 0.5, 0.3),
            separator_width_px: 1.0,
            hover_line_color: Color::rgba(0.6, 0.6, 0.6, 0.6),
            hover_line_width_px: 1.0,
            tooltip_background_color: Color::rgba(0.067, 0.094, 0.153, 0.92),
            tooltip_border_color: Color::rgba(1.0, 1.0, 1.0, 0.1),
            tooltip_text_color: Color::rgb(0.898, 0.906, 0.922),
            tooltip_corner_radius_px: 4.0,
            font_size_px: 11.0,
            placeholder_text_color: Color::rgb(0.6, 0.6, 0.6),
        }
    }
}

impl ChartStyle {
    #[must_use]
    pub fn candle_color(self, direction: CandleDirection) -> Color {
        match direction {
            CandleDirection::Bullish => self.bullish_color,
            CandleDirection::Bearish => self.bearish_color,
        }
    }

    #[must_use]
    pub fn volume_color(self, direction: CandleDirection) -> Color {
        self.candle_color(direction).faded(self.volume_alpha)
    }

    pub fn validate(self) -> ChartResult<Self> {
        for color in [
            self.bullish_color,
            self.bearish_color,
            self.separator_color,
            self.hover_line_color,
            self.tooltip_background_color,
            self.tooltip_border_color,
            self.tooltip_text_color,
            self.placeholder_text_color,
        ] {
            color.validate()?;
        }

        if !self.volume_alpha.is_finite() || !(0.0..=1.0).contains(&self.volume_alpha) {
            return Err(ChartError::InvalidData(
                "volume alpha must be finite and in [0, 1]".to_owned(),
            ));
        }

        for (name, value) in [
            ("wick width", self.wick_width_px),
            ("separator width", self.separator_width_px),
            ("hover line width", self.hover_line_width_px),
            ("font size", self.font_size_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }

        if !self.tooltip_corner_radius_px.is_finite() || self.tooltip_corner_radius_px < 0.0 {
            return Err(ChartError::InvalidData(
                "tooltip corner radius must be finite and >= 0".to_owned(),
            ));
        }

        Ok(self)
    }
}
