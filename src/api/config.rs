use serde::{Deserialize, Serialize};

use crate::core::{ChartLayout, Timeframe, Viewport};
use crate::error::{ChartError, ChartResult};

use super::ChartStyle;

pub const DEFAULT_CHART_WIDTH: f64 = 800.0;
pub const DEFAULT_CHART_HEIGHT: f64 = 300.0;
pub const DEFAULT_NO_DATA_TEXT: &str = "No data available";

/// Tooltip text and placement settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub currency_prefix: String,
    pub offset_x_px: f64,
    pub offset_y_px: f64,
    /// Width assumed for right-edge clamping; the real text width is only
    /// known to the drawing backend.
    pub width_estimate_px: f64,
    pub line_height_px: f64,
    pub padding_px: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            currency_prefix: "$".to_owned(),
            offset_x_px: 12.0,
            offset_y_px: 12.0,
            width_estimate_px: 160.0,
            line_height_px: 16.0,
            padding_px: 8.0,
        }
    }
}

impl TooltipConfig {
    #[must_use]
    pub fn height_estimate_px(&self, row_count: usize) -> f64 {
        self.padding_px * 2.0 + self.line_height_px * row_count as f64
    }

    pub fn validate(&self) -> ChartResult<()> {
        for (name, value) in [
            ("offset x", self.offset_x_px),
            ("offset y", self.offset_y_px),
            ("padding", self.padding_px),
        ] {
            if !value.is_finite() {
                return Err(ChartError::InvalidData(format!(
                    "tooltip {name} must be finite"
                )));
            }
        }
        for (name, value) in [
            ("width estimate", self.width_estimate_px),
            ("line height", self.line_height_px),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "tooltip {name} must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

/// Chart bootstrap configuration.
///
/// `viewport` is the rendered pixel size; `width`/`height` describe the
/// virtual surface the geometry is computed in. Every field has a default,
/// so `{}` is a valid JSON config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_viewport")]
    pub viewport: Viewport,
    #[serde(default = "default_width")]
    pub width: f64,
    #[serde(default = "default_height")]
    pub height: f64,
    #[serde(default = "default_show_volume")]
    pub show_volume: bool,
    #[serde(default)]
    pub timeframe: Option<Timeframe>,
    #[serde(default = "default_no_data_text")]
    pub no_data_text: String,
    #[serde(default)]
    pub style: ChartStyle,
    #[serde(default)]
    pub tooltip: TooltipConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            viewport: default_viewport(),
            width: default_width(),
            height: default_height(),
            show_volume: default_show_volume(),
            timeframe: None,
            no_data_text: default_no_data_text(),
            style: ChartStyle::default(),
            tooltip: TooltipConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Config whose virtual surface matches the rendered viewport one-to-one.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            width: f64::from(viewport.width),
            height: f64::from(viewport.height),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_virtual_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_show_volume(mut self, show_volume: bool) -> Self {
        self.show_volume = show_volume;
        self
    }

    #[must_use]
    pub fn with_timeframe(mut self, timeframe: Timeframe) -> Self {
        self.timeframe = Some(timeframe);
        self
    }

    #[must_use]
    pub fn with_style(mut self, style: ChartStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipConfig) -> Self {
        self.tooltip = tooltip;
        self
    }

    #[must_use]
    pub fn with_no_data_text(mut self, text: impl Into<String>) -> Self {
        self.no_data_text = text.into();
        self
    }

    /// Virtual layout derived from `width`, `height` and `show_volume`.
    pub fn layout(&self) -> ChartResult<ChartLayout> {
        ChartLayout::new(self.width, self.height, self.show_volume)
    }

    pub fn validate(&self) -> ChartResult<ChartLayout> {
        self.viewport.validate()?;
        self.style.validate()?;
        self.tooltip.validate()?;
        if self.no_data_text.trim().is_empty() {
            return Err(ChartError::InvalidData(
                "no-data placeholder text must not be empty".to_owned(),
            ));
        }
        self.layout()
    }

    /// Serializes config to pretty JSON.
    pub fn to_json_pretty(&self) -> ChartResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| ChartError::InvalidData(format!("failed to serialize config: {e}")))
    }

    /// Deserializes config from JSON.
    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        serde_json::from_str(input)
            .map_err(|e| ChartError::InvalidData(format!("failed to parse config: {e}")))
    }
}

fn default_viewport() -> Viewport {
    Viewport::new(DEFAULT_CHART_WIDTH as u32, DEFAULT_CHART_HEIGHT as u32)
}

fn default_width() -> f64 {
    DEFAULT_CHART_WIDTH
}

fn default_height() -> f64 {
    DEFAULT_CHART_HEIGHT
}

fn default_show_volume() -> bool {
    true
}

fn default_no_data_text() -> String {
    DEFAULT_NO_DATA_TEXT.to_owned()
}
