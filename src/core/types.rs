use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Rendered pixel size of the chart's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// Pointer position in rendered pixels, relative to the chart's top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Geometry of the fixed virtual drawing surface.
///
/// All candle and volume shapes are computed in these units. The price plot
/// occupies the top of the surface; when a volume track is present it sits
/// below the plot, separated by `volume_gap`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartLayout {
    pub width: f64,
    pub height: f64,
    pub left_padding: f64,
    pub right_padding: f64,
    pub top_padding: f64,
    pub bottom_padding: f64,
    pub volume_track_height: f64,
    pub volume_gap: f64,
}

impl ChartLayout {
    pub const DEFAULT_HORIZONTAL_PADDING: f64 = 8.0;
    pub const DEFAULT_TOP_PADDING: f64 = 10.0;
    pub const DEFAULT_BOTTOM_PADDING: f64 = 10.0;
    pub const VOLUME_TRACK_RATIO: f64 = 0.2;
    pub const DEFAULT_VOLUME_GAP: f64 = 6.0;

    /// Builds the default layout for a `width` x `height` virtual surface.
    pub fn new(width: f64, height: f64, show_volume: bool) -> ChartResult<Self> {
        let (volume_track_height, volume_gap) = if show_volume {
            (height * Self::VOLUME_TRACK_RATIO, Self::DEFAULT_VOLUME_GAP)
        } else {
            (0.0, 0.0)
        };

        Self {
            width,
            height,
            left_padding: Self::DEFAULT_HORIZONTAL_PADDING,
            right_padding: Self::DEFAULT_HORIZONTAL_PADDING,
            top_padding: Self::DEFAULT_TOP_PADDING,
            bottom_padding: Self::DEFAULT_BOTTOM_PADDING,
            volume_track_height,
            volume_gap,
        }
        .validate()
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("left padding", self.left_padding),
            ("right padding", self.right_padding),
            ("top padding", self.top_padding),
            ("bottom padding", self.bottom_padding),
            ("volume track height", self.volume_track_height),
            ("volume gap", self.volume_gap),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidData(format!(
                    "layout {name} must be finite and >= 0"
                )));
            }
        }

        if self.plot_width() <= 0.0 || self.plot_height() <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "layout leaves no room for the price plot: plot={}x{}",
                self.plot_width(),
                self.plot_height()
            )));
        }

        Ok(self)
    }

    #[must_use]
    pub fn shows_volume(self) -> bool {
        self.volume_track_height > 0.0
    }

    #[must_use]
    pub fn plot_width(self) -> f64 {
        self.width - self.left_padding - self.right_padding
    }

    #[must_use]
    pub fn plot_height(self) -> f64 {
        self.height
            - self.top_padding
            - self.bottom_padding
            - self.volume_track_height
            - self.volume_gap
    }

    #[must_use]
    pub fn plot_bottom(self) -> f64 {
        self.top_padding + self.plot_height()
    }

    #[must_use]
    pub fn volume_track_top(self) -> f64 {
        self.plot_bottom() + self.volume_gap
    }

    #[must_use]
    pub fn volume_track_bottom(self) -> f64 {
        self.volume_track_top() + self.volume_track_height
    }
}
