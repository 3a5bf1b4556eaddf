use indexmap::IndexMap;
use tracing::{debug, warn};

use crate::core::{ChartLayout, ChartSeries, Timeframe, Viewport};
use crate::error::ChartResult;
use crate::interaction::{HoverEvent, HoverSelection};
use crate::render::Renderer;

use super::{ChartConfig, ChartStyle};

/// Callback receiving hover changes: `Some` on a hit, `None` when cleared.
pub type HoverHandler = Box<dyn FnMut(Option<&HoverEvent>)>;

/// Price-history chart facade consumed by host screens.
///
/// `PriceChart` owns the renderer, the current series and the hover
/// selection. Every public operation is synchronous; a series replacement
/// is visible to the very next pointer event.
pub struct PriceChart<R: Renderer> {
    pub(super) renderer: R,
    pub(super) config: ChartConfig,
    pub(super) layout: ChartLayout,
    pub(super) series: ChartSeries,
    pub(super) series_metadata: IndexMap<String, String>,
    pub(super) hover: Option<HoverSelection>,
    pub(super) hover_handler: Option<HoverHandler>,
}

impl<R: Renderer> PriceChart<R> {
    pub fn new(renderer: R, config: ChartConfig) -> ChartResult<Self> {
        let layout = config.validate()?;
        debug!(
            viewport_width = config.viewport.width,
            viewport_height = config.viewport.height,
            show_volume = config.show_volume,
            "price chart created"
        );
        Ok(Self {
            renderer,
            config,
            layout,
            series: ChartSeries::empty(),
            series_metadata: IndexMap::new(),
            hover: None,
            hover_handler: None,
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    #[must_use]
    pub fn layout(&self) -> ChartLayout {
        self.layout
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.config.viewport
    }

    #[must_use]
    pub fn style(&self) -> ChartStyle {
        self.config.style
    }

    pub fn set_style(&mut self, style: ChartStyle) -> ChartResult<()> {
        self.config.style = style.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn timeframe(&self) -> Option<Timeframe> {
        self.config.timeframe
    }

    pub fn set_timeframe(&mut self, timeframe: Option<Timeframe>) {
        self.config.timeframe = timeframe;
    }

    /// Updates the rendered pixel size.
    ///
    /// Any hover selection is dropped because its pointer position belongs to
    /// the old geometry.
    pub fn resize(&mut self, viewport: Viewport) -> ChartResult<()> {
        self.config.viewport = viewport.validate()?;
        self.clear_hover();
        Ok(())
    }

    /// Shows or hides the volume track, re-deriving the virtual layout.
    pub fn set_show_volume(&mut self, show_volume: bool) -> ChartResult<()> {
        let layout = ChartLayout::new(self.config.width, self.config.height, show_volume)?;
        self.config.show_volume = show_volume;
        self.layout = layout;
        Ok(())
    }

    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.build_render_frame()?;
        self.renderer.render(&frame).inspect_err(|err| {
            warn!(error = %err, "renderer rejected frame");
        })
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
