use tracing::trace;

use crate::core::{CandleShape, ChartLayout, ShapeRect, Viewport};
use crate::error::ChartResult;
use crate::render::{
    Color, LinePrimitive, RectPrimitive, RenderFrame, Renderer, TextHAlign, TextPrimitive,
};

use super::{ChartStyle, PriceChart, Tooltip, TooltipConfig};

/// Virtual-unit to rendered-pixel scaling.
#[derive(Debug, Clone, Copy)]
struct PixelTransform {
    scale_x: f64,
    scale_y: f64,
}

impl PixelTransform {
    fn new(viewport: Viewport, layout: ChartLayout) -> Self {
        Self {
            scale_x: f64::from(viewport.width) / layout.width,
            scale_y: f64::from(viewport.height) / layout.height,
        }
    }

    fn x(self, x: f64) -> f64 {
        x * self.scale_x
    }

    fn y(self, y: f64) -> f64 {
        y * self.scale_y
    }

    fn rect(self, rect: ShapeRect, fill: Color) -> RectPrimitive {
        RectPrimitive::new(
            self.x(rect.left),
            self.y(rect.top),
            rect.width * self.scale_x,
            rect.height * self.scale_y,
            fill,
        )
    }
}

impl<R: Renderer> PriceChart<R> {
    /// Materializes the current state into a backend-neutral frame.
    ///
    /// An empty series produces only the placeholder text.
    pub fn build_render_frame(&self) -> ChartResult<RenderFrame> {
        let viewport = self.config.viewport;
        let style = self.config.style;
        let mut frame = RenderFrame::new(viewport);

        if self.series.is_empty() {
            frame.texts.push(TextPrimitive::new(
                self.config.no_data_text.clone(),
                f64::from(viewport.width) / 2.0,
                f64::from(viewport.height) / 2.0,
                style.font_size_px,
                style.placeholder_text_color,
                TextHAlign::Center,
            ));
            trace!("built placeholder frame");
            return Ok(frame);
        }

        let transform = PixelTransform::new(viewport, self.layout);
        let shapes = self.candle_shapes()?;

        if self.layout.shows_volume() {
            let y = transform.y(self.layout.plot_bottom() + self.layout.volume_gap / 2.0);
            frame.lines.push(LinePrimitive::new(
                transform.x(self.layout.left_padding),
                y,
                transform.x(self.layout.width - self.layout.right_padding),
                y,
                style.separator_width_px,
                style.separator_color,
            ));
        }

        for shape in &shapes {
            append_candle(&mut frame, shape, transform, &style);
        }

        if let Some(hover) = self.hover {
            if let Some(shape) = shapes.get(hover.index) {
                let x = transform.x(shape.center_x);
                frame.lines.push(LinePrimitive::new(
                    x,
                    transform.y(self.layout.top_padding),
                    x,
                    transform.y(self.layout.height - self.layout.bottom_padding),
                    style.hover_line_width_px,
                    style.hover_line_color,
                ));
            }
        }

        if let Some(tooltip) = self.tooltip() {
            append_tooltip(&mut frame, &tooltip, &style, &self.config.tooltip);
        }

        trace!(
            candles = shapes.len(),
            lines = frame.lines.len(),
            rects = frame.rects.len(),
            texts = frame.texts.len(),
            "built render frame"
        );
        Ok(frame)
    }
}

fn append_candle(
    frame: &mut RenderFrame,
    shape: &CandleShape,
    transform: PixelTransform,
    style: &ChartStyle,
) {
    let color = style.candle_color(shape.direction);

    if let Some(volume) = shape.volume {
        frame
            .rects
            .push(transform.rect(volume, style.volume_color(shape.direction)));
    }

    let wick_x = transform.x(shape.wick.x);
    frame.lines.push(LinePrimitive::new(
        wick_x,
        transform.y(shape.wick.top),
        wick_x,
        transform.y(shape.wick.bottom),
        style.wick_width_px,
        color,
    ));
    frame.rects.push(transform.rect(shape.body, color));
}

fn append_tooltip(
    frame: &mut RenderFrame,
    tooltip: &Tooltip,
    style: &ChartStyle,
    config: &TooltipConfig,
) {
    let placement = tooltip.placement;
    frame.rects.push(
        RectPrimitive::new(
            placement.left,
            placement.top,
            placement.width,
            placement.height,
            style.tooltip_background_color,
        )
        .with_border(1.0, style.tooltip_border_color)
        .with_corner_radius(style.tooltip_corner_radius_px),
    );

    for (row_index, row) in tooltip.content.rows().iter().enumerate() {
        frame.texts.push(TextPrimitive::new(
            row.text(),
            placement.left + config.padding_px,
            placement.top + config.padding_px + row_index as f64 * config.line_height_px,
            style.font_size_px,
            style.tooltip_text_color,
            TextHAlign::Left,
        ));
    }
}
