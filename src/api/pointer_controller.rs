use tracing::trace;

use crate::core::PixelPoint;
use crate::interaction::{HoverEvent, HoverSelection, hit_test};
use crate::render::Renderer;

use super::{PriceChart, Tooltip};

impl<R: Renderer> PriceChart<R> {
    /// Installs the hover callback, replacing any previous one.
    pub fn set_hover_handler(&mut self, handler: impl FnMut(Option<&HoverEvent>) + 'static) {
        self.hover_handler = Some(Box::new(handler));
    }

    pub fn clear_hover_handler(&mut self) {
        self.hover_handler = None;
    }

    /// Hit-tests a pointer position given in rendered pixels.
    ///
    /// Returns the hovered record, or `None` when the pointer is over
    /// padding, in which case the selection is cleared. The hover handler
    /// sees the same value.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> Option<HoverEvent> {
        let pixel = PixelPoint::new(x, y);
        let event = hit_test(pixel, self.config.viewport, self.layout, self.series.len())
            .and_then(|index| {
                self.series.get(index).map(|record| HoverEvent {
                    index,
                    record: *record,
                    pixel,
                })
            });

        self.hover = event.as_ref().map(HoverEvent::selection);
        trace!(x, y, index = ?self.hover.map(|hover| hover.index), "pointer move");
        self.notify_hover(event.as_ref());
        event
    }

    /// Pointer left the chart: the selection clears and the handler always
    /// receives `None`.
    pub fn pointer_leave(&mut self) {
        trace!("pointer leave");
        self.hover = None;
        self.notify_hover(None);
    }

    #[must_use]
    pub fn hover(&self) -> Option<HoverSelection> {
        self.hover
    }

    /// Event for the current selection, rebuilt from the current series.
    #[must_use]
    pub fn hover_event(&self) -> Option<HoverEvent> {
        let hover = self.hover?;
        self.series.get(hover.index).map(|record| HoverEvent {
            index: hover.index,
            record: *record,
            pixel: hover.pointer,
        })
    }

    #[must_use]
    pub fn tooltip(&self) -> Option<Tooltip> {
        let event = self.hover_event()?;
        Some(Tooltip::new(
            event.index,
            &event.record,
            event.pixel,
            self.config.viewport,
            &self.config.tooltip,
        ))
    }

    pub(super) fn clear_hover(&mut self) {
        if self.hover.take().is_some() {
            self.notify_hover(None);
        }
    }

    fn notify_hover(&mut self, event: Option<&HoverEvent>) {
        if let Some(handler) = self.hover_handler.as_mut() {
            handler(event);
        }
    }
}
