//! Pointer hit-testing and hover selection.
//!
//! Hover state is a plain value. The chart facade owns the current
//! `HoverSelection` and hands `HoverEvent`s to callers as return values and
//! handler arguments; nothing here is global.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{ChartLayout, OhlcRecord, PixelPoint, SlotLayout, Viewport};

/// Currently hovered record and the pointer position that selected it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverSelection {
    pub index: usize,
    pub pointer: PixelPoint,
}

/// Payload delivered to hover handlers on pointer movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HoverEvent {
    pub index: usize,
    pub record: OhlcRecord,
    pub pixel: PixelPoint,
}

impl HoverEvent {
    #[must_use]
    pub fn selection(&self) -> HoverSelection {
        HoverSelection {
            index: self.index,
            pointer: self.pixel,
        }
    }
}

/// Maps a rendered-pixel pointer position back to a record index.
///
/// The pointer's x is rescaled from `viewport` pixels into `layout` virtual
/// units and resolved with the same slot partition the candles are drawn
/// with. Positions over padding resolve to `None` instead of the nearest
/// edge candle.
#[must_use]
pub fn hit_test(
    pointer: PixelPoint,
    viewport: Viewport,
    layout: ChartLayout,
    series_len: usize,
) -> Option<usize> {
    if !pointer.is_finite() || !viewport.is_valid() || series_len == 0 {
        return None;
    }

    let slots = SlotLayout::new(layout, series_len).ok()?;
    let virtual_x = pointer.x * layout.width / f64::from(viewport.width);
    let index = slots.index_at(virtual_x);
    trace!(pointer_x = pointer.x, virtual_x, ?index, "hit test");
    index
}

/// Rendered-pixel x coordinate of the center of slot `index`.
#[must_use]
pub fn slot_center_pixel(
    index: usize,
    viewport: Viewport,
    layout: ChartLayout,
    series_len: usize,
) -> Option<f64> {
    if index >= series_len || !viewport.is_valid() {
        return None;
    }
    let slots = SlotLayout::new(layout, series_len).ok()?;
    Some(slots.center_x(index) * f64::from(viewport.width) / layout.width)
}
