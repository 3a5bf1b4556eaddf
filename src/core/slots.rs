use serde::{Deserialize, Serialize};

use crate::core::ChartLayout;
use crate::error::{ChartError, ChartResult};

/// Horizontal slot partition of the plot width, one slot per record.
///
/// Shape generation places candles with `center_x`; hit-testing inverts it
/// with `index_at`. Both go through this type so they cannot disagree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SlotLayout {
    left: f64,
    count: usize,
    slot_width: f64,
    body_width: f64,
}

impl SlotLayout {
    pub const BODY_WIDTH_RATIO: f64 = 0.6;
    pub const MIN_BODY_WIDTH: f64 = 2.0;

    pub fn new(layout: ChartLayout, count: usize) -> ChartResult<Self> {
        let layout = layout.validate()?;
        if count == 0 {
            return Err(ChartError::EmptySeries);
        }

        let slot_width = layout.plot_width() / count as f64;
        Ok(Self {
            left: layout.left_padding,
            count,
            slot_width,
            body_width: (slot_width * Self::BODY_WIDTH_RATIO).max(Self::MIN_BODY_WIDTH),
        })
    }

    #[must_use]
    pub fn count(self) -> usize {
        self.count
    }

    #[must_use]
    pub fn slot_width(self) -> f64 {
        self.slot_width
    }

    #[must_use]
    pub fn body_width(self) -> f64 {
        self.body_width
    }

    #[must_use]
    pub fn center_x(self, index: usize) -> f64 {
        self.left + (index as f64 + 0.5) * self.slot_width
    }

    /// `[left, right)` bounds of slot `index`.
    #[must_use]
    pub fn slot_bounds(self, index: usize) -> (f64, f64) {
        let left = self.left + index as f64 * self.slot_width;
        (left, left + self.slot_width)
    }

    /// Resolves a virtual x coordinate to its slot.
    ///
    /// A coordinate exactly on a boundary belongs to the slot on its right.
    /// Anything left of the first slot or right of the last one is `None`.
    #[must_use]
    pub fn index_at(self, x: f64) -> Option<usize> {
        if !x.is_finite() {
            return None;
        }
        let offset = x - self.left;
        if offset < 0.0 {
            return None;
        }
        let slot = (offset / self.slot_width).floor();
        if slot >= self.count as f64 {
            return None;
        }
        Some(slot as usize)
    }
}
