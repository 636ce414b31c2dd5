use core::cmp;
use core::ops::Range;

use crate::{ScrollAxis, WindowState};

/// Everything derived from a [`WindowState`] and the collection length.
///
/// Values are computed in dependency order by [`WindowMetrics::compute`]: page geometry,
/// padding, the four index bounds, then spacer sizes. The computation is total: unknown or
/// zero dimensions produce an empty window instead of failing.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowMetrics {
    pub axis: ScrollAxis,
    pub len: usize,
    pub cols_per_page: usize,
    pub rows_per_page: usize,
    pub items_per_page: usize,
    /// Extra items mounted on each side of the page, a whole number of cross-axis lines.
    pub items_padding: usize,
    pub first_visible: usize,
    pub last_visible: usize,
    pub first_hidden: usize,
    /// Exclusive end of the mounted items, never larger than `len`.
    pub last_hidden: usize,
    pub height_before: f64,
    pub height_after: f64,
    pub width_before: f64,
    pub width_after: f64,
}

#[derive(Clone, Copy)]
enum Rounding {
    Floor,
    Ceil,
}

impl WindowMetrics {
    pub fn compute(state: &WindowState, len: usize) -> Self {
        let axis = state.axis;
        let (col_rounding, row_rounding) = match axis {
            ScrollAxis::Vertical => (Rounding::Floor, Rounding::Ceil),
            ScrollAxis::Horizontal => (Rounding::Ceil, Rounding::Floor),
        };

        let cols_per_page = lines_per_page(state.viewport_width, state.item_width, col_rounding);
        let rows_per_page = lines_per_page(state.viewport_height, state.item_height, row_rounding);
        let items_per_page = cols_per_page.saturating_mul(rows_per_page);

        let cross = match axis {
            ScrollAxis::Vertical => cols_per_page,
            ScrollAxis::Horizontal => rows_per_page,
        };
        let items_padding = items_padding(items_per_page, state.pages_padding, cross);

        let item_size = state.item_size_on_axis();
        let first_visible = first_visible(
            state.scroll_position.saturating_sub(state.scroll_pos_offset),
            item_size,
            cross,
        );
        // A zero-item page keeps `last_visible` pinned to `first_visible` and mounts nothing.
        let last_visible = first_visible.saturating_add(items_per_page.saturating_sub(1));
        let first_hidden = first_visible.saturating_sub(items_padding.saturating_add(1));
        let last_hidden = cmp::min(
            first_visible
                .saturating_add(items_per_page)
                .saturating_add(items_padding),
            len,
        );

        let before = spacer(first_hidden as f64, cross, item_size);
        let after = spacer(len as f64 - 1.0 - last_hidden as f64, cross, item_size);
        let (height_before, height_after, width_before, width_after) = match axis {
            ScrollAxis::Vertical => (before, after, 0.0, 0.0),
            ScrollAxis::Horizontal => (0.0, 0.0, before, after),
        };

        Self {
            axis,
            len,
            cols_per_page,
            rows_per_page,
            items_per_page,
            items_padding,
            first_visible,
            last_visible,
            first_hidden,
            last_hidden,
            height_before,
            height_after,
            width_before,
            width_after,
        }
    }

    /// Items sharing one line across the scroll direction.
    pub fn cross_multiple(&self) -> usize {
        match self.axis {
            ScrollAxis::Vertical => self.cols_per_page,
            ScrollAxis::Horizontal => self.rows_per_page,
        }
    }

    /// Leading spacer along the active axis.
    pub fn spacer_before(&self) -> f64 {
        match self.axis {
            ScrollAxis::Vertical => self.height_before,
            ScrollAxis::Horizontal => self.width_before,
        }
    }

    /// Trailing spacer along the active axis.
    pub fn spacer_after(&self) -> f64 {
        match self.axis {
            ScrollAxis::Vertical => self.height_after,
            ScrollAxis::Horizontal => self.width_after,
        }
    }

    /// Indexes the visible slice covers: always `0..last_hidden`.
    pub fn mounted_range(&self) -> Range<usize> {
        0..self.last_hidden
    }

    /// The padded window `first_hidden..last_hidden`, for renderers that skip leading items.
    pub fn hidden_range(&self) -> Range<usize> {
        cmp::min(self.first_hidden, self.last_hidden)..self.last_hidden
    }
}

fn lines_per_page(viewport: i64, item: i64, rounding: Rounding) -> usize {
    if viewport <= 0 || item <= 0 {
        return 0;
    }
    let (viewport, item) = (viewport as u64, item as u64);
    let lines = match rounding {
        Rounding::Floor => viewport / item,
        Rounding::Ceil => viewport.div_ceil(item),
    };
    to_usize(lines)
}

fn items_padding(items_per_page: usize, pages_padding: f64, cross: usize) -> usize {
    if cross == 0 {
        return 0;
    }
    let lines = items_per_page as f64 * pages_padding / cross as f64;
    // `as` saturates, so negative factors clamp to zero; for the rest truncation is floor.
    let lines = if lines.is_finite() { lines as usize } else { 0 };
    lines.saturating_mul(cross)
}

fn first_visible(distance: i64, item_size: i64, cross: usize) -> usize {
    if distance <= 0 || item_size <= 0 {
        return 0;
    }
    let lines = to_usize(distance as u64 / item_size as u64);
    lines.saturating_mul(cross)
}

fn spacer(lines_of_items: f64, cross: usize, item_size: i64) -> f64 {
    if cross == 0 || item_size <= 0 {
        return 0.0;
    }
    let size = lines_of_items / cross as f64 * item_size as f64;
    if size.is_finite() && size > 0.0 {
        size
    } else {
        0.0
    }
}

fn to_usize(v: u64) -> usize {
    usize::try_from(v).unwrap_or(usize::MAX)
}
