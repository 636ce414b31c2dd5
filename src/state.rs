use crate::{ScrollAxis, UNKNOWN};

/// A snapshot of every input the window metrics are derived from.
///
/// Dimensions use [`UNKNOWN`] until measured. With `feature = "serde"`, this type implements
/// `Serialize`/`Deserialize`, so a UI can persist and restore it across sessions.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WindowState {
    pub axis: ScrollAxis,
    pub viewport_width: i64,
    pub viewport_height: i64,
    pub item_width: i64,
    pub item_height: i64,
    /// Offset along the active axis reported by the scroll container.
    pub scroll_position: i64,
    /// Distance between the page scroller and the start of the list, when the list lives in
    /// a box smaller than the scrolled container.
    pub scroll_pos_offset: i64,
    /// Extra pages of items kept mounted around the viewport.
    pub pages_padding: f64,
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            axis: ScrollAxis::Vertical,
            viewport_width: UNKNOWN,
            viewport_height: UNKNOWN,
            item_width: UNKNOWN,
            item_height: UNKNOWN,
            scroll_position: 0,
            scroll_pos_offset: 0,
            pages_padding: 1.0,
        }
    }
}

impl WindowState {
    /// Returns a copy with every field normalized the same way the setters normalize them.
    pub fn normalized(self) -> Self {
        Self {
            viewport_width: normalize_dimension(self.viewport_width),
            viewport_height: normalize_dimension(self.viewport_height),
            item_width: normalize_dimension(self.item_width),
            item_height: normalize_dimension(self.item_height),
            pages_padding: normalize_pages_padding(self.pages_padding),
            ..self
        }
    }

    /// Item size along the scroll direction.
    pub fn item_size_on_axis(&self) -> i64 {
        match self.axis {
            ScrollAxis::Vertical => self.item_height,
            ScrollAxis::Horizontal => self.item_width,
        }
    }
}

/// Maps zero and negative sizes to [`UNKNOWN`].
pub fn normalize_dimension(value: i64) -> i64 {
    if value > 0 { value } else { UNKNOWN }
}

/// Maps non-finite padding factors to the default of one page.
///
/// Zero and negative factors are kept; they derive zero padding items.
pub fn normalize_pages_padding(value: f64) -> f64 {
    if value.is_finite() { value } else { 1.0 }
}
