//! Carousel geometry derived from the current layout.
//!
//! Nothing here is cached: the viewport and the card count can change between
//! two interactions, so every handler measures a fresh [`TrackLayout`] and
//! resolves it again.

use crate::utils::css_px_or;

/// Raw layout metrics read off the track element.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackLayout {
    pub card_count: usize,
    /// Width of the first card, in px.
    pub card_width: f64,
    /// Computed `gap` of the track, unparsed.
    pub gap: String,
    /// Computed leading padding of the track, unparsed.
    pub padding_start: String,
    /// Scrollable content width excluding the leading padding.
    pub content_width: f64,
    pub viewport_width: f64,
    /// Indicator slots rendered outside the track.
    pub dot_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub card_width: f64,
    pub gap: f64,
    pub min_scroll: f64,
    pub max_scroll: f64,
    pub dot_count: usize,
    pub dot_step: f64,
}

/// Resolve a layout into scroll bounds and dot spacing.
///
/// Returns `None` while the track has no cards; callers skip their action.
pub fn resolve(layout: &TrackLayout, default_gap: f64) -> Option<Geometry> {
    if layout.card_count == 0 {
        return None;
    }

    let gap = css_px_or(&layout.gap, default_gap);
    let min_scroll = css_px_or(&layout.padding_start, 0.0).max(0.0);
    let overflow = (layout.content_width - layout.viewport_width).max(0.0);
    let max_scroll = overflow + min_scroll;
    let dot_count = layout.dot_count.max(1);
    let dot_step = if dot_count > 1 {
        (max_scroll - min_scroll) / (dot_count - 1) as f64
    } else {
        0.0
    };

    Some(Geometry {
        card_width: layout.card_width.max(0.0),
        gap,
        min_scroll,
        max_scroll,
        dot_count,
        dot_step,
    })
}

impl Geometry {
    pub fn clamp(&self, offset: f64) -> f64 {
        if offset.is_nan() {
            return self.min_scroll;
        }
        offset.clamp(self.min_scroll, self.max_scroll)
    }

    /// Distance autoplay can travel before wrapping.
    pub fn range(&self) -> f64 {
        self.max_scroll - self.min_scroll
    }

    pub fn can_scroll(&self) -> bool {
        self.range() > 0.0
    }

    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.dot_count.saturating_sub(1))
    }

    /// Active dot for a scroll offset.
    pub fn index_for_offset(&self, offset: f64) -> usize {
        if self.dot_step <= 0.0 {
            return 0;
        }
        let raw = ((offset - self.min_scroll) / self.dot_step).round();
        if raw <= 0.0 {
            0
        } else {
            self.clamp_index(raw as usize)
        }
    }

    /// Scroll offset that brings a dot's page into view.
    pub fn offset_for_index(&self, index: usize) -> f64 {
        let index = self.clamp_index(index);
        self.clamp(self.min_scroll + index as f64 * self.dot_step)
    }

    /// Whether `offset` sits at the end bound, within `epsilon`.
    pub fn at_end(&self, offset: f64, epsilon: f64) -> bool {
        offset >= self.max_scroll - epsilon
    }
}
