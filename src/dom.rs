//! Thin layer between the carousel core and the track element.

use crate::config::CARD_SELECTOR;
use crate::geometry::{self, Geometry, TrackLayout};
use crate::utils::css_px_or;
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement, ScrollBehavior, ScrollToOptions};

/// Read the layout metrics the geometry resolver needs.
pub fn measure(track: &HtmlElement, dot_count: usize) -> TrackLayout {
    let cards = track.query_selector_all(CARD_SELECTOR).ok();
    let card_count = cards.as_ref().map(|list| list.length() as usize).unwrap_or(0);
    let card_width = cards
        .as_ref()
        .and_then(|list| list.get(0))
        .and_then(|card| card.dyn_into::<HtmlElement>().ok())
        .map(|card| card.offset_width() as f64)
        .unwrap_or(0.0);

    let (gap, padding_start) = match computed_style(track) {
        Some(style) => (
            style.get_property_value("column-gap").unwrap_or_default(),
            style.get_property_value("padding-left").unwrap_or_default(),
        ),
        None => (String::new(), String::new()),
    };

    // scrollWidth counts the leading padding; geometry adds it back as
    // min_scroll, so max_scroll lands on the browser's own scroll limit.
    let content_width = track.scroll_width() as f64 - css_px_or(&padding_start, 0.0);

    TrackLayout {
        card_count,
        card_width,
        gap,
        padding_start,
        content_width,
        viewport_width: track.client_width() as f64,
        dot_count,
    }
}

/// Measure and resolve in one go.
pub fn resolve_geometry(track: &HtmlElement, dot_count: usize, default_gap: f64) -> Option<Geometry> {
    geometry::resolve(&measure(track, dot_count), default_gap)
}

fn computed_style(element: &Element) -> Option<web_sys::CssStyleDeclaration> {
    let window = web_sys::window()?;
    match window.get_computed_style(element) {
        Ok(style) => style,
        Err(e) => {
            warn!("getComputedStyle failed: {:?}", e);
            None
        }
    }
}

pub fn scroll_offset(track: &HtmlElement) -> f64 {
    track.scroll_left() as f64
}

fn scroll_with(track: &HtmlElement, left: f64, behavior: ScrollBehavior) {
    let options = ScrollToOptions::new();
    options.set_left(left);
    options.set_behavior(behavior);
    track.scroll_to_with_scroll_to_options(&options);
}

/// Move the track immediately, bypassing any CSS smooth scrolling.
pub fn jump_to(track: &HtmlElement, left: f64) {
    scroll_with(track, left, ScrollBehavior::Instant);
}

pub fn smooth_scroll_to(track: &HtmlElement, left: f64) {
    scroll_with(track, left, ScrollBehavior::Smooth);
}

const OVERRIDDEN: [(&str, &str); 2] = [("scroll-snap-type", "none"), ("scroll-behavior", "auto")];

/// Native snapping and smooth scrolling switched off for the lifetime of the
/// value. The previous inline styles come back on drop.
pub struct NativeScrollOverride {
    track: HtmlElement,
    saved: Vec<(&'static str, String)>,
}

impl NativeScrollOverride {
    pub fn engage(track: &HtmlElement) -> Self {
        let style = track.style();
        let mut saved = Vec::with_capacity(OVERRIDDEN.len());
        for (property, value) in OVERRIDDEN {
            let previous = style.get_property_value(property).unwrap_or_default();
            if let Err(e) = style.set_property(property, value) {
                warn!("could not override {}: {:?}", property, e);
                continue;
            }
            saved.push((property, previous));
        }
        Self {
            track: track.clone(),
            saved,
        }
    }
}

impl Drop for NativeScrollOverride {
    fn drop(&mut self) {
        let style = self.track.style();
        for (property, previous) in self.saved.drain(..) {
            let restored = if previous.is_empty() {
                style.remove_property(property).map(|_| ())
            } else {
                style.set_property(property, &previous)
            };
            if let Err(e) = restored {
                warn!("could not restore {}: {:?}", property, e);
            }
        }
    }
}

/// Pointer capture on the track, released on drop.
pub struct PointerCapture {
    element: Element,
    pointer_id: i32,
}

impl PointerCapture {
    pub fn acquire(element: &Element, pointer_id: i32) -> Option<Self> {
        match element.set_pointer_capture(pointer_id) {
            Ok(()) => Some(Self {
                element: element.clone(),
                pointer_id,
            }),
            Err(e) => {
                warn!("pointer capture refused for {}: {:?}", pointer_id, e);
                None
            }
        }
    }
}

impl Drop for PointerCapture {
    fn drop(&mut self) {
        if self.element.has_pointer_capture(self.pointer_id) {
            let _ = self.element.release_pointer_capture(self.pointer_id);
        }
    }
}
