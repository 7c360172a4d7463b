//! Drag tracking and post-release momentum.

use crate::geometry::Geometry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Mouse,
    Touch,
    Pen,
}

impl PointerKind {
    /// Map a DOM `pointerType` string.
    pub fn from_pointer_type(pointer_type: &str) -> Self {
        match pointer_type {
            "touch" => PointerKind::Touch,
            "pen" => PointerKind::Pen,
            _ => PointerKind::Mouse,
        }
    }
}

/// One pointer position, `time_ms` being the event timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub pointer_id: i32,
    pub x: f64,
    pub time_ms: f64,
}

/// A live drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub pointer_id: i32,
    pub kind: PointerKind,
    pub start_offset: f64,
    pub start_x: f64,
    last_x: f64,
    last_time_ms: f64,
    /// Pointer velocity in px/ms, positive when moving right.
    velocity: f64,
}

impl DragSession {
    pub fn start(kind: PointerKind, sample: PointerSample, start_offset: f64) -> Self {
        Self {
            pointer_id: sample.pointer_id,
            kind,
            start_offset,
            start_x: sample.x,
            last_x: sample.x,
            last_time_ms: sample.time_ms,
            velocity: 0.0,
        }
    }

    /// Record a move and return the clamped offset it maps to.
    pub fn track(&mut self, geometry: &Geometry, sample: PointerSample) -> f64 {
        let dt = sample.time_ms - self.last_time_ms;
        if dt > 0.0 {
            self.velocity = (sample.x - self.last_x) / dt;
        }
        self.last_x = sample.x;
        self.last_time_ms = sample.time_ms;
        geometry.clamp(self.start_offset - (sample.x - self.start_x))
    }

    /// Total horizontal displacement since press.
    pub fn displacement(&self) -> f64 {
        self.last_x - self.start_x
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// A touch release far enough from the press point is a swipe.
    pub fn is_swipe(&self, threshold: f64) -> bool {
        self.kind == PointerKind::Touch && self.displacement().abs() > threshold
    }
}

/// Decaying glide after a drag is released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Momentum {
    velocity: f64,
    friction: f64,
    min_velocity: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MomentumStep {
    /// Keep gliding; write the offset.
    Glide(f64),
    /// Motion is over; write the final offset and hand control back.
    Stop(f64),
}

impl Momentum {
    pub fn new(velocity: f64, friction: f64, min_velocity: f64) -> Self {
        Self {
            velocity,
            friction,
            min_velocity,
        }
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Whether there is enough speed left to bother animating.
    pub fn is_alive(&self) -> bool {
        self.velocity.abs() >= self.min_velocity
    }

    /// Advance one frame of `frame_ms` starting from `offset`.
    pub fn step(&mut self, geometry: &Geometry, offset: f64, frame_ms: f64) -> MomentumStep {
        self.velocity *= self.friction;
        let next = offset - self.velocity * frame_ms;
        let clamped = geometry.clamp(next);
        if clamped != next || !self.is_alive() {
            self.velocity = 0.0;
            MomentumStep::Stop(clamped)
        } else {
            MomentumStep::Glide(clamped)
        }
    }
}
