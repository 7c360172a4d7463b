//! Cancellable timing primitives for the carousel.
//!
//! Both handles cancel on drop, so whoever owns them decides how long the
//! callbacks may keep firing.

use gloo_render::{request_animation_frame, AnimationFrame};
use gloo_timers::callback::Timeout;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

struct FrameLoopInner {
    frame: RefCell<Option<AnimationFrame>>,
    running: Cell<bool>,
}

/// A repeating animation-frame task.
pub struct FrameLoop {
    inner: Rc<FrameLoopInner>,
}

impl FrameLoop {
    /// Call `on_frame` with the frame timestamp (ms) on every animation frame
    /// until the loop is stopped or dropped.
    pub fn start(on_frame: impl FnMut(f64) + 'static) -> Self {
        let inner = Rc::new(FrameLoopInner {
            frame: RefCell::new(None),
            running: Cell::new(true),
        });
        schedule_frame(Rc::downgrade(&inner), Rc::new(RefCell::new(on_frame)));
        Self { inner }
    }

    pub fn stop(&self) {
        self.inner.running.set(false);
        self.inner.frame.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn schedule_frame<F: FnMut(f64) + 'static>(inner: Weak<FrameLoopInner>, on_frame: Rc<RefCell<F>>) {
    let Some(strong) = inner.upgrade() else {
        return;
    };
    let handle = request_animation_frame(move |timestamp| {
        let Some(strong) = inner.upgrade() else {
            return;
        };
        strong.frame.borrow_mut().take();
        if !strong.running.get() {
            return;
        }
        (on_frame.borrow_mut())(timestamp);
        // on_frame may have stopped the loop
        if strong.running.get() {
            schedule_frame(inner, on_frame);
        }
    });
    *strong.frame.borrow_mut() = Some(handle);
}

/// A single pending delayed callback; scheduling a new one cancels the old.
#[derive(Default)]
pub struct ResumeTimer {
    pending: Option<Timeout>,
}

impl ResumeTimer {
    pub fn schedule(&mut self, delay_ms: u32, callback: impl FnOnce() + 'static) {
        // Dropping the previous Timeout clears it.
        self.pending = Some(Timeout::new(delay_ms, callback));
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
