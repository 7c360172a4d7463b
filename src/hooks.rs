use crate::carousel::{Carousel, Release, ResumeTicket, ScrollCommand, Tick};
use crate::config::{CarouselConfig, DEFAULT_FRAME_MS, MAX_FRAME_MS};
use crate::dom::{self, NativeScrollOverride, PointerCapture};
use crate::geometry::Geometry;
use crate::momentum::{PointerKind, PointerSample};
use crate::scheduler::{FrameLoop, ResumeTimer};
use crate::utils::dominant_wheel_delta;
use gloo_events::{EventListener, EventListenerOptions};
use log::{debug, info};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::JsCast;
use web_sys::{HtmlElement, PointerEvent, WheelEvent};
use yew::prelude::*;

/// Everything the page needs to render and drive the testimonial carousel.
#[derive(Clone)]
pub struct CarouselHandle {
    /// Attach to the scrollable track element.
    pub track_ref: NodeRef,
    /// Dot to highlight.
    pub active_index: usize,
    /// Smooth-scroll to a dot's page; wired to the dot click handlers.
    pub scroll_to_index: Callback<usize>,
    pub onpointerdown: Callback<PointerEvent>,
    pub onpointermove: Callback<PointerEvent>,
    pub onpointerup: Callback<PointerEvent>,
    pub onpointercancel: Callback<PointerEvent>,
    pub onscroll: Callback<Event>,
}

/// Mutable carousel state shared by the event handlers, the frame loop and
/// the delayed resumes.
struct Runtime {
    carousel: Carousel,
    dot_count: usize,
    overrides: Option<NativeScrollOverride>,
    capture: Option<PointerCapture>,
    timer: ResumeTimer,
    last_frame: Option<f64>,
    /// Last offset we wrote. `scrollLeft` reads back whole pixels, which
    /// would swallow the sub-pixel autoplay step.
    written: Option<f64>,
}

impl Runtime {
    fn new(config: CarouselConfig, dot_count: usize) -> Self {
        Self {
            carousel: Carousel::new(config),
            dot_count,
            overrides: None,
            capture: None,
            timer: ResumeTimer::default(),
            last_frame: None,
            written: None,
        }
    }

    fn geometry(&self, track: &HtmlElement) -> Option<Geometry> {
        dom::resolve_geometry(track, self.dot_count, self.carousel.config().default_gap)
    }

    fn offset(&self, track: &HtmlElement) -> f64 {
        let actual = dom::scroll_offset(track);
        match self.written {
            Some(written) if (written - actual).abs() < 1.0 => written,
            _ => actual,
        }
    }

    fn write(&mut self, track: &HtmlElement, offset: f64) {
        dom::jump_to(track, offset);
        self.written = Some(offset);
    }

    fn disable_native_scroll(&mut self, track: &HtmlElement) {
        if self.overrides.is_none() {
            self.overrides = Some(NativeScrollOverride::engage(track));
        }
    }

    fn restore_native_scroll(&mut self) {
        self.overrides = None;
    }

    fn frame_duration(&mut self, timestamp: f64) -> f64 {
        let frame_ms = match self.last_frame {
            Some(previous) => (timestamp - previous).clamp(0.0, MAX_FRAME_MS),
            None => DEFAULT_FRAME_MS,
        };
        self.last_frame = Some(timestamp);
        frame_ms
    }

    fn teardown(&mut self) {
        self.carousel.teardown();
        self.timer.cancel();
        self.capture = None;
        self.restore_native_scroll();
    }
}

type SharedRuntime = Rc<RefCell<Runtime>>;

fn sample(event: &PointerEvent) -> PointerSample {
    PointerSample {
        pointer_id: event.pointer_id(),
        x: event.client_x() as f64,
        time_ms: event.time_stamp(),
    }
}

/// Hand the offset back to autoplay after `delay_ms`, unless another input
/// starts first.
fn schedule_resume(
    runtime: &SharedRuntime,
    rt: &mut Runtime,
    track: &HtmlElement,
    active: &UseStateHandle<usize>,
    ticket: ResumeTicket,
    delay_ms: u32,
) {
    let weak: Weak<RefCell<Runtime>> = Rc::downgrade(runtime);
    let track = track.clone();
    let active = active.clone();
    rt.timer.schedule(delay_ms, move || {
        let Some(runtime) = weak.upgrade() else {
            return;
        };
        let wrapped = {
            let mut rt = runtime.borrow_mut();
            let geometry = rt.geometry(&track);
            let offset = rt.offset(&track);
            let Some(resumed) = rt.carousel.resume(ticket, geometry.as_ref(), offset) else {
                return;
            };
            rt.restore_native_scroll();
            debug!("autoplay resumed at {:.1}px", offset);
            match resumed.wrap_to {
                Some(start) => {
                    rt.write(&track, start);
                    true
                }
                None => false,
            }
        };
        if wrapped {
            active.set(0);
        }
    });
}

/// Start the smooth scroll for a dot and schedule its settle.
///
/// Returns the dot to highlight right away. Callers publish it once the
/// runtime borrow is released, since a state update may render synchronously.
fn run_scroll_command(
    runtime: &SharedRuntime,
    rt: &mut Runtime,
    track: &HtmlElement,
    active: &UseStateHandle<usize>,
    command: ScrollCommand,
) -> usize {
    rt.capture = None;
    rt.disable_native_scroll(track);
    rt.written = None;
    dom::smooth_scroll_to(track, command.target_offset);
    let settle = rt.carousel.config().settle_delay_ms;
    schedule_resume(runtime, rt, track, active, command.ticket, settle);
    command.index
}

/// Drive the testimonial track: autoplay, drag with momentum, wheel, swipe
/// and dot navigation, all writing one scroll offset.
#[hook]
pub fn use_carousel(dot_count: usize, config: CarouselConfig) -> CarouselHandle {
    let track_ref = use_node_ref();
    let active = use_state_eq(|| 0usize);
    let runtime: SharedRuntime = use_mut_ref(|| Runtime::new(config, dot_count));
    runtime.borrow_mut().dot_count = dot_count;

    // Frame loop and wheel listener live as long as the component.
    {
        let track_ref = track_ref.clone();
        let runtime = runtime.clone();
        let active = active.clone();
        use_effect_with((), move |_| {
            let mut frame_loop = None;
            let mut wheel_listener = None;

            if let Some(track) = track_ref.cast::<HtmlElement>() {
                info!("carousel mounted with {} dots", runtime.borrow().dot_count);

                frame_loop = Some({
                    let runtime = runtime.clone();
                    let track = track.clone();
                    let active = active.clone();
                    FrameLoop::start(move |timestamp| {
                        let wrapped = {
                            let mut rt = runtime.borrow_mut();
                            let frame_ms = rt.frame_duration(timestamp);
                            let geometry = rt.geometry(&track);
                            let offset = rt.offset(&track);
                            match rt.carousel.tick(geometry.as_ref(), offset, frame_ms) {
                                Tick::Hold => false,
                                Tick::Scroll(next) => {
                                    rt.write(&track, next);
                                    false
                                }
                                Tick::Wrap(start) => {
                                    rt.write(&track, start);
                                    true
                                }
                                Tick::MomentumEnd { offset, ticket } => {
                                    rt.write(&track, offset);
                                    rt.restore_native_scroll();
                                    let delay = rt.carousel.config().resume_delay_ms;
                                    schedule_resume(&runtime, &mut rt, &track, &active, ticket, delay);
                                    false
                                }
                            }
                        };
                        if wrapped {
                            active.set(0);
                        }
                    })
                });

                // Non-passive so the native wheel scroll can be cancelled.
                wheel_listener = Some({
                    let runtime = runtime.clone();
                    let track = track.clone();
                    let active = active.clone();
                    EventListener::new_with_options(
                        &track.clone(),
                        "wheel",
                        EventListenerOptions::enable_prevent_default(),
                        move |event| {
                            let Some(event) = event.dyn_ref::<WheelEvent>() else {
                                return;
                            };
                            let delta = wheel_delta_px(event, track.client_width() as f64);
                            let mut rt = runtime.borrow_mut();
                            let geometry = rt.geometry(&track);
                            let offset = rt.offset(&track);
                            let Some((next, ticket)) =
                                rt.carousel.wheel(geometry.as_ref(), delta, offset)
                            else {
                                return;
                            };
                            // At a bound the page keeps its own scroll.
                            if next != offset {
                                event.prevent_default();
                            }
                            rt.capture = None;
                            rt.disable_native_scroll(&track);
                            rt.write(&track, next);
                            let delay = rt.carousel.config().resume_delay_ms;
                            schedule_resume(&runtime, &mut rt, &track, &active, ticket, delay);
                        },
                    )
                });
            }

            move || {
                drop(wheel_listener);
                drop(frame_loop);
                runtime.borrow_mut().teardown();
                debug!("carousel torn down");
            }
        });
    }

    let scroll_to_index = {
        let track_ref = track_ref.clone();
        let runtime = runtime.clone();
        let active = active.clone();
        Callback::from(move |index: usize| {
            let Some(track) = track_ref.cast::<HtmlElement>() else {
                return;
            };
            let highlighted = {
                let mut rt = runtime.borrow_mut();
                let geometry = rt.geometry(&track);
                rt.carousel
                    .scroll_to_index(geometry.as_ref(), index)
                    .map(|command| run_scroll_command(&runtime, &mut rt, &track, &active, command))
            };
            if let Some(index) = highlighted {
                active.set(index);
            }
        })
    };

    let onpointerdown = {
        let track_ref = track_ref.clone();
        let runtime = runtime.clone();
        Callback::from(move |event: PointerEvent| {
            if event.pointer_type() == "mouse" && event.button() != 0 {
                return;
            }
            let Some(track) = track_ref.cast::<HtmlElement>() else {
                return;
            };
            let kind = PointerKind::from_pointer_type(&event.pointer_type());
            let mut rt = runtime.borrow_mut();
            let geometry = rt.geometry(&track);
            let offset = rt.offset(&track);
            if !rt
                .carousel
                .pointer_down(geometry.as_ref(), kind, sample(&event), offset)
            {
                return;
            }
            if kind == PointerKind::Mouse {
                // keeps the browser from starting a text selection
                event.prevent_default();
            }
            rt.timer.cancel();
            rt.disable_native_scroll(&track);
            rt.capture = PointerCapture::acquire(&track, event.pointer_id());
        })
    };

    let onpointermove = {
        let track_ref = track_ref.clone();
        let runtime = runtime.clone();
        Callback::from(move |event: PointerEvent| {
            let Some(track) = track_ref.cast::<HtmlElement>() else {
                return;
            };
            let mut rt = runtime.borrow_mut();
            if !rt.carousel.is_dragging() {
                return;
            }
            let geometry = rt.geometry(&track);
            if let Some(next) = rt.carousel.pointer_move(geometry.as_ref(), sample(&event)) {
                rt.write(&track, next);
            }
        })
    };

    let onpointerup = {
        let track_ref = track_ref.clone();
        let runtime = runtime.clone();
        let active = active.clone();
        Callback::from(move |event: PointerEvent| {
            let Some(track) = track_ref.cast::<HtmlElement>() else {
                return;
            };
            let highlighted = {
                let mut rt = runtime.borrow_mut();
                let geometry = rt.geometry(&track);
                match rt.carousel.pointer_up(geometry.as_ref(), sample(&event)) {
                    Release::Ignored => None,
                    Release::Ended(ticket) => {
                        rt.capture = None;
                        rt.restore_native_scroll();
                        let delay = rt.carousel.config().resume_delay_ms;
                        schedule_resume(&runtime, &mut rt, &track, &active, ticket, delay);
                        None
                    }
                    Release::Glide => {
                        rt.capture = None;
                        None
                    }
                    Release::Swipe(command) => {
                        Some(run_scroll_command(&runtime, &mut rt, &track, &active, command))
                    }
                }
            };
            if let Some(index) = highlighted {
                active.set(index);
            }
        })
    };

    let onpointercancel = {
        let track_ref = track_ref.clone();
        let runtime = runtime.clone();
        let active = active.clone();
        Callback::from(move |event: PointerEvent| {
            let Some(track) = track_ref.cast::<HtmlElement>() else {
                return;
            };
            let mut rt = runtime.borrow_mut();
            if let Some(ticket) = rt.carousel.pointer_cancel(event.pointer_id()) {
                rt.capture = None;
                rt.restore_native_scroll();
                let delay = rt.carousel.config().resume_delay_ms;
                schedule_resume(&runtime, &mut rt, &track, &active, ticket, delay);
            }
        })
    };

    let onscroll = {
        let track_ref = track_ref.clone();
        let runtime = runtime.clone();
        let active = active.clone();
        Callback::from(move |_: Event| {
            let Some(track) = track_ref.cast::<HtmlElement>() else {
                return;
            };
            let index = {
                let rt = runtime.borrow();
                let geometry = rt.geometry(&track);
                rt.carousel.index_for_scroll(geometry.as_ref(), rt.offset(&track))
            };
            if let Some(index) = index {
                active.set(index);
            }
        })
    };

    CarouselHandle {
        track_ref,
        active_index: *active,
        scroll_to_index,
        onpointerdown,
        onpointermove,
        onpointerup,
        onpointercancel,
        onscroll,
    }
}

/// Wheel delta in pixels whatever `deltaMode` the browser reports.
fn wheel_delta_px(event: &WheelEvent, page_width: f64) -> f64 {
    let delta = dominant_wheel_delta(event.delta_x(), event.delta_y());
    match event.delta_mode() {
        WheelEvent::DOM_DELTA_LINE => delta * 16.0,
        WheelEvent::DOM_DELTA_PAGE => delta * page_width,
        _ => delta,
    }
}
