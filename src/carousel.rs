//! Carousel controller: who may write the scroll offset, and what they write.
//!
//! The track's scroll offset has four competing writers (autoplay, drag and
//! its momentum, wheel, dot navigation). Exactly one [`Session`] owns the
//! offset at a time; starting any input takes ownership away from whoever
//! held it. Delayed hand-backs to autoplay carry a [`ResumeTicket`] and are
//! dropped if another input started after the ticket was issued.
//!
//! The controller never stores the offset itself. The DOM is the source of
//! truth; every call receives the current offset and returns what to write.

use crate::config::CarouselConfig;
use crate::geometry::Geometry;
use crate::momentum::{DragSession, Momentum, MomentumStep, PointerKind, PointerSample};
use log::debug;

/// Owner of the scroll offset.
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    /// Autoplay RUNNING.
    Autoplay,
    /// Autoplay PAUSED, nobody writing, waiting for a resume ticket.
    Idle,
    Dragging(DragSession),
    Momentum(Momentum),
    Wheel,
    Programmatic { target: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResumeTicket(u64);

/// What the frame loop should do with the offset this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tick {
    /// Leave the offset alone.
    Hold,
    Scroll(f64),
    /// Jumped back to the start; the active index is 0.
    Wrap(f64),
    /// Momentum finished at `offset`; restore native scrolling and schedule
    /// the resume.
    MomentumEnd { offset: f64, ticket: ResumeTicket },
}

/// Outcome of lifting the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum Release {
    /// Not the pointer we were tracking.
    Ignored,
    /// Gesture over; restore native scrolling and schedule the resume.
    Ended(ResumeTicket),
    /// Glide handed to the frame loop.
    Glide,
    /// Touch swipe turned into dot navigation.
    Swipe(ScrollCommand),
}

/// A smooth scroll to a dot's page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollCommand {
    pub index: usize,
    pub target_offset: f64,
    pub ticket: ResumeTicket,
}

/// Autoplay regained the offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resumed {
    /// Silent jump back to the start after a dot scroll landed on the end.
    pub wrap_to: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct Carousel {
    config: CarouselConfig,
    session: Session,
    generation: u64,
}

impl Default for Carousel {
    fn default() -> Self {
        Self::new(CarouselConfig::default())
    }
}

impl Carousel {
    pub fn new(config: CarouselConfig) -> Self {
        Self {
            config,
            session: Session::Autoplay,
            generation: 0,
        }
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn is_autoplaying(&self) -> bool {
        self.session == Session::Autoplay
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.session, Session::Dragging(_))
    }

    /// Take the offset for a new input; every outstanding ticket goes stale.
    fn acquire(&mut self, session: Session) -> ResumeTicket {
        self.generation += 1;
        self.session = session;
        ResumeTicket(self.generation)
    }

    /// Give the offset up without handing it to anyone yet.
    fn release(&mut self) -> ResumeTicket {
        self.session = Session::Idle;
        ResumeTicket(self.generation)
    }

    /// One animation frame.
    pub fn tick(&mut self, geometry: Option<&Geometry>, offset: f64, frame_ms: f64) -> Tick {
        let Some(geometry) = geometry else {
            return Tick::Hold;
        };

        if self.session == Session::Autoplay {
            return self.autoplay_step(geometry, offset);
        }
        let Session::Momentum(momentum) = &mut self.session else {
            return Tick::Hold;
        };

        match momentum.step(geometry, offset, frame_ms) {
            MomentumStep::Glide(next) => Tick::Scroll(next),
            MomentumStep::Stop(next) => {
                let ticket = self.release();
                debug!("momentum settled at {:.1}px", next);
                Tick::MomentumEnd {
                    offset: next,
                    ticket,
                }
            }
        }
    }

    fn autoplay_step(&self, geometry: &Geometry, offset: f64) -> Tick {
        if !geometry.can_scroll() {
            return if offset == geometry.min_scroll {
                Tick::Hold
            } else {
                Tick::Scroll(geometry.min_scroll)
            };
        }

        let next = geometry.clamp(offset) + self.config.speed;
        if geometry.at_end(next, self.config.wrap_epsilon) {
            Tick::Wrap(geometry.min_scroll)
        } else {
            Tick::Scroll(next)
        }
    }

    /// Start a drag. Refused while another drag is live or without layout.
    pub fn pointer_down(
        &mut self,
        geometry: Option<&Geometry>,
        kind: PointerKind,
        sample: PointerSample,
        offset: f64,
    ) -> bool {
        let Some(geometry) = geometry else {
            return false;
        };
        if self.is_dragging() {
            return false;
        }
        let start = geometry.clamp(offset);
        self.acquire(Session::Dragging(DragSession::start(kind, sample, start)));
        debug!("drag started at {:.1}px ({:?})", start, kind);
        true
    }

    /// Offset to write for a pointer move, if it belongs to the live drag.
    pub fn pointer_move(&mut self, geometry: Option<&Geometry>, sample: PointerSample) -> Option<f64> {
        let geometry = geometry?;
        match &mut self.session {
            Session::Dragging(drag) if drag.pointer_id == sample.pointer_id => {
                Some(drag.track(geometry, sample))
            }
            _ => None,
        }
    }

    /// Finish the live drag: swipe, glide or plain release.
    ///
    /// A swipe steps from the dot active at release, i.e. the one the drag
    /// itself has scrolled to.
    pub fn pointer_up(&mut self, geometry: Option<&Geometry>, sample: PointerSample) -> Release {
        let mut drag = match &self.session {
            Session::Dragging(drag) if drag.pointer_id == sample.pointer_id => drag.clone(),
            _ => return Release::Ignored,
        };
        let Some(geometry) = geometry else {
            return Release::Ended(self.release());
        };
        let released_at = drag.track(geometry, sample);

        if drag.is_swipe(self.config.swipe_threshold) {
            let active_index = geometry.index_for_offset(released_at);
            let target = if drag.displacement() < 0.0 {
                active_index + 1
            } else {
                active_index.saturating_sub(1)
            };
            debug!("swipe {:.0}px -> dot {}", drag.displacement(), target);
            return match self.scroll_to_index(Some(geometry), target) {
                Some(command) => Release::Swipe(command),
                None => Release::Ended(self.release()),
            };
        }

        let momentum = Momentum::new(
            drag.velocity(),
            self.config.friction,
            self.config.min_velocity,
        );
        if momentum.is_alive() {
            self.session = Session::Momentum(momentum);
            Release::Glide
        } else {
            Release::Ended(self.release())
        }
    }

    /// Abort the live drag without swipe or momentum.
    pub fn pointer_cancel(&mut self, pointer_id: i32) -> Option<ResumeTicket> {
        match &self.session {
            Session::Dragging(drag) if drag.pointer_id == pointer_id => Some(self.release()),
            _ => None,
        }
    }

    /// Apply a wheel delta. A live drag keeps the offset.
    pub fn wheel(
        &mut self,
        geometry: Option<&Geometry>,
        delta: f64,
        offset: f64,
    ) -> Option<(f64, ResumeTicket)> {
        let geometry = geometry?;
        if self.is_dragging() {
            return None;
        }
        let ticket = self.acquire(Session::Wheel);
        Some((geometry.clamp(offset + delta), ticket))
    }

    /// Navigate to a dot. The index is clamped to the dots that exist.
    pub fn scroll_to_index(
        &mut self,
        geometry: Option<&Geometry>,
        index: usize,
    ) -> Option<ScrollCommand> {
        let geometry = geometry?;
        let index = geometry.clamp_index(index);
        let ticket = self.acquire(Session::Programmatic { target: index });
        Some(ScrollCommand {
            index,
            target_offset: geometry.offset_for_index(index),
            ticket,
        })
    }

    /// Active dot for a scroll event, always derived from the offset.
    pub fn index_for_scroll(&self, geometry: Option<&Geometry>, offset: f64) -> Option<usize> {
        geometry.map(|g| g.index_for_offset(offset))
    }

    /// Hand the offset back to autoplay once a delay has elapsed.
    ///
    /// Returns `None` when the ticket is stale or a drag/momentum owns the
    /// offset.
    pub fn resume(
        &mut self,
        ticket: ResumeTicket,
        geometry: Option<&Geometry>,
        offset: f64,
    ) -> Option<Resumed> {
        if ticket.0 != self.generation {
            debug!("stale resume ticket {} (current {})", ticket.0, self.generation);
            return None;
        }
        let wrap_to = match self.session {
            Session::Idle | Session::Wheel => None,
            Session::Programmatic { .. } => geometry
                .filter(|g| g.can_scroll() && g.at_end(offset, self.config.wrap_epsilon))
                .map(|g| g.min_scroll),
            _ => return None,
        };
        self.session = Session::Autoplay;
        Some(Resumed { wrap_to })
    }

    /// Drop whatever input was live and invalidate every ticket.
    pub fn teardown(&mut self) {
        self.generation += 1;
        self.session = Session::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry(max_scroll: f64) -> Geometry {
        Geometry {
            card_width: 320.0,
            gap: 24.0,
            min_scroll: 0.0,
            max_scroll,
            dot_count: 4,
            dot_step: max_scroll / 3.0,
        }
    }

    fn sample(pointer_id: i32, x: f64, time_ms: f64) -> PointerSample {
        PointerSample {
            pointer_id,
            x,
            time_ms,
        }
    }

    fn offset_of(tick: Tick) -> Option<f64> {
        match tick {
            Tick::Hold => None,
            Tick::Scroll(o) | Tick::Wrap(o) => Some(o),
            Tick::MomentumEnd { offset, .. } => Some(offset),
        }
    }

    #[test]
    fn autoplay_wraps_near_the_end() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        assert_eq!(carousel.tick(Some(&g), 298.0, 16.0), Tick::Wrap(0.0));
        match carousel.tick(Some(&g), 100.0, 16.0) {
            Tick::Scroll(next) => assert!((next - 102.2).abs() < 1e-9),
            other => panic!("expected scroll, got {:?}", other),
        }
    }

    #[test]
    fn autoplay_cycles_without_overshooting() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        let mut offset = 0.0;
        let mut wrapped = false;
        for _ in 0..500 {
            match carousel.tick(Some(&g), offset, 16.0) {
                Tick::Scroll(next) => {
                    assert!(next <= g.max_scroll + carousel.config().speed);
                    assert!(next >= g.min_scroll);
                    offset = next;
                }
                Tick::Wrap(next) => {
                    assert_eq!(next, g.min_scroll);
                    wrapped = true;
                    break;
                }
                other => panic!("unexpected tick {:?}", other),
            }
        }
        assert!(wrapped);
    }

    #[test]
    fn autoplay_holds_when_nothing_to_scroll() {
        let mut g = geometry(0.0);
        g.dot_step = 0.0;
        let mut carousel = Carousel::default();
        assert_eq!(carousel.tick(Some(&g), 0.0, 16.0), Tick::Hold);
        assert_eq!(carousel.tick(Some(&g), 12.0, 16.0), Tick::Scroll(0.0));
    }

    #[test]
    fn no_layout_is_a_no_op_everywhere() {
        let mut carousel = Carousel::default();
        assert_eq!(carousel.tick(None, 10.0, 16.0), Tick::Hold);
        assert!(!carousel.pointer_down(None, PointerKind::Mouse, sample(1, 0.0, 0.0), 0.0));
        assert!(carousel.wheel(None, 50.0, 0.0).is_none());
        assert!(carousel.scroll_to_index(None, 2).is_none());
        assert!(carousel.index_for_scroll(None, 0.0).is_none());
        assert!(carousel.is_autoplaying());
    }

    #[test]
    fn scroll_to_index_targets_dot_offset() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        let command = carousel.scroll_to_index(Some(&g), 2).unwrap();
        assert_eq!(command.index, 2);
        assert_eq!(command.target_offset, 200.0);
        assert!(!carousel.is_autoplaying());
        assert_eq!(carousel.index_for_scroll(Some(&g), 120.0), Some(1));
    }

    #[test]
    fn interrupted_dot_scroll_reports_the_real_position() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        carousel.scroll_to_index(Some(&g), 3).unwrap();
        assert_eq!(carousel.index_for_scroll(Some(&g), 0.0), Some(0));
        assert_eq!(carousel.index_for_scroll(Some(&g), 210.0), Some(2));
    }

    #[test]
    fn scroll_to_index_is_idempotent_and_clamped() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        let first = carousel.scroll_to_index(Some(&g), 9).unwrap();
        let second = carousel.scroll_to_index(Some(&g), 9).unwrap();
        assert_eq!(first.index, 3);
        assert_eq!((first.index, first.target_offset), (second.index, second.target_offset));
        assert_eq!(first.target_offset, 300.0);
    }

    #[test]
    fn settle_at_the_end_wraps_silently() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        let command = carousel.scroll_to_index(Some(&g), 3).unwrap();
        let resumed = carousel
            .resume(command.ticket, Some(&g), command.target_offset)
            .unwrap();
        assert_eq!(resumed.wrap_to, Some(0.0));
        assert!(carousel.is_autoplaying());
    }

    #[test]
    fn settle_mid_track_does_not_wrap() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        let command = carousel.scroll_to_index(Some(&g), 1).unwrap();
        let resumed = carousel.resume(command.ticket, Some(&g), 100.0).unwrap();
        assert_eq!(resumed.wrap_to, None);
    }

    #[test]
    fn wheel_moves_offset_and_pauses() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        let (offset, ticket) = carousel.wheel(Some(&g), 50.0, 100.0).unwrap();
        assert_eq!(offset, 150.0);
        assert!(!carousel.is_autoplaying());
        assert_eq!(carousel.tick(Some(&g), offset, 16.0), Tick::Hold);
        assert!(carousel.resume(ticket, Some(&g), offset).is_some());
        assert!(carousel.is_autoplaying());
    }

    #[test]
    fn repeated_wheel_events_debounce_the_resume() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        let (_, first) = carousel.wheel(Some(&g), 50.0, 100.0).unwrap();
        let (offset, second) = carousel.wheel(Some(&g), 400.0, 150.0).unwrap();
        assert_eq!(offset, 300.0);
        assert!(carousel.resume(first, Some(&g), offset).is_none());
        assert!(!carousel.is_autoplaying());
        assert!(carousel.resume(second, Some(&g), offset).is_some());
    }

    #[test]
    fn drag_start_invalidates_pending_resume() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        let command = carousel.scroll_to_index(Some(&g), 1).unwrap();
        assert!(carousel.pointer_down(Some(&g), PointerKind::Mouse, sample(1, 0.0, 0.0), 100.0));
        assert!(carousel.resume(command.ticket, Some(&g), 100.0).is_none());
        assert!(carousel.is_dragging());
    }

    #[test]
    fn only_one_drag_at_a_time() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        assert!(carousel.pointer_down(Some(&g), PointerKind::Touch, sample(1, 0.0, 0.0), 100.0));
        assert!(!carousel.pointer_down(Some(&g), PointerKind::Touch, sample(2, 50.0, 5.0), 100.0));
        assert_eq!(carousel.pointer_move(Some(&g), sample(2, 80.0, 10.0)), None);
        assert_eq!(carousel.pointer_move(Some(&g), sample(1, -20.0, 10.0)), Some(120.0));
        assert!(carousel.wheel(Some(&g), 10.0, 120.0).is_none());
    }

    #[test]
    fn touch_swipe_left_goes_to_next_dot() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        carousel.pointer_down(Some(&g), PointerKind::Touch, sample(7, 200.0, 0.0), 100.0);
        carousel.pointer_move(Some(&g), sample(7, 180.0, 40.0));
        match carousel.pointer_up(Some(&g), sample(7, 160.0, 80.0)) {
            Release::Swipe(command) => {
                assert_eq!(command.index, 2);
                assert_eq!(command.target_offset, 200.0);
            }
            other => panic!("expected swipe, got {:?}", other),
        }
        assert_eq!(carousel.session(), &Session::Programmatic { target: 2 });
    }

    #[test]
    fn swipe_steps_from_the_dot_reached_by_the_drag() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        carousel.pointer_down(Some(&g), PointerKind::Touch, sample(7, 200.0, 0.0), 140.0);
        assert_eq!(carousel.pointer_move(Some(&g), sample(7, 160.0, 40.0)), Some(180.0));
        assert_eq!(carousel.index_for_scroll(Some(&g), 180.0), Some(2));
        match carousel.pointer_up(Some(&g), sample(7, 160.0, 80.0)) {
            Release::Swipe(command) => {
                assert_eq!(command.index, 3);
                assert_eq!(command.target_offset, 300.0);
            }
            other => panic!("expected swipe, got {:?}", other),
        }
    }

    #[test]
    fn touch_swipe_right_goes_to_previous_dot() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        carousel.pointer_down(Some(&g), PointerKind::Touch, sample(7, 100.0, 0.0), 0.0);
        match carousel.pointer_up(Some(&g), sample(7, 150.0, 80.0)) {
            Release::Swipe(command) => assert_eq!(command.index, 0),
            other => panic!("expected swipe, got {:?}", other),
        }
    }

    #[test]
    fn mouse_flick_glides_then_hands_back() {
        let g = geometry(3_000.0);
        let mut carousel = Carousel::default();
        carousel.pointer_down(Some(&g), PointerKind::Mouse, sample(1, 500.0, 0.0), 1_000.0);
        carousel.pointer_move(Some(&g), sample(1, 480.0, 10.0));
        assert_eq!(carousel.pointer_up(Some(&g), sample(1, 460.0, 20.0)), Release::Glide);

        let mut offset = 1_040.0;
        let mut ticket = None;
        for _ in 0..1_000 {
            match carousel.tick(Some(&g), offset, 16.0) {
                Tick::Scroll(next) => {
                    assert!(next >= offset);
                    offset = next;
                }
                Tick::MomentumEnd { offset: last, ticket: t } => {
                    offset = last;
                    ticket = Some(t);
                    break;
                }
                other => panic!("unexpected tick {:?}", other),
            }
        }
        let ticket = ticket.expect("momentum never ended");
        assert!(offset > 1_040.0 && offset <= g.max_scroll);
        assert_eq!(carousel.tick(Some(&g), offset, 16.0), Tick::Hold);
        assert!(carousel.resume(ticket, Some(&g), offset).is_some());
        assert!(carousel.is_autoplaying());
    }

    #[test]
    fn slow_release_ends_immediately() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        carousel.pointer_down(Some(&g), PointerKind::Mouse, sample(1, 100.0, 0.0), 100.0);
        carousel.pointer_move(Some(&g), sample(1, 99.0, 100.0));
        assert!(matches!(
            carousel.pointer_up(Some(&g), sample(1, 99.0, 200.0)),
            Release::Ended(_)
        ));
        assert_eq!(carousel.session(), &Session::Idle);
    }

    #[test]
    fn cancel_releases_without_momentum() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        carousel.pointer_down(Some(&g), PointerKind::Touch, sample(3, 100.0, 0.0), 100.0);
        assert!(carousel.pointer_cancel(4).is_none());
        let ticket = carousel.pointer_cancel(3).unwrap();
        assert_eq!(carousel.session(), &Session::Idle);
        assert!(carousel.resume(ticket, Some(&g), 100.0).is_some());
    }

    #[test]
    fn foreign_pointer_up_is_ignored() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        assert_eq!(carousel.pointer_up(Some(&g), sample(1, 0.0, 0.0)), Release::Ignored);
        carousel.pointer_down(Some(&g), PointerKind::Mouse, sample(1, 0.0, 0.0), 0.0);
        assert_eq!(carousel.pointer_up(Some(&g), sample(2, 0.0, 0.0)), Release::Ignored);
    }

    #[test]
    fn resume_never_interrupts_a_drag() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        carousel.pointer_down(Some(&g), PointerKind::Mouse, sample(1, 0.0, 0.0), 0.0);
        let current = ResumeTicket(carousel.generation);
        assert!(carousel.resume(current, Some(&g), 0.0).is_none());
        assert!(carousel.is_dragging());
    }

    #[test]
    fn teardown_invalidates_everything() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        let (_, ticket) = carousel.wheel(Some(&g), 10.0, 0.0).unwrap();
        carousel.teardown();
        assert!(carousel.resume(ticket, Some(&g), 10.0).is_none());
        assert_eq!(carousel.tick(Some(&g), 10.0, 16.0), Tick::Hold);
    }

    #[test]
    fn every_handler_keeps_offset_in_bounds() {
        let g = geometry(300.0);
        let mut carousel = Carousel::default();
        for start in [-40.0, 0.0, 150.0, 299.9, 340.0] {
            for delta in [-1_000.0, -3.0, 0.0, 3.0, 1_000.0] {
                let (offset, _) = carousel.wheel(Some(&g), delta, start).unwrap();
                assert!((g.min_scroll..=g.max_scroll).contains(&offset));
            }
            carousel.teardown();
            carousel.pointer_down(Some(&g), PointerKind::Mouse, sample(1, 0.0, 0.0), start);
            for x in [-900.0, -10.0, 10.0, 900.0] {
                let offset = carousel.pointer_move(Some(&g), sample(1, x, 1.0)).unwrap();
                assert!((g.min_scroll..=g.max_scroll).contains(&offset));
            }
            carousel.pointer_cancel(1);
            let mut autoplay = Carousel::default();
            if let Some(offset) = offset_of(autoplay.tick(Some(&g), start, 16.0)) {
                assert!((g.min_scroll..=g.max_scroll).contains(&offset));
            }
        }
    }
}
