//! Motion controller
//!
//! Owns one scroll bar's offsets and its single live animation, and decides
//! which motion model runs when a drag ends:
//!
//! | release velocity | content in bounds | action |
//! |---|---|---|
//! | significant | yes | decelerate, bounce if the flick crosses a bound |
//! | significant | no | snap back, seeded with the release velocity |
//! | negligible | yes | stop |
//! | negligible | no | snap back from rest |
//!
//! Deceleration runs in indicator space (the thumb was flicked) and is mapped
//! to content offsets every frame. Bounces run in content space around the
//! content edge, re-reading the edge every frame so that inset changes during
//! a bounce still land the content on the current bound.
//!
//! The controller never touches a view. Every output is queued as a
//! [`ScrollBarEvent`] and drained by the shell with
//! [`MotionController::drain_events`].

use std::time::Instant;

use serde::Serialize;
use smallvec::SmallVec;
use thumbtrack_animation::{
    duration_from_secs, AnimationSlot, DecelerationTiming, FrameAnimator, SpringConfig,
    SpringTiming, TimingParameters,
};
use thumbtrack_core::events::{event_types, EventType};
use thumbtrack_core::{interval, segment_rect_intersection, Axis, StateTransitions};

use crate::bounds::{AxisBounds, OffsetBounds, ScrollLayout};
use crate::config::{Result, ScrollBarConfig};
use crate::mapper::OffsetMapper;

/// Queue of pending outputs
pub type EventQueue = SmallVec<[ScrollBarEvent; 8]>;

/// What a scroll bar is doing
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBarPhase {
    #[default]
    Idle,
    /// The thumb follows the pointer
    Dragging,
    /// A flick is coasting
    Decelerating,
    /// A spring is pulling content back to a bound
    Bouncing,
}

impl StateTransitions for ScrollBarPhase {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;
        use ScrollBarPhase::*;
        match (self, event) {
            (Idle, DRAG_BEGIN) => Some(Dragging),
            (Dragging, DRAG_END) => Some(Idle),
            (Dragging, FLING) => Some(Decelerating),
            (Dragging | Decelerating, HIT_EDGE) => Some(Bouncing),
            (Decelerating | Bouncing, SETTLED) => Some(Idle),
            (Decelerating | Bouncing, CANCEL) => Some(Idle),
            _ => None,
        }
    }
}

/// Which model an animation samples
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MotionKind {
    Deceleration,
    Bounce,
}

/// Output of the controller
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ScrollBarEvent {
    /// Apply this offset to the scrollable content
    ContentOffsetChanged { offset: f64 },
    /// Move the thumb to this offset in its track
    IndicatorOffsetChanged { offset: f64 },
    MotionStarted { kind: MotionKind },
    /// `completed` is false when the motion was interrupted
    MotionFinished { kind: MotionKind, completed: bool },
    Shown,
    Hidden,
    InteractionStarted,
    InteractionEnded { will_decelerate: bool },
}

/// Side of the content range a bounce settles on
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RestEdge {
    Min,
    Max,
}

impl RestEdge {
    fn nearest(bounds: AxisBounds, offset: f64) -> Self {
        if (offset - bounds.min).abs() <= (offset - bounds.max).abs() {
            RestEdge::Min
        } else {
            RestEdge::Max
        }
    }

    fn value(self, bounds: AxisBounds) -> f64 {
        match self {
            RestEdge::Min => bounds.min,
            RestEdge::Max => bounds.max,
        }
    }
}

/// State lent to animation callbacks on every pulse
#[derive(Debug)]
struct MotionState {
    axis: Axis,
    content_offset: f64,
    indicator_offset: f64,
    /// Current mapping; replaced on every layout change
    mapper: OffsetMapper,
    threshold: f64,
    events: EventQueue,
    /// Velocity (indicator space) at which a finished flick crossed a bound
    handoff: Option<f64>,
    /// An offset was written since the last check
    moved: bool,
}

impl MotionState {
    fn write_content_offset(&mut self, offset: f64) {
        self.content_offset = offset;
        self.moved = true;
        self.events.push(ScrollBarEvent::ContentOffsetChanged { offset });
        self.sync_indicator(false);
    }

    fn sync_indicator(&mut self, adjust_for_overscroll: bool) {
        let offset = self
            .mapper
            .to_indicator_offset(self.content_offset, adjust_for_overscroll);
        if offset != self.indicator_offset {
            self.indicator_offset = offset;
            self.events
                .push(ScrollBarEvent::IndicatorOffsetChanged { offset });
        }
    }

    fn content_bounds(&self) -> AxisBounds {
        self.mapper.bounds.content_axis(self.axis)
    }
}

/// Drives one scroll bar
#[derive(Debug)]
pub struct MotionController {
    config: ScrollBarConfig,
    layout: ScrollLayout,
    phase: ScrollBarPhase,
    motion: MotionState,
    animation: AnimationSlot<MotionState>,
    /// Indicator offset when the current drag began
    drag_origin: Option<f64>,
    visible: bool,
    hide_deadline: Option<Instant>,
}

impl MotionController {
    /// Create a controller resting at the content minimum
    pub fn new(config: ScrollBarConfig, layout: ScrollLayout) -> Result<Self> {
        config.validate()?;
        let axis = config.direction;
        let mapper = Self::build_mapper(&config, &layout);
        let content_offset = mapper.bounds.content_axis(axis).min;
        let indicator_offset = mapper.to_indicator_offset(content_offset, false);

        Ok(Self {
            visible: config.always_visible,
            motion: MotionState {
                axis,
                content_offset,
                indicator_offset,
                mapper,
                threshold: config.motion_threshold(),
                events: EventQueue::new(),
                handoff: None,
                moved: false,
            },
            config,
            layout,
            phase: ScrollBarPhase::Idle,
            animation: AnimationSlot::new(),
            drag_origin: None,
            hide_deadline: None,
        })
    }

    fn build_mapper(config: &ScrollBarConfig, layout: &ScrollLayout) -> OffsetMapper {
        let bounds = OffsetBounds::from_layout(layout, config.indicator.size, config.indicator.insets);
        OffsetMapper::new(
            config.direction,
            bounds,
            config.physics.rubber_band_coefficient,
            config.physics.minimum_rubber_band_coefficient,
        )
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn config(&self) -> &ScrollBarConfig {
        &self.config
    }

    pub fn layout(&self) -> &ScrollLayout {
        &self.layout
    }

    pub fn axis(&self) -> Axis {
        self.motion.axis
    }

    pub fn phase(&self) -> ScrollBarPhase {
        self.phase
    }

    pub fn mapper(&self) -> &OffsetMapper {
        &self.motion.mapper
    }

    pub fn content_bounds(&self) -> AxisBounds {
        self.motion.content_bounds()
    }

    pub fn indicator_bounds(&self) -> AxisBounds {
        self.motion.mapper.bounds.indicator_axis(self.motion.axis)
    }

    pub fn content_offset(&self) -> f64 {
        self.motion.content_offset
    }

    pub fn indicator_offset(&self) -> f64 {
        self.motion.indicator_offset
    }

    /// True while an animator is live
    pub fn is_animating(&self) -> bool {
        self.animation.is_active()
    }

    pub fn is_dragging(&self) -> bool {
        self.phase == ScrollBarPhase::Dragging
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn hide_deadline(&self) -> Option<Instant> {
        self.hide_deadline
    }

    /// Take every output queued since the last call
    pub fn drain_events(&mut self) -> EventQueue {
        std::mem::take(&mut self.motion.events)
    }

    // =========================================================================
    // Layout and passive observation
    // =========================================================================

    /// Recompute bounds after a size or inset change.
    ///
    /// A running animation keeps going against the new bounds.
    pub fn set_layout(&mut self, layout: ScrollLayout) {
        self.layout = layout;
        self.motion.mapper = Self::build_mapper(&self.config, &self.layout);

        let content = self.content_bounds();
        let indicator = self.indicator_bounds();
        if content.range().abs() <= f64::EPSILON || indicator.range().abs() <= f64::EPSILON {
            tracing::warn!(
                ?content,
                ?indicator,
                "zero-width offset bounds, indicator pinned to its minimum"
            );
        }
        tracing::debug!(?content, ?indicator, "scroll bar layout changed");

        if !self.is_dragging() && !self.is_animating() {
            self.motion.sync_indicator(true);
        }
    }

    /// The content offset changed outside the engine (content scrolled by the
    /// user, programmatic scroll).
    ///
    /// Ignored unless the maximum content offset exceeds
    /// `minimum_content_range`; leading insets do not count.
    pub fn observe_content_offset(&mut self, offset: f64, now: Instant) {
        if self.content_bounds().max <= self.config.minimum_content_range {
            return;
        }
        self.motion.content_offset = offset;
        self.show();
        let adjust = !self.is_dragging() && !self.is_animating();
        self.motion.sync_indicator(adjust);
        self.arm_hide(now);
    }

    /// A gesture on the content area started or changed: it takes over.
    pub fn content_gesture_changed(&mut self) {
        self.cancel_animation();
    }

    // =========================================================================
    // Drag
    // =========================================================================

    /// The pointer grabbed the thumb
    pub fn begin_drag(&mut self) {
        self.cancel_animation();
        if !self.phase.transition(event_types::DRAG_BEGIN) {
            return;
        }
        self.drag_origin = Some(self.motion.indicator_offset);
        self.hide_deadline = None;
        self.show();
        self.motion.events.push(ScrollBarEvent::InteractionStarted);
        tracing::debug!(indicator = self.motion.indicator_offset, "drag began");
    }

    /// Pointer moved by `translation` (along the bar's axis) since `begin_drag`
    pub fn drag_to(&mut self, translation: f64) {
        let Some(origin) = self.drag_origin else {
            return;
        };
        let content = self.motion.mapper.to_content_offset(origin + translation);
        self.motion.write_content_offset(content);
        tracing::trace!(translation, content, "drag");
    }

    /// Pointer released with `velocity` (points/s along the bar's axis)
    pub fn end_drag(&mut self, velocity: f64, now: Instant) {
        if self.drag_origin.take().is_none() {
            return;
        }

        let physics = &self.config.physics;
        let significant = velocity.abs() > physics.significant_velocity;
        let in_bounds = self.content_bounds().contains(self.motion.content_offset);

        self.motion.events.push(ScrollBarEvent::InteractionEnded {
            will_decelerate: significant || !in_bounds,
        });
        self.arm_hide(now);
        tracing::debug!(velocity, significant, in_bounds, "drag ended");

        match (significant, in_bounds) {
            (true, true) if self.config.should_decelerate => self.start_deceleration(velocity, now),
            (true, true) | (false, true) => {
                self.phase.transition(event_types::DRAG_END);
            }
            (true, false) => self.snap_back(velocity, now),
            (false, false) => self.snap_back(0.0, now),
        }
    }

    // =========================================================================
    // Frame pulses
    // =========================================================================

    /// Deliver a display pulse. Returns true while an animation is running.
    pub fn tick(&mut self, now: Instant) -> bool {
        let running = self.animation.tick(now, &mut self.motion);

        if !running && matches!(self.phase, ScrollBarPhase::Decelerating | ScrollBarPhase::Bouncing) {
            match self.motion.handoff.take() {
                Some(velocity) => self.start_bounce(velocity, self.config.physics.bounce_spring, now),
                None => {
                    self.phase.transition(event_types::SETTLED);
                    tracing::debug!(content = self.motion.content_offset, "motion settled");
                }
            }
        }

        if std::mem::take(&mut self.motion.moved) {
            self.show();
            self.arm_hide(now);
        }

        if let Some(deadline) = self.hide_deadline {
            if now >= deadline {
                self.hide_deadline = None;
                self.hide();
            }
        }

        self.animation.is_active()
    }

    /// Stop the live animation, if any
    pub fn cancel_animation(&mut self) {
        self.motion.handoff = None;
        if self.animation.cancel(&mut self.motion) {
            self.phase.transition(event_types::CANCEL);
            tracing::debug!("motion cancelled");
        }
    }

    // =========================================================================
    // Motion
    // =========================================================================

    fn start_deceleration(&mut self, velocity: f64, now: Instant) {
        let axis = self.motion.axis;
        let timing = match DecelerationTiming::new(
            axis.point(self.motion.indicator_offset),
            axis.point(velocity),
            self.config.physics.deceleration_rate,
            self.motion.threshold,
        ) {
            Ok(timing) => timing,
            Err(err) => {
                tracing::warn!(%err, "cannot decelerate");
                self.phase.transition(event_types::DRAG_END);
                return;
            }
        };

        let track = self.motion.mapper.bounds.indicator_track(axis);
        let intersection = segment_rect_intersection(track, timing.initial_value, timing.destination());
        let crossing = intersection.and_then(|hit| timing.duration_to(hit));
        let duration = crossing.unwrap_or_else(|| timing.duration());

        if duration <= 0.0 {
            if crossing.is_some() {
                // Released on the bound and moving outward
                let handoff = axis.component(timing.velocity_at(0.0));
                tracing::debug!(velocity = handoff, "flick starts on the bound, bouncing");
                self.start_bounce(handoff, self.config.physics.bounce_spring, now);
            } else {
                self.phase.transition(event_types::DRAG_END);
            }
            return;
        }

        tracing::debug!(
            velocity,
            duration,
            destination = axis.component(timing.destination()),
            crosses_bound = crossing.is_some(),
            "deceleration started"
        );

        let animator = FrameAnimator::new(
            duration,
            move |state: &mut MotionState, frame| {
                let indicator = state.axis.component(timing.value_at(frame.elapsed));
                let content = state.mapper.to_content_offset(indicator);
                if (state.content_offset - content).abs() < state.threshold {
                    return;
                }
                state.write_content_offset(content);
            },
            move |state: &mut MotionState, completed| {
                state.events.push(ScrollBarEvent::MotionFinished {
                    kind: MotionKind::Deceleration,
                    completed,
                });
                if completed && crossing.is_some() {
                    state.handoff = Some(state.axis.component(timing.velocity_at(duration)));
                }
            },
        );

        self.phase.transition(event_types::FLING);
        self.motion.events.push(ScrollBarEvent::MotionStarted {
            kind: MotionKind::Deceleration,
        });
        self.animation.replace(animator, now, &mut self.motion);
    }

    /// Pull content that was released out of bounds back to the nearest edge.
    /// Further overscroll gives a stiffer spring.
    fn snap_back(&mut self, velocity: f64, now: Instant) {
        let overscroll = self.content_bounds().overscroll(self.motion.content_offset).abs();
        if overscroll == 0.0 {
            self.phase.transition(event_types::DRAG_END);
            return;
        }
        let physics = &self.config.physics;
        let viewport = self.motion.axis.extent(self.layout.viewport_size);
        let boost = if viewport > 0.0 {
            overscroll / viewport * physics.snap_back_stiffness_boost
        } else {
            0.0
        };
        let spring = SpringConfig::snap_back(physics.snap_back_stiffness + boost);
        self.start_bounce(velocity, spring, now);
    }

    /// Scale an indicator-space velocity into content space
    fn content_velocity(&self, velocity: f64) -> f64 {
        let physics = &self.config.physics;
        let multiplier = match self.motion.mapper.size_ratio() {
            Some(ratio) if physics.handoff_velocity_scaling => {
                interval(1.0, 1.0 / ratio, physics.handoff_velocity_multiplier_max)
            }
            _ => 1.0,
        };
        interval(
            -physics.max_bounce_velocity,
            velocity * multiplier,
            physics.max_bounce_velocity,
        )
    }

    fn start_bounce(&mut self, velocity: f64, spring: SpringConfig, now: Instant) {
        let axis = self.motion.axis;
        let velocity = self.content_velocity(velocity);
        let bounds = self.content_bounds();
        let edge = RestEdge::nearest(bounds, self.motion.content_offset);
        let displacement = self.motion.content_offset - edge.value(bounds);

        let timing = match SpringTiming::new(
            spring,
            axis.point(displacement),
            axis.point(velocity),
            self.motion.threshold,
        ) {
            Ok(timing) => timing,
            Err(err) => {
                tracing::warn!(%err, "cannot bounce");
                self.settle_without_motion();
                return;
            }
        };

        let duration = timing.duration();
        if duration <= 0.0 {
            // Already at rest: put the content exactly on the edge
            let rest = edge.value(bounds);
            if self.motion.content_offset != rest {
                self.motion.write_content_offset(rest);
            }
            self.settle_without_motion();
            return;
        }

        tracing::debug!(
            displacement,
            velocity,
            duration,
            stiffness = spring.stiffness,
            "bounce started"
        );

        let animator = FrameAnimator::new(
            duration,
            move |state: &mut MotionState, frame| {
                let rest = edge.value(state.content_bounds());
                let offset = rest + state.axis.component(timing.value_at(frame.elapsed));
                state.write_content_offset(offset);
            },
            |state: &mut MotionState, completed| {
                state.events.push(ScrollBarEvent::MotionFinished {
                    kind: MotionKind::Bounce,
                    completed,
                });
            },
        );

        self.phase.transition(event_types::HIT_EDGE);
        self.motion.events.push(ScrollBarEvent::MotionStarted {
            kind: MotionKind::Bounce,
        });
        self.animation.replace(animator, now, &mut self.motion);
    }

    fn settle_without_motion(&mut self) {
        match self.phase {
            ScrollBarPhase::Dragging => self.phase.transition(event_types::DRAG_END),
            _ => self.phase.transition(event_types::SETTLED),
        };
    }

    // =========================================================================
    // Visibility
    // =========================================================================

    fn show(&mut self) {
        if !self.visible {
            self.visible = true;
            self.motion.events.push(ScrollBarEvent::Shown);
        }
    }

    fn hide(&mut self) {
        if self.visible && !self.config.always_visible && !self.is_dragging() {
            self.visible = false;
            self.motion.events.push(ScrollBarEvent::Hidden);
        }
    }

    /// (Re)arm the auto-hide timer unless a drag holds the bar open
    fn arm_hide(&mut self, now: Instant) {
        if self.config.always_visible || self.is_dragging() {
            return;
        }
        self.hide_deadline = now.checked_add(duration_from_secs(self.config.hide_delay));
    }
}
