//! Frame-driven animator
//!
//! A `FrameAnimator` runs for a fixed duration and is pulsed by an external
//! clock (one `tick` per display refresh). Every pulse delivers the elapsed
//! time measured from the monotonic start instant, so irregular pulses never
//! distort the sampled trajectory.
//!
//! Callbacks receive a caller-supplied context `C` instead of capturing shared
//! state. An owner keeps its mutable motion state in `C` and lends it to the
//! animator on each pulse, which keeps ownership linear.

use std::time::Instant;

use thumbtrack_core::events::{event_types, EventType};
use thumbtrack_core::StateTransitions;

/// Lifecycle of a single animator
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AnimatorState {
    #[default]
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl StateTransitions for AnimatorState {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use event_types::*;
        match (self, event) {
            (AnimatorState::Idle, START) => Some(AnimatorState::Running),
            (AnimatorState::Running, FINISH) => Some(AnimatorState::Completed),
            (AnimatorState::Running, CANCEL) => Some(AnimatorState::Cancelled),
            _ => None,
        }
    }
}

/// What a tick callback sees
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationFrame {
    /// `elapsed / duration`, in `[0, 1]`
    pub progress: f64,
    /// Seconds since start, capped at the duration
    pub elapsed: f64,
}

type TickFn<C> = Box<dyn FnMut(&mut C, AnimationFrame)>;
type CompletionFn<C> = Box<dyn FnOnce(&mut C, bool)>;

/// A cancellable, time-sampled execution unit
pub struct FrameAnimator<C> {
    duration: f64,
    started_at: Option<Instant>,
    state: AnimatorState,
    on_tick: TickFn<C>,
    on_completion: Option<CompletionFn<C>>,
}

impl<C> FrameAnimator<C> {
    /// Create an idle animator. Negative or NaN durations are treated as 0.
    pub fn new(
        duration: f64,
        on_tick: impl FnMut(&mut C, AnimationFrame) + 'static,
        on_completion: impl FnOnce(&mut C, bool) + 'static,
    ) -> Self {
        Self {
            duration: if duration > 0.0 { duration } else { 0.0 },
            started_at: None,
            state: AnimatorState::Idle,
            on_tick: Box::new(on_tick),
            on_completion: Some(Box::new(on_completion)),
        }
    }

    /// Begin receiving pulses; elapsed time is measured from `now`
    pub fn start(&mut self, now: Instant) -> bool {
        if !self.state.transition(event_types::START) {
            return false;
        }
        self.started_at = Some(now);
        tracing::trace!(duration = self.duration, "animator started");
        true
    }

    /// Deliver one clock pulse. Returns true while the animator keeps running.
    ///
    /// The pulse at or past the duration delivers a final frame with
    /// `progress == 1` and then completes with `true`.
    pub fn tick(&mut self, now: Instant, ctx: &mut C) -> bool {
        let Some(started_at) = self.started_at else {
            return false;
        };
        if self.state != AnimatorState::Running {
            return false;
        }

        let elapsed = now.saturating_duration_since(started_at).as_secs_f64();
        if elapsed >= self.duration {
            (self.on_tick)(
                ctx,
                AnimationFrame {
                    progress: 1.0,
                    elapsed: self.duration,
                },
            );
            self.finish(event_types::FINISH, ctx);
            return false;
        }

        (self.on_tick)(
            ctx,
            AnimationFrame {
                progress: elapsed / self.duration,
                elapsed,
            },
        );
        true
    }

    /// Stop a running animator and report `false` to its completion.
    ///
    /// No-op (returns false) when idle, completed or already cancelled.
    pub fn cancel(&mut self, ctx: &mut C) -> bool {
        if self.state != AnimatorState::Running {
            return false;
        }
        tracing::trace!("animator cancelled");
        self.finish(event_types::CANCEL, ctx);
        true
    }

    fn finish(&mut self, event: EventType, ctx: &mut C) {
        if self.state.transition(event) {
            if let Some(completion) = self.on_completion.take() {
                completion(ctx, event == event_types::FINISH);
            }
        }
    }

    pub fn state(&self) -> AnimatorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == AnimatorState::Running
    }

    /// Total duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

impl<C> std::fmt::Debug for FrameAnimator<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameAnimator")
            .field("duration", &self.duration)
            .field("started_at", &self.started_at)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

/// Holder of zero or one live animator.
///
/// Installing a new animator always cancels the previous one first.
pub struct AnimationSlot<C> {
    current: Option<FrameAnimator<C>>,
}

impl<C> AnimationSlot<C> {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Cancel whatever is running, then start `animator` at `now`
    pub fn replace(&mut self, mut animator: FrameAnimator<C>, now: Instant, ctx: &mut C) {
        self.cancel(ctx);
        animator.start(now);
        self.current = Some(animator);
    }

    /// Cancel the live animator, if any. Returns true if one was running.
    pub fn cancel(&mut self, ctx: &mut C) -> bool {
        match self.current.take() {
            Some(mut animator) => animator.cancel(ctx),
            None => false,
        }
    }

    /// Pulse the live animator and drop it once it stops.
    /// Returns true while an animator is still running.
    pub fn tick(&mut self, now: Instant, ctx: &mut C) -> bool {
        let running = match self.current.as_mut() {
            Some(animator) => animator.tick(now, ctx),
            None => return false,
        };
        if !running {
            self.current = None;
        }
        running
    }

    pub fn is_active(&self) -> bool {
        self.current.as_ref().is_some_and(FrameAnimator::is_running)
    }
}

impl<C> Default for AnimationSlot<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> std::fmt::Debug for AnimationSlot<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnimationSlot")
            .field("current", &self.current)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[derive(Default)]
    struct Log {
        frames: Vec<AnimationFrame>,
        completions: Vec<bool>,
    }

    fn recorder(duration: f64) -> FrameAnimator<Log> {
        FrameAnimator::new(
            duration,
            |log: &mut Log, frame| log.frames.push(frame),
            |log: &mut Log, finished| log.completions.push(finished),
        )
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn test_runs_to_completion() {
        let origin = Instant::now();
        let mut log = Log::default();
        let mut animator = recorder(0.1);
        assert!(animator.start(origin));

        assert!(animator.tick(origin + ms(50), &mut log));
        assert!(!animator.tick(origin + ms(120), &mut log));

        assert_eq!(animator.state(), AnimatorState::Completed);
        assert_eq!(log.completions, vec![true]);
        let last = log.frames.last().unwrap();
        assert_eq!(last.progress, 1.0);
        assert_eq!(last.elapsed, 0.1);
    }

    #[test]
    fn test_cancel_stops_ticks_and_completes_once() {
        let origin = Instant::now();
        let mut log = Log::default();
        let mut animator = recorder(1.0);
        animator.start(origin);
        animator.tick(origin + ms(16), &mut log);

        assert!(animator.cancel(&mut log));
        assert!(!animator.cancel(&mut log));
        assert!(!animator.tick(origin + ms(32), &mut log));
        assert!(!animator.tick(origin + ms(2000), &mut log));

        assert_eq!(log.frames.len(), 1);
        assert_eq!(log.completions, vec![false]);
        assert_eq!(animator.state(), AnimatorState::Cancelled);
    }

    #[test]
    fn test_cancel_idle_or_completed_is_noop() {
        let origin = Instant::now();
        let mut log = Log::default();
        let mut animator = recorder(0.05);
        assert!(!animator.cancel(&mut log));

        animator.start(origin);
        animator.tick(origin + ms(60), &mut log);
        assert!(!animator.cancel(&mut log));
        assert_eq!(log.completions, vec![true]);
    }

    #[test]
    fn test_ticks_before_start_are_ignored() {
        let mut log = Log::default();
        let mut animator = recorder(1.0);
        assert!(!animator.tick(Instant::now(), &mut log));
        assert!(log.frames.is_empty());
        assert_eq!(animator.state(), AnimatorState::Idle);
    }

    #[test]
    fn test_progress_follows_elapsed_time_under_jitter() {
        let origin = Instant::now();
        let mut log = Log::default();
        let mut animator = recorder(1.0);
        animator.start(origin);
        for offset in [7, 40, 41, 250, 610] {
            animator.tick(origin + ms(offset), &mut log);
        }
        let progress: Vec<f64> = log.frames.iter().map(|frame| frame.progress).collect();
        let expected = [0.007, 0.04, 0.041, 0.25, 0.61];
        for (got, want) in progress.iter().zip(expected) {
            assert!((got - want).abs() < 1e-9);
        }
    }

    #[test]
    fn test_zero_duration_completes_on_first_pulse() {
        let origin = Instant::now();
        let mut log = Log::default();
        let mut animator = recorder(0.0);
        animator.start(origin);
        assert!(!animator.tick(origin, &mut log));
        assert_eq!(log.completions, vec![true]);
    }

    #[test]
    fn test_slot_replace_cancels_previous() {
        let origin = Instant::now();
        let mut log = Log::default();
        let mut slot = AnimationSlot::new();

        slot.replace(recorder(1.0), origin, &mut log);
        assert!(slot.is_active());
        slot.replace(recorder(0.2), origin + ms(100), &mut log);
        assert_eq!(log.completions, vec![false]);

        assert!(slot.tick(origin + ms(200), &mut log));
        assert!(!slot.tick(origin + ms(300), &mut log));
        assert!(!slot.is_active());
        assert_eq!(log.completions, vec![false, true]);
    }

    #[test]
    fn test_slot_cancel_reports_once() {
        let origin = Instant::now();
        let mut log = Log::default();
        let mut slot = AnimationSlot::new();
        assert!(!slot.cancel(&mut log));

        slot.replace(recorder(0.5), origin, &mut log);
        assert!(slot.cancel(&mut log));
        assert!(!slot.cancel(&mut log));
        assert_eq!(log.completions, vec![false]);
    }
}
