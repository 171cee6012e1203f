//! Headless runner: drives one scroll bar through a scenario on a synthetic
//! frame clock and records what it emits.

use std::time::{Duration, Instant};

use anyhow::Result;
use serde::Serialize;
use thumbtrack_animation::FrameClock;
use thumbtrack_bar::{MotionController, ScrollBarConfig, ScrollBarEvent, ScrollBarPhase, ScrollLayout};
use thumbtrack_core::Size;

use crate::scenario::{Scenario, ScenarioStep};

/// Upper bound on pulses for an open-ended run
const MAX_FRAMES: u64 = 60 * 120;

/// Content [0, 1000] in a 300 point viewport
pub fn default_layout() -> ScrollLayout {
    ScrollLayout::new(Size::new(300.0, 1300.0), Size::new(300.0, 300.0))
}

/// One emitted event and when it happened
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TraceEntry {
    pub time_ms: f64,
    #[serde(flatten)]
    pub event: ScrollBarEvent,
}

/// Bar state sampled after a pulse
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub time_ms: f64,
    pub content_offset: f64,
    pub indicator_offset: f64,
    pub phase: ScrollBarPhase,
}

/// Result of running a scenario
#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub events: Vec<TraceEntry>,
    pub final_content_offset: f64,
    pub final_indicator_offset: f64,
    pub final_phase: ScrollBarPhase,
    pub frames: u64,
}

struct Runner {
    bar: MotionController,
    clock: FrameClock,
    layout: ScrollLayout,
    events: Vec<TraceEntry>,
}

impl Runner {
    fn time_ms(&self) -> f64 {
        self.clock.elapsed() * 1000.0
    }

    fn record(&mut self) {
        let time_ms = self.time_ms();
        self.events
            .extend(self.bar.drain_events().into_iter().map(|event| TraceEntry { time_ms, event }));
    }

    fn pulse(&mut self) -> bool {
        let now = self.clock.advance();
        let running = self.bar.tick(now);
        self.record();
        running
    }

    fn apply(&mut self, step: &ScenarioStep) {
        let now = self.clock.now();
        match step {
            ScenarioStep::Layout(layout) => {
                self.layout = *layout;
                self.bar.set_layout(self.layout);
            }
            ScenarioStep::Drag { translation } => {
                if !self.bar.is_dragging() {
                    self.bar.begin_drag();
                }
                self.bar.drag_to(*translation);
            }
            ScenarioStep::Release { velocity } => self.bar.end_drag(*velocity, now),
            ScenarioStep::Observe { offset } => self.bar.observe_content_offset(*offset, now),
            ScenarioStep::Insets { content, safe_area } => {
                if let Some(insets) = content {
                    self.layout.content_insets = *insets;
                }
                if let Some(insets) = safe_area {
                    self.layout.safe_area_insets = *insets;
                }
                self.bar.set_layout(self.layout);
            }
            ScenarioStep::ContentGesture => self.bar.content_gesture_changed(),
            ScenarioStep::Wait { ms } => {
                let until = now + Duration::from_millis(*ms);
                while self.clock.now() < until {
                    self.pulse();
                }
            }
        }
        self.record();
    }
}

/// Run `scenario` at `fps` pulses per second
pub fn run_scenario(config: ScrollBarConfig, scenario: &Scenario, fps: u32) -> Result<Trace> {
    let layout = scenario.layout.unwrap_or_else(default_layout);
    let bar = MotionController::new(config, layout)?;
    let mut runner = Runner {
        bar,
        clock: FrameClock::new(Instant::now(), fps),
        layout,
        events: Vec::new(),
    };

    for (index, step) in scenario.steps.iter().enumerate() {
        tracing::debug!(index, ?step, "applying step");
        runner.apply(step);
    }

    Ok(Trace {
        final_content_offset: runner.bar.content_offset(),
        final_indicator_offset: runner.bar.indicator_offset(),
        final_phase: runner.bar.phase(),
        frames: runner.clock.frame(),
        events: runner.events,
    })
}

/// Release the thumb at `offset` with `velocity` and sample every pulse until it rests
pub fn trajectory(config: ScrollBarConfig, offset: f64, velocity: f64, fps: u32) -> Result<Vec<Sample>> {
    let mut bar = MotionController::new(config, default_layout())?;
    let mut clock = FrameClock::new(Instant::now(), fps);

    bar.observe_content_offset(offset, clock.now());
    bar.begin_drag();
    bar.end_drag(velocity, clock.now());

    let sample = |bar: &MotionController, clock: &FrameClock| Sample {
        time_ms: clock.elapsed() * 1000.0,
        content_offset: bar.content_offset(),
        indicator_offset: bar.indicator_offset(),
        phase: bar.phase(),
    };

    let mut samples = vec![sample(&bar, &clock)];
    while bar.is_animating() {
        if clock.frame() >= MAX_FRAMES {
            tracing::warn!(frames = MAX_FRAMES, "motion still running, stopping trajectory");
            break;
        }
        bar.tick(clock.advance());
        samples.push(sample(&bar, &clock));
    }
    Ok(samples)
}
