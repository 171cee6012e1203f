//! Integration tests for the motion models driven by the frame animator
//!
//! These tests verify that:
//! - A spring run from an overscroll settles within its computed duration
//! - A deceleration cut at a boundary hands its velocity to a spring
//! - Pulse jitter does not change where an animation ends up

use thumbtrack_animation::{
    AnimationSlot, DecelerationRate, DecelerationTiming, FrameAnimator, FrameClock, SpringConfig,
    SpringTiming, TimingParameters,
};
use thumbtrack_core::{segment_rect_intersection, Point, Rect};

const THRESHOLD: f64 = 0.5;

#[derive(Default)]
struct Track {
    offsets: Vec<f64>,
    finished: Option<bool>,
}

fn run_to_end(slot: &mut AnimationSlot<Track>, clock: &mut FrameClock, track: &mut Track) {
    for _ in 0..10_000 {
        if !slot.tick(clock.advance(), track) {
            return;
        }
    }
    panic!("animation did not finish");
}

/// Snap back from -50 with no velocity ends within threshold of the edge
#[test]
fn test_spring_snap_back_settles_at_rest() {
    let timing = SpringTiming::new(
        SpringConfig::default(),
        Point::new(0.0, -50.0),
        Point::ZERO,
        THRESHOLD,
    )
    .unwrap();
    let duration = timing.duration();
    assert!(duration > 0.0);

    let mut clock = FrameClock::new(std::time::Instant::now(), 60);
    let mut track = Track::default();
    let mut slot = AnimationSlot::new();
    let animator = FrameAnimator::new(
        duration,
        move |track: &mut Track, frame| track.offsets.push(timing.value_at(frame.elapsed).y),
        |track: &mut Track, finished| track.finished = Some(finished),
    );
    slot.replace(animator, clock.now(), &mut track);
    run_to_end(&mut slot, &mut clock, &mut track);

    assert_eq!(track.finished, Some(true));
    let last = *track.offsets.last().unwrap();
    assert!(last.abs() <= THRESHOLD);
    // Critically damped: never crosses the rest position
    assert!(track.offsets.iter().all(|offset| *offset <= 0.0));
}

/// Flick from 500 toward a bound at 700 hands off to a spring at the bound
#[test]
fn test_flick_hands_off_at_boundary() {
    let bounds = Rect::from_min_max(Point::new(0.0, 0.0), Point::new(0.0, 700.0));
    let flick = DecelerationTiming::new(
        Point::new(0.0, 500.0),
        Point::new(0.0, 800.0),
        DecelerationRate::Normal,
        THRESHOLD,
    )
    .unwrap();
    let destination = flick.destination();
    assert!(destination.y > 700.0);

    let hit = segment_rect_intersection(bounds, flick.initial_value, destination).unwrap();
    assert_eq!(hit, Point::new(0.0, 700.0));
    let handoff_time = flick.duration_to(hit).unwrap();
    assert!(handoff_time < flick.duration());

    let velocity = flick.velocity_at(handoff_time);
    assert!(velocity.y > 0.0);

    let spring = SpringTiming::new(SpringConfig::default(), Point::ZERO, velocity, THRESHOLD).unwrap();
    let peak = (0..200)
        .map(|step| spring.value_at(step as f64 * 0.005).y)
        .fold(0.0_f64, f64::max);
    // Overshoots past the bound, then comes back to rest on it
    assert!(peak > 0.0);
    assert!(spring.value_at(spring.duration()).y.abs() <= THRESHOLD);
}

/// The final frame lands on the same position whatever the pulse cadence
#[test]
fn test_jitter_does_not_change_final_position() {
    let flick = DecelerationTiming::new(
        Point::new(0.0, 0.0),
        Point::new(0.0, 1500.0),
        DecelerationRate::Fast,
        THRESHOLD,
    )
    .unwrap();
    let duration = flick.duration();

    let final_offset = |clock: &mut FrameClock| {
        let mut track = Track::default();
        let mut slot = AnimationSlot::new();
        let animator = FrameAnimator::new(
            duration,
            move |track: &mut Track, frame| track.offsets.push(flick.value_at(frame.elapsed).y),
            |track: &mut Track, finished| track.finished = Some(finished),
        );
        slot.replace(animator, clock.now(), &mut track);
        run_to_end(&mut slot, clock, &mut track);
        *track.offsets.last().unwrap()
    };

    let origin = std::time::Instant::now();
    let steady = final_offset(&mut FrameClock::new(origin, 60));
    let jittery = final_offset(&mut FrameClock::new(origin, 60).with_jitter([1.0, 2.5, 0.3, 1.7]));
    assert!((steady - jittery).abs() < 1e-9);
}
