//! Frame scheduler
//!
//! Holds every scroll bar attached to one piece of content (typically a
//! vertical and a horizontal bar) and fans display pulses, layout changes and
//! content offsets out to them.

use std::time::Instant;

use slotmap::{new_key_type, SlotMap};
use thumbtrack_core::Point;

use crate::bounds::ScrollLayout;
use crate::controller::{MotionController, ScrollBarEvent};

new_key_type! {
    pub struct ScrollBarId;
}

/// The scheduler that ticks all scroll bars
#[derive(Debug, Default)]
pub struct FrameScheduler {
    bars: SlotMap<ScrollBarId, MotionController>,
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            bars: SlotMap::with_key(),
        }
    }

    pub fn add(&mut self, bar: MotionController) -> ScrollBarId {
        self.bars.insert(bar)
    }

    pub fn get(&self, id: ScrollBarId) -> Option<&MotionController> {
        self.bars.get(id)
    }

    pub fn get_mut(&mut self, id: ScrollBarId) -> Option<&mut MotionController> {
        self.bars.get_mut(id)
    }

    /// Detach a bar, cancelling whatever it was animating
    pub fn remove(&mut self, id: ScrollBarId) -> Option<MotionController> {
        let mut bar = self.bars.remove(id)?;
        bar.cancel_animation();
        Some(bar)
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ScrollBarId, &MotionController)> {
        self.bars.iter()
    }

    /// Pulse every bar. Returns true if any is still animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut active = false;
        for (_, bar) in self.bars.iter_mut() {
            active |= bar.tick(now);
        }
        active
    }

    /// Check if any bar is still animating
    pub fn has_active_animations(&self) -> bool {
        self.bars.values().any(MotionController::is_animating)
    }

    /// Earliest pending hide deadline, for shells that sleep between pulses
    pub fn next_deadline(&self) -> Option<Instant> {
        self.bars.values().filter_map(MotionController::hide_deadline).min()
    }

    pub fn set_layout(&mut self, layout: ScrollLayout) {
        for bar in self.bars.values_mut() {
            bar.set_layout(layout);
        }
    }

    /// Forward a 2D content offset; each bar reads its own axis
    pub fn observe_content_offset(&mut self, offset: Point, now: Instant) {
        for bar in self.bars.values_mut() {
            let value = bar.axis().component(offset);
            bar.observe_content_offset(value, now);
        }
    }

    pub fn content_gesture_changed(&mut self) {
        for bar in self.bars.values_mut() {
            bar.content_gesture_changed();
        }
    }

    /// Drain every bar's queue, tagged with its id
    pub fn drain_events(&mut self) -> Vec<(ScrollBarId, ScrollBarEvent)> {
        let mut events = Vec::new();
        for (id, bar) in self.bars.iter_mut() {
            events.extend(bar.drain_events().into_iter().map(|event| (id, event)));
        }
        events
    }
}
