//! Event type ids
//!
//! Small integer ids for the inputs that move the scroll-bar and animator
//! state machines. Kept as plain constants so state enums can match on
//! `(state, event)` pairs.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    /// Pointer went down on the indicator and a drag began
    pub const DRAG_BEGIN: EventType = 1;
    /// Drag released with negligible velocity inside bounds
    pub const DRAG_END: EventType = 3;
    /// Drag released with significant velocity inside bounds
    pub const FLING: EventType = 4;
    /// Offset left (or was released outside) the legal bounds
    pub const HIT_EDGE: EventType = 5;
    /// Motion came to rest
    pub const SETTLED: EventType = 6;
    /// Motion was interrupted
    pub const CANCEL: EventType = 7;

    /// Animator started receiving clock pulses
    pub const START: EventType = 20;
    /// Animator reached its duration
    pub const FINISH: EventType = 21;
}
