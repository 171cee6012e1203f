//! Enum state machines
//!
//! A state type lists its legal `(state, event)` transitions in `on_event`;
//! anything not listed is ignored. Owners apply the result with
//! [`StateTransitions::transition`].

use std::fmt::Debug;
use std::hash::Hash;

use crate::events::EventType;

/// Trait for state enums driven by event ids
pub trait StateTransitions: Clone + Copy + PartialEq + Eq + Hash + Debug + 'static {
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;

    /// Apply `event` in place. Returns true if the state changed.
    fn transition(&mut self, event: EventType) -> bool {
        match self.on_event(event) {
            Some(next) => {
                tracing::trace!(from = ?*self, to = ?next, event, "state transition");
                *self = next;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::event_types::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    enum Door {
        #[default]
        Closed,
        Open,
    }

    impl StateTransitions for Door {
        fn on_event(&self, event: EventType) -> Option<Self> {
            match (self, event) {
                (Door::Closed, START) => Some(Door::Open),
                (Door::Open, FINISH) => Some(Door::Closed),
                _ => None,
            }
        }
    }

    #[test]
    fn test_transition_applies_listed_events() {
        let mut door = Door::default();
        assert!(door.transition(START));
        assert_eq!(door, Door::Open);
        assert!(door.transition(FINISH));
        assert_eq!(door, Door::Closed);
    }

    #[test]
    fn test_unlisted_event_is_ignored() {
        let mut door = Door::Closed;
        assert!(!door.transition(FINISH));
        assert_eq!(door, Door::Closed);
    }
}
