//! Status lifecycles with terminal states.

use crate::error::{DomainError, DomainResult};

/// A status enumeration whose terminal values admit no further transition.
pub trait Lifecycle: Copy + PartialEq + core::fmt::Display {
    /// Whether no transition out of this state is permitted.
    fn is_terminal(self) -> bool;

    /// Validate a move from `self` to `next`.
    ///
    /// Returns the new state on success. Leaving a terminal state, or
    /// "moving" to the current state, is rejected with
    /// [`DomainError::InvalidState`].
    fn transition(self, next: Self) -> DomainResult<Self> {
        if self.is_terminal() {
            return Err(DomainError::invalid_state(format!(
                "cannot move from {self} to {next}: {self} is final"
            )));
        }
        if next == self {
            return Err(DomainError::invalid_state(format!("already {self}")));
        }
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Door {
        Open,
        Shut,
        Welded,
    }

    impl core::fmt::Display for Door {
        fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            f.write_str(match self {
                Door::Open => "open",
                Door::Shut => "shut",
                Door::Welded => "welded",
            })
        }
    }

    impl Lifecycle for Door {
        fn is_terminal(self) -> bool {
            self == Door::Welded
        }
    }

    #[test]
    fn non_terminal_states_can_move() {
        assert_eq!(Door::Open.transition(Door::Shut), Ok(Door::Shut));
        assert_eq!(Door::Shut.transition(Door::Welded), Ok(Door::Welded));
    }

    #[test]
    fn terminal_state_rejects_every_move() {
        for next in [Door::Open, Door::Shut, Door::Welded] {
            assert!(matches!(
                Door::Welded.transition(next),
                Err(DomainError::InvalidState(_))
            ));
        }
    }

    #[test]
    fn same_state_is_rejected() {
        let err = Door::Open.transition(Door::Open).unwrap_err();
        assert_eq!(err, DomainError::invalid_state("already open"));
    }
}
