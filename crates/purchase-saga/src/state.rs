use std::fmt;

/// Lifecycle of one saga run.
///
/// ```text
/// Pending ──► Running ──┬──► Committed
///                       └──► Compensating ──► RolledBack
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SagaState {
    #[default]
    Pending,
    Running,
    Compensating,
    /// Every step succeeded (terminal).
    Committed,
    /// A step failed and compensation has finished (terminal).
    RolledBack,
}

impl SagaState {
    /// Whether moving from `self` to `next` is a legal transition.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Running)
                | (Self::Running, Self::Committed | Self::Compensating)
                | (Self::Compensating, Self::RolledBack)
        )
    }

    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::RolledBack)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Running => "running",
            Self::Compensating => "compensating",
            Self::Committed => "committed",
            Self::RolledBack => "rolled-back",
        }
    }
}

impl fmt::Display for SagaState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [SagaState; 5] = [
        SagaState::Pending,
        SagaState::Running,
        SagaState::Compensating,
        SagaState::Committed,
        SagaState::RolledBack,
    ];

    #[test]
    fn default_state_is_pending() {
        assert_eq!(SagaState::default(), SagaState::Pending);
    }

    #[test]
    fn only_documented_transitions_are_legal() {
        let legal = [
            (SagaState::Pending, SagaState::Running),
            (SagaState::Running, SagaState::Committed),
            (SagaState::Running, SagaState::Compensating),
            (SagaState::Compensating, SagaState::RolledBack),
        ];

        for from in ALL {
            for to in ALL {
                assert_eq!(
                    from.can_transition_to(to),
                    legal.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn terminal_states() {
        assert!(!SagaState::Pending.is_terminal());
        assert!(!SagaState::Running.is_terminal());
        assert!(!SagaState::Compensating.is_terminal());
        assert!(SagaState::Committed.is_terminal());
        assert!(SagaState::RolledBack.is_terminal());
    }

    #[test]
    fn display() {
        assert_eq!(SagaState::Committed.to_string(), "committed");
        assert_eq!(SagaState::RolledBack.to_string(), "rolled-back");
    }
}
