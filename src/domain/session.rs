//! Session state for a single interactive view.
//!
//! A Session is owned exclusively by the `SessionController`; everything else
//! sees cloned snapshots.

use super::claim::Claim;

/// Mutable state of one page session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    /// Currently selected file name (empty when nothing is selected)
    pub input_label: String,

    /// Revealed claims, in reveal order
    pub results: Vec<Claim>,

    /// True between analysis start and the last reveal of the current run
    pub is_analyzing: bool,

    /// Identifier of the latest run (0 before the first analysis)
    pub run_id: u64,

    /// Terminal error of the latest run, if it failed
    pub last_error: Option<String>,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Derived controller state
    pub fn state(&self) -> SessionState {
        if self.is_analyzing {
            SessionState::Running
        } else {
            SessionState::Idle
        }
    }

    /// Whether a file name has been selected
    pub fn has_input(&self) -> bool {
        !self.input_label.is_empty()
    }
}

/// State of a session from the controller's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No reveal sequence in progress
    Idle,

    /// A reveal sequence is appending results
    Running,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = Session::new();

        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.results.is_empty());
        assert!(!session.has_input());
        assert_eq!(session.run_id, 0);
    }

    #[test]
    fn test_state_follows_analyzing_flag() {
        let session = Session {
            is_analyzing: true,
            ..Default::default()
        };
        assert_eq!(session.state(), SessionState::Running);
    }
}
