//! Session snapshot for the UI layer.
//!
//! `SessionState` is plain data with public fields. The session rebuilds it
//! after every command; a consumer reads it (or clones it away) instead of
//! calling the individual getters, so everything it sees belongs to the same
//! point in time.

use serde::{Deserialize, Serialize};

use crate::formation::Formation;
use crate::input_buffer::LetterPrediction;

/// Point-in-time view of a `FormationSession`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Bumped on every mutating command. Lets a poller skip unchanged states.
    pub revision: u64,

    /// Buffered predictions, oldest first
    pub buffer: Vec<LetterPrediction>,

    /// Buffered letters as one string
    pub sequence: String,

    /// Classification of `sequence`
    pub formation: Formation,

    /// Continuations or candidate words for the current formation
    pub suggestions: Vec<String>,

    /// Words confirmed since the last reset, in order. May repeat.
    pub formed_words: Vec<String>,

    pub last_formed_word: Option<String>,

    /// Set when a word was confirmed and the consumer has not acknowledged
    /// it yet.
    pub word_just_formed: bool,

    /// Letters accepted since the last reset. Survives word confirmation.
    pub total_letters_in_session: usize,

    pub letters_before_reset: usize,

    /// `total_letters_in_session >= letters_before_reset`
    pub session_complete: bool,
}

impl SessionState {
    /// True when the buffer currently spells a dictionary word.
    pub fn is_current_word_complete(&self) -> bool {
        self.formation.is_complete_word()
    }

    /// Check if there's any in-progress input.
    pub fn has_pending_letters(&self) -> bool {
        !self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_default_state_is_idle() {
        let state = SessionState::default();
        assert!(!state.has_pending_letters());
        assert!(!state.is_current_word_complete());
        assert_eq!(state.formation, Formation::Empty);
    }

    #[test]
    fn test_complete_word_state() {
        let state = SessionState {
            buffer: vec![
                LetterPrediction::new('A', 0.9, Duration::ZERO),
                LetterPrediction::new('T', 0.8, Duration::from_millis(40)),
            ],
            sequence: "AT".into(),
            formation: Formation::CompleteWord {
                word: "AT".into(),
                can_continue: true,
                continuations: vec!["ATE".into()],
            },
            ..Default::default()
        };
        assert!(state.has_pending_letters());
        assert!(state.is_current_word_complete());
    }
}
