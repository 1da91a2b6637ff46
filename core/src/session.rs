//! Word formation session.
//!
//! A `FormationSession` owns the word bank, the letter buffer and the
//! per-session counters for one practice activity. Letters come in one at a
//! time from the recognizer; after each command the buffer is re-classified
//! and a fresh `SessionState` snapshot is published for the UI.
//!
//! Construct one session per practice activity and drop it when the
//! activity ends. Nothing here is shared between sessions.

use std::time::Instant;

use crate::context::SessionState;
use crate::formation::{classify, Formation};
use crate::input_buffer::{LetterBuffer, LetterPrediction};
use crate::trie::PrefixDictionary;
use crate::utils::{normalize_letter, normalize_word};
use crate::Config;

/// Per-activity word formation state machine.
///
/// # Example
/// ```
/// use letterform_core::FormationSession;
///
/// let mut session = FormationSession::new();
/// session.load_word_bank(["cat", "dog"]);
///
/// for letter in ["c", "a", "t"] {
///     session.add_letter(letter, 0.95);
/// }
///
/// let state = session.state();
/// assert!(state.word_just_formed);
/// assert_eq!(state.last_formed_word.as_deref(), Some("CAT"));
/// assert!(state.sequence.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct FormationSession {
    config: Config,
    dictionary: PrefixDictionary,
    buffer: LetterBuffer,

    /// Classification of the current buffer
    formation: Formation,

    formed_words: Vec<String>,
    last_formed_word: Option<String>,
    word_just_formed: bool,
    total_letters: usize,

    /// Origin for letter timestamps
    started: Instant,

    /// Last published snapshot
    state: SessionState,
}

impl FormationSession {
    /// Create a session with default options and an empty word bank.
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Create a session with the given options. Out-of-range word lengths
    /// and a non-finite confidence floor are clamped.
    pub fn with_config(mut config: Config) -> Self {
        config.clamp();
        let mut session = Self {
            buffer: LetterBuffer::with_capacity(config.max_word_length),
            config,
            dictionary: PrefixDictionary::new(),
            formation: Formation::Empty,
            formed_words: Vec::new(),
            last_formed_word: None,
            word_just_formed: false,
            total_letters: 0,
            started: Instant::now(),
            state: SessionState::default(),
        };
        session.state = session.build_state(0);
        session
    }

    // ========== Configuration ==========

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Replace all options at once.
    ///
    /// The loaded word bank is not re-filtered; call `load_word_bank` again
    /// to apply a new length range to it.
    pub fn set_config(&mut self, mut config: Config) {
        config.clamp();
        self.config = config;
        let evicted = self.buffer.set_capacity(self.config.max_word_length);
        if evicted > 0 {
            tracing::debug!(evicted, "buffer shrunk to new maximum word length");
        }
        self.publish();
    }

    pub fn set_word_formation_enabled(&mut self, enabled: bool) {
        let mut config = self.config.clone();
        config.word_formation_enabled = enabled;
        self.set_config(config);
    }

    pub fn set_word_length_range(&mut self, min: usize, max: usize) {
        let mut config = self.config.clone();
        config.min_word_length = min;
        config.max_word_length = max;
        self.set_config(config);
    }

    pub fn set_letters_before_reset(&mut self, letters: usize) {
        let mut config = self.config.clone();
        config.letters_before_reset = letters;
        self.set_config(config);
    }

    pub fn set_min_confidence(&mut self, min_confidence: f32) {
        let mut config = self.config.clone();
        config.min_confidence = min_confidence;
        self.set_config(config);
    }

    // ========== Word bank ==========

    /// Replace the word bank with the words of `words` whose length lies in
    /// the configured range.
    ///
    /// The buffer and counters are left alone, so a bank can be swapped in
    /// mid-session; the buffer is simply re-classified against it. Returns
    /// the number of distinct words loaded.
    pub fn load_word_bank<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let config = &self.config;
        let accepted = words
            .into_iter()
            .filter_map(|w| normalize_word(w.as_ref()))
            .filter(|w| config.accepts_length(w.chars().count()));
        self.dictionary.load(accepted);
        tracing::debug!(words = self.dictionary.len(), "word bank loaded");
        self.publish();
        self.dictionary.len()
    }

    pub fn dictionary(&self) -> &PrefixDictionary {
        &self.dictionary
    }

    // ========== Commands ==========

    /// Feed one recognized letter into the session.
    ///
    /// Ignored when word formation is disabled, when `letter` does not
    /// start with an alphabetic character, or when `confidence` is NaN or
    /// below the configured floor. Returns whether the letter was accepted.
    ///
    /// An accepted letter that completes a word is confirmed automatically
    /// when no longer word can follow or when the buffer is full.
    pub fn add_letter(&mut self, letter: &str, confidence: f32) -> bool {
        if !self.config.word_formation_enabled {
            tracing::debug!(letter, "word formation disabled, letter ignored");
            return false;
        }
        let Some(ch) = normalize_letter(letter) else {
            tracing::debug!(letter, "not a letter, ignored");
            return false;
        };
        if confidence.is_nan() || confidence < self.config.min_confidence {
            tracing::debug!(letter = %ch, confidence, "confidence below floor, ignored");
            return false;
        }

        let prediction = LetterPrediction::new(ch, confidence, self.started.elapsed());
        self.buffer.push(prediction);
        self.total_letters += 1;
        tracing::debug!(
            letter = %ch,
            confidence,
            total = self.total_letters,
            "letter accepted"
        );

        self.formation = classify(&self.dictionary, &self.buffer.text());
        if let Formation::CompleteWord {
            word, can_continue, ..
        } = &self.formation
        {
            if !*can_continue || self.buffer.is_full() {
                let word = word.clone();
                self.record_formed_word(word);
            }
        }
        self.publish();
        true
    }

    /// Confirm the buffered word by hand.
    ///
    /// Returns the word if the buffer spells one, otherwise `None` and
    /// nothing changes.
    pub fn confirm_word(&mut self) -> Option<String> {
        let word = self.formation.word()?.to_string();
        self.record_formed_word(word.clone());
        self.publish();
        Some(word)
    }

    /// Undo the most recent letter. The session letter count and formed
    /// words are unaffected.
    pub fn remove_last(&mut self) -> Option<LetterPrediction> {
        let removed = self.buffer.pop()?;
        self.publish();
        Some(removed)
    }

    /// Empty the buffer, keeping formed words and counters.
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
        self.publish();
    }

    /// Return to the initial state: empty buffer, no formed words, zero
    /// letter count. The word bank and options are kept.
    pub fn reset_session(&mut self) {
        self.buffer.clear();
        self.formed_words.clear();
        self.last_formed_word = None;
        self.word_just_formed = false;
        self.total_letters = 0;
        tracing::info!("session reset");
        self.publish();
    }

    /// Mark the last formed word as handled by the consumer.
    pub fn acknowledge_formed_word(&mut self) {
        if self.word_just_formed {
            self.word_just_formed = false;
            self.publish();
        }
    }

    // ========== Queries ==========

    /// The buffered letters as a string.
    pub fn current_sequence(&self) -> &str {
        &self.state.sequence
    }

    pub fn formation(&self) -> &Formation {
        &self.formation
    }

    pub fn is_current_word_complete(&self) -> bool {
        self.formation.is_complete_word()
    }

    /// Whether the session has taken `letters_before_reset` letters. This is
    /// informational; further letters are still accepted.
    pub fn is_session_complete(&self) -> bool {
        self.total_letters >= self.config.letters_before_reset
    }

    pub fn suggestions(&self) -> &[String] {
        self.formation.suggestions()
    }

    pub fn formed_words(&self) -> &[String] {
        &self.formed_words
    }

    pub fn last_formed_word(&self) -> Option<&str> {
        self.last_formed_word.as_deref()
    }

    pub fn was_word_just_formed(&self) -> bool {
        self.word_just_formed
    }

    pub fn total_letters_in_session(&self) -> usize {
        self.total_letters
    }

    /// The latest snapshot.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    // ========== Internals ==========

    fn record_formed_word(&mut self, word: String) {
        tracing::info!(word = %word, formed = self.formed_words.len() + 1, "word formed");
        self.formed_words.push(word.clone());
        self.last_formed_word = Some(word);
        self.word_just_formed = true;
        self.buffer.clear();
    }

    /// Re-classify the buffer and publish a new snapshot.
    fn publish(&mut self) {
        self.formation = classify(&self.dictionary, &self.buffer.text());
        self.state = self.build_state(self.state.revision + 1);
    }

    fn build_state(&self, revision: u64) -> SessionState {
        SessionState {
            revision,
            buffer: self.buffer.to_vec(),
            sequence: self.buffer.text(),
            formation: self.formation.clone(),
            suggestions: self.formation.suggestions().to_vec(),
            formed_words: self.formed_words.clone(),
            last_formed_word: self.last_formed_word.clone(),
            word_just_formed: self.word_just_formed,
            total_letters_in_session: self.total_letters,
            letters_before_reset: self.config.letters_before_reset,
            session_complete: self.is_session_complete(),
        }
    }
}

impl Default for FormationSession {
    fn default() -> Self {
        Self::new()
    }
}
