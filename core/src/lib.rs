//! letterform-core
//!
//! Turns a stream of individually recognized letters (one handwriting or
//! gesture prediction at a time) into words from a user-supplied word bank.
//!
//! Public API:
//! - `PrefixDictionary` - Trie-backed word bank with exact and prefix lookup
//! - `LetterBuffer` / `LetterPrediction` - Bounded sliding window of letters
//! - `Formation` - Classification of the buffer against the dictionary
//! - `FormationSession` - Per-practice session state machine
//! - `SessionState` - Immutable snapshot for the UI to observe
//! - `Config` - Session options and TOML loading
//!
//! Everything here is synchronous and single-owner. A host that touches a
//! session from several threads must wrap it in its own lock.
use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

pub mod trie;
pub use trie::PrefixDictionary;

pub mod input_buffer;
pub use input_buffer::{LetterBuffer, LetterPrediction};

pub mod formation;
pub use formation::{classify, Formation, MAX_CONTINUATIONS, MAX_POSSIBLE_WORDS};

pub mod context;
pub use context::SessionState;

pub mod session;
pub use session::FormationSession;

/// Options controlling a formation session.
///
/// Every field has a default, so a TOML file only needs to name the options
/// it changes.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// When false, `add_letter` does nothing.
    pub word_formation_enabled: bool,

    /// Shortest word kept from a loaded word bank.
    pub min_word_length: usize,
    /// Longest word kept from a loaded word bank. Also the letter buffer
    /// capacity.
    pub max_word_length: usize,

    /// Accepted letters after which the session reports itself complete.
    pub letters_before_reset: usize,

    /// Predictions below this confidence are dropped. The default accepts
    /// everything the recognizer sends.
    pub min_confidence: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            word_formation_enabled: true,
            min_word_length: 2,
            max_word_length: 10,
            letters_before_reset: 3,
            min_confidence: 0.0,
        }
    }
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        let content = self.to_toml_string()?;
        std::fs::write(path, content)
            .with_context(|| format!("writing config {}", path.display()))?;
        Ok(())
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> anyhow::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject option combinations a session cannot honor.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.min_word_length >= 1, "min_word_length must be at least 1");
        ensure!(
            self.max_word_length >= self.min_word_length,
            "max_word_length ({}) is smaller than min_word_length ({})",
            self.max_word_length,
            self.min_word_length
        );
        ensure!(
            self.min_confidence.is_finite(),
            "min_confidence must be a finite number"
        );
        Ok(())
    }

    /// Whether a word of `len` characters falls inside the configured range.
    pub fn accepts_length(&self, len: usize) -> bool {
        (self.min_word_length..=self.max_word_length).contains(&len)
    }

    /// Clamp options into something usable: minimum length at least 1,
    /// maximum at least the minimum, and a non-finite confidence floor
    /// replaced by 0.0.
    pub(crate) fn clamp(&mut self) {
        self.min_word_length = self.min_word_length.max(1);
        self.max_word_length = self.max_word_length.max(self.min_word_length);
        if !self.min_confidence.is_finite() {
            self.min_confidence = 0.0;
        }
    }
}

/// Normalization helpers shared by the dictionary and the session.
pub mod utils {
    use unicode_normalization::UnicodeNormalization;

    /// NFC-normalize, trim and uppercase.
    pub fn normalize(s: &str) -> String {
        s.nfc().collect::<String>().trim().to_uppercase()
    }

    /// Normalize a lookup key. The empty string is a valid key; anything
    /// containing a non-alphabetic character is not.
    pub fn normalize_key(s: &str) -> Option<String> {
        let key = normalize(s);
        key.chars().all(char::is_alphabetic).then_some(key)
    }

    /// Normalize a dictionary word: like [`normalize_key`] but also
    /// rejecting the empty string.
    pub fn normalize_word(s: &str) -> Option<String> {
        normalize_key(s).filter(|w| !w.is_empty())
    }

    /// Normalize a recognizer label to a single uppercase letter.
    ///
    /// Only the first character of the trimmed label counts. Returns `None`
    /// for blank labels, labels that do not start with a letter, and letters
    /// whose uppercase form is more than one character (`ß` → `SS`).
    pub fn normalize_letter(s: &str) -> Option<char> {
        let ch = s.nfc().find(|c| !c.is_whitespace())?;
        if !ch.is_alphabetic() {
            return None;
        }
        let mut upper = ch.to_uppercase();
        let first = upper.next()?;
        upper.next().is_none().then_some(first)
    }
}
