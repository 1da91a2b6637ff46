//! Classification of the letter buffer against the dictionary.

use serde::{Deserialize, Serialize};

use crate::trie::PrefixDictionary;

/// Longer words listed for a complete word that can still grow.
pub const MAX_CONTINUATIONS: usize = 3;
/// Candidate words listed for a valid prefix.
pub const MAX_POSSIBLE_WORDS: usize = 5;

/// Where the buffered letter sequence stands relative to the word bank.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Formation {
    /// No letters buffered.
    #[default]
    Empty,
    /// The sequence is a word. `can_continue` is set when some longer word
    /// starts with it; `continuations` lists a few of those.
    CompleteWord {
        word: String,
        can_continue: bool,
        continuations: Vec<String>,
    },
    /// Not a word yet, but some word starts with it.
    ValidPrefix {
        prefix: String,
        possible_words: Vec<String>,
    },
    /// No word starts with the sequence. `last_valid_prefix` is the longest
    /// leading part of it that still matches something.
    InvalidSequence {
        sequence: String,
        last_valid_prefix: Option<String>,
    },
}

impl Formation {
    pub fn is_complete_word(&self) -> bool {
        matches!(self, Formation::CompleteWord { .. })
    }

    /// The completed word, if any.
    pub fn word(&self) -> Option<&str> {
        match self {
            Formation::CompleteWord { word, .. } => Some(word),
            _ => None,
        }
    }

    /// Words worth offering the user: continuations of a complete word or
    /// candidates for a prefix. Empty otherwise.
    pub fn suggestions(&self) -> &[String] {
        match self {
            Formation::CompleteWord { continuations, .. } => continuations,
            Formation::ValidPrefix { possible_words, .. } => possible_words,
            Formation::Empty | Formation::InvalidSequence { .. } => &[],
        }
    }
}

/// Classify `sequence` against `dict`.
///
/// # Example
/// ```
/// use letterform_core::{classify, Formation, PrefixDictionary};
///
/// let dict: PrefixDictionary = ["cat", "cats"].into_iter().collect();
/// match classify(&dict, "CAT") {
///     Formation::CompleteWord { can_continue, continuations, .. } => {
///         assert!(can_continue);
///         assert_eq!(continuations, vec!["CATS"]);
///     }
///     other => panic!("unexpected {:?}", other),
/// }
/// ```
pub fn classify(dict: &PrefixDictionary, sequence: &str) -> Formation {
    if sequence.is_empty() {
        return Formation::Empty;
    }

    if dict.contains_exact(sequence) {
        let longer: Vec<String> = dict
            .words_with_prefix(sequence)
            .into_iter()
            .filter(|w| w != sequence)
            .collect();
        return Formation::CompleteWord {
            word: sequence.to_string(),
            can_continue: !longer.is_empty(),
            continuations: longer.into_iter().take(MAX_CONTINUATIONS).collect(),
        };
    }

    if dict.is_prefix_of_some(sequence) {
        let mut possible_words = dict.words_with_prefix(sequence);
        possible_words.truncate(MAX_POSSIBLE_WORDS);
        return Formation::ValidPrefix {
            prefix: sequence.to_string(),
            possible_words,
        };
    }

    Formation::InvalidSequence {
        sequence: sequence.to_string(),
        last_valid_prefix: last_valid_prefix(dict, sequence),
    }
}

/// Drop letters from the end of `sequence` one at a time until what remains
/// is a prefix of some word.
fn last_valid_prefix(dict: &PrefixDictionary, sequence: &str) -> Option<String> {
    let mut ends: Vec<usize> = sequence.char_indices().map(|(i, _)| i).skip(1).collect();
    ends.reverse();
    ends.into_iter()
        .map(|end| &sequence[..end])
        .find(|candidate| dict.is_prefix_of_some(candidate))
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict(words: &[&str]) -> PrefixDictionary {
        words.iter().collect()
    }

    #[test]
    fn test_empty_sequence() {
        assert_eq!(classify(&dict(&["cat"]), ""), Formation::Empty);
    }

    #[test]
    fn test_complete_word_without_continuation() {
        let f = classify(&dict(&["cat", "dog"]), "CAT");
        assert_eq!(
            f,
            Formation::CompleteWord {
                word: "CAT".into(),
                can_continue: false,
                continuations: vec![],
            }
        );
        assert!(f.suggestions().is_empty());
    }

    #[test]
    fn test_continuations_capped() {
        let d = dict(&["an", "and", "ant", "any", "anew", "anvil"]);
        let f = classify(&d, "AN");
        match &f {
            Formation::CompleteWord {
                can_continue,
                continuations,
                ..
            } => {
                assert!(can_continue);
                assert_eq!(continuations, &vec!["AND", "ANT", "ANY"]);
            }
            other => panic!("expected complete word, got {:?}", other),
        }
        assert_eq!(f.suggestions().len(), MAX_CONTINUATIONS);
    }

    #[test]
    fn test_valid_prefix_capped() {
        let d = dict(&["bad", "bag", "ban", "bar", "bat", "bay"]);
        let f = classify(&d, "BA");
        match f {
            Formation::ValidPrefix {
                prefix,
                possible_words,
            } => {
                assert_eq!(prefix, "BA");
                assert_eq!(possible_words, vec!["BAD", "BAG", "BAN", "BAR", "BAT"]);
            }
            other => panic!("expected prefix, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_sequence_finds_last_valid_prefix() {
        let d = dict(&["cat", "cow"]);
        assert_eq!(
            classify(&d, "CAX"),
            Formation::InvalidSequence {
                sequence: "CAX".into(),
                last_valid_prefix: Some("CA".into()),
            }
        );
        assert_eq!(
            classify(&d, "CATZQ"),
            Formation::InvalidSequence {
                sequence: "CATZQ".into(),
                last_valid_prefix: Some("CAT".into()),
            }
        );
    }

    #[test]
    fn test_invalid_sequence_without_valid_prefix() {
        let d = dict(&["cat"]);
        assert_eq!(
            classify(&d, "XY"),
            Formation::InvalidSequence {
                sequence: "XY".into(),
                last_valid_prefix: None,
            }
        );
        assert_eq!(
            classify(&d, "Q"),
            Formation::InvalidSequence {
                sequence: "Q".into(),
                last_valid_prefix: None,
            }
        );
    }

    #[test]
    fn test_serde_tagging() {
        let f = Formation::ValidPrefix {
            prefix: "DO".into(),
            possible_words: vec!["DOG".into()],
        };
        let json = serde_json::to_string(&f).expect("serialize");
        assert_eq!(
            json,
            r#"{"kind":"valid_prefix","prefix":"DO","possible_words":["DOG"]}"#
        );
    }
}
