/// Prefix trie holding the word bank.
use ahash::AHashMap;
use std::collections::HashSet;

use crate::utils::{normalize_key, normalize_word};

/// A single node of the prefix tree.
///
/// Each node is exclusively owned by its parent through `children`, so the
/// whole dictionary is a plain ownership tree with no shared links.
#[derive(Debug, Default, Clone)]
struct TrieNode {
    children: AHashMap<char, Box<TrieNode>>,
    /// When set, the path from the root to this node spells an inserted word.
    word: Option<String>,
}

impl TrieNode {
    fn new() -> Self {
        Self {
            children: AHashMap::new(),
            word: None,
        }
    }

    /// Follow `key` from this node, returning the node it ends at.
    fn walk(&self, key: &str) -> Option<&TrieNode> {
        let mut node = self;
        for ch in key.chars() {
            node = node.children.get(&ch)?;
        }
        Some(node)
    }

    /// Push every word stored at or below this node into `out`.
    fn collect_words(&self, out: &mut Vec<String>) {
        if let Some(w) = &self.word {
            out.push(w.clone());
        }
        for child in self.children.values() {
            child.collect_words(out);
        }
    }

    /// Remove `chars` below this node. Returns true when this node became
    /// empty and can be dropped by its parent.
    fn remove_path(&mut self, chars: &[char], removed: &mut bool) -> bool {
        match chars.split_first() {
            None => {
                *removed = self.word.take().is_some();
            }
            Some((ch, rest)) => {
                if let Some(child) = self.children.get_mut(ch) {
                    if child.remove_path(rest, removed) {
                        self.children.remove(ch);
                    }
                }
            }
        }
        self.word.is_none() && self.children.is_empty()
    }
}

/// Set of uppercase words answering exact and prefix queries.
///
/// Lookups cost time proportional to the query length, independent of how
/// many words are stored. All inputs go through [`normalize_word`] first, so
/// `"cat"`, `" Cat "` and `"CAT"` are the same entry.
///
/// # Example
/// ```
/// use letterform_core::trie::PrefixDictionary;
///
/// let mut dict = PrefixDictionary::new();
/// dict.insert("cat");
/// dict.insert("cats");
///
/// assert!(dict.contains_exact("CAT"));
/// assert!(dict.is_prefix_of_some("CA"));
/// assert!(!dict.contains_exact("CA"));
/// assert_eq!(dict.words_with_prefix("ca"), vec!["CAT", "CATS"]);
/// ```
#[derive(Debug, Default, Clone)]
pub struct PrefixDictionary {
    root: TrieNode,
    len: usize,
}

impl PrefixDictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole contents with `words`.
    ///
    /// Blank entries and entries containing non-alphabetic characters are
    /// skipped. Calling this twice with the same list leaves the same
    /// dictionary behind.
    pub fn load<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.clear();
        for w in words {
            self.insert(w.as_ref());
        }
        tracing::debug!(words = self.len, "dictionary loaded");
    }

    /// Insert a single word.
    ///
    /// Returns true if the word was new. Inputs that normalize to nothing
    /// are ignored and return false.
    pub fn insert(&mut self, word: &str) -> bool {
        let Some(word) = normalize_word(word) else {
            tracing::trace!(input = word, "rejected dictionary entry");
            return false;
        };

        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node
                .children
                .entry(ch)
                .or_insert_with(|| Box::new(TrieNode::new()));
        }
        if node.word.is_some() {
            return false;
        }
        node.word = Some(word);
        self.len += 1;
        true
    }

    /// Remove a word, pruning nodes that no longer lead anywhere.
    /// Returns true if the word was present.
    pub fn remove(&mut self, word: &str) -> bool {
        let Some(word) = normalize_word(word) else {
            return false;
        };
        let chars: Vec<char> = word.chars().collect();
        let mut removed = false;
        self.root.remove_path(&chars, &mut removed);
        if removed {
            self.len -= 1;
        }
        removed
    }

    /// Drop every entry.
    pub fn clear(&mut self) {
        self.root = TrieNode::new();
        self.len = 0;
    }

    /// True iff `sequence` is exactly an inserted word.
    pub fn contains_exact(&self, sequence: &str) -> bool {
        match normalize_key(sequence) {
            Some(key) => self.root.walk(&key).is_some_and(|n| n.word.is_some()),
            None => false,
        }
    }

    /// True iff `sequence` starts at least one inserted word. An exact match
    /// counts as a prefix of itself, and the empty string is a prefix of
    /// every word.
    pub fn is_prefix_of_some(&self, sequence: &str) -> bool {
        match normalize_key(sequence) {
            Some(key) => self
                .root
                .walk(&key)
                .is_some_and(|n| n.word.is_some() || !n.children.is_empty()),
            None => false,
        }
    }

    /// All inserted words starting with `prefix`, shortest first and then
    /// alphabetically.
    pub fn words_with_prefix(&self, prefix: &str) -> Vec<String> {
        let Some(key) = normalize_key(prefix) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        if let Some(node) = self.root.walk(&key) {
            node.collect_words(&mut out);
        }
        sort_words(&mut out);
        out
    }

    /// Number of distinct words stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Every stored word.
    pub fn all_words(&self) -> HashSet<String> {
        let mut out = Vec::with_capacity(self.len);
        self.root.collect_words(&mut out);
        out.into_iter().collect()
    }
}

fn sort_words(words: &mut [String]) {
    words.sort_by(|a, b| {
        a.chars()
            .count()
            .cmp(&b.chars().count())
            .then_with(|| a.cmp(b))
    });
}

impl<S: AsRef<str>> FromIterator<S> for PrefixDictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut dict = PrefixDictionary::new();
        dict.extend(iter);
        dict
    }
}

impl<S: AsRef<str>> Extend<S> for PrefixDictionary {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for w in iter {
            self.insert(w.as_ref());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_insert_and_contains() {
        let mut dict = PrefixDictionary::new();
        dict.insert("cat");
        dict.insert("dog");
        dict.insert("cats");

        assert!(dict.contains_exact("CAT"));
        assert!(dict.contains_exact("DOG"));
        assert!(dict.contains_exact("CATS"));
        assert!(!dict.contains_exact("CA"));
        assert!(!dict.contains_exact("DO"));
        assert!(!dict.contains_exact("CATSS"));
    }

    #[test]
    fn test_case_and_whitespace_normalized() {
        let mut dict = PrefixDictionary::new();
        dict.insert("  Cat ");

        assert!(dict.contains_exact("CAT"));
        assert!(dict.contains_exact("cat"));
        assert!(dict.is_prefix_of_some(" c"));
        assert_eq!(dict.all_words(), HashSet::from(["CAT".to_string()]));
    }

    #[test]
    fn test_duplicates_are_idempotent() {
        let mut dict = PrefixDictionary::new();
        assert!(dict.insert("cat"));
        assert!(!dict.insert("CAT"));
        assert!(!dict.insert(" cat"));
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_blank_and_non_alphabetic_rejected() {
        let mut dict = PrefixDictionary::new();
        assert!(!dict.insert(""));
        assert!(!dict.insert("   "));
        assert!(!dict.insert("c4t"));
        assert!(!dict.insert("it's"));
        assert!(dict.is_empty());
        assert!(!dict.is_prefix_of_some("C"));
    }

    #[test]
    fn test_prefix_includes_exact_word() {
        let mut dict = PrefixDictionary::new();
        dict.insert("dog");

        assert!(dict.is_prefix_of_some("D"));
        assert!(dict.is_prefix_of_some("DO"));
        assert!(dict.is_prefix_of_some("DOG"));
        assert!(!dict.is_prefix_of_some("DOGS"));
        assert!(!dict.is_prefix_of_some("X"));
        assert!(dict.is_prefix_of_some(""));
        assert!(!dict.contains_exact(""));
    }

    #[test]
    fn test_words_with_prefix_ordering() {
        let dict: PrefixDictionary = ["cats", "car", "cat", "cart", "dog"].into_iter().collect();

        assert_eq!(
            dict.words_with_prefix("ca"),
            vec!["CAR", "CAT", "CART", "CATS"]
        );
        assert_eq!(dict.words_with_prefix("cat"), vec!["CAT", "CATS"]);
        assert!(dict.words_with_prefix("z").is_empty());
        assert_eq!(dict.words_with_prefix("").len(), 5);
        assert!(dict.words_with_prefix("c-").is_empty());
    }

    #[test]
    fn test_load_replaces_contents() {
        let mut dict = PrefixDictionary::new();
        dict.load(["cat", "dog"]);
        assert_eq!(dict.len(), 2);

        dict.load(["sun"]);
        assert_eq!(dict.len(), 1);
        assert!(!dict.contains_exact("CAT"));
        assert!(dict.contains_exact("SUN"));

        dict.load(["sun", "SUN", " sun "]);
        assert_eq!(dict.len(), 1);
    }

    #[test]
    fn test_remove_prunes_nodes() {
        let mut dict: PrefixDictionary = ["cat", "cats"].into_iter().collect();

        assert!(dict.remove("cats"));
        assert!(!dict.is_prefix_of_some("CATS"));
        assert!(dict.contains_exact("CAT"));

        assert!(dict.remove("cat"));
        assert!(!dict.is_prefix_of_some("C"));
        assert!(dict.is_empty());
        assert!(!dict.remove("cat"));
    }

    #[test]
    fn test_empty_dictionary_queries() {
        let dict = PrefixDictionary::new();
        assert!(!dict.is_prefix_of_some(""));
        assert!(!dict.contains_exact("A"));
        assert!(!dict.is_prefix_of_some("A"));
        assert!(dict.words_with_prefix("A").is_empty());
        assert!(dict.all_words().is_empty());
        assert_eq!(dict.len(), 0);
    }

    #[test]
    fn test_accented_letters() {
        let mut dict = PrefixDictionary::new();
        dict.insert("café");
        assert!(dict.contains_exact("CAFÉ"));
        assert!(dict.is_prefix_of_some("caf"));
    }
}
