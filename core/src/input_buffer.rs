//! Bounded letter buffer for the word currently being formed.
//!
//! The buffer keeps the most recent predictions in arrival order. When a new
//! letter would push it past its capacity the oldest letter is evicted, so
//! the recognizer is never refused input; history is dropped instead.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::time::Duration;

/// A single letter prediction as accepted into the buffer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetterPrediction {
    /// Uppercase letter.
    pub letter: char,
    /// Recognizer certainty, in whatever range the recognizer uses.
    pub confidence: f32,
    /// Monotonic offset from the start of the owning session.
    pub timestamp: Duration,
}

impl LetterPrediction {
    pub fn new(letter: char, confidence: f32, timestamp: Duration) -> Self {
        Self {
            letter,
            confidence,
            timestamp,
        }
    }
}

/// Sliding window of letter predictions.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterBuffer {
    letters: VecDeque<LetterPrediction>,
    capacity: usize,
}

impl LetterBuffer {
    /// Create an empty buffer holding at most `capacity` letters (at least 1).
    ///
    /// Storage grows with the letters actually pushed, so a huge capacity
    /// costs nothing up front.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            letters: VecDeque::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Change the capacity, evicting the oldest letters if the buffer no
    /// longer fits. Returns how many letters were evicted.
    pub fn set_capacity(&mut self, capacity: usize) -> usize {
        self.capacity = capacity.max(1);
        self.evict_overflow()
    }

    /// Append a prediction. Returns the evicted prediction, if the buffer
    /// was already full.
    pub fn push(&mut self, prediction: LetterPrediction) -> Option<LetterPrediction> {
        self.letters.push_back(prediction);
        if self.letters.len() > self.capacity {
            let evicted = self.letters.pop_front();
            if let Some(old) = &evicted {
                tracing::trace!(letter = %old.letter, "evicted oldest buffered letter");
            }
            evicted
        } else {
            None
        }
    }

    /// Remove the most recently added prediction (undo).
    pub fn pop(&mut self) -> Option<LetterPrediction> {
        self.letters.pop_back()
    }

    pub fn clear(&mut self) {
        self.letters.clear();
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }

    /// Whether the buffer has reached its capacity.
    pub fn is_full(&self) -> bool {
        self.letters.len() >= self.capacity
    }

    /// The buffered letters joined into a string, oldest first.
    pub fn text(&self) -> String {
        self.letters.iter().map(|p| p.letter).collect()
    }

    /// Copy of the buffered predictions, oldest first.
    pub fn to_vec(&self) -> Vec<LetterPrediction> {
        self.letters.iter().cloned().collect()
    }

    fn evict_overflow(&mut self) -> usize {
        let excess = self.letters.len().saturating_sub(self.capacity);
        self.letters.drain(..excess);
        excess
    }
}

impl Default for LetterBuffer {
    fn default() -> Self {
        Self::with_capacity(10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pred(letter: char, ms: u64) -> LetterPrediction {
        LetterPrediction::new(letter, 0.9, Duration::from_millis(ms))
    }

    #[test]
    fn test_push_and_text() {
        let mut buf = LetterBuffer::default();
        assert!(buf.is_empty());
        buf.push(pred('C', 0));
        buf.push(pred('A', 10));
        buf.push(pred('T', 20));
        assert_eq!(buf.text(), "CAT");
        assert_eq!(buf.len(), 3);
        assert!(!buf.is_full());
    }

    #[test]
    fn test_sliding_window_evicts_oldest() {
        let mut buf = LetterBuffer::with_capacity(3);
        assert!(buf.push(pred('A', 0)).is_none());
        buf.push(pred('B', 1));
        buf.push(pred('C', 2));
        assert!(buf.is_full());

        let evicted = buf.push(pred('D', 3)).expect("oldest evicted");
        assert_eq!(evicted.letter, 'A');
        assert_eq!(buf.text(), "BCD");
        assert_eq!(buf.len(), 3);
    }

    #[test]
    fn test_pop_removes_newest() {
        let mut buf = LetterBuffer::default();
        buf.push(pred('D', 0));
        buf.push(pred('O', 1));
        assert_eq!(buf.pop().map(|p| p.letter), Some('O'));
        assert_eq!(buf.text(), "D");
        buf.pop();
        assert!(buf.pop().is_none());
    }

    #[test]
    fn test_shrinking_capacity_evicts() {
        let mut buf = LetterBuffer::with_capacity(5);
        for (i, ch) in "ABCDE".chars().enumerate() {
            buf.push(pred(ch, i as u64));
        }
        assert_eq!(buf.set_capacity(2), 3);
        assert_eq!(buf.text(), "DE");
        assert_eq!(buf.set_capacity(4), 0);
        assert_eq!(buf.text(), "DE");
    }

    #[test]
    fn test_huge_capacity_does_not_preallocate() {
        let mut buf = LetterBuffer::with_capacity(usize::MAX);
        assert_eq!(buf.capacity(), usize::MAX);
        assert!(buf.push(pred('A', 0)).is_none());
        assert_eq!(buf.text(), "A");
        assert!(!buf.is_full());
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut buf = LetterBuffer::with_capacity(0);
        assert_eq!(buf.capacity(), 1);
        buf.push(pred('X', 0));
        buf.push(pred('Y', 1));
        assert_eq!(buf.text(), "Y");
    }
}
