//! Reference number sequences.
//!
//! Settlements receive a unique reference when they are confirmed. The
//! numbering itself belongs to an external sequence service; this module
//! defines the contract the engine relies on, plus an in-memory
//! implementation for embedding and tests.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::error::{EngineError, EngineResult};

/// The sequence code used for End-of-Service settlement references.
pub const EOS_SEQUENCE_CODE: &str = "hr.end.of.service";

/// A source of unique reference strings.
///
/// Implementations must return a fresh string on every successful call for
/// a given code.
pub trait SequenceGenerator {
    /// Returns the next reference for the named sequence.
    fn next_by_code(&self, code: &str) -> EngineResult<String>;
}

/// An in-memory sequence producing `prefix` + zero-padded counter.
///
/// Each code keeps its own counter, starting at 1.
///
/// # Example
///
/// ```
/// use eos_engine::sequence::{PrefixedSequence, SequenceGenerator, EOS_SEQUENCE_CODE};
///
/// let sequence = PrefixedSequence::new("EOS/", 5);
/// assert_eq!(sequence.next_by_code(EOS_SEQUENCE_CODE).unwrap(), "EOS/00001");
/// assert_eq!(sequence.next_by_code(EOS_SEQUENCE_CODE).unwrap(), "EOS/00002");
/// ```
#[derive(Debug)]
pub struct PrefixedSequence {
    prefix: String,
    padding: usize,
    counters: Mutex<HashMap<String, u64>>,
}

impl PrefixedSequence {
    /// Creates a sequence with the given prefix and counter width.
    pub fn new(prefix: impl Into<String>, padding: usize) -> Self {
        Self {
            prefix: prefix.into(),
            padding,
            counters: Mutex::new(HashMap::new()),
        }
    }
}

impl Default for PrefixedSequence {
    fn default() -> Self {
        Self::new("EOS/", 5)
    }
}

impl SequenceGenerator for PrefixedSequence {
    fn next_by_code(&self, code: &str) -> EngineResult<String> {
        let mut counters = self
            .counters
            .lock()
            .map_err(|e| EngineError::SequenceUnavailable {
                code: code.to_string(),
                message: e.to_string(),
            })?;

        let counter = counters.entry(code.to_string()).or_insert(0);
        *counter += 1;

        Ok(format!(
            "{}{:0width$}",
            self.prefix,
            counter,
            width = self.padding
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_default_prefix_and_padding() {
        let sequence = PrefixedSequence::default();
        assert_eq!(sequence.next_by_code(EOS_SEQUENCE_CODE).unwrap(), "EOS/00001");
    }

    #[test]
    fn test_counters_are_independent_per_code() {
        let sequence = PrefixedSequence::new("REF-", 3);

        assert_eq!(sequence.next_by_code("a").unwrap(), "REF-001");
        assert_eq!(sequence.next_by_code("a").unwrap(), "REF-002");
        assert_eq!(sequence.next_by_code("b").unwrap(), "REF-001");
    }

    #[test]
    fn test_counter_grows_past_padding() {
        let sequence = PrefixedSequence::new("", 1);
        for _ in 0..9 {
            sequence.next_by_code("x").unwrap();
        }
        assert_eq!(sequence.next_by_code("x").unwrap(), "10");
    }

    #[test]
    fn test_references_are_unique_across_threads() {
        let sequence = Arc::new(PrefixedSequence::default());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sequence = Arc::clone(&sequence);
                thread::spawn(move || {
                    (0..25)
                        .map(|_| sequence.next_by_code(EOS_SEQUENCE_CODE).unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        let mut all: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), 100);
    }
}
