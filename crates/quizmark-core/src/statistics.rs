//! Group-by tallies and the fixed orderings used by the scoring engine.

use std::collections::HashMap;
use std::hash::Hash;

use crate::model::{DifficultyCategory, SoloLevel};

/// Compute `part / whole * 100`, defined as 0 when `whole` is 0.
///
/// Divides first, then scales: 1/3 gives 33.33333333333333.
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

/// Running `{total, correct}` counter for one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tally {
    pub total: u32,
    pub correct: u32,
}

impl Tally {
    pub fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }

    pub fn percentage(&self) -> f64 {
        percentage(self.correct, self.total)
    }
}

/// A group-by accumulator keyed by `K`, carrying per-key metadata `M`.
///
/// Metadata is captured from the first observation of a key; later
/// observations only update the tally. Entries come back in first-seen
/// order, which keeps downstream stable sorts deterministic.
#[derive(Debug, Clone)]
pub struct Buckets<K, M> {
    index: HashMap<K, usize>,
    entries: Vec<Bucket<K, M>>,
}

#[derive(Debug, Clone)]
pub struct Bucket<K, M> {
    pub key: K,
    pub meta: M,
    pub tally: Tally,
}

impl<K: Eq + Hash + Clone, M> Buckets<K, M> {
    pub fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Record one observation for `key`. `meta` is only called the first
    /// time the key is seen.
    pub fn record(&mut self, key: K, correct: bool, meta: impl FnOnce() -> M) {
        let slot = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.index.insert(key.clone(), i);
                self.entries.push(Bucket {
                    key,
                    meta: meta(),
                    tally: Tally::default(),
                });
                i
            }
        };
        self.entries[slot].tally.record(correct);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the accumulator, yielding buckets in first-seen order.
    pub fn into_buckets(self) -> Vec<Bucket<K, M>> {
        self.entries
    }
}

impl<K: Eq + Hash + Clone, M> Default for Buckets<K, M> {
    fn default() -> Self {
        Self::new()
    }
}

/// Sort position of a SOLO level name; unknown names sort last.
pub fn solo_rank(level: &str) -> usize {
    level
        .parse::<SoloLevel>()
        .map(|l| l as usize)
        .unwrap_or(usize::MAX)
}

/// Sort position of a difficulty category name; unknown names sort last.
pub fn difficulty_rank(category: &str) -> usize {
    category
        .parse::<DifficultyCategory>()
        .map(|c| c as usize)
        .unwrap_or(usize::MAX)
}
