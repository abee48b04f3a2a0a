#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use smartstring::alias::String;

use crate::HashMap;

/// Immutable n-gram probability table
///
/// Entries are keyed by the first `degree - 1` words of an n-gram, with the
/// final level mapping the last word to its probability; a degree-1 table is
/// a single flat mapping. Built once by [`NgramTableBuilder`] and read-only
/// afterwards; the stored probabilities sum to 1.0.
///
/// Note: the `String` keys come from the `smartstring` crate; any `&str` can
/// be converted by calling `into()` on it.
#[cfg_attr(feature = "with-serde", derive(Deserialize, Serialize))]
pub struct NgramTable {
    degree: usize,
    entries: HashMap<String, Entry>,
}

#[cfg_attr(feature = "with-serde", derive(Deserialize, Serialize))]
enum Entry {
    Prob(f64),
    Chain(HashMap<String, Entry>),
}

impl NgramTable {
    /// The fixed word count of the n-grams this table holds
    pub fn degree(&self) -> usize {
        self.degree
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Probability of a full n-gram at this table's degree
    ///
    /// Chains through the nested levels; any missing level yields 0.0.
    pub fn probability(&self, words: &[&str]) -> f64 {
        debug_assert_eq!(words.len(), self.degree);
        let (last, prefix) = match words.split_last() {
            Some(split) => split,
            None => return 0.0,
        };
        let mut entries = &self.entries;
        for word in prefix {
            entries = match entries.get(*word) {
                Some(Entry::Chain(next)) => next,
                _ => return 0.0,
            };
        }
        match entries.get(*last) {
            Some(Entry::Prob(p)) => *p,
            _ => 0.0,
        }
    }

    /// Membership-aware unigram lookup for the segmentation hot path
    pub(crate) fn lookup(&self, word: &str) -> Option<f64> {
        match self.entries.get(word) {
            Some(Entry::Prob(p)) => Some(*p),
            _ => None,
        }
    }
}

/// Accumulates raw n-gram counts and materializes an [`NgramTable`]
///
/// Construction is two-phase: [`insert`] only accumulates (repeated keys
/// sum), and [`build`] divides every accumulated count by the grand total in
/// a single pass. Normalization must not happen earlier, since the
/// denominator is the sum over everything inserted.
///
/// [`insert`]: NgramTableBuilder::insert
/// [`build`]: NgramTableBuilder::build
pub struct NgramTableBuilder {
    degree: usize,
    counts: HashMap<String, Count>,
    total: u64,
}

enum Count {
    Sum(u64),
    Chain(HashMap<String, Count>),
}

impl NgramTableBuilder {
    /// Start a builder for n-grams of exactly `degree` words
    ///
    /// Panics unless `degree` is 1, 2 or 3.
    pub fn new(degree: usize) -> Self {
        assert!((1..=3).contains(&degree), "degree must be 1, 2 or 3");
        Self {
            degree,
            counts: HashMap::default(),
            total: 0,
        }
    }

    /// Record `count` occurrences of `words`
    ///
    /// Panics if the word count does not match the builder's degree; degree
    /// filtering of untrusted input belongs to the loader.
    pub fn insert(&mut self, words: &[&str], count: u64) {
        assert_eq!(
            words.len(),
            self.degree,
            "word count must match the table degree"
        );
        self.total += count;
        let mut counts = &mut self.counts;
        for word in &words[..words.len() - 1] {
            let entry = counts
                .entry((*word).into())
                .or_insert_with(|| Count::Chain(HashMap::default()));
            counts = match entry {
                Count::Chain(next) => next,
                // All inserts share one arity, so a prefix level is never a leaf
                Count::Sum(_) => unreachable!("degree is fixed per builder"),
            };
        }
        match counts
            .entry(words[words.len() - 1].into())
            .or_insert(Count::Sum(0))
        {
            Count::Sum(sum) => *sum += count,
            Count::Chain(_) => unreachable!("degree is fixed per builder"),
        }
    }

    /// Materialize the read-only table, normalizing exactly once
    pub fn build(self) -> NgramTable {
        let total = self.total as f64;
        NgramTable {
            degree: self.degree,
            entries: normalize(self.counts, total),
        }
    }
}

fn normalize(counts: HashMap<String, Count>, total: f64) -> HashMap<String, Entry> {
    counts
        .into_iter()
        .map(|(word, count)| {
            let entry = match count {
                Count::Sum(sum) if total > 0.0 => Entry::Prob(sum as f64 / total),
                Count::Sum(_) => Entry::Prob(0.0),
                Count::Chain(next) => Entry::Chain(normalize(next, total)),
            };
            (word, entry)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sum(entries: &HashMap<String, Entry>) -> f64 {
        entries
            .values()
            .map(|entry| match entry {
                Entry::Prob(p) => *p,
                Entry::Chain(next) => sum(next),
            })
            .sum()
    }

    #[test]
    fn normalizes_once_over_the_grand_total() {
        let mut builder = NgramTableBuilder::new(1);
        builder.insert(&["time"], 40);
        builder.insert(&["man"], 30);
        builder.insert(&["child"], 20);
        builder.insert(&["timeman"], 5);
        builder.insert(&["manchild"], 5);
        let table = builder.build();

        assert!((table.probability(&["time"]) - 0.4).abs() < 1e-9);
        assert!((table.probability(&["manchild"]) - 0.05).abs() < 1e-9);
        assert!((sum(&table.entries) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn repeated_keys_accumulate() {
        let mut builder = NgramTableBuilder::new(1);
        builder.insert(&["time"], 25);
        builder.insert(&["time"], 25);
        builder.insert(&["man"], 50);
        let table = builder.build();

        assert!((table.probability(&["time"]) - 0.5).abs() < 1e-9);
        assert!((sum(&table.entries) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn missing_levels_yield_zero() {
        let mut builder = NgramTableBuilder::new(3);
        builder.insert(&["time", "man", "child"], 3);
        builder.insert(&["time", "man", "hood"], 1);
        let table = builder.build();

        assert!((table.probability(&["time", "man", "child"]) - 0.75).abs() < 1e-9);
        assert_eq!(table.probability(&["time", "boy", "child"]), 0.0);
        assert_eq!(table.probability(&["past", "man", "child"]), 0.0);
        assert_eq!(table.probability(&["time", "man", "kind"]), 0.0);
        assert!((sum(&table.entries) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn bounds_hold_for_every_stored_probability() {
        let mut builder = NgramTableBuilder::new(2);
        builder.insert(&["of", "the"], 7);
        builder.insert(&["in", "the"], 2);
        builder.insert(&["on", "the"], 1);
        let table = builder.build();

        for words in &[["of", "the"], ["in", "the"], ["on", "the"], ["at", "the"]] {
            let p = table.probability(words);
            assert!((0.0..=1.0).contains(&p));
        }
    }

    #[test]
    fn empty_build_is_usable() {
        let table = NgramTableBuilder::new(2).build();
        assert!(table.is_empty());
        assert_eq!(table.probability(&["time", "man"]), 0.0);
    }
}
