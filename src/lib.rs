use std::ops::{Index, Range};
use std::str;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod loader;
mod table;
#[cfg(feature = "test-cases")]
pub mod test_cases;

pub use crate::table::{NgramTable, NgramTableBuilder};

/// Central data structure used to look up word probabilities and segment text
#[cfg_attr(feature = "with-serde", derive(Deserialize, Serialize))]
pub struct Segmenter {
    unigrams: NgramTable,
    ngrams: Option<NgramTable>,
}

impl Segmenter {
    /// Create a `Segmenter` backed by unigram probabilities alone
    ///
    /// Panics if `unigrams` was built at a degree other than 1.
    pub fn new(unigrams: NgramTable) -> Self {
        assert_eq!(unigrams.degree(), 1, "unigram table must have degree 1");
        Self {
            unigrams,
            ngrams: None,
        }
    }

    /// Create a `Segmenter` with a next-order table alongside the unigrams
    ///
    /// The next-order table holds either bigrams or trigrams; its degree
    /// fixes the arity accepted by [`Segmenter::probability`] beyond single
    /// words. Only a bigram table changes segmentation output, by enabling
    /// the merge pass. Panics if `ngrams` was built at degree 1.
    pub fn with_ngrams(unigrams: NgramTable, ngrams: NgramTable) -> Self {
        assert!(
            ngrams.degree() > 1,
            "next-order table must have degree 2 or 3"
        );
        let mut segmenter = Self::new(unigrams);
        segmenter.ngrams = Some(ngrams);
        segmenter
    }

    /// Look up the probability of an n-gram
    ///
    /// Accepts a single word, or a full n-gram at the degree of the loaded
    /// next-order table. An n-gram absent from its table has probability
    /// 0.0; that is a normal result, not a failure. Any other word count is
    /// a caller-contract violation and returns [`InvalidArity`].
    pub fn probability(&self, words: &[&str]) -> Result<f64, InvalidArity> {
        match (words, &self.ngrams) {
            ([word], _) => Ok(self.unigrams.lookup(word).unwrap_or(0.0)),
            (words, Some(ngrams)) if words.len() == ngrams.degree() => {
                Ok(ngrams.probability(words))
            }
            (words, _) => Err(InvalidArity(words.len())),
        }
    }

    /// Segment `input` into its most probable word components
    ///
    /// Requires that `input` consists of lowercase ASCII characters and
    /// hyphens only; the hyphen counts as part of the alphabet so that
    /// already segmented output can be fed back in. Returns the input with
    /// `-` inserted at the inferred word boundaries. Inputs shorter than
    /// the minimum window come back unchanged.
    pub fn segment(&self, input: &str) -> Result<String, InvalidCharacter> {
        let text = Ascii::new(input)?;
        let sliced = SliceState { data: self, text }.run();
        Ok(match &self.ngrams {
            Some(ngrams) if ngrams.degree() == 2 => self.combine(&sliced),
            _ => sliced,
        })
    }

    /// Repair over-segmentation in a `-`-delimited segmentation
    ///
    /// Scans adjacent segment pairs, skipping pairs whose members both
    /// exceed the minimum window size, and looks the concatenation of each
    /// surviving pair up in the unigram table. The best-scoring pair of the
    /// pass (ties favor the earliest) is merged and the scan re-runs on the
    /// shortened sequence, until a full pass finds nothing left to merge.
    /// One merge per pass: each merge changes adjacency, so the remaining
    /// candidates must be re-evaluated before the next decision.
    pub fn combine(&self, segmented: &str) -> String {
        let mut segments = segmented.split('-').map(str::to_owned).collect::<Vec<_>>();
        loop {
            let mut best: Option<(usize, f64)> = None;
            for at in 0..segments.len().saturating_sub(1) {
                let (left, right) = (&segments[at], &segments[at + 1]);
                if left.len() > MIN_WINDOW && right.len() > MIN_WINDOW {
                    continue;
                }
                let joined = [left.as_str(), right.as_str()].concat();
                let p = match self.unigrams.lookup(&joined) {
                    Some(p) => p,
                    None => continue,
                };
                if best.map_or(true, |(_, q)| p > q) {
                    best = Some((at, p));
                }
            }
            let at = match best {
                Some((at, _)) => at,
                None => break,
            };
            let right = segments.remove(at + 1);
            segments[at].push_str(&right);
        }
        segments.join("-")
    }
}

struct SliceState<'a> {
    data: &'a Segmenter,
    text: Ascii<'a>,
}

impl<'a> SliceState<'a> {
    fn run(&self) -> String {
        self.slice(0..self.text.len())
    }

    /// Recursive divide step: find the most probable known substring at the
    /// current window length, commit to it, and slice the three remaining
    /// parts independently. Greedy: a chosen pivot is never reconsidered,
    /// even if another pivot would score better over a larger span.
    fn slice(&self, range: Range<usize>) -> String {
        let mut degree = range.len().saturating_sub(1);
        let whole = self.probability(range.clone());
        while degree >= MIN_WINDOW {
            // The first candidate must strictly beat the whole fragment's
            // probability, later ones the running best; ties keep the
            // earliest pivot.
            let mut pivot = None;
            let mut best = whole;
            for at in range.start..=(range.end - degree) {
                match self.data.unigrams.lookup(&self.text[at..at + degree]) {
                    Some(p) if p > best => {
                        best = p;
                        pivot = Some(at);
                    }
                    _ => {}
                }
            }
            let at = match pivot {
                Some(at) => at,
                // No known substring at this window length; narrow it.
                None => {
                    degree -= 1;
                    continue;
                }
            };
            let parts = [
                self.slice(range.start..at),
                self.slice(at..at + degree),
                self.slice(at + degree..range.end),
            ];
            return parts.join("-").trim_matches('-').to_string();
        }
        self.text[range].to_string()
    }

    fn probability(&self, range: Range<usize>) -> f64 {
        self.data.unigrams.lookup(&self.text[range]).unwrap_or(0.0)
    }
}

#[derive(Debug)]
struct Ascii<'a>(&'a [u8]);

impl<'a> Ascii<'a> {
    fn new(s: &'a str) -> Result<Self, InvalidCharacter> {
        let bytes = s.as_bytes();
        match bytes.iter().all(|&b| b.is_ascii_lowercase() || b == b'-') {
            true => Ok(Self(bytes)),
            false => Err(InvalidCharacter),
        }
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

impl<'a> Index<Range<usize>> for Ascii<'a> {
    type Output = str;

    fn index(&self, index: Range<usize>) -> &Self::Output {
        let bytes = self.0.index(index);
        // Since `Ascii` can only hold lowercase ASCII and hyphens, this is safe
        unsafe { str::from_utf8_unchecked(bytes) }
    }
}

/// The input to [`Segmenter::segment`] contained a character outside `a-z` and `-`
#[derive(Debug)]
pub struct InvalidCharacter;

impl std::error::Error for InvalidCharacter {}

impl std::fmt::Display for InvalidCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("invalid character")
    }
}

/// A probability query with a word count the loaded tables cannot answer
#[derive(Debug)]
pub struct InvalidArity(pub usize);

impl std::error::Error for InvalidArity {}

impl std::fmt::Display for InvalidArity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "cannot answer a {}-word probability query", self.0)
    }
}

pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;

const MIN_WINDOW: usize = 3;
