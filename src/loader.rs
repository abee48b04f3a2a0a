//! Builds probability tables from delimited corpus files
//!
//! The expected format is one n-gram per line, `word1[ word2 ...]<TAB>count`.
//! Lines whose word count does not match the target degree are skipped, as
//! are malformed lines (missing count field, non-numeric count); a corpus
//! with partial or broken lines still loads. The unigram variant applies the
//! validity filter on top: minimum word length, `a-z` and `-` characters
//! only, and a small stoplist of function words.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::table::{NgramTable, NgramTableBuilder};

/// Words shorter than this are rejected by the unigram validity filter
pub const MIN_WORD_LEN: usize = 3;

/// Closed list of function words excluded from the unigram table
pub const STOPLIST: &[&str] = &["the", "and"];

/// Load a filtered unigram table from the file at `path`
pub fn load_unigrams<P: AsRef<Path>>(path: P) -> io::Result<NgramTable> {
    read_unigrams(BufReader::new(File::open(path)?))
}

/// Load an unfiltered n-gram table of the given degree from the file at `path`
pub fn load_ngrams<P: AsRef<Path>>(path: P, degree: usize) -> io::Result<NgramTable> {
    read_ngrams(BufReader::new(File::open(path)?), degree)
}

/// Like [`load_unigrams`], over any buffered reader
pub fn read_unigrams<R: BufRead>(reader: R) -> io::Result<NgramTable> {
    read(reader, 1, true)
}

/// Like [`load_ngrams`], over any buffered reader
pub fn read_ngrams<R: BufRead>(reader: R, degree: usize) -> io::Result<NgramTable> {
    read(reader, degree, false)
}

fn read<R: BufRead>(mut reader: R, degree: usize, filtered: bool) -> io::Result<NgramTable> {
    let mut builder = NgramTableBuilder::new(degree);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        // Corpus files predate UTF-8; decoding byte-per-char maps Latin-1
        // onto the first 256 Unicode scalars, so no line can fail to decode.
        let line = buf.iter().map(|&b| char::from(b)).collect::<String>();
        let (ngram, count) = match split_line(&line) {
            Some(fields) => fields,
            None => continue,
        };
        let words = ngram.split(' ').collect::<Vec<_>>();
        if words.len() != degree {
            continue;
        }
        if filtered && !words.iter().all(|word| valid_word(word)) {
            continue;
        }
        builder.insert(&words, count);
    }
    Ok(builder.build())
}

/// Split `ngram<TAB>count`; malformed lines yield `None`
fn split_line(line: &str) -> Option<(&str, u64)> {
    let mut fields = line.splitn(3, '\t');
    let ngram = fields.next()?;
    let count = fields.next()?.trim().parse().ok()?;
    Some((ngram, count))
}

fn valid_word(word: &str) -> bool {
    word.len() >= MIN_WORD_LEN
        && word.bytes().all(|b| b.is_ascii_lowercase() || b == b'-')
        && !STOPLIST.contains(&word)
}
