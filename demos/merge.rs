//! Shows the merge pass repairing an over-eager split: without bigram data
//! the slice stops at "hand-off"; with it, the fragments are rejoined.

use pivot_segment::{NgramTable, NgramTableBuilder, Segmenter};

fn main() {
    let plain = Segmenter::new(unigrams());
    println!("without bigrams: {}", plain.segment("handoff").unwrap());

    let mut bigrams = NgramTableBuilder::new(2);
    bigrams.insert(&["hand", "off"], 1);
    let merging = Segmenter::with_ngrams(unigrams(), bigrams.build());
    println!("with bigrams:    {}", merging.segment("handoff").unwrap());
}

fn unigrams() -> NgramTable {
    let mut builder = NgramTableBuilder::new(1);
    builder.insert(&["hand"], 40);
    builder.insert(&["off"], 30);
    builder.insert(&["handoff"], 20);
    builder.build()
}
