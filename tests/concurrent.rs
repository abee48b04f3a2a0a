use once_cell::sync::Lazy;
use rayon::prelude::*;

use pivot_segment::{NgramTableBuilder, Segmenter};

static SEGMENTER: Lazy<Segmenter> = Lazy::new(|| {
    let mut unigrams = NgramTableBuilder::new(1);
    for &(word, count) in [
        ("time", 40),
        ("man", 30),
        ("child", 20),
        ("lamp", 15),
        ("shade", 10),
        ("hand", 12),
        ("off", 8),
        ("handoff", 4),
    ]
    .iter()
    {
        unigrams.insert(&[word], count);
    }
    let mut bigrams = NgramTableBuilder::new(2);
    bigrams.insert(&["hand", "off"], 1);
    Segmenter::with_ngrams(unigrams.build(), bigrams.build())
});

// Construction happens once before any reader; after that the segmenter is
// shared read-only across threads.
#[test]
fn concurrent_readers_agree_with_sequential() {
    let inputs = [
        "timemanchild",
        "lampshade",
        "handoff",
        "manchildtime",
        "shadelamp",
        "timetimetime",
    ];
    let inputs = inputs
        .iter()
        .cycle()
        .take(240)
        .copied()
        .collect::<Vec<_>>();

    let sequential = inputs
        .iter()
        .map(|input| SEGMENTER.segment(input).unwrap())
        .collect::<Vec<_>>();
    let parallel = inputs
        .par_iter()
        .map(|input| SEGMENTER.segment(input).unwrap())
        .collect::<Vec<_>>();

    assert_eq!(sequential, parallel);
}
