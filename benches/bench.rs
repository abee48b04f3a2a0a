use bencher::{benchmark_group, benchmark_main, Bencher};

use pivot_segment::{NgramTableBuilder, Segmenter};

benchmark_group!(benches, short, long);
benchmark_main!(benches);

fn short(bench: &mut Bencher) {
    let segmenter = segmenter();
    bench.iter(|| {
        let _ = segmenter.segment("timemanchild");
    });
}

fn long(bench: &mut Bencher) {
    let segmenter = segmenter();
    bench.iter(|| {
        let _ = segmenter.segment("itwasabrightcolddayinaprilandtheclockswerestrikingthirteen");
    });
}

fn segmenter() -> Segmenter {
    let mut unigrams = NgramTableBuilder::new(1);
    for &(word, count) in WORDS.iter() {
        unigrams.insert(&[word], count);
    }
    let mut bigrams = NgramTableBuilder::new(2);
    bigrams.insert(&["time", "man"], 12);
    bigrams.insert(&["cold", "day"], 9);
    Segmenter::with_ngrams(unigrams.build(), bigrams.build())
}

const WORDS: &[(&str, u64)] = &[
    ("time", 410),
    ("man", 300),
    ("child", 205),
    ("was", 520),
    ("bright", 90),
    ("cold", 140),
    ("day", 380),
    ("april", 60),
    ("the", 990),
    ("clocks", 25),
    ("were", 310),
    ("striking", 40),
    ("thirteen", 30),
];
