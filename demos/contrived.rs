use pivot_segment::{NgramTableBuilder, Segmenter};

fn main() {
    let mut unigrams = NgramTableBuilder::new(1);

    unigrams.insert(&["time"], 40);
    unigrams.insert(&["man"], 30);
    unigrams.insert(&["child"], 20);

    unigrams.insert(&["timeman"], 5);
    unigrams.insert(&["manchild"], 5);

    let segmenter = Segmenter::new(unigrams.build());

    println!("{}", segmenter.segment("timemanchild").unwrap());
}
