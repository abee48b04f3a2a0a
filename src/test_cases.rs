use crate::Segmenter;

/// Run a segmenter against the built-in sanity checks
///
/// The checks hold for any probability tables, so they can validate a
/// segmenter built from your own corpus data.
pub fn run(segmenter: &Segmenter) {
    for input in INPUTS.iter().copied() {
        assert_deterministic(input, segmenter);
        assert_partition(input, segmenter);
        let segmented = segmenter.segment(input).unwrap();
        assert_merge_monotonic(&segmented, segmenter);
    }

    for input in SHORT_INPUTS.iter().copied() {
        assert_unchanged(input, segmenter);
    }
}

/// Segmenting the same input twice yields identical output
pub fn assert_deterministic(input: &str, segmenter: &Segmenter) {
    let first = segmenter.segment(input).unwrap();
    let second = segmenter.segment(input).unwrap();
    assert_eq!(first, second, "segmentation of {:?} is unstable", input);
}

/// Stripping the hyphens from the output reproduces the input
pub fn assert_partition(input: &str, segmenter: &Segmenter) {
    let segmented = segmenter.segment(input).unwrap();
    assert_eq!(
        segmented.replace('-', ""),
        input.replace('-', ""),
        "segmentation of {:?} lost or invented characters",
        input
    );
}

/// Inputs shorter than the minimum window come back as they went in
pub fn assert_unchanged(input: &str, segmenter: &Segmenter) {
    assert_eq!(segmenter.segment(input).unwrap(), input);
}

/// The merge pass never increases the number of segments
pub fn assert_merge_monotonic(segmented: &str, segmenter: &Segmenter) {
    let combined = segmenter.combine(segmented);
    assert!(
        combined.split('-').count() <= segmented.split('-').count(),
        "combine grew {:?} into {:?}",
        segmented,
        combined
    );
}

/// Built-in inputs for the data-independent checks
///
/// These are exposed so that you can test with different data sources.
pub const INPUTS: &[&str] = &[
    "",
    "timemanchild",
    "lampshade",
    "thisisatest",
    "expertsexchange",
    "speedofart",
    "nowisthetimeforallgood",
    "itwasabrightcolddayinapril",
];

const SHORT_INPUTS: &[&str] = &["", "a", "it", "the"];
