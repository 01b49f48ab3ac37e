/// Class index for a score in `[0, 1]` among `n_classes` evenly spaced
/// targets: `floor(K * score + 0.1)`.
///
/// The `+0.1` bias is part of the decision rule. Encoded targets `c / K`
/// always map back to `c`; predicted scores near a boundary may land one
/// bucket up. A non-finite score maps to `-1`, which is never a class.
pub fn bucketize(score: f64, n_classes: usize) -> i64 {
    if !score.is_finite() {
        return -1;
    }
    (n_classes as f64 * score + 0.1).floor() as i64
}

/// `Some(index)` when the bucket is a valid class, `None` otherwise.
pub fn class_index(bucket: i64, n_classes: usize) -> Option<usize> {
    usize::try_from(bucket).ok().filter(|&c| c < n_classes)
}
