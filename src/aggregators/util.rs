use crate::aggregators::types::Bucket;

/// Computes the arithmetic mean of a slice of values. Returns 0.0 for empty input.
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Flags every bucket whose count equals the group maximum. An all-zero
/// group flags nothing.
pub fn flag_max(buckets: &mut [Bucket]) {
    let max = buckets.iter().map(|b| b.count).max().unwrap_or(0);
    if max == 0 {
        return;
    }
    for bucket in buckets {
        bucket.is_max = bucket.count == max;
    }
}
