/// Computes the arithmetic mean of a slice of values. Returns `None` for
/// empty input so a column with no usable values keeps an undefined mean.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Division that treats a missing numerator, missing denominator, or zero
/// denominator as unanswerable rather than an error or infinity.
pub fn safe_divide(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}
