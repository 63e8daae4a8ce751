//! Small numeric helpers shared by the scoring modules.

/// Splits `0..len` into consecutive `[start, end)` spans of at most `step`.
///
/// The last span is truncated when `len` is not a multiple of `step`.
pub(crate) fn spans(len: usize, step: usize) -> impl Iterator<Item = (usize, usize)> {
    debug_assert!(step > 0);
    (0..len)
        .step_by(step.max(1))
        .map(move |start| (start, (start + step).min(len)))
}

/// Returns `num / den`, or `0.0` when the denominator is exactly zero.
pub(crate) fn ratio_or_zero(num: f64, den: f64) -> f64 {
    if den == 0.0 {
        0.0
    } else {
        num / den
    }
}
