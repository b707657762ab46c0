//! Empirical-distribution extremity of the active mean.

use dw_math::{is_constant, mean, Ecdf};

use super::Segments;

/// Locates the active mean within the reference ECDF and reports two-tailed
/// extremity: 0 at the reference median, approaching 1 at either tail.
///
/// A reference with fewer than two points, or with no spread, defines no
/// usable distribution and scores 0.
pub(crate) fn score(segments: Segments<'_>) -> f64 {
    let Segments { reference, active } = segments;
    if reference.len() < 2 || active.is_empty() || is_constant(reference) {
        return 0.0;
    }
    let percentile = Ecdf::new(reference).value(mean(active));
    2.0 * (percentile - 0.5).abs()
}
