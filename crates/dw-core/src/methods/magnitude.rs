//! Relative level change between active and reference means.

use dw_math::mean;

use super::Segments;

/// Relative change of the active mean against the reference mean,
/// thresholded at `sensitivity`.
///
/// Below the threshold the change is noise and scores exactly 0. Above it,
/// `1 - exp(-(relative - sensitivity))` rises smoothly from 0 toward 1.
/// A reference mean of 0 falls back to the absolute difference.
pub(crate) fn score(segments: Segments<'_>, sensitivity: f64) -> f64 {
    let Segments { reference, active } = segments;
    if reference.is_empty() || active.is_empty() {
        return 0.0;
    }
    let reference_mean = mean(reference);
    let shift = (mean(active) - reference_mean).abs();
    let relative = if reference_mean == 0.0 {
        shift
    } else {
        shift / reference_mean.abs()
    };
    if relative < sensitivity {
        return 0.0;
    }
    1.0 - (-(relative - sensitivity)).exp()
}
