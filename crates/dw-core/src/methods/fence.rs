//! Bound exceedance against configured fence limits.

use super::Segments;

/// Scores the active segment against the fence bounds.
///
/// The breach fraction is scaled up by the worst normalized excursion past
/// a bound and saturates at 1, so the score is monotone in the fraction of
/// offending values at a fixed excursion and grows as the worst offender
/// moves further out.
pub(crate) fn score(segments: Segments<'_>, upper: Option<f64>, lower: Option<f64>) -> f64 {
    let active = segments.active;
    if active.is_empty() {
        return 0.0;
    }
    let scale = excursion_scale(upper, lower);
    let mut breaches = 0usize;
    let mut worst = 0.0f64;
    for &value in active {
        if let Some(upper) = upper {
            if value > upper {
                breaches += 1;
                worst = worst.max((value - upper) / scale);
                continue;
            }
        }
        if let Some(lower) = lower {
            if value < lower {
                breaches += 1;
                worst = worst.max((lower - value) / scale);
            }
        }
    }
    let fraction = breaches as f64 / active.len() as f64;
    (fraction * (1.0 + worst)).clamp(0.0, 1.0)
}

/// Excursions are normalized by the bound span when both bounds are set
/// and distinct, otherwise by the magnitude of the single bound, floored
/// at 1 so a bound of zero still yields a usable scale.
fn excursion_scale(upper: Option<f64>, lower: Option<f64>) -> f64 {
    match (upper, lower) {
        (Some(upper), Some(lower)) if upper > lower => upper - lower,
        (Some(bound), _) | (None, Some(bound)) => bound.abs().max(1.0),
        (None, None) => 1.0,
    }
}
