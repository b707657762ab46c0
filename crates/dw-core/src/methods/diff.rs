//! Volatility-shift test over first-order differences.

use rand::rngs::StdRng;

use dw_math::diffs;

use super::{ks, Segments};

/// Runs the bootstrap KS test on successive deltas instead of raw values,
/// so level shifts cancel out and changes in volatility remain.
///
/// A segment with fewer than two points has no differences and scores 0.
pub(crate) fn score(segments: Segments<'_>, perm_count: usize, rng: &mut StdRng) -> f64 {
    let reference = diffs(segments.reference);
    let active = diffs(segments.active);
    ks::score(&reference, &active, perm_count, rng)
}
