//! The statistical tests behind each configured [`Method`].
//!
//! Every test maps `(reference segment, active segment, parameters)` to a
//! probability in [0, 1]. Degenerate input — an empty or too-short segment,
//! or a segment with no spread — carries no evidence of anomaly and scores
//! 0 across all methods.

mod cdf;
mod diff;
mod fence;
mod ks;
mod magnitude;
mod rank;

use rand::rngs::StdRng;

use crate::config::{DetectorConfig, Method};

/// Read-only view of the window's two segments.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Segments<'a> {
    pub reference: &'a [f64],
    pub active: &'a [f64],
}

/// Run one method over the segments.
///
/// The clamp absorbs floating-point drift; methods guard their own
/// degenerate inputs and never return non-finite values on finite input.
pub(crate) fn score(
    method: Method,
    segments: Segments<'_>,
    config: &DetectorConfig,
    rng: &mut StdRng,
) -> f64 {
    let raw = match method {
        Method::Cdf => cdf::score(segments),
        Method::Diff => diff::score(segments, config.perm_count, rng),
        Method::HighRank => rank::score(segments, config.perm_count, rng, rank::Direction::High),
        Method::LowRank => rank::score(segments, config.perm_count, rng, rank::Direction::Low),
        Method::Fence => fence::score(segments, config.upper_bound, config.lower_bound),
        Method::Magnitude => magnitude::score(segments, config.sensitivity),
        Method::Ks => ks::score(segments.reference, segments.active, config.perm_count, rng),
    };
    raw.clamp(0.0, 1.0)
}

#[cfg(test)]
pub(crate) fn seeded_rng(seed: u64) -> StdRng {
    use rand::SeedableRng;
    StdRng::seed_from_u64(seed)
}
