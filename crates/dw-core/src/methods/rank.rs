//! Permutation rank-sum tests.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use dw_math::{average_ranks, is_constant};

use super::Segments;

/// Which tail of the rank-sum null distribution counts as anomalous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    /// Active values skew high: an anomalously large rank-sum.
    High,
    /// Active values skew low: an anomalously small rank-sum.
    Low,
}

/// Monte-Carlo significance of the active segment's rank-sum within the
/// pooled window.
///
/// Reference and active values are pooled and ranked with tie averaging;
/// the observed statistic is the rank-sum over the active positions. Each
/// of `perm_count` reshuffles of the rank vector resamples which ranks
/// land in the active slots, and the score is the fraction of permutations
/// strictly less extreme than observed — so a smaller Monte-Carlo p-value
/// maps to a higher probability.
pub(crate) fn score(
    segments: Segments<'_>,
    perm_count: usize,
    rng: &mut StdRng,
    direction: Direction,
) -> f64 {
    let Segments { reference, active } = segments;
    if reference.is_empty() || active.is_empty() || perm_count == 0 {
        return 0.0;
    }
    let pooled: Vec<f64> = reference.iter().chain(active.iter()).copied().collect();
    // An all-tied pool has a single possible ranking: no ordering evidence.
    if is_constant(&pooled) {
        return 0.0;
    }
    let mut ranks = average_ranks(&pooled);
    let observed = tail_sum(&ranks, active.len());

    let mut supporting = 0usize;
    for _ in 0..perm_count {
        ranks.shuffle(rng);
        let permuted = tail_sum(&ranks, active.len());
        let less_extreme = match direction {
            Direction::High => permuted < observed,
            Direction::Low => permuted > observed,
        };
        if less_extreme {
            supporting += 1;
        }
    }
    supporting as f64 / perm_count as f64
}

fn tail_sum(ranks: &[f64], active_len: usize) -> f64 {
    ranks[ranks.len() - active_len..].iter().sum()
}
