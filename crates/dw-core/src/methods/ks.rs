//! Bootstrap two-sample Kolmogorov-Smirnov test.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use dw_math::ks_distance;

/// Probability that the observed reference/active split is more extreme
/// than a random split of the pooled values.
///
/// `D_obs` is the KS distance between the segments; each of `perm_count`
/// shuffles of the pool, split at the original segment sizes, yields a
/// `D_perm`. The score is the fraction of permutations with
/// `D_perm < D_obs`, i.e. one minus the Monte-Carlo p-value.
///
/// Takes raw slices rather than [`super::Segments`] so the diff method can
/// run it over derived difference sequences.
pub(crate) fn score(
    reference: &[f64],
    active: &[f64],
    perm_count: usize,
    rng: &mut StdRng,
) -> f64 {
    if reference.is_empty() || active.is_empty() || perm_count == 0 {
        return 0.0;
    }
    let observed = ks_distance(reference, active);
    // Identical empirical distributions: nothing to test.
    if observed == 0.0 {
        return 0.0;
    }
    let mut pooled: Vec<f64> = reference.iter().chain(active.iter()).copied().collect();
    let mut supporting = 0usize;
    for _ in 0..perm_count {
        pooled.shuffle(rng);
        let permuted = ks_distance(&pooled[..reference.len()], &pooled[reference.len()..]);
        if permuted < observed {
            supporting += 1;
        }
    }
    supporting as f64 / perm_count as f64
}

#[cfg(test)]
mod tests {
    use super::super::seeded_rng;
    use super::*;

    #[test]
    fn far_shifted_active_scores_near_one() {
        let reference = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let active = [100.0, 101.0, 102.0, 103.0];
        let result = score(&reference, &active, 500, &mut seeded_rng(11));
        assert!(result > 0.9, "got {result}");
    }

    #[test]
    fn interleaved_segments_score_low() {
        let reference = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0];
        let active = [1.5, 3.5, 5.5, 7.5];
        let result = score(&reference, &active, 500, &mut seeded_rng(11));
        assert!(result < 0.5, "got {result}");
    }

    #[test]
    fn identical_segments_score_zero() {
        let values = [2.0, 4.0, 6.0, 8.0];
        assert_eq!(score(&values, &values, 200, &mut seeded_rng(5)), 0.0);
    }

    #[test]
    fn deterministic_for_a_fixed_seed() {
        let reference = [1.0, 4.0, 2.0, 8.0, 5.0, 7.0];
        let active = [9.0, 12.0, 11.0];
        let a = score(&reference, &active, 300, &mut seeded_rng(42));
        let b = score(&reference, &active, 300, &mut seeded_rng(42));
        assert_eq!(a, b);
    }

    #[test]
    fn empty_segment_scores_zero() {
        assert_eq!(score(&[], &[1.0], 100, &mut seeded_rng(1)), 0.0);
        assert_eq!(score(&[1.0], &[], 100, &mut seeded_rng(1)), 0.0);
    }
}
