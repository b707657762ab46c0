//! Weighted combination of per-method probabilities.

use std::collections::BTreeMap;

use crate::config::Method;

/// Per-method weights resolved once at construction: the configured value
/// when present, uniform weight 1 otherwise.
pub(crate) fn resolve_weights(
    methods: &[Method],
    configured: &BTreeMap<Method, f64>,
) -> Vec<(Method, f64)> {
    methods
        .iter()
        .map(|&method| (method, configured.get(&method).copied().unwrap_or(1.0)))
        .collect()
}

/// Weighted mean of `(weight, probability)` pairs, clamped to [0, 1] to
/// absorb floating-point drift.
///
/// A zero total weight yields 0; configuration validation keeps that
/// unreachable for a constructed detector.
pub(crate) fn weighted_mean(scored: &[(f64, f64)]) -> f64 {
    let total: f64 = scored.iter().map(|(weight, _)| weight).sum();
    if total <= 0.0 {
        return 0.0;
    }
    let sum: f64 = scored
        .iter()
        .map(|(weight, probability)| weight * probability)
        .sum();
    (sum / total).clamp(0.0, 1.0)
}
