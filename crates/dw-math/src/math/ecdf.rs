//! Empirical distribution functions and the two-sample
//! Kolmogorov-Smirnov distance.

/// Empirical cumulative distribution function over a fixed sample.
///
/// The sample is copied and sorted once at construction; evaluation is a
/// binary search.
#[derive(Debug, Clone)]
pub struct Ecdf {
    sorted: Vec<f64>,
}

impl Ecdf {
    /// Build from a sample. Ordering uses `total_cmp`, so non-finite
    /// values sort deterministically rather than poisoning the sort.
    pub fn new(sample: &[f64]) -> Self {
        let mut sorted = sample.to_vec();
        sorted.sort_by(|a, b| a.total_cmp(b));
        Self { sorted }
    }

    /// Number of points backing the distribution.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// F(x): fraction of the sample less than or equal to `x`.
    ///
    /// Returns NaN for an empty sample.
    pub fn value(&self, x: f64) -> f64 {
        if self.sorted.is_empty() {
            return f64::NAN;
        }
        let below = self.sorted.partition_point(|v| *v <= x);
        below as f64 / self.sorted.len() as f64
    }
}

/// Two-sample Kolmogorov-Smirnov distance: `max |F_a(x) - F_b(x)|`.
///
/// Computed with a single merge walk over both sorted samples, so ties
/// within and across samples are handled exactly. Returns NaN when either
/// sample is empty.
pub fn ks_distance(a: &[f64], b: &[f64]) -> f64 {
    if a.is_empty() || b.is_empty() {
        return f64::NAN;
    }
    let mut xa = a.to_vec();
    let mut xb = b.to_vec();
    xa.sort_by(|p, q| p.total_cmp(q));
    xb.sort_by(|p, q| p.total_cmp(q));

    let na = xa.len() as f64;
    let nb = xb.len() as f64;
    let mut i = 0usize;
    let mut j = 0usize;
    let mut distance = 0.0f64;
    while i < xa.len() && j < xb.len() {
        let x = xa[i].min(xb[j]);
        while i < xa.len() && xa[i] <= x {
            i += 1;
        }
        while j < xb.len() && xb[j] <= x {
            j += 1;
        }
        let diff = (i as f64 / na - j as f64 / nb).abs();
        if diff > distance {
            distance = diff;
        }
    }
    // Once one sample is exhausted its CDF is pinned at 1 and the gap can
    // only shrink, so the maximum has already been seen.
    distance
}
