//! Tie-averaged ranking.

/// 1-based ranks with ties assigned the average of the ranks they span.
///
/// `values[i]`'s rank lands at `ranks[i]`, so the output aligns with the
/// input ordering rather than the sorted ordering.
pub fn average_ranks(values: &[f64]) -> Vec<f64> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut ranks = vec![0.0; values.len()];
    let mut i = 0usize;
    while i < order.len() {
        let mut j = i;
        while j + 1 < order.len() && values[order[j + 1]] == values[order[i]] {
            j += 1;
        }
        // Positions i..=j (0-based) share the tie; their 1-based ranks
        // average to (i + j) / 2 + 1.
        let shared = (i + j) as f64 / 2.0 + 1.0;
        for &original in &order[i..=j] {
            ranks[original] = shared;
        }
        i = j + 1;
    }
    ranks
}
