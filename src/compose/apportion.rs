use tracing::warn;

use super::aggregate::AggregatedWeight;
use crate::models::RoundedShare;

/// 100.0% expressed in tenths of a percent.
pub const FULL_TENTHS: i64 = 1000;

/// Turn per-fiber weights into tenths of a percent that add up to exactly
/// 1000, using the largest remainder method.
///
/// Rows come back ordered by descending weight. Fibers of equal weight keep
/// their aggregation order, and fibers with equal remainders are corrected in
/// that same row order, so the output is fully deterministic.
///
/// At most one tenth is added to or taken from any fiber. With entries that
/// passed validation the rounding gap never exceeds the number of fibers.
pub fn apportion(weights: &AggregatedWeight, total: f64) -> Vec<RoundedShare> {
    if weights.is_empty() || total <= 0.0 {
        return Vec::new();
    }

    let mut rows: Vec<(&str, f64)> = weights.iter().collect();
    rows.sort_by(|a, b| b.1.total_cmp(&a.1));

    let exact: Vec<f64> = rows
        .iter()
        .map(|(_, weight)| (weight / total) * FULL_TENTHS as f64)
        .collect();
    let mut tenths: Vec<i64> = exact.iter().map(|value| value.round() as i64).collect();

    let diff = FULL_TENTHS - tenths.iter().sum::<i64>();
    if diff != 0 {
        let mut ranking: Vec<usize> = (0..rows.len()).collect();
        let step = if diff > 0 {
            // Largest shortfall first.
            ranking.sort_by(|&a, &b| {
                let rem_a = exact[a] - tenths[a] as f64;
                let rem_b = exact[b] - tenths[b] as f64;
                rem_b.total_cmp(&rem_a)
            });
            1
        } else {
            // Largest overshoot first.
            ranking.sort_by(|&a, &b| {
                let over_a = tenths[a] as f64 - exact[a];
                let over_b = tenths[b] as f64 - exact[b];
                over_b.total_cmp(&over_a)
            });
            -1
        };

        for &index in ranking.iter().take(diff.unsigned_abs() as usize) {
            tenths[index] += step;
        }

        let corrected: i64 = tenths.iter().sum();
        if corrected != FULL_TENTHS {
            warn!(
                fibers = rows.len(),
                diff,
                sum = corrected,
                "rounding gap larger than fiber count; shares do not add up to 100%"
            );
        }
    }

    rows.into_iter()
        .zip(tenths)
        .map(|((name, _), tenths)| RoundedShare {
            name: name.to_string(),
            tenths,
        })
        .collect()
}
