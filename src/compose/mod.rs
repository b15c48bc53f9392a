//! Batch composition: weigh every yarn's fibers, then apportion the result
//! into one-decimal percentages that add up to exactly 100%.

mod aggregate;
mod apportion;

pub use aggregate::{
    aggregate, within_tolerance, AggregatedWeight, Aggregation, PERCENT_TOLERANCE,
};
pub use apportion::{apportion, FULL_TENTHS};

use tracing::debug;

use crate::error::ValidationError;
use crate::models::{RoundedShare, YarnEntry};

/// Rounded composition of a whole batch.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositionReport {
    /// Total grams across all attached entries.
    pub total_grams: f64,
    /// One row per fiber, heaviest first.
    pub rows: Vec<RoundedShare>,
}

/// Run aggregation and apportionment in one go. `Ok(None)` means the batch
/// has no weight and there is nothing to show.
pub fn calculate(entries: &[YarnEntry]) -> Result<Option<CompositionReport>, ValidationError> {
    match aggregate(entries)? {
        Aggregation::EmptyTotal => {
            debug!(entries = entries.len(), "batch has no weight");
            Ok(None)
        }
        Aggregation::Weights { weights, total } => {
            let rows = apportion(&weights, total);
            debug!(fibers = rows.len(), total, "batch composition calculated");
            Ok(Some(CompositionReport {
                total_grams: total,
                rows,
            }))
        }
    }
}
