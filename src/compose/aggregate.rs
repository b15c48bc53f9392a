use crate::error::ValidationError;
use crate::models::{normalize_fiber_name, YarnEntry};

/// Allowed absolute deviation of a yarn's percentage sum from 100.
pub const PERCENT_TOLERANCE: f64 = 0.09;

/// Gram weight per normalized fiber name, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedWeight {
    fibers: Vec<(String, f64)>,
}

impl AggregatedWeight {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `weight` grams to `name`, normalizing the name first so differently
    /// cased spellings of one fiber collapse into a single row.
    pub fn add(&mut self, name: &str, weight: f64) {
        let key = normalize_fiber_name(name);
        match self.fibers.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, total)) => *total += weight,
            None => self.fibers.push((key, weight)),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.fibers
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, weight)| *weight)
    }

    pub fn len(&self) -> usize {
        self.fibers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fibers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.fibers.iter().map(|(name, weight)| (name.as_str(), *weight))
    }
}

/// Outcome of a successful aggregation.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// Per-fiber weights and the total grams of the batch.
    Weights {
        weights: AggregatedWeight,
        total: f64,
    },
    /// Nothing to compute: no attached entries, or every entry weighs 0g.
    EmptyTotal,
}

/// Validate every attached entry and merge its fibers into per-fiber weights.
///
/// The first invalid entry aborts the whole batch. Entries with 0 grams still
/// have to be valid but add no weight.
pub fn aggregate(entries: &[YarnEntry]) -> Result<Aggregation, ValidationError> {
    let mut weights = AggregatedWeight::new();
    let mut total = 0.0;

    for (index, entry) in entries.iter().filter(|entry| entry.attached).enumerate() {
        validate_entry(index, entry)?;
        total += entry.grams;

        for share in &entry.shares {
            weights.add(&share.name, entry.grams * (share.percentage / 100.0));
        }
    }

    if total <= 0.0 {
        return Ok(Aggregation::EmptyTotal);
    }

    Ok(Aggregation::Weights { weights, total })
}

fn validate_entry(index: usize, entry: &YarnEntry) -> Result<(), ValidationError> {
    if !entry.grams.is_finite() {
        return Err(ValidationError::NonFiniteGrams { entry: index });
    }
    if entry.grams < 0.0 {
        return Err(ValidationError::NegativeGrams { entry: index });
    }

    let actual = entry.percent_sum();
    if !within_tolerance(actual) {
        return Err(ValidationError::PercentSumMismatch {
            entry: index,
            actual,
        });
    }

    for share in &entry.shares {
        if share.name.trim().is_empty() {
            return Err(ValidationError::EmptyFiberName { entry: index });
        }
        if share.percentage < 0.0 {
            return Err(ValidationError::NegativePercent {
                entry: index,
                fiber: share.name.trim().to_string(),
            });
        }
    }

    Ok(())
}

/// True when `sum` is close enough to 100 to count as a complete yarn.
pub fn within_tolerance(sum: f64) -> bool {
    (sum - 100.0).abs() <= PERCENT_TOLERANCE
}
