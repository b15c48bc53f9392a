//! Domain models shared by the composition engine, the recipe store and the
//! on-disk codec. These stay plain data holders so the other layers can focus
//! on arithmetic and persistence.

use std::fmt;

/// One fiber and its share of a yarn, in percent.
#[derive(Debug, Clone, PartialEq)]
pub struct FiberShare {
    /// Fiber name as entered. Normalization happens when weights are merged,
    /// so the stored text keeps whatever casing the user typed.
    pub name: String,
    /// Share of the yarn in percent. Expected to be `>= 0`.
    pub percentage: f64,
}

impl FiberShare {
    /// A share as typed; the name is not trimmed or normalized.
    pub fn new(name: impl Into<String>, percentage: f64) -> Self {
        Self {
            name: name.into(),
            percentage,
        }
    }
}

impl fmt::Display for FiberShare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.2}%", self.name, self.percentage)
    }
}

/// A named, reusable fiber breakdown.
///
/// The shares are meant to add up to 100% but nothing enforces that here: a
/// recipe read back from a hand-edited file may not, and the aggregator
/// validates every entry anyway.
#[derive(Debug, Clone, PartialEq)]
pub struct YarnRecipe {
    pub name: String,
    pub shares: Vec<FiberShare>,
}

impl YarnRecipe {
    /// A recipe with its shares in the given order.
    pub fn new(name: impl Into<String>, shares: Vec<FiberShare>) -> Self {
        Self {
            name: name.into(),
            shares,
        }
    }

    /// Sum of all share percentages.
    pub fn percent_sum(&self) -> f64 {
        percent_sum(&self.shares)
    }
}

/// One line item of a batch: how many grams of a yarn go in, and what that
/// yarn is made of.
#[derive(Debug, Clone, PartialEq)]
pub struct YarnEntry {
    pub grams: f64,
    pub shares: Vec<FiberShare>,
    /// Entries that the caller has detached from the active batch are skipped
    /// by the aggregator without being validated.
    pub attached: bool,
}

impl YarnEntry {
    pub fn new(grams: f64, shares: Vec<FiberShare>) -> Self {
        Self {
            grams,
            shares,
            attached: true,
        }
    }

    /// Build an entry from a saved recipe.
    pub fn from_recipe(grams: f64, recipe: &YarnRecipe) -> Self {
        Self::new(grams, recipe.shares.clone())
    }

    pub fn detached(mut self) -> Self {
        self.attached = false;
        self
    }

    pub fn percent_sum(&self) -> f64 {
        percent_sum(&self.shares)
    }
}

/// Final display row: a fiber and its share in tenths of a percent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundedShare {
    pub name: String,
    pub tenths: i64,
}

impl RoundedShare {
    /// Share as a percentage with one decimal place of precision.
    pub fn percent(&self) -> f64 {
        self.tenths as f64 / 10.0
    }
}

pub(crate) fn percent_sum(shares: &[FiberShare]) -> f64 {
    shares.iter().map(|share| share.percentage).sum()
}

/// Trim a fiber name and upper-case its first character. The rest of the
/// name is left untouched so "merino Wool" becomes "Merino Wool", not
/// "Merino wool".
pub fn normalize_fiber_name(name: &str) -> String {
    let trimmed = name.trim();
    let mut chars = trimmed.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
