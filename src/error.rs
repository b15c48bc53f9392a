//! Error types surfaced by the library. User-input problems are plain enums
//! the caller can render; file problems carry the path that failed.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A batch entry failed validation. `entry` is the zero-based position of the
/// offending yarn among the attached entries.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Yarn {}: grams must be a finite number.", .entry + 1)]
    NonFiniteGrams { entry: usize },

    #[error("Yarn {}: grams must not be negative.", .entry + 1)]
    NegativeGrams { entry: usize },

    #[error("Yarn {}: percentages do not equal 100% (but {actual:.2}%).", .entry + 1)]
    PercentSumMismatch { entry: usize, actual: f64 },

    #[error("Yarn {}: fiber name must not be empty.", .entry + 1)]
    EmptyFiberName { entry: usize },

    #[error("Yarn {}: percentage for '{fiber}' must not be negative.", .entry + 1)]
    NegativePercent { entry: usize, fiber: String },
}

/// Checks applied before a recipe is saved.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecipeError {
    #[error("recipe name must not be empty")]
    EmptyName,

    #[error("recipe name must not contain '\"'")]
    ReservedCharInName,

    #[error("no fibers given")]
    NoFibers,

    #[error("total must be 100% (current: {actual:.1}%)")]
    PercentSumMismatch { actual: f64 },

    #[error("fiber name must not be empty")]
    EmptyFiberName,

    #[error("fiber name '{fiber}' must not contain '\"', ',' or '}}'")]
    ReservedCharInFiberName { fiber: String },

    #[error("percentage for '{fiber}' must not be negative")]
    NegativePercent { fiber: String },
}

/// Failures while touching the data files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not locate home directory")]
    DataDir,

    #[error("failed to access {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}
