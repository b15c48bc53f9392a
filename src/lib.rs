//! Core library for the yarn blend calculator.
//!
//! The composition engine turns a batch of yarns into fiber percentages that
//! add up to exactly 100.0%, and the store/codec pair keeps saved recipes and
//! the fiber catalog on disk. The `bin` target is a thin command-line layer
//! over these pieces.
pub mod app;
pub mod cli;
pub mod codec;
pub mod compose;
pub mod error;
pub mod logging;
pub mod models;
pub mod report;
pub mod store;

/// Batch calculation entry points.
pub use compose::{
    aggregate, apportion, calculate, AggregatedWeight, Aggregation, CompositionReport,
};

/// Persistence.
pub use codec::{decode_catalog, decode_recipes, encode_catalog, encode_recipes};
pub use store::{DataFiles, FiberCatalog, RecipeStore};

pub use error::{RecipeError, StoreError, ValidationError};
pub use models::{normalize_fiber_name, FiberShare, RoundedShare, YarnEntry, YarnRecipe};

/// Application state driven by the command-line front end.
pub use app::App;
