//! In-memory collections for saved recipes and known fibers, plus the glue
//! that loads and saves them through the codec.

mod catalog;
mod files;
mod recipes;

pub use catalog::FiberCatalog;
pub use files::{default_data_dir, DataFiles, CATALOG_FILE_NAME, RECIPES_FILE_NAME};
pub use recipes::RecipeStore;
