//! Reader and writer for the two data files. The recipe file looks like JSON
//! but is handled by a small brace/quote-aware splitter: there is no escaping,
//! numbers are plain decimals, and anything unreadable is skipped rather than
//! reported.

mod catalog;
mod fragments;
mod recipes;

pub use catalog::{decode_catalog, encode_catalog};
pub use recipes::{decode_recipes, encode_recipes};

/// Characters a recipe name cannot carry: an unescaped quote flips the
/// splitter's quote state and swallows every later recipe.
pub const RECIPE_NAME_RESERVED: &[char] = &['"'];

/// Characters a fiber name inside a recipe cannot carry. The field pattern
/// stops at any of them.
pub const FIBER_NAME_RESERVED: &[char] = &['"', ',', '}'];

/// Characters a catalog entry cannot carry. The catalog list is split on
/// commas and quotes are stripped.
pub const CATALOG_NAME_RESERVED: &[char] = &['"', ','];

/// True when `name` contains none of the `reserved` characters.
pub fn is_storable(name: &str, reserved: &[char]) -> bool {
    !name.contains(reserved)
}
