use crate::codec::{is_storable, FIBER_NAME_RESERVED, RECIPE_NAME_RESERVED};
use crate::compose::within_tolerance;
use crate::error::RecipeError;
use crate::models::{percent_sum, FiberShare, YarnRecipe};

/// Saved recipes keyed by name. Iteration follows insertion order, and
/// overwriting a recipe keeps its original position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeStore {
    recipes: Vec<YarnRecipe>,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a recipe without any checks. Returns `true` when an
    /// existing recipe was overwritten.
    pub fn upsert(&mut self, name: &str, shares: Vec<FiberShare>) -> bool {
        match self.recipes.iter_mut().find(|recipe| recipe.name == name) {
            Some(existing) => {
                existing.shares = shares;
                true
            }
            None => {
                self.recipes.push(YarnRecipe::new(name, shares));
                false
            }
        }
    }

    /// Validate and store a recipe the way an interactive save does: the name
    /// and fiber names are trimmed, every fiber needs a name and a
    /// non-negative share, and the shares have to add up to 100%. Names the
    /// data file cannot hold are refused.
    pub fn save_checked(&mut self, name: &str, shares: &[FiberShare]) -> Result<bool, RecipeError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RecipeError::EmptyName);
        }
        if !is_storable(name, RECIPE_NAME_RESERVED) {
            return Err(RecipeError::ReservedCharInName);
        }
        if shares.is_empty() {
            return Err(RecipeError::NoFibers);
        }

        let actual = percent_sum(shares);
        if !within_tolerance(actual) {
            return Err(RecipeError::PercentSumMismatch { actual });
        }

        let mut cleaned = Vec::with_capacity(shares.len());
        for share in shares {
            let fiber = share.name.trim();
            if fiber.is_empty() {
                return Err(RecipeError::EmptyFiberName);
            }
            if !is_storable(fiber, FIBER_NAME_RESERVED) {
                return Err(RecipeError::ReservedCharInFiberName {
                    fiber: fiber.to_string(),
                });
            }
            if share.percentage < 0.0 {
                return Err(RecipeError::NegativePercent {
                    fiber: fiber.to_string(),
                });
            }
            cleaned.push(FiberShare::new(fiber, share.percentage));
        }

        Ok(self.upsert(name, cleaned))
    }

    /// Take a recipe out of the store, returning it if it was there.
    pub fn remove(&mut self, name: &str) -> Option<YarnRecipe> {
        let index = self.recipes.iter().position(|recipe| recipe.name == name)?;
        Some(self.recipes.remove(index))
    }

    /// Exact-name lookup.
    pub fn get(&self, name: &str) -> Option<&YarnRecipe> {
        self.recipes.iter().find(|recipe| recipe.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Recipe names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.recipes.iter().map(|recipe| recipe.name.as_str())
    }

    /// Recipes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &YarnRecipe> + '_ {
        self.recipes.iter()
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
