//! Application state shared by every command: the data file locations plus
//! the recipe store and fiber catalog loaded from them. Mutations persist
//! synchronously right after the in-memory change.

use anyhow::{anyhow, bail, Context, Result};
use tracing::{info, warn};

use crate::codec::{is_storable, CATALOG_NAME_RESERVED};
use crate::error::RecipeError;
use crate::models::{FiberShare, YarnEntry};
use crate::store::{DataFiles, FiberCatalog, RecipeStore};

/// One yarn of a batch as the user describes it: either spelled out or by
/// naming a saved recipe.
#[derive(Debug, Clone, PartialEq)]
pub enum YarnSource {
    Inline { grams: f64, shares: Vec<FiberShare> },
    Recipe { grams: f64, name: String },
}

/// Whether a save created a new recipe or replaced one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Created,
    Overwritten,
}

/// Everything a command works on: where the data lives plus the recipes and
/// fibers loaded from there.
pub struct App {
    files: DataFiles,
    recipes: RecipeStore,
    catalog: FiberCatalog,
}

impl App {
    pub fn new(files: DataFiles, recipes: RecipeStore, catalog: FiberCatalog) -> Self {
        Self {
            files,
            recipes,
            catalog,
        }
    }

    /// Seed missing data files, then load both collections.
    pub fn load(files: DataFiles) -> Result<Self> {
        files
            .ensure_seed_files()
            .context("failed to write default data files")?;
        let recipes = files.load_recipes();
        let catalog = files.load_catalog();
        info!(
            recipes = recipes.len(),
            fibers = catalog.len(),
            "data loaded"
        );
        Ok(Self::new(files, recipes, catalog))
    }

    pub fn recipes(&self) -> &RecipeStore {
        &self.recipes
    }

    pub fn catalog(&self) -> &FiberCatalog {
        &self.catalog
    }

    /// Turn user-described yarns into batch entries, resolving recipe names.
    pub fn batch_entries(&self, yarns: &[YarnSource]) -> Result<Vec<YarnEntry>> {
        yarns
            .iter()
            .map(|yarn| match yarn {
                YarnSource::Inline { grams, shares } => Ok(YarnEntry::new(*grams, shares.clone())),
                YarnSource::Recipe { grams, name } => self
                    .recipes
                    .get(name)
                    .map(|recipe| YarnEntry::from_recipe(*grams, recipe))
                    .ok_or_else(|| anyhow!("Recipe '{name}' not found")),
            })
            .collect()
    }

    /// Save a recipe. Replacing an existing one requires `overwrite`.
    pub fn save_recipe(
        &mut self,
        name: &str,
        shares: &[FiberShare],
        overwrite: bool,
    ) -> Result<SaveOutcome> {
        let trimmed = name.trim();
        if self.recipes.contains(trimmed) && !overwrite {
            bail!("Recipe '{trimmed}' already exists. Use --force to overwrite.");
        }

        let replaced = self
            .recipes
            .save_checked(trimmed, shares)
            .map_err(|err: RecipeError| anyhow!("Cannot save recipe: {err}"))?;
        self.persist_recipes()?;

        info!(recipe = trimmed, replaced, "recipe saved");
        Ok(if replaced {
            SaveOutcome::Overwritten
        } else {
            SaveOutcome::Created
        })
    }

    pub fn delete_recipe(&mut self, name: &str) -> Result<()> {
        if self.recipes.remove(name).is_none() {
            return Err(anyhow!("Recipe '{name}' not found"));
        }
        self.persist_recipes()?;
        info!(recipe = name, "recipe deleted");
        Ok(())
    }

    /// Returns `false` if the fiber was already known; nothing is written then.
    /// Names with a quote or a comma are refused.
    pub fn add_fiber(&mut self, name: &str) -> Result<bool> {
        if !is_storable(name, CATALOG_NAME_RESERVED) {
            bail!("Fiber name '{}' must not contain '\"' or ','", name.trim());
        }
        if !self.catalog.add(name) {
            return Ok(false);
        }
        self.persist_catalog()?;
        info!(fiber = name.trim(), "fiber added");
        Ok(true)
    }

    /// Returns `false` if the fiber was not in the catalog.
    pub fn remove_fiber(&mut self, name: &str) -> Result<bool> {
        if !self.catalog.remove(name) {
            return Ok(false);
        }
        self.persist_catalog()?;
        info!(fiber = name, "fiber removed");
        Ok(true)
    }

    fn persist_recipes(&self) -> Result<()> {
        self.files.save_recipes(&self.recipes).map_err(|err| {
            warn!(error = %err, "saving recipes failed");
            anyhow::Error::new(err).context("failed to save recipes")
        })
    }

    fn persist_catalog(&self) -> Result<()> {
        self.files.save_catalog(&self.catalog).map_err(|err| {
            warn!(error = %err, "saving fiber catalog failed");
            anyhow::Error::new(err).context("failed to save fiber catalog")
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn load_app(dir: &TempDir) -> App {
        App::load(DataFiles::in_dir(dir.path())).unwrap()
    }

    #[test]
    fn recipe_sources_resolve_against_store() {
        let dir = TempDir::new().unwrap();
        let app = load_app(&dir);
        let entries = app
            .batch_entries(&[YarnSource::Recipe {
                grams: 50.0,
                name: "Sock Yarn Classic".to_string(),
            }])
            .unwrap();
        assert_eq!(entries[0].grams, 50.0);
        assert_eq!(entries[0].shares.len(), 2);

        let missing = app.batch_entries(&[YarnSource::Recipe {
            grams: 50.0,
            name: "Nope".to_string(),
        }]);
        assert!(missing.is_err());
    }

    #[test]
    fn save_refuses_silent_overwrite_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut app = load_app(&dir);
        let shares = [FiberShare::new("Silk", 100.0)];

        assert_eq!(app.save_recipe("Lace", &shares, false).unwrap(), SaveOutcome::Created);
        assert!(app.save_recipe("Lace", &shares, false).is_err());
        assert_eq!(
            app.save_recipe("Lace", &shares, true).unwrap(),
            SaveOutcome::Overwritten
        );

        let reloaded = load_app(&dir);
        assert!(reloaded.recipes().contains("Lace"));
    }

    #[test]
    fn fiber_changes_persist() {
        let dir = TempDir::new().unwrap();
        let mut app = load_app(&dir);
        assert!(app.add_fiber("Mohair").unwrap());
        assert!(!app.add_fiber("Mohair").unwrap());
        assert!(app.remove_fiber("Silk").unwrap());
        assert!(!app.remove_fiber("Silk").unwrap());

        let reloaded = load_app(&dir);
        assert!(reloaded.catalog().contains("Mohair"));
        assert!(!reloaded.catalog().contains("Silk"));
    }

    #[test]
    fn quoted_names_are_refused_and_later_recipes_survive_reload() {
        let dir = TempDir::new().unwrap();
        let mut app = load_app(&dir);
        let silk = [FiberShare::new("Silk", 100.0)];

        assert!(app.save_recipe("12\" scarf", &silk, false).is_err());
        assert!(app
            .save_recipe("Shawl", &[FiberShare::new("Wool \"x", 100.0)], false)
            .is_err());
        app.save_recipe("Lace", &silk, false).unwrap();

        assert!(app.add_fiber("Wool \"fine\"").is_err());
        assert!(app.add_fiber("Wool, fine").is_err());

        let reloaded = load_app(&dir);
        assert_eq!(
            reloaded.recipes().names().collect::<Vec<_>>(),
            ["Sock Yarn Classic", "Lace"]
        );
        assert_eq!(reloaded.catalog().len(), 6);
    }

    #[test]
    fn deleting_unknown_recipe_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mut app = load_app(&dir);
        assert!(app.delete_recipe("Nope").is_err());
        app.delete_recipe("Sock Yarn Classic").unwrap();
        assert!(load_app(&dir).recipes().is_empty());
    }
}
