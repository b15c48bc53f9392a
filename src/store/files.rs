use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::{debug, info, warn};

use super::{FiberCatalog, RecipeStore};
use crate::codec::{decode_catalog, decode_recipes, encode_catalog, encode_recipes};
use crate::error::StoreError;
use crate::models::FiberShare;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".yarn-blend";
/// Saved recipes.
pub const RECIPES_FILE_NAME: &str = "yarns.json";
/// Known fiber names.
pub const CATALOG_FILE_NAME: &str = "fibers.json";

/// Recipe written on first run.
const SEED_RECIPE: (&str, &[(&str, f64)]) =
    ("Sock Yarn Classic", &[("Virgin Wool", 75.0), ("Polyamide", 25.0)]);
/// Fibers written on first run.
const SEED_FIBERS: &[&str] = &[
    "Cotton",
    "Virgin Wool",
    "Polyacrylic",
    "Polyamide",
    "Silk",
    "Cashmere",
];

/// Resolve `<home>/.yarn-blend`.
pub fn default_data_dir() -> Result<PathBuf, StoreError> {
    let base_dirs = BaseDirs::new().ok_or(StoreError::DataDir)?;
    Ok(base_dirs.home_dir().join(DATA_DIR_NAME))
}

/// Locations of the two data files. Every save rewrites the whole file; there
/// is no locking, so only one process should write at a time.
#[derive(Debug, Clone)]
pub struct DataFiles {
    pub recipes_path: PathBuf,
    pub catalog_path: PathBuf,
}

impl DataFiles {
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            recipes_path: dir.join(RECIPES_FILE_NAME),
            catalog_path: dir.join(CATALOG_FILE_NAME),
        }
    }

    /// Write the seed recipe and seed catalog for whichever file does not
    /// exist yet. Existing files are never touched.
    pub fn ensure_seed_files(&self) -> Result<(), StoreError> {
        if !self.recipes_path.exists() {
            let mut store = RecipeStore::new();
            let (name, fibers) = SEED_RECIPE;
            store.upsert(
                name,
                fibers
                    .iter()
                    .map(|(fiber, pct)| FiberShare::new(*fiber, *pct))
                    .collect(),
            );
            self.save_recipes(&store)?;
            info!(path = %self.recipes_path.display(), "seeded recipe file");
        }

        if !self.catalog_path.exists() {
            let catalog: FiberCatalog = SEED_FIBERS.iter().copied().collect();
            self.save_catalog(&catalog)?;
            info!(path = %self.catalog_path.display(), "seeded fiber catalog");
        }

        Ok(())
    }

    /// Load recipes; a missing or unreadable file gives an empty store.
    pub fn load_recipes(&self) -> RecipeStore {
        match read_optional(&self.recipes_path) {
            Some(text) => {
                let store = decode_recipes(&text);
                debug!(recipes = store.len(), "loaded recipes");
                store
            }
            None => RecipeStore::new(),
        }
    }

    /// Load the catalog; a missing or unreadable file gives an empty catalog.
    pub fn load_catalog(&self) -> FiberCatalog {
        match read_optional(&self.catalog_path) {
            Some(text) => {
                let catalog = decode_catalog(&text);
                debug!(fibers = catalog.len(), "loaded fiber catalog");
                catalog
            }
            None => FiberCatalog::new(),
        }
    }

    pub fn save_recipes(&self, store: &RecipeStore) -> Result<(), StoreError> {
        write_file(&self.recipes_path, &encode_recipes(store))?;
        debug!(recipes = store.len(), "saved recipes");
        Ok(())
    }

    pub fn save_catalog(&self, catalog: &FiberCatalog) -> Result<(), StoreError> {
        write_file(&self.catalog_path, &encode_catalog(catalog))?;
        debug!(fibers = catalog.len(), "saved fiber catalog");
        Ok(())
    }
}

fn read_optional(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "data file missing");
            None
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "could not read data file");
            None
        }
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|err| StoreError::io(parent, err))?;
    }
    fs::write(path, contents).map_err(|err| StoreError::io(path, err))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn seeds_missing_files_once() {
        let dir = TempDir::new().unwrap();
        let files = DataFiles::in_dir(dir.path());
        files.ensure_seed_files().unwrap();

        let store = files.load_recipes();
        let recipe = store.get("Sock Yarn Classic").unwrap();
        assert_eq!(recipe.shares.len(), 2);
        assert_eq!(recipe.shares[0], FiberShare::new("Virgin Wool", 75.0));
        assert_eq!(files.load_catalog().len(), 6);

        fs::write(&files.catalog_path, "[ \"Yak\" ]").unwrap();
        files.ensure_seed_files().unwrap();
        assert_eq!(files.load_catalog().names().collect::<Vec<_>>(), ["Yak"]);
    }

    #[test]
    fn missing_files_load_empty() {
        let dir = TempDir::new().unwrap();
        let files = DataFiles::in_dir(dir.path().join("nested"));
        assert!(files.load_recipes().is_empty());
        assert!(files.load_catalog().is_empty());
    }

    #[test]
    fn save_creates_parent_directory() {
        let dir = TempDir::new().unwrap();
        let files = DataFiles::in_dir(dir.path().join("a").join("b"));
        let mut catalog = FiberCatalog::new();
        catalog.add("Mohair");
        files.save_catalog(&catalog).unwrap();
        assert_eq!(files.load_catalog(), catalog);
    }
}
