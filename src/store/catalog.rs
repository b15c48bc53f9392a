use std::collections::BTreeSet;

/// Known fiber names, kept sorted for selection lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FiberCatalog {
    names: BTreeSet<String>,
}

impl FiberCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a fiber name. Surrounding whitespace is dropped and blank names
    /// are ignored. Returns `true` only when the name was not known yet;
    /// adding a duplicate is a silent no-op.
    pub fn add(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        self.names.insert(name.to_string())
    }

    /// Returns `true` if the name was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    /// Exact string match, no normalization.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Names in lexicographic order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for FiberCatalog {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut catalog = FiberCatalog::new();
        for name in iter {
            catalog.add(name.as_ref());
        }
        catalog
    }
}
