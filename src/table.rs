use crate::config::PathMapping;
use std::collections::HashMap;

/// Exact-path lookup from request path to redirect target.
///
/// Built once, then only read. Inserting a path that is already present replaces its target.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MappingTable {
    urls: HashMap<String, String>,
}

impl MappingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the redirect target for `path`, which must match a configured path byte-for-byte.
    pub fn resolve(&self, path: &str) -> Option<&str> {
        self.urls.get(path).map(String::as_str)
    }

    pub fn insert(&mut self, mapping: PathMapping) {
        let PathMapping { path, url } = mapping;
        self.urls.insert(path, url);
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

impl From<HashMap<String, String>> for MappingTable {
    fn from(urls: HashMap<String, String>) -> Self {
        Self { urls }
    }
}

impl<const N: usize> From<[(&str, &str); N]> for MappingTable {
    fn from(pairs: [(&str, &str); N]) -> Self {
        pairs
            .into_iter()
            .map(|(path, url)| PathMapping::new(path, url))
            .collect()
    }
}

impl From<Vec<PathMapping>> for MappingTable {
    fn from(mappings: Vec<PathMapping>) -> Self {
        mappings.into_iter().collect()
    }
}

impl FromIterator<PathMapping> for MappingTable {
    fn from_iter<I: IntoIterator<Item = PathMapping>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl Extend<PathMapping> for MappingTable {
    fn extend<I: IntoIterator<Item = PathMapping>>(&mut self, iter: I) {
        for mapping in iter {
            self.insert(mapping);
        }
    }
}
