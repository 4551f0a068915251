//! Registry of marker names.

use std::collections::HashMap;

use crate::error::{Result, Su2Error};

/// Ordered registry of unique names.
///
/// Names keep their registration order and map back to their position, so a
/// marker can be addressed either by index or by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    /// Names in registration order.
    names: Vec<String>,
    /// Map from name -> position in `names`.
    index: HashMap<String, usize>,
}

impl Registry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty registry with room for `capacity` names.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            names: Vec::with_capacity(capacity),
            index: HashMap::with_capacity(capacity),
        }
    }

    /// Registers a name and returns its position.
    ///
    /// Returns an error if the name is already registered; `line` is the source
    /// line reported in that error.
    pub fn register(&mut self, name: impl Into<String>, line: usize) -> Result<usize> {
        let name = name.into();

        if self.index.contains_key(&name) {
            return Err(Su2Error::DuplicateMarkerName { line, name });
        }

        let position = self.names.len();
        self.index.insert(name.clone(), position);
        self.names.push(name);
        Ok(position)
    }

    /// Returns the position of a name.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Returns an iterator over names in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Returns the number of registered names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_register_keeps_order() {
        let mut registry = Registry::new();
        assert_eq!(registry.register("outlet", 1).unwrap(), 0);
        assert_eq!(registry.register("inlet", 2).unwrap(), 1);
        assert_eq!(registry.register("wall", 3).unwrap(), 2);

        let names: Vec<&str> = registry.iter().collect();
        assert_eq!(names, vec!["outlet", "inlet", "wall"]);
        assert_eq!(registry.position("wall"), Some(2));
        assert_eq!(registry.position("inlet"), Some(1));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut registry = Registry::new();
        registry.register("inlet", 4).unwrap();
        let err = registry.register("inlet", 9).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateMarkerName);
        assert_eq!(err.line(), Some(9));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut registry = Registry::new();
        registry.register("Wall", 1).unwrap();
        assert!(registry.register("wall", 2).is_ok());
        assert_eq!(registry.position("WALL"), None);
    }

    #[test]
    fn test_missing_lookups() {
        let registry = Registry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.position("farfield"), None);
    }
}
