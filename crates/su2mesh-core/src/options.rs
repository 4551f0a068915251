//! Configuration options for the SU2 reader.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Options controlling how an SU2 file is read and handed to the host.
///
/// Options are plain data and can be round-tripped through JSON:
///
/// ```
/// use su2mesh_core::{IdColumnPolicy, ReaderOptions};
///
/// let options = ReaderOptions::from_json_str(r#"{ "id_column": "Validate" }"#).unwrap();
/// assert_eq!(options.id_column, IdColumnPolicy::Validate);
/// assert!(options.compact_boundaries);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReaderOptions {
    /// What to do with the optional trailing id column on point and element records.
    pub id_column: IdColumnPolicy,

    /// Which section layouts are accepted.
    pub section_order: SectionOrder,

    /// Whether the host adapter builds compacted per-marker boundary patches.
    pub compact_boundaries: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            id_column: IdColumnPolicy::Ignore,
            section_order: SectionOrder::Strict,
            compact_boundaries: true,
        }
    }
}

impl ReaderOptions {
    /// Parses options from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&contents)?;
        log::debug!("loaded reader options from {}", path.display());
        Ok(options)
    }

    /// Serializes options to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Sets the id column policy.
    #[must_use]
    pub fn with_id_column(mut self, policy: IdColumnPolicy) -> Self {
        self.id_column = policy;
        self
    }

    /// Sets the accepted section order.
    #[must_use]
    pub fn with_section_order(mut self, order: SectionOrder) -> Self {
        self.section_order = order;
        self
    }

    /// Sets whether boundary patches are compacted.
    #[must_use]
    pub fn with_compact_boundaries(mut self, compact: bool) -> Self {
        self.compact_boundaries = compact;
        self
    }
}

/// Handling of the trailing id column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum IdColumnPolicy {
    /// Accept and discard the id. Position in the file defines identity.
    #[default]
    Ignore,
    /// Require the id to equal the record's 0-based position within its block.
    Validate,
}

/// Accepted ordering of the top-level sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SectionOrder {
    /// `NDIME`, `NPOIN`, `NELEM`, `NMARK`, in that order.
    #[default]
    Strict,
    /// Also accept `NELEM` before `NPOIN`, the layout SU2 itself writes.
    ElementsFirst,
}
