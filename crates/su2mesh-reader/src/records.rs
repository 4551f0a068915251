//! Raw parsed records.
//!
//! The parser checks syntax and counts only. Indices are kept as written
//! (signed, unchecked) so that the assembler can report dangling references
//! with the offending value and line.

use glam::DVec3;
use su2mesh_core::{Dimension, ElementType};

/// One element record: type, point indices as written, source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawElement {
    pub element_type: ElementType,
    pub vertices: Vec<i64>,
    pub line: usize,
}

/// One marker block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawMarker {
    pub name: String,
    /// Line of the `MARKER_TAG=` keyword.
    pub line: usize,
    pub elements: Vec<RawElement>,
}

/// Everything the parser read from one file, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawMesh {
    pub dimension: Dimension,
    /// Points widened to 3 components; `z == 0` for 2-D files.
    pub points: Vec<DVec3>,
    /// Second `NPOIN=` value of partitioned files, when present.
    pub domain_points: Option<usize>,
    pub elements: Vec<RawElement>,
    pub markers: Vec<RawMarker>,
}

impl RawMesh {
    /// Creates an empty record set for a file of the given dimension.
    pub fn new(dimension: Dimension) -> Self {
        Self {
            dimension,
            points: Vec::new(),
            domain_points: None,
            elements: Vec::new(),
            markers: Vec::new(),
        }
    }
}
