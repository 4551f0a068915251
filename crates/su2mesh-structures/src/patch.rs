//! Compacted boundary patch.

use glam::DVec3;
use su2mesh_core::{Dimension, MeshStructure};

use crate::element::Element;

/// One marker's elements over a private, compacted point table.
///
/// This is the per-marker dataset a visualization host displays. Local point
/// `i` is global point `global_indices()[i]` of the volume mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryPatch {
    name: String,
    dimension: Dimension,
    points: Vec<DVec3>,
    global_indices: Vec<u32>,
    elements: Vec<Element>,
}

impl BoundaryPatch {
    pub(crate) fn new(
        name: String,
        dimension: Dimension,
        points: Vec<DVec3>,
        global_indices: Vec<u32>,
        elements: Vec<Element>,
    ) -> Self {
        Self {
            name,
            dimension,
            points,
            global_indices,
            elements,
        }
    }

    /// Returns the global (volume mesh) index of every local point.
    pub fn global_indices(&self) -> &[u32] {
        &self.global_indices
    }

    /// Returns the global index of one local point.
    pub fn global_index(&self, local: usize) -> Option<u32> {
        self.global_indices.get(local).copied()
    }

    /// Returns the elements, with local connectivity.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns `(vtk_cell_type, local connectivity)` for every element.
    pub fn vtk_cells(&self) -> impl Iterator<Item = (u8, &[u32])> + '_ {
        self.elements
            .iter()
            .map(|e| (e.element_type().vtk_cell_type(), e.vertices()))
    }
}

impl MeshStructure for BoundaryPatch {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "BoundaryPatch"
    }

    fn dimension(&self) -> Dimension {
        self.dimension
    }

    fn points(&self) -> &[DVec3] {
        &self.points
    }

    fn num_elements(&self) -> usize {
        self.elements.len()
    }
}
