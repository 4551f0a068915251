//! Volume mesh structure.
//!
//! # Overview
//!
//! `VolumeMesh` holds the full point table of an SU2 file and every volume
//! element, both in file order. Mixed element types are supported: triangles
//! and quadrilaterals in 2-D, tetrahedra, hexahedra, prisms and pyramids in 3-D.
//!
//! The point table is reference counted. The [`BoundaryCollection`] built from
//! the same file shares it, so boundary elements index into these points
//! instead of carrying coordinates of their own.
//!
//! [`BoundaryCollection`]: crate::BoundaryCollection
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use glam::DVec3;
//! use su2mesh_core::{Dimension, ElementType, MeshStructure};
//! use su2mesh_structures::{Element, VolumeMesh};
//!
//! let points: Arc<[DVec3]> = vec![
//!     DVec3::new(0.0, 0.0, 0.0),
//!     DVec3::new(1.0, 0.0, 0.0),
//!     DVec3::new(0.0, 1.0, 0.0),
//! ]
//! .into();
//! let tri = Element::new(ElementType::Triangle, &[0, 1, 2]).unwrap();
//! let mesh = VolumeMesh::new("volume", Dimension::Two, points, vec![tri]);
//!
//! assert_eq!(mesh.num_points(), 3);
//! assert_eq!(mesh.coordinates(1), Some(vec![1.0, 0.0]));
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use glam::DVec3;
use su2mesh_core::{Dimension, MeshStructure};

use crate::element::Element;

/// The full volume mesh: point table plus volume elements.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeMesh {
    name: String,
    dimension: Dimension,
    points: Arc<[DVec3]>,
    elements: Vec<Element>,
}

impl VolumeMesh {
    /// Creates a volume mesh from an assembled point table and elements.
    pub fn new(
        name: impl Into<String>,
        dimension: Dimension,
        points: Arc<[DVec3]>,
        elements: Vec<Element>,
    ) -> Self {
        Self {
            name: name.into(),
            dimension,
            points,
            elements,
        }
    }

    /// Returns the dimensionality declared by the file.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Returns a shared handle to the point table.
    pub fn shared_points(&self) -> Arc<[DVec3]> {
        Arc::clone(&self.points)
    }

    /// Returns the position of a point. 2-D points have `z == 0`.
    pub fn point(&self, index: usize) -> Option<DVec3> {
        self.points.get(index).copied()
    }

    /// Returns the coordinates of a point as written in the file (2 or 3 values).
    pub fn coordinates(&self, index: usize) -> Option<Vec<f64>> {
        let ndime = self.dimension.ndime();
        self.point(index).map(|p| p.to_array()[..ndime].to_vec())
    }

    /// Returns the elements, in file order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns one element.
    pub fn element(&self, index: usize) -> Option<&Element> {
        self.elements.get(index)
    }

    /// Returns the number of elements of each type.
    pub fn element_type_counts(&self) -> BTreeMap<&'static str, usize> {
        let mut counts = BTreeMap::new();
        for element in &self.elements {
            *counts.entry(element.element_type().name()).or_insert(0) += 1;
        }
        counts
    }

    /// Returns `(vtk_cell_type, connectivity)` for every element, in file order.
    pub fn vtk_cells(&self) -> impl Iterator<Item = (u8, &[u32])> + '_ {
        self.elements
            .iter()
            .map(|e| (e.element_type().vtk_cell_type(), e.vertices()))
    }
}

impl MeshStructure for VolumeMesh {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        "VolumeMesh"
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
