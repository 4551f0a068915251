//! Mesh assembler.
//!
//! Turns a [`RawMesh`] into the read-only [`VolumeMesh`] and
//! [`BoundaryCollection`] pair. Every connectivity index is bounds-checked and
//! every element type is checked against the file's dimensionality. Records
//! are visited in file order, so the reported defect is the first one in the
//! file.

use std::sync::Arc;

use glam::DVec3;
use su2mesh_core::{MeshStructure, Result, Su2Error};
use su2mesh_structures::{BoundaryCollection, Element, Marker, VolumeMesh, MAX_VERTICES};

use crate::records::{RawElement, RawMesh};

/// Name given to the assembled volume mesh.
pub const VOLUME_MESH_NAME: &str = "Volume Mesh";

/// Resolves an element's indices against a table of `num_points` points.
fn connect(raw: &RawElement, num_points: usize) -> Result<Element> {
    let mut indices = [0u32; MAX_VERTICES];
    for (slot, &index) in indices.iter_mut().zip(&raw.vertices) {
        *slot = usize::try_from(index)
            .ok()
            .filter(|&i| i < num_points)
            .and_then(|i| u32::try_from(i).ok())
            .ok_or(Su2Error::DanglingVertexReference {
                line: raw.line,
                index,
                num_points,
            })?;
    }

    let used = raw.vertices.len().min(MAX_VERTICES);
    Element::new(raw.element_type, &indices[..used]).ok_or_else(|| Su2Error::MalformedToken {
        line: raw.line,
        token: raw.element_type.su2_code().to_string(),
        reason: format!(
            "{} element expects {} point indices, found {}",
            raw.element_type,
            raw.element_type.num_vertices(),
            raw.vertices.len()
        ),
    })
}

/// Assembles the volume mesh and its boundary markers.
pub fn assemble(raw: RawMesh) -> Result<(VolumeMesh, BoundaryCollection)> {
    let dimension = raw.dimension;
    let num_points = raw.points.len();

    let mut elements = Vec::with_capacity(raw.elements.len());
    for element in &raw.elements {
        let connected = connect(element, num_points)?;
        if !element.element_type.is_volume_element_of(dimension) {
            return Err(Su2Error::DimensionTypeMismatch {
                line: element.line,
                element_type: element.element_type,
                dimension,
            });
        }
        elements.push(connected);
    }

    let points: Arc<[DVec3]> = raw.points.into();
    let volume = VolumeMesh::new(VOLUME_MESH_NAME, dimension, Arc::clone(&points), elements);

    let mut boundaries = BoundaryCollection::new(dimension, points);
    for marker in raw.markers {
        let mut elements = Vec::with_capacity(marker.elements.len());
        for element in &marker.elements {
            let connected = connect(element, num_points)?;
            if !element.element_type.is_boundary_element_of(dimension) {
                return Err(Su2Error::MarkerDimensionMismatch {
                    line: element.line,
                    marker: marker.name.clone(),
                    element_type: element.element_type,
                    dimension,
                });
            }
            elements.push(connected);
        }
        boundaries.push(Marker::new(marker.name, elements), marker.line)?;
    }

    log::debug!(
        "assembled {} points, {} volume elements, {} markers",
        volume.num_points(),
        volume.num_elements(),
        boundaries.len()
    );
    Ok((volume, boundaries))
}
