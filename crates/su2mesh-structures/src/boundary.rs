//! Boundary markers and the marker collection.

use std::collections::BTreeSet;
use std::sync::Arc;

use glam::DVec3;
use su2mesh_core::{Dimension, Registry, Result};

use crate::element::Element;
use crate::patch::BoundaryPatch;

/// A named group of boundary elements (a wall, an inlet, a far field).
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    name: String,
    elements: Vec<Element>,
}

impl Marker {
    /// Creates a marker.
    pub fn new(name: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            name: name.into(),
            elements,
        }
    }

    /// Returns the marker tag.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the boundary elements, in file order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Returns the number of boundary elements.
    pub fn num_elements(&self) -> usize {
        self.elements.len()
    }

    /// Returns true if the marker holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Returns the distinct point indices used by this marker, ascending.
    pub fn point_indices(&self) -> Vec<u32> {
        let used: BTreeSet<u32> = self
            .elements
            .iter()
            .flat_map(|e| e.vertices().iter().copied())
            .collect();
        used.into_iter().collect()
    }

    /// Builds a self-contained patch holding only the points this marker touches.
    ///
    /// Local points follow ascending global index; connectivity is remapped to
    /// local indices. Returns `None` for a marker without elements, or one that
    /// references points outside `points`.
    pub fn compact(&self, dimension: Dimension, points: &[DVec3]) -> Option<BoundaryPatch> {
        if self.elements.is_empty() {
            return None;
        }

        let global_indices = self.point_indices();
        let local_points = global_indices
            .iter()
            .map(|&g| points.get(g as usize).copied())
            .collect::<Option<Vec<_>>>()?;
        let elements = self
            .elements
            .iter()
            .map(|e| {
                e.remapped(|g| {
                    // Every vertex is in `global_indices` by construction.
                    global_indices.binary_search(&g).unwrap_or_default() as u32
                })
            })
            .collect();

        log::trace!(
            "compacted marker '{}': {} elements over {} points",
            self.name,
            self.elements.len(),
            global_indices.len()
        );

        Some(BoundaryPatch::new(
            format!("marker:{}", self.name),
            dimension,
            local_points,
            global_indices,
            elements,
        ))
    }
}

/// Boundary markers of one file, in declaration order.
///
/// Markers share the volume mesh's point table; they are addressable by
/// position or by tag.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryCollection {
    dimension: Dimension,
    points: Arc<[DVec3]>,
    markers: Vec<Marker>,
    registry: Registry,
}

impl BoundaryCollection {
    /// Creates an empty collection over a shared point table.
    pub fn new(dimension: Dimension, points: Arc<[DVec3]>) -> Self {
        Self {
            dimension,
            points,
            markers: Vec::new(),
            registry: Registry::new(),
        }
    }

    /// Appends a marker and returns its position.
    ///
    /// Returns an error if a marker with the same tag already exists; `line` is
    /// the source line reported in that error.
    pub fn push(&mut self, marker: Marker, line: usize) -> Result<usize> {
        let position = self.registry.register(marker.name(), line)?;
        self.markers.push(marker);
        Ok(position)
    }

    /// Returns the dimensionality of the volume these markers bound.
    pub fn dimension(&self) -> Dimension {
        self.dimension
    }

    /// Returns the shared point table.
    pub fn points(&self) -> &[DVec3] {
        &self.points
    }

    /// Returns a shared handle to the point table.
    pub fn shared_points(&self) -> Arc<[DVec3]> {
        Arc::clone(&self.points)
    }

    /// Returns the markers, in declaration order.
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// Returns the marker at a position.
    pub fn marker(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    /// Returns the marker with the given tag.
    pub fn get(&self, name: &str) -> Option<&Marker> {
        self.registry.position(name).map(|i| &self.markers[i])
    }

    /// Returns the position of the marker with the given tag.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.registry.position(name)
    }

    /// Returns the marker tags, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.registry.iter()
    }

    /// Returns an iterator over markers.
    pub fn iter(&self) -> std::slice::Iter<'_, Marker> {
        self.markers.iter()
    }

    /// Returns the number of markers.
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    /// Returns true if there are no markers.
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Returns the total number of boundary elements over all markers.
    pub fn num_elements(&self) -> usize {
        self.markers.iter().map(Marker::num_elements).sum()
    }

    /// Returns the positions of the points of one boundary element.
    pub fn element_points(&self, marker: usize, element: usize) -> Option<Vec<DVec3>> {
        let element = self.markers.get(marker)?.elements().get(element)?;
        element
            .vertices()
            .iter()
            .map(|&v| self.points.get(v as usize).copied())
            .collect()
    }

    /// Builds one compacted patch per non-empty marker, in declaration order.
    pub fn compact(&self) -> Vec<BoundaryPatch> {
        self.markers
            .iter()
            .filter_map(|m| m.compact(self.dimension, &self.points))
            .collect()
    }
}

impl<'a> IntoIterator for &'a BoundaryCollection {
    type Item = &'a Marker;
    type IntoIter = std::slice::Iter<'a, Marker>;

    fn into_iter(self) -> Self::IntoIter {
        self.markers.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use su2mesh_core::{ElementType, ErrorKind, MeshStructure};

    fn square_points() -> Arc<[DVec3]> {
        vec![
            DVec3::new(0.0, 0.0, 0.0),
            DVec3::new(1.0, 0.0, 0.0),
            DVec3::new(1.0, 1.0, 0.0),
            DVec3::new(0.0, 1.0, 0.0),
        ]
        .into()
    }

    fn line(a: u32, b: u32) -> Element {
        Element::new(ElementType::Line, &[a, b]).unwrap()
    }

    #[test]
    fn test_lookup_by_name_and_index() {
        let mut boundaries = BoundaryCollection::new(Dimension::Two, square_points());
        boundaries
            .push(Marker::new("lower", vec![line(0, 1)]), 10)
            .unwrap();
        boundaries
            .push(Marker::new("upper", vec![line(2, 3)]), 13)
            .unwrap();

        assert_eq!(boundaries.len(), 2);
        assert_eq!(boundaries.marker(1).unwrap().name(), "upper");
        assert_eq!(boundaries.get("lower").unwrap().num_elements(), 1);
        assert_eq!(boundaries.position("upper"), Some(1));
        assert!(boundaries.get("side").is_none());
        assert_eq!(boundaries.names().collect::<Vec<_>>(), vec!["lower", "upper"]);
        assert_eq!(boundaries.num_elements(), 2);
    }

    #[test]
    fn test_duplicate_tag_rejected() {
        let mut boundaries = BoundaryCollection::new(Dimension::Two, square_points());
        boundaries.push(Marker::new("inlet", vec![]), 5).unwrap();
        let err = boundaries
            .push(Marker::new("inlet", vec![line(0, 1)]), 8)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateMarkerName);
        assert_eq!(boundaries.len(), 1);
    }

    #[test]
    fn test_element_points_follow_shared_table() {
        let mut boundaries = BoundaryCollection::new(Dimension::Two, square_points());
        boundaries
            .push(Marker::new("right", vec![line(1, 2)]), 1)
            .unwrap();

        let pts = boundaries.element_points(0, 0).unwrap();
        assert_eq!(pts, vec![DVec3::new(1.0, 0.0, 0.0), DVec3::new(1.0, 1.0, 0.0)]);
        assert!(boundaries.element_points(0, 1).is_none());
        assert!(boundaries.element_points(1, 0).is_none());
    }

    #[test]
    fn test_compact_remaps_to_local_points() {
        let points = square_points();
        let marker = Marker::new("top", vec![line(3, 2)]);
        let patch = marker.compact(Dimension::Two, &points).unwrap();

        assert_eq!(patch.name(), "marker:top");
        assert_eq!(patch.global_indices(), &[2, 3]);
        assert_eq!(patch.points(), &[points[2], points[3]]);
        // (3, 2) becomes (1, 0) against the sorted local table.
        assert_eq!(patch.elements()[0].vertices(), &[1, 0]);
    }

    #[test]
    fn test_empty_marker_has_no_patch() {
        let mut boundaries = BoundaryCollection::new(Dimension::Two, square_points());
        boundaries.push(Marker::new("unused", vec![]), 1).unwrap();
        boundaries
            .push(Marker::new("wall", vec![line(0, 1), line(1, 2)]), 3)
            .unwrap();

        let patches = boundaries.compact();
        assert_eq!(patches.len(), 1);
        assert_eq!(patches[0].name(), "marker:wall");
        assert_eq!(patches[0].num_points(), 3);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn lines(num_points: u32) -> impl Strategy<Value = Vec<Element>> {
            prop::collection::vec((0..num_points, 0..num_points), 1..20)
                .prop_map(|pairs| pairs.into_iter().map(|(a, b)| line(a, b)).collect())
        }

        proptest! {
            #[test]
            fn prop_compact_preserves_geometry(elements in lines(12)) {
                let points: Vec<DVec3> = (0..12).map(|i| DVec3::new(f64::from(i), 1.0, 0.0)).collect();
                let marker = Marker::new("edge", elements);
                let patch = marker.compact(Dimension::Two, &points).unwrap();

                prop_assert!(patch.global_indices().windows(2).all(|w| w[0] < w[1]));
                prop_assert_eq!(patch.num_points(), marker.point_indices().len());
                for (local, global) in patch.elements().iter().zip(marker.elements()) {
                    for (&l, &g) in local.vertices().iter().zip(global.vertices()) {
                        prop_assert_eq!(patch.points()[l as usize], points[g as usize]);
                    }
                }
            }
        }
    }
}
