//! Element connectivity record.

use su2mesh_core::ElementType;

/// Marker for connectivity slots past the element's vertex count.
pub const UNUSED_SLOT: u32 = u32::MAX;

/// Largest vertex count in the SU2 element table (hexahedron).
pub const MAX_VERTICES: usize = 8;

/// One cell: a type tag and its point indices.
///
/// Connectivity is stored inline as 8 indices. Types with fewer vertices leave
/// the trailing slots set to [`UNUSED_SLOT`]; [`Element::vertices`] only ever
/// returns the used prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Element {
    element_type: ElementType,
    vertices: [u32; MAX_VERTICES],
}

impl Element {
    /// Creates an element.
    ///
    /// Returns `None` unless `vertices` holds exactly
    /// `element_type.num_vertices()` indices.
    pub fn new(element_type: ElementType, vertices: &[u32]) -> Option<Self> {
        if vertices.len() != element_type.num_vertices() {
            return None;
        }

        let mut slots = [UNUSED_SLOT; MAX_VERTICES];
        slots[..vertices.len()].copy_from_slice(vertices);
        Some(Self {
            element_type,
            vertices: slots,
        })
    }

    /// Returns the element type.
    pub fn element_type(&self) -> ElementType {
        self.element_type
    }

    /// Returns the point indices, in file order.
    pub fn vertices(&self) -> &[u32] {
        &self.vertices[..self.element_type.num_vertices()]
    }

    /// Returns a copy with every point index passed through `map`.
    #[must_use]
    pub fn remapped(&self, mut map: impl FnMut(u32) -> u32) -> Self {
        let mut out = *self;
        for slot in &mut out.vertices[..self.element_type.num_vertices()] {
            *slot = map(*slot);
        }
        out
    }
}
