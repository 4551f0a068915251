//! SU2 element types.
//!
//! The SU2 format identifies cells by a numeric type code. The mapping is a flat
//! table: each code resolves to a type tag with a fixed vertex count, a
//! topological dimension, and the matching VTK cell type id used by
//! visualization hosts.
//!
//! | code | type          | vertices | dim | VTK |
//! |------|---------------|----------|-----|-----|
//! | 3    | line          | 2        | 1   | 3   |
//! | 5    | triangle      | 3        | 2   | 5   |
//! | 9    | quadrilateral | 4        | 2   | 9   |
//! | 10   | tetrahedron   | 4        | 3   | 10  |
//! | 12   | hexahedron    | 8        | 3   | 12  |
//! | 13   | prism         | 6        | 3   | 13  |
//! | 14   | pyramid       | 5        | 3   | 14  |

use std::fmt;

use crate::dimension::Dimension;

/// Geometric cell type of an SU2 element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementType {
    Line,
    Triangle,
    Quadrilateral,
    Tetrahedron,
    Hexahedron,
    Prism,
    Pyramid,
}

/// SU2 type code → element type.
const SU2_CODE_TABLE: [(i64, ElementType); 7] = [
    (3, ElementType::Line),
    (5, ElementType::Triangle),
    (9, ElementType::Quadrilateral),
    (10, ElementType::Tetrahedron),
    (12, ElementType::Hexahedron),
    (13, ElementType::Prism),
    (14, ElementType::Pyramid),
];

impl ElementType {
    /// All element types, in SU2 code order.
    pub const ALL: [ElementType; 7] = [
        ElementType::Line,
        ElementType::Triangle,
        ElementType::Quadrilateral,
        ElementType::Tetrahedron,
        ElementType::Hexahedron,
        ElementType::Prism,
        ElementType::Pyramid,
    ];

    /// Looks up an SU2 type code.
    pub fn from_su2_code(code: i64) -> Option<Self> {
        SU2_CODE_TABLE
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, ty)| *ty)
    }

    /// Returns the SU2 type code.
    pub fn su2_code(self) -> u8 {
        match self {
            Self::Line => 3,
            Self::Triangle => 5,
            Self::Quadrilateral => 9,
            Self::Tetrahedron => 10,
            Self::Hexahedron => 12,
            Self::Prism => 13,
            Self::Pyramid => 14,
        }
    }

    /// Number of point indices in the connectivity of this type.
    pub fn num_vertices(self) -> usize {
        match self {
            Self::Line => 2,
            Self::Triangle => 3,
            Self::Quadrilateral | Self::Tetrahedron => 4,
            Self::Pyramid => 5,
            Self::Prism => 6,
            Self::Hexahedron => 8,
        }
    }

    /// Topological dimension: 1 for lines, 2 for faces, 3 for solids.
    pub fn topological_dimension(self) -> usize {
        match self {
            Self::Line => 1,
            Self::Triangle | Self::Quadrilateral => 2,
            Self::Tetrahedron | Self::Hexahedron | Self::Prism | Self::Pyramid => 3,
        }
    }

    /// VTK cell type id. SU2 borrowed its codes from VTK, so the values agree.
    pub fn vtk_cell_type(self) -> u8 {
        self.su2_code()
    }

    /// Lower-case human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Line => "line",
            Self::Triangle => "triangle",
            Self::Quadrilateral => "quadrilateral",
            Self::Tetrahedron => "tetrahedron",
            Self::Hexahedron => "hexahedron",
            Self::Prism => "prism",
            Self::Pyramid => "pyramid",
        }
    }

    /// Whether this type is a cell of a `dimension`-D volume.
    pub fn is_volume_element_of(self, dimension: Dimension) -> bool {
        self.topological_dimension() == dimension.ndime()
    }

    /// Whether this type is a codimension-1 (boundary) element of a `dimension`-D volume.
    pub fn is_boundary_element_of(self, dimension: Dimension) -> bool {
        self.topological_dimension() == dimension.boundary_ndime()
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
