//! Spatial dimensionality of an SU2 mesh.

use std::fmt;

/// Dimensionality declared by the `NDIME=` section.
///
/// Fixed for the whole file: it sets the number of coordinates per point, the
/// dimension of volume elements, and (one lower) the dimension of marker elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Planar mesh: points carry (x, y), cells are triangles and quads.
    Two,
    /// Volumetric mesh: points carry (x, y, z), cells are solids.
    Three,
}

impl Dimension {
    /// Maps an `NDIME` value to a dimension.
    pub fn from_ndime(value: i64) -> Option<Self> {
        match value {
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            _ => None,
        }
    }

    /// Number of coordinates per point, and the dimension of volume elements.
    pub fn ndime(self) -> usize {
        match self {
            Self::Two => 2,
            Self::Three => 3,
        }
    }

    /// Dimension of boundary (marker) elements.
    pub fn boundary_ndime(self) -> usize {
        self.ndime() - 1
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.ndime())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ndime() {
        assert_eq!(Dimension::from_ndime(2), Some(Dimension::Two));
        assert_eq!(Dimension::from_ndime(3), Some(Dimension::Three));
        assert_eq!(Dimension::from_ndime(1), None);
        assert_eq!(Dimension::from_ndime(4), None);
    }

    #[test]
    fn test_boundary_dimension() {
        assert_eq!(Dimension::Two.boundary_ndime(), 1);
        assert_eq!(Dimension::Three.boundary_ndime(), 2);
    }
}
