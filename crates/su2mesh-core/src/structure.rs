//! Structure trait shared by loaded meshes.
//!
//! A [`MeshStructure`] is a point table plus cells that a host can frame and
//! display: the full volume mesh, or one compacted boundary patch.

use glam::DVec3;

use crate::dimension::Dimension;

/// A read-only mesh structure handed to the host.
pub trait MeshStructure: Send + Sync {
    /// Returns the name of this structure.
    fn name(&self) -> &str;

    /// Returns the type name of this structure (e.g., "`VolumeMesh`", "`BoundaryPatch`").
    fn type_name(&self) -> &'static str;

    /// Returns the dimensionality of the mesh this structure came from.
    fn dimension(&self) -> Dimension;

    /// Returns the point positions. 2-D points have a zero z component.
    fn points(&self) -> &[DVec3];

    /// Returns the number of elements.
    fn num_elements(&self) -> usize;

    /// Returns the number of points.
    fn num_points(&self) -> usize {
        self.points().len()
    }

    /// Returns the axis-aligned bounding box of the points.
    ///
    /// Returns `None` if the structure has no points.
    fn bounding_box(&self) -> Option<(DVec3, DVec3)> {
        let points = self.points();
        if points.is_empty() {
            return None;
        }

        let mut min = DVec3::splat(f64::MAX);
        let mut max = DVec3::splat(f64::MIN);
        for &p in points {
            min = min.min(p);
            max = max.max(p);
        }
        Some((min, max))
    }
}
