//! Mesh structures for su2mesh-rs.
//!
//! This crate provides the read-only data produced by loading an SU2 file:
//! - [`VolumeMesh`] - the point table plus volume elements
//! - [`BoundaryCollection`] - named [`Marker`]s sharing the volume point table
//! - [`BoundaryPatch`] - one marker compacted onto its own points, for hosts
//! - [`Element`] - fixed-size connectivity record

// Mesh indices are u32 by design; point counts above u32::MAX are rejected upstream
#![allow(clippy::cast_possible_truncation)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod boundary;
pub mod element;
pub mod patch;
pub mod volume_mesh;

pub use boundary::{BoundaryCollection, Marker};
pub use element::{Element, MAX_VERTICES, UNUSED_SLOT};
pub use patch::BoundaryPatch;
pub use volume_mesh::VolumeMesh;
