//! Core types for su2mesh-rs.
//!
//! This crate provides the fundamental types shared by the reader and the mesh structures:
//! - [`Su2Error`] error taxonomy and the [`Result`] alias
//! - [`ElementType`] flat SU2 element code table and [`Dimension`]
//! - [`ReaderOptions`] configuration
//! - [`Registry`] of marker names in declaration order
//! - [`MeshStructure`] trait for data handed to a host

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod dimension;
pub mod element;
pub mod error;
pub mod options;
pub mod registry;
pub mod structure;

pub use dimension::Dimension;
pub use element::ElementType;
pub use error::{ErrorKind, Result, Su2Error};
pub use options::{IdColumnPolicy, ReaderOptions, SectionOrder};
pub use registry::Registry;
pub use structure::MeshStructure;

// Re-export glam types for convenience
pub use glam::DVec3;
