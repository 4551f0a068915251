//! su2mesh-rs: A Rust-native reader for SU2 unstructured meshes.
//!
//! SU2 is the plain-text mesh format of the SU2 CFD suite. A file holds one
//! volume mesh (2-D or 3-D, mixed element types) and a set of named boundary
//! markers such as walls, inlets and far fields.
//!
//! # Quick Start
//!
//! ```
//! use su2mesh::*;
//!
//! fn main() -> Result<()> {
//!     let source = "\
//! NDIME= 2
//! NPOIN= 3
//! 0 0
//! 1 0
//! 0 1
//! NELEM= 1
//! 5 0 1 2
//! NMARK= 1
//! MARKER_TAG= wall
//! MARKER_ELEMS= 1
//! 3 0 1
//! ";
//!     let (volume, boundaries) = load_from_str(source)?;
//!     assert_eq!(volume.num_points(), 3);
//!     assert_eq!(boundaries.get("wall").unwrap().num_elements(), 1);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Loading runs a forward-only pipeline: tokenizer, section parser, mesh
//! assembler. The result is a [`VolumeMesh`] and a [`BoundaryCollection`]
//! that share one point table. Nothing is exposed until the whole file has
//! been read and validated; the first defect aborts the load with a
//! [`Su2Error`] naming the source line.
//!
//! # Hosts
//!
//! [`Su2MeshReader`] wraps the pipeline for visualization hosts: it caches the
//! last good result, reloads only when the file name changes, and presents the
//! data as two output ports (`"Volume Mesh"` and `"Boundary Meshes"`).

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod adapter;
mod init;

pub use adapter::{BoundaryBlocks, OutputPort, PortData, ReaderOutput, Su2MeshReader};
pub use init::init_logging;

// Re-export core types
pub use su2mesh_core::{
    Dimension, ElementType, ErrorKind, IdColumnPolicy, MeshStructure, ReaderOptions, Result,
    SectionOrder, Su2Error,
};

// Re-export structures
pub use su2mesh_structures::{BoundaryCollection, BoundaryPatch, Element, Marker, VolumeMesh};

// Re-export glam types for convenience
pub use glam::DVec3;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Loads an SU2 file with default options.
pub fn load(path: impl AsRef<Path>) -> Result<(VolumeMesh, BoundaryCollection)> {
    load_with_options(path, &ReaderOptions::default())
}

/// Loads an SU2 file.
///
/// The file is streamed; only the assembled mesh is held in memory.
pub fn load_with_options(
    path: impl AsRef<Path>,
    options: &ReaderOptions,
) -> Result<(VolumeMesh, BoundaryCollection)> {
    let path = path.as_ref();
    log::info!("loading SU2 mesh from {}", path.display());
    let file = File::open(path)?;
    load_from_reader(BufReader::new(file), options)
}

/// Reads an SU2 mesh from any buffered reader.
pub fn load_from_reader<R: BufRead>(
    reader: R,
    options: &ReaderOptions,
) -> Result<(VolumeMesh, BoundaryCollection)> {
    let (volume, boundaries) = su2mesh_reader::read(reader, options)?;
    log::info!(
        "loaded {}-D mesh: {} points, {} volume elements, {} markers ({} boundary elements)",
        volume.dimension(),
        volume.num_points(),
        volume.num_elements(),
        boundaries.len(),
        boundaries.num_elements()
    );
    Ok((volume, boundaries))
}

/// Reads an SU2 mesh held in memory, with default options.
pub fn load_from_str(source: &str) -> Result<(VolumeMesh, BoundaryCollection)> {
    load_from_reader(source.as_bytes(), &ReaderOptions::default())
}
