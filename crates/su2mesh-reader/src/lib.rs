//! SU2 reading pipeline for su2mesh-rs.
//!
//! Data flows strictly forward through three stages:
//! - [`lexer`]: line-aware tokens from any `BufRead`
//! - [`parser`]: tokens to [`RawMesh`] records, checking syntax and counts
//! - [`assembler`]: records to [`VolumeMesh`] and [`BoundaryCollection`],
//!   checking references and element dimensionality
//!
//! [`VolumeMesh`]: su2mesh_structures::VolumeMesh
//! [`BoundaryCollection`]: su2mesh_structures::BoundaryCollection

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod assembler;
pub mod lexer;
pub mod parser;
pub mod records;

pub use assembler::{assemble, VOLUME_MESH_NAME};
pub use lexer::{Keyword, Token, TokenKind, Tokenizer};
pub use parser::{parse, parse_str, Parser};
pub use records::{RawElement, RawMarker, RawMesh};

use std::io::BufRead;

use su2mesh_core::{ReaderOptions, Result};
use su2mesh_structures::{BoundaryCollection, VolumeMesh};

/// Runs the whole pipeline over a buffered reader.
pub fn read<R: BufRead>(
    reader: R,
    options: &ReaderOptions,
) -> Result<(VolumeMesh, BoundaryCollection)> {
    assemble(parse(reader, options)?)
}
