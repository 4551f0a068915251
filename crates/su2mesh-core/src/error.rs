//! Error types for su2mesh-rs.
//!
//! Every variant is fatal to the load that raised it. Parse and assembly
//! variants carry the 1-based source line of the offending token or record.

use thiserror::Error;

use crate::dimension::Dimension;
use crate::element::ElementType;

/// The main error type for su2mesh-rs operations.
#[derive(Error, Debug)]
pub enum Su2Error {
    /// A token could not be used where a value was expected.
    #[error("line {line}: malformed token '{token}': {reason}")]
    MalformedToken {
        line: usize,
        token: String,
        reason: String,
    },

    /// `NDIME=` was not followed by 2 or 3.
    #[error("line {line}: invalid dimension '{found}', expected 2 or 3")]
    InvalidDimension { line: usize, found: String },

    /// The point block did not hold exactly `NPOIN` records.
    #[error("line {line}: NPOIN= declared {declared} points, found {found}")]
    PointCountMismatch {
        line: usize,
        declared: usize,
        found: usize,
    },

    /// An element record started with a code outside the SU2 element table.
    #[error("line {line}: unknown element type code {code}")]
    UnknownElementType { line: usize, code: i64 },

    /// The volume element block did not hold exactly `NELEM` records.
    #[error("line {line}: NELEM= declared {declared} elements, found {found}")]
    ElementCountMismatch {
        line: usize,
        declared: usize,
        found: usize,
    },

    /// A `MARKER_TAG=` repeated an earlier marker name.
    #[error("line {line}: marker '{name}' is already defined")]
    DuplicateMarkerName { line: usize, name: String },

    /// A marker block did not hold exactly `MARKER_ELEMS` records.
    #[error("line {line}: marker '{marker}' declared {declared} elements, found {found}")]
    MarkerElementCountMismatch {
        line: usize,
        marker: String,
        declared: usize,
        found: usize,
    },

    /// The input ended before every declared section was read.
    #[error("line {line}: unexpected end of file while reading {section}")]
    TruncatedFile { line: usize, section: &'static str },

    /// A section keyword (or stray token) appeared out of the fixed order.
    #[error("line {line}: unexpected '{found}', expected {expected}")]
    UnexpectedSection {
        line: usize,
        found: String,
        expected: &'static str,
    },

    /// An element references a point index outside `[0, NPOIN)`.
    #[error("line {line}: element references point {index}, but the mesh has {num_points} points")]
    DanglingVertexReference {
        line: usize,
        index: i64,
        num_points: usize,
    },

    /// A volume element is not a cell of the file's dimensionality.
    #[error("line {line}: {element_type} element is not a volume element of a {dimension}-D mesh")]
    DimensionTypeMismatch {
        line: usize,
        element_type: ElementType,
        dimension: Dimension,
    },

    /// A marker element is not one dimension lower than the volume.
    #[error("line {line}: marker '{marker}' holds a {element_type} element, which is not a boundary element of a {dimension}-D mesh")]
    MarkerDimensionMismatch {
        line: usize,
        marker: String,
        element_type: ElementType,
        dimension: Dimension,
    },

    /// A trailing id column disagrees with the record's position.
    ///
    /// Only raised when id validation is enabled in the reader options.
    #[error("line {line}: {record} id {found} does not match its position {expected}")]
    IdMismatch {
        line: usize,
        record: &'static str,
        expected: usize,
        found: i64,
    },

    /// Reading the input failed.
    #[error("I/O error: {0}")]
    IoFailure(#[from] std::io::Error),

    /// Reader options could not be deserialized.
    #[error("invalid reader options: {0}")]
    InvalidOptions(#[from] serde_json::Error),
}

/// Fieldless category of a [`Su2Error`], for hosts that dispatch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedToken,
    InvalidDimension,
    PointCountMismatch,
    UnknownElementType,
    ElementCountMismatch,
    DuplicateMarkerName,
    MarkerElementCountMismatch,
    TruncatedFile,
    UnexpectedSection,
    DanglingVertexReference,
    DimensionTypeMismatch,
    MarkerDimensionMismatch,
    IdMismatch,
    IoFailure,
    InvalidOptions,
}

impl Su2Error {
    /// Returns the category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MalformedToken { .. } => ErrorKind::MalformedToken,
            Self::InvalidDimension { .. } => ErrorKind::InvalidDimension,
            Self::PointCountMismatch { .. } => ErrorKind::PointCountMismatch,
            Self::UnknownElementType { .. } => ErrorKind::UnknownElementType,
            Self::ElementCountMismatch { .. } => ErrorKind::ElementCountMismatch,
            Self::DuplicateMarkerName { .. } => ErrorKind::DuplicateMarkerName,
            Self::MarkerElementCountMismatch { .. } => ErrorKind::MarkerElementCountMismatch,
            Self::TruncatedFile { .. } => ErrorKind::TruncatedFile,
            Self::UnexpectedSection { .. } => ErrorKind::UnexpectedSection,
            Self::DanglingVertexReference { .. } => ErrorKind::DanglingVertexReference,
            Self::DimensionTypeMismatch { .. } => ErrorKind::DimensionTypeMismatch,
            Self::MarkerDimensionMismatch { .. } => ErrorKind::MarkerDimensionMismatch,
            Self::IdMismatch { .. } => ErrorKind::IdMismatch,
            Self::IoFailure(_) => ErrorKind::IoFailure,
            Self::InvalidOptions(_) => ErrorKind::InvalidOptions,
        }
    }

    /// Returns the source line the error points at, if it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MalformedToken { line, .. }
            | Self::InvalidDimension { line, .. }
            | Self::PointCountMismatch { line, .. }
            | Self::UnknownElementType { line, .. }
            | Self::ElementCountMismatch { line, .. }
            | Self::DuplicateMarkerName { line, .. }
            | Self::MarkerElementCountMismatch { line, .. }
            | Self::TruncatedFile { line, .. }
            | Self::UnexpectedSection { line, .. }
            | Self::DanglingVertexReference { line, .. }
            | Self::DimensionTypeMismatch { line, .. }
            | Self::MarkerDimensionMismatch { line, .. }
            | Self::IdMismatch { line, .. } => Some(*line),
            Self::IoFailure(_) | Self::InvalidOptions(_) => None,
        }
    }
}

/// A specialized Result type for su2mesh-rs operations.
pub type Result<T> = std::result::Result<T, Su2Error>;
