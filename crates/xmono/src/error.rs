//! Error types for curve traits and mesh I/O.
//!
//! Every failure is local and synchronous: operations return a typed error at
//! the call site and never retry internally. Retrying (e.g. switching from
//! `FloatKernel` to `ExactKernel`) is the caller's decision.

use thiserror::Error;

/// Result type alias using [`TraitsError`].
pub type Result<T> = std::result::Result<T, TraitsError>;

/// Errors raised by kernels and curve-traits operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TraitsError {
    /// The kernel could not certify a predicate or construction.
    #[error("degenerate input: {reason}")]
    DegenerateInput {
        /// What could not be certified.
        reason: String,
    },

    /// `split` was called with a point that is not strictly interior to the curve.
    #[error("invalid split point: {reason}")]
    InvalidSplitPoint {
        /// Why the point was rejected.
        reason: &'static str,
    },

    /// `merge` was called on curves that are not mergeable.
    #[error("merge precondition failed: curves are not mergeable")]
    MergePreconditionFailed,

    /// `compare_y_at_x` was called with a point outside the curve's x-range.
    #[error("point is not in the x-range of the curve")]
    NotInXRange,

    /// A curve would have zero length (source equals target).
    #[error("degenerate curve: source and target coincide")]
    DegenerateCurve,

    /// A point sequence does not describe an x-monotone curve.
    #[error("points do not form an x-monotone curve (at vertex {vertex})")]
    NotXMonotone {
        /// Index of the first offending vertex (input order).
        vertex: usize,
    },
}

impl TraitsError {
    /// Create a degenerate-input error.
    pub fn degenerate<S: Into<String>>(reason: S) -> Self {
        TraitsError::DegenerateInput {
            reason: reason.into(),
        }
    }
}

/// Errors raised while reading or writing mesh files.
#[derive(Error, Debug)]
pub enum MeshIoError {
    /// Underlying stream error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed content.
    #[error("parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was expected.
        message: String,
    },

    /// File version or encoding that the reader does not handle.
    #[error("unsupported mesh format: {0}")]
    UnsupportedFormat(String),

    /// Element type code outside the supported set.
    #[error("element {element} has unsupported type code {code}")]
    UnsupportedElement {
        /// Element tag as written in the file.
        element: u64,
        /// GMSH element type code.
        code: u32,
    },

    /// An element refers to a node tag that was never declared.
    #[error("element {element} references unknown node {node}")]
    UnknownNode {
        /// Element tag as written in the file.
        element: u64,
        /// Node tag as written in the file.
        node: u64,
    },

    /// An element carries the wrong number of nodes for its kind.
    #[error("element {element} has {found} nodes, expected {expected}")]
    NodeCount {
        /// Element tag (1-based position when writing).
        element: u64,
        expected: usize,
        found: usize,
    },

    /// A mandatory section is absent.
    #[error("missing section ${0}")]
    MissingSection(&'static str),
}
