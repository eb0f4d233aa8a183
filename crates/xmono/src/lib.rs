//! Directional x-monotone curve traits for planar arrangements.
//!
//! A sweep-line arrangement builder needs a handful of geometric services from
//! its curves: ordering points, comparing a point against a curve, intersecting
//! two curves, splitting a curve at a point and merging two pieces back. This
//! crate provides that contract (`traits`), two curve families implementing it
//! (`segment`, `polyline`) over two numeric kernels (`kernel`), plus a GMSH
//! mesh reader/writer (`io`) and seeded input generators (`sample`).
//!
//! API Policy
//! - `api` and `prelude` are the curated entry points; module paths may move.

pub mod api;
pub mod error;
pub mod io;
pub mod kernel;
pub mod polyline;
pub mod sample;
pub mod segment;
pub mod traits;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{MeshIoError, Result, TraitsError};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::error::{MeshIoError, TraitsError};
    pub use crate::kernel::{ExactKernel, FloatKernel, Kernel, KernelCfg, Orientation, Point};
    pub use crate::polyline::{DirectedPolyline, PolylineTraits};
    pub use crate::segment::{DirectedSegment, SegmentTraits};
    pub use crate::traits::{
        Contact, DirectionalTraits, IntersectionEvent, Intersections, XMonotoneTraits,
    };
}
