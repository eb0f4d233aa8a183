//! Curated API surface.
//!
//! Callers that only build curves and query them should import from here
//! rather than reaching into module paths.

// Contract
pub use crate::traits::{
    Contact, DirectionalTraits, IntersectionEvent, Intersections, XMonotoneTraits,
};
// Kernels
pub use crate::kernel::{ExactKernel, FloatKernel, Kernel, KernelCfg, Orientation, Point};
// Curve families
pub use crate::polyline::{DirectedPolyline, PolylineTraits};
pub use crate::segment::{DirectedSegment, SegmentTraits};
// Errors
pub use crate::error::{MeshIoError, TraitsError};
// Mesh files
pub use crate::io::gmsh::{read_mesh, read_mesh_with, write_mesh};
pub use crate::io::{load as load_mesh, save as save_mesh};
pub use crate::io::{Element, ElementKind, GmshMesh, GmshReadCfg};
// Seeded inputs
pub use crate::sample::{
    draw_batch, draw_points, draw_polyline, draw_segment, ReplayToken as SampleReplay, SampleCfg,
    VertexCount,
};
