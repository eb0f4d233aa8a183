//! Mesh file I/O.
//!
//! Only GMSH `.msh` (format 2.2, ASCII) is supported. The reader produces a
//! plain `(vertices, elements)` pair ([`GmshMesh`]); the CLI projects mesh
//! edges onto the xy-plane and feeds them to the curve traits.
//!
//! ```no_run
//! use xmono::io::{gmsh, load};
//!
//! let mesh = load("part.msh").unwrap();
//! println!("{} triangles", mesh.count(gmsh::ElementKind::Triangle));
//! ```

pub mod gmsh;

use std::path::Path;

use crate::error::MeshIoError;

pub use gmsh::{Element, ElementKind, GmshMesh, GmshReadCfg};

fn check_extension(path: &Path) -> Result<(), MeshIoError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("msh") => Ok(()),
        other => Err(MeshIoError::UnsupportedFormat(format!(
            "extension `{}`",
            other.unwrap_or("(none)")
        ))),
    }
}

/// Load a mesh, choosing the reader from the file extension.
pub fn load<P: AsRef<Path>>(path: P) -> Result<GmshMesh, MeshIoError> {
    load_with(path, GmshReadCfg::default())
}

/// [`load`] with reader options.
pub fn load_with<P: AsRef<Path>>(path: P, cfg: GmshReadCfg) -> Result<GmshMesh, MeshIoError> {
    let path = path.as_ref();
    check_extension(path)?;
    gmsh::load_with(path, cfg)
}

/// Save a mesh, choosing the writer from the file extension.
pub fn save<P: AsRef<Path>>(mesh: &GmshMesh, path: P) -> Result<(), MeshIoError> {
    let path = path.as_ref();
    check_extension(path)?;
    gmsh::save(mesh, path)
}
