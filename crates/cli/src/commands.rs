//! Subcommand bodies. Each returns a serializable report so tests can inspect
//! it without going through stdout.

use std::collections::BTreeMap;
use std::fmt::Display;
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::json;
use xmono::api::{
    draw_batch, Contact, DirectedPolyline, DirectionalTraits, ElementKind, ExactKernel,
    FloatKernel, GmshMesh, GmshReadCfg, IntersectionEvent, Kernel, Point, PolylineTraits,
    SampleCfg, SegmentTraits, TraitsError,
};

use crate::curves::CurveFile;
use crate::provenance::{self, write_sidecar, Payload};

#[derive(Debug, Serialize)]
pub struct IntersectReport {
    pub kernel: &'static str,
    pub curves: usize,
    pub pairs: usize,
    pub events: Vec<EventRecord>,
    /// Pairs the float kernel could not certify; rerun with `--exact`.
    pub degenerate: Vec<PairFailure>,
}

#[derive(Debug, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventRecord {
    Point {
        a: usize,
        b: usize,
        x: String,
        y: String,
        contact: &'static str,
    },
    Overlap {
        a: usize,
        b: usize,
        /// Vertices of the shared part, in the direction of curve `a`.
        points: Vec<[String; 2]>,
        codirected: bool,
    },
}

#[derive(Debug, Serialize)]
pub struct PairFailure {
    pub a: usize,
    pub b: usize,
    pub reason: String,
}

fn contact_name(c: Contact) -> &'static str {
    match c {
        Contact::Transversal => "transversal",
        Contact::Tangent => "tangent",
        Contact::Endpoint => "endpoint",
    }
}

fn coords<T: nalgebra::Scalar + Display>(p: &Point<T>) -> [String; 2] {
    [p.x.to_string(), p.y.to_string()]
}

impl EventRecord {
    fn from_event<T: nalgebra::Scalar + Display>(
        a: usize,
        b: usize,
        e: IntersectionEvent<Point<T>, DirectedPolyline<T>>,
    ) -> Self {
        match e {
            IntersectionEvent::Point { point, contact } => {
                let [x, y] = coords(&point);
                EventRecord::Point {
                    a,
                    b,
                    x,
                    y,
                    contact: contact_name(contact),
                }
            }
            IntersectionEvent::Overlap { curve, codirected } => EventRecord::Overlap {
                a,
                b,
                points: curve.points_in_direction().iter().map(coords).collect(),
                codirected,
            },
        }
    }
}

/// All pairwise intersections of the curves in `file`.
pub fn intersect_all<K: Kernel>(
    kernel: K,
    name: &'static str,
    file: &CurveFile,
) -> Result<IntersectReport> {
    let t = PolylineTraits::new(kernel);
    let curves = file.build(&t)?;
    let mut report = IntersectReport {
        kernel: name,
        curves: curves.len(),
        pairs: 0,
        events: Vec::new(),
        degenerate: Vec::new(),
    };
    for i in 0..curves.len() {
        for j in i + 1..curves.len() {
            report.pairs += 1;
            match t.intersect(&curves[i], &curves[j]) {
                Ok(events) => report
                    .events
                    .extend(events.map(|e| EventRecord::from_event(i, j, e))),
                Err(TraitsError::DegenerateInput { reason }) => {
                    tracing::debug!(a = i, b = j, %reason, "pair not certified");
                    report.degenerate.push(PairFailure { a: i, b: j, reason });
                }
                Err(e) => {
                    return Err(e).with_context(|| format!("intersecting curves {i} and {j}"))
                }
            }
        }
    }
    Ok(report)
}

pub fn intersect(input: &Path, exact: bool, out: Option<&Path>) -> Result<()> {
    let file = CurveFile::read(input)?;
    let report = if exact {
        intersect_all(ExactKernel, "exact", &file)?
    } else {
        intersect_all(FloatKernel::default(), "float", &file)?
    };
    tracing::info!(
        kernel = report.kernel,
        curves = report.curves,
        events = report.events.len(),
        degenerate = report.degenerate.len(),
        "intersect"
    );
    emit(
        &report,
        out,
        Payload::new("intersect", json!({ "input": input.display().to_string(), "exact": exact })),
    )
}

#[derive(Debug, Serialize)]
pub struct MeshInfo {
    pub vertices: usize,
    pub edges: usize,
    pub elements: BTreeMap<&'static str, usize>,
}

pub fn mesh_info_of(mesh: &GmshMesh) -> MeshInfo {
    MeshInfo {
        vertices: mesh.vertices.len(),
        edges: mesh.edges().len(),
        elements: ElementKind::ALL
            .iter()
            .map(|&k| (k.name(), mesh.count(k)))
            .collect(),
    }
}

fn load_mesh(input: &Path, skip_unsupported: bool) -> Result<GmshMesh> {
    xmono::io::load_with(input, GmshReadCfg { skip_unsupported })
        .with_context(|| format!("loading {}", input.display()))
}

pub fn mesh_info(input: &Path, skip_unsupported: bool) -> Result<()> {
    let info = mesh_info_of(&load_mesh(input, skip_unsupported)?);
    tracing::info!(vertices = info.vertices, edges = info.edges, "mesh-info");
    emit(&info, None, Payload::new("mesh-info", json!({ "input": input.display().to_string() })))
}

#[derive(Debug, Serialize)]
pub struct CrossingReport {
    pub kernel: &'static str,
    pub segments: usize,
    /// Edges whose xy-projection is a single point.
    pub collapsed_edges: usize,
    pub crossings: Vec<Crossing>,
    pub overlaps: usize,
    pub degenerate_pairs: usize,
}

#[derive(Debug, Serialize)]
pub struct Crossing {
    /// Vertex index pairs of the two edges.
    pub edges: [[usize; 2]; 2],
    pub x: String,
    pub y: String,
}

/// Interior crossings between mesh edges projected onto the xy-plane.
pub fn mesh_crossings_with<K: Kernel>(
    kernel: K,
    name: &'static str,
    mesh: &GmshMesh,
) -> Result<CrossingReport> {
    let t = SegmentTraits::new(kernel);
    let mut segments = Vec::new();
    let mut collapsed_edges = 0;
    for [u, v] in mesh.edges() {
        let (Some(p), Some(q)) = (mesh.vertices.get(u), mesh.vertices.get(v)) else {
            bail!("edge {u}-{v} refers to a missing vertex ({} vertices)", mesh.vertices.len());
        };
        match t.segment_from_f64((p.x, p.y), (q.x, q.y)) {
            Ok(s) => segments.push(([u, v], s)),
            Err(TraitsError::DegenerateCurve) => collapsed_edges += 1,
            Err(e) => return Err(e).with_context(|| format!("edge {u}-{v}")),
        }
    }

    let mut report = CrossingReport {
        kernel: name,
        segments: segments.len(),
        collapsed_edges,
        crossings: Vec::new(),
        overlaps: 0,
        degenerate_pairs: 0,
    };
    for (i, (ea, a)) in segments.iter().enumerate() {
        for (eb, b) in &segments[i + 1..] {
            match t.intersect(a, b) {
                Ok(events) => {
                    for e in events {
                        match e {
                            IntersectionEvent::Point {
                                point,
                                contact: Contact::Transversal,
                            } => {
                                let [x, y] = coords(&point);
                                report.crossings.push(Crossing {
                                    edges: [*ea, *eb],
                                    x,
                                    y,
                                });
                            }
                            IntersectionEvent::Overlap { .. } => report.overlaps += 1,
                            IntersectionEvent::Point { .. } => {}
                        }
                    }
                }
                Err(TraitsError::DegenerateInput { reason }) => {
                    tracing::debug!(a = ?ea, b = ?eb, %reason, "edge pair not certified");
                    report.degenerate_pairs += 1;
                }
                Err(e) => return Err(e).with_context(|| format!("edges {ea:?} and {eb:?}")),
            }
        }
    }
    Ok(report)
}

pub fn mesh_crossings(
    input: &Path,
    exact: bool,
    skip_unsupported: bool,
    out: Option<&Path>,
) -> Result<()> {
    let mesh = load_mesh(input, skip_unsupported)?;
    let report = if exact {
        mesh_crossings_with(ExactKernel, "exact", &mesh)?
    } else {
        mesh_crossings_with(FloatKernel::default(), "float", &mesh)?
    };
    tracing::info!(
        kernel = report.kernel,
        segments = report.segments,
        crossings = report.crossings.len(),
        overlaps = report.overlaps,
        degenerate = report.degenerate_pairs,
        "mesh-crossings"
    );
    emit(
        &report,
        out,
        Payload::new("mesh-crossings", json!({ "input": input.display().to_string(), "exact": exact })),
    )
}

pub fn sample(seed: u64, count: usize, cfg: SampleCfg, out: &Path) -> Result<()> {
    let file = CurveFile::from_points(draw_batch(cfg, seed, count));
    tracing::info!(seed, count, "sample");
    emit(
        &file,
        Some(out),
        Payload::new(
            "sample",
            json!({
                "seed": seed,
                "count": count,
                "extent": cfg.extent,
                "grid_step": cfg.grid_step,
                "vertex_count": format!("{:?}", cfg.vertex_count),
            }),
        ),
    )
}

pub fn report() -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&provenance::header())?);
    Ok(())
}

/// Print `value` as JSON, or write it to `out` with a provenance sidecar.
#[track_caller]
fn emit<T: Serialize>(value: &T, out: Option<&Path>, payload: Payload) -> Result<()> {
    let text = serde_json::to_string_pretty(value)?;
    let Some(path) = out else {
        println!("{text}");
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
    let prov = write_sidecar(path, payload)?;
    tracing::info!(out = %path.display(), provenance = %prov.display(), "wrote");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use tempfile::tempdir;
    use xmono::api::{Element, VertexCount};

    fn file(curves: Vec<Vec<(f64, f64)>>) -> CurveFile {
        CurveFile::from_points(curves)
    }

    #[test]
    fn float_run_flags_uncertified_pairs() {
        let f = file(vec![
            vec![(0.0, 0.0), (1.0, 1.0)],
            vec![(0.0, 1.0), (2.0, 0.0)],
            vec![(0.0, 0.5), (2.0, 0.5)],
        ]);
        let report = intersect_all(FloatKernel::default(), "float", &f).unwrap();
        assert_eq!(report.pairs, 3);
        // Curves 0 and 1 cross at (2/3, 2/3).
        assert_eq!(report.degenerate.len(), 1);
        assert_eq!((report.degenerate[0].a, report.degenerate[0].b), (0, 1));
        assert!(report.events.contains(&EventRecord::Point {
            a: 0,
            b: 2,
            x: "0.5".into(),
            y: "0.5".into(),
            contact: "transversal",
        }));

        let report = intersect_all(ExactKernel, "exact", &f).unwrap();
        assert!(report.degenerate.is_empty());
        assert!(report.events.contains(&EventRecord::Point {
            a: 0,
            b: 1,
            x: "2/3".into(),
            y: "2/3".into(),
            contact: "transversal",
        }));
    }

    #[test]
    fn overlap_is_reported_in_first_curve_direction() {
        let f = file(vec![
            vec![(4.0, 4.0), (0.0, 0.0)],
            vec![(2.0, 2.0), (6.0, 6.0)],
        ]);
        let report = intersect_all(FloatKernel::default(), "float", &f).unwrap();
        assert_eq!(
            report.events,
            vec![EventRecord::Overlap {
                a: 0,
                b: 1,
                points: vec![
                    ["4".to_string(), "4".to_string()],
                    ["2".to_string(), "2".to_string()],
                ],
                codirected: false,
            }]
        );
    }

    #[test]
    fn crossing_triangles() {
        // Two triangles whose projections overlap like a star of David tip.
        let mesh = GmshMesh {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(4.0, 0.0, 0.0),
                Point3::new(2.0, 4.0, 0.0),
                Point3::new(0.0, 2.0, 1.0),
                Point3::new(4.0, 2.0, 1.0),
                Point3::new(2.0, -2.0, 1.0),
            ],
            elements: vec![
                Element::new(ElementKind::Triangle, vec![0, 1, 2]),
                Element::new(ElementKind::Triangle, vec![3, 4, 5]),
            ],
        };
        let info = mesh_info_of(&mesh);
        assert_eq!(info.edges, 6);
        assert_eq!(info.elements["triangle"], 2);

        let report = mesh_crossings_with(ExactKernel, "exact", &mesh).unwrap();
        assert_eq!(report.segments, 6);
        assert_eq!(report.crossings.len(), 6);
        assert_eq!(report.overlaps, 0);
    }

    #[test]
    fn vertical_edges_collapse() {
        let mesh = GmshMesh {
            vertices: vec![Point3::new(1.0, 1.0, 0.0), Point3::new(1.0, 1.0, 5.0)],
            elements: vec![Element::new(ElementKind::Line, vec![0, 1])],
        };
        let report = mesh_crossings_with(FloatKernel::default(), "float", &mesh).unwrap();
        assert_eq!(report.collapsed_edges, 1);
        assert_eq!(report.segments, 0);
    }

    #[test]
    fn dangling_vertex_index_is_an_error() {
        let mesh = GmshMesh {
            vertices: vec![Point3::new(0.0, 0.0, 0.0), Point3::new(1.0, 0.0, 0.0)],
            elements: vec![Element::new(ElementKind::Triangle, vec![0, 1, 7])],
        };
        let err = mesh_crossings_with(ExactKernel, "exact", &mesh).unwrap_err();
        assert!(format!("{err:#}").contains("missing vertex"));
    }

    #[test]
    fn sample_then_intersect_writes_sidecars() {
        let dir = tempdir().unwrap();
        let curves = dir.path().join("in/curves.json");
        let cfg = SampleCfg {
            vertex_count: VertexCount::Uniform { min: 2, max: 4 },
            ..SampleCfg::default()
        };
        sample(5, 6, cfg, &curves).unwrap();
        assert!(dir.path().join("in/curves.provenance.json").exists());
        let file = CurveFile::read(&curves).unwrap();
        assert_eq!(file.curves.len(), 6);

        let out = dir.path().join("out/events.json");
        intersect(&curves, true, Some(&out)).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        assert_eq!(parsed["kernel"], "exact");
        assert_eq!(parsed["pairs"], 15);
        let prov: serde_json::Value = serde_json::from_slice(
            &fs::read(dir.path().join("out/events.provenance.json")).unwrap(),
        )
        .unwrap();
        assert_eq!(prov["command"], "intersect");
        assert_eq!(prov["params"]["exact"], true);
    }
}
