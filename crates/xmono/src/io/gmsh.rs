//! GMSH MSH 2.2 ASCII reader and writer.
//!
//! Layout handled:
//!
//! ```text
//! $MeshFormat
//! 2.2 0 8
//! $EndMeshFormat
//! $Nodes
//! <count>
//! <tag> <x> <y> <z>
//! $EndNodes
//! $Elements
//! <count>
//! <tag> <type> <ntags> <tag>... <node>...
//! $EndElements
//! ```
//!
//! Node tags in the file are arbitrary positive integers; they are mapped to
//! 0-based indices into `GmshMesh::vertices` in file order. Sections other
//! than the three above (`$PhysicalNames`, `$NodeData`, ...) are skipped.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

use nalgebra::Point3;

use crate::error::MeshIoError;

type Result<T> = std::result::Result<T, MeshIoError>;

/// Element kinds understood by the reader, keyed by GMSH type code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementKind {
    Point,
    Line,
    Triangle,
    Tetrahedron,
}

impl ElementKind {
    pub const ALL: [ElementKind; 4] = [
        ElementKind::Point,
        ElementKind::Line,
        ElementKind::Triangle,
        ElementKind::Tetrahedron,
    ];

    #[inline]
    pub fn type_code(self) -> u32 {
        match self {
            ElementKind::Line => 1,
            ElementKind::Triangle => 2,
            ElementKind::Tetrahedron => 4,
            ElementKind::Point => 15,
        }
    }

    pub fn from_type_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(ElementKind::Line),
            2 => Some(ElementKind::Triangle),
            4 => Some(ElementKind::Tetrahedron),
            15 => Some(ElementKind::Point),
            _ => None,
        }
    }

    #[inline]
    pub fn node_count(self) -> usize {
        match self {
            ElementKind::Point => 1,
            ElementKind::Line => 2,
            ElementKind::Triangle => 3,
            ElementKind::Tetrahedron => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Point => "point",
            ElementKind::Line => "line",
            ElementKind::Triangle => "triangle",
            ElementKind::Tetrahedron => "tetrahedron",
        }
    }
}

/// One mesh element. `nodes` are 0-based indices into the vertex list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    pub kind: ElementKind,
    /// Integer tags as written (physical entity, elementary entity, ...).
    pub tags: Vec<i64>,
    pub nodes: Vec<usize>,
}

impl Element {
    pub fn new(kind: ElementKind, nodes: Vec<usize>) -> Self {
        Self {
            kind,
            tags: Vec::new(),
            nodes,
        }
    }
}

/// Vertices and elements of a mesh file.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GmshMesh {
    pub vertices: Vec<Point3<f64>>,
    pub elements: Vec<Element>,
}

impl GmshMesh {
    /// Number of elements of `kind`.
    pub fn count(&self, kind: ElementKind) -> usize {
        self.elements.iter().filter(|e| e.kind == kind).count()
    }

    /// Unique undirected edges `[lo, hi]` of all line, triangle and
    /// tetrahedron elements, sorted.
    pub fn edges(&self) -> Vec<[usize; 2]> {
        let mut out = BTreeSet::new();
        for e in &self.elements {
            let n = &e.nodes;
            let pairs: &[(usize, usize)] = match e.kind {
                ElementKind::Point => &[],
                ElementKind::Line => &[(0, 1)],
                ElementKind::Triangle => &[(0, 1), (1, 2), (2, 0)],
                ElementKind::Tetrahedron => &[(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)],
            };
            for &(i, j) in pairs {
                if let (Some(&u), Some(&v)) = (n.get(i), n.get(j)) {
                    if u != v {
                        out.insert([u.min(v), u.max(v)]);
                    }
                }
            }
        }
        out.into_iter().collect()
    }
}

/// Reader options.
#[derive(Clone, Copy, Debug, Default)]
pub struct GmshReadCfg {
    /// Skip elements with unsupported type codes (logged at `warn`) instead of failing.
    pub skip_unsupported: bool,
}

struct LineReader<R> {
    inner: R,
    line: usize,
}

impl<R: BufRead> LineReader<R> {
    fn new(inner: R) -> Self {
        Self { inner, line: 0 }
    }

    /// Next non-blank line, trimmed.
    fn next(&mut self) -> Result<Option<String>> {
        let mut buf = String::new();
        loop {
            buf.clear();
            if self.inner.read_line(&mut buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            let trimmed = buf.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }

    fn expect(&mut self, what: &str) -> Result<String> {
        match self.next()? {
            Some(l) => Ok(l),
            None => Err(self.error(format!("unexpected end of file, expected {what}"))),
        }
    }

    fn expect_end(&mut self, section: &str) -> Result<()> {
        let marker = format!("$End{section}");
        let l = self.expect(&marker)?;
        if l != marker {
            return Err(self.error(format!("expected {marker}, found `{l}`")));
        }
        Ok(())
    }

    fn error(&self, message: String) -> MeshIoError {
        MeshIoError::Parse {
            line: self.line,
            message,
        }
    }

    fn parse<T: FromStr>(&self, tok: Option<&str>, what: &str) -> Result<T> {
        tok.and_then(|t| t.parse().ok())
            .ok_or_else(|| self.error(format!("invalid or missing {what}")))
    }
}

struct RawElement {
    tag: u64,
    kind: ElementKind,
    tags: Vec<i64>,
    nodes: Vec<u64>,
}

/// Read a mesh with default options.
pub fn read_mesh<R: BufRead>(reader: R) -> Result<GmshMesh> {
    read_mesh_with(reader, GmshReadCfg::default())
}

/// Read a mesh.
pub fn read_mesh_with<R: BufRead>(reader: R, cfg: GmshReadCfg) -> Result<GmshMesh> {
    let mut lines = LineReader::new(reader);
    let mut seen_format = false;
    let mut seen_nodes = false;
    let mut seen_elements = false;
    let mut vertices = Vec::new();
    let mut node_index: HashMap<u64, usize> = HashMap::new();
    let mut raw = Vec::new();

    while let Some(header) = lines.next()? {
        match header.as_str() {
            "$MeshFormat" => {
                read_format(&mut lines)?;
                seen_format = true;
            }
            "$Nodes" => {
                read_nodes(&mut lines, &mut vertices, &mut node_index)?;
                seen_nodes = true;
            }
            "$Elements" => {
                read_elements(&mut lines, cfg, &mut raw)?;
                seen_elements = true;
            }
            s if s.starts_with('$') => skip_section(&mut lines, &s[1..])?,
            other => {
                return Err(lines.error(format!("expected a section header, found `{other}`")))
            }
        }
    }
    if !seen_format {
        return Err(MeshIoError::MissingSection("MeshFormat"));
    }
    if !seen_nodes {
        return Err(MeshIoError::MissingSection("Nodes"));
    }
    if !seen_elements {
        return Err(MeshIoError::MissingSection("Elements"));
    }

    let mut elements = Vec::with_capacity(raw.len());
    for r in raw {
        let nodes = r
            .nodes
            .iter()
            .map(|n| {
                node_index.get(n).copied().ok_or(MeshIoError::UnknownNode {
                    element: r.tag,
                    node: *n,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        elements.push(Element {
            kind: r.kind,
            tags: r.tags,
            nodes,
        });
    }
    tracing::debug!(
        vertices = vertices.len(),
        elements = elements.len(),
        "read gmsh mesh"
    );
    Ok(GmshMesh { vertices, elements })
}

fn read_format<R: BufRead>(lines: &mut LineReader<R>) -> Result<()> {
    let l = lines.expect("format line")?;
    let mut it = l.split_whitespace();
    let version: String = lines.parse(it.next(), "version")?;
    let file_type: u32 = lines.parse(it.next(), "file type")?;
    let _data_size: u32 = lines.parse(it.next(), "data size")?;
    if !version.starts_with("2.") {
        return Err(MeshIoError::UnsupportedFormat(format!("MSH version {version}")));
    }
    if file_type != 0 {
        return Err(MeshIoError::UnsupportedFormat("binary MSH".to_string()));
    }
    lines.expect_end("MeshFormat")
}

fn read_nodes<R: BufRead>(
    lines: &mut LineReader<R>,
    vertices: &mut Vec<Point3<f64>>,
    node_index: &mut HashMap<u64, usize>,
) -> Result<()> {
    let l = lines.expect("node count")?;
    let count: usize = lines.parse(Some(l.as_str()), "node count")?;
    vertices.reserve(count.min(RESERVE_CAP));
    for _ in 0..count {
        let l = lines.expect("node")?;
        let mut it = l.split_whitespace();
        let tag: u64 = lines.parse(it.next(), "node tag")?;
        let x: f64 = lines.parse(it.next(), "x coordinate")?;
        let y: f64 = lines.parse(it.next(), "y coordinate")?;
        let z: f64 = lines.parse(it.next(), "z coordinate")?;
        if node_index.insert(tag, vertices.len()).is_some() {
            return Err(lines.error(format!("duplicate node tag {tag}")));
        }
        vertices.push(Point3::new(x, y, z));
    }
    lines.expect_end("Nodes")
}

fn read_elements<R: BufRead>(
    lines: &mut LineReader<R>,
    cfg: GmshReadCfg,
    out: &mut Vec<RawElement>,
) -> Result<()> {
    let l = lines.expect("element count")?;
    let count: usize = lines.parse(Some(l.as_str()), "element count")?;
    out.reserve(count.min(RESERVE_CAP));
    for _ in 0..count {
        let l = lines.expect("element")?;
        let fields: Vec<&str> = l.split_whitespace().collect();
        let tag: u64 = lines.parse(fields.first().copied(), "element tag")?;
        let code: u32 = lines.parse(fields.get(1).copied(), "element type")?;
        let ntags: usize = lines.parse(fields.get(2).copied(), "tag count")?;
        let Some(kind) = ElementKind::from_type_code(code) else {
            if cfg.skip_unsupported {
                tracing::warn!(element = tag, code, "skipping unsupported element");
                continue;
            }
            return Err(MeshIoError::UnsupportedElement { element: tag, code });
        };
        let Some(expected) = ntags.checked_add(3 + kind.node_count()) else {
            return Err(lines.error(format!("element {tag} tag count out of range")));
        };
        if fields.len() != expected {
            return Err(lines.error(format!(
                "{} element {tag} has {} fields, expected {expected}",
                kind.name(),
                fields.len()
            )));
        }
        let tags = fields[3..3 + ntags]
            .iter()
            .map(|t| lines.parse(Some(*t), "element tag value"))
            .collect::<Result<Vec<i64>>>()?;
        let nodes = fields[3 + ntags..]
            .iter()
            .map(|t| lines.parse(Some(*t), "node reference"))
            .collect::<Result<Vec<u64>>>()?;
        out.push(RawElement {
            tag,
            kind,
            tags,
            nodes,
        });
    }
    lines.expect_end("Elements")
}

/// Upper bound on capacity reserved from a count read out of the file.
const RESERVE_CAP: usize = 1 << 16;

fn skip_section<R: BufRead>(lines: &mut LineReader<R>, name: &str) -> Result<()> {
    tracing::debug!(section = name, "skipping gmsh section");
    let marker = format!("$End{name}");
    loop {
        let l = lines.expect(&marker)?;
        if l == marker {
            return Ok(());
        }
    }
}

/// Write `vertices` and `elements` as MSH 2.2 ASCII.
/// Element tags in the file are numbered from 1 in slice order.
pub fn write_mesh<W: Write>(
    mut w: W,
    vertices: &[Point3<f64>],
    elements: &[Element],
) -> Result<()> {
    check_elements(vertices.len(), elements)?;
    writeln!(w, "$MeshFormat")?;
    writeln!(w, "2.2 0 8")?;
    writeln!(w, "$EndMeshFormat")?;

    writeln!(w, "$Nodes")?;
    writeln!(w, "{}", vertices.len())?;
    for (i, v) in vertices.iter().enumerate() {
        writeln!(w, "{} {} {} {}", i + 1, v.x, v.y, v.z)?;
    }
    writeln!(w, "$EndNodes")?;

    writeln!(w, "$Elements")?;
    writeln!(w, "{}", elements.len())?;
    for (i, e) in elements.iter().enumerate() {
        let tag = i as u64 + 1;
        write!(w, "{} {} {}", tag, e.kind.type_code(), e.tags.len())?;
        for t in &e.tags {
            write!(w, " {t}")?;
        }
        for &n in &e.nodes {
            write!(w, " {}", n + 1)?;
        }
        writeln!(w)?;
    }
    writeln!(w, "$EndElements")?;
    w.flush()?;
    Ok(())
}

/// Every element has its kind's node count and refers to existing vertices.
/// Runs before anything is written so a rejected mesh leaves no partial file.
fn check_elements(vertex_count: usize, elements: &[Element]) -> Result<()> {
    for (i, e) in elements.iter().enumerate() {
        let tag = i as u64 + 1;
        if e.nodes.len() != e.kind.node_count() {
            return Err(MeshIoError::NodeCount {
                element: tag,
                expected: e.kind.node_count(),
                found: e.nodes.len(),
            });
        }
        if let Some(&n) = e.nodes.iter().find(|&&n| n >= vertex_count) {
            return Err(MeshIoError::UnknownNode {
                element: tag,
                node: n as u64 + 1,
            });
        }
    }
    Ok(())
}

/// Load a `.msh` file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<GmshMesh> {
    load_with(path, GmshReadCfg::default())
}

/// Load a `.msh` file with reader options.
pub fn load_with<P: AsRef<Path>>(path: P, cfg: GmshReadCfg) -> Result<GmshMesh> {
    let file = File::open(path.as_ref())?;
    read_mesh_with(BufReader::new(file), cfg)
}

/// Save a mesh as a `.msh` file.
pub fn save<P: AsRef<Path>>(mesh: &GmshMesh, path: P) -> Result<()> {
    check_elements(mesh.vertices.len(), &mesh.elements)?;
    let file = File::create(path.as_ref())?;
    write_mesh(BufWriter::new(file), &mesh.vertices, &mesh.elements)
}
