//! JSON curve files: `{"curves": [{"name": "a", "points": [[x, y], ...]}]}`.
//!
//! Points are listed in traversal order. Every curve becomes a polyline; a
//! two-point curve is a single segment.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use xmono::api::{DirectedPolyline, Kernel, PolylineTraits};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveFile {
    pub curves: Vec<CurveEntry>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CurveEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub points: Vec<[f64; 2]>,
}

impl CurveFile {
    pub fn read(path: &Path) -> Result<Self> {
        let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))
    }

    /// Unnamed curves from point lists.
    pub fn from_points(batch: Vec<Vec<(f64, f64)>>) -> Self {
        Self {
            curves: batch
                .into_iter()
                .map(|pts| CurveEntry {
                    name: None,
                    points: pts.into_iter().map(|(x, y)| [x, y]).collect(),
                })
                .collect(),
        }
    }

    /// Construct every curve; the first invalid one aborts with its index.
    pub fn build<K: Kernel>(&self, t: &PolylineTraits<K>) -> Result<Vec<DirectedPolyline<K::Ft>>> {
        self.curves
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let pts: Vec<(f64, f64)> = c.points.iter().map(|p| (p[0], p[1])).collect();
                t.polyline_from_f64(&pts)
                    .with_context(|| format!("curve {i} ({})", c.label(i)))
            })
            .collect()
    }
}

impl CurveEntry {
    pub fn label(&self, index: usize) -> String {
        self.name.clone().unwrap_or_else(|| format!("#{index}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use xmono::api::{FloatKernel, TraitsError};

    #[test]
    fn parses_named_and_unnamed_curves() {
        let text = r#"{"curves": [
            {"name": "diag", "points": [[0, 0], [2, 2]]},
            {"points": [[3, 0], [1, 1], [0, 2]]}
        ]}"#;
        let file: CurveFile = serde_json::from_str(text).unwrap();
        assert_eq!(file.curves[0].label(0), "diag");
        assert_eq!(file.curves[1].label(1), "#1");
        let t = PolylineTraits::new(FloatKernel::default());
        let curves = file.build(&t).unwrap();
        assert_eq!(curves[0].num_pieces(), 1);
        assert_eq!(curves[1].num_pieces(), 2);
        assert!(!curves[1].is_directed_right());
    }

    #[test]
    fn invalid_curve_names_its_index() {
        let file = CurveFile::from_points(vec![
            vec![(0.0, 0.0), (1.0, 0.0)],
            vec![(0.0, 0.0), (2.0, 1.0), (1.0, 2.0)],
        ]);
        let t = PolylineTraits::new(FloatKernel::default());
        let err = file.build(&t).unwrap_err();
        assert!(format!("{err:#}").contains("curve 1"));
        assert_eq!(
            err.downcast_ref::<TraitsError>(),
            Some(&TraitsError::NotXMonotone { vertex: 2 })
        );
    }

    #[test]
    fn unnamed_curves_serialize_without_name() {
        let file = CurveFile::from_points(vec![vec![(0.0, 0.0), (1.5, -2.0)]]);
        let text = serde_json::to_string(&file).unwrap();
        assert_eq!(text, r#"{"curves":[{"points":[[0.0,0.0],[1.5,-2.0]]}]}"#);
    }
}
