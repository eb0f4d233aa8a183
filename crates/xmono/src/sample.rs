//! Seeded generators of directed segments and polylines.
//!
//! Purpose
//! - Reproducible random inputs for benchmarks, randomized checks and the
//!   CLI `sample` command.
//!
//! Model
//! - Coordinates are grid points `k * grid_step` inside `[-extent, extent]`.
//!   With a power-of-two step every coordinate is an exact `f64`, so both
//!   kernels see the same input.
//! - A polyline draws distinct grid x values, sorts them and attaches a random
//!   y to each; its direction is a fair coin.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `PolylineTraits::polyline_from_f64`, `SegmentTraits::segment_from_f64`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::Result;
use crate::kernel::Kernel;
use crate::polyline::{DirectedPolyline, PolylineTraits};
use crate::segment::{DirectedSegment, SegmentTraits};

/// Vertex count distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VertexCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}

impl VertexCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            VertexCount::Fixed(n) => n.max(2),
            VertexCount::Uniform { min, max } => {
                let lo = min.max(2);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SampleCfg {
    /// Half-width of the square coordinates are drawn from. At most
    /// `MAX_HALF_CELLS` grid steps are used on each side of the origin.
    pub extent: f64,
    /// Grid spacing. Clamped to at least 1e-6.
    pub grid_step: f64,
    pub vertex_count: VertexCount,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self {
            extent: 16.0,
            grid_step: 0.25,
            vertex_count: VertexCount::Uniform { min: 2, max: 6 },
        }
    }
}

/// Cap on grid columns per side; larger extents are shrunk to fit.
pub const MAX_HALF_CELLS: f64 = (1u64 << 20) as f64;

impl SampleCfg {
    /// Grid values per axis and the offset of the centre cell.
    fn grid(&self) -> (usize, f64, f64) {
        let step = self.grid_step.max(1e-6);
        // `f64::min` also maps a NaN ratio to the cap.
        let half = (self.extent.abs() / step).floor().min(MAX_HALF_CELLS);
        let cells = 2 * half as usize + 1;
        (cells, half, step)
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    /// Token for the next draw in the same stream.
    #[inline]
    pub fn next(self) -> Self {
        Self {
            seed: self.seed,
            index: self.index.wrapping_add(1),
        }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        StdRng::seed_from_u64(mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15))))
    }
}

/// Vertices of a random x-monotone polyline, in traversal order.
///
/// x values are pairwise distinct; the count is capped by the number of grid columns.
pub fn draw_points(cfg: SampleCfg, tok: ReplayToken) -> Vec<(f64, f64)> {
    let mut rng = tok.to_std_rng();
    let (cells, half, step) = cfg.grid();
    let n = cfg.vertex_count.sample(&mut rng).min(cells.max(2));
    let coord = |k: usize| (k as f64 - half) * step;

    let mut columns = rand::seq::index::sample(&mut rng, cells, n.min(cells)).into_vec();
    columns.sort_unstable();
    let mut pts: Vec<(f64, f64)> = columns
        .into_iter()
        .map(|k| (coord(k), coord(rng.gen_range(0..cells))))
        .collect();
    if pts.len() < 2 {
        // Single-column grid: fall back to a vertical piece.
        let x = pts.first().map_or(0.0, |p| p.0);
        pts = vec![(x, -half * step), (x, half * step + step)];
    }
    if rng.gen_bool(0.5) {
        pts.reverse();
    }
    pts
}

/// `count` consecutive draws starting at `(seed, 0)`.
pub fn draw_batch(cfg: SampleCfg, seed: u64, count: usize) -> Vec<Vec<(f64, f64)>> {
    let mut tok = ReplayToken::new(seed, 0);
    let mut out = Vec::with_capacity(count);
    for _ in 0..count {
        out.push(draw_points(cfg, tok));
        tok = tok.next();
    }
    out
}

/// Random directed polyline.
pub fn draw_polyline<K: Kernel>(
    traits: &PolylineTraits<K>,
    cfg: SampleCfg,
    tok: ReplayToken,
) -> Result<DirectedPolyline<K::Ft>> {
    traits.polyline_from_f64(&draw_points(cfg, tok))
}

/// Random directed segment: the first and last vertex of a two-vertex draw.
pub fn draw_segment<K: Kernel>(
    traits: &SegmentTraits<K>,
    cfg: SampleCfg,
    tok: ReplayToken,
) -> Result<DirectedSegment<K::Ft>> {
    let cfg = SampleCfg {
        vertex_count: VertexCount::Fixed(2),
        ..cfg
    };
    let pts = draw_points(cfg, tok);
    traits.segment_from_f64(pts[0], pts[pts.len() - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TraitsError;
    use crate::kernel::{ExactKernel, FloatKernel};
    use crate::traits::DirectionalTraits;

    #[test]
    fn reproducible_draw() {
        let cfg = SampleCfg::default();
        let tok = ReplayToken { seed: 42, index: 7 };
        assert_eq!(draw_points(cfg, tok), draw_points(cfg, tok));
        assert_ne!(draw_points(cfg, tok), draw_points(cfg, tok.next()));
        assert_eq!(draw_batch(cfg, 42, 10)[7], draw_points(cfg, tok));
    }

    #[test]
    fn points_are_on_grid_and_monotone() {
        let cfg = SampleCfg {
            extent: 4.0,
            grid_step: 0.5,
            vertex_count: VertexCount::Uniform { min: 2, max: 9 },
        };
        for pts in draw_batch(cfg, 3, 200) {
            assert!(pts.len() >= 2 && pts.len() <= 9);
            for &(x, y) in &pts {
                assert!(x.abs() <= 4.0 && y.abs() <= 4.0);
                assert_eq!((x * 2.0).fract(), 0.0);
                assert_eq!((y * 2.0).fract(), 0.0);
            }
            let mut xs: Vec<f64> = pts.iter().map(|p| p.0).collect();
            if xs[0] > xs[xs.len() - 1] {
                xs.reverse();
            }
            assert!(xs.windows(2).all(|w| w[0] < w[1]));
        }
    }

    #[test]
    fn vertex_count_is_capped_by_grid() {
        let cfg = SampleCfg {
            extent: 1.0,
            grid_step: 1.0,
            vertex_count: VertexCount::Fixed(10),
        };
        assert_eq!(draw_points(cfg, ReplayToken::new(1, 1)).len(), 3);
    }

    #[test]
    fn huge_extent_is_capped() {
        let ft = PolylineTraits::new(FloatKernel::default());
        for extent in [1e300, f64::INFINITY] {
            let cfg = SampleCfg {
                extent,
                ..SampleCfg::default()
            };
            let limit = MAX_HALF_CELLS * cfg.grid_step;
            for (i, pts) in draw_batch(cfg, 5, 20).into_iter().enumerate() {
                assert!(pts.iter().all(|p| p.0.abs() <= limit && p.1.abs() <= limit));
                draw_polyline(&ft, cfg, ReplayToken::new(5, i as u64)).unwrap();
            }
        }
    }

    #[test]
    fn drawn_curves_construct_in_both_kernels() {
        let cfg = SampleCfg::default();
        let ft = PolylineTraits::new(FloatKernel::default());
        let et = PolylineTraits::new(ExactKernel);
        let st = SegmentTraits::new(ExactKernel);
        let mut tok = ReplayToken::new(11, 0);
        for _ in 0..50 {
            let f = draw_polyline(&ft, cfg, tok).unwrap();
            let e = draw_polyline(&et, cfg, tok).unwrap();
            assert_eq!(f.num_pieces(), e.num_pieces());
            assert_eq!(f.is_directed_right(), e.is_directed_right());
            draw_segment(&st, cfg, tok).unwrap();
            tok = tok.next();
        }
    }

    #[test]
    fn float_and_exact_agree_on_sampled_batches() {
        let cfg = SampleCfg::default();
        let ft = PolylineTraits::new(FloatKernel::default());
        let et = PolylineTraits::new(ExactKernel);
        let batch = draw_batch(cfg, 2024, 24);
        let mut certified = 0usize;
        for a in &batch {
            for b in &batch {
                let ea = et.polyline_from_f64(a).unwrap();
                let eb = et.polyline_from_f64(b).unwrap();
                let exact: Vec<_> = et.intersect(&ea, &eb).unwrap().collect();
                let fa = ft.polyline_from_f64(a).unwrap();
                let fb = ft.polyline_from_f64(b).unwrap();
                match ft.intersect(&fa, &fb) {
                    Ok(events) => {
                        certified += 1;
                        assert_eq!(events.len(), exact.len());
                    }
                    Err(e) => assert!(matches!(e, TraitsError::DegenerateInput { .. })),
                }
            }
        }
        // Self-intersections are always overlaps, so some pairs certify.
        assert!(certified >= batch.len());
    }
}
