//! Criterion microbenches for the intersection hot path.
//!
//! - segments: float (filtered) vs exact kernel on sampled pairs.
//! - polylines: 4–12 vertex curves, float vs exact.
//! - split + merge round trip on polylines.
//!
//! Results live under `target/criterion`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use xmono::api::{
    draw_batch, DirectionalTraits, ExactKernel, FloatKernel, Kernel, PolylineTraits,
    SampleCfg, SegmentTraits, VertexCount,
};

fn segment_pairs(count: usize) -> Vec<((f64, f64), (f64, f64))> {
    let cfg = SampleCfg {
        vertex_count: VertexCount::Fixed(2),
        ..SampleCfg::default()
    };
    draw_batch(cfg, 17, count)
        .into_iter()
        .map(|p| (p[0], p[1]))
        .collect()
}

fn bench_segments_for<K: Kernel>(c: &mut Criterion, name: &str, kernel: K) {
    let t = SegmentTraits::new(kernel);
    let segs: Vec<_> = segment_pairs(64)
        .into_iter()
        .filter_map(|(s, e)| t.segment_from_f64(s, e).ok())
        .collect();
    c.bench_function(&format!("segments/{name}/all_pairs_64"), |b| {
        b.iter(|| {
            let mut events = 0usize;
            for a in &segs {
                for s in &segs {
                    if let Ok(it) = t.intersect(a, s) {
                        events += it.len();
                    }
                }
            }
            black_box(events)
        })
    });
}

fn bench_segments(c: &mut Criterion) {
    bench_segments_for(c, "float", FloatKernel::default());
    bench_segments_for(c, "exact", ExactKernel);
}

fn bench_polylines_for<K: Kernel>(c: &mut Criterion, name: &str, kernel: K) {
    let mut group = c.benchmark_group(format!("polylines/{name}"));
    let t = PolylineTraits::new(kernel);
    for (min, max) in [(4usize, 6usize), (8, 12)] {
        let cfg = SampleCfg {
            vertex_count: VertexCount::Uniform { min, max },
            ..SampleCfg::default()
        };
        let curves: Vec<_> = draw_batch(cfg, 23, 24)
            .iter()
            .filter_map(|p| t.polyline_from_f64(p).ok())
            .collect();
        group.bench_function(BenchmarkId::new("all_pairs_24", format!("{min}-{max}")), |b| {
            b.iter(|| {
                let mut events = 0usize;
                for a in &curves {
                    for s in &curves {
                        if let Ok(it) = t.intersect(a, s) {
                            events += it.len();
                        }
                    }
                }
                black_box(events)
            })
        });
    }
    group.finish();
}

fn bench_polylines(c: &mut Criterion) {
    bench_polylines_for(c, "float", FloatKernel::default());
    bench_polylines_for(c, "exact", ExactKernel);
}

fn bench_split_merge(c: &mut Criterion) {
    let t = PolylineTraits::new(FloatKernel::default());
    let cfg = SampleCfg {
        vertex_count: VertexCount::Fixed(8),
        ..SampleCfg::default()
    };
    let curves: Vec<_> = draw_batch(cfg, 5, 32)
        .iter()
        .filter_map(|p| t.polyline_from_f64(p).ok())
        .filter(|c| c.points().len() > 2)
        .collect();
    c.bench_function("polylines/float/split_merge_at_vertex", |b| {
        b.iter(|| {
            for curve in &curves {
                let p = &curve.points()[1];
                if let Ok((x, y)) = t.split(curve, p) {
                    black_box(t.merge(&x, &y).ok());
                }
            }
        })
    });
}

criterion_group!(benches, bench_segments, bench_polylines, bench_split_merge);
criterion_main!(benches);
