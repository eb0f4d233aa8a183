//! Cut sampled polylines at their pairwise crossings, the way an arrangement
//! sweep would, and show the piece counts.
//!
//! Usage:
//!   cargo run -p xmono --example subdivide -- float
//!   cargo run -p xmono --example subdivide -- exact
//!
//! The float kernel reports pairs it cannot certify; the exact kernel never does.

use xmono::api::{
    draw_batch, DirectionalTraits, ExactKernel, FloatKernel, IntersectionEvent, Kernel,
    PolylineTraits, SampleCfg, XMonotoneTraits,
};

fn main() {
    let mode = std::env::args().nth(1).unwrap_or_else(|| "float".to_string());
    match mode.as_str() {
        "float" => subdivide(FloatKernel::default()),
        "exact" => subdivide(ExactKernel),
        _ => eprintln!("usage: subdivide [float|exact]"),
    }
}

fn subdivide<K: Kernel>(kernel: K) {
    let t = PolylineTraits::new(kernel);
    let curves: Vec<_> = draw_batch(SampleCfg::default(), 7, 8)
        .iter()
        .filter_map(|p| t.polyline_from_f64(p).ok())
        .collect();
    for (i, c) in curves.iter().enumerate() {
        // Interior crossings with every other curve, in left-to-right order.
        let mut cuts = Vec::new();
        let mut uncertified = 0;
        for (j, other) in curves.iter().enumerate() {
            if i == j {
                continue;
            }
            match t.intersect(c, other) {
                Ok(events) => cuts.extend(events.filter_map(|e| match e {
                    IntersectionEvent::Point { point, .. } => Some(point),
                    IntersectionEvent::Overlap { .. } => None,
                })),
                Err(_) => uncertified += 1,
            }
        }
        cuts.sort_by(|p, q| t.compare_xy(p, q));
        cuts.dedup();

        // Split left to right; the remainder is always the right-hand part.
        let mut rest = if c.is_directed_right() {
            c.clone()
        } else {
            t.construct_opposite(c)
        };
        let mut pieces = 1;
        for p in &cuts {
            if let Ok((_, right)) = t.split(&rest, p) {
                rest = right;
                pieces += 1;
            }
        }
        println!(
            "curve {i}: {} vertices, {} cuts, {pieces} pieces, {uncertified} uncertified pairs",
            c.points().len(),
            cuts.len()
        );
    }
}
