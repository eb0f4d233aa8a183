mod commands;
mod curves;
mod provenance;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;
use xmono::api::{SampleCfg, VertexCount};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Intersect x-monotone curves, inspect GMSH meshes, sample test inputs")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// All pairwise intersections of the curves in a JSON file
    Intersect {
        #[arg(long)]
        input: PathBuf,
        /// Use exact rational arithmetic instead of the filtered f64 kernel
        #[arg(long)]
        exact: bool,
        /// Write the report here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Vertex, edge and per-kind element counts of a .msh file
    MeshInfo {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        skip_unsupported: bool,
    },
    /// Crossings between mesh edges projected onto the xy-plane
    MeshCrossings {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        exact: bool,
        #[arg(long)]
        skip_unsupported: bool,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Write seeded random curves as a JSON curve file
    Sample {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 16)]
        count: usize,
        #[arg(long, default_value_t = 2)]
        min_vertices: usize,
        #[arg(long, default_value_t = 6)]
        max_vertices: usize,
        #[arg(long, default_value_t = 16.0)]
        extent: f64,
        #[arg(long, default_value_t = 0.25)]
        grid_step: f64,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Intersect { input, exact, out } => {
            commands::intersect(&input, exact, out.as_deref())
        }
        Action::MeshInfo {
            input,
            skip_unsupported,
        } => commands::mesh_info(&input, skip_unsupported),
        Action::MeshCrossings {
            input,
            exact,
            skip_unsupported,
            out,
        } => commands::mesh_crossings(&input, exact, skip_unsupported, out.as_deref()),
        Action::Sample {
            seed,
            count,
            min_vertices,
            max_vertices,
            extent,
            grid_step,
            out,
        } => {
            let cfg = SampleCfg {
                extent,
                grid_step,
                vertex_count: VertexCount::Uniform {
                    min: min_vertices,
                    max: max_vertices,
                },
            };
            commands::sample(seed, count, cfg, &out)
        }
        Action::Report => commands::report(),
    }
}
