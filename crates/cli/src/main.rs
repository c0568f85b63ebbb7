use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use fovcheck::prelude::*;
use serde::Serialize;
use serde_json::json;
use std::path::PathBuf;
use tracing_subscriber::fmt::SubscriberBuilder;

mod io;
mod provenance;

use provenance::Provenance;

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Field-of-view containment runner")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Classify query directions against a footprint polygon
    Classify {
        /// CSV with `cone`,`clock` columns: the vertex ring
        #[arg(long)]
        vertices: PathBuf,
        /// CSV with `cone`,`clock` columns: the query directions
        #[arg(long)]
        queries: PathBuf,
        /// Interior point cone angle
        #[arg(long, default_value_t = 0.0)]
        interior_cone: f64,
        /// Interior point clock angle
        #[arg(long, default_value_t = 0.0)]
        interior_clock: f64,
        /// Angles (inputs and interior) are in degrees
        #[arg(long)]
        degrees: bool,
        #[arg(long, value_enum, default_value_t = Accel::Tree)]
        accel: Accel,
        #[arg(long, default_value_t = 4)]
        max_leaf_edges: usize,
        #[arg(long, default_value_t = 16)]
        max_depth: usize,
        /// Classify on the rayon thread pool
        #[arg(long)]
        parallel: bool,
        /// Output path; `.parquet` writes Parquet, anything else CSV
        #[arg(long)]
        out: PathBuf,
    },
    /// Write a random star-shaped footprint as a `cone`,`clock` CSV
    Sample {
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 0)]
        index: u64,
        #[arg(long, default_value_t = 12)]
        vertices: usize,
        /// Center cone angle (radians)
        #[arg(long, default_value_t = 0.0)]
        center_cone: f64,
        /// Center clock angle (radians)
        #[arg(long, default_value_t = 0.0)]
        center_clock: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Accel {
    /// Linear scan over all edges
    #[value(name = "none")]
    Off,
    Array,
    Tree,
}

#[derive(Serialize)]
struct Summary {
    queries: usize,
    inside: usize,
    outside: usize,
    boundary: usize,
    edges: usize,
    accelerator: &'static str,
    interior_on_boundary: bool,
    output: String,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Classify {
            vertices,
            queries,
            interior_cone,
            interior_clock,
            degrees,
            accel,
            max_leaf_edges,
            max_depth,
            parallel,
            out,
        } => {
            let interior = if degrees {
                ConeClock::from_degrees(interior_cone, interior_clock)
            } else {
                ConeClock::new(interior_cone, interior_clock)
            };
            let kind = match accel {
                Accel::Off => None,
                Accel::Array => Some(AcceleratorKind::SliceArray),
                Accel::Tree => Some(AcceleratorKind::SliceTree(SliceTreeCfg {
                    max_leaf_edges,
                    max_depth,
                })),
            };
            classify(ClassifyArgs {
                vertices,
                queries,
                interior,
                degrees,
                kind,
                parallel,
                out,
            })
        }
        Action::Sample {
            out,
            seed,
            index,
            vertices,
            center_cone,
            center_clock,
        } => sample(
            out,
            ReplayToken::new(seed, index),
            vertices,
            ConeClock::new(center_cone, center_clock),
        ),
        Action::Report => report(),
    }
}

struct ClassifyArgs {
    vertices: PathBuf,
    queries: PathBuf,
    interior: ConeClock,
    degrees: bool,
    kind: Option<AcceleratorKind>,
    parallel: bool,
    out: PathBuf,
}

fn classify(args: ClassifyArgs) -> Result<()> {
    let ring = io::read_cone_clock(&args.vertices, args.degrees)?;
    let points = io::read_cone_clock(&args.queries, args.degrees)?;
    tracing::info!(
        vertices = ring.len(),
        queries = points.len(),
        accel = ?args.kind,
        parallel = args.parallel,
        "classify"
    );

    let mut builder = SlicedPolygon::builder()
        .cone_clock_vertices(&ring)
        .interior(args.interior.to_unit());
    if let Some(kind) = args.kind {
        builder = builder.accelerator(kind);
    }
    let polygon = builder
        .build()
        .with_context(|| format!("building polygon from {}", args.vertices.display()))?;

    let dirs: Vec<Vec3<f64>> = points.iter().map(|p| p.to_unit()).collect();
    let labels = if args.parallel {
        polygon.par_contains_many(&dirs)
    } else {
        polygon.contains_many(&dirs)
    };

    let mut df = io::to_frame(&points, Some(&labels))?;
    io::write_frame(&args.out, &mut df)?;

    let accelerator = polygon.accelerator().map_or("none", |i| i.name());
    let count = |c: Containment| labels.iter().filter(|&&l| l == c).count();
    let summary = Summary {
        queries: labels.len(),
        inside: count(Containment::Inside),
        outside: count(Containment::Outside),
        boundary: count(Containment::OnBoundary),
        edges: polygon.num_edges(),
        accelerator,
        interior_on_boundary: polygon.interior_on_boundary(),
        output: args.out.to_string_lossy().into_owned(),
    };
    Provenance::new(json!({
        "interior": { "cone": args.interior.cone, "clock": args.interior.clock },
        "degrees": args.degrees,
        "accelerator": accelerator,
        "parallel": args.parallel,
        "summary": &summary,
    }))
    .input(&args.vertices)
    .input(&args.queries)
    .write_next_to(&args.out)?;
    tracing::info!(
        inside = summary.inside,
        outside = summary.outside,
        boundary = summary.boundary,
        "classified"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn sample(out: PathBuf, tok: ReplayToken, vertices: usize, center: ConeClock) -> Result<()> {
    tracing::info!(seed = tok.seed, index = tok.index, vertices, "sample");
    let cfg = StarCfg {
        vertex_count: VertexCount::Fixed(vertices),
        ..StarCfg::default()
    };
    let star = draw_star(cfg, center, tok);
    let mut df = io::to_frame(&star.cone_clock(), None)?;
    io::write_frame(&out, &mut df)?;

    let interior = ConeClock::from_unit(&star.interior());
    Provenance::new(json!({
        "seed": tok.seed,
        "index": tok.index,
        "vertices": star.local.len(),
        "interior": { "cone": interior.cone, "clock": interior.clock },
    }))
    .write_next_to(&out)?;
    println!(
        "{}",
        serde_json::to_string_pretty(&json!({
            "output": out.to_string_lossy(),
            "interior": { "cone": interior.cone, "clock": interior.clock },
        }))?
    );
    Ok(())
}

fn report() -> Result<()> {
    let record = Provenance::new(json!({}));
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
