mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use waymark_checkpoint::{Checkpoint, DEFAULT_CHECKPOINT_TYPE};
use waymark_common::Rgba;
use waymark_host::SimulatedWorld;
use waymark_spatial::{
    DEFAULT_BLACKLISTED_NODE_TYPES, ParseVectorError, Spatial, SpatialVec3,
    closest_major_road_node, format_vector, is_point_on_water, nearest_node_type, parse_vector,
};

use crate::config::AppConfig;

#[derive(Parser)]
#[command(name = "waymark-cli", about = "CLI tool for waymark operations")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (YAML, or JSON when the name ends in .json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print version and built-in defaults
    Info,
    /// Parse "x, y, z" text and print it in canonical form
    Parse {
        #[arg(allow_hyphen_values = true)]
        text: String,
    },
    /// Distances and heading between two positions
    Measure {
        #[arg(value_parser = vector_arg, allow_hyphen_values = true)]
        from: Vec3,
        #[arg(value_parser = vector_arg, allow_hyphen_values = true)]
        to: Vec3,
    },
    /// Create, restyle and delete checkpoints against the simulated host
    Session {
        /// Number of checkpoints to place
        #[arg(short = 'n', long, default_value = "3")]
        count: usize,
        /// Distance between consecutive checkpoints along x
        #[arg(short, long, default_value = "25.0")]
        spacing: f32,
    },
}

fn vector_arg(text: &str) -> Result<Vec3, ParseVectorError> {
    parse_vector(text)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Info => {
            println!("waymark-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("common: {}", waymark_common::crate_info());
            println!("host: {}", waymark_host::crate_info());
            println!("spatial: {}", waymark_spatial::crate_info());
            println!("checkpoint: {}", waymark_checkpoint::crate_info());
            println!("default checkpoint type: {DEFAULT_CHECKPOINT_TYPE}");
            println!("default unsafe node types: {DEFAULT_BLACKLISTED_NODE_TYPES:?}");
        }
        Commands::Parse { text } => {
            let v = parse_vector(&text).with_context(|| format!("parsing {text:?}"))?;
            println!("{}", format_vector(v));
        }
        Commands::Measure { from, to } => {
            let world = SimulatedWorld::new(config.terrain.clone());
            println!("distance: {:.3}", from.distance_to(&to));
            println!("distance 2d: {:.3}", from.distance_to_2d(&to));
            println!("travel distance: {:.3}", from.travel_distance_to(&world, &to));
            println!("heading: {:.2}", from.heading_towards(to));
        }
        Commands::Session { count, spacing } => {
            let world = run_session(&config, count, spacing)?;
            println!(
                "host calls: {}, live checkpoints: {}",
                world.events().len(),
                world.checkpoint_count()
            );
        }
    }

    Ok(())
}

/// Runs a full checkpoint lifecycle and hands back the host for inspection.
fn run_session(config: &AppConfig, count: usize, spacing: f32) -> anyhow::Result<SimulatedWorld> {
    let _span = tracing::info_span!("session", count).entered();
    let safety = config.node_safety()?;
    let mut world = SimulatedWorld::new(config.terrain.clone());

    let mut checkpoints: Vec<Checkpoint> = (0..count)
        .map(|i| {
            let position = Vec3::new(i as f32 * spacing, 0.0, 10.0);
            let mut cp = Checkpoint::create(&mut world, position, Rgba::YELLOW, &config.checkpoint);
            cp.set_tag(i);
            cp
        })
        .collect();
    tracing::info!(created = checkpoints.len(), "checkpoints placed");

    for pair in checkpoints.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        println!(
            "{a} -> {b}: distance {:.2}, travel {:.2}, heading {:.1}",
            a.distance_to(b),
            a.travel_distance_to(&world, b),
            a.heading_towards(b)
        );
    }

    if let Some(last) = checkpoints.last_mut() {
        last.set_color(&mut world, Rgba::RED);
        last.set_icon_color(&mut world, Rgba::WHITE);
        last.set_scale(&mut world, 1.5);
    }

    for cp in &checkpoints {
        let position = cp.position();
        println!(
            "{cp} #{} color {} node type {} safe {} water {} nearest road {}",
            cp.tag::<usize>().copied().unwrap_or_default(),
            cp.color(),
            nearest_node_type(&world, position),
            safety.is_node_safe(&world, position),
            is_point_on_water(&world, position),
            format_vector(closest_major_road_node(&world, position)),
        );
    }

    for cp in &mut checkpoints {
        cp.delete(&mut world);
    }
    Ok(world)
}
