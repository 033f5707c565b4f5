//! disha-route - plan a walking route on a floor plan
//!
//! Prints the instruction sequence between two nodes and, given a position
//! trace, replays it through a navigation session, rerouting whenever the
//! walker strays.
//!
//! Usage:
//!   disha-route --map maps/clinic.yaml --from entrance --to pharmacy
//!   disha-route --map maps/clinic.yaml --from entrance --to pharmacy --trace walk.yaml

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{info, warn};

use disha_nav::{FloorPlan, NavConfig, Navigator, PositionSample, Result, RouteGuidance, TrackerEvent};

/// Indoor route planner
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Floor plan file (YAML)
    #[arg(short, long)]
    map: PathBuf,

    /// Configuration file (defaults to disha.toml when present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Start node id
    #[arg(long)]
    from: String,

    /// Goal node id
    #[arg(long)]
    to: String,

    /// Position trace to replay (YAML list of {x, y, timestamp})
    #[arg(long)]
    trace: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("disha_nav=info")),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {:?}", path);
            NavConfig::load(path)?
        }
        None if Path::new("disha.toml").exists() => {
            info!("Loading configuration from disha.toml");
            NavConfig::load(Path::new("disha.toml"))?
        }
        None => {
            info!("Using default configuration");
            NavConfig::default()
        }
    };

    info!("DishaNav v{}", env!("CARGO_PKG_VERSION"));

    let plan = FloorPlan::load(&args.map)?;
    let navigator = Navigator::with_floor_plan(config, &plan)?;

    let guidance = navigator.route(&args.from, &args.to)?;
    print_guidance(&guidance);

    if let Some(trace) = &args.trace {
        replay(&navigator, guidance, trace, &args.to)?;
    }

    Ok(())
}

fn print_guidance(guidance: &RouteGuidance) {
    println!(
        "Route {} -> {} ({:.1} m)",
        guidance.start_node, guidance.goal_node, guidance.total_distance
    );
    if guidance.is_empty() {
        println!("  You are already at your destination");
    }
    for (i, step) in guidance.instructions.iter().enumerate() {
        if step.kind.is_crossing() {
            println!("  {:>2}. [{}] {}", i + 1, step.kind.label(), step.text);
        } else {
            println!(
                "  {:>2}. [{}] {} ({:.1} m)",
                i + 1,
                step.kind.label(),
                step.text,
                step.meters()
            );
        }
    }
}

/// Feed a recorded position trace through a session.
fn replay(navigator: &Navigator, guidance: RouteGuidance, trace: &Path, goal: &str) -> Result<()> {
    let content = std::fs::read_to_string(trace)?;
    let samples: Vec<PositionSample> = serde_yaml::from_str(&content)?;
    info!("Replaying {} position samples", samples.len());

    let (mut session, handle, events) = navigator.session(guidance);

    for sample in samples {
        if handle.send_position(sample).is_err() {
            break;
        }
        session.pump();

        for event in events.try_iter() {
            match &event {
                TrackerEvent::Advance { index } => println!("t={}: next instruction {}", sample.timestamp, index + 1),
                TrackerEvent::Arrived { .. } => println!("t={}: arrived", sample.timestamp),
                TrackerEvent::ReplanNeeded(request) => {
                    println!(
                        "t={}: off route at ({:.1}, {:.1}), replanning",
                        sample.timestamp, request.position.x, request.position.y
                    );
                    match navigator.reroute(request, goal) {
                        Ok(new_route) => {
                            print_guidance(&new_route);
                            if handle.reroute(new_route).is_err() {
                                break;
                            }
                            session.pump();
                        }
                        Err(e) => warn!("Replanning failed [{}]: {}", e.code(), e),
                    }
                }
            }
        }

        if session.tracker().state().is_terminal() {
            break;
        }
    }

    println!("Session ended in state {}", session.tracker().state().name());
    Ok(())
}
