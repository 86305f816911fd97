mod view_app;

use baubles_core::{body_states, build_scene, step_scene, SceneConfig};
use clap::{Parser, Subcommand};
use glam::Vec2;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "baubles")]
#[command(about = "Bouncing bauble simulation driven by a pointer light", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation headless and print the final body positions
    Run {
        /// Path to a YAML scene config
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Number of frames to simulate
        #[arg(short, long, default_value_t = 600)]
        frames: u64,
        /// Frame delta in seconds
        #[arg(long, default_value_t = 1.0 / 60.0)]
        dt: f32,
        /// Override the seed from the config
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Open an interactive window, the mouse moves the attractor
    View {
        /// Path to a YAML scene config, reloaded when it changes
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the default scene config as YAML
    Config,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            frames,
            dt,
            seed,
        } => run_headless(config, frames, dt, seed),
        Commands::View { config } => run_viewer(config),
        Commands::Config => print_default_config(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_config(path: Option<&PathBuf>) -> Result<SceneConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(SceneConfig::load(path)?),
        None => Ok(SceneConfig::default()),
    }
}

/// Pointer position for a headless frame, a slow figure eight around the center
fn scripted_pointer(elapsed: f32) -> Vec2 {
    Vec2::new((elapsed * 0.5).sin() * 0.5, (elapsed * 1.0).sin() * 0.3)
}

fn run_headless(
    config: Option<PathBuf>,
    frames: u64,
    dt: f32,
    seed: Option<u64>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !dt.is_finite() || dt < 0.0 {
        return Err(format!("dt must be a non-negative number, got {}", dt).into());
    }

    let mut config = load_config(config.as_ref())?;
    if let Some(seed) = seed {
        config.setup.seed = seed;
    }
    let mut scene = build_scene(&config)?;
    log::info!(
        "running {} frames of {}s with {} bodies",
        frames,
        dt,
        scene.body_count()
    );

    let mut last = None;
    for _ in 0..frames {
        scene.set_pointer(scripted_pointer(scene.elapsed));
        last = Some(step_scene(&mut scene, dt));
    }

    if let Some(stats) = last {
        log::info!(
            "finished at t = {:.3}s: energy {:.4}, overlaps {}, attracted {}",
            stats.elapsed,
            stats.kinetic_energy,
            stats.overlapping_pairs,
            stats.attracted
        );
    }

    println!("target = ({:.4}, {:.4}, {:.4})", scene.target.x, scene.target.y, scene.target.z);
    for state in body_states(&scene) {
        println!(
            "body[{}] = ({:.4}, {:.4}, {:.4})",
            state.index, state.pos.x, state.pos.y, state.pos.z
        );
    }

    Ok(())
}

fn run_viewer(config: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let initial = load_config(config.as_ref())?;
    let options = eframe::NativeOptions::default();
    eframe::run_native(
        "Baubles",
        options,
        Box::new(move |cc| Ok(Box::new(view_app::ViewApp::new(config, initial, cc)))),
    )?;
    Ok(())
}

fn print_default_config() -> Result<(), Box<dyn std::error::Error>> {
    print!("{}", SceneConfig::default().to_yaml_string()?);
    Ok(())
}
