use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use smokefly::{
    config::{ConfigLoader, GameConfig},
    engine::{EngineBuilder, EngineSettings},
    input::{InputIntent, InputSource, ScriptLoader},
    render::plan_frame,
    session::Session,
    snapshot::SaveGame,
};

#[derive(Debug, Parser)]
#[command(author, version, about = "Smokefly headless runner")]
struct Cli {
    /// Path to the game config YAML file
    #[arg(long, default_value = "configs/default.yaml")]
    config: PathBuf,

    /// Maximum number of frames to simulate
    #[arg(long, default_value_t = 500)]
    frames: u64,

    /// Input script (YAML list of steps); without one the player stands still
    #[arg(long)]
    script: Option<PathBuf>,

    /// Resume from a save file
    #[arg(long)]
    load: Option<PathBuf>,

    /// Write the final world to this save file
    #[arg(long)]
    save: Option<PathBuf>,

    /// Override the autosave directory
    #[arg(long)]
    save_dir: Option<PathBuf>,

    /// Override the autosave interval in frames
    #[arg(long)]
    autosave: Option<u64>,

    /// Override the terrain seed
    #[arg(long)]
    seed: Option<u64>,

    /// Hold the configured framerate instead of running flat out
    #[arg(long)]
    realtime: bool,

    /// Print the final view as ASCII
    #[arg(long)]
    ascii: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = ConfigLoader::new(".").load(&cli.config)?;
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    if let Some(dir) = &cli.save_dir {
        config.snapshot.output_dir = dir.display().to_string();
    }
    if let Some(interval) = cli.autosave {
        config.snapshot.interval_frames = interval;
    }
    init_tracing(&config.logging.level);

    let (mut session, session_name) = match &cli.load {
        Some(path) => {
            let save = SaveGame::read_from(path)
                .with_context(|| format!("Failed to load save {}", path.display()))?;
            let name = session_name_for(&config, Some(&save));
            info!(
                path = %path.display(),
                session = %name,
                tiles = save.metadata.tile_count,
                frame = save.player.frame_number,
                "save_loaded"
            );
            (Session::resume(&config, save.into_world()), name)
        }
        None => (Session::new(&config), session_name_for(&config, None)),
    };

    let mut input: Box<dyn InputSource> = match &cli.script {
        Some(path) => Box::new(ScriptLoader::new(".").load(path)?),
        None => Box::new(|_frame: u64| InputIntent::idle()),
    };

    let mut engine = EngineBuilder::new(EngineSettings::from_config(&session_name, &config))
        .realtime(cli.realtime)
        .build();
    let summary = engine.run(&mut session, input.as_mut(), cli.frames)?;

    if cli.ascii {
        let player_tile = session.world().player_tile();
        let frame = session.world().frame_number();
        let (viewport, landscape) = session.render_view();
        print!("{}", plan_frame(frame, viewport, landscape).to_ascii(player_tile));
    }

    if let Some(path) = &cli.save {
        SaveGame::capture(&session_name, session.world())
            .write_to(path)
            .with_context(|| format!("Failed to write save {}", path.display()))?;
        info!(path = %path.display(), "save_written");
    }

    let world = session.world();
    println!(
        "Ran {} frames{}. Asphalt: {}, paved tiles: {}, tiles generated: {}",
        summary.frames,
        if summary.escaped { " (quit)" } else { "" },
        world.asphalt_count(),
        world.landscape.paved_count(),
        world.landscape.len()
    );
    Ok(())
}

/// A loaded game keeps writing under the session it was saved from.
fn session_name_for(config: &GameConfig, loaded: Option<&SaveGame>) -> String {
    match loaded {
        Some(save) => save.metadata.session.clone(),
        None => format!("seed_{}", config.seed),
    }
}

fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
