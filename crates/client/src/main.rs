//! Headless simulation binary.
//!
//! Loads content from `CONTENT_DATA_DIR`, walks the party around the map for
//! `SIM_TICKS` ticks with the auto-battle policy, then renders one Mode7 view
//! from where the party ended up.
//!
//! ```bash
//! SIM_SEED=7 SIM_TICKS=5000 RUST_LOG=debug cargo run -p rpg-client
//! ```

use anyhow::{Context, Result};
use tracing::info;

use game_content::ContentFactory;
use rpg_client::{SimConfig, Simulation, average_color, render_view};
use runtime::{AutoBattleProvider, GameSession, RandRng};

/// Route legs are this many steps long.
const STEPS_PER_LEG: u64 = 6;
const VIEW_WIDTH: u32 = 320;
const VIEW_HEIGHT: u32 = 240;
const TILE_SIZE: u32 = 16;

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    let config = SimConfig::from_env();
    info!(
        data_dir = %config.data_dir.display(),
        map = %config.map,
        seed = ?config.seed,
        ticks = config.ticks,
        "starting simulation"
    );

    let bundle = ContentFactory::new(&config.data_dir)
        .load_all(&config.map)
        .with_context(|| format!("loading content from {}", config.data_dir.display()))?;

    let rng = match config.seed {
        Some(seed) => RandRng::seeded(seed),
        None => RandRng::from_entropy(),
    };
    let session = GameSession::builder(rng).content(bundle).build()?;

    let mut simulation = Simulation::new(session, AutoBattleProvider, STEPS_PER_LEG);
    let report = simulation.run(config.ticks)?.clone();
    info!(
        ticks = report.ticks,
        steps = report.steps,
        blocked = report.blocked,
        encounters = report.encounters,
        aborted = report.aborted,
        victories = report.victories,
        defeats = report.defeats,
        exp = report.experience,
        gold = report.gold,
        locations = ?report.locations,
        "simulation finished"
    );

    let session = simulation.session();
    for character in &session.context().party {
        info!(
            name = %character.name,
            level = character.level,
            hp = %character.hp,
            exp = character.experience,
            "party member"
        );
    }

    if let Some(frame) = render_view(session, VIEW_WIDTH, VIEW_HEIGHT, TILE_SIZE) {
        let average = average_color(&frame);
        info!(
            position = %session.context().player_position(),
            pixels = frame.len(),
            r = average.r,
            g = average.g,
            b = average.b,
            "rendered mode7 view"
        );
    }

    Ok(())
}

/// Logs to stderr, filtered by `RUST_LOG` with `info` as the floor.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}
