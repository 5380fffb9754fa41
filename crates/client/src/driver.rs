//! Headless driver: walks a fixed route, lets a [`CommandProvider`] fight
//! every battle, and tallies what happened.
use anyhow::{Result, bail};
use tracing::{debug, info};

use game_core::{
    Direction, Projector, Rgb, RngOracle, TerrainTable, TerrainTexture, TextureImage,
};
use runtime::{CommandProvider, GameEvent, GameSession, SessionEvent, SessionState};

/// Directions walked in turn; the walker moves on after each leg or as soon
/// as a step is blocked.
const ROUTE: [Direction; 6] = [
    Direction::Right,
    Direction::Down,
    Direction::Right,
    Direction::Up,
    Direction::Left,
    Direction::Down,
];

/// Dispatches per battle before the driver gives up on it.
const MAX_BATTLE_COMMANDS: usize = 1_000;

/// Running totals for one simulation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SimReport {
    pub ticks: u64,
    pub steps: u64,
    pub blocked: u64,
    pub encounters: u32,
    pub aborted: u32,
    pub victories: u32,
    pub defeats: u32,
    pub experience: u32,
    pub gold: u32,
    pub locations: Vec<String>,
}

pub struct Simulation<R, P> {
    session: GameSession<R>,
    provider: P,
    leg_ticks: u64,
    leg: usize,
    leg_elapsed: u64,
    report: SimReport,
}

impl<R: RngOracle, P: CommandProvider> Simulation<R, P> {
    /// Each leg of the route lasts long enough for `steps_per_leg` steps.
    pub fn new(session: GameSession<R>, provider: P, steps_per_leg: u64) -> Self {
        let delay = u64::from(session.context().config.move_delay_ticks.max(1));
        Self {
            session,
            provider,
            leg_ticks: steps_per_leg.max(1) * delay,
            leg: 0,
            leg_elapsed: 0,
            report: SimReport::default(),
        }
    }

    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    pub fn report(&self) -> &SimReport {
        &self.report
    }

    /// Runs `ticks` world ticks. Battles resolve in between and do not count
    /// against the tick budget.
    pub fn run(&mut self, ticks: u64) -> Result<&SimReport> {
        self.hold(ROUTE[self.leg])?;
        for _ in 0..ticks {
            self.step()?;
        }
        Ok(&self.report)
    }

    fn step(&mut self) -> Result<()> {
        self.report.ticks += 1;
        self.leg_elapsed += 1;

        let events = self.session.dispatch(GameEvent::Tick)?;
        let mut turn = self.leg_elapsed >= self.leg_ticks;
        for event in events {
            turn |= matches!(event, SessionEvent::Blocked { .. });
            self.record(event);
        }

        if self.session.state() == SessionState::Battle {
            self.fight()?;
            // Held input is cleared when a battle starts.
            self.hold(ROUTE[self.leg])?;
        }
        if turn {
            self.next_leg()?;
        }
        Ok(())
    }

    fn fight(&mut self) -> Result<()> {
        for _ in 0..MAX_BATTLE_COMMANDS {
            match self.session.state() {
                SessionState::Battle => {
                    let Some(battle) = self.session.battle() else {
                        bail!("session is in battle without a battle engine");
                    };
                    let command = self.provider.next_command(battle);
                    for event in self.session.dispatch(GameEvent::Battle(command))? {
                        self.record(event);
                    }
                }
                SessionState::BattleOver | SessionState::GameOver => {
                    self.session.dispatch(GameEvent::Confirm)?;
                    return Ok(());
                }
                SessionState::Exploring => return Ok(()),
            }
        }
        bail!("battle did not finish within {MAX_BATTLE_COMMANDS} commands")
    }

    fn hold(&mut self, direction: Direction) -> Result<()> {
        self.session.dispatch(GameEvent::Press(direction))?;
        Ok(())
    }

    fn next_leg(&mut self) -> Result<()> {
        self.session.dispatch(GameEvent::Release(ROUTE[self.leg]))?;
        self.leg = (self.leg + 1) % ROUTE.len();
        self.leg_elapsed = 0;
        self.hold(ROUTE[self.leg])
    }

    fn record(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Moved { position, .. } => {
                self.report.steps += 1;
                debug!(%position, "moved");
            }
            SessionEvent::Blocked { facing } => {
                self.report.blocked += 1;
                debug!(%facing, "blocked");
            }
            SessionEvent::EnteredLocation { name, first_visit } => {
                info!(location = %name, first_visit, "entered location");
                if first_visit {
                    self.report.locations.push(name);
                }
            }
            SessionEvent::EncounterStarted { zone, enemies, .. } => {
                self.report.encounters += 1;
                info!(zone, ?enemies, "encounter");
            }
            SessionEvent::EncounterAborted { zone } => {
                self.report.aborted += 1;
                info!(zone, "encounter aborted");
            }
            SessionEvent::BattleMessage(message) => debug!(%message),
            SessionEvent::BattleEnded(result) => {
                if result.victory {
                    self.report.victories += 1;
                    self.report.experience += result.total_exp;
                    self.report.gold += result.total_gold;
                }
                info!(
                    victory = result.victory,
                    exp = result.total_exp,
                    gold = result.total_gold,
                    "battle ended"
                );
            }
            SessionEvent::GameOver => {
                self.report.defeats += 1;
                info!("game over, party restored");
            }
        }
    }
}

/// Renders one Mode7 frame looking out from the player's tile.
///
/// Returns `None` before the world has a grid.
pub fn render_view<R>(
    session: &GameSession<R>,
    screen_width: u32,
    screen_height: u32,
    tile_size: u32,
) -> Option<Vec<Rgb>>
where
    R: RngOracle,
{
    let world = &session.context().world;
    let grid = world.grid()?;
    let fallback = TerrainTable::default();
    let table = world.terrain_table().unwrap_or(&fallback);
    let tile_size = tile_size.max(1);
    let texture = TextureImage::from_grid(grid, table, tile_size);

    let mut projector = Projector::new(
        screen_width,
        screen_height,
        texture.width(),
        texture.height(),
    );
    let player = session.context().player_position();
    let camera = projector.camera_mut();
    camera.x = (player.x as f32 + 0.5) * tile_size as f32;
    camera.y = (player.y as f32 + 0.5) * tile_size as f32;

    Some(projector.render(Some(&texture as &dyn TerrainTexture)))
}

/// Mean color of a frame.
pub fn average_color(frame: &[Rgb]) -> Rgb {
    if frame.is_empty() {
        return Rgb::default();
    }
    let (r, g, b) = frame.iter().fold((0u64, 0u64, 0u64), |(r, g, b), px| {
        (r + u64::from(px.r), g + u64::from(px.g), b + u64::from(px.b))
    });
    let n = frame.len() as u64;
    Rgb::new((r / n) as u8, (g / n) as u8, (b / n) as u8)
}
