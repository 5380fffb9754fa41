//! World exploration: throttled player movement, encounter rolls, camera framing.
//!
//! The controller owns the player's position and facing while the party is on
//! the world map. It is driven once per simulation tick with the set of held
//! directions and never looks at a clock.
mod camera;
mod encounter;

pub use camera::{CameraFrame, VisibleLocation};
pub use encounter::{Encounter, EncounterError, spawn_roster};

use tracing::debug;

use crate::config::GameConfig;
use crate::env::RngOracle;
use crate::state::{Direction, Facing, Position};
use crate::world::WorldModel;

/// What a tick of the movement controller did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// The cooldown has not elapsed yet.
    Waiting,
    /// A step was due but no direction is held.
    Idle,
    /// Every held direction was blocked. Facing follows the last attempt.
    Blocked { facing: Facing },
    /// The player moved onto a new tile.
    Moved { position: Position, facing: Facing },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovementController {
    position: Position,
    facing: Facing,
    /// Ticks since the last accepted step.
    ticks_since_step: u32,
    move_delay: u32,
}

impl MovementController {
    pub fn new(position: Position, config: &GameConfig) -> Self {
        Self {
            position,
            facing: Facing::default(),
            ticks_since_step: 0,
            move_delay: config.move_delay_ticks,
        }
    }

    /// Spawns on the configured start tile, or the map centre if none is set.
    pub fn spawn(world: &WorldModel, config: &GameConfig) -> Self {
        let start = match (config.start_position, world.dimensions()) {
            (Some(position), _) => world.wrap(position.x, position.y),
            (None, Some(dims)) => dims.center(),
            (None, None) => Position::ORIGIN,
        };
        Self::new(start, config)
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Teleports without a walkability check, wrapping onto the map.
    pub fn place(&mut self, position: Position, world: &WorldModel) {
        self.position = world.wrap(position.x, position.y);
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    /// Attempts a single-tile move.
    ///
    /// Facing always follows the attempted delta, even when the destination
    /// is blocked. The position is committed only onto walkable terrain.
    pub fn try_move(&mut self, dx: i32, dy: i32, world: &WorldModel) -> bool {
        if let Some(facing) = Facing::from_delta(dx, dy) {
            self.facing = facing;
        }

        let destination = world.wrap(self.position.x + dx, self.position.y + dy);
        if !world.is_walkable(destination.x, destination.y) {
            return false;
        }
        self.position = destination;
        true
    }

    /// Advances one simulation tick.
    ///
    /// Once `move_delay` ticks have passed since the last accepted step, held
    /// directions are tried in [`Direction::POLL_ORDER`] and the first one
    /// that can move wins. Blocked attempts do not reset the cooldown, so the
    /// next tick retries immediately.
    pub fn tick(&mut self, held: &[Direction], world: &WorldModel) -> StepOutcome {
        self.ticks_since_step = self.ticks_since_step.saturating_add(1);
        if self.ticks_since_step < self.move_delay {
            return StepOutcome::Waiting;
        }

        let mut attempted = false;
        for direction in Direction::POLL_ORDER {
            if !held.contains(&direction) {
                continue;
            }
            attempted = true;
            let (dx, dy) = direction.delta();
            if self.try_move(dx, dy, world) {
                self.ticks_since_step = 0;
                return StepOutcome::Moved {
                    position: self.position,
                    facing: self.facing,
                };
            }
        }

        if attempted {
            StepOutcome::Blocked {
                facing: self.facing,
            }
        } else {
            StepOutcome::Idle
        }
    }

    /// Rolls for a random encounter on the current tile.
    ///
    /// Call once per accepted step. Each roll is an independent d100 against
    /// the tile's rate; a rate of 0 consumes no randomness.
    pub fn roll_encounter<R>(&self, world: &WorldModel, rng: &mut R) -> Option<Encounter>
    where
        R: RngOracle + ?Sized,
    {
        let profile = world.encounter_profile(self.position.x, self.position.y)?;
        if profile.rate == 0 {
            return None;
        }

        let roll = rng.roll_percent();
        if roll >= u32::from(profile.rate) {
            return None;
        }

        debug!(
            target: "game_core::explore",
            position = %self.position,
            zone = profile.zone,
            roll,
            rate = profile.rate,
            "encounter triggered"
        );
        Some(Encounter {
            zone: profile.zone,
            position: self.position,
            battle_background: profile.battle_background,
        })
    }

    /// Camera framing around the player for a viewport of the given size.
    pub fn camera_frame(
        &self,
        world: &WorldModel,
        tiles_wide: u32,
        tiles_high: u32,
    ) -> Option<CameraFrame> {
        CameraFrame::around(world, self.position, tiles_wide, tiles_high)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::world::{TerrainTable, TerrainType, TileGrid};
    use crate::state::MapDimensions;

    fn open_world(size: u32, rate: u8) -> WorldModel {
        let grid = TileGrid::filled(MapDimensions::new(size, size), 1).unwrap();
        let table = TerrainTable::new([
            TerrainType::new(0, "Ocean", false),
            TerrainType::new(1, "Plains", true).with_encounters(rate, 2),
        ]);
        WorldModel::new(&GameConfig::default())
            .with_grid(grid)
            .with_terrain_table(table)
    }

    #[test]
    fn moving_left_from_the_edge_wraps() {
        let world = open_world(64, 0);
        let mut hero = MovementController::new(Position::new(0, 5), &GameConfig::default());
        assert!(hero.try_move(-1, 0, &world));
        assert_eq!(hero.position(), Position::new(63, 5));
        assert_eq!(hero.facing(), Facing::Left);
    }

    #[test]
    fn blocked_move_still_turns() {
        let mut grid = TileGrid::filled(MapDimensions::new(8, 8), 1).unwrap();
        grid.set(3, 2, 0);
        let world = WorldModel::new(&GameConfig::default()).with_grid(grid);
        let mut hero = MovementController::new(Position::new(3, 3), &GameConfig::default());

        assert!(!hero.try_move(0, -1, &world));
        assert_eq!(hero.position(), Position::new(3, 3));
        assert_eq!(hero.facing(), Facing::Up);
    }

    #[test]
    fn steps_are_throttled_by_the_cooldown() {
        let world = open_world(16, 0);
        let config = GameConfig::with_move_delay(3);
        let mut hero = MovementController::new(Position::new(4, 4), &config);
        let held = [Direction::Right];

        assert_eq!(hero.tick(&held, &world), StepOutcome::Waiting);
        assert_eq!(hero.tick(&held, &world), StepOutcome::Waiting);
        assert_eq!(
            hero.tick(&held, &world),
            StepOutcome::Moved {
                position: Position::new(5, 4),
                facing: Facing::Right
            }
        );
        assert_eq!(hero.tick(&held, &world), StepOutcome::Waiting);
    }

    #[test]
    fn poll_order_falls_through_blocked_directions() {
        let mut grid = TileGrid::filled(MapDimensions::new(8, 8), 1).unwrap();
        grid.set(2, 1, 3);
        let world = WorldModel::new(&GameConfig::default()).with_grid(grid);
        let mut hero = MovementController::new(Position::new(2, 2), &GameConfig::with_move_delay(1));

        let outcome = hero.tick(&[Direction::Left, Direction::Up], &world);
        assert_eq!(
            outcome,
            StepOutcome::Moved {
                position: Position::new(1, 2),
                facing: Facing::Left
            }
        );
        assert_eq!(hero.tick(&[], &world), StepOutcome::Idle);
    }

    #[test]
    fn zero_rate_never_triggers() {
        let world = open_world(32, 0);
        let mut hero = MovementController::new(Position::new(0, 0), &GameConfig::default());
        let mut rng = PcgRng::new(11);
        for _ in 0..10_000 {
            assert!(hero.try_move(1, 0, &world));
            assert!(hero.roll_encounter(&world, &mut rng).is_none());
        }
    }

    #[test]
    fn full_rate_always_triggers() {
        let world = open_world(32, 100);
        let mut hero = MovementController::new(Position::new(0, 0), &GameConfig::default());
        let mut rng = PcgRng::new(12);
        for _ in 0..1_000 {
            assert!(hero.try_move(0, 1, &world));
            let encounter = hero.roll_encounter(&world, &mut rng).unwrap();
            assert_eq!(encounter.zone, 2);
        }
    }

    #[test]
    fn spawn_defaults_to_map_centre() {
        let world = open_world(20, 0);
        let hero = MovementController::spawn(&world, &GameConfig::default());
        assert_eq!(hero.position(), Position::new(10, 10));
    }
}
