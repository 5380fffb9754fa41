use tracing::debug;

use crate::config::GameConfig;
use crate::env::{EnemyCatalog, RngOracle};
use crate::error::{ErrorSeverity, GameError};
use crate::state::{Enemy, Position};

/// A random encounter raised by an accepted step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Encounter {
    pub zone: u32,
    pub position: Position,
    /// Backdrop hint taken from the terrain the step landed on.
    pub battle_background: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("no enemy templates for encounter zone {0}")]
    NoTemplatesForZone(u32),
}

impl GameError for EncounterError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            EncounterError::NoTemplatesForZone(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            EncounterError::NoTemplatesForZone(_) => "ENCOUNTER_NO_TEMPLATES",
        }
    }
}

/// Draws the enemy roster for an encounter in `zone`.
///
/// The roster size is uniform over `1..=MAX_ENCOUNTER_SIZE`, and each enemy is
/// picked uniformly, with replacement, from the templates tagged with the
/// zone. A zone without templates aborts the encounter.
pub fn spawn_roster<R>(
    catalog: &EnemyCatalog,
    zone: u32,
    rng: &mut R,
) -> Result<Vec<Enemy>, EncounterError>
where
    R: RngOracle + ?Sized,
{
    let pool = catalog.for_zone(zone);
    if pool.is_empty() {
        return Err(EncounterError::NoTemplatesForZone(zone));
    }

    let count = 1 + rng.below(GameConfig::MAX_ENCOUNTER_SIZE);
    let roster: Vec<Enemy> = (0..count)
        .map(|_| pool[rng.below(pool.len() as u32) as usize].spawn())
        .collect();

    debug!(
        target: "game_core::explore",
        zone,
        enemies = ?roster.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        "encounter roster"
    );
    Ok(roster)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::PcgRng;
    use crate::state::EnemyTemplate;

    fn catalog() -> EnemyCatalog {
        let template = |id: u32, name: &str, zones: &[u32]| EnemyTemplate {
            id,
            name: name.into(),
            level: 1,
            max_hp: 20,
            attack: 6,
            defense: 2,
            magic: 0,
            speed: 3,
            exp_reward: 8,
            gold_reward: 4,
            texture: String::new(),
            encounter_zones: zones.iter().copied().collect(),
        };
        EnemyCatalog::new(vec![
            template(1, "Guard", &[1]),
            template(2, "Lobo", &[1, 2]),
            template(3, "Were-Rat", &[2]),
        ])
    }

    #[test]
    fn empty_zone_aborts() {
        let mut rng = PcgRng::new(3);
        assert_eq!(
            spawn_roster(&catalog(), 9, &mut rng),
            Err(EncounterError::NoTemplatesForZone(9))
        );
        assert!(EncounterError::NoTemplatesForZone(9).severity().is_recoverable());
    }

    #[test]
    fn rosters_come_from_the_zone_pool() {
        let catalog = catalog();
        let mut rng = PcgRng::new(4);
        let mut sizes = [false; 3];
        for _ in 0..500 {
            let roster = spawn_roster(&catalog, 1, &mut rng).unwrap();
            assert!((1..=3).contains(&roster.len()));
            sizes[roster.len() - 1] = true;
            assert!(roster.iter().all(|e| e.name == "Guard" || e.name == "Lobo"));
            assert!(roster.iter().all(|e| e.hp.current == 20));
        }
        assert_eq!(sizes, [true; 3]);
    }
}
