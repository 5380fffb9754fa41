//! Starting party loader.

use std::path::Path;

use game_core::{Character, GameConfig, ResourceMeter};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// One party member as written in `party.ron`.
///
/// Level, HP and MP fall back to the configured starting values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartyMemberSpec {
    pub name: String,
    #[serde(default)]
    pub level: Option<u32>,
    #[serde(default)]
    pub max_hp: Option<u32>,
    #[serde(default)]
    pub max_mp: Option<u32>,
    pub attack: u32,
    pub defense: u32,
    pub magic: u32,
    pub speed: u32,
}

impl PartyMemberSpec {
    pub fn build(&self, config: &GameConfig) -> Character {
        let mut character = Character::new(self.name.clone(), config).with_combat_stats(
            self.attack,
            self.defense,
            self.magic,
            self.speed,
        );
        if let Some(level) = self.level {
            character.level = level.max(1);
        }
        if let Some(max_hp) = self.max_hp {
            character.hp = ResourceMeter::full(max_hp);
        }
        if let Some(max_mp) = self.max_mp {
            character.mp = ResourceMeter::full(max_mp);
        }
        character
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PartyRon {
    members: Vec<PartyMemberSpec>,
}

/// Loader for the starting party from RON files.
pub struct PartyLoader;

impl PartyLoader {
    pub fn load(path: &Path, config: &GameConfig) -> LoadResult<Vec<Character>> {
        let content = read_file(path)?;
        let party: PartyRon = ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse party RON {}: {}", path.display(), e))?;

        if party.members.is_empty() {
            anyhow::bail!("Party file {} lists no members", path.display());
        }
        Ok(party
            .members
            .iter()
            .map(|member| member.build(config))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_inherit_configured_starting_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("party.ron");
        std::fs::write(
            &path,
            r#"(members: [
                (name: "Terra", attack: 12, defense: 8, magic: 16, speed: 11),
                (name: "Sabin", max_hp: 140, attack: 18, defense: 11, magic: 6, speed: 9),
            ])"#,
        )
        .unwrap();

        let config = GameConfig {
            starting_hp: 90,
            ..GameConfig::default()
        };
        let party = PartyLoader::load(&path, &config).unwrap();
        assert_eq!(party.len(), 2);
        assert_eq!(party[0].hp, ResourceMeter::full(90));
        assert_eq!(party[0].magic, 16);
        assert_eq!(party[1].hp, ResourceMeter::full(140));
        assert_eq!(party[1].mp, ResourceMeter::full(50));
    }

    #[test]
    fn empty_party_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("party.ron");
        std::fs::write(&path, "(members: [])").unwrap();
        assert!(PartyLoader::load(&path, &GameConfig::default()).is_err());
    }
}
