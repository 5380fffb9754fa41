use crate::state::EnemyTemplate;

/// Flat table of enemy archetypes keyed by id.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EnemyCatalog {
    templates: Vec<EnemyTemplate>,
}

impl EnemyCatalog {
    pub fn new(templates: Vec<EnemyTemplate>) -> Self {
        Self { templates }
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn templates(&self) -> &[EnemyTemplate] {
        &self.templates
    }

    pub fn by_id(&self, id: u32) -> Option<&EnemyTemplate> {
        self.templates.iter().find(|template| template.id == id)
    }

    /// Templates eligible for the given encounter zone, in table order.
    pub fn for_zone(&self, zone: u32) -> Vec<&EnemyTemplate> {
        self.templates
            .iter()
            .filter(|template| template.appears_in(zone))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template(id: u32, zones: &[u32]) -> EnemyTemplate {
        EnemyTemplate {
            id,
            name: format!("enemy-{id}"),
            level: 1,
            max_hp: 10,
            attack: 5,
            defense: 1,
            magic: 0,
            speed: 1,
            exp_reward: 5,
            gold_reward: 2,
            texture: String::new(),
            encounter_zones: zones.iter().copied().collect(),
        }
    }

    #[test]
    fn zone_filter_keeps_table_order() {
        let catalog = EnemyCatalog::new(vec![template(1, &[1]), template(2, &[2]), template(3, &[1, 2])]);
        let ids: Vec<u32> = catalog.for_zone(1).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert!(catalog.for_zone(9).is_empty());
        assert_eq!(catalog.by_id(2).map(|t| t.name.as_str()), Some("enemy-2"));
    }
}
