//! Entity deduplicator for removing duplicate entities.

use crate::entity_extraction::pipeline::{EntityPostProcessor, RawEntity};
use std::collections::HashSet;

/// Removes entities whose text and label repeat an earlier entity
///
/// Comparison is case-sensitive: `ab1234` and `AB1234` are different codes.
#[derive(Debug, Clone)]
pub struct EntityDeduplicator {
    name: String,
}

impl EntityDeduplicator {
    /// Create a new entity deduplicator
    pub fn new() -> Self {
        Self {
            name: "entity_deduplicator".to_string(),
        }
    }

    fn create_key(entity: &RawEntity) -> (String, String) {
        (entity.text.trim().to_string(), entity.label.clone())
    }
}

impl Default for EntityDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl EntityPostProcessor for EntityDeduplicator {
    fn process(&self, entities: Vec<RawEntity>) -> Vec<RawEntity> {
        let mut seen = HashSet::new();
        let mut result = Vec::new();

        for entity in entities {
            if seen.insert(Self::create_key(&entity)) {
                result.push(entity);
            }
        }

        result
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keeps_first_occurrence() {
        let entities = vec![
            RawEntity::new("AB1234".into(), "X".into(), 0, 6, 0.4),
            RawEntity::new("ab1234".into(), "X".into(), 7, 13, 0.5),
            RawEntity::new("AB1234".into(), "X".into(), 14, 20, 0.9),
        ];
        let result = EntityDeduplicator::new().process(entities);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].start_pos, 0);
        assert_eq!(result[1].text, "ab1234");
    }
}
