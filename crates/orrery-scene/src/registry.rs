//! Live entity set of the active view

use crate::entity::{EntityId, SceneEntity};
use glam::DVec3;
use std::collections::HashMap;

/// Longest anchor chain followed before giving up
const MAX_ANCHOR_DEPTH: usize = 8;

/// Bookkeeping for the entities of one view.
///
/// Iteration follows insertion order; replacing an id keeps its slot, so the
/// order the picker sees is stable within and across frames.
#[derive(Debug, Default)]
pub struct SceneBodyRegistry {
    entities: Vec<SceneEntity>,
    index: HashMap<EntityId, usize>,
}

impl SceneBodyRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity. A duplicate id replaces the previous entity in
    /// place and returns it.
    pub fn add(&mut self, entity: SceneEntity) -> Option<SceneEntity> {
        match self.index.get(&entity.id) {
            Some(&slot) => {
                tracing::debug!("Replacing duplicate entity {}", entity.id);
                Some(std::mem::replace(&mut self.entities[slot], entity))
            }
            None => {
                self.index.insert(entity.id.clone(), self.entities.len());
                self.entities.push(entity);
                None
            }
        }
    }

    pub fn remove(&mut self, id: &EntityId) -> Option<SceneEntity> {
        let slot = self.index.remove(id)?;
        let removed = self.entities.remove(slot);
        for idx in self.index.values_mut() {
            if *idx > slot {
                *idx -= 1;
            }
        }
        Some(removed)
    }

    pub fn all(&self) -> &[SceneEntity] {
        &self.entities
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneEntity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut SceneEntity> {
        self.entities.iter_mut()
    }

    pub fn find(&self, id: &EntityId) -> Option<&SceneEntity> {
        self.index.get(id).map(|&slot| &self.entities[slot])
    }

    pub fn get_mut(&mut self, id: &EntityId) -> Option<&mut SceneEntity> {
        let slot = *self.index.get(id)?;
        self.entities.get_mut(slot)
    }

    pub fn contains(&self, id: &EntityId) -> bool {
        self.index.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Drop every entity (view teardown)
    pub fn clear(&mut self) {
        self.entities.clear();
        self.index.clear();
    }

    /// World position of an entity by id
    pub fn world_position(&self, id: &EntityId) -> Option<DVec3> {
        self.find(id).map(|e| self.resolve(e))
    }

    /// World position of an entity, following its anchor chain.
    /// A missing parent resolves against the origin; a cyclic or over-long
    /// chain falls back to the entity's own offset.
    pub fn resolve(&self, entity: &SceneEntity) -> DVec3 {
        let mut position = DVec3::ZERO;
        let mut current = entity;
        for _ in 0..MAX_ANCHOR_DEPTH {
            match &current.anchor {
                Some(anchor) => {
                    position += anchor.offset;
                    match self.find(&anchor.parent) {
                        Some(parent) => current = parent,
                        None => return position,
                    }
                }
                None => return position + current.transform.position,
            }
        }
        tracing::warn!("Anchor chain of {} exceeds {} links", entity.id, MAX_ANCHOR_DEPTH);
        entity.anchor.as_ref().map_or(DVec3::ZERO, |a| a.offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{EntityKind, Geometry};

    fn body(id: &str, x: f64) -> SceneEntity {
        SceneEntity::new(id, EntityKind::Planet, Geometry::Sphere { radius: 1.0 })
            .at(DVec3::new(x, 0.0, 0.0))
    }

    fn ids(registry: &SceneBodyRegistry) -> Vec<&str> {
        registry.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_duplicate_id_replaces_in_place() {
        let mut registry = SceneBodyRegistry::new();
        registry.add(body("a", 1.0));
        registry.add(body("b", 2.0));
        let old = registry.add(body("a", 5.0));

        assert_eq!(old.map(|e| e.transform.position.x), Some(1.0));
        assert_eq!(registry.len(), 2);
        assert_eq!(ids(&registry), vec!["a", "b"]);
        assert_eq!(registry.world_position(&"a".into()), Some(DVec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn test_remove_keeps_order_and_index() {
        let mut registry = SceneBodyRegistry::new();
        for (i, id) in ["a", "b", "c", "d"].iter().enumerate() {
            registry.add(body(id, i as f64));
        }
        assert!(registry.remove(&"b".into()).is_some());
        assert!(registry.remove(&"b".into()).is_none());
        assert_eq!(ids(&registry), vec!["a", "c", "d"]);
        assert_eq!(registry.find(&"d".into()).map(|e| e.transform.position.x), Some(3.0));
    }

    #[test]
    fn test_anchor_resolves_through_parent() {
        let mut registry = SceneBodyRegistry::new();
        registry.add(body("earth", 10.0));
        registry.add(
            SceneEntity::new("moon", EntityKind::Planet, Geometry::Sphere { radius: 0.2 })
                .anchored("earth".into(), DVec3::new(0.0, 1.0, 0.0)),
        );
        assert_eq!(
            registry.world_position(&"moon".into()),
            Some(DVec3::new(10.0, 1.0, 0.0))
        );
    }

    #[test]
    fn test_anchor_cycle_terminates() {
        let mut registry = SceneBodyRegistry::new();
        registry.add(body("a", 0.0).anchored("b".into(), DVec3::X));
        registry.add(body("b", 0.0).anchored("a".into(), DVec3::X));
        assert_eq!(registry.world_position(&"a".into()), Some(DVec3::X));
    }

    #[test]
    fn test_clear() {
        let mut registry = SceneBodyRegistry::new();
        registry.add(body("a", 0.0));
        registry.clear();
        assert!(registry.is_empty());
        assert!(registry.find(&"a".into()).is_none());
    }
}
