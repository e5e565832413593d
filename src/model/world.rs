//! Ordered entity registry.
//!
//! Lookups are a linear scan: worlds hold tens of boxes, and insertion order
//! is what makes collision checks (and the blocker they report) deterministic.

use glam::Vec3;
use tracing::warn;

use super::aabb::would_overlap;
use super::entity::{Entity, EntityId};
use crate::error::{GameError, Result};

pub struct WorldRegistry {
    entities: Vec<Entity>,
    player_id: EntityId,
}

impl WorldRegistry {
    /// Start a world with the player as its first entity.
    pub fn new(player: Entity) -> Self {
        if player.is_degenerate() {
            warn!(id = player.id(), size = ?player.size(), "player has a degenerate size");
        }
        Self {
            player_id: player.id(),
            entities: vec![player],
        }
    }

    pub fn player_id(&self) -> EntityId {
        self.player_id
    }

    pub fn insert(&mut self, entity: Entity) -> Result<()> {
        if self.entities.iter().any(|e| e.id() == entity.id()) {
            return Err(GameError::DuplicateEntity(entity.id()));
        }
        if entity.is_degenerate() {
            warn!(id = entity.id(), size = ?entity.size(), "entity has a degenerate size and will never collide");
        }
        self.entities.push(entity);
        Ok(())
    }

    pub fn get(&self, id: EntityId) -> Result<&Entity> {
        self.entities
            .iter()
            .find(|e| e.id() == id)
            .ok_or(GameError::EntityNotFound(id))
    }

    pub fn get_mut(&mut self, id: EntityId) -> Result<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|e| e.id() == id)
            .ok_or(GameError::EntityNotFound(id))
    }

    pub fn player(&self) -> Result<&Entity> {
        self.get(self.player_id)
    }

    pub fn set_position(&mut self, id: EntityId, position: Vec3) -> Result<()> {
        self.get_mut(id)?.set_position(position);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Every entity except the player, in insertion order.
    pub fn obstacles(&self) -> impl Iterator<Item = &Entity> {
        let player_id = self.player_id;
        self.entities.iter().filter(move |e| e.id() != player_id)
    }

    /// First obstacle a box of `size` at the hypothetical `position` would
    /// overlap.
    pub fn first_blocker(&self, position: Vec3, size: Vec3) -> Option<&Entity> {
        self.obstacles()
            .find(|o| would_overlap(position, size, o.position(), o.size()))
    }

    /// Obstacles the player currently intersects. Diagnostic only: horizontal
    /// moves and falls are gated by look-ahead, but the player can still
    /// start inside something or come down into a ledge at the end of a
    /// jump arc, which is not collision checked.
    pub fn player_collisions(&self) -> Result<Vec<EntityId>> {
        let player = self.player()?.aabb();
        Ok(self
            .obstacles()
            .filter(|o| o.aabb().overlaps(&player))
            .map(Entity::id)
            .collect())
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
