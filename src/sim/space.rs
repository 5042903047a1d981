//! Continuous 2-D spatial index
//!
//! Bounded, non-toroidal plane holding one position per placed entity.
//! Iteration follows placement order so draw lists are stable across ticks.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::state::EntityId;

#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpaceError {
    #[error("point ({x}, {y}) is out of bounds and the space is not toroidal")]
    OutOfBounds { x: f64, y: f64 },
    #[error("entity {0} is not placed in the space")]
    NotPlaced(EntityId),
    #[error("entity {0} is already placed in the space")]
    AlreadyPlaced(EntityId),
}

/// Bounded continuous space, `[min.x, max.x) × [min.y, max.y)`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContinuousSpace {
    pub min: DVec2,
    pub max: DVec2,
    /// Position per entity, indexed by entity id
    positions: Vec<Option<DVec2>>,
    /// Entities in the order they were placed
    order: Vec<EntityId>,
}

impl ContinuousSpace {
    pub fn new(min: DVec2, max: DVec2) -> Self {
        Self {
            min,
            max,
            positions: Vec::new(),
            order: Vec::new(),
        }
    }

    /// Square space with its lower-left corner at the origin
    pub fn square(size: f64) -> Self {
        Self::new(DVec2::ZERO, DVec2::splat(size))
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn out_of_bounds(&self, pos: DVec2) -> bool {
        pos.x < self.min.x || pos.x >= self.max.x || pos.y < self.min.y || pos.y >= self.max.y
    }

    fn check_bounds(&self, pos: DVec2) -> Result<(), SpaceError> {
        if self.out_of_bounds(pos) {
            return Err(SpaceError::OutOfBounds { x: pos.x, y: pos.y });
        }
        Ok(())
    }

    /// Put an entity into the space for the first time
    pub fn place(&mut self, id: EntityId, pos: DVec2) -> Result<(), SpaceError> {
        self.check_bounds(pos)?;
        let index = id.index();
        if index >= self.positions.len() {
            self.positions.resize(index + 1, None);
        }
        if self.positions[index].is_some() {
            return Err(SpaceError::AlreadyPlaced(id));
        }
        self.positions[index] = Some(pos);
        self.order.push(id);
        Ok(())
    }

    /// Move an already placed entity
    pub fn move_to(&mut self, id: EntityId, pos: DVec2) -> Result<(), SpaceError> {
        self.check_bounds(pos)?;
        let slot = self
            .positions
            .get_mut(id.index())
            .and_then(Option::as_mut)
            .ok_or(SpaceError::NotPlaced(id))?;
        *slot = pos;
        Ok(())
    }

    pub fn position(&self, id: EntityId) -> Option<DVec2> {
        self.positions.get(id.index()).copied().flatten()
    }

    /// All placed entities with their positions, in placement order
    pub fn iter(&self) -> impl Iterator<Item = (EntityId, DVec2)> + '_ {
        self.order
            .iter()
            .filter_map(|&id| self.position(id).map(|pos| (id, pos)))
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Unit direction from `from` to `to`, `None` when the points coincide
    pub fn heading(&self, from: DVec2, to: DVec2) -> Option<DVec2> {
        (to - from).try_normalize()
    }
}
