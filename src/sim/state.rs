//! Simulation state and entity types
//!
//! Every entity lives in one arena owned by [`SimState`]; overlays refer to
//! the point they follow by [`EntityId`]. Positions are owned by the
//! [`ContinuousSpace`], the entities only carry what the space does not.

use std::fmt;

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::space::{ContinuousSpace, SpaceError};
use crate::chart::{self, SampleRecorder};
use crate::consts::*;
use crate::polar_to_cartesian;
use crate::settings::Settings;

/// Stable arena index of an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Space(#[from] SpaceError),
    #[error("entity {0} is not a {1}")]
    WrongKind(EntityId, &'static str),
}

/// Coordinate axis a projection runs along
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// Component index into a 2-D vector
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
        }
    }
}

/// The point travelling around the orbit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingPoint {
    /// Current angle on the orbit (radians, [0, 2π) for ω ≤ 2π)
    pub angle: f64,
    /// Direction of the last displacement (radians)
    pub vector_angle: f64,
    /// Consecutive ticks without displacement
    #[serde(default)]
    pub stationary_ticks: u32,
}

/// Velocity arrow drawn at the point's position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VelocityVector {
    pub tracks: EntityId,
}

/// Shadow of the point on one of the baselines
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisProjection {
    pub axis: Axis,
    pub tracks: EntityId,
    /// Guide bar joining this projection to the point
    pub guide: EntityId,
}

/// Thin bar from a projection to the point along the free axis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionGuide {
    pub axis: Axis,
    /// Distance between the projection and the point
    pub length: f64,
}

impl ProjectionGuide {
    /// Where the guide bar is centered.
    ///
    /// Offsets the projection diagonally by half the length (toward the
    /// orbit for each baseline), then pins the projected coordinate to the
    /// point's, which centers the bar between baseline and point.
    pub fn anchor(axis: Axis, projection: DVec2, point: DVec2, length: f64) -> DVec2 {
        let sign = match axis {
            Axis::X => 1.0,
            Axis::Y => -1.0,
        };
        let mut anchor = projection + sign * DVec2::ONE * length / 2.0;
        anchor[axis.index()] = point[axis.index()];
        anchor
    }
}

/// Geometry of a fixed decoration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MarkShape {
    Circle { r: f64, filled: bool },
    Rect { w: f64, h: f64 },
}

/// Static decoration placed once at construction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundMark {
    pub shape: MarkShape,
}

/// Every kind of entity the model places in the space
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Entity {
    MovingPoint(MovingPoint),
    VelocityVector(VelocityVector),
    AxisProjection(AxisProjection),
    ProjectionGuide(ProjectionGuide),
    Background(BackgroundMark),
}

/// Complete model state for one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimState {
    pub settings: Settings,
    /// Angular velocity (radians per tick)
    pub omega: f64,
    /// Orbit center
    pub center: DVec2,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub space: ContinuousSpace,
    /// Chart samples, one per tick including tick 0
    pub recorder: SampleRecorder,
    entities: Vec<Entity>,
    point: EntityId,
    vector: Option<EntityId>,
    /// Projections in axis order (empty or one per axis)
    projections: Vec<EntityId>,
}

impl SimState {
    /// Build the model and place every entity at its tick-0 position
    pub fn new(settings: Settings) -> Result<Self, SimError> {
        let space = ContinuousSpace::square(settings.space_size);
        let recorder = SampleRecorder::new(settings.projection_x, settings.projection_y);

        let mut state = Self {
            omega: settings.omega(),
            center: settings.orbit_center(),
            time_ticks: 0,
            space,
            recorder,
            entities: Vec::new(),
            point: EntityId(0),
            vector: None,
            projections: Vec::new(),
            settings,
        };

        let pos = state.coordinates(INITIAL_ANGLE);
        state.point = state.spawn(Entity::MovingPoint(MovingPoint {
            angle: INITIAL_ANGLE,
            vector_angle: INITIAL_VECTOR_ANGLE,
            stationary_ticks: 0,
        }));
        state.space.place(state.point, pos)?;

        if state.settings.velocity_vector {
            let id = state.spawn(Entity::VelocityVector(VelocityVector {
                tracks: state.point,
            }));
            state.space.place(id, pos)?;
            state.vector = Some(id);
        }

        if state.settings.any_projection() {
            for axis in Axis::ALL {
                state.spawn_projection(axis, pos)?;
            }
        }

        state.spawn_background()?;

        let record = chart::sample(&state);
        state.recorder.push(record);

        log::info!(
            "Model ready: r={} period={} ticks, {} entities",
            state.settings.circle_radius,
            state.settings.period,
            state.entities.len()
        );
        Ok(state)
    }

    /// Allocate an arena slot
    fn spawn(&mut self, entity: Entity) -> EntityId {
        let id = EntityId(self.entities.len() as u32);
        self.entities.push(entity);
        id
    }

    fn spawn_projection(&mut self, axis: Axis, point_pos: DVec2) -> Result<(), SimError> {
        let mut pos = self.baseline_corner();
        pos[axis.index()] = point_pos[axis.index()];
        let length = pos.distance(point_pos);

        let guide = self.spawn(Entity::ProjectionGuide(ProjectionGuide { axis, length }));
        let projection = self.spawn(Entity::AxisProjection(AxisProjection {
            axis,
            tracks: self.point,
            guide,
        }));

        // Guide enters the space ahead of its projection
        self.space
            .place(guide, ProjectionGuide::anchor(axis, pos, point_pos, length))?;
        self.space.place(projection, pos)?;
        self.projections.push(projection);
        Ok(())
    }

    fn spawn_background(&mut self) -> Result<(), SimError> {
        let size = self.settings.space_size;
        let padding = self.settings.padding;
        let radius = self.settings.circle_radius;

        let marks = [
            // Orbit
            (self.center, MarkShape::Circle { r: radius, filled: false }),
            // Center dot
            (self.center, MarkShape::Circle { r: size / 200.0, filled: true }),
            // x baseline
            (
                DVec2::new(self.center.x, padding / 2.0),
                MarkShape::Rect { w: radius * 2.0, h: padding / 4.0 },
            ),
            // y baseline
            (
                DVec2::new(size - padding / 2.0, self.center.y),
                MarkShape::Rect { w: padding / 4.0, h: radius * 2.0 },
            ),
        ];

        for (pos, shape) in marks {
            let id = self.spawn(Entity::Background(BackgroundMark { shape }));
            self.space.place(id, pos)?;
        }
        Ok(())
    }

    /// Point on the orbit at `angle`
    pub fn coordinates(&self, angle: f64) -> DVec2 {
        polar_to_cartesian(self.center, self.settings.circle_radius, angle)
    }

    /// Corner where the two baselines meet (x baseline height, y baseline column)
    pub fn baseline_corner(&self) -> DVec2 {
        DVec2::new(
            self.settings.space_size - self.settings.padding / 2.0,
            self.settings.padding / 2.0,
        )
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.index())
    }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(id.index())
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn point_id(&self) -> EntityId {
        self.point
    }

    pub fn vector_id(&self) -> Option<EntityId> {
        self.vector
    }

    pub fn projection_ids(&self) -> &[EntityId] {
        &self.projections
    }

    /// The tracked point
    pub fn point(&self) -> Result<&MovingPoint, SimError> {
        self.moving_point(self.point)
    }

    pub fn moving_point(&self, id: EntityId) -> Result<&MovingPoint, SimError> {
        match self.entity(id) {
            Some(Entity::MovingPoint(point)) => Ok(point),
            _ => Err(SimError::WrongKind(id, "moving point")),
        }
    }

    pub(crate) fn point_mut(&mut self) -> Result<&mut MovingPoint, SimError> {
        let id = self.point;
        match self.entity_mut(id) {
            Some(Entity::MovingPoint(point)) => Ok(point),
            _ => Err(SimError::WrongKind(id, "moving point")),
        }
    }

    /// Current position of the tracked point
    pub fn point_position(&self) -> Result<DVec2, SimError> {
        self.space
            .position(self.point)
            .ok_or(SimError::Space(SpaceError::NotPlaced(self.point)))
    }
}
