//! Deterministic simulation module
//!
//! Model logic lives here. This module must be pure and deterministic:
//! - Fixed angular step per tick
//! - Stable iteration order (placement order in the space)
//! - No rendering or platform dependencies

pub mod space;
pub mod state;
pub mod tick;

pub use space::{ContinuousSpace, SpaceError};
pub use state::{
    Axis, AxisProjection, BackgroundMark, Entity, EntityId, MarkShape, MovingPoint,
    ProjectionGuide, SimError, SimState, VelocityVector,
};
pub use tick::{advance, run_ticks, tick};
