//! Fixed-step kinematics
//!
//! Moves the point one angular step along the orbit and drags every
//! dependent entity (velocity arrow, projections, guide bars) along.

use glam::DVec2;

use super::space::SpaceError;
use super::state::{Entity, EntityId, ProjectionGuide, SimError, SimState};
use crate::chart;
use crate::{advance_angle, direction_angle};

/// One full model step: advance the kinematics, then record a chart sample
pub fn tick(state: &mut SimState) -> Result<(), SimError> {
    advance(state)?;
    let record = chart::sample(state);
    state.recorder.push(record);
    Ok(())
}

/// Run `ticks` model steps
pub fn run_ticks(state: &mut SimState, ticks: u64) -> Result<(), SimError> {
    for _ in 0..ticks {
        tick(state)?;
    }
    Ok(())
}

/// Advance the point and everything that follows it by one tick
pub fn advance(state: &mut SimState) -> Result<(), SimError> {
    let omega = state.omega;
    let old_pos = state.point_position()?;

    let angle = {
        let point = state.point_mut()?;
        point.angle = advance_angle(point.angle, omega);
        point.angle
    };
    let pos = state.coordinates(angle);

    // Heading is undefined without displacement; keep the previous angle
    let heading = state.space.heading(old_pos, pos);
    {
        let point = state.point_mut()?;
        match heading {
            Some(dir) => {
                point.vector_angle = direction_angle(dir);
                point.stationary_ticks = 0;
            }
            None => {
                point.stationary_ticks += 1;
                if point.stationary_ticks == 2 {
                    log::warn!(
                        "Point has not moved for consecutive ticks, keeping heading {:.5}",
                        point.vector_angle
                    );
                }
            }
        }
    }

    let point_id = state.point_id();
    state.space.move_to(point_id, pos)?;
    if let Some(vector) = state.vector_id() {
        state.space.move_to(vector, pos)?;
    }

    let projections = state.projection_ids().to_vec();
    for id in projections {
        update_projection(state, id, pos)?;
    }

    state.time_ticks += 1;
    log::debug!(
        "tick {}: angle={:.5} pos=({:.5}, {:.5})",
        state.time_ticks,
        angle,
        pos.x,
        pos.y
    );
    Ok(())
}

/// Slide a projection along its baseline and refit its guide bar
fn update_projection(state: &mut SimState, id: EntityId, point_pos: DVec2) -> Result<(), SimError> {
    let (axis, guide_id) = match state.entity(id) {
        Some(Entity::AxisProjection(projection)) => (projection.axis, projection.guide),
        _ => return Err(SimError::WrongKind(id, "axis projection")),
    };
    let i = axis.index();

    let mut pos = state
        .space
        .position(id)
        .ok_or(SimError::Space(SpaceError::NotPlaced(id)))?;
    pos[i] = point_pos[i];
    state.space.move_to(id, pos)?;

    let length = pos.distance(point_pos);
    match state.entity_mut(guide_id) {
        Some(Entity::ProjectionGuide(guide)) => guide.length = length,
        _ => return Err(SimError::WrongKind(guide_id, "projection guide")),
    }
    state
        .space
        .move_to(guide_id, ProjectionGuide::anchor(axis, pos, point_pos, length))?;
    Ok(())
}
