//! Circular Motion - uniform circular motion as an agent-based model
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spatial index, entity arena, kinematics)
//! - `chart`: Per-tick projection samples for the live chart
//! - `renderer`: Shape descriptors and draw lists for the browser canvas
//! - `settings`: Construction-time model parameters
//! - `web`: Browser bindings (wasm32 only)

pub mod chart;
pub mod renderer;
pub mod settings;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use chart::{ChartSeries, SampleRecord, SampleRecorder};
pub use renderer::{DrawList, ShapeDescriptor, describe, render};
pub use settings::{Settings, SettingsError};
pub use sim::{ContinuousSpace, Entity, EntityId, SimError, SimState, SpaceError, tick};

use glam::DVec2;
use std::f64::consts::TAU;

/// Model and UI constants
pub mod consts {
    use std::f64::consts::FRAC_PI_2;

    /// Side length of the square continuous space (units)
    pub const SPACE_SIZE: f64 = 3.0;
    /// Margin reserved for the projection baselines (units)
    pub const PADDING: f64 = 0.5;
    /// Canvas edge length in pixels
    pub const CANVAS_SIZE: u32 = 500;

    /// Orbit radius slider bounds
    pub const MIN_RADIUS: f64 = 0.2;
    pub const MAX_RADIUS: f64 = 1.0;
    pub const RADIUS_STEP: f64 = MAX_RADIUS / 100.0;

    /// Period slider bounds (ticks per revolution)
    pub const MIN_PERIOD: u32 = 100;
    pub const MAX_PERIOD: u32 = 1000;

    /// The point starts on the positive x axis of the orbit
    pub const INITIAL_ANGLE: f64 = 0.0;
    /// Heading before the first tick (counter-clockwise tangent at angle 0)
    pub const INITIAL_VECTOR_ANGLE: f64 = FRAC_PI_2;
}

/// Advance an angle by `delta` and wrap it back below 2π.
///
/// Subtracts a single turn at most, so `delta` larger than 2π leaves the
/// result outside [0, 2π).
#[inline]
pub fn advance_angle(angle: f64, delta: f64) -> f64 {
    let angle = angle + delta;
    if angle >= TAU { angle - TAU } else { angle }
}

/// Convert polar (r, theta) around `center` to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(center: DVec2, r: f64, theta: f64) -> DVec2 {
    center + DVec2::new(theta.cos(), theta.sin()) * r
}

/// Angle of a direction vector, measured counter-clockwise from +x
#[inline]
pub fn direction_angle(dir: DVec2) -> f64 {
    dir.y.atan2(dir.x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_advance_angle_wraps_once() {
        assert!((advance_angle(0.0, FRAC_PI_2) - FRAC_PI_2).abs() < 1e-12);
        assert_eq!(advance_angle(3.0 * FRAC_PI_2, FRAC_PI_2), 0.0);
        // Only one turn is removed
        assert!((advance_angle(0.0, 5.0 * PI) - 3.0 * PI).abs() < 1e-9);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let center = DVec2::new(1.25, 1.75);
        let p = polar_to_cartesian(center, 1.0, FRAC_PI_2);
        assert!((p - DVec2::new(1.25, 2.75)).length() < 1e-12);
    }

    #[test]
    fn test_direction_angle() {
        assert!((direction_angle(DVec2::new(0.0, 2.0)) - FRAC_PI_2).abs() < 1e-12);
        assert!((direction_angle(DVec2::new(-1.0, 0.0)) - PI).abs() < 1e-12);
    }
}
