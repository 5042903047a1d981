//! Canvas rendering module
//!
//! Turns the simulation state into per-layer shape descriptors for the
//! browser canvas, plus the text element shown above it.

pub mod canvas;
pub mod shapes;

pub use canvas::CanvasTransform;
pub use shapes::{DrawList, Fill, Overlays, Shape, ShapeDescriptor, describe, layers, render};

use crate::sim::SimState;

/// Colors for model elements
pub mod colors {
    pub const POINT: &str = "#e41a1c";
    pub const PROJECTION_X: &str = "#4daf4a";
    pub const PROJECTION_Y: &str = "#377eb8";
    pub const GUIDE: &str = "black";
    pub const VECTOR: &str = "black";
    pub const BACKGROUND: &str = "#b4b8b5";
}

/// Angular and tangential speed readout, one line each
pub fn info_text(state: &SimState) -> String {
    format!(
        "Angular velocity: {:.5} rad/tick<br>Tangential speed: {:.5} units/tick",
        state.omega,
        state.omega * state.settings.circle_radius
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;

    #[test]
    fn test_info_text() {
        let state = SimState::new(Settings {
            circle_radius: 0.5,
            period: 200,
            ..Default::default()
        })
        .unwrap();
        assert_eq!(
            info_text(&state),
            "Angular velocity: 0.03142 rad/tick<br>Tangential speed: 0.01571 units/tick"
        );
    }
}
