use std::f64::consts::{FRAC_PI_2, TAU};

use circular_motion::chart::{X_LABEL, Y_LABEL};
use circular_motion::renderer::{Shape, layers, render};
use circular_motion::sim::{Axis, Entity, run_ticks, tick};
use circular_motion::{SimState, Settings};
use glam::DVec2;
use proptest::prelude::*;

/// Settings with every overlay switched on
pub fn full_settings(circle_radius: f64, period: u32) -> Settings {
    Settings {
        circle_radius,
        period,
        velocity_vector: true,
        projection_x: true,
        projection_y: true,
        ..Default::default()
    }
}

/// Smallest angular distance between an angle and 0
fn angle_from_zero(angle: f64) -> f64 {
    angle.min(TAU - angle).abs()
}

// ==================================================================================
// Scenarios
// ==================================================================================

#[test]
fn quarter_period_scenario() {
    let settings = Settings {
        circle_radius: 1.0,
        period: 4,
        ..Default::default()
    };
    let mut state = SimState::new(settings).unwrap();
    let start = state.point_position().unwrap();

    tick(&mut state).unwrap();
    let point = state.point().unwrap();
    assert!((point.angle - FRAC_PI_2).abs() < 1e-12);
    let pos = state.point_position().unwrap();
    assert!((pos - (state.center + DVec2::new(0.0, 1.0))).length() < 1e-12);

    run_ticks(&mut state, 3).unwrap();
    assert_eq!(state.point().unwrap().angle, 0.0);
    assert!((state.point_position().unwrap() - start).length() < 1e-12);
}

#[test]
fn x_only_samples_never_carry_y() {
    let settings = Settings {
        projection_x: true,
        ..Default::default()
    };
    let mut state = SimState::new(settings).unwrap();
    run_ticks(&mut state, 50).unwrap();

    assert_eq!(state.recorder.labels(), vec![X_LABEL]);
    for record in state.recorder.records() {
        assert!(record.x.is_some());
        assert!(record.y.is_none());
    }

    let json: serde_json::Value = serde_json::from_str(&state.recorder.to_json().unwrap()).unwrap();
    for record in json.as_array().unwrap() {
        assert!(record.get(X_LABEL).is_some());
        assert!(record.get(Y_LABEL).is_none());
    }
}

#[test]
fn sample_ticks_are_consecutive() {
    let mut state = SimState::new(full_settings(0.6, 250)).unwrap();
    run_ticks(&mut state, 20).unwrap();
    let ticks: Vec<u64> = state.recorder.records().iter().map(|r| r.tick).collect();
    assert_eq!(ticks, (0..=20).collect::<Vec<_>>());
}

#[test]
fn draw_list_json_is_keyed_by_layer() {
    let mut state = SimState::new(full_settings(1.0, 100)).unwrap();
    tick(&mut state).unwrap();

    let json = serde_json::to_value(render(&state)).unwrap();
    let layers_present: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    assert_eq!(layers_present, vec!["0", "1", "2", "3"]);
    assert_eq!(json["3"][0]["Shape"], "arrow");
    assert_eq!(json["2"][0]["Color"], "#e41a1c");
}

#[test]
fn render_follows_the_point() {
    let mut state = SimState::new(full_settings(0.8, 120)).unwrap();
    for _ in 0..30 {
        tick(&mut state).unwrap();
        let list = render(&state);
        let point = state.point_position().unwrap();
        assert_eq!(list[&layers::POINT][0].position(), point);
        assert_eq!(list[&layers::VECTOR][0].position(), point);

        // Guide bars span exactly the gap between projection and point
        let projections = &list[&layers::POINT][1..];
        for (guide, projection) in list[&layers::GUIDE].iter().zip(projections) {
            let gap = projection.position().distance(point);
            match guide.shape {
                Shape::Rect { w, h } => assert!((w.max(h) - gap).abs() < 1e-12),
                ref other => panic!("unexpected guide shape {other:?}"),
            }
        }
    }
}

// ==================================================================================
// Invariants
// ==================================================================================

proptest! {
    #[test]
    fn angle_stays_in_range_and_on_orbit(
        radius in 0.2f64..=1.0,
        period in 100u32..=1000,
        ticks in 1u64..400,
    ) {
        let mut state = SimState::new(full_settings(radius, period)).unwrap();
        for _ in 0..ticks {
            tick(&mut state).unwrap();
            let angle = state.point().unwrap().angle;
            prop_assert!((0.0..TAU).contains(&angle));

            let distance = state.point_position().unwrap().distance(state.center);
            prop_assert!((distance - radius).abs() < 1e-9);
        }
    }

    #[test]
    fn full_period_returns_to_start(radius in 0.2f64..=1.0, period in 100u32..=1000) {
        let mut state = SimState::new(Settings {
            circle_radius: radius,
            period,
            ..Default::default()
        })
        .unwrap();
        let start = state.point_position().unwrap();

        run_ticks(&mut state, period as u64).unwrap();
        prop_assert!(angle_from_zero(state.point().unwrap().angle) < 1e-9);
        prop_assert!((state.point_position().unwrap() - start).length() < 1e-9);
    }

    #[test]
    fn projections_and_guides_track_point(
        radius in 0.2f64..=1.0,
        period in 100u32..=1000,
        ticks in 1u64..200,
    ) {
        let mut state = SimState::new(full_settings(radius, period)).unwrap();
        let fixed: Vec<DVec2> = state
            .projection_ids()
            .iter()
            .map(|&id| state.space.position(id).unwrap())
            .collect();

        for _ in 0..ticks {
            tick(&mut state).unwrap();
            let point = state.point_position().unwrap();

            for (k, &id) in state.projection_ids().iter().enumerate() {
                let Some(Entity::AxisProjection(projection)) = state.entity(id) else {
                    panic!("projection id points at another entity");
                };
                let free = projection.axis.index();
                let held = match projection.axis {
                    Axis::X => 1,
                    Axis::Y => 0,
                };
                let pos = state.space.position(id).unwrap();
                prop_assert_eq!(pos[free], point[free]);
                prop_assert_eq!(pos[held], fixed[k][held]);

                let Some(Entity::ProjectionGuide(guide)) = state.entity(projection.guide) else {
                    panic!("guide id points at another entity");
                };
                prop_assert!((guide.length - pos.distance(point)).abs() < 1e-12);
            }
        }
    }
}
