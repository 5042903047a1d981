//! Shape descriptors for the canvas
//!
//! Maps each entity to what the browser canvas should draw for it. The
//! descriptors serialize with the keys the canvas widget reads (`Shape`,
//! `r`, `w`, `h`, `Color`, `Filled`, `Layer`, ...).

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::colors;
use crate::consts::{MAX_RADIUS, MIN_PERIOD, PADDING, SPACE_SIZE};
use crate::settings::Settings;
use crate::sim::{Axis, Entity, MarkShape, SimState};

/// Draw layers, lowest first
pub mod layers {
    pub const BACKGROUND: i32 = 0;
    pub const GUIDE: i32 = 1;
    pub const POINT: i32 = 2;
    pub const VECTOR: i32 = 3;
}

/// Radius of the moving point and of the projections
pub const POINT_RADIUS: f64 = PADDING / 8.0;
/// Thickness of a projection guide bar
pub const GUIDE_THICKNESS: f64 = SPACE_SIZE / 1000.0;

/// Geometry of a descriptor, tagged by the `Shape` key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Shape")]
pub enum Shape {
    #[serde(rename = "circle")]
    Circle { r: f64 },
    #[serde(rename = "rect")]
    Rect { w: f64, h: f64 },
    #[serde(rename = "arrow")]
    Arrow {
        /// Width; the canvas uses a third of the length when absent
        #[serde(default, skip_serializing_if = "Option::is_none")]
        w: Option<f64>,
        /// Length
        h: f64,
        /// Direction (radians, counter-clockwise from +x)
        angle: f64,
        /// Offset of the tail from the anchor along the arrow
        #[serde(default, skip_serializing_if = "Option::is_none")]
        vector_origin: Option<f64>,
    },
    #[serde(rename = "image")]
    Image { src: String, size: f64 },
}

/// Single colour or a gradient of colours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fill {
    Solid(String),
    Gradient(Vec<String>),
}

impl From<&str> for Fill {
    fn from(color: &str) -> Self {
        Fill::Solid(color.to_string())
    }
}

/// One drawable item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    #[serde(flatten)]
    pub shape: Shape,
    pub x: f64,
    pub y: f64,
    #[serde(rename = "Color")]
    pub color: Fill,
    #[serde(rename = "Filled")]
    pub filled: bool,
    #[serde(rename = "Layer")]
    pub layer: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    /// Horizontal offset of the anchor, 0 = centered
    #[serde(rename = "xAlign", default, skip_serializing_if = "Option::is_none")]
    pub x_align: Option<f64>,
    /// Vertical offset of the anchor, 0 = centered
    #[serde(rename = "yAlign", default, skip_serializing_if = "Option::is_none")]
    pub y_align: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
}

impl ShapeDescriptor {
    /// Filled, unstroked shape at `pos`
    pub fn new(shape: Shape, pos: DVec2, color: impl Into<Fill>, layer: i32) -> Self {
        Self {
            shape,
            x: pos.x,
            y: pos.y,
            color: color.into(),
            filled: true,
            layer,
            stroke_color: None,
            x_align: None,
            y_align: None,
            text: None,
            text_color: None,
        }
    }

    pub fn outline(mut self) -> Self {
        self.filled = false;
        self
    }

    pub fn with_text(mut self, text: impl Into<String>, color: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self.text_color = Some(color.into());
        self
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }
}

/// Which overlays the renderer may draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Overlays {
    pub velocity_vector: bool,
    pub projection_x: bool,
    pub projection_y: bool,
}

impl Overlays {
    pub fn axis(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.projection_x,
            Axis::Y => self.projection_y,
        }
    }
}

impl From<&Settings> for Overlays {
    fn from(settings: &Settings) -> Self {
        Self {
            velocity_vector: settings.velocity_vector,
            projection_x: settings.projection_x,
            projection_y: settings.projection_y,
        }
    }
}

/// Length of the velocity arrow.
///
/// Proportional to the tangential speed ω·r, normalised so the fastest
/// orbit the sliders allow draws a 0.35 unit arrow on top of a 0.1 stub.
pub fn velocity_arrow_length(omega: f64, radius: f64) -> f64 {
    0.25 * omega * radius / (TAU * MAX_RADIUS) * MIN_PERIOD as f64 + 0.1
}

/// Descriptor for one entity at `pos`, or `None` when it is not drawn
pub fn describe(state: &SimState, entity: &Entity, pos: DVec2) -> Option<ShapeDescriptor> {
    let overlays = Overlays::from(&state.settings);

    match entity {
        Entity::MovingPoint(_) => Some(ShapeDescriptor::new(
            Shape::Circle { r: POINT_RADIUS },
            pos,
            colors::POINT,
            layers::POINT,
        )),
        Entity::VelocityVector(vector) => {
            if !overlays.velocity_vector {
                return None;
            }
            let point = state.moving_point(vector.tracks).ok()?;
            let shape = Shape::Arrow {
                w: None,
                h: velocity_arrow_length(state.omega, state.settings.circle_radius),
                angle: point.vector_angle,
                vector_origin: None,
            };
            Some(ShapeDescriptor::new(shape, pos, colors::VECTOR, layers::VECTOR))
        }
        Entity::AxisProjection(projection) => {
            if !overlays.axis(projection.axis) {
                return None;
            }
            let color = match projection.axis {
                Axis::X => colors::PROJECTION_X,
                Axis::Y => colors::PROJECTION_Y,
            };
            Some(ShapeDescriptor::new(
                Shape::Circle { r: POINT_RADIUS },
                pos,
                color,
                layers::POINT,
            ))
        }
        Entity::ProjectionGuide(guide) => {
            if !overlays.axis(guide.axis) {
                return None;
            }
            // Thin across the projected axis, spanning the free one
            let shape = match guide.axis {
                Axis::X => Shape::Rect {
                    w: GUIDE_THICKNESS,
                    h: guide.length,
                },
                Axis::Y => Shape::Rect {
                    w: guide.length,
                    h: GUIDE_THICKNESS,
                },
            };
            Some(ShapeDescriptor::new(shape, pos, colors::GUIDE, layers::GUIDE))
        }
        Entity::Background(mark) => match mark.shape {
            MarkShape::Circle { r, filled } => {
                let desc = ShapeDescriptor::new(
                    Shape::Circle { r },
                    pos,
                    colors::BACKGROUND,
                    layers::BACKGROUND,
                );
                Some(if filled { desc } else { desc.outline() })
            }
            // Baseline bars only show under an enabled projection of the same direction
            MarkShape::Rect { w, h } => {
                let shown = (w > h && overlays.projection_x) || (w < h && overlays.projection_y);
                shown.then(|| {
                    ShapeDescriptor::new(
                        Shape::Rect { w, h },
                        pos,
                        colors::BACKGROUND,
                        layers::BACKGROUND,
                    )
                })
            }
        },
    }
}

/// Per-layer draw list, layers ascending
pub type DrawList = BTreeMap<i32, Vec<ShapeDescriptor>>;

/// Describe every placed entity, grouped by layer in placement order
pub fn render(state: &SimState) -> DrawList {
    let mut draw_list = DrawList::new();
    for (id, pos) in state.space.iter() {
        let Some(entity) = state.entity(id) else {
            continue;
        };
        if let Some(desc) = describe(state, entity, pos) {
            draw_list.entry(desc.layer).or_default().push(desc);
        }
    }
    draw_list
}
