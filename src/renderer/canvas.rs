//! World to canvas pixel mapping
//!
//! The canvas has y = 0 at the top; world coordinates have the origin in
//! the lower-left corner, so y is flipped on the way out.

use glam::DVec2;

use super::shapes::{DrawList, Shape, ShapeDescriptor};
use crate::sim::ContinuousSpace;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub min: DVec2,
    pub max: DVec2,
    /// Canvas size in pixels
    pub width: f64,
    pub height: f64,
}

impl CanvasTransform {
    pub fn new(space: &ContinuousSpace, width: u32, height: u32) -> Self {
        Self {
            min: space.min,
            max: space.max,
            width: width as f64,
            height: height as f64,
        }
    }

    /// Pixels per world unit along x and y
    pub fn scale(&self) -> DVec2 {
        DVec2::new(self.width, self.height) / (self.max - self.min)
    }

    /// Canvas pixel of a world point
    pub fn to_canvas(&self, pos: DVec2) -> DVec2 {
        let flipped = DVec2::new(pos.x, self.min.y + self.max.y - pos.y);
        (flipped - self.min) * self.scale()
    }

    /// Copy of a descriptor with position and sizes in pixels.
    ///
    /// Radii and image sizes scale with x; arrows point the other way round
    /// because the canvas y axis runs downward.
    pub fn descriptor(&self, desc: &ShapeDescriptor) -> ShapeDescriptor {
        let scale = self.scale();
        let pos = self.to_canvas(desc.position());

        let shape = match &desc.shape {
            Shape::Circle { r } => Shape::Circle { r: r * scale.x },
            Shape::Rect { w, h } => Shape::Rect {
                w: w * scale.x,
                h: h * scale.y,
            },
            Shape::Arrow {
                w,
                h,
                angle,
                vector_origin,
            } => Shape::Arrow {
                w: w.map(|w| w * scale.y),
                h: h * scale.x,
                angle: -angle,
                vector_origin: vector_origin.map(|o| o * scale.x),
            },
            Shape::Image { src, size } => Shape::Image {
                src: src.clone(),
                size: size * scale.x,
            },
        };

        ShapeDescriptor {
            shape,
            x: pos.x,
            y: pos.y,
            ..desc.clone()
        }
    }

    /// Whole draw list in pixels
    pub fn draw_list(&self, list: &DrawList) -> DrawList {
        list.iter()
            .map(|(layer, descs)| (*layer, descs.iter().map(|d| self.descriptor(d)).collect()))
            .collect()
    }
}
