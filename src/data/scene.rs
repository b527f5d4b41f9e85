use crate::data::{Color, Path2D};

/// Stroke parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    /// Half of the stroke thickness, i.e. the distance from the path to either outline.
    pub half_width: f32,
    pub color: Color,
}

/// A declarative description of one stroked and/or filled path.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeDesc {
    pub path: Path2D,
    pub stroke: Option<Stroke>,
    pub fill: Option<Color>,
}

/// Tessellator input: a flat list of shape descriptions, painted in order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub shapes: Vec<ShapeDesc>,
}

impl Scene {
    pub fn new() -> Scene {
        Scene::default()
    }

    /// Creates a scene with a single shape.
    pub fn single(shape: ShapeDesc) -> Scene {
        Scene {
            shapes: vec![shape],
        }
    }

    pub fn push(&mut self, shape: ShapeDesc) {
        self.shapes.push(shape);
    }
}
