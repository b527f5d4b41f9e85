use crate::data::{Color, Rect};
use crate::render::{Mesh, TessellationOptions};
use crate::shape::Cached;
use cgmath::{Matrix3, SquareMatrix};
use std::fmt;

/// A stable identity token, used to find the external objects (e.g. colliders) that belong to a
/// shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeId(u128);

impl ShapeId {
    /// Generates a new random id.
    pub fn generate() -> ShapeId {
        ShapeId(rand::random())
    }

    pub fn from_u128(id: u128) -> ShapeId {
        ShapeId(id)
    }

    pub fn as_u128(&self) -> u128 {
        self.0
    }
}

impl fmt::Display for ShapeId {
    /// Formats the id like a GUID: `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let id = self.0;
        write!(
            f,
            "{:08x}-{:04x}-{:04x}-{:04x}-{:012x}",
            (id >> 96) as u32,
            (id >> 80) as u16,
            (id >> 64) as u16,
            (id >> 48) as u16,
            id & 0xffff_ffff_ffff
        )
    }
}

/// Paint style shared by all shapes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub color_outline: Color,

    /// Fill color; only closed shapes are filled, and only if this is visible.
    pub color_fill: Color,

    /// Stroke thickness in device pixels.
    pub pen_size: f32,
}

impl Default for ShapeStyle {
    fn default() -> ShapeStyle {
        ShapeStyle {
            color_outline: Color::BLACK,
            color_fill: Color::CLEAR,
            pen_size: 1.,
        }
    }
}

/// State every shape carries besides its geometric parameters.
#[derive(Debug, Clone)]
pub struct ShapeBase {
    id: ShapeId,
    pub style: ShapeStyle,

    /// Transform applied to the tessellated mesh at render time. It does not affect queries.
    pub matrix_transform: Matrix3<f64>,
}

impl ShapeBase {
    pub fn new(style: ShapeStyle) -> ShapeBase {
        ShapeBase {
            id: ShapeId::generate(),
            style,
            matrix_transform: Matrix3::identity(),
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    /// Returns a copy of this state with a new identity.
    pub fn duplicate(&self) -> ShapeBase {
        ShapeBase {
            id: ShapeId::generate(),
            ..self.clone()
        }
    }
}

impl Default for ShapeBase {
    fn default() -> ShapeBase {
        ShapeBase::new(ShapeStyle::default())
    }
}

/// The cached outputs of a shape: tessellated geometry and bounds, each with its own dirty flag.
#[derive(Debug, Clone, Default)]
pub struct ShapeCache {
    pub(crate) geometry: Cached<TessellationOptions, Mesh>,
    pub(crate) bounds: Cached<(), Rect>,
}

impl ShapeCache {
    pub fn new() -> ShapeCache {
        ShapeCache::default()
    }

    /// Marks both geometry and bounds as dirty.
    pub fn invalidate(&mut self) {
        self.geometry.invalidate();
        self.bounds.invalidate();
    }

    /// Returns true if the geometry must be regenerated before it can be read with `options`.
    pub fn geometry_dirty(&self, options: &TessellationOptions) -> bool {
        !self.geometry.is_fresh(options)
    }

    /// Returns true if the bounds must be recomputed before they can be read.
    pub fn bounds_dirty(&self) -> bool {
        !self.bounds.is_fresh(&())
    }
}
