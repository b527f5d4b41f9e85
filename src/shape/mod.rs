//! Editable shape primitives.
//!
//! Shapes own their parametric state and cache the results of expensive queries. Every mutating
//! operation marks the caches dirty; the next geometry or bounds query regenerates them.

mod base;
mod cache;
mod circle;
mod point;

pub use self::base::*;
pub use self::cache::*;
pub use self::circle::*;
pub use self::point::*;

use crate::collider::ColliderHost;
use crate::data::{Rect, Scene};
use crate::export::MarkupWriter;
use crate::render::{Mesh, TessellationOptions, Tessellator};
use cgmath::{Deg, Matrix3, Vector2};
use failure::Error;
use std::f32;
use std::fmt;

/// Shape variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Circle,
    Point,
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// The operations every shape kind supports.
pub trait Shape: fmt::Debug {
    fn kind(&self) -> ShapeKind;

    fn base(&self) -> &ShapeBase;

    /// Note that style changes made through this do not invalidate the geometry; see
    /// [`Shape::set_style`].
    fn base_mut(&mut self) -> &mut ShapeBase;

    fn cache(&self) -> &ShapeCache;

    fn cache_mut(&mut self) -> &mut ShapeCache;

    /// The defining anchor point: the center of a circle, the location of a point.
    fn position(&self) -> Vector2<f64>;

    /// Distance from `point` to the shape’s outline.
    fn distance(&self, point: Vector2<f64>) -> f64;

    /// Returns true if `point` lies strictly inside the shape.
    fn contains(&self, point: Vector2<f64>) -> bool;

    /// Returns true if the shape lies entirely within `rect`.
    fn is_inside(&self, rect: &Rect) -> bool;

    /// Rotates the shape counter-clockwise about `center`.
    fn rotate_around(&mut self, center: Vector2<f64>, angle: Deg<f64>);

    fn translate_by(&mut self, offset: Vector2<f64>);

    /// Applies an affine transform, as far as the shape’s parametric form can represent it.
    fn transform_by(&mut self, matrix: &Matrix3<f64>);

    /// Describes the shape’s current appearance for a tessellator.
    fn scene(&self, options: &TessellationOptions) -> Scene;

    /// Returns the tessellated geometry, regenerating it if the shape changed since the last call
    /// or if `options` differ from the ones the cached mesh was made with.
    fn geometry(
        &mut self,
        tessellator: &dyn Tessellator,
        options: &TessellationOptions,
    ) -> Result<&Mesh, Error>;

    /// Returns the bounding rectangle, recomputing it if the shape changed.
    fn bounds(&mut self) -> Rect;

    /// Updates (or creates) the collider that belongs to this shape.
    fn project_collider(&self, host: &mut dyn ColliderHost);

    /// Writes the shape as markup. Output coordinates are `(world - origin) * (scale, -scale)`.
    fn write_markup(
        &self,
        writer: &mut dyn MarkupWriter,
        origin: Vector2<f64>,
        scale: f64,
    ) -> Result<(), Error>;

    /// Returns a copy with a new identity and empty caches.
    fn duplicate(&self) -> Box<dyn Shape>;

    fn id(&self) -> ShapeId {
        self.base().id()
    }

    /// Marks geometry and bounds dirty.
    fn invalidate(&mut self) {
        self.cache_mut().invalidate();
    }

    /// Replaces the paint style and marks the geometry dirty.
    fn set_style(&mut self, style: ShapeStyle) {
        self.base_mut().style = style;
        self.invalidate();
    }

    /// Sets the render-time transform. Cached geometry stays valid.
    fn set_matrix_transform(&mut self, matrix: Matrix3<f64>) {
        self.base_mut().matrix_transform = matrix;
    }

    /// Returns the geometry with the render-time transform applied.
    fn render_mesh(
        &mut self,
        tessellator: &dyn Tessellator,
        options: &TessellationOptions,
    ) -> Result<Mesh, Error> {
        let matrix = self.base().matrix_transform;
        Ok(self.geometry(tessellator, options)?.transformed(&matrix))
    }
}

/// Approximate float equality, relative for large magnitudes with an absolute floor near zero.
pub fn approximately(a: f64, b: f64) -> bool {
    let tolerance = (1e-6 * a.abs().max(b.abs())).max(f32::EPSILON as f64 * 8.);
    (b - a).abs() < tolerance
}

/// Returns the cached mesh, tessellating `describe()` first if the cache is dirty.
pub(crate) fn cached_geometry<'a, F>(
    id: ShapeId,
    cache: &'a mut ShapeCache,
    tessellator: &dyn Tessellator,
    options: &TessellationOptions,
    describe: F,
) -> Result<&'a Mesh, Error>
where
    F: FnOnce() -> Scene,
{
    if cache.geometry_dirty(options) {
        debug!(target: "vecshape", "regenerating geometry of shape {}", id);
    } else {
        trace!(target: "vecshape", "reusing geometry of shape {}", id);
    }
    cache
        .geometry
        .get_or_try_update(*options, || tessellator.tessellate(&describe(), options))
}

/// Returns the cached bounds, recomputing them first if the cache is dirty.
pub(crate) fn cached_bounds<F>(cache: &mut ShapeCache, compute: F) -> Rect
where
    F: FnOnce() -> Rect,
{
    *cache.bounds.get_or_update((), compute)
}


#[test]
fn approximate_equality() {
    assert!(approximately(0., 0.));
    assert!(approximately(0., 1e-7));
    assert!(!approximately(0., 1e-3));
    assert!(approximately(1e9, 1e9 + 1.));
    assert!(!approximately(100., 100.1));
}
