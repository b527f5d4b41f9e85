use crate::collider::ColliderHost;
use crate::data::cgmath_ext::Affine2Ext;
use crate::data::{Path2D, Rect, Scene, ShapeDesc, Stroke};
use crate::export::MarkupWriter;
use crate::render::{Mesh, TessellationOptions, Tessellator};
use crate::shape::{
    cached_bounds, cached_geometry, Shape, ShapeBase, ShapeCache, ShapeKind, ShapeStyle,
};
use cgmath::{Deg, InnerSpace, Matrix3, Vector2};
use failure::Error;

/// Default half-size of the point marker.
pub const DEFAULT_POINT_RADIUS: f64 = 0.1;

/// A point, drawn as a cross inside a circle.
#[derive(Debug, Clone)]
pub struct PointShape {
    base: ShapeBase,
    cache: ShapeCache,
    position: Vector2<f64>,

    /// Half-size of the marker glyph. Transforms never change it.
    point_radius: f64,
}

impl PointShape {
    pub fn new(position: Vector2<f64>) -> PointShape {
        PointShape {
            base: ShapeBase::default(),
            cache: ShapeCache::new(),
            position,
            point_radius: DEFAULT_POINT_RADIUS,
        }
    }

    pub fn with_style(mut self, style: ShapeStyle) -> PointShape {
        self.base.style = style;
        self
    }

    pub fn point_radius(&self) -> f64 {
        self.point_radius
    }

    pub fn set_point_radius(&mut self, radius: f64) {
        self.point_radius = radius;
        self.invalidate();
    }

    pub fn set_position(&mut self, position: Vector2<f64>) {
        self.position = position;
        self.invalidate();
    }

    fn map_position(&mut self, matrix: &Matrix3<f64>) {
        self.position = matrix.transform_point2(self.position);
        self.invalidate();
    }
}

fn marker_scene(
    position: Vector2<f64>,
    point_radius: f64,
    style: &ShapeStyle,
    options: &TessellationOptions,
) -> Scene {
    let horizontal = Vector2::new(point_radius, 0.);
    let vertical = Vector2::new(0., point_radius);

    let mut path = Path2D::line(position - horizontal, position + horizontal);
    path.extend(Path2D::line(position - vertical, position + vertical));
    path.push_circle(position, point_radius);

    Scene::single(ShapeDesc {
        path,
        stroke: Some(Stroke {
            half_width: style.pen_size / 2. / options.device_scale,
            color: style.color_outline,
        }),
        fill: None,
    })
}

impl Shape for PointShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Point
    }

    fn base(&self) -> &ShapeBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ShapeBase {
        &mut self.base
    }

    fn cache(&self) -> &ShapeCache {
        &self.cache
    }

    fn cache_mut(&mut self) -> &mut ShapeCache {
        &mut self.cache
    }

    fn position(&self) -> Vector2<f64> {
        self.position
    }

    fn distance(&self, point: Vector2<f64>) -> f64 {
        (point - self.position).magnitude()
    }

    /// Points have no area, so this is always false.
    fn contains(&self, _point: Vector2<f64>) -> bool {
        false
    }

    fn is_inside(&self, rect: &Rect) -> bool {
        rect.contains(self.position)
    }

    fn rotate_around(&mut self, center: Vector2<f64>, angle: Deg<f64>) {
        self.map_position(&Matrix3::from_rotation_about(center, angle));
    }

    fn translate_by(&mut self, offset: Vector2<f64>) {
        self.map_position(&Matrix3::from_translation2(offset));
    }

    fn transform_by(&mut self, matrix: &Matrix3<f64>) {
        self.map_position(matrix);
    }

    fn scene(&self, options: &TessellationOptions) -> Scene {
        marker_scene(self.position, self.point_radius, &self.base.style, options)
    }

    fn geometry(
        &mut self,
        tessellator: &dyn Tessellator,
        options: &TessellationOptions,
    ) -> Result<&Mesh, Error> {
        let PointShape {
            base,
            cache,
            position,
            point_radius,
        } = self;
        cached_geometry(base.id(), cache, tessellator, options, || {
            marker_scene(*position, *point_radius, &base.style, options)
        })
    }

    /// A zero-size rectangle at the point; the marker glyph is not included.
    fn bounds(&mut self) -> Rect {
        let position = self.position;
        cached_bounds(&mut self.cache, || Rect::point(position))
    }

    fn project_collider(&self, host: &mut dyn ColliderHost) {
        host.project_circle(&self.base.id().to_string(), self.position, self.point_radius);
    }

    /// Points are not exported.
    fn write_markup(
        &self,
        _writer: &mut dyn MarkupWriter,
        _origin: Vector2<f64>,
        _scale: f64,
    ) -> Result<(), Error> {
        Ok(())
    }

    fn duplicate(&self) -> Box<dyn Shape> {
        Box::new(PointShape {
            base: self.base.duplicate(),
            cache: ShapeCache::new(),
            position: self.position,
            point_radius: self.point_radius,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collider::ColliderSet;
    use crate::data::Color;
    use crate::export::SvgWriter;
    use crate::shape::test_util::CountingTessellator;

    fn v(x: f64, y: f64) -> Vector2<f64> {
        Vector2::new(x, y)
    }

    fn assert_close_vec(a: Vector2<f64>, b: Vector2<f64>) {
        assert!((a - b).magnitude() < 1e-9, "{:?} != {:?}", a, b);
    }

    #[test]
    fn queries() {
        let point = PointShape::new(v(1., 1.));
        assert_eq!(point.distance(v(1., 1.)), 0.);
        assert_eq!(point.distance(v(4., 5.)), 5.);

        for p in &[v(1., 1.), v(1.05, 1.), v(0., 0.)] {
            assert!(!point.contains(*p));
        }

        assert!(point.is_inside(&Rect::new(v(0., 0.), v(2., 2.))));
        assert!(!point.is_inside(&Rect::new(v(0., 0.), v(1., 1.))));
    }

    #[test]
    fn transforms_keep_marker_size() {
        let mut point = PointShape::new(v(2., 0.));
        point.rotate_around(v(0., 0.), Deg(90.));
        assert_close_vec(point.position(), v(0., 2.));

        point.translate_by(v(1., 1.));
        assert_close_vec(point.position(), v(1., 3.));

        point.transform_by(&Matrix3::from_scale2(3., 0.5));
        assert_close_vec(point.position(), v(3., 1.5));
        assert_eq!(point.point_radius(), DEFAULT_POINT_RADIUS);
    }

    #[test]
    fn marker_geometry() {
        let tess = CountingTessellator::default();
        let options = TessellationOptions {
            device_scale: 2.,
            ..TessellationOptions::default()
        };
        let mut point = PointShape::new(v(0., 0.)).with_style(ShapeStyle {
            color_outline: Color::BLACK,
            color_fill: Color::WHITE,
            pen_size: 0.2,
        });

        let mesh = point.geometry(&tess, &options).unwrap();
        // stroke only, even with a visible fill color
        assert_eq!(mesh.parts.len(), 1);
        assert_eq!(mesh.parts[0].color, Color::BLACK);
        let bounds = mesh.bounds().unwrap();
        // the marker circle plus half of the stroke
        assert!(bounds.max.x <= 0.1 + 0.05 + 1e-3);
        assert!(bounds.min.y >= -0.1 - 0.05 - 1e-3);

        let scene = tess.last_scene.borrow();
        let desc = &scene.as_ref().unwrap().shapes[0];
        assert_eq!(desc.stroke.unwrap().half_width, 0.05);
        assert_eq!(desc.path.flatten(options.tolerance).len(), 3);
    }

    #[test]
    fn geometry_cache() {
        let tess = CountingTessellator::default();
        let options = TessellationOptions::default();
        let mut point = PointShape::new(v(0., 0.));

        point.geometry(&tess, &options).unwrap();
        point.geometry(&tess, &options).unwrap();
        assert_eq!(tess.calls.get(), 1);

        point.translate_by(v(0., 1.));
        point.geometry(&tess, &options).unwrap();
        assert_eq!(tess.calls.get(), 2);
    }

    #[test]
    fn degenerate_bounds() {
        let mut point = PointShape::new(v(3., 4.));
        assert_eq!(point.bounds(), Rect::point(v(3., 4.)));
        point.set_position(v(-1., 0.));
        assert_eq!(point.bounds(), Rect::point(v(-1., 0.)));
    }

    #[test]
    fn collider_uses_marker_radius() {
        let mut point = PointShape::new(v(1., 1.));
        point.set_point_radius(0.25);
        let mut host = ColliderSet::new();
        point.project_collider(&mut host);
        point.translate_by(v(1., 0.));
        point.project_collider(&mut host);

        assert_eq!(host.len(), 1);
        assert_eq!(host.colliders()[0].offset, v(2., 1.));
        assert_eq!(host.colliders()[0].radius, 0.25);
    }

    #[test]
    fn not_exported() {
        let point = PointShape::new(v(1., 1.));
        let mut out = String::new();
        point
            .write_markup(&mut SvgWriter::new(&mut out), v(0., 0.), 10.)
            .unwrap();
        assert!(out.is_empty());
    }
}
