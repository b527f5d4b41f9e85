use crate::collider::ColliderHost;
use crate::data::cgmath_ext::Affine2Ext;
use crate::data::{Path2D, Rect, Scene, ShapeDesc, Stroke};
use crate::export::{MarkupWriter, SVG_STROKE_WIDTH};
use crate::render::{Mesh, TessellationOptions, Tessellator};
use crate::shape::{
    approximately, cached_bounds, cached_geometry, Shape, ShapeBase, ShapeCache, ShapeKind,
    ShapeStyle,
};
use cgmath::{Deg, InnerSpace, Matrix3, Rad, Vector2};
use failure::Error;

/// Returns true if an arc with this sweep is drawn as a full circle.
fn is_full_sweep(sweep: Deg<f64>) -> bool {
    approximately(sweep.0, 0.) || sweep.0.abs() >= 360.
}

/// Parametric state of a circle or circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
struct CircleGeometry {
    position: Vector2<f64>,
    radius: f64,
    start_angle: Rad<f64>,
    sweep_angle: Rad<f64>,
    closed: bool,
}

impl CircleGeometry {
    fn scene(&self, style: &ShapeStyle, options: &TessellationOptions) -> Scene {
        let stroke = Some(Stroke {
            half_width: style.pen_size / options.device_scale,
            color: style.color_outline,
        });

        if self.closed {
            Scene::single(ShapeDesc {
                path: Path2D::circle(self.position, self.radius),
                stroke,
                fill: Some(style.color_fill).filter(|color| color.is_visible()),
            })
        } else {
            // arcs are never filled
            Scene::single(ShapeDesc {
                path: Path2D::arc(
                    self.position,
                    self.radius,
                    self.start_angle.0,
                    self.sweep_angle.0,
                ),
                stroke,
                fill: None,
            })
        }
    }

    /// The bounds of the full circle, also for arcs.
    fn bounds(&self) -> Rect {
        Rect::from_center(self.position, Vector2::new(self.radius, self.radius))
    }
}

/// A circle, or a circular arc if the sweep angle covers less than a full turn.
#[derive(Debug, Clone)]
pub struct CircleShape {
    base: ShapeBase,
    cache: ShapeCache,
    geom: CircleGeometry,
}

impl CircleShape {
    /// Creates a full circle.
    pub fn new(center: Vector2<f64>, radius: f64) -> CircleShape {
        CircleShape::arc(center, radius, Deg(0.), Deg(0.))
    }

    /// Creates an arc starting at `start` and sweeping `sweep` counter-clockwise. A sweep of zero
    /// or of at least a full turn makes a full circle.
    pub fn arc(center: Vector2<f64>, radius: f64, start: Deg<f64>, sweep: Deg<f64>) -> CircleShape {
        CircleShape {
            base: ShapeBase::default(),
            cache: ShapeCache::new(),
            geom: CircleGeometry {
                position: center,
                radius,
                start_angle: start.into(),
                sweep_angle: sweep.into(),
                closed: is_full_sweep(sweep),
            },
        }
    }

    pub fn with_style(mut self, style: ShapeStyle) -> CircleShape {
        self.base.style = style;
        self
    }

    pub fn radius(&self) -> f64 {
        self.geom.radius
    }

    pub fn start_angle(&self) -> Deg<f64> {
        self.geom.start_angle.into()
    }

    pub fn sweep_angle(&self) -> Deg<f64> {
        self.geom.sweep_angle.into()
    }

    /// Returns true if this is a full circle rather than an arc.
    pub fn is_closed(&self) -> bool {
        self.geom.closed
    }

    pub fn set_position(&mut self, position: Vector2<f64>) {
        self.geom.position = position;
        self.invalidate();
    }

    pub fn set_radius(&mut self, radius: f64) {
        self.geom.radius = radius;
        self.invalidate();
    }

    pub fn set_start_angle(&mut self, angle: Deg<f64>) {
        self.geom.start_angle = angle.into();
        self.invalidate();
    }

    /// Sets the sweep angle, which also decides whether this is a full circle.
    pub fn set_sweep_angle(&mut self, angle: Deg<f64>) {
        self.geom.sweep_angle = angle.into();
        self.geom.closed = is_full_sweep(angle);
        self.invalidate();
    }
}

impl Shape for CircleShape {
    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
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
        self.geom.position
    }

    fn distance(&self, point: Vector2<f64>) -> f64 {
        ((point - self.geom.position).magnitude() - self.geom.radius).abs()
    }

    /// Tests against the full disk, also for arcs. Points on the circle are outside.
    fn contains(&self, point: Vector2<f64>) -> bool {
        (point - self.geom.position).magnitude() < self.geom.radius
    }

    fn is_inside(&self, rect: &Rect) -> bool {
        let c = self.geom.position;
        let r = self.geom.radius;
        [
            c,
            c + Vector2::new(r, 0.),
            c - Vector2::new(r, 0.),
            c + Vector2::new(0., r),
            c - Vector2::new(0., r),
        ]
        .iter()
        .all(|p| rect.contains(*p))
    }

    /// Moves the center; the start angle is not rotated along.
    fn rotate_around(&mut self, center: Vector2<f64>, angle: Deg<f64>) {
        let matrix = Matrix3::from_rotation_about(center, angle);
        self.geom.position = matrix.transform_point2(self.geom.position);
        self.invalidate();
    }

    fn translate_by(&mut self, offset: Vector2<f64>) {
        self.geom.position += offset;
        self.invalidate();
    }

    /// A circle can only represent transforms that scale it uniformly. For anything else (e.g.
    /// non-uniform scaling or shearing), only the center is moved and a warning is logged.
    fn transform_by(&mut self, matrix: &Matrix3<f64>) {
        let c = self.geom.position;
        let r = self.geom.radius;
        let center = matrix.transform_point2(c);

        let probes = [
            c + Vector2::new(0., r),
            c - Vector2::new(0., r),
            c + Vector2::new(r, 0.),
            c - Vector2::new(r, 0.),
        ];
        let distances: Vec<f64> = probes
            .iter()
            .map(|p| (matrix.transform_point2(*p) - center).magnitude2())
            .collect();
        let uniform = distances.iter().all(|d| approximately(*d, distances[0]));

        self.geom.position = center;
        if uniform {
            self.geom.radius = distances[0].sqrt();
        } else {
            warn!(
                target: "vecshape",
                "circle {} cannot be deformed by a non-uniform transform; only its center was moved",
                self.base.id()
            );
        }
        self.invalidate();
    }

    fn scene(&self, options: &TessellationOptions) -> Scene {
        self.geom.scene(&self.base.style, options)
    }

    fn geometry(
        &mut self,
        tessellator: &dyn Tessellator,
        options: &TessellationOptions,
    ) -> Result<&Mesh, Error> {
        let CircleShape { base, cache, geom } = self;
        cached_geometry(base.id(), cache, tessellator, options, || {
            geom.scene(&base.style, options)
        })
    }

    fn bounds(&mut self) -> Rect {
        let geom = self.geom;
        cached_bounds(&mut self.cache, || geom.bounds())
    }

    /// Uses the full radius, also for arcs.
    fn project_collider(&self, host: &mut dyn ColliderHost) {
        host.project_circle(
            &self.base.id().to_string(),
            self.geom.position,
            self.geom.radius,
        );
    }

    /// Writes a `circle` element. Arcs are written as full circles.
    fn write_markup(
        &self,
        writer: &mut dyn MarkupWriter,
        origin: Vector2<f64>,
        scale: f64,
    ) -> Result<(), Error> {
        let center = self.geom.position - origin;
        let style = &self.base.style;

        writer.start_element("circle")?;
        writer.attribute_number("cx", center.x * scale)?;
        writer.attribute_number("cy", center.y * -scale)?;
        writer.attribute_number("r", self.geom.radius * scale)?;
        writer.attribute_str("stroke", &style.color_outline.to_markup_string())?;
        writer.attribute_str("fill", &style.color_fill.to_paint_string())?;
        writer.attribute_str("stroke-width", SVG_STROKE_WIDTH)?;
        writer.end_element()
    }

    fn duplicate(&self) -> Box<dyn Shape> {
        Box::new(CircleShape {
            base: self.base.duplicate(),
            cache: ShapeCache::new(),
            geom: self.geom,
        })
    }
}
