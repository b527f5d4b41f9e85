use crate::data::{Color, Contour, Scene, ShapeDesc, Stroke};
use crate::render::stroke_tess::{self, TessPoint};
use crate::render::{Mesh, MeshPart};
use cgmath::Vector2;
use failure::Error;
use lyon::math::Point;
use lyon::path::iterator::PathIterator;
use lyon::path::{PathEvent, PathState};
use lyon::tessellation::{
    geometry_builder, FillError, FillOptions, FillTessellator, OnError, VertexBuffers,
};
use std::f32;

/// How often the flattening tolerance may be doubled to fit a shape into 16-bit indices.
const MAX_COARSENING_STEPS: usize = 24;

/// Largest vertex count a mesh part may have.
const MAX_PART_VERTICES: usize = u16::max_value() as usize;

/// Tessellation errors.
#[derive(Debug, Fail)]
pub enum TessellationError {
    /// The fill tessellator rejected a path.
    #[fail(display = "fill tessellation failed: {:?}", _0)]
    Fill(FillError),

    /// A mesh part needs more vertices than 16-bit indices can address.
    #[fail(display = "mesh part needs {} vertices", _0)]
    TooManyVertices(usize),
}

/// Parameters that affect tessellation output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TessellationOptions {
    /// Maximum distance between a curve and its flattened approximation.
    pub tolerance: f32,

    /// Ratio of device pixels to scene units. Stroke widths given in device pixels are divided by
    /// this.
    pub device_scale: f32,

    /// Maximum angle spanned by one segment of a round join or cap, in radians.
    pub arc_threshold: f32,
}

impl Default for TessellationOptions {
    fn default() -> TessellationOptions {
        TessellationOptions {
            tolerance: 0.01,
            device_scale: 1.,
            arc_threshold: f32::consts::PI / 6.,
        }
    }
}

/// A tessellation backend: turns a declarative scene into triangles.
pub trait Tessellator {
    fn tessellate(&self, scene: &Scene, options: &TessellationOptions) -> Result<Mesh, Error>;
}

/// The default tessellator.
///
/// Fills closed contours with lyon’s fill tessellator and strokes every contour with the
/// polyline stroke tessellator.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathTessellator;

impl PathTessellator {
    pub fn new() -> PathTessellator {
        PathTessellator
    }

    fn tess_fill(
        contours: &[Contour],
        color: Color,
    ) -> Result<MeshPart, TessellationError> {
        let closed: Vec<_> = contours.iter().filter(|c| c.closed).cloned().collect();
        if closed.is_empty() {
            return Ok(MeshPart {
                color,
                vertices: Vec::new(),
                indices: Vec::new(),
            });
        }

        let mut buffers = VertexBuffers::new();

        {
            let mut vertex_builder = geometry_builder::simple_builder(&mut buffers);
            let mut tessellator = FillTessellator::new();
            let opts = FillOptions::DEFAULT
                .on_error(OnError::Recover)
                .with_normals(false);

            tessellator
                .tessellate_path(ContourIterator::new(&closed), &opts, &mut vertex_builder)
                .map_err(TessellationError::Fill)?;
        }

        // indices past the u16 range would have been truncated
        if buffers.vertices.len() > MAX_PART_VERTICES {
            return Err(TessellationError::TooManyVertices(buffers.vertices.len()));
        }

        Ok(MeshPart {
            color,
            vertices: buffers
                .vertices
                .into_iter()
                .map(|v| Vector2::new(v.position.x, v.position.y))
                .collect(),
            indices: buffers.indices,
        })
    }

    fn tess_stroke(
        contours: &[Contour],
        stroke: &Stroke,
        arc_threshold: f32,
    ) -> Result<MeshPart, TessellationError> {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();

        for contour in contours {
            let points: Vec<_> = contour
                .verts
                .iter()
                .map(|&pos| TessPoint {
                    pos,
                    radius: stroke.half_width,
                })
                .collect();
            let (mut v, i) = stroke_tess::tessellate(&points, arc_threshold, contour.closed);

            let offset = vertices.len();
            if offset + v.len() > MAX_PART_VERTICES {
                return Err(TessellationError::TooManyVertices(offset + v.len()));
            }
            vertices.append(&mut v);
            indices.extend(i.into_iter().map(|i| i + offset as u16));
        }

        Ok(MeshPart {
            color: stroke.color,
            vertices,
            indices,
        })
    }

    /// Returns the fill and stroke parts of a shape, in painting order.
    fn tess_shape_at(
        shape: &ShapeDesc,
        tolerance: f32,
        arc_threshold: f32,
    ) -> Result<Vec<MeshPart>, TessellationError> {
        let contours = shape.path.flatten(tolerance);

        // the stroke has more vertices than the fill, so it is the first to overflow
        let stroke = match &shape.stroke {
            Some(stroke) => Some(Self::tess_stroke(&contours, stroke, arc_threshold)?),
            None => None,
        };
        let fill = match shape.fill {
            Some(color) => Some(Self::tess_fill(&contours, color)?),
            None => None,
        };
        Ok(fill.into_iter().chain(stroke).collect())
    }

    /// Tessellates a shape, coarsening the tolerance until every part fits into 16-bit indices.
    fn tess_shape(
        shape: &ShapeDesc,
        options: &TessellationOptions,
        mesh: &mut Mesh,
    ) -> Result<(), TessellationError> {
        let mut tolerance = options.tolerance;
        let mut vertex_count = 0;

        for _ in 0..MAX_COARSENING_STEPS {
            match Self::tess_shape_at(shape, tolerance, options.arc_threshold) {
                Err(TessellationError::TooManyVertices(count)) => {
                    debug!(
                        target: "vecshape",
                        "{} vertices at tolerance {}; coarsening", count, tolerance
                    );
                    vertex_count = count;
                    tolerance *= 2.;
                }
                result => {
                    for part in result? {
                        mesh.push(part);
                    }
                    return Ok(());
                }
            }
        }

        Err(TessellationError::TooManyVertices(vertex_count))
    }
}

impl Tessellator for PathTessellator {
    fn tessellate(&self, scene: &Scene, options: &TessellationOptions) -> Result<Mesh, Error> {
        let mut mesh = Mesh::new();
        for shape in &scene.shapes {
            Self::tess_shape(shape, options, &mut mesh)?;
        }
        Ok(mesh)
    }
}

/// PathIterator over flattened contours. Every contour is emitted as a closed subpath.
struct ContourIterator<'a> {
    contours: &'a [Contour],
    contour: usize,
    vert: usize,
    state: PathState,
}

impl<'a> ContourIterator<'a> {
    fn new(contours: &'a [Contour]) -> ContourIterator<'a> {
        ContourIterator {
            contours,
            contour: 0,
            vert: 0,
            state: PathState::new(),
        }
    }
}

impl<'a> Iterator for ContourIterator<'a> {
    type Item = PathEvent;

    fn next(&mut self) -> Option<PathEvent> {
        loop {
            let contour = self.contours.get(self.contour)?;

            if let Some(item) = contour.verts.get(self.vert) {
                self.vert += 1;
                let vert = Point::new(item.x, item.y);
                self.state.current = vert;
                self.state.last_ctrl = vert;
                if self.vert == 1 {
                    self.state.first = vert;
                    return Some(PathEvent::MoveTo(vert));
                }
                return Some(PathEvent::LineTo(vert));
            }

            self.contour += 1;
            self.vert = 0;
            if !contour.verts.is_empty() {
                self.state.current = self.state.first;
                return Some(PathEvent::Close);
            }
        }
    }
}

impl<'a> PathIterator for ContourIterator<'a> {
    fn get_state(&self) -> &PathState {
        &self.state
    }
}
