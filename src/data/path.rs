use cgmath::Vector2;
use lyon::math::Point;
use lyon::path::builder::{FlatPathBuilder, PathBuilder};
use lyon::path::{self, PathEvent};
use std::f64::consts::PI;
use std::mem;

/// Two-dimensional path.
#[derive(Debug, Clone, PartialEq)]
pub struct Path2D(Vec<Path2DCmd>);

/// Path2D commands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Path2DCmd {
    /// Jump to a point (analogous to SVG M).
    JumpTo(Vector2<f64>),

    /// Line to a point (analogous to SVG L).
    LineTo(Vector2<f64>),

    /// Quadratic Bézier curve (analogous to SVG Q).
    QuadTo(Vector2<f64>, Vector2<f64>),

    /// Cubic bézier curve (analogous to SVG C).
    CubicTo(Vector2<f64>, Vector2<f64>, Vector2<f64>),

    /// Close the current shape (analogous to SVG Z).
    CloseShape,
}

/// A contiguous run of flattened vertices.
#[derive(Debug, Clone, PartialEq)]
pub struct Contour {
    pub verts: Vec<Vector2<f32>>,

    /// Whether the contour was explicitly closed. The closing vertex (equal to the first) is
    /// included in `verts`.
    pub closed: bool,
}

fn unit(angle: f64) -> Vector2<f64> {
    Vector2::new(angle.cos(), angle.sin())
}

impl Path2D {
    /// Creates a new empty path.
    pub fn new() -> Path2D {
        Path2D(Vec::new())
    }

    /// Creates an open circular arc starting at `start` radians and sweeping `sweep` radians
    /// (counter-clockwise for positive values).
    ///
    /// The arc is built from cubic segments spanning at most a quarter turn each.
    pub fn arc(center: Vector2<f64>, radius: f64, start: f64, sweep: f64) -> Path2D {
        let mut path = Path2D::new();
        path.push_arc(center, radius, start, sweep);
        path
    }

    /// Creates a closed circle.
    pub fn circle(center: Vector2<f64>, radius: f64) -> Path2D {
        let mut path = Path2D::new();
        path.push_circle(center, radius);
        path
    }

    /// Creates a single line segment.
    pub fn line(from: Vector2<f64>, to: Vector2<f64>) -> Path2D {
        vec![Path2DCmd::JumpTo(from), Path2DCmd::LineTo(to)].into()
    }

    /// Appends an arc as a new subpath.
    pub fn push_arc(&mut self, center: Vector2<f64>, radius: f64, start: f64, sweep: f64) {
        let segments = (sweep.abs() / (PI / 2.)).ceil().max(1.) as usize;
        let step = sweep / segments as f64;
        let handle = 4. / 3. * (step / 4.).tan() * radius;

        self.0.push(Path2DCmd::JumpTo(center + unit(start) * radius));
        for i in 0..segments {
            let a0 = start + step * i as f64;
            let a1 = a0 + step;
            let p0 = center + unit(a0) * radius;
            let p3 = center + unit(a1) * radius;
            // tangents are the radial directions rotated a quarter turn
            let t0 = Vector2::new(-a0.sin(), a0.cos());
            let t1 = Vector2::new(-a1.sin(), a1.cos());
            self.0
                .push(Path2DCmd::CubicTo(p0 + t0 * handle, p3 - t1 * handle, p3));
        }
    }

    /// Appends a closed circle as a new subpath.
    pub fn push_circle(&mut self, center: Vector2<f64>, radius: f64) {
        self.push_arc(center, radius, 0., 2. * PI);
        self.0.push(Path2DCmd::CloseShape);
    }

    /// Appends all commands of another path.
    pub fn extend(&mut self, other: Path2D) {
        self.0.extend(other.0);
    }

    /// Returns a reference to the list of path commands.
    pub fn commands(&self) -> &[Path2DCmd] {
        &self.0
    }

    /// Remaps all points using the given closure.
    pub fn remap_points<F: FnMut(&mut Vector2<f64>)>(&mut self, mut f: F) {
        for cmd in &mut self.0 {
            match cmd {
                Path2DCmd::JumpTo(a) | Path2DCmd::LineTo(a) => f(a),
                Path2DCmd::QuadTo(a, b) => {
                    f(a);
                    f(b);
                }
                Path2DCmd::CubicTo(a, b, c) => {
                    f(a);
                    f(b);
                    f(c);
                }
                Path2DCmd::CloseShape => (),
            }
        }
    }

    /// Flattens this path to contours of line segments, splitting at jump commands.
    ///
    /// Curves are approximated within `tolerance`.
    pub fn flatten(&self, tolerance: f32) -> Vec<Contour> {
        let mut builder = path::default::Path::builder().flattened(tolerance);
        let mut needs_move = true;

        for command in &self.0 {
            // ensure M exists before command
            if command.needs_move_if_first() && needs_move {
                if let Some(point) = command.point() {
                    builder.move_to(to_point(point));
                }
            }
            needs_move = command.next_will_need_move();

            match command {
                Path2DCmd::JumpTo(v) => builder.move_to(to_point(*v)),
                Path2DCmd::LineTo(v) => builder.line_to(to_point(*v)),
                Path2DCmd::QuadTo(c, p) => {
                    builder.quadratic_bezier_to(to_point(*c), to_point(*p));
                }
                Path2DCmd::CubicTo(c1, c2, p) => {
                    builder.cubic_bezier_to(to_point(*c1), to_point(*c2), to_point(*p));
                }
                Path2DCmd::CloseShape => builder.close(),
            }
        }

        let path = builder.build();

        let mut contours = Vec::new();
        let mut group = Vec::new();
        let mut group_start = None;

        for event in path.path_iter() {
            match event {
                PathEvent::MoveTo(p) => {
                    group_start = Some(p);
                    let old_group = mem::replace(&mut group, Vec::new());
                    if old_group.len() > 1 {
                        contours.push(Contour {
                            verts: old_group,
                            closed: false,
                        });
                    }
                    group.push((p.x, p.y).into());
                }
                PathEvent::LineTo(p) => push_distinct(&mut group, (p.x, p.y).into()),
                PathEvent::Close => {
                    if let Some(p) = group_start.take() {
                        push_distinct(&mut group, (p.x, p.y).into());
                        contours.push(Contour {
                            verts: mem::replace(&mut group, Vec::new()),
                            closed: true,
                        });
                    }
                }
                // a flattened path only contains line segments
                _ => (),
            }
        }

        if group.len() > 1 {
            contours.push(Contour {
                verts: group,
                closed: false,
            });
        }

        contours
    }
}

/// Pushes a vertex unless it repeats the previous one.
fn push_distinct(group: &mut Vec<Vector2<f32>>, v: Vector2<f32>) {
    if group.last() != Some(&v) {
        group.push(v);
    }
}

fn to_point(v: Vector2<f64>) -> Point {
    Point::new(v.x as f32, v.y as f32)
}

impl From<Vec<Path2DCmd>> for Path2D {
    fn from(t: Vec<Path2DCmd>) -> Path2D {
        Path2D(t)
    }
}

impl Path2DCmd {
    fn needs_move_if_first(&self) -> bool {
        match self {
            Path2DCmd::JumpTo(_) | Path2DCmd::CloseShape => false,
            _ => true,
        }
    }

    fn next_will_need_move(&self) -> bool {
        match self {
            Path2DCmd::CloseShape => true,
            _ => false,
        }
    }

    fn point(&self) -> Option<Vector2<f64>> {
        match self {
            Path2DCmd::JumpTo(v)
            | Path2DCmd::LineTo(v)
            | Path2DCmd::QuadTo(v, _)
            | Path2DCmd::CubicTo(v, _, _) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::InnerSpace;

    fn assert_on_circle(contour: &Contour, center: Vector2<f32>, radius: f32) {
        for v in &contour.verts {
            let d = (v - center).magnitude();
            assert!((d - radius).abs() < 0.05, "{:?} is {} from center", v, d);
        }
    }

    #[test]
    fn quarter_arc_segments() {
        let path = Path2D::arc(Vector2::new(0., 0.), 1., 0., PI / 2.);
        // one jump, one cubic
        assert_eq!(path.commands().len(), 2);

        let path = Path2D::arc(Vector2::new(0., 0.), 1., 0., -3. * PI / 2.);
        assert_eq!(path.commands().len(), 4);
        match path.commands().last() {
            Some(Path2DCmd::CubicTo(_, _, end)) => {
                assert!((end - Vector2::new(0., 1.)).magnitude() < 1e-9);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn flattened_circle_is_closed() {
        let path = Path2D::circle(Vector2::new(2., 3.), 5.);
        let contours = path.flatten(0.01);
        assert_eq!(contours.len(), 1);
        assert!(contours[0].closed);
        assert_eq!(contours[0].verts.first(), contours[0].verts.last());
        assert_on_circle(&contours[0], Vector2::new(2., 3.), 5.);
    }

    #[test]
    fn flattened_arc_is_open() {
        let path = Path2D::arc(Vector2::new(0., 0.), 2., 0., PI);
        let contours = path.flatten(0.01);
        assert_eq!(contours.len(), 1);
        assert!(!contours[0].closed);

        let first = contours[0].verts[0];
        let last = *contours[0].verts.last().unwrap();
        assert!((first - Vector2::new(2., 0.)).magnitude() < 1e-3);
        assert!((last - Vector2::new(-2., 0.)).magnitude() < 1e-3);
        assert_on_circle(&contours[0], Vector2::new(0., 0.), 2.);
    }

    #[test]
    fn jumps_split_contours() {
        let mut path = Path2D::line(Vector2::new(-1., 0.), Vector2::new(1., 0.));
        path.extend(Path2D::line(Vector2::new(0., -1.), Vector2::new(0., 1.)));
        let contours = path.flatten(0.01);
        assert_eq!(contours.len(), 2);
        assert_eq!(contours[0].verts, vec![Vector2::new(-1., 0.), Vector2::new(1., 0.)]);
        assert_eq!(contours[1].verts, vec![Vector2::new(0., -1.), Vector2::new(0., 1.)]);
    }

    #[test]
    fn remap() {
        let mut path = Path2D::line(Vector2::new(1., 2.), Vector2::new(3., 4.));
        path.remap_points(|p| *p *= 2.);
        assert_eq!(
            path.commands(),
            &[
                Path2DCmd::JumpTo(Vector2::new(2., 4.)),
                Path2DCmd::LineTo(Vector2::new(6., 8.)),
            ]
        );
    }
}
