use cgmath::Vector2;

/// An axis-aligned rectangle.
///
/// Containment is min-inclusive and max-exclusive on both axes, so a zero-size rectangle contains
/// nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vector2<f64>,
    pub max: Vector2<f64>,
}

impl Rect {
    /// Creates a rectangle from two corners. The corners are sorted per axis.
    pub fn new(a: Vector2<f64>, b: Vector2<f64>) -> Rect {
        Rect {
            min: Vector2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Vector2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a rectangle from its minimum corner and size.
    pub fn from_origin_size(origin: Vector2<f64>, size: Vector2<f64>) -> Rect {
        Rect::new(origin, origin + size)
    }

    /// Creates a rectangle centered on `center` that extends `half_extent` in each direction.
    pub fn from_center(center: Vector2<f64>, half_extent: Vector2<f64>) -> Rect {
        Rect::new(center - half_extent, center + half_extent)
    }

    /// Creates a zero-size rectangle at a point.
    pub fn point(at: Vector2<f64>) -> Rect {
        Rect { min: at, max: at }
    }

    pub fn size(&self) -> Vector2<f64> {
        self.max - self.min
    }

    pub fn center(&self) -> Vector2<f64> {
        (self.min + self.max) / 2.
    }

    /// Returns true if the point lies within the rectangle.
    pub fn contains(&self, point: Vector2<f64>) -> bool {
        point.x >= self.min.x && point.x < self.max.x && point.y >= self.min.y && point.y < self.max.y
    }

    /// Returns the smallest rectangle containing both rectangles.
    pub fn union(&self, other: &Rect) -> Rect {
        Rect {
            min: Vector2::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Vector2::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Grows the rectangle to include a point.
    pub fn include(&mut self, point: Vector2<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
    }
}

#[test]
fn containment_edges() {
    let rect = Rect::from_origin_size(Vector2::new(0., 0.), Vector2::new(10., 10.));
    assert!(rect.contains(Vector2::new(0., 0.)));
    assert!(rect.contains(Vector2::new(9.999, 5.)));
    assert!(!rect.contains(Vector2::new(10., 5.)));
    assert!(!rect.contains(Vector2::new(5., 10.)));
    assert!(!rect.contains(Vector2::new(-0.001, 5.)));

    assert!(!Rect::point(Vector2::new(1., 1.)).contains(Vector2::new(1., 1.)));
}

#[test]
fn sorted_corners() {
    let rect = Rect::new(Vector2::new(4., -1.), Vector2::new(-2., 3.));
    assert_eq!(rect.min, Vector2::new(-2., -1.));
    assert_eq!(rect.max, Vector2::new(4., 3.));
    assert_eq!(rect.size(), Vector2::new(6., 4.));
    assert_eq!(rect.center(), Vector2::new(1., 1.));
}

#[test]
fn union_and_include() {
    let mut rect = Rect::point(Vector2::new(0., 0.));
    rect.include(Vector2::new(2., -3.));
    assert_eq!(rect, Rect::new(Vector2::new(0., -3.), Vector2::new(2., 0.)));

    let other = Rect::from_center(Vector2::new(5., 5.), Vector2::new(1., 1.));
    let both = rect.union(&other);
    assert_eq!(both.min, Vector2::new(0., -3.));
    assert_eq!(both.max, Vector2::new(6., 6.));
}
