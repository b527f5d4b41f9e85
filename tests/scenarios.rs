use cgmath::{Deg, InnerSpace, Matrix3, Vector2};
use vecshape::collider::ColliderSet;
use vecshape::data::cgmath_ext::Affine2Ext;
use vecshape::data::{Color, Rect};
use vecshape::export::{write_svg_document, SvgWriter};
use vecshape::render::{PathTessellator, TessellationOptions};
use vecshape::shape::{CircleShape, PointShape, Shape, ShapeStyle};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn v(x: f64, y: f64) -> Vector2<f64> {
    Vector2::new(x, y)
}

#[test]
fn move_then_query() {
    let mut circle = CircleShape::new(v(0., 0.), 5.);
    circle.translate_by(v(3., 4.));
    assert_eq!(circle.position(), v(3., 4.));
    assert_eq!(circle.distance(v(3., 4.)), 5.);
    assert_eq!(circle.distance(v(3., 9.)), 0.);
    assert!(circle.contains(v(3., 4.)));
    assert!(!circle.contains(v(3., 9.)));
}

#[test]
fn arc_becomes_circle() {
    let tess = PathTessellator;
    let options = TessellationOptions::default();
    let mut arc = CircleShape::arc(v(0., 0.), 2., Deg(0.), Deg(90.)).with_style(ShapeStyle {
        color_outline: Color::BLACK,
        color_fill: Color::WHITE,
        pen_size: 1.,
    });
    assert!(!arc.is_closed());
    // stroke only
    assert_eq!(arc.geometry(&tess, &options).unwrap().parts.len(), 1);

    arc.set_sweep_angle(Deg(360.));
    assert!(arc.is_closed());
    assert!(arc.cache().geometry_dirty(&options));
    let mesh = arc.geometry(&tess, &options).unwrap();
    assert_eq!(mesh.parts.len(), 2);
    assert_eq!(mesh.parts[0].color, Color::WHITE);
}

#[test]
fn export_document() {
    let shapes: Vec<Box<dyn Shape>> = vec![
        Box::new(CircleShape::new(v(1., 1.), 2.)),
        Box::new(PointShape::new(v(0., 0.))),
    ];
    let mut out = String::new();
    write_svg_document(&mut SvgWriter::new(&mut out), &shapes, v(0., 0.), 10.).unwrap();
    assert_eq!(
        out,
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg">"#,
            r##"<circle cx="10" cy="-10" r="20" stroke="#000000" fill="none" stroke-width="0.01"/>"##,
            "</svg>"
        )
    );
}

#[test]
fn uniform_and_non_uniform_scale() {
    init_logger();

    let mut circle = CircleShape::new(v(1., 0.), 1.);
    circle.transform_by(&Matrix3::from_scale2(2., 2.));
    assert!((circle.position() - v(2., 0.)).magnitude() < 1e-9);
    assert!((circle.radius() - 2.).abs() < 1e-9);

    circle.transform_by(&Matrix3::from_scale2(3., 1.));
    assert!((circle.position() - v(6., 0.)).magnitude() < 1e-9);
    assert!((circle.radius() - 2.).abs() < 1e-9);

    let mut point = PointShape::new(v(1., 1.));
    point.transform_by(&Matrix3::from_scale2(3., 1.));
    assert_eq!(point.position(), v(3., 1.));
}

#[test]
fn selection_rect() {
    let mut circle = CircleShape::new(v(5., 5.), 2.);
    let point = PointShape::new(v(5., 5.));

    let large = Rect::new(v(0., 0.), v(10., 10.));
    let small = Rect::new(v(0., 0.), v(6., 6.));
    assert!(circle.is_inside(&large));
    assert!(point.is_inside(&large));
    assert!(!circle.is_inside(&small));
    assert!(point.is_inside(&small));

    assert_eq!(circle.bounds(), Rect::new(v(3., 3.), v(7., 7.)));
}

#[test]
fn colliders_follow_shapes() {
    let mut shapes: Vec<Box<dyn Shape>> = vec![
        Box::new(CircleShape::new(v(0., 0.), 1.)),
        Box::new(PointShape::new(v(2., 2.))),
    ];
    let mut host = ColliderSet::new();
    for shape in &shapes {
        shape.project_collider(&mut host);
    }
    for shape in &mut shapes {
        shape.rotate_around(v(0., 0.), Deg(180.));
        shape.project_collider(&mut host);
    }

    assert_eq!(host.len(), 2);
    let point = host.get(&shapes[1].id().to_string()).unwrap();
    assert!((point.offset - v(-2., -2.)).magnitude() < 1e-9);
    assert_eq!(point.radius, 0.1);
}

#[test]
fn duplicates_are_independent() {
    let tess = PathTessellator;
    let options = TessellationOptions::default();
    let mut original = CircleShape::new(v(0., 0.), 1.);
    original.geometry(&tess, &options).unwrap();

    let mut copy = original.duplicate();
    assert_ne!(copy.id(), original.id());
    assert!(copy.cache().geometry_dirty(&options));

    copy.translate_by(v(5., 0.));
    assert_eq!(original.position(), v(0., 0.));
    assert!(!original.cache().geometry_dirty(&options));
    assert!(copy.geometry(&tess, &options).unwrap().bounds().unwrap().min.x > 3.);
}
