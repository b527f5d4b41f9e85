//! Stroke tessellator.
//!
//! Turns a polyline into a triangle strip of constant width with round joins, and either round
//! caps (open polylines) or a seamless closing join (closed loops).

use cgmath::Vector2;
use std::f32::consts::PI;

/// Stroke tessellator point.
#[derive(Debug, Clone, Copy)]
pub struct TessPoint {
    pub pos: Vector2<f32>,
    pub radius: f32,
}

fn vec_from_angle(angle: f32) -> Vector2<f32> {
    Vector2::new(angle.cos(), angle.sin())
}

fn angle_between(from: Vector2<f32>, to: Vector2<f32>) -> f32 {
    let diff = to - from;
    diff.y.atan2(diff.x)
}

/// a mod b with correct handling of negative numbers
fn proper_mod(a: f32, b: f32) -> f32 {
    ((a % b) + b) % b
}

/// Tessellates stroke points and creates arcs (a round join) if an angle exceeds `arc_threshold`.
///
/// Open polylines get round line caps. If `closed` is set, the last point is connected back to
/// the first one instead (a trailing point equal to the first one is ignored).
///
/// # Panics
/// - will panic if `arc_threshold` is `0`
pub fn tessellate(
    points: &[TessPoint],
    arc_threshold: f32,
    closed: bool,
) -> (Vec<Vector2<f32>>, Vec<u16>) {
    assert!(
        arc_threshold != 0.,
        "Stroke tessellator: arc threshold is 0"
    );

    let mut points = points;
    if closed && points.len() > 1 && points[0].pos == points[points.len() - 1].pos {
        points = &points[..points.len() - 1];
    }
    let closed = closed && points.len() > 2;

    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    let n = points.len();
    if n == 0 {
        return (vertices, indices);
    }

    // index of the previous vertex on the left side
    let mut prev_index_left: Option<u16> = None;

    // index of the previous vertex on the right side
    let mut prev_index_right: Option<u16> = None;

    // closed loops revisit the first point to close the strip
    let steps = if closed { n + 1 } else { n };

    for step in 0..steps {
        let point = points[step % n];

        let prev = if step > 0 {
            Some(points[(step - 1) % n])
        } else if closed {
            Some(points[n - 1])
        } else {
            None
        };
        let next = if step + 1 < n || closed {
            Some(points[(step + 1) % n])
        } else {
            None
        };

        let in_angle = prev.map(|prev| angle_between(prev.pos, point.pos));
        let out_angle = next.map(|next| angle_between(point.pos, next.pos));

        let outline_angle = in_angle.unwrap_or(out_angle.unwrap_or(0.));

        let outline_left = point.pos + vec_from_angle(outline_angle - PI / 2.) * point.radius;
        let outline_right = point.pos + vec_from_angle(outline_angle + PI / 2.) * point.radius;

        let index_left = vertices.len() as u16;
        vertices.push(outline_left);
        let index_right = vertices.len() as u16;
        vertices.push(outline_right);

        // make triangles if the previous two outline points exist
        if let (Some(prev_left), Some(prev_right)) = (prev_index_left, prev_index_right) {
            // left    1  x
            //  --->   | \
            // right   2--3
            //    prev-^  ^-current
            indices.push(prev_left);
            indices.push(prev_right);
            indices.push(index_right);

            // left    1--3
            //  --->    \ |
            // right   x  2
            //    prev-^  ^-current
            indices.push(prev_left);
            indices.push(index_right);
            indices.push(index_left);
        }

        prev_index_left = Some(index_left);
        prev_index_right = Some(index_right);

        // the join at the first point of a closed loop was already made on the first visit
        if closed && step == n {
            break;
        }

        if let (Some(in_angle), Some(out_angle)) = (in_angle, out_angle) {
            // relative out angle in ]-π, π]
            let out_angle_off = proper_mod(out_angle - in_angle - PI, 2. * PI) - PI;

            if out_angle_off.abs() > arc_threshold {
                let steps = (out_angle_off.abs() / arc_threshold).ceil() as usize;
                let step_amount = out_angle_off / steps as f32;
                let arc_on_left = out_angle_off < 0.;

                for arc_step in 1..=steps {
                    let ipoint = point.pos
                        + vec_from_angle(
                            in_angle
                                + (arc_step as f32) * step_amount
                                + if arc_on_left { -PI / 2. } else { PI / 2. },
                        ) * point.radius;

                    let index_ipoint = vertices.len() as u16;
                    vertices.push(ipoint);

                    if arc_on_left {
                        if let Some(prev_index_left) = prev_index_left {
                            indices.push(prev_index_left);
                            indices.push(index_right);
                            indices.push(index_ipoint);
                        }

                        prev_index_left = Some(index_ipoint);
                    } else {
                        if let Some(prev_index_right) = prev_index_right {
                            indices.push(index_ipoint);
                            indices.push(index_left);
                            indices.push(prev_index_right);
                        }

                        prev_index_right = Some(index_ipoint);
                    }
                }
            }
        }
    }

    if !closed {
        let first_point = points[0];
        let last_point = points[n - 1];
        let (first_angle, last_angle) = if n > 1 {
            (
                angle_between(points[0].pos, points[1].pos),
                angle_between(points[n - 2].pos, points[n - 1].pos),
            )
        } else {
            (0., 0.)
        };

        // stroke caps

        let first_point_index = vertices.len() as u16;
        vertices.push(first_point.pos);

        let last_point_index = vertices.len() as u16;
        vertices.push(last_point.pos);

        let mut angle = -PI / 2.;
        let mut prev_cap_indices = None;

        while angle <= PI / 2. {
            let start_cap_point =
                first_point.pos + vec_from_angle(PI + first_angle + angle) * first_point.radius;
            let end_cap_point =
                last_point.pos + vec_from_angle(last_angle + angle) * last_point.radius;

            let start_cap_index = vertices.len() as u16;
            vertices.push(start_cap_point);

            let end_cap_index = vertices.len() as u16;
            vertices.push(end_cap_point);

            if let Some((prev_start_cap_index, prev_end_cap_index)) = prev_cap_indices {
                indices.push(first_point_index);
                indices.push(start_cap_index);
                indices.push(prev_start_cap_index);

                indices.push(last_point_index);
                indices.push(end_cap_index);
                indices.push(prev_end_cap_index);
            }

            prev_cap_indices = Some((start_cap_index, end_cap_index));

            if angle > PI / 2. - arc_threshold && angle < PI / 2. {
                // ensure that PI / 2 is passed
                angle = PI / 2.;
            } else {
                angle += arc_threshold;
            }
        }
    }

    (vertices, indices)
}
