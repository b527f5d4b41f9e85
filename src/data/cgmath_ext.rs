//! CGMath extension traits.
//!
//! Planar affine transforms are represented as homogeneous `Matrix3<f64>`s with the translation
//! in the third column.

use cgmath::{Deg, Matrix3, Vector2, Vector3};

/// Vector extensions.
pub trait Vector2Ext {
    fn into_f32(self) -> Vector2<f32>;
    fn into_f64(self) -> Vector2<f64>;
}

impl Vector2Ext for Vector2<f32> {
    fn into_f32(self) -> Vector2<f32> {
        self
    }
    fn into_f64(self) -> Vector2<f64> {
        Vector2::new(self.x as f64, self.y as f64)
    }
}

impl Vector2Ext for Vector2<f64> {
    fn into_f32(self) -> Vector2<f32> {
        Vector2::new(self.x as f32, self.y as f32)
    }
    fn into_f64(self) -> Vector2<f64> {
        self
    }
}

/// Planar affine transform extensions.
pub trait Affine2Ext {
    /// A translation by `v`.
    fn from_translation2(v: Vector2<f64>) -> Self;

    /// A counter-clockwise rotation about the origin.
    fn from_rotation2(angle: Deg<f64>) -> Self;

    /// A counter-clockwise rotation about `pivot`.
    fn from_rotation_about(pivot: Vector2<f64>, angle: Deg<f64>) -> Self;

    /// A per-axis scale about the origin.
    fn from_scale2(x: f64, y: f64) -> Self;

    /// Maps a point through this transform.
    fn transform_point2(&self, point: Vector2<f64>) -> Vector2<f64>;
}

impl Affine2Ext for Matrix3<f64> {
    fn from_translation2(v: Vector2<f64>) -> Matrix3<f64> {
        Matrix3::new(1., 0., 0., 0., 1., 0., v.x, v.y, 1.)
    }

    fn from_rotation2(angle: Deg<f64>) -> Matrix3<f64> {
        Matrix3::from_angle_z(angle)
    }

    fn from_rotation_about(pivot: Vector2<f64>, angle: Deg<f64>) -> Matrix3<f64> {
        Matrix3::from_translation2(pivot)
            * Matrix3::from_rotation2(angle)
            * Matrix3::from_translation2(-pivot)
    }

    fn from_scale2(x: f64, y: f64) -> Matrix3<f64> {
        Matrix3::new(x, 0., 0., 0., y, 0., 0., 0., 1.)
    }

    fn transform_point2(&self, point: Vector2<f64>) -> Vector2<f64> {
        let p = *self * Vector3::new(point.x, point.y, 1.);
        Vector2::new(p.x, p.y)
    }
}
