/*

    Declare numeric types used throughout this repo.

    WARNING: If you like to use f32 instead of f64
    during computations, you need to change all of these:
    pub type Float = f32;
    pub type Vector3 = Vec3;
    pub type Matrix4 = Mat4;
    pub type Quaternion = Quat;

    @date: 2 Oct, 2025
*/

use bevy_math::{DMat4, DQuat, DVec3, DVec4};

pub type Float = f64; // WARNING: If you want to change it to f32, don't forget to update the types below
pub type Vector3 = DVec3;
pub type Vector4 = DVec4;
pub type Matrix4 = DMat4;
pub type Quaternion = DQuat;

/// Tolerance used when comparing positions coming out of transform chains.
pub const EPSILON: Float = 1e-8;

pub fn approx_zero(x: Float) -> bool {
    x.abs() < EPSILON
}

pub fn approx_eq_vec(a: &Vector3, b: &Vector3) -> bool {
    approx_zero(a.distance_squared(*b))
}

pub fn transform_point(mat: &Matrix4, v: &Vector3) -> Vector3 {
    let v4 = Vector4::new(v.x, v.y, v.z, 1.0);
    let r = *mat * v4;
    Vector3::new(r.x, r.y, r.z)
}
