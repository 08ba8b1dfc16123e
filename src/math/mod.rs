pub mod vec3;
pub mod mat4;
pub mod ray;
pub mod aabb;

pub use self::vec3::Vec3;
pub use self::mat4::Mat4;
pub use self::ray::Ray;
pub use self::aabb::AABB;
pub use std::f32::{INFINITY, NEG_INFINITY, MAX as FLT_MAX};
pub use std::f32::consts::*;

pub const INV_PI: f32 = FRAC_1_PI;
pub const INV_2_PI: f32 = 0.5 * FRAC_1_PI;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis { X, Y, Z }

impl Axis {
	pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

#[inline(always)]
pub fn deg_to_rad(degrees: f32) -> f32 {
	degrees * PI / 180.0
}

/// Two unit vectors orthogonal to `n` and to each other
pub fn tangent_frame(n: Vec3) -> (Vec3, Vec3) {
	let t = if n.x.abs() > n.y.abs() {
		Vec3::new(n.z, 0.0, -n.x) / (n.x * n.x + n.z * n.z).sqrt()
	} else {
		Vec3::new(0.0, -n.z, n.y) / (n.y * n.y + n.z * n.z).sqrt()
	};
	(t, Vec3::cross(n, t))
}
