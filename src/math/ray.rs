use crate::math::{Vec3, FLT_MAX};

/// Half-line `origin + t * direction` restricted to `t_min <= t <= t_max`.
///
/// The direction is not required to be normalized, distances are expressed
/// in multiples of its length.
#[derive(Copy, Clone, Debug)]
pub struct Ray {
	pub origin: Vec3,
	pub direction: Vec3,
	pub t_min: f32,
	pub t_max: f32,
}

impl Ray {
	/// Ray valid over `[0, FLT_MAX]`
	pub fn new(origin: Vec3, direction: Vec3) -> Ray {
		Ray { origin, direction, t_min: 0.0, t_max: FLT_MAX }
	}

	pub fn with_interval(origin: Vec3, direction: Vec3, t_min: f32, t_max: f32) -> Ray {
		Ray { origin, direction, t_min, t_max }
	}

	pub fn point_at(&self, t: f32) -> Vec3 {
		self.origin + self.direction * t
	}

	#[inline(always)]
	pub fn accepts(&self, t: f32) -> bool {
		self.t_min <= t && t <= self.t_max
	}
}
