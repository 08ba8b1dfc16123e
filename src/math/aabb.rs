use crate::math::*;

/// Axis-Aligned Bounding Box
#[derive(Copy, Clone, Debug)]
pub struct AABB {
	pub min: Vec3,
	pub max: Vec3,
}

impl AABB {
	/// Slab test; returns the parametric entry and exit distances, or `None`
	/// if the ray line misses the box
	#[inline(always)]
	pub fn intersect_fast(&self, ray: &Ray, inv_dir: Vec3) -> Option<(f32, f32)> {
		let t_min = (self.min - ray.origin) * inv_dir;
		let t_max = (self.max - ray.origin) * inv_dir;
		let t1 = Vec3::min(t_min, t_max);
		let t2 = Vec3::max(t_min, t_max);
		let t_near = t1.x.max(t1.y).max(t1.z);
		let t_far  = t2.x.min(t2.y).min(t2.z);
		if t_near > t_far {
			None
		} else {
			Some((t_near, t_far))
		}
	}

	pub fn empty() -> AABB {
		AABB { min: Vec3::thrice(INFINITY), max: Vec3::thrice(NEG_INFINITY) }
	}

	pub fn from_point(p: Vec3) -> AABB {
		AABB { min: p, max: p }
	}

	pub fn extend_point(&mut self, p: Vec3) {
		self.min = Vec3::min(self.min, p);
		self.max = Vec3::max(self.max, p);
	}

	pub fn union(&self, b: &AABB) -> AABB {
		AABB {
			min: Vec3::min(self.min, b.min),
			max: Vec3::max(self.max, b.max),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
	}

	pub fn surface_area(&self) -> f32 {
		if self.is_empty() {
			return 0.0;
		}
		let d = self.max - self.min;
		2.0 * (d.x * d.y + d.x * d.z + d.y * d.z)
	}
}
