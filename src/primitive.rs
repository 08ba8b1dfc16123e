use crate::geometry::*;
use crate::math::*;
use crate::texture::Pattern;

/// Below this, a ray is considered parallel to a plane
const PARALLEL_EPSILON: f32 = 1e-8;

#[derive(Copy, Clone, Debug)]
pub struct Sphere {
	pub center: Vec3,
	pub radius: f32,
	pub pattern: Pattern,
	/// Modulate the pattern colour by the normal direction
	pub tint_by_normal: bool,
}

impl Sphere {
	pub fn new(center: Vec3, radius: f32, pattern: Pattern) -> Sphere {
		Sphere { center, radius, pattern, tint_by_normal: false }
	}

	pub fn tinted(self) -> Sphere {
		Sphere { tint_by_normal: true, ..self }
	}
}

impl Surface for Sphere {
	fn intersect(&self, ray: &Ray) -> Option<f32> {
		if !(self.radius > 0.0) {
			return None;
		}

		let a = Vec3::dot(ray.direction, ray.direction);
		if a == 0.0 {
			return None;
		}

		// Solve with the squared distance from the center to the ray line,
		// which does not lose precision for far away spheres
		let to_origin = ray.origin - self.center;
		let b = Vec3::dot(to_origin, ray.direction) / a;
		let perp = to_origin - ray.direction * b;
		let discriminant = self.radius * self.radius - perp.length_squared();
		if !(discriminant > 0.0) {
			return None;
		}

		let s = (discriminant / a).sqrt();
		let t1 = -b - s;
		if ray.accepts(t1) {
			return Some(t1);
		}
		let t2 = -b + s;
		if ray.accepts(t2) {
			return Some(t2);
		}
		None
	}

	fn shading(&self, point: Vec3) -> Shading {
		let normal = (point - self.center).normalized();

		let color = if self.pattern.is_solid() {
			self.pattern.eval((0.0, 0.0))
		} else {
			// +Z is the pole
			let u = normal.y.atan2(normal.x) * INV_2_PI + 0.5;
			let v = normal.z.max(-1.0).min(1.0).acos() * INV_PI;
			self.pattern.eval((u, v))
		};

		let color = if self.tint_by_normal {
			color * (normal * 0.5 + Vec3::thrice(0.5))
		} else {
			color
		};

		Shading { color, normal }
	}
}

/// Infinite plane through `point`
#[derive(Copy, Clone, Debug)]
pub struct Plane {
	point: Vec3,
	normal: Vec3,
	pattern: Pattern,
	// cache
	tangent: Vec3,
	bitangent: Vec3,
}

impl Plane {
	pub fn new(point: Vec3, normal: Vec3, pattern: Pattern) -> Plane {
		let normal = normal.normalized();
		let (tangent, bitangent) = tangent_frame(normal);
		Plane { point, normal, pattern, tangent, bitangent }
	}

	pub fn normal(&self) -> Vec3 {
		self.normal
	}
}

/// Distance along `ray` to the plane through `point` with unit `normal`
fn intersect_plane(ray: &Ray, point: Vec3, normal: Vec3) -> Option<f32> {
	let nd = Vec3::dot(normal, ray.direction);
	if !(nd.abs() >= PARALLEL_EPSILON) {
		return None;
	}

	let t = Vec3::dot(normal, point - ray.origin) / nd;
	if ray.accepts(t) { Some(t) } else { None }
}

impl Surface for Plane {
	fn intersect(&self, ray: &Ray) -> Option<f32> {
		intersect_plane(ray, self.point, self.normal)
	}

	fn shading(&self, point: Vec3) -> Shading {
		let p = point - self.point;
		let uv = (Vec3::dot(p, self.tangent), Vec3::dot(p, self.bitangent));
		Shading {
			color: self.pattern.eval(uv),
			normal: self.normal,
		}
	}
}

/// Flat disk facing `normal`
#[derive(Copy, Clone, Debug)]
pub struct Disk {
	center: Vec3,
	normal: Vec3,
	radius: f32,
	pattern: Pattern,
	// cache
	u_axis: Vec3,
	v_axis: Vec3,
}

impl Disk {
	pub fn new(center: Vec3, normal: Vec3, radius: f32, pattern: Pattern) -> Disk {
		let normal = normal.normalized();
		let (u_axis, v_axis) = tangent_frame(normal);
		Disk { center, normal, radius, pattern, u_axis, v_axis }
	}
}

impl Surface for Disk {
	fn intersect(&self, ray: &Ray) -> Option<f32> {
		let t = intersect_plane(ray, self.center, self.normal)?;
		let offset = ray.point_at(t) - self.center;
		if offset.length_squared() > self.radius * self.radius {
			return None;
		}
		Some(t)
	}

	fn shading(&self, point: Vec3) -> Shading {
		let p = point - self.center;
		let uv = (Vec3::dot(p, self.u_axis), Vec3::dot(p, self.v_axis));
		Shading {
			color: self.pattern.eval(uv),
			normal: self.normal,
		}
	}
}

/// Closed set of analytic shapes a scene is made of
#[derive(Copy, Clone, Debug)]
pub enum Primitive {
	Sphere(Sphere),
	Plane(Plane),
	Disk(Disk),
}

impl Surface for Primitive {
	#[inline]
	fn intersect(&self, ray: &Ray) -> Option<f32> {
		match *self {
			Primitive::Sphere(ref s) => s.intersect(ray),
			Primitive::Plane(ref p) => p.intersect(ray),
			Primitive::Disk(ref d) => d.intersect(ray),
		}
	}

	fn shading(&self, point: Vec3) -> Shading {
		match *self {
			Primitive::Sphere(ref s) => s.shading(point),
			Primitive::Plane(ref p) => p.shading(point),
			Primitive::Disk(ref d) => d.shading(point),
		}
	}
}

impl From<Sphere> for Primitive {
	fn from(s: Sphere) -> Primitive {
		Primitive::Sphere(s)
	}
}

impl From<Plane> for Primitive {
	fn from(p: Plane) -> Primitive {
		Primitive::Plane(p)
	}
}

impl From<Disk> for Primitive {
	fn from(d: Disk) -> Primitive {
		Primitive::Disk(d)
	}
}
