use crate::math::*;

/// Colour and outward normal of a surface at a hit point
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Shading {
	pub color: Vec3,
	pub normal: Vec3,
}

/// Two-phase ray query: `intersect` is the cheap test run against every
/// candidate, `shading` is evaluated once, on the closest one.
pub trait Surface {
	/// Parametric distance of the nearest hit within the ray interval
	fn intersect(&self, ray: &Ray) -> Option<f32>;

	/// Colour and normal at `point`, which lies on the surface
	fn shading(&self, point: Vec3) -> Shading;
}

/// Fully resolved closest hit along a ray
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Hit {
	pub distance: f32,
	pub position: Vec3,
	pub normal: Vec3,
	pub color: Vec3,
}
