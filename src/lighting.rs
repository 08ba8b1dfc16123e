//! Lighting models, applied once to the closest hit of each ray.

use crate::geometry::Hit;
use crate::math::*;

/// Per-channel factor applied to the surface colour of a hit
pub type Lighting = fn(&Hit, &Ray) -> Vec3;

const AMBIENT: f32 = 0.3;
const DIFFUSE: f32 = 0.7;

/// Direction towards the sun, scenes are Z-up
fn sun_direction() -> Vec3 {
	Vec3::new(0.3, 0.5, 1.0).normalized()
}

/// Ambient term plus a Lambertian term for a fixed directional light
pub fn lambert(hit: &Hit, _ray: &Ray) -> Vec3 {
	let cos_theta = Vec3::dot(hit.normal, sun_direction()).max(0.0);
	Vec3::thrice(AMBIENT + DIFFUSE * cos_theta)
}

/// Light placed at the eye: surfaces facing the viewer are brightest
pub fn headlight(hit: &Hit, ray: &Ray) -> Vec3 {
	let cos_theta = Vec3::dot(hit.normal, ray.direction.normalized()).abs();
	Vec3::thrice(AMBIENT + DIFFUSE * cos_theta)
}

pub fn unlit(_hit: &Hit, _ray: &Ray) -> Vec3 {
	Vec3::thrice(1.0)
}

pub fn by_name(name: &str) -> Option<Lighting> {
	match name {
		"lambert" => Some(lambert as Lighting),
		"headlight" => Some(headlight as Lighting),
		"unlit" => Some(unlit as Lighting),
		_ => None,
	}
}
