use crate::geometry::*;
use crate::lighting::{self, Lighting};
use crate::math::*;
use crate::mesh::TriangleSet;
use crate::primitive::Primitive;

/// Frozen scene snapshot shared by every ray of a render
pub struct Scene {
	objects: Vec<Primitive>,
	triangles: TriangleSet,
	background: Vec3,
	triangle_color: Vec3,
	lighting: Lighting,
}

impl Scene {
	pub fn new(objects: Vec<Primitive>, triangles: TriangleSet) -> Scene {
		Scene {
			objects,
			triangles,
			background: Vec3::new(168.0, 219.0, 243.0) / 255.0,
			triangle_color: Vec3::new(0.0, 1.0, 0.0),
			lighting: lighting::lambert,
		}
	}

	pub fn empty() -> Scene {
		Scene::new(Vec::new(), TriangleSet::empty())
	}

	pub fn with_background(self, background: Vec3) -> Scene {
		Scene { background, ..self }
	}

	pub fn with_triangle_color(self, triangle_color: Vec3) -> Scene {
		Scene { triangle_color, ..self }
	}

	pub fn with_lighting(self, lighting: Lighting) -> Scene {
		Scene { lighting, ..self }
	}

	pub fn objects(&self) -> &[Primitive] {
		&self.objects
	}

	pub fn triangles(&self) -> &TriangleSet {
		&self.triangles
	}

	/// Colour of rays that hit nothing
	pub fn background(&self) -> Vec3 {
		self.background
	}

	/// Closest lit hit along the ray
	pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
		closest_hit(ray, &self.objects, &self.triangles, self.triangle_color, self.lighting)
	}
}

enum Closest<'a, S: 'a> {
	Object(&'a S, f32),
	Triangle(usize, f32),
}

/// Resolve the closest hit among analytic objects and triangles.
///
/// Objects are tested linearly, triangles through the BVH. Only the winner is
/// shaded. A triangle replaces the closest object only if strictly closer.
pub fn closest_hit<S: Surface>(ray: &Ray, objects: &[S], triangles: &TriangleSet, triangle_color: Vec3, lighting: Lighting) -> Option<Hit> {
	let mut closest = None;
	let mut dist_max = ray.t_max;

	for object in objects {
		if let Some(t) = object.intersect(ray) {
			if t < dist_max || closest.is_none() {
				closest = Some(Closest::Object(object, t));
				dist_max = t;
			}
		}
	}

	// triangles beyond the closest object can not win
	let clipped = Ray { t_max: dist_max, ..*ray };
	if let Some(tri) = triangles.intersect(&clipped) {
		let beats_object = match closest {
			Some(Closest::Object(_, t)) => tri.distance < t,
			_ => true,
		};
		if beats_object {
			closest = Some(Closest::Triangle(tri.index, tri.distance));
		}
	}

	let mut hit = match closest? {
		Closest::Object(object, distance) => {
			let position = ray.point_at(distance);
			let Shading { color, normal } = object.shading(position);
			Hit { distance, position, normal, color }
		}
		Closest::Triangle(index, distance) => Hit {
			distance,
			position: ray.point_at(distance),
			normal: triangles.normal(index),
			color: triangle_color,
		},
	};

	hit.color *= lighting(&hit, ray);
	Some(hit)
}
