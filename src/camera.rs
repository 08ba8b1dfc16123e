use crate::math::*;

/// Pinhole camera.
///
/// The view transform maps camera space (X right, Y up, looking down +Z) to
/// world space; it is derived once from position, target and up so the two
/// can not drift apart.
#[derive(Clone, Debug)]
pub struct Camera {
	position: Vec3,
	forward: Vec3,
	view: Mat4,

	resolution: (usize, usize),
	aspect: f32,

	fov: f32,
	// tan(fov / 2)
	scale: f32,
}

impl Camera {
	/// `fov` is the vertical field of view in degrees
	pub fn look_at(position: Vec3, target: Vec3, up: Vec3, fov: f32, resolution: (usize, usize)) -> Camera {
		Camera::from_view(&Mat4::look_at(position, target, up), fov, resolution)
	}

	pub fn new(position: Vec3, forward: Vec3, up: Vec3, fov: f32, resolution: (usize, usize)) -> Camera {
		Camera::look_at(position, position + forward, up, fov, resolution)
	}

	pub fn from_view(view: &Mat4, fov: f32, resolution: (usize, usize)) -> Camera {
		Camera {
			position: view.transform_point(Vec3::zero()),
			forward: view.transform_vector(Vec3::new(0.0, 0.0, 1.0)),
			view: *view,
			resolution,
			aspect: resolution.0 as f32 / resolution.1 as f32,
			fov,
			scale: deg_to_rad(fov * 0.5).tan(),
		}
	}

	/// World space ray through the center of `pixel`; row 0 is the top of the image.
	///
	/// The direction is left unnormalized.
	pub fn make_ray(&self, (x, y): (usize, usize)) -> Ray {
		let (width, height) = self.resolution;
		let local_dir = Vec3 {
			x: (2.0 * (x as f32 + 0.5) / width as f32 - 1.0) * self.aspect * self.scale,
			y: (1.0 - 2.0 * (y as f32 + 0.5) / height as f32) * self.scale,
			z: 1.0,
		};

		Ray::new(self.position, self.view.transform_vector(local_dir))
	}

	pub fn resolution(&self) -> (usize, usize) {
		self.resolution
	}

	pub fn forward(&self) -> Vec3 {
		self.forward
	}

	pub fn fov(&self) -> f32 {
		self.fov
	}

	pub fn view(&self) -> &Mat4 {
		&self.view
	}
}
