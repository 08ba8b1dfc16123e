use std::ops::{Index, Mul};
use crate::math::{Vec3, deg_to_rad};

/// row-major 4x4 affine transform
#[derive(Debug, PartialEq, Clone, Copy)]
pub struct Mat4([f32; 16]);

impl Mat4 {
	pub fn identity() -> Mat4 {
		Mat4([
			1.0, 0.0, 0.0, 0.0,
			0.0, 1.0, 0.0, 0.0,
			0.0, 0.0, 1.0, 0.0,
			0.0, 0.0, 0.0, 1.0,
		])
	}

	pub fn scale(v: Vec3) -> Mat4 {
		Mat4([
			v.x, 0.0, 0.0, 0.0,
			0.0, v.y, 0.0, 0.0,
			0.0, 0.0, v.z, 0.0,
			0.0, 0.0, 0.0, 1.0,
		])
	}

	pub fn translate(v: Vec3) -> Mat4 {
		Mat4([
			1.0, 0.0, 0.0, v.x,
			0.0, 1.0, 0.0, v.y,
			0.0, 0.0, 1.0, v.z,
			0.0, 0.0, 0.0, 1.0,
		])
	}

	/// Rotation from Euler angles in degrees, applied in Y, X, Z order
	pub fn rot_yxz(v: Vec3) -> Mat4 {
		let r = v.map(deg_to_rad);
		let (sx, cx) = r.x.sin_cos();
		let (sy, cy) = r.y.sin_cos();
		let (sz, cz) = r.z.sin_cos();

		Mat4([
			cy*cz - sy*sx*sz, -cy*sz - sy*sx*cz, -sy*cx, 0.0,
			           cx*sz,             cx*cz,    -sx, 0.0,
			sy*cz + cy*sx*sz, -sy*sz + cy*sx*cz,  cy*cx, 0.0,
			             0.0,               0.0,    0.0, 1.0
		])
	}

	pub fn transform_point(&self, p: Vec3) -> Vec3 {
		self.transform_vector(p) + Vec3::new(self[(0,3)], self[(1,3)], self[(2,3)])
	}

	pub fn transform_vector(&self, v: Vec3) -> Vec3 {
		let a = &self;
		Vec3 {
			x: a[(0,0)] * v.x + a[(0,1)] * v.y + a[(0,2)] * v.z,
			y: a[(1,0)] * v.x + a[(1,1)] * v.y + a[(1,2)] * v.z,
			z: a[(2,0)] * v.x + a[(2,1)] * v.y + a[(2,2)] * v.z,
		}
	}

	/// Camera-to-world transform: camera space has X right, Y up and looks
	/// down +Z, placed at `pos` and looking at `look_at`.
	pub fn look_at(pos: Vec3, look_at: Vec3, up: Vec3) -> Mat4 {
		let f = (look_at - pos).normalized();
		let r = Vec3::cross(f, up).normalized();
		let u = Vec3::cross(r, f).normalized();

		Mat4([
			r.x, u.x, f.x, pos.x,
			r.y, u.y, f.y, pos.y,
			r.z, u.z, f.z, pos.z,
			0.0, 0.0, 0.0, 1.0
		])
	}

	pub fn is_finite(&self) -> bool {
		self.0.iter().all(|x| x.is_finite())
	}
}

impl Mul for Mat4 {
	type Output = Mat4;
	fn mul(self, rhs: Mat4) -> Mat4 {
		let mut result = [0.0; 16];
		for i in 0..4 {
			for j in 0..4 {
				result[i*4 + j] = (0..4).map(|k| self[(i, k)] * rhs[(k, j)]).sum::<f32>();
			}
		}
		Mat4(result)
	}
}

impl Index<(usize, usize)> for Mat4 {
	type Output = f32;

	fn index(&self, (row, col): (usize, usize)) -> &f32 {
		&self.0[4 * row + col]
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn identity_is_neutral() {
		let m = Mat4::translate(Vec3::new(1.0, 2.0, 3.0)) * Mat4::scale(Vec3::thrice(2.0));
		assert_eq!(m * Mat4::identity(), m);
		assert_eq!(Mat4::identity() * m, m);
	}

	#[test]
	fn points_are_translated_vectors_are_not() {
		let m = Mat4::translate(Vec3::new(1.0, 2.0, 3.0));
		assert_eq!(m.transform_point(Vec3::zero()), Vec3::new(1.0, 2.0, 3.0));
		assert_eq!(m.transform_vector(Vec3::new(0.0, 0.0, 1.0)), Vec3::new(0.0, 0.0, 1.0));
	}

	#[test]
	fn look_at_maps_local_z_to_forward() {
		let m = Mat4::look_at(Vec3::new(1.0, 1.0, 1.0), Vec3::new(4.0, 1.0, 1.0), Vec3::new(0.0, 0.0, 1.0));
		assert!(m.transform_vector(Vec3::new(0.0, 0.0, 1.0)).approx_eq(Vec3::new(1.0, 0.0, 0.0), 1e-6));
		assert!(m.transform_vector(Vec3::new(0.0, 1.0, 0.0)).approx_eq(Vec3::new(0.0, 0.0, 1.0), 1e-6));
		// looking along +X with +Z up, camera right is world -Y
		assert!(m.transform_vector(Vec3::new(1.0, 0.0, 0.0)).approx_eq(Vec3::new(0.0, -1.0, 0.0), 1e-6));
		assert_eq!(m.transform_point(Vec3::zero()), Vec3::new(1.0, 1.0, 1.0));
	}

	#[test]
	fn rotation_quarter_turn_about_y() {
		let m = Mat4::rot_yxz(Vec3::new(0.0, 90.0, 0.0));
		let v = m.transform_vector(Vec3::new(1.0, 0.0, 0.0));
		assert!(v.approx_eq(Vec3::new(0.0, 0.0, 1.0), 1e-6));
	}

	#[test]
	fn look_at_with_parallel_up_is_not_finite() {
		let m = Mat4::look_at(Vec3::zero(), Vec3::new(0.0, 0.0, 1.0), Vec3::new(0.0, 0.0, 1.0));
		assert!(!m.is_finite());
	}
}
