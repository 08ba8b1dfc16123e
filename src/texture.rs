use crate::math::Vec3;

/// Surface colour as a function of surface coordinates
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Pattern {
	Solid(Vec3),
	/// Alternating squares of side `scale` in surface coordinates
	Checker { on: Vec3, off: Vec3, scale: f32 },
}

impl Pattern {
	pub fn eval(&self, (u, v): (f32, f32)) -> Vec3 {
		match *self {
			Pattern::Solid(c) => c,
			Pattern::Checker { on, off, scale } => {
				let ui = (u / scale).floor() as i64;
				let vi = (v / scale).floor() as i64;
				if (ui ^ vi) & 1 == 0 { on } else { off }
			}
		}
	}

	pub fn is_solid(&self) -> bool {
		match self {
			Pattern::Solid(_) => true,
			_ => false,
		}
	}
}

impl From<Vec3> for Pattern {
	fn from(c: Vec3) -> Pattern {
		Pattern::Solid(c)
	}
}
