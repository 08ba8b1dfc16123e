use std::slice::ChunksMut;

use crate::math::Vec3;

/// Row-major RGB8 image, 3 bytes per pixel
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Framebuffer {
	width: usize,
	height: usize,
	data: Vec<u8>,
}

impl Framebuffer {
	/// Black framebuffer
	pub fn new(width: usize, height: usize) -> Framebuffer {
		Framebuffer { width, height, data: vec![0; width * height * 3] }
	}

	pub fn width(&self) -> usize {
		self.width
	}

	pub fn height(&self) -> usize {
		self.height
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.data
	}

	pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
		let i = (y * self.width + x) * 3;
		[self.data[i], self.data[i + 1], self.data[i + 2]]
	}

	/// Disjoint mutable rows, `width * 3` bytes each
	pub fn rows_mut(&mut self) -> ChunksMut<'_, u8> {
		let stride = self.row_stride();
		self.data.chunks_mut(stride)
	}

	pub(crate) fn row_stride(&self) -> usize {
		(self.width * 3).max(1)
	}

	pub(crate) fn data_mut(&mut self) -> &mut [u8] {
		&mut self.data
	}
}

/// Scale a [0, 1] colour to bytes; out of range channels saturate
pub fn quantize(color: Vec3) -> [u8; 3] {
	let c = color.map(|v| (v * 255.0).max(0.0).min(255.0));
	[c.x as u8, c.y as u8, c.z as u8]
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn new_framebuffer_is_black() {
		let fb = Framebuffer::new(4, 3);
		assert_eq!(fb.as_bytes().len(), 4 * 3 * 3);
		assert!(fb.as_bytes().iter().all(|&b| b == 0));
	}

	#[test]
	fn rows_address_pixels_row_major() {
		let mut fb = Framebuffer::new(3, 2);
		if let Some(row) = fb.rows_mut().nth(1) {
			row[6..9].copy_from_slice(&quantize(Vec3::new(1.0, 0.5, 0.0)));
		}
		assert_eq!(fb.pixel(2, 1), [255, 127, 0]);
		assert_eq!(&fb.as_bytes()[15..18], &[255, 127, 0]);
		assert_eq!(fb.as_bytes().iter().filter(|&&b| b != 0).count(), 2);
	}

	#[test]
	fn quantize_saturates() {
		assert_eq!(quantize(Vec3::new(-1.0, 2.0, 0.999)), [0, 255, 254]);
		assert_eq!(quantize(Vec3::new(255.0, 0.0, 1.0)), [255, 0, 255]);
	}

	#[test]
	fn rows_are_disjoint() {
		let mut fb = Framebuffer::new(5, 4);
		let rows: Vec<usize> = fb.rows_mut().map(|r| r.len()).collect();
		assert_eq!(rows, vec![15; 4]);
	}
}
