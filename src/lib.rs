#[macro_use]
extern crate serde_derive;
#[macro_use]
extern crate log;

pub mod camera;
pub mod description;
pub mod error;
pub mod framebuffer;
pub mod geometry;
pub mod lighting;
pub mod math;
pub mod mesh;
pub mod obj;
pub mod output;
pub mod primitive;
pub mod scene;
pub mod texture;

mod bvh;

use std::path::Path;

use rayon::prelude::*;
use time::PreciseTime;

use crate::math::*;
use crate::scene::*;
use crate::camera::*;
use crate::framebuffer::{Framebuffer, quantize};

pub use crate::error::{Error, Result};

/// Colour seen through one pixel: the lit closest hit, or the background
pub fn trace(scene: &Scene, camera: &Camera, pixel: (usize, usize)) -> Vec3 {
	match scene.intersect(&camera.make_ray(pixel)) {
		Some(hit) => hit.color,
		None => scene.background(),
	}
}

fn render_row(scene: &Scene, camera: &Camera, y: usize, row: &mut [u8]) {
	for (x, p) in row.chunks_exact_mut(3).enumerate() {
		p.copy_from_slice(&quantize(trace(scene, camera, (x, y))));
	}
}

fn log_start(scene: &Scene, (width, height): (usize, usize)) -> PreciseTime {
	info!("Start rendering {}x{} ({} objects, {} triangles)...",
		width, height, scene.objects().len(), scene.triangles().len());
	PreciseTime::now()
}

fn log_end(start: PreciseTime) {
	let end = PreciseTime::now();
	info!("Rendered in {:.3}s", start.to(end).num_milliseconds() as f32 / 1000.0);
}

/// Render every pixel, rows in parallel
pub fn render(scene: &Scene, camera: &Camera) -> Framebuffer {
	let (width, height) = camera.resolution();
	let mut framebuffer = Framebuffer::new(width, height);

	let start = log_start(scene, (width, height));
	let stride = framebuffer.row_stride();
	framebuffer.data_mut().par_chunks_mut(stride).enumerate().for_each(|(y, row)| {
		render_row(scene, camera, y, row);
	});
	log_end(start);

	framebuffer
}

/// Single threaded reference of `render`, pixels in row-major order
pub fn render_seq(scene: &Scene, camera: &Camera) -> Framebuffer {
	let (width, height) = camera.resolution();
	let mut framebuffer = Framebuffer::new(width, height);

	let start = log_start(scene, (width, height));
	framebuffer.rows_mut().enumerate().for_each(|(y, row)| {
		render_row(scene, camera, y, row);
	});
	log_end(start);

	framebuffer
}

/// Render and save the image, the format follows the extension of `path`.
///
/// A failed save is logged and returned; the rendered frame is lost.
pub fn render_to_file<P: AsRef<Path>>(scene: &Scene, camera: &Camera, path: P) -> Result<Framebuffer> {
	let path = path.as_ref();
	let framebuffer = render(scene, camera);
	match output::save(path, &framebuffer) {
		Ok(()) => {
			info!("saved {}x{} image to {}", framebuffer.width(), framebuffer.height(), path.display());
			Ok(framebuffer)
		}
		Err(e) => {
			error!("failed to save image to {}: {}", path.display(), e);
			Err(e)
		}
	}
}
