use std::env::temp_dir;
use std::fs;
use std::path::{Path, PathBuf};

use glint::camera::Camera;
use glint::description::{self, RenderJob};
use glint::math::Vec3;
use glint::scene::Scene;
use glint::{render, render_seq, render_to_file, Error};

fn ring() -> RenderJob {
	let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenes").join("ring.json");
	description::load(path).unwrap()
}

/// Same view, fewer pixels
fn resized(camera: &Camera, resolution: (usize, usize)) -> Camera {
	Camera::from_view(camera.view(), camera.fov(), resolution)
}

fn scratch_file(name: &str) -> PathBuf {
	temp_dir().join(format!("glint_{}_{}", std::process::id(), name))
}

fn parse(json: &str) -> RenderJob {
	description::parse(json, Path::new(".")).unwrap()
}

#[test]
fn empty_scene_is_all_background() {
	let camera = Camera::new(Vec3::zero(), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), 90.0, (8, 6));
	let fb = render(&Scene::empty(), &camera);
	assert_eq!(fb.as_bytes().len(), 8 * 6 * 3);
	for px in fb.as_bytes().chunks(3) {
		assert_eq!(px, &[168, 219, 243]);
	}
}

#[test]
fn plane_fills_the_lower_half() {
	let job = parse(r#"{
		"camera": { "position": 0, "look_at": [1, 0, 0], "up": [0, 0, 1], "fov": 90, "resolution": [8, 6] },
		"background": 0,
		"lighting": "unlit",
		"primitives": [ { "type": "plane", "point": [0, 0, -10], "normal": [0, 0, 1], "color": [1, 0.8, 0.2] } ]
	}"#);
	let fb = render(&job.scene, &job.camera);
	for y in 0..6 {
		for x in 0..8 {
			let expected = if y < 3 { [0, 0, 0] } else { [255, 204, 51] };
			assert_eq!(fb.pixel(x, y), expected, "pixel ({}, {})", x, y);
		}
	}
}

#[test]
fn closer_triangle_hides_sphere() {
	let scene = |meshes: &str| parse(&format!(r#"{{
		"camera": {{ "position": 0, "forward": [1, 0, 0], "fov": 60, "resolution": 3 }},
		"lighting": "unlit",
		"primitives": [ {{ "type": "sphere", "center": [10, 0, 0], "radius": 1, "color": [0, 0, 1] }} ],
		"meshes": [ {} ]
	}}"#, meshes));

	let with_wall = scene(r#"{ "triangles": [ { "pos": [5, -1, -1] }, { "pos": [5, 1, -1] }, { "pos": [5, 0, 1] } ] }"#);
	assert_eq!(render(&with_wall.scene, &with_wall.camera).pixel(1, 1), [0, 255, 0]);

	let without = scene(r#"{ "triangles": [] }"#);
	assert_eq!(render(&without.scene, &without.camera).pixel(1, 1), [0, 0, 255]);
}

#[test]
fn rendering_is_idempotent() {
	let job = ring();
	let camera = resized(&job.camera, (96, 54));
	let first = render(&job.scene, &camera);
	let second = render(&job.scene, &camera);
	assert_eq!(first, second);
}

#[test]
fn parallel_render_matches_sequential() {
	let job = ring();
	let camera = resized(&job.camera, (160, 90));
	let par = render(&job.scene, &camera);
	let seq = render_seq(&job.scene, &camera);
	assert!(par.as_bytes() == seq.as_bytes());

	// the ring is visible: some pixels are neither sky nor plane
	let background = [168, 219, 243];
	assert!(par.as_bytes().chunks(3).any(|px| px != background));
	assert!(par.as_bytes().chunks(3).any(|px| px == background));
}

#[test]
fn ring_description() {
	let job = ring();
	assert_eq!(job.camera.resolution(), (1920, 1080));
	assert_eq!(job.scene.objects().len(), 11);
	assert!(job.scene.triangles().is_empty());
	assert_eq!(job.output, PathBuf::from("ring.ppm"));
}

#[test]
fn ppm_file_round_trip() {
	let job = ring();
	let camera = resized(&job.camera, (32, 18));
	let path = scratch_file("ring.ppm");

	let fb = render_to_file(&job.scene, &camera, &path).unwrap();
	let bytes = fs::read(&path).unwrap();
	let header = b"P6\n32 18\n255\n";
	assert!(bytes.starts_with(header));
	assert_eq!(&bytes[header.len()..], fb.as_bytes());
	fs::remove_file(&path).unwrap();
}

#[test]
fn png_output() {
	let job = ring();
	let camera = resized(&job.camera, (16, 9));
	let path = scratch_file("ring.png");

	render_to_file(&job.scene, &camera, &path).unwrap();
	let bytes = fs::read(&path).unwrap();
	assert!(bytes.starts_with(b"\x89PNG\r\n\x1a\n"));
	fs::remove_file(&path).unwrap();
}

#[test]
fn unsupported_output_format() {
	let path = scratch_file("ring.bmp");
	let camera = Camera::new(Vec3::zero(), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 0.0, 1.0), 90.0, (2, 2));
	match render_to_file(&Scene::empty(), &camera, &path) {
		Err(Error::UnsupportedFormat(_)) => {}
		other => panic!("unexpected {:?}", other.map(|fb| fb.width())),
	}
	assert!(!path.exists());
}
