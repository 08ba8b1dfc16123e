//! JSON scene descriptions.
//!
//! A description holds the camera, the analytic primitives, the triangle
//! meshes (inline host meshes or OBJ files) and the render settings.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::camera;
use crate::error::{Error, Result};
use crate::lighting;
use crate::math;
use crate::mesh::{HostMesh, TriangleSet};
use crate::obj;
use crate::primitive::{self, Primitive};
use crate::scene;
use crate::texture::Pattern;

const DEFAULT_OUTPUT: &str = "render.ppm";
const DEFAULT_RESOLUTION: (usize, usize) = (1920, 1080);
const DEFAULT_FOV: f32 = 90.0;

/// Everything needed to produce one image
pub struct RenderJob {
	pub scene: scene::Scene,
	pub camera: camera::Camera,
	pub output: PathBuf,
}

/// Read a description file; mesh files are looked up relative to its directory
pub fn load<P: AsRef<Path>>(path: P) -> Result<RenderJob> {
	let path = path.as_ref();
	let file = BufReader::new(File::open(path)?);
	let desc: SceneDesc = serde_json::from_reader(file)?;
	desc.convert(path.parent().unwrap_or_else(|| Path::new("")))
}

pub fn parse(json: &str, base_dir: &Path) -> Result<RenderJob> {
	let desc: SceneDesc = serde_json::from_str(json)?;
	desc.convert(base_dir)
}

#[derive(Deserialize, Debug, Clone, Copy)]
#[serde(untagged)]
enum Vec3 {
	Thrice(f32),
	Explicit(f32, f32, f32),
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct SceneDesc {
	camera: CameraDesc,
	background: Option<Vec3>,
	triangle_color: Option<Vec3>,
	lighting: Option<String>,
	output: Option<PathBuf>,
	#[serde(default)]
	primitives: Vec<PrimitiveDesc>,
	#[serde(default)]
	meshes: Vec<MeshDesc>,
}

#[derive(Deserialize, Debug)]
#[serde(deny_unknown_fields)]
struct CameraDesc {
	position: Vec3,
	look_at: Option<Vec3>,
	forward: Option<Vec3>,
	up: Option<Vec3>,
	fov: Option<f32>,
	resolution: Option<Resolution>,
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum Resolution {
	Rect(usize, usize),
	Square(usize),
}

#[derive(Deserialize, Debug)]
#[serde(tag = "type", rename_all = "snake_case")]
enum PrimitiveDesc {
	Sphere { center: Vec3, radius: f32, color: PatternDesc, #[serde(default)] tint_by_normal: bool },
	Plane { point: Vec3, normal: Vec3, color: PatternDesc },
	Disk { center: Vec3, normal: Vec3, radius: f32, color: PatternDesc },
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum PatternDesc {
	Checker { checker: CheckerDesc },
	Solid(Vec3),
}

#[derive(Deserialize, Debug)]
struct CheckerDesc {
	on: Vec3,
	off: Vec3,
	#[serde(default = "unit_scale")]
	scale: f32,
}

fn unit_scale() -> f32 {
	1.0
}

#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum MeshDesc {
	/// Vertex list as handed over by the host, three per triangle
	Inline { triangles: Vec<VertexDesc> },
	File { file: PathBuf, position: Option<Vec3>, rotation: Option<Vec3>, scale: Option<Vec3> },
}

#[derive(Deserialize, Debug)]
struct VertexDesc {
	pos: Vec3,
}

fn invalid<T, S: Into<String>>(message: S) -> Result<T> {
	Err(Error::InvalidScene(message.into()))
}

impl Vec3 {
	fn convert(self) -> math::Vec3 {
		match self {
			Vec3::Thrice(v) => math::Vec3::thrice(v),
			Vec3::Explicit(x, y, z) => math::Vec3 { x, y, z },
		}
	}

	fn direction(self, what: &str) -> Result<math::Vec3> {
		let v = self.convert();
		if v.is_zero() || v.has_nan() {
			return invalid(format!("{} must be a non-zero vector", what));
		}
		Ok(v)
	}
}

impl SceneDesc {
	fn convert(self, dir: &Path) -> Result<RenderJob> {
		let camera = self.camera.convert()?;

		let objects = self.primitives.into_iter()
			.map(PrimitiveDesc::convert)
			.collect::<Result<Vec<Primitive>>>()?;

		let meshes = self.meshes.into_iter()
			.map(|m| m.convert(dir))
			.collect::<Result<Vec<HostMesh>>>()?;

		let mut scene = scene::Scene::new(objects, TriangleSet::from_meshes(&meshes));
		if let Some(background) = self.background {
			scene = scene.with_background(background.convert());
		}
		if let Some(color) = self.triangle_color {
			scene = scene.with_triangle_color(color.convert());
		}
		if let Some(name) = self.lighting {
			match lighting::by_name(&name) {
				Some(l) => scene = scene.with_lighting(l),
				None => return invalid(format!("unknown lighting {:?}", name)),
			}
		}

		Ok(RenderJob {
			scene,
			camera,
			output: self.output.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
		})
	}
}

impl CameraDesc {
	fn convert(self) -> Result<camera::Camera> {
		let resolution = self.resolution.map_or(DEFAULT_RESOLUTION, Resolution::convert);
		if resolution.0 == 0 || resolution.1 == 0 {
			return invalid(format!("resolution {}x{} is empty", resolution.0, resolution.1));
		}

		let fov = self.fov.unwrap_or(DEFAULT_FOV);
		if !(fov > 0.0 && fov < 180.0) {
			return invalid(format!("field of view {} is not in (0, 180)", fov));
		}

		let position = self.position.convert();
		let up = self.up.map_or(Ok(math::Vec3::new(0.0, 0.0, 1.0)), |v| v.direction("camera up"))?;
		let forward = match (self.look_at, self.forward) {
			(Some(target), None) => (target.convert() - position).normalized(),
			(None, Some(forward)) => forward.direction("camera forward")?.normalized(),
			(Some(_), Some(_)) => return invalid("camera takes either look_at or forward, not both"),
			(None, None) => return invalid("camera needs look_at or forward"),
		};

		let view = math::Mat4::look_at(position, position + forward, up);
		if !view.is_finite() {
			return invalid("camera view is degenerate (target on the camera or forward parallel to up)");
		}
		Ok(camera::Camera::from_view(&view, fov, resolution))
	}
}

impl Resolution {
	fn convert(self) -> (usize, usize) {
		match self {
			Resolution::Rect(w, h) => (w, h),
			Resolution::Square(w) => (w, w),
		}
	}
}

impl PatternDesc {
	fn convert(self) -> Result<Pattern> {
		match self {
			PatternDesc::Solid(c) => Ok(Pattern::Solid(c.convert())),
			PatternDesc::Checker { checker: CheckerDesc { on, off, scale } } => {
				if !(scale > 0.0) {
					return invalid(format!("checker scale {} must be positive", scale));
				}
				Ok(Pattern::Checker { on: on.convert(), off: off.convert(), scale })
			}
		}
	}
}

impl PrimitiveDesc {
	fn convert(self) -> Result<Primitive> {
		Ok(match self {
			PrimitiveDesc::Sphere { center, radius, color, tint_by_normal } => {
				let sphere = primitive::Sphere::new(center.convert(), radius, color.convert()?);
				Primitive::from(if tint_by_normal { sphere.tinted() } else { sphere })
			}
			PrimitiveDesc::Plane { point, normal, color } => {
				primitive::Plane::new(point.convert(), normal.direction("plane normal")?, color.convert()?).into()
			}
			PrimitiveDesc::Disk { center, normal, radius, color } => {
				primitive::Disk::new(center.convert(), normal.direction("disk normal")?, radius, color.convert()?).into()
			}
		})
	}
}

impl MeshDesc {
	fn convert(self, dir: &Path) -> Result<HostMesh> {
		match self {
			MeshDesc::Inline { triangles } => {
				Ok(HostMesh::new(triangles.into_iter().map(|v| v.pos.convert()).collect()))
			}
			MeshDesc::File { file, position, rotation, scale } => {
				let mesh = obj::load(dir.join(&file))?;
				let mut transform = math::Mat4::identity();
				if let Some(v) = position {
					transform = transform * math::Mat4::translate(v.convert());
				}
				if let Some(v) = rotation {
					transform = transform * math::Mat4::rot_yxz(v.convert());
				}
				if let Some(v) = scale {
					transform = transform * math::Mat4::scale(v.convert());
				}
				Ok(mesh.transformed(&transform))
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn parse_here(json: &str) -> Result<RenderJob> {
		parse(json, Path::new("."))
	}

	fn expect_invalid(json: &str) {
		match parse_here(json) {
			Err(Error::InvalidScene(_)) => {}
			Err(e) => panic!("expected an invalid scene, got {}", e),
			Ok(_) => panic!("expected an invalid scene"),
		}
	}

	#[test]
	fn minimal_description_uses_defaults() {
		let job = parse_here(r#"{ "camera": { "position": 0, "look_at": [1, 0, 0] } }"#).unwrap();
		assert_eq!(job.camera.resolution(), (1920, 1080));
		assert_eq!(job.camera.fov(), 90.0);
		assert_eq!(job.output, PathBuf::from("render.ppm"));
		assert!(job.scene.objects().is_empty());
		assert!(job.scene.triangles().is_empty());
		assert_eq!(job.scene.background(), math::Vec3::new(168.0, 219.0, 243.0) / 255.0);
	}

	#[test]
	fn full_description() {
		let json = r#"{
			"camera": { "position": [0, 0, 0], "forward": [2, 0, 0], "up": [0, 0, 1], "fov": 60, "resolution": 64 },
			"background": [0, 0, 0],
			"triangle_color": [1, 0, 0],
			"lighting": "headlight",
			"output": "out.png",
			"primitives": [
				{ "type": "plane", "point": [0, 0, -10], "normal": [0, 0, 1], "color": [1, 0.8, 0.2] },
				{ "type": "sphere", "center": [25, 0, -5], "radius": 3, "color": 0.5, "tint_by_normal": true },
				{ "type": "disk", "center": [5, 0, 0], "normal": [-1, 0, 0], "radius": 1,
				  "color": { "checker": { "on": 1, "off": 0, "scale": 0.25 } } }
			],
			"meshes": [
				{ "triangles": [ { "pos": [4, -1, -1] }, { "pos": [4, 1, -1] }, { "pos": [4, 0, 1] } ] }
			]
		}"#;
		let job = parse_here(json).unwrap();
		assert_eq!(job.camera.resolution(), (64, 64));
		assert!(job.camera.forward().approx_eq(math::Vec3::new(1.0, 0.0, 0.0), 1e-6));
		assert_eq!(job.output, PathBuf::from("out.png"));
		assert_eq!(job.scene.background(), math::Vec3::zero());
		assert_eq!(job.scene.triangles().len(), 1);

		let objects = job.scene.objects();
		assert_eq!(objects.len(), 3);
		match objects[1] {
			Primitive::Sphere(s) => {
				assert!(s.tint_by_normal);
				assert_eq!(s.pattern, Pattern::Solid(math::Vec3::thrice(0.5)));
			}
			ref other => panic!("expected a sphere, got {:?}", other),
		}
		match objects[2] {
			Primitive::Disk(_) => {}
			ref other => panic!("expected a disk, got {:?}", other),
		}
	}

	#[test]
	fn host_meshes_drop_incomplete_triangles() {
		let json = r#"{
			"camera": { "position": 0, "look_at": [1, 0, 0] },
			"meshes": [ { "triangles": [ { "pos": [0, 0, 0] }, { "pos": [1, 0, 0] }, { "pos": [0, 1, 0] }, { "pos": [1, 1, 0] } ] } ]
		}"#;
		assert_eq!(parse_here(json).unwrap().scene.triangles().len(), 1);
	}

	#[test]
	fn invalid_descriptions() {
		expect_invalid(r#"{ "camera": { "position": 0, "look_at": [1, 0, 0], "resolution": [0, 10] } }"#);
		expect_invalid(r#"{ "camera": { "position": 0, "look_at": [1, 0, 0], "fov": 180 } }"#);
		expect_invalid(r#"{ "camera": { "position": 0, "look_at": [1, 0, 0], "fov": -5 } }"#);
		expect_invalid(r#"{ "camera": { "position": 0, "look_at": 0 } }"#);
		expect_invalid(r#"{ "camera": { "position": 0 } }"#);
		expect_invalid(r#"{ "camera": { "position": 0, "look_at": [0, 0, 5] } }"#);
		expect_invalid(r#"{ "camera": { "position": 0, "forward": 0 } }"#);
		expect_invalid(r#"{ "camera": { "position": 0, "look_at": [1, 0, 0] }, "lighting": "phong" }"#);
		expect_invalid(r#"{ "camera": { "position": 0, "look_at": [1, 0, 0] },
			"primitives": [ { "type": "plane", "point": 0, "normal": 0, "color": 1 } ] }"#);
	}

	#[test]
	fn syntax_errors_are_json_errors() {
		match parse_here(r#"{ "camera": "#) {
			Err(Error::Json(_)) => {}
			_ => panic!("expected a JSON error"),
		}
		match parse_here(r#"{ "camera": { "position": 0, "look_at": 1 }, "primitives": [ { "type": "cube" } ] }"#) {
			Err(Error::Json(_)) => {}
			_ => panic!("expected a JSON error"),
		}
	}

	#[test]
	fn missing_mesh_file_is_an_io_error() {
		let json = r#"{ "camera": { "position": 0, "look_at": [1, 0, 0] }, "meshes": [ { "file": "does/not/exist.obj" } ] }"#;
		match parse_here(json) {
			Err(Error::Io(_)) => {}
			_ => panic!("expected an i/o error"),
		}
	}
}
