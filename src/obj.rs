use std::collections::hash_map::DefaultHasher;
use std::env::temp_dir;
use std::fs::{self, File};
use std::hash::{Hash, Hasher};
use std::io::{BufRead, BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use time::PreciseTime;

use crate::error::{Error, Result};
use crate::math::*;
use crate::mesh::HostMesh;

/// Load the faces of an OBJ file as a triangle soup, three vertices per triangle.
///
/// Only vertex positions are read; texture and normal indices are ignored.
/// Parsed meshes are cached in the temporary directory, keyed on the path and
/// the size and modification time of the file.
pub fn load<P: AsRef<Path>>(path: P) -> Result<HostMesh> {
	let path = path.as_ref();
	let metadata = fs::metadata(path)?;
	let cache_file = cache_path(path, &metadata);

	// load from cache if possible
	if let Ok(f) = File::open(&cache_file) {
		match bincode::deserialize_from(BufReader::new(f)) {
			Ok(mesh) => {
				debug!("mesh {} found in cache", path.display());
				return Ok(mesh);
			}
			Err(e) => warn!("ignoring corrupted cache entry {}: {}", cache_file.display(), e),
		}
	}

	info!("loading mesh {}", path.display());
	let start = PreciseTime::now();
	let mesh = parse(BufReader::new(File::open(path)?))?;
	let end = PreciseTime::now();
	info!("loaded {} triangles in {:.3}s", mesh.vertices.len() / 3, start.to(end).num_milliseconds() as f32 / 1000.0);

	if let Err(e) = store(&cache_file, &mesh) {
		warn!("failed to cache mesh {}: {}", path.display(), e);
	}

	Ok(mesh)
}

fn cache_path(path: &Path, metadata: &fs::Metadata) -> PathBuf {
	let hash = {
		let mut hasher = DefaultHasher::new();
		path.hash(&mut hasher);
		metadata.len().hash(&mut hasher);
		if let Some(mtime) = metadata.modified().ok().and_then(|t| t.duration_since(UNIX_EPOCH).ok()) {
			mtime.hash(&mut hasher);
		}
		hasher.finish()
	};
	temp_dir().join("glint_obj_cache").join(format!("{:016x}", hash))
}

fn store(cache_file: &Path, mesh: &HostMesh) -> Result<()> {
	if let Some(dir) = cache_file.parent() {
		fs::create_dir_all(dir)?;
	}
	let mut bw = BufWriter::new(File::create(cache_file)?);
	bincode::serialize_into(&mut bw, mesh)?;
	Ok(())
}

/// Parse OBJ text; polygons are split into fans around their first vertex
pub fn parse<R: BufRead>(reader: R) -> Result<HostMesh> {
	let mut positions: Vec<Vec3> = Vec::new();
	let mut soup: Vec<Vec3> = Vec::new();
	let mut face: Vec<Vec3> = Vec::new();

	for (n, line) in reader.lines().enumerate() {
		let line = line?;
		let lineno = n + 1;
		let err = |message: String| Error::Obj { line: lineno, message };

		let mut tokens = line.split_whitespace();
		match tokens.next() {
			Some("v") => {
				let mut coords = [0.0; 3];
				for c in coords.iter_mut() {
					let token = tokens.next().ok_or_else(|| err("vertex with less than 3 coordinates".to_owned()))?;
					*c = token.parse::<f32>().map_err(|e| err(format!("bad coordinate {:?}: {}", token, e)))?;
				}
				positions.push(Vec3::from(coords));
			}
			Some("f") => {
				face.clear();
				for group in tokens {
					// "v", "v/vt", "v//vn" or "v/vt/vn"
					let vi = group.split('/').next().unwrap_or("");
					let idx = vi.parse::<isize>().map_err(|e| err(format!("bad vertex index {:?}: {}", vi, e)))?;
					let idx = resolve_index(idx, positions.len())
						.ok_or_else(|| err(format!("vertex index {} out of range", idx)))?;
					face.push(positions[idx]);
				}
				if face.len() < 3 {
					return Err(err(format!("face with {} vertices", face.len())));
				}
				for i in 2..face.len() {
					soup.extend_from_slice(&[face[0], face[i - 1], face[i]]);
				}
			}
			// comments, groups, materials, normals and uvs
			_ => {}
		}
	}

	Ok(HostMesh::new(soup))
}

/// OBJ indices are 1-based, negative ones count back from the last vertex
fn resolve_index(idx: isize, len: usize) -> Option<usize> {
	let resolved = if idx < 0 {
		len as isize + idx
	} else {
		idx - 1
	};
	if resolved >= 0 && (resolved as usize) < len {
		Some(resolved as usize)
	} else {
		None
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Cursor;

	const QUAD: &str = "\
# unit quad
o quad
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vn 0 0 1
f 1//1 2//1 3//1 4//1
";

	#[test]
	fn quad_is_fan_triangulated() {
		let mesh = parse(Cursor::new(QUAD)).unwrap();
		let v = |x, y| Vec3::new(x, y, 0.0);
		assert_eq!(mesh.vertices, vec![
			v(0.0, 0.0), v(1.0, 0.0), v(1.0, 1.0),
			v(0.0, 0.0), v(1.0, 1.0), v(0.0, 1.0),
		]);
	}

	#[test]
	fn negative_indices_count_from_the_end() {
		let text = "v 0 0 0\nv 2 0 0\nv 0 2 0\nf -3/1 -2/2 -1/3\n";
		let mesh = parse(Cursor::new(text)).unwrap();
		assert_eq!(mesh.vertices[1], Vec3::new(2.0, 0.0, 0.0));
		assert_eq!(mesh.vertices.len(), 3);
	}

	#[test]
	fn errors_carry_the_line_number() {
		match parse(Cursor::new("v 0 0 0\nv 1 0 0\nf 1 2 3\n")) {
			Err(Error::Obj { line, .. }) => assert_eq!(line, 3),
			other => panic!("unexpected {:?}", other),
		}
		match parse(Cursor::new("v 0 zero 0\n")) {
			Err(Error::Obj { line, .. }) => assert_eq!(line, 1),
			other => panic!("unexpected {:?}", other),
		}
		assert!(parse(Cursor::new("v 0 0 0\nv 1 0 0\nf 1 2\n")).is_err());
	}

	#[test]
	fn index_resolution() {
		assert_eq!(resolve_index(1, 3), Some(0));
		assert_eq!(resolve_index(-1, 3), Some(2));
		assert_eq!(resolve_index(0, 3), None);
		assert_eq!(resolve_index(4, 3), None);
		assert_eq!(resolve_index(-4, 3), None);
	}

	#[test]
	fn load_goes_through_the_cache() {
		let path = temp_dir().join(format!("glint_quad_{}.obj", std::process::id()));
		fs::write(&path, QUAD).unwrap();
		let first = load(&path).unwrap();
		let second = load(&path).unwrap();
		assert_eq!(first, second);
		assert_eq!(first.vertices.len(), 6);
		fs::remove_file(&path).unwrap();
	}
}
