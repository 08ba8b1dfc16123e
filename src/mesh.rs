use time::PreciseTime;

use crate::math::*;
use crate::bvh::BVH;

/// Triangle indices in the set; 2^32 triangles should be enough
pub type Index = u32;

/// Below this, a triangle is considered parallel to the ray (or degenerate)
const DET_EPSILON: f32 = 1e-8;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Triangle {
	pub vertices: [Vec3; 3],
}

impl Triangle {
	pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Triangle {
		Triangle { vertices: [v0, v1, v2] }
	}

	pub fn edges(&self) -> (Vec3, Vec3) {
		let [v0, v1, v2] = self.vertices;
		(v1 - v0, v2 - v0)
	}

	fn aabb(&self) -> AABB {
		let mut bbox = AABB::from_point(self.vertices[0]);
		bbox.extend_point(self.vertices[1]);
		bbox.extend_point(self.vertices[2]);
		bbox
	}

	fn centroid(&self, axis: Axis) -> f32 {
		(self.vertices[0][axis] + self.vertices[1][axis] + self.vertices[2][axis]) * (1.0 / 3.0)
	}
}

/// Vertex positions as handed over by the host, three per triangle
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct HostMesh {
	pub vertices: Vec<Vec3>,
}

impl HostMesh {
	pub fn new(vertices: Vec<Vec3>) -> HostMesh {
		HostMesh { vertices }
	}

	pub fn transformed(&self, transform: &Mat4) -> HostMesh {
		HostMesh {
			vertices: self.vertices.iter().map(|&v| transform.transform_point(v)).collect(),
		}
	}
}

/// Collect the triangles of all meshes in order; vertices left over after the
/// last whole triangle of a mesh are dropped.
pub fn triangulate(meshes: &[HostMesh]) -> Vec<Triangle> {
	let mut triangles = Vec::with_capacity(meshes.iter().map(|m| m.vertices.len() / 3).sum());
	for (i, mesh) in meshes.iter().enumerate() {
		let leftover = mesh.vertices.len() % 3;
		if leftover != 0 {
			warn!("mesh {} has {} vertices, dropping the last {}", i, mesh.vertices.len(), leftover);
		}
		triangles.extend(mesh.vertices.chunks_exact(3).map(|v| Triangle::new(v[0], v[1], v[2])));
	}
	triangles
}

/// Closest triangle along a ray
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TriangleHit {
	/// Position of the triangle in the set, as given to `TriangleSet::new`
	pub index: usize,
	pub distance: f32,
}

/// Immutable triangle soup with a BVH on top of it.
pub struct TriangleSet {
	triangles: Vec<Triangle>,
	// N.B. indexed like `triangles`
	edges: Vec<(Vec3, Vec3)>,
	// triangle indices in BVH leaf order
	order: Vec<Index>,
	bvh: BVH,
}

impl TriangleSet {
	pub fn new(triangles: Vec<Triangle>) -> TriangleSet {
		let mut order: Vec<Index> = (0..triangles.len() as Index).collect();

		let bvh = {
			let proj_centroid = |&i: &Index, axis| triangles[i as usize].centroid(axis);
			let tri_bbox = |&i: &Index| triangles[i as usize].aabb();

			debug!("Building BVH for {} triangles...", triangles.len());
			let start = PreciseTime::now();
			let bvh = BVH::build(&proj_centroid, &tri_bbox, &mut order[..]);
			let end = PreciseTime::now();
			info!("BVH over {} triangles built in {:.3}s ({} nodes, depth {})",
				triangles.len(), start.to(end).num_milliseconds() as f32 / 1000.0, bvh.node_count(), bvh.depth());
			bvh
		};

		let edges = triangles.iter().map(Triangle::edges).collect();

		TriangleSet { triangles, edges, order, bvh }
	}

	pub fn from_meshes(meshes: &[HostMesh]) -> TriangleSet {
		TriangleSet::new(triangulate(meshes))
	}

	pub fn empty() -> TriangleSet {
		TriangleSet::new(Vec::new())
	}

	pub fn len(&self) -> usize {
		self.triangles.len()
	}

	pub fn is_empty(&self) -> bool {
		self.triangles.is_empty()
	}

	pub fn triangles(&self) -> &[Triangle] {
		&self.triangles
	}

	pub fn get(&self, index: usize) -> Option<&Triangle> {
		self.triangles.get(index)
	}

	/// Unit geometric normal of a triangle from its cached edges, following
	/// the winding order
	pub fn normal(&self, index: usize) -> Vec3 {
		let (e1, e2) = self.edges[index];
		Vec3::cross(e1, e2).normalized()
	}

	/// Closest triangle hit within the ray interval
	pub fn intersect(&self, ray: &Ray) -> Option<TriangleHit> {
		if self.triangles.is_empty() {
			return None;
		}
		let intersect_item = |ray: &Ray, i: usize| self.intersect_triangle(ray, self.order[i] as usize);
		self.bvh.intersect(&intersect_item, ray).map(|(i, distance)| TriangleHit {
			index: self.order[i] as usize,
			distance,
		})
	}

	// Moller-Trumbore
	fn intersect_triangle(&self, ray: &Ray, i: usize) -> Option<f32> {
		let v0 = self.triangles[i].vertices[0];
		let (edge1, edge2) = self.edges[i];

		let p = Vec3::cross(ray.direction, edge2);
		let det = Vec3::dot(edge1, p);
		if !(det.abs() >= DET_EPSILON) {
			return None;
		}
		let idet = 1.0 / det;

		let t = ray.origin - v0;
		let u = Vec3::dot(t, p) * idet;
		if u < 0.0 || u > 1.0 {
			return None;
		}

		let q = Vec3::cross(t, edge1);
		let v = Vec3::dot(ray.direction, q) * idet;
		if v < 0.0 || (u + v) > 1.0 {
			return None;
		}

		let dist = Vec3::dot(edge2, q) * idet;
		if ray.accepts(dist) { Some(dist) } else { None }
	}
}
