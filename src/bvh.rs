use std::cmp::Ordering;

use rayon;

use crate::math::*;

/// Below this many items a node is built on the current thread
const PARALLEL_BUILD_THRESHOLD: usize = 4096;

/// Bounding volume hierarchy over a slice of items.
///
/// Building reorders the slice in place; leaves refer to ranges of the
/// reordered slice, so callers keep their own identity inside the items.
pub struct BVH {
	bbox: AABB,
	node: Node,
}

enum Node {
	Leaf { begin: usize, end: usize },
	Split { split_axis: Axis, children: [Box<BVH>; 2] },
}

impl BVH {
	pub fn build<I, F, G>(proj_centroid: &F, item_bbox: &G, items: &mut [I]) -> BVH
		where I: Send, F: (Fn(&I, Axis) -> f32) + Sync, G: (Fn(&I) -> AABB) + Sync
	{
		let n = items.len();
		build_rec(proj_centroid, item_bbox, items, 0, &mut vec![0.0; n])
	}

	/// Closest item along the ray as (position in the item slice, distance).
	///
	/// `intersect_item` must only return distances accepted by the ray.
	/// Ties keep the item found first.
	pub fn intersect<F>(&self, intersect_item: &F, ray: &Ray) -> Option<(usize, f32)>
		where F: Fn(&Ray, usize) -> Option<f32>
	{
		intersect_rec(intersect_item, ray, self, ray.t_max, 1.0 / ray.direction)
	}

	pub fn node_count(&self) -> usize {
		match self.node {
			Node::Leaf { .. } => 1,
			Node::Split { ref children, .. } => 1 + children[0].node_count() + children[1].node_count(),
		}
	}

	pub fn depth(&self) -> usize {
		match self.node {
			Node::Leaf { .. } => 1,
			Node::Split { ref children, .. } => 1 + children[0].depth().max(children[1].depth()),
		}
	}
}

fn build_rec<I, F, G>(proj_centroid: &F, item_bbox: &G, items: &mut [I], begin: usize, buffer: &mut [f32]) -> BVH
	where I: Send, F: (Fn(&I, Axis) -> f32) + Sync, G: (Fn(&I) -> AABB) + Sync
{
	const INTERSECTION_COST: f32 = 1.0;
	const TRAVERSAL_COST: f32 = 1.5;

	let n = items.len();
	let end = begin + n;
	let mut best_axis = None;
	let mut best_cost = INTERSECTION_COST * n as f32;
	let mut best_index = 0;
	let mut node_bbox = AABB::empty();

	// Try splitting along every axis
	for &axis in &Axis::ALL {
		sort_projected_centroid(proj_centroid, items, axis);

		// Compute AABB surface areas incrementally from the left
		let mut bbox = AABB::empty();
		for (i, t) in items.iter().enumerate() {
			bbox = bbox.union(&item_bbox(t));
			buffer[i] = bbox.surface_area();
		}

		if axis == Axis::X {
			node_bbox = bbox;
		}

		let node_area = node_bbox.surface_area();
		if node_area <= 0.0 {
			// flat or empty node, SAH is meaningless
			continue;
		}

		// Sweep from the right, comparing each split against the left areas
		let mut bbox = AABB::empty();
		let tri_factor = INTERSECTION_COST / node_area;
		for (i, t) in items.iter().enumerate().skip(1).rev() {
			bbox = bbox.union(&item_bbox(t));

			let left_area = buffer[i - 1];
			let right_area = bbox.surface_area();
			let prims_left = i as f32;
			let prims_right = (n - i) as f32;

			let sah_cost = 2.0 * TRAVERSAL_COST
				+ tri_factor * (prims_left * left_area + prims_right * right_area);
			if sah_cost < best_cost {
				best_cost = sah_cost;
				best_axis = Some(axis);
				best_index = i;
			}
		}
	}

	let node = match best_axis {
		None => Node::Leaf { begin, end },
		Some(axis) => {
			if axis != Axis::Z { // items are sorted along Z after the sweep
				sort_projected_centroid(proj_centroid, items, axis);
			}
			let mid = begin + best_index;
			let (buf1, buf2) = buffer.split_at_mut(best_index);
			let (items1, items2) = items.split_at_mut(best_index);
			let mut build1 = || Box::new(build_rec(proj_centroid, item_bbox, items1, begin, buf1));
			let mut build2 = || Box::new(build_rec(proj_centroid, item_bbox, items2, mid, buf2));
			let (c1, c2) = if n >= PARALLEL_BUILD_THRESHOLD {
				rayon::join(build1, build2)
			} else {
				(build1(), build2())
			};
			Node::Split { split_axis: axis, children: [c1, c2] }
		},
	};

	BVH { bbox: node_bbox, node }
}

fn intersect_rec<F>(intersect_item: &F, ray: &Ray, bvh: &BVH, dist_max: f32, inv_dir: Vec3) -> Option<(usize, f32)>
	where F: Fn(&Ray, usize) -> Option<f32>
{
	match bvh.bbox.intersect_fast(ray, inv_dir) {
		Some((t_near, t_far)) if t_far >= ray.t_min && t_near <= dist_max => {}
		_ => return None,
	}

	match bvh.node {
		Node::Leaf { begin, end } => intersect_items(intersect_item, ray, begin, end, dist_max),
		Node::Split { split_axis, ref children } => {
			// visit the nearer child first
			let (c1, c2) = if ray.direction[split_axis] < 0.0 {
				(&children[1], &children[0])
			} else {
				(&children[0], &children[1])
			};

			match intersect_rec(intersect_item, ray, c1, dist_max, inv_dir) {
				None => intersect_rec(intersect_item, ray, c2, dist_max, inv_dir),
				Some(hit1) => {
					// only a strictly closer hit in the other child replaces it
					match intersect_rec(intersect_item, ray, c2, hit1.1, inv_dir) {
						Some(hit2) if hit2.1 < hit1.1 => Some(hit2),
						_ => Some(hit1),
					}
				}
			}
		},
	}
}

fn intersect_items<F>(intersect_item: &F, ray: &Ray, begin: usize, end: usize, dist_max: f32) -> Option<(usize, f32)>
	where F: Fn(&Ray, usize) -> Option<f32>
{
	let mut closest: Option<(usize, f32)> = None;

	for i in begin..end {
		if let Some(t) = intersect_item(ray, i) {
			let best = closest.map_or(dist_max, |c| c.1);
			if t < best || (closest.is_none() && t == best) {
				closest = Some((i, t));
			}
		}
	}

	closest
}

fn sort_projected_centroid<I, F>(proj_centroid: &F, items: &mut [I], axis: Axis)
	where F: Fn(&I, Axis) -> f32
{
	items.sort_by(|a, b|
		proj_centroid(a, axis).partial_cmp(&proj_centroid(b, axis)).unwrap_or(Ordering::Equal)
	);
}
