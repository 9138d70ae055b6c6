use glam::Vec3;
use voxfolio_core::math::Aabb;

use crate::ray::Ray;

/// Maximum primitives stored in a leaf.
const MAX_LEAF_PRIMITIVES: usize = 4;

/// Number of SAH bins evaluated per split.
const SAH_BINS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BvhNodeKind {
    /// Range `[start, start + count)` into the primitive index array.
    Leaf { start: u32, count: u32 },
    Interior { left: u32, right: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BvhNode {
    pub bounds: Aabb,
    pub kind: BvhNodeKind,
}

/// Bounding volume hierarchy over an indexed set of primitives.
///
/// Primitives are referenced by index only; the caller keeps the primitive
/// data and tests candidates itself. Node 0 is the root.
#[derive(Debug, Clone, Default)]
pub struct Bvh {
    nodes: Vec<BvhNode>,
    indices: Vec<u32>,
}

impl Bvh {
    /// Build from per-primitive bounds using binned SAH splits.
    pub fn build(primitive_bounds: &[Aabb]) -> Self {
        if primitive_bounds.is_empty() {
            return Self::default();
        }

        let centroids: Vec<Vec3> = primitive_bounds.iter().map(Aabb::center).collect();
        let mut indices: Vec<u32> = (0..primitive_bounds.len() as u32).collect();
        let mut nodes = Vec::with_capacity(2 * primitive_bounds.len() / MAX_LEAF_PRIMITIVES + 1);

        let len = indices.len();
        build_recursive(&mut nodes, &mut indices, primitive_bounds, &centroids, 0, len);

        Self { nodes, indices }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[BvhNode] {
        &self.nodes
    }

    /// Bounds of the whole hierarchy.
    pub fn bounds(&self) -> Aabb {
        self.nodes.first().map(|n| n.bounds).unwrap_or(Aabb::EMPTY)
    }

    /// Push every primitive whose leaf box the ray touches. No pruning:
    /// every possible hit along the full ray is a candidate.
    pub fn candidates(&self, ray: &Ray, out: &mut Vec<u32>) {
        if self.nodes.is_empty() {
            return;
        }
        let mut stack = vec![0usize];
        while let Some(node_idx) = stack.pop() {
            let node = &self.nodes[node_idx];
            if node
                .bounds
                .ray_hit(ray.origin, ray.inv_direction, 0.0, f32::INFINITY)
                .is_none()
            {
                continue;
            }
            match node.kind {
                BvhNodeKind::Leaf { start, count } => {
                    let range = start as usize..(start + count) as usize;
                    out.extend_from_slice(&self.indices[range]);
                }
                BvhNodeKind::Interior { left, right } => {
                    stack.push(right as usize);
                    stack.push(left as usize);
                }
            }
        }
    }

    /// Nearest hit along the ray. `test` returns the hit distance of one
    /// primitive; subtrees farther than the best hit so far are skipped.
    pub fn closest<F>(&self, ray: &Ray, mut test: F) -> Option<(u32, f32)>
    where
        F: FnMut(u32) -> Option<f32>,
    {
        if self.nodes.is_empty() {
            return None;
        }
        let mut best: Option<(u32, f32)> = None;
        let mut stack = vec![0usize];

        while let Some(node_idx) = stack.pop() {
            let limit = best.map_or(f32::INFINITY, |(_, t)| t);
            let node = &self.nodes[node_idx];
            if node
                .bounds
                .ray_hit(ray.origin, ray.inv_direction, 0.0, limit)
                .is_none()
            {
                continue;
            }
            match node.kind {
                BvhNodeKind::Leaf { start, count } => {
                    for &prim in &self.indices[start as usize..(start + count) as usize] {
                        if let Some(t) = test(prim) {
                            if best.map_or(true, |(_, b)| t < b) {
                                best = Some((prim, t));
                            }
                        }
                    }
                }
                BvhNodeKind::Interior { left, right } => {
                    // Near child on top of the stack
                    let entry = |idx: u32| {
                        self.nodes[idx as usize]
                            .bounds
                            .ray_hit(ray.origin, ray.inv_direction, 0.0, limit)
                            .map(|(near, _)| near)
                    };
                    match (entry(left), entry(right)) {
                        (Some(l), Some(r)) if l <= r => {
                            stack.push(right as usize);
                            stack.push(left as usize);
                        }
                        (Some(_), Some(_)) => {
                            stack.push(left as usize);
                            stack.push(right as usize);
                        }
                        (Some(_), None) => stack.push(left as usize),
                        (None, Some(_)) => stack.push(right as usize),
                        (None, None) => {}
                    }
                }
            }
        }

        best
    }
}

fn build_recursive(
    nodes: &mut Vec<BvhNode>,
    indices: &mut [u32],
    bounds: &[Aabb],
    centroids: &[Vec3],
    start: usize,
    end: usize,
) -> u32 {
    let count = end - start;
    let node_bounds = indices[start..end]
        .iter()
        .fold(Aabb::EMPTY, |acc, &i| acc.union(bounds[i as usize]));

    let node_idx = nodes.len() as u32;
    let leaf = BvhNode {
        bounds: node_bounds,
        kind: BvhNodeKind::Leaf {
            start: start as u32,
            count: count as u32,
        },
    };

    if count <= MAX_LEAF_PRIMITIVES {
        nodes.push(leaf);
        return node_idx;
    }

    let centroid_bounds = Aabb::from_points(indices[start..end].iter().map(|&i| centroids[i as usize]));
    let extent = centroid_bounds.size();
    let axis = if extent.x >= extent.y && extent.x >= extent.z {
        0
    } else if extent.y >= extent.z {
        1
    } else {
        2
    };

    // All centroids coincide: nothing to split on
    if extent[axis] <= 0.0 {
        nodes.push(leaf);
        return node_idx;
    }

    let mid = match sah_split(&mut indices[start..end], bounds, centroids, &centroid_bounds, axis) {
        Some(split) => start + split,
        None => {
            // Median fallback
            indices[start..end].sort_by(|&a, &b| {
                centroids[a as usize][axis].total_cmp(&centroids[b as usize][axis])
            });
            start + count / 2
        }
    };

    // Reserve the interior slot, children follow
    nodes.push(leaf);
    let left = build_recursive(nodes, indices, bounds, centroids, start, mid);
    let right = build_recursive(nodes, indices, bounds, centroids, mid, end);
    nodes[node_idx as usize].kind = BvhNodeKind::Interior { left, right };

    node_idx
}

/// Partition `indices` at the cheapest binned SAH split along `axis`.
/// Returns the size of the left partition, or None if every split is degenerate.
fn sah_split(
    indices: &mut [u32],
    bounds: &[Aabb],
    centroids: &[Vec3],
    centroid_bounds: &Aabb,
    axis: usize,
) -> Option<usize> {
    let lo = centroid_bounds.min[axis];
    let scale = SAH_BINS as f32 / (centroid_bounds.max[axis] - lo);
    let bin_of = |i: u32| (((centroids[i as usize][axis] - lo) * scale) as usize).min(SAH_BINS - 1);

    let mut bin_bounds = [Aabb::EMPTY; SAH_BINS];
    let mut bin_counts = [0usize; SAH_BINS];
    for &i in indices.iter() {
        let b = bin_of(i);
        bin_bounds[b] = bin_bounds[b].union(bounds[i as usize]);
        bin_counts[b] += 1;
    }

    let mut best_cost = f32::INFINITY;
    let mut best_split = 0;
    for split in 1..SAH_BINS {
        let (left_box, left_count) = (0..split).fold((Aabb::EMPTY, 0), |(b, c), k| {
            (b.union(bin_bounds[k]), c + bin_counts[k])
        });
        let (right_box, right_count) = (split..SAH_BINS).fold((Aabb::EMPTY, 0), |(b, c), k| {
            (b.union(bin_bounds[k]), c + bin_counts[k])
        });
        if left_count == 0 || right_count == 0 {
            continue;
        }
        let cost = left_box.surface_area() * left_count as f32
            + right_box.surface_area() * right_count as f32;
        if cost < best_cost {
            best_cost = cost;
            best_split = split;
        }
    }

    if best_split == 0 {
        return None;
    }

    // In-place partition: bins below the split go left
    let mut left = 0;
    for i in 0..indices.len() {
        if bin_of(indices[i]) < best_split {
            indices.swap(i, left);
            left += 1;
        }
    }

    if left == 0 || left == indices.len() {
        None
    } else {
        Some(left)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scattered_boxes(n: usize) -> Vec<Aabb> {
        (0..n)
            .map(|i| {
                let x = (i % 7) as f32 * 2.0;
                let y = ((i / 7) % 5) as f32 * 2.0;
                let z = (i / 35) as f32 * 2.0;
                let min = Vec3::new(x, y, z);
                Aabb::new(min, min + Vec3::splat(1.0))
            })
            .collect()
    }

    fn brute_force(bounds: &[Aabb], ray: &Ray) -> Vec<u32> {
        let mut hit: Vec<u32> = bounds
            .iter()
            .enumerate()
            .filter(|(_, b)| b.ray_hit(ray.origin, ray.inv_direction, 0.0, f32::INFINITY).is_some())
            .map(|(i, _)| i as u32)
            .collect();
        hit.sort_unstable();
        hit
    }

    #[test]
    fn test_empty_build() {
        let bvh = Bvh::build(&[]);
        assert!(bvh.is_empty());
        assert!(bvh.bounds().is_empty());
        let mut out = Vec::new();
        bvh.candidates(&Ray::new(Vec3::ZERO, Vec3::X), &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_every_primitive_in_exactly_one_leaf() {
        let boxes = scattered_boxes(100);
        let bvh = Bvh::build(&boxes);
        let mut seen = vec![0u32; boxes.len()];
        for node in bvh.nodes() {
            if let BvhNodeKind::Leaf { start, count } = node.kind {
                for &i in &bvh.indices[start as usize..(start + count) as usize] {
                    seen[i as usize] += 1;
                }
            }
        }
        assert!(seen.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_parent_contains_children() {
        let boxes = scattered_boxes(80);
        let bvh = Bvh::build(&boxes);
        for node in bvh.nodes() {
            if let BvhNodeKind::Interior { left, right } = node.kind {
                for child in [left, right] {
                    let c = bvh.nodes()[child as usize].bounds;
                    assert!(node.bounds.contains(c.min) && node.bounds.contains(c.max));
                }
            }
        }
    }

    #[test]
    fn test_candidates_superset_of_brute_force() {
        let boxes = scattered_boxes(105);
        let bvh = Bvh::build(&boxes);
        for ray in [
            Ray::new(Vec3::new(-1.0, 0.5, 0.5), Vec3::X),
            Ray::new(Vec3::new(4.5, -1.0, 2.5), Vec3::Y),
            Ray::new(Vec3::new(2.5, 2.5, 10.0), Vec3::NEG_Z),
        ] {
            let mut out = Vec::new();
            bvh.candidates(&ray, &mut out);
            for expected in brute_force(&boxes, &ray) {
                assert!(out.contains(&expected), "box {expected} missing for {ray:?}");
            }
        }
    }

    #[test]
    fn test_closest_picks_nearest_box() {
        let boxes = scattered_boxes(35);
        let bvh = Bvh::build(&boxes);
        let ray = Ray::new(Vec3::new(-1.0, 0.5, 0.5), Vec3::X);
        let hit = bvh.closest(&ray, |i| {
            boxes[i as usize]
                .ray_hit(ray.origin, ray.inv_direction, 0.0, f32::INFINITY)
                .map(|(near, _)| near)
        });
        // Box 0 spans x in [0, 1]
        assert_eq!(hit, Some((0, 1.0)));
    }

    #[test]
    fn test_identical_centroids_make_one_leaf() {
        let boxes = vec![Aabb::new(Vec3::ZERO, Vec3::ONE); 9];
        let bvh = Bvh::build(&boxes);
        assert_eq!(bvh.node_count(), 1);
    }
}
