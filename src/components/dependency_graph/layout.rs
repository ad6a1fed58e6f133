//! Deterministic node placement and camera math.
//!
//! The force layout only needs initial seed positions; the hierarchical
//! layout computes final positions outright. Both work in world-space
//! coordinates centered on the origin, which the view transform maps to the
//! viewport center.

use crate::model::GraphNode;

/// Vertical distance between hierarchy levels, world units.
const LEVEL_SPACING: f64 = 140.0;

/// Horizontal distance between siblings on one level, world units.
const SIBLING_SPACING: f64 = 120.0;

/// Zoom bounds shared by wheel zoom, button zoom, and fit.
pub const MIN_ZOOM: f64 = 0.1;
/// Upper zoom bound.
pub const MAX_ZOOM: f64 = 10.0;

/// Multiplicative step applied per discrete zoom action.
pub const ZOOM_STEP: f64 = 1.2;

/// Seed position on a circle around the origin for force-mode node `index`
/// of `count`. The radius grows with the node count so large graphs do not
/// start in a knot.
pub fn circle_seed(index: usize, count: usize) -> (f32, f32) {
	let count = count.max(1);
	let angle = (index as f64) * std::f64::consts::TAU / count as f64;
	let radius = 60.0 + 14.0 * (count as f64).sqrt();
	((radius * angle.cos()) as f32, (radius * angle.sin()) as f32)
}

/// Top-down layered positions keyed by each node's declared level.
///
/// Levels stack downward from the origin; within a level, nodes keep snapshot
/// order and spread symmetrically around x = 0. Deterministic: the same
/// snapshot always yields the same positions.
pub fn hierarchical_positions(nodes: &[GraphNode]) -> Vec<(f32, f32)> {
	let mut per_level_count: std::collections::HashMap<u32, usize> =
		std::collections::HashMap::new();
	for node in nodes {
		*per_level_count.entry(node.level_or_default()).or_insert(0) += 1;
	}

	let mut per_level_seen: std::collections::HashMap<u32, usize> =
		std::collections::HashMap::new();
	nodes
		.iter()
		.map(|node| {
			let level = node.level_or_default();
			let count = per_level_count[&level];
			let seen = per_level_seen.entry(level).or_insert(0);
			let x = (*seen as f64 - (count as f64 - 1.0) / 2.0) * SIBLING_SPACING;
			let y = (level as f64 - 1.0) * LEVEL_SPACING;
			*seen += 1;
			(x as f32, y as f32)
		})
		.collect()
}

/// Axis-aligned bounding box of a point set.
pub fn bounding_box(points: impl Iterator<Item = (f64, f64)>) -> Option<(f64, f64, f64, f64)> {
	let mut bounds: Option<(f64, f64, f64, f64)> = None;
	for (x, y) in points {
		bounds = Some(match bounds {
			None => (x, y, x, y),
			Some((min_x, min_y, max_x, max_y)) => {
				(min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
			}
		});
	}
	bounds
}

/// Camera transform (translate x, translate y, zoom) that fits the bounding
/// box into a viewport with the given padding on every side.
pub fn fit_transform(
	bounds: (f64, f64, f64, f64),
	width: f64,
	height: f64,
	padding: f64,
) -> (f64, f64, f64) {
	let (min_x, min_y, max_x, max_y) = bounds;
	let (bw, bh) = (max_x - min_x, max_y - min_y);
	let k = if bw < 1.0 && bh < 1.0 {
		1.0
	} else {
		let avail_w = (width - 2.0 * padding).max(1.0);
		let avail_h = (height - 2.0 * padding).max(1.0);
		(avail_w / bw.max(1.0))
			.min(avail_h / bh.max(1.0))
			.clamp(MIN_ZOOM, MAX_ZOOM)
	};
	let (cx, cy) = ((min_x + max_x) / 2.0, (min_y + max_y) / 2.0);
	(width / 2.0 - k * cx, height / 2.0 - k * cy, k)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::NodeType;

	fn node_at_level(id: &str, level: u32) -> GraphNode {
		GraphNode {
			id: id.to_string(),
			label: id.to_string(),
			node_type: NodeType::File,
			level: Some(level),
		}
	}

	#[test]
	fn hierarchical_layers_stack_downward() {
		let nodes = vec![
			node_at_level("a", 1),
			node_at_level("b", 2),
			node_at_level("c", 3),
		];
		let positions = hierarchical_positions(&nodes);
		assert!(positions[0].1 < positions[1].1);
		assert!(positions[1].1 < positions[2].1);
	}

	#[test]
	fn siblings_share_a_row_with_distinct_columns() {
		let nodes = vec![
			node_at_level("a", 2),
			node_at_level("b", 2),
			node_at_level("c", 2),
		];
		let positions = hierarchical_positions(&nodes);
		assert_eq!(positions[0].1, positions[1].1);
		assert_eq!(positions[1].1, positions[2].1);
		assert!(positions[0].0 < positions[1].0);
		assert!(positions[1].0 < positions[2].0);
		// Symmetric around the origin.
		assert_eq!(positions[1].0, 0.0);
	}

	#[test]
	fn hierarchical_positions_are_deterministic() {
		let nodes = vec![
			node_at_level("a", 1),
			node_at_level("b", 2),
			node_at_level("c", 2),
		];
		assert_eq!(
			hierarchical_positions(&nodes),
			hierarchical_positions(&nodes)
		);
	}

	#[test]
	fn circle_seed_spreads_nodes() {
		let a = circle_seed(0, 4);
		let b = circle_seed(1, 4);
		assert_ne!(a, b);
		// All seeds sit on the same radius.
		let ra = (a.0 as f64).hypot(a.1 as f64);
		let rb = (b.0 as f64).hypot(b.1 as f64);
		assert!((ra - rb).abs() < 1e-3);
	}

	#[test]
	fn bounding_box_covers_all_points() {
		let bounds =
			bounding_box([(0.0, 0.0), (10.0, -5.0), (-3.0, 8.0)].into_iter()).unwrap();
		assert_eq!(bounds, (-3.0, -5.0, 10.0, 8.0));
		assert_eq!(bounding_box(std::iter::empty()), None);
	}

	#[test]
	fn fit_centers_the_content() {
		let (tx, ty, k) = fit_transform((-50.0, -50.0, 50.0, 50.0), 800.0, 600.0, 40.0);
		// Content center (0,0) maps to the viewport center.
		assert!((tx - 400.0).abs() < 1e-9);
		assert!((ty - 300.0).abs() < 1e-9);
		// Height is the constraining axis: (600 - 80) / 100.
		assert!((k - 5.2).abs() < 1e-9);
	}

	#[test]
	fn fit_of_a_single_point_keeps_unit_zoom() {
		let (tx, ty, k) = fit_transform((5.0, 5.0, 5.0, 5.0), 800.0, 600.0, 40.0);
		assert_eq!(k, 1.0);
		assert!((tx - 395.0).abs() < 1e-9);
		assert!((ty - 295.0).abs() < 1e-9);
	}
}
