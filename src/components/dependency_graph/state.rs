//! Graph view controller: simulation, camera, and selection state.
//!
//! One [`GraphViewState`] is created when the widget mounts and mutated by
//! the animation loop and input handlers until unmount. Rebuilding for a new
//! visible subgraph replaces the simulation wholesale; the snapshot itself is
//! never mutated.

use std::collections::HashMap;

use force_graph::{DefaultNodeIdx, EdgeData, ForceGraph, NodeData, SimulationParameters};

use super::layout;
use super::scale::{ScaleConfig, ScaledValues};
use super::theme;
use crate::model::{EdgeRelation, GraphSnapshot, NodeType};

/// Which algorithm places nodes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
	/// Physics-based placement that settles after a bounded budget, then
	/// freezes.
	#[default]
	Force,
	/// Deterministic top-down layering by declared level; no physics.
	Hierarchical,
}

/// Simulation ticks before the force layout freezes.
const SETTLE_TICKS: u32 = 900;

/// Per-node display metadata attached to the simulation.
#[derive(Clone, Debug)]
pub struct NodeVisual {
	/// Display label.
	pub label: String,
	/// Entity classification, used to look up the encoding tables.
	pub node_type: NodeType,
	/// Size multiplier from the type encoding table.
	pub size: f64,
}

/// One rendered edge, with endpoints resolved to simulation indices.
#[derive(Clone, Debug)]
pub struct EdgeVisual {
	/// Source node index.
	pub from: DefaultNodeIdx,
	/// Target node index.
	pub to: DefaultNodeIdx,
	/// Relation, used to look up color and arrowing.
	pub relation: EdgeRelation,
	/// Optional label; collapsed multi-edges show their aggregate count here.
	pub label: Option<String>,
}

/// Pan and zoom transform applied to the entire graph view.
#[derive(Clone, Debug, Default)]
pub struct ViewTransform {
	/// Horizontal translation in screen pixels.
	pub x: f64,
	/// Vertical translation in screen pixels.
	pub y: f64,
	/// Zoom factor (1.0 = 100%).
	pub k: f64,
}

/// Tracks an in-progress node drag operation.
#[derive(Clone, Debug, Default)]
pub struct DragState {
	/// Whether a drag is active.
	pub active: bool,
	/// The node being dragged.
	pub node_idx: Option<DefaultNodeIdx>,
	/// Pointer position at drag start, screen-space.
	pub start_x: f64,
	/// Pointer position at drag start, screen-space.
	pub start_y: f64,
	/// Node position at drag start, world-space.
	pub node_start_x: f32,
	/// Node position at drag start, world-space.
	pub node_start_y: f32,
}

/// Tracks an in-progress canvas pan operation.
#[derive(Clone, Debug, Default)]
pub struct PanState {
	/// Whether a pan is active.
	pub active: bool,
	/// Pointer position at pan start.
	pub start_x: f64,
	/// Pointer position at pan start.
	pub start_y: f64,
	/// Transform translation at pan start.
	pub transform_start_x: f64,
	/// Transform translation at pan start.
	pub transform_start_y: f64,
}

/// Core widget state combining the physics simulation with camera,
/// selection, and interaction tracking.
pub struct GraphViewState {
	/// The layout/physics engine holding node positions.
	pub graph: ForceGraph<NodeVisual, ()>,
	/// Rendered edges with relation metadata.
	pub edges: Vec<EdgeVisual>,
	/// Camera transform.
	pub transform: ViewTransform,
	/// In-progress node drag.
	pub drag: DragState,
	/// In-progress canvas pan.
	pub pan: PanState,
	/// Currently selected node; non-adjacent elements render muted.
	pub selected: Option<DefaultNodeIdx>,
	/// Node currently under the pointer.
	pub hovered: Option<DefaultNodeIdx>,
	/// Active layout mode.
	pub layout: LayoutMode,
	/// Viewport width in pixels.
	pub width: f64,
	/// Viewport height in pixels.
	pub height: f64,
	/// Whether the physics simulation still advances each frame.
	pub animation_running: bool,
	id_to_idx: HashMap<String, DefaultNodeIdx>,
	settle_ticks: u32,
}

impl GraphViewState {
	/// Empty state sized to the viewport, camera centered on the origin.
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			graph: new_simulation(),
			edges: Vec::new(),
			transform: ViewTransform {
				x: width / 2.0,
				y: height / 2.0,
				k: 1.0,
			},
			drag: DragState::default(),
			pan: PanState::default(),
			selected: None,
			hovered: None,
			layout: LayoutMode::default(),
			width,
			height,
			animation_running: false,
			id_to_idx: HashMap::new(),
			settle_ticks: 0,
		}
	}

	/// Replace the simulation with a new visible subgraph and layout mode,
	/// then fit the camera to it. Selection and interaction state reset;
	/// edges whose endpoints are missing from the node set are skipped.
	pub fn rebuild(&mut self, snapshot: &GraphSnapshot, mode: LayoutMode) {
		let mut graph = new_simulation();
		let mut id_to_idx = HashMap::new();

		let hierarchical = mode == LayoutMode::Hierarchical;
		let positions = if hierarchical {
			layout::hierarchical_positions(&snapshot.nodes)
		} else {
			(0..snapshot.nodes.len())
				.map(|i| layout::circle_seed(i, snapshot.nodes.len()))
				.collect()
		};

		for (node, &(x, y)) in snapshot.nodes.iter().zip(&positions) {
			let idx = graph.add_node(NodeData {
				x,
				y,
				mass: 10.0,
				is_anchor: hierarchical,
				user_data: NodeVisual {
					label: node.label.clone(),
					node_type: node.node_type,
					size: theme::node_size(node.node_type),
				},
			});
			id_to_idx.insert(node.id.clone(), idx);
		}

		let mut edges = Vec::new();
		for edge in &snapshot.edges {
			if let (Some(&from), Some(&to)) =
				(id_to_idx.get(&edge.source), id_to_idx.get(&edge.target))
			{
				graph.add_edge(from, to, EdgeData::default());
				edges.push(EdgeVisual {
					from,
					to,
					relation: edge.relation,
					label: edge.label.clone().or_else(|| {
						match (edge.relation, edge.count) {
							(EdgeRelation::Multiple, Some(count)) => Some(format!("x{count}")),
							_ => None,
						}
					}),
				});
			}
		}

		self.graph = graph;
		self.edges = edges;
		self.id_to_idx = id_to_idx;
		self.selected = None;
		self.hovered = None;
		self.drag = DragState::default();
		self.pan = PanState::default();
		self.layout = mode;
		self.animation_running = !hierarchical && !snapshot.nodes.is_empty();
		self.settle_ticks = if hierarchical { 0 } else { SETTLE_TICKS };
		self.fit();
	}

	/// Simulation index for a node id, if it is currently visible.
	pub fn index_of(&self, id: &str) -> Option<DefaultNodeIdx> {
		self.id_to_idx.get(id).copied()
	}

	/// Convert screen coordinates to world coordinates.
	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the given screen position, if any.
	pub fn node_at_position(
		&self,
		sx: f64,
		sy: f64,
		config: &ScaleConfig,
	) -> Option<DefaultNodeIdx> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		let scale = ScaledValues::new(config, self.transform.k);
		let mut found = None;
		self.graph.visit_nodes(|node| {
			let (dx, dy) = (node.x() as f64 - gx, node.y() as f64 - gy);
			let hit = scale.hit_radius * node.data.user_data.size;
			if (dx * dx + dy * dy).sqrt() < hit {
				found = Some(node.index());
			}
		});
		found
	}

	/// Set or clear the selection. Deselecting restores every node and edge
	/// to its table colors; the muted state is derived, never stored.
	pub fn select(&mut self, node: Option<DefaultNodeIdx>) {
		self.selected = node;
	}

	/// Whether this node keeps its own colors under the current selection.
	pub fn node_active(&self, idx: DefaultNodeIdx) -> bool {
		match self.selected {
			None => true,
			Some(sel) => {
				idx == sel
					|| self
						.edges
						.iter()
						.any(|e| (e.from == sel && e.to == idx) || (e.to == sel && e.from == idx))
			}
		}
	}

	/// Whether this edge keeps its own color under the current selection.
	pub fn edge_active(&self, edge: &EdgeVisual) -> bool {
		match self.selected {
			None => true,
			Some(sel) => edge.from == sel || edge.to == sel,
		}
	}

	/// Advance the physics simulation by one frame. Freezes once the settle
	/// budget is exhausted; hierarchical layouts never run physics.
	pub fn tick(&mut self, dt: f32) {
		if !self.animation_running {
			return;
		}
		self.graph.update(dt);
		self.settle_ticks = self.settle_ticks.saturating_sub(1);
		if self.settle_ticks == 0 {
			self.animation_running = false;
		}
	}

	/// Update the viewport dimensions after a container resize.
	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	/// Zoom by `factor` about the given screen point.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
		let new_k = (self.transform.k * factor).clamp(layout::MIN_ZOOM, layout::MAX_ZOOM);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	/// Zoom by `factor` about the viewport center (discrete zoom buttons).
	pub fn zoom_step(&mut self, factor: f64) {
		self.zoom_at(self.width / 2.0, self.height / 2.0, factor);
	}

	/// Fit the camera to the current node positions.
	pub fn fit(&mut self) {
		let mut points = Vec::new();
		self.graph.visit_nodes(|node| {
			points.push((node.x() as f64, node.y() as f64));
		});
		if let Some(bounds) = layout::bounding_box(points.into_iter()) {
			let (x, y, k) = layout::fit_transform(bounds, self.width, self.height, 60.0);
			self.transform = ViewTransform { x, y, k };
		}
	}
}

fn new_simulation() -> ForceGraph<NodeVisual, ()> {
	ForceGraph::new(SimulationParameters {
		force_charge: 150.0,
		force_spring: 0.05,
		force_max: 100.0,
		node_speed: 3000.0,
		damping_factor: 0.9,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::model::{GraphEdge, GraphNode};

	fn snapshot() -> GraphSnapshot {
		let node = |id: &str, ty: NodeType, level: u32| GraphNode {
			id: id.to_string(),
			label: id.to_string(),
			node_type: ty,
			level: Some(level),
		};
		let edge = |s: &str, t: &str, rel: EdgeRelation| GraphEdge {
			source: s.to_string(),
			target: t.to_string(),
			relation: rel,
			count: None,
			label: None,
		};
		GraphSnapshot {
			nodes: vec![
				node("src", NodeType::Directory, 1),
				node("src/a.py", NodeType::File, 2),
				node("src/b.py", NodeType::File, 2),
				node("requests", NodeType::Package, 1),
			],
			edges: vec![
				edge("src", "src/a.py", EdgeRelation::Contains),
				edge("src", "src/b.py", EdgeRelation::Contains),
				edge("src/a.py", "requests", EdgeRelation::Imports),
			],
		}
	}

	fn built(mode: LayoutMode) -> GraphViewState {
		let mut state = GraphViewState::new(800.0, 600.0);
		state.rebuild(&snapshot(), mode);
		state
	}

	#[test]
	fn rebuild_skips_edges_with_missing_endpoints() {
		let mut data = snapshot();
		data.edges.push(GraphEdge {
			source: "ghost".into(),
			target: "src".into(),
			relation: EdgeRelation::Contains,
			count: None,
			label: None,
		});
		let mut state = GraphViewState::new(800.0, 600.0);
		state.rebuild(&data, LayoutMode::Force);
		assert_eq!(state.edges.len(), 3);
	}

	#[test]
	fn selection_mutes_non_adjacent_and_roundtrips() {
		let mut state = built(LayoutMode::Force);
		let all: Vec<_> = ["src", "src/a.py", "src/b.py", "requests"]
			.iter()
			.map(|id| state.index_of(id).unwrap())
			.collect();

		// No selection: everything active.
		assert!(all.iter().all(|&idx| state.node_active(idx)));
		assert!(state.edges.iter().all(|e| state.edge_active(e)));

		// Select a.py: src and requests are adjacent, b.py is not.
		state.select(state.index_of("src/a.py"));
		assert!(state.node_active(state.index_of("src/a.py").unwrap()));
		assert!(state.node_active(state.index_of("src").unwrap()));
		assert!(state.node_active(state.index_of("requests").unwrap()));
		assert!(!state.node_active(state.index_of("src/b.py").unwrap()));
		let muted_edges = state
			.edges
			.iter()
			.filter(|e| !state.edge_active(e))
			.count();
		assert_eq!(muted_edges, 1);

		// Deselect: the exact pre-selection state is restored.
		state.select(None);
		assert!(all.iter().all(|&idx| state.node_active(idx)));
		assert!(state.edges.iter().all(|e| state.edge_active(e)));
	}

	#[test]
	fn force_layout_freezes_after_settle_budget() {
		let mut state = built(LayoutMode::Force);
		assert!(state.animation_running);
		for _ in 0..SETTLE_TICKS {
			state.tick(0.016);
		}
		assert!(!state.animation_running);
		// Further ticks stay frozen.
		state.tick(0.016);
		assert!(!state.animation_running);
	}

	#[test]
	fn hierarchical_layout_runs_no_physics() {
		let state = built(LayoutMode::Hierarchical);
		assert!(!state.animation_running);
		let mut anchored = 0;
		state.graph.visit_nodes(|node| {
			if node.data.is_anchor {
				anchored += 1;
			}
		});
		assert_eq!(anchored, 4);
	}

	#[test]
	fn zoom_steps_multiply_and_clamp() {
		let mut state = built(LayoutMode::Hierarchical);
		let k0 = state.transform.k;
		state.zoom_step(layout::ZOOM_STEP);
		assert!((state.transform.k - k0 * layout::ZOOM_STEP).abs() < 1e-9);
		state.zoom_step(1.0 / layout::ZOOM_STEP);
		assert!((state.transform.k - k0).abs() < 1e-9);

		for _ in 0..100 {
			state.zoom_step(layout::ZOOM_STEP);
		}
		assert!(state.transform.k <= layout::MAX_ZOOM);
		for _ in 0..200 {
			state.zoom_step(1.0 / layout::ZOOM_STEP);
		}
		assert!(state.transform.k >= layout::MIN_ZOOM);
	}

	#[test]
	fn rebuild_clears_selection() {
		let mut state = built(LayoutMode::Force);
		state.select(state.index_of("src"));
		state.rebuild(&snapshot(), LayoutMode::Force);
		assert_eq!(state.selected, None);
	}

	#[test]
	fn multiple_edge_count_becomes_a_label() {
		let data = GraphSnapshot {
			nodes: vec![
				GraphNode {
					id: "a".into(),
					label: "a".into(),
					node_type: NodeType::File,
					level: None,
				},
				GraphNode {
					id: "b".into(),
					label: "b".into(),
					node_type: NodeType::File,
					level: None,
				},
			],
			edges: vec![GraphEdge {
				source: "a".into(),
				target: "b".into(),
				relation: EdgeRelation::Multiple,
				count: Some(3),
				label: None,
			}],
		};
		let mut state = GraphViewState::new(800.0, 600.0);
		state.rebuild(&data, LayoutMode::Force);
		assert_eq!(state.edges[0].label.as_deref(), Some("x3"));
	}
}
