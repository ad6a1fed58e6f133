//! Client-side visibility filtering of graph snapshots.
//!
//! [`apply`] computes the visible subgraph from the full snapshot and the
//! current [`FilterState`]. Filtering is pure and recomputed on every
//! keystroke or toggle; nothing here mutates the snapshot.
//!
//! The search term does not filter to exact matches only: matching nodes pull
//! in their surrounding context (ancestor directories of matching files, the
//! sources of `imports` edges into included nodes, the targets of `exports`
//! edges out of them) via a breadth-first closure.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::model::{EdgeRelation, GraphNode, GraphSnapshot, NodeType};

/// User-controlled visibility state for the graph view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterState {
	disabled_types: HashSet<NodeType>,
	/// Case-insensitive substring matched against node labels.
	pub search: String,
	/// Nodes whose level exceeds this are hidden outright. `None` shows all.
	pub max_level: Option<u32>,
}

impl FilterState {
	/// Whether nodes of `ty` are currently visible.
	pub fn is_enabled(&self, ty: NodeType) -> bool {
		!self.disabled_types.contains(&ty)
	}

	/// Flip visibility of one node type.
	pub fn toggle(&mut self, ty: NodeType) {
		if !self.disabled_types.remove(&ty) {
			self.disabled_types.insert(ty);
		}
	}

	fn level_allows(&self, node: &GraphNode) -> bool {
		match self.max_level {
			Some(max) => node.level_or_default() <= max,
			None => true,
		}
	}
}

/// Compute the visible subgraph for the given filter state.
///
/// Guarantees that every returned edge has both endpoints in the returned
/// node set, and that re-applying the same filter to its own output is a
/// no-op.
pub fn apply(snapshot: &GraphSnapshot, filter: &FilterState) -> GraphSnapshot {
	// The level mask runs first so over-threshold nodes can neither seed nor
	// be traversed by the search closure below.
	let leveled: Vec<&GraphNode> = snapshot
		.nodes
		.iter()
		.filter(|n| filter.level_allows(n))
		.collect();
	let by_id: HashMap<&str, &GraphNode> =
		leveled.iter().map(|n| (n.id.as_str(), *n)).collect();
	let edges: Vec<&crate::model::GraphEdge> = snapshot
		.edges
		.iter()
		.filter(|e| by_id.contains_key(e.source.as_str()) && by_id.contains_key(e.target.as_str()))
		.collect();

	let needle = filter.search.trim().to_lowercase();
	let matches = |n: &GraphNode| !needle.is_empty() && n.label.to_lowercase().contains(&needle);

	// Context closure around matching nodes. Closure membership overrides the
	// type toggles, so matches always come with their surroundings.
	let mut closure: HashSet<&str> = HashSet::new();
	if !needle.is_empty() {
		let mut queue: VecDeque<&str> = VecDeque::new();
		for node in &leveled {
			if matches(node) {
				closure.insert(node.id.as_str());
				queue.push_back(node.id.as_str());
			}
		}

		while let Some(id) = queue.pop_front() {
			let node = by_id[id];

			// Every ancestor directory implied by the file's path.
			if node.node_type == NodeType::File {
				let mut path = id;
				while let Some(cut) = path.rfind('/') {
					path = &path[..cut];
					if by_id.contains_key(path) && closure.insert(path) {
						queue.push_back(path);
					}
				}
			}

			for edge in &edges {
				if edge.relation == EdgeRelation::Imports && edge.target == id {
					let src = edge.source.as_str();
					if closure.insert(src) {
						queue.push_back(src);
					}
				}
				if edge.relation == EdgeRelation::Exports && edge.source == id {
					let tgt = edge.target.as_str();
					if closure.insert(tgt) {
						queue.push_back(tgt);
					}
				}
			}
		}
	}

	let included = |n: &GraphNode| {
		let base = filter.is_enabled(n.node_type) && (needle.is_empty() || matches(n));
		base || closure.contains(n.id.as_str())
	};

	let nodes: Vec<GraphNode> = leveled
		.iter()
		.copied()
		.filter(|n| included(n))
		.cloned()
		.collect();
	let visible: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let edges = edges
		.iter()
		.copied()
		.filter(|e| visible.contains(e.source.as_str()) && visible.contains(e.target.as_str()))
		.cloned()
		.collect();

	GraphSnapshot { nodes, edges }
}
