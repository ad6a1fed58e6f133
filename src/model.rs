//! Wire-format data model for dependency graph snapshots.
//!
//! A snapshot is produced wholesale by the backend per uploaded repository and
//! is immutable on the client; re-fetching replaces it as a single value.
//! Unrecognized type and relation tags fall back to catch-all variants so a
//! newer backend never turns into a client-side error.

use serde::Deserialize;

/// Classification of a graph entity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
	/// A directory in the repository tree.
	Directory,
	/// A source file.
	File,
	/// An imported symbol or module.
	Import,
	/// An external package dependency.
	Package,
	/// Anything the backend did not classify.
	#[default]
	#[serde(other)]
	Unknown,
}

impl NodeType {
	/// All node types, in legend/display order.
	pub const ALL: [NodeType; 5] = [
		NodeType::Directory,
		NodeType::File,
		NodeType::Import,
		NodeType::Package,
		NodeType::Unknown,
	];

	/// Human-readable name shown in the legend.
	pub fn display_name(self) -> &'static str {
		match self {
			NodeType::Directory => "Directory",
			NodeType::File => "File",
			NodeType::Import => "Import",
			NodeType::Package => "Package",
			NodeType::Unknown => "Unknown",
		}
	}
}

/// Classification of a graph edge.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeRelation {
	/// Directory-to-child containment.
	Contains,
	/// Source imports target.
	Imports,
	/// Source exports target.
	Exports,
	/// A collapsed multi-edge; `count` carries the aggregate.
	Multiple,
	/// Anything the backend did not classify.
	#[default]
	#[serde(other)]
	Other,
}

/// A node in the dependency graph.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphNode {
	/// Unique identifier within a snapshot. File and directory ids are
	/// `/`-separated paths.
	pub id: String,
	/// Display label.
	#[serde(default)]
	pub label: String,
	/// Entity classification.
	#[serde(rename = "type", default)]
	pub node_type: NodeType,
	/// Optional nesting depth, 1-based. Absent means top level.
	#[serde(default)]
	pub level: Option<u32>,
}

impl GraphNode {
	/// Declared level, defaulting to the top level when absent.
	pub fn level_or_default(&self) -> u32 {
		self.level.unwrap_or(1)
	}
}

/// A directed edge between two nodes, identified by node ids.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphEdge {
	/// Source node id.
	pub source: String,
	/// Target node id.
	pub target: String,
	/// Edge classification.
	#[serde(default)]
	pub relation: EdgeRelation,
	/// Aggregate count for collapsed multi-edges.
	#[serde(default)]
	pub count: Option<u64>,
	/// Optional display label.
	#[serde(default)]
	pub label: Option<String>,
}

/// Complete graph snapshot: node set plus edge set from one fetch.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GraphSnapshot {
	/// All nodes in the snapshot.
	pub nodes: Vec<GraphNode>,
	/// All edges in the snapshot. Edges may reference dropped nodes; the
	/// visibility filter excludes those rather than erroring.
	pub edges: Vec<GraphEdge>,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_a_full_snapshot() {
		let json = r#"{
			"nodes": [
				{"id": "src", "label": "src", "type": "directory", "level": 1},
				{"id": "src/main.py", "label": "main.py", "type": "file", "level": 2},
				{"id": "requests", "label": "requests", "type": "package"}
			],
			"edges": [
				{"source": "src", "target": "src/main.py", "relation": "contains"},
				{"source": "src/main.py", "target": "requests", "relation": "imports", "count": null, "label": "import requests"}
			]
		}"#;

		let snapshot: GraphSnapshot = serde_json::from_str(json).unwrap();
		assert_eq!(snapshot.nodes.len(), 3);
		assert_eq!(snapshot.nodes[0].node_type, NodeType::Directory);
		assert_eq!(snapshot.nodes[1].level, Some(2));
		assert_eq!(snapshot.nodes[2].level_or_default(), 1);
		assert_eq!(snapshot.edges[0].relation, EdgeRelation::Contains);
		assert_eq!(
			snapshot.edges[1].label.as_deref(),
			Some("import requests")
		);
	}

	#[test]
	fn unknown_tags_fall_back() {
		let node: GraphNode =
			serde_json::from_str(r#"{"id": "x", "label": "x", "type": "lambda"}"#).unwrap();
		assert_eq!(node.node_type, NodeType::Unknown);

		let edge: GraphEdge =
			serde_json::from_str(r#"{"source": "a", "target": "b", "relation": "summons"}"#)
				.unwrap();
		assert_eq!(edge.relation, EdgeRelation::Other);
	}

	#[test]
	fn missing_optional_fields_default() {
		let node: GraphNode = serde_json::from_str(r#"{"id": "a"}"#).unwrap();
		assert_eq!(node.label, "");
		assert_eq!(node.node_type, NodeType::Unknown);
		assert_eq!(node.level, None);

		let edge: GraphEdge =
			serde_json::from_str(r#"{"source": "a", "target": "b"}"#).unwrap();
		assert_eq!(edge.relation, EdgeRelation::Other);
		assert_eq!(edge.count, None);
		assert_eq!(edge.label, None);
	}

	#[test]
	fn multiple_relation_carries_count() {
		let edge: GraphEdge = serde_json::from_str(
			r#"{"source": "a", "target": "b", "relation": "multiple", "count": 4}"#,
		)
		.unwrap();
		assert_eq!(edge.relation, EdgeRelation::Multiple);
		assert_eq!(edge.count, Some(4));
	}
}
