//! Visual encoding tables for the dependency graph.
//!
//! Every node type maps to a shape, a border/fill color pair, and a size
//! multiplier; every edge relation maps to a color and an arrow flag. The
//! tables are the single source of truth for the widget's appearance, so a
//! styling revision is a table edit rather than a code change.

use crate::model::{EdgeRelation, NodeType};

/// RGBA color representation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
	/// Red channel.
	pub r: u8,
	/// Green channel.
	pub g: u8,
	/// Blue channel.
	pub b: u8,
	/// Alpha, 0.0 to 1.0.
	pub a: f64,
}

impl Color {
	/// Opaque color from RGB channels.
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b, a: 1.0 }
	}

	/// Same color with the given alpha.
	pub fn with_alpha(self, a: f64) -> Self {
		Self { a, ..self }
	}

	/// Lighten the color by a factor (0.0 = unchanged, 1.0 = white).
	pub fn lighten(self, factor: f64) -> Self {
		let f = factor.clamp(0.0, 1.0);
		Self {
			r: (self.r as f64 + (255.0 - self.r as f64) * f) as u8,
			g: (self.g as f64 + (255.0 - self.g as f64) * f) as u8,
			b: (self.b as f64 + (255.0 - self.b as f64) * f) as u8,
			a: self.a,
		}
	}

	/// CSS string form, hex when opaque.
	pub fn to_css(self) -> String {
		if (self.a - 1.0).abs() < 0.001 {
			format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
		} else {
			format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
		}
	}
}

/// Border and fill pair for one node type.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeColors {
	/// Outline color.
	pub border: Color,
	/// Interior color.
	pub fill: Color,
}

/// Shape drawn for a node type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeShape {
	/// Axis-aligned square (directories).
	Square,
	/// Plain circle (files and unclassified nodes).
	Circle,
	/// Rotated square (imports).
	Diamond,
	/// Five-pointed star (packages).
	Star,
}

/// Shape for a node type.
pub fn node_shape(ty: NodeType) -> NodeShape {
	match ty {
		NodeType::Directory => NodeShape::Square,
		NodeType::File => NodeShape::Circle,
		NodeType::Import => NodeShape::Diamond,
		NodeType::Package => NodeShape::Star,
		NodeType::Unknown => NodeShape::Circle,
	}
}

/// Border/fill pair for a node type.
pub fn node_colors(ty: NodeType) -> NodeColors {
	match ty {
		NodeType::Directory => NodeColors {
			border: Color::rgb(255, 99, 71),
			fill: Color::rgb(255, 160, 122),
		},
		NodeType::File => NodeColors {
			border: Color::rgb(70, 130, 180),
			fill: Color::rgb(135, 206, 250),
		},
		NodeType::Import => NodeColors {
			border: Color::rgb(34, 139, 34),
			fill: Color::rgb(144, 238, 144),
		},
		NodeType::Package => NodeColors {
			border: Color::rgb(218, 165, 32),
			fill: Color::rgb(240, 230, 140),
		},
		NodeType::Unknown => NodeColors {
			border: Color::rgb(112, 128, 144),
			fill: Color::rgb(211, 211, 211),
		},
	}
}

/// Size multiplier for a node type, applied to the base radius. Reflects the
/// visual hierarchy: directory > file > package > import > unknown.
pub fn node_size(ty: NodeType) -> f64 {
	match ty {
		NodeType::Directory => 2.0,
		NodeType::File => 1.75,
		NodeType::Package => 1.5,
		NodeType::Import => 1.25,
		NodeType::Unknown => 1.0,
	}
}

/// Line color for an edge relation.
pub fn edge_color(rel: EdgeRelation) -> Color {
	match rel {
		EdgeRelation::Contains => Color::rgb(169, 169, 169),
		EdgeRelation::Imports => Color::rgb(65, 105, 225),
		EdgeRelation::Exports => Color::rgb(50, 205, 50),
		EdgeRelation::Multiple | EdgeRelation::Other => Color::rgb(80, 80, 80),
	}
}

/// Whether edges of this relation carry an arrowhead at the target. Only
/// `imports` is directed visually; containment and exports render unarrowed.
pub fn edge_arrowed(rel: EdgeRelation) -> bool {
	rel == EdgeRelation::Imports
}

/// Muted pair applied to non-adjacent nodes while a selection is active.
pub const DIM_NODE: NodeColors = NodeColors {
	border: Color::rgb(169, 169, 169),
	fill: Color::rgb(211, 211, 211),
};

/// Muted line color for non-adjacent edges while a selection is active.
pub const DIM_EDGE: Color = Color::rgb(211, 211, 211);

/// Label color for active nodes.
pub const LABEL: Color = Color::rgb(0, 0, 0);

/// Label color for dimmed nodes.
pub const DIM_LABEL: Color = Color::rgb(153, 153, 153);

/// Canvas background, center of the radial gradient.
pub const BACKGROUND_CENTER: Color = Color::rgb(255, 255, 255);

/// Canvas background, edge of the radial gradient.
pub const BACKGROUND_EDGE: Color = Color::rgb(240, 242, 245);
