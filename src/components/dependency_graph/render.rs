//! Canvas rendering for the dependency graph.
//!
//! Drawing happens in passes for correct z-ordering: background, then edges,
//! then muted nodes, then active nodes on top. All colors come from the
//! encoding tables in [`theme`]; whether an element renders muted is derived
//! from the current selection each frame, so deselection restores the
//! original appearance exactly.

use std::collections::HashMap;
use std::f64::consts::PI;

use force_graph::DefaultNodeIdx;
use web_sys::CanvasRenderingContext2d;

use super::scale::{ScaleConfig, ScaledValues};
use super::state::{EdgeVisual, GraphViewState};
use super::theme::{self, NodeShape};

/// Renders the complete graph to the canvas.
pub fn render(state: &GraphViewState, ctx: &CanvasRenderingContext2d, config: &ScaleConfig) {
	let scale = ScaledValues::new(config, state.transform.k);

	draw_background(state, ctx);

	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);

	let positions = node_positions(state);
	for edge in &state.edges {
		draw_edge(state, ctx, &scale, &positions, edge);
	}
	draw_nodes(state, ctx, &scale);

	ctx.restore();
}

struct NodePoint {
	x: f64,
	y: f64,
	size: f64,
}

fn node_positions(state: &GraphViewState) -> HashMap<DefaultNodeIdx, NodePoint> {
	let mut positions = HashMap::new();
	state.graph.visit_nodes(|node| {
		positions.insert(
			node.index(),
			NodePoint {
				x: node.x() as f64,
				y: node.y() as f64,
				size: node.data.user_data.size,
			},
		);
	});
	positions
}

fn draw_background(state: &GraphViewState, ctx: &CanvasRenderingContext2d) {
	let gradient = ctx
		.create_radial_gradient(
			state.width / 2.0,
			state.height / 2.0,
			0.0,
			state.width / 2.0,
			state.height / 2.0,
			state.width.max(state.height) * 0.8,
		)
		.unwrap();

	gradient
		.add_color_stop(0.0, &theme::BACKGROUND_CENTER.to_css())
		.unwrap();
	gradient
		.add_color_stop(1.0, &theme::BACKGROUND_EDGE.to_css())
		.unwrap();

	#[allow(deprecated)]
	ctx.set_fill_style(&gradient);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
}

fn draw_edge(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	positions: &HashMap<DefaultNodeIdx, NodePoint>,
	edge: &EdgeVisual,
) {
	let (Some(p1), Some(p2)) = (positions.get(&edge.from), positions.get(&edge.to)) else {
		return;
	};
	let (dx, dy) = (p2.x - p1.x, p2.y - p1.y);
	let dist = (dx * dx + dy * dy).sqrt();
	if dist < 0.001 {
		return;
	}
	let (ux, uy) = (dx / dist, dy / dist);

	let active = state.edge_active(edge);
	let color = if active {
		theme::edge_color(edge.relation)
	} else {
		theme::DIM_EDGE
	};
	let arrowed = theme::edge_arrowed(edge.relation);

	// Trim the line to the node surfaces, leaving room for the arrowhead.
	let r1 = scale.node_radius * p1.size;
	let r2 = scale.node_radius * p2.size + if arrowed { scale.arrow_size } else { 0.0 };

	ctx.set_stroke_style_str(&color.to_css());
	ctx.set_line_width(scale.edge_line_width);
	ctx.begin_path();
	ctx.move_to(p1.x + ux * r1, p1.y + uy * r1);
	ctx.line_to(p2.x - ux * r2, p2.y - uy * r2);
	ctx.stroke();

	if arrowed {
		let tip_r = scale.node_radius * p2.size;
		let (tip_x, tip_y) = (p2.x - ux * tip_r, p2.y - uy * tip_r);
		let (back_x, back_y) = (tip_x - ux * scale.arrow_size, tip_y - uy * scale.arrow_size);
		let (px, py) = (-uy * scale.arrow_size * 0.5, ux * scale.arrow_size * 0.5);

		ctx.set_fill_style_str(&color.to_css());
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}

	if let Some(label) = &edge.label {
		let label_color = if active { theme::LABEL } else { theme::DIM_LABEL };
		ctx.set_fill_style_str(&label_color.with_alpha(0.85).to_css());
		ctx.set_font(&scale.label_font);
		ctx.set_text_align("center");
		let (mx, my) = ((p1.x + p2.x) / 2.0, (p1.y + p2.y) / 2.0);
		let _ = ctx.fill_text(label, mx, my - 4.0 / scale.k.max(0.5));
	}
}

fn draw_nodes(state: &GraphViewState, ctx: &CanvasRenderingContext2d, scale: &ScaledValues) {
	// Muted nodes first, active nodes on top.
	state.graph.visit_nodes(|node| {
		if !state.node_active(node.index()) {
			draw_node(state, ctx, scale, node, false);
		}
	});
	state.graph.visit_nodes(|node| {
		if state.node_active(node.index()) {
			draw_node(state, ctx, scale, node, true);
		}
	});
}

fn draw_node(
	state: &GraphViewState,
	ctx: &CanvasRenderingContext2d,
	scale: &ScaledValues,
	node: &force_graph::Node<super::state::NodeVisual>,
	active: bool,
) {
	let idx = node.index();
	let visual = &node.data.user_data;
	let (x, y) = (node.x() as f64, node.y() as f64);
	let radius = scale.node_radius * visual.size;

	let colors = if active {
		theme::node_colors(visual.node_type)
	} else {
		theme::DIM_NODE
	};
	let hovered = state.hovered == Some(idx);
	let fill = if hovered { colors.fill.lighten(0.15) } else { colors.fill };

	ctx.begin_path();
	trace_shape(ctx, theme::node_shape(visual.node_type), x, y, radius);
	ctx.set_fill_style_str(&fill.to_css());
	ctx.fill();
	ctx.set_stroke_style_str(&colors.border.to_css());
	ctx.set_line_width(if hovered { 3.5 } else { 2.0 } / scale.k);
	ctx.stroke();

	if !visual.label.is_empty() {
		let label_color = if active { theme::LABEL } else { theme::DIM_LABEL };
		ctx.set_fill_style_str(&label_color.to_css());
		ctx.set_font(&scale.label_font);
		ctx.set_text_align("center");
		let gap = 14.0 / scale.k.max(0.5);
		let _ = ctx.fill_text(&visual.label, x, y + radius + gap);
	}
}

fn trace_shape(ctx: &CanvasRenderingContext2d, shape: NodeShape, x: f64, y: f64, r: f64) {
	match shape {
		NodeShape::Circle => {
			let _ = ctx.arc(x, y, r, 0.0, 2.0 * PI);
		}
		NodeShape::Square => {
			let half = r * 0.85;
			ctx.rect(x - half, y - half, half * 2.0, half * 2.0);
		}
		NodeShape::Diamond => {
			ctx.move_to(x, y - r);
			ctx.line_to(x + r, y);
			ctx.line_to(x, y + r);
			ctx.line_to(x - r, y);
			ctx.close_path();
		}
		NodeShape::Star => {
			for i in 0..10 {
				let angle = -PI / 2.0 + (i as f64) * PI / 5.0;
				let radius = if i % 2 == 0 { r } else { r * 0.45 };
				let (sx, sy) = (x + radius * angle.cos(), y + radius * angle.sin());
				if i == 0 {
					ctx.move_to(sx, sy);
				} else {
					ctx.line_to(sx, sy);
				}
			}
			ctx.close_path();
		}
	}
}
