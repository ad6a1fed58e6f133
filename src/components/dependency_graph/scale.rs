//! Zoom-dependent scaling for graph visuals.
//!
//! Centralizes how sizes behave as the zoom level `k` changes. World-space
//! values scale with zoom; screen-space values divide by `k` to counteract
//! the canvas transform and stay a constant pixel size.

/// Defines how a visual property scales with zoom level.
#[derive(Clone, Debug)]
#[allow(
	dead_code,
	reason = "World/Screen variants complete the API for users customizing ScaleConfig"
)]
pub enum ScaleBehavior {
	/// Constant world-space size. Appears larger when zoomed in.
	World,
	/// Constant screen-space size (pixels). Unaffected by zoom.
	Screen,
	/// World-space scaling, clamped to min/max screen-space bounds.
	Clamped {
		/// Lower bound on the rendered screen size, in pixels.
		min_screen: f64,
		/// Upper bound on the rendered screen size, in pixels.
		max_screen: f64,
	},
}

impl ScaleBehavior {
	/// Compute the world-space value for a given base value and zoom level.
	pub fn apply(&self, base: f64, k: f64) -> f64 {
		match self {
			ScaleBehavior::World => base,
			ScaleBehavior::Screen => base / k,
			ScaleBehavior::Clamped {
				min_screen,
				max_screen,
			} => {
				// screen_size = world_size * k, so bounds divide by k.
				let min_world = min_screen / k;
				let max_world = max_screen / k;
				base.clamp(min_world, max_world)
			}
		}
	}
}

/// Configuration for node visual scaling.
#[derive(Clone, Debug)]
pub struct NodeScaleConfig {
	/// Base node radius in world units, before the per-type multiplier.
	pub radius: f64,
	/// How the node radius scales with zoom.
	pub radius_behavior: ScaleBehavior,
	/// Hit detection radius in world units.
	pub hit_radius: f64,
	/// How hit radius scales with zoom.
	pub hit_behavior: ScaleBehavior,
	/// Label font size in screen pixels.
	pub label_size: f64,
	/// Minimum zoom level for label font scaling.
	pub label_min_k: f64,
}

/// Configuration for edge visual scaling.
#[derive(Clone, Debug)]
pub struct EdgeScaleConfig {
	/// Base line width in screen pixels.
	pub line_width: f64,
}

/// Configuration for arrowhead scaling.
#[derive(Clone, Debug)]
pub struct ArrowScaleConfig {
	/// Base arrow size in world units.
	pub size: f64,
	/// How arrow size scales with zoom.
	pub size_behavior: ScaleBehavior,
}

/// Complete scale configuration for all graph elements.
#[derive(Clone, Debug)]
pub struct ScaleConfig {
	/// Node sizing.
	pub node: NodeScaleConfig,
	/// Edge sizing.
	pub edge: EdgeScaleConfig,
	/// Arrowhead sizing.
	pub arrow: ArrowScaleConfig,
}

impl Default for ScaleConfig {
	fn default() -> Self {
		Self {
			node: NodeScaleConfig {
				radius: 10.0,
				radius_behavior: ScaleBehavior::Clamped {
					min_screen: 6.0,
					max_screen: f64::INFINITY,
				},
				hit_radius: 14.0,
				hit_behavior: ScaleBehavior::Clamped {
					min_screen: 8.0,
					max_screen: f64::INFINITY,
				},
				label_size: 12.0,
				label_min_k: 0.5,
			},
			edge: EdgeScaleConfig { line_width: 2.0 },
			arrow: ArrowScaleConfig {
				size: 8.0,
				size_behavior: ScaleBehavior::Clamped {
					min_screen: 0.0,
					max_screen: 20.0,
				},
			},
		}
	}
}

/// Pre-computed scale values for a specific zoom level.
///
/// Create this once per frame and pass it to rendering functions. All sizes
/// are in world-space, ready to use after the canvas transform.
#[derive(Clone, Debug)]
pub struct ScaledValues {
	/// Current zoom level.
	pub k: f64,
	/// Base node radius in world-space (multiply by the per-type size).
	pub node_radius: f64,
	/// Hit detection radius in world-space.
	pub hit_radius: f64,
	/// Label font string (e.g., "12px sans-serif").
	pub label_font: String,
	/// Edge line width in world-space.
	pub edge_line_width: f64,
	/// Arrowhead size in world-space.
	pub arrow_size: f64,
}

impl ScaledValues {
	/// Compute scaled values from configuration and current zoom level.
	pub fn new(config: &ScaleConfig, k: f64) -> Self {
		let label_font_size = config.node.label_size / k.max(config.node.label_min_k);
		Self {
			k,
			node_radius: config.node.radius_behavior.apply(config.node.radius, k),
			hit_radius: config.node.hit_behavior.apply(config.node.hit_radius, k),
			label_font: format!("{}px sans-serif", label_font_size),
			edge_line_width: config.edge.line_width / k,
			arrow_size: config.arrow.size_behavior.apply(config.arrow.size, k),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn clamped_behavior_bounds_screen_size() {
		let behavior = ScaleBehavior::Clamped {
			min_screen: 6.0,
			max_screen: 20.0,
		};
		// Zoomed far out, world size grows so the screen size stays >= 6px.
		let world = behavior.apply(10.0, 0.1);
		assert!((world * 0.1 - 6.0).abs() < 1e-9);
		// Zoomed far in, world size shrinks so the screen size stays <= 20px.
		let world = behavior.apply(10.0, 10.0);
		assert!((world * 10.0 - 20.0).abs() < 1e-9);
		// In between, the base value passes through.
		assert_eq!(behavior.apply(10.0, 1.0), 10.0);
	}

	#[test]
	fn screen_behavior_counteracts_zoom() {
		assert_eq!(ScaleBehavior::Screen.apply(2.0, 4.0), 0.5);
	}

	#[test]
	fn line_width_is_screen_space() {
		let scaled = ScaledValues::new(&ScaleConfig::default(), 2.0);
		assert_eq!(scaled.edge_line_width, 1.0);
	}
}
