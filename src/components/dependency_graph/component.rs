//! Leptos component wrapping the dependency graph canvas.
//!
//! The component fetches the snapshot once on mount, derives the visible
//! subgraph from the filter state, and owns the graph controller for its
//! lifetime: acquired when the canvas mounts, stopped on unmount. Mouse and
//! wheel handlers mutate the controller directly; an animation loop runs via
//! `requestAnimationFrame`, advancing the physics and redrawing each frame.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::layout::ZOOM_STEP;
use super::legend::Legend;
use super::render;
use super::scale::ScaleConfig;
use super::state::{GraphViewState, LayoutMode};
use crate::api;
use crate::filter::{self, FilterState};
use crate::model::GraphSnapshot;

/// Fixed user-visible message for a failed graph fetch.
const FETCH_ERROR: &str = "Error fetching graph data";

type SharedController = Rc<RefCell<Option<GraphViewState>>>;

/// Interactive dependency graph widget with search, type filtering, depth
/// limiting, layout switching, and camera controls.
#[component]
pub fn DependencyGraph(
	/// Bumped by the page shell whenever the containing pane changes size.
	#[prop(into)]
	resize_epoch: Signal<u64>,
) -> impl IntoView {
	let (snapshot, set_snapshot) = signal(None::<GraphSnapshot>);
	let (error, set_error) = signal(None::<&'static str>);
	let (layout_mode, set_layout_mode) = signal(LayoutMode::Force);
	let filter_state = RwSignal::new(FilterState::default());

	// One graph fetch per mount.
	spawn_local(async move {
		match api::fetch_dependency_graph().await {
			Ok(data) => set_snapshot.set(Some(data)),
			Err(err) => {
				log::error!("dependency graph fetch failed: {err}");
				set_error.set(Some(FETCH_ERROR));
			}
		}
	});

	let visible = Memo::new(move |_| match snapshot.get() {
		Some(data) => filter::apply(&data, &filter_state.get()),
		None => GraphSnapshot::default(),
	});

	let max_level = Memo::new(move |_| {
		snapshot
			.get()
			.map(|data| {
				data.nodes
					.iter()
					.map(|n| n.level_or_default())
					.max()
					.unwrap_or(1)
			})
			.unwrap_or(1)
	});

	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let controller: SharedController = Rc::new(RefCell::new(None));
	let animate: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
	let alive = Rc::new(Cell::new(true));

	// Mount: size the canvas to its container, acquire the controller, start
	// the animation loop.
	{
		let (controller, animate, alive) = (controller.clone(), animate.clone(), alive.clone());
		Effect::new(move |_| {
			let Some(canvas) = canvas_ref.get() else {
				return;
			};
			if controller.borrow().is_some() {
				return;
			}
			let canvas: HtmlCanvasElement = canvas.into();
			let (w, h) = container_size(&canvas);
			canvas.set_width(w as u32);
			canvas.set_height(h as u32);

			let ctx: CanvasRenderingContext2d = canvas
				.get_context("2d")
				.unwrap()
				.unwrap()
				.dyn_into()
				.unwrap();

			let mut state = GraphViewState::new(w, h);
			state.rebuild(&visible.get_untracked(), layout_mode.get_untracked());
			*controller.borrow_mut() = Some(state);

			let config = ScaleConfig::default();
			let (controller_anim, animate_inner, alive_anim) =
				(controller.clone(), animate.clone(), alive.clone());
			*animate.borrow_mut() = Some(Closure::new(move || {
				if !alive_anim.get() {
					return;
				}
				if let Some(ref mut c) = *controller_anim.borrow_mut() {
					c.tick(0.016);
					render::render(c, &ctx, &config);
				}
				if let Some(ref cb) = *animate_inner.borrow() {
					let _ = web_sys::window()
						.unwrap()
						.request_animation_frame(cb.as_ref().unchecked_ref());
				}
			}));
			if let Some(ref cb) = *animate.borrow() {
				let _ = web_sys::window()
					.unwrap()
					.request_animation_frame(cb.as_ref().unchecked_ref());
			}
		});
	}

	// Rebuild the simulation whenever the visible subgraph or layout changes.
	{
		let controller = controller.clone();
		Effect::new(move |_| {
			let data = visible.get();
			let mode = layout_mode.get();
			if let Some(ref mut c) = *controller.borrow_mut() {
				c.rebuild(&data, mode);
			}
		});
	}

	// Re-read container dimensions when the page shell reports a resize.
	{
		let controller = controller.clone();
		Effect::new(move |_| {
			let _ = resize_epoch.get();
			let Some(canvas) = canvas_ref.get() else {
				return;
			};
			let canvas: HtmlCanvasElement = canvas.into();
			if let Some(ref mut c) = *controller.borrow_mut() {
				let (w, h) = container_size(&canvas);
				canvas.set_width(w as u32);
				canvas.set_height(h as u32);
				c.resize(w, h);
			}
		});
	}

	{
		let alive = SendWrapper::new(alive.clone());
		on_cleanup(move || alive.set(false));
	}

	let config = ScaleConfig::default();

	let controller_md = controller.clone();
	let config_md = config.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *controller_md.borrow_mut() {
			if let Some(idx) = c.node_at_position(x, y, &config_md) {
				c.select(Some(idx));
				c.drag.active = true;
				c.drag.node_idx = Some(idx);
				c.drag.start_x = x;
				c.drag.start_y = y;
				c.graph.visit_nodes(|node| {
					if node.index() == idx {
						c.drag.node_start_x = node.x();
						c.drag.node_start_y = node.y();
					}
				});
			} else {
				c.select(None);
				c.pan.active = true;
				c.pan.start_x = x;
				c.pan.start_y = y;
				c.pan.transform_start_x = c.transform.x;
				c.pan.transform_start_y = c.transform.y;
			}
		}
	};

	let controller_mm = controller.clone();
	let config_mm = config.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *controller_mm.borrow_mut() {
			if !c.drag.active && !c.pan.active {
				c.hovered = c.node_at_position(x, y, &config_mm);
			}

			if c.drag.active {
				if let Some(idx) = c.drag.node_idx {
					let (dx, dy) = (
						(x - c.drag.start_x) / c.transform.k,
						(y - c.drag.start_y) / c.transform.k,
					);
					let (nx, ny) = (
						c.drag.node_start_x + dx as f32,
						c.drag.node_start_y + dy as f32,
					);
					c.graph.visit_nodes_mut(|node| {
						if node.index() == idx {
							node.data.x = nx;
							node.data.y = ny;
							node.data.is_anchor = true;
						}
					});
				}
			} else if c.pan.active {
				c.transform.x = c.pan.transform_start_x + (x - c.pan.start_x);
				c.transform.y = c.pan.transform_start_y + (y - c.pan.start_y);
			}
		}
	};

	let controller_mu = controller.clone();
	let on_mouseup = move |_: MouseEvent| {
		if let Some(ref mut c) = *controller_mu.borrow_mut() {
			c.drag.active = false;
			c.drag.node_idx = None;
			c.pan.active = false;
		}
	};

	let controller_ml = controller.clone();
	let on_mouseleave = move |_: MouseEvent| {
		if let Some(ref mut c) = *controller_ml.borrow_mut() {
			c.drag.active = false;
			c.drag.node_idx = None;
			c.pan.active = false;
			c.hovered = None;
		}
	};

	let controller_wh = controller.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		let canvas: HtmlCanvasElement = canvas_ref.get().unwrap().into();
		let rect = canvas.get_bounding_client_rect();
		let (x, y) = (
			ev.client_x() as f64 - rect.left(),
			ev.client_y() as f64 - rect.top(),
		);

		if let Some(ref mut c) = *controller_wh.borrow_mut() {
			let factor = if ev.delta_y() > 0.0 { 0.9 } else { 1.1 };
			c.zoom_at(x, y, factor);
		}
	};

	let controller_fit = controller.clone();
	let controller_in = controller.clone();
	let controller_out = controller.clone();

	view! {
		<div class="graph-widget">
			<canvas
				node_ref=canvas_ref
				class="graph-canvas"
				on:mousedown=on_mousedown
				on:mousemove=on_mousemove
				on:mouseup=on_mouseup
				on:mouseleave=on_mouseleave
				on:wheel=on_wheel
			/>
			<div class="graph-toolbar">
				<input
					type="text"
					class="graph-search"
					placeholder="Search nodes..."
					prop:value=move || filter_state.get().search
					on:input=move |ev| {
						let value = event_target_value(&ev);
						filter_state.update(|f| f.search = value);
					}
				/>
				<select
					class="graph-layout-select"
					title="Layout"
					on:change=move |ev| {
						set_layout_mode.set(match event_target_value(&ev).as_str() {
							"hierarchical" => LayoutMode::Hierarchical,
							_ => LayoutMode::Force,
						});
					}
				>
					<option value="force">"Force"</option>
					<option value="hierarchical">"Hierarchical"</option>
				</select>
				<Show when=move || { max_level.get() > 1 }>
					<label class="graph-depth">
						"Depth"
						<input
							type="range"
							min="1"
							max=move || max_level.get().to_string()
							prop:value=move || {
								filter_state
									.get()
									.max_level
									.unwrap_or_else(|| max_level.get())
									.to_string()
							}
							on:input=move |ev| {
								if let Ok(value) = event_target_value(&ev).parse::<u32>() {
									filter_state.update(|f| f.max_level = Some(value));
								}
							}
						/>
					</label>
				</Show>
				<button
					title="Fit graph"
					on:click=move |_| {
						if let Some(ref mut c) = *controller_fit.borrow_mut() {
							c.fit();
						}
					}
				>
					"Fit"
				</button>
				<button
					title="Zoom in"
					on:click=move |_| {
						if let Some(ref mut c) = *controller_in.borrow_mut() {
							c.zoom_step(ZOOM_STEP);
						}
					}
				>
					"+"
				</button>
				<button
					title="Zoom out"
					on:click=move |_| {
						if let Some(ref mut c) = *controller_out.borrow_mut() {
							c.zoom_step(1.0 / ZOOM_STEP);
						}
					}
				>
					"-"
				</button>
			</div>
			<Legend filter=filter_state />
			{move || {
				error
					.get()
					.map(|msg| view! { <p class="graph-error">{msg}</p> })
			}}
			<Show when=move || snapshot.get().is_none() && error.get().is_none()>
				<p class="graph-loading">"Loading graph..."</p>
			</Show>
		</div>
	}
}

fn container_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
	canvas
		.parent_element()
		.map(|p| (p.client_width() as f64, p.client_height() as f64))
		.filter(|&(w, h)| w > 0.0 && h > 0.0)
		.unwrap_or((800.0, 600.0))
}
