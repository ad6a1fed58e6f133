//! Combined graph and chat page.
//!
//! Two stacked panes split by a draggable divider. Dragging updates the graph
//! pane's height percentage within a clamped range; document-level move/up
//! listeners are attached on drag-start and removed on drag-end so nothing
//! leaks between drags. Height changes feed a debounced resize counter that
//! the graph widget subscribes to for re-reading its container dimensions.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::MouseEvent;

use crate::components::chat::ChatPanel;
use crate::components::dependency_graph::DependencyGraph;

/// Smallest allowed graph pane height, percent of the viewport.
const MIN_PANE_PERCENT: f64 = 20.0;

/// Largest allowed graph pane height, percent of the viewport.
const MAX_PANE_PERCENT: f64 = 80.0;

/// Quiet time after the last height change before the graph is notified.
const RESIZE_DEBOUNCE_MS: u32 = 100;

type PointerCallback = Rc<RefCell<Option<Closure<dyn FnMut(MouseEvent)>>>>;

/// Combined view: resizable dependency graph above, chat below.
#[component]
pub fn GraphChat() -> impl IntoView {
	let (graph_height, set_graph_height) = signal(70.0_f64);
	let (resize_epoch, set_resize_epoch) = signal(0_u64);

	// Debounced viewport-resize notification for the graph controller.
	let debounce: Rc<RefCell<Option<Timeout>>> = Rc::new(RefCell::new(None));
	{
		let debounce = debounce.clone();
		Effect::new(move |_| {
			let _ = graph_height.get();
			let timeout = Timeout::new(RESIZE_DEBOUNCE_MS, move || {
				set_resize_epoch.update(|epoch| *epoch += 1);
			});
			// Replacing the pending timeout cancels it.
			*debounce.borrow_mut() = Some(timeout);
		});
	}

	// Divider drag. The two document-level callbacks live for the component's
	// lifetime; only the listener registrations come and go with each drag.
	let origin = Rc::new(Cell::new((0.0_f64, 70.0_f64)));
	let move_cb: PointerCallback = Rc::new(RefCell::new(None));
	let up_cb: PointerCallback = Rc::new(RefCell::new(None));

	{
		let origin = origin.clone();
		*move_cb.borrow_mut() = Some(Closure::new(move |ev: MouseEvent| {
			let (start_y, start_height) = origin.get();
			let Some(viewport) = web_sys::window()
				.and_then(|w| w.inner_height().ok())
				.and_then(|h| h.as_f64())
			else {
				return;
			};
			let delta = (ev.client_y() as f64 - start_y) / viewport * 100.0;
			set_graph_height.set((start_height + delta).clamp(MIN_PANE_PERCENT, MAX_PANE_PERCENT));
		}));
	}

	{
		let (move_inner, up_inner) = (move_cb.clone(), up_cb.clone());
		*up_cb.borrow_mut() = Some(Closure::new(move |_: MouseEvent| {
			detach_listeners(&move_inner, &up_inner);
		}));
	}

	let on_divider_down = {
		let (origin, move_cb, up_cb) = (origin.clone(), move_cb.clone(), up_cb.clone());
		move |ev: MouseEvent| {
			ev.prevent_default();
			origin.set((ev.client_y() as f64, graph_height.get_untracked()));
			let Some(document) = web_sys::window().and_then(|w| w.document()) else {
				return;
			};
			if let Some(cb) = move_cb.borrow().as_ref() {
				let _ = document
					.add_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
			}
			if let Some(cb) = up_cb.borrow().as_ref() {
				let _ = document
					.add_event_listener_with_callback("mouseup", cb.as_ref().unchecked_ref());
			}
		}
	};

	{
		let guard = SendWrapper::new((move_cb.clone(), up_cb.clone()));
		on_cleanup(move || {
			let (move_cb, up_cb) = &*guard;
			detach_listeners(move_cb, up_cb);
			*move_cb.borrow_mut() = None;
			*up_cb.borrow_mut() = None;
		});
	}

	view! {
		<div class="graph-chat-page">
			<section
				class="graph-pane"
				style:height=move || format!("{}%", graph_height.get())
			>
				<h2 class="pane-title">"Dependency Graph"</h2>
				<div class="pane-body">
					<DependencyGraph resize_epoch=resize_epoch />
				</div>
			</section>
			<div class="pane-divider" on:mousedown=on_divider_down></div>
			<section
				class="chat-pane"
				style:height=move || format!("{}%", 100.0 - graph_height.get())
			>
				<h2 class="pane-title">"Chatbot"</h2>
				<ChatPanel />
			</section>
		</div>
	}
}

fn detach_listeners(move_cb: &PointerCallback, up_cb: &PointerCallback) {
	let Some(document) = web_sys::window().and_then(|w| w.document()) else {
		return;
	};
	if let Some(cb) = move_cb.borrow().as_ref() {
		let _ =
			document.remove_event_listener_with_callback("mousemove", cb.as_ref().unchecked_ref());
	}
	if let Some(cb) = up_cb.borrow().as_ref() {
		let _ =
			document.remove_event_listener_with_callback("mouseup", cb.as_ref().unchecked_ref());
	}
}
