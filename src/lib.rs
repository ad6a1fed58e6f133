//! repograph: interactive dependency-graph visualization and Q&A for source
//! repositories.
//!
//! This crate is a WASM client application. A user submits a repository URL
//! on the landing page; the backend clones and analyzes it, and the combined
//! view renders the resulting file/import/package graph on a canvas next to a
//! conversational panel grounded in the same repository's context.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::{Route, Router, Routes};
use leptos_router::path;
use log::{Level, info};

pub mod api;
pub mod components;
pub mod filter;
pub mod model;
pub mod pages;

pub use components::chat::ChatPanel;
pub use components::dependency_graph::DependencyGraph;
pub use filter::FilterState;
pub use model::{GraphEdge, GraphNode, GraphSnapshot};

use components::navbar::Navbar;
use pages::{GraphChat, Home, Uploader};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("repograph: logging initialized");
}

/// Main application component: navigation shell and routed pages.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="repograph" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Navbar />
			<main class="app-main">
				<Routes fallback=|| view! { <p class="not-found">"Page not found."</p> }>
					<Route path=path!("/") view=Home />
					<Route path=path!("/upload") view=Uploader />
					<Route path=path!("/graph-chat") view=GraphChat />
				</Routes>
			</main>
		</Router>
	}
}
