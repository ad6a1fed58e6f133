//! Top navigation bar.

use leptos::prelude::*;
use leptos_router::components::A;

/// Navigation links to the routed pages.
#[component]
pub fn Navbar() -> impl IntoView {
	view! {
		<nav class="navbar">
			<span class="navbar-brand">"repograph"</span>
			<A href="/">"Home"</A>
			<A href="/upload">"Upload"</A>
			<A href="/graph-chat">"Graph + Chat"</A>
		</nav>
	}
}
