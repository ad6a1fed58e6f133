//! Landing page: repository upload front and center.

use leptos::prelude::*;

use crate::components::upload_form::UploadForm;

/// Landing screen with the repository URL form.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<div class="home-page">
			<h1 class="home-title">"repograph"</h1>
			<UploadForm />
			<p class="home-tagline">
				"Visualize and interact with the dependencies in your codebase."
			</p>
		</div>
	}
}
