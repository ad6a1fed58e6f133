//! Standalone uploader page.

use leptos::prelude::*;

use crate::components::upload_form::UploadForm;

/// Narrow, standalone variant of the upload form.
#[component]
pub fn Uploader() -> impl IntoView {
	view! {
		<div class="uploader-page">
			<UploadForm />
		</div>
	}
}
