//! Repository URL submission form.
//!
//! Shared by the landing page and the standalone `/upload` page. Posts the
//! URL to the backend and navigates to the combined graph+chat view on
//! success; on failure it shows the fixed error message and stays put.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::use_navigate;
use wasm_bindgen_futures::spawn_local;

use crate::api;

/// Fixed user-visible message for a failed upload.
const UPLOAD_ERROR: &str = "Error uploading repository";

/// Input and submit button for a repository URL.
#[component]
pub fn UploadForm() -> impl IntoView {
	let (repo_url, set_repo_url) = signal(String::new());
	let (message, set_message) = signal(String::new());
	let (busy, set_busy) = signal(false);
	let navigate = use_navigate();

	let submit = move || {
		if busy.get_untracked() {
			return;
		}
		let url = repo_url.get_untracked().trim().to_string();
		if url.is_empty() {
			return;
		}
		set_busy.set(true);
		let navigate = navigate.clone();
		spawn_local(async move {
			match api::upload_repository(&url).await {
				Ok(ack) => {
					set_message.set(ack.message);
					navigate("/graph-chat", NavigateOptions::default());
				}
				Err(err) => {
					log::error!("upload failed: {err}");
					set_message.set(UPLOAD_ERROR.to_string());
					set_busy.set(false);
				}
			}
		});
	};

	let submit_click = submit.clone();

	view! {
		<div class="upload-form">
			<input
				type="text"
				class="upload-input"
				placeholder="Enter GitHub repository URL"
				prop:value=move || repo_url.get()
				prop:disabled=move || busy.get()
				on:input=move |ev| set_repo_url.set(event_target_value(&ev))
				on:keydown=move |ev: web_sys::KeyboardEvent| {
					if ev.key() == "Enter" {
						submit();
					}
				}
			/>
			<button
				class="upload-button"
				prop:disabled=move || busy.get()
				on:click=move |_| submit_click()
			>
				"Upload Repository"
			</button>
			<p class="upload-message">{move || message.get()}</p>
		</div>
	}
}
