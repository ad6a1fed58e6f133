//! Chat panel over the uploaded repository.
//!
//! Fetches the opaque context object once on mount and resends it unmodified
//! with every query. Sending appends the user turn immediately, clears and
//! disables the input, and appends either the assistant turn or the fixed
//! error turn when the call resolves. Disabling the input while a query is
//! outstanding is what keeps the transcript strictly interleaved.

use leptos::prelude::*;
use serde_json::Value;
use wasm_bindgen_futures::spawn_local;

use super::markdown::{self, Block};
use super::transcript::{ChatTurn, Speaker, Transcript};
use crate::api;

/// Fixed user-visible message for a failed context fetch.
const CONTEXT_ERROR: &str = "Error fetching context";

/// Conversational Q&A panel.
#[component]
pub fn ChatPanel() -> impl IntoView {
	let (transcript, set_transcript) = signal(Transcript::default());
	let (input, set_input) = signal(String::new());
	let (awaiting, set_awaiting) = signal(false);
	let (context, set_context) = signal(None::<Value>);
	let (context_error, set_context_error) = signal(false);

	// One context fetch per mount.
	spawn_local(async move {
		match api::fetch_context().await {
			Ok(value) => set_context.set(Some(value)),
			Err(err) => {
				log::error!("context fetch failed: {err}");
				set_context_error.set(true);
			}
		}
	});

	let send = move || {
		if awaiting.get_untracked() {
			return;
		}
		let text = input.get_untracked().trim().to_string();
		if text.is_empty() {
			return;
		}

		set_transcript.update(|t| t.push_user(text.clone()));
		set_input.set(String::new());
		set_awaiting.set(true);

		let context = context
			.get_untracked()
			.unwrap_or_else(|| Value::Object(Default::default()));
		spawn_local(async move {
			match api::send_query(&text, &context).await {
				Ok(answer) => set_transcript.update(|t| t.push_assistant(answer.response)),
				Err(err) => {
					log::error!("query failed: {err}");
					set_transcript.update(|t| t.push_error());
				}
			}
			set_awaiting.set(false);
		});
	};

	let send_click = send;

	view! {
		<div class="chat-panel">
			<Show when=move || context_error.get()>
				<p class="chat-context-error">{CONTEXT_ERROR}</p>
			</Show>
			<div class="chat-transcript">
				{move || {
					transcript
						.get()
						.turns()
						.iter()
						.map(render_turn)
						.collect_view()
				}}
				<Show when=move || awaiting.get()>
					<p class="chat-pending">"Thinking..."</p>
				</Show>
			</div>
			<div class="chat-input-row">
				<input
					type="text"
					class="chat-input"
					placeholder="Ask a question about the codebase"
					prop:value=move || input.get()
					prop:disabled=move || awaiting.get()
					on:input=move |ev| set_input.set(event_target_value(&ev))
					on:keydown=move |ev: web_sys::KeyboardEvent| {
						if ev.key() == "Enter" {
							send();
						}
					}
				/>
				<button
					class="chat-send"
					prop:disabled=move || awaiting.get()
					on:click=move |_| send_click()
				>
					"Ask"
				</button>
			</div>
		</div>
	}
}

fn render_turn(turn: &ChatTurn) -> AnyView {
	match turn.speaker {
		Speaker::User => view! {
			<div class="chat-turn chat-turn-user">
				<p>{turn.text.clone()}</p>
			</div>
		}
		.into_any(),
		Speaker::Assistant => {
			let blocks = markdown::parse_blocks(&turn.text);
			view! {
				<div class="chat-turn chat-turn-assistant">
					{blocks.into_iter().map(render_block).collect_view()}
				</div>
			}
			.into_any()
		}
	}
}

fn render_block(block: Block) -> AnyView {
	match block {
		Block::Code { language, text } => {
			let class = if language.is_empty() {
				"chat-code".to_string()
			} else {
				format!("chat-code language-{language}")
			};
			view! {
				<pre class="chat-code-block">
					<code class=class>{text}</code>
				</pre>
			}
			.into_any()
		}
		Block::OrderedList(items) => view! {
			<ol class="chat-list">
				{items.into_iter().map(|item| view! { <li>{item}</li> }).collect_view()}
			</ol>
		}
		.into_any(),
		Block::Paragraph(text) => view! { <p>{text}</p> }.into_any(),
	}
}
