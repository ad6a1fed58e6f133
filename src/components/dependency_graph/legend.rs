//! Collapsible legend panel.
//!
//! One row per node type with its color swatch; clicking a row toggles that
//! type's visibility in the shared filter state. The panel collapses to an
//! icon-sized header.

use leptos::prelude::*;

use super::theme;
use crate::filter::FilterState;
use crate::model::NodeType;

/// Legend panel overlaying the graph canvas.
#[component]
pub fn Legend(
	/// Shared filter state; rows toggle per-type visibility in place.
	filter: RwSignal<FilterState>,
) -> impl IntoView {
	let (minimized, set_minimized) = signal(false);

	view! {
		<div class="graph-legend">
			<div class="graph-legend-header">
				<span class="graph-legend-title">"Legend"</span>
				<button
					class="graph-legend-toggle"
					on:click=move |_| set_minimized.update(|m| *m = !*m)
				>
					{move || if minimized.get() { "+" } else { "-" }}
				</button>
			</div>
			<Show when=move || !minimized.get()>
				<div>
					{NodeType::ALL
						.iter()
						.map(|&ty| {
							let colors = theme::node_colors(ty);
							let swatch = format!(
								"background-color: {}; border-color: {};",
								colors.fill.to_css(),
								colors.border.to_css()
							);
							view! {
								<div
									class="graph-legend-row"
									on:click=move |_| filter.update(|f| f.toggle(ty))
								>
									<span
										class="graph-legend-swatch"
										style=swatch
										style:opacity=move || {
											if filter.get().is_enabled(ty) { "1" } else { "0.4" }
										}
									></span>
									{ty.display_name()}
								</div>
							}
						})
						.collect_view()}
				</div>
			</Show>
		</div>
	}
}
