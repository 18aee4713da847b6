use leptos::prelude::*;
use leptos_router::hooks::use_params_map;

use crate::api::GraphKind;
use crate::components::options_form::OptionsForm;

/// Kind named by the route's `:kind` segment, kept in step with navigation.
fn preselected(slug: Signal<Option<String>>) -> Memo<Option<GraphKind>> {
	Memo::new(move |_| slug.with(|slug| slug.as_deref().and_then(GraphKind::from_slug)))
}

/// Kind selector with the selected kind's create form beneath it.
///
/// `/graph/create/:kind` preselects a kind.
#[component]
pub fn GraphCreatePage() -> impl IntoView {
	let params = use_params_map();
	let from_route = preselected(Signal::derive(move || params.with(|p| p.get("kind"))));
	let initial = from_route.get_untracked();
	let selected = RwSignal::new(initial);
	Effect::new(move |_| {
		let kind = from_route.get();
		if kind.is_some() && kind != selected.get_untracked() {
			selected.set(kind);
		}
	});

	view! {
		<header class="page-title">
			<h1>"Create Graph"</h1>
		</header>
		<label class="form-field" for="graph-type-select">
			"Type"
			<select
				id="graph-type-select"
				prop:value=move || selected.get().map(GraphKind::slug).unwrap_or_default()
				on:change=move |ev| {
					let choice = GraphKind::from_slug(&event_target_value(&ev));
					if choice.is_some() && choice != selected.get_untracked() {
						selected.set(choice);
					}
				}
			>
				<option value="" disabled=true selected=initial.is_none()>
					"Choose a graph type"
				</option>
				{[GraphKind::Complete, GraphKind::Circulant]
					.into_iter()
					.map(|kind| view! { <option value=kind.slug()>{kind.label()}</option> })
					.collect_view()}
			</select>
		</label>
		{move || {
			selected
				.get()
				.map(|kind| {
					view! {
						<section class="paper">
							<OptionsForm kind />
						</section>
					}
				})
		}}
	}
}

#[cfg(test)]
#[path = "graph_create_test.rs"]
mod graph_create_test;
