use leptos::prelude::*;

/// Indeterminate spinner shown while a query is loading.
#[component]
pub fn Progress() -> impl IntoView {
	view! { <div class="progress" role="progressbar" aria-busy="true"></div> }
}
