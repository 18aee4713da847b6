use leptos::prelude::*;

#[component]
pub fn NotFound() -> impl IntoView {
	view! {
		<section class="not-found">
			<h1>"Error 404: Page not found"</h1>
		</section>
	}
}
