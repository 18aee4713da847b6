use leptos::prelude::*;
use leptos_router::components::A;

/// Landing page.
#[component]
pub fn Home() -> impl IntoView {
	view! {
		<section class="home">
			<h1>"Graph Studio"</h1>
			<p class="subtitle">
				"Generate complete and circulant graphs, browse what has been generated, and draw any of them."
			</p>
			<div class="home__actions">
				<A href="/graph/list">"Browse graphs"</A>
				<A href="/graph/create">"Create a graph"</A>
			</div>
		</section>
	}
}
