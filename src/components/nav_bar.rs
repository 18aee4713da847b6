use leptos::prelude::*;
use leptos_router::components::A;

/// Top-level sections shown in the header.
const NAV_LINKS: &[(&str, &str)] = &[("GRAPH", "/graph")];

#[component]
pub fn NavBar() -> impl IntoView {
	view! {
		<header class="nav-bar">
			<A href="/">
				<span class="nav-bar__brand">"Graph Studio"</span>
			</A>
			<nav>
				{NAV_LINKS
					.iter()
					.map(|(name, href)| view! { <A href=*href>{*name}</A> })
					.collect_view()}
			</nav>
		</header>
	}
}
