use leptos::prelude::*;
use leptos_router::components::A;

/// One entry of the section sidebar.
#[derive(Clone, Debug, PartialEq)]
pub struct SideBarLink {
	pub text: &'static str,
	pub link: &'static str,
	pub icon: &'static str,
}

/// Vertical link list; each `link` is appended to `base_url`.
#[component]
pub fn SideBar(base_url: &'static str, links: Vec<SideBarLink>) -> impl IntoView {
	view! {
		<nav class="sidebar" aria-label="sidebar">
			<ul>
				{links
					.into_iter()
					.map(|entry| {
						view! {
							<li>
								<A href=format!("{base_url}{}", entry.link)>
									<span class="sidebar__icon" aria-hidden="true">{entry.icon}</span>
									<span>{entry.text}</span>
								</A>
							</li>
						}
					})
					.collect_view()}
			</ul>
		</nav>
	}
}
