use leptos::prelude::*;
use leptos_router::components::Outlet;

use crate::components::error_fallback::ErrorFallback;
use crate::components::sidebar::{SideBar, SideBarLink};

/// Shell of the `/graph` section: sidebar plus the active child route.
#[component]
pub fn GraphLayout() -> impl IntoView {
	let links = vec![
		SideBarLink {
			text: "List",
			link: "/list",
			icon: "☰",
		},
		SideBarLink {
			text: "Create",
			link: "/create",
			icon: "+",
		},
	];

	view! {
		<div class="graph-layout">
			<SideBar base_url="/graph" links />
			<main class="graph-layout__content">
				<ErrorFallback>
					<Outlet />
				</ErrorFallback>
			</main>
		</div>
	}
}
