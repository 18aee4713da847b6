//! Leptos client-side app for generating, listing and drawing graphs.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

// Modules
mod api;
mod components;
mod config;
mod error;
mod form;
mod pages;
mod payload;
mod query;

use crate::api::GraphApi;
use crate::components::error_fallback::ErrorFallback;
use crate::components::nav_bar::NavBar;
use crate::config::ApiConfig;
use crate::query::provide_query_client;

// Top-Level pages
use crate::pages::graph_create::GraphCreatePage;
use crate::pages::graph_layout::GraphLayout;
use crate::pages::graph_list::GraphListPage;
use crate::pages::home::Home;
use crate::pages::not_found::NotFound;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("Logging initialized");
}

/// The API client provided by [`App`], or one built from the build-time config.
pub fn use_graph_api() -> GraphApi {
	use_context::<GraphApi>().unwrap_or_default()
}

/// Router for the home page, the graph section and 404's.
#[component]
pub fn App() -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();

	let config = ApiConfig::from_env();
	info!("graph API at {}", config.base_url);
	provide_context(GraphApi::new(config));
	provide_query_client();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Graph Studio" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<NavBar />
			<div class="app-body">
				<ErrorFallback>
					<Routes fallback=|| view! { <NotFound /> }>
						<Route path=path!("/") view=Home />
						<Route path=path!("/404") view=NotFound />
						<ParentRoute path=path!("/graph") view=GraphLayout>
							<Route path=path!("") view=|| view! { <Redirect path="/graph/list" /> } />
							<Route path=path!("list") view=GraphListPage />
							<Route path=path!("create") view=GraphCreatePage />
							<Route path=path!("create/:kind") view=GraphCreatePage />
						</ParentRoute>
					</Routes>
				</ErrorFallback>
			</div>
		</Router>
	}
}
