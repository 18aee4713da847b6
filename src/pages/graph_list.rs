use leptos::prelude::*;

use crate::api::GraphKind;
use crate::components::error_fallback::ErrorFallback;
use crate::components::graph_table::GraphTable;
use crate::components::progress::Progress;
use crate::error::AppError;
use crate::query::use_query_client;
use crate::use_graph_api;

/// Every generated graph, one table per kind.
#[component]
pub fn GraphListPage() -> impl IntoView {
	view! {
		<header class="page-title">
			<h1>"Generated Graphs"</h1>
		</header>
		<div class="stack">
			{GraphKind::ALL
				.into_iter()
				.map(|kind| {
					view! {
						<ErrorFallback>
							<GraphListSection kind />
						</ErrorFallback>
						<hr />
					}
				})
				.collect_view()}
		</div>
	}
}

/// Table for one kind. Refetches when the kind's queries are invalidated.
#[component]
fn GraphListSection(kind: GraphKind) -> impl IntoView {
	let api = use_graph_api();
	let client = use_query_client();
	let page = LocalResource::new(move || {
		let api = api.clone();
		let _ = client.generation(&kind.query_key());
		async move { api.list(kind).await }
	});

	view! {
		<section class="paper">
			<h2>{kind.label()}</h2>
			<Suspense fallback=|| view! { <Progress /> }>
				{move || Suspend::new(async move {
					let page = page.await?;
					let coverage = page
						.coverage()
						.map(|text| view! { <p class="table-caption">{text}</p> });
					Ok::<_, AppError>(view! {
						<GraphTable kind rows=page.unique_results() />
						{coverage}
					})
				})}
			</Suspense>
		</section>
	}
}
