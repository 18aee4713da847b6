//! Modal that fetches a graph's payload on demand and draws it.

use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{debug, warn};

use super::error_fallback::ErrorFallback;
use super::force_graph::{ForceGraphCanvas, GraphData, Layout};
use super::progress::Progress;
use crate::api::{GraphDetail, GraphKind};
use crate::error::AppError;
use crate::payload::decode_payload;
use crate::query::{QueryClient, use_query_client};
use crate::use_graph_api;

const CANVAS_SIZE: f64 = 600.0;

/// Abort whatever is still loading for graph `id` of `kind`.
fn cancel_render(client: QueryClient, kind: GraphKind, id: &str) -> usize {
	client.cancel(&kind.item_key(id))
}

/// What the dialog shows for a finished fetch. `None` leaves it as it is:
/// the fetch was refused as a duplicate or cancelled by closing.
fn render_outcome(
	fetched: Option<Result<GraphDetail, AppError>>,
) -> Option<Result<GraphData, AppError>> {
	match fetched? {
		Err(err) if err.is_cancelled() => None,
		result => Some(result.and_then(|detail| decode_payload(&detail.data))),
	}
}

/// Row action that opens a dialog rendering graph `id`.
///
/// Nothing is fetched until the dialog opens. Closing it, or unmounting the
/// row, cancels a fetch that is still in flight.
#[component]
pub fn GraphRenderDialog(kind: GraphKind, id: String) -> impl IntoView {
	let api = use_graph_api();
	let client = use_query_client();
	let key = StoredValue::new(kind.item_key(&id));
	let graph_id = StoredValue::new(id.clone());
	let open = RwSignal::new(false);
	let graph: RwSignal<Option<Result<GraphData, AppError>>> = RwSignal::new(None);
	let layout = RwSignal::new(Layout::Circle);
	let title_id = format!("render-dialog-title-{id}");

	let close = move || {
		open.set(false);
		if graph_id.with_value(|id| cancel_render(client, kind, id)) > 0 {
			// The cancelled request never fills `graph`; reopening fetches again.
			debug!("closed {} before it loaded", key.get_value());
		}
	};

	on_cleanup(move || {
		if let Some(id) = graph_id.try_get_value() {
			cancel_render(client, kind, &id);
		}
	});

	let on_open = move |_| {
		open.set(true);
		let key = key.get_value();
		if client.is_in_flight(&key) {
			return;
		}
		graph.set(None);
		let (api, id) = (api.clone(), id.clone());
		spawn_local(async move {
			let fetched = client
				.fetch(key.clone(), |signal| async move { api.get(kind, &id, signal.as_ref()).await })
				.await;
			if let Some(outcome) = render_outcome(fetched) {
				if let Err(err) = &outcome {
					warn!("could not render {key}: {err}");
				}
				let _ = graph.try_set(Some(outcome));
			}
		});
	};

	view! {
		<button class="icon-button" title="Render graph" on:click=on_open>
			"👁"
		</button>
		<Show when=move || open.get()>
			<div class="dialog-backdrop" on:click=move |_| close()>
				<div
					class="dialog"
					role="dialog"
					aria-labelledby=title_id.clone()
					on:click=|ev| ev.stop_propagation()
				>
					<header class="dialog__title">
						<h2 id=title_id.clone()>"Render graph"</h2>
						<button class="icon-button" aria-label="close" on:click=move |_| close()>
							"×"
						</button>
					</header>
					<div class="dialog__content">
						<ErrorFallback>
							{move || match graph.get() {
								None => Ok(view! { <Progress /> }.into_any()),
								Some(result) => {
									result
										.map(|data| {
											view! {
												<ForceGraphCanvas
													data=Signal::stored(data)
													width=CANVAS_SIZE
													height=CANVAS_SIZE
													layout=layout
												/>
											}
												.into_any()
										})
								}
							}}
						</ErrorFallback>
					</div>
					<footer class="dialog__actions">
						<label class="dialog__toggle">
							<input
								type="checkbox"
								prop:checked=move || layout.get() == Layout::Force
								on:change=move |ev| {
									let spread = event_target_checked(&ev);
									layout.set(if spread { Layout::Force } else { Layout::Circle });
								}
							/>
							"Spread by force"
						</label>
						<button class="btn" autofocus=true on:click=move |_| close()>
							"Close"
						</button>
					</footer>
				</div>
			</div>
		</Show>
	}
}

#[cfg(test)]
#[path = "render_dialog_test.rs"]
mod render_dialog_test;
