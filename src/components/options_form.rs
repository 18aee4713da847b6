//! Create form generated from the server's `OPTIONS` schema.

use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;
use log::{info, warn};

use super::notification::{Notice, Snackbar};
use super::progress::Progress;
use crate::api::{GraphKind, Method};
use crate::error::AppError;
use crate::form::{ControlKind, FieldErrors, FormField, FormSchema, FormValues};
use crate::query::use_query_client;
use crate::use_graph_api;

/// Loads the options for `kind` and renders a create form from them.
/// Owns the notice so it outlives a rebuilt form.
#[component]
pub fn OptionsForm(kind: GraphKind) -> impl IntoView {
	let api = use_graph_api();
	let client = use_query_client();
	let notice = RwSignal::new(None::<Notice>);
	let options = LocalResource::new(move || {
		let api = api.clone();
		// Refetch whenever someone invalidates this kind's options.
		let _ = client.generation(&kind.options_key());
		async move { api.options(kind).await }
	});

	view! {
		<Suspense fallback=|| view! { <Progress /> }>
			{move || Suspend::new(async move {
				let options = options.await?;
				let schema = FormSchema::from_options(&options, Method::Post);
				let title = (!options.name.is_empty()).then(|| view! { <h2>{options.name.clone()}</h2> });
				let about = (!options.description.is_empty())
					.then(|| view! { <p class="form-description">{options.description.clone()}</p> });
				Ok::<_, AppError>(view! {
					{title}
					{about}
					<SchemaForm kind schema notice />
				})
			})}
		</Suspense>
		<Snackbar notice />
	}
}

/// One labelled control for `form_field`, bound to `values`.
fn field_control(
	form_field: FormField,
	values: RwSignal<FormValues>,
	errors: RwSignal<FieldErrors>,
) -> impl IntoView {
	let name = form_field.name.clone();
	let input_id = format!("field-{name}");
	let label = form_field.label().to_owned();
	let required = form_field.field.required;
	let hint = form_field.hint();
	let error_name = name.clone();
	let error = move || errors.with(|e| e.get(&error_name).map(ToString::to_string));

	let control = match form_field.control() {
		ControlKind::Checkbox => {
			let name = name.clone();
			view! {
				<input
					id=input_id.clone()
					type="checkbox"
					prop:checked={
						let name = name.clone();
						move || values.with(|v| v.get(&name) == "true")
					}
					on:change=move |ev| {
						let checked = event_target_checked(&ev);
						values.update(|v| v.set(name.clone(), checked.to_string()));
					}
				/>
			}
				.into_any()
		}
		kind => {
			let (input_type, step) = match kind {
				ControlKind::Number { step } => ("number", Some(step)),
				_ => ("text", None),
			};
			let min = form_field.field.min.map(|m| m.to_string());
			let max = form_field.field.max.map(|m| m.to_string());
			let name = name.clone();
			view! {
				<input
					id=input_id.clone()
					type=input_type
					step=step
					min=min
					max=max
					required=required
					prop:value={
						let name = name.clone();
						move || values.with(|v| v.get(&name).to_owned())
					}
					on:input=move |ev| {
						let raw = event_target_value(&ev);
						values.update(|v| v.set(name.clone(), raw));
					}
				/>
			}
				.into_any()
		}
	};

	view! {
		<div class="form-field">
			<label for=input_id>{label} {required.then_some(" *")}</label>
			{control}
			{hint.map(|hint| view! { <small class="form-field__hint">{hint}</small> })}
			{move || error().map(|e| view! { <small class="form-field__error">{e}</small> })}
		</div>
	}
}

/// Form for an already-loaded schema. Validates locally, then posts the
/// record and invalidates the kind's list on success.
#[component]
fn SchemaForm(kind: GraphKind, schema: FormSchema, notice: RwSignal<Option<Notice>>) -> impl IntoView {
	let api = use_graph_api();
	let client = use_query_client();
	let values = RwSignal::new(FormValues::new());
	let errors = RwSignal::new(FieldErrors::default());
	let pending = RwSignal::new(false);

	if schema.is_empty() {
		return view! {
			<p class="form-empty">{format!("{} graphs cannot be created here.", kind.label())}</p>
		}
			.into_any();
	}

	let controls = schema
		.fields()
		.iter()
		.cloned()
		.map(|form_field| field_control(form_field, values, errors))
		.collect_view();

	let on_submit = move |ev: SubmitEvent| {
		ev.prevent_default();
		if pending.get_untracked() {
			return;
		}
		let record = match schema.validate(&values.get_untracked()) {
			Ok(record) => record,
			Err(field_errors) => {
				errors.set(field_errors);
				return;
			}
		};
		errors.set(FieldErrors::default());
		pending.set(true);

		let api = api.clone();
		spawn_local(async move {
			match api.create(kind, record).await {
				Ok(graph) => {
					info!("created {} graph {} (order {})", kind.label(), graph.id, graph.order);
					client.invalidate(&kind.query_key());
					values.update(FormValues::clear);
					notice.set(Some(Notice::success(
						"Graph created",
						format!("{} graph of order {} ({})", kind.label(), graph.order, graph.id),
					)));
				}
				Err(err) => {
					warn!("creating {} graph failed: {err}", kind.label());
					notice.set(Some(Notice::error("Could not create graph", err.to_string())));
				}
			}
			pending.set(false);
		});
	};

	view! {
		<form class="options-form" novalidate=true on:submit=on_submit>
			<div class="options-form__fields">{controls}</div>
			<div class="options-form__actions">
				<button type="submit" class="btn btn--primary" disabled=move || pending.get()>
					"Submit"
				</button>
			</div>
		</form>
	}
		.into_any()
}
