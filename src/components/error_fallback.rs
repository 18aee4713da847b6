use leptos::prelude::*;

/// Error boundary that replaces its children with the caught errors.
///
/// Each error is shown with its message and debug representation, the closest
/// thing to a stack trace a WASM build has.
#[component]
pub fn ErrorFallback(children: Children) -> impl IntoView {
	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<section class="error-fallback">
					<h1>"Uh oh! Something went wrong!"</h1>
					<hr />
					<ul>
						{move || {
							errors
								.get()
								.into_iter()
								.map(|(_, e)| {
									view! {
										<li>
											<h2>{e.to_string()}</h2>
											<h3>"Details:"</h3>
											<pre>{format!("{e:?}")}</pre>
										</li>
									}
								})
								.collect_view()
						}}
					</ul>
				</section>
			}
		}>{children()}</ErrorBoundary>
	}
}
