//! Tabular listing of one graph kind.

use leptos::prelude::*;
use serde_json::Value;

use super::render_dialog::GraphRenderDialog;
use crate::api::{Column, GraphKind, GraphSummary};

/// Display text for one cell. Arrays read `{1, 2}`, missing values are blank.
pub fn cell_text(value: Option<&Value>) -> String {
	match value {
		None | Some(Value::Null) => String::new(),
		Some(Value::String(s)) => s.clone(),
		Some(Value::Array(items)) => {
			let inner: Vec<String> = items.iter().map(|item| cell_text(Some(item))).collect();
			format!("{{{}}}", inner.join(", "))
		}
		Some(other) => other.to_string(),
	}
}

/// Cell texts of a row, in column order.
pub fn row_cells(graph: &GraphSummary, columns: &[Column]) -> Vec<String> {
	columns
		.iter()
		.map(|column| cell_text(graph.field(column.key).as_ref()))
		.collect()
}

#[component]
pub fn GraphTable(kind: GraphKind, rows: Vec<GraphSummary>) -> impl IntoView {
	let columns = kind.columns();
	let label = kind.label();

	view! {
		<div class="table-container">
			<table aria-label=format!("{label}-list")>
				<thead>
					<tr>
						{columns
							.iter()
							.map(|column| view! { <th scope="col">{column.header}</th> })
							.collect_view()}
						// render action
						<th scope="col"></th>
					</tr>
				</thead>
				<tbody>
					{rows
						.into_iter()
						.map(|graph| {
							let mut cells = row_cells(&graph, columns).into_iter();
							let head = cells.next().unwrap_or_default();
							view! {
								<tr>
									<th scope="row">{head}</th>
									{cells.map(|text| view! { <td>{text}</td> }).collect_view()}
									<td>
										<GraphRenderDialog kind=kind id=graph.id />
									</td>
								</tr>
							}
						})
						.collect_view()}
				</tbody>
			</table>
		</div>
	}
}

#[cfg(test)]
#[path = "graph_table_test.rs"]
mod graph_table_test;
