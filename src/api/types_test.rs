use serde_json::json;

use super::*;

#[test]
fn circulant_rows_keep_jumps_in_extra() {
	let graph: GraphSummary =
		serde_json::from_value(json!({"id": "a1", "order": 8, "jumps": [1, 3]})).unwrap();
	assert_eq!(graph.order, 8);
	assert_eq!(graph.field("jumps"), Some(json!([1, 3])));
	assert_eq!(graph.field("id"), Some(json!("a1")));
	assert_eq!(graph.field("missing"), None);
}

#[test]
fn complete_rows_have_no_jumps() {
	let graph: GraphSummary = serde_json::from_value(json!({"id": "b2", "order": 5})).unwrap();
	assert!(graph.extra.is_empty());
	assert_eq!(graph.field("jumps"), None);
}

#[test]
fn detail_carries_payload_and_summary() {
	let detail: GraphDetail =
		serde_json::from_value(json!({"id": "c3", "order": 3, "data": "e30="})).unwrap();
	assert_eq!(detail.summary.id, "c3");
	assert_eq!(detail.data, "e30=");
	assert!(!detail.summary.extra.contains_key("data"));
}

#[test]
fn empty_page_decodes() {
	let page: Paginated<GraphSummary> =
		serde_json::from_value(json!({"count": 0, "next": null, "previous": null, "results": []}))
			.unwrap();
	assert_eq!(page.count, 0);
	assert!(page.unique_results().is_empty());
	assert_eq!(page.coverage(), None);
}

#[test]
fn partial_pages_say_how_much_is_shown() {
	let page: Paginated<GraphSummary> = serde_json::from_value(json!({
		"count": 57,
		"next": "/api/v1/graphs/complete?page=2",
		"results": [{"id": "x", "order": 4}, {"id": "y", "order": 5}]
	}))
	.unwrap();
	assert_eq!(page.coverage().as_deref(), Some("Showing 2 of 57"));
}

#[test]
fn duplicate_ids_collapse_to_first() {
	let page: Paginated<GraphSummary> = serde_json::from_value(json!({
		"count": 3,
		"results": [
			{"id": "x", "order": 4},
			{"id": "y", "order": 5},
			{"id": "x", "order": 9}
		]
	}))
	.unwrap();
	let rows = page.unique_results();
	assert_eq!(rows.len(), 2);
	assert_eq!(rows[0].order, 4);
	assert_eq!(rows[1].id, "y");
}
