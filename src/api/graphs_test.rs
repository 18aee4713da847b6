use serde_json::{Map, Value, json};

use super::*;

fn config() -> ApiConfig {
	ApiConfig::with_base_url("http://localhost:8000/api/v1")
}

// =============================================================
// Request building
// =============================================================

#[test]
fn create_complete_with_order_five_posts_order_five() {
	let mut record = Map::new();
	record.insert("order".into(), Value::from(5));
	let request = ApiRequest::create(&config(), GraphKind::Complete, record);

	assert_eq!(request.method, Method::Post);
	assert_eq!(request.url, "http://localhost:8000/api/v1/graphs/complete");
	assert_eq!(request.body, Some(json!({"order": 5})));
}

#[test]
fn item_request_appends_id() {
	let request = ApiRequest::item(&config(), GraphKind::Circulant, "4f1c");
	assert_eq!(request.method, Method::Get);
	assert_eq!(request.url, "http://localhost:8000/api/v1/graphs/circulant/4f1c");
	assert!(request.body.is_none());
}

#[test]
fn list_and_options_share_collection_url() {
	let list = ApiRequest::list(&config(), GraphKind::Circulant);
	let options = ApiRequest::options(&config(), GraphKind::Circulant);
	assert_eq!(list.url, options.url);
	assert_eq!(list.method, Method::Get);
	assert_eq!(options.method, Method::Options);
}

// =============================================================
// GraphKind
// =============================================================

#[test]
fn slugs_round_trip() {
	for kind in GraphKind::ALL {
		assert_eq!(GraphKind::from_slug(kind.slug()), Some(kind));
	}
	assert_eq!(GraphKind::from_slug("complete_graph"), Some(GraphKind::Complete));
	assert_eq!(GraphKind::from_slug("petersen"), None);
}

#[test]
fn circulant_lists_jumps_column() {
	let keys: Vec<_> = GraphKind::Circulant.columns().iter().map(|c| c.key).collect();
	assert_eq!(keys, ["id", "order", "jumps"]);
	let keys: Vec<_> = GraphKind::Complete.columns().iter().map(|c| c.key).collect();
	assert_eq!(keys, ["id", "order"]);
}

#[test]
fn item_keys_live_under_the_kind_key() {
	let root = GraphKind::Complete.query_key();
	assert!(GraphKind::Complete.item_key("abc").starts_with(&root));
	assert!(!GraphKind::Complete.options_key().starts_with(&root));
	assert_eq!(GraphKind::Complete.options_key().to_string(), "complete_graphs_options");
	assert!(!GraphKind::Circulant.item_key("abc").starts_with(&root));
}
