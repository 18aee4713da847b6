use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde_json::json;

use super::*;

fn encode(value: &Value) -> String {
	STANDARD.encode(value.to_string())
}

/// Shape produced by networkx' `cytoscape_data` for K3.
fn triangle() -> Value {
	json!({
		"data": [],
		"directed": false,
		"multigraph": false,
		"elements": {
			"nodes": [
				{"data": {"id": "0", "value": 0, "name": "0"}},
				{"data": {"id": "1", "value": 1, "name": "1"}},
				{"data": {"id": "2", "value": 2, "name": "2"}}
			],
			"edges": [
				{"data": {"source": 0, "target": 1}},
				{"data": {"source": 0, "target": 2}},
				{"data": {"source": 1, "target": 2}}
			]
		}
	})
}

#[test]
fn grouped_document_decodes_nodes_and_links() {
	let graph = decode_payload(&encode(&triangle())).unwrap();
	assert_eq!(graph.nodes.len(), 3);
	assert_eq!(graph.links.len(), 3);
	assert!(!graph.directed);
	assert_eq!(graph.links[0].source, "0");
	assert_eq!(graph.links[0].target, "1");
}

#[test]
fn missing_labels_draw_nothing() {
	let graph = decode_payload(&encode(&triangle())).unwrap();
	assert!(graph.nodes.iter().all(|n| n.label.is_none()));
}

#[test]
fn flat_elements_are_partitioned() {
	let doc = json!({
		"directed": true,
		"elements": [
			{"group": "nodes", "data": {"id": "a", "label": "A"}},
			{"data": {"id": "b"}},
			{"data": {"id": "ab", "source": "a", "target": "b"}}
		]
	});
	let graph = decode_payload(&encode(&doc)).unwrap();
	assert!(graph.directed);
	assert_eq!(graph.nodes.len(), 2);
	assert_eq!(graph.nodes[0].label.as_deref(), Some("A"));
	assert_eq!(graph.links.len(), 1);
}

#[test]
fn dangling_edges_are_dropped() {
	let doc = json!({
		"elements": {
			"nodes": [{"data": {"id": 1}}],
			"edges": [{"data": {"source": 1, "target": 7}}]
		}
	});
	let graph = decode_payload(&encode(&doc)).unwrap();
	assert_eq!(graph.nodes[0].id, "1");
	assert!(graph.links.is_empty());
}

#[test]
fn wrapped_base64_is_accepted() {
	let encoded = encode(&triangle());
	let (head, tail) = encoded.split_at(20);
	let wrapped = format!("{head}\n{tail}\n");
	assert_eq!(decode_payload(&wrapped).unwrap().nodes.len(), 3);
}

#[test]
fn garbage_is_a_payload_error() {
	assert!(matches!(decode_payload("!!not base64!!"), Err(AppError::Payload(_))));
	let not_json = STANDARD.encode("hello");
	assert!(matches!(decode_payload(&not_json), Err(AppError::Payload(_))));
	let no_elements = encode(&json!({"directed": false}));
	assert!(matches!(decode_payload(&no_elements), Err(AppError::Payload(_))));
}

/// networkx-shaped complete graph on `n` vertices with numeric ids.
fn complete(n: u32) -> Value {
	let nodes: Vec<Value> = (0..n).map(|i| json!({"data": {"id": i.to_string(), "value": i}})).collect();
	let edges: Vec<Value> = (0..n)
		.flat_map(|a| (a + 1..n).map(move |b| json!({"data": {"source": a, "target": b}})))
		.collect();
	json!({"directed": false, "elements": {"nodes": nodes, "edges": edges}})
}

#[test]
fn large_complete_graph_keeps_every_link() {
	let graph = decode_payload(&encode(&complete(300))).unwrap();
	assert_eq!(graph.nodes.len(), 300);
	assert_eq!(graph.links.len(), 300 * 299 / 2);
	assert_eq!(graph.links.last().map(|l| (l.source.as_str(), l.target.as_str())), Some(("298", "299")));
}
