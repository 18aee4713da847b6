//! Decoding of render payloads into drawable graph data.
//!
//! The item endpoint returns `data` as base64 text wrapping a Cytoscape JSON
//! document. Elements come either grouped (`{"nodes": [...], "edges": [...]}`)
//! or flat, in which case an element is an edge when it says so via `group`
//! or carries both `source` and `target`.

use std::collections::HashSet;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::components::force_graph::{GraphData, GraphLink, GraphNode};
use crate::error::AppError;

#[derive(Deserialize)]
struct Document {
	#[serde(default)]
	directed: bool,
	elements: Elements,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Elements {
	Flat(Vec<Element>),
	Grouped {
		#[serde(default)]
		nodes: Vec<Element>,
		#[serde(default)]
		edges: Vec<Element>,
	},
}

#[derive(Deserialize)]
struct Element {
	#[serde(default)]
	group: Option<String>,
	#[serde(default)]
	data: Map<String, Value>,
}

impl Element {
	fn is_edge(&self) -> bool {
		match self.group.as_deref() {
			Some(group) => group == "edges",
			None => self.data.contains_key("source") && self.data.contains_key("target"),
		}
	}

	fn text(&self, key: &str) -> Option<String> {
		self.data.get(key).and_then(id_text)
	}
}

/// Ids may be strings or numbers depending on how the server built the graph.
fn id_text(value: &Value) -> Option<String> {
	match value {
		Value::String(s) => Some(s.clone()),
		Value::Number(n) => Some(n.to_string()),
		Value::Bool(b) => Some(b.to_string()),
		_ => None,
	}
}

/// Base64 text to the Cytoscape JSON document it wraps.
pub fn decode_base64_json(encoded: &str) -> Result<Value, AppError> {
	let compact: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
	let bytes = STANDARD
		.decode(compact)
		.map_err(|e| AppError::Payload(format!("invalid base64: {e}")))?;
	serde_json::from_slice(&bytes).map_err(|e| AppError::Payload(format!("invalid JSON: {e}")))
}

/// Decode a render payload into nodes and links for the canvas.
///
/// Nodes without an id and edges pointing at unknown nodes are dropped.
pub fn decode_payload(encoded: &str) -> Result<GraphData, AppError> {
	let document: Document = serde_json::from_value(decode_base64_json(encoded)?)
		.map_err(|e| AppError::Payload(format!("not a Cytoscape document: {e}")))?;

	let (nodes, edges) = match document.elements {
		Elements::Grouped { nodes, edges } => (nodes, edges),
		Elements::Flat(elements) => elements.into_iter().partition(|e| !e.is_edge()),
	};

	let nodes: Vec<GraphNode> = nodes
		.iter()
		.filter_map(|node| {
			Some(GraphNode {
				id: node.text("id")?,
				label: node.text("label").filter(|label| !label.is_empty()),
				color: node.data.get("color").and_then(Value::as_str).map(str::to_owned),
			})
		})
		.collect();

	let known: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
	let links = edges
		.iter()
		.filter_map(|edge| {
			Some(GraphLink {
				source: edge.text("source")?,
				target: edge.text("target")?,
			})
		})
		.filter(|link| known.contains(link.source.as_str()) && known.contains(link.target.as_str()))
		.collect();

	Ok(GraphData {
		nodes,
		links,
		directed: document.directed,
	})
}

#[cfg(test)]
#[path = "payload_test.rs"]
mod payload_test;
