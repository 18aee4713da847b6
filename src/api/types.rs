use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One row of a graph listing.
///
/// `id` and `order` are common to every kind; anything else the server sends
/// (circulant `jumps`, for instance) lands in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GraphSummary {
	pub id: String,
	pub order: u32,
	#[serde(flatten)]
	pub extra: Map<String, Value>,
}

impl GraphSummary {
	/// Look a column up by key, including the common fields.
	pub fn field(&self, key: &str) -> Option<Value> {
		match key {
			"id" => Some(Value::String(self.id.clone())),
			"order" => Some(Value::from(self.order)),
			_ => self.extra.get(key).cloned(),
		}
	}
}

/// A graph together with its base64 render payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct GraphDetail {
	#[serde(flatten)]
	pub summary: GraphSummary,
	pub data: String,
}

/// A page of results as the list endpoints return them.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Paginated<T> {
	pub count: u64,
	#[serde(default)]
	pub next: Option<String>,
	#[serde(default)]
	pub previous: Option<String>,
	#[serde(default = "Vec::new")]
	pub results: Vec<T>,
}

impl<T> Default for Paginated<T> {
	fn default() -> Self {
		Self {
			count: 0,
			next: None,
			previous: None,
			results: Vec::new(),
		}
	}
}

impl<T> Paginated<T> {
	/// "Showing 20 of 57" when the server split the collection into pages.
	pub fn coverage(&self) -> Option<String> {
		if self.next.is_none() && self.previous.is_none() {
			return None;
		}
		Some(format!("Showing {} of {}", self.results.len(), self.count))
	}
}

impl Paginated<GraphSummary> {
	/// Results with repeated ids dropped, keeping the first occurrence.
	pub fn unique_results(&self) -> Vec<GraphSummary> {
		let mut seen = HashSet::new();
		self.results
			.iter()
			.filter(|graph| seen.insert(graph.id.as_str()))
			.cloned()
			.collect()
	}
}

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;
