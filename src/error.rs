//! Error type shared by the API layer and the views that surface its failures.

use serde_json::Value;

/// Everything that can go wrong between a button press and a rendered result.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum AppError {
	#[error("network error: {0}")]
	Network(String),
	#[error("request failed with {status} {text}")]
	Status { status: u16, text: String },
	#[error("could not decode response: {0}")]
	Decode(String),
	#[error("could not decode graph payload: {0}")]
	Payload(String),
	#[error("request cancelled")]
	Cancelled,
	/// The server refused the input; the message is meant for humans.
	#[error("{0}")]
	Rejected(String),
}

impl AppError {
	/// Build a rejection from a DRF-style error body.
	pub fn rejected(body: &Value) -> Self {
		Self::Rejected(rejection_message(body))
	}

	pub fn is_cancelled(&self) -> bool {
		matches!(self, Self::Cancelled)
	}
}

impl From<gloo_net::Error> for AppError {
	fn from(err: gloo_net::Error) -> Self {
		match err {
			gloo_net::Error::SerdeError(e) => Self::Decode(e.to_string()),
			other => Self::Network(other.to_string()),
		}
	}
}

impl From<serde_json::Error> for AppError {
	fn from(err: serde_json::Error) -> Self {
		Self::Decode(err.to_string())
	}
}

/// Flatten a validation error body into one line.
///
/// Field errors come back as `{"field": ["msg", ...]}`, non-field errors as a
/// bare list or under `detail`/`non_field_errors`.
pub fn rejection_message(body: &Value) -> String {
	match body {
		Value::Null => "request rejected".to_owned(),
		Value::String(s) => s.clone(),
		Value::Array(items) => items
			.iter()
			.map(rejection_message)
			.collect::<Vec<_>>()
			.join(" "),
		Value::Object(map) => map
			.iter()
			.map(|(key, value)| match key.as_str() {
				"detail" | "non_field_errors" => rejection_message(value),
				_ => format!("{key}: {}", rejection_message(value)),
			})
			.collect::<Vec<_>>()
			.join("; "),
		other => other.to_string(),
	}
}

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;
