//! Request builders and senders for the two graph endpoints.
//!
//! Building a request is pure so it can be checked without a browser; sending
//! goes through `gloo-net` and optionally carries an abort signal.

use gloo_net::http::{Method as HttpMethod, RequestBuilder, Response};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use web_sys::AbortSignal;

use super::options::{Method, Options};
use super::types::{GraphDetail, GraphSummary, Paginated};
use crate::config::ApiConfig;
use crate::error::AppError;
use crate::query::QueryKey;

/// A table column: header text and the row key it reads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
	pub header: &'static str,
	pub key: &'static str,
}

const COMPLETE_COLUMNS: &[Column] = &[
	Column { header: "ID", key: "id" },
	Column { header: "Order", key: "order" },
];

const CIRCULANT_COLUMNS: &[Column] = &[
	Column { header: "ID", key: "id" },
	Column { header: "Order", key: "order" },
	Column { header: "Jumps", key: "jumps" },
];

/// The graph families the API can generate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphKind {
	Complete,
	Circulant,
}

impl GraphKind {
	/// Listing order on the list page.
	pub const ALL: [GraphKind; 2] = [GraphKind::Circulant, GraphKind::Complete];

	pub fn path(self) -> &'static str {
		match self {
			Self::Complete => "/graphs/complete",
			Self::Circulant => "/graphs/circulant",
		}
	}

	pub fn label(self) -> &'static str {
		match self {
			Self::Complete => "Complete",
			Self::Circulant => "Circulant",
		}
	}

	/// Route segment for `/graph/create/:kind`.
	pub fn slug(self) -> &'static str {
		match self {
			Self::Complete => "complete",
			Self::Circulant => "circulant",
		}
	}

	pub fn from_slug(slug: &str) -> Option<Self> {
		match slug.trim().to_ascii_lowercase().as_str() {
			"complete" | "complete_graph" => Some(Self::Complete),
			"circulant" | "circulant_graph" => Some(Self::Circulant),
			_ => None,
		}
	}

	pub fn columns(self) -> &'static [Column] {
		match self {
			Self::Complete => COMPLETE_COLUMNS,
			Self::Circulant => CIRCULANT_COLUMNS,
		}
	}

	/// Cache key shared by every query about this kind.
	pub fn query_key(self) -> QueryKey {
		QueryKey::new([match self {
			Self::Complete => "complete_graphs",
			Self::Circulant => "circulant_graphs",
		}])
	}

	/// Options live under their own root so list invalidation leaves them alone.
	pub fn options_key(self) -> QueryKey {
		QueryKey::new([format!("{}_options", self.query_key())])
	}

	pub fn item_key(self, id: &str) -> QueryKey {
		self.query_key().child(id)
	}
}

/// A request ready to be sent.
#[derive(Clone, Debug, PartialEq)]
pub struct ApiRequest {
	pub method: Method,
	pub url: String,
	pub body: Option<Value>,
}

impl ApiRequest {
	pub fn list(config: &ApiConfig, kind: GraphKind) -> Self {
		Self {
			method: Method::Get,
			url: config.url(kind.path()),
			body: None,
		}
	}

	pub fn item(config: &ApiConfig, kind: GraphKind, id: &str) -> Self {
		Self {
			method: Method::Get,
			url: config.url(&format!("{}/{id}", kind.path())),
			body: None,
		}
	}

	pub fn create(config: &ApiConfig, kind: GraphKind, record: Map<String, Value>) -> Self {
		Self {
			method: Method::Post,
			url: config.url(kind.path()),
			body: Some(Value::Object(record)),
		}
	}

	pub fn options(config: &ApiConfig, kind: GraphKind) -> Self {
		Self {
			method: Method::Options,
			url: config.url(kind.path()),
			body: None,
		}
	}

	/// Send and decode the JSON response.
	///
	/// If `signal` fires before the response arrives the result is
	/// [`AppError::Cancelled`].
	pub async fn send<T: DeserializeOwned>(
		&self,
		signal: Option<&AbortSignal>,
	) -> Result<T, AppError> {
		debug!("{} {}", self.method.as_str(), self.url);
		let builder = RequestBuilder::new(&self.url)
			.method(http_method(self.method))
			.abort_signal(signal);
		let request = match &self.body {
			Some(body) => builder.json(body)?,
			None => builder.build()?,
		};

		let response = match request.send().await {
			Ok(response) => response,
			Err(_) if signal.is_some_and(AbortSignal::aborted) => {
				debug!("{} {} cancelled", self.method.as_str(), self.url);
				return Err(AppError::Cancelled);
			}
			Err(err) => {
				warn!("{} {} failed: {err}", self.method.as_str(), self.url);
				return Err(err.into());
			}
		};

		if !response.ok() {
			return Err(failure(response).await);
		}
		Ok(response.json::<T>().await?)
	}
}

fn http_method(method: Method) -> HttpMethod {
	match method {
		Method::Get => HttpMethod::GET,
		Method::Post => HttpMethod::POST,
		Method::Put => HttpMethod::PUT,
		Method::Patch => HttpMethod::PATCH,
		Method::Delete => HttpMethod::DELETE,
		Method::Options => HttpMethod::OPTIONS,
		Method::Head => HttpMethod::HEAD,
	}
}

/// Turn a non-2xx response into an error, preferring the server's message.
async fn failure(response: Response) -> AppError {
	let status = response.status();
	let text = response.status_text();
	warn!("{} responded {status} {text}", response.url());
	if status == 400 {
		if let Ok(body) = response.json::<Value>().await {
			return AppError::rejected(&body);
		}
	}
	AppError::Status { status, text }
}

/// Thin call wrappers bound to one API base URL.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GraphApi {
	config: ApiConfig,
}

impl GraphApi {
	pub fn new(config: ApiConfig) -> Self {
		Self { config }
	}

	pub async fn list(&self, kind: GraphKind) -> Result<Paginated<GraphSummary>, AppError> {
		ApiRequest::list(&self.config, kind).send(None).await
	}

	pub async fn get(
		&self,
		kind: GraphKind,
		id: &str,
		signal: Option<&AbortSignal>,
	) -> Result<GraphDetail, AppError> {
		ApiRequest::item(&self.config, kind, id).send(signal).await
	}

	pub async fn create(
		&self,
		kind: GraphKind,
		record: Map<String, Value>,
	) -> Result<GraphSummary, AppError> {
		ApiRequest::create(&self.config, kind, record).send(None).await
	}

	pub async fn options(&self, kind: GraphKind) -> Result<Options, AppError> {
		ApiRequest::options(&self.config, kind).send(None).await
	}
}

#[cfg(test)]
#[path = "graphs_test.rs"]
mod graphs_test;
