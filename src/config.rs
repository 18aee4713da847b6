//! Build-time configuration for the API client.

/// Default base URL when `GRAPH_API_URL` is unset at build time.
pub const DEFAULT_API_URL: &str = "/api/v1";

/// Where the graph REST API lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
	pub base_url: String,
}

impl ApiConfig {
	/// Read `GRAPH_API_URL` baked in at compile time, falling back to [`DEFAULT_API_URL`].
	pub fn from_env() -> Self {
		Self::with_base_url(option_env!("GRAPH_API_URL").unwrap_or(DEFAULT_API_URL))
	}

	pub fn with_base_url(base_url: &str) -> Self {
		let trimmed = base_url.trim().trim_end_matches('/');
		Self {
			base_url: if trimmed.is_empty() {
				DEFAULT_API_URL.to_owned()
			} else {
				trimmed.to_owned()
			},
		}
	}

	/// Join an absolute API path (`/graphs/complete`) onto the base URL.
	pub fn url(&self, path: &str) -> String {
		format!("{}/{}", self.base_url, path.trim_start_matches('/'))
	}
}

impl Default for ApiConfig {
	fn default() -> Self {
		Self::from_env()
	}
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
