use super::*;

#[test]
fn trailing_slashes_are_trimmed() {
	let config = ApiConfig::with_base_url("http://localhost:8000/api/v1/");
	assert_eq!(config.base_url, "http://localhost:8000/api/v1");
}

#[test]
fn empty_base_url_falls_back_to_default() {
	assert_eq!(ApiConfig::with_base_url("  ").base_url, DEFAULT_API_URL);
}

#[test]
fn url_joins_with_single_slash() {
	let config = ApiConfig::with_base_url("https://graphs.example/api/v1");
	assert_eq!(
		config.url("/graphs/complete"),
		"https://graphs.example/api/v1/graphs/complete"
	);
	assert_eq!(
		config.url("graphs/circulant/abc"),
		"https://graphs.example/api/v1/graphs/circulant/abc"
	);
}
