//! Content fetching.
//!
//! A [`ContentFetcher`] issues one GET per call and decodes the JSON
//! envelope into a [`Payload`]. Failures come back as [`FetchError`]s; no
//! request is ever retried.
//!
//! [`HttpFetcher`] is the production implementation: `gloo-net` in the
//! browser, `reqwest` on native targets.

use crate::error::FetchError;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::BTreeMap;

/// Outcome of one content request.
pub type FetchResult = Result<Payload, FetchError>;

/// The decoded JSON envelope.
///
/// Every endpoint returns a subset of these fields; handlers check for the
/// ones they need.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Payload {
	/// HTTP status of the response.
	#[serde(skip)]
	pub status: u16,
	/// Rendered document.
	pub html: Option<String>,
	/// External location to open instead of rendering.
	#[serde(rename = "url")]
	pub redirect_url: Option<String>,
	/// Tag or module names.
	#[serde(rename = "tags", alias = "modules")]
	pub list_items: Option<Vec<String>>,
	/// Plugin ids per group.
	pub plugins: Option<BTreeMap<String, Vec<String>>>,
	/// Group to DOM id.
	pub plugin_map: Option<BTreeMap<String, String>>,
	/// Opaque link table.
	pub links: Option<serde_json::Value>,
	/// Display names per group and plugin id.
	pub names: Option<BTreeMap<String, BTreeMap<String, String>>>,
}

/// The plugin tree returned by the plugin listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginTree {
	/// Plugin ids per group.
	pub plugins: BTreeMap<String, Vec<String>>,
	/// Group to DOM id.
	pub plugin_map: BTreeMap<String, String>,
	/// Opaque link table.
	pub links: serde_json::Value,
	/// Display names per group and plugin id.
	pub names: BTreeMap<String, BTreeMap<String, String>>,
}

impl PluginTree {
	/// Display name of plugin `id` in `group`, falling back to the id.
	pub fn display_name<'a>(&'a self, group: &str, id: &'a str) -> &'a str {
		self.names
			.get(group)
			.and_then(|names| names.get(id))
			.map(String::as_str)
			.unwrap_or(id)
	}
}

impl Payload {
	/// The list items, or a malformed-response error naming `field`.
	pub fn into_list_items(self, field: &str) -> Result<Vec<String>, FetchError> {
		let status = self.status;
		self.list_items
			.ok_or_else(|| FetchError::malformed(status, format!("missing field `{}`", field)))
	}

	/// The document, or a malformed-response error.
	pub fn into_html(self) -> Result<String, FetchError> {
		let status = self.status;
		self.html
			.ok_or_else(|| FetchError::malformed(status, "missing field `html`"))
	}

	/// The plugin tree, or a malformed-response error.
	pub fn into_plugin_tree(self) -> Result<PluginTree, FetchError> {
		let status = self.status;
		match (self.plugins, self.plugin_map) {
			(Some(plugins), Some(plugin_map)) => Ok(PluginTree {
				plugins,
				plugin_map,
				links: self.links.unwrap_or_default(),
				names: self.names.unwrap_or_default(),
			}),
			_ => Err(FetchError::malformed(
				status,
				"missing field `plugins` or `plugin_map`",
			)),
		}
	}
}

/// Decodes a response body received with `status`.
pub fn decode_payload(status: u16, body: &str) -> FetchResult {
	let mut payload: Payload =
		serde_json::from_str(body).map_err(|e| FetchError::malformed(status, e.to_string()))?;
	payload.status = status;
	Ok(payload)
}

/// Issues content requests.
#[async_trait(?Send)]
pub trait ContentFetcher {
	/// GETs `endpoint` and decodes the envelope.
	async fn fetch(&self, endpoint: &str) -> FetchResult;
}

/// Fetches content over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
	base_url: String,
	#[cfg(not(target_arch = "wasm32"))]
	client: reqwest::Client,
}

impl HttpFetcher {
	/// Creates a fetcher resolving endpoints against `base_url`.
	///
	/// In the browser `base_url` may be empty, making endpoints relative to
	/// the page origin.
	pub fn new(base_url: impl Into<String>) -> Self {
		Self {
			base_url: base_url.into().trim_end_matches('/').to_string(),
			#[cfg(not(target_arch = "wasm32"))]
			client: reqwest::Client::new(),
		}
	}

	/// Full URL of `endpoint`.
	pub fn url(&self, endpoint: &str) -> String {
		format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
	}

	#[cfg(target_arch = "wasm32")]
	async fn get(&self, url: &str) -> FetchResult {
		use gloo_net::http::Request;

		let response = Request::get(url)
			.header("Accept", "application/json")
			.send()
			.await
			.map_err(|e| FetchError::network(0, e.to_string()))?;

		let status = response.status();
		if !response.ok() {
			return Err(FetchError::network(status, response.status_text()));
		}

		let body = response
			.text()
			.await
			.map_err(|e| FetchError::network(status, e.to_string()))?;
		decode_payload(status, &body)
	}

	#[cfg(not(target_arch = "wasm32"))]
	async fn get(&self, url: &str) -> FetchResult {
		use reqwest::header::ACCEPT;

		let response = self
			.client
			.get(url)
			.header(ACCEPT, "application/json")
			.send()
			.await
			.map_err(|e| FetchError::network(e.status().map(|s| s.as_u16()).unwrap_or(0), e.to_string()))?;

		let status = response.status();
		if !status.is_success() {
			return Err(FetchError::network(
				status.as_u16(),
				status.canonical_reason().unwrap_or_default(),
			));
		}

		let body = response
			.text()
			.await
			.map_err(|e| FetchError::network(status.as_u16(), e.to_string()))?;
		decode_payload(status.as_u16(), &body)
	}
}

#[async_trait(?Send)]
impl ContentFetcher for HttpFetcher {
	async fn fetch(&self, endpoint: &str) -> FetchResult {
		let url = self.url(endpoint);
		tracing::debug!(%url, "fetching content");
		let result = self.get(&url).await;
		match &result {
			Ok(payload) => tracing::debug!(%url, status = payload.status, "content fetched"),
			Err(err) => tracing::debug!(%url, error = %err, "content fetch failed"),
		}
		result
	}
}
