//! Navigation settings.
//!
//! Settings come from [`NavSettings::default`] or from a JSON document (the
//! browser build reads one from the page), and are checked with
//! [`NavSettings::validate`] before a router is built.
//!
//! ```
//! use bedrock_docs_nav::NavSettings;
//!
//! let settings = NavSettings::from_json(r#"{"api_prefix": "/api"}"#).unwrap();
//! assert_eq!(settings.endpoint("tag"), "/api/tag");
//! assert_eq!(settings.landing_section, "welcome");
//! ```

use crate::error::SettingsError;
use crate::registry::Container;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Default origin baked into fetched documentation links.
pub const DEFAULT_DOC_BASE_URL: &str = "http://localhost:8080";

/// Configuration of the navigation core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavSettings {
	/// Path prepended to every endpoint.
	pub api_prefix: String,
	/// Section shown for an empty fragment.
	pub landing_section: String,
	/// Sections that only switch containers, without fetching.
	pub static_sections: BTreeMap<String, Container>,
	/// Plugin group display name to endpoint path (relative to the prefix).
	pub plugin_groups: BTreeMap<String, String>,
	/// Generic documents whose `#tag-<name>` anchors open tag docs.
	pub tag_link_sections: BTreeSet<String>,
	/// Drop responses that resolve after a newer navigation started.
	pub discard_stale_responses: bool,
	/// Fallback for the stored documentation base URL preference.
	pub doc_base_url: String,
}

impl Default for NavSettings {
	fn default() -> Self {
		let static_sections = [
			Container::Login,
			Container::Logout,
			Container::Register,
			Container::Session,
			Container::Welcome,
		]
		.into_iter()
		.map(|c| (c.name().to_string(), c))
		.collect();

		let plugin_groups = [
			("Application Plugins", "plugins/Startup"),
			("Filters", "plugins/Filter"),
			("Plugins", "plugins"),
		]
		.into_iter()
		.map(|(k, v)| (k.to_string(), v.to_string()))
		.collect();

		Self {
			api_prefix: "/bedrock".to_string(),
			landing_section: Container::Welcome.name().to_string(),
			static_sections,
			plugin_groups,
			tag_link_sections: ["examples", "tutorials"]
				.into_iter()
				.map(String::from)
				.collect(),
			discard_stale_responses: true,
			doc_base_url: DEFAULT_DOC_BASE_URL.to_string(),
		}
	}
}

impl NavSettings {
	/// Parses settings from JSON; missing keys take their default.
	pub fn from_json(json: &str) -> Result<Self, SettingsError> {
		let settings: NavSettings = serde_json::from_str(json)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Checks the settings for consistency.
	pub fn validate(&self) -> Result<(), SettingsError> {
		if !self.api_prefix.is_empty() && !self.api_prefix.starts_with('/') {
			return Err(SettingsError::InvalidPrefix(self.api_prefix.clone()));
		}
		if self.landing_section.is_empty() {
			return Err(SettingsError::EmptyLanding);
		}
		if !self.static_sections.contains_key(&self.landing_section) {
			return Err(SettingsError::UnknownLanding(self.landing_section.clone()));
		}
		if self.doc_base_url.trim().is_empty() {
			return Err(SettingsError::EmptyBaseUrl);
		}
		Ok(())
	}

	/// Sets the API prefix.
	pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.api_prefix = prefix.into();
		self
	}

	/// Sets the landing section.
	pub fn with_landing_section(mut self, section: impl Into<String>) -> Self {
		self.landing_section = section.into();
		self
	}

	/// Registers a static section.
	pub fn with_static_section(mut self, name: impl Into<String>, container: Container) -> Self {
		self.static_sections.insert(name.into(), container);
		self
	}

	/// Maps a plugin group to its endpoint path.
	pub fn with_plugin_group(mut self, group: impl Into<String>, path: impl Into<String>) -> Self {
		self.plugin_groups.insert(group.into(), path.into());
		self
	}

	/// Enables or disables stale-response discarding.
	pub fn with_discard_stale_responses(mut self, discard: bool) -> Self {
		self.discard_stale_responses = discard;
		self
	}

	/// Sets the default documentation base URL.
	pub fn with_doc_base_url(mut self, url: impl Into<String>) -> Self {
		self.doc_base_url = url.into();
		self
	}

	/// Container of a static section.
	pub fn static_container(&self, section: &str) -> Option<Container> {
		self.static_sections.get(section).copied()
	}

	/// Whether `section` links tag anchors to tag docs.
	pub fn links_tags(&self, section: &str) -> bool {
		self.tag_link_sections.contains(section)
	}

	/// Full endpoint for `path`.
	pub fn endpoint(&self, path: &str) -> String {
		format!(
			"{}/{}",
			self.api_prefix.trim_end_matches('/'),
			path.trim_start_matches('/')
		)
	}

	/// Endpoint path of a plugin group, relative to the prefix.
	///
	/// Unknown groups are addressed as `plugins/<group>`.
	pub fn plugin_group_path(&self, group: &str) -> String {
		self.plugin_groups
			.get(group)
			.cloned()
			.unwrap_or_else(|| format!("plugins/{}", group))
	}
}
