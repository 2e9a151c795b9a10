//! Locally stored user preferences.

use std::cell::RefCell;
use std::collections::HashMap;

/// Storage key of the documentation base URL.
pub const DOC_BASE_URL_KEY: &str = "docBaseUrl";

/// A string key/value store.
pub trait Preferences {
	/// Reads `key`.
	fn get(&self, key: &str) -> Option<String>;

	/// Writes `key`.
	fn set(&self, key: &str, value: &str);
}

/// Preferences kept in memory for the lifetime of the page.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
	values: RefCell<HashMap<String, String>>,
}

impl MemoryPreferences {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}
}

impl Preferences for MemoryPreferences {
	fn get(&self, key: &str) -> Option<String> {
		self.values.borrow().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) {
		self.values
			.borrow_mut()
			.insert(key.to_string(), value.to_string());
	}
}

/// The stored documentation base URL, or `default` when none is stored.
pub fn doc_base_url(prefs: &dyn Preferences, default: &str) -> String {
	prefs
		.get(DOC_BASE_URL_KEY)
		.filter(|v| !v.trim().is_empty())
		.unwrap_or_else(|| default.to_string())
}

/// Stores a new documentation base URL. Blank values are ignored.
pub fn save_doc_base_url(prefs: &dyn Preferences, value: &str) -> bool {
	let value = value.trim();
	if value.is_empty() {
		return false;
	}
	prefs.set(DOC_BASE_URL_KEY, value);
	tracing::info!(base_url = value, "documentation base url saved");
	true
}
