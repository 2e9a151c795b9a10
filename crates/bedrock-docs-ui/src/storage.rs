//! `localStorage`-backed preferences.

use bedrock_docs_nav::Preferences;
use web_sys::{Storage, Window};

/// Preferences persisted in the browser's `localStorage`.
///
/// When storage is unavailable (private browsing, disabled cookies) reads
/// return nothing and writes are dropped.
#[derive(Debug, Clone)]
pub struct LocalStoragePreferences {
	storage: Option<Storage>,
}

impl LocalStoragePreferences {
	/// Opens the window's local storage.
	pub fn new(window: &Window) -> Self {
		let storage = window.local_storage().ok().flatten();
		if storage.is_none() {
			tracing::warn!("localStorage unavailable; preferences will not persist");
		}
		Self { storage }
	}
}

impl Preferences for LocalStoragePreferences {
	fn get(&self, key: &str) -> Option<String> {
		self.storage.as_ref()?.get_item(key).ok().flatten()
	}

	fn set(&self, key: &str, value: &str) {
		let Some(storage) = &self.storage else {
			return;
		};
		if let Err(err) = storage.set_item(key, value) {
			tracing::warn!(?err, key, "failed to store preference");
		}
	}
}
