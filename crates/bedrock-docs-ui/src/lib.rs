//! Browser front end of the Bedrock documentation browser.
//!
//! Boots the navigation core inside the page: builds a [`Router`] over the
//! DOM, wires the page's events to it and displays whatever the address bar
//! points at. Everything but settings loading is `wasm32`-only.
//!
//! [`Router`]: bedrock_docs_nav::Router

use bedrock_docs_nav::NavSettings;

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod events;
#[cfg(target_arch = "wasm32")]
mod storage;

#[cfg(target_arch = "wasm32")]
pub use dom::WebSurface;
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStoragePreferences;

/// Id of the `<script type="application/json">` element holding the page's
/// navigation settings.
pub const SETTINGS_ELEMENT_ID: &str = "bedrock-docs-settings";

/// Reads the settings embedded in the page, falling back to the defaults
/// when the block is absent or invalid.
pub fn settings_from_page(json: Option<&str>) -> NavSettings {
	let Some(json) = json.map(str::trim).filter(|json| !json.is_empty()) else {
		tracing::debug!("no settings block; using defaults");
		return NavSettings::default();
	};
	match NavSettings::from_json(json) {
		Ok(settings) => settings,
		Err(err) => {
			tracing::warn!(error = %err, "invalid settings block; using defaults");
			NavSettings::default()
		}
	}
}

#[cfg(target_arch = "wasm32")]
mod boot {
	use super::*;
	use bedrock_docs_nav::{HttpFetcher, Router};
	use std::rc::Rc;
	use wasm_bindgen::prelude::*;

	#[wasm_bindgen(start)]
	pub fn main() -> Result<(), JsValue> {
		console_error_panic_hook::set_once();
		bedrock_docs_nav::logging::init_logging(tracing::Level::INFO);

		let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))?;
		let document = window
			.document()
			.ok_or_else(|| JsValue::from_str("window has no document"))?;

		if document.ready_state() == "loading" {
			let ready = Closure::once(move || {
				if let Err(err) = start(&window, &document) {
					tracing::error!(?err, "failed to start the documentation browser");
				}
			});
			web_sys::window()
				.ok_or_else(|| JsValue::from_str("no global window"))?
				.add_event_listener_with_callback("DOMContentLoaded", ready.as_ref().unchecked_ref())?;
			ready.forget();
			return Ok(());
		}
		start(&window, &document)
	}

	fn start(window: &web_sys::Window, document: &web_sys::Document) -> Result<(), JsValue> {
		let settings_json = document
			.get_element_by_id(SETTINGS_ELEMENT_ID)
			.and_then(|element| element.text_content());
		let settings = settings_from_page(settings_json.as_deref());

		let router = Router::new(
			settings,
			Rc::new(HttpFetcher::new("")),
			Rc::new(WebSurface::new(window.clone(), document.clone())),
		)
		.with_preferences(Rc::new(LocalStoragePreferences::new(window)));

		super::events::install(window, document, &router)?;

		let fragment = window.location().hash()?;
		tracing::info!(%fragment, "documentation browser started");
		wasm_bindgen_futures::spawn_local(async move {
			router.sync_with_location(&fragment).await;
		});
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(None)]
	#[case(Some(""))]
	#[case(Some("   \n"))]
	fn test_missing_settings_block_uses_defaults(#[case] json: Option<&str>) {
		assert_eq!(settings_from_page(json), NavSettings::default());
	}

	#[rstest]
	fn test_settings_block_is_parsed() {
		let settings = settings_from_page(Some(r#"{"api_prefix": "/docs-api"}"#));

		assert_eq!(settings.api_prefix, "/docs-api");
		assert_eq!(settings.landing_section, "welcome");
	}

	#[rstest]
	#[case(r#"{"api_prefix": "no-slash"}"#)]
	#[case("not json")]
	#[case(r#"{"landing_section": "nowhere"}"#)]
	fn test_invalid_settings_block_uses_defaults(#[case] json: &str) {
		assert_eq!(settings_from_page(Some(json)), NavSettings::default());
	}
}
