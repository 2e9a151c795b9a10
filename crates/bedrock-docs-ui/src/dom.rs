//! [`Surface`] over the browser DOM.

use bedrock_docs_nav::{Banner, Container, Control, Surface};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlElement, Window};

/// Class hiding an element (Bootstrap utility).
const HIDDEN_CLASS: &str = "d-none";

/// Id of the banner element.
pub(crate) const BANNER_ID: &str = "bedrock-error";

/// Id of the banner's message element.
const BANNER_MESSAGE_ID: &str = "bedrock-error-message";

const SPINNER_HTML: &str = r#"<div class="spinner-border" role="status"><span class="visually-hidden">Loading...</span></div>"#;

/// The page, as seen by the router.
#[derive(Debug, Clone)]
pub struct WebSurface {
	window: Window,
	document: Document,
}

impl WebSurface {
	/// Wraps the current window and document.
	pub fn new(window: Window, document: Document) -> Self {
		Self { window, document }
	}

	fn element(&self, id: &str) -> Option<HtmlElement> {
		let element = self.document.get_element_by_id(id);
		if element.is_none() {
			tracing::trace!(id, "element not found");
		}
		element?.dyn_into::<HtmlElement>().ok()
	}

	fn container(&self, container: Container) -> Option<HtmlElement> {
		self.element(&container.element_id())
	}

	fn busy_id(container: Container) -> String {
		format!("{}-busy", container.name())
	}

	fn show_spinner(&self, container: Container) -> Result<(), JsValue> {
		let id = Self::busy_id(container);
		if self.document.get_element_by_id(&id).is_some() {
			return Ok(());
		}
		let Some(target) = self.container(container) else {
			return Ok(());
		};
		let spinner = self.document.create_element("div")?;
		spinner.set_id(&id);
		spinner.set_class_name("bedrock-busy d-flex mt-5 justify-content-center");
		spinner.set_inner_html(SPINNER_HTML);
		target.prepend_with_node_1(&spinner)
	}

	fn hide_spinner(&self, container: Container) {
		if let Some(spinner) = self.document.get_element_by_id(&Self::busy_id(container)) {
			spinner.remove();
		}
	}
}

fn set_hidden(element: &Element, hidden: bool) {
	if let Err(err) = element.class_list().toggle_with_force(HIDDEN_CLASS, hidden) {
		tracing::warn!(?err, "failed to toggle visibility");
	}
}

fn log_failure(what: &str, result: Result<(), JsValue>) {
	if let Err(err) = result {
		tracing::warn!(?err, "{} failed", what);
	}
}

impl Surface for WebSurface {
	fn set_content(&self, container: Container, html: &str) {
		if let Some(element) = self.container(container) {
			element.set_inner_html(html);
		}
	}

	fn set_visible(&self, container: Container, visible: bool) {
		if let Some(element) = self.container(container) {
			set_hidden(&element, !visible);
		}
	}

	fn set_busy_indicator(&self, container: Container, busy: bool) {
		if busy {
			log_failure("showing busy indicator", self.show_spinner(container));
		} else {
			self.hide_spinner(container);
		}
	}

	fn set_control_visible(&self, control: Control, visible: bool) {
		if let Some(element) = self.element(control.element_id()) {
			set_hidden(&element, !visible);
		}
	}

	fn reset_scroll(&self, container: Container) {
		if let Some(element) = self.container(container) {
			element.set_scroll_top(0);
		}
	}

	fn scroll_container_to(&self, container: Container, offset: f64) {
		if let Some(element) = self.container(container) {
			element.set_scroll_top(offset.round() as i32);
		}
	}

	fn element_top(&self, selector: &str) -> Option<f64> {
		let element = self.document.query_selector(selector).ok().flatten()?;
		let scroll_y = self.window.scroll_y().unwrap_or_default();
		Some(element.get_bounding_client_rect().top() + scroll_y)
	}

	fn show_banner(&self, banner: &Banner) {
		if let Some(message) = self.element(BANNER_MESSAGE_ID) {
			message.set_text_content(Some(&banner.message));
		}
		if let Some(element) = self.element(BANNER_ID) {
			element.set_class_name(&banner.css_class());
		}
	}

	fn hide_banner(&self) {
		if let Some(element) = self.element(BANNER_ID) {
			set_hidden(&element, true);
		}
	}

	fn push_fragment(&self, fragment: &str) {
		let url = format!("#{}", fragment);
		log_failure(
			"pushState",
			self.window
				.history()
				.and_then(|history| history.push_state_with_url(&JsValue::NULL, "", Some(&url))),
		);
	}

	fn replace_fragment(&self, fragment: &str) {
		let url = format!("#{}", fragment);
		log_failure(
			"replaceState",
			self.window
				.history()
				.and_then(|history| history.replace_state_with_url(&JsValue::NULL, "", Some(&url))),
		);
	}

	fn open_external(&self, url: &str) {
		log_failure(
			"window.open",
			self.window.open_with_url_and_target(url, "_blank").map(|_| ()),
		);
	}

	fn navigate_page(&self, url: &str) {
		log_failure("navigation", self.window.location().set_href(url));
	}
}
