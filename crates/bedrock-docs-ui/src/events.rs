//! DOM event wiring.
//!
//! Clicks are delegated from the document: rendered fragments carry their
//! bindings as `data-nav-*` attributes, so content replaced by the router
//! needs no re-registration.

use crate::dom::BANNER_ID;
use bedrock_docs_nav::page::{BASE_URL_INPUT_ID, MODULE_NAME_ID};
use bedrock_docs_nav::pod::SCROLL_REFERENCE;
use bedrock_docs_nav::preferences::save_doc_base_url;
use bedrock_docs_nav::{
	ClickTarget, Container, LoginForm, PageAction, PageForm, RegisterForm, Router,
	container_height, resolve_click,
};
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, EventTarget, HtmlElement, HtmlInputElement, Window};

const FOOTER_ID: &str = "footer";

/// A clicked DOM element.
#[derive(Debug, Clone)]
pub(crate) struct DomTarget(pub(crate) Element);

impl ClickTarget for DomTarget {
	fn closest(&self, selector: &str) -> Option<Self> {
		self.0.closest(selector).ok().flatten().map(DomTarget)
	}

	fn attribute(&self, name: &str) -> Option<String> {
		self.0.get_attribute(name)
	}
}

/// Registers every listener the browser UI needs.
pub(crate) fn install(window: &Window, document: &Document, router: &Router) -> Result<(), JsValue> {
	for event in ["hashchange", "popstate"] {
		let router = router.clone();
		let location = window.location();
		listen(window, event, move |_event| {
			let fragment = location.hash().unwrap_or_default();
			let router = router.clone();
			wasm_bindgen_futures::spawn_local(async move {
				router.sync_with_location(&fragment).await;
			});
		})?;
	}

	let click_router = router.clone();
	let click_document = document.clone();
	listen(document, "click", move |event| {
		on_click(&click_router, &click_document, &event);
	})?;

	let submit_router = router.clone();
	let submit_document = document.clone();
	listen(document, "submit", move |event| {
		on_submit(&submit_router, &submit_document, &event);
	})?;

	let resize_window = window.clone();
	let resize_document = document.clone();
	listen(window, "resize", move |_event| {
		size_containers(&resize_window, &resize_document);
	})?;

	if let Some(banner) = document.get_element_by_id(BANNER_ID) {
		let router = router.clone();
		listen(&banner, "close.bs.alert", move |event| {
			event.prevent_default();
			router.dismiss_banner();
		})?;
	}

	size_containers(window, document);
	Ok(())
}

fn listen<F>(target: &EventTarget, event: &str, handler: F) -> Result<(), JsValue>
where
	F: FnMut(Event) + 'static,
{
	let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
	target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
	closure.forget();
	Ok(())
}

fn input_value(document: &Document, id: &str) -> String {
	document
		.get_element_by_id(id)
		.and_then(|element| element.dyn_into::<HtmlInputElement>().ok())
		.map(|input| input.value())
		.unwrap_or_default()
}

fn on_click(router: &Router, document: &Document, event: &Event) {
	let Some(target) = event
		.target()
		.and_then(|target| target.dyn_into::<Element>().ok())
	else {
		return;
	};
	let Some(action) = resolve_click(&DomTarget(target)) else {
		return;
	};
	event.prevent_default();

	let router = router.clone();
	match action {
		PageAction::Back => wasm_bindgen_futures::spawn_local(async move {
			router.back().await;
		}),
		PageAction::ScrollTop => router.scroll_to_top(),
		PageAction::Landing => {
			let landing = router.settings().landing_section.clone();
			wasm_bindgen_futures::spawn_local(async move {
				router.navigate(&landing, None).await;
			});
		}
		PageAction::SearchModule => {
			let query = input_value(document, MODULE_NAME_ID);
			wasm_bindgen_futures::spawn_local(async move {
				router.search_module(&query).await;
			});
		}
		PageAction::SaveBaseUrl => {
			let value = input_value(document, BASE_URL_INPUT_ID);
			if save_doc_base_url(router.preferences(), &value) {
				tracing::info!(url = %value.trim(), "documentation base URL saved");
			}
		}
		PageAction::Follow(binding) => wasm_bindgen_futures::spawn_local(async move {
			router.follow(&binding).await;
		}),
		PageAction::UnknownRole(role) => {
			tracing::debug!(%role, "element carries an unbindable navigation role");
		}
		PageAction::PodLink(href) => router.follow_pod_link(&href),
		PageAction::Navigate { fragment, payload } => {
			wasm_bindgen_futures::spawn_local(async move {
				router.navigate(&fragment, Some(payload.as_str())).await;
			});
		}
	}
}

/// Validates the login and registration forms before the browser submits
/// them; other forms submit untouched.
fn on_submit(router: &Router, document: &Document, event: &Event) {
	let Some(form) = event
		.target()
		.and_then(|target| target.dyn_into::<Element>().ok())
	else {
		return;
	};
	let Some(kind) = PageForm::from_id(&form.id()) else {
		return;
	};
	let accepted = match kind {
		PageForm::Login => router.check_login(&LoginForm::new(
			input_value(document, "login-username"),
			input_value(document, "login-password"),
		)),
		PageForm::Register => router.check_registration(&RegisterForm {
			username: input_value(document, "register-username"),
			password: input_value(document, "register-password"),
			email: input_value(document, "register-email"),
			first_name: input_value(document, "register-first-name"),
			last_name: input_value(document, "register-last-name"),
		}),
	};
	if !accepted {
		event.prevent_default();
	}
}

/// Fits the scrolling containers between the top reference and the footer.
fn size_containers(window: &Window, document: &Document) {
	let scroll_y = window.scroll_y().unwrap_or_default();
	let top = |id: &str| {
		document
			.query_selector(id)
			.ok()
			.flatten()
			.map(|element| element.get_bounding_client_rect().top() + scroll_y)
	};
	let (Some(footer_top), Some(reference_top)) =
		(top(&format!("#{}", FOOTER_ID)), top(SCROLL_REFERENCE))
	else {
		return;
	};
	let height = container_height(footer_top, reference_top);
	for container in [Container::Tags, Container::Docs] {
		let Some(element) = document
			.get_element_by_id(&container.element_id())
			.and_then(|element| element.dyn_into::<HtmlElement>().ok())
		else {
			continue;
		};
		if let Err(err) = element.style().set_property("height", &format!("{}px", height)) {
			tracing::warn!(?err, container = %container, "failed to size container");
		}
	}
}
