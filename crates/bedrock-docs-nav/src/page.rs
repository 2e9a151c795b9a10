//! Page-level interactions.
//!
//! Clicks are delegated from the document root. [`resolve_click`] walks up
//! from the clicked element and decides what the click asks for; the DOM
//! adapter only has to answer [`ClickTarget`] queries and carry out the
//! returned [`PageAction`].

use crate::binding::{GROUP_ATTR, LinkBinding, PAYLOAD_ATTR, ROLE_ATTR, VALUE_ATTR};
use crate::intent::NavigationIntent;
use crate::pod::POD_LINK_ATTR;
use crate::registry::Control;

/// Id of the logo, which leads to the landing section.
pub const LOGO_ID: &str = "bedrock-logo";
/// Id of the module search button.
pub const MODULE_SEARCH_ID: &str = "module-search";
/// Id of the module search input.
pub const MODULE_NAME_ID: &str = "module-name";
/// Id of the button saving the documentation base URL.
pub const BASE_URL_SAVE_ID: &str = "doc-base-url-save";
/// Id of the documentation base URL input.
pub const BASE_URL_INPUT_ID: &str = "doc-base-url";
/// Id of the login form.
pub const LOGIN_FORM_ID: &str = "login-form";
/// Id of the registration form.
pub const REGISTER_FORM_ID: &str = "register-form";

/// An element a click landed on, as the DOM adapter sees it.
pub trait ClickTarget: Sized {
	/// The element itself or its nearest ancestor matching `selector`.
	fn closest(&self, selector: &str) -> Option<Self>;

	/// Value of attribute `name`.
	fn attribute(&self, name: &str) -> Option<String>;
}

/// What a click asks the router to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageAction {
	/// The back control.
	Back,
	/// The scroll-to-top control.
	ScrollTop,
	/// The logo: show the landing section.
	Landing,
	/// The module search button.
	SearchModule,
	/// The save button of the base URL preference.
	SaveBaseUrl,
	/// An element carrying a navigation role.
	Follow(LinkBinding),
	/// An element whose role this version cannot bind, or which lacks a
	/// value.
	UnknownRole(String),
	/// An anchor inside a pod document.
	PodLink(String),
	/// An internal link carrying a `data-bedrock` payload.
	Navigate {
		/// The anchor's `href`.
		fragment: String,
		/// The `data-bedrock` value.
		payload: String,
	},
}

fn id_selector(id: &str) -> String {
	format!("#{}", id)
}

/// Decides what a click on `target` asks for.
///
/// Page controls win over rendered content; among rendered content, role
/// bindings win over pod anchors, which win over plain internal links.
/// Returns `None` for clicks the browser should handle itself.
pub fn resolve_click<T: ClickTarget>(target: &T) -> Option<PageAction> {
	let controls = [
		(Control::Back.element_id(), PageAction::Back),
		(Control::ScrollTop.element_id(), PageAction::ScrollTop),
		(LOGO_ID, PageAction::Landing),
		(MODULE_SEARCH_ID, PageAction::SearchModule),
		(BASE_URL_SAVE_ID, PageAction::SaveBaseUrl),
	];
	for (id, action) in controls {
		if target.closest(&id_selector(id)).is_some() {
			return Some(action);
		}
	}

	if let Some(element) = target.closest(&format!("[{}]", ROLE_ATTR)) {
		let role = element.attribute(ROLE_ATTR).unwrap_or_default();
		let binding = LinkBinding::from_attributes(
			&role,
			element.attribute(VALUE_ATTR).as_deref(),
			element.attribute(GROUP_ATTR).as_deref(),
			element.attribute(PAYLOAD_ATTR).as_deref(),
		);
		return Some(match binding {
			Some(binding) => PageAction::Follow(binding),
			None => PageAction::UnknownRole(role),
		});
	}

	if let Some(anchor) = target.closest(&format!("a[{}]", POD_LINK_ATTR)) {
		return anchor.attribute("href").map(PageAction::PodLink);
	}

	let anchor = target.closest(&format!("a[{}]", PAYLOAD_ATTR))?;
	Some(PageAction::Navigate {
		fragment: anchor.attribute("href").unwrap_or_default(),
		payload: anchor.attribute(PAYLOAD_ATTR).unwrap_or_default(),
	})
}

/// Intent of the module search box: `A::B` opens the pod of `A/B`.
///
/// Returns `None` for a blank query.
pub fn module_search_intent(query: &str) -> Option<NavigationIntent> {
	let query = query.trim();
	if query.is_empty() {
		return None;
	}
	Some(NavigationIntent::plugin_doc(query.replace("::", "/")))
}

/// Forms checked before the browser submits them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageForm {
	/// The login form.
	Login,
	/// The registration form.
	Register,
}

impl PageForm {
	/// The checked form with this element id, if any.
	pub fn from_id(id: &str) -> Option<Self> {
		match id {
			LOGIN_FORM_ID => Some(Self::Login),
			REGISTER_FORM_ID => Some(Self::Register),
			_ => None,
		}
	}
}
