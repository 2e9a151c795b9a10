//! Declarative element roles.
//!
//! Rendered fragments mark their interactive elements with `data-nav-*`
//! attributes instead of carrying click handlers. A [`LinkBinding`] is the
//! parsed form of those attributes, and [`LinkBinding::action`] maps it to
//! what a click should do.

use crate::history::SourceRef;
use crate::intent::NavigationIntent;
use std::fmt;

/// Attribute holding the element role.
pub const ROLE_ATTR: &str = "data-nav-role";
/// Attribute holding the value passed to the intent.
pub const VALUE_ATTR: &str = "data-nav-value";
/// Attribute holding the plugin group of a plugin link.
pub const GROUP_ATTR: &str = "data-nav-group";
/// Attribute carrying the auxiliary payload of internal links.
pub const PAYLOAD_ATTR: &str = "data-bedrock";

/// What kind of interactive element a binding describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementRole {
	/// An entry of the tag list.
	TagLink,
	/// An entry of the plugin accordion.
	PluginLink,
	/// A server-rendered `.pod-link` element naming a module.
	PodLink,
	/// A `#tag-<name>` anchor inside a tag-linking document.
	TagAnchor,
	/// Any anchor carrying a `data-bedrock` payload.
	InternalLink,
}

impl ElementRole {
	/// The attribute value of this role.
	pub fn as_str(self) -> &'static str {
		match self {
			ElementRole::TagLink => "tag-link",
			ElementRole::PluginLink => "plugin-link",
			ElementRole::PodLink => "pod-link",
			ElementRole::TagAnchor => "tag-anchor",
			ElementRole::InternalLink => "internal-link",
		}
	}

	/// Parses an attribute value.
	pub fn parse(value: &str) -> Option<Self> {
		match value {
			"tag-link" => Some(ElementRole::TagLink),
			"plugin-link" => Some(ElementRole::PluginLink),
			"pod-link" => Some(ElementRole::PodLink),
			"tag-anchor" => Some(ElementRole::TagAnchor),
			"internal-link" => Some(ElementRole::InternalLink),
			_ => None,
		}
	}
}

impl fmt::Display for ElementRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// What a click on a bound element does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
	/// Dispatch the intent directly.
	Dispatch(NavigationIntent),
	/// Resolve the fragment through the router, like a typed URL.
	Navigate {
		/// Fragment, with or without the leading `#`.
		fragment: String,
		/// Auxiliary payload (`data-bedrock`).
		payload: Option<String>,
	},
}

/// One interactive element of a rendered fragment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkBinding {
	/// Element role.
	pub role: ElementRole,
	/// Tag name, plugin id, module name or href.
	pub value: String,
	/// Plugin group, for plugin links.
	pub group: Option<String>,
	/// `data-bedrock` payload, for internal links.
	pub payload: Option<String>,
}

impl LinkBinding {
	/// A binding with just a role and a value.
	pub fn new(role: ElementRole, value: impl Into<String>) -> Self {
		Self {
			role,
			value: value.into(),
			group: None,
			payload: None,
		}
	}

	/// Sets the plugin group.
	pub fn with_group(mut self, group: impl Into<String>) -> Self {
		self.group = Some(group.into());
		self
	}

	/// Sets the internal-link payload.
	pub fn with_payload(mut self, payload: impl Into<String>) -> Self {
		self.payload = Some(payload.into());
		self
	}

	/// Rebuilds a binding from element attributes, as read by the DOM adapter.
	pub fn from_attributes(
		role: &str,
		value: Option<&str>,
		group: Option<&str>,
		payload: Option<&str>,
	) -> Option<Self> {
		let role = ElementRole::parse(role)?;
		let value = value?;
		Some(Self {
			role,
			value: value.to_string(),
			group: group.map(str::to_string),
			payload: payload.map(str::to_string),
		})
	}

	/// The action a click on this element triggers.
	pub fn action(&self) -> LinkAction {
		match self.role {
			ElementRole::TagLink | ElementRole::TagAnchor => {
				LinkAction::Dispatch(NavigationIntent::tag_doc(&self.value))
			}
			ElementRole::PluginLink => LinkAction::Dispatch(match &self.group {
				Some(group) => NavigationIntent::plugin_doc_in_group(group, &self.value),
				None => NavigationIntent::plugin_doc(&self.value),
			}),
			ElementRole::PodLink => {
				let module = self.value.split('?').next().unwrap_or_default();
				LinkAction::Dispatch(NavigationIntent::plugin_doc(module))
			}
			ElementRole::InternalLink => LinkAction::Navigate {
				fragment: self.value.clone(),
				payload: self.payload.clone(),
			},
		}
	}

	/// Opaque handle identifying the element for history entries.
	pub fn source_ref(&self) -> SourceRef {
		SourceRef::new(format!("{}:{}", self.role, self.value))
	}
}
