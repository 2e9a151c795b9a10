//! Fragment builders.
//!
//! Every builder returns a [`RenderedFragment`]: the markup to insert plus
//! the [`LinkBinding`]s of the interactive elements it contains. Text and
//! attribute values coming from the server are escaped.

use crate::binding::{ElementRole, GROUP_ATTR, LinkBinding, PAYLOAD_ATTR, ROLE_ATTR, VALUE_ATTR};
use crate::fetch::PluginTree;
use crate::intent::ModuleSource;
use crate::pod::PodLinkRewriter;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::sync::LazyLock;

/// Id of the scroll anchor placed at the top of pod documents.
pub const POD_TOP_ID: &str = "_podtop_";

static TAG_ANCHOR_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r##"<a\b([^>]*?)\bhref="#tag-([^"]+)"([^>]*)>"##)
		.expect("tag anchor pattern is valid")
});

static POD_LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"<([a-zA-Z][a-zA-Z0-9]*)(\s[^>]*\bclass="[^"]*\bpod-link\b[^"]*"[^>]*)>"#)
		.expect("pod link pattern is valid")
});

static BEDROCK_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r#"\bbedrock-data="([^"]*)""#).expect("bedrock-data pattern is valid")
});

/// Markup plus the bindings of its interactive elements.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedFragment {
	/// Markup to insert.
	pub html: String,
	/// Interactive elements, in document order.
	pub bindings: Vec<LinkBinding>,
}

impl RenderedFragment {
	/// A fragment without interactive elements.
	pub fn plain(html: impl Into<String>) -> Self {
		Self {
			html: html.into(),
			bindings: Vec::new(),
		}
	}

	/// The first binding with `role` and `value`.
	pub fn binding(&self, role: ElementRole, value: &str) -> Option<&LinkBinding> {
		self.bindings
			.iter()
			.find(|b| b.role == role && b.value == value)
	}
}

/// Escapes HTML special characters.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}

fn nav_attrs(binding: &LinkBinding) -> String {
	let mut attrs = format!(
		r#" {}="{}" {}="{}""#,
		ROLE_ATTR,
		binding.role,
		VALUE_ATTR,
		html_escape(&binding.value)
	);
	if let Some(group) = &binding.group {
		let _ = write!(attrs, r#" {}="{}""#, GROUP_ATTR, html_escape(group));
	}
	attrs
}

/// A bulleted list of links, one per item.
pub fn link_list(id: &str, items: &[String], role: ElementRole) -> RenderedFragment {
	let mut html = format!("<ul id=\"{}\">\n", html_escape(id));
	let mut bindings = Vec::with_capacity(items.len());
	for item in items {
		let binding = LinkBinding::new(role, item.as_str());
		let _ = writeln!(
			html,
			r#"<li class="ul-link-item"{}>{}</li>"#,
			nav_attrs(&binding),
			html_escape(item)
		);
		bindings.push(binding);
	}
	html.push_str("</ul>\n");
	RenderedFragment { html, bindings }
}

/// Wraps a pod document in its container markup with the scroll anchor.
pub fn pod_wrapper(html: &str) -> String {
	format!(
		r#"<div class="bedrock-pod"><span id="{}"></span>{}</div>"#,
		POD_TOP_ID, html
	)
}

/// A pod document: wrapped, with pod links bound and anchors marked for
/// in-container scrolling.
pub fn pod_document(html: &str) -> RenderedFragment {
	let mut bindings = Vec::new();
	let bound = POD_LINK_RE.replace_all(html, |caps: &Captures| {
		let attrs = &caps[2];
		let module = BEDROCK_DATA_RE
			.captures(attrs)
			.map(|m| unescape_attr(&m[1]).into_owned());
		match module {
			Some(module) if !attrs.contains(ROLE_ATTR) => {
				let binding = LinkBinding::new(ElementRole::PodLink, module);
				let tag = format!("<{}{}{}>", &caps[1], attrs, nav_attrs(&binding));
				bindings.push(binding);
				tag
			}
			_ => caps[0].to_string(),
		}
	});
	let html = PodLinkRewriter::rewrite(&pod_wrapper(&bound));
	RenderedFragment { html, bindings }
}

/// Links each module to its pod document.
///
/// Module names `A::B` are passed on as `A/B`.
pub fn module_list(modules: &[String], source: ModuleSource) -> RenderedFragment {
	let href = format!("#module-{}", source.module_type());
	let mut html = String::from("<ul id=\"module-list\">\n");
	let mut bindings = Vec::with_capacity(modules.len());
	for module in modules {
		let link = module.replace("::", "/");
		let binding = LinkBinding::new(ElementRole::InternalLink, href.as_str())
			.with_payload(link.as_str());
		let _ = writeln!(
			html,
			r#"<li class="ul-link-item"><a {}="{}"{} href="{}">{}</a></li>"#,
			PAYLOAD_ATTR,
			html_escape(&link),
			nav_attrs(&binding),
			href,
			html_escape(module)
		);
		bindings.push(binding);
	}
	html.push_str("</ul>\n");
	RenderedFragment { html, bindings }
}

/// One accordion section per plugin group.
pub fn plugin_accordion(tree: &PluginTree) -> RenderedFragment {
	let mut html = String::from("<div class=\"accordion\" id=\"plugins-accordion\">\n");
	let mut bindings = Vec::new();
	for (group, dom_id) in &tree.plugin_map {
		let group_text = html_escape(group);
		let dom_id = html_escape(dom_id);
		let _ = write!(
			html,
			concat!(
				"<div class=\"accordion-item\" id=\"{id}\">\n",
				"<h2 class=\"accordion-header\"><button class=\"accordion-button collapsed\" type=\"button\" ",
				"data-bs-toggle=\"collapse\" data-bs-target=\"#{id}-body\">{group}</button></h2>\n",
				"<div id=\"{id}-body\" class=\"accordion-collapse collapse\" data-bs-parent=\"#plugins-accordion\">",
				"<div class=\"accordion-body\">\n<ul id=\"{id}_list\">\n"
			),
			id = dom_id,
			group = group_text
		);
		for id in tree.plugins.get(group).into_iter().flatten() {
			let label = tree.display_name(group, id);
			let binding = LinkBinding::new(ElementRole::PluginLink, label).with_group(group.as_str());
			let _ = writeln!(
				html,
				r#"<li class="ul-link-item"{}>{}</li>"#,
				nav_attrs(&binding),
				html_escape(label)
			);
			bindings.push(binding);
		}
		html.push_str("</ul>\n</div></div></div>\n");
	}
	html.push_str("</div>\n");
	RenderedFragment { html, bindings }
}

/// A generic document, optionally binding its `#tag-<name>` anchors.
pub fn generic_document(html: &str, link_tags: bool) -> RenderedFragment {
	if !link_tags {
		return RenderedFragment::plain(html);
	}
	let mut bindings = Vec::new();
	let html = TAG_ANCHOR_RE
		.replace_all(html, |caps: &Captures| {
			if caps[1].contains(ROLE_ATTR) || caps[3].contains(ROLE_ATTR) {
				return caps[0].to_string();
			}
			let binding = LinkBinding::new(ElementRole::TagAnchor, unescape_attr(&caps[2]));
			let tag = format!(
				r##"<a{}href="#tag-{}"{}{}>"##,
				&caps[1],
				&caps[2],
				&caps[3],
				nav_attrs(&binding)
			);
			bindings.push(binding);
			tag
		})
		.into_owned();
	RenderedFragment { html, bindings }
}

fn unescape_attr(value: &str) -> Cow<'_, str> {
	if !value.contains('&') {
		return Cow::Borrowed(value);
	}
	Cow::Owned(
		value
			.replace("&quot;", "\"")
			.replace("&#x27;", "'")
			.replace("&#39;", "'")
			.replace("&lt;", "<")
			.replace("&gt;", ">")
			.replace("&amp;", "&"),
	)
}
