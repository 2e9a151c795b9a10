//! In-document links of pod fragments.
//!
//! Pod documents are shown inside a scrollable container. Their internal
//! anchors must scroll that container instead of letting the browser jump
//! the whole page, and absolute links must leave the page entirely.

use crate::binding::{PAYLOAD_ATTR, ROLE_ATTR};
use crate::settings::DEFAULT_DOC_BASE_URL;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Attribute marking how an anchor in a pod fragment is followed.
pub const POD_LINK_ATTR: &str = "data-pod-link";

/// Selector of the fixed reference element scroll offsets are measured from.
pub const SCROLL_REFERENCE: &str = "#abs-top";

static ANCHOR_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"<a\b([^>]*)>"#).expect("anchor pattern is valid"));

static HREF_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r#"\bhref="([^"]*)""#).expect("href pattern is valid"));

static ORIGIN_RE: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^https?://[^/]+").expect("origin pattern is valid"));

/// How a click on a pod anchor is handled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PodLinkAction {
	/// Navigate the whole page to this URL.
	External(String),
	/// Scroll the active container to the element matching `selector`.
	ScrollTo {
		/// CSS selector of the target, with colons escaped.
		selector: String,
	},
}

/// Classifies and marks anchors of pod fragments.
#[derive(Debug, Clone, Copy, Default)]
pub struct PodLinkRewriter;

impl PodLinkRewriter {
	/// Decides what a click on an anchor with `href` does.
	///
	/// ```
	/// use bedrock_docs_nav::pod::{PodLinkAction, PodLinkRewriter};
	///
	/// assert_eq!(
	/// 	PodLinkRewriter::classify("#DBI%3A%3AFoo"),
	/// 	PodLinkAction::ScrollTo { selector: r"#DBI\:\:Foo".into() }
	/// );
	/// ```
	pub fn classify(href: &str) -> PodLinkAction {
		if href.starts_with("http") {
			return PodLinkAction::External(href.to_string());
		}
		let decoded = urlencoding::decode(href)
			.map(|d| d.into_owned())
			.unwrap_or_else(|_| href.to_string());
		PodLinkAction::ScrollTo {
			selector: Self::escape_selector(&decoded),
		}
	}

	/// Escapes colons so an anchor id can be used as a CSS selector.
	pub fn escape_selector(id: &str) -> String {
		id.replace(':', r"\:")
	}

	/// Scroll position that brings a target to the top of its container.
	///
	/// Both offsets are page offsets taken after the container was scrolled
	/// back to its top.
	pub fn scroll_offset(target_top: f64, reference_top: f64) -> f64 {
		target_top - reference_top
	}

	/// Marks every plain anchor of `html` with [`POD_LINK_ATTR`].
	///
	/// Anchors that already carry a navigation role or a `data-bedrock`
	/// payload, and anchors without an `href`, are left alone.
	pub fn rewrite(html: &str) -> String {
		ANCHOR_RE
			.replace_all(html, |caps: &Captures| {
				let attrs = &caps[1];
				if attrs.contains(ROLE_ATTR) || attrs.contains(PAYLOAD_ATTR) || attrs.contains(POD_LINK_ATTR) {
					return caps[0].to_string();
				}
				let Some(href) = HREF_RE.captures(attrs) else {
					return caps[0].to_string();
				};
				let kind = match Self::classify(&href[1]) {
					PodLinkAction::External(_) => "external",
					PodLinkAction::ScrollTo { .. } => "anchor",
				};
				format!(r#"<a{} {}="{}">"#, attrs, POD_LINK_ATTR, kind)
			})
			.into_owned()
	}
}

/// Points an absolute documentation link at the configured base URL.
///
/// ```
/// use bedrock_docs_nav::pod::apply_base_url;
///
/// assert_eq!(
/// 	apply_base_url("http://localhost:8080/docs/a.html", "https://docs.example.org/"),
/// 	"https://docs.example.org/docs/a.html"
/// );
/// ```
pub fn apply_base_url(href: &str, base: &str) -> String {
	let path = ORIGIN_RE.replace(href, "");
	format!("{}{}", base.trim_end_matches('/'), path)
}

/// Replaces the default documentation origin in a fetched document.
pub fn rewrite_local_links(body: &str, base: &str) -> String {
	let base = base.trim_end_matches('/');
	if base.is_empty() || base == DEFAULT_DOC_BASE_URL {
		return body.to_string();
	}
	body.replace(DEFAULT_DOC_BASE_URL, base)
}
