//! Navigation intents.
//!
//! A [`NavigationIntent`] describes what to show next. Intents are built
//! from URL fragments by the router or from clicks on rendered elements, and
//! are consumed exactly once by a dispatch.

use std::fmt;

/// The content operation an intent resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntentKind {
	/// Switch to a container that needs no network data.
	ShowStaticContainer,
	/// List all tags.
	ListTags,
	/// Show the documentation of one tag.
	ShowTagDoc,
	/// Show the plugin tree.
	ListPlugins,
	/// Show the documentation of one plugin or module.
	ShowPluginDoc,
	/// List the modules of one source.
	ShowModuleList,
	/// Show a generic documentation page.
	ShowGenericDoc,
}

/// Where a module list comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModuleSource {
	/// Modules shipped with Bedrock.
	BedrockInternal,
	/// Perl modules installed on the system.
	System,
}

impl ModuleSource {
	/// The fragment section that lists this source.
	pub fn section(self) -> &'static str {
		match self {
			ModuleSource::BedrockInternal => "bedrock-modules",
			ModuleSource::System => "perl-modules",
		}
	}

	/// The endpoint name of this source.
	pub fn module_type(self) -> &'static str {
		match self {
			ModuleSource::BedrockInternal => "bedrock-internal",
			ModuleSource::System => "system",
		}
	}

	/// Looks up a source by fragment section.
	pub fn from_section(section: &str) -> Option<Self> {
		match section {
			"bedrock-modules" => Some(ModuleSource::BedrockInternal),
			"perl-modules" => Some(ModuleSource::System),
			_ => None,
		}
	}

	/// Looks up a source by endpoint name.
	pub fn from_module_type(module_type: &str) -> Option<Self> {
		match module_type {
			"bedrock-internal" => Some(ModuleSource::BedrockInternal),
			"system" => Some(ModuleSource::System),
			_ => None,
		}
	}
}

/// A request to show some content.
///
/// Intents are immutable; [`NavigationIntent::as_replay`] produces a marked
/// copy for history replays.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NavigationIntent {
	kind: IntentKind,
	params: Vec<String>,
	is_replay: bool,
}

impl NavigationIntent {
	fn new(kind: IntentKind, params: Vec<String>) -> Self {
		Self {
			kind,
			params,
			is_replay: false,
		}
	}

	/// Switch to the static section `section`.
	pub fn static_container(section: impl Into<String>) -> Self {
		Self::new(IntentKind::ShowStaticContainer, vec![section.into()])
	}

	/// List all tags.
	pub fn list_tags() -> Self {
		Self::new(IntentKind::ListTags, Vec::new())
	}

	/// Show the documentation of tag `name`.
	pub fn tag_doc(name: impl Into<String>) -> Self {
		Self::new(IntentKind::ShowTagDoc, vec![name.into()])
	}

	/// Show the plugin tree.
	pub fn list_plugins() -> Self {
		Self::new(IntentKind::ListPlugins, Vec::new())
	}

	/// Show the documentation of a plugin or module known only by name.
	pub fn plugin_doc(name: impl Into<String>) -> Self {
		Self::new(IntentKind::ShowPluginDoc, vec![name.into()])
	}

	/// Show the documentation of plugin `name` within `group`.
	pub fn plugin_doc_in_group(group: impl Into<String>, name: impl Into<String>) -> Self {
		Self::new(IntentKind::ShowPluginDoc, vec![group.into(), name.into()])
	}

	/// List the modules of `source`.
	pub fn module_list(source: ModuleSource) -> Self {
		Self::new(
			IntentKind::ShowModuleList,
			vec![source.module_type().to_string()],
		)
	}

	/// Show the generic document `name`.
	pub fn generic_doc(name: impl Into<String>) -> Self {
		Self::new(IntentKind::ShowGenericDoc, vec![name.into()])
	}

	/// A copy of this intent flagged as a history replay.
	pub fn as_replay(&self) -> Self {
		Self {
			is_replay: true,
			..self.clone()
		}
	}

	/// The operation kind.
	pub fn kind(&self) -> IntentKind {
		self.kind
	}

	/// The ordered parameters.
	pub fn params(&self) -> &[String] {
		&self.params
	}

	/// Parameter `index`, if present.
	pub fn param(&self, index: usize) -> Option<&str> {
		self.params.get(index).map(String::as_str)
	}

	/// The last parameter, which names the requested content.
	pub fn subject(&self) -> Option<&str> {
		self.params.last().map(String::as_str)
	}

	/// Whether this intent replays a history entry.
	pub fn is_replay(&self) -> bool {
		self.is_replay
	}

	/// Module source of a [`IntentKind::ShowModuleList`] intent.
	pub fn module_source(&self) -> Option<ModuleSource> {
		match self.kind {
			IntentKind::ShowModuleList => self.param(0).and_then(ModuleSource::from_module_type),
			_ => None,
		}
	}

	/// The URL fragment that reproduces this intent, if one exists.
	///
	/// Tag docs and plugin docs are reached by clicking and have no fragment
	/// of their own.
	pub fn canonical_fragment(&self) -> Option<String> {
		match self.kind {
			IntentKind::ListTags => Some("tags".to_string()),
			IntentKind::ListPlugins => Some("plugins".to_string()),
			IntentKind::ShowModuleList => self.module_source().map(|s| s.section().to_string()),
			IntentKind::ShowStaticContainer | IntentKind::ShowGenericDoc => {
				self.param(0).map(str::to_string)
			}
			IntentKind::ShowTagDoc | IntentKind::ShowPluginDoc => None,
		}
	}
}

impl fmt::Display for NavigationIntent {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:?}({})", self.kind, self.params.join(", "))?;
		if self.is_replay {
			f.write_str(" [replay]")?;
		}
		Ok(())
	}
}
