//! The navigation router.
//!
//! [`Router`] turns URL fragments and clicks into [`NavigationIntent`]s,
//! runs the matching content operation and keeps the address bar in step
//! with the visible container.
//!
//! Every content operation follows the same sequence: show the busy
//! indicator, fetch, clear the indicator, then either render, record the
//! navigation and activate the container, or report the failure and leave
//! the page as it was.
//!
//! Each dispatch takes a [`Generation`] stamp. A response that arrives
//! after a newer dispatch started is dropped unless
//! [`NavSettings::discard_stale_responses`] is off.

use crate::banner::{AlertKind, ErrorReporter};
use crate::binding::{ElementRole, LinkAction, LinkBinding};
use crate::error::{FetchError, FormError};
use crate::fetch::{ContentFetcher, FetchResult};
use crate::forms::{LoginForm, RegisterForm};
use crate::history::{BackStep, HistoryEntry, NavigationHistoryStack, SourceRef};
use crate::intent::{IntentKind, ModuleSource, NavigationIntent};
use crate::page::module_search_intent;
use crate::pod::{
	PodLinkAction, PodLinkRewriter, SCROLL_REFERENCE, apply_base_url, rewrite_local_links,
};
use crate::preferences::{MemoryPreferences, Preferences, doc_base_url};
use crate::registry::{
	ActivateOptions, BusyTicket, Container, Control, Generation, ViewRegistry,
};
use crate::render::{self, RenderedFragment};
use crate::settings::{DEFAULT_DOC_BASE_URL, NavSettings};
use crate::surface::Surface;
use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

/// How a dispatch ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
	/// Content was shown in this container.
	Rendered(Container),
	/// An external window was opened; the view did not change.
	Redirected(String),
	/// The request failed and the banner shows why.
	Failed(FetchError),
	/// The response arrived after a newer navigation and was dropped.
	Discarded,
	/// The intent did not name anything this router can show.
	Ignored,
}

/// Mutable navigation state shared by every clone of a [`Router`].
#[derive(Debug, Default)]
pub struct AppState {
	registry: ViewRegistry,
	history: NavigationHistoryStack,
	reporter: ErrorReporter,
	bindings: HashMap<Container, Vec<LinkBinding>>,
	latest: Generation,
	location: String,
	pending: Option<(NavigationIntent, Generation)>,
}

impl AppState {
	/// Container visibility table.
	pub fn registry(&self) -> &ViewRegistry {
		&self.registry
	}

	/// Back-navigation history.
	pub fn history(&self) -> &NavigationHistoryStack {
		&self.history
	}

	/// Error banner state.
	pub fn reporter(&self) -> &ErrorReporter {
		&self.reporter
	}

	/// Interactive elements last rendered into `container`.
	pub fn bindings(&self, container: Container) -> &[LinkBinding] {
		self.bindings
			.get(&container)
			.map(Vec::as_slice)
			.unwrap_or_default()
	}

	/// Stamp of the newest dispatch.
	pub fn latest_generation(&self) -> Generation {
		self.latest
	}

	/// Fragment last written to or read from the address bar.
	pub fn location(&self) -> &str {
		&self.location
	}

	/// Whether `intent` is displayed, or is being loaded by the newest
	/// dispatch.
	fn shows_or_loads(&self, intent: &NavigationIntent) -> bool {
		let loading = self
			.pending
			.as_ref()
			.is_some_and(|(pending, generation)| pending == intent && *generation == self.latest);
		loading || self.history.current().map(|e| &e.intent) == Some(intent)
	}

	fn begin(&mut self) -> Generation {
		self.latest = self.latest.next();
		self.latest
	}
}

/// Resolves a URL fragment, plus an optional `data-bedrock` payload, to an
/// intent.
///
/// ```
/// use bedrock_docs_nav::{IntentKind, NavSettings, resolve_fragment};
///
/// let settings = NavSettings::default();
/// assert_eq!(resolve_fragment(&settings, "#tags", None).kind(), IntentKind::ListTags);
/// assert_eq!(resolve_fragment(&settings, "", None).params(), ["welcome"]);
/// ```
pub fn resolve_fragment(
	settings: &NavSettings,
	fragment: &str,
	payload: Option<&str>,
) -> NavigationIntent {
	let name = normalize_fragment(settings, fragment);

	if settings.static_container(&name).is_some() {
		return NavigationIntent::static_container(name);
	}
	match name.as_str() {
		"tags" => return NavigationIntent::list_tags(),
		"plugins" => return NavigationIntent::list_plugins(),
		_ => {}
	}
	if let Some(source) = ModuleSource::from_section(&name) {
		return NavigationIntent::module_list(source);
	}
	match payload.filter(|p| !p.is_empty()) {
		Some(payload) => NavigationIntent::plugin_doc(payload),
		None => NavigationIntent::generic_doc(name),
	}
}

/// Strips the `#` of a fragment; an empty fragment names the landing section.
pub fn normalize_fragment(settings: &NavSettings, fragment: &str) -> String {
	let name = fragment.trim().trim_start_matches('#');
	if name.is_empty() {
		settings.landing_section.clone()
	} else {
		name.to_string()
	}
}

/// Clears a busy ticket when the fetch it guards ends, however it ends.
struct BusyGuard<'a> {
	router: &'a Router,
	ticket: Option<BusyTicket>,
}

impl<'a> BusyGuard<'a> {
	fn set(router: &'a Router, container: Container, generation: Generation) -> Self {
		let ticket = router
			.state
			.borrow_mut()
			.registry
			.set_busy(container, generation, &*router.surface);
		Self {
			router,
			ticket: Some(ticket),
		}
	}
}

impl Drop for BusyGuard<'_> {
	fn drop(&mut self) {
		let Some(ticket) = self.ticket.take() else {
			return;
		};
		match self.router.state.try_borrow_mut() {
			Ok(mut state) => state.registry.clear_busy(ticket, &*self.router.surface),
			Err(_) => tracing::error!(
				container = %ticket.container(),
				"navigation state borrowed while clearing busy indicator"
			),
		}
	}
}

/// The navigation router.
///
/// Cloning is cheap; clones share their state, which is what event
/// listeners hold on to.
#[derive(Clone)]
pub struct Router {
	settings: Rc<NavSettings>,
	fetcher: Rc<dyn ContentFetcher>,
	surface: Rc<dyn Surface>,
	preferences: Rc<dyn Preferences>,
	state: Rc<RefCell<AppState>>,
}

impl fmt::Debug for Router {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Router")
			.field("settings", &self.settings)
			.field("state", &self.state)
			.finish_non_exhaustive()
	}
}

impl Router {
	/// Creates a router with in-memory preferences.
	pub fn new(
		settings: NavSettings,
		fetcher: Rc<dyn ContentFetcher>,
		surface: Rc<dyn Surface>,
	) -> Self {
		Self {
			settings: Rc::new(settings),
			fetcher,
			surface,
			preferences: Rc::new(MemoryPreferences::new()),
			state: Rc::new(RefCell::new(AppState::default())),
		}
	}

	/// Replaces the preference store.
	pub fn with_preferences(mut self, preferences: Rc<dyn Preferences>) -> Self {
		self.preferences = preferences;
		self
	}

	/// The settings in use.
	pub fn settings(&self) -> &NavSettings {
		&self.settings
	}

	/// The preference store.
	pub fn preferences(&self) -> &dyn Preferences {
		&*self.preferences
	}

	/// Read access to the navigation state.
	///
	/// The returned guard must be dropped before the next navigation.
	pub fn state(&self) -> Ref<'_, AppState> {
		self.state.borrow()
	}

	/// Resolves a fragment with this router's settings.
	pub fn resolve(&self, fragment: &str, payload: Option<&str>) -> NavigationIntent {
		resolve_fragment(&self.settings, fragment, payload)
	}

	/// Navigates to `fragment` as if the user had typed it.
	///
	/// The address bar is switched to the intent's canonical fragment as the
	/// dispatch starts, so address-bar updates keep the order in which
	/// navigations were started. Intents without a canonical fragment leave
	/// the address bar alone.
	pub async fn navigate(&self, fragment: &str, payload: Option<&str>) -> DispatchOutcome {
		let intent = self.resolve(fragment, payload);
		tracing::info!(fragment, intent = %intent, "navigating");
		if let Some(canonical) = intent.canonical_fragment() {
			self.push_location(&canonical);
		}
		self.dispatch(intent, None).await
	}

	/// Re-dispatches the fragment the browser now shows.
	///
	/// Used for page load, `hashchange` and `popstate`; the address bar is
	/// left untouched. Browsers fire both events for one traversal, so a
	/// location that is displayed or still loading is not dispatched again.
	pub async fn sync_with_location(&self, fragment: &str) -> DispatchOutcome {
		let name = normalize_fragment(&self.settings, fragment);
		let intent = self.resolve(&name, None);
		let generation = {
			let mut state = self.state.borrow_mut();
			if state.location == name && state.shows_or_loads(&intent) {
				tracing::trace!(fragment = %name, "location already displayed or loading");
				return DispatchOutcome::Ignored;
			}
			state.location = name;
			// `dispatch` stamps the next generation before its first await.
			let generation = state.latest.next();
			state.pending = Some((intent.clone(), generation));
			generation
		};
		tracing::debug!(intent = %intent, "location changed");
		let outcome = self.dispatch(intent, None).await;

		let mut state = self.state.borrow_mut();
		if state.pending.as_ref().is_some_and(|(_, g)| *g == generation) {
			state.pending = None;
		}
		outcome
	}

	/// Follows a click on a rendered element.
	pub async fn follow(&self, binding: &LinkBinding) -> DispatchOutcome {
		match binding.action() {
			LinkAction::Dispatch(intent) => self.dispatch(intent, Some(binding.source_ref())).await,
			LinkAction::Navigate { fragment, payload } => {
				self.navigate(&fragment, payload.as_deref()).await
			}
		}
	}

	/// Runs the content operation of `intent`.
	pub async fn dispatch(
		&self,
		intent: NavigationIntent,
		source: Option<SourceRef>,
	) -> DispatchOutcome {
		let generation = self.state.borrow_mut().begin();
		tracing::debug!(intent = %intent, generation = generation.0, "dispatching");

		match intent.kind() {
			IntentKind::ShowStaticContainer => self.show_static(intent, source),
			IntentKind::ListTags => self.list_tags(intent, source, generation).await,
			IntentKind::ShowTagDoc => self.show_tag_doc(intent, source, generation).await,
			IntentKind::ListPlugins => self.list_plugins(intent, source, generation).await,
			IntentKind::ShowPluginDoc => self.show_plugin_doc(intent, source, generation).await,
			IntentKind::ShowModuleList => self.show_module_list(intent, source, generation).await,
			IntentKind::ShowGenericDoc => self.show_generic_doc(intent, source, generation).await,
		}
	}

	/// Goes back to the previously recorded view.
	///
	/// Returns `None` when there is nothing to go back to; the back control
	/// is hidden in that case. The displayed view keeps its history entry
	/// until the replay has rendered, so a failed or discarded replay leaves
	/// history and address bar as they were.
	pub async fn back(&self) -> Option<DispatchOutcome> {
		let (step, left) = {
			let state = self.state.borrow();
			(state.history.back(), state.history.current().cloned())
		};
		let entry = match step {
			BackStep::Replay(entry) => entry,
			BackStep::Exhausted => {
				tracing::debug!("back requested with no previous view");
				self.surface.set_control_visible(Control::Back, false);
				return None;
			}
		};
		tracing::info!(intent = %entry.intent, "replaying history entry");

		let canonical = entry.intent.canonical_fragment();
		let outcome = self.dispatch(entry.intent, entry.source).await;
		if !matches!(outcome, DispatchOutcome::Rendered(_)) {
			tracing::debug!(?outcome, "replay did not render; history kept");
			return Some(outcome);
		}

		let can_go_back = {
			let mut state = self.state.borrow_mut();
			if let Some(left) = &left {
				state.history.complete_back(left);
			}
			state.history.can_go_back()
		};
		if !can_go_back {
			self.surface.set_control_visible(Control::Back, false);
		}
		if let Some(fragment) = canonical {
			self.replace_location(&fragment);
		}
		Some(outcome)
	}

	/// Scrolls the visible container back to its top.
	pub fn scroll_to_top(&self) {
		let active = self.state.borrow().registry.active();
		if let Some(container) = active {
			self.surface.reset_scroll(container);
		}
	}

	/// Follows an anchor inside a pod document.
	pub fn follow_pod_link(&self, href: &str) {
		match PodLinkRewriter::classify(href) {
			PodLinkAction::External(url) => {
				let url = if url.starts_with(DEFAULT_DOC_BASE_URL) {
					let base = doc_base_url(&*self.preferences, &self.settings.doc_base_url);
					apply_base_url(&url, &base)
				} else {
					url
				};
				tracing::debug!(%url, "leaving for external link");
				self.surface.navigate_page(&url);
			}
			PodLinkAction::ScrollTo { selector } => {
				let Some(container) = self.state.borrow().registry.active() else {
					return;
				};
				self.surface.reset_scroll(container);
				match (
					self.surface.element_top(&selector),
					self.surface.element_top(SCROLL_REFERENCE),
				) {
					(Some(target), Some(reference)) => self.surface.scroll_container_to(
						container,
						PodLinkRewriter::scroll_offset(target, reference),
					),
					_ => tracing::debug!(%selector, "pod anchor target not found"),
				}
			}
		}
	}

	/// Hides the error banner.
	pub fn dismiss_banner(&self) {
		self.state.borrow_mut().reporter.dismiss(&*self.surface);
	}

	/// Checks the login form; failures are shown in the banner.
	pub fn check_login(&self, form: &LoginForm) -> bool {
		self.check_form(form.validate())
	}

	/// Checks the registration form; failures are shown in the banner.
	pub fn check_registration(&self, form: &RegisterForm) -> bool {
		self.check_form(form.validate())
	}

	/// Shows `message` in the banner.
	pub fn report_message(&self, message: impl Into<String>, kind: AlertKind) {
		self.state
			.borrow_mut()
			.reporter
			.report_message(message, kind, &*self.surface);
	}

	/// Opens the pod of the module typed into the search box.
	///
	/// A blank query only raises a warning.
	pub async fn search_module(&self, query: &str) -> DispatchOutcome {
		let Some(intent) = module_search_intent(query) else {
			self.report_message("please enter a module name", AlertKind::Warning);
			return DispatchOutcome::Ignored;
		};
		self.dispatch(intent, None).await
	}

	fn check_form(&self, result: Result<(), FormError>) -> bool {
		match result {
			Ok(()) => true,
			Err(err) => {
				tracing::debug!(error = %err, "form rejected");
				self.report_message(err.to_string(), AlertKind::Danger);
				false
			}
		}
	}

	fn push_location(&self, fragment: &str) {
		{
			let mut state = self.state.borrow_mut();
			if state.location == fragment {
				return;
			}
			state.location = fragment.to_string();
		}
		self.surface.push_fragment(fragment);
	}

	fn replace_location(&self, fragment: &str) {
		{
			let mut state = self.state.borrow_mut();
			if state.location == fragment {
				return;
			}
			state.location = fragment.to_string();
		}
		self.surface.replace_fragment(fragment);
	}

	/// Fetches `path` with the busy indicator of `container` showing.
	///
	/// Returns `None` when the response is stale and must be dropped.
	async fn load(
		&self,
		container: Container,
		path: &str,
		generation: Generation,
	) -> Option<FetchResult> {
		let endpoint = self.settings.endpoint(path);
		let guard = BusyGuard::set(self, container, generation);
		let result = self.fetcher.fetch(&endpoint).await;
		drop(guard);

		let latest = self.state.borrow().latest;
		if latest != generation {
			if self.settings.discard_stale_responses {
				tracing::debug!(
					%endpoint,
					generation = generation.0,
					latest = latest.0,
					"discarding stale response"
				);
				return None;
			}
			tracing::debug!(%endpoint, generation = generation.0, "using stale response");
		}
		Some(result)
	}

	fn localize(&self, html: &str) -> String {
		let base = doc_base_url(&*self.preferences, &self.settings.doc_base_url);
		rewrite_local_links(html, &base)
	}

	fn show_static(&self, intent: NavigationIntent, source: Option<SourceRef>) -> DispatchOutcome {
		let section = intent.param(0).unwrap_or_default();
		match self.settings.static_container(section) {
			Some(container) => self.record_and_activate(
				intent,
				source,
				container,
				ActivateOptions::plain(),
			),
			None => {
				tracing::warn!(section, "unknown static section");
				DispatchOutcome::Ignored
			}
		}
	}

	async fn list_tags(
		&self,
		intent: NavigationIntent,
		source: Option<SourceRef>,
		generation: Generation,
	) -> DispatchOutcome {
		let Some(result) = self.load(Container::Tags, "tag", generation).await else {
			return DispatchOutcome::Discarded;
		};
		match result.and_then(|payload| payload.into_list_items("tags")) {
			Ok(tags) => self.present(
				intent,
				source,
				Container::Tags,
				render::link_list("tag-list", &tags, ElementRole::TagLink),
				ActivateOptions::list(),
			),
			Err(err) => self.fail(err),
		}
	}

	async fn show_tag_doc(
		&self,
		intent: NavigationIntent,
		source: Option<SourceRef>,
		generation: Generation,
	) -> DispatchOutcome {
		let name = intent.param(0).unwrap_or_default();
		let path = format!("tag/{}", name);
		let Some(result) = self.load(Container::Tags, &path, generation).await else {
			return DispatchOutcome::Discarded;
		};
		match result.and_then(|payload| payload.into_html()) {
			Ok(html) => {
				let fragment = render::pod_document(&self.localize(&html));
				self.surface.reset_scroll(Container::Tags);
				self.present(intent, source, Container::Tags, fragment, ActivateOptions::document())
			}
			Err(err) => self.fail(err),
		}
	}

	async fn list_plugins(
		&self,
		intent: NavigationIntent,
		source: Option<SourceRef>,
		generation: Generation,
	) -> DispatchOutcome {
		let Some(result) = self.load(Container::Plugins, "plugins", generation).await else {
			return DispatchOutcome::Discarded;
		};
		match result.and_then(|payload| payload.into_plugin_tree()) {
			Ok(tree) => self.present(
				intent,
				source,
				Container::Plugins,
				render::plugin_accordion(&tree),
				ActivateOptions::list(),
			),
			Err(err) => self.fail(err),
		}
	}

	/// Endpoint path of a plugin doc.
	///
	/// A lone name is a module pod; a (group, name) pair addresses the
	/// group's endpoint, where the name `Filter` means the group itself.
	fn plugin_doc_path(&self, intent: &NavigationIntent) -> String {
		match intent.params() {
			[group, name] if name == "Filter" => self.settings.plugin_group_path(group),
			[group, name] => format!("{}/{}", self.settings.plugin_group_path(group), name),
			params => format!(
				"pod/{}",
				params.last().map(String::as_str).unwrap_or_default()
			),
		}
	}

	async fn show_plugin_doc(
		&self,
		intent: NavigationIntent,
		source: Option<SourceRef>,
		generation: Generation,
	) -> DispatchOutcome {
		let path = self.plugin_doc_path(&intent);
		let Some(result) = self.load(Container::Tags, &path, generation).await else {
			return DispatchOutcome::Discarded;
		};
		let payload = match result {
			Ok(payload) => payload,
			Err(err) => return self.fail(err),
		};

		if let Some(url) = payload.redirect_url.filter(|url| !url.is_empty()) {
			tracing::info!(%url, "opening external documentation");
			self.surface.open_external(&url);
			return DispatchOutcome::Redirected(url);
		}

		match payload.html.filter(|html| !html.trim().is_empty()) {
			Some(html) => {
				let fragment = render::pod_document(&self.localize(&html));
				self.surface.reset_scroll(Container::Tags);
				self.present(intent, source, Container::Tags, fragment, ActivateOptions::document())
			}
			None => {
				let subject = intent.subject().unwrap_or_default().to_string();
				self.fail(FetchError::empty(subject))
			}
		}
	}

	async fn show_module_list(
		&self,
		intent: NavigationIntent,
		source: Option<SourceRef>,
		generation: Generation,
	) -> DispatchOutcome {
		let Some(module_source) = intent.module_source() else {
			tracing::warn!(intent = %intent, "unknown module source");
			return DispatchOutcome::Ignored;
		};
		let Some(result) = self
			.load(Container::Tags, module_source.module_type(), generation)
			.await
		else {
			return DispatchOutcome::Discarded;
		};
		match result.and_then(|payload| payload.into_list_items("modules")) {
			Ok(modules) => self.present(
				intent,
				source,
				Container::Tags,
				render::module_list(&modules, module_source),
				ActivateOptions::list(),
			),
			Err(err) => self.fail(err),
		}
	}

	async fn show_generic_doc(
		&self,
		intent: NavigationIntent,
		source: Option<SourceRef>,
		generation: Generation,
	) -> DispatchOutcome {
		let name = intent.param(0).unwrap_or_default().to_string();
		let path = format!("docs/{}", name);
		let Some(result) = self.load(Container::Docs, &path, generation).await else {
			return DispatchOutcome::Discarded;
		};
		match result.and_then(|payload| payload.into_html()) {
			Ok(html) => {
				let fragment =
					render::generic_document(&self.localize(&html), self.settings.links_tags(&name));
				self.surface.reset_scroll(Container::Docs);
				self.present(intent, source, Container::Docs, fragment, ActivateOptions::document())
			}
			Err(err) => self.fail(err),
		}
	}

	/// Inserts `fragment`, then records and activates.
	fn present(
		&self,
		intent: NavigationIntent,
		source: Option<SourceRef>,
		container: Container,
		fragment: RenderedFragment,
		options: ActivateOptions,
	) -> DispatchOutcome {
		self.surface.set_content(container, &fragment.html);
		self.state
			.borrow_mut()
			.bindings
			.insert(container, fragment.bindings);
		self.record_and_activate(intent, source, container, options)
	}

	fn record_and_activate(
		&self,
		intent: NavigationIntent,
		source: Option<SourceRef>,
		container: Container,
		options: ActivateOptions,
	) -> DispatchOutcome {
		let mut guard = self.state.borrow_mut();
		let state = &mut *guard;
		state.history.push(HistoryEntry::new(intent, source));
		let history_len = state.history.len();
		state
			.registry
			.activate(container, options, history_len, &*self.surface);
		DispatchOutcome::Rendered(container)
	}

	fn fail(&self, err: FetchError) -> DispatchOutcome {
		self.state.borrow_mut().reporter.report(&err, &*self.surface);
		DispatchOutcome::Failed(err)
	}
}
