//! End-to-end navigation scenarios against scripted responses.

#![cfg(not(target_arch = "wasm32"))]

use bedrock_docs_nav::testing::{RecordingSurface, ScriptedFetcher, SurfaceEvent};
use bedrock_docs_nav::{
	AlertKind, Container, Control, DispatchOutcome, ElementRole, FetchError, LinkBinding,
	NavSettings, NavigationIntent, Preferences, MemoryPreferences, Router,
};
use rstest::*;
use std::rc::Rc;

const TAGS_JSON: &str = r#"{"tags": ["networking", "storage"]}"#;
const STORAGE_JSON: &str = r#"{"html": "<p>storage docs</p>"}"#;

struct Harness {
	router: Router,
	fetcher: Rc<ScriptedFetcher>,
	surface: Rc<RecordingSurface>,
}

impl Harness {
	fn with_settings(settings: NavSettings) -> Self {
		let fetcher = Rc::new(ScriptedFetcher::new());
		let surface = Rc::new(RecordingSurface::new());
		let router = Router::new(settings, fetcher.clone(), surface.clone());
		Self {
			router,
			fetcher,
			surface,
		}
	}

	fn binding(&self, container: Container, role: ElementRole, value: &str) -> LinkBinding {
		self.router
			.state()
			.bindings(container)
			.iter()
			.find(|b| b.role == role && b.value == value)
			.cloned()
			.unwrap_or_else(|| panic!("no {} binding for {:?}", role, value))
	}

	fn history_len(&self) -> usize {
		self.router.state().history().len()
	}
}

#[fixture]
fn harness() -> Harness {
	Harness::with_settings(NavSettings::default())
}

#[rstest]
#[tokio::test]
async fn test_list_tags_renders_link_list(harness: Harness) {
	harness.fetcher.respond_json("/bedrock/tag", TAGS_JSON);

	let outcome = harness.router.navigate("#tags", None).await;

	assert_eq!(outcome, DispatchOutcome::Rendered(Container::Tags));
	assert_eq!(harness.fetcher.requests(), vec!["/bedrock/tag"]);
	let html = harness.surface.content(Container::Tags).unwrap();
	assert_eq!(html.matches("<li class=\"ul-link-item\"").count(), 2);
	assert!(html.contains(">networking</li>"));
	assert!(html.contains(">storage</li>"));
	assert_eq!(harness.surface.visible_containers(), vec![Container::Tags]);
	assert!(!harness.surface.is_busy(Container::Tags));
	assert_eq!(harness.surface.busy_transitions(Container::Tags), (1, 1));
	assert_eq!(harness.surface.location(), "tags");
}

#[rstest]
#[tokio::test]
async fn test_clicking_tag_shows_wrapped_tag_doc(harness: Harness) {
	harness.fetcher.respond_json("/bedrock/tag", TAGS_JSON);
	harness.fetcher.respond_json("/bedrock/tag/storage", STORAGE_JSON);
	harness.router.navigate("#tags", None).await;

	let link = harness.binding(Container::Tags, ElementRole::TagLink, "storage");
	let outcome = harness.router.follow(&link).await;

	assert_eq!(outcome, DispatchOutcome::Rendered(Container::Tags));
	assert_eq!(
		harness.surface.content(Container::Tags).unwrap(),
		r#"<div class="bedrock-pod"><span id="_podtop_"></span><p>storage docs</p></div>"#
	);
	assert!(harness.surface.control_visible(Control::ScrollTop));
	assert!(harness.surface.control_visible(Control::Back));
	assert_eq!(
		harness.router.state().history().current().unwrap().intent,
		NavigationIntent::tag_doc("storage")
	);
	// Tag docs have no fragment of their own.
	assert_eq!(harness.surface.pushed_fragments(), vec!["tags"]);
}

#[rstest]
#[tokio::test]
async fn test_empty_plugin_doc_reports_not_found(harness: Harness) {
	harness.fetcher.respond_json("/bedrock/tag", TAGS_JSON);
	harness.fetcher.respond_json("/bedrock/plugins/Foo/Bar", r#"{"html": ""}"#);
	harness.router.navigate("#tags", None).await;
	let before = harness.surface.content(Container::Tags);

	let link = LinkBinding::new(ElementRole::PluginLink, "Bar").with_group("Foo");
	let outcome = harness.router.follow(&link).await;

	assert_eq!(outcome, DispatchOutcome::Failed(FetchError::empty("Bar")));
	let banner = harness.surface.banner().unwrap();
	assert_eq!(banner.message, "Nothing found for \"Bar\"");
	assert_eq!(banner.kind, AlertKind::Warning);
	assert_eq!(harness.surface.content(Container::Tags), before);
	assert_eq!(harness.surface.visible_containers(), vec![Container::Tags]);
	assert!(!harness.surface.is_busy(Container::Tags));
	assert_eq!(harness.history_len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_server_error_keeps_previous_container(harness: Harness) {
	harness
		.fetcher
		.respond_error("/bedrock/tag", 500, "Internal Server Error");
	harness.router.navigate("#login", None).await;

	let outcome = harness.router.navigate("#tags", None).await;

	assert!(matches!(outcome, DispatchOutcome::Failed(_)));
	assert_eq!(
		harness.surface.banner().unwrap().message,
		"Error fetching data [500]: Internal Server Error"
	);
	assert!(!harness.surface.is_busy(Container::Tags));
	assert_eq!(harness.surface.busy_transitions(Container::Tags), (1, 1));
	assert_eq!(harness.surface.visible_containers(), vec![Container::Login]);
	assert!(harness.surface.content(Container::Tags).is_none());
}

#[rstest]
#[tokio::test]
async fn test_back_replays_previous_view(harness: Harness) {
	harness.fetcher.respond_json("/bedrock/tag", TAGS_JSON);
	harness.fetcher.respond_json("/bedrock/tag/storage", STORAGE_JSON);

	harness.router.navigate("#tags", None).await;
	let list_html = harness.surface.content(Container::Tags);
	let link = harness.binding(Container::Tags, ElementRole::TagLink, "storage");
	harness.router.follow(&link).await;
	assert_eq!(harness.history_len(), 2);

	let outcome = harness.router.back().await;

	assert_eq!(outcome, Some(DispatchOutcome::Rendered(Container::Tags)));
	assert_eq!(harness.surface.content(Container::Tags), list_html);
	assert_eq!(harness.history_len(), 1);
	assert!(!harness.surface.control_visible(Control::Back));
	assert_eq!(harness.fetcher.request_count("/bedrock/tag"), 2);

	let events_before = harness.surface.events().len();
	assert_eq!(harness.router.back().await, None);
	assert_eq!(harness.history_len(), 1);
	assert!(!harness.surface.control_visible(Control::Back));
	assert_eq!(
		harness.surface.events()[events_before..],
		[SurfaceEvent::ControlVisible(Control::Back, false)]
	);
}

#[rstest]
#[tokio::test]
async fn test_back_restores_address_bar(harness: Harness) {
	harness.fetcher.respond_json("/bedrock/tag", TAGS_JSON);
	harness.fetcher.respond_json("/bedrock/docs/overview", r#"{"html": "<h1>Overview</h1>"}"#);

	harness.router.navigate("#tags", None).await;
	harness.router.navigate("#overview", None).await;
	assert_eq!(harness.surface.location(), "overview");

	harness.router.back().await;

	assert_eq!(harness.surface.location(), "tags");
	assert!(
		harness
			.surface
			.events()
			.contains(&SurfaceEvent::ReplaceFragment("tags".into()))
	);
	assert_eq!(harness.surface.visible_containers(), vec![Container::Tags]);
}

#[rstest]
#[tokio::test]
async fn test_replay_against_failing_backend_reports_banner(harness: Harness) {
	harness.fetcher.respond_json("/bedrock/tag", TAGS_JSON);
	harness.fetcher.respond_error("/bedrock/tag", 503, "Service Unavailable");
	harness.fetcher.respond_json("/bedrock/tag/storage", STORAGE_JSON);

	harness.router.navigate("#tags", None).await;
	let link = harness.binding(Container::Tags, ElementRole::TagLink, "storage");
	harness.router.follow(&link).await;

	let outcome = harness.router.back().await;

	assert!(matches!(outcome, Some(DispatchOutcome::Failed(_))));
	assert_eq!(
		harness.surface.banner().unwrap().message,
		"Error fetching data [503]: Service Unavailable"
	);
	assert!(!harness.surface.is_busy(Container::Tags));
	assert_eq!(harness.history_len(), 2);
	assert_eq!(
		harness.router.state().history().current().map(|e| e.intent.clone()),
		Some(NavigationIntent::tag_doc("storage"))
	);
	assert!(harness.surface.control_visible(Control::Back));
}

#[rstest]
#[tokio::test]
async fn test_failed_replay_keeps_displayed_view_on_top(harness: Harness) {
	harness.fetcher.respond_json("/bedrock/tag", TAGS_JSON);
	harness
		.fetcher
		.respond_error("/bedrock/tag", 500, "Internal Server Error");
	harness
		.fetcher
		.respond_json("/bedrock/docs/overview", r#"{"html": "<h1>Overview</h1>"}"#);

	harness.router.navigate("#tags", None).await;
	harness.router.navigate("#overview", None).await;
	let outcome = harness.router.back().await;

	assert!(matches!(outcome, Some(DispatchOutcome::Failed(_))));
	assert_eq!(harness.surface.visible_containers(), vec![Container::Docs]);
	assert_eq!(harness.history_len(), 2);
	assert_eq!(
		harness.router.state().history().current().map(|e| e.intent.clone()),
		Some(NavigationIntent::generic_doc("overview"))
	);
	assert_eq!(harness.surface.location(), "overview");
	assert!(harness.surface.control_visible(Control::Back));
	assert!(
		!harness
			.surface
			.events()
			.iter()
			.any(|e| matches!(e, SurfaceEvent::ReplaceFragment(_)))
	);
}

#[rstest]
#[tokio::test]
async fn test_navigating_twice_is_idempotent(harness: Harness) {
	harness.fetcher.respond_json("/bedrock/tag", TAGS_JSON);

	harness.router.navigate("#tags", None).await;
	let first = (
		harness.surface.content(Container::Tags),
		harness.surface.visible_containers(),
	);
	harness.router.navigate("#tags", None).await;
	let second = (
		harness.surface.content(Container::Tags),
		harness.surface.visible_containers(),
	);

	assert_eq!(first, second);
	assert_eq!(harness.fetcher.request_count("/bedrock/tag"), 2);
	assert_eq!(harness.surface.pushed_fragments(), vec!["tags"]);
}

#[rstest]
#[case("")]
#[case("#")]
#[tokio::test]
async fn test_empty_fragment_shows_landing(harness: Harness, #[case] fragment: &str) {
	let outcome = harness.router.sync_with_location(fragment).await;

	assert_eq!(outcome, DispatchOutcome::Rendered(Container::Welcome));
	assert!(harness.fetcher.requests().is_empty());
	assert!(harness.surface.banner().is_none());
	assert!(harness.surface.pushed_fragments().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_location_change_does_not_push(harness: Harness) {
	harness.fetcher.respond_json(
		"/bedrock/plugins",
		r#"{"plugins": {"Plugins": ["cache"]}, "plugin_map": {"Plugins": "plugins-list"}, "links": {}, "names": {}}"#,
	);

	let outcome = harness.router.sync_with_location("#plugins").await;

	assert_eq!(outcome, DispatchOutcome::Rendered(Container::Plugins));
	assert!(harness.surface.pushed_fragments().is_empty());
	assert_eq!(harness.router.state().location(), "plugins");

	// The same location again is already on screen.
	assert_eq!(
		harness.router.sync_with_location("#plugins").await,
		DispatchOutcome::Ignored
	);
	assert_eq!(harness.fetcher.request_count("/bedrock/plugins"), 1);
}

#[rstest]
#[tokio::test]
async fn test_paired_location_events_fetch_once(harness: Harness) {
	let tags = harness.fetcher.defer("/bedrock/tag");

	let popstate = harness.router.sync_with_location("#tags");
	let hashchange = async {
		let outcome = harness.router.sync_with_location("#tags").await;
		tags.json(TAGS_JSON);
		outcome
	};
	let (first, second) = futures::join!(popstate, hashchange);

	assert_eq!(first, DispatchOutcome::Rendered(Container::Tags));
	assert_eq!(second, DispatchOutcome::Ignored);
	assert_eq!(harness.fetcher.requests(), vec!["/bedrock/tag"]);
	assert_eq!(harness.history_len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_location_retried_after_failed_load(harness: Harness) {
	harness
		.fetcher
		.respond_error("/bedrock/tag", 500, "Internal Server Error")
		.respond_json("/bedrock/tag", TAGS_JSON);

	let first = harness.router.sync_with_location("#tags").await;
	let second = harness.router.sync_with_location("#tags").await;

	assert!(matches!(first, DispatchOutcome::Failed(_)));
	assert_eq!(second, DispatchOutcome::Rendered(Container::Tags));
	assert_eq!(harness.fetcher.request_count("/bedrock/tag"), 2);
}

#[rstest]
#[tokio::test]
async fn test_plugin_accordion_links_open_group_docs(harness: Harness) {
	harness.fetcher.respond_json(
		"/bedrock/plugins",
		r#"{
			"plugins": {"Application Plugins": ["cache"], "Filters": ["Filter"]},
			"plugin_map": {"Application Plugins": "app-plugins", "Filters": "filters"},
			"links": {},
			"names": {"Application Plugins": {"cache": "Cache"}}
		}"#,
	);
	harness
		.fetcher
		.respond_json("/bedrock/plugins/Startup/Cache", r#"{"html": "<p>cache</p>"}"#);
	harness
		.fetcher
		.respond_json("/bedrock/plugins/Filter", r#"{"html": "<p>filters</p>"}"#);

	harness.router.navigate("#plugins", None).await;
	assert_eq!(harness.surface.visible_containers(), vec![Container::Plugins]);
	assert!(!harness.surface.control_visible(Control::ScrollTop));

	let cache = harness.binding(Container::Plugins, ElementRole::PluginLink, "Cache");
	assert_eq!(
		harness.router.follow(&cache).await,
		DispatchOutcome::Rendered(Container::Tags)
	);

	harness.router.navigate("#plugins", None).await;
	let filter = harness.binding(Container::Plugins, ElementRole::PluginLink, "Filter");
	harness.router.follow(&filter).await;

	assert_eq!(
		harness.fetcher.requests(),
		vec![
			"/bedrock/plugins",
			"/bedrock/plugins/Startup/Cache",
			"/bedrock/plugins",
			"/bedrock/plugins/Filter",
		]
	);
}

#[rstest]
#[tokio::test]
async fn test_plugin_doc_redirect_opens_window(harness: Harness) {
	harness.router.navigate("#session", None).await;
	harness
		.fetcher
		.respond_json("/bedrock/pod/DBI", r#"{"url": "https://metacpan.org/pod/DBI"}"#);

	let outcome = harness
		.router
		.follow(&LinkBinding::new(ElementRole::PodLink, "DBI?x=1"))
		.await;

	assert_eq!(
		outcome,
		DispatchOutcome::Redirected("https://metacpan.org/pod/DBI".into())
	);
	assert!(
		harness
			.surface
			.events()
			.contains(&SurfaceEvent::OpenExternal("https://metacpan.org/pod/DBI".into()))
	);
	assert_eq!(harness.surface.visible_containers(), vec![Container::Session]);
	assert!(harness.surface.content(Container::Tags).is_none());
	assert_eq!(harness.history_len(), 1);
}

#[rstest]
#[tokio::test]
async fn test_module_list_links_to_module_pods(harness: Harness) {
	harness.fetcher.respond_json(
		"/bedrock/bedrock-internal",
		r#"{"modules": ["Bedrock::Text::URLEncode", "Bedrock::Hash"]}"#,
	);
	harness
		.fetcher
		.respond_json("/bedrock/pod/Bedrock/Hash", r#"{"html": "<h1>Bedrock::Hash</h1>"}"#);

	harness.router.navigate("#bedrock-modules", None).await;
	let html = harness.surface.content(Container::Tags).unwrap();
	assert!(html.contains(r#"data-bedrock="Bedrock/Text/URLEncode""#));
	assert!(html.contains(r##"href="#module-bedrock-internal""##));

	let bindings = harness.router.state().bindings(Container::Tags).to_vec();
	let hash = bindings
		.iter()
		.find(|b| b.payload.as_deref() == Some("Bedrock/Hash"))
		.unwrap();
	let outcome = harness.router.follow(hash).await;

	assert_eq!(outcome, DispatchOutcome::Rendered(Container::Tags));
	assert_eq!(
		harness.fetcher.requests().last().map(String::as_str),
		Some("/bedrock/pod/Bedrock/Hash")
	);
	// Module pods have no fragment; the list stays in the address bar.
	assert_eq!(harness.surface.location(), "bedrock-modules");
}

#[rstest]
#[tokio::test]
async fn test_module_search_opens_module_pod(harness: Harness) {
	harness
		.fetcher
		.respond_json("/bedrock/pod/Bedrock/Hash", r#"{"html": "<h1>Bedrock::Hash</h1>"}"#);

	let outcome = harness.router.search_module(" Bedrock::Hash ").await;

	assert_eq!(outcome, DispatchOutcome::Rendered(Container::Tags));
	assert_eq!(harness.fetcher.requests(), vec!["/bedrock/pod/Bedrock/Hash"]);
	assert!(harness.surface.banner().is_none());
}

#[rstest]
#[case("")]
#[case("   ")]
#[tokio::test]
async fn test_blank_module_search_warns(harness: Harness, #[case] query: &str) {
	let outcome = harness.router.search_module(query).await;

	assert_eq!(outcome, DispatchOutcome::Ignored);
	assert!(harness.fetcher.requests().is_empty());
	let banner = harness.surface.banner().unwrap();
	assert_eq!(banner.message, "please enter a module name");
	assert_eq!(banner.kind, AlertKind::Warning);
}

#[rstest]
#[tokio::test]
async fn test_system_modules_endpoint(harness: Harness) {
	harness
		.fetcher
		.respond_json("/bedrock/system", r#"{"modules": ["DBI"]}"#);

	let outcome = harness.router.navigate("#perl-modules", None).await;

	assert_eq!(outcome, DispatchOutcome::Rendered(Container::Tags));
	assert_eq!(harness.fetcher.requests(), vec!["/bedrock/system"]);
}

#[rstest]
#[tokio::test]
async fn test_tutorial_tag_anchors_open_tag_docs(harness: Harness) {
	harness.fetcher.respond_json(
		"/bedrock/docs/tutorials",
		r##"{"html": "<p>Read <a href=\"#tag-storage\">storage</a></p>"}"##,
	);
	harness.fetcher.respond_json("/bedrock/tag/storage", STORAGE_JSON);

	harness.router.navigate("#tutorials", None).await;
	assert_eq!(harness.surface.visible_containers(), vec![Container::Docs]);
	assert_eq!(harness.surface.scroll_resets(), vec![Container::Docs]);

	let anchor = harness.binding(Container::Docs, ElementRole::TagAnchor, "storage");
	let outcome = harness.router.follow(&anchor).await;

	assert_eq!(outcome, DispatchOutcome::Rendered(Container::Tags));
	assert_eq!(harness.surface.visible_containers(), vec![Container::Tags]);
}

#[rstest]
#[tokio::test]
async fn test_plain_docs_do_not_bind_tag_anchors(harness: Harness) {
	harness.fetcher.respond_json(
		"/bedrock/docs/faq",
		r##"{"html": "<a href=\"#tag-storage\">storage</a>"}"##,
	);

	harness.router.navigate("faq", None).await;

	assert!(harness.router.state().bindings(Container::Docs).is_empty());
}

#[rstest]
#[tokio::test]
async fn test_malformed_response_reports_banner(harness: Harness) {
	harness.fetcher.respond_json("/bedrock/docs/overview", r#"{"title": "no html"}"#);

	let outcome = harness.router.navigate("#overview", None).await;

	assert!(matches!(
		outcome,
		DispatchOutcome::Failed(FetchError::Malformed { status: 200, .. })
	));
	assert!(
		harness
			.surface
			.banner()
			.unwrap()
			.message
			.starts_with("Error fetching data [200]:")
	);
	assert!(!harness.surface.is_busy(Container::Docs));
	assert!(harness.surface.visible_containers().is_empty());
}

#[rstest]
#[tokio::test]
async fn test_stale_response_is_discarded(harness: Harness) {
	let tags = harness.fetcher.defer("/bedrock/tag");
	harness
		.fetcher
		.respond_json("/bedrock/docs/overview", r#"{"html": "<h1>Overview</h1>"}"#);

	let slow = harness.router.navigate("#tags", None);
	let fast = async {
		let outcome = harness.router.navigate("#overview", None).await;
		tags.json(TAGS_JSON);
		outcome
	};
	let (slow, fast) = futures::join!(slow, fast);

	assert_eq!(slow, DispatchOutcome::Discarded);
	assert_eq!(fast, DispatchOutcome::Rendered(Container::Docs));
	assert_eq!(harness.surface.visible_containers(), vec![Container::Docs]);
	assert!(harness.surface.content(Container::Tags).is_none());
	assert!(!harness.surface.is_busy(Container::Tags));
	assert_eq!(harness.router.state().registry().outstanding(), 0);
	assert_eq!(harness.history_len(), 1);
	assert_eq!(harness.surface.location(), "overview");
}

#[rstest]
#[tokio::test]
async fn test_stale_failure_is_not_reported(harness: Harness) {
	let tags = harness.fetcher.defer("/bedrock/tag");

	let slow = harness.router.navigate("#tags", None);
	let fast = async {
		let outcome = harness.router.navigate("#login", None).await;
		tags.result(Err(FetchError::network(500, "Internal Server Error")));
		outcome
	};
	let (slow, _) = futures::join!(slow, fast);

	assert_eq!(slow, DispatchOutcome::Discarded);
	assert!(harness.surface.banner().is_none());
	assert_eq!(harness.surface.visible_containers(), vec![Container::Login]);
}

#[rstest]
#[tokio::test]
async fn test_stale_ticket_leaves_newer_indicator_spinning(harness: Harness) {
	let list = harness.fetcher.defer("/bedrock/tag");
	let doc = harness.fetcher.defer("/bedrock/tag/storage");

	let first = harness.router.navigate("#tags", None);
	let second = harness
		.router
		.dispatch(NavigationIntent::tag_doc("storage"), None);
	let driver = async {
		list.json(TAGS_JSON);
		// Let the first dispatch observe its response before the second one.
		futures::pending!();
		assert!(harness.surface.is_busy(Container::Tags));
		doc.json(STORAGE_JSON);
	};
	let (first, second, ()) = futures::join!(first, second, driver);

	assert_eq!(first, DispatchOutcome::Discarded);
	assert_eq!(second, DispatchOutcome::Rendered(Container::Tags));
	assert!(!harness.surface.is_busy(Container::Tags));
	assert_eq!(harness.surface.busy_transitions(Container::Tags), (1, 1));
}

#[rstest]
#[tokio::test]
async fn test_legacy_mode_renders_stale_responses() {
	let harness =
		Harness::with_settings(NavSettings::default().with_discard_stale_responses(false));
	let tags = harness.fetcher.defer("/bedrock/tag");
	harness
		.fetcher
		.respond_json("/bedrock/docs/overview", r#"{"html": "<h1>Overview</h1>"}"#);

	let slow = harness.router.navigate("#tags", None);
	let fast = async {
		harness.router.navigate("#overview", None).await;
		tags.json(TAGS_JSON);
	};
	let (slow, ()) = futures::join!(slow, fast);

	// Last response to resolve wins.
	assert_eq!(slow, DispatchOutcome::Rendered(Container::Tags));
	assert_eq!(harness.surface.visible_containers(), vec![Container::Tags]);
	assert_eq!(harness.history_len(), 2);
}

#[rstest]
#[tokio::test]
async fn test_pod_anchor_scrolls_active_container(harness: Harness) {
	harness.fetcher.respond_json("/bedrock/tag/storage", STORAGE_JSON);
	harness
		.router
		.dispatch(NavigationIntent::tag_doc("storage"), None)
		.await;
	harness.surface.set_element_top(r"#DBD\:\:SQLite", 540.0);
	harness.surface.set_element_top("#abs-top", 120.0);

	harness.router.follow_pod_link("#DBD%3A%3ASQLite");

	let events = harness.surface.events();
	assert_eq!(
		events[events.len() - 2..],
		[
			SurfaceEvent::ResetScroll(Container::Tags),
			SurfaceEvent::ScrollTo(Container::Tags, 420.0),
		]
	);
}

#[rstest]
fn test_pod_external_link_leaves_page(harness: Harness) {
	harness.router.follow_pod_link("https://metacpan.org/pod/DBI");

	assert_eq!(
		harness.surface.events(),
		vec![SurfaceEvent::NavigatePage("https://metacpan.org/pod/DBI".into())]
	);
}

#[rstest]
fn test_pod_link_to_local_docs_follows_stored_base_url() {
	let prefs = Rc::new(MemoryPreferences::new());
	prefs.set("docBaseUrl", "https://docs.example.org/");
	let surface = Rc::new(RecordingSurface::new());
	let router = Router::new(
		NavSettings::default(),
		Rc::new(ScriptedFetcher::new()),
		surface.clone(),
	)
	.with_preferences(prefs);

	router.follow_pod_link("http://localhost:8080/docs/DBI.html");

	assert_eq!(
		surface.events(),
		vec![SurfaceEvent::NavigatePage(
			"https://docs.example.org/docs/DBI.html".into()
		)]
	);
}

#[rstest]
#[tokio::test]
async fn test_stored_base_url_rewrites_doc_links() {
	let prefs = Rc::new(MemoryPreferences::new());
	prefs.set("docBaseUrl", "https://docs.example.org");
	let fetcher = Rc::new(ScriptedFetcher::new());
	let surface = Rc::new(RecordingSurface::new());
	let router = Router::new(NavSettings::default(), fetcher.clone(), surface.clone())
		.with_preferences(prefs);
	fetcher.respond_json(
		"/bedrock/docs/overview",
		r#"{"html": "<a href=\"http://localhost:8080/docs/x.html\">x</a>"}"#,
	);

	router.navigate("#overview", None).await;

	assert_eq!(
		surface.content(Container::Docs).unwrap(),
		r#"<a href="https://docs.example.org/docs/x.html">x</a>"#
	);
}

#[rstest]
#[tokio::test]
async fn test_dismiss_banner(harness: Harness) {
	harness
		.fetcher
		.respond_error("/bedrock/tag", 404, "Not Found");
	harness.router.navigate("#tags", None).await;
	assert!(harness.surface.banner().is_some());

	harness.router.dismiss_banner();

	assert!(harness.surface.banner().is_none());
	assert!(harness.router.state().reporter().current().is_none());
}
