//! # bedrock-docs-nav
//!
//! Navigation and content-loading core of the Bedrock documentation
//! browser.
//!
//! The browser shows one of several containers (tags, docs, plugins, login,
//! ...) at a time and fills them with documentation fetched as JSON. This
//! crate holds everything that decides *what* to show:
//!
//! - [`Router`]: resolves URL fragments and clicks into
//!   [`NavigationIntent`]s and runs the matching content operation.
//! - [`ContentFetcher`] / [`HttpFetcher`]: one GET per request, decoded into
//!   a [`Payload`] or a [`FetchError`].
//! - [`ViewRegistry`]: at most one visible container, per-container busy
//!   indicators.
//! - [`NavigationHistoryStack`]: replayable back navigation.
//! - [`ErrorReporter`]: the dismissible error banner.
//! - [`PodLinkRewriter`]: in-container scrolling for pod document anchors.
//! - [`resolve_click`]: which page action a delegated click asks for.
//!
//! Everything the page has to do goes through the [`Surface`] trait, so the
//! whole state machine runs natively in tests (see the `testing` module,
//! behind the `testing` feature). The browser implementation lives in the
//! `bedrock-docs-ui` crate.
//!
//! ## Example
//!
//! ```
//! use bedrock_docs_nav::testing::{RecordingSurface, ScriptedFetcher};
//! use bedrock_docs_nav::{Container, DispatchOutcome, NavSettings, Router};
//! use std::rc::Rc;
//!
//! let fetcher = Rc::new(ScriptedFetcher::new());
//! fetcher.respond_json("/bedrock/tag", r#"{"tags": ["networking", "storage"]}"#);
//! let surface = Rc::new(RecordingSurface::new());
//! let router = Router::new(NavSettings::default(), fetcher, surface.clone());
//!
//! let outcome = futures::executor::block_on(router.navigate("#tags", None));
//! assert_eq!(outcome, DispatchOutcome::Rendered(Container::Tags));
//! assert_eq!(surface.visible_containers(), vec![Container::Tags]);
//! ```

pub mod banner;
pub mod binding;
pub mod error;
pub mod fetch;
pub mod forms;
pub mod history;
pub mod intent;
pub mod logging;
pub mod page;
pub mod pod;
pub mod preferences;
pub mod registry;
pub mod render;
pub mod router;
pub mod settings;
pub mod surface;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use banner::{AlertKind, Banner, ErrorReporter};
pub use binding::{ElementRole, LinkAction, LinkBinding};
pub use error::{FetchError, FormError, SettingsError};
pub use fetch::{ContentFetcher, FetchResult, HttpFetcher, Payload, PluginTree};
pub use forms::{LoginForm, RegisterForm};
pub use history::{BackStep, HistoryEntry, NavigationHistoryStack, SourceRef};
pub use intent::{IntentKind, ModuleSource, NavigationIntent};
pub use page::{ClickTarget, PageAction, PageForm, module_search_intent, resolve_click};
pub use pod::{PodLinkAction, PodLinkRewriter};
pub use preferences::{MemoryPreferences, Preferences};
pub use registry::{
	ActivateOptions, BusyTicket, Container, ContainerState, Control, Generation, ViewRegistry,
	container_height,
};
pub use render::RenderedFragment;
pub use router::{AppState, DispatchOutcome, Router, normalize_fragment, resolve_fragment};
pub use settings::NavSettings;
pub use surface::Surface;
