//! Test doubles for driving a [`crate::Router`] without a browser.
//!
//! [`ScriptedFetcher`] answers requests from canned responses (optionally
//! held back until the test releases them) and [`RecordingSurface`] keeps an
//! in-memory model of the page plus a log of every call it received.

use crate::banner::Banner;
use crate::error::FetchError;
use crate::fetch::{ContentFetcher, FetchResult, decode_payload};
use crate::registry::{Container, Control};
use crate::surface::Surface;
use async_trait::async_trait;
use futures::channel::oneshot;
use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

enum Reply {
	Ready(FetchResult),
	Deferred(oneshot::Receiver<FetchResult>),
}

/// A [`ContentFetcher`] answering from scripted responses.
///
/// Responses are queued per endpoint. The last queued ready response keeps
/// answering once the queue is drained; unknown endpoints fail with 404.
#[derive(Default)]
pub struct ScriptedFetcher {
	routes: RefCell<HashMap<String, VecDeque<Reply>>>,
	requests: RefCell<Vec<String>>,
}

/// Completes a response queued with [`ScriptedFetcher::defer`].
#[derive(Debug)]
pub struct Release(oneshot::Sender<FetchResult>);

impl Release {
	/// Completes the request with a 200 response carrying `body`.
	pub fn json(self, body: &str) {
		self.result(decode_payload(200, body));
	}

	/// Completes the request with `result`.
	pub fn result(self, result: FetchResult) {
		let _ = self.0.send(result);
	}
}

impl ScriptedFetcher {
	/// Creates a fetcher with no scripted responses.
	pub fn new() -> Self {
		Self::default()
	}

	/// Queues a 200 response with `body` for `endpoint`.
	pub fn respond_json(&self, endpoint: &str, body: &str) -> &Self {
		self.respond(endpoint, decode_payload(200, body))
	}

	/// Queues an HTTP failure for `endpoint`.
	pub fn respond_error(&self, endpoint: &str, status: u16, message: &str) -> &Self {
		self.respond(endpoint, Err(FetchError::network(status, message)))
	}

	/// Queues `result` for `endpoint`.
	pub fn respond(&self, endpoint: &str, result: FetchResult) -> &Self {
		self.queue(endpoint, Reply::Ready(result));
		self
	}

	/// Queues a response for `endpoint` that stays pending until released.
	pub fn defer(&self, endpoint: &str) -> Release {
		let (tx, rx) = oneshot::channel();
		self.queue(endpoint, Reply::Deferred(rx));
		Release(tx)
	}

	fn queue(&self, endpoint: &str, reply: Reply) {
		self.routes
			.borrow_mut()
			.entry(endpoint.to_string())
			.or_default()
			.push_back(reply);
	}

	/// Every endpoint requested so far, in order.
	pub fn requests(&self) -> Vec<String> {
		self.requests.borrow().clone()
	}

	/// How often `endpoint` was requested.
	pub fn request_count(&self, endpoint: &str) -> usize {
		self.requests
			.borrow()
			.iter()
			.filter(|r| r.as_str() == endpoint)
			.count()
	}

	fn next_reply(&self, endpoint: &str) -> Option<Reply> {
		let mut routes = self.routes.borrow_mut();
		let queue = routes.get_mut(endpoint)?;
		if queue.len() > 1 {
			return queue.pop_front();
		}
		match queue.front() {
			Some(Reply::Ready(result)) => Some(Reply::Ready(result.clone())),
			_ => queue.pop_front(),
		}
	}
}

#[async_trait(?Send)]
impl ContentFetcher for ScriptedFetcher {
	async fn fetch(&self, endpoint: &str) -> FetchResult {
		self.requests.borrow_mut().push(endpoint.to_string());
		match self.next_reply(endpoint) {
			Some(Reply::Ready(result)) => result,
			Some(Reply::Deferred(rx)) => rx
				.await
				.unwrap_or_else(|_| Err(FetchError::network(0, "request abandoned"))),
			None => Err(FetchError::network(404, "Not Found")),
		}
	}
}

/// One call received by a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
	/// `set_content`.
	Content(Container),
	/// `set_visible`.
	Visible(Container, bool),
	/// `set_busy_indicator`.
	Busy(Container, bool),
	/// `set_control_visible`.
	ControlVisible(Control, bool),
	/// `reset_scroll`.
	ResetScroll(Container),
	/// `scroll_container_to`.
	ScrollTo(Container, f64),
	/// `show_banner`.
	BannerShown(Banner),
	/// `hide_banner`.
	BannerHidden,
	/// `push_fragment`.
	PushFragment(String),
	/// `replace_fragment`.
	ReplaceFragment(String),
	/// `open_external`.
	OpenExternal(String),
	/// `navigate_page`.
	NavigatePage(String),
}

/// An in-memory page.
#[derive(Debug, Default)]
pub struct RecordingSurface {
	content: RefCell<HashMap<Container, String>>,
	visible: RefCell<BTreeSet<Container>>,
	busy: RefCell<BTreeSet<Container>>,
	controls: RefCell<HashSet<Control>>,
	banner: RefCell<Option<Banner>>,
	location: RefCell<String>,
	offsets: RefCell<HashMap<String, f64>>,
	events: RefCell<Vec<SurfaceEvent>>,
}

impl RecordingSurface {
	/// Creates an empty page.
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the page offset reported for `selector`.
	pub fn set_element_top(&self, selector: &str, top: f64) {
		self.offsets.borrow_mut().insert(selector.to_string(), top);
	}

	/// Content of `container`, if any was set.
	pub fn content(&self, container: Container) -> Option<String> {
		self.content.borrow().get(&container).cloned()
	}

	/// Containers currently shown.
	pub fn visible_containers(&self) -> Vec<Container> {
		self.visible.borrow().iter().copied().collect()
	}

	/// Whether the indicator of `container` is showing.
	pub fn is_busy(&self, container: Container) -> bool {
		self.busy.borrow().contains(&container)
	}

	/// Whether `control` is showing.
	pub fn control_visible(&self, control: Control) -> bool {
		self.controls.borrow().contains(&control)
	}

	/// The banner currently showing.
	pub fn banner(&self) -> Option<Banner> {
		self.banner.borrow().clone()
	}

	/// Fragment in the address bar.
	pub fn location(&self) -> String {
		self.location.borrow().clone()
	}

	/// Every call received, in order.
	pub fn events(&self) -> Vec<SurfaceEvent> {
		self.events.borrow().clone()
	}

	/// Number of (shown, hidden) transitions of the indicator of `container`.
	pub fn busy_transitions(&self, container: Container) -> (usize, usize) {
		self.events
			.borrow()
			.iter()
			.fold((0, 0), |(on, off), event| match event {
				SurfaceEvent::Busy(c, true) if *c == container => (on + 1, off),
				SurfaceEvent::Busy(c, false) if *c == container => (on, off + 1),
				_ => (on, off),
			})
	}

	/// Containers whose scroll position was reset, in order.
	pub fn scroll_resets(&self) -> Vec<Container> {
		self.events
			.borrow()
			.iter()
			.filter_map(|event| match event {
				SurfaceEvent::ResetScroll(c) => Some(*c),
				_ => None,
			})
			.collect()
	}

	/// Fragments pushed onto the browser history, in order.
	pub fn pushed_fragments(&self) -> Vec<String> {
		self.events
			.borrow()
			.iter()
			.filter_map(|event| match event {
				SurfaceEvent::PushFragment(f) => Some(f.clone()),
				_ => None,
			})
			.collect()
	}

	fn record(&self, event: SurfaceEvent) {
		self.events.borrow_mut().push(event);
	}
}

impl Surface for RecordingSurface {
	fn set_content(&self, container: Container, html: &str) {
		self.content.borrow_mut().insert(container, html.to_string());
		self.record(SurfaceEvent::Content(container));
	}

	fn set_visible(&self, container: Container, visible: bool) {
		let mut shown = self.visible.borrow_mut();
		if visible {
			shown.insert(container);
		} else {
			shown.remove(&container);
		}
		drop(shown);
		self.record(SurfaceEvent::Visible(container, visible));
	}

	fn set_busy_indicator(&self, container: Container, busy: bool) {
		let mut spinning = self.busy.borrow_mut();
		if busy {
			spinning.insert(container);
		} else {
			spinning.remove(&container);
		}
		drop(spinning);
		self.record(SurfaceEvent::Busy(container, busy));
	}

	fn set_control_visible(&self, control: Control, visible: bool) {
		let mut controls = self.controls.borrow_mut();
		if visible {
			controls.insert(control);
		} else {
			controls.remove(&control);
		}
		drop(controls);
		self.record(SurfaceEvent::ControlVisible(control, visible));
	}

	fn reset_scroll(&self, container: Container) {
		self.record(SurfaceEvent::ResetScroll(container));
	}

	fn scroll_container_to(&self, container: Container, offset: f64) {
		self.record(SurfaceEvent::ScrollTo(container, offset));
	}

	fn element_top(&self, selector: &str) -> Option<f64> {
		self.offsets.borrow().get(selector).copied()
	}

	fn show_banner(&self, banner: &Banner) {
		*self.banner.borrow_mut() = Some(banner.clone());
		self.record(SurfaceEvent::BannerShown(banner.clone()));
	}

	fn hide_banner(&self) {
		*self.banner.borrow_mut() = None;
		self.record(SurfaceEvent::BannerHidden);
	}

	fn push_fragment(&self, fragment: &str) {
		*self.location.borrow_mut() = fragment.to_string();
		self.record(SurfaceEvent::PushFragment(fragment.to_string()));
	}

	fn replace_fragment(&self, fragment: &str) {
		*self.location.borrow_mut() = fragment.to_string();
		self.record(SurfaceEvent::ReplaceFragment(fragment.to_string()));
	}

	fn open_external(&self, url: &str) {
		self.record(SurfaceEvent::OpenExternal(url.to_string()));
	}

	fn navigate_page(&self, url: &str) {
		self.record(SurfaceEvent::NavigatePage(url.to_string()));
	}
}
