//! Container visibility and busy-indicator bookkeeping.
//!
//! The page consists of a fixed set of named containers of which at most one
//! is visible at a time. [`ViewRegistry`] owns that table and is the only
//! place that toggles visibility or loading indicators on the [`Surface`].

use crate::surface::Surface;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A named, mutually exclusive region of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Container {
	/// Tag lists, tag docs, module lists and plugin docs.
	Tags,
	/// Generic documentation pages.
	Docs,
	/// The plugin accordion.
	Plugins,
	/// Login form.
	Login,
	/// Logout confirmation.
	Logout,
	/// Session details.
	Session,
	/// Registration form.
	Register,
	/// Landing page.
	Welcome,
}

impl Container {
	/// Every known container, in page order.
	pub const ALL: [Container; 8] = [
		Container::Tags,
		Container::Docs,
		Container::Plugins,
		Container::Login,
		Container::Logout,
		Container::Session,
		Container::Register,
		Container::Welcome,
	];

	/// Short name, as used in URL fragments.
	pub fn name(self) -> &'static str {
		match self {
			Container::Tags => "tags",
			Container::Docs => "docs",
			Container::Plugins => "plugins",
			Container::Login => "login",
			Container::Logout => "logout",
			Container::Session => "session",
			Container::Register => "register",
			Container::Welcome => "welcome",
		}
	}

	/// DOM id of the element backing this container.
	pub fn element_id(self) -> String {
		format!("{}-container", self.name())
	}

	/// Looks up a container by its short name.
	pub fn from_name(name: &str) -> Option<Container> {
		Container::ALL.into_iter().find(|c| c.name() == name)
	}
}

impl fmt::Display for Container {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Page-level controls whose visibility follows the active view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
	/// Scroll-to-top button.
	ScrollTop,
	/// Back button.
	Back,
}

impl Control {
	/// DOM id of the control element.
	pub fn element_id(self) -> &'static str {
		match self {
			Control::ScrollTop => "top-button",
			Control::Back => "back-button",
		}
	}
}

/// Snapshot of one container's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerState {
	/// Which container.
	pub container: Container,
	/// Whether it is the visible container.
	pub visible: bool,
	/// Whether a fetch for it is in flight.
	pub busy: bool,
}

/// Control options applied when a container is activated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActivateOptions {
	/// Show the scroll-to-top control.
	pub show_scroll_top: bool,
	/// Show the back control (only honored with more than one history entry).
	pub show_back: bool,
}

impl ActivateOptions {
	/// Options for static sections: no controls.
	pub const fn plain() -> Self {
		Self {
			show_scroll_top: false,
			show_back: false,
		}
	}

	/// Options for list views: back control only.
	pub const fn list() -> Self {
		Self {
			show_scroll_top: false,
			show_back: true,
		}
	}

	/// Options for documents: scroll-to-top and back controls.
	pub const fn document() -> Self {
		Self {
			show_scroll_top: true,
			show_back: true,
		}
	}
}

/// Monotonic stamp identifying one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(pub u64);

impl Generation {
	/// The stamp following this one.
	pub fn next(self) -> Generation {
		Generation(self.0 + 1)
	}
}

/// Proof that a busy indicator was set for one fetch.
///
/// Tickets are neither `Clone` nor `Copy`, so each one can be handed back
/// to [`ViewRegistry::clear_busy`] exactly once.
#[derive(Debug, PartialEq, Eq)]
#[must_use = "a busy ticket must be returned to ViewRegistry::clear_busy"]
pub struct BusyTicket {
	container: Container,
	generation: Generation,
}

impl BusyTicket {
	/// The container the indicator was set on.
	pub fn container(&self) -> Container {
		self.container
	}

	/// The dispatch that owns this ticket.
	pub fn generation(&self) -> Generation {
		self.generation
	}
}

/// The container visibility table.
#[derive(Debug, Default)]
pub struct ViewRegistry {
	active: Option<Container>,
	busy_owner: HashMap<Container, Generation>,
	outstanding: usize,
}

impl ViewRegistry {
	/// Creates a registry with every container hidden and idle.
	pub fn new() -> Self {
		Self::default()
	}

	/// The currently visible container, if any.
	pub fn active(&self) -> Option<Container> {
		self.active
	}

	/// Whether the indicator of `container` is showing.
	pub fn is_busy(&self, container: Container) -> bool {
		self.busy_owner.contains_key(&container)
	}

	/// Number of tickets handed out and not yet cleared.
	pub fn outstanding(&self) -> usize {
		self.outstanding
	}

	/// State of one container.
	pub fn state(&self, container: Container) -> ContainerState {
		ContainerState {
			container,
			visible: self.active == Some(container),
			busy: self.is_busy(container),
		}
	}

	/// State of every container, in page order.
	pub fn states(&self) -> Vec<ContainerState> {
		Container::ALL.into_iter().map(|c| self.state(c)).collect()
	}

	/// Shows the busy indicator on `container` for the dispatch `generation`.
	///
	/// The indicator is only drawn once even when several fetches target the
	/// same container; the newest generation becomes the owner.
	pub fn set_busy(
		&mut self,
		container: Container,
		generation: Generation,
		surface: &dyn Surface,
	) -> BusyTicket {
		if self.busy_owner.insert(container, generation).is_none() {
			surface.set_busy_indicator(container, true);
		}
		self.outstanding += 1;
		tracing::trace!(%container, generation = generation.0, "busy set");
		BusyTicket {
			container,
			generation,
		}
	}

	/// Returns a ticket.
	///
	/// The indicator is removed only when the ticket belongs to the newest
	/// fetch on that container; older tickets are retired silently.
	pub fn clear_busy(&mut self, ticket: BusyTicket, surface: &dyn Surface) {
		let BusyTicket {
			container,
			generation,
		} = ticket;
		self.outstanding = self.outstanding.saturating_sub(1);
		if self.busy_owner.get(&container) == Some(&generation) {
			self.busy_owner.remove(&container);
			surface.set_busy_indicator(container, false);
		}
		tracing::trace!(%container, generation = generation.0, "busy cleared");
	}

	/// Makes `container` the only visible container.
	///
	/// `history_len` is the number of recorded navigations; the back control
	/// is shown only when there is something to go back to.
	pub fn activate(
		&mut self,
		container: Container,
		options: ActivateOptions,
		history_len: usize,
		surface: &dyn Surface,
	) {
		for other in Container::ALL {
			if other != container {
				surface.set_visible(other, false);
			}
		}
		surface.set_visible(container, true);
		self.active = Some(container);

		surface.set_control_visible(Control::ScrollTop, options.show_scroll_top);
		surface.set_control_visible(Control::Back, options.show_back && history_len > 1);
		tracing::debug!(%container, "container activated");
	}
}

/// Height available to a scrollable container between its top edge and the
/// page footer.
pub fn container_height(footer_top: f64, container_top: f64) -> f64 {
	(footer_top - container_top).max(0.0)
}
