//! Back-navigation history.
//!
//! A LIFO stack of user intents, kept apart from the browser's native
//! history. The top entry is the view currently displayed; going back replays
//! the entry below and drops the top one once the replay has rendered.

use crate::intent::NavigationIntent;

/// Opaque handle to the element that started a navigation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceRef(String);

impl SourceRef {
	/// Wraps a handle.
	pub fn new(handle: impl Into<String>) -> Self {
		Self(handle.into())
	}

	/// The handle text.
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

/// One recorded navigation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
	/// The intent to replay.
	pub intent: NavigationIntent,
	/// The element that triggered it, when it came from a click.
	pub source: Option<SourceRef>,
}

impl HistoryEntry {
	/// Creates an entry.
	pub fn new(intent: NavigationIntent, source: Option<SourceRef>) -> Self {
		Self { intent, source }
	}
}

/// Outcome of [`NavigationHistoryStack::back`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackStep {
	/// Replay this entry; its intent is already flagged as a replay.
	Replay(HistoryEntry),
	/// Nothing to go back to.
	Exhausted,
}

/// The back-navigation stack.
#[derive(Debug, Clone, Default)]
pub struct NavigationHistoryStack {
	entries: Vec<HistoryEntry>,
}

impl NavigationHistoryStack {
	/// Creates an empty stack.
	pub fn new() -> Self {
		Self::default()
	}

	/// Records `entry` unless it is a replay. Returns whether it was recorded.
	pub fn push(&mut self, entry: HistoryEntry) -> bool {
		if entry.intent.is_replay() {
			tracing::trace!(intent = %entry.intent, "replay not recorded");
			return false;
		}
		self.entries.push(entry);
		true
	}

	/// Returns the entry to replay for going back, leaving the stack as is.
	///
	/// The current entry stays on top until the replay has rendered and
	/// [`NavigationHistoryStack::complete_back`] drops it. With fewer than two
	/// entries there is no previous view.
	pub fn back(&self) -> BackStep {
		match self.entries.len().checked_sub(2) {
			Some(index) => {
				let previous = &self.entries[index];
				BackStep::Replay(HistoryEntry {
					intent: previous.intent.as_replay(),
					source: previous.source.clone(),
				})
			}
			None => BackStep::Exhausted,
		}
	}

	/// Drops `left`, the entry that was displayed when going back started,
	/// once the replayed view is on screen.
	///
	/// Nothing is dropped when `left` is no longer on top (a newer navigation
	/// was recorded meanwhile) or when it is the only entry.
	pub fn complete_back(&mut self, left: &HistoryEntry) -> bool {
		if self.entries.len() < 2 || self.entries.last() != Some(left) {
			return false;
		}
		self.entries.pop();
		true
	}

	/// Whether [`NavigationHistoryStack::back`] would replay something.
	pub fn can_go_back(&self) -> bool {
		self.entries.len() > 1
	}

	/// The entry of the view currently displayed.
	pub fn current(&self) -> Option<&HistoryEntry> {
		self.entries.last()
	}

	/// Number of entries.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Whether the stack is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Entries, oldest first.
	pub fn entries(&self) -> &[HistoryEntry] {
		&self.entries
	}
}
