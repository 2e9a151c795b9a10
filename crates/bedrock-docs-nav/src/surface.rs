//! The presentation seam.
//!
//! The navigation core never touches the DOM. Everything it wants to change
//! on the page goes through a [`Surface`]; the browser build implements it
//! over `web-sys`, tests use [`crate::testing::RecordingSurface`].

use crate::banner::Banner;
use crate::registry::{Container, Control};

/// Page operations the navigation core depends on.
///
/// Implementations are used from a single thread and take `&self`; they are
/// expected to use interior mutability where they keep state.
pub trait Surface {
	/// Replaces the content of `container` with `html`.
	fn set_content(&self, container: Container, html: &str);

	/// Shows or hides `container`.
	fn set_visible(&self, container: Container, visible: bool);

	/// Shows or hides the loading indicator of `container`.
	fn set_busy_indicator(&self, container: Container, busy: bool);

	/// Shows or hides a page control.
	fn set_control_visible(&self, control: Control, visible: bool);

	/// Scrolls `container` back to its top.
	fn reset_scroll(&self, container: Container);

	/// Scrolls `container` to `offset` pixels from its top.
	fn scroll_container_to(&self, container: Container, offset: f64);

	/// Page offset of the first element matching `selector`, if present.
	fn element_top(&self, selector: &str) -> Option<f64>;

	/// Displays the error banner.
	fn show_banner(&self, banner: &Banner);

	/// Hides the error banner, leaving it in the page for reuse.
	fn hide_banner(&self);

	/// Pushes `#fragment` onto the browser history without firing
	/// `hashchange` or `popstate`.
	fn push_fragment(&self, fragment: &str);

	/// Replaces the current browser history entry with `#fragment`.
	fn replace_fragment(&self, fragment: &str);

	/// Opens `url` in a new window.
	fn open_external(&self, url: &str);

	/// Navigates the whole page to `url`.
	fn navigate_page(&self, url: &str);
}
