//! The dismissible error banner.

use crate::error::FetchError;
use crate::surface::Surface;
use std::fmt;

/// Banner severity, mapped onto the page's alert styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AlertKind {
	/// Errors.
	#[default]
	Danger,
	/// Not-found conditions and validation failures.
	Warning,
	/// Confirmations.
	Success,
	/// Informational notices.
	Info,
}

impl AlertKind {
	/// Style suffix of this kind.
	pub fn as_str(self) -> &'static str {
		match self {
			AlertKind::Danger => "danger",
			AlertKind::Warning => "warning",
			AlertKind::Success => "success",
			AlertKind::Info => "info",
		}
	}
}

impl fmt::Display for AlertKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A message shown in the banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
	/// Text shown to the user.
	pub message: String,
	/// Severity.
	pub kind: AlertKind,
}

impl Banner {
	/// Creates a banner.
	pub fn new(message: impl Into<String>, kind: AlertKind) -> Self {
		Self {
			message: message.into(),
			kind,
		}
	}

	/// Class list for the banner element.
	pub fn css_class(&self) -> String {
		format!("alert alert-{} alert-dismissible fade show", self.kind)
	}
}

impl From<&FetchError> for Banner {
	fn from(err: &FetchError) -> Self {
		Self::new(err.banner_message(), err.alert_kind())
	}
}

/// Shows the last reported failure.
#[derive(Debug, Default)]
pub struct ErrorReporter {
	current: Option<Banner>,
	reported: usize,
}

impl ErrorReporter {
	/// Creates a reporter with no banner showing.
	pub fn new() -> Self {
		Self::default()
	}

	/// Shows a failed fetch.
	pub fn report(&mut self, err: &FetchError, surface: &dyn Surface) {
		tracing::warn!(error = %err, "content request failed");
		self.show(Banner::from(err), surface);
	}

	/// Shows an arbitrary message.
	pub fn report_message(
		&mut self,
		message: impl Into<String>,
		kind: AlertKind,
		surface: &dyn Surface,
	) {
		self.show(Banner::new(message, kind), surface);
	}

	fn show(&mut self, banner: Banner, surface: &dyn Surface) {
		surface.show_banner(&banner);
		self.current = Some(banner);
		self.reported += 1;
	}

	/// Hides the banner.
	pub fn dismiss(&mut self, surface: &dyn Surface) {
		if self.current.take().is_some() {
			surface.hide_banner();
		}
	}

	/// The banner currently showing.
	pub fn current(&self) -> Option<&Banner> {
		self.current.as_ref()
	}

	/// Number of banners shown so far.
	pub fn reported(&self) -> usize {
		self.reported
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::RecordingSurface;
	use rstest::rstest;

	#[rstest]
	#[case(AlertKind::Danger, "alert alert-danger alert-dismissible fade show")]
	#[case(AlertKind::Warning, "alert alert-warning alert-dismissible fade show")]
	#[case(AlertKind::Info, "alert alert-info alert-dismissible fade show")]
	fn test_css_class(#[case] kind: AlertKind, #[case] expected: &str) {
		assert_eq!(Banner::new("x", kind).css_class(), expected);
	}

	#[rstest]
	fn test_report_shows_latest_failure() {
		let surface = RecordingSurface::new();
		let mut reporter = ErrorReporter::new();

		reporter.report(&FetchError::network(500, "Internal Server Error"), &surface);
		reporter.report(&FetchError::empty("Bar"), &surface);

		let banner = surface.banner().unwrap();
		assert_eq!(banner.message, "Nothing found for \"Bar\"");
		assert_eq!(banner.kind, AlertKind::Warning);
		assert_eq!(reporter.reported(), 2);
	}

	#[rstest]
	fn test_dismiss_hides_banner() {
		let surface = RecordingSurface::new();
		let mut reporter = ErrorReporter::new();

		reporter.report_message("saved", AlertKind::Success, &surface);
		reporter.dismiss(&surface);

		assert!(reporter.current().is_none());
		assert!(surface.banner().is_none());
	}
}
