//! Error types for the navigation core.
//!
//! [`FetchError`] is the only error that reaches the user: its `Display`
//! output is exactly the text shown in the error banner.

use crate::banner::AlertKind;
use thiserror::Error;

/// A failed content request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FetchError {
	/// Transport failure or a non-2xx response.
	///
	/// `status` is `0` when no HTTP response was received at all.
	#[error("Error fetching data [{status}]: {message}")]
	Network {
		/// HTTP status code, or `0` for transport failures.
		status: u16,
		/// Transport-layer status text or error description.
		message: String,
	},

	/// A 2xx response whose body is not the expected JSON envelope.
	#[error("Error fetching data [{status}]: malformed response ({detail})")]
	Malformed {
		/// HTTP status code of the response.
		status: u16,
		/// Decoder diagnostic.
		detail: String,
	},

	/// A successful lookup that produced no content.
	#[error("Nothing found for \"{identifier}\"")]
	EmptyResult {
		/// The identifier that was looked up.
		identifier: String,
	},
}

impl FetchError {
	/// Builds a [`FetchError::Network`].
	pub fn network(status: u16, message: impl Into<String>) -> Self {
		Self::Network {
			status,
			message: message.into(),
		}
	}

	/// Builds a [`FetchError::Malformed`].
	pub fn malformed(status: u16, detail: impl Into<String>) -> Self {
		Self::Malformed {
			status,
			detail: detail.into(),
		}
	}

	/// Builds a [`FetchError::EmptyResult`].
	pub fn empty(identifier: impl Into<String>) -> Self {
		Self::EmptyResult {
			identifier: identifier.into(),
		}
	}

	/// The HTTP status associated with this error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Network { status, .. } | Self::Malformed { status, .. } => Some(*status),
			Self::EmptyResult { .. } => None,
		}
	}

	/// Severity used when the error is shown in the banner.
	pub fn alert_kind(&self) -> AlertKind {
		match self {
			Self::EmptyResult { .. } => AlertKind::Warning,
			_ => AlertKind::Danger,
		}
	}

	/// The banner text for this error.
	pub fn banner_message(&self) -> String {
		self.to_string()
	}
}

/// Invalid navigation settings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum SettingsError {
	/// The settings document is not valid JSON for [`crate::NavSettings`].
	#[error("invalid settings document: {0}")]
	Parse(String),

	/// The API prefix must be an absolute path.
	#[error("api prefix must start with '/': {0:?}")]
	InvalidPrefix(String),

	/// The landing section is empty.
	#[error("landing section must not be empty")]
	EmptyLanding,

	/// The landing section does not name a static section.
	#[error("landing section {0:?} is not a static section")]
	UnknownLanding(String),

	/// The documentation base URL is empty.
	#[error("documentation base url must not be empty")]
	EmptyBaseUrl,
}

impl From<serde_json::Error> for SettingsError {
	fn from(err: serde_json::Error) -> Self {
		Self::Parse(err.to_string())
	}
}

/// A login or registration form that fails client-side validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FormError {
	/// Username or password missing on the login form.
	#[error("please enter username and password")]
	MissingCredentials,

	/// Username, password or email missing on the registration form.
	#[error("username, password and email are required")]
	MissingRegistrationFields,
}
