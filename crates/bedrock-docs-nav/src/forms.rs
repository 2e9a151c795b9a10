//! Client-side checks of the login and registration forms.
//!
//! Submitting the forms is left to the page; only the validation outcome is
//! reported through the banner.

use crate::error::FormError;

/// Fields of the login form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
	/// User name.
	pub username: String,
	/// Password.
	pub password: String,
}

impl LoginForm {
	/// Creates a login form.
	pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
		Self {
			username: username.into(),
			password: password.into(),
		}
	}

	/// Requires both fields to be non-blank.
	pub fn validate(&self) -> Result<(), FormError> {
		if is_blank(&self.username) || is_blank(&self.password) {
			return Err(FormError::MissingCredentials);
		}
		Ok(())
	}
}

/// Fields of the registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
	/// User name.
	pub username: String,
	/// Password.
	pub password: String,
	/// Email address.
	pub email: String,
	/// Optional first name.
	pub first_name: String,
	/// Optional last name.
	pub last_name: String,
}

impl RegisterForm {
	/// Requires user name, password and email to be non-blank.
	pub fn validate(&self) -> Result<(), FormError> {
		if is_blank(&self.username) || is_blank(&self.password) || is_blank(&self.email) {
			return Err(FormError::MissingRegistrationFields);
		}
		Ok(())
	}
}

fn is_blank(value: &str) -> bool {
	value.trim().is_empty()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("admin", "secret", true)]
	#[case("admin", "  ", false)]
	#[case("", "secret", false)]
	fn test_login_validation(#[case] user: &str, #[case] pass: &str, #[case] ok: bool) {
		let result = LoginForm::new(user, pass).validate();
		assert_eq!(result.is_ok(), ok);
		if !ok {
			assert_eq!(result, Err(FormError::MissingCredentials));
		}
	}

	#[rstest]
	fn test_register_requires_email() {
		let mut form = RegisterForm {
			username: "fred".into(),
			password: "pw".into(),
			..Default::default()
		};
		assert_eq!(form.validate(), Err(FormError::MissingRegistrationFields));

		form.email = "fred@example.org".into();
		assert!(form.validate().is_ok());
	}
}
