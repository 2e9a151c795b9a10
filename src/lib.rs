//! # Bedrock Docs
//!
//! Client-side navigation for the Bedrock documentation browser.
//!
//! This crate re-exports the navigation core ([`nav`]): fragment routing,
//! content loading, view switching, history and error reporting. With the
//! `ui` feature on `wasm32`, the browser entry point is available as [`ui`].
//!
//! ## Example
//!
//! ```
//! use bedrock_docs::{NavSettings, resolve_fragment};
//!
//! let settings = NavSettings::default();
//! let intent = resolve_fragment(&settings, "#tags", None);
//! assert_eq!(intent.canonical_fragment().as_deref(), Some("tags"));
//! ```

pub use bedrock_docs_nav as nav;
pub use bedrock_docs_nav::*;

#[cfg(all(target_arch = "wasm32", feature = "ui"))]
pub use bedrock_docs_ui as ui;
