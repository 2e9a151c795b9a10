//! Logging setup.
//!
//! The crate logs through `tracing`. [`init_logging`] installs a subscriber
//! for the current target: the browser console on `wasm32`, a formatted
//! stderr writer elsewhere (honouring `RUST_LOG`).

use std::sync::Once;
use tracing::Level;

static INIT: Once = Once::new();

/// Installs the global subscriber. Calls after the first one are ignored.
pub fn init_logging(level: Level) {
	INIT.call_once(|| install(level));
}

/// Whether [`init_logging`] has run.
pub fn is_initialized() -> bool {
	INIT.is_completed()
}

#[cfg(target_arch = "wasm32")]
fn install(level: Level) {
	let config = tracing_wasm::WASMLayerConfigBuilder::new()
		.set_max_level(level)
		.build();
	tracing_wasm::set_as_global_default_with_config(config);
}

#[cfg(not(target_arch = "wasm32"))]
fn install(level: Level) {
	use tracing_subscriber::EnvFilter;
	use tracing_subscriber::filter::LevelFilter;

	let filter = EnvFilter::builder()
		.with_default_directive(LevelFilter::from_level(level).into())
		.from_env_lossy();

	// Another subscriber may already be installed (e.g. by a test harness).
	let _ = tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_target(false)
		.try_init();
}
