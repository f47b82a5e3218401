//! Logging setup for hosts embedding the library
//!
//! Filter directives come from `RUST_LOG`; without it only this crate's
//! `info` events and above are printed.

use once_cell::sync::OnceCell;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_FILTER: &str = "mentions_core=info";

static INIT: OnceCell<()> = OnceCell::new();

/// Install a `fmt` subscriber. Safe to call more than once; a subscriber the
/// host already installed is left in place.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}
