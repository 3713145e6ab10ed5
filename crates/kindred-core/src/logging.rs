//! Logging initialization.
//!
//! The engine only emits events (comparison boundaries at `debug`, cycle
//! closures at `trace`); installing a subscriber is the embedding
//! application's job. This module offers a one-call setup for applications
//! that have no subscriber of their own.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Output profile for [`init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output, engine events down to `debug`.
    Development,
    /// JSON output, `info` and above.
    Production,
    /// Silent global subscriber so test output stays clean.
    Test,
}

static INIT_ONCE: Once = Once::new();

fn filter(default_directive: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive))
}

/// Installs the global tracing subscriber for the chosen profile.
///
/// Call once at startup; later calls are no-ops. `RUST_LOG` overrides the
/// profile's default filter when set.
///
/// # Example
///
/// ```
/// use kindred_core::logging::{init, Profile};
///
/// init(Profile::Development);
/// ```
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_env_filter(filter("kindred_core=debug"))
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter("kindred_core=info"))
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}
