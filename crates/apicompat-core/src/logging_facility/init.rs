//! Logging initialization module
//!
//! Provides a single initialization point for the logging facility.

use std::sync::Once;
use tracing_subscriber::{util::SubscriberInitExt, EnvFilter};

/// Logging profile configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// Human-readable output for development
    Development,
    /// JSON structured output for CI pipelines
    Production,
    /// Test capture mode for deterministic testing
    Test,
}

static INIT_ONCE: Once = Once::new();

/// Filter directive used when `RUST_LOG` is unset
fn default_directive(profile: Profile) -> &'static str {
    match profile {
        Profile::Development | Profile::Production => "apicompat=info",
        Profile::Test => "off",
    }
}

/// Initialize the logging facility
///
/// # Profiles
///
/// - **Development**: Human-readable logs, `apicompat=info` unless `RUST_LOG` is set
/// - **Production**: JSON structured logs, `apicompat=info` unless `RUST_LOG` is set
/// - **Test**: Bare registry; use [`super::init_test_capture`] for assertions
///
/// Calling this more than once is a no-op.
pub fn init(profile: Profile) {
    INIT_ONCE.call_once(|| match profile {
        Profile::Development => {
            tracing_subscriber::fmt()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(default_directive(profile))),
                )
                .init();
        }
        Profile::Production => {
            tracing_subscriber::fmt()
                .json()
                .with_writer(std::io::stderr)
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new(default_directive(profile))),
                )
                .init();
        }
        Profile::Test => {
            tracing_subscriber::registry().init();
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_equality() {
        assert_eq!(Profile::Development, Profile::Development);
        assert_ne!(Profile::Development, Profile::Production);
    }

    #[test]
    fn test_development_defaults_to_info() {
        assert_eq!(default_directive(Profile::Development), "apicompat=info");
        assert_eq!(
            default_directive(Profile::Development),
            default_directive(Profile::Production)
        );
    }
}
