//! Telemetry helpers for applications embedding `highchart-rs`.
//!
//! Option building and rendering emit `tracing` events at debug/trace level.
//! Nothing is printed unless the host installs a subscriber, either through
//! `init_default_tracing` or its own `tracing` setup.

/// Directives used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,highchart_rs=debug";

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Filters come from `RUST_LOG`. Without it, other crates log at `info` and
/// this crate's render and tree events are shown from `debug` up.
/// Returns `false` when the feature is disabled or a global subscriber was
/// already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(DEFAULT_FILTER));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_FILTER, init_default_tracing};

    #[test]
    fn default_filter_surfaces_crate_debug_events() {
        assert!(DEFAULT_FILTER.split(',').any(|directive| directive == "highchart_rs=debug"));
    }

    #[cfg(not(feature = "telemetry"))]
    #[test]
    fn tracing_init_is_noop_without_feature() {
        assert!(!init_default_tracing());
    }

    #[cfg(feature = "telemetry")]
    #[test]
    fn second_tracing_init_reports_existing_subscriber() {
        let _ = init_default_tracing();
        assert!(!init_default_tracing());
    }
}
