use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter, filter::Targets, fmt, prelude::__tracing_subscriber_SubscriberExt,
    util::SubscriberInitExt,
};

/// Crate-level gate: silent unless `verbose`, then debug for this crate only.
fn app_filter(verbose: bool) -> Targets {
    let level_filter = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::OFF
    };
    Targets::new().with_target("pfolio", level_filter)
}

/// Installs the global subscriber.
///
/// Log output is off unless `verbose` is set. `RUST_LOG` can only narrow
/// what `verbose` lets through; user-facing warnings are printed by the CLI.
pub fn init_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "off" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().pretty().without_time().with_writer(std::io::stderr))
        .with(app_filter(verbose))
        .with(env_filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::Level;

    #[test]
    fn test_quiet_by_default() {
        let filter = app_filter(false);
        assert!(!filter.would_enable("pfolio::core::portfolio", &Level::WARN));
        assert!(!filter.would_enable("pfolio", &Level::ERROR));
    }

    #[test]
    fn test_verbose_enables_crate_debug_only() {
        let filter = app_filter(true);
        assert!(filter.would_enable("pfolio::providers::fallback", &Level::DEBUG));
        assert!(!filter.would_enable("pfolio", &Level::TRACE));
        assert!(!filter.would_enable("reqwest", &Level::WARN));
    }
}
