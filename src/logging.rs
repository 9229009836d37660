//! Logging setup
//!
//! Human-readable or JSON-formatted `tracing` output on stderr, so report
//! and JSON output on stdout stay clean for piping.

use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter directive, by verbosity
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "legalis=debug"
    } else {
        "legalis=info"
    }
}

/// Initialize the global tracing subscriber
///
/// `RUST_LOG` takes precedence over the verbosity flag.
///
/// # Arguments
///
/// * `verbose` - Log debug events from this crate
/// * `json` - Emit one JSON object per event
///
/// # Errors
///
/// Returns error if the filter cannot be built or a subscriber is already set
///
/// # Examples
///
/// ```no_run
/// use legalis::logging::init_logging;
///
/// init_logging(false, true).unwrap();
/// tracing::info!("ready");
/// ```
pub fn init_logging(verbose: bool, json: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(verbose)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    if json {
        let layer = fmt::layer()
            .json()
            .with_current_span(true)
            .with_writer(std::io::stderr);
        registry.with(layer).try_init()?;
    } else {
        let layer = fmt::layer()
            .with_target(true)
            .with_level(true)
            .with_writer(std::io::stderr);
        registry.with(layer).try_init()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "legalis=info");
        assert_eq!(default_directive(true), "legalis=debug");
    }

    #[test]
    fn test_directives_parse() {
        assert!(EnvFilter::try_new(default_directive(false)).is_ok());
        assert!(EnvFilter::try_new(default_directive(true)).is_ok());
    }
}
