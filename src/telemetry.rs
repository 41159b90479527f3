use anyhow::{Result, anyhow};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingSection;

/// Build the filter: `RUST_LOG` wins, then `verbose`, then the config.
pub fn build_filter(config: &LoggingSection, verbose: bool) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    let directives = if verbose {
        "plantdesk=debug,tower_http=debug,info"
    } else {
        config.filter.as_str()
    };
    EnvFilter::try_new(directives)
        .map_err(|e| anyhow!("Invalid logging filter '{}': {}", directives, e))
}

/// Install the global tracing subscriber. Logs go to stderr so command
/// output on stdout stays machine-readable.
pub fn init_tracing(config: &LoggingSection, verbose: bool) -> Result<()> {
    let filter = build_filter(config, verbose)?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if config.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    result.map_err(|e| anyhow!("Failed to init subscriber: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_filter_is_accepted() {
        let config = LoggingSection::default();
        assert!(build_filter(&config, false).is_ok());
    }

    #[test]
    fn garbage_filter_is_rejected() {
        let config = LoggingSection {
            filter: "plantdesk=loudest".to_string(),
            json: false,
        };
        // RUST_LOG may be set in the environment running the tests.
        if std::env::var_os("RUST_LOG").is_none() {
            assert!(build_filter(&config, false).is_err());
        }
    }
}
