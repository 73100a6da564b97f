//! Logging setup.
//!
//! Compact timestamped output on stderr with per-target level configuration.
//! `RUST_LOG` overrides the config file.
//!
//! # Configuration
//!
//! ```toml
//! [logging]
//! default = "warn"      # quiet by default
//!
//! [logging.modules]
//! extract = "debug"     # show parser diagnostics
//! embedding = "info"    # show model loading
//! ```
//!
//! # Environment Variable
//!
//! ```bash
//! RUST_LOG=debug docqa ask report.pdf "what changed?"
//! RUST_LOG=chunking=trace docqa chunk data.csv
//! ```

use std::sync::Once;
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Build the filter directive string from configuration.
///
/// `verbose` raises the default level to `debug` without touching per-target
/// overrides.
pub fn filter_directives(config: &LoggingConfig, verbose: bool) -> String {
    let mut filter = if verbose {
        "debug".to_string()
    } else {
        config.default.clone()
    };
    for (module, level) in &config.modules {
        filter.push_str(&format!(",{module}={level}"));
    }
    filter
}

/// Initialize logging with configuration.
///
/// Only the first call takes effect.
pub fn init_with_config(config: &LoggingConfig, verbose: bool) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(filter_directives(config, verbose))
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(CompactTime)
            .with_level(true)
            .with_filter(filter);

        tracing_subscriber::registry().with(fmt_layer).init();
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_directives() {
        let mut config = LoggingConfig::default();
        assert_eq!(filter_directives(&config, false), "warn");
        assert_eq!(filter_directives(&config, true), "debug");

        config.modules.insert("extract".into(), "trace".into());
        config.modules.insert("agent".into(), "info".into());
        assert_eq!(
            filter_directives(&config, false),
            "warn,extract=trace,agent=info"
        );
    }
}
