//! Diagnostic logging setup.
//!
//! The query engine emits `tracing` events (`debug` per query, `trace` per
//! match or rendered view). Applications that want to see them install a
//! subscriber once at startup:
//!
//! ```toml
//! [logging]
//! default = "warn"
//!
//! [logging.modules]
//! "klish_tree_core::search" = "trace"
//! ```
//!
//! `RUST_LOG` takes precedence over the configuration:
//! ```bash
//! RUST_LOG=klish_tree_core=debug my-tool
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

/// Filter directives for a logging configuration, e.g. `warn,klish_tree_core::search=trace`
pub fn filter_directives(config: &LoggingConfig) -> String {
    let mut directives = config.default.clone();

    let mut modules: Vec<_> = config.modules.iter().collect();
    modules.sort();
    for (module, level) in modules {
        directives.push_str(&format!(",{module}={level}"));
    }

    directives
}

/// Initialize logging with configuration.
///
/// Only the first call in a process takes effect. Writes to stderr so that
/// rendered output on stdout stays clean.
pub fn init_with_config(config: &LoggingConfig) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(filter_directives(config))
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_timer(CompactTime)
            .with_level(true)
            .with_filter(filter);

        // Another subscriber may already be installed by the host application
        let _ = tracing_subscriber::registry().with(fmt_layer).try_init();
    });
}

/// Initialize logging with `LoggingConfig::default()` (`warn`).
pub fn init() {
    init_with_config(&LoggingConfig::default());
}
