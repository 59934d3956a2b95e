//! Tracing setup
//!
//! The subscriber is installed before the config file is read so config
//! loading is logged too. The configured `logging.level` is applied
//! afterwards through a reload handle, unless `RUST_LOG` is set.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{reload, EnvFilter, Registry};

/// Level used until the config file has been read
pub const STARTUP_LEVEL: &str = "info";

/// Reloadable filter layer over the bare registry
pub type FilterLayer = reload::Layer<EnvFilter, Registry>;

/// Handle for changing the log filter after startup
pub struct LogLevel {
    handle: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

impl LogLevel {
    /// Switch to the configured level; a `RUST_LOG` filter always wins
    pub fn apply(&self, level: &str) -> Result<(), reload::Error> {
        if self.from_env {
            return Ok(());
        }
        self.handle.reload(EnvFilter::new(level))
    }
}

/// Filter layer starting from `env_filter`, or [`STARTUP_LEVEL`] when `None`
pub fn reloadable_filter(env_filter: Option<EnvFilter>) -> (FilterLayer, LogLevel) {
    let from_env = env_filter.is_some();
    let filter = env_filter.unwrap_or_else(|| EnvFilter::new(STARTUP_LEVEL));
    let (layer, handle) = reload::Layer::new(filter);
    (layer, LogLevel { handle, from_env })
}

/// Install the global subscriber, writing to stderr
pub fn init_tracing() -> LogLevel {
    let (filter, level) = reloadable_filter(EnvFilter::try_from_default_env().ok());
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
    level
}
