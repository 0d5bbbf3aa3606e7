use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// Install the global subscriber. `RUST_LOG` wins over the default filter.
    pub fn init() {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("buildmode=info"));

        // A second init (e.g. from tests) is not an error worth surfacing.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }

    pub fn mode_resolved(raw: Option<&str>, resolved: &str) {
        info!("Running in {} environment ({})", raw.unwrap_or("undefined"), resolved);
    }

    pub fn mode_fallback(raw: &str) {
        warn!(
            "⚠️  Unrecognized deployment mode '{}', falling back to development",
            raw
        );
    }

    pub fn copied(from: &str, to: &str) {
        info!("📄 Copied {} -> {}", from, to);
    }

    pub fn cleaned(dir: &str) {
        info!("🧹 Cleaned {}", dir);
    }

    pub fn env_loaded(path: &str, count: usize) {
        info!("🔐 Loaded {} variables from {}", count, path);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
