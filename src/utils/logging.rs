use crate::core::models::AssetKind;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// Install the global subscriber. `RUST_LOG` overrides the default filter.
    pub fn init(quiet: bool) {
        let default_filter = if quiet { "shrinkray=warn" } else { "shrinkray=info" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_filter));

        // A second init (e.g. from tests) is not an error
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    }

    pub fn build_start(source_root: &Path, dest_root: &Path, jobs: usize) {
        info!("🔨 shrinkray - Static Asset Build");
        info!("📁 Input: {}", source_root.display());
        info!("📦 Output: {}", dest_root.display());
        if jobs > 1 {
            info!("⚡ Concurrency: {} jobs", jobs);
        }
    }

    pub fn created_root(path: &Path) {
        debug!("📂 Created output root: {}", path.display());
    }

    pub fn entering_directory(path: &Path) {
        debug!("🔍 Entering: {}", path.display());
    }

    /// One line per written file, naming the action and the source path
    pub fn file_processed(kind: AssetKind, source: &Path) {
        info!("{}: {}", kind.action_label(), source.display());
    }

    pub fn info(msg: &str) {
        info!("{}", msg);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }

    pub fn skipping_output_root(path: &Path) {
        warn!("⚠️  Skipping {}: it is the output directory", path.display());
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
