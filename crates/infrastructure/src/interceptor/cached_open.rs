use cube_cache_application::HitRateCounter;
use cube_cache_domain::InterceptorConfig;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tracing::trace;

/// Redirects opens under `root_dir` to their mirror under `cache_dir`.
///
/// A path under `root_dir` whose mirror opens successfully is a hit and the
/// mirrored file is returned. Otherwise it is a miss and the original path is
/// opened. Paths outside `root_dir`, or any path while disabled, are opened
/// as-is and not counted.
pub struct CachedOpenInterceptor {
    root_dir: PathBuf,
    cache_dir: PathBuf,
    enabled: bool,
    counter: Arc<HitRateCounter>,
}

impl CachedOpenInterceptor {
    pub fn new(config: &InterceptorConfig, counter: Arc<HitRateCounter>) -> Self {
        Self {
            root_dir: PathBuf::from(&config.root_dir),
            cache_dir: PathBuf::from(&config.cache_dir),
            enabled: config.enabled,
            counter,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn counter(&self) -> &Arc<HitRateCounter> {
        &self.counter
    }

    /// Mirror location of `path`, or `None` when the path is not redirected.
    ///
    /// The whole path (minus its root) is nested under `cache_dir`, so
    /// `/data/a.jpg` with cache dir `/cache` maps to `/cache/data/a.jpg`.
    pub fn cache_path_for(&self, path: &Path) -> Option<PathBuf> {
        if !self.enabled || !path.starts_with(&self.root_dir) {
            return None;
        }

        let relative: PathBuf = path
            .components()
            .filter(|c| !matches!(c, Component::RootDir | Component::Prefix(_)))
            .collect();
        Some(self.cache_dir.join(relative))
    }

    pub fn open(&self, path: impl AsRef<Path>) -> io::Result<File> {
        let mut options = OpenOptions::new();
        options.read(true);
        self.open_with(path, &options)
    }

    pub fn open_with(&self, path: impl AsRef<Path>, options: &OpenOptions) -> io::Result<File> {
        let path = path.as_ref();

        if let Some(cache_path) = self.cache_path_for(path) {
            match options.open(&cache_path) {
                Ok(file) => {
                    self.counter.record(true);
                    return Ok(file);
                }
                Err(e) => {
                    trace!(path = %cache_path.display(), error = %e, "Cache mirror unavailable");
                    self.counter.record(false);
                }
            }
        }

        options.open(path)
    }
}
