// Application state module
// Immutable per-process state shared by every connection

use std::path::PathBuf;

use super::types::Config;
use crate::handler::resolve;
use crate::server::RequestLimiter;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Canonical form of the configured root directory
    pub root: PathBuf,
    /// Base context prefix, "/" when files are served from the top
    pub base_path: String,
    /// Bounds the number of requests processed at once
    pub limiter: RequestLimiter,
}

impl AppState {
    /// Create `AppState`, canonicalizing the root once up front.
    ///
    /// The root is not required to exist yet.
    pub fn new(config: Config) -> std::io::Result<Self> {
        let absolute = std::path::absolute(&config.storage.root)?;
        let root = resolve::canonicalize_lenient(&absolute)?;
        let base_path = config.base_path();
        let limiter = RequestLimiter::new(config.server.concurrency);

        Ok(Self {
            config,
            root,
            base_path,
            limiter,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliArgs;

    #[test]
    fn test_state_canonicalizes_root() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::with_defaults(&CliArgs {
            port: 8080,
            root: dir.path().join("sub").join(".."),
            concurrency: 3,
        });

        let state = AppState::new(cfg).unwrap();
        assert_eq!(state.root, dir.path().canonicalize().unwrap());
        assert_eq!(state.base_path, "/");
        assert_eq!(state.limiter.capacity(), 3);
    }

    #[test]
    fn test_state_accepts_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::with_defaults(&CliArgs {
            port: 8080,
            root: dir.path().join("not-yet"),
            concurrency: 1,
        });

        let state = AppState::new(cfg).unwrap();
        assert_eq!(state.root, dir.path().canonicalize().unwrap().join("not-yet"));
    }
}
