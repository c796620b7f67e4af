// Configuration for the library manager. The only knob is where the
// backing JSON file lives; it is passed explicitly to the store.

use std::path::{Path, PathBuf};

/// File name used when nothing else is configured, relative to the
/// working directory.
pub const DEFAULT_LIBRARY_FILE: &str = "library.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub library_path: PathBuf,
}

impl Config {
    /// Build a config that points the store at `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Config {
            library_path: path.into(),
        }
    }

    pub fn library_path(&self) -> &Path {
        &self.library_path
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::with_path(DEFAULT_LIBRARY_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_library_json() {
        assert_eq!(Config::default().library_path(), Path::new("library.json"));
    }

    #[test]
    fn with_path_overrides_default() {
        let cfg = Config::with_path("/tmp/shelf.json");
        assert_eq!(cfg.library_path(), Path::new("/tmp/shelf.json"));
    }
}
