//! Store location resolution.

use std::path::{Path, PathBuf};

/// Environment variable overriding the package store location.
pub const STORE_PATH_ENV: &str = "PARCELTRACK_STORE_PATH";
/// Store file used when nothing else is configured.
pub const DEFAULT_STORE_FILE_NAME: &str = "packages.json";

/// Resolves the store path.
///
/// Precedence: `explicit`, then `PARCELTRACK_STORE_PATH` (trimmed,
/// non-empty), then `packages.json` in the working directory.
pub fn resolve_store_path(explicit: Option<&Path>) -> PathBuf {
    store_path_from(explicit, std::env::var(STORE_PATH_ENV).ok().as_deref())
}

fn store_path_from(explicit: Option<&Path>, env_value: Option<&str>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match env_value.map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => PathBuf::from(trimmed),
        _ => PathBuf::from(DEFAULT_STORE_FILE_NAME),
    }
}

#[cfg(test)]
mod tests {
    use super::{resolve_store_path, store_path_from, STORE_PATH_ENV};
    use std::path::Path;

    #[test]
    fn explicit_path_wins() {
        let path = store_path_from(Some(Path::new("/tmp/explicit.json")), Some("/tmp/env.json"));
        assert_eq!(path, Path::new("/tmp/explicit.json"));
    }

    #[test]
    fn env_value_overrides_default() {
        let path = store_path_from(None, Some("  /var/lib/parcels.json "));
        assert_eq!(path, Path::new("/var/lib/parcels.json"));
    }

    #[test]
    fn blank_or_missing_env_falls_back_to_default_file() {
        assert_eq!(store_path_from(None, Some("   ")), Path::new("packages.json"));
        assert_eq!(store_path_from(None, None), Path::new("packages.json"));
    }

    // The only test in this crate that touches the process environment.
    #[test]
    fn resolve_reads_store_path_env() {
        std::env::set_var(STORE_PATH_ENV, "/tmp/parceltrack-env.json");
        assert_eq!(resolve_store_path(None), Path::new("/tmp/parceltrack-env.json"));

        std::env::set_var(STORE_PATH_ENV, "");
        assert_eq!(resolve_store_path(None), Path::new("packages.json"));

        std::env::remove_var(STORE_PATH_ENV);
        assert_eq!(resolve_store_path(None), Path::new("packages.json"));
    }
}
