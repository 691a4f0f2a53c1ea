//! Path helpers for configuration and log files.
//!
//! Locations follow the XDG base directory convention: `$XDG_CONFIG_HOME`
//! when set, `~/.config` otherwise.

use std::env;
use std::path::{Path, PathBuf};

/// Directory name used under the config root.
const APP_DIR: &str = "catalog-browser";

/// Config file name inside [`APP_DIR`].
const CONFIG_FILE: &str = "config.toml";

/// Returns the user's home directory from `$HOME`.
#[must_use]
pub fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a leading `~`, or with no known home directory, are returned
/// unchanged.
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    expand_tilde_in(path, home_dir().as_deref())
}

fn expand_tilde_in(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (path, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        (path, _) => PathBuf::from(path),
    }
}

/// Returns the default config file location.
///
/// `$XDG_CONFIG_HOME/catalog-browser/config.toml`, falling back to
/// `~/.config/catalog-browser/config.toml`. `None` if neither variable is set.
///
/// # Examples
///
/// ```
/// use catalog_browser::infrastructure::default_config_path;
///
/// if let Some(path) = default_config_path() {
///     assert!(path.ends_with("catalog-browser/config.toml"));
/// }
/// ```
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let xdg = env::var_os("XDG_CONFIG_HOME")
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from);
    config_path_in(xdg.as_deref(), home_dir().as_deref())
}

fn config_path_in(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Option<PathBuf> {
    let root = match (xdg_config_home, home) {
        (Some(xdg), _) => xdg.to_path_buf(),
        (None, Some(home)) => home.join(".config"),
        (None, None) => return None,
    };
    Some(root.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tilde_expansion() {
        let home = Path::new("/home/reader");
        assert_eq!(expand_tilde_in("~", Some(home)), PathBuf::from("/home/reader"));
        assert_eq!(
            expand_tilde_in("~/logs/browse.log", Some(home)),
            PathBuf::from("/home/reader/logs/browse.log")
        );
        assert_eq!(expand_tilde_in("/var/log/x", Some(home)), PathBuf::from("/var/log/x"));
        assert_eq!(expand_tilde_in("~other/x", Some(home)), PathBuf::from("~other/x"));
        assert_eq!(expand_tilde_in("~/x", None), PathBuf::from("~/x"));
    }

    #[test]
    fn xdg_wins_over_home() {
        assert_eq!(
            config_path_in(Some(Path::new("/xdg")), Some(Path::new("/home/reader"))),
            Some(PathBuf::from("/xdg/catalog-browser/config.toml"))
        );
        assert_eq!(
            config_path_in(None, Some(Path::new("/home/reader"))),
            Some(PathBuf::from("/home/reader/.config/catalog-browser/config.toml"))
        );
        assert_eq!(config_path_in(None, None), None);
    }
}
