//! Path helpers for configured file locations.

use std::path::PathBuf;

/// Expands a leading `~` to the user's home directory.
///
/// Paths without a leading `~`, and every path when `HOME` is unset, are
/// returned unchanged.
///
/// # Examples
///
/// ```
/// use confview::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/var/log/confview.log"), PathBuf::from("/var/log/confview.log"));
/// ```
#[must_use]
pub fn expand_tilde(path: &str) -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    match (path, home) {
        ("~", Some(home)) => home,
        (path, Some(home)) if path.starts_with("~/") => home.join(&path[2..]),
        (path, _) => PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_paths_are_untouched() {
        assert_eq!(expand_tilde("/tmp/h.json"), PathBuf::from("/tmp/h.json"));
        assert_eq!(expand_tilde("relative/h.json"), PathBuf::from("relative/h.json"));
    }

    #[test]
    fn tilde_expands_under_home() {
        if let Some(home) = std::env::var_os("HOME") {
            assert_eq!(expand_tilde("~/h.json"), PathBuf::from(home).join("h.json"));
        }
    }
}
