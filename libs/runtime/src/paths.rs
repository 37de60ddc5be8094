use anyhow::{Context, Result};
use std::path::PathBuf;

/// Resolve the application home directory into an absolute path.
///
/// - `explicit` takes precedence when provided; a leading `~` expands to the
///   platform home directory.
/// - When absent, the platform home joined with `default_subdir` is used.
/// - Relative paths are resolved against the current directory.
pub fn resolve_home_dir(
    explicit: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf> {
    let raw = match explicit {
        Some(path) => expand_tilde(&path)?,
        None => platform_home()?.join(default_subdir),
    };

    let resolved = if raw.is_absolute() {
        raw
    } else {
        std::env::current_dir()
            .context("cannot determine current directory")?
            .join(raw)
    };

    if create {
        std::fs::create_dir_all(&resolved)
            .with_context(|| format!("failed to create home dir '{}'", resolved.display()))?;
    }

    Ok(resolved)
}

fn expand_tilde(path: &str) -> Result<PathBuf> {
    if path == "~" {
        return platform_home();
    }
    if let Some(rest) = path.strip_prefix("~/") {
        return Ok(platform_home()?.join(rest));
    }
    Ok(PathBuf::from(path))
}

#[cfg(target_os = "windows")]
fn platform_home() -> Result<PathBuf> {
    std::env::var_os("APPDATA")
        .map(PathBuf::from)
        .context("APPDATA is not set")
}

#[cfg(not(target_os = "windows"))]
fn platform_home() -> Result<PathBuf> {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .context("HOME is not set")
}
