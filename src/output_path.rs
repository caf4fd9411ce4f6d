//! Output file naming: `{base}-{yyyyMMdd_HHmmss}.{extension}`.

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_BASE_NAME: &str = "rssr-capture";
pub const DEFAULT_EXTENSION: &str = "mp3";
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Characters rejected on at least one common filesystem.
const FORBIDDEN: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

fn is_forbidden(c: char) -> bool {
    FORBIDDEN.contains(&c) || c.is_control()
}

/// Returns the caller's base name, or the default when it is blank or
/// contains a forbidden character.
pub fn base_name(requested: Option<&str>) -> &str {
    match requested {
        None => DEFAULT_BASE_NAME,
        Some(name) if name.trim().is_empty() || name.chars().any(is_forbidden) => {
            info!(
                requested = name,
                fallback = DEFAULT_BASE_NAME,
                "unusable base name, using default"
            );
            DEFAULT_BASE_NAME
        }
        Some(name) => name,
    }
}

/// Returns the extension without leading dots, or the default.
pub fn extension(requested: Option<&str>) -> &str {
    let Some(requested) = requested else {
        return DEFAULT_EXTENSION;
    };
    let stripped = requested.trim_start_matches('.');
    if stripped.trim().is_empty() || stripped.chars().any(is_forbidden) {
        info!(
            extension = requested,
            fallback = DEFAULT_EXTENSION,
            "unusable extension, using default"
        );
        return DEFAULT_EXTENSION;
    }
    stripped
}

pub fn file_name(base: Option<&str>, ext: Option<&str>, started: NaiveDateTime) -> String {
    format!(
        "{}-{}.{}",
        base_name(base),
        started.format(TIMESTAMP_FORMAT),
        extension(ext)
    )
}

/// Joins the generated file name onto `dir`. Captures started within the same
/// second with the same name and extension resolve to the same path.
pub fn build_output_path(
    dir: &Path,
    base: Option<&str>,
    ext: Option<&str>,
    started: NaiveDateTime,
) -> PathBuf {
    dir.join(file_name(base, ext, started))
}
