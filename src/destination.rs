use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};

use crate::validation::Validation;

/// Makes sure `dir` exists (creating it if needed) and that a file can be
/// created, touched and removed inside it.
pub fn validate_destination(dir: &Path) -> Validation {
    match probe(dir) {
        Ok(()) => Validation::Valid,
        Err(err) => Validation::Invalid(format!("EXCEPTION: {}", err)),
    }
}

fn probe(dir: &Path) -> io::Result<()> {
    if !dir.exists() {
        fs::create_dir_all(dir)?;
        info!(dir = %dir.display(), "created destination directory");
    }

    let probe_path = probe_path(dir);
    let touched = touch(&probe_path);
    // Remove even when the touch failed halfway, so no probe file is left behind.
    let removed = match fs::remove_file(&probe_path) {
        Err(err) if err.kind() == io::ErrorKind::NotFound && touched.is_err() => Ok(()),
        other => other,
    };
    touched?;
    removed?;

    debug!(dir = %dir.display(), "destination is writable");
    Ok(())
}

fn touch(path: &Path) -> io::Result<()> {
    let file = OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)?;
    file.set_modified(SystemTime::now())?;
    Ok(())
}

fn probe_path(dir: &Path) -> PathBuf {
    dir.join(format!(".rssr-probe-{}", std::process::id()))
}
