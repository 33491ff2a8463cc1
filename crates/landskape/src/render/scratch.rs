//! Request-scoped scratch artifacts.

use std::{
    fs, io,
    path::{Path, PathBuf},
    time::{Duration, SystemTime},
};

use log::{debug, trace, warn};
use uuid::Uuid;

/// File name prefix shared by every scratch artifact.
const PREFIX: &str = "landskape-";

/// Input and output artifact paths of one render.
///
/// Both files are deleted when the value is dropped.
#[derive(Debug)]
pub(super) struct ScratchArtifacts {
    input: PathBuf,
    output: PathBuf,
}

impl ScratchArtifacts {
    /// Reserves collision-free artifact names in `dir`.
    pub(super) fn new(dir: &Path, extension: &str) -> Self {
        let id = Uuid::new_v4();
        Self {
            input: dir.join(format!("{PREFIX}{id}-in.dot")),
            output: dir.join(format!("{PREFIX}{id}-out.{extension}")),
        }
    }

    pub(super) fn input(&self) -> &Path {
        &self.input
    }

    pub(super) fn output(&self) -> &Path {
        &self.output
    }
}

impl Drop for ScratchArtifacts {
    fn drop(&mut self) {
        for path in [&self.input, &self.output] {
            match fs::remove_file(path) {
                Ok(()) => trace!(path = path.display().to_string(); "Scratch artifact removed"),
                Err(err) if err.kind() == io::ErrorKind::NotFound => {}
                Err(err) => warn!(
                    path = path.display().to_string(),
                    err:% = err;
                    "Failed to remove scratch artifact"
                ),
            }
        }
    }
}

/// Deletes scratch artifacts in `dir` last modified at least `max_age` ago.
///
/// Only files carrying the scratch prefix are touched. Returns the number of
/// files removed.
///
/// # Errors
///
/// Returns an error if the directory cannot be listed. Files that vanish or
/// cannot be removed during the sweep are skipped.
pub async fn sweep_orphans(dir: &Path, max_age: Duration) -> io::Result<usize> {
    let mut entries = tokio::fs::read_dir(dir).await?;
    let now = SystemTime::now();
    let mut removed = 0;

    while let Some(entry) = entries.next_entry().await? {
        let name = entry.file_name();
        if !name.to_string_lossy().starts_with(PREFIX) {
            continue;
        }

        let Ok(metadata) = entry.metadata().await else {
            continue;
        };
        if !metadata.is_file() {
            continue;
        }
        let age = metadata
            .modified()
            .map(|modified| now.duration_since(modified).unwrap_or_default())
            .unwrap_or_default();
        if age < max_age {
            continue;
        }

        match tokio::fs::remove_file(entry.path()).await {
            Ok(()) => removed += 1,
            Err(err) => debug!(
                path = entry.path().display().to_string(),
                err:% = err;
                "Skipping scratch artifact"
            ),
        }
    }

    Ok(removed)
}
