//! Fixed pool of signal log file names

use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

/// Hands out `00.ext`, `01.ext`, ... and wraps after `count` names
#[derive(Debug, Clone)]
pub struct FileRotation {
    dir: PathBuf,
    count: usize,
    extension: String,
    next: usize,
}

impl FileRotation {
    pub fn new(dir: impl Into<PathBuf>, count: usize, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            count: count.max(1),
            extension: extension.into(),
            next: 0,
        }
    }

    /// Path for the next file in the pool
    pub fn next_path(&mut self) -> PathBuf {
        if self.next >= self.count {
            self.next = 0;
        }
        let name = format!("{:0>2}.{}", self.next, self.extension);
        self.next += 1;
        self.dir.join(name)
    }
}

/// Delete every file in `dir` with the given extension
///
/// Returns how many files were removed. Failures on single files are logged
/// and skipped.
pub async fn collect_garbage(dir: &Path, extension: &str) -> std::io::Result<usize> {
    let mut entries = fs::read_dir(dir).await?;
    let mut removed = 0;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) != Some(extension) {
            continue;
        }
        if !entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
            continue;
        }

        match fs::remove_file(&path).await {
            Ok(()) => removed += 1,
            Err(e) => warn!("Failed to delete stale file {}: {}", path.display(), e),
        }
    }

    if removed > 0 {
        info!(removed, dir = %dir.display(), "Removed stale signal files");
    }
    Ok(removed)
}
