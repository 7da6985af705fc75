//! One-time load of every existing data file before readers are served.

use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

use crate::router::{ChangeRouter, RouteOutcome};

#[derive(Error, Debug)]
pub enum BootstrapError {
    #[error("Failed to walk data directory '{}': {source}", root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Counts of files seen during the initial walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BootstrapReport {
    pub applied: usize,
    pub rejected: usize,
    pub ignored: usize,
}

impl BootstrapReport {
    pub fn files(&self) -> usize {
        self.applied + self.rejected + self.ignored
    }
}

/// Walks `root` recursively and routes every file found.
///
/// Rejected files are counted and logged like any other change; only a failure
/// to walk the tree is an error.
pub fn bootstrap(root: &Path, router: &ChangeRouter) -> Result<BootstrapReport, BootstrapError> {
    let mut report = BootstrapReport::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| BootstrapError::Walk {
            root: root.to_path_buf(),
            source,
        })?;

        if entry.file_type().is_dir() {
            continue;
        }

        match router.handle_change(entry.path()) {
            RouteOutcome::Applied { .. } => report.applied += 1,
            RouteOutcome::Rejected { .. } => report.rejected += 1,
            RouteOutcome::Ignored => report.ignored += 1,
        }
    }

    tracing::info!(
        root = %root.display(),
        applied = report.applied,
        rejected = report.rejected,
        ignored = report.ignored,
        "Initial data load complete"
    );

    Ok(report)
}
