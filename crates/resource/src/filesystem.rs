//! Filesystem-backed font fetcher with path-traversal protection.
//!
//! Sources are resolved relative to a base directory and confined to
//! it: absolute paths and any path escaping the base are rejected
//! before touching the disk.

use crate::fetcher::{FetchError, FontFetcher, SharedFontData};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Loads font files from a base directory on the local filesystem.
#[derive(Debug)]
pub struct FilesystemFontFetcher {
    base_path: PathBuf,
    /// Canonicalized base path for confinement checks.
    canonical_base: Option<PathBuf>,
}

impl FilesystemFontFetcher {
    /// Creates a fetcher rooted at `base_path`. All sources are resolved
    /// relative to it.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // Canonicalization may fail if the directory does not exist yet.
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    /// Returns the base directory for this fetcher.
    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Resolves a source against the base directory, or `None` when the
    /// path would escape it.
    fn resolve_path_safe(&self, source: &str) -> Option<PathBuf> {
        if Path::new(source).is_absolute() {
            return None;
        }

        let full_path = self.base_path.join(source);

        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            if canonical.starts_with(base) {
                return Some(canonical);
            }
            return None;
        }

        // Canonicalization fails for missing files; fall back to a
        // component check so "../../etc/passwd" is still rejected.
        for component in Path::new(source).components() {
            if let std::path::Component::ParentDir = component {
                return None;
            }
        }

        Some(full_path)
    }
}

#[async_trait]
impl FontFetcher for FilesystemFontFetcher {
    async fn fetch(&self, source: &str) -> Result<SharedFontData, FetchError> {
        let full_path = self.resolve_path_safe(source).ok_or_else(|| {
            FetchError::NotFound(format!("{source} (path traversal blocked)"))
        })?;

        tokio::fs::read(&full_path).await.map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                FetchError::NotFound(source.to_string())
            } else {
                FetchError::FetchFailed {
                    source_name: source.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn name(&self) -> &'static str {
        "FilesystemFontFetcher"
    }
}
