//! Output tree writer.
//!
//! Each document lands at `<destination>/<key>`. Files whose bytes already
//! match are left alone; everything else goes through a sibling
//! `.strata.tmp` file and a rename so readers never observe a partial page.

use std::path::{Path, PathBuf};

use strata_core::DocumentMap;

use crate::error::{io_err, PipelineError};

/// What happened to one output file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResult {
    /// New or changed output.
    Written { path: PathBuf },
    /// Bytes on disk already match the rendered document.
    Unchanged { path: PathBuf },
    /// Dry run: the file differs and would be written.
    WouldWrite { path: PathBuf },
}

impl WriteResult {
    pub fn path(&self) -> &Path {
        match self {
            WriteResult::Written { path }
            | WriteResult::Unchanged { path }
            | WriteResult::WouldWrite { path } => path,
        }
    }
}

/// Write every document under `destination`, in key order.
pub fn write_documents(
    documents: &DocumentMap,
    destination: &Path,
    dry_run: bool,
) -> Result<Vec<WriteResult>, PipelineError> {
    documents
        .iter()
        .map(|(key, doc)| atomic_write(&destination.join(key), doc.contents.as_bytes(), dry_run))
        .collect()
}

/// Replace `path` with `content` unless it already holds exactly those bytes.
pub fn atomic_write(path: &Path, content: &[u8], dry_run: bool) -> Result<WriteResult, PipelineError> {
    let target = path.to_path_buf();
    if std::fs::read(path).is_ok_and(|existing| existing == content) {
        tracing::debug!(path = %path.display(), "output unchanged");
        return Ok(WriteResult::Unchanged { path: target });
    }
    if dry_run {
        tracing::info!(path = %path.display(), "[dry-run] would write output");
        return Ok(WriteResult::WouldWrite { path: target });
    }

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| io_err(dir, e))?;
    }
    let staging = staging_path(path);
    std::fs::write(&staging, content).map_err(|e| io_err(&staging, e))?;
    std::fs::rename(&staging, path).map_err(|e| {
        let _ = std::fs::remove_file(&staging);
        io_err(path, e)
    })?;

    tracing::info!(path = %path.display(), bytes = content.len(), "wrote output");
    Ok(WriteResult::Written { path: target })
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".strata.tmp");
    PathBuf::from(name)
}
