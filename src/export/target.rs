//! Where artifacts land: an explicit target value, not a global path.

use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::GridError;
use crate::export::traits::ExportArtifact;

/// Destination for the produced artifacts.
///
/// Writing is one-shot and non-cancelable: either every artifact is
/// written or the call fails outright.
#[derive(Debug, Clone)]
pub enum ExportTarget {
    /// Write each artifact as a file under this directory
    /// (created if missing).
    Directory(PathBuf),
    /// Write all artifacts into a single zip archive at this path.
    ZipBundle(PathBuf),
}

impl ExportTarget {
    /// Write the artifacts, returning the paths created.
    pub fn write(&self, artifacts: &[ExportArtifact]) -> Result<Vec<PathBuf>, GridError> {
        match self {
            Self::Directory(dir) => {
                std::fs::create_dir_all(dir)?;
                let mut written = Vec::with_capacity(artifacts.len());
                for artifact in artifacts {
                    let path = dir.join(&artifact.file_name);
                    std::fs::write(&path, &artifact.bytes)?;
                    log::info!("Wrote {} ({} bytes)", path.display(), artifact.bytes.len());
                    written.push(path);
                }
                Ok(written)
            }
            Self::ZipBundle(path) => {
                let file = File::create(path)?;
                let mut zip = ZipWriter::new(file);
                let options = SimpleFileOptions::default()
                    .compression_method(CompressionMethod::Deflated);
                for artifact in artifacts {
                    zip.start_file(artifact.file_name.as_str(), options)
                        .map_err(|e| GridError::export_failure("zip", e))?;
                    zip.write_all(&artifact.bytes)?;
                }
                zip.finish()
                    .map_err(|e| GridError::export_failure("zip", e))?;
                log::info!(
                    "Wrote bundle {} with {} artifact(s)",
                    path.display(),
                    artifacts.len()
                );
                Ok(vec![path.clone()])
            }
        }
    }
}
