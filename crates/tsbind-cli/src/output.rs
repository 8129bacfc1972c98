//! The output sink.
//!
//! Write failures are per-file and non-fatal: the failed artifact is simply
//! absent and the remaining artifacts are still attempted. The recovery
//! path for a partial output set is re-running the whole transform.

use std::path::Path;

use tracing::{error, info};

use tsbind_core::Artifact;

/// Write every artifact under `out_dir`, creating directories as needed.
/// Returns the number of files successfully written.
pub fn write_artifacts(out_dir: &Path, artifacts: &[Artifact]) -> usize {
    let mut written = 0;
    for artifact in artifacts {
        let path = out_dir.join(&artifact.path);
        if let Some(parent) = path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                error!(path = %path.display(), %err, "failed to create output directory");
                continue;
            }
        }
        match std::fs::write(&path, &artifact.text) {
            Ok(()) => {
                info!(path = %path.display(), bytes = artifact.text.len(), "wrote artifact");
                written += 1;
            }
            Err(err) => {
                error!(path = %path.display(), %err, "failed to write artifact");
            }
        }
    }
    written
}
