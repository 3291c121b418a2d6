//! Output file writer.
//!
//! The image is written to a temporary file next to the destination and then
//! renamed into place, so the destination is either the complete image or
//! untouched.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

fn temp_path(output_path: &Path) -> PathBuf {
    let mut name = output_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    output_path.with_file_name(name)
}

/// Write a flat image to disk.
pub fn write_image(output_path: &Path, image: &[u8]) -> Result<()> {
    let tmp = temp_path(output_path);

    if let Err(err) = fs::write(&tmp, image) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("failed to write {}", tmp.display()));
    }

    if let Err(err) = fs::rename(&tmp, output_path) {
        let _ = fs::remove_file(&tmp);
        return Err(err).with_context(|| format!("failed to create {}", output_path.display()));
    }

    tracing::debug!("wrote {} bytes to {}", image.len(), output_path.display());
    Ok(())
}
