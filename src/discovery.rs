use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::GenerateError;

/// Extensions accepted as input images, matched case-insensitively.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpeg", "jpg", "png", "tif", "tiff"];

/// Collect the image files directly inside `dir`.
///
/// Only the top level is scanned. Results are sorted by path so that image
/// indices stay stable for a given directory.
pub fn discover_images(dir: &Path) -> Result<Vec<PathBuf>, GenerateError> {
    if !dir.is_dir() {
        return Err(GenerateError::InputDirNotFound {
            path: dir.to_path_buf(),
        });
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        if is_supported_image(path) {
            images.push(path.to_path_buf());
        } else {
            debug!("Skipping non-image entry: {:?}", path);
        }
    }

    images.sort();
    Ok(images)
}

fn is_supported_image(path: &Path) -> bool {
    if let Some(extension) = path.extension().and_then(|ext| ext.to_str()) {
        let ext_lower = extension.to_lowercase();
        SUPPORTED_EXTENSIONS.contains(&ext_lower.as_str())
    } else {
        false
    }
}
