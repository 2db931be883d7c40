use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("input directory not found or not a directory: {path:?}")]
    InputDirNotFound { path: PathBuf },

    #[error("not enough usable images in {path:?}: found {found}, need at least {required}")]
    NotEnoughImages {
        path: PathBuf,
        found: usize,
        required: usize,
    },

    #[error("failed to decode image {path:?}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to create output directory {path:?}: {source}")]
    OutputDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write page {path:?}: {source}")]
    PageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GenerateError {
    /// Recoverable errors cost one pair of the batch; everything else
    /// aborts the run.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, GenerateError::ImageDecode { .. })
    }
}
