use shared::image_proc::ImageLoadError;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors: conditions that stop an analysis run before any step executes,
/// plus configuration and persistence failures surrounding a run.
#[derive(Error, Debug)]
pub enum QualityError {
    /// Analysis was requested before an image was loaded.
    #[error("no image loaded")]
    NoImageLoaded,

    /// The luminance grid has no pixels.
    #[error("image has no pixels ({width}x{height})")]
    EmptyImage { width: usize, height: usize },

    /// Physical field dimensions must be positive and finite.
    #[error("invalid physical size {width_mm} x {height_mm} mm")]
    InvalidPhysicalSize { width_mm: f64, height_mm: f64 },

    /// Image decoding failed.
    #[error(transparent)]
    Load(#[from] ImageLoadError),

    /// Configuration validation failure.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reading or writing a file failed.
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A results or configuration document could not be (de)serialized.
    #[error("malformed JSON document: {0}")]
    Json(#[from] serde_json::Error),
}

impl QualityError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
