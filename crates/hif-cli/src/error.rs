use std::io;
use std::path::PathBuf;

use hif::HifError;
use thiserror::Error;

/// Exit status for I/O and malformed-file errors.
pub const EXIT_IO: u8 = 1;
/// Exit status when the window cannot be created or updated.
pub const EXIT_WINDOW: u8 = 2;
/// Exit status when the payload cannot be decompressed.
pub const EXIT_DECOMPRESS: u8 = 3;

/// Everything that can stop the viewer.
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to decode '{}': {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: HifError,
    },

    #[error("window error: {0}")]
    Window(#[from] minifb::Error),

    #[error("failed to export '{}': {source}", path.display())]
    Export {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl ViewerError {
    /// Process exit status for this error category.
    pub fn exit_code(&self) -> u8 {
        match self {
            ViewerError::Decode {
                source: HifError::Decompress(_),
                ..
            } => EXIT_DECOMPRESS,
            ViewerError::Window(_) => EXIT_WINDOW,
            ViewerError::Io { .. } | ViewerError::Decode { .. } | ViewerError::Export { .. } => {
                EXIT_IO
            }
        }
    }
}
