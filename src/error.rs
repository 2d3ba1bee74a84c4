use std::path::PathBuf;

/// Errors raised while loading an image for display.
///
/// Everything except [`MetadataError::UnsupportedFile`] means the decoding
/// libraries could not read the file; those are shown to the user as
/// `"Error reading image data:\n{cause}"` (see [`MetadataError::is_read_error`]).
#[derive(Debug, thiserror::Error)]
pub enum MetadataError {
    /// The path's extension is not one of the accepted image extensions.
    #[error("unsupported file type: {}", .path.display())]
    UnsupportedFile { path: PathBuf },

    /// The image crate failed to open, sniff or decode the file header.
    #[error(transparent)]
    ImageRead(#[from] image::ImageError),

    /// The PNG chunk reader failed while collecting text chunks.
    #[error(transparent)]
    PngRead(#[from] png::DecodingError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl MetadataError {
    /// `true` for failures of the decoding libraries themselves.
    pub fn is_read_error(&self) -> bool {
        !matches!(self, Self::UnsupportedFile { .. })
    }
}

pub type Result<T> = std::result::Result<T, MetadataError>;
