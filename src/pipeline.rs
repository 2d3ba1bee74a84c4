use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::decode::ImageHandle;
use crate::display::assemble;
use crate::error::{MetadataError, Result};
use crate::extract::extract;

/// Image extensions accepted from drops and the open dialog (matched case-insensitively).
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "tiff", "bmp", "gif"];

/// Label shown before the first load.
pub const INITIAL_LABEL: &str = "Drag and drop an image file here";

/// Check if a file has an accepted image extension.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Like [`is_supported_image`], as a `Result` carrying the rejected path.
pub fn check_supported(path: &Path) -> Result<()> {
    if is_supported_image(path) {
        Ok(())
    } else {
        Err(MetadataError::UnsupportedFile {
            path: path.to_path_buf(),
        })
    }
}

/// The first accepted image among a set of dropped paths.
pub fn first_supported(paths: &[PathBuf]) -> Option<&Path> {
    paths
        .iter()
        .map(PathBuf::as_path)
        .find(|p| is_supported_image(p))
}

/// Open an image and build its display text.
///
/// Paths without an accepted extension are rejected before anything is read.
///
/// ```rust,no_run
/// use exif_view::pipeline::load_display;
///
/// let text = load_display("photo.jpg".as_ref())?;
/// println!("{text}");
/// # Ok::<(), exif_view::MetadataError>(())
/// ```
pub fn load_display(path: &Path) -> Result<String> {
    check_supported(path)?;
    let handle = ImageHandle::open(path)?;
    let items = extract(&handle);
    log::debug!("{}: {} metadata item(s)", path.display(), items.len());
    Ok(assemble(&handle, &items))
}

/// The status label and text of the viewer, replaced wholesale on each load.
///
/// ```rust,no_run
/// use exif_view::pipeline::Viewer;
///
/// let mut viewer = Viewer::default();
/// viewer.load("photo.png".as_ref());
/// println!("{}\n{}", viewer.label, viewer.text);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Viewer {
    /// `"Metadata for: {path}"` once a file has been loaded.
    pub label: String,
    /// The assembled metadata text, or the read error.
    pub text: String,
}

impl Default for Viewer {
    fn default() -> Self {
        Self {
            label: INITIAL_LABEL.to_string(),
            text: String::new(),
        }
    }
}

impl Viewer {
    /// Load a file, replacing label and text. Read failures become the text.
    ///
    /// Returns `false`, leaving the viewer untouched, when the path is not an
    /// accepted image.
    pub fn load(&mut self, path: &Path) -> bool {
        let text = match load_display(path) {
            Ok(text) => text,
            Err(e) if e.is_read_error() => {
                log::error!("Failed to read {}: {e}", path.display());
                format!("Error reading image data:\n{e}")
            }
            Err(e) => {
                log::warn!("Skipping {e}");
                return false;
            }
        };
        log::info!("Loaded metadata: {}", path.display());
        self.label = format!("Metadata for: {}", path.display());
        self.text = text;
        true
    }

    /// Load the first accepted path of a drop. Returns `false`, leaving the
    /// viewer untouched, when none of the paths is an accepted image.
    pub fn drop_paths(&mut self, paths: &[PathBuf]) -> bool {
        match first_supported(paths) {
            Some(path) => self.load(path),
            None => {
                for path in paths {
                    log::warn!("Ignoring unsupported file: {}", path.display());
                }
                false
            }
        }
    }
}
