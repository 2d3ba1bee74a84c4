//! EXIF reading and tag naming.
//!
//! - [`read_exif`] — Read the raw `(tag id, value)` entries of the main image in a JPEG/TIFF/HEIF file
//! - [`tag_name`] / [`display_name`] — Resolve a numeric tag id within its directory
//!
//! Reading never fails: a file without an EXIF segment, or one `nom-exif`
//! does not understand, simply yields no entries.

mod reader;
mod tags;

pub use reader::{ExifEntry, ExifIfd, read_exif};
pub use tags::{display_name, tag_name};
