//! # exif-view
//!
//! Image metadata viewer — shows the EXIF tags of JPEG/TIFF images and the text
//! chunks of PNG images, expanding JSON payloads (as written by image-generation
//! tools) into pretty-printed and human-readable text.
//!
//! ## Quick Start
//!
//! The simplest way to use the library is through the pipeline module, which
//! handles the full open → extract → assemble flow:
//!
//! ```rust,no_run
//! use exif_view::pipeline::Viewer;
//!
//! let mut viewer = Viewer::default();
//! viewer.load("render.png".as_ref());
//!
//! println!("{}", viewer.label); // Metadata for: render.png
//! println!("{}", viewer.text);  // Width: 512 / Height: 768 / ... / parameters (JSON): ...
//! ```
//!
//! ## Lower-Level Usage
//!
//! Each stage can also be called on its own:
//!
//! ```rust,no_run
//! use exif_view::decode::ImageHandle;
//! use exif_view::display::assemble;
//! use exif_view::extract::extract;
//! use exif_view::json::{render, try_parse_json};
//! use std::path::Path;
//!
//! fn main() -> Result<(), exif_view::MetadataError> {
//!     // 1. Open the image (header and metadata only)
//!     let handle = ImageHandle::open(Path::new("photo.jpg"))?;
//!
//!     // 2. Flatten its metadata into (key, value) items
//!     let items = extract(&handle);
//!
//!     // 3. Inspect JSON payloads yourself...
//!     for item in &items {
//!         if let Some(tree) = try_parse_json(&item.value) {
//!             println!("{}:\n{}", item.key, render(&tree, 1));
//!         }
//!     }
//!
//!     // 4. ...or build the full display text
//!     println!("{}", assemble(&handle, &items));
//!     Ok(())
//! }
//! ```
//!
//! ## Supported Formats
//!
//! | Format | Metadata shown |
//! |--------|----------------|
//! | PNG (`.png`) | Width/Height/Mode/Format header + pHYs, sRGB, gAMA, cHRM, ICC, eXIf, tRNS and `tEXt`/`zTXt`/`iTXt` chunks |
//! | JPEG (`.jpg`, `.jpeg`) | EXIF (main image and GPS) |
//! | TIFF (`.tiff`) | EXIF |
//! | BMP (`.bmp`), GIF (`.gif`) | EXIF when present, usually "No EXIF data found." |
//!
//! ## Modules
//!
//! - [`decode`] — Open an image into an [`ImageHandle`](decode::ImageHandle)
//! - [`exif`] — EXIF entry reading and tag-id → name resolution
//! - [`extract`] — Turn a handle into [`MetadataItem`](extract::MetadataItem)s
//! - [`json`] — JSON payload detection, pretty-printing and human-readable rendering
//! - [`display`] — Assemble the final display text
//! - [`pipeline`] — Accepted extensions, drop handling and the [`Viewer`](pipeline::Viewer) state

pub mod decode;
pub mod display;
mod error;
pub mod exif;
pub mod extract;
pub mod json;
pub mod pipeline;
pub mod value;

pub use error::{MetadataError, Result};
