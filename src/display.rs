use crate::decode::ImageHandle;
use crate::extract::MetadataItem;
use crate::json::{pretty, render, try_parse_json};

/// Shown instead of a metadata body when a non-PNG image has no EXIF entries.
pub const NO_EXIF_MESSAGE: &str = "No EXIF data found.";

/// Build the text shown for an image and its extracted metadata.
///
/// PNG images start with a `Width`/`Height`/`Mode`/`Format` header and a
/// blank line. Items follow, one block each, joined by newlines. Values that
/// parse as JSON get a pretty-printed block and a human-readable block.
pub fn assemble(handle: &ImageHandle, items: &[MetadataItem]) -> String {
    let body = items
        .iter()
        .map(format_item)
        .collect::<Vec<_>>()
        .join("\n");

    if handle.is_png() {
        format!(
            "Width: {}\nHeight: {}\nMode: {}\nFormat: {}\n\n{body}",
            handle.width, handle.height, handle.mode, handle.format
        )
    } else if items.is_empty() {
        NO_EXIF_MESSAGE.to_string()
    } else {
        body
    }
}

/// Format one metadata item as its display block.
pub fn format_item(item: &MetadataItem) -> String {
    match try_parse_json(&item.value) {
        Some(parsed) => format!(
            "{} (JSON):\n{}\n\nHuman-readable:\n{}\n",
            item.key,
            pretty(&parsed),
            render(&parsed, 0)
        ),
        None => format!("{}: {}", item.key, item.value),
    }
}
