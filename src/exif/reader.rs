use nom_exif::*;
use std::path::Path;

use super::tags::GPS_TAG_MAX;
use crate::value::MetadataValue;

/// The directory an entry was read from. Tag ids are only unique within one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExifIfd {
    /// IFD0 and the Exif sub-IFD of the main image.
    Main,
    /// The GPS sub-IFD.
    Gps,
}

/// One raw EXIF entry, in the order `nom-exif` enumerates it.
#[derive(Debug, Clone, PartialEq)]
pub struct ExifEntry {
    pub ifd: ExifIfd,
    pub tag: u16,
    pub value: MetadataValue,
}

/// Read the EXIF entries of the main image from a file.
///
/// Thumbnail (IFD1) entries are skipped. The GPSInfo pointer is replaced by
/// the entries of the GPS sub-IFD it points to, tagged [`ExifIfd::Gps`].
/// Returns an empty list when the file carries no EXIF data.
pub fn read_exif(path: &Path) -> Vec<ExifEntry> {
    let ms = match MediaSource::file_path(path) {
        Ok(ms) => ms,
        Err(e) => {
            log::debug!("No EXIF source for {}: {e}", path.display());
            return Vec::new();
        }
    };

    if !ms.has_exif() {
        log::debug!("No EXIF data found in {}", path.display());
        return Vec::new();
    }

    let mut parser = MediaParser::new();
    let iter: ExifIter = match parser.parse(ms) {
        Ok(iter) => iter,
        Err(_) => {
            log::debug!("No EXIF data found in {}", path.display());
            return Vec::new();
        }
    };

    collect_entries(iter)
}

/// Keep the main-image entries of an EXIF iterator, tagging GPS ones.
///
/// Sub-IFD entries are enumerated right after their pointer, and GPS ids
/// never exceed [`GPS_TAG_MAX`] while every IFD0 tag after GPSInfo does.
fn collect_entries(iter: impl Iterator<Item = ParsedExifEntry>) -> Vec<ExifEntry> {
    let mut entries = Vec::new();
    let mut in_gps = false;

    for entry in iter {
        let tag = entry.tag_code();
        if entry.ifd_index() != 0 {
            log::trace!("Skipping IFD{} entry 0x{tag:04x}", entry.ifd_index());
            continue;
        }
        if entry.tag() == Some(ExifTag::GPSInfo) {
            in_gps = true;
            continue;
        }
        in_gps &= tag <= GPS_TAG_MAX;
        let ifd = if in_gps { ExifIfd::Gps } else { ExifIfd::Main };

        match entry.get_value() {
            Some(value) => entries.push(ExifEntry {
                ifd,
                tag,
                value: entry_to_value(value),
            }),
            None => log::debug!("Skipping unreadable EXIF entry 0x{tag:04x}"),
        }
    }

    entries
}

/// Convert a nom-exif EntryValue into our value model.
fn entry_to_value(val: &EntryValue) -> MetadataValue {
    match val {
        EntryValue::Text(s) => MetadataValue::Text(s.trim_end_matches('\0').to_string()),
        EntryValue::U8(v) => MetadataValue::Integer(i64::from(*v)),
        EntryValue::U16(v) => MetadataValue::Integer(i64::from(*v)),
        EntryValue::U32(v) => MetadataValue::Integer(i64::from(*v)),
        EntryValue::I8(v) => MetadataValue::Integer(i64::from(*v)),
        EntryValue::I16(v) => MetadataValue::Integer(i64::from(*v)),
        EntryValue::I32(v) => MetadataValue::Integer(i64::from(*v)),
        EntryValue::F32(v) => MetadataValue::Float(f64::from(*v)),
        EntryValue::F64(v) => MetadataValue::Float(*v),
        EntryValue::Undefined(bytes) => MetadataValue::Bytes(bytes.clone()),
        // Rationals, arrays and timestamps keep nom-exif's own formatting.
        other => MetadataValue::Text(other.to_string()),
    }
}
