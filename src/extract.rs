use crate::decode::{FormatMetadata, ImageHandle, InfoValue};
use crate::exif;
use crate::value::MetadataValue;

/// A `(key, value)` pair ready for display.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataItem {
    pub key: String,
    pub value: MetadataValue,
}

impl MetadataItem {
    pub fn new(key: impl Into<String>, value: impl Into<MetadataValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Pull the displayable metadata items out of an open image.
///
/// PNG info entries come out in chunk order; a nested text-chunk mapping is
/// flattened into its inner pairs and its outer key is dropped. EXIF entries
/// come out in enumeration order with tag ids resolved to names within their
/// directory, unknown ids keeping their decimal id as the name.
pub fn extract(handle: &ImageHandle) -> Vec<MetadataItem> {
    match &handle.metadata {
        FormatMetadata::Png(info) => {
            let mut items = Vec::with_capacity(info.len());
            for (key, value) in info {
                match value {
                    InfoValue::Value(v) => items.push(MetadataItem::new(key.as_str(), v.clone())),
                    InfoValue::Nested(inner) => items.extend(
                        inner
                            .iter()
                            .map(|(k, v)| MetadataItem::new(k.as_str(), v.clone())),
                    ),
                }
            }
            items
        }
        FormatMetadata::Exif(entries) => entries
            .iter()
            .map(|entry| {
                MetadataItem::new(exif::display_name(entry.ifd, entry.tag), entry.value.clone())
            })
            .collect(),
    }
}
