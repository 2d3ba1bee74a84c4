//! EXIF tag-id → name resolution.
//!
//! Names come from `nom_exif::ExifTag`. The small tables below cover ids seen
//! in camera and editor output that `ExifTag` has no variant for.

use nom_exif::ExifTag;

use super::ExifIfd;

/// Highest tag id defined for the GPS sub-IFD.
pub(crate) const GPS_TAG_MAX: u16 = 0x001F;

/// IFD0 / Exif sub-IFD ids missing from `ExifTag`, sorted ascending.
static MAIN_EXTRA: &[(u16, &str)] = &[
    (0x000B, "ProcessingSoftware"),
    (0x00FE, "NewSubfileType"),
    (0x00FF, "SubfileType"),
    (0x0107, "Thresholding"),
    (0x010A, "FillOrder"),
    (0x010D, "DocumentName"),
    (0x0111, "StripOffsets"),
    (0x0117, "StripByteCounts"),
    (0x0118, "MinSampleValue"),
    (0x0119, "MaxSampleValue"),
    (0x011D, "PageName"),
    (0x0129, "PageNumber"),
    (0x012D, "TransferFunction"),
    (0x013B, "Artist"),
    (0x013D, "Predictor"),
    (0x0140, "ColorMap"),
    (0x0212, "YCbCrSubSampling"),
    (0x02BC, "XMLPacket"),
    (0x4746, "Rating"),
    (0x4749, "RatingPercent"),
    (0x83BB, "IPTCNAA"),
    (0x8649, "ImageResources"),
    (0x8773, "InterColorProfile"),
    (0x8831, "StandardOutputSensitivity"),
    (0x8833, "ISOSpeed"),
    (0x9400, "AmbientTemperature"),
    (0x9C9B, "XPTitle"),
    (0x9C9C, "XPComment"),
    (0x9C9D, "XPAuthor"),
    (0x9C9E, "XPKeywords"),
    (0x9C9F, "XPSubject"),
    (0xA430, "CameraOwnerName"),
    (0xA431, "BodySerialNumber"),
    (0xA435, "LensSerialNumber"),
    (0xC4A5, "PrintImageMatching"),
    (0xC612, "DNGVersion"),
    (0xEA1C, "Padding"),
    (0xEA1D, "OffsetSchema"),
];

/// GPS sub-IFD ids missing from `ExifTag`.
static GPS_EXTRA: &[(u16, &str)] = &[(0x001F, "GPSHPositioningError")];

fn lookup(table: &'static [(u16, &'static str)], id: u16) -> Option<&'static str> {
    table
        .binary_search_by_key(&id, |&(tag, _)| tag)
        .ok()
        .map(|idx| table[idx].1)
}

/// Look up the human-readable name of a tag id within its directory.
///
/// `ExifTag` gives the GPS names to ids up to [`GPS_TAG_MAX`], so those
/// only go through it for [`ExifIfd::Gps`] entries.
pub fn tag_name(ifd: ExifIfd, id: u16) -> Option<String> {
    let (known, extra) = match ifd {
        ExifIfd::Main if id <= GPS_TAG_MAX => (None, MAIN_EXTRA),
        ExifIfd::Main => (ExifTag::try_from(id).ok(), MAIN_EXTRA),
        ExifIfd::Gps => (ExifTag::try_from(id).ok(), GPS_EXTRA),
    };
    known
        .map(|tag| tag.to_string())
        .or_else(|| lookup(extra, id).map(str::to_string))
}

/// Tag name, or the decimal id when the tag is unknown.
pub fn display_name(ifd: ExifIfd, id: u16) -> String {
    tag_name(ifd, id).unwrap_or_else(|| id.to_string())
}
