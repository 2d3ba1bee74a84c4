use image::{ColorType, ImageDecoder, ImageFormat, ImageReader};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::Result;
use crate::exif::{self, ExifEntry};
use crate::value::MetadataValue;

/// One entry of a PNG info mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum InfoValue {
    Value(MetadataValue),
    /// A mapping of several fields under one key. Flattened into one item
    /// per field on extraction, dropping the outer key.
    Nested(Vec<(String, MetadataValue)>),
}

/// Format-specific metadata carried by an [`ImageHandle`].
#[derive(Debug, Clone, PartialEq)]
pub enum FormatMetadata {
    /// PNG info mapping: header chunk entries, then text chunks.
    Png(Vec<(String, InfoValue)>),
    /// Raw EXIF entries for every other format. Empty when the file has none.
    Exif(Vec<ExifEntry>),
}

/// A decoded image: intrinsic properties plus its raw metadata.
///
/// Only the header and metadata chunks are read; pixel data is never decoded.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageHandle {
    pub width: u32,
    pub height: u32,
    /// Colour mode, e.g. `RGB`, `RGBA`, `L`, `P`.
    pub mode: String,
    /// Container format, e.g. `PNG`, `JPEG`.
    pub format: String,
    pub metadata: FormatMetadata,
}

impl ImageHandle {
    /// Open an image file and read its header and metadata.
    ///
    /// Any failure of the decoding libraries (unreadable path, unknown or
    /// corrupt format, truncated header) is returned as an error.
    pub fn open(path: &Path) -> Result<Self> {
        let reader = ImageReader::open(path)?.with_guessed_format()?;
        let format = reader.format();
        let decoder = reader.into_decoder()?;
        let (width, height) = decoder.dimensions();
        let color = decoder.color_type();

        if format == Some(ImageFormat::Png) {
            let (mode, info) = read_png_info(path)?;
            log::debug!(
                "{}: PNG {width}x{height} {mode}, {} info entries",
                path.display(),
                info.len()
            );
            return Ok(Self {
                width,
                height,
                mode,
                format: "PNG".to_string(),
                metadata: FormatMetadata::Png(info),
            });
        }

        let entries = exif::read_exif(path);
        let format = format.map(format_name).unwrap_or_else(|| "UNKNOWN".to_string());
        log::debug!(
            "{}: {format} {width}x{height}, {} EXIF entries",
            path.display(),
            entries.len()
        );

        Ok(Self {
            width,
            height,
            mode: color_mode(color).to_string(),
            format,
            metadata: FormatMetadata::Exif(entries),
        })
    }

    pub fn is_png(&self) -> bool {
        self.format == "PNG"
    }
}

/// Upper-case container name for an `image` format.
fn format_name(format: ImageFormat) -> String {
    match format {
        ImageFormat::Png => "PNG".to_string(),
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::Tiff => "TIFF".to_string(),
        ImageFormat::Bmp => "BMP".to_string(),
        ImageFormat::Gif => "GIF".to_string(),
        ImageFormat::WebP => "WEBP".to_string(),
        other => format!("{other:?}").to_uppercase(),
    }
}

/// Mode name for a decoded colour type.
fn color_mode(color: ColorType) -> &'static str {
    match color {
        ColorType::L8 => "L",
        ColorType::La8 => "LA",
        ColorType::Rgb8 => "RGB",
        ColorType::Rgba8 => "RGBA",
        ColorType::L16 => "I;16",
        ColorType::La16 => "LA;16",
        ColorType::Rgb16 => "RGB;16",
        ColorType::Rgba16 => "RGBA;16",
        ColorType::Rgb32F => "RGB;F",
        ColorType::Rgba32F => "RGBA;F",
        _ => "UNKNOWN",
    }
}

/// Mode name from the PNG IHDR colour type and bit depth.
fn png_mode(color: png::ColorType, depth: png::BitDepth) -> &'static str {
    match (color, depth) {
        (png::ColorType::Grayscale, png::BitDepth::One) => "1",
        (png::ColorType::Grayscale, png::BitDepth::Sixteen) => "I;16",
        (png::ColorType::Grayscale, _) => "L",
        (png::ColorType::GrayscaleAlpha, _) => "LA",
        (png::ColorType::Rgb, _) => "RGB",
        (png::ColorType::Rgba, _) => "RGBA",
        (png::ColorType::Indexed, _) => "P",
    }
}

/// Read the PNG mode and info mapping from the chunks preceding IDAT.
///
/// Header chunks come first (`dpi`/`aspect`, `srgb`, `gamma`,
/// `chromaticity`, `icc_profile`, `exif`, `transparency`), then the text
/// chunks grouped as tEXt, zTXt, iTXt. Within a group, file order is kept.
fn read_png_info(path: &Path) -> Result<(String, Vec<(String, InfoValue)>)> {
    let file = File::open(path)?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let reader = decoder.read_info()?;
    let info = reader.info();

    let mode = png_mode(info.color_type, info.bit_depth).to_string();
    let mut entries = Vec::new();

    if let Some(dims) = &info.pixel_dims {
        match dims.unit {
            png::Unit::Meter => {
                let dpi = |ppu: u32| (f64::from(ppu) * 0.0254 * 10.0).round() / 10.0;
                entries.push((
                    "dpi".to_string(),
                    text_value(format!("{}, {}", dpi(dims.xppu), dpi(dims.yppu))),
                ));
            }
            png::Unit::Unspecified => {
                entries.push((
                    "aspect".to_string(),
                    text_value(format!("{}, {}", dims.xppu, dims.yppu)),
                ));
            }
        }
    }

    if let Some(intent) = info.srgb {
        entries.push((
            "srgb".to_string(),
            InfoValue::Value(MetadataValue::Integer(i64::from(intent as u8))),
        ));
    }

    if let Some(gamma) = info.gama_chunk {
        entries.push((
            "gamma".to_string(),
            InfoValue::Value(MetadataValue::Float(scaled(gamma))),
        ));
    }

    if let Some(chrm) = &info.chrm_chunk {
        let points = [chrm.white, chrm.red, chrm.green, chrm.blue]
            .iter()
            .flat_map(|&(x, y)| [scaled(x), scaled(y)])
            .map(|v| v.to_string())
            .collect::<Vec<_>>();
        entries.push((
            "chromaticity".to_string(),
            text_value(format!("({})", points.join(", "))),
        ));
    }

    if let Some(icc) = &info.icc_profile {
        entries.push((
            "icc_profile".to_string(),
            InfoValue::Value(MetadataValue::Bytes(icc.to_vec())),
        ));
    }

    if let Some(exif) = &info.exif_metadata {
        let mut bytes = b"Exif\0\0".to_vec();
        bytes.extend_from_slice(exif);
        entries.push(("exif".to_string(), InfoValue::Value(MetadataValue::Bytes(bytes))));
    }

    if let Some(trns) = &info.trns {
        match transparency(info.color_type, trns) {
            Some(value) => entries.push(("transparency".to_string(), InfoValue::Value(value))),
            None => log::debug!("Skipping malformed tRNS chunk ({} bytes)", trns.len()),
        }
    }

    for chunk in &info.uncompressed_latin1_text {
        entries.push((chunk.keyword.clone(), text_value(chunk.text.clone())));
    }

    for chunk in &info.compressed_latin1_text {
        match chunk.get_text() {
            Ok(text) => entries.push((chunk.keyword.clone(), text_value(text))),
            Err(e) => log::debug!("Skipping zTXt chunk {:?}: {e}", chunk.keyword),
        }
    }

    // Language tag and translated keyword are not shown.
    for chunk in &info.utf8_text {
        match chunk.get_text() {
            Ok(text) => entries.push((chunk.keyword.clone(), text_value(text))),
            Err(e) => log::debug!("Skipping iTXt chunk {:?}: {e}", chunk.keyword),
        }
    }

    Ok((mode, entries))
}

/// Unscaled value of a gAMA / cHRM field (stored as value * 100000).
fn scaled(value: png::ScaledFloat) -> f64 {
    f64::from(value.into_scaled()) / 100_000.0
}

/// Transparency entry for a tRNS chunk, shaped by the image colour type.
///
/// Grey images give the transparent sample, RGB images an `(r, g, b)`
/// triple. Palette images give the index of the first fully transparent
/// entry, or the raw alpha table when no entry is fully transparent.
fn transparency(color: png::ColorType, trns: &[u8]) -> Option<MetadataValue> {
    let samples = |width: usize| -> Vec<u16> {
        trns.chunks_exact(width)
            .map(|c| match c {
                [v] => u16::from(*v),
                [hi, lo] => u16::from_be_bytes([*hi, *lo]),
                _ => 0,
            })
            .collect()
    };
    // Below 16 bits the decoder keeps one byte per sample.
    let width = |count: usize| if trns.len() == count { 1 } else { 2 };

    match color {
        png::ColorType::Grayscale => {
            let grey = samples(width(1));
            grey.first().map(|&v| MetadataValue::Integer(i64::from(v)))
        }
        png::ColorType::Rgb => match samples(width(3)).as_slice() {
            [r, g, b] => Some(MetadataValue::Text(format!("({r}, {g}, {b})"))),
            _ => None,
        },
        png::ColorType::Indexed => Some(match trns.iter().position(|&a| a == 0) {
            Some(index) => MetadataValue::Integer(index as i64),
            None => MetadataValue::Bytes(trns.to_vec()),
        }),
        _ => None,
    }
}

fn text_value(text: String) -> InfoValue {
    InfoValue::Value(MetadataValue::Text(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    /// Header-only info for an 8-bit RGB PNG.
    fn rgb_info(width: u32, height: u32) -> png::Info<'static> {
        let mut info = png::Info::with_size(width, height);
        info.color_type = png::ColorType::Rgb;
        info.bit_depth = png::BitDepth::Eight;
        info
    }

    /// Encode an 8-bit RGB PNG carrying the chunks described by `info`.
    fn write_png(path: &Path, info: png::Info<'static>) {
        let data = vec![0u8; (info.width * info.height * 3) as usize];
        let mut bytes = Vec::new();
        {
            let encoder = png::Encoder::with_info(&mut bytes, info).unwrap();
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&data).unwrap();
        }
        fs::write(path, bytes).unwrap();
    }

    fn png_entries(info: png::Info<'static>) -> Vec<(String, InfoValue)> {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("chunks.png");
        write_png(&path, info);
        match ImageHandle::open(&path).unwrap().metadata {
            FormatMetadata::Png(entries) => entries,
            other => panic!("expected PNG info, got {other:?}"),
        }
    }

    // ── PNG ──────────────────────────────────────────────────────────

    #[test]
    fn png_header_and_text_chunks() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gen.png");
        let mut info = rgb_info(100, 50);
        info.uncompressed_latin1_text = vec![
            png::text_metadata::TEXtChunk::new("parameters", "{\"seed\": 42}"),
            png::text_metadata::TEXtChunk::new("Software", "painter"),
        ];
        write_png(&path, info);

        let handle = ImageHandle::open(&path).unwrap();
        assert_eq!(handle.width, 100);
        assert_eq!(handle.height, 50);
        assert_eq!(handle.mode, "RGB");
        assert_eq!(handle.format, "PNG");
        assert!(handle.is_png());
        assert_eq!(
            handle.metadata,
            FormatMetadata::Png(vec![
                ("parameters".into(), text_value("{\"seed\": 42}".into())),
                ("Software".into(), text_value("painter".into())),
            ])
        );
    }

    #[test]
    fn png_itxt_without_language_is_flat() {
        let mut info = rgb_info(2, 2);
        info.utf8_text = vec![png::text_metadata::ITXtChunk::new("Comment", "héllo")];

        assert_eq!(
            png_entries(info),
            vec![("Comment".into(), text_value("héllo".into()))]
        );
    }

    #[test]
    fn png_itxt_with_language_is_one_entry() {
        let mut chunk = png::text_metadata::ITXtChunk::new("Comment", "hello");
        chunk.language_tag = "de".into();
        chunk.translated_keyword = "Kommentar".into();
        let mut info = rgb_info(2, 2);
        info.utf8_text = vec![chunk];

        assert_eq!(
            png_entries(info),
            vec![("Comment".into(), text_value("hello".into()))]
        );
    }

    #[test]
    fn png_ztxt_is_decompressed() {
        let mut info = rgb_info(2, 2);
        info.uncompressed_latin1_text = vec![png::text_metadata::TEXtChunk::new("Title", "plain")];
        info.compressed_latin1_text = vec![png::text_metadata::ZTXtChunk::new(
            "parameters",
            "{\"prompt\": \"a cat\", \"steps\": 20}",
        )];

        assert_eq!(
            png_entries(info),
            vec![
                ("Title".into(), text_value("plain".into())),
                (
                    "parameters".into(),
                    text_value("{\"prompt\": \"a cat\", \"steps\": 20}".into())
                ),
            ]
        );
    }

    #[test]
    fn png_pixel_dimensions_in_metres_become_dpi() {
        let mut info = rgb_info(2, 2);
        info.pixel_dims = Some(png::PixelDimensions {
            xppu: 2835,
            yppu: 5000,
            unit: png::Unit::Meter,
        });

        // 2835 ppm is 72.009 dpi, rounded to one decimal.
        assert_eq!(png_entries(info), vec![("dpi".into(), text_value("72, 127".into()))]);
    }

    #[test]
    fn png_pixel_dimensions_without_unit_become_aspect() {
        let mut info = rgb_info(2, 2);
        info.pixel_dims = Some(png::PixelDimensions {
            xppu: 3,
            yppu: 2,
            unit: png::Unit::Unspecified,
        });

        assert_eq!(png_entries(info), vec![("aspect".into(), text_value("3, 2".into()))]);
    }

    #[test]
    fn png_icc_profile_is_raw_bytes() {
        let profile = b"\x00\x00\x02\x0cappl\x02\x10\x00\x00mntrRGB XYZ ".to_vec();
        let mut info = rgb_info(2, 2);
        info.icc_profile = Some(profile.clone().into());

        assert_eq!(
            png_entries(info),
            vec![("icc_profile".into(), InfoValue::Value(MetadataValue::Bytes(profile)))]
        );
    }

    #[test]
    fn png_colour_chunks_and_exif() {
        let s = png::ScaledFloat::from_scaled;
        let mut info = rgb_info(2, 2);
        info.source_gamma = Some(s(45455));
        info.source_chromaticities = Some(png::SourceChromaticities {
            white: (s(31270), s(32900)),
            red: (s(64000), s(33000)),
            green: (s(30000), s(60000)),
            blue: (s(15000), s(6000)),
        });
        info.exif_metadata = Some(b"MM\x00\x2a\x00\x00\x00\x08".to_vec().into());
        info.trns = Some(vec![0, 1, 0, 2, 0, 3].into());
        info.uncompressed_latin1_text = vec![png::text_metadata::TEXtChunk::new("Author", "me")];

        assert_eq!(
            png_entries(info),
            vec![
                ("gamma".into(), InfoValue::Value(MetadataValue::Float(0.45455))),
                (
                    "chromaticity".into(),
                    text_value("(0.3127, 0.329, 0.64, 0.33, 0.3, 0.6, 0.15, 0.06)".into())
                ),
                (
                    "exif".into(),
                    InfoValue::Value(MetadataValue::Bytes(
                        b"Exif\x00\x00MM\x00\x2a\x00\x00\x00\x08".to_vec()
                    ))
                ),
                ("transparency".into(), text_value("(1, 2, 3)".into())),
                ("Author".into(), text_value("me".into())),
            ]
        );
    }

    #[test]
    fn png_srgb_intent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("srgb.png");
        let mut bytes = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut bytes, 1, 1);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_source_srgb(png::SrgbRenderingIntent::RelativeColorimetric);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0, 0, 0]).unwrap();
        }
        fs::write(&path, bytes).unwrap();

        let handle = ImageHandle::open(&path).unwrap();
        assert_eq!(
            handle.metadata,
            FormatMetadata::Png(vec![(
                "srgb".into(),
                InfoValue::Value(MetadataValue::Integer(1))
            )])
        );
    }

    #[test]
    fn transparency_by_colour_type() {
        assert_eq!(
            transparency(png::ColorType::Grayscale, &[7]),
            Some(MetadataValue::Integer(7))
        );
        assert_eq!(
            transparency(png::ColorType::Grayscale, &[0x01, 0x00]),
            Some(MetadataValue::Integer(256))
        );
        assert_eq!(
            transparency(png::ColorType::Indexed, &[255, 255, 0, 128]),
            Some(MetadataValue::Integer(2))
        );
        assert_eq!(
            transparency(png::ColorType::Indexed, &[255, 128]),
            Some(MetadataValue::Bytes(vec![255, 128]))
        );
        assert_eq!(transparency(png::ColorType::Rgb, &[1, 2]), None);
    }

    #[test]
    fn png_modes() {
        assert_eq!(png_mode(png::ColorType::Indexed, png::BitDepth::Eight), "P");
        assert_eq!(png_mode(png::ColorType::Grayscale, png::BitDepth::Sixteen), "I;16");
        assert_eq!(png_mode(png::ColorType::Grayscale, png::BitDepth::One), "1");
        assert_eq!(png_mode(png::ColorType::Rgba, png::BitDepth::Eight), "RGBA");
    }

    // ── Other formats ────────────────────────────────────────────────

    #[test]
    fn jpeg_without_exif() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("plain.jpg");
        image::RgbImage::new(8, 4).save(&path).unwrap();

        let handle = ImageHandle::open(&path).unwrap();
        assert_eq!((handle.width, handle.height), (8, 4));
        assert_eq!(handle.format, "JPEG");
        assert_eq!(handle.mode, "RGB");
        assert!(!handle.is_png());
        assert_eq!(handle.metadata, FormatMetadata::Exif(Vec::new()));
    }

    #[test]
    fn format_names() {
        assert_eq!(format_name(ImageFormat::Jpeg), "JPEG");
        assert_eq!(format_name(ImageFormat::Gif), "GIF");
        assert_eq!(format_name(ImageFormat::Bmp), "BMP");
    }

    // ── Failures ─────────────────────────────────────────────────────

    #[test]
    fn corrupt_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"\x89PNG\r\n\x1a\ntruncated").unwrap();

        let err = ImageHandle::open(&path).unwrap_err();
        assert!(err.is_read_error());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = ImageHandle::open(Path::new("/nonexistent/photo.png")).unwrap_err();
        assert!(err.is_read_error());
        assert!(!err.to_string().is_empty());
    }
}
