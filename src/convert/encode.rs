//! JPEG encoding and MIME sniffing

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::RgbImage;

use super::ConvertError;

/// Encode as JPEG at the given quality.
pub fn encode_jpeg(img: &RgbImage, quality: u8) -> Result<Vec<u8>, ConvertError> {
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality);
    img.write_with_encoder(encoder)
        .map_err(ConvertError::Encode)?;
    Ok(buf.into_inner())
}

/// Sniff the MIME type of an encoded image buffer. `None` when the bytes
/// are not a recognized raster format.
pub fn sniff_mime(data: &[u8]) -> Option<&'static str> {
    image::guess_format(data).ok().map(|f| f.to_mime_type())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_jpeg_magic_bytes() {
        let img = RgbImage::new(10, 10);
        let data = encode_jpeg(&img, 100).unwrap();
        assert_eq!(&data[0..2], &[0xFF, 0xD8]);
    }

    #[test]
    fn test_sniff_jpeg() {
        let img = RgbImage::new(10, 10);
        let data = encode_jpeg(&img, 100).unwrap();
        assert_eq!(sniff_mime(&data), Some("image/jpeg"));
    }

    #[test]
    fn test_sniff_png() {
        let img = image::DynamicImage::new_rgb8(10, 10);
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        assert_eq!(sniff_mime(&buf.into_inner()), Some("image/png"));
    }

    #[test]
    fn test_sniff_rejects_text() {
        assert_eq!(sniff_mime(b"hello, not an image"), None);
    }

    #[test]
    fn test_sniff_rejects_empty() {
        assert_eq!(sniff_mime(b""), None);
    }
}
