//! QR code images for receipt retrieval URLs.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

use super::EncodeError;

/// Smallest edge length of generated QR images, in pixels.
pub const MIN_QR_SIZE: u32 = 256;

/// Encode `data` as a QR code rendered to PNG bytes.
pub fn encode_png(data: &str) -> Result<Vec<u8>, EncodeError> {
    let code = QrCode::new(data.as_bytes()).map_err(EncodeError::Qr)?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_QR_SIZE, MIN_QR_SIZE)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;
    Ok(png)
}
