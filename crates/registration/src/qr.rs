use std::io::Cursor;

use image::{DynamicImage, GrayImage, ImageFormat, Luma};
use qrcode::QrCode;

use crate::error::QrError;
use crate::photo::PhotoPayload;
use crate::traits::QrEncoder;

pub const DEFAULT_QR_SIZE: u32 = 256;

/// Renders QR codes as PNG data URLs.
#[derive(Debug, Clone, Copy)]
pub struct PngQrEncoder {
    size: u32,
}

impl PngQrEncoder {
    pub fn new(size: u32) -> Self {
        Self { size }
    }

    pub fn render(&self, data: &str) -> Result<GrayImage, QrError> {
        let code = QrCode::new(data.as_bytes())?;
        Ok(code
            .render::<Luma<u8>>()
            .min_dimensions(self.size, self.size)
            .build())
    }
}

impl Default for PngQrEncoder {
    fn default() -> Self {
        Self::new(DEFAULT_QR_SIZE)
    }
}

impl QrEncoder for PngQrEncoder {
    fn encode(&self, data: &str) -> Result<String, QrError> {
        let image = self.render(data)?;

        let mut png = Vec::new();
        DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(PhotoPayload::from_bytes("image/png", &png).to_data_url())
    }
}

/// Read the first QR code found in a greyscale frame.
pub fn decode_qr_image(image: &GrayImage) -> Result<String, QrError> {
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        image.width() as usize,
        image.height() as usize,
        |x, y| image.get_pixel(x as u32, y as u32).0[0],
    );

    let grids = prepared.detect_grids();
    let grid = grids.first().ok_or(QrError::NotFound)?;
    let (_meta, content) = grid.decode().map_err(|e| QrError::Decode(e.to_string()))?;

    Ok(content)
}

/// Read a QR code back out of an image data URL.
pub fn decode_qr_payload(data_url: &str) -> Result<String, QrError> {
    let payload =
        PhotoPayload::parse(data_url).map_err(|e| QrError::InvalidPayload(e.to_string()))?;
    let bytes = payload
        .decode_bytes()
        .map_err(|e| QrError::InvalidPayload(e.to_string()))?;

    let image = image::load_from_memory(&bytes)?.to_luma8();
    decode_qr_image(&image)
}
