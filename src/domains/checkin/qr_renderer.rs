//! URL → PNG data-URL rendering for check-in and table codes.

use std::io::Cursor;

use base64::Engine as _;
use image::{imageops, DynamicImage, ImageBuffer, Rgba};
use qrcode::{EcLevel, QrCode};
use serde::{Deserialize, Serialize};

use crate::error::CheckInError;

/// Error-correction level of the rendered code.
///
/// Higher levels trade image density for damage tolerance; printed
/// labels get folded and creased.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCorrection {
    Low,
    Medium,
    Quartile,
    High,
}

impl ErrorCorrection {
    fn to_ec_level(self) -> EcLevel {
        match self {
            ErrorCorrection::Low => EcLevel::L,
            ErrorCorrection::Medium => EcLevel::M,
            ErrorCorrection::Quartile => EcLevel::Q,
            ErrorCorrection::High => EcLevel::H,
        }
    }
}

/// Rendering knobs for a single QR image.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Maximum width/height of the QR matrix in pixels.
    pub size: u32,
    /// Quiet-zone border in pixels, filled with the light color.
    pub margin: u32,
    /// Module color as `#RRGGBB` (or `#RRGGBBAA`).
    pub dark_color: String,
    /// Background color as `#RRGGBB` (or `#RRGGBBAA`).
    pub light_color: String,
    pub error_correction: ErrorCorrection,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            size: 300,
            margin: 8,
            dark_color: "#000000".to_string(),
            light_color: "#FFFFFF".to_string(),
            error_correction: ErrorCorrection::Medium,
        }
    }
}

/// Renders `contents` as a PNG QR image and returns it as a data URL.
pub fn render_data_url(contents: &str, options: &RenderOptions) -> Result<String, CheckInError> {
    let dark = parse_hex_color(&options.dark_color)?;
    let light = parse_hex_color(&options.light_color)?;

    let code = QrCode::with_error_correction_level(
        contents.as_bytes(),
        options.error_correction.to_ec_level(),
    )?;

    // The crate's built-in quiet zone is a fixed 4 modules; disable it and
    // apply the configured pixel margin ourselves.
    let qr_image = code
        .render::<Rgba<u8>>()
        .max_dimensions(options.size, options.size)
        .dark_color(dark)
        .light_color(light)
        .quiet_zone(false)
        .build();

    let framed = add_margin(qr_image, options.margin, light);

    let mut buffer = Cursor::new(Vec::new());
    framed.write_to(&mut buffer, image::ImageFormat::Png)?;

    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(buffer.into_inner())
    ))
}

/// Pads the QR matrix with a solid border in the background color.
fn add_margin(img: ImageBuffer<Rgba<u8>, Vec<u8>>, margin: u32, fill: Rgba<u8>) -> DynamicImage {
    if margin == 0 {
        return DynamicImage::ImageRgba8(img);
    }

    let new_width = img.width() + margin * 2;
    let new_height = img.height() + margin * 2;

    let mut canvas = ImageBuffer::from_pixel(new_width, new_height, fill);
    imageops::overlay(&mut canvas, &img, margin as i64, margin as i64);

    DynamicImage::ImageRgba8(canvas)
}

fn parse_hex_color(value: &str) -> Result<Rgba<u8>, CheckInError> {
    let invalid = || CheckInError::InvalidColor {
        value: value.to_string(),
    };

    let raw = value.strip_prefix('#').unwrap_or(value);
    let bytes = hex::decode(raw).map_err(|_| invalid())?;
    match bytes.as_slice() {
        [r, g, b] => Ok(Rgba([*r, *g, *b, 255])),
        [r, g, b, a] => Ok(Rgba([*r, *g, *b, *a])),
        _ => Err(invalid()),
    }
}
