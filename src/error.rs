use thiserror::Error;

// ============================================================================
// ERROR TYPES
// ============================================================================

/// Errors raised by the check-in token service.
///
/// Validation outcomes are NOT represented here: an invalid or expired
/// scanned code is an everyday result at the check-in desk and is returned
/// as a `ValidationReport`, never as an error.
#[derive(Error, Debug)]
pub enum CheckInError {
    /// Fatal configuration problem (missing or placeholder signing secret).
    /// Not retryable; the deployment has to be fixed.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The scanned payload could not be read at all (bad base64, bad UTF-8,
    /// bad JSON). Distinct from a validation failure so the scan UI can show
    /// "could not read this code" instead of "invalid/expired code".
    #[error("Invalid QR code data: {message}")]
    InvalidQrData { message: String },

    /// A guest record that cannot be encoded (e.g. empty id). Bulk
    /// generation catches this per guest and skips the record.
    #[error("Invalid guest record: {message}")]
    InvalidGuest { message: String },

    /// A render option carried an unparseable `#RRGGBB` color value.
    #[error("Invalid color value: {value}")]
    InvalidColor { value: String },

    #[error("QR encoding failed: {0}")]
    QrEncode(#[from] qrcode::types::QrError),

    #[error("Image encoding failed: {0}")]
    ImageEncode(#[from] image::ImageError),

    #[error("Payload serialization failed: {0}")]
    PayloadSerialization(#[from] serde_json::Error),
}

impl CheckInError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn invalid_data(message: impl Into<String>) -> Self {
        Self::InvalidQrData {
            message: message.into(),
        }
    }

    pub fn invalid_guest(message: impl Into<String>) -> Self {
        Self::InvalidGuest {
            message: message.into(),
        }
    }
}
