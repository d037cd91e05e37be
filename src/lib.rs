pub mod config;
pub mod error;

// Domain-driven layout; the check-in QR subsystem is the only domain here
pub mod domains;

pub use config::CheckInConfig;
pub use domains::checkin::{
    CheckInPayload, CheckInTokenService, ErrorCorrection, GeneratedCheckIn, GeneratedTableQr,
    GuestRecord, LabelSheetOptions, RenderOptions, ScanPayload, TableInfoPayload,
    ValidationReport, CODE_EXPIRY_HOURS, SECRET_PLACEHOLDER,
};
pub use error::CheckInError;
