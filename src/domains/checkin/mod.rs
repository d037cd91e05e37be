pub mod codes;
pub mod label_sheet;
pub mod models;
pub mod qr_renderer;
pub mod service;

// Re-exports so callers can import the domain surface directly
pub use label_sheet::{LabelCell, LabelSheetOptions};
pub use models::*;
pub use qr_renderer::{ErrorCorrection, RenderOptions};
pub use service::{CheckInTokenService, CODE_EXPIRY_HOURS, SECRET_PLACEHOLDER};
