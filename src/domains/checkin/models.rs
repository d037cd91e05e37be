//! Payload and input models for the check-in QR subsystem.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ======================================================================
// INPUT CONTRACT
// ======================================================================

/// Minimal guest-like record the service accepts.
///
/// The surrounding application stores far more per guest; the token
/// service only needs a stable id, a printable name and an optional
/// table assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub table_number: Option<String>,
}

impl GuestRecord {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            table_number: None,
        }
    }

    pub fn with_table(mut self, table_number: impl Into<String>) -> Self {
        self.table_number = Some(table_number.into());
        self
    }
}

// ======================================================================
// EMBEDDED PAYLOADS
// ======================================================================

/// Signed check-in credential embedded (base64 JSON) in a guest QR code.
///
/// The id/code fields default to empty strings on decode: a structurally
/// readable but incomplete payload must reach `validate`, which reports
/// each missing field, rather than dying in `decode`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckInPayload {
    #[serde(default)]
    pub guest_id: String,
    #[serde(default)]
    pub event_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_number: Option<String>,
    /// Generation instant; scanned codes expire a fixed window after it.
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub check_in_code: String,
}

/// Wire discriminant for informational table payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TablePayloadTag {
    Table,
}

/// Unsigned informational payload embedded in a table QR code.
///
/// Deliberately carries no check-in code: table codes show seating info,
/// they do not gate entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableInfoPayload {
    pub table_id: String,
    pub table_name: String,
    pub event_id: String,
    #[serde(rename = "type")]
    pub tag: TablePayloadTag,
    pub timestamp: DateTime<Utc>,
}

/// Everything a scanner can hand back to the application.
///
/// The table variant is tried first on decode: it alone carries the
/// `"type": "table"` tag field, while guest payloads tolerate missing
/// fields and would otherwise absorb any object with a timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanPayload {
    Table(TableInfoPayload),
    Guest(CheckInPayload),
}

// ======================================================================
// RESULTS
// ======================================================================

/// Outcome of validating a scanned check-in payload.
///
/// Errors accumulate: a support desk wants every problem at once, not
/// the first one found.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    pub errors: Vec<String>,
}

impl ValidationReport {
    pub fn from_errors(errors: Vec<String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }
}

/// One generated guest check-in credential: the scannable image plus the
/// URL and payload it encodes.
#[derive(Debug, Clone)]
pub struct GeneratedCheckIn {
    pub guest_id: String,
    /// `data:image/png;base64,…` rendering of `check_in_url`.
    pub data_url: String,
    pub check_in_url: String,
    pub payload: CheckInPayload,
}

/// One generated informational table code.
#[derive(Debug, Clone)]
pub struct GeneratedTableQr {
    pub table_id: String,
    pub data_url: String,
    pub info_url: String,
    pub payload: TableInfoPayload,
}
