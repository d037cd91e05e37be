// ============================================================================
// CHECK-IN TOKEN SERVICE - Signed QR credentials for event check-in
// ============================================================================
//
// All verification state travels inside the encoded payload itself: the
// guest id, the event id, the generation timestamp and the HMAC-derived
// check-in code. Nothing is persisted; scanning reconstructs the payload
// and the expected code is recomputed from the shared secret.
//

use std::collections::HashMap;

use base64::Engine as _;
use chrono::{Duration, Utc};
use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::CheckInConfig;
use crate::domains::checkin::codes::derive_check_in_code;
use crate::domains::checkin::label_sheet::{self, LabelCell, LabelSheetOptions};
use crate::domains::checkin::models::{
    CheckInPayload, GeneratedCheckIn, GeneratedTableQr, GuestRecord, ScanPayload, TableInfoPayload,
    TablePayloadTag, ValidationReport,
};
use crate::domains::checkin::qr_renderer::{self, RenderOptions};
use crate::error::CheckInError;

/// How long a scanned code stays valid after generation. Fixed by design:
/// the window bounds how long a leaked label image remains usable, and
/// re-entry within it is intentional (codes are replay-tolerant).
pub const CODE_EXPIRY_HOURS: i64 = 24;

/// Sentinel shipped in `.env` templates; signing with it is refused.
pub const SECRET_PLACEHOLDER: &str = "your-secret-key";

pub struct CheckInTokenService {
    config: CheckInConfig,
}

impl CheckInTokenService {
    pub fn new(config: CheckInConfig) -> Self {
        Self { config }
    }

    pub fn from_env() -> Self {
        Self::new(CheckInConfig::from_env())
    }

    /// Returns the signing secret, refusing to operate on a deployment
    /// that never replaced the placeholder.
    fn signing_secret(&self) -> Result<&str, CheckInError> {
        let secret = self.config.secret.trim();
        if secret.is_empty() || secret == SECRET_PLACEHOLDER {
            return Err(CheckInError::configuration(
                "QR signing secret is unset or still the placeholder value",
            ));
        }
        Ok(secret)
    }

    /// Recomputes the deterministic check-in code for a guest/event pair.
    pub fn check_in_code(&self, guest_id: &str, event_id: &str) -> Result<String, CheckInError> {
        derive_check_in_code(self.signing_secret()?, guest_id, event_id)
    }

    fn encode_payload<T: Serialize>(&self, payload: &T) -> Result<String, CheckInError> {
        let json = serde_json::to_string(payload)?;
        Ok(base64::engine::general_purpose::STANDARD.encode(json))
    }

    fn embed_url(&self, path: &str, encoded: &str) -> String {
        format!(
            "{}/{}?data={}",
            self.config.base_url,
            path,
            urlencoding::encode(encoded)
        )
    }

    // ------------------------------------------------------------------
    // Generation
    // ------------------------------------------------------------------

    /// Generates one guest check-in QR.
    ///
    /// Fails fast on a missing/placeholder secret before any work; a
    /// guest without an id is rejected so bulk generation can skip it.
    pub async fn generate(
        &self,
        guest: &GuestRecord,
        event_id: &str,
        table_number: Option<&str>,
        options: &RenderOptions,
    ) -> Result<GeneratedCheckIn, CheckInError> {
        let secret = self.signing_secret()?;

        let guest_id = guest.id.trim();
        if guest_id.is_empty() {
            return Err(CheckInError::invalid_guest("guest record has no id"));
        }

        let check_in_code = derive_check_in_code(secret, guest_id, event_id)?;
        let payload = CheckInPayload {
            guest_id: guest_id.to_string(),
            event_id: event_id.to_string(),
            table_number: table_number
                .or(guest.table_number.as_deref())
                .map(str::to_string),
            timestamp: Utc::now(),
            check_in_code,
        };

        let encoded = self.encode_payload(&payload)?;
        let check_in_url = self.embed_url("check-in", &encoded);
        let data_url = qr_renderer::render_data_url(&check_in_url, options)?;

        debug!(
            guest_id = %payload.guest_id,
            event_id = %payload.event_id,
            "generated check-in QR"
        );

        Ok(GeneratedCheckIn {
            guest_id: payload.guest_id.clone(),
            data_url,
            check_in_url,
            payload,
        })
    }

    /// Generates check-in QRs for a whole guest list, keyed by guest id.
    ///
    /// Best-effort batch: per-guest generation runs concurrently and a
    /// failing guest is logged and omitted, never aborting siblings. Only
    /// a misconfigured secret fails the call, since it would fail every
    /// guest identically.
    pub async fn generate_bulk(
        &self,
        guests: &[GuestRecord],
        event_id: &str,
        options: &RenderOptions,
    ) -> Result<HashMap<String, GeneratedCheckIn>, CheckInError> {
        self.signing_secret()?;

        let tasks = guests.iter().map(|guest| async move {
            let result = self
                .generate(guest, event_id, guest.table_number.as_deref(), options)
                .await;
            (guest, result)
        });

        let mut generated = HashMap::with_capacity(guests.len());
        for (guest, result) in join_all(tasks).await {
            match result {
                Ok(item) => {
                    generated.insert(item.guest_id.clone(), item);
                }
                Err(e) => {
                    warn!(
                        guest_id = %guest.id,
                        error = %e,
                        "skipping guest in bulk QR generation"
                    );
                }
            }
        }

        info!(
            requested = guests.len(),
            generated = generated.len(),
            event_id = %event_id,
            "bulk check-in QR generation finished"
        );
        Ok(generated)
    }

    /// Generates a printable label sheet for a guest list.
    ///
    /// One grid cell per successfully generated image, in guest-list
    /// order; guests dropped by the bulk best-effort policy get no cell.
    pub async fn generate_label_sheet(
        &self,
        guests: &[GuestRecord],
        event_id: &str,
        options: &LabelSheetOptions,
    ) -> Result<String, CheckInError> {
        let render = RenderOptions {
            size: options.label_size,
            ..RenderOptions::default()
        };
        let images = self.generate_bulk(guests, event_id, &render).await?;

        let cells: Vec<LabelCell> = guests
            .iter()
            .filter_map(|guest| {
                images.get(guest.id.trim()).map(|item| LabelCell {
                    data_url: item.data_url.clone(),
                    guest_name: options.show_guest_name.then(|| guest.name.clone()),
                    table_number: options
                        .show_table_number
                        .then(|| guest.table_number.clone())
                        .flatten(),
                })
            })
            .collect();

        Ok(label_sheet::render_sheet(&cells, options))
    }

    /// Generates an informational table QR.
    ///
    /// Same rendering pipeline as guest codes, but the payload is not
    /// signed and needs no secret: table codes show seating info, they do
    /// not gate entry.
    pub async fn generate_table_qr_code(
        &self,
        table_id: &str,
        table_name: &str,
        event_id: &str,
        options: &RenderOptions,
    ) -> Result<GeneratedTableQr, CheckInError> {
        let payload = TableInfoPayload {
            table_id: table_id.to_string(),
            table_name: table_name.to_string(),
            event_id: event_id.to_string(),
            tag: TablePayloadTag::Table,
            timestamp: Utc::now(),
        };

        let encoded = self.encode_payload(&payload)?;
        let info_url = self.embed_url("table-info", &encoded);
        let data_url = qr_renderer::render_data_url(&info_url, options)?;

        Ok(GeneratedTableQr {
            table_id: payload.table_id.clone(),
            data_url,
            info_url,
            payload,
        })
    }

    // ------------------------------------------------------------------
    // Scanning
    // ------------------------------------------------------------------

    /// Decodes the base64 `data` parameter of a scanned URL.
    ///
    /// Any structural failure is `InvalidQrData` ("could not read this
    /// code"), distinct from a validation outcome on a readable payload.
    pub fn decode(&self, encoded: &str) -> Result<ScanPayload, CheckInError> {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|e| CheckInError::invalid_data(format!("base64 decode failed: {e}")))?;
        let json = String::from_utf8(bytes)
            .map_err(|_| CheckInError::invalid_data("payload is not valid UTF-8"))?;
        serde_json::from_str(&json)
            .map_err(|e| CheckInError::invalid_data(format!("payload JSON parse failed: {e}")))
    }

    /// Validates a decoded guest payload, accumulating every applicable
    /// error. Invalid/expired codes are data, not errors; staff can still
    /// check the guest in manually after reviewing the reasons.
    pub fn validate(&self, payload: &CheckInPayload) -> Result<ValidationReport, CheckInError> {
        let mut errors = Vec::new();

        if payload.guest_id.is_empty() {
            errors.push("Missing guest ID".to_string());
        }
        if payload.event_id.is_empty() {
            errors.push("Missing event ID".to_string());
        }
        if payload.check_in_code.is_empty() {
            errors.push("Missing check-in code".to_string());
        }

        // The signature comparison only means something when all three
        // fields are present; an incomplete payload already reports
        // exactly its missing fields.
        if errors.is_empty() {
            let expected = self.check_in_code(&payload.guest_id, &payload.event_id)?;
            if payload.check_in_code != expected {
                errors.push("Invalid check-in code".to_string());
            }
        }

        if Utc::now() - payload.timestamp > Duration::hours(CODE_EXPIRY_HOURS) {
            errors.push("QR code has expired".to_string());
        }

        Ok(ValidationReport::from_errors(errors))
    }
}
