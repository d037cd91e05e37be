// ============================================================================
// LABEL SHEET GENERATOR - Prints a guest list as a sheet of check-in QRs
// ============================================================================
//
// Usage: label_sheet <guests.json> <event-id> [output.html]
//
// Reads a JSON array of guest records, generates one signed check-in QR
// per guest and writes a self-contained printable HTML sheet. Requires
// QR_SECRET_KEY (and optionally CHECKIN_BASE_URL) in the environment or
// in a local .env file.
//

use anyhow::{Context, Result};
use checkin_qr_ws::{CheckInConfig, CheckInTokenService, GuestRecord, LabelSheetOptions};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const USAGE: &str = "usage: label_sheet <guests.json> <event-id> [output.html]";

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let mut args = std::env::args().skip(1);
    let guests_path = args.next().context(USAGE)?;
    let event_id = args.next().context(USAGE)?;
    let output = args.next();

    let raw = std::fs::read_to_string(&guests_path)
        .with_context(|| format!("failed to read {guests_path}"))?;
    let guests: Vec<GuestRecord> =
        serde_json::from_str(&raw).context("guests file is not a JSON array of guest records")?;

    info!(guests = guests.len(), event_id = %event_id, "generating label sheet");

    let service = CheckInTokenService::new(CheckInConfig::from_env());
    let html = service
        .generate_label_sheet(&guests, &event_id, &LabelSheetOptions::default())
        .await?;

    match output {
        Some(path) => {
            std::fs::write(&path, &html).with_context(|| format!("failed to write {path}"))?;
            info!("label sheet written to {}", path);
        }
        None => println!("{html}"),
    }

    Ok(())
}
