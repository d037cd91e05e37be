// ============================================================================
// CHECK-IN SERVICE TESTS - End-to-end generate / decode / validate flows
// ============================================================================

use checkin_qr_ws::{
    CheckInConfig, CheckInError, CheckInTokenService, GuestRecord, LabelSheetOptions,
    RenderOptions, ScanPayload,
};

fn service() -> CheckInTokenService {
    CheckInTokenService::new(CheckInConfig::new(
        "https://app.example.com",
        "integration-test-secret",
    ))
}

/// Pulls the base64 payload back out of a generated URL, the same way the
/// scan handler does before calling `decode`.
fn extract_data_param(url: &str) -> String {
    let encoded = url.split("data=").nth(1).expect("url has no data param");
    urlencoding::decode(encoded).expect("data param not urlencoded").into_owned()
}

#[tokio::test]
async fn scanned_code_round_trips_and_validates() {
    let svc = service();
    let guest = GuestRecord::new("g1", "Ana Pérez").with_table("12");

    let item = svc
        .generate(&guest, "evt1", None, &RenderOptions::default())
        .await
        .expect("generation failed");

    let decoded = svc.decode(&extract_data_param(&item.check_in_url)).unwrap();
    let payload = match decoded {
        ScanPayload::Guest(payload) => payload,
        ScanPayload::Table(_) => panic!("guest payload decoded as table"),
    };

    // Structural round trip through base64/JSON
    assert_eq!(payload, item.payload);

    let report = svc.validate(&payload).unwrap();
    assert!(report.valid, "unexpected errors: {:?}", report.errors);
    assert!(report.errors.is_empty());
}

#[tokio::test]
async fn payload_scanned_at_the_wrong_event_fails_validation() {
    let svc = service();
    let guest = GuestRecord::new("g1", "Ana");

    let item = svc
        .generate(&guest, "evt1", None, &RenderOptions::default())
        .await
        .unwrap();

    let mut payload = item.payload;
    payload.event_id = "another-wedding".to_string();

    let report = svc.validate(&payload).unwrap();
    assert!(!report.valid);
    assert!(report.errors.contains(&"Invalid check-in code".to_string()));
}

#[tokio::test]
async fn bulk_generation_skips_malformed_guests() {
    let svc = service();
    let guests = vec![
        GuestRecord::new("g1", "Ana"),
        GuestRecord::new("", "No Id"),
        GuestRecord::new("g3", "Luis"),
    ];

    let generated = svc
        .generate_bulk(&guests, "evt1", &RenderOptions::default())
        .await
        .unwrap();

    assert_eq!(generated.len(), 2);
    assert!(generated.contains_key("g1"));
    assert!(generated.contains_key("g3"));
    assert!(!generated.contains_key(""));
}

#[tokio::test]
async fn bulk_generation_propagates_configuration_errors() {
    let svc = CheckInTokenService::new(CheckInConfig::new("https://app.example.com", ""));
    let guests = vec![GuestRecord::new("g1", "Ana")];

    let err = svc
        .generate_bulk(&guests, "evt1", &RenderOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, CheckInError::Configuration { .. }));
}

#[tokio::test]
async fn label_sheet_has_one_cell_per_generated_image() {
    let svc = service();
    let guests = vec![
        GuestRecord::new("g1", "Ana").with_table("1"),
        GuestRecord::new("", "No Id"),
        GuestRecord::new("g3", "Luis").with_table("2"),
        GuestRecord::new("g4", "Marta"),
    ];

    let html = svc
        .generate_label_sheet(&guests, "evt1", &LabelSheetOptions::default())
        .await
        .unwrap();

    // Three guests generate, the malformed one gets no cell
    assert_eq!(html.matches("class=\"label-cell\"").count(), 3);
    assert!(html.contains("Ana"));
    assert!(html.contains("Luis"));
    assert!(html.contains("Marta"));
    assert!(!html.contains("No Id"));
    assert!(html.contains("Table 1"));
}

#[tokio::test]
async fn unreadable_and_invalid_codes_are_distinguishable() {
    let svc = service();

    // Unreadable: decode error, never a validation report
    let err = svc.decode("!!definitely-not-base64!!").unwrap_err();
    assert!(matches!(err, CheckInError::InvalidQrData { .. }));

    // Readable but tampered: validation report, never an error
    let item = svc
        .generate(&GuestRecord::new("g1", "Ana"), "evt1", None, &RenderOptions::default())
        .await
        .unwrap();
    let mut payload = item.payload;
    payload.check_in_code = "deadbeefdeadbeef".to_string();

    let report = svc.validate(&payload).unwrap();
    assert!(!report.valid);
    assert_eq!(report.errors, vec!["Invalid check-in code".to_string()]);
}
