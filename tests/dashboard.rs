//! Dashboard projection over a reconciled session.

use std::sync::Arc;

use carbon_desk::retirement::{DashboardView, RetireControl, RetirementFlow};
use carbon_desk::store::file::StoreDocument;
use carbon_desk::store::{JsonFileStore, KycStatus, PurchaseStore};

mod common;

use common::{flow, profile, purchase, MockLedger, BUYER};

#[tokio::test]
async fn test_reference_progress_scenario() {
    let (flow, _) = flow(
        MockLedger::with_retired(&[2]),
        vec![
            purchase("p1", 1, 120.0),
            purchase("p2", 2, 80.0),
            purchase("p3", 3, 100.0),
        ],
    );
    flow.load(BUYER).await.unwrap();

    let view = DashboardView::build(&profile(1000.0, 200.0, KycStatus::Approved), &flow);

    assert_eq!(view.buyer, "Acme Logistics");
    assert!(!view.kyc_prompt);
    assert!(!view.loading);
    assert_eq!(view.summary.total_offset, 300.0);
    assert_eq!(view.summary.net_emissions, 700.0);
    assert_eq!(view.summary.progress_pct, 37.5);
    assert_eq!(view.summary.remaining, 500.0);

    let controls: Vec<_> = view.credits.iter().map(|row| row.control).collect();
    assert_eq!(
        controls,
        vec![RetireControl::Enabled, RetireControl::Hidden, RetireControl::Enabled]
    );
    assert!(view.credits[1].retired);
}

#[tokio::test]
async fn test_retiring_does_not_change_offset_totals() {
    let (flow, _) = flow(MockLedger::default(), vec![purchase("p1", 1, 300.0)]);
    flow.load(BUYER).await.unwrap();
    let profile = profile(1000.0, 200.0, KycStatus::Pending);

    let before = DashboardView::build(&profile, &flow).summary;
    flow.retire("p1").await.unwrap();
    let after = DashboardView::build(&profile, &flow);

    assert_eq!(before, after.summary);
    assert!(after.kyc_prompt);
    assert_eq!(after.credits[0].control, RetireControl::Hidden);
}

#[tokio::test]
async fn test_view_serializes_for_the_cli() {
    let (flow, _) = flow(MockLedger::default(), vec![purchase("p1", 9, 12.5)]);
    flow.load(BUYER).await.unwrap();

    let view = DashboardView::build(&profile(0.0, 0.0, KycStatus::Submitted), &flow);
    let json = serde_json::to_value(&view).unwrap();

    assert_eq!(json["summary"]["progress_pct"], 0.0);
    assert_eq!(json["credits"][0]["token_id"], 9);
    assert_eq!(json["credits"][0]["control"], "enabled");
    assert_eq!(json["target_year"], 2030);
}

#[tokio::test]
async fn test_file_store_session_end_to_end() {
    let path = std::env::temp_dir().join("carbon_desk_dashboard_session.json");
    let document = StoreDocument {
        buyers: vec![profile(500.0, 100.0, KycStatus::Approved)],
        purchases: vec![purchase("p1", 1, 150.0), purchase("p2", 2, 50.0)],
    };
    std::fs::write(&path, serde_json::to_string_pretty(&document).unwrap()).unwrap();

    let ledger = Arc::new(MockLedger::with_retired(&[1]));
    let flow = RetirementFlow::new(JsonFileStore::new(&path), Some(ledger));
    let profile = flow.store().buyer_profile(BUYER).await.unwrap();
    flow.load(BUYER).await.unwrap();
    flow.retire("p2").await.unwrap();

    let view = DashboardView::build(&profile, &flow);
    assert!(view.credits.iter().all(|row| row.retired));
    assert_eq!(view.summary.net_emissions, 300.0);
    assert_eq!(view.summary.progress_pct, 50.0);
    assert_eq!(view.summary.remaining, 200.0);

    std::fs::remove_file(&path).unwrap_or_default();
}
