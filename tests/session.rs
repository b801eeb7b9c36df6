use transfer_billing::domain::booking::{BookingDraft, ExtraService, StopLeg};
use transfer_billing::domain::edit::BookingEdit;
use transfer_billing::repository::PricingSnapshot;
use transfer_billing::services::ServiceError;
use transfer_billing::services::session::BookingSession;

mod common;

use common::{CONTRACTOR, CUSTOMER, SERVICE, VEHICLE};

fn identified_session(repo: &PricingSnapshot) -> BookingSession {
    let mut session = BookingSession::new();
    for edit in [
        BookingEdit::SetCustomer(Some(CUSTOMER)),
        BookingEdit::SetService(Some(SERVICE)),
        BookingEdit::SetVehicleType(Some(VEHICLE)),
    ] {
        session.apply(repo, edit).expect("expected success");
    }
    session
}

fn add_stop(session: &mut BookingSession, repo: &PricingSnapshot, leg: StopLeg, slot: usize) {
    session
        .apply(
            repo,
            BookingEdit::SetStopLocation {
                leg,
                slot,
                location: format!("Stop {slot}"),
            },
        )
        .expect("expected success");
}

#[test]
fn base_price_resolves_from_the_customer_override() {
    let repo = common::standard_snapshot();
    let session = identified_session(&repo);

    assert_eq!(session.draft().base_price_cents, 5500);
}

#[test]
fn base_price_is_zero_without_an_override() {
    let repo = common::standard_snapshot();
    let mut session = BookingSession::new();
    session
        .apply(&repo, BookingEdit::SetCustomer(Some(99)))
        .expect("expected success");
    session
        .apply(&repo, BookingEdit::SetService(Some(SERVICE)))
        .expect("expected success");

    assert_eq!(session.draft().base_price_cents, 0);
}

#[test]
fn night_pickup_charges_the_override_magnitude() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);

    session
        .apply(&repo, BookingEdit::SetPickupTime(Some("23:30".to_string())))
        .expect("expected success");

    assert_eq!(session.draft().night_surcharge_cents, 2000);
}

#[test]
fn afternoon_pickup_charges_nothing() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);

    session
        .apply(&repo, BookingEdit::SetPickupTime(Some("14:00".to_string())))
        .expect("expected success");

    assert_eq!(session.draft().night_surcharge_cents, 0);
}

#[test]
fn early_morning_pickup_is_inside_the_wrapped_window() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);

    session
        .apply(&repo, BookingEdit::SetPickupTime(Some("02:00".to_string())))
        .expect("expected success");
    assert_eq!(session.draft().night_surcharge_cents, 2000);

    session
        .apply(&repo, BookingEdit::SetPickupTime(Some("06:59".to_string())))
        .expect("expected success");
    assert_eq!(session.draft().night_surcharge_cents, 2000);

    session
        .apply(&repo, BookingEdit::SetPickupTime(Some("07:00".to_string())))
        .expect("expected success");
    assert_eq!(session.draft().night_surcharge_cents, 0);
}

#[test]
fn unreadable_pickup_time_preserves_the_stored_surcharge() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);
    session
        .apply(&repo, BookingEdit::SetPickupTime(Some("23:30".to_string())))
        .expect("expected success");
    assert_eq!(session.draft().night_surcharge_cents, 2000);

    session
        .apply(
            &repo,
            BookingEdit::SetPickupTime(Some("half past late".to_string())),
        )
        .expect("expected success");

    assert_eq!(session.draft().night_surcharge_cents, 2000);
}

#[test]
fn per_occurrence_stops_default_each_slot_and_scale_the_aggregate() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);

    add_stop(&mut session, &repo, StopLeg::Dropoff, 0);
    let summary = session
        .apply(
            &repo,
            BookingEdit::SetStopLocation {
                leg: StopLeg::Dropoff,
                slot: 1,
                location: "Stop 1".to_string(),
            },
        )
        .expect("expected success");

    let draft = session.draft();
    assert_eq!(
        draft.stop(StopLeg::Dropoff, 0).map(|s| s.price_cents),
        Some(500)
    );
    assert_eq!(
        draft.stop(StopLeg::Dropoff, 1).map(|s| s.price_cents),
        Some(500)
    );
    assert_eq!(summary.additional_stops_cents, 1000);
}

#[test]
fn flat_fee_stops_still_default_each_slot_individually() {
    let repo = common::flat_stop_snapshot();
    let mut session = identified_session(&repo);

    add_stop(&mut session, &repo, StopLeg::Dropoff, 0);
    let summary = session
        .apply(
            &repo,
            BookingEdit::SetStopLocation {
                leg: StopLeg::Dropoff,
                slot: 1,
                location: "Stop 1".to_string(),
            },
        )
        .expect("expected success");

    let draft = session.draft();
    assert_eq!(
        draft.stop(StopLeg::Dropoff, 0).map(|s| s.price_cents),
        Some(500)
    );
    assert_eq!(
        draft.stop(StopLeg::Dropoff, 1).map(|s| s.price_cents),
        Some(500)
    );
    // The aggregate resolves once; the final price sums the slot prices.
    assert_eq!(summary.additional_stops_cents, 500);
    assert_eq!(
        draft.final_price_cents,
        draft.base_price_cents + draft.stop_prices_total_cents()
    );
}

#[test]
fn both_legs_receive_the_same_per_slot_default() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);

    add_stop(&mut session, &repo, StopLeg::Pickup, 0);
    add_stop(&mut session, &repo, StopLeg::Dropoff, 0);
    add_stop(&mut session, &repo, StopLeg::Dropoff, 1);

    let draft = session.draft();
    assert_eq!(
        draft.stop(StopLeg::Pickup, 0).map(|s| s.price_cents),
        Some(500)
    );
    assert_eq!(
        draft.stop(StopLeg::Dropoff, 1).map(|s| s.price_cents),
        Some(500)
    );
}

#[test]
fn contractor_selection_makes_job_cost_system_owned() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);
    session
        .apply(&repo, BookingEdit::SetJobCost(1200))
        .expect("expected success");
    assert_eq!(session.draft().job_cost_cents, 1200);

    session
        .apply(&repo, BookingEdit::SetContractor(Some(CONTRACTOR)))
        .expect("expected success");

    // The matrix entry overwrites the manually entered claim.
    assert_eq!(session.draft().job_cost_cents, 3500);
    assert!(matches!(
        session.apply(&repo, BookingEdit::SetJobCost(100)),
        Err(ServiceError::ReadOnlyField("job_cost"))
    ));
}

#[test]
fn contractor_without_matrix_entry_forces_zero() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);
    session
        .apply(&repo, BookingEdit::SetContractor(Some(8)))
        .expect("expected success");

    assert_eq!(session.draft().job_cost_cents, 0);
}

#[test]
fn contractor_with_incomplete_identity_forces_zero() {
    let repo = common::standard_snapshot();
    let mut session = BookingSession::new();
    session
        .apply(&repo, BookingEdit::SetContractor(Some(CONTRACTOR)))
        .expect("expected success");

    assert_eq!(session.draft().job_cost_cents, 0);
}

#[test]
fn clearing_the_contractor_keeps_the_last_claim_value() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);
    session
        .apply(&repo, BookingEdit::SetContractor(Some(CONTRACTOR)))
        .expect("expected success");

    session
        .apply(&repo, BookingEdit::SetContractor(None))
        .expect("expected success");

    assert_eq!(session.draft().job_cost_cents, 3500);
    session
        .apply(&repo, BookingEdit::SetJobCost(900))
        .expect("expected success");
    assert_eq!(session.draft().job_cost_cents, 900);
}

#[test]
fn manual_stop_price_survives_pickup_time_changes() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);
    add_stop(&mut session, &repo, StopLeg::Dropoff, 0);
    add_stop(&mut session, &repo, StopLeg::Dropoff, 1);
    add_stop(&mut session, &repo, StopLeg::Dropoff, 2);

    session
        .apply(
            &repo,
            BookingEdit::SetStopPrice {
                leg: StopLeg::Dropoff,
                slot: 2,
                price_cents: 800,
            },
        )
        .expect("expected success");

    session
        .apply(&repo, BookingEdit::SetPickupTime(Some("23:30".to_string())))
        .expect("expected success");

    let draft = session.draft();
    assert_eq!(
        draft.stop(StopLeg::Dropoff, 2).map(|s| s.price_cents),
        Some(800)
    );
    assert_eq!(
        draft.stop(StopLeg::Dropoff, 1).map(|s| s.price_cents),
        Some(500)
    );
}

#[test]
fn identity_change_unlocks_manual_stop_prices() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);
    add_stop(&mut session, &repo, StopLeg::Dropoff, 2);
    session
        .apply(
            &repo,
            BookingEdit::SetStopPrice {
                leg: StopLeg::Dropoff,
                slot: 2,
                price_cents: 800,
            },
        )
        .expect("expected success");

    let summary = session
        .apply(&repo, BookingEdit::SetVehicleType(Some(4)))
        .expect("expected success");

    assert!(summary.identity_changed);
    // Vehicle type 4 has no additional-stops rate, so the slot drops to
    // the new default of zero instead of keeping the manual 8.00.
    assert_eq!(
        session.draft().stop(StopLeg::Dropoff, 2).map(|s| s.price_cents),
        Some(0)
    );
}

#[test]
fn removing_a_stop_recycles_its_slot_for_the_next_occupant() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);
    add_stop(&mut session, &repo, StopLeg::Pickup, 0);
    session
        .apply(
            &repo,
            BookingEdit::SetStopPrice {
                leg: StopLeg::Pickup,
                slot: 0,
                price_cents: 800,
            },
        )
        .expect("expected success");

    session
        .apply(
            &repo,
            BookingEdit::RemoveStop {
                leg: StopLeg::Pickup,
                slot: 0,
            },
        )
        .expect("expected success");
    add_stop(&mut session, &repo, StopLeg::Pickup, 0);

    // The recycled slot is auto again and picks up the default price.
    assert_eq!(
        session.draft().stop(StopLeg::Pickup, 0).map(|s| s.price_cents),
        Some(500)
    );
}

#[test]
fn manual_base_price_and_surcharge_survive_unrelated_edits() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);
    session
        .apply(&repo, BookingEdit::SetBasePrice(7000))
        .expect("expected success");
    session
        .apply(&repo, BookingEdit::SetNightSurcharge(1000))
        .expect("expected success");

    session
        .apply(&repo, BookingEdit::SetPickupTime(Some("23:30".to_string())))
        .expect("expected success");
    session
        .apply(&repo, BookingEdit::SetDiscount(500))
        .expect("expected success");

    assert_eq!(session.draft().base_price_cents, 7000);
    assert_eq!(session.draft().night_surcharge_cents, 1000);
}

#[test]
fn final_price_sums_all_components_minus_discount() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);
    session
        .apply(&repo, BookingEdit::SetPickupTime(Some("23:30".to_string())))
        .expect("expected success");
    add_stop(&mut session, &repo, StopLeg::Dropoff, 0);
    session
        .apply(
            &repo,
            BookingEdit::AddExtraService(ExtraService::new("Child seat", 700)),
        )
        .expect("expected success");
    session
        .apply(&repo, BookingEdit::SetDiscount(300))
        .expect("expected success");

    let draft = session.draft();
    assert_eq!(
        draft.final_price_cents,
        5500 + 700 + 2000 + 500 - 300
    );
}

#[test]
fn oversized_discount_reports_the_negative_total_advisory() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);

    let summary = session
        .apply(&repo, BookingEdit::SetDiscount(10_000))
        .expect("expected success");

    assert!(summary.negative_total);
    assert_eq!(session.draft().final_price_cents, 5500 - 10_000);
}

#[test]
fn repeated_recompute_leaves_the_draft_identical() {
    let repo = common::standard_snapshot();
    let mut session = identified_session(&repo);
    session
        .apply(&repo, BookingEdit::SetPickupTime(Some("23:30".to_string())))
        .expect("expected success");
    add_stop(&mut session, &repo, StopLeg::Pickup, 0);
    session
        .apply(&repo, BookingEdit::SetContractor(Some(CONTRACTOR)))
        .expect("expected success");

    let before = session.draft().clone();
    let first = session.recompute(&repo).expect("expected success");
    let second = session.recompute(&repo).expect("expected success");

    assert!(!first.changed);
    assert!(!second.changed);
    assert_eq!(session.draft(), &before);
}

#[test]
fn resumed_draft_recomputes_without_an_identity_event() {
    let repo = common::standard_snapshot();
    let draft = BookingDraft::new()
        .with_customer_id(CUSTOMER)
        .with_service_id(SERVICE)
        .with_vehicle_type_id(VEHICLE)
        .with_pickup_time("23:30");
    let mut session = BookingSession::resume(draft);

    let summary = session.recompute(&repo).expect("expected success");

    assert!(!summary.identity_changed);
    assert!(summary.changed);
    assert_eq!(session.draft().base_price_cents, 5500);
    assert_eq!(session.draft().night_surcharge_cents, 2000);
}
