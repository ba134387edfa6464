use super::common::*;
use crate::office::domain::{FurnishingStatus, PropertyConfiguration};
use crate::office::service::OfficeError;

#[test]
fn assistants_are_denied_analytics() {
    let service = service_with_team();

    match service.get_combined_analytics(&sam()) {
        Err(OfficeError::Unauthorized(_)) => {}
        other => panic!("expected unauthorized, got {other:?}"),
    }
    match service.get_configuration_distribution(&sam()) {
        Err(OfficeError::Unauthorized(_)) => {}
        other => panic!("expected unauthorized, got {other:?}"),
    }
}

#[test]
fn empty_scope_reports_absent_average_and_zero_counts() {
    let service = service_with_team();

    // Alice has listed nothing, so her scope is empty even though other
    // agents have listings.
    service
        .add_property(&jamie(), property_draft())
        .expect("listing");

    let combined = service
        .get_combined_analytics(&alice())
        .expect("analytics for own scope");
    assert_eq!(combined.summary.total_properties, 0);
    assert_eq!(combined.summary.average_price, None);
    assert_eq!(combined.summary.price_spread, None);
    assert!(combined
        .summary
        .by_category
        .iter()
        .chain(&combined.summary.by_type)
        .chain(&combined.summary.by_configuration)
        .chain(&combined.summary.by_furnishing)
        .all(|slice| slice.count == 0));
}

#[test]
fn admins_aggregate_over_every_listing() {
    let service = service_with_team();

    let mut villa = draft_in("Hyderabad", "Kondapur", "Central", 400);
    villa.configuration = PropertyConfiguration::Villa;
    service.add_property(&alice(), villa).expect("listing");

    let mut studio = draft_in("Pune", "Baner", "Pashan Link", 100);
    studio.configuration = PropertyConfiguration::Studio;
    service.add_property(&jamie(), studio).expect("listing");

    let combined = service.get_combined_analytics(&admin()).expect("analytics");
    assert_eq!(combined.summary.total_properties, 2);
    // 400 + 100 over 2 listings, integer division.
    assert_eq!(combined.summary.average_price, Some(250));
    assert_eq!(combined.density[0].property_count, 2);
    assert_eq!(combined.pricing_heatmap[0].average_price, Some(250));
    assert_eq!(combined.summary.region, "central");

    let villas = combined
        .summary
        .by_configuration
        .iter()
        .find(|slice| slice.key == PropertyConfiguration::Villa.label())
        .expect("villa bucket present");
    assert_eq!(villas.count, 1);
}

#[test]
fn non_admins_aggregate_over_their_own_listings_only() {
    let service = service_with_team();

    service
        .add_property(&alice(), draft_in("Hyderabad", "Kondapur", "Central", 100))
        .expect("listing");
    service
        .add_property(&alice(), draft_in("Hyderabad", "Kondapur", "Lake Edge", 300))
        .expect("listing");
    service
        .add_property(&jamie(), draft_in("Pune", "Baner", "Pashan Link", 900))
        .expect("listing");

    let combined = service.get_combined_analytics(&alice()).expect("analytics");
    assert_eq!(combined.summary.total_properties, 2);
    assert_eq!(combined.summary.average_price, Some(200));

    let spread = combined.summary.price_spread.expect("spread present");
    assert_eq!(spread.lowest, 100);
    assert_eq!(spread.highest, 300);
}

#[test]
fn furnishing_distribution_buckets_every_listing() {
    let service = service_with_team();

    let mut furnished = draft_in("Hyderabad", "Kondapur", "Central", 100);
    furnished.furnishing = FurnishingStatus::Furnished;
    let mut bare = draft_in("Hyderabad", "Kondapur", "Lake Edge", 200);
    bare.furnishing = FurnishingStatus::Unfurnished;

    service.add_property(&alice(), furnished).expect("listing");
    service.add_property(&alice(), bare).expect("listing");

    let distribution = service
        .get_furnishing_distribution(&alice())
        .expect("distribution");
    let total: u64 = distribution.iter().map(|slice| slice.count).sum();
    assert_eq!(total, 2);
    assert!(distribution
        .iter()
        .any(|slice| slice.key == FurnishingStatus::Furnished.label() && slice.count == 1));
}
