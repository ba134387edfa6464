use super::common::*;
use crate::office::domain::{InquiryStatus, InquiryUpdate, PropertyId};
use crate::office::service::OfficeError;

fn update_keeping(inquiry: &crate::office::domain::Inquiry) -> InquiryUpdate {
    InquiryUpdate {
        customer_name: inquiry.customer_name.clone(),
        contact_info: inquiry.contact_info.clone(),
        source: inquiry.source,
        status: inquiry.status,
        assigned_agent: inquiry.assigned_agent.clone(),
        notes: inquiry.notes.clone(),
    }
}

#[test]
fn add_then_get_round_trips_with_new_status() {
    let service = service_with_team();
    let listing = service
        .add_property(&alice(), property_draft())
        .expect("listing");

    let inquiry = service
        .add_inquiry(&alice(), inquiry_draft(&listing.id, &alice(), "Priya Shah"))
        .expect("inquiry logs");

    assert_eq!(inquiry.status, InquiryStatus::New);
    assert_eq!(inquiry.property_id, listing.id);
    let fetched = service
        .get_inquiry(&alice(), &inquiry.id)
        .expect("inquiry readable");
    assert_eq!(fetched, inquiry);
}

#[test]
fn inquiry_requires_an_existing_property() {
    let service = service_with_team();
    let missing = PropertyId("prop-missing".to_string());

    match service.add_inquiry(&alice(), inquiry_draft(&missing, &alice(), "Priya Shah")) {
        Err(OfficeError::NotFound(_)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn assignment_to_a_deactivated_agent_is_rejected_for_every_role() {
    let service = service_with_team();
    let listing = service
        .add_property(&alice(), property_draft())
        .expect("listing");

    service
        .deactivate_agent(&admin(), &robin())
        .expect("deactivation succeeds");

    for caller in [admin(), alice(), jamie()] {
        match service.add_inquiry(&caller, inquiry_draft(&listing.id, &robin(), "Priya Shah")) {
            Err(OfficeError::InvalidReference(message)) => {
                assert!(message.contains("not an active agent"), "got '{message}'");
            }
            other => panic!("expected invalid reference for {caller}, got {other:?}"),
        }
    }
}

#[test]
fn assistants_may_only_self_assign() {
    let service = service_with_team();
    let listing = service
        .add_property(&alice(), property_draft())
        .expect("listing");

    match service.add_inquiry(&sam(), inquiry_draft(&listing.id, &alice(), "Priya Shah")) {
        Err(OfficeError::Unauthorized(_)) => {}
        other => panic!("expected unauthorized, got {other:?}"),
    }

    service
        .add_inquiry(&sam(), inquiry_draft(&listing.id, &sam(), "Priya Shah"))
        .expect("self-assignment is allowed");
}

#[test]
fn assistants_see_exactly_their_own_inquiries_in_creation_order() {
    let service = service_with_team();
    let listing = service
        .add_property(&alice(), property_draft())
        .expect("listing");

    let first = service
        .add_inquiry(&sam(), inquiry_draft(&listing.id, &sam(), "Priya Shah"))
        .expect("inquiry");
    service
        .add_inquiry(&alice(), inquiry_draft(&listing.id, &alice(), "Dev Kumar"))
        .expect("inquiry");
    let third = service
        .add_inquiry(&sam(), inquiry_draft(&listing.id, &sam(), "Nina George"))
        .expect("inquiry");

    let visible = service.get_all_inquiries(&sam()).expect("own inquiries");
    let ids: Vec<_> = visible.iter().map(|inquiry| inquiry.id.clone()).collect();
    assert_eq!(ids, vec![first.id, third.id]);
    assert!(visible
        .windows(2)
        .all(|pair| pair[0].created_at <= pair[1].created_at));
}

#[test]
fn junior_agents_cannot_read_other_agents_inquiries() {
    let service = service_with_team();
    let listing = service
        .add_property(&alice(), property_draft())
        .expect("listing");

    let inquiry = service
        .add_inquiry(&alice(), inquiry_draft(&listing.id, &alice(), "Priya Shah"))
        .expect("inquiry");

    match service.get_inquiry(&jamie(), &inquiry.id) {
        Err(OfficeError::Unauthorized(_)) => {}
        other => panic!("expected unauthorized, got {other:?}"),
    }

    match service.get_inquiries_by_agent(&jamie(), &alice()) {
        Err(OfficeError::Unauthorized(_)) => {}
        other => panic!("expected unauthorized, got {other:?}"),
    }
}

#[test]
fn agents_manage_all_inquiries() {
    let service = service_with_team();
    let listing = service
        .add_property(&alice(), property_draft())
        .expect("listing");

    let inquiry = service
        .add_inquiry(&jamie(), inquiry_draft(&listing.id, &jamie(), "Priya Shah"))
        .expect("inquiry");

    let mut update = update_keeping(&inquiry);
    update.status = InquiryStatus::InProgress;
    let updated = service
        .update_inquiry(&alice(), &inquiry.id, update)
        .expect("agents update anyone's inquiry");
    assert_eq!(updated.status, InquiryStatus::InProgress);

    let by_agent = service
        .get_inquiries_by_agent(&alice(), &jamie())
        .expect("cross-agent lookup");
    assert_eq!(by_agent.len(), 1);
}

#[test]
fn reassignment_follows_the_same_rule_as_creation() {
    let service = service_with_team();
    let listing = service
        .add_property(&alice(), property_draft())
        .expect("listing");

    let inquiry = service
        .add_inquiry(&sam(), inquiry_draft(&listing.id, &sam(), "Priya Shah"))
        .expect("inquiry");

    let mut update = update_keeping(&inquiry);
    update.assigned_agent = alice();
    match service.update_inquiry(&sam(), &inquiry.id, update) {
        Err(OfficeError::Unauthorized(_)) => {}
        other => panic!("expected unauthorized reassignment, got {other:?}"),
    }
}

#[test]
fn keeping_a_deactivated_assignee_is_not_a_new_assignment() {
    let service = service_with_team();
    let listing = service
        .add_property(&alice(), property_draft())
        .expect("listing");

    let inquiry = service
        .add_inquiry(&alice(), inquiry_draft(&listing.id, &robin(), "Priya Shah"))
        .expect("inquiry assigned to robin");

    service
        .deactivate_agent(&admin(), &robin())
        .expect("deactivation succeeds");

    // Status change with the assignment untouched still works.
    let mut update = update_keeping(&inquiry);
    update.status = InquiryStatus::FollowUp;
    let updated = service
        .update_inquiry(&alice(), &inquiry.id, update)
        .expect("retained assignment is allowed");
    assert_eq!(updated.assigned_agent, robin());

    // Moving it back to robin, however, is a new assignment.
    let mut reassign = update_keeping(&updated);
    reassign.assigned_agent = alice();
    let moved = service
        .update_inquiry(&alice(), &inquiry.id, reassign)
        .expect("reassignment to an active agent");

    let mut back = update_keeping(&moved);
    back.assigned_agent = robin();
    match service.update_inquiry(&alice(), &inquiry.id, back) {
        Err(OfficeError::InvalidReference(_)) => {}
        other => panic!("expected invalid reference, got {other:?}"),
    }
}

#[test]
fn property_scoped_lookup_respects_inquiry_visibility() {
    let service = service_with_team();
    let listing = service
        .add_property(&alice(), property_draft())
        .expect("listing");
    let other_listing = service
        .add_property(&alice(), draft_in("Pune", "Baner", "Pashan Link", 900))
        .expect("listing");

    service
        .add_inquiry(&sam(), inquiry_draft(&listing.id, &sam(), "Priya Shah"))
        .expect("inquiry");
    service
        .add_inquiry(&alice(), inquiry_draft(&listing.id, &alice(), "Dev Kumar"))
        .expect("inquiry");
    service
        .add_inquiry(&alice(), inquiry_draft(&other_listing.id, &alice(), "Nina George"))
        .expect("inquiry");

    let all_for_listing = service
        .get_inquiries_by_property(&alice(), &listing.id)
        .expect("agent sees all");
    assert_eq!(all_for_listing.len(), 2);

    let own_for_listing = service
        .get_inquiries_by_property(&sam(), &listing.id)
        .expect("assistant sees own");
    assert_eq!(own_for_listing.len(), 1);
    assert_eq!(own_for_listing[0].assigned_agent, sam());

    let missing = PropertyId("prop-missing".to_string());
    match service.get_inquiries_by_property(&alice(), &missing) {
        Err(OfficeError::NotFound(_)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}
