use std::sync::Arc;

use crate::office::domain::{
    AgentDraft, AgentRole, Coordinates, FurnishingStatus, InquiryDraft, InquirySource, Location,
    PrincipalId, PropertyCategory, PropertyConfiguration, PropertyDraft, PropertyId, PropertyType,
};
use crate::office::identity::StaticAdminRoster;
use crate::office::service::OfficeService;

pub(super) fn admin() -> PrincipalId {
    PrincipalId("principal-admin".to_string())
}

pub(super) fn alice() -> PrincipalId {
    PrincipalId("principal-alice".to_string())
}

pub(super) fn jamie() -> PrincipalId {
    PrincipalId("principal-jamie".to_string())
}

pub(super) fn sam() -> PrincipalId {
    PrincipalId("principal-sam".to_string())
}

pub(super) fn robin() -> PrincipalId {
    PrincipalId("principal-robin".to_string())
}

pub(super) fn stranger() -> PrincipalId {
    PrincipalId("principal-stranger".to_string())
}

pub(super) fn build_service() -> OfficeService {
    OfficeService::new(Arc::new(StaticAdminRoster::new([admin()])), "central")
}

/// An office with the admin registered as an agent plus one agent of every
/// other role: alice (Agent), jamie (JuniorAgent), sam (Assistant), and
/// robin (Agent, available for deactivation scenarios).
pub(super) fn service_with_team() -> OfficeService {
    let service = build_service();
    let root = admin();
    for (id, name, role) in [
        (root.clone(), "Morgan Lee", AgentRole::Admin),
        (alice(), "Alice Rao", AgentRole::Agent),
        (jamie(), "Jamie Fox", AgentRole::JuniorAgent),
        (sam(), "Sam Iyer", AgentRole::Assistant),
        (robin(), "Robin Patel", AgentRole::Agent),
    ] {
        service
            .add_agent(&root, agent_draft(id, name, role))
            .expect("team member registers");
    }
    service
}

pub(super) fn agent_draft(id: PrincipalId, name: &str, role: AgentRole) -> AgentDraft {
    AgentDraft {
        id,
        name: name.to_string(),
        contact_info: format!("{}@office.example", name.to_ascii_lowercase().replace(' ', ".")),
        role,
    }
}

pub(super) fn property_draft() -> PropertyDraft {
    PropertyDraft {
        title: "Lakeview 2BHK".to_string(),
        description: "Bright corner unit facing the lake".to_string(),
        location: Location {
            city: "Hyderabad".to_string(),
            suburb: "Kondapur".to_string(),
            area: "Botanical Garden".to_string(),
            road_name: "Main Rd".to_string(),
        },
        coordinates: Coordinates {
            lat: 17.46,
            lng: 78.36,
        },
        price: 5_500_000,
        category: PropertyCategory::Resale,
        property_type: PropertyType::Residential,
        configuration: PropertyConfiguration::TwoBhk,
        furnishing: FurnishingStatus::SemiFurnished,
        images: Vec::new(),
    }
}

pub(super) fn draft_in(city: &str, suburb: &str, area: &str, price: u64) -> PropertyDraft {
    let mut draft = property_draft();
    draft.title = format!("{suburb} listing");
    draft.location.city = city.to_string();
    draft.location.suburb = suburb.to_string();
    draft.location.area = area.to_string();
    draft.price = price;
    draft
}

pub(super) fn inquiry_draft(
    property_id: &PropertyId,
    assigned: &PrincipalId,
    customer: &str,
) -> InquiryDraft {
    InquiryDraft {
        property_id: property_id.clone(),
        customer_name: customer.to_string(),
        contact_info: format!("{}@customers.example", customer.to_ascii_lowercase().replace(' ', ".")),
        source: InquirySource::Website,
        assigned_agent: assigned.clone(),
        notes: "Requested a weekend visit".to_string(),
    }
}
