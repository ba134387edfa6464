use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque caller identity issued by the external identity provider. Also the
/// key for agent records and user profiles.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PrincipalId(pub String);

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier for a listed property, derived once at creation and immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertyId(pub String);

impl fmt::Display for PropertyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier for a customer inquiry, derived once at creation and immutable
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InquiryId(pub String);

impl fmt::Display for InquiryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque reference to an externally stored listing image. The store never
/// interprets its content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentRole {
    Admin,
    Agent,
    JuniorAgent,
    Assistant,
}

impl AgentRole {
    pub const fn ordered() -> [Self; 4] {
        [Self::Admin, Self::Agent, Self::JuniorAgent, Self::Assistant]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Admin => "Admin",
            Self::Agent => "Agent",
            Self::JuniorAgent => "Junior Agent",
            Self::Assistant => "Assistant",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyCategory {
    Resale,
    Rental,
    UnderConstruction,
}

impl PropertyCategory {
    pub const fn ordered() -> [Self; 3] {
        [Self::Resale, Self::Rental, Self::UnderConstruction]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Resale => "Resale",
            Self::Rental => "Rental",
            Self::UnderConstruction => "Under Construction",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Residential,
    Commercial,
    Industrial,
}

impl PropertyType {
    pub const fn ordered() -> [Self; 3] {
        [Self::Residential, Self::Commercial, Self::Industrial]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Residential => "Residential",
            Self::Commercial => "Commercial",
            Self::Industrial => "Industrial",
        }
    }
}

/// Layout of a listed unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyConfiguration {
    Studio,
    OneBhk,
    TwoBhk,
    ThreeBhk,
    FourBhk,
    FiveBhk,
    Penthouse,
    Villa,
    RowHouse,
    Duplex,
    Plot,
    OfficeSpace,
    Shop,
    Warehouse,
}

impl PropertyConfiguration {
    pub const fn ordered() -> [Self; 14] {
        [
            Self::Studio,
            Self::OneBhk,
            Self::TwoBhk,
            Self::ThreeBhk,
            Self::FourBhk,
            Self::FiveBhk,
            Self::Penthouse,
            Self::Villa,
            Self::RowHouse,
            Self::Duplex,
            Self::Plot,
            Self::OfficeSpace,
            Self::Shop,
            Self::Warehouse,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Studio => "Studio",
            Self::OneBhk => "1 BHK",
            Self::TwoBhk => "2 BHK",
            Self::ThreeBhk => "3 BHK",
            Self::FourBhk => "4 BHK",
            Self::FiveBhk => "5 BHK",
            Self::Penthouse => "Penthouse",
            Self::Villa => "Villa",
            Self::RowHouse => "Row House",
            Self::Duplex => "Duplex",
            Self::Plot => "Plot",
            Self::OfficeSpace => "Office Space",
            Self::Shop => "Shop",
            Self::Warehouse => "Warehouse",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FurnishingStatus {
    Unfurnished,
    SemiFurnished,
    Furnished,
}

impl FurnishingStatus {
    pub const fn ordered() -> [Self; 3] {
        [Self::Unfurnished, Self::SemiFurnished, Self::Furnished]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Unfurnished => "Unfurnished",
            Self::SemiFurnished => "Semi-Furnished",
            Self::Furnished => "Furnished",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyStatus {
    Available,
    Sold,
    Rented,
    UnderContract,
}

impl PropertyStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::Available, Self::Sold, Self::Rented, Self::UnderContract]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Sold => "Sold",
            Self::Rented => "Rented",
            Self::UnderContract => "Under Contract",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquirySource {
    Website,
    Referral,
    WalkIn,
    Phone,
    SocialMedia,
}

impl InquirySource {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Website,
            Self::Referral,
            Self::WalkIn,
            Self::Phone,
            Self::SocialMedia,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Website => "Website",
            Self::Referral => "Referral",
            Self::WalkIn => "Walk-In",
            Self::Phone => "Phone",
            Self::SocialMedia => "Social Media",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    New,
    InProgress,
    Closed,
    FollowUp,
}

impl InquiryStatus {
    pub const fn ordered() -> [Self; 4] {
        [Self::New, Self::InProgress, Self::Closed, Self::FollowUp]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::InProgress => "In Progress",
            Self::Closed => "Closed",
            Self::FollowUp => "Follow Up",
        }
    }
}

/// Where a property sits in the location hierarchy used by the lookup
/// endpoints (city > suburb > area > road).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub suburb: String,
    pub area: String,
    pub road_name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

/// An office team member. Keyed by principal; never deleted, only
/// soft-deactivated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub id: PrincipalId,
    pub name: String,
    pub contact_info: String,
    pub role: AgentRole,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for registering a new agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDraft {
    pub id: PrincipalId,
    pub name: String,
    pub contact_info: String,
    pub role: AgentRole,
}

/// Mutable agent fields. `active` changes only through deactivation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentUpdate {
    pub name: String,
    pub contact_info: String,
    pub role: AgentRole,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: PropertyId,
    pub title: String,
    pub description: String,
    pub location: Location,
    pub coordinates: Coordinates,
    pub price: u64,
    pub category: PropertyCategory,
    pub property_type: PropertyType,
    pub configuration: PropertyConfiguration,
    pub furnishing: FurnishingStatus,
    pub status: PropertyStatus,
    pub listed_by: PrincipalId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub images: Vec<ImageRef>,
}

/// Payload for creating a listing. The id, lister, status, and timestamps are
/// server-assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyDraft {
    pub title: String,
    pub description: String,
    pub location: Location,
    pub coordinates: Coordinates,
    pub price: u64,
    pub category: PropertyCategory,
    pub property_type: PropertyType,
    pub configuration: PropertyConfiguration,
    pub furnishing: FurnishingStatus,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

/// Full replacement of a listing's mutable fields. `id`, `listed_by`, and
/// `created_at` never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyUpdate {
    pub title: String,
    pub description: String,
    pub location: Location,
    pub coordinates: Coordinates,
    pub price: u64,
    pub category: PropertyCategory,
    pub property_type: PropertyType,
    pub configuration: PropertyConfiguration,
    pub furnishing: FurnishingStatus,
    pub status: PropertyStatus,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: InquiryId,
    pub property_id: PropertyId,
    pub customer_name: String,
    pub contact_info: String,
    pub source: InquirySource,
    pub status: InquiryStatus,
    pub assigned_agent: PrincipalId,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload for logging a new customer inquiry. Status starts at `New`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InquiryDraft {
    pub property_id: PropertyId,
    pub customer_name: String,
    pub contact_info: String,
    pub source: InquirySource,
    pub assigned_agent: PrincipalId,
    pub notes: String,
}

/// Full replacement of an inquiry's mutable fields. `id`, `property_id`, and
/// `created_at` never change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InquiryUpdate {
    pub customer_name: String,
    pub contact_info: String,
    pub source: InquirySource,
    pub status: InquiryStatus,
    pub assigned_agent: PrincipalId,
    pub notes: String,
}

/// Self-service profile, one per caller identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub contact_info: String,
}

pub(crate) fn slug(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut last_dash = true;
    for ch in input.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            out.push('-');
            last_dash = true;
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("unknown");
    }
    out
}

/// Property ids are a deterministic function of location, price, and the
/// creation instant.
pub(crate) fn derive_property_id(
    location: &Location,
    price: u64,
    created_at: DateTime<Utc>,
) -> PropertyId {
    let stamp = created_at.timestamp_nanos_opt().unwrap_or_default();
    PropertyId(format!(
        "prop-{}-{}-{}-{}",
        slug(&location.city),
        slug(&location.suburb),
        price,
        stamp
    ))
}

/// Inquiry ids are a deterministic function of the property, the customer
/// name, and the creation instant.
pub(crate) fn derive_inquiry_id(
    property_id: &PropertyId,
    customer_name: &str,
    created_at: DateTime<Utc>,
) -> InquiryId {
    let stamp = created_at.timestamp_nanos_opt().unwrap_or_default();
    InquiryId(format!(
        "inq-{}-{}-{}",
        property_id.0,
        slug(customer_name),
        stamp
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_collapses_non_alphanumerics() {
        assert_eq!(slug("Banjara  Hills, West"), "banjara-hills-west");
        assert_eq!(slug("  "), "unknown");
        assert_eq!(slug("A-1 Road"), "a-1-road");
    }

    #[test]
    fn property_id_is_deterministic_for_identical_inputs() {
        let location = Location {
            city: "Hyderabad".to_string(),
            suburb: "Gachibowli".to_string(),
            area: "Financial District".to_string(),
            road_name: "Nanakramguda Rd".to_string(),
        };
        let at = Utc::now();
        assert_eq!(
            derive_property_id(&location, 4_500_000, at),
            derive_property_id(&location, 4_500_000, at)
        );
    }

    #[test]
    fn configuration_catalog_covers_fourteen_layouts() {
        assert_eq!(PropertyConfiguration::ordered().len(), 14);
    }
}
