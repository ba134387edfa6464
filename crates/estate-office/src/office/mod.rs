//! The office backend: strongly-typed record store for agents, listings,
//! inquiries, and member profiles, guarded by the role capability matrix and
//! queried through fixed lookups, the criteria search, the advanced filter,
//! and the analytics aggregator.

pub mod analytics;
pub mod domain;
pub mod identity;
pub mod intake;
pub mod policy;
pub mod router;
pub mod search;
pub mod service;

#[cfg(test)]
mod tests;

pub use analytics::{
    CombinedAnalytics, DistributionSlice, PriceSpread, RegionAnalytics, RegionDensityEntry,
    RegionPricingEntry,
};
pub use domain::{
    Agent, AgentDraft, AgentRole, AgentUpdate, Coordinates, FurnishingStatus, ImageRef, Inquiry,
    InquiryDraft, InquiryId, InquirySource, InquiryStatus, InquiryUpdate, Location, PrincipalId,
    Property, PropertyCategory, PropertyConfiguration, PropertyDraft, PropertyId, PropertyStatus,
    PropertyType, PropertyUpdate, UserProfile,
};
pub use identity::{IdentityGate, StaticAdminRoster};
pub use intake::{ListingCsvImporter, ListingImportError};
pub use router::{office_router, CALLER_HEADER};
pub use search::{
    AdvancedPropertyFilter, CoordinateFilter, LocationFilter, PriceRange, SearchCriteria,
};
pub use service::{ListingIntakeError, OfficeError, OfficeService};
