use std::io::Read;
use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use parking_lot::Mutex;
use tracing::info;

use crate::config::OfficeConfig;

use super::analytics::{
    self, CombinedAnalytics, DistributionSlice,
};
use super::domain::{
    derive_inquiry_id, derive_property_id, Agent, AgentDraft, AgentRole, AgentUpdate, Inquiry,
    InquiryDraft, InquiryId, InquiryUpdate, PrincipalId, Property, PropertyCategory, PropertyDraft,
    PropertyId, PropertyStatus, PropertyUpdate, UserProfile,
};
use super::identity::{IdentityGate, StaticAdminRoster};
use super::intake::{ListingCsvImporter, ListingImportError};
use super::policy;
use super::search::{AdvancedPropertyFilter, SearchCriteria};

/// Error raised by store operations. Exactly one condition is reported per
/// call, and a failed call performs no mutation.
#[derive(Debug, thiserror::Error)]
pub enum OfficeError {
    #[error("caller may not {0}")]
    Unauthorized(&'static str),
    #[error("{0}")]
    NotFound(String),
    #[error("invalid reference: {0}")]
    InvalidReference(String),
}

/// Error raised by the bulk listing intake operation.
#[derive(Debug, thiserror::Error)]
pub enum ListingIntakeError {
    #[error(transparent)]
    Import(#[from] ListingImportError),
    #[error(transparent)]
    Office(#[from] OfficeError),
}

/// The office backend: sole owner of the four record collections, with every
/// public operation re-deriving the caller's effective role from the current
/// agent roster before touching state. One mutex serializes all operations,
/// so each call is a run-to-completion transaction.
pub struct OfficeService {
    gate: Arc<dyn IdentityGate>,
    region: String,
    state: Mutex<OfficeState>,
}

#[derive(Default)]
struct OfficeState {
    agents: IndexMap<PrincipalId, Agent>,
    properties: IndexMap<PropertyId, Property>,
    inquiries: IndexMap<InquiryId, Inquiry>,
    profiles: IndexMap<PrincipalId, UserProfile>,
}

impl OfficeState {
    /// Administrators resolve through the identity gate without needing an
    /// agent record; everyone else gets the role of their current, active
    /// record. No caching: deactivation and role changes bite on the very
    /// next call.
    fn effective_role(&self, gate: &dyn IdentityGate, caller: &PrincipalId) -> Option<AgentRole> {
        if gate.is_admin(caller) {
            return Some(AgentRole::Admin);
        }
        match self.agents.get(caller) {
            Some(agent) if agent.active => Some(agent.role),
            _ => None,
        }
    }

    fn is_valid_active_agent(&self, id: &PrincipalId) -> bool {
        self.agents.get(id).map_or(false, |agent| agent.active)
    }

    // Enumeration order is a contract: ascending creation time, ties in
    // insertion order. The maps preserve insertion order, so a stable sort
    // on `created_at` is all that is needed.

    fn agents_ordered(&self) -> Vec<Agent> {
        let mut agents: Vec<Agent> = self.agents.values().cloned().collect();
        agents.sort_by_key(|agent| agent.created_at);
        agents
    }

    fn properties_ordered(&self) -> Vec<Property> {
        let mut properties: Vec<Property> = self.properties.values().cloned().collect();
        properties.sort_by_key(|property| property.created_at);
        properties
    }

    fn inquiries_ordered(&self) -> Vec<Inquiry> {
        let mut inquiries: Vec<Inquiry> = self.inquiries.values().cloned().collect();
        inquiries.sort_by_key(|inquiry| inquiry.created_at);
        inquiries
    }
}

impl OfficeService {
    pub fn new(gate: Arc<dyn IdentityGate>, region: impl Into<String>) -> Self {
        Self {
            gate,
            region: region.into(),
            state: Mutex::new(OfficeState::default()),
        }
    }

    /// Build a service whose identity gate is the configured administrator
    /// roster.
    pub fn from_config(config: &OfficeConfig) -> Self {
        let roster = StaticAdminRoster::new(config.administrators.iter().cloned());
        Self::new(Arc::new(roster), config.region.clone())
    }

    pub fn region(&self) -> &str {
        &self.region
    }

    /// Base access: the caller must resolve to some role right now. Checked
    /// before anything else on every operation.
    fn require_base(
        &self,
        state: &OfficeState,
        caller: &PrincipalId,
    ) -> Result<AgentRole, OfficeError> {
        state
            .effective_role(self.gate.as_ref(), caller)
            .ok_or(OfficeError::Unauthorized("access the office records"))
    }

    fn authorize(
        &self,
        state: &OfficeState,
        caller: &PrincipalId,
        check: fn(AgentRole) -> bool,
        action: &'static str,
    ) -> Result<AgentRole, OfficeError> {
        let role = self.require_base(state, caller)?;
        if check(role) {
            Ok(role)
        } else {
            Err(OfficeError::Unauthorized(action))
        }
    }

    // ------------------------------------------------------------------
    // Agents
    // ------------------------------------------------------------------

    pub fn add_agent(
        &self,
        caller: &PrincipalId,
        draft: AgentDraft,
    ) -> Result<Agent, OfficeError> {
        let mut state = self.state.lock();
        self.authorize(&state, caller, policy::can_manage_agents, "manage agents")?;

        if state.agents.contains_key(&draft.id) {
            return Err(OfficeError::InvalidReference(format!(
                "agent {} is already registered",
                draft.id
            )));
        }

        let now = Utc::now();
        let agent = Agent {
            id: draft.id.clone(),
            name: draft.name,
            contact_info: draft.contact_info,
            role: draft.role,
            active: true,
            created_at: now,
            updated_at: now,
        };
        state.agents.insert(draft.id.clone(), agent.clone());
        info!(agent = %draft.id, role = agent.role.label(), "registered agent");
        Ok(agent)
    }

    pub fn update_agent(
        &self,
        caller: &PrincipalId,
        id: &PrincipalId,
        update: AgentUpdate,
    ) -> Result<Agent, OfficeError> {
        let mut state = self.state.lock();
        self.authorize(&state, caller, policy::can_manage_agents, "manage agents")?;

        let agent = state
            .agents
            .get_mut(id)
            .ok_or_else(|| OfficeError::NotFound(format!("agent {id} not found")))?;

        agent.name = update.name;
        agent.contact_info = update.contact_info;
        agent.role = update.role;
        agent.updated_at = Utc::now();
        let agent = agent.clone();
        info!(agent = %id, role = agent.role.label(), "updated agent");
        Ok(agent)
    }

    /// Soft deactivation: the record stays, existing listings and
    /// assignments stay, but the agent loses base access and can no longer
    /// receive new assignments.
    pub fn deactivate_agent(
        &self,
        caller: &PrincipalId,
        id: &PrincipalId,
    ) -> Result<Agent, OfficeError> {
        let mut state = self.state.lock();
        self.authorize(&state, caller, policy::can_manage_agents, "manage agents")?;

        let agent = state
            .agents
            .get_mut(id)
            .ok_or_else(|| OfficeError::NotFound(format!("agent {id} not found")))?;

        agent.active = false;
        agent.updated_at = Utc::now();
        let agent = agent.clone();
        info!(agent = %id, "deactivated agent");
        Ok(agent)
    }

    pub fn get_agent(
        &self,
        caller: &PrincipalId,
        id: &PrincipalId,
    ) -> Result<Agent, OfficeError> {
        let state = self.state.lock();
        self.require_base(&state, caller)?;
        state
            .agents
            .get(id)
            .cloned()
            .ok_or_else(|| OfficeError::NotFound(format!("agent {id} not found")))
    }

    pub fn get_all_agents(&self, caller: &PrincipalId) -> Result<Vec<Agent>, OfficeError> {
        let state = self.state.lock();
        self.require_base(&state, caller)?;
        Ok(state.agents_ordered())
    }

    // ------------------------------------------------------------------
    // Properties
    // ------------------------------------------------------------------

    pub fn add_property(
        &self,
        caller: &PrincipalId,
        draft: PropertyDraft,
    ) -> Result<Property, OfficeError> {
        let mut state = self.state.lock();
        self.authorize(
            &state,
            caller,
            policy::can_manage_properties,
            "manage listings",
        )?;

        let property = Self::build_property(&state, caller, draft)?;
        state
            .properties
            .insert(property.id.clone(), property.clone());
        info!(property = %property.id, lister = %caller, "added listing");
        Ok(property)
    }

    /// Bulk intake: parse a CSV export into drafts, then add them all within
    /// a single transaction. Any bad row or invalid reference rejects the
    /// whole batch.
    pub fn import_listings<R: Read>(
        &self,
        caller: &PrincipalId,
        reader: R,
    ) -> Result<Vec<Property>, ListingIntakeError> {
        let drafts = ListingCsvImporter::from_reader(reader)?;

        let mut state = self.state.lock();
        self.authorize(
            &state,
            caller,
            policy::can_manage_properties,
            "manage listings",
        )
        .map_err(ListingIntakeError::Office)?;

        let mut batch = Vec::with_capacity(drafts.len());
        for draft in drafts {
            batch.push(Self::build_property(&state, caller, draft)?);
        }

        for property in &batch {
            state
                .properties
                .insert(property.id.clone(), property.clone());
        }
        info!(count = batch.len(), lister = %caller, "imported listings");
        Ok(batch)
    }

    fn build_property(
        state: &OfficeState,
        caller: &PrincipalId,
        draft: PropertyDraft,
    ) -> Result<Property, OfficeError> {
        // The lister must have an agent record, active or not.
        if !state.agents.contains_key(caller) {
            return Err(OfficeError::InvalidReference(format!(
                "listing agent {caller} is not registered"
            )));
        }

        let now = Utc::now();
        let id = derive_property_id(&draft.location, draft.price, now);
        Ok(Property {
            id,
            title: draft.title,
            description: draft.description,
            location: draft.location,
            coordinates: draft.coordinates,
            price: draft.price,
            category: draft.category,
            property_type: draft.property_type,
            configuration: draft.configuration,
            furnishing: draft.furnishing,
            status: PropertyStatus::Available,
            listed_by: caller.clone(),
            created_at: now,
            updated_at: now,
            images: draft.images,
        })
    }

    pub fn update_property(
        &self,
        caller: &PrincipalId,
        id: &PropertyId,
        update: PropertyUpdate,
    ) -> Result<Property, OfficeError> {
        let mut state = self.state.lock();
        let role = self.authorize(
            &state,
            caller,
            policy::can_manage_properties,
            "manage listings",
        )?;

        let property = state
            .properties
            .get_mut(id)
            .ok_or_else(|| OfficeError::NotFound(format!("property {id} not found")))?;

        if property.listed_by != *caller && role != AgentRole::Admin {
            return Err(OfficeError::Unauthorized(
                "update listings owned by another agent",
            ));
        }

        property.title = update.title;
        property.description = update.description;
        property.location = update.location;
        property.coordinates = update.coordinates;
        property.price = update.price;
        property.category = update.category;
        property.property_type = update.property_type;
        property.configuration = update.configuration;
        property.furnishing = update.furnishing;
        property.status = update.status;
        property.images = update.images;
        property.updated_at = Utc::now();
        let property = property.clone();
        info!(property = %id, "updated listing");
        Ok(property)
    }

    pub fn get_property(
        &self,
        caller: &PrincipalId,
        id: &PropertyId,
    ) -> Result<Property, OfficeError> {
        let state = self.state.lock();
        self.authorize(&state, caller, policy::can_view_properties, "view listings")?;
        state
            .properties
            .get(id)
            .cloned()
            .ok_or_else(|| OfficeError::NotFound(format!("property {id} not found")))
    }

    pub fn get_all_properties(&self, caller: &PrincipalId) -> Result<Vec<Property>, OfficeError> {
        let state = self.state.lock();
        self.authorize(&state, caller, policy::can_view_properties, "view listings")?;
        Ok(state.properties_ordered())
    }

    pub fn get_properties_by_city(
        &self,
        caller: &PrincipalId,
        city: &str,
    ) -> Result<Vec<Property>, OfficeError> {
        self.properties_where(caller, |property| property.location.city == city)
    }

    pub fn get_properties_by_status(
        &self,
        caller: &PrincipalId,
        status: PropertyStatus,
    ) -> Result<Vec<Property>, OfficeError> {
        self.properties_where(caller, |property| property.status == status)
    }

    pub fn get_properties_by_category(
        &self,
        caller: &PrincipalId,
        category: PropertyCategory,
    ) -> Result<Vec<Property>, OfficeError> {
        self.properties_where(caller, |property| property.category == category)
    }

    pub fn get_properties_by_agent(
        &self,
        caller: &PrincipalId,
        agent: &PrincipalId,
    ) -> Result<Vec<Property>, OfficeError> {
        self.properties_where(caller, |property| property.listed_by == *agent)
    }

    fn properties_where<F>(
        &self,
        caller: &PrincipalId,
        predicate: F,
    ) -> Result<Vec<Property>, OfficeError>
    where
        F: Fn(&Property) -> bool,
    {
        let state = self.state.lock();
        self.authorize(&state, caller, policy::can_view_properties, "view listings")?;
        Ok(state
            .properties_ordered()
            .into_iter()
            .filter(|property| predicate(property))
            .collect())
    }

    pub fn search_and_filter_properties(
        &self,
        caller: &PrincipalId,
        criteria: &SearchCriteria,
    ) -> Result<Vec<Property>, OfficeError> {
        self.properties_where(caller, |property| criteria.matches(property))
    }

    pub fn advanced_filter_properties(
        &self,
        caller: &PrincipalId,
        filter: &AdvancedPropertyFilter,
    ) -> Result<Vec<Property>, OfficeError> {
        let state = self.state.lock();
        self.authorize(&state, caller, policy::can_view_properties, "view listings")?;
        Ok(filter.apply(&state.properties_ordered()))
    }

    // ------------------------------------------------------------------
    // Location lookups, derived from the live property collection
    // ------------------------------------------------------------------

    pub fn get_all_cities(&self, caller: &PrincipalId) -> Result<Vec<String>, OfficeError> {
        let state = self.state.lock();
        self.authorize(&state, caller, policy::can_view_properties, "view listings")?;
        Ok(distinct(
            state
                .properties_ordered()
                .into_iter()
                .map(|property| property.location.city),
        ))
    }

    pub fn get_suburbs_for_city(
        &self,
        caller: &PrincipalId,
        city: &str,
    ) -> Result<Vec<String>, OfficeError> {
        let state = self.state.lock();
        self.authorize(&state, caller, policy::can_view_properties, "view listings")?;
        Ok(distinct(
            state
                .properties_ordered()
                .into_iter()
                .filter(|property| property.location.city == city)
                .map(|property| property.location.suburb),
        ))
    }

    pub fn get_areas_for_suburb(
        &self,
        caller: &PrincipalId,
        suburb: &str,
    ) -> Result<Vec<String>, OfficeError> {
        let state = self.state.lock();
        self.authorize(&state, caller, policy::can_view_properties, "view listings")?;
        Ok(distinct(
            state
                .properties_ordered()
                .into_iter()
                .filter(|property| property.location.suburb == suburb)
                .map(|property| property.location.area),
        ))
    }

    // ------------------------------------------------------------------
    // Inquiries
    // ------------------------------------------------------------------

    pub fn add_inquiry(
        &self,
        caller: &PrincipalId,
        draft: InquiryDraft,
    ) -> Result<Inquiry, OfficeError> {
        let mut state = self.state.lock();
        let role = self.authorize(
            &state,
            caller,
            policy::can_manage_inquiries,
            "manage inquiries",
        )?;

        if draft.assigned_agent != *caller && !policy::can_assign_to_other_agents(role) {
            return Err(OfficeError::Unauthorized(
                "assign inquiries to other agents",
            ));
        }

        if !state.properties.contains_key(&draft.property_id) {
            return Err(OfficeError::NotFound(format!(
                "property {} not found",
                draft.property_id
            )));
        }

        if !state.is_valid_active_agent(&draft.assigned_agent) {
            return Err(OfficeError::InvalidReference(format!(
                "agent {} is not an active agent",
                draft.assigned_agent
            )));
        }

        let now = Utc::now();
        let id = derive_inquiry_id(&draft.property_id, &draft.customer_name, now);
        let inquiry = Inquiry {
            id: id.clone(),
            property_id: draft.property_id,
            customer_name: draft.customer_name,
            contact_info: draft.contact_info,
            source: draft.source,
            status: super::domain::InquiryStatus::New,
            assigned_agent: draft.assigned_agent,
            notes: draft.notes,
            created_at: now,
            updated_at: now,
        };
        state.inquiries.insert(id.clone(), inquiry.clone());
        info!(inquiry = %id, assigned = %inquiry.assigned_agent, "logged inquiry");
        Ok(inquiry)
    }

    pub fn update_inquiry(
        &self,
        caller: &PrincipalId,
        id: &InquiryId,
        update: InquiryUpdate,
    ) -> Result<Inquiry, OfficeError> {
        let mut state = self.state.lock();
        let role = self.authorize(
            &state,
            caller,
            policy::can_manage_inquiries,
            "manage inquiries",
        )?;

        let existing = state
            .inquiries
            .get(id)
            .ok_or_else(|| OfficeError::NotFound(format!("inquiry {id} not found")))?;

        if existing.assigned_agent != *caller && !policy::can_manage_all_inquiries(role) {
            return Err(OfficeError::Unauthorized(
                "update inquiries assigned to other agents",
            ));
        }

        // Re-assignment follows the same rule as creation; keeping an
        // existing (possibly deactivated) assignee is not a new assignment.
        if update.assigned_agent != existing.assigned_agent {
            if update.assigned_agent != *caller && !policy::can_assign_to_other_agents(role) {
                return Err(OfficeError::Unauthorized(
                    "assign inquiries to other agents",
                ));
            }
            if !state.is_valid_active_agent(&update.assigned_agent) {
                return Err(OfficeError::InvalidReference(format!(
                    "agent {} is not an active agent",
                    update.assigned_agent
                )));
            }
        }

        let inquiry = state
            .inquiries
            .get_mut(id)
            .ok_or_else(|| OfficeError::NotFound(format!("inquiry {id} not found")))?;
        inquiry.customer_name = update.customer_name;
        inquiry.contact_info = update.contact_info;
        inquiry.source = update.source;
        inquiry.status = update.status;
        inquiry.assigned_agent = update.assigned_agent;
        inquiry.notes = update.notes;
        inquiry.updated_at = Utc::now();
        let inquiry = inquiry.clone();
        info!(inquiry = %id, status = inquiry.status.label(), "updated inquiry");
        Ok(inquiry)
    }

    pub fn get_inquiry(
        &self,
        caller: &PrincipalId,
        id: &InquiryId,
    ) -> Result<Inquiry, OfficeError> {
        let state = self.state.lock();
        let role = self.authorize(
            &state,
            caller,
            policy::can_manage_inquiries,
            "view inquiries",
        )?;

        let inquiry = state
            .inquiries
            .get(id)
            .ok_or_else(|| OfficeError::NotFound(format!("inquiry {id} not found")))?;

        if inquiry.assigned_agent != *caller && !policy::can_manage_all_inquiries(role) {
            return Err(OfficeError::Unauthorized(
                "view inquiries assigned to other agents",
            ));
        }

        Ok(inquiry.clone())
    }

    pub fn get_all_inquiries(&self, caller: &PrincipalId) -> Result<Vec<Inquiry>, OfficeError> {
        let state = self.state.lock();
        let role = self.authorize(
            &state,
            caller,
            policy::can_manage_inquiries,
            "view inquiries",
        )?;

        let mut inquiries = state.inquiries_ordered();
        if !policy::can_manage_all_inquiries(role) {
            inquiries.retain(|inquiry| inquiry.assigned_agent == *caller);
        }
        Ok(inquiries)
    }

    pub fn get_inquiries_by_agent(
        &self,
        caller: &PrincipalId,
        agent: &PrincipalId,
    ) -> Result<Vec<Inquiry>, OfficeError> {
        let state = self.state.lock();
        let role = self.authorize(
            &state,
            caller,
            policy::can_manage_inquiries,
            "view inquiries",
        )?;

        if *agent != *caller && !policy::can_manage_all_inquiries(role) {
            return Err(OfficeError::Unauthorized(
                "view inquiries assigned to other agents",
            ));
        }

        let mut inquiries = state.inquiries_ordered();
        inquiries.retain(|inquiry| inquiry.assigned_agent == *agent);
        Ok(inquiries)
    }

    pub fn get_inquiries_by_property(
        &self,
        caller: &PrincipalId,
        property_id: &PropertyId,
    ) -> Result<Vec<Inquiry>, OfficeError> {
        let state = self.state.lock();
        let role = self.authorize(
            &state,
            caller,
            policy::can_manage_inquiries,
            "view inquiries",
        )?;

        if !state.properties.contains_key(property_id) {
            return Err(OfficeError::NotFound(format!(
                "property {property_id} not found"
            )));
        }

        let mut inquiries = state.inquiries_ordered();
        inquiries.retain(|inquiry| inquiry.property_id == *property_id);
        if !policy::can_manage_all_inquiries(role) {
            inquiries.retain(|inquiry| inquiry.assigned_agent == *caller);
        }
        Ok(inquiries)
    }

    // ------------------------------------------------------------------
    // Analytics
    // ------------------------------------------------------------------

    /// Administrators aggregate over everything; everyone else over their
    /// own listings only.
    fn analytics_scope(&self, state: &OfficeState, caller: &PrincipalId, role: AgentRole) -> Vec<Property> {
        let mut properties = state.properties_ordered();
        if role != AgentRole::Admin {
            properties.retain(|property| property.listed_by == *caller);
        }
        properties
    }

    pub fn get_configuration_distribution(
        &self,
        caller: &PrincipalId,
    ) -> Result<Vec<DistributionSlice>, OfficeError> {
        let state = self.state.lock();
        let role = self.authorize(
            &state,
            caller,
            policy::can_access_analytics,
            "access analytics",
        )?;
        let scope = self.analytics_scope(&state, caller, role);
        Ok(analytics::configuration_distribution(&scope))
    }

    pub fn get_furnishing_distribution(
        &self,
        caller: &PrincipalId,
    ) -> Result<Vec<DistributionSlice>, OfficeError> {
        let state = self.state.lock();
        let role = self.authorize(
            &state,
            caller,
            policy::can_access_analytics,
            "access analytics",
        )?;
        let scope = self.analytics_scope(&state, caller, role);
        Ok(analytics::furnishing_distribution(&scope))
    }

    pub fn get_combined_analytics(
        &self,
        caller: &PrincipalId,
    ) -> Result<CombinedAnalytics, OfficeError> {
        let state = self.state.lock();
        let role = self.authorize(
            &state,
            caller,
            policy::can_access_analytics,
            "access analytics",
        )?;
        let scope = self.analytics_scope(&state, caller, role);
        Ok(analytics::combined_analytics(&self.region, &scope))
    }

    // ------------------------------------------------------------------
    // User profiles
    // ------------------------------------------------------------------

    pub fn save_caller_user_profile(
        &self,
        caller: &PrincipalId,
        profile: UserProfile,
    ) -> Result<UserProfile, OfficeError> {
        let mut state = self.state.lock();
        self.require_base(&state, caller)?;
        state.profiles.insert(caller.clone(), profile.clone());
        Ok(profile)
    }

    pub fn get_caller_user_profile(
        &self,
        caller: &PrincipalId,
    ) -> Result<UserProfile, OfficeError> {
        let state = self.state.lock();
        self.require_base(&state, caller)?;
        state
            .profiles
            .get(caller)
            .cloned()
            .ok_or_else(|| OfficeError::NotFound(format!("profile for {caller} not found")))
    }

    pub fn get_user_profile(
        &self,
        caller: &PrincipalId,
        subject: &PrincipalId,
    ) -> Result<UserProfile, OfficeError> {
        let state = self.state.lock();
        let role = self.require_base(&state, caller)?;

        if *subject != *caller && role != AgentRole::Admin {
            return Err(OfficeError::Unauthorized(
                "view another member's profile",
            ));
        }

        state
            .profiles
            .get(subject)
            .cloned()
            .ok_or_else(|| OfficeError::NotFound(format!("profile for {subject} not found")))
    }

    // ------------------------------------------------------------------
    // Reset
    // ------------------------------------------------------------------

    /// Replace all four collections with empty ones. All-or-nothing: either
    /// the caller is an administrator and everything clears, or nothing does.
    pub fn reset_to_fresh_draft(&self, caller: &PrincipalId) -> Result<(), OfficeError> {
        let mut state = self.state.lock();
        self.authorize(&state, caller, policy::can_reset_data, "reset office data")?;

        *state = OfficeState::default();
        info!("reset all office records");
        Ok(())
    }
}

fn distinct(values: impl Iterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut out = Vec::new();
    for value in values {
        if seen.insert(value.clone()) {
            out.push(value);
        }
    }
    out
}
