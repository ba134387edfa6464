//! Role capability matrix. Roles form a flat set, not a hierarchy; each
//! capability names its allowed roles explicitly.

use super::domain::AgentRole;

/// Create listings, and update own listings (admins may update anyone's).
pub const fn can_manage_properties(role: AgentRole) -> bool {
    match role {
        AgentRole::Admin | AgentRole::Agent | AgentRole::JuniorAgent => true,
        AgentRole::Assistant => false,
    }
}

/// View, search, filter, and run location lookups over listings.
pub const fn can_view_properties(role: AgentRole) -> bool {
    match role {
        AgentRole::Admin | AgentRole::Agent | AgentRole::JuniorAgent | AgentRole::Assistant => true,
    }
}

pub const fn can_access_analytics(role: AgentRole) -> bool {
    match role {
        AgentRole::Admin | AgentRole::Agent | AgentRole::JuniorAgent => true,
        AgentRole::Assistant => false,
    }
}

/// Create, view, and update inquiries. Assistants are limited to inquiries
/// assigned to themselves by [`can_manage_all_inquiries`].
pub const fn can_manage_inquiries(role: AgentRole) -> bool {
    match role {
        AgentRole::Admin | AgentRole::Agent | AgentRole::JuniorAgent | AgentRole::Assistant => true,
    }
}

/// See and update inquiries assigned to other agents.
pub const fn can_manage_all_inquiries(role: AgentRole) -> bool {
    match role {
        AgentRole::Admin | AgentRole::Agent => true,
        AgentRole::JuniorAgent | AgentRole::Assistant => false,
    }
}

/// Assign an inquiry to an agent other than oneself.
pub const fn can_assign_to_other_agents(role: AgentRole) -> bool {
    match role {
        AgentRole::Admin | AgentRole::Agent | AgentRole::JuniorAgent => true,
        AgentRole::Assistant => false,
    }
}

/// Register, update, and deactivate agents.
pub const fn can_manage_agents(role: AgentRole) -> bool {
    match role {
        AgentRole::Admin => true,
        AgentRole::Agent | AgentRole::JuniorAgent | AgentRole::Assistant => false,
    }
}

pub const fn can_reset_data(role: AgentRole) -> bool {
    match role {
        AgentRole::Admin => true,
        AgentRole::Agent | AgentRole::JuniorAgent | AgentRole::Assistant => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::office::domain::AgentRole::*;

    #[test]
    fn assistants_cannot_touch_listings_or_analytics() {
        assert!(!can_manage_properties(Assistant));
        assert!(!can_access_analytics(Assistant));
        assert!(can_view_properties(Assistant));
        assert!(can_manage_inquiries(Assistant));
    }

    #[test]
    fn only_admins_manage_agents_and_reset() {
        for role in AgentRole::ordered() {
            assert_eq!(can_manage_agents(role), role == Admin);
            assert_eq!(can_reset_data(role), role == Admin);
        }
    }

    #[test]
    fn junior_agents_assign_but_do_not_see_others_inquiries() {
        assert!(can_assign_to_other_agents(JuniorAgent));
        assert!(!can_manage_all_inquiries(JuniorAgent));
        assert!(can_manage_all_inquiries(Agent));
        assert!(can_manage_all_inquiries(Admin));
    }
}
