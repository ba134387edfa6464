use super::domain::PrincipalId;
use std::collections::HashSet;

/// Collaborator interface to the external identity provider. The store only
/// ever asks one question of it: is this caller an administrator?
/// Administrators need no agent record.
pub trait IdentityGate: Send + Sync {
    fn is_admin(&self, caller: &PrincipalId) -> bool;
}

/// Identity gate backed by a fixed administrator roster, typically loaded
/// from configuration.
#[derive(Debug, Default, Clone)]
pub struct StaticAdminRoster {
    admins: HashSet<PrincipalId>,
}

impl StaticAdminRoster {
    pub fn new(admins: impl IntoIterator<Item = PrincipalId>) -> Self {
        Self {
            admins: admins.into_iter().collect(),
        }
    }
}

impl IdentityGate for StaticAdminRoster {
    fn is_admin(&self, caller: &PrincipalId) -> bool {
        self.admins.contains(caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_recognizes_only_listed_principals() {
        let roster = StaticAdminRoster::new([PrincipalId("principal-root".to_string())]);
        assert!(roster.is_admin(&PrincipalId("principal-root".to_string())));
        assert!(!roster.is_admin(&PrincipalId("principal-guest".to_string())));
    }
}
