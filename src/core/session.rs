use serde::{Serialize, Deserialize};
use crate::core::api::PledgeApi;

/// Collective fields the pledge page needs
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CollectiveSummary {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub currency: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Host,
    Member,
    Backer,
    Follower,
    #[serde(other)]
    Other,
}

impl Role {
    /// Roles allowed to pledge on behalf of a collective
    pub fn can_pledge(&self) -> bool {
        matches!(self, Role::Admin | Role::Host)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Membership {
    pub role: Role,
    pub collective: CollectiveSummary,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedInUser {
    pub id: u64,
    #[serde(rename = "CollectiveId")]
    pub collective_id: u64,
    pub collective: CollectiveSummary,
    #[serde(rename = "memberOf", default)]
    pub member_of: Vec<Membership>,
}

/// A payer profile offered in the "Pledge as" select
pub type Profile = Membership;

impl LoggedInUser {
    pub fn currency(&self) -> Option<&str> {
        self.collective.currency.as_deref()
    }

    /// Payer profiles: memberships plus the user's own collective as ADMIN,
    /// restricted to ADMIN and HOST roles.
    pub fn profiles(&self) -> Vec<Profile> {
        let own = Membership {
            role: Role::Admin,
            collective: self.collective.clone(),
        };

        self.member_of
            .iter()
            .cloned()
            .chain(std::iter::once(own))
            .filter(|membership| membership.role.can_pledge())
            .collect()
    }

    /// Profile selected when the form first renders
    pub fn default_profile_id(&self) -> u64 {
        self.collective_id
    }
}

/// Fetch the current user on page mount.
///
/// A missing capability or a failed fetch both yield `None`; the page then
/// renders its logged-out state.
pub async fn load_logged_in_user<A: PledgeApi>(api: Option<&A>) -> Option<LoggedInUser> {
    let api = match api {
        Some(api) => api,
        None => {
            log::debug!("No session source configured, rendering logged out");
            return None;
        }
    };

    match api.logged_in_user().await {
        Ok(Some(user)) => {
            log::info!("Loaded session for user {} (collective {})", user.id, user.collective_id);
            Some(user)
        }
        Ok(None) => {
            log::info!("No active session");
            None
        }
        Err(e) => {
            log::warn!("Failed to load session: {}", e);
            None
        }
    }
}
