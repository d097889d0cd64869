// team-panel/src/models/team.rs
use serde::{Deserialize, Serialize};

// A single member of the team, or an invite that has not been accepted yet
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub email: String,
    #[serde(default)]
    pub is_invite_pending: bool,
}

// Team roster as reported by the backend. Never cached, re-fetched on every refresh
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Roster {
    pub admin: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Member {
    pub fn new(email: impl Into<String>, is_invite_pending: bool) -> Self {
        Self {
            email: email.into(),
            is_invite_pending,
        }
    }
}
