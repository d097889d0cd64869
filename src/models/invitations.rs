// team-panel/src/models/invitations.rs
use serde::{Deserialize, Serialize};

// Body for both POST and DELETE on the invite endpoint
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InviteRequest {
    pub from_email: String,
    pub to_email: String,
}

// Failure body returned by the backend on a non-2xx response
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct ErrorBody {
    pub error: Option<String>,
}

impl InviteRequest {
    pub fn new(from_email: &str, to_email: &str) -> Self {
        Self {
            from_email: from_email.to_string(),
            to_email: to_email.to_string(),
        }
    }
}
