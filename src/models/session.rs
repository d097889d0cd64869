// team-panel/src/models/session.rs

// Signed-in user, passed explicitly into every panel operation.
// Authentication itself happens elsewhere; this is only the result.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub email: String,
    pub upgraded: bool,
    pub token: Option<String>,
}

impl Session {
    pub fn new(email: impl Into<String>, upgraded: bool) -> Self {
        Self {
            email: email.into(),
            upgraded,
            token: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    // True when the given email is the signed-in user
    pub fn is_self(&self, email: &str) -> bool {
        self.email == email
    }
}
