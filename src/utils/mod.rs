// team-panel/src/utils/mod.rs
use crate::models::PanelError;
use lazy_static::lazy_static;
use regex::Regex;
use std::env;
use std::time::Duration;

pub mod team_client;
pub use team_client::{HttpTeamClient, TeamBackend};

pub const INVALID_EMAIL_MESSAGE: &str = "Please enter a valid email address";

// Email validation used by the invite prompt
pub mod email {
    use super::*;

    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(
            r#"^(([^<>()\[\]\\.,;:\s@"]+(\.[^<>()\[\]\\.,;:\s@"]+)*)|(".+"))@((\[[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\])|(([a-zA-Z\-0-9]+\.)+[a-zA-Z]{2,}))$"#
        )
        .unwrap();
    }

    pub fn is_valid_email(email: &str) -> bool {
        EMAIL_RE.is_match(email)
    }

    // Inline validator for the input box: None means the value may be submitted
    pub fn validate_email(email: &str) -> Option<String> {
        if is_valid_email(email) {
            None
        } else {
            Some(INVALID_EMAIL_MESSAGE.to_string())
        }
    }
}

// Endpoint configuration read from the environment (and .env via dotenv)
pub mod config {
    use super::*;

    const DEFAULT_API_URL: &str = "http://127.0.0.1:9090";

    #[derive(Debug, Clone, PartialEq)]
    pub struct PanelConfig {
        pub team_endpoint: String,
        pub invite_endpoint: String,
        pub request_timeout: Option<Duration>,
    }

    impl PanelConfig {
        // Derive both endpoints from one base URL
        pub fn with_base_url(base_url: &str) -> Self {
            let base = base_url.trim_end_matches('/');
            Self {
                team_endpoint: format!("{}/team", base),
                invite_endpoint: format!("{}/team/invite", base),
                request_timeout: None,
            }
        }

        pub fn from_env() -> Result<Self, PanelError> {
            Self::from_lookup(|key| env::var(key).ok())
        }

        pub(crate) fn from_lookup<F>(lookup: F) -> Result<Self, PanelError>
        where
            F: Fn(&str) -> Option<String>,
        {
            let base = lookup("TEAM_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
            let mut config = Self::with_base_url(&base);

            if let Some(team) = lookup("TEAM_ENDPOINT") {
                config.team_endpoint = team;
            }
            if let Some(invite) = lookup("INVITE_ENDPOINT") {
                config.invite_endpoint = invite;
            }
            if let Some(raw) = lookup("TEAM_REQUEST_TIMEOUT_SECS") {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    PanelError::Config(format!("TEAM_REQUEST_TIMEOUT_SECS is not a number: {}", raw))
                })?;
                config.request_timeout = Some(Duration::from_secs(secs));
            }

            Ok(config)
        }
    }
}

pub use config::PanelConfig;
pub use email::{is_valid_email, validate_email};
