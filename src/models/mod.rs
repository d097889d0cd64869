// team-panel/src/models/mod.rs
use derive_more::Display;

pub mod team;
pub use team::*;

pub mod invitations;
pub use invitations::*;

pub mod session;
pub use session::*;

pub mod rows;
pub use rows::*;

// Shown when the backend fails without telling us why
pub const FALLBACK_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

// Custom error types
#[derive(Debug, Display)]
pub enum PanelError {
    #[display(fmt = "Request failed: {}", _0)]
    Transport(String),
    #[display(fmt = "Backend returned status {}", status)]
    Backend { status: u16, message: Option<String> },
    #[display(fmt = "Invalid response: {}", _0)]
    Decode(String),
    #[display(fmt = "Invalid configuration: {}", _0)]
    Config(String),
}

impl std::error::Error for PanelError {}

impl PanelError {
    // Text for the error notification: the server's own message when it sent one
    pub fn user_message(&self) -> String {
        match self {
            PanelError::Backend {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => FALLBACK_ERROR_MESSAGE.to_string(),
        }
    }
}

impl From<reqwest::Error> for PanelError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            PanelError::Decode(err.to_string())
        } else {
            PanelError::Transport(err.to_string())
        }
    }
}
