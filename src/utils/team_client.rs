// team-panel/src/utils/team_client.rs
use crate::models::{ErrorBody, InviteRequest, PanelError, Roster, Session};
use crate::utils::PanelConfig;
use async_trait::async_trait;
use log::{debug, error, info};
use reqwest::{Client, RequestBuilder, Response};

/// Remote team-management backend consumed by the panel.
///
/// Calls run on the host's single UI event loop, hence `?Send`.
#[async_trait(?Send)]
pub trait TeamBackend {
    async fn fetch_roster(&self, session: &Session) -> Result<Roster, PanelError>;

    async fn send_invite(&self, session: &Session, to_email: &str) -> Result<(), PanelError>;

    async fn remove_invite(&self, session: &Session, to_email: &str) -> Result<(), PanelError>;
}

// reqwest implementation against the TEAM and INVITE endpoints
#[derive(Clone)]
pub struct HttpTeamClient {
    client: Client,
    config: PanelConfig,
}

impl HttpTeamClient {
    pub fn new(config: PanelConfig) -> Result<Self, PanelError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &PanelConfig {
        &self.config
    }

    // Attach the session token, if any
    fn authorize(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        match &session.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    // Map a non-2xx response to PanelError::Backend, reading {"error": "..."} when present
    async fn check_status(response: Response) -> Result<Response, PanelError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|body| body.error);

        error!("❌ Backend returned {} ({:?})", status, message);
        Err(PanelError::Backend {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait(?Send)]
impl TeamBackend for HttpTeamClient {
    async fn fetch_roster(&self, session: &Session) -> Result<Roster, PanelError> {
        debug!("📋 Fetching roster for: {}", session.email);

        let request = self
            .client
            .get(&self.config.team_endpoint)
            .query(&[("email", session.email.as_str())]);
        let response = self.authorize(request, session).send().await?;
        let response = Self::check_status(response).await?;

        let roster: Roster = response.json().await?;

        info!("✅ Roster loaded: admin {} with {} members", roster.admin, roster.members.len());
        Ok(roster)
    }

    async fn send_invite(&self, session: &Session, to_email: &str) -> Result<(), PanelError> {
        info!("📧 Inviting {} to the team of {}", to_email, session.email);

        let request = self
            .client
            .post(&self.config.invite_endpoint)
            .json(&InviteRequest::new(&session.email, to_email));
        let response = self.authorize(request, session).send().await?;
        Self::check_status(response).await?;

        Ok(())
    }

    async fn remove_invite(&self, session: &Session, to_email: &str) -> Result<(), PanelError> {
        info!("🗑️ Removing {} from the team of {}", to_email, session.email);

        let request = self
            .client
            .delete(&self.config.invite_endpoint)
            .json(&InviteRequest::new(&session.email, to_email));
        let response = self.authorize(request, session).send().await?;
        Self::check_status(response).await?;

        Ok(())
    }
}
