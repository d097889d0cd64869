// team-panel/src/panel/mod.rs
use crate::models::{Command, PanelError, Row, Session};
use crate::utils::{is_valid_email, validate_email, TeamBackend};
use log::{debug, error, info};

pub mod host;
pub use host::{Host, InputBoxOptions, Validator};

pub const INVITE_TITLE: &str = "Invite member by adding their email";
pub const INVITE_PLACEHOLDER: &str = "hi@example.com";

/// Team tree data provider plus the invite / remove commands.
///
/// Holds no state between renders: every refresh re-reads the roster from the backend.
pub struct TeamPanel<B, H> {
    backend: B,
    host: H,
}

impl<B: TeamBackend, H: Host> TeamPanel<B, H> {
    pub fn new(backend: B, host: H) -> Self {
        Self { backend, host }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    // Admin first, then members in backend order, then the invite action
    pub async fn root_rows(&self, session: &Session) -> Result<Vec<Row>, PanelError> {
        if !session.upgraded {
            debug!("🔒 {} is not upgraded, showing upgrade prompt", session.email);
            return Ok(vec![Row::UpgradePrompt]);
        }

        let roster = self.backend.fetch_roster(session).await?;

        let mut rows = Vec::with_capacity(roster.members.len() + 2);
        rows.push(Row::admin(&roster.admin, session));
        rows.extend(roster.members.iter().map(|member| Row::member(member, session)));
        rows.push(Row::AddMember);

        Ok(rows)
    }

    /// Tree provider entry point. `None` asks for the root rows.
    ///
    /// A failed roster fetch is reported to the user and rendered as a
    /// single `LoadError` row instead of escaping to the host.
    pub async fn children(&self, session: &Session, parent: Option<&Row>) -> Vec<Row> {
        match parent {
            Some(row) if row.is_expandable() => row
                .id()
                .map(|email| {
                    vec![Row::RemoveMember {
                        email: email.to_string(),
                    }]
                })
                .unwrap_or_default(),
            Some(_) => Vec::new(),
            None => match self.root_rows(session).await {
                Ok(rows) => rows,
                Err(e) => {
                    error!("❌ Failed to load team for {}: {}", session.email, e);
                    let message = e.user_message();
                    self.host.show_error_message(&message);
                    vec![Row::LoadError { message }]
                }
            },
        }
    }

    // Rebuild the root rows from scratch and hand them to the host
    pub async fn refresh(&self, session: &Session) {
        let rows = self.children(session, None).await;
        self.host.render_tree(&rows);
    }

    pub async fn invite(&self, session: &Session) {
        let options = InputBoxOptions {
            title: INVITE_TITLE.to_string(),
            placeholder: INVITE_PLACEHOLDER.to_string(),
        };

        let email = match self.host.show_input_box(options, validate_email).await {
            Some(email) if !email.trim().is_empty() => email.trim().to_string(),
            _ => {
                debug!("Invite prompt cancelled");
                return;
            }
        };

        // Hosts are expected to enforce the validator, but never send a bad address
        if !is_valid_email(&email) {
            error!("❌ Refusing to invite malformed address: {}", email);
            return;
        }

        match self.backend.send_invite(session, &email).await {
            Ok(()) => {
                info!("✅ Invite sent to {}", email);
                self.host
                    .show_information_message(&format!("Invite sent to {}", email));
                self.refresh(session).await;
            }
            Err(e) => {
                error!("❌ Failed to invite {}: {}", email, e);
                self.host.show_error_message(&e.user_message());
            }
        }
    }

    pub async fn remove_member(&self, session: &Session, email: &str) {
        match self.backend.remove_invite(session, email).await {
            Ok(()) => {
                info!("✅ Removed {} from team", email);
                self.refresh(session).await;
            }
            Err(e) => {
                error!("❌ Failed to remove {}: {}", email, e);
                self.host.show_error_message(&e.user_message());
            }
        }
    }

    // Dispatch a row's bound command
    pub async fn execute(&self, session: &Session, command: &Command) {
        match command {
            Command::Invite => self.invite(session).await,
            Command::RemoveMember { email } => self.remove_member(session, email).await,
            Command::ShowUpgradeInfo { message, action } => {
                self.host.show_upgrade_info(message, action)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Icon, Member, Roster, UPGRADE_ACTION, UPGRADE_MESSAGE};
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Fetch(String),
        Invite(String, String),
        Remove(String, String),
    }

    // In-memory backend that records every call
    #[derive(Default)]
    struct FakeBackend {
        roster: Option<Roster>,
        failure: Option<Option<String>>,
        calls: RefCell<Vec<Call>>,
    }

    impl FakeBackend {
        fn with_roster(roster: Roster) -> Self {
            Self {
                roster: Some(roster),
                ..Default::default()
            }
        }

        fn failing(mut self, message: Option<&str>) -> Self {
            self.failure = Some(message.map(str::to_string));
            self
        }

        fn fetch_count(&self) -> usize {
            self.calls
                .borrow()
                .iter()
                .filter(|c| matches!(c, Call::Fetch(_)))
                .count()
        }

        fn mutation_error(&self) -> Result<(), PanelError> {
            match &self.failure {
                Some(message) => Err(PanelError::Backend {
                    status: 400,
                    message: message.clone(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait(?Send)]
    impl TeamBackend for FakeBackend {
        async fn fetch_roster(&self, session: &Session) -> Result<Roster, PanelError> {
            self.calls.borrow_mut().push(Call::Fetch(session.email.clone()));
            self.roster
                .clone()
                .ok_or_else(|| PanelError::Transport("connection refused".to_string()))
        }

        async fn send_invite(&self, session: &Session, to_email: &str) -> Result<(), PanelError> {
            self.calls
                .borrow_mut()
                .push(Call::Invite(session.email.clone(), to_email.to_string()));
            self.mutation_error()
        }

        async fn remove_invite(&self, session: &Session, to_email: &str) -> Result<(), PanelError> {
            self.calls
                .borrow_mut()
                .push(Call::Remove(session.email.clone(), to_email.to_string()));
            self.mutation_error()
        }
    }

    // Host that answers prompts from a script and records what it was shown
    #[derive(Default)]
    struct FakeHost {
        answers: RefCell<VecDeque<Option<String>>>,
        validations: RefCell<Vec<Option<String>>>,
        infos: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
        upgrades: RefCell<Vec<(String, String)>>,
        renders: RefCell<Vec<Vec<Row>>>,
    }

    impl FakeHost {
        fn answering(answer: Option<&str>) -> Self {
            let host = Self::default();
            host.answers.borrow_mut().push_back(answer.map(str::to_string));
            host
        }
    }

    #[async_trait(?Send)]
    impl Host for FakeHost {
        async fn show_input_box(&self, options: InputBoxOptions, validate: Validator) -> Option<String> {
            assert_eq!(options.placeholder, INVITE_PLACEHOLDER);
            let answer = self.answers.borrow_mut().pop_front().flatten();
            if let Some(value) = &answer {
                self.validations.borrow_mut().push(validate(value));
            }
            answer
        }

        fn show_information_message(&self, message: &str) {
            self.infos.borrow_mut().push(message.to_string());
        }

        fn show_error_message(&self, message: &str) {
            self.errors.borrow_mut().push(message.to_string());
        }

        fn show_upgrade_info(&self, message: &str, action: &str) {
            self.upgrades
                .borrow_mut()
                .push((message.to_string(), action.to_string()));
        }

        fn render_tree(&self, rows: &[Row]) {
            self.renders.borrow_mut().push(rows.to_vec());
        }
    }

    fn roster() -> Roster {
        Roster {
            admin: "me@example.com".to_string(),
            members: vec![
                Member::new("ann@example.com", false),
                Member::new("new@example.com", true),
            ],
        }
    }

    fn session() -> Session {
        Session::new("me@example.com", true)
    }

    #[actix_rt::test]
    async fn test_not_upgraded_gets_only_upgrade_prompt() {
        let panel = TeamPanel::new(FakeBackend::with_roster(roster()), FakeHost::default());
        let session = Session::new("me@example.com", false);

        let rows = panel.root_rows(&session).await.unwrap();

        assert_eq!(rows, vec![Row::UpgradePrompt]);
        assert_eq!(panel.backend().fetch_count(), 0);
    }

    #[actix_rt::test]
    async fn test_root_rows_order_and_badges() {
        let panel = TeamPanel::new(FakeBackend::with_roster(roster()), FakeHost::default());

        let rows = panel.root_rows(&session()).await.unwrap();

        let labels: Vec<&str> = rows.iter().map(|r| r.label()).collect();
        assert_eq!(
            labels,
            vec!["me@example.com", "ann@example.com", "new@example.com", "Invite Member"]
        );
        assert!(matches!(rows[0], Row::Admin(_)));
        assert_eq!(rows[0].description(), Some("Admin"));
        assert!(rows[0].is_self());
        assert_eq!(rows[0].icon(), Some(Icon::Account));
        assert_eq!(rows[1].description(), None);
        assert_eq!(rows[2].description(), Some("Invited"));
        assert_eq!(rows[3], Row::AddMember);
        assert_eq!(
            panel.backend().calls.borrow().as_slice(),
            &[Call::Fetch("me@example.com".to_string())]
        );
    }

    #[actix_rt::test]
    async fn test_children_of_expandable_row_is_remove_action() {
        let panel = TeamPanel::new(FakeBackend::with_roster(roster()), FakeHost::default());
        let rows = panel.root_rows(&session()).await.unwrap();

        let children = panel.children(&session(), Some(&rows[1])).await;
        assert_eq!(
            children,
            vec![Row::RemoveMember {
                email: "ann@example.com".to_string()
            }]
        );

        // self row and action rows have no children
        assert!(panel.children(&session(), Some(&rows[0])).await.is_empty());
        assert!(panel.children(&session(), Some(&rows[3])).await.is_empty());
        assert_eq!(panel.backend().fetch_count(), 1);
    }

    #[actix_rt::test]
    async fn test_fetch_failure_renders_error_row() {
        let panel = TeamPanel::new(FakeBackend::default(), FakeHost::default());

        panel.refresh(&session()).await;

        let renders = panel.host().renders.borrow();
        assert_eq!(renders.len(), 1);
        assert!(matches!(renders[0].as_slice(), [Row::LoadError { .. }]));
        assert_eq!(panel.host().errors.borrow().len(), 1);
    }

    #[actix_rt::test]
    async fn test_invite_success_notifies_and_refreshes() {
        let panel = TeamPanel::new(
            FakeBackend::with_roster(roster()),
            FakeHost::answering(Some("hi@example.com")),
        );

        panel.execute(&session(), &Command::Invite).await;

        assert_eq!(panel.host().validations.borrow().as_slice(), &[None]);
        assert_eq!(
            panel.backend().calls.borrow().as_slice(),
            &[
                Call::Invite("me@example.com".to_string(), "hi@example.com".to_string()),
                Call::Fetch("me@example.com".to_string()),
            ]
        );
        assert_eq!(
            panel.host().infos.borrow().as_slice(),
            &["Invite sent to hi@example.com".to_string()]
        );
        assert_eq!(panel.host().renders.borrow().len(), 1);
    }

    #[actix_rt::test]
    async fn test_invite_rejects_malformed_email() {
        let panel = TeamPanel::new(
            FakeBackend::with_roster(roster()),
            FakeHost::answering(Some("not-an-email")),
        );

        panel.invite(&session()).await;

        assert_eq!(
            panel.host().validations.borrow().as_slice(),
            &[Some("Please enter a valid email address".to_string())]
        );
        assert!(panel.backend().calls.borrow().is_empty());
    }

    #[actix_rt::test]
    async fn test_cancelled_or_empty_invite_is_noop() {
        for answer in [None, Some(""), Some("   ")] {
            let panel = TeamPanel::new(FakeBackend::with_roster(roster()), FakeHost::answering(answer));

            panel.invite(&session()).await;

            assert!(panel.backend().calls.borrow().is_empty());
            assert!(panel.host().errors.borrow().is_empty());
            assert!(panel.host().infos.borrow().is_empty());
        }
    }

    #[actix_rt::test]
    async fn test_invite_failure_shows_server_error_without_refresh() {
        let panel = TeamPanel::new(
            FakeBackend::with_roster(roster()).failing(Some("Team is full")),
            FakeHost::answering(Some("hi@example.com")),
        );

        panel.invite(&session()).await;

        assert_eq!(panel.host().errors.borrow().as_slice(), &["Team is full".to_string()]);
        assert!(panel.host().infos.borrow().is_empty());
        assert_eq!(panel.backend().fetch_count(), 0);
        assert!(panel.host().renders.borrow().is_empty());
    }

    #[actix_rt::test]
    async fn test_remove_success_refreshes_once_without_notification() {
        let panel = TeamPanel::new(FakeBackend::with_roster(roster()), FakeHost::default());
        let command = Row::RemoveMember {
            email: "ann@example.com".to_string(),
        }
        .command()
        .unwrap();

        panel.execute(&session(), &command).await;

        assert_eq!(
            panel.backend().calls.borrow().as_slice(),
            &[
                Call::Remove("me@example.com".to_string(), "ann@example.com".to_string()),
                Call::Fetch("me@example.com".to_string()),
            ]
        );
        assert!(panel.host().infos.borrow().is_empty());
        assert!(panel.host().errors.borrow().is_empty());
    }

    #[actix_rt::test]
    async fn test_remove_failure_without_message_uses_fallback() {
        let panel = TeamPanel::new(
            FakeBackend::with_roster(roster()).failing(None),
            FakeHost::default(),
        );

        panel.remove_member(&session(), "ann@example.com").await;

        assert_eq!(
            panel.host().errors.borrow().as_slice(),
            &[crate::models::FALLBACK_ERROR_MESSAGE.to_string()]
        );
        assert_eq!(panel.backend().fetch_count(), 0);
    }

    #[actix_rt::test]
    async fn test_upgrade_prompt_command_goes_to_host() {
        let panel = TeamPanel::new(FakeBackend::default(), FakeHost::default());
        let command = Row::UpgradePrompt.command().unwrap();

        panel.execute(&Session::new("me@example.com", false), &command).await;

        assert_eq!(
            panel.host().upgrades.borrow().as_slice(),
            &[(UPGRADE_MESSAGE.to_string(), UPGRADE_ACTION.to_string())]
        );
    }
}
