// team-panel/src/models/rows.rs
use crate::models::{Member, Session};

pub const UPGRADE_MESSAGE: &str = "Upgrade to a teams plan to invite members";
pub const UPGRADE_ACTION: &str = "🔐 Upgrade";

// Themed icons the host is expected to provide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Account,
    Add,
    Trash,
    Lock,
    Error,
}

impl Icon {
    pub fn name(&self) -> &'static str {
        match self {
            Icon::Account => "account",
            Icon::Add => "add",
            Icon::Trash => "trash",
            Icon::Lock => "lock",
            Icon::Error => "error",
        }
    }
}

// Action bound to a row, dispatched through TeamPanel::execute
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Invite,
    RemoveMember { email: String },
    ShowUpgradeInfo { message: String, action: String },
}

// Display fields shared by the admin row and member rows
#[derive(Debug, Clone, PartialEq)]
pub struct MemberRow {
    pub email: String,
    pub is_self: bool,
    pub is_invite_pending: bool,
}

/// One line of the team tree. Rebuilt on every render and never reused.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Admin(MemberRow),
    Member(MemberRow),
    AddMember,
    RemoveMember { email: String },
    UpgradePrompt,
    LoadError { message: String },
}

impl Row {
    pub fn admin(admin: &str, session: &Session) -> Self {
        Row::Admin(MemberRow {
            email: admin.to_string(),
            is_self: session.is_self(admin),
            is_invite_pending: false,
        })
    }

    pub fn member(member: &Member, session: &Session) -> Self {
        Row::Member(MemberRow {
            email: member.email.clone(),
            is_self: session.is_self(&member.email),
            is_invite_pending: member.is_invite_pending,
        })
    }

    pub fn label(&self) -> &str {
        match self {
            Row::Admin(row) | Row::Member(row) => &row.email,
            Row::AddMember => "Invite Member",
            Row::RemoveMember { .. } => "Remove Member",
            Row::UpgradePrompt => "Upgrade to invite members",
            Row::LoadError { .. } => "Could not load team",
        }
    }

    // Badge shown next to the label
    pub fn description(&self) -> Option<&str> {
        match self {
            Row::Admin(_) => Some("Admin"),
            Row::Member(row) if row.is_invite_pending => Some("Invited"),
            Row::LoadError { message } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn icon(&self) -> Option<Icon> {
        match self {
            Row::Admin(row) | Row::Member(row) if row.is_self => Some(Icon::Account),
            Row::Admin(_) | Row::Member(_) => None,
            Row::AddMember => Some(Icon::Add),
            Row::RemoveMember { .. } => Some(Icon::Trash),
            Row::UpgradePrompt => Some(Icon::Lock),
            Row::LoadError { .. } => Some(Icon::Error),
        }
    }

    pub fn command(&self) -> Option<Command> {
        match self {
            Row::AddMember => Some(Command::Invite),
            Row::RemoveMember { email } => Some(Command::RemoveMember {
                email: email.clone(),
            }),
            Row::UpgradePrompt => Some(Command::ShowUpgradeInfo {
                message: UPGRADE_MESSAGE.to_string(),
                action: UPGRADE_ACTION.to_string(),
            }),
            _ => None,
        }
    }

    // Member rows are keyed by email
    pub fn id(&self) -> Option<&str> {
        match self {
            Row::Admin(row) | Row::Member(row) => Some(&row.email),
            _ => None,
        }
    }

    pub fn is_self(&self) -> bool {
        matches!(self, Row::Admin(row) | Row::Member(row) if row.is_self)
    }

    // Only other people's rows expand into a remove action
    pub fn is_expandable(&self) -> bool {
        matches!(self, Row::Admin(row) | Row::Member(row) if !row.is_self)
    }
}
