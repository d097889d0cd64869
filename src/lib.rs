// team-panel/src/lib.rs
pub mod models;
pub mod panel;
pub mod utils;

pub use models::{Command, Member, PanelError, Roster, Row, Session};
pub use panel::{Host, TeamPanel};
pub use utils::{HttpTeamClient, PanelConfig, TeamBackend};
