// team-panel/src/main.rs
//Third-party-dependencies
use async_trait::async_trait;
use dotenv::dotenv;
use log::info;
use std::cell::RefCell;
use std::env;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::Mutex;

use team_panel::panel::{InputBoxOptions, Validator};
use team_panel::{Host, HttpTeamClient, PanelConfig, PanelError, Row, Session, TeamPanel};

// Terminal stand-in for the editor host: prints rows and reads answers from stdin
struct ConsoleHost {
    input: Mutex<Lines<BufReader<Stdin>>>,
    rows: RefCell<Vec<Row>>,
}

impl ConsoleHost {
    fn new() -> Self {
        Self {
            input: Mutex::new(BufReader::new(tokio::io::stdin()).lines()),
            rows: RefCell::new(Vec::new()),
        }
    }

    async fn prompt(&self, text: &str) -> Option<String> {
        print!("{}", text);
        let _ = std::io::stdout().flush();
        self.input.lock().await.next_line().await.ok().flatten()
    }

    fn row_at(&self, index: usize) -> Option<Row> {
        self.rows.borrow().get(index).cloned()
    }
}

fn format_row(index: usize, row: &Row, indent: &str) -> String {
    let icon = row.icon().map(|i| format!("[{}] ", i.name())).unwrap_or_default();
    let description = row.description().map(|d| format!("  ({})", d)).unwrap_or_default();
    let marker = if row.is_expandable() { "+ " } else { "  " };
    format!("{}{:>2}. {}{}{}{}", indent, index + 1, marker, icon, row.label(), description)
}

#[async_trait(?Send)]
impl Host for ConsoleHost {
    async fn show_input_box(&self, options: InputBoxOptions, validate: Validator) -> Option<String> {
        println!("{}", options.title);
        loop {
            let value = self.prompt(&format!("({}) > ", options.placeholder)).await?;
            if value.trim().is_empty() {
                return None;
            }
            match validate(value.trim()) {
                Some(message) => println!("  {}", message),
                None => return Some(value),
            }
        }
    }

    fn show_information_message(&self, message: &str) {
        println!("[info] {}", message);
    }

    fn show_error_message(&self, message: &str) {
        println!("[error] {}", message);
    }

    fn show_upgrade_info(&self, message: &str, action: &str) {
        println!("[info] {}  <{}>", message, action);
    }

    fn render_tree(&self, rows: &[Row]) {
        println!();
        println!("TEAM");
        for (index, row) in rows.iter().enumerate() {
            println!("{}", format_row(index, row, ""));
        }
        *self.rows.borrow_mut() = rows.to_vec();
    }
}

// Session handed over by the sign-in flow, here read from the environment
fn session_from_env() -> Result<Session, PanelError> {
    let email = env::var("TEAM_PANEL_EMAIL")
        .map_err(|_| PanelError::Config("TEAM_PANEL_EMAIL must be set".to_string()))?;
    let upgraded = env::var("TEAM_PANEL_UPGRADED")
        .map(|v| matches!(v.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
        .unwrap_or(false);

    let session = Session::new(email, upgraded);
    Ok(match env::var("TEAM_PANEL_TOKEN") {
        Ok(token) if !token.is_empty() => session.with_token(token),
        _ => session,
    })
}

async fn activate(panel: &TeamPanel<HttpTeamClient, ConsoleHost>, session: &Session, row: Row) {
    if let Some(command) = row.command() {
        panel.execute(session, &command).await;
        return;
    }

    let children = panel.children(session, Some(&row)).await;
    if children.is_empty() {
        return;
    }
    for (index, child) in children.iter().enumerate() {
        println!("{}", format_row(index, child, "    "));
    }

    let Some(choice) = panel.host().prompt("select (empty to go back) > ").await else {
        return;
    };
    let picked = choice
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| children.get(i));
    if let Some(command) = picked.and_then(|child| child.command()) {
        panel.execute(session, &command).await;
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    env_logger::init();

    let config = PanelConfig::from_env()?;
    let session = session_from_env()?;
    info!("🚀 Team panel for {} against {}", session.email, config.team_endpoint);

    let panel = TeamPanel::new(HttpTeamClient::new(config)?, ConsoleHost::new());
    panel.refresh(&session).await;

    loop {
        let Some(line) = panel.host().prompt("\n[number] open row, r refresh, q quit > ").await else {
            break;
        };

        match line.trim() {
            "q" => break,
            "r" | "" => panel.refresh(&session).await,
            other => {
                let row = other
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| n.checked_sub(1))
                    .and_then(|i| panel.host().row_at(i));
                match row {
                    Some(row) => activate(&panel, &session, row).await,
                    None => println!("Unknown choice: {}", other),
                }
            }
        }
    }

    Ok(())
}
