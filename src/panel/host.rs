// team-panel/src/panel/host.rs
use crate::models::Row;
use async_trait::async_trait;

// Options for the modal text prompt
#[derive(Debug, Clone, PartialEq)]
pub struct InputBoxOptions {
    pub title: String,
    pub placeholder: String,
}

/// Inline validator: returns the message to show, or `None` when the value is acceptable.
pub type Validator = fn(&str) -> Option<String>;

/// UI primitives supplied by the hosting editor.
///
/// The panel never renders anything itself; it hands rows and messages to the host.
#[async_trait(?Send)]
pub trait Host {
    /// Suspends until the user submits or cancels. `None` means cancelled.
    async fn show_input_box(&self, options: InputBoxOptions, validate: Validator) -> Option<String>;

    fn show_information_message(&self, message: &str);

    fn show_error_message(&self, message: &str);

    // Generic "show upgrade info" command with a message and an action label
    fn show_upgrade_info(&self, message: &str, action: &str);

    fn render_tree(&self, rows: &[Row]);
}
