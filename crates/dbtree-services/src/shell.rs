//! UI shell collaborator

use async_trait::async_trait;
use std::time::Duration;

use crate::error::ServiceResult;

/// The surface services talk to for dialogs, notifications and the clipboard.
///
/// Implementations decide how each request is rendered: the CLI prompts on the
/// terminal, tests record every call.
#[async_trait]
pub trait UiShell: Send + Sync {
    /// Ask the user to confirm an action. Resolves to `true` when accepted.
    async fn show_modal_dialog(&self, message: &str, confirm_label: &str, warning: &str) -> bool;

    /// Show a transient status message
    fn show_message_with_timeout(&self, text: &str, timeout: Duration);

    fn show_error_message(&self, text: &str);

    fn show_information_message(&self, text: &str);

    /// Replace the system clipboard content
    async fn write_to_clipboard(&self, text: &str) -> ServiceResult<()>;
}
