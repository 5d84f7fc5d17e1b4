//! Terminal implementation of the UI shell

use async_trait::async_trait;
use dbtree_services::{ServiceError, ServiceResult, UiShell};
use std::io::{BufRead, Write};
use std::time::Duration;

/// Prompts on the terminal, writes notifications to stderr and uses the
/// system clipboard.
pub struct TerminalShell {
    assume_yes: bool,
}

impl TerminalShell {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

#[async_trait]
impl UiShell for TerminalShell {
    async fn show_modal_dialog(&self, message: &str, confirm_label: &str, warning: &str) -> bool {
        if self.assume_yes {
            tracing::debug!(prompt = message, "confirmation assumed");
            return true;
        }

        let prompt = format!("{}\n{}\n{}? [y/N] ", message, warning, confirm_label);
        let answer = tokio::task::spawn_blocking(move || {
            let mut stderr = std::io::stderr();
            write!(stderr, "{}", prompt)?;
            stderr.flush()?;

            let mut line = String::new();
            std::io::stdin().lock().read_line(&mut line)?;
            Ok::<String, std::io::Error>(line)
        })
        .await;

        match answer {
            Ok(Ok(line)) => is_affirmative(&line),
            Ok(Err(error)) => {
                tracing::warn!(error = %error, "could not read confirmation");
                false
            }
            Err(error) => {
                tracing::warn!(error = %error, "confirmation prompt task failed");
                false
            }
        }
    }

    fn show_message_with_timeout(&self, text: &str, _timeout: Duration) {
        eprintln!("{}", text);
    }

    fn show_error_message(&self, text: &str) {
        eprintln!("error: {}", text);
    }

    fn show_information_message(&self, text: &str) {
        eprintln!("{}", text);
    }

    async fn write_to_clipboard(&self, text: &str) -> ServiceResult<()> {
        let mut clipboard =
            arboard::Clipboard::new().map_err(|e| ServiceError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| ServiceError::Clipboard(e.to_string()))
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
