//! Clipboard and drop workflows for tree items
//!
//! Each operation is a single request/response against the backend. Errors
//! are shown through the [`UiShell`] and also returned so callers can react;
//! nothing is retried.

use std::sync::Arc;
use std::time::Duration;

use dbtree_core::Connection;
use dbtree_objects::{CreateScriptOptions, SchemaTreeItem, extract_create_script, rewrite_create_script};
use tokio::sync::mpsc::UnboundedSender;

use crate::error::{ServiceError, ServiceResult};
use crate::events::SidebarEvent;
use crate::shell::UiShell;

/// Default lifetime of transient status messages
pub const DEFAULT_MESSAGE_TIMEOUT: Duration = Duration::from_millis(5000);

/// Result of [`ObjectActionService::drop_item`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// The statement ran and a refresh was requested
    Dropped,
    /// The user declined the confirmation; nothing was sent to the backend
    Cancelled,
}

/// Service for the per-node actions of the connection tree
pub struct ObjectActionService {
    shell: Arc<dyn UiShell>,
    events: UnboundedSender<SidebarEvent>,
    message_timeout: Duration,
}

impl ObjectActionService {
    /// Create a new action service
    pub fn new(shell: Arc<dyn UiShell>, events: UnboundedSender<SidebarEvent>) -> Self {
        Self {
            shell,
            events,
            message_timeout: DEFAULT_MESSAGE_TIMEOUT,
        }
    }

    /// Override how long status messages stay visible
    pub fn with_message_timeout(mut self, timeout: Duration) -> Self {
        self.message_timeout = timeout;
        self
    }

    /// Copy the unquoted item name to the clipboard
    #[tracing::instrument(skip(self, item), fields(kind = %item.kind, name = %item.name))]
    pub async fn copy_name_to_clipboard(&self, item: &SchemaTreeItem) -> ServiceResult<()> {
        self.write_clipboard(&item.name).await?;
        self.shell.show_message_with_timeout(
            "The name was copied to the system clipboard",
            self.message_timeout,
        );
        Ok(())
    }

    /// Retrieve the `CREATE` statement of an item and rewrite it
    ///
    /// # Arguments
    ///
    /// * `connection` - Backend that owns the item
    /// * `item` - Tree node whose DDL is requested
    /// * `options` - Delimiter and drop-prefix rewriting
    #[tracing::instrument(skip(self, connection, item), fields(kind = %item.kind, name = %item.name))]
    pub async fn create_script(
        &self,
        connection: &dyn Connection,
        item: &SchemaTreeItem,
        options: CreateScriptOptions,
    ) -> ServiceResult<String> {
        match self.fetch_create_script(connection, item, options).await {
            Ok(script) => Ok(script),
            Err(error) => {
                self.shell.show_error_message(&error.to_string());
                Err(error)
            }
        }
    }

    /// Copy the rewritten `CREATE` statement of an item to the clipboard
    #[tracing::instrument(skip(self, connection, item), fields(kind = %item.kind, name = %item.name))]
    pub async fn copy_create_script_to_clipboard(
        &self,
        connection: &dyn Connection,
        item: &SchemaTreeItem,
        options: CreateScriptOptions,
    ) -> ServiceResult<()> {
        let script = self.create_script(connection, item, options).await?;
        self.write_clipboard(&script).await?;
        self.shell.show_message_with_timeout(
            "The create script was copied to the system clipboard",
            self.message_timeout,
        );
        Ok(())
    }

    /// Drop an item after the user confirms.
    ///
    /// A declined confirmation returns [`DropOutcome::Cancelled`] without
    /// touching the backend. A refresh is requested only when the statement
    /// succeeded.
    #[tracing::instrument(skip(self, connection, item), fields(kind = %item.kind, name = %item.name))]
    pub async fn drop_item(
        &self,
        connection: &dyn Connection,
        item: &SchemaTreeItem,
    ) -> ServiceResult<DropOutcome> {
        let confirmation = item.drop_confirmation();
        let accepted = self
            .shell
            .show_modal_dialog(
                &confirmation.message,
                &confirmation.confirm_label,
                &confirmation.warning,
            )
            .await;

        if !accepted {
            tracing::debug!("drop cancelled by user");
            return Ok(DropOutcome::Cancelled);
        }

        let sql = item.drop_statement();
        if let Err(error) = connection.execute(&sql, &[]).await {
            tracing::warn!(error = %error, sql = %sql, "drop failed");
            self.shell
                .show_error_message(&format!("Error dropping the object: {}", error));
            return Err(ServiceError::BackendExecution(error.to_string()));
        }

        tracing::info!(connection_id = item.connection_id, "object dropped");
        let refresh = SidebarEvent::RefreshConnections {
            connection_id: item.connection_id,
        };
        if self.events.send(refresh).is_err() {
            tracing::debug!("sidebar event receiver is gone, refresh skipped");
        }

        self.shell.show_information_message(&format!(
            "The object {} has been dropped successfully.",
            item.name
        ));
        Ok(DropOutcome::Dropped)
    }

    async fn fetch_create_script(
        &self,
        connection: &dyn Connection,
        item: &SchemaTreeItem,
        options: CreateScriptOptions,
    ) -> ServiceResult<String> {
        let unavailable = || {
            ServiceError::BackendExecution(format!(
                "Could not get the create script for {} {}",
                item.db_type().to_lowercase(),
                item.qualified_name()
            ))
        };
        if item.create_script_result_index().is_none() {
            return Err(unavailable());
        }

        let sql = item.show_create_statement();
        tracing::debug!(sql = %sql, "retrieving create script");

        let result = connection.query(&sql, &[]).await?;
        let statement = extract_create_script(item.kind, &result).ok_or_else(unavailable)?;

        Ok(rewrite_create_script(&statement, options))
    }

    async fn write_clipboard(&self, text: &str) -> ServiceResult<()> {
        if let Err(error) = self.shell.write_to_clipboard(text).await {
            self.shell.show_error_message(&error.to_string());
            return Err(error);
        }
        Ok(())
    }
}
