//! Common test utilities and mocks

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

use dbtree_core::{Connection, DbTreeError, QueryResult, Result, StatementResult, Value};
use dbtree_services::{ServiceError, ServiceResult, UiShell};

/// Mock connection for testing service-layer logic without a real database.
///
/// Queries are answered from SQL-pattern-based responses: if a query contains
/// the pattern string, the corresponding result is returned.
pub struct MockConnection {
    pub query_fails_with: Option<String>,
    pub execute_fails_with: Option<String>,
    pub query_responses: Vec<(String, QueryResult)>,
    /// Log of all row-returning statements, for assertion in tests
    pub query_log: Arc<parking_lot::Mutex<Vec<String>>>,
    /// Parameters bound to each logged query
    pub query_params_log: Arc<parking_lot::Mutex<Vec<Vec<Value>>>>,
    /// Log of all executed statements
    pub execute_log: Arc<parking_lot::Mutex<Vec<String>>>,
}

impl MockConnection {
    pub fn new() -> Self {
        Self {
            query_fails_with: None,
            execute_fails_with: None,
            query_responses: vec![],
            query_log: Arc::new(parking_lot::Mutex::new(Vec::new())),
            query_params_log: Arc::new(parking_lot::Mutex::new(Vec::new())),
            execute_log: Arc::new(parking_lot::Mutex::new(Vec::new())),
        }
    }

    pub fn with_query_failure(mut self, message: impl Into<String>) -> Self {
        self.query_fails_with = Some(message.into());
        self
    }

    pub fn with_execute_failure(mut self, message: impl Into<String>) -> Self {
        self.execute_fails_with = Some(message.into());
        self
    }

    /// Register a response for queries containing the given SQL pattern.
    pub fn with_query_response(
        mut self,
        sql_contains: impl Into<String>,
        result: QueryResult,
    ) -> Self {
        self.query_responses.push((sql_contains.into(), result));
        self
    }

    pub fn query_log(&self) -> Vec<String> {
        self.query_log.lock().clone()
    }

    pub fn query_params_log(&self) -> Vec<Vec<Value>> {
        self.query_params_log.lock().clone()
    }

    pub fn execute_log(&self) -> Vec<String> {
        self.execute_log.lock().clone()
    }
}

#[async_trait]
impl Connection for MockConnection {
    async fn execute(&self, sql: &str, _params: &[Value]) -> Result<StatementResult> {
        self.execute_log.lock().push(sql.to_string());

        match &self.execute_fails_with {
            Some(message) => Err(DbTreeError::Other(message.clone())),
            None => Ok(StatementResult::default()),
        }
    }

    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        self.query_log.lock().push(sql.to_string());
        self.query_params_log.lock().push(params.to_vec());

        if let Some(message) = &self.query_fails_with {
            return Err(DbTreeError::Other(message.clone()));
        }

        for (pattern, result) in &self.query_responses {
            if sql.contains(pattern.as_str()) {
                return Ok(result.clone());
            }
        }

        Ok(QueryResult::empty())
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }

    fn is_closed(&self) -> bool {
        false
    }
}

/// A modal dialog request recorded by [`MockShell`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    pub message: String,
    pub confirm_label: String,
    pub warning: String,
}

/// Shell that answers dialogs with a fixed choice and records every call
pub struct MockShell {
    pub accept_dialogs: bool,
    pub clipboard_broken: bool,
    pub dialogs: parking_lot::Mutex<Vec<DialogRequest>>,
    pub clipboard: parking_lot::Mutex<Vec<String>>,
    pub status_messages: parking_lot::Mutex<Vec<(String, Duration)>>,
    pub error_messages: parking_lot::Mutex<Vec<String>>,
    pub information_messages: parking_lot::Mutex<Vec<String>>,
}

impl MockShell {
    pub fn accepting() -> Self {
        Self::answering(true)
    }

    pub fn declining() -> Self {
        Self::answering(false)
    }

    fn answering(accept_dialogs: bool) -> Self {
        Self {
            accept_dialogs,
            clipboard_broken: false,
            dialogs: parking_lot::Mutex::new(Vec::new()),
            clipboard: parking_lot::Mutex::new(Vec::new()),
            status_messages: parking_lot::Mutex::new(Vec::new()),
            error_messages: parking_lot::Mutex::new(Vec::new()),
            information_messages: parking_lot::Mutex::new(Vec::new()),
        }
    }

    pub fn with_broken_clipboard(mut self) -> Self {
        self.clipboard_broken = true;
        self
    }

    pub fn clipboard(&self) -> Vec<String> {
        self.clipboard.lock().clone()
    }

    pub fn dialogs(&self) -> Vec<DialogRequest> {
        self.dialogs.lock().clone()
    }

    pub fn status_messages(&self) -> Vec<(String, Duration)> {
        self.status_messages.lock().clone()
    }

    pub fn error_messages(&self) -> Vec<String> {
        self.error_messages.lock().clone()
    }

    pub fn information_messages(&self) -> Vec<String> {
        self.information_messages.lock().clone()
    }
}

#[async_trait]
impl UiShell for MockShell {
    async fn show_modal_dialog(&self, message: &str, confirm_label: &str, warning: &str) -> bool {
        self.dialogs.lock().push(DialogRequest {
            message: message.to_string(),
            confirm_label: confirm_label.to_string(),
            warning: warning.to_string(),
        });
        self.accept_dialogs
    }

    fn show_message_with_timeout(&self, text: &str, timeout: Duration) {
        self.status_messages.lock().push((text.to_string(), timeout));
    }

    fn show_error_message(&self, text: &str) {
        self.error_messages.lock().push(text.to_string());
    }

    fn show_information_message(&self, text: &str) {
        self.information_messages.lock().push(text.to_string());
    }

    async fn write_to_clipboard(&self, text: &str) -> ServiceResult<()> {
        if self.clipboard_broken {
            return Err(ServiceError::Clipboard("no display".into()));
        }
        self.clipboard.lock().push(text.to_string());
        Ok(())
    }
}

/// A `SHOW CREATE` style result with the DDL at `index`
pub fn show_create_result(index: usize, ddl: &str) -> QueryResult {
    let columns: Vec<String> = (0..=index).map(|i| format!("col{}", i)).collect();
    let mut values: Vec<&str> = vec!["x"; index];
    values.push(ddl);
    let column_refs: Vec<&str> = columns.iter().map(String::as_str).collect();
    QueryResult::from_text_rows(&column_refs, vec![values])
}

/// A one-column listing result
pub fn name_listing(column: &str, names: &[&str]) -> QueryResult {
    QueryResult::from_text_rows(&[column], names.iter().map(|n| vec![*n]).collect())
}
