//! Connection trait for the SQL execution backend

use crate::{QueryResult, Result, StatementResult, Value};
use async_trait::async_trait;

/// A database connection backing one node of the connection tree.
///
/// Failures are reported as [`DbTreeError`](crate::DbTreeError) values whose
/// `Display` output is the message shown to the user.
#[async_trait]
pub trait Connection: Send + Sync {
    /// Execute a statement that does not return rows (DDL, DML)
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<StatementResult>;

    /// Execute a statement that returns rows (SELECT, SHOW)
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult>;

    /// Close the connection
    async fn close(&self) -> Result<()>;

    /// Check if the connection is closed
    fn is_closed(&self) -> bool;
}
