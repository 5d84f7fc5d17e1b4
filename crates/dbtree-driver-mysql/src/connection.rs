//! MySQL connection implementation

use async_trait::async_trait;
use dbtree_core::{
    ColumnMeta, Connection, DbTreeError, QueryResult, Result, Row, StatementResult, Value,
};
use mysql_async::{
    Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts, Row as MySqlRow, consts::ColumnType,
    prelude::*,
};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::value::{bind_params, mysql_value_to_value};

/// Connection parameters for a MySQL server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MySqlConfig {
    pub host: String,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub database: Option<String>,
}

impl Default for MySqlConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: None,
            password: None,
            database: None,
        }
    }
}

/// MySQL connection wrapper
pub struct MySqlConnection {
    pool: Pool,
    closed: AtomicBool,
}

impl MySqlConnection {
    /// Connect to a MySQL server and verify it answers
    pub async fn connect(config: &MySqlConfig) -> Result<Self> {
        tracing::info!(host = %config.host, port = %config.port, database = ?config.database, "connecting to MySQL database");

        let constraints = PoolConstraints::new(1, 1).ok_or_else(|| {
            DbTreeError::Connection("Failed to configure MySQL pool constraints (min=1, max=1)".into())
        })?;
        let pool_opts = PoolOpts::default()
            .with_constraints(constraints)
            .with_reset_connection(false);

        let opts: Opts = OptsBuilder::default()
            .ip_or_hostname(config.host.clone())
            .tcp_port(config.port)
            .user(config.user.clone())
            .pass(config.password.clone())
            .db_name(config.database.clone())
            .pool_opts(pool_opts)
            .into();

        let pool = Pool::new(opts);
        // Verify connectivity by acquiring and releasing a connection
        drop(pool.get_conn().await.map_err(|e| {
            DbTreeError::Connection(format!("Failed to connect to MySQL: {}", e))
        })?);

        tracing::info!(host = %config.host, port = %config.port, "MySQL connection established");
        Ok(Self {
            pool,
            closed: AtomicBool::new(false),
        })
    }

    async fn get_conn(&self) -> Result<mysql_async::Conn> {
        if self.is_closed() {
            return Err(DbTreeError::Connection("Connection is closed".into()));
        }
        self.pool
            .get_conn()
            .await
            .map_err(|e| DbTreeError::Connection(format!("Failed to get MySQL connection: {}", e)))
    }
}

#[async_trait]
impl Connection for MySqlConnection {
    #[tracing::instrument(skip(self, sql, params), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn execute(&self, sql: &str, params: &[Value]) -> Result<StatementResult> {
        let mut conn = self.get_conn().await?;
        let final_sql = bind_params(sql, params);

        conn.query_drop(&final_sql)
            .await
            .map_err(|e| DbTreeError::Query(e.to_string()))?;
        let affected_rows = conn.affected_rows();
        let warnings = conn.get_warnings();

        tracing::debug!(affected_rows = affected_rows, "statement executed");
        Ok(StatementResult {
            affected_rows,
            warnings: if warnings > 0 {
                vec![format!("{} warning(s)", warnings)]
            } else {
                Vec::new()
            },
        })
    }

    #[tracing::instrument(skip(self, sql, params), fields(sql_preview = %sql.chars().take(100).collect::<String>()))]
    async fn query(&self, sql: &str, params: &[Value]) -> Result<QueryResult> {
        let start_time = std::time::Instant::now();
        let mut conn = self.get_conn().await?;
        let final_sql = bind_params(sql, params);

        let mysql_rows: Vec<MySqlRow> = conn
            .query(&final_sql)
            .await
            .map_err(|e| DbTreeError::Query(e.to_string()))?;

        let mut columns = Vec::new();
        let mut column_types = Vec::new();

        if let Some(first_row) = mysql_rows.first() {
            for (ordinal, col) in first_row.columns_ref().iter().enumerate() {
                column_types.push(col.column_type());
                columns.push(ColumnMeta {
                    name: col.name_str().to_string(),
                    data_type: format!("{:?}", col.column_type()),
                    ordinal,
                });
            }
        }

        let rows: Vec<Row> = mysql_rows
            .into_iter()
            .map(|mut mysql_row| {
                let values = (0..columns.len())
                    .map(|idx| {
                        let mysql_val = mysql_row.take(idx).unwrap_or(mysql_async::Value::NULL);
                        let col_type = column_types
                            .get(idx)
                            .copied()
                            .unwrap_or(ColumnType::MYSQL_TYPE_STRING);
                        mysql_value_to_value(mysql_val, col_type)
                    })
                    .collect();
                Row::new(values)
            })
            .collect();

        let execution_time_ms = start_time.elapsed().as_millis() as u64;
        tracing::debug!(
            row_count = rows.len(),
            execution_time_ms = execution_time_ms,
            "query executed successfully"
        );

        Ok(QueryResult {
            columns,
            rows,
            execution_time_ms,
            warnings: Vec::new(),
        })
    }

    async fn close(&self) -> Result<()> {
        if self.closed.swap(true, Ordering::SeqCst) {
            return Ok(());
        }
        tracing::info!("closing MySQL connection pool");
        self.pool
            .clone()
            .disconnect()
            .await
            .map_err(|e| DbTreeError::Connection(format!("Failed to close MySQL connection: {}", e)))
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}
