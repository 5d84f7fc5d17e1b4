//! Core types for dbtree

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A database value as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    /// NULL value
    Null,
    /// Boolean
    Bool(bool),
    /// 64-bit signed integer
    Int64(i64),
    /// 32-bit floating point
    Float32(f32),
    /// 64-bit floating point
    Float64(f64),
    /// UTF-8 string
    String(String),
    /// Binary data
    Bytes(Vec<u8>),
    /// Date (year, month, day)
    Date(NaiveDate),
    /// DateTime without timezone
    DateTime(NaiveDateTime),
}

impl Value {
    /// Render the value as text, the way a result grid would show it.
    ///
    /// Returns `None` for NULL. Byte strings are decoded as UTF-8 since the
    /// MySQL text protocol reports DDL columns as blobs on some servers.
    ///
    /// ```
    /// use dbtree_core::Value;
    ///
    /// assert_eq!(Value::String("CREATE TABLE t".into()).to_text().as_deref(), Some("CREATE TABLE t"));
    /// assert_eq!(Value::Bytes(b"abc".to_vec()).to_text().as_deref(), Some("abc"));
    /// assert_eq!(Value::Null.to_text(), None);
    /// ```
    pub fn to_text(&self) -> Option<String> {
        match self {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Bytes(bytes) => Some(String::from_utf8_lossy(bytes).into_owned()),
            other => Some(other.to_string()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Null => write!(f, "NULL"),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Int64(v) => write!(f, "{}", v),
            Value::Float32(v) => write!(f, "{}", v),
            Value::Float64(v) => write!(f, "{}", v),
            Value::String(v) => write!(f, "{}", v),
            Value::Bytes(v) => write!(f, "<{} bytes>", v.len()),
            Value::Date(v) => write!(f, "{}", v),
            Value::DateTime(v) => write!(f, "{}", v),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

/// A row from a query result
#[derive(Debug, Clone)]
pub struct Row {
    /// Column values, in result column order
    pub values: Vec<Value>,
}

impl Row {
    /// Create a new row
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Get a value by column index
    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }
}

/// Column metadata
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ColumnMeta {
    /// Column name
    #[serde(default)]
    pub name: String,
    /// Data type (database-specific string)
    #[serde(default)]
    pub data_type: String,
    /// Column ordinal position (0-based)
    #[serde(default)]
    pub ordinal: usize,
}

/// Query result
#[derive(Debug, Clone, Default)]
pub struct QueryResult {
    /// Column metadata
    pub columns: Vec<ColumnMeta>,
    /// Result rows
    pub rows: Vec<Row>,
    /// Execution time in milliseconds
    pub execution_time_ms: u64,
    /// Warnings from the database
    pub warnings: Vec<String>,
}

impl QueryResult {
    /// Create a new empty query result
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a result from column names and text rows.
    ///
    /// Handy for drivers and mocks that only deal in strings, which is all
    /// `SHOW` statements ever return.
    ///
    /// ```
    /// use dbtree_core::QueryResult;
    ///
    /// let result = QueryResult::from_text_rows(
    ///     &["Table", "Create Table"],
    ///     vec![vec!["users", "CREATE TABLE `users` (id int)"]],
    /// );
    /// assert_eq!(result.rows.len(), 1);
    /// assert_eq!(result.columns[1].name, "Create Table");
    /// ```
    pub fn from_text_rows(columns: &[&str], rows: Vec<Vec<&str>>) -> Self {
        Self {
            columns: columns
                .iter()
                .enumerate()
                .map(|(ordinal, name)| ColumnMeta {
                    name: name.to_string(),
                    data_type: "VARCHAR".to_string(),
                    ordinal,
                })
                .collect(),
            rows: rows
                .into_iter()
                .map(|row| Row::new(row.into_iter().map(Value::from).collect()))
                .collect(),
            execution_time_ms: 0,
            warnings: Vec::new(),
        }
    }

    /// Collect the text of one column across all rows, skipping NULLs
    pub fn column_text(&self, index: usize) -> Vec<String> {
        self.rows
            .iter()
            .filter_map(|row| row.get(index).and_then(Value::to_text))
            .collect()
    }
}

/// Result of a statement that does not return rows
#[derive(Debug, Clone, Default)]
pub struct StatementResult {
    /// Rows affected
    pub affected_rows: u64,
    /// Warnings from the database
    pub warnings: Vec<String>,
}
