//! Object kind definitions

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// The kind of database object a tree node represents
///
/// # Examples
///
/// ```
/// use dbtree_objects::ObjectKind;
///
/// let kind = ObjectKind::Procedure;
/// assert_eq!(kind.db_type(), "PROCEDURE");
/// assert_eq!(kind.create_script_result_index(), Some(2));
/// assert_eq!(kind.qualified_name("shop", "restock"), "`shop`.`restock`");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    /// A schema (database)
    Schema,
    /// A base table
    Table,
    /// A view
    View,
    /// A stored procedure
    Procedure,
    /// A stored function
    Function,
    /// A trigger attached to a table
    Trigger,
    /// A scheduled event
    Event,
    /// A JavaScript library
    Library,
    /// A column of a table
    Column,
    /// An index of a table
    Index,
    /// A foreign key constraint of a table
    ForeignKey,
}

impl ObjectKind {
    /// All kinds, in tree order
    pub const ALL: [ObjectKind; 11] = [
        ObjectKind::Schema,
        ObjectKind::Table,
        ObjectKind::View,
        ObjectKind::Procedure,
        ObjectKind::Function,
        ObjectKind::Trigger,
        ObjectKind::Event,
        ObjectKind::Library,
        ObjectKind::Column,
        ObjectKind::Index,
        ObjectKind::ForeignKey,
    ];

    /// SQL keyword used in `SHOW CREATE` and `DROP` statements
    pub fn db_type(&self) -> &'static str {
        match self {
            ObjectKind::Schema => "SCHEMA",
            ObjectKind::Table => "TABLE",
            ObjectKind::View => "VIEW",
            ObjectKind::Procedure => "PROCEDURE",
            ObjectKind::Function => "FUNCTION",
            ObjectKind::Trigger => "TRIGGER",
            ObjectKind::Event => "EVENT",
            ObjectKind::Library => "LIBRARY",
            ObjectKind::Column => "COLUMN",
            ObjectKind::Index => "INDEX",
            ObjectKind::ForeignKey => "FOREIGN KEY",
        }
    }

    /// Human readable name, used for dialog buttons and messages
    pub fn display_name(&self) -> &'static str {
        match self {
            ObjectKind::Schema => "Schema",
            ObjectKind::Table => "Table",
            ObjectKind::View => "View",
            ObjectKind::Procedure => "Procedure",
            ObjectKind::Function => "Function",
            ObjectKind::Trigger => "Trigger",
            ObjectKind::Event => "Event",
            ObjectKind::Library => "Library",
            ObjectKind::Column => "Column",
            ObjectKind::Index => "Index",
            ObjectKind::ForeignKey => "Foreign Key",
        }
    }

    /// Column of the `SHOW CREATE` result row that holds the DDL text.
    ///
    /// MySQL returns `(name, ddl)` for schemas, tables and views,
    /// `(name, sql_mode, ddl, ...)` for routines, triggers and libraries and
    /// `(name, sql_mode, time_zone, ddl, ...)` for events. Table members have
    /// no `SHOW CREATE` form.
    pub fn create_script_result_index(&self) -> Option<usize> {
        match self {
            ObjectKind::Schema | ObjectKind::Table | ObjectKind::View => Some(1),
            ObjectKind::Procedure
            | ObjectKind::Function
            | ObjectKind::Trigger
            | ObjectKind::Library => Some(2),
            ObjectKind::Event => Some(3),
            ObjectKind::Column | ObjectKind::Index | ObjectKind::ForeignKey => None,
        }
    }

    /// Whether objects of this kind belong to a table and are dropped with
    /// `ALTER TABLE`
    pub fn is_table_member(&self) -> bool {
        matches!(
            self,
            ObjectKind::Column | ObjectKind::Index | ObjectKind::ForeignKey
        )
    }

    /// Whether objects of this kind live inside a schema
    pub fn is_schema_scoped(&self) -> bool {
        !matches!(self, ObjectKind::Schema)
    }

    /// Fully scoped, quoted identifier for an object of this kind
    pub fn qualified_name(&self, schema: &str, name: &str) -> String {
        if self.is_schema_scoped() {
            format!("{}.{}", quote_identifier(schema), quote_identifier(name))
        } else {
            quote_identifier(name)
        }
    }
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Error returned when parsing an unknown object kind
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown object kind '{0}'")]
pub struct ParseObjectKindError(pub String);

impl FromStr for ObjectKind {
    type Err = ParseObjectKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().replace(['-', '_'], " ");
        ObjectKind::ALL
            .into_iter()
            .find(|kind| {
                kind.db_type().eq_ignore_ascii_case(&needle)
                    || (*kind == ObjectKind::Schema && needle.eq_ignore_ascii_case("database"))
            })
            .ok_or_else(|| ParseObjectKindError(s.to_string()))
    }
}

/// Quote a MySQL identifier with backticks, doubling embedded backticks
///
/// ```
/// use dbtree_objects::quote_identifier;
///
/// assert_eq!(quote_identifier("orders"), "`orders`");
/// assert_eq!(quote_identifier("odd`name"), "`odd``name`");
/// ```
pub fn quote_identifier(name: &str) -> String {
    format!("`{}`", name.replace('`', "``"))
}
