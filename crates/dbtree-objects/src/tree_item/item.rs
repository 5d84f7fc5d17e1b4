//! Tree item definition

use crate::{ObjectKind, drop_statement, quote_identifier, show_create_statement};
use serde::{Deserialize, Serialize};

/// Warning shown below every drop confirmation
pub const DROP_WARNING: &str = "This operation cannot be reverted!";

/// One database object in the connection tree
///
/// Items are plain data: they are rebuilt whenever the tree is refreshed and
/// the backend that owns the object is passed to each operation.
///
/// # Examples
///
/// ```
/// use dbtree_objects::{ObjectKind, SchemaTreeItem};
///
/// let item = SchemaTreeItem::new(ObjectKind::View, "sakila", "actor_info", 1);
/// assert_eq!(item.qualified_name(), "`sakila`.`actor_info`");
/// assert_eq!(item.show_create_statement(), "SHOW CREATE VIEW `sakila`.`actor_info`");
/// assert_eq!(item.drop_statement(), "DROP VIEW `sakila`.`actor_info`");
///
/// let index = SchemaTreeItem::table_member(ObjectKind::Index, "sakila", "actor", "idx_last_name", 1);
/// assert_eq!(index.drop_statement(), "ALTER TABLE `sakila`.`actor` DROP INDEX `idx_last_name`");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SchemaTreeItem {
    /// Kind of the object
    pub kind: ObjectKind,
    /// Schema the object lives in (the schema itself for schema nodes)
    pub schema: String,
    /// Object name as listed by the server
    pub name: String,
    /// Owning table of columns, indexes and foreign keys
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    /// Connection the tree belongs to
    pub connection_id: i64,
}

impl SchemaTreeItem {
    /// Create a tree item
    pub fn new(
        kind: ObjectKind,
        schema: impl Into<String>,
        name: impl Into<String>,
        connection_id: i64,
    ) -> Self {
        Self {
            kind,
            schema: schema.into(),
            name: name.into(),
            table: None,
            connection_id,
        }
    }

    /// Create the node for a column, index or foreign key of `table`
    pub fn table_member(
        kind: ObjectKind,
        schema: impl Into<String>,
        table: impl Into<String>,
        name: impl Into<String>,
        connection_id: i64,
    ) -> Self {
        Self {
            table: Some(table.into()),
            ..Self::new(kind, schema, name, connection_id)
        }
    }

    /// Create the node for a schema
    pub fn schema(name: impl Into<String>, connection_id: i64) -> Self {
        let name = name.into();
        Self::new(ObjectKind::Schema, name.clone(), name, connection_id)
    }

    /// SQL keyword of the object kind
    pub fn db_type(&self) -> &'static str {
        self.kind.db_type()
    }

    /// Quoted, fully scoped name used in statements
    pub fn qualified_name(&self) -> String {
        match &self.table {
            Some(table) => format!(
                "{}.{}",
                ObjectKind::Table.qualified_name(&self.schema, table),
                quote_identifier(&self.name)
            ),
            None => self.kind.qualified_name(&self.schema, &self.name),
        }
    }

    /// Column of the `SHOW CREATE` result holding the DDL
    pub fn create_script_result_index(&self) -> Option<usize> {
        self.kind.create_script_result_index()
    }

    /// `SHOW CREATE` statement for this object
    pub fn show_create_statement(&self) -> String {
        show_create_statement(self.kind, &self.qualified_name())
    }

    /// `DROP` statement for this object. Table members are dropped through
    /// their table.
    pub fn drop_statement(&self) -> String {
        match &self.table {
            Some(table) => format!(
                "ALTER TABLE {} {}",
                ObjectKind::Table.qualified_name(&self.schema, table),
                drop_statement(self.kind, &quote_identifier(&self.name))
            ),
            None => drop_statement(self.kind, &self.qualified_name()),
        }
    }

    /// Wording of the modal shown before dropping this object
    pub fn drop_confirmation(&self) -> DropConfirmation {
        DropConfirmation {
            message: format!(
                "Do you want to drop the {} {}?",
                self.db_type().to_lowercase(),
                self.name
            ),
            confirm_label: format!("Drop {}", self.name),
            warning: DROP_WARNING.to_string(),
        }
    }
}

/// Text of a drop confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DropConfirmation {
    pub message: String,
    pub confirm_label: String,
    pub warning: String,
}
