//! Tree population from MySQL schema listings

use dbtree_core::{Connection, Value};
use dbtree_objects::{ObjectKind, SchemaTreeItem};
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// Schemas hidden when `hide_system_schemas` is on
pub const SYSTEM_SCHEMAS: [&str; 3] = [
    "mysql",
    "mysql_innodb_cluster_metadata",
    "mysql_rest_service_metadata",
];

/// Group nodes shown under a schema
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaGroup {
    Tables,
    Views,
    Routines,
    Events,
}

impl SchemaGroup {
    pub const ALL: [SchemaGroup; 4] = [
        SchemaGroup::Tables,
        SchemaGroup::Views,
        SchemaGroup::Routines,
        SchemaGroup::Events,
    ];

    /// Caption of the group node
    pub fn caption(&self) -> &'static str {
        match self {
            SchemaGroup::Tables => "Tables",
            SchemaGroup::Views => "Views",
            SchemaGroup::Routines => "Routines",
            SchemaGroup::Events => "Events",
        }
    }
}

impl std::str::FromStr for SchemaGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SchemaGroup::ALL
            .into_iter()
            .find(|group| group.caption().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("Unknown schema group '{}'", s))
    }
}

/// Group nodes shown under a table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TableGroup {
    Columns,
    Indexes,
    ForeignKeys,
    Triggers,
}

impl TableGroup {
    pub const ALL: [TableGroup; 4] = [
        TableGroup::Columns,
        TableGroup::Indexes,
        TableGroup::ForeignKeys,
        TableGroup::Triggers,
    ];

    /// Caption of the group node
    pub fn caption(&self) -> &'static str {
        match self {
            TableGroup::Columns => "Columns",
            TableGroup::Indexes => "Indexes",
            TableGroup::ForeignKeys => "Foreign Keys",
            TableGroup::Triggers => "Triggers",
        }
    }

    /// Kind of the nodes listed in the group
    pub fn kind(&self) -> ObjectKind {
        match self {
            TableGroup::Columns => ObjectKind::Column,
            TableGroup::Indexes => ObjectKind::Index,
            TableGroup::ForeignKeys => ObjectKind::ForeignKey,
            TableGroup::Triggers => ObjectKind::Trigger,
        }
    }

    fn listing_sql(&self) -> &'static str {
        match self {
            TableGroup::Columns => {
                "SELECT COLUMN_NAME FROM information_schema.COLUMNS \
                 WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? ORDER BY ORDINAL_POSITION"
            }
            TableGroup::Indexes => {
                "SELECT DISTINCT INDEX_NAME FROM information_schema.STATISTICS \
                 WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? ORDER BY INDEX_NAME"
            }
            TableGroup::ForeignKeys => {
                "SELECT DISTINCT CONSTRAINT_NAME FROM information_schema.KEY_COLUMN_USAGE \
                 WHERE TABLE_SCHEMA = ? AND TABLE_NAME = ? AND REFERENCED_TABLE_NAME IS NOT NULL \
                 ORDER BY CONSTRAINT_NAME"
            }
            TableGroup::Triggers => {
                "SELECT TRIGGER_NAME FROM information_schema.TRIGGERS \
                 WHERE EVENT_OBJECT_SCHEMA = ? AND EVENT_OBJECT_TABLE = ? ORDER BY ACTION_ORDER"
            }
        }
    }
}

impl std::str::FromStr for TableGroup {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().replace(['-', '_'], " ");
        TableGroup::ALL
            .into_iter()
            .find(|group| group.caption().eq_ignore_ascii_case(&needle))
            .ok_or_else(|| format!("Unknown table group '{}'", s))
    }
}

/// Service building [`SchemaTreeItem`]s from the backend's catalog
#[derive(Debug, Clone)]
pub struct SchemaTreeService {
    hide_system_schemas: bool,
}

impl Default for SchemaTreeService {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaTreeService {
    /// Create a tree service that hides the system schemas
    pub fn new() -> Self {
        Self {
            hide_system_schemas: true,
        }
    }

    pub fn with_hide_system_schemas(mut self, hide: bool) -> Self {
        self.hide_system_schemas = hide;
        self
    }

    /// List the schema nodes of a connection
    #[tracing::instrument(skip(self, connection))]
    pub async fn load_schemas(
        &self,
        connection: &dyn Connection,
        connection_id: i64,
    ) -> ServiceResult<Vec<SchemaTreeItem>> {
        let names = list_names(connection, "SHOW DATABASES", &[]).await?;

        let schemas: Vec<SchemaTreeItem> = names
            .into_iter()
            .filter(|name| !(self.hide_system_schemas && SYSTEM_SCHEMAS.contains(&name.as_str())))
            .map(|name| SchemaTreeItem::schema(name, connection_id))
            .collect();

        tracing::debug!(count = schemas.len(), "schemas loaded");
        Ok(schemas)
    }

    /// List the members of one group under a schema.
    ///
    /// Routines are returned functions first, then procedures.
    #[tracing::instrument(skip(self, connection))]
    pub async fn load_schema_members(
        &self,
        connection: &dyn Connection,
        connection_id: i64,
        schema: &str,
        group: SchemaGroup,
    ) -> ServiceResult<Vec<SchemaTreeItem>> {
        let listings: Vec<(ObjectKind, String)> = match group {
            SchemaGroup::Tables => vec![(
                ObjectKind::Table,
                "SELECT TABLE_NAME FROM information_schema.TABLES \
                 WHERE TABLE_SCHEMA = ? AND TABLE_TYPE = 'BASE TABLE' \
                 ORDER BY TABLE_NAME"
                    .to_string(),
            )],
            SchemaGroup::Views => vec![(
                ObjectKind::View,
                "SELECT TABLE_NAME FROM information_schema.VIEWS \
                 WHERE TABLE_SCHEMA = ? ORDER BY TABLE_NAME"
                    .to_string(),
            )],
            SchemaGroup::Routines => [ObjectKind::Function, ObjectKind::Procedure]
                .into_iter()
                .map(|kind| {
                    (
                        kind,
                        format!(
                            "SELECT ROUTINE_NAME FROM information_schema.ROUTINES \
                             WHERE ROUTINE_SCHEMA = ? AND ROUTINE_TYPE = '{}' \
                             ORDER BY ROUTINE_NAME",
                            kind.db_type()
                        ),
                    )
                })
                .collect(),
            SchemaGroup::Events => vec![(
                ObjectKind::Event,
                "SELECT EVENT_NAME FROM information_schema.EVENTS \
                 WHERE EVENT_SCHEMA = ? ORDER BY EVENT_NAME"
                    .to_string(),
            )],
        };

        let params = [Value::from(schema)];
        let mut items = Vec::new();
        for (kind, sql) in listings {
            let names = list_names(connection, &sql, &params).await?;
            items.extend(
                names
                    .into_iter()
                    .map(|name| SchemaTreeItem::new(kind, schema, name, connection_id)),
            );
        }

        tracing::debug!(count = items.len(), "schema members loaded");
        Ok(items)
    }

    /// List the columns, indexes, foreign keys or triggers of one table.
    ///
    /// Columns come in table order. Triggers are schema objects and are not
    /// tied to the table in the returned items.
    #[tracing::instrument(skip(self, connection))]
    pub async fn load_table_members(
        &self,
        connection: &dyn Connection,
        connection_id: i64,
        schema: &str,
        table: &str,
        group: TableGroup,
    ) -> ServiceResult<Vec<SchemaTreeItem>> {
        let params = [Value::from(schema), Value::from(table)];
        let names = list_names(connection, group.listing_sql(), &params).await?;

        let kind = group.kind();
        let items: Vec<SchemaTreeItem> = names
            .into_iter()
            .map(|name| {
                if kind.is_table_member() {
                    SchemaTreeItem::table_member(kind, schema, table, name, connection_id)
                } else {
                    SchemaTreeItem::new(kind, schema, name, connection_id)
                }
            })
            .collect();

        tracing::debug!(count = items.len(), "table members loaded");
        Ok(items)
    }
}

async fn list_names(
    connection: &dyn Connection,
    sql: &str,
    params: &[Value],
) -> ServiceResult<Vec<String>> {
    match connection.query(sql, params).await {
        Ok(result) => Ok(result.column_text(0)),
        Err(error) => {
            tracing::warn!(error = %error, "schema listing failed");
            Err(ServiceError::SchemaLoadFailed(error.to_string()))
        }
    }
}
