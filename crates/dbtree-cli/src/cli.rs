//! dbtree: connection tree actions from the command line
//!
//! Usage examples:
//!   dbtree copy-name table sakila actor
//!   dbtree create-script procedure sakila rewards_report --with-delimiter --with-drop
//!   dbtree create-script view sakila actor_info --clipboard
//!   dbtree drop table scratch tmp_import
//!   dbtree new-routine js-function sakila add_tax
//!   dbtree tree sakila --group routines
//!   dbtree tree sakila --table customer --table-group foreign-keys
//!   dbtree copy-name column sakila last_name --table actor
//!   dbtree settings --hide-system-schemas false
//!
//! Connection parameters are read from flags or the `DBTREE_HOST`,
//! `DBTREE_PORT`, `DBTREE_USER`, `DBTREE_PASSWORD` and `DBTREE_DATABASE`
//! environment variables.

mod commands;
mod logging;
mod terminal_shell;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use dbtree_driver_mysql::MySqlConfig;
use dbtree_objects::{ObjectKind, RoutineTemplate, SchemaTreeItem};
use dbtree_services::{SchemaGroup, TableGroup};

#[derive(Parser, Debug)]
#[command(
    name = "dbtree",
    version,
    about = "Copy, script and drop MySQL objects the way the connection tree does"
)]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    /// Settings file (default: <config dir>/dbtree/settings.json)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// Print debug logs on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    #[arg(long, env = "DBTREE_HOST", default_value = "localhost", global = true)]
    pub host: String,

    #[arg(long, env = "DBTREE_PORT", default_value_t = 3306, global = true)]
    pub port: u16,

    #[arg(short, long, env = "DBTREE_USER", global = true)]
    pub user: Option<String>,

    #[arg(long, env = "DBTREE_PASSWORD", hide_env_values = true, global = true)]
    pub password: Option<String>,

    /// Default database of the session
    #[arg(long, env = "DBTREE_DATABASE", global = true)]
    pub database: Option<String>,

    /// Identifier attached to refresh requests
    #[arg(long, default_value_t = 1, global = true)]
    pub connection_id: i64,
}

impl ConnectionArgs {
    pub fn to_config(&self) -> MySqlConfig {
        MySqlConfig {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        }
    }
}

/// The object a command acts on
#[derive(Args, Debug, Clone)]
pub struct ObjectArgs {
    /// Object kind: schema, table, view, procedure, function, trigger, event,
    /// library, column, index or foreign-key
    pub kind: ObjectKind,

    /// Schema the object lives in
    pub schema: String,

    /// Object name (omit for schemas)
    pub name: Option<String>,

    /// Table owning a column, index or foreign key
    #[arg(long)]
    pub table: Option<String>,
}

impl ObjectArgs {
    pub fn to_item(&self, connection_id: i64) -> Result<SchemaTreeItem> {
        let kind_name = self.kind.display_name().to_lowercase();
        match (self.kind, &self.name, &self.table) {
            (ObjectKind::Schema, None, None) => {
                Ok(SchemaTreeItem::schema(&self.schema, connection_id))
            }
            (_, None, _) => anyhow::bail!("A {} name is required", kind_name),
            (kind, Some(name), Some(table)) if kind.is_table_member() => Ok(
                SchemaTreeItem::table_member(kind, &self.schema, table, name, connection_id),
            ),
            (kind, Some(_), None) if kind.is_table_member() => {
                anyhow::bail!("A {} needs --table", kind_name)
            }
            (_, Some(_), Some(_)) => {
                anyhow::bail!("--table only applies to columns, indexes and foreign keys")
            }
            (kind, Some(name), None) => {
                Ok(SchemaTreeItem::new(kind, &self.schema, name, connection_id))
            }
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Copy the object name to the clipboard
    CopyName(ObjectArgs),

    /// Print or copy the CREATE script of an object
    CreateScript {
        #[command(flatten)]
        object: ObjectArgs,

        /// Wrap the script in DELIMITER $$ ... $$ DELIMITER ;
        #[arg(long)]
        with_delimiter: bool,

        /// Put a DROP line for procedures and functions in front
        #[arg(long)]
        with_drop: bool,

        /// Copy to the clipboard instead of printing
        #[arg(long)]
        clipboard: bool,
    },

    /// Drop an object after confirmation
    Drop {
        #[command(flatten)]
        object: ObjectArgs,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Print a starter script for a new routine
    NewRoutine {
        /// procedure, function, js-procedure, js-function or js-library
        template: RoutineTemplate,

        schema: String,

        /// Routine name (a placeholder is used when omitted)
        #[arg(default_value = "")]
        name: String,
    },

    /// List tree nodes: schemas, the members of a schema, or of a table
    Tree {
        /// Schema to expand
        schema: Option<String>,

        /// Only list one group: tables, views, routines or events
        #[arg(long)]
        group: Option<SchemaGroup>,

        /// Expand this table of the schema instead
        #[arg(long, requires = "schema", conflicts_with = "group")]
        table: Option<String>,

        /// Only list one table group: columns, indexes, foreign-keys or triggers
        #[arg(long, requires = "table")]
        table_group: Option<TableGroup>,

        /// Include the mysql system schemas
        #[arg(long)]
        show_system_schemas: bool,
    },

    /// Show or change the stored settings
    Settings {
        /// Hide the mysql system schemas in `tree`
        #[arg(long)]
        hide_system_schemas: Option<bool>,

        /// How long status messages stay visible
        #[arg(long)]
        message_timeout_ms: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = if cli.verbose {
        logging::LoggingConfig::verbose()
    } else {
        logging::LoggingConfig::default()
    };
    let _log_guard = match logging::init(config) {
        Ok(guard) => guard,
        Err(error) => {
            eprintln!("warning: logging disabled: {:#}", error);
            None
        }
    };

    match commands::run(cli).await {
        Ok(code) => code,
        Err(error) => {
            tracing::error!(error = %error, "command failed");
            eprintln!("error: {:#}", error);
            ExitCode::FAILURE
        }
    }
}
