//! Command dispatch

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use dbtree_core::Connection;
use dbtree_driver_mysql::{MySqlConfig, MySqlConnection};
use dbtree_objects::{CreateScriptOptions, SchemaTreeItem};
use dbtree_services::{
    DropOutcome, ObjectActionService, SchemaGroup, SchemaTreeService, ServiceResult,
    SidebarEvent, TableGroup,
};
use dbtree_settings::DbTreeSettings;
use tokio::sync::mpsc;

use crate::terminal_shell::TerminalShell;
use crate::{Cli, Command};

pub async fn run(cli: Cli) -> Result<ExitCode> {
    let settings = match &cli.settings {
        Some(path) => DbTreeSettings::load_from(path),
        None => DbTreeSettings::load(),
    }
    .context("Failed to load settings")?;
    let connection_id = cli.connection.connection_id;
    let config = cli.connection.to_config();

    let assume_yes = matches!(cli.command, Command::Drop { yes: true, .. });
    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let actions = ObjectActionService::new(Arc::new(TerminalShell::new(assume_yes)), events_tx)
        .with_message_timeout(settings.actions.message_timeout());

    let code = match cli.command {
        Command::CopyName(object) => {
            let item = object.to_item(connection_id)?;
            exit_code(actions.copy_name_to_clipboard(&item).await)
        }
        Command::CreateScript {
            object,
            with_delimiter,
            with_drop,
            clipboard,
        } => {
            let item = object.to_item(connection_id)?;
            let mut options = CreateScriptOptions::new();
            if with_delimiter {
                options = options.with_delimiter();
            }
            if with_drop {
                options = options.with_drop();
            }

            let connection = connect(&config).await?;
            let result = if clipboard {
                actions
                    .copy_create_script_to_clipboard(&connection, &item, options)
                    .await
            } else {
                actions
                    .create_script(&connection, &item, options)
                    .await
                    .map(|script| println!("{}", script))
            };
            close(&connection).await;
            exit_code(result)
        }
        Command::Drop { object, .. } => {
            let item = object.to_item(connection_id)?;
            let connection = connect(&config).await?;
            let result = actions.drop_item(&connection, &item).await;
            close(&connection).await;

            if let Ok(DropOutcome::Cancelled) = result {
                eprintln!("Cancelled.");
            }
            exit_code(result.map(|_| ()))
        }
        Command::NewRoutine {
            template,
            schema,
            name,
        } => {
            println!("{}", template.script(&schema, &name));
            ExitCode::SUCCESS
        }
        Command::Tree {
            schema,
            group,
            table,
            table_group,
            show_system_schemas,
        } => {
            let service = SchemaTreeService::new()
                .with_hide_system_schemas(settings.tree.hide_system_schemas && !show_system_schemas);
            let connection = connect(&config).await?;
            let result = print_tree(
                &service,
                &connection,
                connection_id,
                schema.as_deref(),
                group,
                table.as_deref().map(|table| (table, table_group)),
            )
            .await;
            close(&connection).await;
            result?;
            ExitCode::SUCCESS
        }
        Command::Settings {
            hide_system_schemas,
            message_timeout_ms,
        } => {
            let mut settings = settings;
            if apply_settings(&mut settings, hide_system_schemas, message_timeout_ms) {
                match &cli.settings {
                    Some(path) => settings.save_to(path),
                    None => settings.save(),
                }
                .context("Failed to save settings")?;
                tracing::info!("settings saved");
            }
            println!("tree.hide_system_schemas = {}", settings.tree.hide_system_schemas);
            println!("actions.message_timeout_ms = {}", settings.actions.message_timeout_ms);
            ExitCode::SUCCESS
        }
    };

    while let Ok(SidebarEvent::RefreshConnections { connection_id }) = events_rx.try_recv() {
        tracing::info!(connection_id, "connection tree refresh requested");
    }

    Ok(code)
}

async fn connect(config: &MySqlConfig) -> Result<MySqlConnection> {
    MySqlConnection::connect(config)
        .await
        .with_context(|| format!("Could not connect to {}:{}", config.host, config.port))
}

async fn close(connection: &MySqlConnection) {
    if let Err(error) = connection.close().await {
        tracing::warn!(error = %error, "failed to close connection");
    }
}

/// Service errors were already shown by the shell
fn exit_code(result: ServiceResult<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            tracing::debug!(error = %error, "action failed");
            ExitCode::FAILURE
        }
    }
}

/// Returns whether anything changed
fn apply_settings(
    settings: &mut DbTreeSettings,
    hide_system_schemas: Option<bool>,
    message_timeout_ms: Option<u64>,
) -> bool {
    let before = settings.clone();
    if let Some(hide) = hide_system_schemas {
        settings.tree.hide_system_schemas = hide;
    }
    if let Some(timeout) = message_timeout_ms {
        settings.actions.message_timeout_ms = timeout;
    }
    *settings != before
}

async fn print_tree(
    service: &SchemaTreeService,
    connection: &dyn Connection,
    connection_id: i64,
    schema: Option<&str>,
    group: Option<SchemaGroup>,
    table: Option<(&str, Option<TableGroup>)>,
) -> Result<()> {
    let Some(schema) = schema else {
        for item in service.load_schemas(connection, connection_id).await? {
            println!("{}", item.name);
        }
        return Ok(());
    };

    if let Some((table, table_group)) = table {
        let groups = match table_group {
            Some(group) => vec![group],
            None => TableGroup::ALL.to_vec(),
        };
        for group in groups {
            let items = service
                .load_table_members(connection, connection_id, schema, table, group)
                .await?;
            println!("{}", group.caption());
            print_items(&items);
        }
        return Ok(());
    }

    let groups = match group {
        Some(group) => vec![group],
        None => SchemaGroup::ALL.to_vec(),
    };
    for group in groups {
        let items = service
            .load_schema_members(connection, connection_id, schema, group)
            .await?;
        println!("{}", group.caption());
        print_items(&items);
    }
    Ok(())
}

fn print_items(items: &[SchemaTreeItem]) {
    for item in items {
        println!("  {} ({})", item.name, item.kind.display_name());
    }
}
