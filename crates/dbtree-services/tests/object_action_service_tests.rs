//! Integration tests for ObjectActionService
//!
//! Covers the clipboard copies, create-script rewriting against a mocked
//! `SHOW CREATE` result, and the confirm/execute/refresh sequence of drops.

mod common;

use std::sync::Arc;
use std::time::Duration;

use dbtree_objects::{CreateScriptOptions, ObjectKind, SchemaTreeItem};
use dbtree_services::{
    DEFAULT_MESSAGE_TIMEOUT, DropOutcome, ObjectActionService, ServiceError, SidebarEvent,
};
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

use common::{MockConnection, MockShell, show_create_result};

const PROCEDURE_DDL: &str =
    "CREATE DEFINER=`root`@`%` PROCEDURE `foo`(IN x INT)\nBEGIN\n  SELECT x;\nEND";

fn service_with(
    shell: Arc<MockShell>,
) -> (ObjectActionService, mpsc::UnboundedReceiver<SidebarEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ObjectActionService::new(shell, tx), rx)
}

fn procedure() -> SchemaTreeItem {
    SchemaTreeItem::new(ObjectKind::Procedure, "shop", "foo", 3)
}

// ============ Name Copy ============

#[tokio::test]
async fn copy_name_writes_exactly_the_name() {
    let shell = Arc::new(MockShell::accepting());
    let (service, _rx) = service_with(shell.clone());
    let item = SchemaTreeItem::new(ObjectKind::Table, "shop", "order items", 1);

    service
        .copy_name_to_clipboard(&item)
        .await
        .expect("copy should succeed");

    assert_eq!(shell.clipboard(), vec!["order items".to_string()]);
    assert_eq!(
        shell.status_messages(),
        vec![(
            "The name was copied to the system clipboard".to_string(),
            DEFAULT_MESSAGE_TIMEOUT
        )]
    );
}

#[tokio::test]
async fn copy_name_reports_clipboard_failure() {
    let shell = Arc::new(MockShell::accepting().with_broken_clipboard());
    let (service, _rx) = service_with(shell.clone());

    let result = service.copy_name_to_clipboard(&procedure()).await;

    assert!(matches!(result, Err(ServiceError::Clipboard(_))));
    assert_eq!(shell.error_messages(), vec!["Clipboard unavailable: no display".to_string()]);
    assert!(shell.status_messages().is_empty());
}

// ============ Create Script ============

#[tokio::test]
async fn create_script_issues_show_create_for_the_item() {
    let shell = Arc::new(MockShell::accepting());
    let (service, _rx) = service_with(shell.clone());
    let conn = MockConnection::new()
        .with_query_response("SHOW CREATE PROCEDURE", show_create_result(2, PROCEDURE_DDL));

    let script = service
        .create_script(&conn, &procedure(), CreateScriptOptions::new())
        .await
        .expect("script should load");

    assert_eq!(script, PROCEDURE_DDL);
    assert_eq!(conn.query_log(), vec!["SHOW CREATE PROCEDURE `shop`.`foo`".to_string()]);
}

#[tokio::test]
async fn copy_create_script_with_drop_and_delimiter() {
    let shell = Arc::new(MockShell::accepting());
    let (service, _rx) = service_with(shell.clone());
    let conn = MockConnection::new()
        .with_query_response("SHOW CREATE PROCEDURE", show_create_result(2, PROCEDURE_DDL));

    service
        .copy_create_script_to_clipboard(
            &conn,
            &procedure(),
            CreateScriptOptions::new().with_delimiter().with_drop(),
        )
        .await
        .expect("copy should succeed");

    let expected = format!(
        "DROP PROCEDURE `foo`$$\nDELIMITER $$\n{}$$\nDELIMITER ;",
        PROCEDURE_DDL
    );
    assert_eq!(shell.clipboard(), vec![expected]);
    assert_eq!(shell.status_messages().len(), 1);
    assert!(shell.error_messages().is_empty());
}

#[tokio::test]
async fn copy_create_script_for_table_reads_second_column() {
    let shell = Arc::new(MockShell::accepting());
    let (service, _rx) = service_with(shell.clone());
    let ddl = "CREATE TABLE `orders` (\n  `id` int NOT NULL\n)";
    let conn = MockConnection::new()
        .with_query_response("SHOW CREATE TABLE", show_create_result(1, ddl));
    let item = SchemaTreeItem::new(ObjectKind::Table, "shop", "orders", 3);

    service
        .copy_create_script_to_clipboard(&conn, &item, CreateScriptOptions::new().with_drop())
        .await
        .expect("copy should succeed");

    assert_eq!(shell.clipboard(), vec![ddl.to_string()]);
}

#[tokio::test]
async fn copy_create_script_surfaces_backend_error() {
    let shell = Arc::new(MockShell::accepting());
    let (service, _rx) = service_with(shell.clone());
    let conn = MockConnection::new().with_query_failure("Access denied for user 'app'");

    let result = service
        .copy_create_script_to_clipboard(&conn, &procedure(), CreateScriptOptions::new())
        .await;

    assert!(matches!(result, Err(ServiceError::BackendExecution(_))));
    assert_eq!(shell.error_messages(), vec!["Access denied for user 'app'".to_string()]);
    assert!(shell.clipboard().is_empty());
}

#[tokio::test]
async fn copy_create_script_with_empty_result_is_an_error() {
    let shell = Arc::new(MockShell::accepting());
    let (service, _rx) = service_with(shell.clone());
    let conn = MockConnection::new();

    let result = service
        .copy_create_script_to_clipboard(&conn, &procedure(), CreateScriptOptions::new())
        .await;

    assert!(result.is_err());
    assert_eq!(
        shell.error_messages(),
        vec!["Could not get the create script for procedure `shop`.`foo`".to_string()]
    );
    assert!(shell.clipboard().is_empty());
}

#[tokio::test]
async fn message_timeout_is_configurable() {
    let shell = Arc::new(MockShell::accepting());
    let (tx, _rx) = mpsc::unbounded_channel();
    let service =
        ObjectActionService::new(shell.clone(), tx).with_message_timeout(Duration::from_secs(2));

    service
        .copy_name_to_clipboard(&procedure())
        .await
        .expect("copy should succeed");

    assert_eq!(shell.status_messages()[0].1, Duration::from_secs(2));
}

#[tokio::test]
async fn table_member_has_no_create_script() {
    let shell = Arc::new(MockShell::accepting());
    let (service, _rx) = service_with(shell.clone());
    let conn = MockConnection::new();
    let column = SchemaTreeItem::table_member(ObjectKind::Column, "shop", "orders", "total", 3);

    let result = service
        .create_script(&conn, &column, CreateScriptOptions::new())
        .await;

    assert!(result.is_err());
    assert!(conn.query_log().is_empty());
    assert_eq!(
        shell.error_messages(),
        vec!["Could not get the create script for column `shop`.`orders`.`total`".to_string()]
    );
}

#[tokio::test]
async fn copy_name_of_table_member() {
    let shell = Arc::new(MockShell::accepting());
    let (service, _rx) = service_with(shell.clone());
    let index = SchemaTreeItem::table_member(ObjectKind::Index, "shop", "orders", "idx_placed", 3);

    service
        .copy_name_to_clipboard(&index)
        .await
        .expect("copy should succeed");

    assert_eq!(shell.clipboard(), vec!["idx_placed".to_string()]);
}

// ============ Drop ============

#[tokio::test]
async fn drop_declined_never_executes() {
    let shell = Arc::new(MockShell::declining());
    let (service, mut rx) = service_with(shell.clone());
    let conn = MockConnection::new();

    let outcome = service
        .drop_item(&conn, &procedure())
        .await
        .expect("cancel is not an error");

    assert_eq!(outcome, DropOutcome::Cancelled);
    assert!(conn.execute_log().is_empty());
    assert!(rx.try_recv().is_err());
    assert_eq!(shell.dialogs().len(), 1);
}

#[tokio::test]
async fn drop_confirmation_wording() {
    let shell = Arc::new(MockShell::declining());
    let (service, _rx) = service_with(shell.clone());
    let item = SchemaTreeItem::new(ObjectKind::View, "shop", "v_orders", 3);

    service
        .drop_item(&MockConnection::new(), &item)
        .await
        .expect("cancel is not an error");

    let dialog = &shell.dialogs()[0];
    assert_eq!(dialog.message, "Do you want to drop the view v_orders?");
    assert_eq!(dialog.confirm_label, "Drop v_orders");
    assert_eq!(dialog.warning, "This operation cannot be reverted!");
}

#[tokio::test]
async fn drop_accepted_executes_and_refreshes() {
    let shell = Arc::new(MockShell::accepting());
    let (service, mut rx) = service_with(shell.clone());
    let conn = MockConnection::new();

    let outcome = service
        .drop_item(&conn, &procedure())
        .await
        .expect("drop should succeed");

    assert_eq!(outcome, DropOutcome::Dropped);
    assert_eq!(conn.execute_log(), vec!["DROP PROCEDURE `shop`.`foo`".to_string()]);
    assert_eq!(
        rx.try_recv().ok(),
        Some(SidebarEvent::RefreshConnections { connection_id: 3 })
    );
    assert_eq!(
        shell.information_messages(),
        vec!["The object foo has been dropped successfully.".to_string()]
    );
}

#[tokio::test]
async fn drop_failure_sends_no_refresh() {
    let shell = Arc::new(MockShell::accepting());
    let (service, mut rx) = service_with(shell.clone());
    let conn = MockConnection::new().with_execute_failure("Cannot drop: object in use");

    let result = service.drop_item(&conn, &procedure()).await;

    match result {
        Err(ServiceError::BackendExecution(message)) => {
            assert_eq!(message, "Cannot drop: object in use")
        }
        other => panic!("expected backend error, got {:?}", other),
    }
    assert!(rx.try_recv().is_err());
    assert_eq!(
        shell.error_messages(),
        vec!["Error dropping the object: Cannot drop: object in use".to_string()]
    );
    assert!(shell.information_messages().is_empty());
}

#[tokio::test]
async fn drop_foreign_key_alters_its_table() {
    let shell = Arc::new(MockShell::accepting());
    let (service, mut rx) = service_with(shell.clone());
    let conn = MockConnection::new();
    let foreign_key =
        SchemaTreeItem::table_member(ObjectKind::ForeignKey, "shop", "orders", "fk_customer", 3);

    let outcome = service
        .drop_item(&conn, &foreign_key)
        .await
        .expect("drop should succeed");

    assert_eq!(outcome, DropOutcome::Dropped);
    assert_eq!(
        shell.dialogs()[0].message,
        "Do you want to drop the foreign key fk_customer?"
    );
    assert_eq!(
        conn.execute_log(),
        vec!["ALTER TABLE `shop`.`orders` DROP FOREIGN KEY `fk_customer`".to_string()]
    );
    assert!(rx.try_recv().is_ok());
}

#[tokio::test]
async fn drop_schema_uses_unscoped_name() {
    let shell = Arc::new(MockShell::accepting());
    let (service, _rx) = service_with(shell.clone());
    let conn = MockConnection::new();

    service
        .drop_item(&conn, &SchemaTreeItem::schema("scratch", 9))
        .await
        .expect("drop should succeed");

    assert_eq!(conn.execute_log(), vec!["DROP SCHEMA `scratch`".to_string()]);
}

#[tokio::test]
async fn drop_succeeds_when_sidebar_is_gone() {
    let shell = Arc::new(MockShell::accepting());
    let (service, rx) = service_with(shell.clone());
    drop(rx);

    let outcome = service
        .drop_item(&MockConnection::new(), &procedure())
        .await
        .expect("drop should succeed");

    assert_eq!(outcome, DropOutcome::Dropped);
}
