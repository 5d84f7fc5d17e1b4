//! dbtree Services Layer
//!
//! This crate provides the service layer that sits between a front end and
//! the tree objects. Services run the per-node workflows against a backend
//! [`Connection`](dbtree_core::Connection) and report back through a
//! [`UiShell`].
//!
//! # Architecture
//!
//! ```text
//! Front end (dbtree-cli)
//!     ↓
//! Service Layer (dbtree-services) ← This crate
//!     ↓
//! Object Layer (dbtree-objects)
//!     ↓
//! Infrastructure Layer (dbtree-core, dbtree-driver-mysql)
//! ```
//!
//! # Services
//!
//! - [`ObjectActionService`] - Copy name, copy/rewrite create script, drop
//! - [`SchemaTreeService`] - Build tree nodes from schema listings
//!
//! # Design Principles
//!
//! 1. **No UI dependencies** - Dialogs, notifications and the clipboard go through [`UiShell`]
//! 2. **No global commands** - Refresh requests are sent as [`SidebarEvent`]s on a channel
//! 3. **Errors are shown once** - Services notify the shell and return the error

mod error;
mod events;
mod object_action_service;
mod schema_tree_service;
mod shell;

pub use error::{ServiceError, ServiceResult};
pub use events::SidebarEvent;
pub use object_action_service::{DEFAULT_MESSAGE_TIMEOUT, DropOutcome, ObjectActionService};
pub use schema_tree_service::{SYSTEM_SCHEMAS, SchemaGroup, SchemaTreeService, TableGroup};
pub use shell::UiShell;
