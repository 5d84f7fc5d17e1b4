//! dbtree objects - the database objects shown in a connection tree
//!
//! This crate provides:
//! - [`ObjectKind`] - the closed set of object kinds and their SQL shapes
//! - [`SchemaTreeItem`] - one node of the tree
//! - Create-script retrieval statements and delimiter/drop rewriting
//! - Starter templates for new routines

pub mod kind;
pub mod script;
pub mod template;
pub mod tree_item;

pub use kind::*;
pub use script::*;
pub use template::*;
pub use tree_item::*;
