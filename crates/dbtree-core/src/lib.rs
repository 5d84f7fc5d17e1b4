//! dbtree core - shared abstractions for the connection tree
//!
//! This crate provides the types every other dbtree crate depends on:
//!
//! - `Connection` - Trait for the SQL execution backend behind a tree
//! - Common types like `Value`, `Row`, `QueryResult`
//! - `DbTreeError` and the crate-wide `Result` alias

mod connection;
mod error;
mod types;

pub use connection::*;
pub use error::*;
pub use types::*;
