//! Object kinds of the connection tree
//!
//! Each kind knows the SQL keyword used to address it, how its name is
//! qualified, and where `SHOW CREATE` puts its DDL.

mod object_kind;


pub use object_kind::*;
