//! Create-script retrieval and rewriting
//!
//! Builds the `SHOW CREATE` / `DROP` statements for a tree object and turns the
//! returned DDL into a script that can be pasted into a SQL client.

mod create_script;


pub use create_script::*;
