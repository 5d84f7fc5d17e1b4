//! MySQL driver implementation

mod connection;
mod value;

pub use connection::{MySqlConfig, MySqlConnection};
