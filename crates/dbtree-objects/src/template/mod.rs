//! Starter scripts for new routines and libraries

mod routine_template;

#[cfg(test)]
mod tests;

pub use routine_template::*;
