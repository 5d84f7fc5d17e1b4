//! Connection tree nodes

mod item;


pub use item::*;
