//! Store Implementations
//!
//! Concrete implementations of the `EntityStore` port.

mod json_file;
mod memory;
mod seed;

pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;
pub use seed::Seed;
