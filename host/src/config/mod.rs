//! Host configuration: data types and the TOML loader.

mod loader;
mod types;

pub use loader::*;
pub use types::*;
