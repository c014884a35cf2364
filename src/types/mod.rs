// Shared type definitions
// The collection aggregate, its parts and the error enums used across the crate.

pub mod bookmark;
pub mod collection;
pub mod errors;
pub mod identifier;
pub mod settings;
pub mod snapshot;
