//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI args
//! and runs the operation against the database.

pub mod aliases;
pub mod bulk;
pub mod files;
pub mod filter;
pub mod tag;
pub mod tags;

// Re-export execute functions for convenience
pub use aliases::execute as aliases;
pub use bulk::execute as bulk;
pub use files::execute as files;
pub use filter::execute as filter;
pub use tag::execute as tag;
pub use tags::execute as tags;
