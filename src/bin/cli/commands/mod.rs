//! CLI command modules
//!
//! Organized by operation:
//! - schema: table bootstrap (mode 1)
//! - records: single insert and listing (modes 2, 3)
//! - generate: synthetic bulk load (mode 4)
//! - bench: timed selective query (mode 5)
//! - optimize: index creation (mode 6)

pub mod bench;
pub mod generate;
pub mod optimize;
pub mod records;
pub mod schema;
