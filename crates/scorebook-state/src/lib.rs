//! Scorebook State: SurrealDB backend for durable persistence
//!
//! Implements the core's `JudgingBackend` trait on top of SurrealDB.
//! Rows carry backend-native field names; mapping to the domain entities
//! happens once, at this boundary.
//!
//! ## Key components
//!
//! - `SurrealBackend`: connection handling and CRUD
//! - `rows`: row shapes plus one mapping function per entity
//! - `migrations`: idempotent schema initialization

mod migrations;
pub mod rows;
mod surreal;

pub use migrations::init_schema;
pub use surreal::SurrealBackend;
