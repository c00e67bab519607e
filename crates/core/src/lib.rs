//! Domain building blocks shared by the database and HTTP layers.
//!
//! Nothing in here touches a database or a socket: error types, id/timestamp
//! aliases, pagination windows, validation-error conversion and the JSON Patch
//! engine used by partial updates.

pub mod error;
pub mod pagination;
pub mod patch;
pub mod types;
pub mod validation;
