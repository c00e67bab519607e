//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the shapes accepted at the HTTP boundary
//! - A `Serialize` read DTO for responses
//! - The conversions between them

pub mod movie;
