//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus whatever read-side shapes the API hands out.

pub mod artwork;
pub mod category;
