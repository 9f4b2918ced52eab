//! Domain logic for the gallery service.
//!
//! Everything here is storage-agnostic: filter criteria, artwork form
//! validation, image upload policy, and display shaping rules. The `db`
//! crate turns criteria into SQL and the `api` crate wires it all to HTTP.

pub mod artwork_form;
pub mod criteria;
pub mod display;
pub mod error;
pub mod types;
pub mod upload;
