//! Gallery API server library.
//!
//! Exposes the building blocks (config, state, error handling, routes, the
//! artwork writer) so integration tests and the binaries can share them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod multipart;
pub mod response;
pub mod router;
pub mod routes;
pub mod state;
pub mod writer;
