//! HTTP upload surface.
//!
//! Serves an upload page and two agenda endpoints under `/api/`:
//! a JSON preview for confirmation and the letter bundle as a ZIP
//! download. The router is composable: `agenda_router()` returns a
//! `Router` that can be mounted on any axum server instance.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::agenda_router;
pub use server::{serve, ServerError};
pub use types::ApiContext;
