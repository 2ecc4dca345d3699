//! API endpoint handlers.

pub mod agenda;
pub mod health;
pub mod page;
