//! HTTP route handlers.

pub mod api;
pub mod health;
pub mod ws;
