//! HTTP surface for the recipe book.
//!
//! The binary in `main.rs` wires configuration, the database and the AI
//! services into an [`state::AppState`] and serves [`api::create_router`].

pub mod api;
pub mod metrics;
pub mod state;
