//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate storage reads and writes into use-case level APIs.
//! - Keep state and UI layers decoupled from storage details.

pub mod auth_service;
pub mod note_service;
