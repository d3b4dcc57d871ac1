//! UI-facing state holders.
//!
//! # Responsibility
//! - Cache the session user and the owner's notes in memory.
//! - Wrap service calls with `loading`/`error` flags for views.
//!
//! # Invariants
//! - The current user is passed explicitly into note operations; there is no
//!   ambient session global.
//! - Calls are synchronous and unguarded; overlapping callers are
//!   last-write-wins.

pub mod app_state;
pub mod auth_state;
pub mod notes_state;
