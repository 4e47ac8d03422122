//! Domain model for the persisted scheduling document.
//!
//! # Responsibility
//! - Define the entity records owned by the single `AppState` document.
//! - Provide construction defaults for a fresh installation.
//!
//! # Invariants
//! - `AppState` is the sole persistence root; entities live inside its
//!   collections and have no lifecycle of their own.
//! - Removing a record from its collection destroys it.

pub mod state;
