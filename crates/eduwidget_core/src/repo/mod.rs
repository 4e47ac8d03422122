//! Repository layer over the key/value document store.
//!
//! # Responsibility
//! - Own the persisted application-state and widget-preference documents.
//! - Guarantee that every state value handed to callers is fully populated
//!   and internally consistent, whatever was actually stored.
//!
//! # Invariants
//! - Normalization runs on every read and every write.
//! - A corrupted or legacy-shaped document degrades to a valid state; it
//!   never surfaces as an error.

pub mod legacy;
pub mod normalize;
pub mod prefs_repo;
pub mod state_repo;
