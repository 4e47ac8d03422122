//! Use-case services over the repository layer.
//!
//! # Responsibility
//! - Orchestrate repository reads/writes into validated state transitions.
//! - Keep UI/FFI layers decoupled from document details.

pub mod state_service;
