// src/trigger/mod.rs

//! Debounce-and-execute.
//!
//! The pure state machine lives in [`pending`]: a single optional deadline
//! that every qualifying change pushes back. The async shell in
//! [`debounce`] feeds it from a notification stream, owns the timer, and
//! fires the command executor once the deadline passes undisturbed.

pub mod debounce;
pub mod pending;

pub use debounce::{DebounceTrigger, StopReason};
pub use pending::PendingTrigger;
