//! Pointer input mapped to camera control actions.
//!
//! # Invariants
//! - The controls consume actions, never raw window events.
//! - This crate has no windowing dependency; the app translates its
//!   event source into pointer calls.

pub mod action;
pub mod pointer;

pub use action::ControlAction;
pub use pointer::{PointerButton, PointerTracker};
