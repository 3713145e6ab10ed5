//! Collaborator utilities for the Kindred workspace
//!
//! This crate collects small self-contained helpers that sit next to the
//! comparison engine without being part of it:
//!
//! - **TrackingMap**: an associative container that records which keys were
//!   read, so unused configuration entries can be expunged
//! - **Executor**: a thin wrapper around running a shell command and
//!   capturing its output

pub mod executor;
pub mod tracking_map;

pub use executor::{ExecError, ExecErrorKind, Executor};
pub use tracking_map::TrackingMap;
