//! Shared domain types for the Rigbench project.

pub mod analysis;
pub mod config;
pub mod events;
pub mod hardware;
pub mod matrix;
pub mod saved;

mod errors;

pub use errors::{RigbenchError, Result};
