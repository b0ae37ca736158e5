//! # shears-types
//!
//! Shared types, identifiers, error types, and simulation constants
//! for the shears cloth simulator.
//!
//! This crate has zero domain logic. It defines the vocabulary
//! that all other shears crates share.

pub mod constants;
pub mod error;
pub mod ids;

pub use error::{ShearsError, ShearsResult};
pub use ids::{ConstraintId, ParticleId, TensionerId};
