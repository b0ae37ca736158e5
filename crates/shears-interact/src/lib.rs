//! # shears-interact
//!
//! External actors that act on a [`ClothMesh`](shears_mesh::ClothMesh)
//! between solver passes.
//!
//! ## Key Types
//!
//! - [`Mouse`]: pointer with a drag state and an influence radius. Cuts
//!   constraints when cutting is enabled, drags particles otherwise.
//! - [`Tensioner`]: a grasp: pins a particle set and moves it by direct
//!   positional increments until released.

pub mod mouse;
pub mod tensioner;

pub use mouse::{Mouse, MouseButton, MouseConfig};
pub use tensioner::{TensionState, Tensioner};
