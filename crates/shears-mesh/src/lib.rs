//! # shears-mesh
//!
//! Particle/constraint cloth meshes stored as a flat particle arena with
//! constraints referencing particles by index.
//!
//! ## Key Types
//!
//! - [`Particle`]: point mass with current and previous position.
//! - [`Constraint`]: rest-length relationship between two particle ids.
//! - [`ClothMesh`]: owns the particle arena, the constraint list and the
//!   grid metadata. Particle count never changes after construction.
//! - [`Adjacency`]: per-particle incident constraint lists.
//! - [`ShapeSpec`] / [`ShapeClassifier`]: the cloth outline as a pure
//!   function from grid coordinate to [`Region`].
//! - [`generators`]: the grid mesh builder.

pub mod adjacency;
pub mod config;
pub mod constraint;
pub mod generators;
pub mod mesh;
pub mod particle;
pub mod shape;

pub use adjacency::Adjacency;
pub use config::{MeshConfig, PinCondition};
pub use constraint::{Constraint, ConstraintKind};
pub use mesh::ClothMesh;
pub use particle::{Particle, Region};
pub use shape::{ShapeClassifier, ShapeSpec};

/// Vector type used for all particle coordinates.
pub use glam::Vec3;
