//! Flood surface, social network, and damage curve for the Polder
//! simulation.
//!
//! This crate models everything outside the agents themselves: the
//! physical flood-risk surface households sit on, the social graph their
//! perceptions diffuse through, and the depth-damage relation every
//! damage figure in the model flows through.
//!
//! # Modules
//!
//! - [`damage`] -- Piecewise depth-damage curve with linear mitigation
//!   terms; the single damage implementation shared by households, the
//!   flood shock, and the water authority
//! - [`error`] -- Pre-run rejection errors for world construction
//! - [`network`] -- [`SocialGraph`] with topology generators and
//!   isolated-household validation
//! - [`surface`] -- Deterministic synthetic flood-depth raster
//!
//! [`SocialGraph`]: network::SocialGraph

pub mod damage;
pub mod error;
pub mod network;
pub mod surface;

// Re-export primary types at crate root.
pub use damage::{basic_damage, depth_damage, MAX_DAMAGE_DEPTH, MIN_WET_DEPTH};
pub use error::WorldError;
pub use network::{NetworkParams, SocialGraph};
pub use surface::{FloodSurface, Point, SurfaceParams};
