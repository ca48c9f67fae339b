//! Deterministic simulation module
//!
//! All battle logic lives here. This module must be pure and deterministic:
//! - One tick per driver frame, never self-scheduled
//! - Seeded RNG only
//! - Fixed scan and update order
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod steering;
pub mod tick;
pub mod vec2;

pub use collision::aabb_overlap;
pub use state::{Agent, Arena, Kind, SpawnError};
pub use steering::{Waypoint, nearest};
pub use vec2::Vec2;
