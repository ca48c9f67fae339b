//! RPS Arena - an autonomous Rock Paper Scissors battle simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (steering, collisions, win detection)
//! - `render`: Drawing seam the browser/native drivers implement
//! - `stats`: Win-statistics counter persisted across battles
//! - `settings`: User preferences (battle size)

pub mod render;
pub mod settings;
pub mod sim;
pub mod stats;

pub use render::DrawSurface;
pub use settings::Settings;
pub use stats::WinStats;

/// Simulation tuning constants
pub mod consts {
    /// Arena dimensions (pixels)
    pub const ARENA_WIDTH: f32 = 650.0;
    pub const ARENA_HEIGHT: f32 = 650.0;

    /// Spawn grid cell size; also the sprite/bounding-box size of every agent
    pub const CELL_SIZE: f32 = 16.0;

    /// Top speed of an agent (pixels per tick)
    pub const MAX_SPEED: f32 = 1.5;
    /// Cap on any single steering force
    pub const MAX_FORCE: f32 = 0.1;
    /// Radius inside which an arriving agent ramps its speed down
    pub const SLOW_RADIUS: f32 = 100.0;
    /// How many ticks ahead pursue/evade project a target's motion
    pub const LOOKAHEAD_TICKS: f32 = 10.0;

    /// Battle size defaults (agents per kind)
    pub const DEFAULT_AGENTS_PER_KIND: u32 = 5;
    pub const MAX_AGENTS_PER_KIND: u32 = 20;
}
