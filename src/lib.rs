//! Ledge Hop - a side-scrolling platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, level layout)
//! - `input`: Keyboard latch and rebindable key bindings
//! - `session`: Owned fixed-timestep game loop
//! - `persistence`: Local key-value store for session resume
//! - `server`: HTTP level service backed by a document store

pub mod input;
pub mod persistence;
pub mod server;
pub mod session;
pub mod sim;

pub use input::{InputLatch, KeyBindings};
pub use session::{SaveState, Session};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, one tick per animation frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Gravitational acceleration (scene units/s², negative is down)
    pub const GRAVITY_Y: f32 = -6.0;

    /// Platform shape in scale units (half-extent = scale / 2)
    pub const PLATFORM_SCALE_X: f32 = 2.0;
    pub const PLATFORM_SCALE_Y: f32 = 0.2;

    /// Actor bounding box half-extents
    pub const ACTOR_HALF_X: f32 = 0.35;
    pub const ACTOR_HALF_Y: f32 = 0.5;

    /// Starting stats
    pub const BASE_SPEED: f32 = 3.0;
    pub const BASE_JUMP: f32 = 5.0;
    /// Fixed stat increment per collected power-up
    pub const SPEED_BONUS: f32 = 0.5;
    pub const JUMP_BONUS: f32 = 0.75;

    /// Number of platforms in a generated level
    pub const LEVEL_LENGTH: usize = 10;
    /// How far below the lowest platform the run ends
    pub const KILL_PLANE_MARGIN: f32 = 6.0;
}
