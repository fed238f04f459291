//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by platform ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod layout;
pub mod state;
pub mod tick;

pub use collision::Rect;
pub use layout::LayoutGenerator;
pub use state::{
    Actor, GamePhase, GameState, Platform, PlatformRecord, PlatformRegistry, PowerUp, PowerUpKind,
    PowerUpRecord, Stats,
};
pub use tick::{TickInput, tick};
