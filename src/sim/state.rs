//! Game state and core simulation types
//!
//! Everything that must survive for session resume lives here, along with
//! the wire shapes stored by the level service.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Run ended (actor fell below the kill plane)
    GameOver,
}

/// Power-up categories a platform can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Jump,
    Speed,
}

impl PowerUpKind {
    /// Wire name used in stored level records
    pub fn name(&self) -> &'static str {
        match self {
            PowerUpKind::Jump => "jump",
            PowerUpKind::Speed => "speed",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "jump" => Some(PowerUpKind::Jump),
            "speed" => Some(PowerUpKind::Speed),
            _ => None,
        }
    }
}

/// A power-up riding on a platform, consumed exactly once
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub kind: PowerUpKind,
    pub color: Option<String>,
}

/// A static platform the actor can stand on
///
/// Immutable once placed. Removed only when its power-up is collected or
/// the level is torn down.
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    pub id: u32,
    pub rect: Rect,
    pub color: Option<String>,
    pub power_up: Option<PowerUp>,
}

impl Platform {
    /// Y coordinate the actor stands at after landing
    pub fn surface_y(&self) -> f32 {
        self.rect.top()
    }
}

/// Stored shape of a power-up descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerUpRecord {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

/// Stored shape of a platform
///
/// Field names match the level documents verbatim so existing stored
/// levels keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformRecord {
    #[serde(rename = "scaleY")]
    pub scale_y: f32,
    #[serde(rename = "scaleX")]
    pub scale_x: f32,
    #[serde(rename = "translateY")]
    pub translate_y: f32,
    #[serde(rename = "translateX")]
    pub translate_x: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(rename = "powerUP", default, skip_serializing_if = "Option::is_none")]
    pub power_up: Option<PowerUpRecord>,
}

impl PlatformRecord {
    /// World rectangle this record describes
    pub fn rect(&self) -> Rect {
        Rect::from_scale(
            Vec2::new(self.translate_x, self.translate_y),
            self.scale_x,
            self.scale_y,
        )
    }
}

/// Stats the actor accumulates through power-ups
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub speed: f32,
    pub jump: f32,
}

impl Default for Stats {
    fn default() -> Self {
        Self {
            speed: BASE_SPEED,
            jump: BASE_JUMP,
        }
    }
}

/// The player-controlled character
#[derive(Debug, Clone)]
pub struct Actor {
    pub pos: Vec2,
    pub vel: Vec2,
    pub stats: Stats,
    /// Ground contact from the most recent tick
    pub on_ground: bool,
}

impl Actor {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            stats: Stats::default(),
            on_ground: false,
        }
    }

    /// Bounding rectangle used for pickup tests
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos, Vec2::new(ACTOR_HALF_X, ACTOR_HALF_Y))
    }
}

/// Explicit id to platform registry
///
/// Iteration order is stable (ascending id) so contact scans and
/// persistence output are deterministic. Removals discovered during a
/// scan are applied in a second pass; the registry is never mutated while
/// its platforms are being iterated.
#[derive(Debug, Clone)]
pub struct PlatformRegistry {
    platforms: Vec<Platform>,
    next_id: u32,
}

impl PlatformRegistry {
    pub fn new() -> Self {
        Self {
            platforms: Vec::new(),
            next_id: 1,
        }
    }

    /// Materialize a stored record, returning the assigned id
    ///
    /// Unrecognized power-up names are tolerated (the store enforces no
    /// schema): the platform loads as a plain one, with a warning.
    pub fn insert(&mut self, record: &PlatformRecord) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        let power_up = record.power_up.as_ref().and_then(|p| {
            match PowerUpKind::from_name(&p.name) {
                Some(kind) => Some(PowerUp {
                    kind,
                    color: p.color.clone(),
                }),
                None => {
                    log::warn!("unknown power-up {:?} on platform {id}, ignoring", p.name);
                    None
                }
            }
        });

        self.platforms.push(Platform {
            id,
            rect: record.rect(),
            color: record.color.clone(),
            power_up,
        });
        id
    }

    pub fn remove(&mut self, id: u32) -> Option<Platform> {
        let index = self.platforms.iter().position(|p| p.id == id)?;
        Some(self.platforms.remove(index))
    }

    pub fn get(&self, id: u32) -> Option<&Platform> {
        self.platforms.iter().find(|p| p.id == id)
    }

    /// Platforms in ascending id order
    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    /// Stored shape of the live registry, in id order
    pub fn to_records(&self) -> Vec<PlatformRecord> {
        self.platforms
            .iter()
            .map(|p| PlatformRecord {
                scale_y: p.rect.half.y * 2.0,
                scale_x: p.rect.half.x * 2.0,
                translate_y: p.rect.center.y,
                translate_x: p.rect.center.x,
                color: p.color.clone(),
                power_up: p.power_up.as_ref().map(|pu| PowerUpRecord {
                    name: pu.kind.name().to_string(),
                    color: pu.color.clone(),
                }),
            })
            .collect()
    }
}

/// Complete game state for one run
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub actor: Actor,
    pub platforms: PlatformRegistry,
    /// Constant acceleration applied each tick
    pub gravity: Vec2,
    /// Falling below this y ends the run
    pub kill_y: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Build a fresh state from level records
    ///
    /// The actor spawns standing on the first (seed) platform. Any other
    /// platform overlapping the spawn rectangle is dropped here, since
    /// stored levels carry no such guarantee.
    pub fn from_level(records: &[PlatformRecord]) -> Self {
        let mut platforms = PlatformRegistry::new();
        for record in records {
            platforms.insert(record);
        }

        let seed = platforms.iter().next();
        let seed_id = seed.map(|p| p.id);
        let spawn = seed
            .map(|p| Vec2::new(p.rect.center.x, p.surface_y()))
            .unwrap_or(Vec2::ZERO);

        let actor = Actor::new(spawn);
        let spawn_bounds = actor.bounds();
        let doomed: Vec<u32> = platforms
            .iter()
            .filter(|p| Some(p.id) != seed_id && p.rect.overlaps(&spawn_bounds))
            .map(|p| p.id)
            .collect();
        for id in doomed {
            log::warn!("dropping platform {id}: overlaps the actor spawn");
            platforms.remove(id);
        }

        let kill_y = platforms
            .iter()
            .map(|p| p.rect.bottom())
            .fold(spawn.y, f32::min)
            - KILL_PLANE_MARGIN;

        Self {
            phase: GamePhase::Playing,
            actor,
            platforms,
            gravity: Vec2::new(0.0, GRAVITY_Y),
            kill_y,
            time_ticks: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_at(x: f32, y: f32) -> PlatformRecord {
        PlatformRecord {
            scale_y: PLATFORM_SCALE_Y,
            scale_x: PLATFORM_SCALE_X,
            translate_y: y,
            translate_x: x,
            color: None,
            power_up: None,
        }
    }

    #[test]
    fn test_registry_assigns_ascending_ids() {
        let mut registry = PlatformRegistry::new();
        let a = registry.insert(&record_at(0.0, 0.0));
        let b = registry.insert(&record_at(2.0, 1.0));
        assert!(b > a);

        let ids: Vec<u32> = registry.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a, b]);
    }

    #[test]
    fn test_registry_remove_is_terminal() {
        let mut registry = PlatformRegistry::new();
        let id = registry.insert(&record_at(0.0, 0.0));

        assert!(registry.remove(id).is_some());
        assert!(registry.get(id).is_none());
        assert!(registry.remove(id).is_none());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unknown_power_up_name_loads_as_plain_platform() {
        let mut record = record_at(0.0, 0.0);
        record.power_up = Some(PowerUpRecord {
            name: "doublejump".to_string(),
            color: None,
        });

        let mut registry = PlatformRegistry::new();
        let id = registry.insert(&record);
        assert!(registry.get(id).unwrap().power_up.is_none());
    }

    #[test]
    fn test_records_round_trip_through_registry() {
        let mut record = record_at(3.0, 1.5);
        record.color = Some("red".to_string());
        record.power_up = Some(PowerUpRecord {
            name: "speed".to_string(),
            color: Some("orange".to_string()),
        });

        let mut registry = PlatformRegistry::new();
        registry.insert(&record);
        assert_eq!(registry.to_records(), vec![record]);
    }

    #[test]
    fn test_spawn_spawns_on_seed_platform() {
        let state = GameState::from_level(&[record_at(0.0, 0.0), record_at(3.0, 1.0)]);
        assert_eq!(state.actor.pos, Vec2::new(0.0, 0.1));
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.platforms.len(), 2);
    }

    #[test]
    fn test_platform_overlapping_spawn_is_dropped() {
        // Second platform sits right on top of the spawn point
        let state = GameState::from_level(&[record_at(0.0, 0.0), record_at(0.0, 0.3)]);
        assert_eq!(state.platforms.len(), 1);
    }

    #[test]
    fn test_empty_level_still_builds() {
        let state = GameState::from_level(&[]);
        assert_eq!(state.actor.pos, Vec2::ZERO);
        assert!(state.platforms.is_empty());
        assert!(state.kill_y < 0.0);
    }

    #[test]
    fn test_record_field_names_are_stable() {
        let json = serde_json::to_value(record_at(1.0, 2.0)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "scaleY": PLATFORM_SCALE_Y,
                "scaleX": PLATFORM_SCALE_X,
                "translateY": 2.0,
                "translateX": 1.0,
            })
        );

        let with_power_up: PlatformRecord = serde_json::from_str(
            r#"{"scaleY":0.2,"scaleX":2,"translateY":0,"translateX":0,
                "powerUP":{"name":"jump","color":"green"}}"#,
        )
        .unwrap();
        assert_eq!(with_power_up.power_up.unwrap().name, "jump");
    }
}
