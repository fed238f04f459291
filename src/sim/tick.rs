//! Fixed timestep physics step
//!
//! Advances the actor one frame: input, gravity integration, ground
//! contact, power-up pickup. Discrete point sampling only; a fast enough
//! fall can step straight through a platform.

use super::state::{GamePhase, GameState, PowerUpKind};

/// Input for a single tick, sampled from the latch once per frame
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Horizontal axis in [-1, 1] (left/right keys)
    pub axis: f32,
    /// Jump key currently pressed
    pub jump: bool,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time_ticks += 1;

    let actor = &mut state.actor;

    // Horizontal velocity comes straight from the axis; no acceleration ramp
    actor.vel.x = input.axis.clamp(-1.0, 1.0) * actor.stats.speed;

    if input.jump && actor.on_ground {
        actor.vel.y = actor.stats.jump;
        actor.on_ground = false;
    }

    // Semi-implicit Euler: accelerate, then move
    let prev_y = actor.pos.y;
    actor.vel += state.gravity * dt;
    actor.pos += actor.vel * dt;

    // Ground contact: land on the first platform (ascending id) whose
    // rectangle contains the sampled position, entered from above. The
    // descent check keeps a rising actor passing through from below.
    actor.on_ground = false;
    if actor.vel.y <= 0.0 {
        for platform in state.platforms.iter() {
            if prev_y >= platform.surface_y() && platform.rect.contains(actor.pos) {
                actor.pos.y = platform.surface_y();
                actor.vel.y = 0.0;
                actor.on_ground = true;
                break;
            }
        }
    }

    // Power-up pickup: collect ids during the scan, apply removals in a
    // second pass so the registry is never mutated mid-iteration.
    let bounds = state.actor.bounds();
    let collected: Vec<u32> = state
        .platforms
        .iter()
        .filter(|p| p.power_up.is_some() && bounds.contains(p.rect.center))
        .map(|p| p.id)
        .collect();
    for id in collected {
        let Some(platform) = state.platforms.remove(id) else {
            continue;
        };
        if let Some(power_up) = platform.power_up {
            let stats = &mut state.actor.stats;
            match power_up.kind {
                PowerUpKind::Jump => stats.jump += crate::consts::JUMP_BONUS,
                PowerUpKind::Speed => stats.speed += crate::consts::SPEED_BONUS,
            }
            log::debug!("collected {} power-up from platform {id}", power_up.kind.name());
        }
    }

    if state.actor.pos.y < state.kill_y {
        state.phase = GamePhase::GameOver;
        log::info!("actor fell out of the level after {} ticks", state.time_ticks);
    }
}
