//! Owned game loop and session lifecycle
//!
//! The host feeds `key_down`/`key_up` as events arrive and calls
//! `advance` once per animation frame; the session runs fixed-timestep
//! ticks from an accumulator and owns every piece of live game state, so
//! nothing hangs off module-level globals.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::input::{Action, InputLatch, KeyBindings, Rebinder};
use crate::persistence::{LocalStore, StoreError};
use crate::sim::{GamePhase, GameState, LayoutGenerator, PlatformRecord, Stats, tick};

/// Snapshot of a run, stored under the `SaveState` key
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveState {
    pub position: Vec2,
    pub velocity: Vec2,
    pub stats: Stats,
    pub level: Vec<PlatformRecord>,
}

/// One game session: state, input, and the loop driving them
pub struct Session {
    pub state: GameState,
    pub bindings: KeyBindings,
    latch: InputLatch,
    rebinder: Rebinder,
    generator: LayoutGenerator,
    accumulator: f32,
}

impl Session {
    /// Start a session with a freshly generated level
    pub fn new(mut generator: LayoutGenerator) -> Self {
        let level = generator.generate(LEVEL_LENGTH);
        Self {
            state: GameState::from_level(&level),
            bindings: KeyBindings::default(),
            latch: InputLatch::new(),
            rebinder: Rebinder::default(),
            generator,
            accumulator: 0.0,
        }
    }

    /// Resume from the local store
    ///
    /// Stored keybindings, then a run snapshot, then a stored level are
    /// applied in that order; anything missing or unreadable falls back
    /// to defaults with a warning.
    pub fn resume(store: &LocalStore) -> Self {
        let mut session = Self::new(LayoutGenerator::from_entropy());

        match store.load_keybindings() {
            Ok(Some(bindings)) => session.bindings = bindings,
            Ok(None) => {}
            Err(err) => log::warn!("ignoring stored keybindings: {err}"),
        }

        match store.load_save_state() {
            Ok(Some(save)) => {
                log::info!("resuming saved run ({} platforms)", save.level.len());
                session.apply_save(save);
                return session;
            }
            Ok(None) => {}
            Err(err) => log::warn!("ignoring stored run snapshot: {err}"),
        }

        match store.load_level() {
            Ok(Some(level)) => {
                log::info!("loading stored level ({} platforms)", level.len());
                session.state = GameState::from_level(&level);
            }
            Ok(None) => {}
            Err(err) => log::warn!("ignoring stored level: {err}"),
        }

        session
    }

    fn apply_save(&mut self, save: SaveState) {
        self.state = GameState::from_level(&save.level);
        self.state.actor.pos = save.position;
        self.state.actor.vel = save.velocity;
        self.state.actor.stats = save.stats;
    }

    /// Route a key-down event: rebind capture first, then the latch
    pub fn key_down(&mut self, key: &str) {
        if let Some(action) = self.rebinder.capture(&mut self.bindings, key) {
            log::info!("bound {action:?} to {key:?}");
            return;
        }
        self.latch.key_down(key);
    }

    pub fn key_up(&mut self, key: &str) {
        self.latch.key_up(key);
    }

    /// Begin a "press next key" rebind for `action`
    pub fn start_rebind(&mut self, action: Action) {
        self.rebinder.begin(action);
    }

    pub fn is_rebinding(&self) -> bool {
        self.rebinder.is_capturing()
    }

    /// Advance the simulation by a frame's worth of wall time
    ///
    /// Runs whole fixed timesteps out of an accumulator, at most
    /// `MAX_SUBSTEPS` per call so a long stall cannot spiral.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            let input = self.latch.sample(&self.bindings);
            tick(&mut self.state, &input, SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    pub fn is_over(&self) -> bool {
        self.state.phase == GamePhase::GameOver
    }

    /// Tear the level down and install a freshly generated one
    pub fn restart(&mut self) {
        self.generator.clear();
        let level = self.generator.generate(LEVEL_LENGTH);
        self.state = GameState::from_level(&level);
        self.accumulator = 0.0;
        self.latch.release_all();
        log::info!("restarted with a fresh level");
    }

    /// Persist the run, the current level, and the bindings for later resume
    pub fn save(&self, store: &LocalStore) -> Result<(), StoreError> {
        let level = self.state.platforms.to_records();
        store.save_level(&level)?;
        store.save_save_state(&SaveState {
            position: self.state.actor.pos,
            velocity: self.state.actor.vel,
            stats: self.state.actor.stats,
            level,
        })?;
        store.save_keybindings(&self.bindings)
    }
}
