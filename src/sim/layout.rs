//! Procedural level layout
//!
//! Produces a linear chain of platform records, each offset from the
//! previous one by a bounded random step. Seeded RNG so a layout can be
//! reproduced; `from_entropy` for callers that just want a fresh level.

use std::ops::Range;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{PlatformRecord, PowerUpKind, PowerUpRecord};
use crate::consts::{PLATFORM_SCALE_X, PLATFORM_SCALE_Y};

/// Step between consecutive platforms, drawn independently per axis
const STEP_X: Range<f32> = 1.0..3.0;
const STEP_Y: Range<f32> = 0.0..2.0;

/// Where a fresh origin can land after `clear`
const ORIGIN_X: Range<f32> = -2.0..2.0;
const ORIGIN_Y: Range<f32> = -1.0..1.0;

/// One in this many non-seed platforms carries a power-up
const POWER_UP_ODDS: u32 = 5;

/// Generator for linear platform chains
#[derive(Debug, Clone)]
pub struct LayoutGenerator {
    origin: Vec2,
    rng: Pcg32,
}

impl LayoutGenerator {
    /// Deterministic generator for a given seed
    pub fn new(seed: u64) -> Self {
        Self {
            origin: Vec2::ZERO,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Generator seeded from the process RNG
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// Origin the next chain starts from
    pub fn origin(&self) -> Vec2 {
        self.origin
    }

    /// Generate a chain of `count` platform records
    ///
    /// The first record is always the seed platform at the current origin;
    /// every platform has the same fixed shape. Insertion order is
    /// generation order.
    pub fn generate(&mut self, count: usize) -> Vec<PlatformRecord> {
        let mut records = Vec::with_capacity(count);
        let mut at = self.origin;

        for index in 0..count {
            if index > 0 {
                at.x += self.rng.random_range(STEP_X);
                at.y += self.rng.random_range(STEP_Y);
            }

            let mut record = PlatformRecord {
                scale_y: PLATFORM_SCALE_Y,
                scale_x: PLATFORM_SCALE_X,
                translate_y: at.y,
                translate_x: at.x,
                color: None,
                power_up: None,
            };

            // The seed platform stays plain so the spawn is never a pickup
            if index > 0 && self.rng.random_range(0..POWER_UP_ODDS) == 0 {
                let kind = if self.rng.random_range(0..2) == 0 {
                    PowerUpKind::Jump
                } else {
                    PowerUpKind::Speed
                };
                record.power_up = Some(PowerUpRecord {
                    name: kind.name().to_string(),
                    color: Some(
                        match kind {
                            PowerUpKind::Jump => "green",
                            PowerUpKind::Speed => "orange",
                        }
                        .to_string(),
                    ),
                });
            }

            records.push(record);
        }

        log::debug!("generated {} platforms from {:?}", records.len(), self.origin);
        records
    }

    /// Reset the origin to a freshly randomized value for the next level
    pub fn clear(&mut self) {
        self.origin = Vec2::new(
            self.rng.random_range(ORIGIN_X),
            self.rng.random_range(ORIGIN_Y),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::LEVEL_LENGTH;

    #[test]
    fn test_generates_requested_count() {
        let mut generator = LayoutGenerator::new(42);
        let records = generator.generate(LEVEL_LENGTH);
        assert_eq!(records.len(), LEVEL_LENGTH);
    }

    #[test]
    fn test_first_record_is_seed_platform_at_origin() {
        let mut generator = LayoutGenerator::new(42);
        let origin = generator.origin();
        let records = generator.generate(LEVEL_LENGTH);

        let seed = &records[0];
        assert_eq!(seed.translate_x, origin.x);
        assert_eq!(seed.translate_y, origin.y);
        assert_eq!(seed.scale_x, PLATFORM_SCALE_X);
        assert_eq!(seed.scale_y, PLATFORM_SCALE_Y);
        assert!(seed.power_up.is_none());
    }

    #[test]
    fn test_chain_steps_stay_in_bounds() {
        let mut generator = LayoutGenerator::new(7);
        let records = generator.generate(50);

        for pair in records.windows(2) {
            let dx = pair[1].translate_x - pair[0].translate_x;
            let dy = pair[1].translate_y - pair[0].translate_y;
            // Loose bounds; the accumulated coordinates round a little
            assert!(dx > 0.99 && dx < 3.01, "dx out of range: {dx}");
            assert!(dy > -0.01 && dy < 2.01, "dy out of range: {dy}");
        }
    }

    #[test]
    fn test_same_seed_reproduces_layout() {
        let mut a = LayoutGenerator::new(99);
        let mut b = LayoutGenerator::new(99);
        assert_eq!(a.generate(LEVEL_LENGTH), b.generate(LEVEL_LENGTH));
    }

    #[test]
    fn test_clear_randomizes_origin() {
        let mut generator = LayoutGenerator::new(42);
        let before = generator.origin();
        generator.clear();
        let after = generator.origin();

        assert_ne!(before, after);
        assert!(ORIGIN_X.contains(&after.x));
        assert!(ORIGIN_Y.contains(&after.y));
    }
}
