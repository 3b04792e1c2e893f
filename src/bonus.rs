//! The bonus saucer: appears on a random timer, crosses the top of the
//! screen left to right, and pays a random reward when shot.

use std::ops::RangeInclusive;

use rand::Rng;

use crate::entities::{BonusTarget, Bounds};

/// Spawn delay in ticks (5–15 s at 60 Hz).
pub const SPAWN_DELAY: RangeInclusive<u32> = 300..=900;
pub const REWARD: RangeInclusive<u32> = 100..=300;
pub const BONUS_SPEED: i32 = 3;
pub const BONUS_WIDTH: i32 = 60;
pub const BONUS_HEIGHT: i32 = 30;
pub const BONUS_Y: i32 = 30;
/// The target enters at `-MARGIN` and escapes at `screen_width + MARGIN`.
pub const MARGIN: i32 = 60;

#[derive(Clone, Debug, PartialEq)]
pub enum BonusEvent {
    None,
    Spawned,
    Escaped,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BonusSpawner {
    target: Option<BonusTarget>,
    /// Ticks until the next spawn; frozen while a target is on screen.
    timer: u32,
    screen_width: i32,
}

impl BonusSpawner {
    pub fn new<R: Rng + ?Sized>(screen_width: i32, rng: &mut R) -> Self {
        Self {
            target: None,
            timer: rng.gen_range(SPAWN_DELAY),
            screen_width,
        }
    }

    pub fn target(&self) -> Option<&BonusTarget> {
        self.target.as_ref()
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    /// Force the countdown; mostly useful to stage a spawn.
    pub fn set_timer(&mut self, ticks: u32) {
        self.timer = ticks;
    }

    /// Move the active target, or count down towards the next one.
    pub fn tick<R: Rng + ?Sized>(&mut self, rng: &mut R) -> BonusEvent {
        match self.target.as_mut() {
            Some(target) => {
                target.bounds.x += target.speed;
                if target.bounds.x >= self.screen_width + MARGIN {
                    self.expire(rng);
                    BonusEvent::Escaped
                } else {
                    BonusEvent::None
                }
            }
            None => {
                self.timer = self.timer.saturating_sub(1);
                if self.timer == 0 {
                    self.target = Some(BonusTarget {
                        bounds: Bounds::new(-MARGIN, BONUS_Y, BONUS_WIDTH, BONUS_HEIGHT),
                        speed: BONUS_SPEED,
                    });
                    BonusEvent::Spawned
                } else {
                    BonusEvent::None
                }
            }
        }
    }

    /// Destroy the active target and roll its reward. `None` when no target
    /// is on screen.
    pub fn hit<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<u32> {
        self.target.as_ref()?;
        let reward = rng.gen_range(REWARD);
        self.expire(rng);
        Some(reward)
    }

    fn expire<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.target = None;
        self.timer = rng.gen_range(SPAWN_DELAY);
    }
}
