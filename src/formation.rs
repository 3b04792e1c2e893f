//! The enemy grid and its lock-step sweep.
//!
//! The whole formation moves as one rigid body. A step fires once every
//! `ceil(60 / speed)` ticks: the grid either shifts sideways by
//! `enemy_step`, or, when any enemy would touch an edge, reverses and
//! drops by `enemy_move_down`. Only that drop can overrun the player.

use rand::seq::IteratorRandom;
use rand::Rng;

use crate::config::GameConfig;
use crate::entities::{Bounds, Enemy, EnemyKind};

// ── Layout ────────────────────────────────────────────────────────────────────

pub const ROWS: usize = 5;
pub const COLS: usize = 11;
pub const FULL_STRENGTH: usize = ROWS * COLS;
pub const SPACING_X: i32 = 60;
pub const SPACING_Y: i32 = 50;
pub const START_Y: i32 = 80;

const TICKS_PER_SECOND: f32 = 60.0;
const ANIMATION_PERIOD: u32 = 60;

/// Stable handle of an enemy inside its formation.
pub type EnemyId = usize;

/// Kind and reward for a grid row; the top row is worth the most.
pub fn row_profile(row: usize) -> (EnemyKind, u32) {
    match row {
        0 => (EnemyKind::Large, 30),
        1 | 2 => (EnemyKind::Medium, 20),
        _ => (EnemyKind::Small, 10),
    }
}

// ── Speed tables ──────────────────────────────────────────────────────────────

/// Steps per second while a level is in progress. Grows as enemies die
/// and with each level, capped at 5.
pub fn dynamic_speed(remaining: usize, level: u32) -> f32 {
    let destroyed = FULL_STRENGTH.saturating_sub(remaining) as f32;
    let speed_multiplier = 1.0 + destroyed * 0.05;
    let level_multiplier = 1.0 + level.saturating_sub(1) as f32 * 0.2;
    (1.5 * speed_multiplier * level_multiplier).min(5.0)
}

/// Speed assigned when a fresh formation is generated for `level`.
pub fn level_speed(level: u32) -> f32 {
    (1.0 + level.saturating_sub(1) as f32 * 0.5).min(4.0)
}

/// Ticks between two formation steps at `speed` steps per second.
pub fn move_interval(speed: f32) -> u32 {
    debug_assert!(speed > 0.0, "formation speed must be positive");
    ((TICKS_PER_SECOND / speed).ceil() as u32).max(1)
}

// ── Formation ─────────────────────────────────────────────────────────────────

/// What a call to `advance` did to the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Move timer still running.
    Waiting,
    Shifted,
    /// Reversed at an edge and dropped; `overrun` is set when an enemy's
    /// bottom edge reached the player's top.
    Descended { overrun: bool },
}

#[derive(Clone, Debug)]
pub struct EnemyFormation {
    /// Destroyed enemies leave a `None` hole so ids stay valid.
    slots: Vec<Option<Enemy>>,
    remaining: usize,
    direction: i32,
    move_timer: u32,
    speed: f32,
    step: i32,
    move_down: i32,
    screen_width: i32,
}

impl EnemyFormation {
    /// Full 5×11 grid centered horizontally, moving right.
    pub fn standard(config: &GameConfig) -> Self {
        let size = config.enemy_size;
        let start_x = (config.window.width - COLS as i32 * SPACING_X) / 2;

        let mut enemies = Vec::with_capacity(FULL_STRENGTH);
        for row in 0..ROWS {
            let (kind, points) = row_profile(row);
            for col in 0..COLS {
                enemies.push(Enemy {
                    bounds: Bounds::new(
                        start_x + col as i32 * SPACING_X,
                        START_Y + row as i32 * SPACING_Y,
                        size.width,
                        size.height,
                    ),
                    kind,
                    points,
                    animation_frame: 0,
                    animation_timer: 0,
                });
            }
        }
        Self::from_enemies(enemies, config)
    }

    /// Formation from an explicit enemy list, moving right at level-1 speed.
    pub fn from_enemies(enemies: Vec<Enemy>, config: &GameConfig) -> Self {
        let remaining = enemies.len();
        EnemyFormation {
            slots: enemies.into_iter().map(Some).collect(),
            remaining,
            direction: 1,
            move_timer: 0,
            speed: level_speed(1),
            step: config.enemy_step,
            move_down: config.enemy_move_down,
            screen_width: config.window.width,
        }
    }

    /// Keep sweeping the way `previous` was: same direction, same progress
    /// towards the next step.
    pub fn continue_from(mut self, previous: &EnemyFormation) -> Self {
        self.direction = previous.direction;
        self.move_timer = previous.move_timer;
        self
    }

    pub fn len(&self) -> usize {
        self.remaining
    }

    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// +1 for rightward, -1 for leftward.
    pub fn direction(&self) -> i32 {
        self.direction
    }

    pub fn set_direction(&mut self, direction: i32) {
        debug_assert!(direction == 1 || direction == -1);
        self.direction = direction;
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
    }

    pub fn move_timer(&self) -> u32 {
        self.move_timer
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.slots.get(id).and_then(Option::as_ref)
    }

    /// Living enemies in grid order (row-major, top row first).
    pub fn iter(&self) -> impl Iterator<Item = (EnemyId, &Enemy)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(id, slot)| slot.as_ref().map(|enemy| (id, enemy)))
    }

    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> + '_ {
        self.slots.iter().flatten()
    }

    /// Remove a destroyed enemy. Removing an id twice returns `None`.
    pub fn remove(&mut self, id: EnemyId) -> Option<Enemy> {
        let removed = self.slots.get_mut(id)?.take();
        if removed.is_some() {
            self.remaining -= 1;
        }
        removed
    }

    /// Uniformly random living enemy, or `None` for an empty formation.
    pub fn choose_shooter<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Enemy> {
        self.enemies().choose(rng)
    }

    /// Run `ticks` frames of animation and movement. Stops early on overrun.
    pub fn advance(&mut self, ticks: u32, player_top: i32) -> Step {
        let mut last = Step::Waiting;
        for _ in 0..ticks {
            match self.tick(player_top) {
                Step::Waiting => {}
                step @ Step::Descended { overrun: true } => return step,
                step => last = step,
            }
        }
        last
    }

    fn tick(&mut self, player_top: i32) -> Step {
        for enemy in self.slots.iter_mut().flatten() {
            enemy.animation_timer += 1;
            if enemy.animation_timer >= ANIMATION_PERIOD {
                enemy.animation_timer = 0;
                enemy.animation_frame ^= 1;
            }
        }

        self.move_timer += 1;
        if self.move_timer < move_interval(self.speed) {
            return Step::Waiting;
        }
        self.move_timer = 0;

        let dx = self.direction * self.step;
        let hits_edge = self.enemies().any(|e| {
            let new_x = e.bounds.x + dx;
            new_x <= 0 || new_x >= self.screen_width - e.bounds.width
        });

        if hits_edge {
            self.direction = -self.direction;
            let mut overrun = false;
            for enemy in self.slots.iter_mut().flatten() {
                enemy.bounds.y += self.move_down;
                if enemy.bounds.bottom() >= player_top {
                    overrun = true;
                }
            }
            Step::Descended { overrun }
        } else {
            for enemy in self.slots.iter_mut().flatten() {
                enemy.bounds.x += dx;
            }
            debug_assert!(
                self.enemies()
                    .all(|e| e.bounds.x >= 0 && e.bounds.right() <= self.screen_width),
                "formation shifted out of bounds"
            );
            Step::Shifted
        }
    }
}
