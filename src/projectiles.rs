//! Player and enemy projectiles.
//!
//! A `ProjectileSet` holds shots of a single owner. Advancing it never
//! mutates in place: `tick` and `without` return a fresh set, so collision
//! passes can iterate a stable snapshot.

use rand::Rng;

use crate::config::{Dimensions, GameConfig};
use crate::entities::{Bounds, Projectile, ProjectileOwner};
use crate::formation::EnemyFormation;

#[derive(Clone, Debug, PartialEq)]
pub struct ProjectileSet {
    owner: ProjectileOwner,
    size: Dimensions,
    velocity: i32,
    /// Shots are dropped once their y leaves `[0, floor]`.
    floor: i32,
    projectiles: Vec<Projectile>,
}

impl ProjectileSet {
    /// Empty set of upward-moving player shots.
    pub fn player(config: &GameConfig) -> Self {
        Self {
            owner: ProjectileOwner::Player,
            size: config.bullet_size,
            velocity: -config.bullet_speed,
            floor: config.window.height,
            projectiles: Vec::new(),
        }
    }

    /// Empty set of downward-moving enemy shots.
    pub fn enemy(config: &GameConfig) -> Self {
        Self {
            owner: ProjectileOwner::Enemy,
            size: config.enemy_bullet_size,
            velocity: config.enemy_bullet_speed,
            floor: config.window.height,
            projectiles: Vec::new(),
        }
    }

    pub fn owner(&self) -> ProjectileOwner {
        self.owner
    }

    pub fn as_slice(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn len(&self) -> usize {
        self.projectiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projectiles.is_empty()
    }

    /// Append a shot whose top-left corner sits at `origin`.
    pub fn spawn(&mut self, origin: (i32, i32)) {
        let (x, y) = origin;
        self.projectiles.push(Projectile {
            bounds: Bounds::new(x, y, self.size.width, self.size.height),
            owner: self.owner,
            velocity: self.velocity,
        });
    }

    /// Advance every shot by its velocity and drop those off screen.
    pub fn tick(&self) -> Self {
        let projectiles = self
            .projectiles
            .iter()
            .filter_map(|p| {
                let y = p.bounds.y.saturating_add(p.velocity);
                if (0..=self.floor).contains(&y) {
                    Some(Projectile {
                        bounds: Bounds { y, ..p.bounds },
                        ..p.clone()
                    })
                } else {
                    None
                }
            })
            .collect();
        Self {
            projectiles,
            ..self.clone_empty()
        }
    }

    /// The surviving set after removing every shot flagged in `consumed`
    /// (indexed like `as_slice`).
    pub fn without(&self, consumed: &[bool]) -> Self {
        debug_assert_eq!(consumed.len(), self.projectiles.len());
        let projectiles = self
            .projectiles
            .iter()
            .zip(consumed)
            .filter(|(_, used)| !**used)
            .map(|(p, _)| p.clone())
            .collect();
        Self {
            projectiles,
            ..self.clone_empty()
        }
    }

    fn clone_empty(&self) -> Self {
        Self {
            owner: self.owner,
            size: self.size,
            velocity: self.velocity,
            floor: self.floor,
            projectiles: Vec::new(),
        }
    }
}

// ── Enemy fire ────────────────────────────────────────────────────────────────

/// Formation-wide shoot timer: one random enemy fires every `interval` ticks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnemyGun {
    interval: u32,
    timer: u32,
}

impl EnemyGun {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            interval: config.enemy_shoot_interval,
            timer: 0,
        }
    }

    pub fn timer(&self) -> u32 {
        self.timer
    }

    /// Count one tick. When the interval elapses and the formation is not
    /// empty, returns the muzzle (bottom-center) of a uniformly chosen enemy.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        formation: &EnemyFormation,
        rng: &mut R,
    ) -> Option<(i32, i32)> {
        self.timer += 1;
        if self.timer < self.interval {
            return None;
        }
        self.timer = 0;
        formation
            .choose_shooter(rng)
            .map(|enemy| (enemy.bounds.center_x(), enemy.bounds.bottom()))
    }
}
