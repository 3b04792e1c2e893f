//! One playthrough.
//!
//! `GameSession` owns every entity collection and advances them in a fixed
//! order once per `update`. Randomness and high-score persistence are
//! injected at construction so a seeded RNG and an in-memory store give a
//! fully deterministic run.

use rand::Rng;

use crate::bonus::{BonusEvent, BonusSpawner};
use crate::collision::{self, Arena};
use crate::config::{Dimensions, GameConfig};
use crate::entities::{BonusTarget, EndReason, GameStatus, Player, Projectile, Shield};
use crate::error::ConfigError;
use crate::formation::{dynamic_speed, level_speed, EnemyFormation, Step};
use crate::input::FrameInput;
use crate::projectiles::{EnemyGun, ProjectileSet};
use crate::shields::ShieldBank;
use crate::store::ScoreStore;

/// What happened during one call to `update`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    Running,
    /// Pause was requested; nothing was simulated.
    Paused,
    /// The formation was wiped out and `level` has begun.
    LevelUp { level: u32 },
    GameOver {
        reason: EndReason,
        final_score: u32,
        new_high_score: bool,
    },
}

/// Read-only view handed to the renderer.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub world: Dimensions,
    pub player: &'a Player,
    pub formation: &'a EnemyFormation,
    pub shields: &'a [Shield],
    pub bonus: Option<&'a BonusTarget>,
    pub player_shots: &'a [Projectile],
    pub enemy_shots: &'a [Projectile],
    pub score: u32,
    /// Best of the stored high score and the running score.
    pub high_score: u32,
    pub level: u32,
    pub status: GameStatus,
    pub frame: u64,
}

/// Entity collections and the score/level counters are public so a host
/// or test can stage a scene directly; `update` only ever raises `score`.
/// Game-over status, the stored high score and the frame counter are
/// private: they change together with the store, and only through
/// `update`, `reset` and the game-over transition.
pub struct GameSession<R: Rng, S: ScoreStore> {
    pub player: Player,
    pub formation: EnemyFormation,
    pub shields: ShieldBank,
    pub bonus: BonusSpawner,
    pub player_shots: ProjectileSet,
    pub enemy_shots: ProjectileSet,
    pub enemy_gun: EnemyGun,
    pub score: u32,
    pub level: u32,
    config: GameConfig,
    rng: R,
    store: S,
    high_score: u32,
    new_high_score: bool,
    status: GameStatus,
    frame: u64,
}

impl<R: Rng, S: ScoreStore> GameSession<R, S> {
    /// Validate `config`, read the stored high score and set up level 1.
    pub fn new(config: GameConfig, mut rng: R, store: S) -> Result<Self, ConfigError> {
        config.validate()?;
        let high_score = store.load();
        let session = GameSession {
            player: Player::spawn(&config),
            formation: EnemyFormation::standard(&config),
            shields: ShieldBank::standard(&config),
            bonus: BonusSpawner::new(config.window.width, &mut rng),
            player_shots: ProjectileSet::player(&config),
            enemy_shots: ProjectileSet::enemy(&config),
            enemy_gun: EnemyGun::new(&config),
            score: 0,
            level: 1,
            high_score,
            new_high_score: false,
            status: GameStatus::Playing,
            frame: 0,
            config,
            rng,
            store,
        };
        tracing::info!(high_score, "session started");
        Ok(session)
    }

    /// Start a fresh playthrough, keeping the RNG, store and high score.
    pub fn reset(&mut self) {
        self.player = Player::spawn(&self.config);
        self.formation = EnemyFormation::standard(&self.config);
        self.shields = ShieldBank::standard(&self.config);
        self.bonus = BonusSpawner::new(self.config.window.width, &mut self.rng);
        self.player_shots = ProjectileSet::player(&self.config);
        self.enemy_shots = ProjectileSet::enemy(&self.config);
        self.enemy_gun = EnemyGun::new(&self.config);
        self.score = 0;
        self.level = 1;
        self.new_high_score = false;
        self.status = GameStatus::Playing;
        self.frame = 0;
        tracing::info!(high_score = self.high_score, "session reset");
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::GameOver { .. })
    }

    /// Stored best score; raised when a game ends above it.
    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            world: self.config.window,
            player: &self.player,
            formation: &self.formation,
            shields: self.shields.as_slice(),
            bonus: self.bonus.target(),
            player_shots: self.player_shots.as_slice(),
            enemy_shots: self.enemy_shots.as_slice(),
            score: self.score,
            high_score: self.high_score.max(self.score),
            level: self.level,
            status: self.status,
            frame: self.frame,
        }
    }

    /// Shoot from the ship's nose if the cooldown allows. Returns whether a
    /// shot was fired.
    pub fn try_fire(&mut self) -> bool {
        if !self.player.can_fire() {
            return false;
        }
        self.player_shots.spawn(self.player.muzzle());
        self.player.cooldown = self.config.fire_cooldown;
        true
    }

    /// Advance the simulation by one fixed step.
    pub fn update(&mut self, input: &FrameInput) -> FrameOutcome {
        if let GameStatus::GameOver { reason, final_score } = self.status {
            return FrameOutcome::GameOver {
                reason,
                final_score,
                new_high_score: self.new_high_score,
            };
        }
        if input.pause {
            return FrameOutcome::Paused;
        }
        self.frame += 1;

        // ── 1. Player input ──────────────────────────────────────────────────
        let direction = input.direction();
        if direction != 0 {
            self.player.move_by(direction, self.config.window.width);
        }
        if input.fire {
            self.try_fire();
        }

        // ── 2. Cooldown & invincibility ──────────────────────────────────────
        self.player.tick();

        // ── 3. Bonus target ──────────────────────────────────────────────────
        match self.bonus.tick(&mut self.rng) {
            BonusEvent::Spawned => tracing::debug!(frame = self.frame, "bonus target spawned"),
            BonusEvent::Escaped => tracing::debug!(frame = self.frame, "bonus target escaped"),
            BonusEvent::None => {}
        }

        // ── 4. Formation ─────────────────────────────────────────────────────
        self.formation
            .set_speed(dynamic_speed(self.formation.len(), self.level));
        let step = self.formation.advance(1, self.player.bounds.y);
        let overrun = matches!(step, Step::Descended { overrun: true });

        // ── 5. Enemy fire ────────────────────────────────────────────────────
        if let Some(muzzle) = self.enemy_gun.tick(&self.formation, &mut self.rng) {
            self.enemy_shots.spawn(muzzle);
        }

        // ── 6. Projectiles ───────────────────────────────────────────────────
        self.player_shots = self.player_shots.tick();
        self.enemy_shots = self.enemy_shots.tick();

        // ── 7. Collisions ────────────────────────────────────────────────────
        let report = collision::resolve(
            Arena {
                player: &mut self.player,
                formation: &mut self.formation,
                shields: &mut self.shields,
                bonus: &mut self.bonus,
                player_shots: &mut self.player_shots,
                enemy_shots: &mut self.enemy_shots,
            },
            &mut self.rng,
        );
        self.score += report.points;
        if let Some(reward) = report.bonus_reward {
            tracing::debug!(reward, "bonus target destroyed");
        }
        if report.lives_lost > 0 {
            tracing::info!(lives = self.player.lives, "player hit");
        }

        // ── 8. Termination ───────────────────────────────────────────────────
        if overrun {
            return self.finish(EndReason::Overrun);
        }
        if self.player.lives == 0 {
            return self.finish(EndReason::LivesDepleted);
        }

        // ── 9. Progression ───────────────────────────────────────────────────
        if self.formation.is_empty() {
            self.level_up();
            return FrameOutcome::LevelUp { level: self.level };
        }

        FrameOutcome::Running
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.formation = EnemyFormation::standard(&self.config).continue_from(&self.formation);
        self.formation.set_speed(level_speed(self.level));
        self.shields = ShieldBank::standard(&self.config);
        tracing::info!(level = self.level, score = self.score, "level cleared");
    }

    fn finish(&mut self, reason: EndReason) -> FrameOutcome {
        let final_score = self.score;
        self.status = GameStatus::GameOver {
            reason,
            final_score,
        };
        self.new_high_score = final_score > self.high_score;
        if self.new_high_score {
            self.high_score = final_score;
            self.store.save(final_score);
        }
        tracing::info!(
            ?reason,
            final_score,
            level = self.level,
            new_high_score = self.new_high_score,
            "game over"
        );
        FrameOutcome::GameOver {
            reason,
            final_score,
            new_high_score: self.new_high_score,
        }
    }
}
