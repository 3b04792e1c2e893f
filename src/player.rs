//! Player ship rules: clamped movement, fire cooldown and the
//! Normal → Invincible damage state machine.

use crate::config::GameConfig;
use crate::entities::{Bounds, Player, PlayerState};

pub const STARTING_LIVES: u32 = 3;
/// Gap between the ship's bottom edge and the bottom of the window.
pub const BOTTOM_MARGIN: i32 = 20;
pub const INVINCIBLE_TICKS: u32 = 120;
pub const DAMAGE_EFFECT_TICKS: u32 = 30;

impl Player {
    /// Centered horizontally, `BOTTOM_MARGIN` above the floor.
    pub fn spawn(config: &GameConfig) -> Self {
        let size = config.player_size;
        Player {
            bounds: Bounds::new(
                (config.window.width - size.width) / 2,
                config.window.height - size.height - BOTTOM_MARGIN,
                size.width,
                size.height,
            ),
            speed: config.player_speed,
            lives: STARTING_LIVES,
            cooldown: 0,
            damage_effect: 0,
            state: PlayerState::Normal,
        }
    }

    /// Shift by `direction * speed`, clamped to `[0, screen_width - width]`.
    pub fn move_by(&mut self, direction: i32, screen_width: i32) {
        let max_x = screen_width - self.bounds.width;
        let dx = direction.saturating_mul(self.speed);
        self.bounds.x = self.bounds.x.saturating_add(dx).clamp(0, max_x);
    }

    pub fn can_fire(&self) -> bool {
        self.cooldown == 0
    }

    /// Where a fresh shot appears: center of the ship's top edge.
    pub fn muzzle(&self) -> (i32, i32) {
        (self.bounds.center_x(), self.bounds.y)
    }

    pub fn is_invincible(&self) -> bool {
        matches!(self.state, PlayerState::Invincible { .. })
    }

    /// Apply one hit. Returns `true` if a life was lost; hits taken while
    /// invincible are ignored entirely.
    pub fn take_damage(&mut self) -> bool {
        if self.is_invincible() {
            return false;
        }
        debug_assert!(self.lives > 0, "damage applied to a player with no lives");
        self.lives = self.lives.saturating_sub(1);
        self.damage_effect = DAMAGE_EFFECT_TICKS;
        self.state = PlayerState::Invincible {
            remaining: INVINCIBLE_TICKS,
        };
        true
    }

    /// Per-frame countdown of cooldown, damage tint and invincibility.
    pub fn tick(&mut self) {
        self.cooldown = self.cooldown.saturating_sub(1);
        self.damage_effect = self.damage_effect.saturating_sub(1);
        if let PlayerState::Invincible { remaining } = self.state {
            let remaining = remaining.saturating_sub(1);
            self.state = if remaining == 0 {
                PlayerState::Normal
            } else {
                PlayerState::Invincible { remaining }
            };
        }
    }
}
