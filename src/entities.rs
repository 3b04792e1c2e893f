//! All game entity types. Pure data, no game rules.
//!
//! Every movable object composes a `Bounds` instead of inheriting from a
//! shared base; collections own their entities by value.

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in world pixels (origin top-left, y grows down).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Bounds {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    pub fn center_x(&self) -> i32 {
        self.x + self.width / 2
    }

    /// Strict AABB intersection; rectangles that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Bounds) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

// ── Enums ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnemyKind {
    Small,
    Medium,
    Large,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerState {
    Normal,
    /// Damage is ignored until `remaining` ticks have elapsed.
    Invincible { remaining: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// Lives ran out.
    LivesDepleted,
    /// The formation descended onto the player's row.
    Overrun,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver { reason: EndReason, final_score: u32 },
}

// ── Player & enemies ──────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    pub bounds: Bounds,
    pub speed: i32,
    pub lives: u32,
    /// Ticks until the next shot is allowed.
    pub cooldown: u32,
    /// Ticks left on the red "just hit" tint. Cosmetic.
    pub damage_effect: u32,
    pub state: PlayerState,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub bounds: Bounds,
    pub kind: EnemyKind,
    pub points: u32,
    /// Sprite frame, 0 or 1.
    pub animation_frame: u8,
    pub animation_timer: u32,
}

// ── Obstacles & bonus ─────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Shield {
    pub bounds: Bounds,
    pub health: u32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct BonusTarget {
    pub bounds: Bounds,
    pub speed: i32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Projectile {
    pub bounds: Bounds,
    pub owner: ProjectileOwner,
    /// Pixels per tick; negative moves up the screen.
    pub velocity: i32,
}
