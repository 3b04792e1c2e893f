//! Per-frame hit resolution.
//!
//! Passes run in a fixed order and each one marks what it consumed, so a
//! projectile or enemy can only be counted once per frame:
//!
//! 1. player shots × enemies
//! 2. enemy shots × player
//! 3. player shots × bonus target
//! 4. player shots × shields
//! 5. enemy shots × shields
//!
//! The projectile sets are rebuilt from their unconsumed shots at the end.

use rand::Rng;

use crate::bonus::BonusSpawner;
use crate::entities::{Enemy, Player, Projectile};
use crate::formation::{EnemyFormation, EnemyId};
use crate::projectiles::ProjectileSet;
use crate::shields::ShieldBank;

/// Everything collision resolution may mutate, borrowed from the session.
pub struct Arena<'a> {
    pub player: &'a mut Player,
    pub formation: &'a mut EnemyFormation,
    pub shields: &'a mut ShieldBank,
    pub bonus: &'a mut BonusSpawner,
    pub player_shots: &'a mut ProjectileSet,
    pub enemy_shots: &'a mut ProjectileSet,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    pub destroyed: Vec<Enemy>,
    /// Points from destroyed enemies plus any bonus reward.
    pub points: u32,
    /// Enemy shots that touched the player, whether or not they hurt.
    pub player_hits: u32,
    /// Lives actually lost this frame.
    pub lives_lost: u32,
    pub bonus_reward: Option<u32>,
    pub shield_hits: u32,
    pub shields_destroyed: u32,
}

pub fn resolve<R: Rng + ?Sized>(arena: Arena<'_>, rng: &mut R) -> CollisionReport {
    let mut report = CollisionReport::default();
    let mut player_used = vec![false; arena.player_shots.len()];
    let mut enemy_used = vec![false; arena.enemy_shots.len()];

    // ── 1. Player shots ↔ enemies ────────────────────────────────────────────
    let kills: Vec<(usize, EnemyId)> = {
        let mut killed: Vec<EnemyId> = Vec::new();
        let mut kills = Vec::new();
        for (si, shot) in arena.player_shots.as_slice().iter().enumerate() {
            let target = arena
                .formation
                .iter()
                .find(|(id, enemy)| !killed.contains(id) && shot.bounds.overlaps(&enemy.bounds))
                .map(|(id, _)| id);
            if let Some(id) = target {
                killed.push(id);
                kills.push((si, id));
            }
        }
        kills
    };
    for (si, id) in kills {
        player_used[si] = true;
        if let Some(enemy) = arena.formation.remove(id) {
            report.points += enemy.points;
            report.destroyed.push(enemy);
        }
    }

    // ── 2. Enemy shots ↔ player ──────────────────────────────────────────────
    for (si, shot) in arena.enemy_shots.as_slice().iter().enumerate() {
        if shot.bounds.overlaps(&arena.player.bounds) {
            enemy_used[si] = true;
            report.player_hits += 1;
            if arena.player.lives > 0 && arena.player.take_damage() {
                report.lives_lost += 1;
            }
        }
    }

    // ── 3. Player shots ↔ bonus target ───────────────────────────────────────
    if let Some(target) = arena.bonus.target().map(|t| t.bounds) {
        let hit = first_unused(arena.player_shots.as_slice(), &player_used, |shot| {
            shot.bounds.overlaps(&target)
        });
        if let Some(si) = hit {
            player_used[si] = true;
            if let Some(reward) = arena.bonus.hit(rng) {
                report.points += reward;
                report.bonus_reward = Some(reward);
            }
        }
    }

    // ── 4. Player shots ↔ shields ────────────────────────────────────────────
    hit_shields(&mut *arena.shields, arena.player_shots.as_slice(), &mut player_used, &mut report);

    // ── 5. Enemy shots ↔ shields ─────────────────────────────────────────────
    hit_shields(&mut *arena.shields, arena.enemy_shots.as_slice(), &mut enemy_used, &mut report);

    *arena.player_shots = arena.player_shots.without(&player_used);
    *arena.enemy_shots = arena.enemy_shots.without(&enemy_used);

    report
}

/// Each shield absorbs at most the first unconsumed shot touching it.
fn hit_shields(
    shields: &mut ShieldBank,
    shots: &[Projectile],
    used: &mut [bool],
    report: &mut CollisionReport,
) {
    let mut hit_indices = Vec::new();
    for (index, shield) in shields.as_slice().iter().enumerate() {
        let hit = first_unused(shots, used, |shot| shot.bounds.overlaps(&shield.bounds));
        if let Some(si) = hit {
            used[si] = true;
            hit_indices.push(index);
        }
    }

    // Highest index first so removals don't shift pending indices.
    for index in hit_indices.into_iter().rev() {
        report.shield_hits += 1;
        if shields.resolve_hit(index) {
            report.shields_destroyed += 1;
        }
    }
}

fn first_unused(
    shots: &[Projectile],
    used: &[bool],
    mut hits: impl FnMut(&Projectile) -> bool,
) -> Option<usize> {
    shots
        .iter()
        .enumerate()
        .find(|(si, shot)| !used[*si] && hits(*shot))
        .map(|(si, _)| si)
}
