use rand::rngs::StdRng;
use rand::SeedableRng;

use space_invaders::bonus::REWARD;
use space_invaders::config::GameConfig;
use space_invaders::entities::*;
use space_invaders::error::ConfigError;
use space_invaders::formation::{dynamic_speed, EnemyFormation, FULL_STRENGTH};
use space_invaders::input::FrameInput;
use space_invaders::session::*;
use space_invaders::store::{MemoryScoreStore, ScoreStore};

type TestSession = GameSession<StdRng, MemoryScoreStore>;

fn make_session() -> TestSession {
    make_session_with_store(MemoryScoreStore::default())
}

fn make_session_with_store(store: MemoryScoreStore) -> TestSession {
    GameSession::new(GameConfig::default(), StdRng::seed_from_u64(42), store).unwrap()
}

fn idle() -> FrameInput {
    FrameInput::default()
}

fn run(session: &mut TestSession, input: FrameInput, frames: usize) -> FrameOutcome {
    let mut outcome = FrameOutcome::Running;
    for _ in 0..frames {
        outcome = session.update(&input);
    }
    outcome
}

/// Put an enemy shot right above the ship so the next update lands it.
fn shoot_player(session: &mut TestSession) {
    session.enemy_shots.spawn((380, 630));
}

// ── construction ──────────────────────────────────────────────────────────────

#[test]
fn new_session_starts_at_level_one() {
    let session = make_session();
    assert_eq!(session.level, 1);
    assert_eq!(session.score, 0);
    assert_eq!(session.player.lives, 3);
    assert_eq!(session.formation.len(), FULL_STRENGTH);
    assert_eq!(session.shields.len(), 4);
    assert!(session.player_shots.is_empty());
    assert!(session.enemy_shots.is_empty());
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.frame(), 0);
}

#[test]
fn new_session_loads_high_score() {
    let session = make_session_with_store(MemoryScoreStore::with_score(1234));
    assert_eq!(session.high_score(), 1234);
}

#[test]
fn new_session_rejects_invalid_config() {
    let config = GameConfig {
        bullet_speed: 0,
        ..GameConfig::default()
    };
    let result = GameSession::new(config, StdRng::seed_from_u64(42), MemoryScoreStore::default());
    assert!(matches!(
        result.err(),
        Some(ConfigError::Invalid { field: "bullet_speed", .. })
    ));
}

// ── player control ────────────────────────────────────────────────────────────

#[test]
fn try_fire_spawns_from_muzzle() {
    let mut session = make_session();
    assert!(session.try_fire());
    assert_eq!(session.player_shots.len(), 1);
    assert_eq!(session.player_shots.as_slice()[0].bounds.x, 400);
    assert_eq!(session.player_shots.as_slice()[0].bounds.y, 640);
    assert_eq!(session.player.cooldown, 20);
    assert!(!session.try_fire());
}

#[test]
fn cooldown_ticks_in_the_firing_frame() {
    let mut session = make_session();
    session.update(&FrameInput { fire: true, ..idle() });
    assert_eq!(session.player.cooldown, 19);
}

#[test]
fn held_fire_shoots_every_twenty_frames() {
    let mut session = make_session();
    let fire = FrameInput { fire: true, ..idle() };
    run(&mut session, fire, 20);
    assert_eq!(session.player_shots.len(), 1);
    session.update(&fire);
    assert_eq!(session.player_shots.len(), 2);
}

#[test]
fn movement_is_clamped() {
    let mut session = make_session();
    run(&mut session, FrameInput { right: true, ..idle() }, 70);
    assert_eq!(session.player.bounds.x, 750);
    // 750 / 6 = 125 frames to reach the left wall.
    run(&mut session, FrameInput { left: true, ..idle() }, 130);
    assert_eq!(session.player.bounds.x, 0);
}

#[test]
fn opposite_keys_cancel_out() {
    let mut session = make_session();
    session.update(&FrameInput { left: true, right: true, ..idle() });
    assert_eq!(session.player.bounds.x, 375);
}

#[test]
fn pause_freezes_the_world() {
    let mut session = make_session();
    session.try_fire();
    let outcome = session.update(&FrameInput { pause: true, left: true, ..idle() });
    assert_eq!(outcome, FrameOutcome::Paused);
    assert_eq!(session.frame(), 0);
    assert_eq!(session.player.bounds.x, 375);
    assert_eq!(session.player_shots.as_slice()[0].bounds.y, 640);
}

// ── scoring & progression ─────────────────────────────────────────────────────

#[test]
fn shooting_an_enemy_scores_its_points() {
    let mut session = make_session();
    // Just below the top-left enemy at (70, 80); one tick moves it to y 117.
    session.player_shots.spawn((80, 125));
    assert_eq!(session.update(&idle()), FrameOutcome::Running);
    assert_eq!(session.score, 30);
    assert_eq!(session.formation.len(), FULL_STRENGTH - 1);
    assert!(session.formation.get(0).is_none());
}

#[test]
fn formation_speeds_up_as_enemies_die() {
    let mut session = make_session();
    for id in 0..20 {
        session.formation.remove(id);
    }
    session.update(&idle());
    assert_eq!(session.formation.speed(), dynamic_speed(35, 1));
    assert!(session.formation.speed() > 1.5);
}

#[test]
fn clearing_the_formation_starts_next_level() {
    let mut session = make_session();
    session.shields.resolve_hit(0);
    for id in 0..FULL_STRENGTH {
        session.formation.remove(id);
    }

    assert_eq!(session.update(&idle()), FrameOutcome::LevelUp { level: 2 });
    assert_eq!(session.level, 2);
    assert_eq!(session.formation.len(), FULL_STRENGTH);
    assert_eq!(session.shields.len(), 4);
    assert!(session.shields.as_slice().iter().all(|s| s.health == 3));
    assert_eq!(session.formation.speed(), 1.5);
}

#[test]
fn next_level_keeps_sweep_direction() {
    let mut session = make_session();
    session.formation.set_direction(-1);
    for id in 0..FULL_STRENGTH {
        session.formation.remove(id);
    }

    assert_eq!(session.update(&idle()), FrameOutcome::LevelUp { level: 2 });
    assert_eq!(session.formation.direction(), -1);
    assert_eq!(session.formation.move_timer(), 1);
}

#[test]
fn shooting_the_bonus_target() {
    let mut session = make_session();
    session.bonus.set_timer(1);
    // The target appears at (-60, 30) this frame; the shot ticks to y 40.
    session.player_shots.spawn((-10, 48));
    session.update(&idle());

    assert!(session.bonus.target().is_none());
    assert!(REWARD.contains(&session.score));
}

// ── game over ─────────────────────────────────────────────────────────────────

#[test]
fn losing_last_life_ends_the_game() {
    let mut session = make_session();
    session.player.lives = 1;
    shoot_player(&mut session);

    let outcome = session.update(&idle());
    assert_eq!(
        outcome,
        FrameOutcome::GameOver {
            reason: EndReason::LivesDepleted,
            final_score: 0,
            new_high_score: false,
        }
    );
    assert!(session.is_over());
    assert_eq!(session.player.lives, 0);
}

#[test]
fn hit_with_lives_left_keeps_playing() {
    let mut session = make_session();
    shoot_player(&mut session);
    assert_eq!(session.update(&idle()), FrameOutcome::Running);
    assert_eq!(session.player.lives, 2);
    assert!(session.player.is_invincible());
}

#[test]
fn finished_session_stops_simulating() {
    let mut session = make_session();
    session.player.lives = 1;
    shoot_player(&mut session);
    let over = session.update(&idle());
    let frame = session.frame();

    assert_eq!(session.update(&FrameInput { right: true, ..idle() }), over);
    assert_eq!(session.frame(), frame);
    assert_eq!(session.player.bounds.x, 375);
}

#[test]
fn formation_reaching_the_player_ends_the_game() {
    let mut session = make_session();
    let invader = Enemy {
        bounds: Bounds::new(750, 580, 40, 40),
        kind: EnemyKind::Small,
        points: 10,
        animation_frame: 0,
        animation_timer: 0,
    };
    session.formation = EnemyFormation::from_enemies(vec![invader], session.config());

    // One enemy left moves at the 5 steps/s cap: a step every 12 ticks.
    assert_eq!(run(&mut session, idle(), 11), FrameOutcome::Running);
    let outcome = session.update(&idle());
    assert!(matches!(
        outcome,
        FrameOutcome::GameOver { reason: EndReason::Overrun, .. }
    ));
    assert_eq!(
        session.status(),
        GameStatus::GameOver { reason: EndReason::Overrun, final_score: 0 }
    );
}

#[test]
fn beating_the_high_score_saves_it() {
    let mut session = make_session_with_store(MemoryScoreStore::with_score(500));
    session.score = 600;
    session.player.lives = 1;
    shoot_player(&mut session);

    let outcome = session.update(&idle());
    assert_eq!(
        outcome,
        FrameOutcome::GameOver {
            reason: EndReason::LivesDepleted,
            final_score: 600,
            new_high_score: true,
        }
    );
    assert_eq!(session.high_score(), 600);
    assert_eq!(session.store().load(), 600);
    assert_eq!(session.store().saves(), 1);
}

#[test]
fn lower_score_is_not_saved() {
    let mut session = make_session_with_store(MemoryScoreStore::with_score(500));
    session.score = 100;
    session.player.lives = 1;
    shoot_player(&mut session);

    session.update(&idle());
    assert_eq!(session.high_score(), 500);
    assert_eq!(session.store().saves(), 0);
}

#[test]
fn snapshot_shows_running_best() {
    let mut session = make_session_with_store(MemoryScoreStore::with_score(500));
    session.score = 700;
    let snap = session.snapshot();
    assert_eq!(snap.high_score, 700);
    assert_eq!(snap.score, 700);
    assert_eq!(snap.level, 1);
    assert_eq!(snap.world.width, 800);
    assert_eq!(session.high_score(), 500);
}

#[test]
fn reset_starts_over_and_keeps_high_score() {
    let mut session = make_session();
    session.score = 250;
    session.player.lives = 1;
    shoot_player(&mut session);
    session.update(&idle());
    assert!(session.is_over());

    session.reset();
    assert_eq!(session.status(), GameStatus::Playing);
    assert_eq!(session.score, 0);
    assert_eq!(session.level, 1);
    assert_eq!(session.player.lives, 3);
    assert_eq!(session.formation.len(), FULL_STRENGTH);
    assert_eq!(session.frame(), 0);
    assert_eq!(session.high_score(), 250);
    assert_eq!(session.update(&idle()), FrameOutcome::Running);
}

// ── determinism ───────────────────────────────────────────────────────────────

#[test]
fn enemies_open_fire_after_one_second() {
    let mut session = make_session();
    run(&mut session, idle(), 59);
    assert!(session.enemy_shots.is_empty());
    session.update(&idle());
    assert_eq!(session.enemy_shots.len(), 1);
}

#[test]
fn same_seed_same_game() {
    let mut a = make_session();
    let mut b = make_session();
    for frame in 0..400 {
        let input = FrameInput {
            fire: frame % 7 == 0,
            left: frame % 50 < 20,
            right: frame % 50 >= 30,
            pause: false,
        };
        assert_eq!(a.update(&input), b.update(&input));
    }
    assert_eq!(a.score, b.score);
    assert_eq!(a.player, b.player);
    assert_eq!(a.enemy_shots, b.enemy_shots);
    assert_eq!(a.player_shots, b.player_shots);
    assert_eq!(a.bonus, b.bonus);
    assert!(a.formation.enemies().eq(b.formation.enemies()));
}
