//! Rendering layer. All terminal I/O lives here.
//!
//! The simulation works in an 800×700 pixel world; this module scales
//! a `Snapshot` onto whatever terminal grid is available. No game logic is
//! performed here.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::entities::{Bounds, Enemy, EnemyKind, Projectile, ProjectileOwner, Shield};
use space_invaders::menu::Menu;
use space_invaders::session::Snapshot;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Green;
const C_PLAYER_HIT: Color = Color::Red;
const C_ENEMY_SMALL: Color = Color::Red;
const C_ENEMY_MEDIUM: Color = Color::Magenta;
const C_ENEMY_LARGE: Color = Color::Yellow;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_SHIELD: Color = Color::Cyan;
const C_BONUS: Color = Color::Magenta;
const C_HINT: Color = Color::DarkGrey;

/// Maps world pixels onto the terminal play area (inside the border,
/// rows 2 .. height-2).
#[derive(Clone, Copy)]
struct Viewport {
    cols: i32,
    rows: i32,
    world_w: i32,
    world_h: i32,
}

impl Viewport {
    fn new(term: (u16, u16), world_w: i32, world_h: i32) -> Self {
        Self {
            cols: (term.0 as i32 - 2).max(1),
            rows: (term.1 as i32 - 4).max(1),
            world_w,
            world_h,
        }
    }

    /// Terminal cell of a world point, or `None` when it falls outside.
    fn cell(&self, x: i32, y: i32) -> Option<(u16, u16)> {
        if x < 0 || y < 0 || x >= self.world_w || y >= self.world_h {
            return None;
        }
        let col = 1 + x * self.cols / self.world_w;
        let row = 2 + y * self.rows / self.world_h;
        Some((col as u16, row as u16))
    }

    fn anchor(&self, bounds: &Bounds) -> Option<(u16, u16)> {
        self.cell(bounds.center_x(), bounds.y + bounds.height / 2)
    }
}

// ── Public entry points ───────────────────────────────────────────────────────

/// Render one complete gameplay frame.
pub fn render<W: Write>(out: &mut W, snap: &Snapshot<'_>) -> std::io::Result<()> {
    let term = terminal::size()?;
    let view = Viewport::new(term, snap.world.width, snap.world.height);

    out.queue(terminal::Clear(terminal::ClearType::All))?;
    draw_border(out, term)?;
    draw_hud(out, snap, term)?;

    for shield in snap.shields {
        draw_shield(out, &view, shield)?;
    }
    for enemy in snap.formation.enemies() {
        draw_enemy(out, &view, enemy)?;
    }
    if let Some(bonus) = snap.bonus {
        if let Some((col, row)) = view.anchor(&bonus.bounds) {
            out.queue(cursor::MoveTo(col.saturating_sub(1), row))?;
            out.queue(style::SetForegroundColor(C_BONUS))?;
            out.queue(Print("<◉>"))?;
        }
    }
    for shot in snap.player_shots.iter().chain(snap.enemy_shots) {
        draw_projectile(out, &view, shot)?;
    }
    draw_player(out, &view, snap)?;
    draw_controls_hint(out, term)?;

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, term.1.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

/// Render a menu box centred on screen. When `clear` is set the screen is
/// wiped first; otherwise the box overlays the last frame.
pub fn render_menu<W: Write>(
    out: &mut W,
    menu: &Menu,
    high_score: u32,
    clear: bool,
) -> std::io::Result<()> {
    let (width, height) = terminal::size()?;
    if clear {
        out.queue(terminal::Clear(terminal::ClearType::All))?;
    }

    let cx = width / 2;
    let top = (height / 2).saturating_sub(menu.options().len() as u16 + 3);

    let title = menu.title();
    out.queue(cursor::MoveTo(
        cx.saturating_sub(title.chars().count() as u16 / 2),
        top,
    ))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print(title))?;

    if high_score > 0 {
        let hs = format!("High Score: {high_score}");
        out.queue(cursor::MoveTo(cx.saturating_sub(hs.chars().count() as u16 / 2), top + 1))?;
        out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
        out.queue(Print(&hs))?;
    }

    for (i, option) in menu.options().iter().enumerate() {
        let selected = i == menu.selected();
        let label = if selected {
            format!("> {option} <")
        } else {
            format!("  {option}  ")
        };
        let row = top + 3 + i as u16 * 2;
        out.queue(cursor::MoveTo(cx.saturating_sub(label.chars().count() as u16 / 2), row))?;
        out.queue(style::SetForegroundColor(if selected {
            Color::White
        } else {
            Color::DarkGrey
        }))?;
        out.queue(Print(label))?;
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border & HUD ──────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, term: (u16, u16)) -> std::io::Result<()> {
    let (width, height) = term;
    let w = width as usize;

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 1))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(2)))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;
    for row in 2..height.saturating_sub(2) {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(width.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

fn draw_hud<W: Write>(out: &mut W, snap: &Snapshot<'_>, term: (u16, u16)) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!(
        "Score:{:>6}  Hi:{:>6}",
        snap.score, snap.high_score
    )))?;

    let level_str = format!("[ LEVEL {} ]", snap.level);
    let lx = (term.0 / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(Color::White))?;
    out.queue(Print(&level_str))?;

    let lives_str = format!("Lives:{}", "♥".repeat(snap.player.lives as usize));
    let rx = term.0.saturating_sub(lives_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_str))?;
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, term: (u16, u16)) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, term.1.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   SPACE : Shoot   ESC/P : Pause   Q : Quit"))?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, view: &Viewport, snap: &Snapshot<'_>) -> std::io::Result<()> {
    let player = snap.player;
    // Blink at ~5 Hz while invincible.
    if player.is_invincible() && snap.frame % 12 < 6 {
        return Ok(());
    }
    let Some((col, row)) = view.anchor(&player.bounds) else {
        return Ok(());
    };
    let color = if player.damage_effect > 0 { C_PLAYER_HIT } else { C_PLAYER };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(col.saturating_sub(1), row))?;
    out.queue(Print("/▲\\"))?;
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, view: &Viewport, enemy: &Enemy) -> std::io::Result<()> {
    let Some((col, row)) = view.anchor(&enemy.bounds) else {
        return Ok(());
    };
    let (color, sprites) = match enemy.kind {
        EnemyKind::Small => (C_ENEMY_SMALL, ["/Ѡ\\", "\\Ѡ/"]),
        EnemyKind::Medium => (C_ENEMY_MEDIUM, ["{◎}", "}◎{"]),
        EnemyKind::Large => (C_ENEMY_LARGE, ["«▼»", "»▼«"]),
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(col.saturating_sub(1), row))?;
    out.queue(Print(sprites[enemy.animation_frame as usize & 1]))?;
    Ok(())
}

fn draw_shield<W: Write>(out: &mut W, view: &Viewport, shield: &Shield) -> std::io::Result<()> {
    let Some((col, row)) = view.anchor(&shield.bounds) else {
        return Ok(());
    };
    let block = match shield.health {
        3.. => "███",
        2 => "▓▓▓",
        _ => "░░░",
    };
    out.queue(style::SetForegroundColor(C_SHIELD))?;
    out.queue(cursor::MoveTo(col.saturating_sub(1), row))?;
    out.queue(Print(block))?;
    Ok(())
}

fn draw_projectile<W: Write>(out: &mut W, view: &Viewport, shot: &Projectile) -> std::io::Result<()> {
    let Some((col, row)) = view.anchor(&shot.bounds) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    match shot.owner {
        ProjectileOwner::Player => {
            out.queue(style::SetForegroundColor(C_BULLET_PLAYER))?;
            out.queue(Print("║"))?;
        }
        ProjectileOwner::Enemy => {
            out.queue(style::SetForegroundColor(C_BULLET_ENEMY))?;
            out.queue(Print("↓"))?;
        }
    }
    Ok(())
}
