/// Rendering layer: all terminal I/O lives here.
///
/// Each function receives a mutable writer and an immutable view of the
/// game.  No game logic is performed; this module only translates a
/// composed canvas plus status overlays into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use platformer::canvas::{Canvas, Rgba};
use platformer::entities::{GameSession, GameStatus};

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HINT: Color = Color::DarkGrey;
const C_BACKDROP: Rgba = Rgba::BLACK;

fn to_color(c: Rgba) -> Color {
    let flat = if c.is_opaque() { c } else { c.over(C_BACKDROP) };
    Color::Rgb { r: flat.r, g: flat.g, b: flat.b }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    frame: &Canvas,
    session: &GameSession,
    height: u16,
) -> std::io::Result<()> {
    draw_canvas(out, frame)?;
    draw_controls_hint(out, frame, height)?;

    match session.status {
        GameStatus::Paused => draw_banner(out, frame, &[("PAUSED", Color::White)])?,
        GameStatus::GameOver => draw_game_over(out, frame, session)?,
        GameStatus::Playing => {}
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Canvas ────────────────────────────────────────────────────────────────────

fn draw_canvas<W: Write>(out: &mut W, frame: &Canvas) -> std::io::Result<()> {
    for row in 0..frame.rows() {
        out.queue(cursor::MoveTo(0, row as u16))?;
        let mut fg: Option<Color> = None;
        let mut bg: Option<Color> = None;
        let mut run = String::new();

        for col in 0..frame.cols() {
            let Some(cell) = frame.get(col, row) else { continue };
            let cell_fg = to_color(cell.fg);
            let cell_bg = cell.bg.map(to_color).unwrap_or(Color::Reset);
            if fg != Some(cell_fg) || bg != Some(cell_bg) {
                if !run.is_empty() {
                    out.queue(Print(&run))?;
                    run.clear();
                }
                out.queue(style::SetForegroundColor(cell_fg))?;
                out.queue(style::SetBackgroundColor(cell_bg))?;
                fg = Some(cell_fg);
                bg = Some(cell_bg);
            }
            run.push(cell.ch);
        }
        if !run.is_empty() {
            out.queue(Print(&run))?;
        }
        out.queue(style::ResetColor)?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, frame: &Canvas, height: u16) -> std::io::Result<()> {
    let row = (frame.rows() as u16).min(height.saturating_sub(1));
    out.queue(cursor::MoveTo(1, row))?;
    out.queue(terminal::Clear(terminal::ClearType::CurrentLine))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   ↑ / W : Jump   SPACE : Shoot   P : Pause   Q : Quit"))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(
    out: &mut W,
    frame: &Canvas,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = frame.cols() as u16 / 2;
    let start_row = (frame.rows() as u16 / 2).saturating_sub(lines.len() as u16 / 2);

    for (i, (msg, color)) in lines.iter().enumerate() {
        let row = start_row + i as u16;
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetBackgroundColor(Color::Black))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_game_over<W: Write>(
    out: &mut W,
    frame: &Canvas,
    session: &GameSession,
) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", session.score());
    let lines: &[(&str, Color)] = &[
        ("╔══════════════════╗", Color::Red),
        ("║    GAME  OVER    ║", Color::Red),
        ("╚══════════════════╝", Color::Red),
        (&score_line, Color::Yellow),
        ("R - Play Again  Q - Quit", Color::White),
    ];
    draw_banner(out, frame, lines)
}

// ── Title screen ──────────────────────────────────────────────────────────────

pub fn draw_title<W: Write>(out: &mut W) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    let (width, height) = terminal::size()?;
    let cx = width / 2;
    let cy = height / 2;

    let lines: &[(&str, Color, i32)] = &[
        ("★  COIN  RUNNER  ★", Color::Cyan, -4),
        ("Collect coins (+1), shoot centipedes (+10),", Color::White, -2),
        ("and reach the castle.", Color::White, -1),
        ("ENTER : Start   Q : Quit", Color::Yellow, 1),
        ("← → / A D : Move   ↑ / W : Jump   SPACE : Shoot", C_HINT, 3),
    ];
    for (msg, color, dy) in lines {
        let row = (cy as i32 + dy).max(0) as u16;
        out.queue(cursor::MoveTo(cx.saturating_sub(msg.chars().count() as u16 / 2), row))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }

    out.queue(style::ResetColor)?;
    out.flush()?;
    Ok(())
}
