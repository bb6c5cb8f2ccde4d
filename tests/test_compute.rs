use platformer::assets::{AssetCatalog, PRELOADABLES};
use platformer::compute::*;
use platformer::config::GameConfig;
use platformer::entities::*;
use platformer::geometry::Heading;
use platformer::input::FrameInput;
use platformer::level;

const WIDTH: usize = 20;

/// Pad every row to `WIDTH` columns and join them into a level grid.
fn grid(rows: &[&str]) -> String {
    rows.iter()
        .map(|r| format!("{:<width$}", r, width = WIDTH))
        .collect::<Vec<_>>()
        .join("\n")
}

fn session_from(rows: &[&str]) -> GameSession {
    let config = GameConfig::default();
    let assets = AssetCatalog::preload(PRELOADABLES, None, 1).unwrap();
    level::setup(&config, &assets, &grid(rows), 800.0, 600.0, false).unwrap()
}

fn empty_session() -> GameSession {
    session_from(&["", "", "", ""])
}

fn idle() -> FrameInput {
    FrameInput::default()
}

// ── fire_bullet ───────────────────────────────────────────────────────────────

#[test]
fn fire_spawns_bullet_at_player_centre() {
    let mut s = empty_session(); // player at (200, 200), 60x80
    assert!(fire_bullet(&mut s, 1000));
    assert_eq!(s.bullets.len(), 1);
    let b = s.bullets.iter().next().unwrap();
    assert_eq!(b.actor.x, 230.0);
    assert_eq!(b.actor.y, 240.0);
    assert_eq!(b.actor.last_looked, Heading::RIGHT);
    assert!(!b.actor.gravity);
    assert!(!b.actor.stay_in_world);
}

#[test]
fn fire_is_throttled_by_fire_rate() {
    let mut s = empty_session();
    assert!(fire_bullet(&mut s, 1000));
    assert!(!fire_bullet(&mut s, 1100)); // too soon
    assert!(!fire_bullet(&mut s, 1250)); // must be strictly later
    assert!(fire_bullet(&mut s, 1251));
    assert_eq!(s.bullets.len(), 2);
}

#[test]
fn zero_fire_rate_disables_throttling() {
    let mut s = empty_session();
    s.fire_rate_ms = 0;
    assert!(fire_bullet(&mut s, 1000));
    assert!(fire_bullet(&mut s, 1000));
    assert_eq!(s.bullets.len(), 2);
}

#[test]
fn huge_fire_rate_blocks_further_shots() {
    let mut s = empty_session();
    s.fire_rate_ms = u64::MAX;
    assert!(fire_bullet(&mut s, 1000));
    assert!(!fire_bullet(&mut s, 2000));
    assert!(!fire_bullet(&mut s, u64::MAX));
    assert_eq!(s.bullets.len(), 1);
}

#[test]
fn fire_uses_last_look_direction() {
    let mut s = empty_session();
    s.player.actor.last_looked = Heading::LEFT;
    fire_bullet(&mut s, 0);
    assert_eq!(s.bullets.iter().next().unwrap().actor.last_looked, Heading::LEFT);
}

#[test]
fn no_fire_unless_playing() {
    let mut s = empty_session();
    toggle_pause(&mut s);
    assert!(!fire_bullet(&mut s, 1000));
    s.status = GameStatus::GameOver;
    assert!(!fire_bullet(&mut s, 2000));
    assert!(s.bullets.is_empty());
}

// ── update: player ────────────────────────────────────────────────────────────

#[test]
fn player_falls_to_world_floor() {
    let mut s = empty_session();
    for i in 0..60 {
        update(&mut s, idle(), 0.05, i * 50);
    }
    assert_eq!(s.player.actor.y, s.world.height - s.player.actor.height);
    assert_eq!(s.player.actor.vy, 0.0);
}

#[test]
fn player_lands_on_terrain() {
    // Ground under the player's start at row 4 (y = 320).
    let mut s = session_from(&["", "", "", "", "  GG"]);
    for i in 0..40 {
        update(&mut s, idle(), 0.05, i * 50);
    }
    assert_eq!(s.player.actor.y, 320.0 - 80.0);
}

#[test]
fn player_walks_and_faces_left() {
    let mut s = empty_session();
    let input = FrameInput { left: true, ..FrameInput::default() };
    update(&mut s, input, 0.1, 100);
    assert_eq!(s.player.actor.x, 160.0); // 400 px/s for 0.1 s
    assert_eq!(s.player.actor.last_looked, Heading::LEFT);
}

#[test]
fn player_jumps_only_when_supported() {
    let mut s = empty_session();
    let jump = FrameInput { up: true, ..FrameInput::default() };
    // Mid-air at start: no jump.
    update(&mut s, jump, 0.01, 10);
    assert!(s.player.actor.vy > 0.0);

    for i in 0..60 {
        update(&mut s, idle(), 0.05, 100 + i * 50);
    }
    update(&mut s, jump, 0.01, 5000);
    assert!(s.player.actor.vy < 0.0);
    assert!(s.player.actor.y < s.world.height - s.player.actor.height);
}

#[test]
fn hills_scroll_with_player_displacement() {
    let mut s = empty_session();
    let hills_x = s.backdrop.hills.x;
    let near_x = s.backdrop.near_hills.x;
    let input = FrameInput { right: true, ..FrameInput::default() };
    update(&mut s, input, 0.1, 100); // player moves 40 px
    assert!((s.backdrop.hills.x - (hills_x - 40.0 * 0.018)).abs() < 1e-3);
    assert!((s.backdrop.near_hills.x - (near_x - 40.0 * 0.1)).abs() < 1e-3);
}

// ── update: enemies ───────────────────────────────────────────────────────────

#[test]
fn enemy_reverses_at_wall() {
    // Enemy at col 10 on ground, wall at col 12.
    let mut s = session_from(&["", "", "          E G", "         GGGGG"]);
    for i in 1..=10 {
        update(&mut s, idle(), 0.1, i * 100);
    }
    let enemy = s.enemies.iter().next().unwrap();
    assert_eq!(enemy.actor.last_looked, Heading::LEFT);
    assert!(enemy.actor.x + enemy.actor.width <= 960.0);
}

#[test]
fn enemy_reverses_at_ledge() {
    // One-cell platform under the enemy.
    let mut s = session_from(&["", "", "          E", "          G"]);
    for i in 1..=9 {
        update(&mut s, idle(), 0.1, i * 100);
    }
    let enemy = s.enemies.iter().next().unwrap();
    assert_eq!(enemy.actor.last_looked, Heading::LEFT);
    assert!(enemy.actor.x < 880.0);
}

#[test]
fn enemy_touching_player_ends_game() {
    // Enemy cell overlaps the player's start rectangle.
    let mut s = session_from(&["", "", "  E", ""]);
    let events = update(&mut s, idle(), 0.01, 10);
    assert_eq!(s.status, GameStatus::GameOver);
    assert!(events.contains(&FrameEvent::PlayerCaught));

    // Nothing moves once the game is over.
    let frame = s.frame;
    assert!(update(&mut s, idle(), 0.01, 20).is_empty());
    assert_eq!(s.frame, frame);
}

// ── update: bullets ───────────────────────────────────────────────────────────

#[test]
fn bullet_kills_enemy_once() {
    let mut s = session_from(&["", "", "      E", ""]); // enemy at x 480..560
    s.bullets.add(Bullet::new(Heading::RIGHT, 470.0, 200.0));
    let events = update(&mut s, idle(), 0.02, 1000);

    assert_eq!(events, vec![FrameEvent::EnemyKilled { points: 10 }]);
    assert_eq!(s.score(), 10);
    assert!(s.enemies.is_empty());
    assert!(s.bullets.is_empty());
}

#[test]
fn two_bullets_on_one_enemy_score_once() {
    let mut s = session_from(&["", "", "      E", ""]);
    s.bullets.add(Bullet::new(Heading::RIGHT, 470.0, 200.0));
    s.bullets.add(Bullet::new(Heading::RIGHT, 470.0, 210.0));
    update(&mut s, idle(), 0.02, 1000);

    assert_eq!(s.score(), 10);
    assert!(s.enemies.is_empty());
    // The second bullet found nothing to hit and keeps flying.
    assert_eq!(s.bullets.len(), 1);
    assert_eq!(s.bullets.iter().next().unwrap().actor.y, 210.0);
}

#[test]
fn bullet_destroyed_by_terrain() {
    let mut s = session_from(&["", "     G"]); // solid at x 400..480, y 80..160
    s.bullets.add(Bullet::new(Heading::RIGHT, 390.0, 100.0));
    update(&mut s, idle(), 0.02, 1000);
    assert!(s.bullets.is_empty());
    assert_eq!(s.score(), 0);
}

#[test]
fn bullet_destroyed_when_wholly_outside_world() {
    let mut s = empty_session(); // world is 1600 px wide
    s.bullets.add(Bullet::new(Heading::RIGHT, 1585.0, 100.0));
    update(&mut s, idle(), 0.01, 1000); // 8 px: still partly inside
    assert_eq!(s.bullets.len(), 1);
    update(&mut s, idle(), 0.1, 1100);
    assert!(s.bullets.is_empty());

    // Not updated any more once gone.
    update(&mut s, idle(), 0.1, 1200);
    assert!(s.bullets.is_empty());
}

#[test]
fn bullet_in_open_air_keeps_flying() {
    let mut s = empty_session();
    s.bullets.add(Bullet::new(Heading::LEFT, 600.0, 100.0));
    update(&mut s, idle(), 0.1, 1000);
    let b = s.bullets.iter().next().unwrap();
    assert_eq!(b.actor.x, 520.0);
    assert_eq!(b.actor.y, 100.0);
}

// ── update: coins & castle ────────────────────────────────────────────────────

#[test]
fn coin_collected_once() {
    let mut s = session_from(&["", "", "  F", ""]);
    assert_eq!(s.coins.len(), 1);
    update(&mut s, idle(), 0.01, 10);
    assert_eq!(s.score(), 1);
    assert!(s.coins.is_empty());
    update(&mut s, idle(), 0.01, 20);
    assert_eq!(s.score(), 1);
}

#[test]
fn castle_ends_game() {
    let mut s = empty_session();
    let castle = s.castle.body;
    s.player.actor.x = castle.x + 10.0;
    s.player.actor.y = castle.y + 100.0;
    let events = update(&mut s, idle(), 0.01, 10);
    assert_eq!(s.status, GameStatus::GameOver);
    assert_eq!(events.last(), Some(&FrameEvent::CastleReached));
}

// ── pause ─────────────────────────────────────────────────────────────────────

#[test]
fn paused_session_does_not_advance() {
    let mut s = empty_session();
    toggle_pause(&mut s);
    assert_eq!(s.status, GameStatus::Paused);
    let y = s.player.actor.y;
    assert!(update(&mut s, idle(), 0.1, 100).is_empty());
    assert_eq!(s.player.actor.y, y);
    toggle_pause(&mut s);
    assert_eq!(s.status, GameStatus::Playing);
}

#[test]
fn pause_does_not_revive_finished_game() {
    let mut s = empty_session();
    s.status = GameStatus::GameOver;
    toggle_pause(&mut s);
    assert_eq!(s.status, GameStatus::GameOver);
}

// ── end to end ────────────────────────────────────────────────────────────────

#[test]
fn three_coins_and_one_kill_score_thirteen() {
    // Coins overlapping the player's start, enemy further right.
    let mut s = session_from(&["", "", "  FF  E", "  F"]);
    assert_eq!(s.score(), 0);

    update(&mut s, idle(), 0.01, 10);
    assert_eq!(s.score(), 3);

    s.bullets.add(Bullet::new(Heading::RIGHT, 470.0, 200.0));
    update(&mut s, idle(), 0.02, 30);
    assert_eq!(s.score(), 13);
    assert_eq!(s.hud.text(), "Score: 13");
    assert!(s.hud.layer.canvas.row_text(0).contains("Score: 13"));
}
