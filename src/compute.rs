/// Per-frame game logic.
///
/// Every function takes the session mutably plus the current game time in
/// milliseconds, so callers control the clock (tests pass fixed values).
/// Nothing here touches the terminal.

use crate::entities::{Bullet, GameSession, GameStatus};
use crate::geometry::Heading;
use crate::input::FrameInput;
use crate::physics::{self, JUMP_VELOCITY};

pub const ENEMY_KILL_POINTS: u32 = 10;
pub const COIN_POINTS: u32 = 1;

/// Notable outcomes of one frame, in the order they happened.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameEvent {
    EnemyKilled { points: u32 },
    CoinCollected { points: u32 },
    PlayerCaught,
    CastleReached,
}

// ── Input-driven transitions ─────────────────────────────────────────────────

/// Fire a bullet from the player's centre in the direction it last looked.
/// Throttled by the session's fire rate and ignored unless playing.
pub fn fire_bullet(session: &mut GameSession, now: u64) -> bool {
    if !session.is_running() {
        return false;
    }
    let ready = match session.player.last_fired {
        Some(_) if session.fire_rate_ms == 0 => true,
        Some(last) => now > last.saturating_add(session.fire_rate_ms),
        None => true,
    };
    if !ready {
        return false;
    }
    session.player.last_fired = Some(now);

    let a = &session.player.actor;
    let x = a.x + a.width * 0.5;
    let y = a.y + a.height * 0.5;
    session.bullets.add(Bullet::new(session.player.aim(), x, y));
    tracing::trace!(x, y, bullets = session.bullets.len(), "bullet fired");
    true
}

/// Toggle between playing and paused.  Has no effect after game over.
pub fn toggle_pause(session: &mut GameSession) {
    session.status = match session.status {
        GameStatus::Playing => GameStatus::Paused,
        GameStatus::Paused => GameStatus::Playing,
        GameStatus::GameOver => GameStatus::GameOver,
    };
    tracing::info!(status = ?session.status, "pause toggled");
}

fn game_over(session: &mut GameSession, events: &mut Vec<FrameEvent>, event: FrameEvent) {
    if session.status != GameStatus::GameOver {
        tracing::info!(score = session.score(), cause = ?event, "game over");
    }
    session.status = GameStatus::GameOver;
    events.push(event);
}

// ── Per-frame update ─────────────────────────────────────────────────────────

/// Advance the level by `delta` seconds.  `now` is the game time in ms.
pub fn update(
    session: &mut GameSession,
    input: FrameInput,
    delta: f32,
    now: u64,
) -> Vec<FrameEvent> {
    let mut events = Vec::new();
    if !session.is_running() {
        return events;
    }
    session.frame += 1;
    let anim_ms = (delta * 1000.0).round().max(0.0) as u64;

    update_player(session, input, delta, anim_ms);

    // ── 2. Parallax ──────────────────────────────────────────────────────────
    let dx = session.player.actor.x - session.player.actor.last_x;
    session.backdrop.hills.scroll(dx, 0.0);
    session.backdrop.near_hills.scroll(dx, 0.0);

    update_enemies(session, delta, now, anim_ms, &mut events);
    update_bullets(session, delta, &mut events);
    collect_coins(session, &mut events);

    // ── 6. Goal ──────────────────────────────────────────────────────────────
    if session.player.actor.overlaps(&session.castle.body) {
        game_over(session, &mut events, FrameEvent::CastleReached);
    }

    events
}

fn update_player(session: &mut GameSession, input: FrameInput, delta: f32, anim_ms: u64) {
    let GameSession { player, solid, world, .. } = session;
    let supported = physics::supported(&player.actor, solid, world);

    let a = &mut player.actor;
    a.walk = input.horizontal();
    if input.up && supported {
        a.vy = -JUMP_VELOCITY;
    }
    // Look where the player is steering; keep the old heading when idle.
    if let Some(heading) = Heading::from_axes(input.horizontal(), input.vertical()) {
        a.last_looked = heading;
    }

    physics::step(a, world, delta);
    physics::collide_solid(a, solid);

    let supported = physics::supported(&player.actor, solid, world);
    let animation = player.animation(supported);
    player.sprite.use_animation(animation);
    player.sprite.advance(anim_ms);
}

fn update_enemies(
    session: &mut GameSession,
    delta: f32,
    now: u64,
    anim_ms: u64,
    events: &mut Vec<FrameEvent>,
) {
    let GameSession { enemies, solid, world, player, .. } = session;
    let player_rect = player.actor.rect();
    let mut caught = false;

    for enemy in enemies.iter_mut() {
        // Turn around at the edge of a platform.
        let resting_on_floor = enemy.actor.stay_in_world && world.on_floor(&enemy.actor.rect());
        if !solid.standing_on(&enemy.actor.rect()) && !resting_on_floor {
            enemy.reverse(now);
        }

        physics::step(&mut enemy.actor, world, delta);

        // Turn around at walls and at the sides of the world.
        if physics::collide_solid(&mut enemy.actor, solid).x {
            enemy.reverse(now);
        } else if enemy.actor.stay_in_world && world.at_side(&enemy.actor.rect()) {
            enemy.reverse(now);
        }

        let animation = enemy.animation();
        enemy.sprite.use_animation(animation);
        enemy.sprite.advance(anim_ms);

        if enemy.actor.overlaps(&player_rect) {
            caught = true;
        }
    }

    if caught {
        game_over(session, events, FrameEvent::PlayerCaught);
    }
}

/// Bullets resolve in insertion order and each kills at most the first
/// enemy it overlaps.  A killed enemy leaves the collection at once, so a
/// second bullet overlapping it in the same frame scores nothing.
fn update_bullets(session: &mut GameSession, delta: f32, events: &mut Vec<FrameEvent>) {
    let GameSession { bullets, enemies, solid, world, hud, .. } = session;

    let spent = bullets.sweep(|bullet| {
        physics::step(&mut bullet.actor, world, delta);
        let body = bullet.actor.rect();

        let killed = enemies.remove_first(|e| e.actor.overlaps(&body));
        if killed.is_some() {
            hud.increase_score(ENEMY_KILL_POINTS);
            events.push(FrameEvent::EnemyKilled { points: ENEMY_KILL_POINTS });
            tracing::trace!(x = body.x, y = body.y, "enemy shot");
        }

        killed.is_some() || solid.collides(&body) || !world.contains(&body, true)
    });
    if !spent.is_empty() {
        tracing::trace!(count = spent.len(), "bullets destroyed");
    }
}

fn collect_coins(session: &mut GameSession, events: &mut Vec<FrameEvent>) {
    let GameSession { coins, player, hud, .. } = session;
    let player_rect = player.actor.rect();

    let collected = coins.sweep(|coin| coin.body.overlaps(&player_rect));
    for _ in &collected {
        hud.increase_score(COIN_POINTS);
        events.push(FrameEvent::CoinCollected { points: COIN_POINTS });
    }
}
