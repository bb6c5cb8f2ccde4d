/// Game entity types and the per-level session that owns them.

use crate::collection::Collection;
use crate::geometry::{Heading, Rect};
use crate::hud::ScoreHud;
use crate::layer::Layer;
use crate::physics::World;
use crate::sprite::{Sequence, SpriteMap};
use crate::tilemap::TileMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Paused,
    GameOver,
}

// ── Actor ─────────────────────────────────────────────────────────────────────

/// State shared by everything that moves.
#[derive(Clone, Debug, PartialEq)]
pub struct Actor {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Position before the most recent physics step.
    pub last_x: f32,
    pub last_y: f32,
    /// Vertical velocity in px/s, used only with gravity.
    pub vy: f32,
    /// Speed in px/s.
    pub move_amount: f32,
    /// Horizontal intent for actors without continuous movement: -1, 0, 1.
    pub walk: i8,
    pub last_looked: Heading,
    pub gravity: bool,
    pub stay_in_world: bool,
    /// Keep moving along `last_looked` without any input.
    pub continuous_movement: bool,
}

impl Actor {
    pub const DEFAULT_MOVE_AMOUNT: f32 = 400.0;

    /// A side-view actor: gravity on, clamped to the world, facing right.
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Actor {
        Actor {
            x,
            y,
            width,
            height,
            last_x: x,
            last_y: y,
            vy: 0.0,
            move_amount: Self::DEFAULT_MOVE_AMOUNT,
            walk: 0,
            last_looked: Heading::RIGHT,
            gravity: true,
            stay_in_world: true,
            continuous_movement: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn overlaps(&self, other: &Rect) -> bool {
        self.rect().overlaps(other)
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub actor: Actor,
    pub sprite: SpriteMap,
    /// Game time of the last shot, in ms.
    pub last_fired: Option<u64>,
}

impl Player {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Player {
        let sprite = SpriteMap::new("images/player.png", 30, 40, 75)
            .with("stand", Sequence::new(0, 5, 0, 5))
            .with("fall", Sequence::new(0, 5, 1, 5).squeezed())
            .with("left", Sequence::new(0, 0, 0, 4))
            .with("right", Sequence::new(1, 0, 1, 4))
            .with("lookLeft", Sequence::new(0, 2, 0, 2))
            .with("lookRight", Sequence::new(1, 2, 1, 2))
            .with("jumpLeft", Sequence::new(0, 4, 0, 4))
            .with("jumpRight", Sequence::new(1, 4, 1, 4));
        Player {
            actor: Actor::new(x, y, width, height),
            sprite,
            last_fired: None,
        }
    }

    /// Animation name for the player's current motion.
    pub fn animation(&self, supported: bool) -> &'static str {
        let a = &self.actor;
        match (supported, a.walk) {
            (false, w) if w < 0 => "jumpLeft",
            (false, w) if w > 0 => "jumpRight",
            (false, _) => "fall",
            (true, w) if w < 0 => "left",
            (true, w) if w > 0 => "right",
            (true, _) if a.last_looked.faces_left() => "lookLeft",
            (true, _) if a.last_looked.faces_right() => "lookRight",
            (true, _) => "stand",
        }
    }

    /// Where a bullet fired now should go.
    pub fn aim(&self) -> Heading {
        self.actor.last_looked
    }
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub actor: Actor,
    pub sprite: SpriteMap,
    /// Game time of the last reversal, in ms.  Never decreases.
    pub last_reversed: Option<u64>,
}

impl Enemy {
    pub const MOVE_AMOUNT: f32 = 100.0;

    pub fn new(body: Rect) -> Enemy {
        let mut actor = Actor::new(body.x, body.y, body.w, body.h);
        actor.move_amount = Self::MOVE_AMOUNT;
        actor.gravity = false;
        actor.continuous_movement = true;
        let sprite = SpriteMap::new("images/centipede.png", 52, 52, 75)
            .with("right", Sequence::new(0, 0, 0, 12))
            .with("left", Sequence::new(0, 0, 0, 12).flipped())
            .with("stand", Sequence::new(0, 13, 0, 13));
        Enemy { actor, sprite, last_reversed: None }
    }

    /// Switch direction, unless the last switch was less than `width`
    /// milliseconds ago.  Returns whether the direction changed.
    pub fn reverse(&mut self, now: u64) -> bool {
        let debounce = self.actor.width.max(0.0) as u64;
        if let Some(last) = self.last_reversed {
            if now <= last.saturating_add(debounce) {
                return false;
            }
        }
        self.last_reversed = Some(now);
        self.actor.last_looked = self.actor.last_looked.reversed_horizontal();
        true
    }

    pub fn animation(&self) -> &'static str {
        if self.actor.last_looked.faces_left() {
            "left"
        } else {
            "right"
        }
    }
}

// ── Bullet ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub actor: Actor,
}

impl Bullet {
    pub const SIZE: f32 = 10.0;
    /// px/s
    pub const MOVE_AMOUNT: f32 = 800.0;

    /// A bullet whose top-left corner starts at `(x, y)`.
    pub fn new(direction: Heading, x: f32, y: f32) -> Bullet {
        let mut actor = Actor::new(x, y, Self::SIZE, Self::SIZE);
        actor.move_amount = Self::MOVE_AMOUNT;
        actor.gravity = false;
        actor.continuous_movement = true;
        actor.stay_in_world = false;
        actor.last_looked = direction;
        Bullet { actor }
    }
}

// ── Static pieces ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Coin {
    pub body: Rect,
}

/// The level goal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Castle {
    pub body: Rect,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// Background layers, back to front.
#[derive(Clone, Debug)]
pub struct Backdrop {
    pub sky: Layer,
    pub hills: Layer,
    pub near_hills: Layer,
    /// Terrain and castle, drawn once at setup.
    pub geometry: Layer,
}

/// Everything belonging to one running level.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Player,
    pub enemies: Collection<Enemy>,
    pub bullets: Collection<Bullet>,
    pub coins: Collection<Coin>,
    pub solid: TileMap,
    pub castle: Castle,
    pub world: World,
    pub backdrop: Backdrop,
    pub hud: ScoreHud,
    pub status: GameStatus,
    pub fire_rate_ms: u64,
    /// Viewport size in pixels.
    pub canvas_w: f32,
    pub canvas_h: f32,
    pub frame: u64,
}

impl GameSession {
    pub fn score(&self) -> u32 {
        self.hud.score()
    }

    pub fn is_running(&self) -> bool {
        self.status == GameStatus::Playing
    }
}
