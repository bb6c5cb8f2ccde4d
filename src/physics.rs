/// World bounds and actor physics.
///
/// Movement happens in two steps each frame, mirroring how the update loop
/// sequences them: [`step`] integrates the actor's motion and clamps it to
/// the world, then [`collide_solid`] pushes it back out of any terrain it
/// ended up inside.

use crate::entities::Actor;
use crate::geometry::Rect;
use crate::tilemap::TileMap;

/// Downward acceleration for actors with gravity, in px/s².
pub const GRAVITY_ACCEL: f32 = 1800.0;
/// Upward speed given by a jump, in px/s.
pub const JUMP_VELOCITY: f32 = 900.0;
/// Terminal falling speed, in px/s.
pub const MAX_FALL_SPEED: f32 = 1400.0;

/// The playable area.  Sized once by level setup and never resized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct World {
    pub width: f32,
    pub height: f32,
}

impl World {
    /// Fit a level `columns` cells wide into a world no smaller than the
    /// viewport, with at least 200 px of extra height and a 520 px floor.
    pub fn for_level(columns: usize, cell_w: f32, canvas_w: f32, canvas_h: f32) -> World {
        World {
            width: canvas_w.max(columns as f32 * cell_w),
            height: (canvas_h + 200.0).max(520.0),
        }
    }

    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// With `allow_partial`, any overlap with the world counts as inside.
    pub fn contains(&self, rect: &Rect, allow_partial: bool) -> bool {
        if allow_partial {
            rect.overlaps(&self.bounds())
        } else {
            rect.x >= 0.0
                && rect.y >= 0.0
                && rect.right() <= self.width
                && rect.bottom() <= self.height
        }
    }

    pub fn on_floor(&self, rect: &Rect) -> bool {
        rect.bottom() >= self.height - 0.5
    }

    pub fn at_side(&self, rect: &Rect) -> bool {
        rect.x <= 0.0 || rect.right() >= self.width
    }
}

/// Which axes a solid collision was resolved on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Collision {
    pub x: bool,
    pub y: bool,
}

/// Integrate one frame of motion over `delta` seconds.
pub fn step(actor: &mut Actor, world: &World, delta: f32) {
    actor.last_x = actor.x;
    actor.last_y = actor.y;

    let (mx, my) = if actor.continuous_movement {
        actor.last_looked.velocity(actor.move_amount)
    } else {
        (actor.walk as f32 * actor.move_amount, 0.0)
    };
    actor.x += mx * delta;

    if actor.gravity {
        actor.vy = (actor.vy + GRAVITY_ACCEL * delta).min(MAX_FALL_SPEED);
        actor.y += actor.vy * delta;
    } else {
        actor.y += my * delta;
    }

    if actor.stay_in_world {
        clamp_to_world(actor, world);
    }
}

fn clamp_to_world(actor: &mut Actor, world: &World) {
    actor.x = actor.x.clamp(0.0, (world.width - actor.width).max(0.0));
    let floor = (world.height - actor.height).max(0.0);
    if actor.y >= floor {
        actor.y = floor;
        actor.vy = actor.vy.min(0.0);
    } else if actor.y <= 0.0 {
        actor.y = 0.0;
        actor.vy = actor.vy.max(0.0);
    }
}

/// Push `actor` out of every solid cell it overlaps.  The axis is chosen by
/// where the actor was before this frame's step: coming from above or below
/// resolves vertically, from the side horizontally.
pub fn collide_solid(actor: &mut Actor, map: &TileMap) -> Collision {
    let mut hit = Collision::default();
    let prev = Rect::new(actor.last_x, actor.last_y, actor.width, actor.height);

    for cell in map.solids_in(&actor.rect()) {
        let now = actor.rect();
        if !now.overlaps(&cell) {
            continue;
        }
        if prev.bottom() <= cell.y {
            actor.y = cell.y - actor.height;
            actor.vy = actor.vy.min(0.0);
            hit.y = true;
        } else if prev.y >= cell.bottom() {
            actor.y = cell.bottom();
            actor.vy = actor.vy.max(0.0);
            hit.y = true;
        } else if prev.right() <= cell.x {
            actor.x = cell.x - actor.width;
            hit.x = true;
        } else if prev.x >= cell.right() {
            actor.x = cell.right();
            hit.x = true;
        } else {
            // Already embedded: leave along the shallowest horizontal side.
            let push_left = now.right() - cell.x;
            let push_right = cell.right() - now.x;
            if push_left < push_right {
                actor.x -= push_left;
            } else {
                actor.x += push_right;
            }
            hit.x = true;
        }
    }
    hit
}

/// True when the actor rests on terrain or, if world-clamped, on the floor.
pub fn supported(actor: &Actor, map: &TileMap, world: &World) -> bool {
    let rect = actor.rect();
    map.standing_on(&rect) || (actor.stay_in_world && world.on_floor(&rect))
}
