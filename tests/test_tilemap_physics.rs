use platformer::entities::Actor;
use platformer::error::LevelError;
use platformer::geometry::{Heading, Rect};
use platformer::physics::{self, World, GRAVITY_ACCEL};
use platformer::tilemap::{Tile, TileMap};

const CELL: f32 = 80.0;

fn map(grid: &str) -> TileMap {
    TileMap::parse(grid, CELL, CELL).unwrap()
}

// ── TileMap ───────────────────────────────────────────────────────────────────

#[test]
fn parse_pads_short_rows_and_drops_trailing_newline() {
    let m = map("G\nBBB\n");
    assert_eq!(m.rows(), 2);
    assert_eq!(m.columns(), 3);
    assert_eq!(m.get(0, 0), Some(Tile::Grass));
    assert_eq!(m.get(0, 2), None);
    assert_eq!(m.get(1, 2), Some(Tile::GrassBody));
}

#[test]
fn parse_accepts_crlf() {
    let m = map("CD\r\nEF\r\n");
    assert_eq!(m.columns(), 2);
    assert_eq!(m.get(0, 1), Some(Tile::GrassCornerFlipped));
    assert_eq!(m.get(1, 1), Some(Tile::Coin));
}

#[test]
fn parse_reports_position_of_bad_char() {
    let err = TileMap::parse("GG\nG?", CELL, CELL).unwrap_err();
    assert_eq!(err, LevelError::UnknownTile { ch: '?', row: 1, col: 1 });
}

#[test]
fn enemies_and_coins_are_not_solid() {
    let m = map("EFG");
    assert!(!m.collides(&Rect::new(10.0, 10.0, 100.0, 20.0)));
    assert!(m.collides(&Rect::new(150.0, 10.0, 20.0, 20.0)));
}

#[test]
fn extract_clears_cells_in_row_major_order() {
    let mut m = map(" F\nF F");
    let coins = m.extract(Tile::Coin);
    assert_eq!(
        coins,
        vec![
            Rect::new(80.0, 0.0, 80.0, 80.0),
            Rect::new(0.0, 80.0, 80.0, 80.0),
            Rect::new(160.0, 80.0, 80.0, 80.0),
        ]
    );
    assert_eq!(m.tiles().count(), 0);
}

#[test]
fn touching_edges_do_not_collide() {
    let m = map(" G");
    assert!(!m.collides(&Rect::new(0.0, 0.0, 80.0, 80.0)));
    assert!(m.collides(&Rect::new(0.5, 0.0, 80.0, 80.0)));
}

#[test]
fn standing_on_looks_one_pixel_down() {
    let m = map("  \n G");
    assert!(m.standing_on(&Rect::new(60.0, 0.0, 40.0, 80.0)));
    assert!(!m.standing_on(&Rect::new(0.0, 0.0, 80.0, 80.0)));
    assert!(!m.standing_on(&Rect::new(60.0, 0.0, 40.0, 70.0)));
}

// ── World ─────────────────────────────────────────────────────────────────────

#[test]
fn world_sizing() {
    let w = World::for_level(86, CELL, 800.0, 600.0);
    assert_eq!((w.width, w.height), (6880.0, 800.0));
    let w = World::for_level(2, CELL, 800.0, 100.0);
    assert_eq!((w.width, w.height), (800.0, 520.0));
}

#[test]
fn partial_containment() {
    let w = World { width: 100.0, height: 100.0 };
    let straddling = Rect::new(95.0, 10.0, 10.0, 10.0);
    assert!(w.contains(&straddling, true));
    assert!(!w.contains(&straddling, false));
    assert!(!w.contains(&Rect::new(100.0, 10.0, 10.0, 10.0), true));
}

// ── Actor physics ─────────────────────────────────────────────────────────────

#[test]
fn gravity_accelerates_and_clamps_to_floor() {
    let world = World { width: 1000.0, height: 500.0 };
    let mut a = Actor::new(0.0, 0.0, 10.0, 10.0);
    physics::step(&mut a, &world, 0.5);
    assert_eq!(a.vy, GRAVITY_ACCEL * 0.5);
    assert_eq!(a.y, GRAVITY_ACCEL * 0.25);

    for _ in 0..10 {
        physics::step(&mut a, &world, 0.5);
    }
    assert_eq!(a.y, 490.0);
    assert_eq!(a.vy, 0.0);
}

#[test]
fn continuous_actor_moves_along_heading() {
    let world = World { width: 1000.0, height: 500.0 };
    let mut a = Actor::new(100.0, 100.0, 10.0, 10.0);
    a.gravity = false;
    a.continuous_movement = true;
    a.move_amount = 100.0;
    a.last_looked = Heading::LEFT;
    physics::step(&mut a, &world, 0.5);
    assert_eq!((a.x, a.y), (50.0, 100.0));
    assert_eq!((a.last_x, a.last_y), (100.0, 100.0));
}

#[test]
fn unclamped_actor_leaves_world() {
    let world = World { width: 100.0, height: 100.0 };
    let mut a = Actor::new(95.0, 50.0, 10.0, 10.0);
    a.gravity = false;
    a.continuous_movement = true;
    a.stay_in_world = false;
    physics::step(&mut a, &world, 1.0);
    assert_eq!(a.x, 495.0);
}

#[test]
fn landing_resolves_vertically() {
    let m = map("  \n  \nGG");
    let mut a = Actor::new(10.0, 70.0, 40.0, 80.0); // bottom at 150
    a.last_y = 70.0;
    a.y = 100.0; // bottom at 180, inside the ground row
    a.vy = 300.0;
    let hit = physics::collide_solid(&mut a, &m);
    assert!(hit.y && !hit.x);
    assert_eq!(a.y, 80.0);
    assert_eq!(a.vy, 0.0);
}

#[test]
fn wall_resolves_horizontally() {
    let m = map("  G");
    let mut a = Actor::new(110.0, 10.0, 40.0, 40.0); // right edge at 150
    a.x = 130.0; // right edge at 170, inside the wall
    let hit = physics::collide_solid(&mut a, &m);
    assert!(hit.x && !hit.y);
    assert_eq!(a.x, 120.0);
}

#[test]
fn supported_by_floor_or_terrain() {
    let world = World { width: 400.0, height: 400.0 };
    let m = map("  \n G");
    let on_ground = Actor::new(80.0, 0.0, 40.0, 80.0);
    assert!(physics::supported(&on_ground, &m, &world));

    let on_floor = Actor::new(0.0, 320.0, 40.0, 80.0);
    assert!(physics::supported(&on_floor, &m, &world));

    let airborne = Actor::new(0.0, 100.0, 40.0, 80.0);
    assert!(!physics::supported(&airborne, &m, &world));
}
