/// One-time level setup: grid parsing, world sizing, entity extraction,
/// background layers and the HUD.

use std::path::Path;

use crate::assets::AssetCatalog;
use crate::canvas::Scale;
use crate::collection::Collection;
use crate::config::GameConfig;
use crate::entities::{Backdrop, Castle, Coin, Enemy, GameSession, GameStatus, Player};
use crate::error::GameError;
use crate::geometry::Rect;
use crate::hud::ScoreHud;
use crate::layer::Layer;
use crate::physics::World;
use crate::tilemap::{Tile, TileMap};

/// The built-in level.  `G` grass, `B` ground, `C`/`D` corners, `E` enemy,
/// `F` coin.
pub const DEFAULT_GRID: &str = concat!(
    "      F             F                                           FFF    C              \n",
    "      GGGGF         F     GGG              GCBBBBBBBDF     G          CB              \n",
    "          G    G        GCBBBDG E         CBBBB F BBB      B      E  CBB              \n",
    "            E  BD     GCBBBBBBBDG     GG       E         G F GGGGGGGCBBBDGGGGGGGGGGGGG",
);

pub const PLAYER_START: Rect = Rect { x: 200.0, y: 200.0, w: 60.0, h: 80.0 };
pub const HILLS_PARALLAX: f32 = 0.018;
pub const NEAR_HILLS_PARALLAX: f32 = 0.1;
pub const NEAR_HILLS_HEIGHT: f32 = 64.0;
pub const CASTLE_SIZE: f32 = 240.0;

/// The grid to play: the configured level file, or the built-in one.
pub fn load_grid(config: &GameConfig) -> Result<String, GameError> {
    match &config.level_path {
        Some(path) => read_grid(path),
        None => Ok(DEFAULT_GRID.to_string()),
    }
}

fn read_grid(path: &Path) -> Result<String, GameError> {
    std::fs::read_to_string(path).map_err(|source| GameError::LevelFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Width of a layer spanning the world plus its parallax travel on both
/// sides of the player's start.
fn parallax_width(world: &World, player_x: f32, parallax: f32) -> f32 {
    world.width + player_x * parallax + (world.width - player_x) * parallax
}

/// Build a fresh session.  `again` is true when the level is being reset
/// rather than set up for the first time.
pub fn setup(
    config: &GameConfig,
    assets: &AssetCatalog,
    grid: &str,
    canvas_w: f32,
    canvas_h: f32,
    again: bool,
) -> Result<GameSession, GameError> {
    let scale: Scale = config.scale;
    let cell = config.cell_size;

    // ── 1-2. Geometry and world size ─────────────────────────────────────────
    let mut solid = TileMap::parse(grid, cell, cell)?;
    let world = World::for_level(solid.columns(), cell, canvas_w, canvas_h);

    // ── 3. Dynamic cells out of the map ──────────────────────────────────────
    let mut enemies = Collection::new();
    for body in solid.extract(Tile::Enemy) {
        enemies.add(Enemy::new(body));
    }
    let mut coins = Collection::new();
    for body in solid.extract(Tile::Coin) {
        coins.add(Coin { body });
    }

    // ── 4. Player ────────────────────────────────────────────────────────────
    let start = PLAYER_START;
    let player = Player::new(start.x, start.y, start.w, start.h);

    // ── 5. Background layers ─────────────────────────────────────────────────
    let mut sky = Layer::new(0.0, 0.0, world.width, world.height, scale);
    sky.source = Some("images/sky.png");
    assets.paint("images/sky.png", &mut sky.canvas, &world.bounds(), false)?;

    let p = HILLS_PARALLAX;
    let w = parallax_width(&world, start.x, p);
    let hills_h = (world.height * (w / world.width) / 2.0).trunc();
    let mut hills = Layer::new(
        (-start.x * p).trunc(),
        (world.height - world.height * (w / world.width) / 2.0).trunc(),
        w,
        hills_h,
        scale,
    )
    .with_parallax(p);
    hills.source = Some("images/hills.png");
    assets.paint("images/hills.png", &mut hills.canvas, &Rect::new(0.0, 0.0, w, hills_h), false)?;

    let p = NEAR_HILLS_PARALLAX;
    let w = parallax_width(&world, start.x, p);
    let mut near_hills = Layer::new(
        (-start.x * p).trunc(),
        world.height - NEAR_HILLS_HEIGHT,
        w,
        NEAR_HILLS_HEIGHT,
        scale,
    )
    .with_parallax(p);
    near_hills.source = Some("images/hills2.png");
    assets.paint(
        "images/hills2.png",
        &mut near_hills.canvas,
        &Rect::new(0.0, 0.0, w, NEAR_HILLS_HEIGHT),
        false,
    )?;

    let mut geometry = Layer::new(0.0, 0.0, world.width, world.height, scale);
    for (row, col, tile) in solid.tiles() {
        assets.paint(tile.image(), &mut geometry.canvas, &solid.cell_rect(row, col), tile.flipped())?;
    }

    // ── 6. Castle at the right edge of the level ─────────────────────────────
    let castle = Castle {
        body: Rect::new(
            solid.columns() as f32 * cell - 320.0,
            world.height - 320.0,
            CASTLE_SIZE,
            CASTLE_SIZE,
        ),
    };
    assets.paint("images/castle.png", &mut geometry.canvas, &castle.body, false)?;

    // ── 7. HUD ───────────────────────────────────────────────────────────────
    let hud = ScoreHud::new(canvas_w, canvas_h, scale);

    if again {
        tracing::info!("level reset");
    }
    tracing::info!(
        world_w = world.width,
        world_h = world.height,
        enemies = enemies.len(),
        coins = coins.len(),
        "level set up"
    );

    Ok(GameSession {
        player,
        enemies,
        bullets: Collection::new(),
        coins,
        solid,
        castle,
        world,
        backdrop: Backdrop { sky, hills, near_hills, geometry },
        hud,
        status: GameStatus::Playing,
        fire_rate_ms: config.fire_rate_ms,
        canvas_w,
        canvas_h,
        frame: 0,
    })
}
