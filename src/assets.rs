/// Image assets.
///
/// Each image path the level uses resolves to a terminal rendition: a
/// procedural fill or a small glyph drawing.  [`AssetCatalog::preload`]
/// resolves the whole preload list up front so a bad path fails before the
/// first frame rather than in the middle of one.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::canvas::{Canvas, Cell, Rgba};
use crate::error::AssetError;
use crate::geometry::Rect;
use crate::sprite::SpriteMap;

/// Every image the level needs before play starts.
pub const PRELOADABLES: &[&str] = &[
    "images/sky.png",
    "images/hills.png",
    "images/hills2.png",
    "images/player.png",
    "images/grass2.png",
    "images/grass2body.png",
    "images/grass2corner.png",
    "images/centipede.png",
    "images/castle.png",
    "images/coin.png",
];

const SKY_TOP: Rgba = Rgba::rgb(96, 160, 230);
const SKY_BOTTOM: Rgba = Rgba::rgb(190, 225, 250);
const CLOUD: Rgba = Rgba::rgb(245, 248, 252);
const HILLS_FAR: Rgba = Rgba::rgb(120, 170, 120);
const HILLS_NEAR: Rgba = Rgba::rgb(70, 140, 60);
const GRASS: Rgba = Rgba::rgb(60, 170, 50);
const GRASS_DARK: Rgba = Rgba::rgb(30, 110, 30);
const DIRT: Rgba = Rgba::rgb(130, 85, 45);
const DIRT_DARK: Rgba = Rgba::rgb(95, 60, 30);
const STONE: Rgba = Rgba::rgb(150, 150, 160);
const STONE_DARK: Rgba = Rgba::rgb(90, 90, 100);
const PLAYER: Rgba = Rgba::rgb(200, 30, 30);
const CENTIPEDE: Rgba = Rgba::rgb(120, 40, 160);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Image {
    Sky,
    Hills,
    NearHills,
    Grass,
    GrassBody,
    GrassCorner,
    Coin,
    Castle,
    Player,
    Centipede,
}

impl Image {
    pub fn for_path(path: &str) -> Option<Image> {
        let image = match path {
            "images/sky.png" => Image::Sky,
            "images/hills.png" => Image::Hills,
            "images/hills2.png" => Image::NearHills,
            "images/grass2.png" => Image::Grass,
            "images/grass2body.png" => Image::GrassBody,
            "images/grass2corner.png" => Image::GrassCorner,
            "images/coin.png" => Image::Coin,
            "images/castle.png" => Image::Castle,
            "images/player.png" => Image::Player,
            "images/centipede.png" => Image::Centipede,
            _ => return None,
        };
        Some(image)
    }
}

#[derive(Clone, Debug)]
pub struct AssetCatalog {
    images: Vec<(&'static str, Image)>,
    sky_seed: u64,
}

impl AssetCatalog {
    /// Resolve every path in `paths`.  With `asset_dir`, each file must
    /// also exist under that directory.
    pub fn preload(
        paths: &[&'static str],
        asset_dir: Option<&Path>,
        sky_seed: u64,
    ) -> Result<AssetCatalog, AssetError> {
        let mut images = Vec::with_capacity(paths.len());
        for &path in paths {
            let image = Image::for_path(path).ok_or_else(|| AssetError::Unknown(path.to_string()))?;
            if let Some(dir) = asset_dir {
                let resolved: PathBuf = dir.join(path);
                if !resolved.is_file() {
                    return Err(AssetError::Missing { path: path.to_string(), resolved });
                }
            }
            images.push((path, image));
        }
        tracing::debug!(count = images.len(), "preloaded images");
        Ok(AssetCatalog { images, sky_seed })
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn get(&self, path: &str) -> Result<Image, AssetError> {
        self.images
            .iter()
            .find(|(p, _)| *p == path)
            .map(|(_, image)| *image)
            .ok_or_else(|| AssetError::Unknown(path.to_string()))
    }

    /// Paint the image at `path` stretched over the pixel rectangle `area`.
    pub fn paint(
        &self,
        path: &str,
        canvas: &mut Canvas,
        area: &Rect,
        flipped: bool,
    ) -> Result<(), AssetError> {
        match self.get(path)? {
            Image::Sky => paint_sky(canvas, area, self.sky_seed),
            Image::Hills => paint_hills(canvas, area, HILLS_FAR, 3.0),
            Image::NearHills => paint_hills(canvas, area, HILLS_NEAR, 11.0),
            Image::Grass => paint_block(canvas, area, Some(GRASS), DIRT, '.'),
            Image::GrassBody => paint_block(canvas, area, None, DIRT, '░'),
            Image::GrassCorner => paint_corner(canvas, area, flipped),
            Image::Coin => {
                let (cx, cy) = area.center();
                canvas.circle(cx, cy, area.w.min(area.h) * 0.3, "gold", "orange");
            }
            Image::Castle => paint_castle(canvas, area),
            Image::Player | Image::Centipede => {
                canvas.fill_rect(area.x, area.y, area.w, area.h, Cell::glyph('?', Rgba::BLACK));
            }
        }
        Ok(())
    }

    /// Paint the current frame of an animated sprite.
    pub fn paint_sprite(
        &self,
        sprite: &SpriteMap,
        canvas: &mut Canvas,
        area: &Rect,
    ) -> Result<(), AssetError> {
        let (_, frame) = sprite.frame();
        let lines: [&str; 4] = match self.get(sprite.image())? {
            Image::Player => player_frame(sprite.current(), frame),
            Image::Centipede => centipede_frame(sprite.current(), frame, sprite.flipped()),
            _ => return self.paint(sprite.image(), canvas, area, sprite.flipped()),
        };
        let colour = if sprite.image() == "images/player.png" { PLAYER } else { CENTIPEDE };
        paint_lines(canvas, area, &lines, colour);
        Ok(())
    }
}

fn lerp(a: u8, b: u8, t: f32) -> u8 {
    (a as f32 + (b as f32 - a as f32) * t).round() as u8
}

fn paint_sky(canvas: &mut Canvas, area: &Rect, seed: u64) {
    let (c0, r0, c1, r1) = canvas.cell_span(area.x, area.y, area.w, area.h);
    let span = (r1 - r0).max(1) as f32;
    for row in r0..r1 {
        let t = (row - r0) as f32 / span;
        let colour = Rgba::rgb(
            lerp(SKY_TOP.r, SKY_BOTTOM.r, t),
            lerp(SKY_TOP.g, SKY_BOTTOM.g, t),
            lerp(SKY_TOP.b, SKY_BOTTOM.b, t),
        );
        for col in c0..c1 {
            canvas.put(col, row, Cell::solid(colour));
        }
    }

    // Clouds stay in the upper half of the sky.
    let mut rng = StdRng::seed_from_u64(seed);
    let clouds = ((c1 - c0) / 40).max(1);
    let upper = ((r1 - r0) / 2).max(2);
    for _ in 0..clouds {
        let col = rng.gen_range(c0..c1);
        let row = rng.gen_range(r0..r0 + upper);
        let len = rng.gen_range(6..16);
        for dc in 0..len {
            canvas.put(col + dc, row, Cell::solid(CLOUD));
        }
        for dc in 2..len.saturating_sub(2).max(3) {
            canvas.put(col + dc, row - 1, Cell::solid(CLOUD));
        }
    }
}

fn paint_hills(canvas: &mut Canvas, area: &Rect, colour: Rgba, waves: f32) {
    let (c0, r0, c1, r1) = canvas.cell_span(area.x, area.y, area.w, area.h);
    let cols = (c1 - c0).max(1) as f32;
    let rows = (r1 - r0) as f32;
    for col in c0..c1 {
        let t = (col - c0) as f32 / cols;
        let crest = 0.6 + 0.4 * (t * waves * std::f32::consts::TAU).sin().abs();
        let top = r1 - (rows * crest).ceil() as i64;
        for row in top.max(r0)..r1 {
            canvas.put(col, row, Cell::solid(colour));
        }
    }
}

fn paint_block(canvas: &mut Canvas, area: &Rect, top: Option<Rgba>, body: Rgba, texture: char) {
    let (c0, r0, c1, r1) = canvas.cell_span(area.x, area.y, area.w, area.h);
    for row in r0..r1 {
        for col in c0..c1 {
            let cell = match top {
                Some(grass) if row == r0 => Cell::glyph('"', GRASS_DARK).with_bg(grass),
                _ if (row + col) % 3 == 0 => Cell::glyph(texture, DIRT_DARK).with_bg(body),
                _ => Cell::solid(body),
            };
            canvas.put(col, row, cell);
        }
    }
}

/// A grass slope rising towards the inside of the platform.
fn paint_corner(canvas: &mut Canvas, area: &Rect, flipped: bool) {
    let (c0, r0, c1, r1) = canvas.cell_span(area.x, area.y, area.w, area.h);
    let cols = (c1 - c0).max(1) as f32;
    let rows = (r1 - r0).max(1) as f32;
    for row in r0..r1 {
        for col in c0..c1 {
            let u = (col - c0) as f32 / cols;
            let u = if flipped { 1.0 - u } else { u };
            let v = (row - r0 + 1) as f32 / rows;
            if v + u >= 1.0 {
                let edge = v + u - 1.0 < 1.0 / rows.max(cols) * 2.0;
                let cell = if edge {
                    Cell::glyph(if flipped { '\\' } else { '/' }, GRASS_DARK).with_bg(GRASS)
                } else {
                    Cell::solid(DIRT)
                };
                canvas.put(col, row, cell);
            }
        }
    }
}

fn paint_castle(canvas: &mut Canvas, area: &Rect) {
    let (c0, r0, c1, r1) = canvas.cell_span(area.x, area.y, area.w, area.h);
    let door_from = c0 + (c1 - c0) * 2 / 5;
    let door_to = c1 - (c1 - c0) * 2 / 5;
    let door_top = r1 - (r1 - r0) / 3;
    for row in r0..r1 {
        for col in c0..c1 {
            let cell = if row == r0 {
                // Battlements
                if (col - c0) % 4 < 2 {
                    Cell::solid(STONE)
                } else {
                    continue;
                }
            } else if row >= door_top && col >= door_from && col < door_to {
                Cell::solid(Rgba::rgb(40, 25, 15))
            } else if (row + (col / 4)) % 2 == 0 && col % 4 == 0 {
                Cell::glyph('|', STONE_DARK).with_bg(STONE)
            } else {
                Cell::glyph('_', STONE_DARK).with_bg(STONE)
            };
            canvas.put(col, row, cell);
        }
    }
}

/// Draw up to four text lines bottom-aligned and centred in `area`.
fn paint_lines(canvas: &mut Canvas, area: &Rect, lines: &[&str; 4], colour: Rgba) {
    let (c0, r0, c1, r1) = canvas.cell_span(area.x, area.y, area.w, area.h);
    let rows = (r1 - r0).max(1);
    let skip = lines.len() as i64 - rows.min(lines.len() as i64);
    for (i, line) in lines.iter().enumerate().skip(skip as usize) {
        let row = r1 - (lines.len() as i64 - i as i64);
        let width = line.chars().count() as i64;
        let start = c0 + ((c1 - c0) - width).max(0) / 2;
        for (j, ch) in line.chars().enumerate() {
            if ch != ' ' {
                canvas.put(start + j as i64, row, Cell::glyph(ch, colour));
            }
        }
    }
}

fn player_frame(animation: &str, frame: u32) -> [&'static str; 4] {
    let stride = frame % 2 == 0;
    match animation {
        "left" => [" O ", "<|\\", " | ", if stride { "/ \\" } else { " |\\" }],
        "right" => [" O ", "/|>", " | ", if stride { "/ \\" } else { "/| " }],
        "lookLeft" => [" O ", "<|\\", " | ", "/ \\"],
        "lookRight" => [" O ", "/|>", " | ", "/ \\"],
        "jumpLeft" => ["\\O ", " |\\", " | ", "/  "],
        "jumpRight" => [" O/", "/| ", " | ", "  \\"],
        "fall" => ["\\O/", " | ", " | ", "/ \\"],
        _ => [" O ", "/|\\", " | ", "/ \\"],
    }
}

fn centipede_frame(animation: &str, frame: u32, facing_left: bool) -> [&'static str; 4] {
    let legs = if frame % 2 == 0 { " /\\/\\/\\ " } else { " \\/\\/\\/ " };
    let body = match (animation, facing_left) {
        ("stand", _) => " (oooo) ",
        (_, true) => "<(oooo) ",
        (_, false) => " (oooo)>",
    };
    ["", "", body, legs]
}
