/// A 2D drawing context backed by terminal character cells.
///
/// Callers address the canvas in world pixels; a [`Scale`] maps pixels onto
/// cells.  Every cell carries a glyph, a foreground colour and an optional
/// background colour, and a cell with neither glyph nor background is
/// transparent when one canvas is blitted onto another.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba { r, g, b, a: 1.0 }
    }

    pub const BLACK: Rgba = Rgba::rgb(0, 0, 0);
    pub const WHITE: Rgba = Rgba::rgb(255, 255, 255);

    /// Parse a CSS colour: a handful of names, `#rrggbb`, `rgb(..)` or
    /// `rgba(..)`.
    pub fn parse(css: &str) -> Option<Rgba> {
        let css = css.trim().to_ascii_lowercase();
        let named = match css.as_str() {
            "black" => Some(Rgba::BLACK),
            "white" => Some(Rgba::WHITE),
            "orange" => Some(Rgba::rgb(255, 165, 0)),
            "red" => Some(Rgba::rgb(255, 0, 0)),
            "green" => Some(Rgba::rgb(0, 128, 0)),
            "yellow" => Some(Rgba::rgb(255, 255, 0)),
            "gold" => Some(Rgba::rgb(255, 215, 0)),
            "blue" => Some(Rgba::rgb(0, 0, 255)),
            "brown" => Some(Rgba::rgb(165, 42, 42)),
            "gray" | "grey" => Some(Rgba::rgb(128, 128, 128)),
            "lightgray" | "lightgrey" => Some(Rgba::rgb(211, 211, 211)),
            "skyblue" => Some(Rgba::rgb(135, 206, 235)),
            _ => None,
        };
        if named.is_some() {
            return named;
        }

        if let Some(hex) = css.strip_prefix('#') {
            if hex.len() != 6 {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            return Some(Rgba::rgb(channel(0)?, channel(2)?, channel(4)?));
        }

        let (body, has_alpha) = if let Some(rest) = css.strip_prefix("rgba(") {
            (rest.strip_suffix(')')?, true)
        } else if let Some(rest) = css.strip_prefix("rgb(") {
            (rest.strip_suffix(')')?, false)
        } else {
            return None;
        };
        let parts: Vec<&str> = body.split(',').map(str::trim).collect();
        if parts.len() != if has_alpha { 4 } else { 3 } {
            return None;
        }
        let r = parts[0].parse().ok()?;
        let g = parts[1].parse().ok()?;
        let b = parts[2].parse().ok()?;
        let a = if has_alpha {
            parts[3].parse::<f32>().ok()?.clamp(0.0, 1.0)
        } else {
            1.0
        };
        Some(Rgba { r, g, b, a })
    }

    /// Source-over compositing onto `under`.
    pub fn over(self, under: Rgba) -> Rgba {
        let a = self.a + under.a * (1.0 - self.a);
        if a <= 0.0 {
            return Rgba { r: 0, g: 0, b: 0, a: 0.0 };
        }
        let mix = |top: u8, bottom: u8| {
            let v = (top as f32 * self.a + bottom as f32 * under.a * (1.0 - self.a)) / a;
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgba {
            r: mix(self.r, under.r),
            g: mix(self.g, under.g),
            b: mix(self.b, under.b),
            a,
        }
    }

    pub fn is_opaque(&self) -> bool {
        self.a >= 1.0
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cell {
    pub ch: char,
    pub fg: Rgba,
    pub bg: Option<Rgba>,
}

impl Cell {
    pub const EMPTY: Cell = Cell { ch: ' ', fg: Rgba::BLACK, bg: None };

    pub const fn glyph(ch: char, fg: Rgba) -> Cell {
        Cell { ch, fg, bg: None }
    }

    pub const fn solid(bg: Rgba) -> Cell {
        Cell { ch: ' ', fg: Rgba::BLACK, bg: Some(bg) }
    }

    pub const fn with_bg(mut self, bg: Rgba) -> Cell {
        self.bg = Some(bg);
        self
    }

    pub fn is_transparent(&self) -> bool {
        self.ch == ' ' && self.bg.is_none()
    }
}

/// Pixels per terminal cell.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub px_per_col: f32,
    pub px_per_row: f32,
}

impl Default for Scale {
    fn default() -> Self {
        Scale { px_per_col: 10.0, px_per_row: 20.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextBaseline {
    Top,
    Middle,
    Bottom,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Recorded for completeness; a terminal renders every font the same.
    pub font: String,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    pub fill_style: Rgba,
    pub stroke_style: Rgba,
    pub line_width: f32,
}

impl Default for TextStyle {
    fn default() -> Self {
        TextStyle {
            font: "10px sans-serif".to_string(),
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
            fill_style: Rgba::BLACK,
            stroke_style: Rgba::BLACK,
            line_width: 1.0,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Canvas {
    cols: usize,
    rows: usize,
    scale: Scale,
    cells: Vec<Cell>,
    pub text: TextStyle,
}

impl Canvas {
    /// A transparent canvas covering `width` × `height` pixels.
    pub fn new(width: f32, height: f32, scale: Scale) -> Canvas {
        let cols = (width / scale.px_per_col).ceil().max(0.0) as usize;
        let rows = (height / scale.px_per_row).ceil().max(0.0) as usize;
        Canvas::with_cells(cols, rows, scale)
    }

    pub fn with_cells(cols: usize, rows: usize, scale: Scale) -> Canvas {
        Canvas {
            cols,
            rows,
            scale,
            cells: vec![Cell::EMPTY; cols * rows],
            text: TextStyle::default(),
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> f32 {
        self.cols as f32 * self.scale.px_per_col
    }

    pub fn height(&self) -> f32 {
        self.rows as f32 * self.scale.px_per_row
    }

    pub fn get(&self, col: usize, row: usize) -> Option<&Cell> {
        if col < self.cols && row < self.rows {
            self.cells.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// The glyphs of one row, for tests and debugging.
    pub fn row_text(&self, row: usize) -> String {
        (0..self.cols)
            .filter_map(|col| self.get(col, row))
            .map(|c| c.ch)
            .collect()
    }

    pub fn clear(&mut self) {
        self.cells.fill(Cell::EMPTY);
    }

    fn col_of(&self, x: f32) -> i64 {
        (x / self.scale.px_per_col).floor() as i64
    }

    fn row_of(&self, y: f32) -> i64 {
        (y / self.scale.px_per_row).floor() as i64
    }

    /// Composite `cell` over whatever is at `(col, row)`.  An opaque
    /// background hides the glyph underneath.
    pub fn put(&mut self, col: i64, row: i64, cell: Cell) {
        if col < 0 || row < 0 || col as usize >= self.cols || row as usize >= self.rows {
            return;
        }
        let idx = row as usize * self.cols + col as usize;
        let dst = &mut self.cells[idx];
        if let Some(bg) = cell.bg {
            if bg.is_opaque() {
                dst.ch = ' ';
                dst.bg = Some(bg);
            } else {
                dst.bg = Some(match dst.bg {
                    Some(under) => bg.over(under),
                    None => bg,
                });
            }
        }
        if cell.ch != ' ' {
            dst.ch = cell.ch;
            dst.fg = cell.fg;
        }
    }

    /// Fill the cells covering a pixel rectangle.
    pub fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, cell: Cell) {
        let (c0, r0, c1, r1) = self.cell_span(x, y, w, h);
        for row in r0..r1 {
            for col in c0..c1 {
                self.put(col, row, cell);
            }
        }
    }

    /// Cell range `[c0, c1) × [r0, r1)` covering a pixel rectangle; never
    /// empty for a non-degenerate rectangle.
    pub fn cell_span(&self, x: f32, y: f32, w: f32, h: f32) -> (i64, i64, i64, i64) {
        let c0 = self.col_of(x);
        let r0 = self.row_of(y);
        let c1 = ((x + w) / self.scale.px_per_col).ceil() as i64;
        let r1 = ((y + h) / self.scale.px_per_row).ceil() as i64;
        (c0, r0, c1.max(c0 + 1), r1.max(r0 + 1))
    }

    /// Draw a filled circle with an outline.  Circles smaller than a cell
    /// collapse to a single dot glyph.
    pub fn circle(&mut self, cx: f32, cy: f32, radius: f32, fill: &str, stroke: &str) {
        let fill = Rgba::parse(fill).unwrap_or(Rgba::BLACK);
        let stroke = Rgba::parse(stroke).unwrap_or(Rgba::BLACK);
        let Scale { px_per_col, px_per_row } = self.scale;

        if radius * 2.0 < px_per_col.min(px_per_row) * 1.5 {
            self.put(self.col_of(cx), self.row_of(cy), Cell::glyph('●', fill));
            return;
        }

        let (c0, r0, c1, r1) =
            self.cell_span(cx - radius, cy - radius, radius * 2.0, radius * 2.0);
        let ring = px_per_col.max(px_per_row) * 0.75;
        for row in r0..r1 {
            for col in c0..c1 {
                let px = (col as f32 + 0.5) * px_per_col - cx;
                let py = (row as f32 + 0.5) * px_per_row - cy;
                let dist = (px * px + py * py).sqrt();
                if dist <= radius {
                    let colour = if dist > radius - ring { stroke } else { fill };
                    self.put(col, row, Cell::solid(colour));
                }
            }
        }
    }

    fn text_origin(&self, text: &str, x: f32, y: f32) -> (i64, i64) {
        let len = text.chars().count() as i64;
        let col = self.col_of(x);
        let start = match self.text.align {
            TextAlign::Left => col,
            TextAlign::Center => col - len / 2,
            TextAlign::Right => col - len,
        };
        let row = match self.text.baseline {
            TextBaseline::Top => self.row_of(y),
            TextBaseline::Middle => self.row_of(y),
            TextBaseline::Bottom => self.row_of(y) - 1,
        };
        (start, row)
    }

    /// Outline text: tints the background under the text span, widened by
    /// one cell on each side for thick lines.
    pub fn stroke_text(&mut self, text: &str, x: f32, y: f32) {
        if self.text.line_width <= 0.0 {
            return;
        }
        let (start, row) = self.text_origin(text, x, y);
        let pad = if self.text.line_width >= 2.0 { 1 } else { 0 };
        let len = text.chars().count() as i64;
        let tint = Cell { ch: ' ', fg: Rgba::BLACK, bg: Some(self.text.stroke_style) };
        for col in (start - pad)..(start + len + pad) {
            self.put(col, row, tint);
        }
    }

    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let (start, row) = self.text_origin(text, x, y);
        let fg = self.text.fill_style;
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i64, row, Cell::glyph(ch, fg));
        }
    }

    /// Composite `src` onto this canvas with its top-left at pixel
    /// `(x, y)`.  Transparent cells are skipped.
    pub fn blit(&mut self, src: &Canvas, x: f32, y: f32) {
        let dc = self.col_of(x);
        let dr = self.row_of(y);
        // Clip to the destination before walking the source.
        let first_col = (-dc).max(0) as usize;
        let first_row = (-dr).max(0) as usize;
        let last_col = (self.cols as i64 - dc).clamp(0, src.cols as i64) as usize;
        let last_row = (self.rows as i64 - dr).clamp(0, src.rows as i64) as usize;
        for row in first_row..last_row {
            for col in first_col..last_col {
                let cell = src.cells[row * src.cols + col];
                if !cell.is_transparent() {
                    self.put(col as i64 + dc, row as i64 + dr, cell);
                }
            }
        }
    }
}
