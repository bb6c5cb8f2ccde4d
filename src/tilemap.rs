/// Grid-based level geometry.
///
/// A level is a newline-delimited block of characters; each non-space
/// character becomes a [`Tile`] occupying one fixed-size cell.  Cells can
/// be cleared after construction, which is how enemies and coins are lifted
/// out of the map into their own collections.

use crate::error::LevelError;
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tile {
    /// `G`: grass-topped ground.
    Grass,
    /// `B`: ground body under the grass.
    GrassBody,
    /// `C`: left-facing grass corner.
    GrassCorner,
    /// `D`: the corner mirrored horizontally.
    GrassCornerFlipped,
    /// `E`: spawn point of a patrolling enemy.
    Enemy,
    /// `F`: a collectable coin.
    Coin,
}

impl Tile {
    /// `Some(None)` for an empty cell, `None` for a character with no tile.
    pub fn from_char(ch: char) -> Option<Option<Tile>> {
        match ch {
            ' ' => Some(None),
            'G' => Some(Some(Tile::Grass)),
            'B' => Some(Some(Tile::GrassBody)),
            'C' => Some(Some(Tile::GrassCorner)),
            'D' => Some(Some(Tile::GrassCornerFlipped)),
            'E' => Some(Some(Tile::Enemy)),
            'F' => Some(Some(Tile::Coin)),
            _ => None,
        }
    }

    pub fn is_solid(&self) -> bool {
        !matches!(self, Tile::Enemy | Tile::Coin)
    }

    /// Image path the tile is drawn with.
    pub fn image(&self) -> &'static str {
        match self {
            Tile::Grass => "images/grass2.png",
            Tile::GrassBody => "images/grass2body.png",
            Tile::GrassCorner | Tile::GrassCornerFlipped => "images/grass2corner.png",
            Tile::Enemy => "images/centipede.png",
            Tile::Coin => "images/coin.png",
        }
    }

    pub fn flipped(&self) -> bool {
        *self == Tile::GrassCornerFlipped
    }
}

#[derive(Clone, Debug)]
pub struct TileMap {
    cells: Vec<Vec<Option<Tile>>>,
    columns: usize,
    cell_w: f32,
    cell_h: f32,
}

impl TileMap {
    /// Parse `grid`.  Short rows are padded with empty cells up to the
    /// widest row.
    pub fn parse(grid: &str, cell_w: f32, cell_h: f32) -> Result<TileMap, LevelError> {
        let mut cells = Vec::new();
        for (row, line) in grid.split('\n').enumerate() {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let mut parsed = Vec::with_capacity(line.len());
            for (col, ch) in line.chars().enumerate() {
                let tile = Tile::from_char(ch).ok_or(LevelError::UnknownTile { ch, row, col })?;
                parsed.push(tile);
            }
            cells.push(parsed);
        }
        // A trailing newline yields one empty row that is not part of the level.
        while cells.last().is_some_and(|r| r.is_empty()) {
            cells.pop();
        }

        let columns = cells.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return Err(LevelError::Empty);
        }
        for row in &mut cells {
            row.resize(columns, None);
        }

        Ok(TileMap { cells, columns, cell_w, cell_h })
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<Tile> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn cell_rect(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            col as f32 * self.cell_w,
            row as f32 * self.cell_h,
            self.cell_w,
            self.cell_h,
        )
    }

    /// Empty a cell, returning what it held.
    pub fn clear_cell(&mut self, row: usize, col: usize) -> Option<Tile> {
        self.cells.get_mut(row).and_then(|r| r.get_mut(col)).and_then(Option::take)
    }

    /// Every occupied cell as `(row, col, tile)`, row-major.
    pub fn tiles(&self) -> impl Iterator<Item = (usize, usize, Tile)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter_map(move |(col, tile)| tile.map(|t| (row, col, t)))
        })
    }

    /// Clear every cell holding `kind` and return their world rectangles in
    /// row-major order.
    pub fn extract(&mut self, kind: Tile) -> Vec<Rect> {
        let hits: Vec<(usize, usize)> = self
            .tiles()
            .filter(|&(_, _, t)| t == kind)
            .map(|(row, col, _)| (row, col))
            .collect();
        hits.into_iter()
            .map(|(row, col)| {
                self.clear_cell(row, col);
                self.cell_rect(row, col)
            })
            .collect()
    }

    /// Rectangles of solid cells overlapping `area`.
    pub fn solids_in(&self, area: &Rect) -> Vec<Rect> {
        if self.rows() == 0 || area.right() <= 0.0 || area.bottom() <= 0.0 {
            return Vec::new();
        }
        let first_col = (area.x / self.cell_w).floor().max(0.0) as usize;
        let first_row = (area.y / self.cell_h).floor().max(0.0) as usize;
        let last_col = ((area.right() / self.cell_w).ceil() as usize).min(self.columns);
        let last_row = ((area.bottom() / self.cell_h).ceil() as usize).min(self.rows());

        let mut out = Vec::new();
        for row in first_row..last_row {
            for col in first_col..last_col {
                if self.get(row, col).is_some_and(|t| t.is_solid()) {
                    let cell = self.cell_rect(row, col);
                    if cell.overlaps(area) {
                        out.push(cell);
                    }
                }
            }
        }
        out
    }

    pub fn collides(&self, area: &Rect) -> bool {
        !self.solids_in(area).is_empty()
    }

    /// True when solid ground lies directly beneath any part of `area`.
    pub fn standing_on(&self, area: &Rect) -> bool {
        let probe = Rect::new(area.x, area.bottom(), area.w, 1.0);
        self.collides(&probe)
    }
}
