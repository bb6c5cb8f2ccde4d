/// Sprite-sheet animation.
///
/// A `SpriteMap` names sequences of frames on a sheet laid out in rows and
/// columns of `frame_w` × `frame_h` pixels.  Frames advance with game time
/// (not a wall-clock timer), so pausing the game freezes every animation.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Sequence {
    pub start: (u32, u32),
    pub end: (u32, u32),
    /// Restrict every row to the start..=end column range instead of
    /// wrapping across the full sheet width.
    pub squeeze: bool,
    pub flip_horizontal: bool,
}

impl Sequence {
    pub const fn new(start_row: u32, start_col: u32, end_row: u32, end_col: u32) -> Self {
        Sequence {
            start: (start_row, start_col),
            end: (end_row, end_col),
            squeeze: false,
            flip_horizontal: false,
        }
    }

    pub const fn squeezed(mut self) -> Self {
        self.squeeze = true;
        self
    }

    pub const fn flipped(mut self) -> Self {
        self.flip_horizontal = true;
        self
    }

    fn frames(&self, sheet_columns: u32) -> Vec<(u32, u32)> {
        let (r0, c0) = self.start;
        let (r1, c1) = self.end;
        let mut out = Vec::new();
        for row in r0..=r1 {
            let (from, to) = if self.squeeze || r0 == r1 {
                (c0, c1)
            } else if row == r0 {
                (c0, sheet_columns.saturating_sub(1))
            } else if row == r1 {
                (0, c1)
            } else {
                (0, sheet_columns.saturating_sub(1))
            };
            out.extend((from..=to).map(|col| (row, col)));
        }
        out
    }
}

#[derive(Clone, Debug)]
pub struct SpriteMap {
    image: &'static str,
    frame_w: u32,
    frame_h: u32,
    interval_ms: u64,
    sequences: Vec<(&'static str, Sequence)>,
    active: usize,
    elapsed_ms: u64,
}

impl SpriteMap {
    pub fn new(image: &'static str, frame_w: u32, frame_h: u32, interval_ms: u64) -> Self {
        SpriteMap {
            image,
            frame_w,
            frame_h,
            interval_ms: interval_ms.max(1),
            sequences: Vec::new(),
            active: 0,
            elapsed_ms: 0,
        }
    }

    /// Register a named sequence.  The first one registered starts active.
    pub fn with(mut self, name: &'static str, sequence: Sequence) -> Self {
        self.sequences.push((name, sequence));
        self
    }

    pub fn image(&self) -> &'static str {
        self.image
    }

    /// Width and height of one frame on the sheet, in pixels.
    pub fn frame_size(&self) -> (u32, u32) {
        (self.frame_w, self.frame_h)
    }

    /// Switch to `name`, restarting it if it was not already playing.
    /// Unknown names leave the current animation in place.
    pub fn use_animation(&mut self, name: &str) -> bool {
        match self.sequences.iter().position(|(n, _)| *n == name) {
            Some(idx) if idx != self.active => {
                self.active = idx;
                self.elapsed_ms = 0;
                true
            }
            Some(_) => true,
            None => false,
        }
    }

    pub fn advance(&mut self, ms: u64) {
        self.elapsed_ms = self.elapsed_ms.saturating_add(ms);
    }

    pub fn current(&self) -> &'static str {
        self.sequences.get(self.active).map(|(n, _)| *n).unwrap_or("")
    }

    /// `(row, col)` of the frame to draw now.
    pub fn frame(&self) -> (u32, u32) {
        let Some((_, seq)) = self.sequences.get(self.active) else {
            return (0, 0);
        };
        let frames = seq.frames(self.sheet_columns());
        let idx = (self.elapsed_ms / self.interval_ms) as usize % frames.len().max(1);
        frames.get(idx).copied().unwrap_or(seq.start)
    }

    pub fn flipped(&self) -> bool {
        self.sequences
            .get(self.active)
            .is_some_and(|(_, seq)| seq.flip_horizontal)
    }

    fn sheet_columns(&self) -> u32 {
        self.sequences
            .iter()
            .map(|(_, s)| s.start.1.max(s.end.1) + 1)
            .max()
            .unwrap_or(1)
    }
}
