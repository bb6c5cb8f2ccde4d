/// Drawable layers.
///
/// A layer owns a private canvas plus an offset.  World-anchored layers move
/// with the camera; canvas-anchored layers (the HUD) stay fixed to the
/// viewport.  `parallax` scales how far [`Layer::scroll`] moves the layer.

use crate::canvas::{Canvas, Scale};
use crate::geometry::Rect;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    World,
    Canvas,
}

#[derive(Clone, Debug)]
pub struct Layer {
    pub x: f32,
    pub y: f32,
    pub parallax: f32,
    pub anchor: Anchor,
    /// Image the canvas was painted from, if any.
    pub source: Option<&'static str>,
    pub canvas: Canvas,
}

impl Layer {
    pub fn new(x: f32, y: f32, width: f32, height: f32, scale: Scale) -> Layer {
        Layer {
            x,
            y,
            parallax: 1.0,
            anchor: Anchor::World,
            source: None,
            canvas: Canvas::new(width, height, scale),
        }
    }

    pub fn with_parallax(mut self, parallax: f32) -> Layer {
        self.parallax = parallax;
        self
    }

    pub fn anchored(mut self, anchor: Anchor) -> Layer {
        self.anchor = anchor;
        self
    }

    pub fn width(&self) -> f32 {
        self.canvas.width()
    }

    pub fn height(&self) -> f32 {
        self.canvas.height()
    }

    /// Move the layer opposite to a reference displacement, scaled by the
    /// parallax factor.
    pub fn scroll(&mut self, dx: f32, dy: f32) {
        self.x -= dx * self.parallax;
        self.y -= dy * self.parallax;
    }

    pub fn draw(&self, target: &mut Canvas, camera: &Rect) {
        let (x, y) = match self.anchor {
            Anchor::World => (self.x - camera.x, self.y - camera.y),
            Anchor::Canvas => (self.x, self.y),
        };
        target.blit(&self.canvas, x, y);
    }
}
