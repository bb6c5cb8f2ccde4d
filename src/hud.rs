/// Score heads-up display: a canvas-anchored layer showing `Score: N` in the
/// top-right corner, cleared and redrawn whenever the score changes.

use crate::canvas::{Rgba, Scale, TextAlign, TextBaseline};
use crate::layer::{Anchor, Layer};

/// Distance of the score text from the top-right corner, in pixels.
const MARGIN: f32 = 15.0;

#[derive(Clone, Debug)]
pub struct ScoreHud {
    score: u32,
    pub layer: Layer,
}

impl ScoreHud {
    pub fn new(canvas_w: f32, canvas_h: f32, scale: Scale) -> ScoreHud {
        let mut layer = Layer::new(0.0, 0.0, canvas_w, canvas_h, scale).anchored(Anchor::Canvas);
        let text = &mut layer.canvas.text;
        text.font = "30px Arial".to_string();
        text.align = TextAlign::Right;
        text.baseline = TextBaseline::Top;
        text.fill_style = Rgba::BLACK;
        text.stroke_style = Rgba::parse("rgba(211, 211, 211, 0.5)").unwrap_or(Rgba::WHITE);
        text.line_width = 3.0;

        let mut hud = ScoreHud { score: 0, layer };
        hud.redraw();
        hud
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn text(&self) -> String {
        format!("Score: {}", self.score)
    }

    pub fn increase_score(&mut self, amount: u32) {
        self.score = self.score.saturating_add(amount);
        tracing::debug!(amount, score = self.score, "score increased");
        self.redraw();
    }

    fn redraw(&mut self) {
        let text = self.text();
        let canvas = &mut self.layer.canvas;
        let x = canvas.width() - MARGIN;
        canvas.clear();
        canvas.stroke_text(&text, x, MARGIN);
        canvas.fill_text(&text, x, MARGIN);
    }
}
