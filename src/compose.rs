/// Frame composition: every layer and entity drawn back to front into a
/// viewport-sized canvas.

use crate::assets::AssetCatalog;
use crate::canvas::{Canvas, Scale};
use crate::entities::GameSession;
use crate::error::AssetError;
use crate::geometry::Rect;

/// The viewport rectangle in world pixels: centred on the player and kept
/// inside the world.
pub fn camera(session: &GameSession) -> Rect {
    let (cx, cy) = session.player.actor.rect().center();
    let w = session.canvas_w;
    let h = session.canvas_h;
    let x = (cx - w / 2.0).clamp(0.0, (session.world.width - w).max(0.0));
    let y = (cy - h / 2.0).clamp(0.0, (session.world.height - h).max(0.0));
    Rect::new(x, y, w, h)
}

fn shifted(rect: &Rect, camera: &Rect) -> Rect {
    Rect::new(rect.x - camera.x, rect.y - camera.y, rect.w, rect.h)
}

pub fn draw(
    session: &GameSession,
    assets: &AssetCatalog,
    scale: Scale,
) -> Result<Canvas, AssetError> {
    let cam = camera(session);
    let mut frame = Canvas::new(session.canvas_w, session.canvas_h, scale);

    let backdrop = &session.backdrop;
    backdrop.sky.draw(&mut frame, &cam);
    backdrop.hills.draw(&mut frame, &cam);
    backdrop.near_hills.draw(&mut frame, &cam);
    backdrop.geometry.draw(&mut frame, &cam);

    for coin in &session.coins {
        if coin.body.overlaps(&cam) {
            assets.paint("images/coin.png", &mut frame, &shifted(&coin.body, &cam), false)?;
        }
    }
    for enemy in &session.enemies {
        let body = enemy.actor.rect();
        if body.overlaps(&cam) {
            assets.paint_sprite(&enemy.sprite, &mut frame, &shifted(&body, &cam))?;
        }
    }
    let player = shifted(&session.player.actor.rect(), &cam);
    assets.paint_sprite(&session.player.sprite, &mut frame, &player)?;

    for bullet in &session.bullets {
        let b = shifted(&bullet.actor.rect(), &cam);
        frame.circle(b.x + b.w / 2.0, b.y + b.w / 2.0, (b.w + b.h) / 4.0, "orange", "black");
    }

    session.hud.layer.draw(&mut frame, &cam);
    Ok(frame)
}
