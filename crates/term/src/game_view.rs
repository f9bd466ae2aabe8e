//! BoardView: maps a session snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{SessionSnapshot, ShapeDescriptor};
use crate::fb::{FrameBuffer, Rgb, Style};
use crate::types::OccupantId;

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Driver-side values shown next to the board.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hud<'a> {
    pub score: u64,
    pub lines: u32,
    pub drop_ms: u64,
    pub preview: Option<&'a ShapeDescriptor>,
    pub paused: bool,
    /// Best recorded score, if any game has been recorded.
    pub best: Option<u64>,
}

const PALETTE: [Rgb; 7] = [
    Rgb::new(0, 200, 220),
    Rgb::new(230, 200, 0),
    Rgb::new(170, 80, 200),
    Rgb::new(80, 200, 80),
    Rgb::new(220, 60, 60),
    Rgb::new(60, 100, 230),
    Rgb::new(240, 140, 30),
];

const BLOCK: char = '█';

/// Colour for an occupant. Every cell of one piece shares a colour.
pub fn occupant_color(occupant: OccupantId) -> Rgb {
    PALETTE[(occupant.piece as usize).wrapping_mul(5) % PALETTE.len()]
}

pub struct BoardView {
    /// Terminal columns per board cell.
    cell_w: u16,
}

impl Default for BoardView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self { cell_w: 2 }
    }
}

impl BoardView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
        }
    }

    /// Screen position of the frame's top-left corner.
    pub fn frame_origin(&self, snap: &SessionSnapshot, viewport: Viewport) -> (u16, u16) {
        let (frame_w, frame_h) = self.frame_size(snap);
        (
            viewport.width.saturating_sub(frame_w) / 2,
            viewport.height.saturating_sub(frame_h) / 2,
        )
    }

    fn frame_size(&self, snap: &SessionSnapshot) -> (u16, u16) {
        let w = (snap.board.width.max(0) as u16).saturating_mul(self.cell_w);
        let h = snap.board.height.max(0) as u16;
        (w.saturating_add(2), h.saturating_add(2))
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &SessionSnapshot,
        hud: &Hud<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Style::default());

        let (frame_w, frame_h) = self.frame_size(snap);
        let (ox, oy) = self.frame_origin(snap, viewport);
        let well = Style::new(Rgb::new(70, 70, 80), Rgb::new(25, 25, 35));
        let border = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(ox + 1, oy + 1, frame_w - 2, frame_h - 2, ' ', well);
        draw_border(fb, ox, oy, frame_w, frame_h, border);

        let board = &snap.board;
        for y in 0..board.height {
            for x in 0..board.width {
                let Some(slot) = board.get(x, y) else {
                    continue;
                };
                let mut style = Style::new(occupant_color(slot.occupant), well.bg);
                if slot.movable {
                    style = style.bold();
                }
                let sx = ox + 1 + x as u16 * self.cell_w;
                let sy = oy + 1 + (board.height - 1 - y) as u16;
                for dx in 0..self.cell_w {
                    fb.put(sx + dx, sy, BLOCK, style);
                }
            }
        }

        self.draw_side_panel(fb, hud, ox + frame_w + 2, oy + 1);

        if snap.game_over {
            draw_overlay(fb, ox, oy, frame_w, frame_h, "GAME OVER");
        } else if hud.paused {
            draw_overlay(fb, ox, oy, frame_w, frame_h, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &SessionSnapshot, hud: &Hud<'_>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, hud: &Hud<'_>, x: u16, y: u16) {
        let label = Style::new(Rgb::new(150, 150, 160), Rgb::new(0, 0, 0));
        let value = Style::default().bold();

        fb.put_str(x, y, "SCORE", label);
        fb.put_str(x, y + 1, &hud.score.to_string(), value);
        fb.put_str(x, y + 3, "LINES", label);
        fb.put_str(x, y + 4, &hud.lines.to_string(), value);
        fb.put_str(x, y + 6, "DROP", label);
        fb.put_str(x, y + 7, &format!("{}ms", hud.drop_ms), value);
        fb.put_str(x, y + 9, "NEXT", label);
        if let Some(best) = hud.best {
            fb.put_str(x, y + 15, "BEST", label);
            fb.put_str(x, y + 16, &best.to_string(), value);
        }

        let Some(shape) = hud.preview else {
            return;
        };
        let min_x = shape.offsets().iter().map(|c| c.x).min().unwrap_or(0);
        let max_y = shape.offsets().iter().map(|c| c.y).max().unwrap_or(0);
        let style = Style::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        for c in shape.offsets() {
            let sx = x + ((c.x - min_x) as u16) * self.cell_w;
            let sy = y + 10 + (max_y - c.y) as u16;
            for dx in 0..self.cell_w {
                fb.put(sx + dx, sy, BLOCK, style);
            }
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: Style) {
    if w < 2 || h < 2 {
        return;
    }
    let right = x + w - 1;
    let bottom = y + h - 1;
    for cx in x + 1..right {
        fb.put(cx, y, '─', style);
        fb.put(cx, bottom, '─', style);
    }
    for cy in y + 1..bottom {
        fb.put(x, cy, '│', style);
        fb.put(right, cy, '│', style);
    }
    fb.put(x, y, '┌', style);
    fb.put(right, y, '┐', style);
    fb.put(x, bottom, '└', style);
    fb.put(right, bottom, '┘', style);
}

fn draw_overlay(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, text: &str) {
    let len = text.chars().count() as u16;
    let tx = x + w.saturating_sub(len) / 2;
    let ty = y + h / 2;
    let style = Style::new(Rgb::new(255, 255, 255), Rgb::new(120, 30, 30)).bold();
    fb.put_str(tx, ty, text, style);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_stable_per_piece() {
        assert_eq!(
            occupant_color(OccupantId::new(3, 0)),
            occupant_color(OccupantId::new(3, 2))
        );
        assert_ne!(
            occupant_color(OccupantId::new(1, 0)),
            occupant_color(OccupantId::new(2, 0))
        );
    }
}
