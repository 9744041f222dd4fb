//! GameView: paints a [`GameSnapshot`] into a terminal framebuffer.
//!
//! Pure, no I/O. Board size comes from the snapshot, so any configured
//! dimensions render without changes here.

use crate::core::{GameSnapshot, Shape};
use crate::fb::{FrameBuffer, Glyph, GlyphStyle};
use crate::types::{Cell, Phase, Rgb};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_W: u16 = 12;

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

/// Screen-space placement of the board frame for one render.
#[derive(Debug, Clone, Copy)]
struct Layout {
    x: u16,
    y: u16,
    frame_w: u16,
    frame_h: u16,
}

pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    show_ghost: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up a cell in most terminal fonts.
        Self {
            cell_w: 2,
            cell_h: 1,
            show_ghost: true,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    pub fn with_ghost(mut self, show_ghost: bool) -> Self {
        self.show_ghost = show_ghost;
        self
    }

    /// Terminal size needed to show the board frame and the side panel
    pub fn required_size(&self, rows: u16, cols: u16) -> Viewport {
        let frame_w = cols * self.cell_w + 2;
        let frame_h = rows * self.cell_h + 2;
        Viewport::new(frame_w + 2 + PANEL_MIN_W, frame_h)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.fill(Glyph::default());

        let frame_w = snap.cols * self.cell_w + 2;
        let frame_h = snap.rows * self.cell_h + 2;
        let panel_w = if viewport.width >= frame_w + 2 + PANEL_MIN_W {
            PANEL_MIN_W + 2
        } else {
            0
        };
        let layout = Layout {
            x: viewport.width.saturating_sub(frame_w + panel_w) / 2,
            y: viewport.height.saturating_sub(frame_h) / 2,
            frame_w,
            frame_h,
        };

        self.draw_border(fb, layout);
        self.draw_locked(fb, snap, layout);

        if let Some(active) = snap.active {
            if self.show_ghost {
                if let Some(ghost_row) = snap.ghost_row.filter(|&r| r != active.row) {
                    let style = GlyphStyle {
                        bg: BOARD_BG,
                        dim: true,
                        ..GlyphStyle::fg(active.color)
                    };
                    self.draw_shape(fb, snap, layout, &active.shape, ghost_row, active.col, '░', style);
                }
            }
            let style = GlyphStyle {
                bg: BOARD_BG,
                bold: true,
                ..GlyphStyle::fg(active.color)
            };
            self.draw_shape(fb, snap, layout, &active.shape, active.row, active.col, '█', style);
        }

        if panel_w > 0 {
            self.draw_side_panel(fb, snap, layout);
        }

        if snap.phase == Phase::GameOver {
            self.draw_game_over(fb, layout);
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, l: Layout) {
        let style = GlyphStyle::fg(Rgb::new(200, 200, 200));
        let (right, bottom) = (l.x + l.frame_w - 1, l.y + l.frame_h - 1);

        fb.put_char(l.x, l.y, '┌', style);
        fb.put_char(right, l.y, '┐', style);
        fb.put_char(l.x, bottom, '└', style);
        fb.put_char(right, bottom, '┘', style);
        for x in l.x + 1..right {
            fb.put_char(x, l.y, '─', style);
            fb.put_char(x, bottom, '─', style);
        }
        for y in l.y + 1..bottom {
            fb.put_char(l.x, y, '│', style);
            fb.put_char(right, y, '│', style);
        }
    }

    fn draw_locked(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, l: Layout) {
        let empty = GlyphStyle {
            bg: BOARD_BG,
            dim: true,
            ..GlyphStyle::fg(Rgb::new(90, 90, 100))
        };
        for row in 0..snap.rows {
            for col in 0..snap.cols {
                match snap.cell(row as i32, col as i32) {
                    Some(Cell::Occupied(color)) => {
                        let style = GlyphStyle {
                            bg: BOARD_BG,
                            ..GlyphStyle::fg(color)
                        };
                        self.fill_cell(fb, l, row, col, '█', style);
                    }
                    _ => self.fill_cell(fb, l, row, col, '·', empty),
                }
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn draw_shape(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        l: Layout,
        shape: &Shape,
        origin_row: i32,
        origin_col: i32,
        ch: char,
        style: GlyphStyle,
    ) {
        for (r, c) in shape.filled_cells() {
            let row = origin_row + r as i32;
            let col = origin_col + c as i32;
            if row >= 0 && col >= 0 && row < snap.rows as i32 && col < snap.cols as i32 {
                self.fill_cell(fb, l, row as u16, col as u16, ch, style);
            }
        }
    }

    fn fill_cell(&self, fb: &mut FrameBuffer, l: Layout, row: u16, col: u16, ch: char, style: GlyphStyle) {
        let px = l.x + 1 + col * self.cell_w;
        let py = l.y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, l: Layout) {
        let x = l.x + l.frame_w + 2;
        let label = GlyphStyle {
            bold: true,
            ..GlyphStyle::default()
        };
        let value = GlyphStyle::fg(Rgb::new(200, 200, 200));

        let stats: [(&str, String); 4] = [
            ("SCORE", snap.score.to_string()),
            ("COMBO", snap.combo.to_string()),
            ("LINES", snap.lines.to_string()),
            ("SPEED", format!("{}ms", snap.fall_interval_ms)),
        ];
        let mut y = l.y;
        for (name, text) in &stats {
            fb.put_str(x, y, name, label);
            fb.put_str(x, y + 1, text, value);
            y += 3;
        }

        fb.put_str(x, y, "NEXT", label);
        y += 1;
        match snap.next {
            Some(next) => {
                let style = GlyphStyle::fg(next.color);
                for (r, c) in next.shape.filled_cells() {
                    fb.fill_rect(x + c as u16 * 2, y + r as u16, 2, 1, '█', style);
                }
            }
            None => fb.put_str(x, y, "-", value),
        }
    }

    fn draw_game_over(&self, fb: &mut FrameBuffer, l: Layout) {
        let style = GlyphStyle {
            bold: true,
            ..GlyphStyle::fg(Rgb::new(255, 255, 255))
        };
        let hint = GlyphStyle::fg(Rgb::new(200, 200, 200));
        let mid_y = l.y + l.frame_h / 2;
        for (dy, text, style) in [(0u16, "GAME OVER", style), (1, "R: restart", hint)] {
            let w = text.chars().count() as u16;
            let x = l.x + l.frame_w.saturating_sub(w) / 2;
            fb.put_str(x, mid_y + dy, text, style);
        }
    }
}
