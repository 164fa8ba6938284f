//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{GameSnapshot, Piece};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{RunState, Skin, BOARD_COLS, BOARD_ROWS};

const PLAY_BG: Rgb = Rgb::new(22, 14, 30);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

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

/// One leaderboard line: a display label (usually a shortened wallet) and its best score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelRow {
    pub label: String,
    pub score: u32,
}

/// Leaderboard side panel contents, prepared by the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardPanel {
    /// Connected wallet, already shortened for display.
    pub wallet: Option<String>,
    /// One-line status of the last submission ("saved", "offline", ...).
    pub status: Option<String>,
    pub rows: Vec<PanelRow>,
}

/// A lightweight terminal renderer for the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

/// Where the board frame landed inside the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render the current game state into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it is only reallocated
    /// when the viewport grows.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_panel(snap, None, viewport, fb);
    }

    pub fn render_into_with_panel(
        &self,
        snap: &GameSnapshot,
        panel: Option<&LeaderboardPanel>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let frame = self.frame_for(viewport);
        let board_px_w = (BOARD_COLS as u16) * self.cell_w;
        let board_px_h = (BOARD_ROWS as u16) * self.cell_h;

        let bg = CellStyle::plain(Rgb::new(70, 60, 80), PLAY_BG);
        let border = CellStyle::plain(Rgb::new(255, 140, 0), PANEL_BG);

        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, frame, border);

        // Settled cells.
        for row in 0..BOARD_ROWS as u16 {
            for col in 0..BOARD_COLS as u16 {
                match Skin::from_u8(snap.board[row as usize][col as usize]) {
                    Some(skin) => self.draw_board_cell(fb, frame, col, row, skin),
                    None => self.draw_empty_cell(fb, frame, col, row),
                }
            }
        }

        // Active piece. Cells above the top edge are not drawn.
        if let Some(active) = snap.active {
            for (row, col) in active.cells() {
                if row >= 0 && row < BOARD_ROWS as i8 && col >= 0 && col < BOARD_COLS as i8 {
                    self.draw_board_cell(fb, frame, col as u16, row as u16, active.skin);
                }
            }
        }

        self.draw_side_panel(fb, snap, panel, viewport, frame);

        match snap.run_state {
            RunState::Idle => self.draw_overlay(fb, frame, "READY", Some("ENTER/SPACE: START")),
            RunState::GameOver => self.draw_overlay(fb, frame, "GAME OVER", Some("ENTER/SPACE: RETRY")),
            RunState::Running => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_panel(
        &self,
        snap: &GameSnapshot,
        panel: Option<&LeaderboardPanel>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_panel(snap, panel, viewport, &mut fb);
        fb
    }

    /// Terminal position of the top-left corner of board cell (row, col).
    pub fn cell_origin(&self, viewport: Viewport, row: u16, col: u16) -> (u16, u16) {
        let frame = self.frame_for(viewport);
        (
            frame.x + 1 + col * self.cell_w,
            frame.y + 1 + row * self.cell_h,
        )
    }

    fn frame_for(&self, viewport: Viewport) -> Frame {
        let w = (BOARD_COLS as u16) * self.cell_w + 2;
        let h = (BOARD_ROWS as u16) * self.cell_h + 2;
        let x = viewport.width.saturating_sub(w) / 2;
        let y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(h) / 2,
            AnchorY::Top => 0,
        };
        Frame { x, y, w, h }
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '╔', style);
        fb.put_char(x + w - 1, y, '╗', style);
        fb.put_char(x, y + h - 1, '╚', style);
        fb.put_char(x + w - 1, y + h - 1, '╝', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '═', style);
            fb.put_char(x + dx, y + h - 1, '═', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '║', style);
            fb.put_char(x + w - 1, y + dy, '║', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, col: u16, row: u16) {
        let style = CellStyle {
            dim: true,
            ..CellStyle::plain(Rgb::new(70, 60, 80), PLAY_BG)
        };
        self.fill_cell_rect(fb, frame, col, row, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, col: u16, row: u16, skin: Skin) {
        let (fg, ch) = skin_glyph(skin);
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(fg, PLAY_BG)
        };
        self.fill_cell_rect(fb, frame, col, row, ch, style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        col: u16,
        row: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + col * self.cell_w;
        let py = frame.y + 1 + row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        panel: Option<&LeaderboardPanel>,
        viewport: Viewport,
        frame: Frame,
    ) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width {
            return;
        }
        let panel_w = viewport.width - panel_x;
        if panel_w < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(255, 140, 0), PANEL_BG)
        };
        let value = CellStyle::plain(Rgb::new(220, 220, 220), PANEL_BG);
        let dim = CellStyle { dim: true, ..value };

        let mut y = frame.y;
        fb.put_str(panel_x, y, "SCORE", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.score, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "LINES", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.lines, value);
        y = y.saturating_add(2);

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        match snap.next {
            Some(next) => {
                self.draw_preview(fb, panel_x, y, next);
                y = y.saturating_add(next.shape.rows() as u16 * self.cell_h + 1);
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
                y = y.saturating_add(2);
            }
        }

        let Some(panel) = panel else {
            return;
        };

        if let Some(wallet) = &panel.wallet {
            fb.put_str(panel_x, y, "WALLET", label);
            y = y.saturating_add(1);
            fb.put_str(panel_x, y, wallet, value);
            y = y.saturating_add(1);
        }
        if let Some(status) = &panel.status {
            fb.put_str(panel_x, y, status, dim);
            y = y.saturating_add(1);
        }
        y = y.saturating_add(1);

        fb.put_str(panel_x, y, "TOP SPOOKS", label);
        y = y.saturating_add(1);
        if panel.rows.is_empty() {
            fb.put_str(panel_x, y, "no scores yet", dim);
            return;
        }
        for (i, row) in panel.rows.iter().enumerate() {
            if y >= viewport.height {
                break;
            }
            let x = fb.put_u32(panel_x, y, (i as u32) + 1, dim);
            let x = fb.put_str(x, y, ". ", dim);
            let x = fb.put_str(x, y, &row.label, value);
            fb.put_char(x, y, ' ', value);
            fb.put_u32(x + 1, y, row.score, value);
            y = y.saturating_add(1);
        }
    }

    /// Draw a piece's shape at a fixed terminal position (no board frame).
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: Piece) {
        let (fg, ch) = skin_glyph(piece.skin);
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(fg, PANEL_BG)
        };
        for (r, c) in piece.shape.filled() {
            let px = x + c as u16 * self.cell_w;
            let py = y + r as u16 * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, text: &str, hint: Option<&str>) {
        let mid_y = frame.y.saturating_add(frame.h / 2);
        let style = CellStyle {
            bold: true,
            ..CellStyle::plain(Rgb::new(255, 255, 255), PANEL_BG)
        };
        put_centered(fb, frame, mid_y, text, style);
        if let Some(hint) = hint {
            let dim = CellStyle {
                bold: false,
                dim: true,
                ..style
            };
            put_centered(fb, frame, mid_y.saturating_add(1), hint, dim);
        }
    }
}

fn put_centered(fb: &mut FrameBuffer, frame: Frame, y: u16, text: &str, style: CellStyle) {
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    fb.put_str(x, y, text, style);
}

/// Color and glyph for a skin.
pub fn skin_glyph(skin: Skin) -> (Rgb, char) {
    match skin {
        Skin::Pumpkin => (Rgb::new(255, 140, 0), '█'),
        Skin::Bat => (Rgb::new(150, 80, 210), '▓'),
        Skin::Ghost => (Rgb::new(235, 235, 245), '▒'),
        Skin::Skull => (Rgb::new(210, 205, 170), '█'),
    }
}
