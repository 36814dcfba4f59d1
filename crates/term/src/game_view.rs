//! GameView: maps a `core::GameSnapshot` into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{get_shape, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceColor, PieceKind, Rotation, SessionState, BOARD_HEIGHT, BOARD_WIDTH};

const PLAY_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

/// Opacity of a clearing row's cells for clear phases 0..=3
const CLEAR_OPACITY: [u8; 4] = [100, 70, 40, 10];

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

/// Which record form field has the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Name,
    Country,
}

/// Text of the new-record form being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordFormView<'a> {
    pub name: &'a str,
    pub country: &'a str,
    pub focus: FormField,
}

/// High score holder details plus the open form, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordView<'a> {
    pub holder: Option<&'a str>,
    pub country: Option<&'a str>,
    pub form: Option<RecordFormView<'a>>,
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

/// Screen rectangle of the bordered board
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
            cell_w,
            cell_h,
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the terminal
    /// size changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        self.render_into_with_record(snap, &RecordView::default(), viewport, fb);
    }

    pub fn render_into_with_record(
        &self,
        snap: &GameSnapshot,
        record: &RecordView<'_>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_px_w = (BOARD_WIDTH as u16) * self.cell_w;
        let board_px_h = (BOARD_HEIGHT as u16) * self.cell_h;
        let frame_w = board_px_w + 2;
        let frame_h = board_px_h + 2;

        let frame = Frame {
            x: viewport.width.saturating_sub(frame_w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            w: frame_w,
            h: frame_h,
        };

        let bg = CellStyle::new(Rgb::new(80, 80, 90), PLAY_BG);
        let border = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        fb.fill_rect(frame.x + 1, frame.y + 1, board_px_w, board_px_h, ' ', bg);
        self.draw_border(fb, frame, border);

        // Locked board cells, fading while their row clears.
        let opacity = CLEAR_OPACITY[(snap.clear_phase as usize).min(3)];
        for y in 0..BOARD_HEIGHT as u16 {
            let clearing = snap.clearing_rows[y as usize];
            for x in 0..BOARD_WIDTH as u16 {
                match PieceKind::from_code(snap.board[y as usize][x as usize]) {
                    Some(kind) if clearing => {
                        let fg = piece_rgb(kind.color()).over(PLAY_BG, opacity);
                        let style = CellStyle::new(fg, PLAY_BG);
                        self.fill_cell_rect(fb, frame, x, y, '█', style);
                    }
                    Some(kind) => self.draw_board_cell(fb, frame, x, y, kind),
                    None => self.draw_empty_cell(fb, frame, x, y),
                }
            }
        }

        // Ghost piece, then the active piece on top of it.
        if let Some(cells) = snap.ghost_cells() {
            let ghost_style = CellStyle::new(Rgb::new(140, 140, 140), PLAY_BG).dim();
            for (x, y) in cells {
                if let Some((x, y)) = on_board(x, y) {
                    self.fill_cell_rect(fb, frame, x, y, '░', ghost_style);
                }
            }
        }
        if let Some(active) = snap.active {
            for (x, y) in active.cells() {
                if let Some((x, y)) = on_board(x, y) {
                    self.draw_board_cell(fb, frame, x, y, active.kind);
                }
            }
        }

        self.draw_side_panel(fb, snap, record, viewport, frame);

        if let Some(form) = record.form {
            self.draw_record_form(fb, frame, snap, &form);
            return;
        }
        match snap.state {
            SessionState::Menu => self.draw_overlay(
                fb,
                frame,
                &["BLOCKFALL", "", "ENTER to start", "Q to quit"],
            ),
            SessionState::Paused => self.draw_overlay(fb, frame, &["PAUSED", "", "P / ESC to resume"]),
            SessionState::GameOver => {
                self.draw_overlay(fb, frame, &["GAME OVER", "", "", "ENTER to play again"]);
                let mid_y = frame.y + frame.h / 2;
                let x = frame.x + frame.w / 2 - 5;
                let value = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG);
                let end = fb.put_str(x, mid_y, "SCORE ", value);
                fb.put_u32(end, mid_y, snap.score, value.bold());
            }
            SessionState::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    pub fn render_with_record(
        &self,
        snap: &GameSnapshot,
        record: &RecordView<'_>,
        viewport: Viewport,
    ) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into_with_record(snap, record, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_empty_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16) {
        let style = CellStyle::new(Rgb::new(90, 90, 100), PLAY_BG).dim();
        self.fill_cell_rect(fb, frame, x, y, '·', style);
    }

    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: u16, y: u16, kind: PieceKind) {
        let style = CellStyle::new(piece_rgb(kind.color()), PLAY_BG).bold();
        self.fill_cell_rect(fb, frame, x, y, '█', style);
    }

    fn fill_cell_rect(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        cell_x: u16,
        cell_y: u16,
        ch: char,
        style: CellStyle,
    ) {
        let px = frame.x + 1 + cell_x * self.cell_w;
        let py = frame.y + 1 + cell_y * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        record: &RecordView<'_>,
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

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = frame.y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        match snap.next {
            Some(kind) => {
                let style = CellStyle::new(piece_rgb(kind.color()), SCREEN_BG).bold();
                for (dx, dy) in get_shape(kind, Rotation::North) {
                    let x = panel_x + dx as u16 * 2;
                    fb.put_str(x, y + dy as u16, "██", style);
                }
            }
            None => {
                fb.put_str(panel_x, y, "-", value);
            }
        }
        y = y.saturating_add(3);

        fb.put_str(panel_x, y, "HIGH", label);
        y = y.saturating_add(1);
        fb.put_u32(panel_x, y, snap.high_score, value);
        if let Some(holder) = record.holder {
            y = y.saturating_add(1);
            let dim = value.dim();
            let end = fb.put_str(panel_x, y, holder, dim);
            if let Some(country) = record.country {
                let end = fb.put_str(end, y, " · ", dim);
                fb.put_str(end, y, country, dim);
            }
        }
    }

    /// Blank a band across the board and center `lines` in it
    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
        let band_h = lines.len() as u16 + 2;
        let top = frame.y + frame.h.saturating_sub(band_h) / 2;
        let band = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG);
        fb.fill_rect(frame.x + 1, top, frame.w.saturating_sub(2), band_h, ' ', band);

        for (i, line) in lines.iter().enumerate() {
            let style = if i == 0 { band.bold() } else { band };
            fb.put_str_centered(frame.x, frame.w, top + 1 + i as u16, line, style);
        }
    }

    fn draw_record_form(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &GameSnapshot,
        form: &RecordFormView<'_>,
    ) {
        self.draw_overlay(
            fb,
            frame,
            &["NEW RECORD!", "", "", "", "", "", "TAB field  ENTER save", "ESC skip"],
        );

        let top = frame.y + frame.h.saturating_sub(10) / 2;
        let text = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG);
        let focused = text.bold();
        let x = frame.x + 2;

        let end = fb.put_str(x, top + 3, "SCORE ", text);
        fb.put_u32(end, top + 3, snap.score, focused);

        for (row, label, content, field) in [
            (top + 4, "Name    ", form.name, FormField::Name),
            (top + 5, "Country ", form.country, FormField::Country),
        ] {
            let has_focus = form.focus == field;
            let style = if has_focus { focused } else { text };
            let end = fb.put_str(x, row, label, style);
            let end = fb.put_str(end, row, content, style);
            if has_focus {
                fb.put_char(end, row, '_', focused);
            }
        }
    }
}

fn on_board(x: i8, y: i8) -> Option<(u16, u16)> {
    if x >= 0 && x < BOARD_WIDTH as i8 && y >= 0 && y < BOARD_HEIGHT as i8 {
        Some((x as u16, y as u16))
    } else {
        None
    }
}

fn piece_rgb(color: PieceColor) -> Rgb {
    match color {
        PieceColor::Cyan => Rgb::new(80, 220, 220),
        PieceColor::Yellow => Rgb::new(240, 220, 80),
        PieceColor::Purple => Rgb::new(200, 120, 220),
        PieceColor::Green => Rgb::new(100, 220, 120),
        PieceColor::Red => Rgb::new(220, 80, 80),
        PieceColor::Blue => Rgb::new(80, 120, 220),
        PieceColor::Orange => Rgb::new(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_rows_fade_by_phase() {
        let mut snap = GameSnapshot::default();
        snap.state = SessionState::Playing;
        snap.board[19] = [PieceKind::I.code(); BOARD_WIDTH as usize];
        snap.clearing_rows[19] = true;

        let view = GameView::default();
        let viewport = Viewport::new(22, 22);
        let full = piece_rgb(PieceColor::Cyan);

        let mut last = full;
        for phase in 1..=3 {
            snap.clear_phase = phase;
            let fb = view.render(&snap, viewport);
            let fg = fb.get(1, 20).unwrap().style.fg;
            assert_ne!(fg, last, "phase {} did not fade", phase);
            last = fg;
        }
    }

    #[test]
    fn game_over_overlay_shows_score() {
        let mut snap = GameSnapshot::default();
        snap.state = SessionState::GameOver;
        snap.score = 1234;

        let fb = GameView::default().render(&snap, Viewport::new(22, 22));
        let all: Vec<String> = (0..22).map(|y| fb.row_text(y)).collect();
        assert!(all.iter().any(|row| row.contains("GAME OVER")));
        assert!(all.iter().any(|row| row.contains("SCORE 1234")));
    }

    #[test]
    fn record_form_shows_cursor_on_focused_field() {
        let mut snap = GameSnapshot::default();
        snap.state = SessionState::GameOver;
        let record = RecordView {
            holder: None,
            country: None,
            form: Some(RecordFormView {
                name: "Ada",
                country: "",
                focus: FormField::Name,
            }),
        };

        let fb = GameView::default().render_with_record(&snap, &record, Viewport::new(22, 22));
        let all: Vec<String> = (0..22).map(|y| fb.row_text(y)).collect();
        assert!(all.iter().any(|row| row.contains("NEW RECORD!")));
        assert!(all.iter().any(|row| row.contains("Name    Ada_")));
        assert!(!all.iter().any(|row| row.contains("GAME OVER")));
    }
}
