//! GameView: maps a session snapshot into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Board units map to cells at 8 units per column and 16 per row, so a 64x64
//! tile is 8 columns by 4 rows. Tiles are painted in z-index order, with every
//! available tile lifted above every covered one.

use crate::core::{BoardTile, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameStatus, Tile, TileId, TileKind, TILE_SIZE};

pub const UNITS_PER_COL: i32 = 8;
pub const UNITS_PER_ROW: i32 = 16;
pub const TILE_COLS: u16 = (TILE_SIZE / UNITS_PER_COL) as u16;
pub const TILE_ROWS: u16 = (TILE_SIZE / UNITS_PER_ROW) as u16;

/// Horizontal pitch of a slot bar cell (5-wide mini tile plus a gap).
const SLOT_PITCH: u16 = 6;
const BAR_H: u16 = 5;
const PANEL_W: u16 = 22;

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const CURSOR: Rgb = Rgb::new(255, 220, 0);

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Front-end state drawn next to the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HudView {
    pub music: bool,
    pub analytics: bool,
    /// Tile under the keyboard cursor.
    pub cursor: Option<TileId>,
}

/// Where each part of a frame lands on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub frame_x: u16,
    pub frame_y: u16,
    pub frame_w: u16,
    pub frame_h: u16,
    pub bar_x: u16,
    pub bar_y: u16,
    pub bar_w: u16,
    pub panel_x: u16,
}

impl ScreenLayout {
    /// Top-left cell of a tile footprint.
    pub fn tile_origin(&self, tile: &Tile) -> (u16, u16) {
        let col = (tile.x.max(0) / UNITS_PER_COL) as u16;
        let row = (tile.y.max(0) / UNITS_PER_ROW) as u16;
        (
            self.frame_x + 1 + col,
            self.frame_y + 1 + row,
        )
    }

    pub fn tile_contains(&self, tile: &Tile, column: u16, row: u16) -> bool {
        let (x, y) = self.tile_origin(tile);
        column >= x && column < x + TILE_COLS && row >= y && row < y + TILE_ROWS
    }
}

/// Board tiles in paint order: covered tiles first, then available ones,
/// each group by z-index.
pub fn paint_order(snap: &GameSnapshot) -> impl DoubleEndedIterator<Item = &BoardTile> {
    snap.board
        .iter()
        .filter(|b| !b.available)
        .chain(snap.board.iter().filter(|b| b.available))
}

/// Cycle the keyboard cursor over available tiles in reading order.
///
/// Returns `None` when nothing is selectable.
pub fn next_cursor(snap: &GameSnapshot, current: Option<TileId>, forward: bool) -> Option<TileId> {
    let mut avail: Vec<&Tile> = snap
        .board
        .iter()
        .filter(|b| b.available)
        .map(|b| &b.tile)
        .collect();
    if avail.is_empty() {
        return None;
    }
    avail.sort_by_key(|t| (t.y, t.x, t.id));

    let n = avail.len();
    let next = match current.and_then(|id| avail.iter().position(|t| t.id == id)) {
        Some(i) if forward => (i + 1) % n,
        Some(i) => (i + n - 1) % n,
        None if forward => 0,
        None => n - 1,
    };
    Some(avail[next].id)
}

pub fn kind_color(kind: TileKind) -> Rgb {
    match kind {
        TileKind::Member1 => Rgb::new(230, 90, 90),
        TileKind::Member2 => Rgb::new(240, 160, 60),
        TileKind::Member3 => Rgb::new(230, 210, 70),
        TileKind::Member4 => Rgb::new(110, 210, 100),
        TileKind::Member5 => Rgb::new(70, 200, 200),
        TileKind::Member6 => Rgb::new(90, 140, 240),
        TileKind::Member7 => Rgb::new(170, 110, 230),
        TileKind::Member8 => Rgb::new(230, 120, 200),
        TileKind::Member9 => Rgb::new(180, 180, 180),
        TileKind::Member10 => Rgb::new(160, 120, 80),
    }
}

fn kind_glyph(kind: TileKind) -> char {
    match kind {
        TileKind::Member1 => '♠',
        TileKind::Member2 => '♥',
        TileKind::Member3 => '♦',
        TileKind::Member4 => '♣',
        TileKind::Member5 => '★',
        TileKind::Member6 => '●',
        TileKind::Member7 => '▲',
        TileKind::Member8 => '■',
        TileKind::Member9 => '◆',
        TileKind::Member10 => '✿',
    }
}

fn digits(n: u32) -> u16 {
    if n >= 10 {
        2
    } else {
        1
    }
}

/// A lightweight terminal renderer for the collector board.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn layout(&self, snap: &GameSnapshot, viewport: Viewport) -> ScreenLayout {
        let board_w = ((snap.extent.0.max(0) + UNITS_PER_COL - 1) / UNITS_PER_COL) as u16;
        let board_h = ((snap.extent.1.max(0) + UNITS_PER_ROW - 1) / UNITS_PER_ROW) as u16;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let bar_w = snap.max_slots as u16 * SLOT_PITCH + 3;

        let block_w = frame_w.max(bar_w);
        let total_w = block_w + 2 + PANEL_W;
        let total_h = frame_h + BAR_H;

        let frame_x = viewport.width.saturating_sub(total_w) / 2;
        let frame_y = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };

        ScreenLayout {
            frame_x,
            frame_y,
            frame_w,
            frame_h,
            bar_x: frame_x,
            bar_y: frame_y + frame_h,
            bar_w,
            panel_x: frame_x + block_w + 2,
        }
    }

    /// Render the current snapshot into an existing framebuffer.
    ///
    /// Callers can reuse a framebuffer across frames and only resize when the
    /// terminal size changes.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        hud: Option<&HudView>,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let lay = self.layout(snap, viewport);
        let border = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));

        fb.fill_rect(
            lay.frame_x + 1,
            lay.frame_y + 1,
            lay.frame_w - 2,
            lay.frame_h - 2,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG),
        );
        fb.draw_box(lay.frame_x, lay.frame_y, lay.frame_w, lay.frame_h, border);

        let cursor = hud.and_then(|h| h.cursor);
        for b in paint_order(snap) {
            let (x, y) = lay.tile_origin(&b.tile);
            self.draw_tile(fb, x, y, &b.tile, b.available, cursor == Some(b.tile.id));
        }

        self.draw_slot_bar(fb, snap, &lay, border);
        self.draw_side_panel(fb, snap, hud, viewport, &lay);

        match snap.status {
            GameStatus::Playing => {}
            GameStatus::Won => self.draw_overlay(fb, &lay, "LEVEL CLEAR!", "n: next level  r: replay"),
            GameStatus::Lost if snap.has_shared => {
                self.draw_overlay(fb, &lay, "GAME OVER", "r: try again")
            }
            GameStatus::Lost => self.draw_overlay(fb, &lay, "GAME OVER", "s: share for +1 slot"),
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, hud: Option<&HudView>, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, hud, viewport, &mut fb);
        fb
    }

    /// Topmost available tile under a terminal cell, if any.
    pub fn tile_at(
        &self,
        snap: &GameSnapshot,
        viewport: Viewport,
        column: u16,
        row: u16,
    ) -> Option<TileId> {
        let lay = self.layout(snap, viewport);
        paint_order(snap)
            .rev()
            .find(|b| lay.tile_contains(&b.tile, column, row))
            .filter(|b| b.available)
            .map(|b| b.tile.id)
    }

    fn draw_tile(&self, fb: &mut FrameBuffer, x: u16, y: u16, tile: &Tile, available: bool, cursor: bool) {
        let base = kind_color(tile.kind);
        let face = if available {
            CellStyle::new(Rgb::new(245, 245, 245), base.darken(2, 5)).bold()
        } else {
            CellStyle::new(Rgb::new(120, 120, 120), base.darken(1, 6)).dim()
        };
        let edge = if cursor {
            CellStyle { fg: CURSOR, ..face }.bold()
        } else if available {
            CellStyle { fg: base, ..face }
        } else {
            face
        };

        fb.fill_rect(x, y, TILE_COLS, TILE_ROWS, ' ', face);
        fb.draw_box(x, y, TILE_COLS, TILE_ROWS, edge);

        let n = tile.kind.number() as u32;
        fb.put_u32(x + (TILE_COLS - digits(n)) / 2, y + 1, n, face);
        fb.put_char(x + TILE_COLS / 2 - 1, y + 2, kind_glyph(tile.kind), CellStyle { fg: base, ..face });
    }

    fn draw_slot_bar(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, lay: &ScreenLayout, border: CellStyle) {
        let full = snap.slot_bar.len() >= snap.max_slots;
        let frame = if full {
            CellStyle { fg: Rgb::new(240, 90, 90), ..border }.bold()
        } else {
            border
        };
        fb.draw_box(lay.bar_x, lay.bar_y, lay.bar_w, BAR_H, frame);
        fb.put_str(lay.bar_x + 2, lay.bar_y, " SLOTS ", frame);

        let empty = CellStyle::new(Rgb::new(90, 90, 100), Rgb::new(0, 0, 0)).dim();
        for i in 0..snap.max_slots {
            let sx = lay.bar_x + 2 + i as u16 * SLOT_PITCH;
            let sy = lay.bar_y + 1;
            match snap.slot_bar.get(i) {
                Some(tile) => {
                    let base = kind_color(tile.kind);
                    let face = CellStyle::new(Rgb::new(245, 245, 245), base.darken(2, 5)).bold();
                    fb.fill_rect(sx, sy, 5, 3, ' ', face);
                    fb.draw_box(sx, sy, 5, 3, CellStyle { fg: base, ..face });
                    let n = tile.kind.number() as u32;
                    fb.put_u32(sx + (5 - digits(n)) / 2, sy + 1, n, face);
                }
                None => fb.put_char(sx + 2, sy + 1, '·', empty),
            }
        }
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        hud: Option<&HudView>,
        viewport: Viewport,
        lay: &ScreenLayout,
    ) {
        let panel_x = lay.panel_x;
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::default().bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let hint = value.dim();

        let mut y = lay.frame_y;
        fb.put_str(panel_x, y, "LEVEL", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.level.number() as u32, value);
        y += 2;

        fb.put_str(panel_x, y, "TILES LEFT", label);
        y += 1;
        let x = fb.put_u32(panel_x, y, snap.remaining() as u32, value);
        let x = fb.put_str(x, y, " / ", hint);
        fb.put_u32(x, y, snap.tile_count as u32, hint);
        y += 2;

        fb.put_str(panel_x, y, "CLEARED", label);
        y += 1;
        fb.put_u32(panel_x, y, snap.cleared as u32, value);
        y += 2;

        fb.put_str(panel_x, y, "SLOTS", label);
        y += 1;
        let x = fb.put_u32(panel_x, y, snap.slot_bar.len() as u32, value);
        let x = fb.put_str(x, y, " / ", hint);
        fb.put_u32(x, y, snap.max_slots as u32, value);
        if !snap.pending.is_empty() {
            let x = fb.put_str(panel_x + 8, y, "+", hint);
            let x = fb.put_u32(x, y, snap.pending.len() as u32, hint);
            fb.put_str(x, y, " flying", hint);
        }
        y += 2;

        fb.put_str(panel_x, y, "STATUS", label);
        y += 1;
        let status = match snap.status {
            GameStatus::Playing => "PLAYING",
            GameStatus::Won => "WON",
            GameStatus::Lost => "LOST",
        };
        fb.put_str(panel_x, y, status, value);
        y += 2;

        if let Some(h) = hud {
            fb.put_str(panel_x, y, "MUSIC", label);
            fb.put_str(panel_x + 8, y, if h.music { "ON" } else { "OFF" }, value);
            y += 1;
            fb.put_str(panel_x, y, "SHARED", label);
            fb.put_str(panel_x + 8, y, if snap.has_shared { "YES" } else { "NO" }, value);
            y += 1;
            if h.analytics {
                fb.put_str(panel_x, y, "analytics on", hint);
            }
            y += 2;
        }

        for line in [
            "click/enter pick",
            "tab   move cursor",
            "r     restart",
            "l     switch level",
            "s     share",
            "m     music",
            "q     quit",
        ] {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, hint);
            y += 1;
        }
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, lay: &ScreenLayout, title: &str, hint: &str) {
        let w = (hint.chars().count() as u16 + 4).max(20).min(lay.frame_w);
        let h = 5;
        let x = lay.frame_x + lay.frame_w.saturating_sub(w) / 2;
        let y = lay.frame_y + lay.frame_h.saturating_sub(h) / 2;

        let panel = CellStyle::new(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0));
        fb.fill_rect(x, y, w, h, ' ', panel);
        fb.draw_box(x, y, w, h, panel);
        fb.put_str_centered(x, y + 1, w, title, panel.bold());
        fb.put_str_centered(x, y + 3, w, hint, panel.dim());
    }
}
