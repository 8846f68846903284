//! Framebuffer and style types for terminal rendering.

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `num / den` (used for covered tiles).
    pub const fn darken(self, num: u16, den: u16) -> Self {
        Self {
            r: (self.r as u16 * num / den) as u8,
            g: (self.g as u16 * num / den) as u8,
            b: (self.b as u16 * num / den) as u8,
        }
    }
}

/// Minimal per-cell styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellStyle {
    pub fg: Rgb,
    pub bg: Rgb,
    pub bold: bool,
    pub dim: bool,
}

impl CellStyle {
    pub const fn new(fg: Rgb, bg: Rgb) -> Self {
        Self {
            fg,
            bg,
            bold: false,
            dim: false,
        }
    }

    pub const fn bold(self) -> Self {
        Self { bold: true, ..self }
    }

    pub const fn dim(self) -> Self {
        Self { dim: true, ..self }
    }

    pub fn cell(self, ch: char) -> Cell {
        Cell { ch, style: self }
    }
}

impl Default for CellStyle {
    fn default() -> Self {
        Self::new(Rgb::new(220, 220, 220), Rgb::new(0, 0, 0))
    }
}

/// A single terminal cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub style: CellStyle,
}

impl Default for Cell {
    fn default() -> Self {
        CellStyle::default().cell(' ')
    }
}

/// 2D framebuffer of styled character cells.
///
/// Writes outside the buffer are clipped silently, so drawing code never has
/// to check bounds against a small terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
}

impl FrameBuffer {
    pub fn new(width: u16, height: u16) -> Self {
        let len = (width as usize) * (height as usize);
        Self {
            width,
            height,
            cells: vec![Cell::default(); len],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resize the framebuffer, keeping the allocation when possible.
    pub fn resize(&mut self, width: u16, height: u16) {
        if self.width == width && self.height == height {
            return;
        }
        self.width = width;
        self.height = height;
        let len = (width as usize) * (height as usize);
        self.cells.resize(len, Cell::default());
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline(always)]
    fn idx(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y as usize) * (self.width as usize) + (x as usize))
    }

    pub fn get(&self, x: u16, y: u16) -> Option<Cell> {
        self.idx(x, y).map(|i| self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.idx(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn clear(&mut self, cell: Cell) {
        self.cells.fill(cell);
    }

    pub fn put_char(&mut self, x: u16, y: u16, ch: char, style: CellStyle) {
        self.set(x, y, Cell { ch, style });
    }

    /// Write `s` left to right; returns the column after the last char.
    pub fn put_str(&mut self, x: u16, y: u16, s: &str, style: CellStyle) -> u16 {
        let mut cx = x;
        for ch in s.chars() {
            if cx >= self.width {
                break;
            }
            self.put_char(cx, y, ch, style);
            cx += 1;
        }
        cx
    }

    /// Write `s` centered in the span `[x, x + w)`.
    pub fn put_str_centered(&mut self, x: u16, y: u16, w: u16, s: &str, style: CellStyle) {
        let len = s.chars().count() as u16;
        self.put_str(x.saturating_add(w.saturating_sub(len) / 2), y, s, style);
    }

    /// Write a decimal number without allocating; returns the next column.
    pub fn put_u32(&mut self, x: u16, y: u16, n: u32, style: CellStyle) -> u16 {
        let mut digits = [0u8; 10];
        let mut len = 0;
        let mut v = n;
        loop {
            digits[len] = b'0' + (v % 10) as u8;
            len += 1;
            v /= 10;
            if v == 0 {
                break;
            }
        }
        let mut cx = x;
        for &d in digits[..len].iter().rev() {
            self.put_char(cx, y, d as char, style);
            cx = cx.saturating_add(1);
        }
        cx
    }

    pub fn fill_rect(&mut self, x: u16, y: u16, w: u16, h: u16, ch: char, style: CellStyle) {
        for dy in 0..h {
            for dx in 0..w {
                self.put_char(x.saturating_add(dx), y.saturating_add(dy), ch, style);
            }
        }
    }

    /// Single-line box outline; smaller than 2x2 draws nothing.
    pub fn draw_box(&mut self, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }
        let right = x.saturating_add(w - 1);
        let bottom = y.saturating_add(h - 1);

        self.put_char(x, y, '┌', style);
        self.put_char(right, y, '┐', style);
        self.put_char(x, bottom, '└', style);
        self.put_char(right, bottom, '┘', style);
        for dx in 1..w - 1 {
            self.put_char(x.saturating_add(dx), y, '─', style);
            self.put_char(x.saturating_add(dx), bottom, '─', style);
        }
        for dy in 1..h - 1 {
            self.put_char(x, y.saturating_add(dy), '│', style);
            self.put_char(right, y.saturating_add(dy), '│', style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(fb: &FrameBuffer, y: u16) -> String {
        (0..fb.width())
            .map(|x| fb.get(x, y).map(|c| c.ch).unwrap_or(' '))
            .collect()
    }

    #[test]
    fn put_u32_writes_digits() {
        let mut fb = FrameBuffer::new(12, 1);
        let next = fb.put_u32(0, 0, 4096, CellStyle::default());
        assert_eq!(next, 4);
        fb.put_u32(6, 0, 0, CellStyle::default());
        assert_eq!(row(&fb, 0), "4096  0     ");
    }

    #[test]
    fn writes_are_clipped() {
        let mut fb = FrameBuffer::new(3, 2);
        fb.put_str(1, 0, "abcdef", CellStyle::default());
        fb.put_char(5, 5, 'x', CellStyle::default());
        assert_eq!(row(&fb, 0), " ab");
        assert_eq!(row(&fb, 1), "   ");
    }

    #[test]
    fn draw_box_outline() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.draw_box(0, 0, 4, 3, CellStyle::default());
        assert_eq!(row(&fb, 0), "┌──┐");
        assert_eq!(row(&fb, 1), "│  │");
        assert_eq!(row(&fb, 2), "└──┘");
    }

    #[test]
    fn centered_text() {
        let mut fb = FrameBuffer::new(7, 1);
        fb.put_str_centered(0, 0, 7, "WIN", CellStyle::default());
        assert_eq!(row(&fb, 0), "  WIN  ");
    }

    #[test]
    fn darken_scales_channels() {
        assert_eq!(Rgb::new(200, 100, 50).darken(1, 2), Rgb::new(100, 50, 25));
    }
}
