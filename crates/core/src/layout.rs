//! Layout catalog - static tile slot positions per level
//!
//! Each level is an ordered list of `{x, y, layer}` slots. The order matters:
//! the generator sorts slots by layer with a stable sort, so slots sharing a
//! layer keep their catalog order and therefore their z-index order.
//!
//! Level 2 carries two side piles at `y = 400` whose tiles are offset by six
//! units; on a shared layer only the last tile of a pile is selectable.

use crate::types::Level;

/// One tile position on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot {
    pub x: i32,
    pub y: i32,
    pub layer: u8,
}

impl Slot {
    pub const fn new(x: i32, y: i32, layer: u8) -> Self {
        Self { x, y, layer }
    }
}

/// Board extent in board units (width, height) for level 1.
pub const LEVEL_ONE_EXTENT: (i32, i32) = (320, 300);

/// Board extent in board units (width, height) for level 2.
pub const LEVEL_TWO_EXTENT: (i32, i32) = (640, 480);

/// Slots for a level, in catalog order.
pub fn layout(level: Level) -> &'static [Slot] {
    match level {
        Level::One => &LEVEL_ONE_LAYOUT,
        Level::Two => &LEVEL_TWO_LAYOUT,
    }
}

/// Highest layer index used by a layout (0 for an empty layout).
pub fn top_layer(slots: &[Slot]) -> u8 {
    slots.iter().map(|s| s.layer).max().unwrap_or(0)
}

pub const LEVEL_ONE_LAYOUT: [Slot; 18] = [
    Slot::new(50, 50, 0),
    Slot::new(130, 50, 0),
    Slot::new(210, 50, 0),
    Slot::new(50, 130, 0),
    Slot::new(130, 130, 0),
    Slot::new(210, 130, 0),
    Slot::new(50, 210, 0),
    Slot::new(130, 210, 0),
    Slot::new(210, 210, 0),
    Slot::new(90, 90, 1),
    Slot::new(170, 90, 1),
    Slot::new(250, 90, 1),
    Slot::new(90, 170, 1),
    Slot::new(170, 170, 1),
    Slot::new(250, 170, 1),
    Slot::new(130, 130, 2),
    Slot::new(210, 130, 2),
    Slot::new(170, 170, 2),
];

pub const LEVEL_TWO_LAYOUT: [Slot; 156] = [
    Slot::new(180, 30, 0),
    Slot::new(230, 30, 0),
    Slot::new(280, 30, 0),
    Slot::new(330, 30, 0),
    Slot::new(380, 30, 0),
    Slot::new(430, 30, 0),
    Slot::new(130, 80, 0),
    Slot::new(180, 80, 0),
    Slot::new(230, 80, 0),
    Slot::new(280, 80, 0),
    Slot::new(330, 80, 0),
    Slot::new(380, 80, 0),
    Slot::new(430, 80, 0),
    Slot::new(480, 80, 0),
    Slot::new(130, 130, 0),
    Slot::new(180, 130, 0),
    Slot::new(230, 130, 0),
    Slot::new(280, 130, 0),
    Slot::new(330, 130, 0),
    Slot::new(380, 130, 0),
    Slot::new(430, 130, 0),
    Slot::new(480, 130, 0),
    Slot::new(180, 180, 0),
    Slot::new(230, 180, 0),
    Slot::new(280, 180, 0),
    Slot::new(330, 180, 0),
    Slot::new(380, 180, 0),
    Slot::new(430, 180, 0),
    Slot::new(20, 400, 0),
    Slot::new(26, 400, 0),
    Slot::new(32, 400, 0),
    Slot::new(38, 400, 0),
    Slot::new(44, 400, 0),
    Slot::new(50, 400, 0),
    Slot::new(56, 400, 0),
    Slot::new(62, 400, 0),
    Slot::new(68, 400, 0),
    Slot::new(74, 400, 0),
    Slot::new(466, 400, 0),
    Slot::new(472, 400, 0),
    Slot::new(478, 400, 0),
    Slot::new(484, 400, 0),
    Slot::new(490, 400, 0),
    Slot::new(496, 400, 0),
    Slot::new(502, 400, 0),
    Slot::new(508, 400, 0),
    Slot::new(514, 400, 0),
    Slot::new(520, 400, 0),
    Slot::new(155, 55, 1),
    Slot::new(205, 55, 1),
    Slot::new(255, 55, 1),
    Slot::new(305, 55, 1),
    Slot::new(355, 55, 1),
    Slot::new(405, 55, 1),
    Slot::new(455, 55, 1),
    Slot::new(155, 105, 1),
    Slot::new(205, 105, 1),
    Slot::new(255, 105, 1),
    Slot::new(305, 105, 1),
    Slot::new(355, 105, 1),
    Slot::new(405, 105, 1),
    Slot::new(455, 105, 1),
    Slot::new(155, 155, 1),
    Slot::new(205, 155, 1),
    Slot::new(255, 155, 1),
    Slot::new(305, 155, 1),
    Slot::new(355, 155, 1),
    Slot::new(405, 155, 1),
    Slot::new(455, 155, 1),
    Slot::new(205, 205, 1),
    Slot::new(255, 205, 1),
    Slot::new(305, 205, 1),
    Slot::new(355, 205, 1),
    Slot::new(405, 205, 1),
    Slot::new(80, 400, 1),
    Slot::new(86, 400, 1),
    Slot::new(92, 400, 1),
    Slot::new(526, 400, 1),
    Slot::new(532, 400, 1),
    Slot::new(538, 400, 1),
    Slot::new(180, 80, 2),
    Slot::new(230, 80, 2),
    Slot::new(280, 80, 2),
    Slot::new(330, 80, 2),
    Slot::new(380, 80, 2),
    Slot::new(430, 80, 2),
    Slot::new(180, 130, 2),
    Slot::new(230, 130, 2),
    Slot::new(280, 130, 2),
    Slot::new(330, 130, 2),
    Slot::new(380, 130, 2),
    Slot::new(430, 130, 2),
    Slot::new(180, 180, 2),
    Slot::new(230, 180, 2),
    Slot::new(280, 180, 2),
    Slot::new(330, 180, 2),
    Slot::new(380, 180, 2),
    Slot::new(430, 180, 2),
    Slot::new(230, 230, 2),
    Slot::new(280, 230, 2),
    Slot::new(330, 230, 2),
    Slot::new(380, 230, 2),
    Slot::new(98, 400, 2),
    Slot::new(104, 400, 2),
    Slot::new(544, 400, 2),
    Slot::new(550, 400, 2),
    Slot::new(280, 280, 2),
    Slot::new(330, 280, 2),
    Slot::new(205, 105, 3),
    Slot::new(255, 105, 3),
    Slot::new(305, 105, 3),
    Slot::new(355, 105, 3),
    Slot::new(405, 105, 3),
    Slot::new(205, 155, 3),
    Slot::new(255, 155, 3),
    Slot::new(305, 155, 3),
    Slot::new(355, 155, 3),
    Slot::new(405, 155, 3),
    Slot::new(230, 205, 3),
    Slot::new(280, 205, 3),
    Slot::new(330, 205, 3),
    Slot::new(380, 205, 3),
    Slot::new(255, 255, 3),
    Slot::new(305, 255, 3),
    Slot::new(355, 255, 3),
    Slot::new(110, 400, 3),
    Slot::new(116, 400, 3),
    Slot::new(556, 400, 3),
    Slot::new(562, 400, 3),
    Slot::new(230, 130, 4),
    Slot::new(280, 130, 4),
    Slot::new(330, 130, 4),
    Slot::new(380, 130, 4),
    Slot::new(230, 180, 4),
    Slot::new(280, 180, 4),
    Slot::new(330, 180, 4),
    Slot::new(380, 180, 4),
    Slot::new(255, 230, 4),
    Slot::new(305, 230, 4),
    Slot::new(355, 230, 4),
    Slot::new(122, 400, 4),
    Slot::new(255, 155, 5),
    Slot::new(305, 155, 5),
    Slot::new(355, 155, 5),
    Slot::new(255, 205, 5),
    Slot::new(305, 205, 5),
    Slot::new(355, 205, 5),
    Slot::new(280, 255, 5),
    Slot::new(330, 255, 5),
    Slot::new(128, 400, 5),
    Slot::new(280, 180, 6),
    Slot::new(305, 230, 6),
    Slot::new(305, 280, 6),
    Slot::new(280, 205, 7),
    Slot::new(330, 205, 7),
    Slot::new(134, 400, 7),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TILE_SIZE;

    #[test]
    fn layout_sizes_are_whole_triples() {
        assert_eq!(layout(Level::One).len(), 18);
        assert_eq!(layout(Level::Two).len(), 156);
        assert_eq!(layout(Level::One).len() % 3, 0);
        assert_eq!(layout(Level::Two).len() % 3, 0);
    }

    #[test]
    fn layer_depths() {
        assert_eq!(top_layer(layout(Level::One)), 2);
        assert_eq!(top_layer(layout(Level::Two)), 7);
        assert_eq!(top_layer(&[]), 0);
    }

    #[test]
    fn level_two_has_six_top_slots() {
        let top = layout(Level::Two).iter().filter(|s| s.layer >= 6).count();
        assert_eq!(top, 6);
    }

    #[test]
    fn slots_fit_inside_extent() {
        for (level, (w, h)) in [
            (Level::One, LEVEL_ONE_EXTENT),
            (Level::Two, LEVEL_TWO_EXTENT),
        ] {
            for s in layout(level) {
                assert!(s.x >= 0 && s.x + TILE_SIZE <= w, "{:?} x out of extent", s);
                assert!(s.y >= 0 && s.y + TILE_SIZE <= h, "{:?} y out of extent", s);
            }
        }
    }
}
