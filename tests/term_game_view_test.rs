use tile_collector::core::Session;
use tile_collector::term::{paint_order, AnchorY, FrameBuffer, GameView, HudView, Viewport};
use tile_collector::types::{GameStatus, Level, TILE_TRANSFER_MS};

fn row(fb: &FrameBuffer, y: u16) -> String {
    (0..fb.width())
        .map(|x| fb.get(x, y).map(|c| c.ch).unwrap_or(' '))
        .collect()
}

fn screen(fb: &FrameBuffer) -> String {
    (0..fb.height()).map(|y| row(fb, y)).collect::<Vec<_>>().join("\n")
}

fn lose(s: &mut Session) {
    // Greedy picks of fresh kinds until the bar overflows or the game ends.
    while s.status() == GameStatus::Playing {
        let bar = s.slot_bar();
        let pick = s
            .available_ids()
            .into_iter()
            .find(|&id| {
                let kind = s.board().iter().find(|t| t.id == id).map(|t| t.kind);
                kind.is_some_and(|k| bar.count_of(k) < 2)
            })
            .or_else(|| s.available_ids().first().copied());
        match pick {
            Some(id) => {
                s.select_tile(id);
                s.settle();
            }
            None => break,
        }
    }
}

#[test]
fn frame_has_border_tiles_and_panel() {
    let s = Session::new(Level::One, 42);
    let snap = s.snapshot();
    let view = GameView::new().with_anchor_y(AnchorY::Top);
    let vp = Viewport::new(100, 40);
    let fb = view.render(&snap, None, vp);
    let lay = view.layout(&snap, vp);

    let corner = |x, y| fb.get(x, y).map(|c| c.ch);
    assert_eq!(corner(lay.frame_x, lay.frame_y), Some('┌'));
    assert_eq!(corner(lay.frame_x + lay.frame_w - 1, lay.frame_y), Some('┐'));
    assert_eq!(corner(lay.frame_x, lay.frame_y + lay.frame_h - 1), Some('└'));

    // The last tile painted is drawn in full.
    let top = paint_order(&snap).last().unwrap();
    assert!(top.available);
    let (x, y) = lay.tile_origin(&top.tile);
    assert_eq!(fb.get(x, y).map(|c| c.ch), Some('┌'));
    let n = top.tile.kind.number().to_string();
    assert!(row(&fb, y + 1).contains(&n));

    let text = screen(&fb);
    assert!(text.contains("LEVEL"));
    assert!(text.contains("TILES LEFT"));
    assert!(text.contains("SLOTS"));
    assert!(text.contains("PLAYING"));
    assert!(!text.contains("GAME OVER"));
}

#[test]
fn hud_lines_follow_front_end_state() {
    let s = Session::new(Level::One, 42);
    let snap = s.snapshot();
    let view = GameView::new();
    let vp = Viewport::new(100, 40);

    let hud = HudView {
        music: false,
        analytics: true,
        cursor: None,
    };
    let text = screen(&view.render(&snap, Some(&hud), vp));
    assert!(text.contains("OFF"));
    assert!(text.contains("analytics on"));
}

#[test]
fn lost_game_shows_share_hint_until_reward_used() {
    let mut s = Session::new(Level::Two, 5);
    lose(&mut s);
    assert_eq!(s.status(), GameStatus::Lost);

    let view = GameView::new();
    let vp = Viewport::new(120, 50);
    let text = screen(&view.render(&s.snapshot(), None, vp));
    assert!(text.contains("GAME OVER"));
    assert!(text.contains("share for +1 slot"));

    s.grant_reward();
    lose(&mut s);
    assert_eq!(s.status(), GameStatus::Lost);
    let text = screen(&view.render(&s.snapshot(), None, vp));
    assert!(text.contains("GAME OVER"));
    assert!(!text.contains("share for +1 slot"));
}

#[test]
fn clicking_a_tile_selects_it() {
    let mut s = Session::new(Level::One, 8);
    let snap = s.snapshot();
    let view = GameView::new();
    let vp = Viewport::new(100, 40);
    let lay = view.layout(&snap, vp);

    let target = snap
        .board
        .iter()
        .rev()
        .find(|b| b.available)
        .map(|b| b.tile)
        .unwrap();
    let (x, y) = lay.tile_origin(&target);
    let hit = view.tile_at(&snap, vp, x + 1, y + 1).unwrap();
    assert!(s.is_available(hit));
    assert!(s.select_tile(hit));

    s.tick(TILE_TRANSFER_MS);
    let after = s.snapshot();
    assert!(after.board.iter().all(|b| b.tile.id != hit));
    assert!(after.slot_bar.iter().any(|t| t.id == hit));
}

#[test]
fn small_viewport_does_not_panic() {
    let s = Session::new(Level::Two, 1);
    let snap = s.snapshot();
    let fb = GameView::new().render(&snap, None, Viewport::new(10, 5));
    assert_eq!(fb.width(), 10);
    assert_eq!(fb.height(), 5);
}
