mod common;

use common::{Fixture, POOL_ROOM, ROOM};
use game_core::{MapOracle, MonsterKind, Position, TerrainKind, ViewerStatus};
use map_display::{
    DisplayError, EffectGlyph, FrameUpdate, Glyph, MapSymbol, StomachPart,
};

const VIEWER: Position = Position::new(2, 2);

fn top(fx: &Fixture, position: Position) -> Option<Glyph> {
    fx.session.buffer().top(position)
}

fn drawn_tiles(fx: &Fixture) -> usize {
    fx.level
        .dimensions()
        .positions()
        .filter(|position| top(fx, *position) != Some(Glyph::default()))
        .count()
}

#[test]
fn engulfed_viewer_sees_only_the_stomach() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.redraw();
    fx.level.viewer_mut().engulfed_by = Some(MonsterKind::PurpleWorm);
    fx.redraw();

    assert_eq!(
        top(&fx, VIEWER.offset(-1, -1)),
        Some(Glyph::Effect(EffectGlyph::Swallow {
            engulfer: MonsterKind::PurpleWorm,
            part: StomachPart::TopLeft,
        }))
    );
    assert_eq!(top(&fx, Position::new(5, 3)), Some(Glyph::default()));
    assert_eq!(drawn_tiles(&fx), 9);

    let before = fx.session.buffer().checksum();
    let positions: Vec<Position> = fx.level.dimensions().positions().collect();
    fx.pass(|display| {
        for position in positions {
            display.refresh(position);
        }
    });
    let after = fx.session.buffer().checksum();
    assert_eq!(
        before,
        after,
        "frame changed while engulfed: {} -> {}",
        hex::encode(before),
        hex::encode(after)
    );
}

#[test]
fn stomach_follows_the_viewer() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.level.viewer_mut().engulfed_by = Some(MonsterKind::PurpleWorm);
    fx.redraw();

    fx.level.viewer_mut().position = Position::new(3, 2);
    fx.pass(|display| display.swallowed(false));
    assert_eq!(top(&fx, Position::new(1, 1)), Some(Glyph::default()));
    assert_eq!(
        top(&fx, VIEWER),
        Some(Glyph::Effect(EffectGlyph::Swallow {
            engulfer: MonsterKind::PurpleWorm,
            part: StomachPart::Left,
        }))
    );
    assert_eq!(drawn_tiles(&fx), 9);
}

#[test]
fn underwater_clear_can_be_deferred() {
    let viewer = Position::new(3, 1);
    let far = Position::new(1, 2);
    let mut fx = Fixture::lit(POOL_ROOM, viewer);
    fx.redraw();
    assert_eq!(top(&fx, far), Some(Glyph::Background(MapSymbol::Room)));

    fx.level.viewer_mut().status |= ViewerStatus::UNDERWATER;
    fx.level.see_around(viewer, 1);
    fx.pass(|display| display.under_water(FrameUpdate::Deferred));
    assert_eq!(top(&fx, far), Some(Glyph::Background(MapSymbol::Room)));

    fx.pass(|display| display.under_water(FrameUpdate::Limited));
    assert_eq!(top(&fx, far), Some(Glyph::default()));
    assert_eq!(top(&fx, Position::new(2, 1)), Some(Glyph::default()));
    assert_eq!(
        top(&fx, Position::new(4, 2)),
        Some(Glyph::Background(MapSymbol::Pool))
    );
    assert!(matches!(top(&fx, viewer), Some(Glyph::Creature(..))));
}

#[test]
fn refresh_underwater_reaches_only_adjacent_liquid() {
    let viewer = Position::new(3, 1);
    let mut fx = Fixture::lit(POOL_ROOM, viewer);
    fx.level.viewer_mut().status |= ViewerStatus::UNDERWATER;
    fx.redraw();

    fx.pass(|display| {
        display.refresh(Position::new(1, 1));
        display.refresh(Position::new(4, 1));
    });
    assert_eq!(top(&fx, Position::new(1, 1)), Some(Glyph::default()));
    assert_eq!(
        top(&fx, Position::new(4, 1)),
        Some(Glyph::Background(MapSymbol::Pool))
    );
}

#[test]
fn buried_viewer_sees_only_itself() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.redraw();
    fx.level.viewer_mut().status |= ViewerStatus::BURIED;
    fx.redraw();
    assert_eq!(drawn_tiles(&fx), 1);
    assert!(matches!(top(&fx, VIEWER), Some(Glyph::Creature(..))));
}

#[test]
fn generation_suppresses_refresh() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.level.set_generating(true);
    fx.redraw();
    assert_eq!(drawn_tiles(&fx), 0);
    assert_eq!(fx.session.stats().full_redraws, 1);
    assert!(fx.session.stats().refreshes > 0);
}

#[test]
fn refresh_without_level_is_reported() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.session.detach_level();
    fx.pass(|display| display.refresh(VIEWER));
    assert_eq!(fx.session.diagnostics().last(), Some(&DisplayError::NoLevel));
}

#[test]
fn batched_updates_flush_once() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.pass(|display| {
        display.batched(|display| {
            display.redraw_all();
            display.refresh(Position::new(1, 1));
        })
    });
    assert_eq!(fx.session.port().frames().len(), 1);
    let frame = fx.session.port().last().unwrap();
    assert_eq!(frame.viewer, Some(VIEWER));
    assert_eq!(frame.checksum, fx.session.buffer().checksum());
    assert_eq!(fx.session.stats().flushes, 1);

    fx.pass(|display| display.flush());
    assert_eq!(fx.session.port().frames().len(), 1, "nothing changed");

    let marked = Position::new(5, 1);
    fx.pass(|display| {
        display.batched(|display| {
            display.batched(|display| display.set_unseen_creature_marker(marked));
            assert!(display.session().is_flush_suppressed());
            display.flush();
        })
    });
    assert_eq!(fx.session.port().frames().len(), 2);
    assert_eq!(
        fx.session.port().last().unwrap().changed,
        vec![(marked, Glyph::UnseenCreature)]
    );
}

#[test]
fn remote_flush_highlights_no_viewer() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.redraw();
    fx.pass(|display| display.flush_remote());
    assert_eq!(fx.session.port().last().unwrap().viewer, None);
    assert!(fx.session.buffer().changed_positions().is_empty());
}

#[test]
fn explicit_redraw_repaints_the_whole_screen() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.pass(|display| {
        display.redraw_all();
        display.flush();
    });
    assert_eq!(fx.session.port().frames().len(), 1);

    fx.pass(|display| {
        display.redraw_all();
        display.flush();
    });
    let frames = fx.session.port().frames();
    assert_eq!(frames.len(), 2, "redraw request reached the port");
    let area = fx.level.dimensions().area();
    assert_eq!(frames[1].changed.len(), area);
    assert_eq!(frames[1].checksum, frames[0].checksum);
}

#[test]
fn submerged_viewer_cannot_make_out_ice() {
    let viewer = Position::new(3, 1);
    let ice = Position::new(2, 1);
    let mut fx = Fixture::lit(POOL_ROOM, viewer);
    fx.level.set_terrain(ice, TerrainKind::Ice);
    fx.level.viewer_mut().status |= ViewerStatus::UNDERWATER;
    fx.redraw();
    assert_eq!(top(&fx, ice), Some(Glyph::default()));

    fx.pass(|display| display.refresh(ice));
    assert_eq!(top(&fx, ice), Some(Glyph::default()));
    assert_eq!(
        top(&fx, Position::new(3, 2)),
        Some(Glyph::Background(MapSymbol::Pool))
    );
}
