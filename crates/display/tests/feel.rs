mod common;

use common::{Fixture, ROOM};
use game_core::{
    CreatureTruth, EntityId, MonsterKind, ObjectKind, ObjectTruth, Position, Punishment, Senses,
    ViewerStatus,
};
use map_display::{CreatureFlags, CreatureGlyph, FeltGear, Glyph, MapSymbol, ObjectGlyph};

const VIEWER: Position = Position::new(2, 2);

fn blind(status: ViewerStatus) -> Fixture {
    let mut fx = Fixture::new(ROOM, VIEWER);
    fx.level.viewer_mut().status |= ViewerStatus::BLIND | status;
    fx
}

#[test]
fn blind_viewer_feels_what_lies_underfoot() {
    let mut fx = blind(ViewerStatus::empty());
    fx.level.place_object(ObjectTruth::new(ObjectKind::Rock, VIEWER));
    fx.redraw();

    let tile = fx.memory.tile(VIEWER).unwrap();
    assert_eq!(tile.object, Some(ObjectGlyph::plain(ObjectKind::Rock)));
    assert_eq!(tile.background, MapSymbol::DarkRoom);
    assert!(tile.stepped_on);
    assert!(matches!(
        fx.session.buffer().top(VIEWER),
        Some(Glyph::Creature(..))
    ));
}

#[test]
fn levitating_viewer_cannot_reach_the_floor() {
    let mut fx = blind(ViewerStatus::LEVITATING);
    fx.level.place_object(ObjectTruth::new(ObjectKind::Rock, VIEWER));
    fx.redraw();

    let tile = fx.memory.tile(VIEWER).unwrap();
    assert_eq!(tile.object, None);
    assert_eq!(tile.background, MapSymbol::DarkRoom);
}

#[test]
fn levitating_viewer_bumps_into_boulders() {
    let mut fx = blind(ViewerStatus::LEVITATING);
    fx.level.place_object(ObjectTruth::new(ObjectKind::Boulder, VIEWER));
    fx.redraw();
    assert_eq!(
        fx.memory.tile(VIEWER).unwrap().object,
        Some(ObjectGlyph::plain(ObjectKind::Boulder))
    );

    fx.level.take_top_object(VIEWER);
    fx.pass(|display| display.feel_location(VIEWER));
    let tile = fx.memory.tile(VIEWER).unwrap();
    assert_eq!(tile.object, None, "stale boulder memory is cleared");
    assert_eq!(tile.background, MapSymbol::DarkRoom);
}

#[test]
fn punished_viewer_feels_the_chain() {
    let mut fx = blind(ViewerStatus::empty());
    fx.level.viewer_mut().punishment = Some(Punishment {
        ball: Some(Position::new(1, 2)),
        chain: VIEWER,
    });
    fx.level.place_object(ObjectTruth::new(ObjectKind::IronChain, VIEWER));
    fx.level.place_object(ObjectTruth::new(ObjectKind::HeavyIronBall, Position::new(1, 2)));
    fx.redraw();
    assert_eq!(fx.session.felt_gear(), FeltGear::CHAIN);

    fx.level.viewer_mut().punishment = None;
    fx.pass(|display| display.feel_location(VIEWER));
    assert_eq!(fx.session.felt_gear(), FeltGear::empty());
}

#[test]
fn feeling_shows_telepathically_sensed_creature() {
    let at = Position::new(3, 2);
    let mut fx = blind(ViewerStatus::empty());
    fx.level.place_creature(
        CreatureTruth::new(EntityId(9), MonsterKind::Gnome, at),
        Senses::TELEPATHY,
    );
    fx.pass(|display| display.feel_location(at));

    assert_eq!(
        fx.session.buffer().top(at),
        Some(Glyph::Creature(
            CreatureGlyph::Monster(MonsterKind::Gnome),
            CreatureFlags::empty()
        ))
    );
    assert_eq!(fx.memory.tile(at).unwrap().background, MapSymbol::DarkRoom);
}

#[test]
fn marked_creature_blocks_feeling() {
    let at = Position::new(3, 3);
    let mut fx = blind(ViewerStatus::empty());
    fx.level.place_creature(
        CreatureTruth::new(EntityId(4), MonsterKind::Dwarf, at),
        Senses::empty(),
    );
    fx.pass(|display| {
        display.set_unseen_creature_marker(at);
        display.feel_location(at);
    });

    let tile = fx.memory.tile(at).unwrap();
    assert!(tile.unseen_creature);
    assert_eq!(tile.background, MapSymbol::Stone);
    assert_eq!(fx.session.buffer().top(at), Some(Glyph::UnseenCreature));
}
