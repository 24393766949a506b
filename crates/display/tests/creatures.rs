mod common;

use common::{Fixture, ROOM};
use game_core::{
    CreatureTruth, Disguise, EntityId, Furniture, MonsterKind, Position, RegionKind, Senses,
    TrapKind, TrapTruth, ViewerStatus,
};
use map_display::{
    CreatureFlags, CreatureGlyph, DisplayConfig, EffectGlyph, Glyph, IllusionSource, MapSymbol,
};

const VIEWER: Position = Position::new(2, 2);
const THERE: Position = Position::new(4, 2);

fn creature(kind: MonsterKind) -> CreatureTruth {
    CreatureTruth::new(EntityId(5), kind, THERE)
}

fn top(fx: &Fixture, position: Position) -> Option<Glyph> {
    fx.session.buffer().top(position)
}

#[test]
fn seen_pets_are_marked_tame() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.level.place_creature(creature(MonsterKind::Kitten).tame(), Senses::SIGHT);
    fx.redraw();
    assert_eq!(
        top(&fx, THERE),
        Some(Glyph::Creature(
            CreatureGlyph::Monster(MonsterKind::Kitten),
            CreatureFlags::TAME
        ))
    );
}

#[test]
fn hallucination_hides_allegiance() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.level.place_creature(creature(MonsterKind::Kitten).tame(), Senses::SIGHT);
    fx.level.viewer_mut().status |= ViewerStatus::HALLUCINATING;
    fx.redraw();
    assert!(matches!(
        top(&fx, THERE),
        Some(Glyph::Creature(CreatureGlyph::Monster(_), flags)) if flags.is_empty()
    ));
}

#[test]
fn detected_creatures_show_out_of_sight() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.level.place_creature(creature(MonsterKind::Goblin), Senses::DETECTION);
    fx.level.hide_all();
    fx.redraw();
    assert_eq!(
        top(&fx, THERE),
        Some(Glyph::Creature(
            CreatureGlyph::Monster(MonsterKind::Goblin),
            CreatureFlags::DETECTED
        ))
    );
}

#[test]
fn warnings_show_danger_tier() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.level.place_creature(
        creature(MonsterKind::Soldier).with_level(12),
        Senses::WARNING,
    );
    fx.level.hide_all();
    fx.redraw();
    assert_eq!(
        top(&fx, THERE),
        Some(Glyph::Creature(CreatureGlyph::Warning(3), CreatureFlags::WARNING))
    );
}

#[test]
fn peaceful_creatures_raise_no_warning() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.level.place_creature(
        creature(MonsterKind::Soldier).with_level(12).peaceful(),
        Senses::WARNING,
    );
    fx.level.hide_all();
    fx.redraw();
    assert!(!matches!(top(&fx, THERE), Some(Glyph::Creature(..))));
}

#[test]
fn furniture_disguise_is_remembered() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.level.place_creature(
        creature(MonsterKind::LargeMimic).disguised_as(Disguise::Furniture(Furniture::Altar)),
        Senses::SIGHT,
    );
    fx.redraw();
    assert_eq!(top(&fx, THERE), Some(Glyph::Background(MapSymbol::Altar)));
    assert_eq!(fx.memory.tile(THERE).unwrap().background, MapSymbol::Altar);

    fx.level.viewer_mut().status |= ViewerStatus::SEES_DISGUISES;
    fx.pass(|display| display.refresh(THERE));
    assert_eq!(
        top(&fx, THERE),
        Some(Glyph::Creature(
            CreatureGlyph::Monster(MonsterKind::LargeMimic),
            CreatureFlags::empty()
        ))
    );
}

#[test]
fn creature_disguise_is_not_remembered() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.level.place_creature(
        creature(MonsterKind::Tengu).disguised_as(Disguise::Creature(MonsterKind::Newt)),
        Senses::SIGHT,
    );
    fx.redraw();
    assert_eq!(
        top(&fx, THERE),
        Some(Glyph::Creature(
            CreatureGlyph::Monster(MonsterKind::Newt),
            CreatureFlags::empty()
        ))
    );
    assert_eq!(fx.memory.tile(THERE).unwrap().background, MapSymbol::Room);
}

#[test]
fn worm_tails_draw_as_tails() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.level.place_creature(creature(MonsterKind::LongWormTail).tail(), Senses::SIGHT);
    fx.redraw();
    assert_eq!(
        top(&fx, THERE),
        Some(Glyph::Creature(
            CreatureGlyph::Monster(MonsterKind::LongWormTail),
            CreatureFlags::empty()
        ))
    );
}

#[test]
fn creature_held_in_trap_reveals_it() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.level.place_trap(TrapTruth::new(TrapKind::BearTrap, THERE, false));
    fx.level.place_creature(creature(MonsterKind::Jackal).trapped(), Senses::SIGHT);
    fx.redraw();
    assert_eq!(fx.memory.tile(THERE).unwrap().trap, Some(TrapKind::BearTrap));
}

#[test]
fn mounted_viewer_shows_steed() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.level.viewer_mut().steed = Some(MonsterKind::Pony);
    fx.redraw();
    assert_eq!(
        top(&fx, VIEWER),
        Some(Glyph::Creature(
            CreatureGlyph::Monster(MonsterKind::Pony),
            CreatureFlags::RIDDEN
        ))
    );
    assert!(fx.memory.tile(VIEWER).unwrap().stepped_on);
}

#[test]
fn regions_layer_over_visible_floor() {
    let cloud = Position::new(1, 3);
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.level.set_region(cloud, Some(RegionKind::PoisonCloud));
    fx.redraw();
    assert_eq!(
        top(&fx, cloud),
        Some(Glyph::Effect(EffectGlyph::Region(RegionKind::PoisonCloud)))
    );
    assert_eq!(fx.memory.tile(cloud).unwrap().background, MapSymbol::Room);
}

#[test]
fn bulk_refresh_follows_moving_creatures() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    fx.level.place_creature(creature(MonsterKind::Newt), Senses::SIGHT);
    fx.redraw();

    let to = Position::new(5, 3);
    assert!(fx.level.move_creature(EntityId(5), to));
    fx.pass(|display| {
        display.refresh(THERE);
        display.refresh_all_creatures();
    });
    assert_eq!(top(&fx, THERE), Some(Glyph::Background(MapSymbol::Room)));
    assert!(matches!(top(&fx, to), Some(Glyph::Creature(..))));
}

#[test]
fn kind_warnings_are_scrambled_while_hallucinating() {
    let mut fx = Fixture::lit(ROOM, VIEWER);
    let dragon = creature(MonsterKind::RedDragon);
    fx.level.place_creature(dragon, Senses::WARN_OF_KIND);

    fx.pass(|display| display.display_warning(&dragon));
    assert_eq!(
        top(&fx, THERE),
        Some(Glyph::Creature(
            CreatureGlyph::Monster(MonsterKind::RedDragon),
            CreatureFlags::WARNING
        ))
    );

    fx.level.viewer_mut().status |= ViewerStatus::HALLUCINATING;
    let expected = IllusionSource::new(DisplayConfig::default().illusion_seed).monster();
    fx.pass(|display| display.display_warning(&dragon));
    assert_eq!(
        top(&fx, THERE),
        Some(Glyph::Creature(CreatureGlyph::Monster(expected), CreatureFlags::WARNING))
    );
}
