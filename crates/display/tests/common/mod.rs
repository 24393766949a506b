#![allow(dead_code)]

use game_core::{Env, LevelSnapshot, MapOracle, Position, Viewer};
use map_display::{Compositor, DisplayConfig, DisplaySession, LevelMemory, RecordingPort};
use tracing_subscriber::EnvFilter;

/// Routes display logs to the test harness; filter with `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A lit room with a door on the east side leading into a corridor.
pub const ROOM: &[&str] = &[
    "┌─────┐",
    "│.....│",
    "│.....+###",
    "│.....│",
    "└─────┘",
];

/// A room with a pool in the middle.
pub const POOL_ROOM: &[&str] = &[
    "┌─────┐",
    "│..}}.│",
    "│..}}.│",
    "└─────┘",
];

/// A level, the viewer's memory of it, and a session painting into a
/// recording port.
pub struct Fixture {
    pub level: LevelSnapshot,
    pub memory: LevelMemory,
    pub session: DisplaySession<RecordingPort>,
}

impl Fixture {
    pub fn new(rows: &[&str], viewer: Position) -> Self {
        Self::with_config(rows, viewer, DisplayConfig::default())
    }

    pub fn with_config(rows: &[&str], viewer: Position, config: DisplayConfig) -> Self {
        init_tracing();
        let mut level = LevelSnapshot::from_rows(rows).expect("fixture level should parse");
        level.set_viewer(Viewer::new(viewer));
        let memory = LevelMemory::for_level(&level);
        let mut session = DisplaySession::new(config, RecordingPort::default());
        session.attach_level(level.dimensions());
        Self {
            level,
            memory,
            session,
        }
    }

    /// A lit level where the viewer sees everything.
    pub fn lit(rows: &[&str], viewer: Position) -> Self {
        let mut fixture = Self::new(rows, viewer);
        fixture.level.light_all();
        fixture.level.see_all();
        fixture
    }

    /// Runs one display pass against the level as it is now.
    pub fn pass<R>(&mut self, work: impl FnOnce(&mut Compositor<'_, RecordingPort>) -> R) -> R {
        let env = Env::from_snapshot(&self.level).as_map_env();
        let mut compositor = self.session.compositor(&mut self.memory, env);
        work(&mut compositor)
    }

    pub fn redraw(&mut self) {
        self.pass(|display| display.redraw_all());
    }

    pub fn viewer(&self) -> Position {
        self.level.viewer().position
    }
}
