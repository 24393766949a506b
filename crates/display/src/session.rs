//! Display session: the process-wide half of the display state.
//!
//! The session owns the composed frame, the window port, open transient
//! overlays and full-frame mode bookkeeping. Per-level memory is owned by
//! the level and lent to a [`Compositor`] for the duration of a pass.

use bitflags::bitflags;
use tracing::debug;

use game_core::{MapDimensions, MapEnv, MapOracle, Position, VisionOracle};

use crate::buffer::DisplayBuffer;
use crate::config::DisplayConfig;
use crate::error::Diagnostics;
use crate::fullframe::FullFrameState;
use crate::illusion::IllusionSource;
use crate::memory::LevelMemory;
use crate::port::WindowPort;
use crate::transient::{TransientId, TransientOverlay};

bitflags! {
    /// Punishment gear the viewer currently feels underfoot.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct FeltGear: u8 {
        const BALL  = 1 << 0;
        const CHAIN = 1 << 1;
    }
}

/// Counters for tests and debug views.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Per-tile refresh requests, ignored ones included.
    pub refreshes: u64,
    /// Frames handed to the window port.
    pub flushes: u64,
    pub full_redraws: u64,
    pub transient_paints: u64,
}

pub struct DisplaySession<P: WindowPort> {
    pub(crate) config: DisplayConfig,
    pub(crate) level: Option<MapDimensions>,
    pub(crate) buffer: DisplayBuffer,
    pub(crate) port: P,
    pub(crate) transients: Vec<TransientOverlay>,
    pub(crate) next_transient: u32,
    pub(crate) full_frame: FullFrameState,
    pub(crate) illusions: IllusionSource,
    pub(crate) diagnostics: Diagnostics,
    pub(crate) felt: FeltGear,
    pub(crate) flush_suppressed: bool,
    pub(crate) stats: FrameStats,
}

impl<P: WindowPort> DisplaySession<P> {
    pub fn new(config: DisplayConfig, port: P) -> Self {
        Self {
            illusions: IllusionSource::new(config.illusion_seed),
            diagnostics: Diagnostics::new(config.diagnostic_capacity),
            config,
            level: None,
            buffer: DisplayBuffer::default(),
            port,
            transients: Vec::new(),
            next_transient: 0,
            full_frame: FullFrameState::default(),
            felt: FeltGear::empty(),
            flush_suppressed: false,
            stats: FrameStats::default(),
        }
    }

    /// Prepares an empty frame for a newly loaded level. Open overlays and
    /// full-frame bookkeeping from the previous level are dropped.
    pub fn attach_level(&mut self, dimensions: MapDimensions) {
        debug!(
            width = dimensions.width,
            height = dimensions.height,
            "attaching level"
        );
        self.free_all_transients();
        self.level = Some(dimensions);
        self.buffer = DisplayBuffer::new(dimensions);
        self.full_frame = FullFrameState::default();
        self.felt = FeltGear::empty();
    }

    pub fn detach_level(&mut self) {
        self.free_all_transients();
        self.level = None;
    }

    /// Lends `memory` and the oracles to a compositor for one display pass.
    pub fn compositor<'a>(
        &'a mut self,
        memory: &'a mut LevelMemory,
        env: MapEnv<'a>,
    ) -> Compositor<'a, P> {
        Compositor {
            session: self,
            memory,
            map: env.map(),
            vision: env.vision(),
        }
    }

    pub fn config(&self) -> &DisplayConfig {
        &self.config
    }

    pub fn buffer(&self) -> &DisplayBuffer {
        &self.buffer
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn felt_gear(&self) -> FeltGear {
        self.felt
    }

    pub fn is_flush_suppressed(&self) -> bool {
        self.flush_suppressed
    }

    /// While set, [`flush`](Self::flush) and [`flush_remote`](Self::flush_remote)
    /// do nothing.
    pub fn set_flush_suppressed(&mut self, suppressed: bool) {
        self.flush_suppressed = suppressed;
    }

    /// Paints pending changes with the viewer at `viewer` highlighted.
    pub fn flush(&mut self, viewer: Position) {
        if !self.flush_suppressed {
            self.present(Some(viewer));
        }
    }

    /// Paints pending changes without highlighting any viewer.
    pub fn flush_remote(&mut self) {
        if !self.flush_suppressed {
            self.present(None);
        }
    }

    /// Paints pending changes regardless of suppression. Nothing is sent
    /// when the frame matches what was last presented.
    pub(crate) fn present(&mut self, viewer: Option<Position>) {
        let changed = self.buffer.changed_positions();
        if changed.is_empty() {
            return;
        }
        self.port.paint_frame(&self.buffer, &changed, viewer);
        self.buffer.mark_presented();
        self.stats.flushes += 1;
    }

    /// Closes every open transient overlay without reverting its tiles.
    /// Returns how many were open.
    pub fn free_all_transients(&mut self) -> usize {
        let open = self.transients.len();
        if open > 0 {
            debug!(open, "sweeping transient overlays");
        }
        self.transients.clear();
        open
    }

    pub fn open_transients(&self) -> impl Iterator<Item = TransientId> + '_ {
        self.transients.iter().map(|overlay| overlay.id)
    }
}

/// One display pass: the session, the level's memory and the oracles
/// describing the level as it is now.
pub struct Compositor<'a, P: WindowPort> {
    pub(crate) session: &'a mut DisplaySession<P>,
    pub(crate) memory: &'a mut LevelMemory,
    pub(crate) map: &'a dyn MapOracle,
    pub(crate) vision: &'a dyn VisionOracle,
}

impl<P: WindowPort> Compositor<'_, P> {
    pub fn session(&self) -> &DisplaySession<P> {
        self.session
    }

    pub fn memory(&self) -> &LevelMemory {
        self.memory
    }

    pub fn buffer(&self) -> &DisplayBuffer {
        &self.session.buffer
    }

    /// Paints pending changes with the viewer highlighted.
    pub fn flush(&mut self) {
        let viewer = self.map.viewer().position;
        self.session.flush(viewer);
    }

    pub fn flush_remote(&mut self) {
        self.session.flush_remote();
    }

    /// Runs `work` with flushing suppressed, then flushes once unless an
    /// outer batch is still open.
    pub fn batched<R>(&mut self, work: impl FnOnce(&mut Self) -> R) -> R {
        let outer = self.session.flush_suppressed;
        self.session.flush_suppressed = true;
        let result = work(self);
        self.session.flush_suppressed = outer;
        if !outer {
            self.flush();
        }
        result
    }
}
