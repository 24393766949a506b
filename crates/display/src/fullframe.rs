//! Full-frame display modes and whole-map redraws.
//!
//! While engulfed, submerged or buried the viewer perceives only a tiny
//! neighbourhood. These modes replace the normal map until the condition
//! ends, after which the caller issues [`Compositor::redraw_all`].

use strum::IntoEnumIterator;
use tracing::debug;

use game_core::Position;

use crate::buffer::Composition;
use crate::glyph::{EffectGlyph, StomachPart};
use crate::port::WindowPort;
use crate::session::Compositor;

/// How an underwater or underground redraw should proceed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameUpdate {
    /// Clear the frame and redraw the neighbourhood now.
    Full,
    /// Clear on the next update instead of now.
    Deferred,
    /// Blank only the previous neighbourhood before redrawing.
    Limited,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct FullFrameState {
    pub(crate) swallow_center: Option<Position>,
    pub(crate) underwater_center: Option<Position>,
    pub(crate) underwater_deferred: bool,
    pub(crate) underground_deferred: bool,
}

impl<P: WindowPort> Compositor<'_, P> {
    /// Rebuilds the whole frame from memory and current perception.
    ///
    /// Full-frame conditions take over when active. Nothing is flushed.
    pub fn redraw_all(&mut self) {
        self.session.stats.full_redraws += 1;
        let viewer = self.map.viewer();
        if viewer.engulfed_by.is_some() {
            self.swallowed(true);
            return;
        }
        if viewer.is_underwater() && !self.map.flags().water_level {
            self.under_water(FrameUpdate::Full);
            return;
        }
        if viewer.is_buried() {
            self.under_ground(FrameUpdate::Full);
            return;
        }

        debug!("redrawing full frame");
        self.session.buffer.clear();
        for position in self.map.dimensions().positions() {
            self.refresh(position);
        }
    }

    /// Draws the engulfer's interior around the viewer. `first` clears the
    /// whole frame; later calls only blank the previous ring, so the viewer
    /// can be carried along.
    pub fn swallowed(&mut self, first: bool) {
        let viewer = self.map.viewer();
        let Some(engulfer) = viewer.engulfed_by else {
            debug!("swallow frame requested while not engulfed");
            return;
        };

        if first {
            self.session.buffer.clear();
        } else if let Some(center) = self.session.full_frame.swallow_center {
            self.blank_around(center);
        }

        let center = viewer.position;
        for part in StomachPart::iter() {
            let (dx, dy) = part.offset();
            let position = center.offset(dx, dy);
            let layers =
                Composition::default().with_effect(EffectGlyph::Swallow { engulfer, part });
            self.session.buffer.compose(position, layers, self.vision);
        }
        self.display_self();
        self.session.full_frame.swallow_center = Some(center);
    }

    /// Shows only the water and lava immediately around a submerged viewer.
    pub fn under_water(&mut self, mode: FrameUpdate) {
        let viewer = self.map.viewer();
        if self.map.flags().water_level || viewer.engulfed_by.is_some() {
            return;
        }

        let state = &mut self.session.full_frame;
        if mode == FrameUpdate::Full || state.underwater_deferred {
            state.underwater_deferred = false;
            self.session.buffer.clear();
        } else if mode == FrameUpdate::Deferred {
            state.underwater_deferred = true;
            return;
        } else if let Some(center) = state.underwater_center {
            self.blank_around(center);
        }

        let center = viewer.position;
        for position in center.neighbourhood() {
            let Some(terrain) = self.map.terrain(position) else {
                continue;
            };
            if !terrain.is_liquid() {
                continue;
            }
            if viewer.is_blind() && position != center {
                self.session.buffer.clear_tile(position, self.vision);
            } else {
                self.refresh(position);
            }
        }
        self.session.full_frame.underwater_center = Some(center);
    }

    /// Shows only the viewer while buried.
    pub fn under_ground(&mut self, mode: FrameUpdate) {
        if self.map.viewer().engulfed_by.is_some() {
            return;
        }

        let state = &mut self.session.full_frame;
        if mode == FrameUpdate::Full || state.underground_deferred {
            state.underground_deferred = false;
            self.session.buffer.clear();
        } else if mode == FrameUpdate::Deferred {
            state.underground_deferred = true;
            return;
        }

        self.refresh(self.map.viewer().position);
    }

    fn blank_around(&mut self, center: Position) {
        for position in center.neighbourhood() {
            self.session.buffer.clear_tile(position, self.vision);
        }
    }
}
