//! Transient overlays: beams, flashes and objects in flight.
//!
//! Overlays paint straight into the effect layer of the frame and never
//! touch tile memory. Ending an overlay refreshes the tiles it covered so
//! they fall back to whatever the viewer would normally perceive.

use arrayvec::ArrayVec;
use tracing::{debug, trace};

use game_core::{MonsterKind, ObjectKind, Position};

use crate::config::MAX_TRANSIENT_CELLS;
use crate::error::DisplayError;
use crate::glyph::{EffectGlyph, ObjectGlyph};
use crate::port::WindowPort;
use crate::session::Compositor;

/// Handle to an open overlay.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransientId(pub(crate) u32);

impl std::fmt::Display for TransientId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "transient#{}", self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransientStyle {
    /// Every painted tile stays lit until the overlay ends. Out-of-sight
    /// tiles are skipped.
    Beam,
    /// One tile at a time, out-of-sight tiles skipped.
    Flash,
    /// One tile at a time, drawn even where the viewer cannot see.
    Always,
    /// One tile at a time, showing an object glyph.
    ObjectIcon,
}

impl TransientStyle {
    const fn keeps_trail(self) -> bool {
        matches!(self, Self::Beam)
    }

    const fn needs_sight(self) -> bool {
        matches!(self, Self::Beam | Self::Flash)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransientSymbol {
    Effect(EffectGlyph),
    Object(ObjectGlyph),
}

impl TransientSymbol {
    const fn effect(self) -> EffectGlyph {
        match self {
            Self::Effect(effect) => effect,
            Self::Object(object) => EffectGlyph::Item(object),
        }
    }

    const fn fits(self, style: TransientStyle) -> bool {
        matches!(
            (self, style),
            (Self::Object(_), TransientStyle::ObjectIcon)
                | (
                    Self::Effect(_),
                    TransientStyle::Beam | TransientStyle::Flash | TransientStyle::Always
                )
        )
    }
}

/// An open overlay and the tiles it has painted.
#[derive(Clone, Debug)]
pub struct TransientOverlay {
    pub(crate) id: TransientId,
    pub(crate) style: TransientStyle,
    pub(crate) symbol: TransientSymbol,
    /// Painted tiles in order. Only beams keep more than the latest.
    pub(crate) path: ArrayVec<Position, MAX_TRANSIENT_CELLS>,
    pub(crate) last: Option<Position>,
}

impl TransientOverlay {
    pub fn id(&self) -> TransientId {
        self.id
    }

    pub fn style(&self) -> TransientStyle {
        self.style
    }

    pub fn path(&self) -> &[Position] {
        &self.path
    }
}

impl<P: WindowPort> Compositor<'_, P> {
    /// Opens an overlay. A symbol that does not fit the style is reported
    /// but the overlay still opens.
    pub fn begin_transient(
        &mut self,
        style: TransientStyle,
        symbol: TransientSymbol,
    ) -> TransientId {
        let id = TransientId(self.session.next_transient);
        self.session.next_transient = self.session.next_transient.wrapping_add(1);
        if !symbol.fits(style) {
            self.session
                .diagnostics
                .report(DisplayError::TransientStyleMismatch(id));
        }
        debug!(%id, ?style, "opening transient");
        self.session.transients.push(TransientOverlay {
            id,
            style,
            symbol,
            path: ArrayVec::new(),
            last: None,
        });
        id
    }

    /// Opens an object-in-flight overlay. The hallucinating viewer sees a
    /// random object instead.
    pub fn begin_object_icon(
        &mut self,
        kind: ObjectKind,
        creature: Option<MonsterKind>,
    ) -> TransientId {
        let glyph = if self.map.viewer().is_hallucinating() {
            self.session.illusions.object()
        } else {
            ObjectGlyph::new(kind, creature)
        };
        self.begin_transient(TransientStyle::ObjectIcon, TransientSymbol::Object(glyph))
    }

    /// Paints the overlay at `position` and presents the frame immediately,
    /// even inside a batch.
    pub fn paint_transient(&mut self, id: TransientId, position: Position) {
        let Some(index) = self.transient_index(id) else {
            self.session
                .diagnostics
                .report(DisplayError::UnknownTransient(id));
            return;
        };
        let overlay = &self.session.transients[index];
        let (style, effect, previous) = (overlay.style, overlay.symbol.effect(), overlay.last);

        if style.needs_sight() && !self.vision.is_visible(position) {
            trace!(%id, %position, "transient out of sight");
            return;
        }

        if style.keeps_trail() {
            let overlay = &mut self.session.transients[index];
            if overlay.path.try_push(position).is_err() {
                trace!(%id, %position, "beam path full");
                return;
            }
            overlay.last = Some(position);
        } else {
            if let Some(previous) = previous {
                if previous != position {
                    self.refresh(previous);
                }
            }
            let overlay = &mut self.session.transients[index];
            overlay.path.clear();
            overlay.path.push(position);
            overlay.last = Some(position);
        }

        if self
            .session
            .buffer
            .set_effect(position, Some(effect), self.vision)
        {
            self.session.stats.transient_paints += 1;
            self.session.present(None);
        }
    }

    /// Swaps the symbol of a beam mid-flight (a bounce changes direction).
    /// Already painted tiles keep their symbol.
    pub fn change_transient_symbol(&mut self, id: TransientId, symbol: TransientSymbol) {
        let Some(index) = self.transient_index(id) else {
            self.session
                .diagnostics
                .report(DisplayError::UnknownTransient(id));
            return;
        };
        let overlay = &mut self.session.transients[index];
        if !symbol.fits(overlay.style) {
            self.session
                .diagnostics
                .report(DisplayError::TransientStyleMismatch(id));
            return;
        }
        overlay.symbol = symbol;
    }

    /// Closes the overlay and refreshes every tile it left painted.
    pub fn end_transient(&mut self, id: TransientId) {
        let Some(index) = self.transient_index(id) else {
            self.session
                .diagnostics
                .report(DisplayError::UnknownTransient(id));
            return;
        };
        let overlay = self.session.transients.remove(index);
        debug!(%id, cells = overlay.path.len(), "closing transient");
        for position in overlay.path {
            self.refresh(position);
        }
    }

    fn transient_index(&self, id: TransientId) -> Option<usize> {
        self.session
            .transients
            .iter()
            .position(|overlay| overlay.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::ZapKind;

    #[test]
    fn symbols_fit_their_styles() {
        let zap = TransientSymbol::Effect(EffectGlyph::zap(ZapKind::Fire, 1, 0));
        let rock = TransientSymbol::Object(ObjectGlyph::plain(ObjectKind::Rock));
        assert!(zap.fits(TransientStyle::Beam));
        assert!(zap.fits(TransientStyle::Always));
        assert!(!zap.fits(TransientStyle::ObjectIcon));
        assert!(rock.fits(TransientStyle::ObjectIcon));
        assert!(!rock.fits(TransientStyle::Flash));
    }

    #[test]
    fn object_symbols_paint_as_items() {
        let rock = ObjectGlyph::plain(ObjectKind::Rock);
        assert_eq!(
            TransientSymbol::Object(rock).effect(),
            EffectGlyph::Item(rock)
        );
    }
}
