use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::display::{ActiveView, Threshold};
use crate::model::{CoreError, Result};
use crate::stack::{Position, ViewStack};

use super::Image5D;

/// Callback invoked once per completed cursor move.
pub type PositionObserver = Box<dyn FnMut(&PositionChange) + Send>;

/// Emitted after the cursor has settled at its new position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PositionChange {
    pub previous: Position,
    pub current: Position,
    /// Whether the z-stack was rebuilt, i.e. the channel or frame changed.
    pub view_rebuilt: bool,
}

impl Image5D {
    /// The 1-based (channel, slice, frame) the container currently shows.
    pub fn current_position(&self) -> Position {
        Position::new(
            self.view.channel() + 1,
            self.view.active_slice() + 1,
            self.view.frame() + 1,
        )
    }

    pub fn current_channel(&self) -> usize {
        self.view.channel() + 1
    }

    pub fn current_slice(&self) -> usize {
        self.view.active_slice() + 1
    }

    pub fn current_frame(&self) -> usize {
        self.view.frame() + 1
    }

    /// Moves the cursor. Out-of-range coordinates are clamped into range.
    ///
    /// When the channel or frame changes the active view is stored into the
    /// outgoing channel, the z-stack is rebuilt and the incoming channel's
    /// state is restored. Observers are notified exactly once, after the
    /// move is complete.
    pub fn set_position(&mut self, channel: usize, slice: usize, frame: usize) {
        self.reposition(Position::new(channel, slice, frame), false);
    }

    pub fn set_channel(&mut self, channel: usize) {
        let current = self.current_position();
        self.set_position(channel, current.slice, current.frame);
    }

    pub fn set_slice(&mut self, slice: usize) {
        let current = self.current_position();
        self.set_position(current.channel, slice, current.frame);
    }

    pub fn set_frame(&mut self, frame: usize) {
        let current = self.current_position();
        self.set_position(current.channel, current.slice, frame);
    }

    pub(super) fn reposition(&mut self, target: Position, force_rebuild: bool) -> PositionChange {
        let previous = self.current_position();
        let target = self.index.clamp(target);
        let rebuild = force_rebuild
            || target.channel != previous.channel
            || target.frame != previous.frame;
        if rebuild {
            self.sync_channel(previous.channel - 1);
            self.view = ViewStack::build(
                &self.index,
                target.channel - 1,
                target.frame - 1,
                target.slice - 1,
            );
            self.load_channel(target.channel - 1);
        } else {
            self.view.set_active(target.slice - 1);
        }
        self.check_sync(rebuild);
        let change = PositionChange {
            previous,
            current: self.current_position(),
            view_rebuilt: rebuild,
        };
        debug!(?change, "cursor moved");
        for observer in &mut self.observers {
            observer(&change);
        }
        change
    }

    /// Writes the active view into the state of `channel` if it is current.
    /// Any other channel's state is already authoritative.
    pub fn store_channel(&mut self, channel: usize) -> Result<()> {
        let channel = self.check_channel(channel)?;
        if channel == self.view.channel() {
            self.sync_channel(channel);
        }
        Ok(())
    }

    /// Loads the state of `channel` into the active view if it is current.
    pub fn restore_channel(&mut self, channel: usize) -> Result<()> {
        let channel = self.check_channel(channel)?;
        if channel == self.view.channel() {
            self.load_channel(channel);
        }
        Ok(())
    }

    /// Checks that the z-stack addresses the current channel and frame and
    /// that the active view equals what the current channel's state projects
    /// to. Edits made through [`Image5D::active_view_mut`] count as
    /// unsynchronized until the channel is stored.
    pub fn verify_synchronized(&self) -> Result<()> {
        let channel = self.view.channel();
        if !self.view.matches(&self.index) {
            return Err(CoreError::StateInconsistency {
                channel: channel + 1,
                detail: "z-stack does not address the current channel and frame".to_string(),
            });
        }
        let expected = self.channels[channel].view(self.is_display_all_gray());
        if !views_agree(&self.active, &expected) {
            return Err(CoreError::StateInconsistency {
                channel: channel + 1,
                detail: "active view differs from the stored channel state".to_string(),
            });
        }
        Ok(())
    }

    pub fn on_position_changed<F>(&mut self, observer: F)
    where
        F: FnMut(&PositionChange) + Send + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    pub fn clear_observers(&mut self) {
        self.observers.clear();
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub(super) fn sync_channel(&mut self, channel: usize) {
        let all_gray = self.is_display_all_gray();
        if let Some(state) = self.channels.get_mut(channel) {
            self.active.store_into(state, all_gray);
        }
    }

    pub(super) fn load_channel(&mut self, channel: usize) {
        let all_gray = self.is_display_all_gray();
        if let Some(state) = self.channels.get(channel) {
            self.active.restore_from(state, all_gray);
        }
    }

    /// After a rebuild the active view must equal the restored channel's
    /// projection; on any move the z-stack must address the current
    /// channel and frame.
    fn check_sync(&mut self, restored: bool) {
        let outcome = if restored {
            self.verify_synchronized()
        } else if self.view.matches(&self.index) {
            Ok(())
        } else {
            Err(CoreError::StateInconsistency {
                channel: self.view.channel() + 1,
                detail: "z-stack does not address the current channel and frame".to_string(),
            })
        };
        let Err(err) = outcome else {
            return;
        };
        if cfg!(debug_assertions) {
            panic!("{err}");
        }
        warn!(error = %err, "re-synchronising active view");
        self.view = ViewStack::build(
            &self.index,
            self.view.channel(),
            self.view.frame(),
            self.view.active_slice(),
        );
        if restored {
            self.load_channel(self.view.channel());
        }
    }
}

/// Bitwise comparison, so a NaN window still matches its own copy.
fn views_agree(active: &ActiveView, expected: &ActiveView) -> bool {
    active.min.to_bits() == expected.min.to_bits()
        && active.max.to_bits() == expected.max.to_bits()
        && thresholds_agree(active.threshold, expected.threshold)
        && active.lut_update == expected.lut_update
        && (Arc::ptr_eq(&active.lut, &expected.lut) || active.lut == expected.lut)
}

fn thresholds_agree(active: Threshold, expected: Threshold) -> bool {
    match (active, expected) {
        (Threshold::None, Threshold::None) => true,
        (Threshold::Range { min: a, max: b }, Threshold::Range { min: c, max: d }) => {
            a.to_bits() == c.to_bits() && b.to_bits() == d.to_bits()
        }
        _ => false,
    }
}
