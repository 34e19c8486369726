//! Holder for the single uncommitted highlight

use log::debug;

use crate::highlight::GhostHighlight;

/// At most one ghost highlight exists at a time
#[derive(Debug, Default)]
pub struct GhostSlot {
    ghost: Option<GhostHighlight>,
}

impl GhostSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a ghost, replacing any previous one
    ///
    /// Returns the replaced ghost, if any.
    pub fn create(&mut self, ghost: GhostHighlight) -> Option<GhostHighlight> {
        debug!(
            "ghost highlight created on page {}",
            ghost.position.page_number()
        );
        self.ghost.replace(ghost)
    }

    /// Clear the slot, returning the removed ghost
    pub fn remove(&mut self) -> Option<GhostHighlight> {
        let removed = self.ghost.take();
        if removed.is_some() {
            debug!("ghost highlight removed");
        }
        removed
    }

    pub fn get(&self) -> Option<&GhostHighlight> {
        self.ghost.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.ghost.is_none()
    }
}
