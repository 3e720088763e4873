//! Fixed per-frame phase ordering
//!
//! Everything runs on one thread in one fixed order per frame. There is no
//! dependency graph: the order below is the contract.

/// Per-frame execution phases, in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FramePhase {
    /// Discover newly reachable components and tick every live component
    Components = 0,
    /// Plain update callbacks registered on the engine
    UpdateHandlers = 1,
    /// Recompute virtual axes, then clear edge-triggered key state
    Input = 2,
    /// Hand the frame to the scene graph host
    Render = 3,
}

impl FramePhase {
    /// All phases in execution order
    pub const ORDER: [Self; 4] = [
        Self::Components,
        Self::UpdateHandlers,
        Self::Input,
        Self::Render,
    ];
}

/// Outcome of one call into the frame driver
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameOutcome {
    /// Every phase ran with this delta
    Ran {
        /// Seconds since the previous frame
        delta: f32,
    },
    /// Host reported itself hidden; no phase ran
    Skipped,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phase_order_matches_declaration() {
        let mut sorted = FramePhase::ORDER;
        sorted.sort();
        assert_eq!(sorted, FramePhase::ORDER);
        assert_eq!(FramePhase::ORDER.first(), Some(&FramePhase::Components));
        assert_eq!(FramePhase::ORDER.last(), Some(&FramePhase::Render));
    }
}
