//! Tick-counter based frame cycling.
//!
//! Sprites here animate off plain integer counters that advance once per
//! simulation tick, so a paused game freezes animation as well as physics.
//! A `FrameCycle` maps such a counter to a frame index.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameCycle {
    pub ticks_per_frame: u32,
    pub frame_count: u32,
}

impl FrameCycle {
    pub const fn new(ticks_per_frame: u32, frame_count: u32) -> Self {
        Self {
            ticks_per_frame,
            frame_count,
        }
    }

    /// Frame shown at `counter`, looping forever.
    pub fn frame_at(&self, counter: u32) -> u32 {
        if self.ticks_per_frame == 0 || self.frame_count == 0 {
            return 0;
        }
        counter / self.ticks_per_frame % self.frame_count
    }

    /// Ticks for one full loop.
    pub fn period(&self) -> u32 {
        self.ticks_per_frame * self.frame_count
    }
}
