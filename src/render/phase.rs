use std::ops::Range;

use crate::foundation::{
    core::FrameIndex,
    error::{ScanwipeError, ScanwipeResult},
};

/// Default timeline length in frames.
pub const DEFAULT_TOTAL_FRAMES: u64 = 105;
/// Longest accepted timeline (an hour at 30 fps).
pub const MAX_TOTAL_FRAMES: u64 = 108_000;

/// One of the four fixed segments of the timeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Show "before" unmodified.
    Hold,
    /// Sweep a glow line across "before".
    Scan,
    /// Wipe "after" in from the right edge.
    RevealAfter,
    /// Wipe "before" back in from the left edge.
    RevealBefore,
}

/// A phase plus the frame's linear progress through it, in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseSample {
    /// Active phase.
    pub phase: Phase,
    /// Un-eased progress through `phase`.
    pub progress: f64,
}

/// Phase boundaries for a timeline of `total` frames, in a 1:2:2:2 ratio.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timeline {
    total: u64,
    hold_end: u64,
    scan_end: u64,
    after_end: u64,
}

impl Timeline {
    /// Split `total` frames into phases. `total` must be non-zero.
    pub fn new(total: u64) -> ScanwipeResult<Self> {
        if total == 0 {
            return Err(ScanwipeError::validation("total frame count must be > 0"));
        }
        Ok(Self {
            total,
            hold_end: sevenths(total, 1),
            scan_end: sevenths(total, 3),
            after_end: sevenths(total, 5),
        })
    }

    /// Total frame count.
    pub fn total(self) -> u64 {
        self.total
    }

    /// Frame indices belonging to `phase`.
    pub fn range(self, phase: Phase) -> Range<u64> {
        match phase {
            Phase::Hold => 0..self.hold_end,
            Phase::Scan => self.hold_end..self.scan_end,
            Phase::RevealAfter => self.scan_end..self.after_end,
            Phase::RevealBefore => self.after_end..self.total,
        }
    }

    /// Select the phase for `frame` and its local progress.
    ///
    /// The closing phase is normalized so the last frame of the timeline lands exactly on 1.0,
    /// which makes the final frame identical to the first and the clip loop cleanly.
    pub fn sample(self, frame: FrameIndex) -> ScanwipeResult<PhaseSample> {
        let i = frame.0;
        if i >= self.total {
            return Err(ScanwipeError::validation(format!(
                "frame {i} is outside a {}-frame timeline",
                self.total
            )));
        }

        let (phase, progress) = if i < self.hold_end {
            (Phase::Hold, 0.0)
        } else if i < self.scan_end {
            (Phase::Scan, local(i, self.range(Phase::Scan), 0))
        } else if i < self.after_end {
            (Phase::RevealAfter, local(i, self.range(Phase::RevealAfter), 0))
        } else {
            (Phase::RevealBefore, local(i, self.range(Phase::RevealBefore), 1))
        };
        Ok(PhaseSample { phase, progress })
    }
}

/// `floor(total * k / 7)` without the intermediate product.
fn sevenths(total: u64, k: u64) -> u64 {
    total / 7 * k + total % 7 * k / 7
}

fn local(i: u64, range: Range<u64>, trim: u64) -> f64 {
    let len = (range.end - range.start).saturating_sub(trim);
    if len == 0 {
        return 1.0;
    }
    ((i - range.start) as f64 / len as f64).min(1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/render/phase.rs"]
mod tests;
