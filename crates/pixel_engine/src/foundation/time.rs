//! Time management utilities

use std::time::Duration;

/// A single simulation step handed out by the [`FramePacer`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    /// Time to simulate in seconds, already clamped to the pacer's maximum
    pub delta_time: f32,
    /// Whole frame intervals that were folded into this step
    pub skipped_frames: u32,
}

/// Fixed-cadence frame pacer
///
/// The host reports how much wall time passed; the pacer hands out at most
/// one step per call. When the host falls behind, the missed intervals are
/// coalesced into a single larger step instead of being queued, and the
/// step is clamped so one slow frame cannot destabilise the simulation.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    max_step: Duration,
    accumulated: Duration,
    steps: u64,
    skipped: u64,
}

impl FramePacer {
    /// Create a pacer ticking `target_fps` times per second
    pub fn new(target_fps: u32, max_step: Duration) -> Self {
        let fps = target_fps.max(1);
        Self {
            interval: Duration::from_secs(1) / fps,
            max_step,
            accumulated: Duration::ZERO,
            steps: 0,
            skipped: 0,
        }
    }

    /// Target interval between steps
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Report elapsed wall time, returning a step if one is due
    pub fn advance(&mut self, elapsed: Duration) -> Option<FrameStep> {
        self.accumulated += elapsed;
        if self.accumulated < self.interval {
            return None;
        }

        let due = self.accumulated.as_nanos() / self.interval.as_nanos().max(1);
        let skipped_frames = u32::try_from(due.saturating_sub(1)).unwrap_or(u32::MAX);
        let delta = self.accumulated.min(self.max_step);
        self.accumulated = Duration::ZERO;

        self.steps += 1;
        self.skipped += u64::from(skipped_frames);
        if skipped_frames > 0 {
            log::debug!(
                "Frame pacer behind schedule: coalesced {} frame(s) into one {:.1}ms step",
                skipped_frames,
                delta.as_secs_f32() * 1000.0
            );
        }

        Some(FrameStep {
            delta_time: delta.as_secs_f32(),
            skipped_frames,
        })
    }

    /// Total steps handed out
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Total frames dropped through coalescing
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}
