//! Headless host: frames fire only when the driver says so
//!
//! Used by the CLI (driven by a tokio interval) and by the lifecycle tests.

use std::time::Duration;

use tracing::trace;

use crate::animation::Host;
use crate::core::Viewport;
use crate::error::FieldError;

/// Longest run the headless driver accepts
pub const MAX_RUN_SECS: f64 = 7.0 * 24.0 * 3600.0;
/// Fastest frame rate the headless driver accepts
pub const MAX_FPS: f64 = 1000.0;

/// Validated timers for a headless run
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunTiming {
    pub frame_period: Duration,
    pub duration: Duration,
    /// Half-way point, where a scripted resize is applied
    pub midpoint: Duration,
}

impl RunTiming {
    pub fn new(seconds: f64, fps: f64) -> Result<Self, FieldError> {
        if !(seconds.is_finite() && (0.0..=MAX_RUN_SECS).contains(&seconds)) {
            return Err(FieldError::Config(format!(
                "seconds must be within [0, {}], got {}",
                MAX_RUN_SECS, seconds
            )));
        }
        if !(fps.is_finite() && fps > 0.0 && fps <= MAX_FPS) {
            return Err(FieldError::Config(format!(
                "fps must be within (0, {}], got {}",
                MAX_FPS, fps
            )));
        }

        let duration = Duration::from_secs_f64(seconds);
        Ok(Self {
            frame_period: Duration::from_secs_f64(1.0 / fps),
            duration,
            midpoint: duration / 2,
        })
    }
}

/// Frame token handed out by [`HeadlessHost`]
pub type FrameId = u64;

#[derive(Debug, Default)]
pub struct HeadlessHost {
    viewport: Viewport,
    next_id: FrameId,
    pending: Option<FrameId>,
    cancelled: Vec<FrameId>,
    listening: bool,
    unlisten_calls: u32,
    fail_next: bool,
}

impl HeadlessHost {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            ..Self::default()
        }
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Take the pending frame so the driver can deliver it
    pub fn fire(&mut self) -> Option<FrameId> {
        self.pending.take()
    }

    pub fn pending(&self) -> Option<FrameId> {
        self.pending
    }

    pub fn frames_requested(&self) -> u64 {
        self.next_id
    }

    pub fn cancelled(&self) -> &[FrameId] {
        &self.cancelled
    }

    pub fn is_listening(&self) -> bool {
        self.listening
    }

    pub fn unlisten_calls(&self) -> u32 {
        self.unlisten_calls
    }

    /// Make the next `request_frame` fail
    pub fn fail_next_request(&mut self) {
        self.fail_next = true;
    }
}

impl Host for HeadlessHost {
    type Frame = FrameId;

    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn request_frame(&mut self) -> Result<FrameId, FieldError> {
        if std::mem::take(&mut self.fail_next) {
            return Err(FieldError::Scheduler("headless host refused frame".into()));
        }
        if let Some(pending) = self.pending {
            return Err(FieldError::Scheduler(format!("frame {} still pending", pending)));
        }

        let id = self.next_id;
        self.next_id += 1;
        self.pending = Some(id);
        trace!(id, "Frame requested");
        Ok(id)
    }

    fn cancel_frame(&mut self, frame: FrameId) {
        if self.pending == Some(frame) {
            self.pending = None;
        }
        self.cancelled.push(frame);
    }

    fn listen_resize(&mut self) -> Result<(), FieldError> {
        self.listening = true;
        Ok(())
    }

    fn unlisten_resize(&mut self) {
        self.listening = false;
        self.unlisten_calls += 1;
    }
}
