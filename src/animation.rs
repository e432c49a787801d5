//! Animation loop lifecycle
//!
//! `FieldLoop` ties a [`FieldRenderer`] to a [`Host`] that knows the viewport,
//! schedules frames at display cadence and delivers resize notifications.
//!
//! ```text
//!   Stopped --start()--> Running --teardown()--> Stopped (terminal)
//! ```
//!
//! The host calls [`FieldLoop::on_frame`] when a scheduled frame fires and
//! [`FieldLoop::on_resize`] when the viewport changes. Exactly one frame is
//! pending while running, so frames never overlap.

use std::fmt;

use tracing::{debug, error, info, warn};

use crate::core::Viewport;
use crate::error::FieldError;
use crate::render::{FieldRenderer, Surface};
use crate::stats::{FpsCounter, FrameStats};

/// Environment the loop runs in (browser window, headless driver, ...)
pub trait Host {
    /// Token identifying one scheduled frame
    type Frame: Copy + fmt::Debug;

    fn viewport(&self) -> Viewport;

    /// Schedule the next frame callback
    fn request_frame(&mut self) -> Result<Self::Frame, FieldError>;

    /// Cancel a frame that has not fired yet
    fn cancel_frame(&mut self, frame: Self::Frame);

    fn listen_resize(&mut self) -> Result<(), FieldError>;

    fn unlisten_resize(&mut self);
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LoopState {
    #[default]
    Stopped,
    Running,
}

pub struct FieldLoop<S: Surface, H: Host> {
    renderer: FieldRenderer<S>,
    host: H,
    state: LoopState,
    /// Frame scheduled with the host and not yet delivered
    pending: Option<H::Frame>,
    listening: bool,
    /// Set by teardown; a torn-down loop never starts again
    finished: bool,
    fps: FpsCounter,
}

impl<S: Surface, H: Host> FieldLoop<S, H> {
    pub fn new(renderer: FieldRenderer<S>, host: H) -> Self {
        Self {
            renderer,
            host,
            state: LoopState::Stopped,
            pending: None,
            listening: false,
            finished: false,
            fps: FpsCounter::new(),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == LoopState::Running
    }

    pub fn renderer(&self) -> &FieldRenderer<S> {
        &self.renderer
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn pending_frame(&self) -> Option<H::Frame> {
        self.pending
    }

    pub fn stats(&self) -> FrameStats {
        self.renderer.stats()
    }

    pub fn fps(&self) -> f64 {
        self.fps.fps()
    }

    /// Initialize against the host viewport, draw the first frame and schedule the next.
    ///
    /// Without a surface the loop stays stopped and nothing is scheduled.
    pub fn start(&mut self) -> Result<(), FieldError> {
        if self.finished || self.is_running() {
            debug!(state = ?self.state, finished = self.finished, "start ignored");
            return Ok(());
        }
        if !self.renderer.has_surface() {
            warn!("Drawing surface unavailable, neural field disabled");
            return Ok(());
        }

        let viewport = self.host.viewport();
        self.renderer.initialize(viewport);

        if let Err(e) = self.host.listen_resize() {
            error!(error = %e, "Failed to attach resize listener");
            return Err(e);
        }
        self.listening = true;
        self.state = LoopState::Running;

        info!(
            width = viewport.width,
            height = viewport.height,
            nodes = self.renderer.nodes().len(),
            "Neural field running"
        );

        self.advance()
    }

    /// A scheduled frame fired
    pub fn on_frame(&mut self) -> Result<(), FieldError> {
        self.pending = None;
        if !self.is_running() {
            return Ok(());
        }
        self.advance()
    }

    /// The host viewport changed; regenerate nodes for the new size
    pub fn on_resize(&mut self) {
        if !self.is_running() {
            return;
        }
        let viewport = self.host.viewport();
        self.renderer.on_resize(viewport);
    }

    /// Cancel the pending frame and detach the resize listener. Idempotent.
    pub fn teardown(&mut self) {
        if let Some(frame) = self.pending.take() {
            debug!(?frame, "Cancelling pending frame");
            self.host.cancel_frame(frame);
        }
        if self.listening {
            self.host.unlisten_resize();
            self.listening = false;
        }
        if self.is_running() {
            info!(frames = self.renderer.stats().frames, "Neural field stopped");
        }
        self.state = LoopState::Stopped;
        self.finished = true;
    }

    fn advance(&mut self) -> Result<(), FieldError> {
        self.renderer.tick();
        self.fps.tick();

        match self.host.request_frame() {
            Ok(frame) => {
                self.pending = Some(frame);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to schedule next frame");
                self.teardown();
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FieldConfig;
    use crate::headless::HeadlessHost;
    use crate::render::RecordingSurface;

    type TestLoop = FieldLoop<RecordingSurface, HeadlessHost>;

    fn field_loop(width: u32, height: u32) -> TestLoop {
        let renderer = FieldRenderer::new(
            Some(RecordingSurface::default()),
            FieldConfig::default().with_seed(17),
        );
        FieldLoop::new(renderer, HeadlessHost::new(Viewport::new(width, height)))
    }

    /// Deliver the pending frame, if any, the way a host would
    fn pump(field: &mut TestLoop) -> bool {
        if field.host_mut().fire().is_none() {
            return false;
        }
        field.on_frame().unwrap();
        true
    }

    #[test]
    fn test_start_transitions_to_running() {
        let mut field = field_loop(1500, 1000);
        assert_eq!(field.state(), LoopState::Stopped);
        assert!(field.pending_frame().is_none());

        field.start().unwrap();
        assert_eq!(field.state(), LoopState::Running);
        assert_eq!(field.renderer().nodes().len(), 100);
        assert!(field.pending_frame().is_some());
        assert!(field.host().is_listening());
        // First frame is drawn immediately
        assert_eq!(field.stats().frames, 1);
    }

    #[test]
    fn test_frames_run_one_at_a_time() {
        let mut field = field_loop(600, 400);
        field.start().unwrap();

        for _ in 0..10 {
            assert!(pump(&mut field));
            assert!(field.pending_frame().is_some());
        }
        assert_eq!(field.stats().frames, 11);
        assert_eq!(field.host().frames_requested(), 11);
    }

    #[test]
    fn test_resize_regenerates_node_set() {
        let mut field = field_loop(1500, 1000);
        field.start().unwrap();
        pump(&mut field);
        assert_eq!(field.renderer().nodes().len(), 100);

        field.host_mut().set_viewport(Viewport::new(300, 200));
        field.on_resize();
        assert_eq!(field.renderer().nodes().len(), 4);
        assert_eq!(
            field.renderer().surface().unwrap().size(),
            Viewport::new(300, 200)
        );

        // Loop keeps running against the new set
        assert!(pump(&mut field));
        assert_eq!(field.stats().nodes, 4);
        for node in field.renderer().nodes().iter() {
            assert!((0.0..=300.0).contains(&node.x));
            assert!((0.0..=200.0).contains(&node.y));
        }
    }

    #[test]
    fn test_teardown_cancels_pending_frame() {
        let mut field = field_loop(600, 400);
        field.start().unwrap();
        let pending = field.pending_frame().unwrap();

        field.teardown();
        assert_eq!(field.state(), LoopState::Stopped);
        assert!(field.pending_frame().is_none());
        assert_eq!(field.host().cancelled(), &[pending]);
        assert!(!field.host().is_listening());

        // Nothing left to fire, nothing drawn
        let frames = field.stats().frames;
        assert!(!pump(&mut field));
        assert_eq!(field.stats().frames, frames);
    }

    #[test]
    fn test_teardown_is_idempotent() {
        let mut field = field_loop(600, 400);
        field.start().unwrap();

        field.teardown();
        field.teardown();
        assert_eq!(field.host().cancelled().len(), 1);
        assert_eq!(field.host().unlisten_calls(), 1);
        assert_eq!(field.host().frames_requested(), 1);

        // Terminal: start after teardown does nothing
        field.start().unwrap();
        assert_eq!(field.state(), LoopState::Stopped);
        assert!(field.pending_frame().is_none());
    }

    #[test]
    fn test_teardown_before_start() {
        let mut field = field_loop(600, 400);
        field.teardown();
        assert!(field.host().cancelled().is_empty());
        assert_eq!(field.host().unlisten_calls(), 0);
    }

    #[test]
    fn test_stale_frame_after_teardown_is_ignored() {
        let mut field = field_loop(600, 400);
        field.start().unwrap();
        field.teardown();

        // A host that delivers a frame anyway must not cause a tick
        field.on_frame().unwrap();
        assert_eq!(field.stats().frames, 1);
        assert!(field.pending_frame().is_none());
    }

    #[test]
    fn test_resize_after_teardown_is_ignored() {
        let mut field = field_loop(1500, 1000);
        field.start().unwrap();
        field.teardown();

        field.host_mut().set_viewport(Viewport::new(300, 200));
        field.on_resize();
        assert_eq!(field.renderer().nodes().len(), 100);
    }

    #[test]
    fn test_missing_surface_stays_stopped() {
        let renderer: FieldRenderer<RecordingSurface> =
            FieldRenderer::new(None, FieldConfig::default().with_seed(1));
        let mut field = FieldLoop::new(renderer, HeadlessHost::new(Viewport::new(800, 600)));

        field.start().unwrap();
        assert_eq!(field.state(), LoopState::Stopped);
        assert_eq!(field.host().frames_requested(), 0);
        assert!(!field.host().is_listening());
        field.teardown();
    }

    #[test]
    fn test_zero_viewport_runs_empty() {
        let mut field = field_loop(0, 0);
        field.start().unwrap();
        assert!(field.is_running());
        assert!(pump(&mut field));
        assert_eq!(field.stats().nodes, 0);
        assert_eq!(field.stats().links, 0);
    }

    #[test]
    fn test_schedule_failure_stops_loop() {
        let mut field = field_loop(600, 400);
        field.host_mut().fail_next_request();

        assert!(matches!(field.start(), Err(FieldError::Scheduler(_))));
        assert_eq!(field.state(), LoopState::Stopped);
        assert!(!field.host().is_listening());
    }
}
