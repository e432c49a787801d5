//! Frame counters and display cadence

use std::collections::VecDeque;

use serde::Serialize;

/// Totals for the frames drawn so far
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub frames: u64,
    /// Connections drawn in the last frame
    pub links: usize,
    /// Nodes drawn in the last frame
    pub nodes: usize,
    /// Connections drawn over all frames
    pub links_total: u64,
}

impl FrameStats {
    pub fn record(&mut self, links: usize, nodes: usize) {
        self.frames += 1;
        self.links = links;
        self.nodes = nodes;
        self.links_total += links as u64;
    }

    pub fn mean_links(&self) -> f64 {
        if self.frames == 0 {
            return 0.0;
        }
        self.links_total as f64 / self.frames as f64
    }
}

/// Rolling frames-per-second estimate over the last 60 frames
#[derive(Debug)]
pub struct FpsCounter {
    frames: VecDeque<f64>,
}

impl FpsCounter {
    const WINDOW: usize = 60;

    pub fn new() -> Self {
        Self {
            frames: VecDeque::with_capacity(Self::WINDOW + 1),
        }
    }

    pub fn tick(&mut self) {
        self.tick_at(now_seconds());
    }

    pub fn tick_at(&mut self, now_seconds: f64) {
        self.frames.push_back(now_seconds);
        if self.frames.len() > Self::WINDOW {
            self.frames.pop_front();
        }
    }

    pub fn fps(&self) -> f64 {
        let (Some(first), Some(last)) = (self.frames.front(), self.frames.back()) else {
            return 0.0;
        };
        let elapsed = last - first;
        if self.frames.len() < 2 || elapsed <= 0.0 {
            return 0.0;
        }
        (self.frames.len() as f64 - 1.0) / elapsed
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Seconds since an arbitrary, fixed origin
#[cfg(target_arch = "wasm32")]
pub fn now_seconds() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now() / 1000.0)
        .unwrap_or(0.0)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn now_seconds() -> f64 {
    use std::sync::OnceLock;
    use std::time::Instant;

    static START: OnceLock<Instant> = OnceLock::new();
    START.get_or_init(Instant::now).elapsed().as_secs_f64()
}
