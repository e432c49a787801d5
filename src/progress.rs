//! Step progress indicator geometry
//!
//! The submission form walks through three steps. The track fills from the
//! first to the current step; the active step is ringed by six small
//! particles orbiting 20px out, one every 60°, with staggered start times.

use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub number: u8,
    pub title: &'static str,
    pub icon: &'static str,
}

pub const STEPS: &[Step] = &[
    Step { number: 1, title: "Projet", icon: "fa-rocket" },
    Step { number: 2, title: "Équipe", icon: "fa-users" },
    Step { number: 3, title: "Confirmation", icon: "fa-check-circle" },
];

const ORBIT_PARTICLES: usize = 6;
const ORBIT_RADIUS: f64 = 20.0;
const ORBIT_STAGGER_SECS: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StepStatus {
    Complete,
    Active,
    Pending,
}

impl StepStatus {
    /// Complete and active steps are highlighted
    pub fn is_lit(self) -> bool {
        !matches!(self, StepStatus::Pending)
    }
}

/// Everything needed to draw one step marker and its caption
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct StepView {
    pub number: u8,
    pub title: &'static str,
    pub icon: &'static str,
    pub status: StepStatus,
    pub lit: bool,
    pub caption: String,
}

/// One particle circling the active step marker
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OrbitParticle {
    pub angle_deg: f64,
    /// Offset from the marker centre in px (y grows downwards)
    pub offset: [f64; 2],
    pub delay_secs: f64,
}

#[derive(Clone, Debug)]
pub struct ProgressTrack {
    steps: &'static [Step],
    current: u8,
}

impl Default for ProgressTrack {
    fn default() -> Self {
        Self::new(STEPS)
    }
}

impl ProgressTrack {
    pub fn new(steps: &'static [Step]) -> Self {
        Self { steps, current: 1 }
    }

    pub fn steps(&self) -> &'static [Step] {
        self.steps
    }

    pub fn current(&self) -> u8 {
        self.current
    }

    fn last(&self) -> u8 {
        self.steps.len().clamp(1, u8::MAX as usize) as u8
    }

    /// Jump to `step` (clamped to the valid range). Returns whether it changed.
    pub fn select(&mut self, step: u8) -> bool {
        let step = step.clamp(1, self.last());
        let changed = step != self.current;
        self.current = step;
        changed
    }

    /// Track fill in percent: 0 on the first step, 100 on the last
    pub fn percentage(&self) -> f64 {
        if self.steps.len() < 2 {
            return 100.0;
        }
        (self.current as f64 - 1.0) / (self.steps.len() as f64 - 1.0) * 100.0
    }

    pub fn status(&self, step: u8) -> StepStatus {
        match step.cmp(&self.current) {
            std::cmp::Ordering::Less => StepStatus::Complete,
            std::cmp::Ordering::Equal => StepStatus::Active,
            std::cmp::Ordering::Greater => StepStatus::Pending,
        }
    }

    /// Caption under each step: its share of the whole form, rounded down
    pub fn caption(&self, step: u8) -> String {
        let share = step as usize * 100 / self.steps.len().max(1);
        format!("{}%", share)
    }

    /// Marker state for every step, in order
    pub fn step_views(&self) -> Vec<StepView> {
        self.steps
            .iter()
            .map(|step| {
                let status = self.status(step.number);
                StepView {
                    number: step.number,
                    title: step.title,
                    icon: step.icon,
                    status,
                    lit: status.is_lit(),
                    caption: self.caption(step.number),
                }
            })
            .collect()
    }

    /// Orbit particles for `step`; empty unless it is the active one
    pub fn orbit_particles(&self, step: u8) -> Vec<OrbitParticle> {
        if self.status(step) != StepStatus::Active {
            return Vec::new();
        }

        (0..ORBIT_PARTICLES)
            .map(|i| {
                let angle_deg = i as f64 * 360.0 / ORBIT_PARTICLES as f64;
                let theta = angle_deg.to_radians();
                OrbitParticle {
                    angle_deg,
                    // (0, -r) rotated clockwise by theta
                    offset: [ORBIT_RADIUS * theta.sin(), -ORBIT_RADIUS * theta.cos()],
                    delay_secs: i as f64 * ORBIT_STAGGER_SECS,
                }
            })
            .collect()
    }
}
