//! Nodes and the node set
//!
//! - Viewport: surface dimensions in pixels
//! - Node: one drifting point
//! - NodeSet: every live node for the current viewport, rebuilt on resize

use rand::Rng;
use serde::Serialize;

use super::config::FieldConfig;

/// Drawing surface size in whole pixels
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Build from host-reported CSS pixel sizes (fractional, possibly negative or NaN)
    pub fn from_css(width: f64, height: f64) -> Self {
        let px = |v: f64| if v.is_finite() && v > 0.0 { v.floor().min(u32::MAX as f64) as u32 } else { 0 };
        Self::new(px(width), px(height))
    }

    pub fn area(self) -> f64 {
        self.width as f64 * self.height as f64
    }

    pub fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Number of nodes a viewport of this size carries
pub fn node_count_for(viewport: Viewport, area_per_node: f64) -> usize {
    (viewport.area() / area_per_node).floor() as usize
}

/// One animated point; velocity is in pixels per frame
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Node {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl Node {
    pub fn new(x: f64, y: f64, vx: f64, vy: f64) -> Self {
        Self { x, y, vx, vy }
    }

    pub fn distance_to(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// All active nodes for one viewport size
#[derive(Clone, Debug, Default)]
pub struct NodeSet {
    nodes: Vec<Node>,
    bounds: Viewport,
}

impl NodeSet {
    /// Scatter `node_count_for(bounds)` nodes uniformly over the viewport
    pub fn spawn(bounds: Viewport, config: &FieldConfig, rng: &mut impl Rng) -> Self {
        let count = node_count_for(bounds, config.area_per_node);
        let (w, h) = (bounds.width as f64, bounds.height as f64);
        let speed = config.max_speed;

        // count > 0 implies a non-empty surface, so both position ranges are non-empty
        let nodes = (0..count)
            .map(|_| Node {
                x: rng.gen_range(0.0..w),
                y: rng.gen_range(0.0..h),
                vx: if speed > 0.0 { rng.gen_range(-speed..=speed) } else { 0.0 },
                vy: if speed > 0.0 { rng.gen_range(-speed..=speed) } else { 0.0 },
            })
            .collect();

        Self { nodes, bounds }
    }

    /// Wrap explicit nodes, e.g. for scripted scenes
    pub fn from_nodes(bounds: Viewport, nodes: Vec<Node>) -> Self {
        Self { nodes, bounds }
    }

    pub fn bounds(&self) -> Viewport {
        self.bounds
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn as_slice(&self) -> &[Node] {
        &self.nodes
    }

    pub fn as_mut_slice(&mut self) -> &mut [Node] {
        &mut self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }
}
