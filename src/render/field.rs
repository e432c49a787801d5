//! The particle field renderer
//!
//! Owns the node set and (optionally) a drawing surface. Without a surface
//! every operation is a no-op, so a missing 2D context never takes the page
//! down with it.

use rand::rngs::StdRng;
use tracing::{debug, trace};

use super::surface::{Glow, Stroke, Surface};
use crate::core::{field_rng, link_opacity, links, physics, FieldConfig, NodeSet, Viewport};
use crate::stats::FrameStats;

pub struct FieldRenderer<S: Surface> {
    config: FieldConfig,
    rng: StdRng,
    nodes: NodeSet,
    surface: Option<S>,
    stats: FrameStats,
}

impl<S: Surface> FieldRenderer<S> {
    pub fn new(surface: Option<S>, config: FieldConfig) -> Self {
        let rng = field_rng(config.seed);
        Self {
            config,
            rng,
            nodes: NodeSet::default(),
            surface,
            stats: FrameStats::default(),
        }
    }

    pub fn has_surface(&self) -> bool {
        self.surface.is_some()
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn nodes(&self) -> &NodeSet {
        &self.nodes
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    /// Size the surface to `viewport` and scatter a fresh node set over it
    pub fn initialize(&mut self, viewport: Viewport) {
        let Some(surface) = self.surface.as_mut() else {
            trace!("No surface, skipping initialize");
            return;
        };

        surface.resize(viewport);
        self.nodes = NodeSet::spawn(viewport, &self.config, &mut self.rng);

        debug!(
            width = viewport.width,
            height = viewport.height,
            nodes = self.nodes.len(),
            "Node set generated"
        );
    }

    /// Discard the current node set and rebuild it for the new viewport
    pub fn on_resize(&mut self, viewport: Viewport) {
        debug!(previous = self.nodes.len(), "Viewport resized, regenerating nodes");
        self.initialize(viewport);
    }

    /// Replace the node set directly (scripted scenes, tests)
    pub fn set_nodes(&mut self, nodes: NodeSet) {
        self.nodes = nodes;
    }

    /// Advance one frame: clear, move, draw connections, draw nodes
    pub fn tick(&mut self) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        surface.clear();
        physics::step(&mut self.nodes);

        let config = &self.config;
        let nodes = self.nodes.as_slice();

        let mut drawn = 0;
        for link in links(nodes, config.link_distance) {
            let (a, b) = (nodes[link.from], nodes[link.to]);
            let stroke = Stroke {
                color: config.accent,
                alpha: link_opacity(link.distance, config.link_distance, config.link_alpha),
                width: config.link_width,
            };
            surface.stroke_line([a.x, a.y], [b.x, b.y], &stroke);
            drawn += 1;
        }

        let glow = Glow {
            color: config.accent,
            blur: config.glow_blur,
        };
        for node in nodes {
            surface.fill_circle([node.x, node.y], config.node_radius, &glow);
        }

        self.stats.record(drawn, nodes.len());
        trace!(frame = self.stats.frames, links = drawn, nodes = nodes.len(), "Frame drawn");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Node;
    use crate::render::recorder::{DrawCommand, RecordingSurface};
    use crate::theme::colors;

    fn renderer(seed: u64) -> FieldRenderer<RecordingSurface> {
        FieldRenderer::new(
            Some(RecordingSurface::default()),
            FieldConfig::default().with_seed(seed),
        )
    }

    #[test]
    fn test_initialize_sizes_surface_and_spawns() {
        let mut field = renderer(1);
        field.initialize(Viewport::new(1500, 1000));

        assert_eq!(field.nodes().len(), 100);
        assert_eq!(field.surface().unwrap().size(), Viewport::new(1500, 1000));
    }

    #[test]
    fn test_resize_discards_previous_nodes() {
        let mut field = renderer(1);
        field.initialize(Viewport::new(1500, 1000));
        let before: Vec<Node> = field.nodes().as_slice().to_vec();

        field.on_resize(Viewport::new(300, 200));
        assert_eq!(field.nodes().len(), 4);
        assert_eq!(field.nodes().bounds(), Viewport::new(300, 200));
        for node in field.nodes().iter() {
            assert!(!before.contains(node));
            assert!(node.x < 300.0 && node.y < 200.0);
        }
    }

    #[test]
    fn test_tick_draw_order() {
        let mut field = renderer(5);
        field.initialize(Viewport::new(600, 400));
        field.tick();

        let commands = field.surface().unwrap().commands();
        assert!(matches!(commands[0], DrawCommand::Clear { width: 600, height: 400 }));

        // Every line precedes every circle
        let first_circle = commands
            .iter()
            .position(|c| matches!(c, DrawCommand::Circle { .. }))
            .unwrap();
        assert!(commands[first_circle..]
            .iter()
            .all(|c| matches!(c, DrawCommand::Circle { .. })));
        assert_eq!(commands.len() - first_circle, field.nodes().len());
    }

    #[test]
    fn test_connection_scenario() {
        let mut field = renderer(0);
        field.initialize(Viewport::new(1000, 1000));
        field.set_nodes(NodeSet::from_nodes(
            Viewport::new(1000, 1000),
            vec![Node::new(10.0, 10.0, 0.0, 0.0), Node::new(110.0, 10.0, 0.0, 0.0)],
        ));
        field.tick();

        let surface = field.surface().unwrap();
        let lines: Vec<_> = surface.lines().collect();
        assert_eq!(lines.len(), 1);
        let (from, to, stroke) = lines[0];
        assert_eq!(*from, [10.0, 10.0]);
        assert_eq!(*to, [110.0, 10.0]);
        assert!((stroke.alpha - 0.1).abs() < 1e-12);
        assert_eq!(stroke.color, colors::ACCENT);
        assert_eq!(stroke.width, 1.0);

        // Same pair 200px apart: no connection
        field.set_nodes(NodeSet::from_nodes(
            Viewport::new(1000, 1000),
            vec![Node::new(10.0, 10.0, 0.0, 0.0), Node::new(210.0, 10.0, 0.0, 0.0)],
        ));
        field.tick();
        assert_eq!(field.surface().unwrap().lines().count(), 0);
        assert_eq!(field.stats().links, 0);
    }

    #[test]
    fn test_nodes_drawn_with_glow() {
        let mut field = renderer(2);
        field.initialize(Viewport::new(300, 200));
        field.tick();

        let circles: Vec<_> = field.surface().unwrap().circles().collect();
        assert_eq!(circles.len(), 4);
        for (_, radius, glow) in circles {
            assert_eq!(radius, 2.0);
            assert_eq!(glow.blur, 10.0);
            assert_eq!(glow.color, colors::ACCENT);
        }
    }

    #[test]
    fn test_lines_never_at_or_beyond_cutoff() {
        let mut field = renderer(8);
        field.initialize(Viewport::new(800, 600));
        for _ in 0..200 {
            field.tick();
            for (from, to, stroke) in field.surface().unwrap().lines() {
                let d = ((from[0] - to[0]).powi(2) + (from[1] - to[1]).powi(2)).sqrt();
                assert!(d < 150.0);
                assert!(stroke.alpha > 0.0 && stroke.alpha <= 0.3);
            }
        }
        assert_eq!(field.stats().frames, 200);
    }

    #[test]
    fn test_without_surface_is_noop() {
        let mut field: FieldRenderer<RecordingSurface> =
            FieldRenderer::new(None, FieldConfig::default().with_seed(1));
        field.initialize(Viewport::new(1500, 1000));
        field.tick();

        assert!(!field.has_surface());
        assert!(field.nodes().is_empty());
        assert_eq!(field.stats().frames, 0);
    }
}
