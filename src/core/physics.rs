//! Per-frame motion: drift, then bounce elastically off the surface edges

use super::node::{Node, NodeSet, Viewport};

/// Advance every node by one frame
pub fn step(nodes: &mut NodeSet) {
    let bounds = nodes.bounds();
    for node in nodes.as_mut_slice() {
        advance(node, bounds);
    }
}

/// Move one node by its velocity and reflect it off any edge it reached
pub fn advance(node: &mut Node, bounds: Viewport) {
    node.x += node.vx;
    node.y += node.vy;

    bounce(&mut node.x, &mut node.vx, bounds.width as f64);
    bounce(&mut node.y, &mut node.vy, bounds.height as f64);
}

// Touching an edge counts as hitting it; speed is kept, direction flips.
fn bounce(pos: &mut f64, vel: &mut f64, limit: f64) {
    if *pos <= 0.0 || *pos >= limit {
        *vel = -*vel;
        *pos = pos.clamp(0.0, limit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::FieldConfig;
    use crate::core::rng::field_rng;

    #[test]
    fn test_free_drift() {
        let mut node = Node::new(10.0, 20.0, 0.2, -0.1);
        advance(&mut node, Viewport::new(100, 100));
        assert!((node.x - 10.2).abs() < 1e-12);
        assert!((node.y - 19.9).abs() < 1e-12);
        assert_eq!(node.vx, 0.2);
        assert_eq!(node.vy, -0.1);
    }

    #[test]
    fn test_bounce_off_left_edge() {
        let mut node = Node::new(0.1, 50.0, -0.3, 0.0);
        advance(&mut node, Viewport::new(100, 100));
        assert_eq!(node.x, 0.0);
        assert_eq!(node.vx, 0.3);
    }

    #[test]
    fn test_bounce_off_far_edges() {
        let mut node = Node::new(99.9, 99.95, 0.25, 0.1);
        advance(&mut node, Viewport::new(100, 100));
        assert_eq!(node.x, 100.0);
        assert_eq!(node.y, 100.0);
        assert_eq!(node.vx, -0.25);
        assert_eq!(node.vy, -0.1);

        // Next frame moves back inside
        advance(&mut node, Viewport::new(100, 100));
        assert!(node.x < 100.0 && node.y < 100.0);
    }

    #[test]
    fn test_clamp_invariant_over_many_frames() {
        let config = FieldConfig::default();
        let mut rng = field_rng(Some(11));
        let bounds = Viewport::new(400, 300);
        let mut set = NodeSet::spawn(bounds, &config, &mut rng);
        let speeds: Vec<(f64, f64)> = set.iter().map(|n| (n.vx.abs(), n.vy.abs())).collect();

        for _ in 0..5_000 {
            step(&mut set);
            for node in set.iter() {
                assert!((0.0..=400.0).contains(&node.x));
                assert!((0.0..=300.0).contains(&node.y));
            }
        }

        // Bounces never change per-axis speed
        for (node, (sx, sy)) in set.iter().zip(speeds) {
            assert_eq!(node.vx.abs(), sx);
            assert_eq!(node.vy.abs(), sy);
        }
    }
}
