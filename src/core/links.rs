//! Proximity connections between nodes
//!
//! Every unordered pair closer than the link distance gets a line whose
//! opacity falls off linearly with distance. O(n²) per frame; node count is
//! bounded by viewport area so n stays in the low hundreds.

use super::node::Node;

/// A pair of nodes close enough to be connected (`from < to`)
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub from: usize,
    pub to: usize,
    pub distance: f64,
}

/// Line opacity for a connection of length `distance`: 0 at or beyond `link_distance`
#[inline]
pub fn link_opacity(distance: f64, link_distance: f64, link_alpha: f64) -> f64 {
    (1.0 - distance / link_distance).max(0.0) * link_alpha
}

/// All pairs `(i, j)`, `i < j`, with distance strictly below `link_distance`
pub fn links(nodes: &[Node], link_distance: f64) -> impl Iterator<Item = Link> + '_ {
    let n = nodes.len();
    (0..n).flat_map(move |i| {
        (i + 1..n).filter_map(move |j| {
            let distance = nodes[i].distance_to(&nodes[j]);
            (distance < link_distance).then_some(Link { from: i, to: j, distance })
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(x: f64, y: f64) -> Node {
        Node::new(x, y, 0.0, 0.0)
    }

    #[test]
    fn test_opacity_curve() {
        assert!((link_opacity(100.0, 150.0, 0.3) - 0.1).abs() < 1e-12);
        assert_eq!(link_opacity(0.0, 150.0, 0.3), 0.3);
        assert_eq!(link_opacity(150.0, 150.0, 0.3), 0.0);
        assert_eq!(link_opacity(200.0, 150.0, 0.3), 0.0);

        // Strictly decreasing inside the range
        let mut prev = f64::MAX;
        for d in 0..150 {
            let o = link_opacity(d as f64, 150.0, 0.3);
            assert!(o < prev);
            prev = o;
        }
    }

    #[test]
    fn test_pair_within_range_connects() {
        let nodes = [at(0.0, 0.0), at(100.0, 0.0)];
        let found: Vec<Link> = links(&nodes, 150.0).collect();
        assert_eq!(found, vec![Link { from: 0, to: 1, distance: 100.0 }]);
    }

    #[test]
    fn test_pair_out_of_range_skipped() {
        let nodes = [at(0.0, 0.0), at(200.0, 0.0)];
        assert_eq!(links(&nodes, 150.0).count(), 0);

        // Exactly at the cutoff is not drawn either
        let nodes = [at(0.0, 0.0), at(150.0, 0.0)];
        assert_eq!(links(&nodes, 150.0).count(), 0);
    }

    #[test]
    fn test_each_unordered_pair_once() {
        let nodes = [at(0.0, 0.0), at(10.0, 0.0), at(0.0, 10.0), at(500.0, 500.0)];
        let found: Vec<(usize, usize)> = links(&nodes, 150.0).map(|l| (l.from, l.to)).collect();
        assert_eq!(found, vec![(0, 1), (0, 2), (1, 2)]);
    }

    #[test]
    fn test_empty_and_single() {
        assert_eq!(links(&[], 150.0).count(), 0);
        assert_eq!(links(&[at(1.0, 1.0)], 150.0).count(), 0);
    }
}
