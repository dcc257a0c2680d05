//! Grouping of parallel edges that share an endpoint.

use std::collections::HashMap;

use super::analysis::primary_direction;
use super::types::{AnnotatedEdge, ParallelPosition, Side};

/// Edges sharing one endpoint, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct ConnectionGroup {
    /// Indices into `Diagram::connections`
    pub edges: Vec<usize>,
    /// Majority approach side; only set on incoming groups
    pub dominant_side: Option<Side>,
}

impl ConnectionGroup {
    pub fn count(&self) -> usize {
        self.edges.len()
    }

    /// Position of an edge within this group.
    pub fn position_of(&self, edge_index: usize) -> Option<usize> {
        self.edges.iter().position(|&i| i == edge_index)
    }
}

/// Incoming and outgoing groups per node.
#[derive(Debug, Clone, Default)]
pub struct ConnectionGroups<'a> {
    /// Target node id -> edges ending there
    pub incoming: HashMap<&'a str, ConnectionGroup>,
    /// Source node id -> edges starting there
    pub outgoing: HashMap<&'a str, ConnectionGroup>,
}

impl<'a> ConnectionGroups<'a> {
    /// Parallel position of an annotated edge.
    pub fn position(&self, edge: &AnnotatedEdge<'_>) -> ParallelPosition {
        let incoming = self.incoming.get(edge.target);
        let outgoing = self.outgoing.get(edge.source);

        ParallelPosition {
            index_within_incoming_group: incoming
                .and_then(|g| g.position_of(edge.index))
                .unwrap_or(0),
            index_within_outgoing_group: outgoing
                .and_then(|g| g.position_of(edge.index))
                .unwrap_or(0),
            total_incoming_at_target: incoming.map_or(1, ConnectionGroup::count),
            total_outgoing_at_source: outgoing.map_or(1, ConnectionGroup::count),
            dominant_incoming_side: incoming
                .and_then(|g| g.dominant_side)
                .unwrap_or(Side::Left),
        }
    }

    pub fn dominant_side(&self, node_id: &str) -> Option<Side> {
        self.incoming.get(node_id).and_then(|g| g.dominant_side)
    }
}

/// Build incoming/outgoing groups from annotated edges.
pub fn build_groups<'a>(edges: &[AnnotatedEdge<'a>]) -> ConnectionGroups<'a> {
    let mut groups = ConnectionGroups::default();
    let mut incoming_edges: HashMap<&str, Vec<&AnnotatedEdge<'a>>> = HashMap::new();

    for edge in edges {
        groups
            .incoming
            .entry(edge.target)
            .or_default()
            .edges
            .push(edge.index);
        groups
            .outgoing
            .entry(edge.source)
            .or_default()
            .edges
            .push(edge.index);
        incoming_edges.entry(edge.target).or_default().push(edge);
    }

    for (target, group) in groups.incoming.iter_mut() {
        if let Some(edges) = incoming_edges.get(target) {
            group.dominant_side = Some(dominant_side(edges));
        }
    }

    groups
}

/// Majority vote over the approach sides; ties resolve to `Left`.
fn dominant_side(edges: &[&AnnotatedEdge<'_>]) -> Side {
    let mut votes: HashMap<Side, usize> = HashMap::new();
    for edge in edges {
        let side = primary_direction(edge.spatial.delta_x, edge.spatial.delta_y).side();
        *votes.entry(side).or_insert(0) += 1;
    }

    let best = votes.values().copied().max().unwrap_or(0);
    let mut leaders = votes.iter().filter(|entry| *entry.1 == best);
    match (leaders.next(), leaders.next()) {
        (Some((&side, _)), None) => side,
        _ => Side::Left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RoutingConfig;
    use crate::layout::analysis::spatial_info;
    use crate::layout::types::Rect;

    fn edge<'a>(
        index: usize,
        source: &'a str,
        target: &'a str,
        s: Rect,
        t: Rect,
    ) -> AnnotatedEdge<'a> {
        AnnotatedEdge {
            index,
            source,
            target,
            spatial: spatial_info(&s, &t, &RoutingConfig::default()),
        }
    }

    fn at(x: f64, y: f64) -> Rect {
        Rect::new(x, y, 100.0, 50.0)
    }

    #[test]
    fn test_incoming_indices_follow_insertion_order() {
        let hub = at(500.0, 500.0);
        let edges = vec![
            edge(0, "a", "hub", at(0.0, 500.0), hub),
            edge(3, "b", "hub", at(0.0, 0.0), hub),
            edge(5, "c", "hub", at(900.0, 500.0), hub),
            edge(7, "d", "hub", at(0.0, 900.0), hub),
        ];
        let groups = build_groups(&edges);

        for (expected, e) in edges.iter().enumerate() {
            let pos = groups.position(e);
            assert_eq!(pos.index_within_incoming_group, expected);
            assert_eq!(pos.total_incoming_at_target, 4);
            assert_eq!(pos.total_outgoing_at_source, 1);
            assert_eq!(pos.index_within_outgoing_group, 0);
        }
        assert_eq!(groups.incoming["hub"].count(), 4);
    }

    #[test]
    fn test_outgoing_group() {
        let edges = vec![
            edge(0, "src", "x", at(0.0, 0.0), at(300.0, 0.0)),
            edge(1, "src", "y", at(0.0, 0.0), at(300.0, 300.0)),
        ];
        let groups = build_groups(&edges);

        assert_eq!(groups.outgoing["src"].edges, vec![0, 1]);
        assert_eq!(groups.position(&edges[1]).index_within_outgoing_group, 1);
        assert_eq!(groups.position(&edges[1]).total_outgoing_at_source, 2);
        assert!(groups.outgoing["src"].dominant_side.is_none());
    }

    #[test]
    fn test_dominant_side_majority() {
        let hub = at(500.0, 500.0);
        let edges = vec![
            // approaching from above: direction down
            edge(0, "a", "hub", at(500.0, 0.0), hub),
            edge(1, "b", "hub", at(520.0, 0.0), hub),
            edge(2, "c", "hub", at(0.0, 500.0), hub),
        ];
        let groups = build_groups(&edges);
        assert_eq!(groups.dominant_side("hub"), Some(Side::Bottom));
        assert_eq!(groups.position(&edges[2]).dominant_incoming_side, Side::Bottom);
    }

    #[test]
    fn test_dominant_side_tie_is_left() {
        let hub = at(500.0, 500.0);
        let edges = vec![
            edge(0, "a", "hub", at(500.0, 0.0), hub),
            edge(1, "b", "hub", at(500.0, 900.0), hub),
        ];
        let groups = build_groups(&edges);
        assert_eq!(groups.dominant_side("hub"), Some(Side::Left));
    }

    #[test]
    fn test_self_loop_in_both_groups() {
        let r = at(0.0, 0.0);
        let edges = vec![edge(0, "a", "a", r, r), edge(1, "a", "a", r, r)];
        let groups = build_groups(&edges);

        let second = groups.position(&edges[1]);
        assert_eq!(second.index_within_incoming_group, 1);
        assert_eq!(second.index_within_outgoing_group, 1);
        assert_eq!(second.total_incoming_at_target, 2);
    }
}
