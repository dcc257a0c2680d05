//! Spatial classification of edges.

use log::{debug, warn};
use std::collections::HashMap;

use crate::config::RoutingConfig;
use crate::ir::{Connection, Node};

use super::types::{AnnotatedEdge, Direction, Rect, SpatialInfo, SpatialReport};

/// Build node lookup: node_id -> node.
pub fn build_node_lookup(nodes: &[Node]) -> HashMap<&str, &Node> {
    nodes.iter().map(|n| (n.id.as_str(), n)).collect()
}

/// Dominant direction of a center-to-center delta.
/// Vertical wins when both axes are equal.
pub fn primary_direction(delta_x: f64, delta_y: f64) -> Direction {
    if delta_x.abs() > delta_y.abs() {
        horizontal(delta_x)
    } else {
        vertical(delta_y)
    }
}

fn horizontal(delta_x: f64) -> Direction {
    if delta_x > 0.0 {
        Direction::Right
    } else {
        Direction::Left
    }
}

fn vertical(delta_y: f64) -> Direction {
    if delta_y > 0.0 {
        Direction::Down
    } else {
        Direction::Up
    }
}

/// Minor/major axis ratio; 0 when both deltas are 0.
pub fn axis_ratio(delta_x: f64, delta_y: f64) -> f64 {
    let (ax, ay) = (delta_x.abs(), delta_y.abs());
    let max = ax.max(ay);
    if max == 0.0 { 0.0 } else { ax.min(ay) / max }
}

/// Classify the relationship between two boxes.
pub fn spatial_info(source: &Rect, target: &Rect, config: &RoutingConfig) -> SpatialInfo {
    let from = source.center();
    let to = target.center();
    let delta_x = to.x - from.x;
    let delta_y = to.y - from.y;
    let distance = (delta_x * delta_x + delta_y * delta_y).sqrt();
    let angle_degrees = if delta_x == 0.0 && delta_y == 0.0 {
        0.0
    } else {
        delta_y.atan2(delta_x).to_degrees()
    };

    let (primary_direction, secondary_direction) = if delta_x.abs() > delta_y.abs() {
        (horizontal(delta_x), vertical(delta_y))
    } else {
        (vertical(delta_y), horizontal(delta_x))
    };

    SpatialInfo {
        primary_direction,
        secondary_direction,
        angle_degrees,
        distance,
        is_diagonal: axis_ratio(delta_x, delta_y) > config.diagonal_ratio,
        is_close: distance < config.close_distance,
        delta_x,
        delta_y,
    }
}

/// Annotate every resolvable connection with its spatial info.
///
/// Connections naming an unknown node are skipped with a warning.
pub fn analyze<'a>(
    nodes: &'a [Node],
    connections: &'a [Connection],
    config: &RoutingConfig,
) -> (Vec<AnnotatedEdge<'a>>, SpatialReport) {
    let lookup = build_node_lookup(nodes);
    let mut report = SpatialReport::default();
    let mut annotated = Vec::with_capacity(connections.len());

    for (index, connection) in connections.iter().enumerate() {
        let (source, target) = match (
            lookup.get(connection.source.as_str()),
            lookup.get(connection.target.as_str()),
        ) {
            (Some(s), Some(t)) => (*s, *t),
            _ => {
                warn!(
                    "skipping connection {} -> {}: unknown node",
                    connection.source, connection.target
                );
                report.skipped += 1;
                continue;
            }
        };

        let spatial = spatial_info(&source.bounds(), &target.bounds(), config);
        match spatial.primary_direction {
            Direction::Left => report.left += 1,
            Direction::Right => report.right += 1,
            Direction::Up => report.up += 1,
            Direction::Down => report.down += 1,
        }
        if spatial.is_diagonal {
            report.diagonal += 1;
        }
        if spatial.is_close {
            report.close += 1;
        }

        annotated.push(AnnotatedEdge {
            index,
            source: source.id.as_str(),
            target: target.id.as_str(),
            spatial,
        });
    }

    debug!(
        "spatial analysis: {} edges ({} right, {} left, {} up, {} down), {} diagonal, {} close, {} skipped",
        report.total(),
        report.right,
        report.left,
        report.up,
        report.down,
        report.diagonal,
        report.close,
        report.skipped
    );

    (annotated, report)
}
