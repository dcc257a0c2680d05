//! Exit and entry point selection on node boundaries.

use crate::config::RoutingConfig;
use crate::ir::Node;

use super::obstacles::ObstacleSet;
use super::types::{ConnectionType, Point, Rect, RoutingContext, Side};

/// A point on a node boundary and the side it sits on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    pub point: Point,
    pub side: Side,
}

/// Calculate lane offset for centered lane distribution.
#[inline]
pub fn calculate_lane_offset(lane: usize, total: usize, spacing: f64) -> f64 {
    if total <= 1 {
        0.0
    } else {
        (lane as f64 - (total - 1) as f64 / 2.0) * spacing
    }
}

/// Point on a side of `rect`, shifted along the side by `offset` and kept
/// within the side's extent.
pub fn side_anchor(rect: &Rect, side: Side, offset: f64) -> Point {
    let c = rect.center();
    match side {
        Side::Left => Point::new(rect.x, (c.y + offset).clamp(rect.y, rect.bottom())),
        Side::Right => Point::new(rect.right(), (c.y + offset).clamp(rect.y, rect.bottom())),
        Side::Top => Point::new((c.x + offset).clamp(rect.x, rect.right()), rect.y),
        Side::Bottom => Point::new((c.x + offset).clamp(rect.x, rect.right()), rect.bottom()),
    }
}

/// Pick the side an edge leaves (`is_exit`) or enters a node through.
///
/// `own_width` is the width of the node the anchor belongs to; the deltas
/// always run from source center to target center.
fn choose_side(
    own_width: f64,
    delta_x: f64,
    delta_y: f64,
    connection_type: ConnectionType,
    is_exit: bool,
    path_is_clear: impl FnOnce() -> bool,
) -> Side {
    if connection_type == ConnectionType::IntraPlatform && delta_x.abs() < own_width / 2.0 {
        // stacked boxes on one platform connect sideways
        return Side::Right;
    }
    if delta_x.abs() < own_width / 4.0 && path_is_clear() {
        let downward = delta_y > 0.0;
        return match (is_exit, downward) {
            (true, true) | (false, false) => Side::Bottom,
            (true, false) | (false, true) => Side::Top,
        };
    }
    let rightward = delta_x > 0.0;
    match (is_exit, rightward) {
        (true, true) | (false, false) => Side::Right,
        (true, false) | (false, true) => Side::Left,
    }
}

fn center_deltas(source: &Node, target: &Node) -> (f64, f64) {
    let from = source.bounds().center();
    let to = target.bounds().center();
    (to.x - from.x, to.y - from.y)
}

/// Where an edge leaves its source.
pub fn exit_point(
    source: &Node,
    target: &Node,
    ctx: &RoutingContext,
    obstacles: &ObstacleSet,
    config: &RoutingConfig,
) -> Anchor {
    let rect = source.bounds();
    let (dx, dy) = center_deltas(source, target);
    let side = choose_side(rect.width, dx, dy, ctx.connection_type, true, || {
        !obstacles.has_obstacles_between(source, target)
    });
    let offset = calculate_lane_offset(
        ctx.parallel.index_within_outgoing_group,
        ctx.parallel.total_outgoing_at_source,
        config.anchor_spacing,
    );
    Anchor {
        point: side_anchor(&rect, side, offset),
        side,
    }
}

/// Where an edge enters its target.
pub fn entry_point(
    source: &Node,
    target: &Node,
    ctx: &RoutingContext,
    obstacles: &ObstacleSet,
    config: &RoutingConfig,
) -> Anchor {
    let rect = target.bounds();
    let (dx, dy) = center_deltas(source, target);
    let side = choose_side(rect.width, dx, dy, ctx.connection_type, false, || {
        !obstacles.has_obstacles_between(source, target)
    });
    let offset = calculate_lane_offset(
        ctx.parallel.index_within_incoming_group,
        ctx.parallel.total_incoming_at_target,
        config.anchor_spacing,
    );
    Anchor {
        point: side_anchor(&rect, side, offset),
        side,
    }
}

/// Two points count as level when their y differs by at most the tolerance.
pub fn is_level(a: Point, b: Point, config: &RoutingConfig) -> bool {
    (a.y - b.y).abs() <= config.level_tolerance
}

/// Whether a horizontal stub must follow the exit point.
///
/// Exits on a left or right side need one, unless the entry is level and
/// very close horizontally.
pub fn needs_horizontal_segment(exit: &Anchor, entry: Point, config: &RoutingConfig) -> bool {
    if !exit.side.is_vertical_edge() {
        return false;
    }
    let level_and_near = is_level(exit.point, entry, config)
        && (exit.point.x - entry.x).abs() < config.stub_suppress_distance;
    !level_and_near
}

/// Waypoints for a route that starts with a horizontal stub.
///
/// Returns `[exit, stub_end, entry]` when the stub ends level with the
/// entry, otherwise `[exit, stub_end, (stub_end.x, entry.y), entry]`.
pub fn stub_waypoints(exit: &Anchor, entry: Point, config: &RoutingConfig) -> Vec<Point> {
    let direction = if exit.side == Side::Left { -1.0 } else { 1.0 };
    let stub_end = Point::new(exit.point.x + direction * config.stub_length, exit.point.y);

    if is_level(stub_end, entry, config) {
        vec![exit.point, stub_end, entry]
    } else {
        vec![exit.point, stub_end, Point::new(stub_end.x, entry.y), entry]
    }
}
