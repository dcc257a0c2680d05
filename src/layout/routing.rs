//! Waypoint strategies and the per-edge router.

use log::trace;

use crate::config::RoutingConfig;
use crate::ir::Node;

use super::analysis::primary_direction;
use super::anchors::{Anchor, entry_point, exit_point, needs_horizontal_segment, stub_waypoints};
use super::obstacles::ObstacleSet;
use super::path::build_route;
use super::rules::{ConnectionScenario, select_scenario};
use super::types::{Direction, Point, Rect, RouteResult, RoutingContext, Side, SpatialInfo};

/// Routes edges against a fixed obstacle snapshot.
///
/// Holds no mutable state, so one router can serve many edges, also from
/// several threads at once.
#[derive(Debug, Clone)]
pub struct Router {
    obstacles: ObstacleSet,
    config: RoutingConfig,
}

impl Router {
    pub fn new(obstacles: ObstacleSet, config: RoutingConfig) -> Self {
        Self { obstacles, config }
    }

    pub fn obstacles(&self) -> &ObstacleSet {
        &self.obstacles
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Route one edge.
    pub fn route(&self, source: &Node, target: &Node, ctx: &RoutingContext) -> RouteResult {
        let scenario = select_scenario(source, target, ctx, &self.obstacles, &self.config);
        trace!("{} -> {}: {}", source.id, target.id, scenario.name());

        match scenario {
            ConnectionScenario::SelfLoop => self.route_self_loop(source, ctx),
            ConnectionScenario::Direct | ConnectionScenario::Default => {
                build_route(self.direct(source, target, ctx))
            }
            ConnectionScenario::IntraRegionBypass => {
                build_route(self.intra_region_bypass(source, target, ctx))
            }
            ConnectionScenario::InterRegionBypass => {
                build_route(self.inter_region_bypass(source, target, ctx))
            }
            ConnectionScenario::SpatialOptimized(info) => {
                build_route(self.spatial_optimized(source, target, ctx, &info))
            }
        }
    }

    fn anchors(&self, source: &Node, target: &Node, ctx: &RoutingContext) -> (Anchor, Point) {
        let exit = exit_point(source, target, ctx, &self.obstacles, &self.config);
        let entry = entry_point(source, target, ctx, &self.obstacles, &self.config);
        (exit, entry.point)
    }

    /// Rectangle bulging out of the node's right side.
    ///
    /// Group indices count every edge at the node, so the stacked ends are
    /// clamped to the right edge.
    fn route_self_loop(&self, node: &Node, ctx: &RoutingContext) -> RouteResult {
        let rect = node.bounds();
        let c = rect.center();
        let x = rect.right();
        let bulge_x = x + self.config.loop_width;
        let exit_y = (c.y
            - self.config.loop_gap
            - ctx.parallel.index_within_outgoing_group as f64 * self.config.loop_spacing)
            .clamp(rect.y, rect.bottom());
        let entry_y = (c.y
            + self.config.loop_gap
            + ctx.parallel.index_within_incoming_group as f64 * self.config.loop_spacing)
            .clamp(rect.y, rect.bottom());

        RouteResult {
            waypoints: vec![
                Point::new(x, exit_y),
                Point::new(bulge_x, exit_y),
                Point::new(bulge_x, entry_y),
                Point::new(x, entry_y),
            ],
            label: Point::new(
                bulge_x + self.config.loop_label_offset,
                (exit_y + entry_y) / 2.0,
            ),
        }
    }

    fn direct(&self, source: &Node, target: &Node, ctx: &RoutingContext) -> Vec<Point> {
        let (exit, entry) = self.anchors(source, target, ctx);
        if needs_horizontal_segment(&exit, entry, &self.config) {
            stub_waypoints(&exit, entry, &self.config)
        } else {
            vec![exit.point, entry]
        }
    }

    /// Stub route for the bypass strategies, kept only when none of its
    /// legs runs through another box.
    fn bypass_stub(
        &self,
        source: &Node,
        target: &Node,
        exit: &Anchor,
        entry: Point,
    ) -> Option<Vec<Point>> {
        if !needs_horizontal_segment(exit, entry, &self.config) {
            return None;
        }
        let waypoints = stub_waypoints(exit, entry, &self.config);
        if self.obstacles.path_crosses_nodes(&waypoints, source, target) {
            None
        } else {
            Some(waypoints)
        }
    }

    fn intra_region_bypass(
        &self,
        source: &Node,
        target: &Node,
        ctx: &RoutingContext,
    ) -> Vec<Point> {
        if !self.obstacles.has_obstacles_between(source, target) {
            return self.direct(source, target, ctx);
        }
        let (exit, entry) = self.anchors(source, target, ctx);
        if let Some(waypoints) = self.bypass_stub(source, target, &exit, entry) {
            return waypoints;
        }

        let direction = match ctx.spatial {
            Some(info) => info.primary_direction,
            None => {
                let from = source.bounds().center();
                let to = target.bounds().center();
                primary_direction(to.x - from.x, to.y - from.y)
            }
        };
        let side = bypass_side(direction);
        let detour = bypass_waypoints(
            side,
            &source.bounds(),
            &target.bounds(),
            exit.point,
            entry,
            self.config.bypass_padding,
        );

        let mut waypoints = vec![exit.point];
        waypoints.extend(detour);
        waypoints.push(entry);
        waypoints
    }

    fn inter_region_bypass(
        &self,
        source: &Node,
        target: &Node,
        ctx: &RoutingContext,
    ) -> Vec<Point> {
        let (source_region, target_region) =
            match (self.obstacles.region_of(source), self.obstacles.region_of(target)) {
                (Some(s), Some(t)) => (s, t),
                _ => return self.intra_region_bypass(source, target, ctx),
            };

        let (exit, entry) = self.anchors(source, target, ctx);
        if let Some(waypoints) = self.bypass_stub(source, target, &exit, entry) {
            return waypoints;
        }

        let detour_y = if source_region.y < target_region.y {
            source_region.y.min(target_region.y) - self.config.bypass_padding
        } else {
            source_region.bottom() + self.config.bypass_padding
        };

        vec![
            exit.point,
            Point::new(exit.point.x, detour_y),
            Point::new(entry.x, detour_y),
            entry,
        ]
    }

    fn spatial_optimized(
        &self,
        source: &Node,
        target: &Node,
        ctx: &RoutingContext,
        info: &SpatialInfo,
    ) -> Vec<Point> {
        let (exit, entry) = self.anchors(source, target, ctx);
        if needs_horizontal_segment(&exit, entry, &self.config) {
            return stub_waypoints(&exit, entry, &self.config);
        }

        let bend = if info.is_close && info.is_diagonal {
            exit.point.midpoint(&entry)
        } else {
            // diagonal and straight edges both step along the primary axis
            step_waypoint(info.primary_direction, exit.point, entry)
        };
        vec![exit.point, bend, entry]
    }
}

/// Corner of an L-shaped route turning along the primary direction.
fn step_waypoint(primary: Direction, exit: Point, entry: Point) -> Point {
    if primary.is_horizontal() {
        Point::new(entry.x, exit.y)
    } else {
        Point::new(exit.x, entry.y)
    }
}

/// Horizontal edges bypass over the top, vertical ones to the right.
fn bypass_side(primary: Direction) -> Side {
    if primary.is_horizontal() {
        Side::Top
    } else {
        Side::Right
    }
}

/// Two detour points `padding` beyond the outermost edge of both boxes on
/// the given side.
fn bypass_waypoints(
    side: Side,
    source: &Rect,
    target: &Rect,
    exit: Point,
    entry: Point,
    padding: f64,
) -> [Point; 2] {
    match side {
        Side::Top => {
            let y = source.y.min(target.y) - padding;
            [Point::new(exit.x, y), Point::new(entry.x, y)]
        }
        Side::Bottom => {
            let y = source.bottom().max(target.bottom()) + padding;
            [Point::new(exit.x, y), Point::new(entry.x, y)]
        }
        Side::Left => {
            let x = source.x.min(target.x) - padding;
            [Point::new(x, exit.y), Point::new(x, entry.y)]
        }
        Side::Right => {
            let x = source.right().max(target.right()) + padding;
            [Point::new(x, exit.y), Point::new(x, entry.y)]
        }
    }
}
