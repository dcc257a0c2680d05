//! Layout engine core implementation.

use log::{debug, info};

use crate::config::RoutingConfig;
use crate::ir::Diagram;

use super::analysis::{analyze, build_node_lookup};
use super::groups::build_groups;
use super::obstacles::ObstacleSet;
use super::routing::Router;
use super::rules::classify_connection;
use super::types::{Layout, LayoutEdge, Point, RoutingContext};

/// Margin kept around the diagram content.
const CANVAS_MARGIN: f64 = 20.0;

/// Routes every connection of a diagram.
pub struct LayoutEngine {
    pub(crate) config: RoutingConfig,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(RoutingConfig::default())
    }
}

impl LayoutEngine {
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    /// Engine using the routing settings embedded in the diagram.
    pub fn for_diagram(diagram: &Diagram) -> Self {
        Self::new(diagram.routing.clone())
    }

    /// Compute routes for the given diagram.
    pub fn layout(&self, diagram: &Diagram) -> Layout {
        // Phase 1: Spatial classification
        let (annotated, report) = analyze(&diagram.nodes, &diagram.connections, &self.config);

        // Phase 2: Parallel edge groups
        let groups = build_groups(&annotated);

        // Phase 3: Routing against a fixed obstacle snapshot
        let router = Router::new(
            ObstacleSet::new(&diagram.nodes, &diagram.regions),
            self.config.clone(),
        );
        debug!("routing {} edges around {} boxes", annotated.len(), router.obstacles().len());

        let lookup = build_node_lookup(&diagram.nodes);
        let edges: Vec<LayoutEdge> = annotated
            .iter()
            .filter_map(|edge| {
                let source = *lookup.get(edge.source)?;
                let target = *lookup.get(edge.target)?;
                let ctx = RoutingContext {
                    connection_type: classify_connection(source, target, &self.config),
                    spatial: Some(edge.spatial),
                    parallel: groups.position(edge),
                };
                let route = router.route(source, target, &ctx);

                Some(LayoutEdge {
                    source: source.id.clone(),
                    target: target.id.clone(),
                    edge_index: edge.index,
                    connection_type: ctx.connection_type,
                    spatial: edge.spatial,
                    parallel: ctx.parallel,
                    route,
                })
            })
            .collect();

        let (min, max) = content_bounds(diagram, &edges);
        info!(
            "routed {} of {} connections ({} skipped)",
            edges.len(),
            diagram.connections.len(),
            report.skipped
        );

        Layout {
            edges,
            report,
            min_x: min.x - CANVAS_MARGIN,
            min_y: min.y - CANVAS_MARGIN,
            width: (max.x - min.x) + CANVAS_MARGIN * 2.0,
            height: (max.y - min.y) + CANVAS_MARGIN * 2.0,
        }
    }
}

/// Smallest box holding every region, platform, node, waypoint and label.
fn content_bounds(diagram: &Diagram, edges: &[LayoutEdge]) -> (Point, Point) {
    let rects = diagram
        .regions
        .iter()
        .map(|r| r.bounds())
        .chain(diagram.platforms.iter().map(|p| p.bounds()))
        .chain(diagram.nodes.iter().map(|n| n.bounds()));
    let corners = rects.flat_map(|r| [Point::new(r.x, r.y), Point::new(r.right(), r.bottom())]);
    let route_points = edges
        .iter()
        .flat_map(|e| e.route.waypoints.iter().copied().chain(std::iter::once(e.route.label)));

    let mut min = Point::new(f64::INFINITY, f64::INFINITY);
    let mut max = Point::new(f64::NEG_INFINITY, f64::NEG_INFINITY);
    for p in corners.chain(route_points) {
        min.x = min.x.min(p.x);
        min.y = min.y.min(p.y);
        max.x = max.x.max(p.x);
        max.y = max.y.max(p.y);
    }

    if min.x > max.x {
        (Point::new(0.0, 0.0), Point::new(0.0, 0.0))
    } else {
        (min, max)
    }
}
