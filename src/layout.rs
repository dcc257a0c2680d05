//! Connection routing between positioned boxes.
//!
//! The pipeline runs in three phases: spatial classification of every edge
//! ([`analysis`]), grouping of edges sharing an endpoint ([`groups`]), and
//! per-edge routing against a fixed obstacle snapshot ([`routing`]).

pub mod analysis;
pub mod anchors;
pub mod engine;
pub mod groups;
pub mod obstacles;
pub mod path;
pub mod routing;
pub mod rules;
pub mod types;

pub use analysis::{analyze, spatial_info};
pub use engine::LayoutEngine;
pub use groups::{ConnectionGroup, ConnectionGroups, build_groups};
pub use obstacles::ObstacleSet;
pub use routing::Router;
pub use rules::{ConnectionScenario, classify_connection};
pub use types::{
    AnnotatedEdge, ConnectionType, Direction, Layout, LayoutEdge, ParallelPosition, Point, Rect,
    RouteResult, RoutingContext, Side, SpatialInfo, SpatialReport,
};
