//! Connection classification and strategy selection.

use crate::config::RoutingConfig;
use crate::ir::Node;

use super::obstacles::ObstacleSet;
use super::types::{ConnectionType, RoutingContext, SpatialInfo};

/// Classify the structural relationship between two nodes.
pub fn classify_connection(source: &Node, target: &Node, config: &RoutingConfig) -> ConnectionType {
    if source.id == target.id {
        ConnectionType::Internal
    } else if source.platform == config.external_platform
        || target.platform == config.external_platform
    {
        ConnectionType::External
    } else if source.region != target.region {
        ConnectionType::InterRegion
    } else if source.platform != target.platform {
        ConnectionType::InterPlatform
    } else {
        ConnectionType::IntraPlatform
    }
}

/// The routing strategy chosen for one edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConnectionScenario {
    SelfLoop,
    Direct,
    IntraRegionBypass,
    InterRegionBypass,
    SpatialOptimized(SpatialInfo),
    Default,
}

impl ConnectionScenario {
    pub fn name(&self) -> &'static str {
        match self {
            ConnectionScenario::SelfLoop => "loop",
            ConnectionScenario::Direct => "direct",
            ConnectionScenario::IntraRegionBypass => "intra-region-bypass",
            ConnectionScenario::InterRegionBypass => "inter-region-bypass",
            ConnectionScenario::SpatialOptimized(_) => "spatial-optimized",
            ConnectionScenario::Default => "default",
        }
    }
}

/// Pick a strategy. Rules are checked in priority order; the first match wins.
pub fn select_scenario(
    source: &Node,
    target: &Node,
    ctx: &RoutingContext,
    obstacles: &ObstacleSet,
    config: &RoutingConfig,
) -> ConnectionScenario {
    let connection_type = ctx.connection_type;
    if connection_type == ConnectionType::Internal {
        return ConnectionScenario::SelfLoop;
    }

    let distance = source
        .bounds()
        .center()
        .distance_to(&target.bounds().center());
    let adjacent = distance < config.adjacent_distance;
    if adjacent
        && connection_type != ConnectionType::InterRegion
        && !obstacles.has_obstacles_between(source, target)
    {
        return ConnectionScenario::Direct;
    }

    if connection_type == ConnectionType::IntraPlatform
        && obstacles.has_obstacles_between(source, target)
    {
        return ConnectionScenario::IntraRegionBypass;
    }

    if connection_type == ConnectionType::InterRegion {
        return ConnectionScenario::InterRegionBypass;
    }

    match ctx.spatial {
        Some(info) => ConnectionScenario::SpatialOptimized(info),
        None => ConnectionScenario::Default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::analysis::spatial_info;
    use crate::layout::types::ParallelPosition;

    fn node(id: &str, platform: &str, region: Option<&str>, x: f64, y: f64) -> Node {
        Node {
            id: id.to_string(),
            name: String::new(),
            platform: platform.to_string(),
            region: region.map(str::to_string),
            x,
            y,
            width: 100.0,
            height: 50.0,
            functions: Vec::new(),
        }
    }

    fn ctx_for(source: &Node, target: &Node, config: &RoutingConfig) -> RoutingContext {
        RoutingContext {
            connection_type: classify_connection(source, target, config),
            spatial: Some(spatial_info(&source.bounds(), &target.bounds(), config)),
            parallel: ParallelPosition::default(),
        }
    }

    #[test]
    fn test_classification() {
        let config = RoutingConfig::default();
        let a = node("a", "Cloud", Some("EU"), 0.0, 0.0);
        let same = node("b", "Cloud", Some("EU"), 200.0, 0.0);
        let other_platform = node("c", "Mainframe", Some("EU"), 200.0, 0.0);
        let other_region = node("d", "Cloud", Some("US"), 200.0, 0.0);
        let external = node("e", "External System", Some("EU"), 200.0, 0.0);

        assert_eq!(classify_connection(&a, &a, &config), ConnectionType::Internal);
        assert_eq!(classify_connection(&a, &same, &config), ConnectionType::IntraPlatform);
        assert_eq!(
            classify_connection(&a, &other_platform, &config),
            ConnectionType::InterPlatform
        );
        assert_eq!(
            classify_connection(&a, &other_region, &config),
            ConnectionType::InterRegion
        );
        assert_eq!(
            classify_connection(&external, &other_region, &config),
            ConnectionType::External
        );
    }

    #[test]
    fn test_self_loop_wins() {
        let config = RoutingConfig::default();
        let a = node("a", "Cloud", None, 0.0, 0.0);
        let ctx = ctx_for(&a, &a, &config);
        let set = ObstacleSet::new(&[a.clone()], &[]);
        assert_eq!(select_scenario(&a, &a, &ctx, &set, &config), ConnectionScenario::SelfLoop);
    }

    #[test]
    fn test_adjacent_is_direct() {
        let config = RoutingConfig::default();
        let a = node("a", "Cloud", None, 0.0, 0.0);
        let b = node("b", "Cloud", None, 0.0, 60.0);
        let set = ObstacleSet::new(&[a.clone(), b.clone()], &[]);
        let ctx = ctx_for(&a, &b, &config);
        assert_eq!(select_scenario(&a, &b, &ctx, &set, &config), ConnectionScenario::Direct);
    }

    #[test]
    fn test_adjacent_across_regions_is_not_direct() {
        let config = RoutingConfig::default();
        let a = node("a", "Cloud", Some("EU"), 0.0, 0.0);
        let b = node("b", "Cloud", Some("US"), 0.0, 60.0);
        let set = ObstacleSet::new(&[a.clone(), b.clone()], &[]);
        let ctx = ctx_for(&a, &b, &config);
        assert_eq!(
            select_scenario(&a, &b, &ctx, &set, &config),
            ConnectionScenario::InterRegionBypass
        );
    }

    #[test]
    fn test_blocked_same_platform_bypasses() {
        let config = RoutingConfig::default();
        let a = node("a", "Cloud", None, 0.0, 0.0);
        let c = node("c", "Cloud", None, 150.0, 0.0);
        let b = node("b", "Cloud", None, 300.0, 0.0);
        let set = ObstacleSet::new(&[a.clone(), c, b.clone()], &[]);
        let ctx = ctx_for(&a, &b, &config);
        assert_eq!(
            select_scenario(&a, &b, &ctx, &set, &config),
            ConnectionScenario::IntraRegionBypass
        );
    }

    #[test]
    fn test_blocked_other_platform_goes_spatial() {
        let config = RoutingConfig::default();
        let a = node("a", "Cloud", None, 0.0, 0.0);
        let c = node("c", "Cloud", None, 150.0, 0.0);
        let b = node("b", "Mainframe", None, 300.0, 0.0);
        let set = ObstacleSet::new(&[a.clone(), c, b.clone()], &[]);
        let ctx = ctx_for(&a, &b, &config);
        assert!(matches!(
            select_scenario(&a, &b, &ctx, &set, &config),
            ConnectionScenario::SpatialOptimized(_)
        ));
    }

    #[test]
    fn test_missing_spatial_is_default() {
        let config = RoutingConfig::default();
        let a = node("a", "Cloud", None, 0.0, 0.0);
        let b = node("b", "Cloud", None, 500.0, 0.0);
        let set = ObstacleSet::new(&[a.clone(), b.clone()], &[]);
        let mut ctx = ctx_for(&a, &b, &config);
        ctx.spatial = None;
        assert_eq!(select_scenario(&a, &b, &ctx, &set, &config), ConnectionScenario::Default);
        assert_eq!(ConnectionScenario::Default.name(), "default");
    }
}
