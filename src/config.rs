//! Routing configuration.

use serde::Deserialize;

/// Platform name marking a node as living outside the modelled landscape.
pub const EXTERNAL_PLATFORM: &str = "External System";

/// Tuning constants for connection routing.
///
/// Every field has a default, so a diagram file may override any subset of
/// them under its `"routing"` key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RoutingConfig {
    /// Length of the horizontal segment forced after leaving a node side.
    pub stub_length: f64,
    /// Two points closer than this vertically are treated as level.
    pub level_tolerance: f64,
    /// Level endpoints closer than this horizontally skip the stub.
    pub stub_suppress_distance: f64,
    /// Center distance below which two nodes count as adjacent.
    pub adjacent_distance: f64,
    /// Center distance below which an edge is flagged as close.
    pub close_distance: f64,
    /// Minor/major axis ratio above which an edge is flagged as diagonal.
    pub diagonal_ratio: f64,
    /// Clearance kept between a bypass line and the boxes it avoids.
    pub bypass_padding: f64,
    /// How far a self-loop bulges out of the node's right side.
    pub loop_width: f64,
    /// Half distance between a self-loop's exit and entry at index 0.
    pub loop_gap: f64,
    /// Vertical spacing between stacked self-loops on one node.
    pub loop_spacing: f64,
    /// Horizontal distance from the loop bulge to its label.
    pub loop_label_offset: f64,
    /// Spacing between anchors of parallel edges on one node side.
    pub anchor_spacing: f64,
    pub external_platform: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            stub_length: 30.0,
            level_tolerance: 5.0,
            stub_suppress_distance: 50.0,
            adjacent_distance: 100.0,
            close_distance: 50.0,
            diagonal_ratio: 0.5,
            bypass_padding: 30.0,
            loop_width: 20.0,
            loop_gap: 10.0,
            loop_spacing: 20.0,
            loop_label_offset: 10.0,
            anchor_spacing: 15.0,
            external_platform: EXTERNAL_PLATFORM.to_string(),
        }
    }
}
