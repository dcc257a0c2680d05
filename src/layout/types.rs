//! Data structures for connection routing.
//!
//! Coordinates use the SVG convention: x grows to the right, y grows
//! downward, and a rectangle's `x`/`y` is its top-left corner.

/// A 2D point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn midpoint(&self, other: &Point) -> Point {
        Point::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Whether the point lies inside or on the boundary.
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }
}

/// Compass direction of a target relative to its source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// Node side an edge travelling in this direction points at.
    pub fn side(self) -> Side {
        match self {
            Direction::Left => Side::Left,
            Direction::Right => Side::Right,
            Direction::Up => Side::Top,
            Direction::Down => Side::Bottom,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "left",
            Direction::Right => "right",
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

/// One of the four sides of a node box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub fn is_vertical_edge(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
            Side::Top => "top",
            Side::Bottom => "bottom",
        }
    }
}

/// Structural relationship between the two endpoints of a connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConnectionType {
    /// Source and target are the same node.
    Internal,
    /// At least one endpoint sits on the external-system platform.
    External,
    InterRegion,
    InterPlatform,
    IntraPlatform,
}

impl ConnectionType {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionType::Internal => "internal",
            ConnectionType::External => "external",
            ConnectionType::InterRegion => "inter-region",
            ConnectionType::InterPlatform => "inter-platform",
            ConnectionType::IntraPlatform => "intra-platform",
        }
    }
}

/// Geometric classification of an edge, center to center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialInfo {
    pub primary_direction: Direction,
    pub secondary_direction: Direction,
    /// atan2 of the deltas in degrees, y pointing down.
    pub angle_degrees: f64,
    pub distance: f64,
    pub is_diagonal: bool,
    pub is_close: bool,
    pub delta_x: f64,
    pub delta_y: f64,
}

/// A connection paired with its spatial classification.
#[derive(Debug, Clone, Copy)]
pub struct AnnotatedEdge<'a> {
    /// Index into `Diagram::connections`
    pub index: usize,
    pub source: &'a str,
    pub target: &'a str,
    pub spatial: SpatialInfo,
}

/// Where an edge sits among the edges sharing its endpoints.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallelPosition {
    pub index_within_incoming_group: usize,
    pub index_within_outgoing_group: usize,
    pub total_incoming_at_target: usize,
    pub total_outgoing_at_source: usize,
    pub dominant_incoming_side: Side,
}

impl Default for ParallelPosition {
    fn default() -> Self {
        Self {
            index_within_incoming_group: 0,
            index_within_outgoing_group: 0,
            total_incoming_at_target: 1,
            total_outgoing_at_source: 1,
            dominant_incoming_side: Side::Left,
        }
    }
}

/// Per-edge input to the rule engine. Built on demand, never stored.
#[derive(Debug, Clone, Copy)]
pub struct RoutingContext {
    pub connection_type: ConnectionType,
    pub spatial: Option<SpatialInfo>,
    pub parallel: ParallelPosition,
}

/// A routed path and the point its label is drawn at.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteResult {
    pub waypoints: Vec<Point>,
    pub label: Point,
}

/// A connection with its computed route and classification.
#[derive(Debug, Clone)]
pub struct LayoutEdge {
    pub source: String,
    pub target: String,
    /// Index into `Diagram::connections`
    pub edge_index: usize,
    pub connection_type: ConnectionType,
    pub spatial: SpatialInfo,
    pub parallel: ParallelPosition,
    pub route: RouteResult,
}

impl LayoutEdge {
    pub fn is_self_ref(&self) -> bool {
        self.connection_type == ConnectionType::Internal
    }
}

/// Aggregate counts gathered while classifying edges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpatialReport {
    pub left: usize,
    pub right: usize,
    pub up: usize,
    pub down: usize,
    pub diagonal: usize,
    pub close: usize,
    /// Edges dropped because an endpoint does not exist
    pub skipped: usize,
}

impl SpatialReport {
    pub fn total(&self) -> usize {
        self.left + self.right + self.up + self.down
    }
}

impl std::fmt::Display for SpatialReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "edges:    {}", self.total())?;
        writeln!(f, "left:     {}", self.left)?;
        writeln!(f, "right:    {}", self.right)?;
        writeln!(f, "up:       {}", self.up)?;
        writeln!(f, "down:     {}", self.down)?;
        writeln!(f, "diagonal: {}", self.diagonal)?;
        writeln!(f, "close:    {}", self.close)?;
        write!(f, "skipped:  {}", self.skipped)
    }
}

/// The complete routing result for a diagram.
#[derive(Debug, Clone)]
pub struct Layout {
    pub edges: Vec<LayoutEdge>,
    pub report: SpatialReport,
    /// Top-left of the area covering every box and route
    pub min_x: f64,
    pub min_y: f64,
    pub width: f64,
    pub height: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_distance() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(3.0, 4.0);
        assert!((a.distance_to(&b) - 5.0).abs() < 1e-10);
    }

    #[test]
    fn test_rect_center_and_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.center(), Point::new(60.0, 45.0));
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert!(r.contains(Point::new(110.0, 70.0)));
        assert!(!r.contains(Point::new(111.0, 70.0)));
    }

    #[test]
    fn test_direction_side() {
        assert_eq!(Direction::Up.side(), Side::Top);
        assert_eq!(Direction::Down.side(), Side::Bottom);
        assert_eq!(Direction::Left.side(), Side::Left);
        assert!(Direction::Right.is_horizontal());
        assert!(!Direction::Down.is_horizontal());
    }
}
