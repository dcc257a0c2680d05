//! Read-only snapshot of the boxes a route has to avoid.

use crate::ir::{Node, Region};

use super::types::{Point, Rect};

/// Node and region rectangles, fixed for a batch of routing calls.
#[derive(Debug, Clone, Default)]
pub struct ObstacleSet {
    nodes: Vec<(String, Rect)>,
    regions: Vec<(String, Rect)>,
}

impl ObstacleSet {
    pub fn new(nodes: &[Node], regions: &[Region]) -> Self {
        Self {
            nodes: nodes.iter().map(|n| (n.id.clone(), n.bounds())).collect(),
            regions: regions.iter().map(|r| (r.name.clone(), r.bounds())).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Ids of the nodes sitting on the straight line between two node centers.
    pub fn obstacles_between<'s>(
        &'s self,
        source: &'s Node,
        target: &'s Node,
    ) -> impl Iterator<Item = &'s str> + 's {
        let a = source.bounds().center();
        let b = target.bounds().center();
        self.nodes
            .iter()
            .filter(move |(id, _)| *id != source.id && *id != target.id)
            .filter(move |(_, rect)| blocks_segment(rect, a, b))
            .map(|(id, _)| id.as_str())
    }

    /// Whether any third node blocks the straight line between two nodes.
    pub fn has_obstacles_between(&self, source: &Node, target: &Node) -> bool {
        self.obstacles_between(source, target).next().is_some()
    }

    /// Whether any leg of the polyline passes through a node other than
    /// `source` and `target`.
    pub fn path_crosses_nodes(&self, waypoints: &[Point], source: &Node, target: &Node) -> bool {
        waypoints.windows(2).any(|leg| {
            self.nodes
                .iter()
                .filter(|(id, _)| *id != source.id && *id != target.id)
                .any(|(_, rect)| enters_interior(rect, leg[0], leg[1]))
        })
    }

    /// Bounds of the region containing a node.
    ///
    /// A named region wins; otherwise the first region enclosing the node's
    /// center is used.
    pub fn region_of(&self, node: &Node) -> Option<Rect> {
        if let Some(name) = &node.region {
            if let Some((_, rect)) = self.regions.iter().find(|(n, _)| n == name) {
                return Some(*rect);
            }
        }
        let center = node.bounds().center();
        self.regions
            .iter()
            .find(|(_, rect)| rect.contains(center))
            .map(|(_, rect)| *rect)
    }
}

/// Project the box center onto segment `a`-`b` and compare the gap with
/// half of the box's larger side.
fn blocks_segment(rect: &Rect, a: Point, b: Point) -> bool {
    let p = rect.center();
    let projected = project_onto_segment(p, a, b);
    p.distance_to(&projected) < rect.width.max(rect.height) / 2.0
}

/// Clip segment `a`-`b` to the box (Liang-Barsky) and test whether the
/// clipped part runs inside it. Grazing an edge or a corner does not count.
fn enters_interior(rect: &Rect, a: Point, b: Point) -> bool {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let bounds = [
        (-dx, a.x - rect.x),
        (dx, rect.right() - a.x),
        (-dy, a.y - rect.y),
        (dy, rect.bottom() - a.y),
    ];
    for (p, q) in bounds {
        if p == 0.0 {
            if q < 0.0 {
                return false;
            }
        } else if p < 0.0 {
            t0 = t0.max(q / p);
        } else {
            t1 = t1.min(q / p);
        }
    }
    if t0 > t1 {
        return false;
    }

    let t = (t0 + t1) / 2.0;
    let m = Point::new(a.x + t * dx, a.y + t * dy);
    m.x > rect.x && m.x < rect.right() && m.y > rect.y && m.y < rect.bottom()
}

/// Closest point to `p` on segment `a`-`b`.
pub fn project_onto_segment(p: Point, a: Point, b: Point) -> Point {
    let abx = b.x - a.x;
    let aby = b.y - a.y;
    let len_sq = abx * abx + aby * aby;
    let t = if len_sq == 0.0 {
        0.0
    } else {
        (((p.x - a.x) * abx + (p.y - a.y) * aby) / len_sq).clamp(0.0, 1.0)
    };
    Point::new(a.x + t * abx, a.y + t * aby)
}
