//! Polyline construction and label placement.

use std::fmt::Write;

use super::types::{Point, RouteResult};

const SAME_POINT_EPSILON: f64 = 1e-9;

/// Drop consecutive duplicate waypoints.
pub fn dedup_waypoints(waypoints: Vec<Point>) -> Vec<Point> {
    let mut out: Vec<Point> = Vec::with_capacity(waypoints.len());
    for p in waypoints {
        match out.last() {
            Some(last) if last.distance_to(&p) < SAME_POINT_EPSILON => {}
            _ => out.push(p),
        }
    }
    out
}

/// Total length of a polyline.
pub fn polyline_length(points: &[Point]) -> f64 {
    points.windows(2).map(|w| w[0].distance_to(&w[1])).sum()
}

/// Point at exactly half the polyline's length.
pub fn half_length_point(points: &[Point]) -> Point {
    match points {
        [] => Point::new(0.0, 0.0),
        [only] => *only,
        _ => {
            let half = polyline_length(points) / 2.0;
            let mut walked = 0.0;
            for w in points.windows(2) {
                let seg = w[0].distance_to(&w[1]);
                if seg > 0.0 && walked + seg >= half {
                    let t = (half - walked) / seg;
                    return Point::new(
                        w[0].x + t * (w[1].x - w[0].x),
                        w[0].y + t * (w[1].y - w[0].y),
                    );
                }
                walked += seg;
            }
            points[points.len() - 1]
        }
    }
}

/// Finish a route: remove duplicates and place the label at mid-length.
pub fn build_route(waypoints: Vec<Point>) -> RouteResult {
    let waypoints = dedup_waypoints(waypoints);
    let label = half_length_point(&waypoints);
    RouteResult { waypoints, label }
}

/// SVG path data for a polyline, e.g. `M200,50 L230,50 L500,50`.
pub fn svg_path_data(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        if i > 0 {
            d.push(' ');
        }
        let cmd = if i == 0 { 'M' } else { 'L' };
        let _ = write!(d, "{}{},{}", cmd, p.x, p.y);
    }
    d
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup() {
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(0.0, 0.0),
        ];
        assert_eq!(
            dedup_waypoints(pts),
            vec![
                Point::new(0.0, 0.0),
                Point::new(10.0, 0.0),
                Point::new(0.0, 0.0),
            ]
        );
    }

    #[test]
    fn test_label_at_half_length() {
        // segments of length 10, 20, 30: half of 60 is 30, which is the end
        // of the second segment
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 20.0),
            Point::new(40.0, 20.0),
        ];
        assert!((polyline_length(&pts) - 60.0).abs() < 1e-9);
        let label = half_length_point(&pts);
        assert!((label.x - 10.0).abs() < 1e-6);
        assert!((label.y - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_label_inside_segment() {
        let pts = vec![
            Point::new(200.0, 50.0),
            Point::new(230.0, 50.0),
            Point::new(500.0, 50.0),
        ];
        assert_eq!(half_length_point(&pts), Point::new(350.0, 50.0));
    }

    #[test]
    fn test_label_not_endpoint_average() {
        // an L shape whose corner-weighted midpoint differs from the chord midpoint
        let pts = vec![
            Point::new(0.0, 0.0),
            Point::new(0.0, 90.0),
            Point::new(10.0, 90.0),
        ];
        let label = half_length_point(&pts);
        assert!((label.x - 0.0).abs() < 1e-6);
        assert!((label.y - 50.0).abs() < 1e-6);
    }

    #[test]
    fn test_degenerate_paths() {
        assert_eq!(half_length_point(&[]), Point::new(0.0, 0.0));
        let p = Point::new(3.0, 4.0);
        assert_eq!(half_length_point(&[p]), p);
        let route = build_route(vec![p, p, p]);
        assert_eq!(route.waypoints, vec![p]);
        assert_eq!(route.label, p);
    }

    #[test]
    fn test_svg_path_data() {
        let pts = vec![
            Point::new(200.0, 50.0),
            Point::new(230.0, 50.0),
            Point::new(500.0, 50.0),
        ];
        assert_eq!(svg_path_data(&pts), "M200,50 L230,50 L500,50");
        assert_eq!(svg_path_data(&[Point::new(1.5, -2.0)]), "M1.5,-2");
    }
}
