//! Helpers for simple (non self-intersecting) room polygons.

use super::{Point2D, Segment2D};

/// Iterate over the closed edges of a polygon.
pub fn edges(polygon: &[Point2D]) -> impl Iterator<Item = Segment2D> + '_ {
    let n = polygon.len();
    (0..n).map(move |i| Segment2D::new(polygon[i], polygon[(i + 1) % n]))
}

/// Signed area (positive for counter-clockwise winding).
pub fn signed_area(polygon: &[Point2D]) -> f32 {
    edges(polygon)
        .map(|e| e.start.cross(&e.end))
        .sum::<f32>()
        * 0.5
}

/// Area-weighted centroid.
///
/// Falls back to the vertex mean for degenerate (zero-area) outlines.
pub fn centroid(polygon: &[Point2D]) -> Point2D {
    if polygon.is_empty() {
        return Point2D::ZERO;
    }

    let area = signed_area(polygon);
    if area.abs() < f32::EPSILON {
        let n = polygon.len() as f32;
        let sum = polygon.iter().fold(Point2D::ZERO, |acc, p| acc + *p);
        return sum * (1.0 / n);
    }

    let mut cx = 0.0;
    let mut cy = 0.0;
    for e in edges(polygon) {
        let f = e.start.cross(&e.end);
        cx += (e.start.x + e.end.x) * f;
        cy += (e.start.y + e.end.y) * f;
    }
    Point2D::new(cx / (6.0 * area), cy / (6.0 * area))
}

/// Distance from a point to the polygon outline.
pub fn boundary_distance(polygon: &[Point2D], point: Point2D) -> f32 {
    edges(polygon)
        .map(|e| e.distance_to_point(point))
        .fold(f32::INFINITY, f32::min)
}

/// Even-odd containment test (points exactly on the outline are undefined).
pub fn contains(polygon: &[Point2D], point: Point2D) -> bool {
    let mut inside = false;
    for e in edges(polygon) {
        let (a, b) = (e.start, e.end);
        if (a.y > point.y) != (b.y > point.y) {
            let x_at = a.x + (point.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if point.x < x_at {
                inside = !inside;
            }
        }
    }
    inside
}

/// Point lies inside the polygon or within `tolerance` of its outline.
pub fn covers(polygon: &[Point2D], point: Point2D, tolerance: f32) -> bool {
    contains(polygon, point) || boundary_distance(polygon, point) <= tolerance
}

/// A representative point inside the polygon.
///
/// Uses the centroid when it lies inside; otherwise the midpoint of the
/// widest interior span on the horizontal line through the centroid
/// (concave rooms such as L-shaped corridors).
pub fn interior_point(polygon: &[Point2D]) -> Point2D {
    let c = centroid(polygon);
    if polygon.len() < 3 || contains(polygon, c) {
        return c;
    }

    let mut xs: Vec<f32> = edges(polygon)
        .filter(|e| (e.start.y > c.y) != (e.end.y > c.y))
        .map(|e| e.start.x + (c.y - e.start.y) / (e.end.y - e.start.y) * (e.end.x - e.start.x))
        .collect();
    xs.sort_by(|a, b| a.total_cmp(b));

    xs.chunks_exact(2)
        .max_by(|a, b| (a[1] - a[0]).total_cmp(&(b[1] - b[0])))
        .map(|span| Point2D::new((span[0] + span[1]) * 0.5, c.y))
        .unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(min: f32, max: f32) -> Vec<Point2D> {
        vec![
            Point2D::new(min, min),
            Point2D::new(max, min),
            Point2D::new(max, max),
            Point2D::new(min, max),
        ]
    }

    #[test]
    fn test_centroid_square() {
        let c = centroid(&square(0.0, 4.0));
        assert_relative_eq!(c.x, 2.0);
        assert_relative_eq!(c.y, 2.0);
    }

    #[test]
    fn test_centroid_l_shape() {
        // 2x2 block plus a 2x1 block to its right
        let poly = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(4.0, 0.0),
            Point2D::new(4.0, 1.0),
            Point2D::new(2.0, 1.0),
            Point2D::new(2.0, 2.0),
            Point2D::new(0.0, 2.0),
        ];
        let c = centroid(&poly);
        // Areas 4 (centroid 1,1) and 2 (centroid 3,0.5)
        assert_relative_eq!(c.x, 10.0 / 6.0, epsilon = 1e-5);
        assert_relative_eq!(c.y, 5.0 / 6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_centroid_degenerate() {
        let line = vec![Point2D::new(0.0, 0.0), Point2D::new(2.0, 0.0), Point2D::new(4.0, 0.0)];
        let c = centroid(&line);
        assert_relative_eq!(c.x, 2.0);
        assert_relative_eq!(c.y, 0.0);
    }

    #[test]
    fn test_contains_and_covers() {
        let poly = square(0.0, 4.0);
        assert!(contains(&poly, Point2D::new(2.0, 2.0)));
        assert!(!contains(&poly, Point2D::new(5.0, 2.0)));
        assert!(covers(&poly, Point2D::new(4.0, 2.0), 0.01));
        assert!(covers(&poly, Point2D::new(4.05, 2.0), 0.1));
        assert!(!covers(&poly, Point2D::new(4.5, 2.0), 0.1));
    }

    #[test]
    fn test_interior_point_concave() {
        // U shape: centroid falls in the notch
        let poly = vec![
            Point2D::new(0.0, 0.0),
            Point2D::new(6.0, 0.0),
            Point2D::new(6.0, 6.0),
            Point2D::new(4.0, 6.0),
            Point2D::new(4.0, 1.0),
            Point2D::new(2.0, 1.0),
            Point2D::new(2.0, 6.0),
            Point2D::new(0.0, 6.0),
        ];
        assert!(!contains(&poly, centroid(&poly)));
        let p = interior_point(&poly);
        assert!(contains(&poly, p));

        let square = square(0.0, 2.0);
        assert_eq!(interior_point(&square), centroid(&square));
    }

    #[test]
    fn test_signed_area_winding() {
        let ccw = square(0.0, 2.0);
        let mut cw = ccw.clone();
        cw.reverse();
        assert_relative_eq!(signed_area(&ccw), 4.0);
        assert_relative_eq!(signed_area(&cw), -4.0);
    }
}
