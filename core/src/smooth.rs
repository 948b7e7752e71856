use crate::geometry::Point;

/// Single pass 3-point moving average. Endpoints are kept as anchors and
/// every interior point is averaged against the original neighbours.
pub fn smooth(path: &[Point]) -> Vec<Point> {
    if path.len() < 3 {
        return path.to_vec();
    }
    let mut out = Vec::with_capacity(path.len());
    out.push(path[0]);
    for window in path.windows(3) {
        let (prev, curr, next) = (window[0], window[1], window[2]);
        out.push(Point {
            x: (prev.x + curr.x + next.x) / 3.0,
            y: (prev.y + curr.y + next.y) / 3.0,
        });
    }
    out.push(path[path.len() - 1]);
    out
}
