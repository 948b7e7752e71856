use crate::geometry::{distance, lerp_point, path_length, Point};

/// Re-expresses `path` as exactly `count` points spaced evenly by arc length.
///
/// An empty path yields `count` origin placeholders and a zero-length path
/// yields `count` copies of its first point; callers that care should check
/// [`crate::geometry::is_drawable`] first. When float drift leaves the walk
/// short of `count`, the tail is padded with the final point.
pub fn resample(path: &[Point], count: usize) -> Vec<Point> {
    let Some(&first) = path.first() else {
        return vec![Point::ORIGIN; count];
    };
    let total = path_length(path);
    if count < 2 || total == 0.0 {
        return vec![first; count];
    }

    let step = total / (count - 1) as f64;
    let mut sampled = Vec::with_capacity(count);
    sampled.push(first);
    let mut acc = 0.0;
    let mut prev = first;
    let mut idx = 1;
    while idx < path.len() && sampled.len() < count {
        let curr = path[idx];
        let segment = distance(prev, curr);
        if acc + segment >= step {
            let point = lerp_point(prev, curr, (step - acc) / segment);
            sampled.push(point);
            prev = point;
            acc = 0.0;
        } else {
            acc += segment;
            prev = curr;
            idx += 1;
        }
    }

    let last = path[path.len() - 1];
    sampled.resize(count, last);
    sampled
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        let delta = (actual - expected).abs();
        assert!(
            delta <= 1e-9,
            "expected {:.9} got {:.9} (delta {:.9})",
            expected,
            actual,
            delta
        );
    }

    fn zigzag() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(13.0, 7.5),
            Point::new(13.2, 7.5),
            Point::new(40.0, -3.0),
            Point::new(40.0, -3.0),
            Point::new(41.7, 90.1),
        ]
    }

    #[test]
    fn returns_exact_count() {
        let path = zigzag();
        for count in [2, 3, 7, 50, 199, 200, 1000] {
            assert_eq!(resample(&path, count).len(), count, "count {count}");
        }
        let pair = [Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
        for count in [2, 3, 10, 333] {
            assert_eq!(resample(&pair, count).len(), count, "count {count}");
        }
    }

    #[test]
    fn single_point_repeats() {
        let p = Point::new(4.0, -2.5);
        assert_eq!(resample(&[p], 5), vec![p; 5]);
    }

    #[test]
    fn coincident_points_repeat_first() {
        let p = Point::new(9.0, 9.0);
        assert_eq!(resample(&[p, p, p], 8), vec![p; 8]);
    }

    #[test]
    fn empty_path_yields_placeholders() {
        assert_eq!(resample(&[], 3), vec![Point::ORIGIN; 3]);
    }

    #[test]
    fn count_below_two_repeats_first() {
        let path = zigzag();
        assert!(resample(&path, 0).is_empty());
        assert_eq!(resample(&path, 1), vec![path[0]]);
    }

    #[test]
    fn straight_line_is_evenly_spaced() {
        let path = [
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(10.0, 0.0),
        ];
        let sampled = resample(&path, 11);
        for (idx, point) in sampled.iter().enumerate() {
            assert_close(point.x, idx as f64);
            assert_close(point.y, 0.0);
        }
    }

    #[test]
    fn keeps_first_point_and_ends_near_last() {
        let path = zigzag();
        let sampled = resample(&path, 64);
        assert_eq!(sampled[0], path[0]);
        let end = sampled[63];
        let last = path[path.len() - 1];
        assert!(distance(end, last) < 1e-6);
    }

    #[test]
    fn is_deterministic() {
        let path = zigzag();
        assert_eq!(resample(&path, 200), resample(&path, 200));
    }
}
