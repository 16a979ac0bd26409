use serde::{Deserialize, Serialize};

/// Down-sampling algorithm applied to long series before drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DecimationAlgorithm {
    /// Largest-Triangle-Three-Buckets.
    #[default]
    Lttb,
    /// Keep every sample.
    None,
}

/// Reduces `points` to at most `threshold` samples with LTTB.
///
/// First and last samples are always kept. Inputs already under the threshold,
/// or thresholds below 3, are returned unchanged.
#[must_use]
pub fn lttb(points: &[(f64, f64)], threshold: usize) -> Vec<(f64, f64)> {
    let len = points.len();
    if threshold >= len || threshold < 3 {
        return points.to_vec();
    }

    let bucket_size = (len - 2) as f64 / (threshold - 2) as f64;
    let mut sampled = Vec::with_capacity(threshold);
    sampled.push(points[0]);
    let mut anchor = 0usize;

    for bucket in 0..threshold - 2 {
        let next_start = ((bucket + 1) as f64 * bucket_size) as usize + 1;
        let next_end = (((bucket + 2) as f64 * bucket_size) as usize + 1).min(len);
        let (avg_x, avg_y) = average(&points[next_start..next_end.max(next_start + 1).min(len)]);

        let range_start = (bucket as f64 * bucket_size) as usize + 1;
        let range_end = next_start.min(len - 1);
        let (ax, ay) = points[anchor];

        let mut best_index = range_start;
        let mut best_area = -1.0;
        for (offset, (x, y)) in points[range_start..range_end].iter().enumerate() {
            let area = ((ax - avg_x) * (y - ay) - (ax - x) * (avg_y - ay)).abs();
            if area > best_area {
                best_area = area;
                best_index = range_start + offset;
            }
        }

        sampled.push(points[best_index]);
        anchor = best_index;
    }

    sampled.push(points[len - 1]);
    sampled
}

fn average(points: &[(f64, f64)]) -> (f64, f64) {
    let count = points.len().max(1) as f64;
    let (sum_x, sum_y) = points
        .iter()
        .fold((0.0, 0.0), |(sx, sy), (x, y)| (sx + x, sy + y));
    (sum_x / count, sum_y / count)
}

#[cfg(test)]
mod tests {
    use super::lttb;

    #[test]
    fn short_input_is_untouched() {
        let points = vec![(0.0, 1.0), (1.0, 3.0), (2.0, 2.0)];
        assert_eq!(lttb(&points, 10), points);
    }

    #[test]
    fn keeps_endpoints_and_threshold_count() {
        let points: Vec<(f64, f64)> = (0..1_000).map(|i| (i as f64, (i % 17) as f64)).collect();
        let sampled = lttb(&points, 50);
        assert_eq!(sampled.len(), 50);
        assert_eq!(sampled.first(), points.first());
        assert_eq!(sampled.last(), points.last());
        assert!(sampled.windows(2).all(|pair| pair[0].0 < pair[1].0));
    }

    #[test]
    fn spike_survives_down_sampling() {
        let mut points: Vec<(f64, f64)> = (0..300).map(|i| (i as f64, 0.0)).collect();
        points[150].1 = 500.0;
        let sampled = lttb(&points, 20);
        assert!(sampled.iter().any(|(_, y)| *y == 500.0));
    }
}
