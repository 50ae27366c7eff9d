//! Curve smoothing for Line charts.
//!
//! Each interior point gets two Bézier control points along the direction from its
//! previous to its next neighbour, scaled by `tension` and by the relative lengths of
//! the two adjacent segments. Segments are then sampled into a polyline.

/// Samples per Bézier segment.
const SAMPLES_PER_SEGMENT: usize = 16;

/// Smooth `points` (pixel coordinates) into a dense polyline.
///
/// `tension == 0` (or fewer than three points) returns the input unchanged.
/// Control point `y` values are clamped into `y_bounds` so curves never leave the plot.
pub fn smooth_polyline(
    points: &[(f64, f64)],
    tension: f64,
    y_bounds: (f64, f64),
) -> Vec<(f64, f64)> {
    if tension <= 0.0 || points.len() < 3 {
        return points.to_vec();
    }
    let (lo, hi) = if y_bounds.0 <= y_bounds.1 {
        y_bounds
    } else {
        (y_bounds.1, y_bounds.0)
    };

    let n = points.len();
    let mut ctrl_prev = vec![(0.0, 0.0); n];
    let mut ctrl_next = vec![(0.0, 0.0); n];
    for i in 0..n {
        let p1 = points[i];
        let p0 = if i == 0 { p1 } else { points[i - 1] };
        let p2 = if i + 1 == n { p1 } else { points[i + 1] };
        let d01 = dist(p0, p1);
        let d12 = dist(p1, p2);
        let total = d01 + d12;
        let (s01, s12) = if total > 0.0 {
            (d01 / total, d12 / total)
        } else {
            (0.0, 0.0)
        };
        let fa = tension * s01;
        let fb = tension * s12;
        let dx = p2.0 - p0.0;
        let dy = p2.1 - p0.1;
        ctrl_prev[i] = (p1.0 - fa * dx, (p1.1 - fa * dy).clamp(lo, hi));
        ctrl_next[i] = (p1.0 + fb * dx, (p1.1 + fb * dy).clamp(lo, hi));
    }

    let mut out = Vec::with_capacity((n - 1) * SAMPLES_PER_SEGMENT + 1);
    out.push(points[0]);
    for i in 0..n - 1 {
        let (a, b, c, d) = (points[i], ctrl_next[i], ctrl_prev[i + 1], points[i + 1]);
        for s in 1..=SAMPLES_PER_SEGMENT {
            let t = s as f64 / SAMPLES_PER_SEGMENT as f64;
            out.push(bezier(a, b, c, d, t));
        }
    }
    out
}

fn dist(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt()
}

fn bezier(a: (f64, f64), b: (f64, f64), c: (f64, f64), d: (f64, f64), t: f64) -> (f64, f64) {
    let u = 1.0 - t;
    let w0 = u * u * u;
    let w1 = 3.0 * u * u * t;
    let w2 = 3.0 * u * t * t;
    let w3 = t * t * t;
    (
        w0 * a.0 + w1 * b.0 + w2 * c.0 + w3 * d.0,
        w0 * a.1 + w1 * b.1 + w2 * c.1 + w3 * d.1,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn passes_through_every_input_point() {
        let pts = vec![(0.0, 10.0), (10.0, 0.0), (20.0, 8.0), (30.0, 3.0)];
        let out = smooth_polyline(&pts, 0.4, (0.0, 10.0));
        for p in &pts {
            assert!(out.iter().any(|q| (q.0 - p.0).abs() < 1e-9 && (q.1 - p.1).abs() < 1e-9));
        }
        assert_eq!(out.len(), 3 * SAMPLES_PER_SEGMENT + 1);
    }

    #[test]
    fn zero_tension_is_identity() {
        let pts = vec![(0.0, 1.0), (1.0, 2.0), (2.0, 0.0)];
        assert_eq!(smooth_polyline(&pts, 0.0, (0.0, 2.0)), pts);
    }

    #[test]
    fn stays_within_bounds() {
        let pts = vec![(0.0, 0.0), (10.0, 100.0), (20.0, 0.0), (30.0, 100.0)];
        let out = smooth_polyline(&pts, 0.4, (0.0, 100.0));
        assert!(out.iter().all(|p| p.1 >= -1e-9 && p.1 <= 100.0 + 1e-9));
    }
}
