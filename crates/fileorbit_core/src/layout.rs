//! Golden-angle sphere layout
//!
//! Places N anchors on the unit sphere in a spiral: evenly spaced in height,
//! each turned by the golden angle π(3 - √5) from the previous one. The result
//! depends on N alone and is recomputed in full whenever N changes.

use std::f32::consts::PI;
use fileorbit_math::Vec3;

/// Anchor positions for `n` entities, ordered by index
pub fn fibonacci_sphere(n: usize) -> Vec<Vec3> {
    if n == 0 {
        return Vec::new();
    }

    let golden_angle = PI * (3.0 - 5.0f32.sqrt());
    let offset = 2.0 / n as f32;

    (0..n)
        .map(|i| {
            let y = i as f32 * offset - 1.0 + offset / 2.0;
            // max(0) keeps rounding near the poles from producing NaN
            let r = (1.0 - y * y).max(0.0).sqrt();
            let phi = i as f32 * golden_angle;
            Vec3::new(r * phi.cos(), y, r * phi.sin())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 0.0001;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    #[test]
    fn test_empty() {
        assert!(fibonacci_sphere(0).is_empty());
    }

    #[test]
    fn test_single_entity_on_equator() {
        let points = fibonacci_sphere(1);
        assert_eq!(points.len(), 1);
        assert!(approx_eq(points[0].y, 0.0));
        assert!(approx_eq(points[0].x, 1.0));
        assert!(approx_eq(points[0].z, 0.0));
    }

    #[test]
    fn test_points_on_unit_sphere() {
        for n in [2, 7, 64, 1000] {
            for (i, p) in fibonacci_sphere(n).iter().enumerate() {
                assert!(approx_eq(p.length(), 1.0), "n={} i={} p={:?}", n, i, p);
                assert!(!p.x.is_nan() && !p.y.is_nan() && !p.z.is_nan());
            }
        }
    }

    #[test]
    fn test_heights_evenly_spaced() {
        let n = 10;
        let points = fibonacci_sphere(n);
        assert!(approx_eq(points[0].y, -0.9));
        assert!(approx_eq(points[n - 1].y, 0.9));
        for pair in points.windows(2) {
            assert!(approx_eq(pair[1].y - pair[0].y, 0.2));
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!(fibonacci_sphere(33), fibonacci_sphere(33));
    }

    #[test]
    fn test_roughly_uniform() {
        // Centroid of a near-uniform spread sits near the origin
        let points = fibonacci_sphere(500);
        let sum = points.iter().fold(Vec3::ZERO, |acc, p| acc + *p);
        let centroid = sum * (1.0 / points.len() as f32);
        assert!(centroid.length() < 0.05, "centroid {:?}", centroid);
    }
}
