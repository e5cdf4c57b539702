use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the drawing surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Uniform draw in `[min, max)`. A degenerate or inverted range yields `min`.
pub fn random_in_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}

pub fn clamp(value: f64, lo: f64, hi: f64) -> f64 {
    value.max(lo).min(hi)
}

/// Point on the cubic Bézier curve `p0..p3` at parameter `t`.
pub fn bezier_point(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let u = 1.0 - t;
    let tt = t * t;
    let uu = u * u;
    let uuu = uu * u;
    let ttt = tt * t;
    Point {
        x: uuu * p0.x + 3.0 * uu * t * p1.x + 3.0 * u * tt * p2.x + ttt * p3.x,
        y: uuu * p0.y + 3.0 * uu * t * p1.y + 3.0 * u * tt * p2.y + ttt * p3.y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{SeedableRng, rngs::StdRng};

    const P0: Point = Point::new(0.0, 0.0);
    const P1: Point = Point::new(10.0, 40.0);
    const P2: Point = Point::new(60.0, -20.0);
    const P3: Point = Point::new(100.0, 10.0);

    #[test]
    fn test_bezier_endpoints() {
        assert_eq!(bezier_point(P0, P1, P2, P3, 0.0), P0);
        assert_eq!(bezier_point(P0, P1, P2, P3, 1.0), P3);
    }

    #[test]
    fn test_bezier_straight_line_midpoint() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(30.0, 30.0);
        let mid = bezier_point(a, a, b, b, 0.5);
        assert!((mid.x - 15.0).abs() < 1e-9);
        assert!((mid.y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_clamp() {
        assert_eq!(clamp(5.0, 0.0, 1.0), 1.0);
        assert_eq!(clamp(-5.0, 0.0, 1.0), 0.0);
        assert_eq!(clamp(0.25, 0.0, 1.0), 0.25);
    }

    #[test]
    fn test_random_in_range_degenerate() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(random_in_range(&mut rng, 2.0, 2.0), 2.0);
        assert_eq!(random_in_range(&mut rng, 3.0, 1.0), 3.0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        fn point() -> impl Strategy<Value = Point> {
            (-2_000.0..2_000.0, -2_000.0..2_000.0).prop_map(|(x, y)| Point { x, y })
        }

        proptest! {
            #[test]
            fn prop_bezier_stays_in_control_hull_bounds(
                p0 in point(), p1 in point(), p2 in point(), p3 in point(), t in 0.0..=1.0f64
            ) {
                let p = bezier_point(p0, p1, p2, p3, t);
                let xs = [p0.x, p1.x, p2.x, p3.x];
                let ys = [p0.y, p1.y, p2.y, p3.y];
                let min_x = xs.iter().cloned().fold(f64::INFINITY, f64::min);
                let max_x = xs.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                let min_y = ys.iter().cloned().fold(f64::INFINITY, f64::min);
                let max_y = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
                prop_assert!(p.x >= min_x - 1e-6 && p.x <= max_x + 1e-6);
                prop_assert!(p.y >= min_y - 1e-6 && p.y <= max_y + 1e-6);
            }

            #[test]
            fn prop_random_in_range_bounded(seed in any::<u64>(), min in -100.0..100.0f64, span in 0.001..50.0f64) {
                let mut rng = StdRng::seed_from_u64(seed);
                let value = random_in_range(&mut rng, min, min + span);
                prop_assert!(value >= min && value < min + span);
            }
        }
    }
}
