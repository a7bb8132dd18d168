//! Cubic-bezier easing for the spin animation

/// A CSS-style `cubic-bezier(x1, y1, x2, y2)` timing curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Fast start, long glide into the target
pub const SPIN_EASE: CubicBezier = CubicBezier::new(0.2, 0.0, 0.1, 1.0);

impl CubicBezier {
    pub const fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self { x1, y1, x2, y2 }
    }

    #[inline]
    fn sample(a1: f64, a2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * a1 + 3.0 * inv * s * s * a2 + s * s * s
    }

    #[inline]
    fn slope(a1: f64, a2: f64, s: f64) -> f64 {
        let inv = 1.0 - s;
        3.0 * inv * inv * a1 + 6.0 * inv * s * (a2 - a1) + 3.0 * s * s * (1.0 - a2)
    }

    /// Curve parameter whose x equals `x`
    fn solve_param(&self, x: f64) -> f64 {
        // Newton first, bisection if the slope flattens out
        let mut s = x;
        for _ in 0..8 {
            let err = Self::sample(self.x1, self.x2, s) - x;
            if err.abs() < 1e-7 {
                return s;
            }
            let d = Self::slope(self.x1, self.x2, s);
            if d.abs() < 1e-6 {
                break;
            }
            s -= err / d;
        }

        let (mut lo, mut hi) = (0.0, 1.0);
        s = x;
        for _ in 0..50 {
            let value = Self::sample(self.x1, self.x2, s);
            if (value - x).abs() < 1e-7 {
                break;
            }
            if value < x {
                lo = s;
            } else {
                hi = s;
            }
            s = (lo + hi) / 2.0;
        }
        s
    }

    /// Eased progress for linear progress `t` in [0, 1]
    pub fn ease(&self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        Self::sample(self.y1, self.y2, self.solve_param(t))
    }
}
