use nalgebra::{
    DMatrix,
    DVector
};

use crate::math::curve::curve::{
    Curve,
    CurveIntegration
};
use crate::math::curve::point2d::Point2D;

// ─────────────────────────────────────────────
// Polynomial
// ─────────────────────────────────────────────
//
// Stored in Horner order around a local origin:
//
//   p(x) = c_0·t^d + c_1·t^(d-1) + ... + c_d,   t = x - origin
//
// Shifting to the first fitted node keeps the Vandermonde system well
// conditioned when the nodes sit far from zero.

const SINGULAR_VALUE_EPS: f64 = 1e-14;

#[derive(Debug, Clone)]
pub struct Polynomial {
    coefs: Vec<f64>,
    origin: f64
}

impl Polynomial {
    /// `coefs` are highest degree first, expressed in `x - origin`.
    pub fn new(coefs: Vec<f64>, origin: f64) -> Polynomial {
        let coefs = if coefs.is_empty() { vec![0.0] } else { coefs };
        Polynomial { coefs, origin }
    }

    /// Least-squares fit of the given degree through `points`.
    ///
    /// With exactly `degree + 1` distinct abscissae the fit interpolates.
    /// Returns `None` when there are not enough points to determine the
    /// coefficients.
    pub fn fit(points: &[Point2D], degree: usize) -> Option<Polynomial> {
        if points.len() <= degree {
            return None;
        }

        let origin = points[0].x();
        let n_cols = degree + 1;
        let vandermonde = DMatrix::from_fn(points.len(), n_cols, |i, j| {
            (points[i].x() - origin).powi((degree - j) as i32)
        });
        let rhs = DVector::from_iterator(points.len(), points.iter().map(|pt| pt.y()));

        let solution = vandermonde
            .svd(true, true)
            .solve(&rhs, SINGULAR_VALUE_EPS)
            .ok()?;

        if solution.iter().any(|c| !c.is_finite()) {
            return None;
        }

        Some(Polynomial::new(solution.iter().copied().collect(), origin))
    }

    pub fn degree(&self) -> usize {
        self.coefs.len() - 1
    }

    pub fn coefs(&self) -> &[f64] {
        &self.coefs
    }

    pub fn origin(&self) -> f64 {
        self.origin
    }

    /// `n_samples` equally spaced points of the polynomial over `[a, b]`,
    /// both ends included.
    pub fn sample(&self, a: f64, b: f64, n_samples: usize) -> Vec<Point2D> {
        match n_samples {
            0 => Vec::new(),
            1 => vec![Point2D::new(a, self.value(a))],
            _ => {
                let step = (b - a) / (n_samples - 1) as f64;
                (0..n_samples)
                    .map(|i| {
                        let x = if i == n_samples - 1 { b } else { a + i as f64 * step };
                        Point2D::new(x, self.value(x))
                    })
                    .collect()
            }
        }
    }

    fn horner(coefs: &[f64], t: f64) -> f64 {
        let mut result = coefs[0];
        for &beta in &coefs[1..] {
            result = f64::mul_add(result, t, beta);
        }
        result
    }

    fn antiderivative(&self, x: f64) -> f64 {
        let t = x - self.origin;
        let degree = self.degree();
        let mut result = 0.0;
        for (i, &c) in self.coefs.iter().enumerate() {
            let power = (degree - i + 1) as i32;
            result += c * t.powi(power) / power as f64;
        }
        result
    }
}

impl Curve for Polynomial {
    fn value(&self, x: f64) -> f64 {
        Self::horner(&self.coefs, x - self.origin)
    }

    fn derivative(&self, x: f64) -> f64 {
        let degree = self.degree();
        if degree == 0 {
            return 0.0;
        }
        let deriv_coefs: Vec<f64> = (0..degree)
            .map(|i| (degree - i) as f64 * self.coefs[i])
            .collect();
        Self::horner(&deriv_coefs, x - self.origin)
    }
}

impl CurveIntegration for Polynomial {
    fn integral(&self, a: f64, b: f64) -> f64 {
        if a == b {
            return 0.0;
        }
        self.antiderivative(b) - self.antiderivative(a)
    }
}
