//! 7-point Gauss / 15-point Kronrod rule.
//!
//! The Gauss nodes are a subset of the Kronrod nodes, so one set of 15
//! evaluations yields both estimates and their difference serves as the
//! error estimate.

use crate::integrand::integrand::Integrand;
use crate::quadrature::quadratureerror::QuadratureError;

/// Non-negative Kronrod abscissae on `[-1, 1]`, centre first.
const KRONROD_NODES: [f64; 8] = [
    0.0,
    0.207784955007898467600689403773245,
    0.405845151377397166906606412076961,
    0.586087235467691130294144838258730,
    0.741531185599394439863864773280788,
    0.864864423359769072789712788640926,
    0.949107912342758524526189684047851,
    0.991455371120812639206854697526329,
];

const KRONROD_WEIGHTS: [f64; 8] = [
    0.209482141084727828012999174891714,
    0.204432940075298892414161999234649,
    0.190350578064785409913256402421014,
    0.169004726639267902826583426598550,
    0.140653259715525918745189590510238,
    0.104790010322250183839876322541518,
    0.063092092629978553290700663189204,
    0.022935322010529224963732008058970,
];

/// Gauss weights for the Kronrod nodes at even indices (0, 2, 4, 6).
const GAUSS_WEIGHTS: [f64; 4] = [
    0.417959183673469387755102040816327,
    0.381830050505118944950369775488975,
    0.279705391489276667901467771423780,
    0.129484966168869693270611432679082,
];

pub const EVALUATIONS_PER_PANEL: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelEstimate {
    a: f64,
    b: f64,
    value: f64,
    error: f64
}

impl PanelEstimate {
    pub fn a(&self) -> f64 {
        self.a
    }

    pub fn b(&self) -> f64 {
        self.b
    }

    /// Kronrod estimate of the integral over the panel.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// `|kronrod - gauss|` over the panel.
    pub fn error(&self) -> f64 {
        self.error
    }
}

/// Applies G7K15 on `[a, b]`.
pub fn g7k15<I>(f: &I, a: f64, b: f64) -> Result<PanelEstimate, QuadratureError>
where
    I: Integrand + ?Sized,
{
    let center = (a + b) / 2.0;
    let half_length = (b - a) / 2.0;

    let f_center = QuadratureError::check_sample(center, f.value(center))?;
    let mut kronrod_sum = KRONROD_WEIGHTS[0] * f_center;
    let mut gauss_sum = GAUSS_WEIGHTS[0] * f_center;

    for i in 1..KRONROD_NODES.len() {
        let offset = half_length * KRONROD_NODES[i];
        let x_left = center - offset;
        let x_right = center + offset;
        let f_sum = QuadratureError::check_sample(x_left, f.value(x_left))?
                  + QuadratureError::check_sample(x_right, f.value(x_right))?;

        kronrod_sum += KRONROD_WEIGHTS[i] * f_sum;
        if i % 2 == 0 {
            gauss_sum += GAUSS_WEIGHTS[i / 2] * f_sum;
        }
    }

    let value = kronrod_sum * half_length;
    let error = ((kronrod_sum - gauss_sum) * half_length).abs();
    Ok(PanelEstimate { a, b, value, error })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn weights_integrate_constant_exactly() {
        let estimate = g7k15(&|_: f64| 1.0, -1.0, 1.0).unwrap();
        assert_relative_eq!(estimate.value(), 2.0, epsilon = 1e-14);
        assert!(estimate.error() < 1e-14);
    }

    #[test]
    fn gauss_part_is_exact_for_degree_thirteen() {
        // x^12 has integral 2/13 on [-1, 1]
        let estimate = g7k15(&|x: f64| x.powi(12), -1.0, 1.0).unwrap();
        assert_relative_eq!(estimate.value(), 2.0 / 13.0, epsilon = 1e-13);
        assert!(estimate.error() < 1e-12);
    }

    #[test]
    fn smooth_function_on_shifted_interval() {
        let estimate = g7k15(&|x: f64| x.exp(), 1.0, 2.0).unwrap();
        assert_relative_eq!(estimate.value(), 2f64.exp() - 1f64.exp(), epsilon = 1e-12);
    }

    #[test]
    fn reports_undefined_sample() {
        let err = g7k15(&|x: f64| (x - 0.5).ln(), 0.0, 1.0).unwrap_err();
        assert!(matches!(err, QuadratureError::Evaluation { .. }));
    }
}
