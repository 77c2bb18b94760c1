//! The `Integrand` trait, the single-variable function handed to the
//! quadrature rules and the reference integrator.

/// A real function of one real variable.
///
/// Closures `Fn(f64) -> f64` implement this trait directly. Evaluation may
/// return a non-finite value; callers treat that as the function being
/// undefined at that point.
pub trait Integrand {
    /// Evaluates the function at `x`.
    fn value(&self, x: f64) -> f64;

    /// Evaluates the function elementwise over `xs`.
    ///
    /// The result always has the same length as `xs`.
    fn values(&self, xs: &[f64]) -> Vec<f64> {
        xs.iter().map(|&x| self.value(x)).collect()
    }
}

impl<F> Integrand for F
where
    F: Fn(f64) -> f64,
{
    fn value(&self, x: f64) -> f64 {
        self(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_integrands() {
        let f = |x: f64| 2.0 * x;
        assert_eq!(f.value(1.5), 3.0);
        assert_eq!(f.values(&[0.0, 1.0, 2.0]), vec![0.0, 2.0, 4.0]);
    }
}
