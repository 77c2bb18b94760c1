pub trait Curve {
    fn value(&self, x: f64) -> f64;

    fn derivative(&self, x: f64) -> f64;
}

pub trait CurveIntegration {
    /// Definite integral over `[a, b]`; `a > b` flips the sign.
    fn integral(&self, a: f64, b: f64) -> f64;
}
