//! The composite quadrature rules.
//!
//! Each rule is split into a pure summation over pre-sampled values and a
//! geometry generator that describes the same decomposition for plotting.

use serde::Serialize;
use tracing::debug;

use crate::integrand::integrand::Integrand;
use crate::math::curve::point2d::Point2D;
use crate::math::curve::polynomial::Polynomial;
use crate::quadrature::method::Method;
use crate::quadrature::partition::Partition;
use crate::quadrature::plotprimitive::{
    BarAlignment,
    PlotPrimitive
};
use crate::quadrature::quadratureerror::QuadratureError;
use crate::quadrature::validation::validate;

pub const DEFAULT_PARABOLA_SAMPLES: usize = 100;

/// Outcome of one quadrature request.
#[derive(Debug, Clone, Serialize)]
pub struct QuadratureResult {
    method: Method,
    approximation: f64,
    geometry: Vec<PlotPrimitive>
}

impl QuadratureResult {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn approximation(&self) -> f64 {
        self.approximation
    }

    pub fn geometry(&self) -> &[PlotPrimitive] {
        &self.geometry
    }
}

#[derive(Debug, Clone, Copy)]
pub struct QuadratureEngine {
    parabola_samples: usize
}

impl Default for QuadratureEngine {
    fn default() -> QuadratureEngine {
        QuadratureEngine::new(DEFAULT_PARABOLA_SAMPLES)
    }
}

impl QuadratureEngine {
    /// `parabola_samples` is the number of points emitted per Simpson
    /// panel; values below 2 are raised to 2.
    pub fn new(parabola_samples: usize) -> QuadratureEngine {
        QuadratureEngine { parabola_samples: parabola_samples.max(2) }
    }

    pub fn parabola_samples(&self) -> usize {
        self.parabola_samples
    }

    pub fn integrate<I>(&self,
                        f: &I,
                        a: f64,
                        b: f64,
                        n: usize,
                        method: Method) -> Result<QuadratureResult, QuadratureError>
    where
        I: Integrand + ?Sized,
    {
        debug!(%method, a, b, n, "integrate");
        QuadratureError::check_bounds(a, b)?;
        // rules and geometry always run on the ascending partition
        let reversed = b < a;
        let partition = if reversed {
            Partition::new(b, a, n)?
        } else {
            Partition::new(a, b, n)?
        };
        validate(n, method)?;

        if partition.is_degenerate() {
            return Ok(QuadratureResult { method, approximation: 0.0, geometry: Vec::new() });
        }

        let mut result = self.integrate_ascending(f, &partition, method)?;
        if reversed {
            result.approximation = -result.approximation;
        }
        debug!(%method, approximation = result.approximation, "integrated");
        Ok(result)
    }

    fn integrate_ascending<I>(&self,
                              f: &I,
                              partition: &Partition,
                              method: Method) -> Result<QuadratureResult, QuadratureError>
    where
        I: Integrand + ?Sized,
    {
        let dx = partition.step();
        let (approximation, geometry) = match method {
            Method::LeftRiemann => {
                let xs = partition.left_nodes();
                let ys = sample(f, xs)?;
                (riemann_sum(&ys, dx), bars(xs, &ys, dx, BarAlignment::Edge))
            },
            Method::RightRiemann => {
                let xs = partition.right_nodes();
                let ys = sample(f, xs)?;
                (riemann_sum(&ys, dx), bars(xs, &ys, -dx, BarAlignment::Edge))
            },
            Method::Midpoint => {
                let xs = partition.midpoints();
                let ys = sample(f, &xs)?;
                (riemann_sum(&ys, dx), bars(&xs, &ys, dx, BarAlignment::Center))
            },
            Method::Trapezoid => {
                let ys = sample(f, partition.nodes())?;
                (trapezoid_sum(&ys, dx), trapezoids(partition.nodes(), &ys))
            },
            Method::Simpson => {
                let ys = sample(f, partition.nodes())?;
                (simpson_sum(&ys, dx), self.parabolas(partition.nodes(), &ys))
            }
        };

        Ok(QuadratureResult { method, approximation, geometry })
    }

    fn parabolas(&self, xs: &[f64], ys: &[f64]) -> Vec<PlotPrimitive> {
        (0..xs.len() - 1)
            .step_by(2)
            .map(|i| {
                let panel: Vec<Point2D> = (i..i + 3)
                    .map(|k| Point2D::new(xs[k], ys[k]))
                    .collect();
                let points = match Polynomial::fit(&panel, 2) {
                    Some(poly) => poly.sample(xs[i], xs[i + 2], self.parabola_samples),
                    // nodes too close to resolve a quadratic: draw the raw panel
                    None => panel
                };
                PlotPrimitive::Parabola { points }
            })
            .collect()
    }
}

/// Integrates with the default engine settings.
pub fn integrate<I>(f: &I, a: f64, b: f64, n: usize, method: Method) -> Result<QuadratureResult, QuadratureError>
where
    I: Integrand + ?Sized,
{
    QuadratureEngine::default().integrate(f, a, b, n, method)
}

/// Evaluates `f` over `xs`, failing on the first undefined value.
fn sample<I>(f: &I, xs: &[f64]) -> Result<Vec<f64>, QuadratureError>
where
    I: Integrand + ?Sized,
{
    let ys = f.values(xs);
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        QuadratureError::check_sample(x, y)?;
    }
    Ok(ys)
}

// ─────────────────────────────────────────────
// Rules
// ─────────────────────────────────────────────

fn riemann_sum(ys: &[f64], dx: f64) -> f64 {
    dx * ys.iter().sum::<f64>()
}

fn trapezoid_sum(ys: &[f64], dx: f64) -> f64 {
    let total: f64 = ys.windows(2).map(|w| w[0] + w[1]).sum();
    dx / 2.0 * total
}

/// Composite Simpson 1/3. `ys` must hold an odd number of samples.
fn simpson_sum(ys: &[f64], dx: f64) -> f64 {
    let n = ys.len() - 1;
    let odd: f64 = ys[1..n].iter().step_by(2).sum();
    let even: f64 = ys[2..n].iter().step_by(2).sum();
    dx / 3.0 * (ys[0] + 4.0 * odd + 2.0 * even + ys[n])
}

// ─────────────────────────────────────────────
// Geometry
// ─────────────────────────────────────────────

fn bars(xs: &[f64], ys: &[f64], width: f64, alignment: BarAlignment) -> Vec<PlotPrimitive> {
    xs.iter()
        .zip(ys.iter())
        .map(|(&x, &y)| PlotPrimitive::bar(x, y, width, alignment))
        .collect()
}

fn trapezoids(xs: &[f64], ys: &[f64]) -> Vec<PlotPrimitive> {
    (0..xs.len() - 1)
        .map(|i| PlotPrimitive::trapezoid(xs[i], ys[i], xs[i + 1], ys[i + 1]))
        .collect()
}
