//! One end-to-end request: compile the formula, compute the reference
//! value, run each selected rule and measure its error.

use std::fmt;

use serde::Serialize;
use tracing::{
    info,
    warn
};

use crate::configuration::Configuration;
use crate::expression::expression::compile;
use crate::integrand::integrand::Integrand;
use crate::math::curve::point2d::Point2D;
use crate::math::round::format_fixed;
use crate::quadrature::engine::{
    QuadratureEngine,
    QuadratureResult
};
use crate::quadrature::errorevaluator::{
    evaluate_error,
    ErrorReport
};
use crate::quadrature::method::Method;
use crate::quadrature::quadratureerror::QuadratureError;
use crate::reference::adaptive::{
    AdaptiveGaussKronrod,
    ReferenceIntegrator,
    ReferenceValue
};

const REPORT_DIGITS: u32 = 6;

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MethodOutcome {
    Computed {
        result: QuadratureResult,
        error: ErrorReport
    },
    /// The rule cannot run with these inputs, e.g. Simpson with odd `n`.
    Unavailable {
        reason: String
    },
    /// The function is undefined at one of the rule's sample points.
    Failed {
        reason: String
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MethodReport {
    method: Method,
    outcome: MethodOutcome
}

impl MethodReport {
    pub fn method(&self) -> Method {
        self.method
    }

    pub fn outcome(&self) -> &MethodOutcome {
        &self.outcome
    }

    pub fn approximation(&self) -> Option<f64> {
        match &self.outcome {
            MethodOutcome::Computed { result, .. } => Some(result.approximation()),
            _ => None
        }
    }

    pub fn error(&self) -> Option<&ErrorReport> {
        match &self.outcome {
            MethodOutcome::Computed { error, .. } => Some(error),
            _ => None
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StudyReport {
    expression: String,
    lower: f64,
    upper: f64,
    subdivisions: usize,
    reference: ReferenceValue,
    /// Samples of `f` for drawing the curve itself; undefined points are
    /// left out.
    curve: Vec<Point2D>,
    methods: Vec<MethodReport>
}

impl StudyReport {
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn reference(&self) -> &ReferenceValue {
        &self.reference
    }

    pub fn curve(&self) -> &[Point2D] {
        &self.curve
    }

    pub fn methods(&self) -> &[MethodReport] {
        &self.methods
    }

    pub fn method(&self, method: Method) -> Option<&MethodReport> {
        self.methods.iter().find(|report| report.method == method)
    }
}

impl fmt::Display for StudyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "f(x) = {} on [{}, {}], n = {}", self.expression, self.lower, self.upper, self.subdivisions)?;
        writeln!(f, "exact value: {}", format_fixed(self.reference.value(), REPORT_DIGITS))?;
        for report in &self.methods {
            writeln!(f)?;
            writeln!(f, "[{}]", report.method)?;
            match &report.outcome {
                MethodOutcome::Computed { result, error } => {
                    writeln!(f, "  approximation:    {}", format_fixed(result.approximation(), REPORT_DIGITS))?;
                    writeln!(f, "  absolute error:   {}", format_fixed(error.absolute(), REPORT_DIGITS))?;
                    match error.percentage() {
                        Some(percentage) => {
                            writeln!(f, "  percentage error: {} %", format_fixed(percentage, REPORT_DIGITS))?
                        },
                        None => writeln!(f, "  percentage error: undefined (exact value is zero)")?
                    }
                },
                MethodOutcome::Unavailable { reason } => writeln!(f, "  unavailable: {}", reason)?,
                MethodOutcome::Failed { reason } => writeln!(f, "  failed: {}", reason)?
            }
        }
        Ok(())
    }
}

pub struct IntegrationStudy {
    configuration: Configuration,
    engine: QuadratureEngine,
    reference_integrator: Box<dyn ReferenceIntegrator>
}

impl IntegrationStudy {
    pub fn new(configuration: Configuration) -> IntegrationStudy {
        let engine = QuadratureEngine::new(configuration.parabola_samples());
        let reference_integrator = Box::new(AdaptiveGaussKronrod::new(*configuration.reference()));
        IntegrationStudy { configuration, engine, reference_integrator }
    }

    pub fn with_reference_integrator(mut self, reference_integrator: Box<dyn ReferenceIntegrator>) -> IntegrationStudy {
        self.reference_integrator = reference_integrator;
        self
    }

    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// Runs every configured method.
    ///
    /// A rule rejected by validation is reported as unavailable, and a rule
    /// that samples an undefined point is reported as failed; the others
    /// still run. Compile and reference failures abort the whole study.
    pub fn run(&self) -> Result<StudyReport, QuadratureError> {
        let configuration = &self.configuration;
        let f = compile(configuration.expression())?;
        let (a, b, n) = (configuration.lower(), configuration.upper(), configuration.subdivisions());
        info!(expression = %f, a, b, n, "starting integration study");

        let reference = self.reference_integrator.reference(&f, a, b)?;
        if !reference.converged() {
            warn!(error_estimate = reference.error_estimate(), "reference value may be inaccurate");
        }

        let mut methods = Vec::with_capacity(configuration.methods().len());
        for &method in configuration.methods() {
            let outcome = match self.engine.integrate(&f, a, b, n, method) {
                Ok(result) => {
                    let error = evaluate_error(result.approximation(), reference.value());
                    MethodOutcome::Computed { result, error }
                },
                Err(error) if error.is_validation() => {
                    MethodOutcome::Unavailable { reason: error.to_string() }
                },
                Err(error @ QuadratureError::Evaluation { .. }) => {
                    warn!(%method, %error, "method failed");
                    MethodOutcome::Failed { reason: error.to_string() }
                },
                Err(error) => return Err(error)
            };
            methods.push(MethodReport { method, outcome });
        }

        Ok(StudyReport {
            expression: f.source().to_owned(),
            lower: a,
            upper: b,
            subdivisions: n,
            reference,
            curve: sample_curve(&f, a, b, configuration.curve_samples()),
            methods
        })
    }
}

fn sample_curve(f: &dyn Integrand, a: f64, b: f64, n_samples: usize) -> Vec<Point2D> {
    if n_samples < 2 {
        return Vec::new();
    }
    let step = (b - a) / (n_samples - 1) as f64;
    let xs: Vec<f64> = (0..n_samples)
        .map(|i| if i == n_samples - 1 { b } else { a + i as f64 * step })
        .collect();
    let ys = f.values(&xs);
    xs.into_iter()
        .zip(ys)
        .filter(|(_, y)| y.is_finite())
        .map(|(x, y)| Point2D::new(x, y))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn default_study_runs_every_method() {
        let report = IntegrationStudy::new(Configuration::new()).run().unwrap();
        assert_eq!(report.methods().len(), 5);
        assert_relative_eq!(report.reference().value(), 8.0 / 3.0, epsilon = 1e-12);
        assert_eq!(report.curve().len(), 1000);

        let simpson = report.method(Method::Simpson).unwrap();
        assert_relative_eq!(simpson.approximation().unwrap(), 8.0 / 3.0, epsilon = 1e-12);
    }

    #[test]
    fn odd_n_marks_only_simpson_unavailable() {
        let configuration = Configuration::new().with_subdivisions(5);
        let report = IntegrationStudy::new(configuration).run().unwrap();

        let simpson = report.method(Method::Simpson).unwrap();
        assert!(matches!(simpson.outcome(), MethodOutcome::Unavailable { .. }));
        assert!(simpson.approximation().is_none());

        for method in [Method::LeftRiemann, Method::RightRiemann, Method::Midpoint, Method::Trapezoid] {
            assert!(report.method(method).unwrap().approximation().is_some());
        }
        assert!(report.to_string().contains("unavailable: simpson requires an even number"));
    }

    #[test]
    fn zero_reference_renders_undefined_percentage() {
        let configuration = Configuration::new()
            .with_expression("x")
            .with_interval(-1.0, 1.0)
            .with_methods(vec![Method::LeftRiemann]);
        let report = IntegrationStudy::new(configuration).run().unwrap();

        let left = report.method(Method::LeftRiemann).unwrap();
        assert_eq!(left.error().unwrap().percentage(), None);
        assert!(report.to_string().contains("percentage error: undefined"));
    }

    #[test]
    fn bad_expression_aborts() {
        let configuration = Configuration::new().with_expression("x +* 2");
        let err = IntegrationStudy::new(configuration).run().unwrap_err();
        assert!(matches!(err, QuadratureError::Expression(_)));
    }

    #[test]
    fn undefined_function_aborts_with_offending_point() {
        let configuration = Configuration::new()
            .with_expression("log(x - 1)")
            .with_interval(0.0, 2.0);
        let err = IntegrationStudy::new(configuration).run().unwrap_err();
        assert!(matches!(err, QuadratureError::Evaluation { .. }));
    }

    #[test]
    fn endpoint_singularity_fails_only_the_rules_that_sample_it() {
        let configuration = Configuration::new()
            .with_expression("1/sqrt(x)")
            .with_interval(0.0, 1.0)
            .with_subdivisions(10);
        let report = IntegrationStudy::new(configuration).run().unwrap();
        assert_relative_eq!(report.reference().value(), 2.0, epsilon = 1e-4);

        for method in [Method::LeftRiemann, Method::Trapezoid, Method::Simpson] {
            let outcome = report.method(method).unwrap().outcome();
            assert!(matches!(outcome, MethodOutcome::Failed { reason } if reason.contains("x = 0")));
        }
        for method in [Method::RightRiemann, Method::Midpoint] {
            let method_report = report.method(method).unwrap();
            assert!(method_report.approximation().unwrap().is_finite());
            assert!(method_report.error().is_some());
        }
        assert!(report.to_string().contains("failed: function is undefined at x = 0"));
    }

    #[test]
    fn report_serializes_to_json() {
        let configuration = Configuration::new().with_subdivisions(3);
        let report = IntegrationStudy::new(configuration).run().unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["methods"][0]["method"], "left_riemann");
        assert_eq!(json["methods"][0]["outcome"]["status"], "computed");
        assert_eq!(json["methods"][4]["outcome"]["status"], "unavailable");
    }

    struct FixedReference(f64);

    impl ReferenceIntegrator for FixedReference {
        fn reference(&self, _f: &dyn Integrand, _a: f64, _b: f64) -> Result<ReferenceValue, QuadratureError> {
            Ok(ReferenceValue::new(self.0, 0.0, 0, true))
        }
    }

    #[test]
    fn reference_integrator_is_pluggable() {
        let study = IntegrationStudy::new(Configuration::new().with_methods(vec![Method::Trapezoid]))
            .with_reference_integrator(Box::new(FixedReference(2.0)));
        let report = study.run().unwrap();
        let error = report.method(Method::Trapezoid).unwrap().error().unwrap();
        assert_relative_eq!(error.absolute(), 0.68, epsilon = 1e-12);
    }
}
