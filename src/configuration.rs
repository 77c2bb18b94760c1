use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::quadrature::engine::DEFAULT_PARABOLA_SAMPLES;
use crate::quadrature::method::Method;
use crate::reference::adaptive::ReferenceSettings;

pub const DEFAULT_CURVE_SAMPLES: usize = 1000;

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("cannot read configuration: {0}")]
    IOError(#[from] std::io::Error),

    #[error("cannot parse configuration: {0}")]
    JsonParseError(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String)
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigurationJsonProp {
    expression: Option<String>,
    lower: Option<f64>,
    upper: Option<f64>,
    subdivisions: Option<usize>,
    methods: Option<Vec<Method>>,
    parabola_samples: Option<usize>,
    curve_samples: Option<usize>,
    #[serde(default)]
    reference: ReferenceSettings
}

/// Inputs of one integration study.
#[derive(Debug, Clone, PartialEq)]
pub struct Configuration {
    expression: String,
    lower: f64,
    upper: f64,
    subdivisions: usize,
    methods: Vec<Method>,
    parabola_samples: usize,
    curve_samples: usize,
    reference: ReferenceSettings
}

impl Default for Configuration {
    fn default() -> Configuration {
        Configuration::new()
    }
}

impl Configuration {
    /// `x**2` on `[0, 2]` with ten subdivisions and every method.
    pub fn new() -> Configuration {
        Configuration {
            expression: "x**2".to_owned(),
            lower: 0.0,
            upper: 2.0,
            subdivisions: 10,
            methods: Method::ALL.to_vec(),
            parabola_samples: DEFAULT_PARABOLA_SAMPLES,
            curve_samples: DEFAULT_CURVE_SAMPLES,
            reference: ReferenceSettings::default()
        }
    }

    pub fn from_reader<P: AsRef<Path>>(file_path: P) -> Result<Configuration, ConfigurationError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        Configuration::from_json_prop(json_prop)
    }

    pub fn from_json_str(json: &str) -> Result<Configuration, ConfigurationError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_str(json)?;
        Configuration::from_json_prop(json_prop)
    }

    fn from_json_prop(json_prop: ConfigurationJsonProp) -> Result<Configuration, ConfigurationError> {
        let defaults = Configuration::new();
        let configuration = Configuration {
            expression: json_prop.expression.unwrap_or(defaults.expression),
            lower: json_prop.lower.unwrap_or(defaults.lower),
            upper: json_prop.upper.unwrap_or(defaults.upper),
            subdivisions: json_prop.subdivisions.unwrap_or(defaults.subdivisions),
            methods: json_prop.methods.unwrap_or(defaults.methods),
            parabola_samples: json_prop.parabola_samples.unwrap_or(defaults.parabola_samples),
            curve_samples: json_prop.curve_samples.unwrap_or(defaults.curve_samples),
            reference: json_prop.reference
        };
        configuration.validated()
    }

    /// Checks the settings that cannot be fixed up silently.
    pub fn validated(self) -> Result<Configuration, ConfigurationError> {
        if self.subdivisions == 0 {
            return Err(ConfigurationError::Invalid("subdivisions must be at least 1".to_owned()));
        }
        if !self.lower.is_finite() || !self.upper.is_finite() {
            return Err(ConfigurationError::Invalid("interval bounds must be finite".to_owned()));
        }
        if self.methods.is_empty() {
            return Err(ConfigurationError::Invalid("at least one method is required".to_owned()));
        }
        if self.curve_samples < 2 {
            return Err(ConfigurationError::Invalid("curve_samples must be at least 2".to_owned()));
        }
        if !(self.reference.abs_tolerance >= 0.0 && self.reference.rel_tolerance >= 0.0) {
            return Err(ConfigurationError::Invalid("reference tolerances must be non-negative".to_owned()));
        }
        Ok(self)
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn parabola_samples(&self) -> usize {
        self.parabola_samples
    }

    pub fn curve_samples(&self) -> usize {
        self.curve_samples
    }

    pub fn reference(&self) -> &ReferenceSettings {
        &self.reference
    }

    pub fn with_expression(mut self, expression: &str) -> Configuration {
        self.expression = expression.to_owned();
        self
    }

    pub fn with_interval(mut self, lower: f64, upper: f64) -> Configuration {
        self.lower = lower;
        self.upper = upper;
        self
    }

    pub fn with_subdivisions(mut self, subdivisions: usize) -> Configuration {
        self.subdivisions = subdivisions;
        self
    }

    pub fn with_methods(mut self, methods: Vec<Method>) -> Configuration {
        self.methods = methods;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let configuration = Configuration::from_json_str("{}").unwrap();
        assert_eq!(configuration, Configuration::new());
        assert_eq!(configuration.methods().len(), 5);
        assert_eq!(configuration.reference().max_subdivisions, 50);
    }

    #[test]
    fn fields_override_defaults() {
        let json = r#"{
            "expression": "sin(x)",
            "lower": 0.0,
            "upper": 3.14,
            "subdivisions": 8,
            "methods": ["trapezoid", "simpson"],
            "reference": { "max_subdivisions": 200 }
        }"#;
        let configuration = Configuration::from_json_str(json).unwrap();
        assert_eq!(configuration.expression(), "sin(x)");
        assert_eq!(configuration.upper(), 3.14);
        assert_eq!(configuration.subdivisions(), 8);
        assert_eq!(configuration.methods(), &[Method::Trapezoid, Method::Simpson]);
        assert_eq!(configuration.reference().max_subdivisions, 200);
        assert_eq!(configuration.reference().abs_tolerance, 1.49e-8);
    }

    #[test]
    fn rejects_zero_subdivisions() {
        let err = Configuration::from_json_str(r#"{ "subdivisions": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigurationError::Invalid(_)));
    }

    #[test]
    fn rejects_unknown_method_and_fields() {
        assert!(matches!(
            Configuration::from_json_str(r#"{ "methods": ["boole"] }"#),
            Err(ConfigurationError::JsonParseError(_))
        ));
        assert!(matches!(
            Configuration::from_json_str(r#"{ "n": 4 }"#),
            Err(ConfigurationError::JsonParseError(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = Configuration::from_reader("/nonexistent/quadlab.json").unwrap_err();
        assert!(matches!(err, ConfigurationError::IOError(_)));
    }
}
