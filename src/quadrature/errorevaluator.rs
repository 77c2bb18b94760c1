use serde::Serialize;

/// Error of an approximation against a reference value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ErrorReport {
    absolute: f64,
    /// `None` when the reference value is zero and the relative error is
    /// undefined.
    percentage: Option<f64>
}

impl ErrorReport {
    pub fn absolute(&self) -> f64 {
        self.absolute
    }

    pub fn percentage(&self) -> Option<f64> {
        self.percentage
    }
}

pub fn evaluate_error(approx: f64, exact: f64) -> ErrorReport {
    let absolute = (approx - exact).abs();
    let percentage = if exact == 0.0 {
        None
    } else {
        let ratio = 100.0 * absolute / exact.abs();
        // a subnormal reference can still overflow the quotient
        ratio.is_finite().then_some(ratio)
    };
    ErrorReport { absolute, percentage }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn absolute_and_percentage() {
        let report = evaluate_error(2.68, 8.0 / 3.0);
        assert_relative_eq!(report.absolute(), 0.0133333333, epsilon = 1e-9);
        assert_relative_eq!(report.percentage().unwrap(), 0.5, epsilon = 1e-9);
    }

    #[test]
    fn zero_reference_leaves_percentage_undefined() {
        let report = evaluate_error(0.25, 0.0);
        assert_eq!(report.absolute(), 0.25);
        assert_eq!(report.percentage(), None);

        let report = evaluate_error(0.0, -0.0);
        assert_eq!(report.percentage(), None);
    }

    #[test]
    fn negative_reference_uses_magnitude() {
        let report = evaluate_error(-1.1, -1.0);
        assert_relative_eq!(report.percentage().unwrap(), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn overflowing_ratio_is_undefined() {
        let report = evaluate_error(1.0, f64::MIN_POSITIVE / 1e10);
        assert_eq!(report.percentage(), None);
    }

    #[test]
    fn undefined_percentage_serializes_as_null() {
        let json = serde_json::to_value(evaluate_error(1.0, 0.0)).unwrap();
        assert!(json["percentage"].is_null());
        assert_eq!(json["absolute"], 1.0);
    }
}
