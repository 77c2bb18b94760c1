use tracing::warn;

use crate::quadrature::method::Method;
use crate::quadrature::quadratureerror::ValidationError;

/// Checks the subdivision count against the rule's requirements before any
/// summation runs.
pub fn validate(n: usize, method: Method) -> Result<(), ValidationError> {
    if method.requires_even_subdivisions() && n % 2 != 0 {
        warn!(%method, n, "rejected odd subdivision count");
        return Err(ValidationError::OddSubdivisions { method, n });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simpson_needs_even_n() {
        assert!(validate(10, Method::Simpson).is_ok());
        assert_eq!(
            validate(5, Method::Simpson),
            Err(ValidationError::OddSubdivisions { method: Method::Simpson, n: 5 })
        );
    }

    #[test]
    fn other_methods_accept_any_n() {
        for method in [Method::LeftRiemann, Method::RightRiemann, Method::Midpoint, Method::Trapezoid] {
            assert!(validate(1, method).is_ok());
            assert!(validate(7, method).is_ok());
        }
    }

    #[test]
    fn message_names_the_method() {
        let err = validate(3, Method::Simpson).unwrap_err();
        assert_eq!(err.to_string(), "simpson requires an even number of subdivisions, got 3");
    }
}
