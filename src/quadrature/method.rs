use std::fmt;
use std::str::FromStr;

use serde::{
    Deserialize,
    Serialize
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    LeftRiemann,
    RightRiemann,
    Midpoint,
    Trapezoid,
    Simpson
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown quadrature method '{0}'")]
pub struct ParseMethodError(pub String);

impl Method {
    pub const ALL: [Method; 5] = [
        Method::LeftRiemann,
        Method::RightRiemann,
        Method::Midpoint,
        Method::Trapezoid,
        Method::Simpson
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Method::LeftRiemann => "left_riemann",
            Method::RightRiemann => "right_riemann",
            Method::Midpoint => "midpoint",
            Method::Trapezoid => "trapezoid",
            Method::Simpson => "simpson"
        }
    }

    pub fn requires_even_subdivisions(&self) -> bool {
        matches!(self, Method::Simpson)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Method {
    type Err = ParseMethodError;

    /// Accepts the snake_case name, ignoring case and with `-` or spaces
    /// in place of `_`.
    fn from_str(s: &str) -> Result<Method, ParseMethodError> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_lowercase() })
            .collect();
        match normalized.as_str() {
            "left_riemann" | "left" => Ok(Method::LeftRiemann),
            "right_riemann" | "right" => Ok(Method::RightRiemann),
            "midpoint" | "mid" => Ok(Method::Midpoint),
            "trapezoid" | "trapezoidal" => Ok(Method::Trapezoid),
            "simpson" => Ok(Method::Simpson),
            _ => Err(ParseMethodError(s.to_owned()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for method in Method::ALL {
            assert_eq!(method.name().parse::<Method>(), Ok(method));
        }
    }

    #[test]
    fn from_str_is_lenient_about_separators() {
        assert_eq!("Left-Riemann".parse::<Method>(), Ok(Method::LeftRiemann));
        assert_eq!("right riemann".parse::<Method>(), Ok(Method::RightRiemann));
        assert_eq!("boole".parse::<Method>(), Err(ParseMethodError("boole".into())));
    }

    #[test]
    fn serde_uses_snake_case() {
        let json = serde_json::to_string(&Method::LeftRiemann).unwrap();
        assert_eq!(json, "\"left_riemann\"");
        let method: Method = serde_json::from_str("\"simpson\"").unwrap();
        assert_eq!(method, Method::Simpson);
    }
}
