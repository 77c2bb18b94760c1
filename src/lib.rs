//! `quadlab` approximates definite integrals of a single-variable function
//! with the classical composite rules (left/right Riemann, midpoint,
//! trapezoid, Simpson), describes each approximation as plottable shapes,
//! and measures it against an adaptive Gauss-Kronrod reference value.

pub mod configuration;

pub mod expression {
    pub mod expression;
    pub mod parser;
    pub mod token;
}

pub mod integrand {
    pub mod integrand;
}

pub mod math {
    pub mod curve {
        pub mod curve;
        pub mod point2d;
        pub mod polynomial;
    }
    pub mod round;
}

pub mod quadrature {
    pub mod engine;
    pub mod errorevaluator;
    pub mod method;
    pub mod partition;
    pub mod plotprimitive;
    pub mod quadratureerror;
    pub mod validation;
}

pub mod reference {
    pub mod adaptive;
    pub mod gausskronrod;
}

pub mod study;
