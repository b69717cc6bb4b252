//! Two-parameter logistic (2PL) item response model.
//!
//! P(correct | theta) = 1 / (1 + exp(-a * (theta + b)))
//!
//! `b` enters with a plus sign: the bank stores it in the orientation its
//! calibration produced, so larger `b` means an easier item.

use crate::math::logistic;

/// Probability of a correct response at ability `theta`.
#[inline]
pub fn p_correct(a: f64, b: f64, theta: f64) -> f64 {
    logistic(a * (theta + b))
}

/// Probability of an incorrect response at ability `theta`.
#[inline]
pub fn p_incorrect(a: f64, b: f64, theta: f64) -> f64 {
    1.0 - p_correct(a, b, theta)
}

/// Likelihood of the observed response.
#[inline]
pub fn likelihood(a: f64, b: f64, theta: f64, correct: bool) -> f64 {
    if correct {
        p_correct(a, b, theta)
    } else {
        p_incorrect(a, b, theta)
    }
}

/// Fisher information I(theta) = a² · p · (1 − p).
#[inline]
pub fn fisher_information(a: f64, b: f64, theta: f64) -> f64 {
    let p = p_correct(a, b, theta);
    a * a * p * (1.0 - p)
}
