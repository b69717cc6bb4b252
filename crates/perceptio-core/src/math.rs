//! Math functions for no_std compatibility.
//!
//! In no_std mode, f64 doesn't have transcendental methods like sqrt or exp.
//! This module provides them using libm, plus the handful of closed forms the
//! 2PL model needs.

use core::f64::consts::PI;

/// Square root.
#[inline]
pub fn sqrt(x: f64) -> f64 {
    libm::sqrt(x)
}

/// Exponential (e^x).
#[inline]
pub fn exp(x: f64) -> f64 {
    libm::exp(x)
}

/// Round to nearest integer, half away from zero.
#[inline]
pub fn round(x: f64) -> f64 {
    libm::round(x)
}

/// Power (x^y).
#[inline]
pub fn pow(x: f64, y: f64) -> f64 {
    libm::pow(x, y)
}

/// Absolute value.
#[inline]
pub fn abs(x: f64) -> f64 {
    libm::fabs(x)
}

/// Square (x^2).
#[inline]
pub fn sq(x: f64) -> f64 {
    x * x
}

/// Logistic function 1 / (1 + e^(-x)).
#[inline]
pub fn logistic(x: f64) -> f64 {
    1.0 / (1.0 + exp(-x))
}

/// Normal density N(x; mean, std_dev).
#[inline]
pub fn normal_pdf(x: f64, mean: f64, std_dev: f64) -> f64 {
    let z = (x - mean) / std_dev;
    exp(-0.5 * z * z) / (sqrt(2.0 * PI) * std_dev)
}

/// Round `x` to `decimals` decimal places.
///
/// `round_to(0.1 - 0.01, 2)` is exactly `0.09`.
#[inline]
pub fn round_to(x: f64, decimals: u32) -> f64 {
    let scale = pow(10.0, decimals as f64);
    round(x * scale) / scale
}

/// `num` evenly spaced points over `[start, stop]`, endpoints included.
pub fn linspace(start: f64, stop: f64, num: usize) -> alloc::vec::Vec<f64> {
    match num {
        0 => alloc::vec::Vec::new(),
        1 => alloc::vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            (0..num).map(|i| start + i as f64 * step).collect()
        }
    }
}
