//! Density functions for the registered distributions.
//!
//! Every function takes `x` and the distribution's canonical arguments (the
//! values its output mapping produces, in the same order) and delegates to
//! `statrs`, except the exponentiated Weibull which `statrs` does not provide.
//!
//! Out-of-domain behavior, per distribution:
//!
//! | Distribution | Arguments | Support | Outside support | Invalid arguments |
//! |---|---|---|---|---|
//! | Beta | shape1, shape2 > 0 | [0, 1] | 0 | NaN |
//! | Cauchy | location, scale > 0 | (−∞, ∞) | - | NaN |
//! | ChiSquared | df > 0 | [0, ∞) | 0 | NaN |
//! | Exponential | rate > 0 | [0, ∞) | 0 | NaN |
//! | Gamma | shape > 0, scale > 0 | [0, ∞) | 0 | NaN |
//! | InverseGamma | shape > 0, scale > 0 | (0, ∞) | 0 | NaN |
//! | LogNormal | meanlog, sdlog > 0 | (0, ∞) | 0 | NaN |
//! | Normal | mean, std.dev > 0 | (−∞, ∞) | - | NaN |
//! | StudentT | df > 0 | (−∞, ∞) | - | NaN |
//! | ExpWeibull | scale, shape1, shape2 > 0 | [0, ∞) | 0 | NaN |
//!
//! Shapes below one put a pole at the support boundary (Beta at 0/1, Gamma,
//! ChiSquared with df < 2, ExpWeibull at 0); the density there is +∞.
//! A wrong number of arguments yields NaN.

use statrs::distribution::{
    Beta, Cauchy, ChiSquared, Continuous, Exp, Gamma, InverseGamma, LogNormal, Normal, StudentsT,
};

/// Density function over canonical arguments.
pub type DensityFn = fn(f64, &[f64]) -> f64;

pub fn beta(x: f64, args: &[f64]) -> f64 {
    let &[shape1, shape2] = args else {
        return f64::NAN;
    };
    Beta::new(shape1, shape2)
        .map(|d| d.pdf(x))
        .unwrap_or(f64::NAN)
}

pub fn cauchy(x: f64, args: &[f64]) -> f64 {
    let &[location, scale] = args else {
        return f64::NAN;
    };
    Cauchy::new(location, scale)
        .map(|d| d.pdf(x))
        .unwrap_or(f64::NAN)
}

pub fn chi_squared(x: f64, args: &[f64]) -> f64 {
    let &[df] = args else {
        return f64::NAN;
    };
    ChiSquared::new(df).map(|d| d.pdf(x)).unwrap_or(f64::NAN)
}

pub fn exponential(x: f64, args: &[f64]) -> f64 {
    let &[rate] = args else {
        return f64::NAN;
    };
    Exp::new(rate).map(|d| d.pdf(x)).unwrap_or(f64::NAN)
}

/// Gamma with shape and scale (statrs is parameterized by rate = 1/scale).
pub fn gamma(x: f64, args: &[f64]) -> f64 {
    let &[shape, scale] = args else {
        return f64::NAN;
    };
    if scale.is_nan() || scale <= 0.0 {
        return f64::NAN;
    }
    Gamma::new(shape, 1.0 / scale)
        .map(|d| d.pdf(x))
        .unwrap_or(f64::NAN)
}

/// Inverse gamma with shape α and scale β: β^α / Γ(α) · x^(−α−1) · e^(−β/x).
pub fn inverse_gamma(x: f64, args: &[f64]) -> f64 {
    let &[shape, scale] = args else {
        return f64::NAN;
    };
    // statrs calls β the "rate" of the inverse gamma.
    let Ok(d) = InverseGamma::new(shape, scale) else {
        return f64::NAN;
    };
    if x <= 0.0 {
        return 0.0;
    }
    d.pdf(x)
}

pub fn log_normal(x: f64, args: &[f64]) -> f64 {
    let &[meanlog, sdlog] = args else {
        return f64::NAN;
    };
    LogNormal::new(meanlog, sdlog)
        .map(|d| d.pdf(x))
        .unwrap_or(f64::NAN)
}

pub fn normal(x: f64, args: &[f64]) -> f64 {
    let &[mean, std_dev] = args else {
        return f64::NAN;
    };
    Normal::new(mean, std_dev)
        .map(|d| d.pdf(x))
        .unwrap_or(f64::NAN)
}

/// Standard (location 0, scale 1) Student's t.
pub fn student_t(x: f64, args: &[f64]) -> f64 {
    let &[df] = args else {
        return f64::NAN;
    };
    StudentsT::new(0.0, 1.0, df)
        .map(|d| d.pdf(x))
        .unwrap_or(f64::NAN)
}

/// Exponentiated Weibull with scale λ, shape k and exponent α:
///
/// f(x) = α · (k/λ) · (x/λ)^(k−1) · e^(−(x/λ)^k) · (1 − e^(−(x/λ)^k))^(α−1), x > 0.
///
/// With α = 1 this is exactly the Weibull(k, λ) density. Evaluated in log
/// space; at x = 0 the density behaves like (α·k/λ)·(x/λ)^(α·k−1).
pub fn exp_weibull(x: f64, args: &[f64]) -> f64 {
    let &[scale, shape, exponent] = args else {
        return f64::NAN;
    };
    let valid = |v: f64| v.is_finite() && v > 0.0;
    if !(valid(scale) && valid(shape) && valid(exponent)) || x.is_nan() {
        return f64::NAN;
    }
    if x < 0.0 || x.is_infinite() {
        return 0.0;
    }
    if x == 0.0 {
        let order = exponent * shape - 1.0;
        return if order > 0.0 {
            0.0
        } else if order == 0.0 {
            exponent * shape / scale
        } else {
            f64::INFINITY
        };
    }

    let z = x / scale;
    let zk = z.powf(shape);
    // ln(1 - e^(-zk)) without cancellation for small zk
    let ln_cdf_base = (-(-zk).exp_m1()).ln();
    let ln_pdf = exponent.ln() + shape.ln() - scale.ln() + (shape - 1.0) * z.ln() - zk
        + (exponent - 1.0) * ln_cdf_base;
    ln_pdf.exp()
}
