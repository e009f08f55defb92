//! Distribution registry: the static table of supported distributions.
//!
//! Each distribution is registered once, with one or more parameterization
//! variants. A variant lists its parameter widgets and a transform from raw
//! widget values to the distribution's canonical arguments; the canonical
//! arguments are both the confirmed output and the input of the single shared
//! density function. Beta and Gamma declare an Intuitive variant that reuses
//! the Classic density through that transform.

use std::fmt;
use std::str::FromStr;

use crate::density::{self, DensityFn};
use crate::emitter::ParameterMap;
use crate::error::{GadgetError, Result};

/// Lower X bound used for Weibull plots; its density has a pole at 0 when shape < 1.
pub const WEIBULL_X_EPSILON: f64 = 1e-4;

/// Supported distributions, in UI order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DistributionId {
    Beta,
    Cauchy,
    ChiSquared,
    Exponential,
    Gamma,
    InverseGamma,
    LogNormal,
    Normal,
    StudentT,
    Weibull,
}

impl DistributionId {
    pub const ALL: [Self; 10] = [
        Self::Beta,
        Self::Cauchy,
        Self::ChiSquared,
        Self::Exponential,
        Self::Gamma,
        Self::InverseGamma,
        Self::LogNormal,
        Self::Normal,
        Self::StudentT,
        Self::Weibull,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beta => "Beta",
            Self::Cauchy => "Cauchy",
            Self::ChiSquared => "ChiSquared",
            Self::Exponential => "Exponential",
            Self::Gamma => "Gamma",
            Self::InverseGamma => "InverseGamma",
            Self::LogNormal => "LogNormal",
            Self::Normal => "Normal",
            Self::StudentT => "StudentT",
            Self::Weibull => "Weibull",
        }
    }

    /// Human-readable name for the distribution list.
    pub fn label(self) -> &'static str {
        match self {
            Self::Beta => "Beta",
            Self::Cauchy => "Cauchy",
            Self::ChiSquared => "Chi-squared",
            Self::Exponential => "Exponential",
            Self::Gamma => "Gamma",
            Self::InverseGamma => "Inverse gamma",
            Self::LogNormal => "Log-normal",
            Self::Normal => "Normal",
            Self::StudentT => "Student t",
            Self::Weibull => "Weibull",
        }
    }
}

impl fmt::Display for DistributionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DistributionId {
    type Err = GadgetError;

    /// Case-insensitive; spaces, `-` and `_` are ignored ("chi-squared", "student_t").
    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        let id = match key.as_str() {
            "beta" => Self::Beta,
            "cauchy" => Self::Cauchy,
            "chisquared" | "chisq" => Self::ChiSquared,
            "exponential" | "exp" => Self::Exponential,
            "gamma" => Self::Gamma,
            "inversegamma" | "invgamma" => Self::InverseGamma,
            "lognormal" | "lnorm" => Self::LogNormal,
            "normal" | "gaussian" => Self::Normal,
            "studentt" | "t" => Self::StudentT,
            "weibull" | "expweibull" => Self::Weibull,
            _ => return Err(GadgetError::UnknownDistribution(s.to_string())),
        };
        Ok(id)
    }
}

/// Parameterization variant of a distribution.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameterization {
    #[default]
    Classic,
    Intuitive,
}

impl Parameterization {
    pub const ALL: [Self; 2] = [Self::Classic, Self::Intuitive];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Classic => "Classic",
            Self::Intuitive => "Intuitive",
        }
    }
}

impl fmt::Display for Parameterization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Parameterization {
    type Err = GadgetError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "classic" => Ok(Self::Classic),
            "intuitive" => Ok(Self::Intuitive),
            _ => Err(GadgetError::UnknownParameterization(s.to_string())),
        }
    }
}

/// One user-adjustable numeric input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSpec {
    /// Internal key, unique within a variant.
    pub name: &'static str,
    /// Display label; may contain a symbol.
    pub label: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ParameterSpec {
    const fn new(
        name: &'static str,
        label: &'static str,
        min: f64,
        max: f64,
        step: f64,
        default: f64,
    ) -> Self {
        Self {
            name,
            label,
            min,
            max,
            step,
            default,
        }
    }

    /// True when `value` lies in `[min, max]` (NaN never does).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Move `value` by `steps` increments, clamped to `[min, max]`.
    /// The result is snapped to the step grid anchored at `min`.
    pub fn step_by(&self, value: f64, steps: i32) -> f64 {
        let moved = value + self.step * steps as f64;
        let snapped = self.min + ((moved - self.min) / self.step).round() * self.step;
        snapped.clamp(self.min, self.max)
    }
}

type CanonicalFn = fn(&[f64]) -> Vec<f64>;

struct Variant {
    parameterization: Parameterization,
    parameters: &'static [ParameterSpec],
    canonical: CanonicalFn,
}

struct Entry {
    id: DistributionId,
    title_name: &'static str,
    variants: &'static [Variant],
    output_names: &'static [&'static str],
    density: DensityFn,
    default_x_range: (f64, f64),
    default_y_range: Option<(f64, f64)>,
    custom_x_limits: bool,
    custom_y_limit: bool,
    sample_count: usize,
}

fn identity(raw: &[f64]) -> Vec<f64> {
    raw.to_vec()
}

/// (expectation μ, precision φ) → (shape1 = μφ, shape2 = (1 − μ)φ)
fn beta_from_mean_precision(raw: &[f64]) -> Vec<f64> {
    match *raw {
        [mu, phi] => vec![mu * phi, (1.0 - mu) * phi],
        _ => Vec::new(),
    }
}

/// (shape, rate) → (shape, scale = 1/rate)
fn gamma_from_rate(raw: &[f64]) -> Vec<f64> {
    match *raw {
        [shape, rate] => vec![shape, 1.0 / rate],
        _ => Vec::new(),
    }
}

const BETA_CLASSIC: &[ParameterSpec] = &[
    ParameterSpec::new("a", "α", 0.1, 10.0, 0.1, 1.5),
    ParameterSpec::new("b", "β", 0.1, 10.0, 0.1, 1.5),
];
const BETA_INTUITIVE: &[ParameterSpec] = &[
    ParameterSpec::new("expectation", "μ", 0.01, 0.99, 0.01, 0.5),
    ParameterSpec::new("precision", "φ", 0.1, 50.0, 0.1, 3.0),
];
const GAMMA_CLASSIC: &[ParameterSpec] = &[
    ParameterSpec::new("shape", "k", 0.1, 20.0, 0.1, 2.0),
    ParameterSpec::new("scale", "θ", 0.1, 10.0, 0.1, 1.0),
];
const GAMMA_INTUITIVE: &[ParameterSpec] = &[
    ParameterSpec::new("shape", "k", 0.1, 20.0, 0.1, 2.0),
    ParameterSpec::new("rate", "β", 0.1, 10.0, 0.1, 1.0),
];

static REGISTRY: [Entry; 10] = [
    Entry {
        id: DistributionId::Beta,
        title_name: "Beta",
        variants: &[
            Variant {
                parameterization: Parameterization::Classic,
                parameters: BETA_CLASSIC,
                canonical: identity,
            },
            Variant {
                parameterization: Parameterization::Intuitive,
                parameters: BETA_INTUITIVE,
                canonical: beta_from_mean_precision,
            },
        ],
        output_names: &["shape1", "shape2"],
        density: density::beta,
        default_x_range: (0.0, 1.0),
        default_y_range: None,
        custom_x_limits: false,
        custom_y_limit: false,
        sample_count: 201,
    },
    Entry {
        id: DistributionId::Cauchy,
        title_name: "Cauchy",
        variants: &[Variant {
            parameterization: Parameterization::Classic,
            parameters: &[
                ParameterSpec::new("location", "x₀", -5.0, 5.0, 0.1, 0.0),
                ParameterSpec::new("scale", "γ", 0.1, 5.0, 0.1, 1.0),
            ],
            canonical: identity,
        }],
        output_names: &["location", "scale"],
        density: density::cauchy,
        default_x_range: (-10.0, 10.0),
        default_y_range: None,
        custom_x_limits: true,
        custom_y_limit: false,
        sample_count: 401,
    },
    Entry {
        id: DistributionId::ChiSquared,
        title_name: "ChiSquared",
        variants: &[Variant {
            parameterization: Parameterization::Classic,
            parameters: &[ParameterSpec::new("df", "k", 0.5, 30.0, 0.5, 3.0)],
            canonical: identity,
        }],
        output_names: &["df"],
        density: density::chi_squared,
        default_x_range: (0.0, 20.0),
        default_y_range: None,
        custom_x_limits: true,
        custom_y_limit: false,
        sample_count: 401,
    },
    Entry {
        id: DistributionId::Exponential,
        title_name: "Exponential",
        variants: &[Variant {
            parameterization: Parameterization::Classic,
            parameters: &[ParameterSpec::new("rate", "λ", 0.1, 5.0, 0.1, 1.0)],
            canonical: identity,
        }],
        output_names: &["rate"],
        density: density::exponential,
        default_x_range: (0.0, 10.0),
        default_y_range: None,
        custom_x_limits: true,
        custom_y_limit: false,
        sample_count: 201,
    },
    Entry {
        id: DistributionId::Gamma,
        title_name: "Gamma",
        variants: &[
            Variant {
                parameterization: Parameterization::Classic,
                parameters: GAMMA_CLASSIC,
                canonical: identity,
            },
            Variant {
                parameterization: Parameterization::Intuitive,
                parameters: GAMMA_INTUITIVE,
                canonical: gamma_from_rate,
            },
        ],
        output_names: &["shape", "scale"],
        density: density::gamma,
        default_x_range: (0.0, 20.0),
        default_y_range: None,
        custom_x_limits: true,
        custom_y_limit: false,
        sample_count: 401,
    },
    Entry {
        id: DistributionId::InverseGamma,
        title_name: "InverseGamma",
        variants: &[Variant {
            parameterization: Parameterization::Classic,
            parameters: &[
                ParameterSpec::new("shape", "α", 0.1, 20.0, 0.1, 3.0),
                ParameterSpec::new("scale", "β", 0.1, 10.0, 0.1, 1.0),
            ],
            canonical: identity,
        }],
        output_names: &["shape", "scale"],
        density: density::inverse_gamma,
        default_x_range: (0.0, 5.0),
        default_y_range: None,
        custom_x_limits: true,
        custom_y_limit: false,
        sample_count: 401,
    },
    Entry {
        id: DistributionId::LogNormal,
        title_name: "LogNormal",
        variants: &[Variant {
            parameterization: Parameterization::Classic,
            parameters: &[
                ParameterSpec::new("meanlog", "μ", -3.0, 3.0, 0.1, 0.0),
                ParameterSpec::new("sdlog", "σ", 0.1, 3.0, 0.1, 1.0),
            ],
            canonical: identity,
        }],
        output_names: &["meanlog", "sdlog"],
        density: density::log_normal,
        default_x_range: (0.0, 10.0),
        default_y_range: None,
        custom_x_limits: true,
        custom_y_limit: false,
        sample_count: 401,
    },
    Entry {
        id: DistributionId::Normal,
        title_name: "Normal",
        variants: &[Variant {
            parameterization: Parameterization::Classic,
            parameters: &[
                ParameterSpec::new("mean", "μ", -5.0, 5.0, 0.1, 0.0),
                ParameterSpec::new("sd", "σ", 0.1, 5.0, 0.1, 1.0),
            ],
            canonical: identity,
        }],
        output_names: &["mean", "std.dev"],
        density: density::normal,
        default_x_range: (-5.0, 5.0),
        default_y_range: None,
        custom_x_limits: true,
        custom_y_limit: false,
        sample_count: 201,
    },
    Entry {
        id: DistributionId::StudentT,
        title_name: "StudentT",
        variants: &[Variant {
            parameterization: Parameterization::Classic,
            parameters: &[ParameterSpec::new("df", "ν", 1.0, 100.0, 1.0, 3.0)],
            canonical: identity,
        }],
        output_names: &["df"],
        density: density::student_t,
        default_x_range: (-5.0, 5.0),
        default_y_range: Some((0.0, 0.5)),
        custom_x_limits: true,
        custom_y_limit: true,
        sample_count: 401,
    },
    Entry {
        id: DistributionId::Weibull,
        title_name: "ExpWeibull",
        variants: &[Variant {
            parameterization: Parameterization::Classic,
            parameters: &[
                ParameterSpec::new("scale", "λ", 0.1, 10.0, 0.1, 1.0),
                ParameterSpec::new("shape1", "k", 0.1, 10.0, 0.1, 2.0),
                ParameterSpec::new("shape2", "α", 0.1, 10.0, 0.1, 1.0),
            ],
            canonical: identity,
        }],
        output_names: &["scale", "shape1", "shape2"],
        density: density::exp_weibull,
        default_x_range: (WEIBULL_X_EPSILON, 5.0),
        default_y_range: Some((0.0, 2.0)),
        custom_x_limits: true,
        custom_y_limit: true,
        sample_count: 401,
    },
];

fn entry(id: DistributionId) -> &'static Entry {
    // REGISTRY is laid out in DistributionId::ALL order
    &REGISTRY[id as usize]
}

/// Specification of one distribution under one parameterization.
#[derive(Clone, Copy)]
pub struct DistributionSpec {
    entry: &'static Entry,
    variant: &'static Variant,
}

impl fmt::Debug for DistributionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DistributionSpec")
            .field("id", &self.id())
            .field("parameterization", &self.parameterization())
            .finish()
    }
}

impl PartialEq for DistributionSpec {
    fn eq(&self, other: &Self) -> bool {
        self.id() == other.id() && self.parameterization() == other.parameterization()
    }
}

impl DistributionSpec {
    pub fn id(&self) -> DistributionId {
        self.entry.id
    }

    pub fn parameterization(&self) -> Parameterization {
        self.variant.parameterization
    }

    /// Variants declared for this distribution, in UI order.
    pub fn parameterizations(&self) -> impl Iterator<Item = Parameterization> {
        self.entry.variants.iter().map(|v| v.parameterization)
    }

    pub fn supports_parameterization(&self, parameterization: Parameterization) -> bool {
        self.parameterizations().any(|p| p == parameterization)
    }

    /// The parameterization selector is only offered when there is a choice.
    pub fn supports_parameterization_choice(&self) -> bool {
        self.entry.variants.len() > 1
    }

    pub fn parameters(&self) -> &'static [ParameterSpec] {
        self.variant.parameters
    }

    pub fn parameter(&self, name: &str) -> Option<&'static ParameterSpec> {
        self.variant.parameters.iter().find(|p| p.name == name)
    }

    pub fn default_values(&self) -> Vec<f64> {
        self.variant.parameters.iter().map(|p| p.default).collect()
    }

    pub fn default_x_range(&self) -> (f64, f64) {
        self.entry.default_x_range
    }

    pub fn default_y_range(&self) -> Option<(f64, f64)> {
        self.entry.default_y_range
    }

    pub fn supports_custom_x_limits(&self) -> bool {
        self.entry.custom_x_limits
    }

    pub fn supports_custom_y_limit(&self) -> bool {
        self.entry.custom_y_limit
    }

    /// Number of points the preview curve is sampled at.
    pub fn sample_count(&self) -> usize {
        self.entry.sample_count
    }

    /// Name used in the plot title ("ExpWeibull" for Weibull).
    pub fn title_name(&self) -> &'static str {
        self.entry.title_name
    }

    pub fn output_names(&self) -> &'static [&'static str] {
        self.entry.output_names
    }

    /// Canonical density arguments for raw widget values, in output order.
    /// Empty when `raw` does not have one value per parameter.
    pub fn canonical(&self, raw: &[f64]) -> Vec<f64> {
        if raw.len() != self.variant.parameters.len() {
            return Vec::new();
        }
        (self.variant.canonical)(raw)
    }

    /// Density at `x` for raw widget values; see [`crate::density`] for
    /// out-of-domain behavior. NaN when `raw` has the wrong length.
    pub fn density(&self, x: f64, raw: &[f64]) -> f64 {
        (self.entry.density)(x, &self.canonical(raw))
    }

    /// Canonical density function and arguments, for repeated evaluation.
    pub(crate) fn density_with(&self, raw: &[f64]) -> (DensityFn, Vec<f64>) {
        (self.entry.density, self.canonical(raw))
    }

    /// Map raw widget values to the distribution's output names.
    pub fn output_mapping(&self, raw: &[f64]) -> ParameterMap {
        self.entry
            .output_names
            .iter()
            .copied()
            .zip(self.canonical(raw))
            .collect()
    }

    /// Plot title, e.g. `x ~ Beta(1.50,1.50)`.
    pub fn title(&self, raw: &[f64]) -> String {
        let values: Vec<String> = raw.iter().map(|v| format!("{:.2}", v)).collect();
        format!("x ~ {}({})", self.entry.title_name, values.join(","))
    }
}

/// All registered distributions, in UI order.
pub fn list_distributions() -> &'static [DistributionId] {
    &DistributionId::ALL
}

/// Spec for `id` under `parameterization`.
pub fn get_spec(id: DistributionId, parameterization: Parameterization) -> Result<DistributionSpec> {
    let entry = entry(id);
    entry
        .variants
        .iter()
        .find(|v| v.parameterization == parameterization)
        .map(|variant| DistributionSpec { entry, variant })
        .ok_or_else(|| GadgetError::UnknownParameterization(parameterization.to_string()))
}

/// Spec for `id` under its first declared variant.
pub fn default_spec(id: DistributionId) -> DistributionSpec {
    let entry = entry(id);
    DistributionSpec {
        entry,
        variant: &entry.variants[0],
    }
}

/// Spec lookup by names, as a host passes them.
pub fn lookup(distribution: &str, parameterization: &str) -> Result<DistributionSpec> {
    let id: DistributionId = distribution.parse()?;
    let parameterization: Parameterization = parameterization.parse()?;
    get_spec(id, parameterization)
}

/// Density of `id`/`parameterization` at `x` for raw widget values.
pub fn density(
    id: DistributionId,
    parameterization: Parameterization,
    x: f64,
    raw: &[f64],
) -> Result<f64> {
    let spec = get_spec(id, parameterization)?;
    let expected = spec.parameters().len();
    if raw.len() > expected {
        return Err(GadgetError::TooManyValues {
            distribution: id,
            expected,
            got: raw.len(),
        });
    }
    if let Some(missing) = spec.parameters().get(raw.len()) {
        return Err(GadgetError::IncompleteSelection(missing.name.to_string()));
    }
    Ok(spec.density(x, raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_matches_ids() {
        for (i, id) in DistributionId::ALL.iter().enumerate() {
            assert_eq!(REGISTRY[i].id, *id);
        }
        assert_eq!(list_distributions().len(), 10);
    }

    #[test]
    fn every_variant_has_valid_defaults() {
        for entry in REGISTRY.iter() {
            assert!(!entry.variants.is_empty());
            assert_eq!(entry.variants[0].parameterization, Parameterization::Classic);
            for variant in entry.variants {
                assert!(!variant.parameters.is_empty());
                for p in variant.parameters {
                    assert!(p.min < p.max, "{}: {} has empty range", entry.id, p.name);
                    assert!(p.contains(p.default), "{}: {} default", entry.id, p.name);
                    assert!(p.step > 0.0);
                }
                let defaults: Vec<f64> = variant.parameters.iter().map(|p| p.default).collect();
                assert_eq!((variant.canonical)(&defaults).len(), entry.output_names.len());
            }
        }
    }

    #[test]
    fn parse_names_and_aliases() {
        assert_eq!("beta".parse::<DistributionId>(), Ok(DistributionId::Beta));
        assert_eq!(
            "Chi-squared".parse::<DistributionId>(),
            Ok(DistributionId::ChiSquared)
        );
        assert_eq!("student_t".parse::<DistributionId>(), Ok(DistributionId::StudentT));
        assert_eq!("t".parse::<DistributionId>(), Ok(DistributionId::StudentT));
        assert_eq!(
            "poisson".parse::<DistributionId>(),
            Err(GadgetError::UnknownDistribution("poisson".to_string()))
        );
        assert_eq!(
            "Intuitive".parse::<Parameterization>(),
            Ok(Parameterization::Intuitive)
        );
        assert!(matches!(
            "natural".parse::<Parameterization>(),
            Err(GadgetError::UnknownParameterization(_))
        ));
    }

    #[test]
    fn step_by_clamps_and_snaps() {
        let p = ParameterSpec::new("a", "α", 0.1, 10.0, 0.1, 1.5);
        assert!((p.step_by(1.5, 1) - 1.6).abs() < 1e-9);
        assert!((p.step_by(1.5, -10) - 0.5).abs() < 1e-9);
        assert_eq!(p.step_by(9.95, 10), 10.0);
        assert_eq!(p.step_by(0.2, -5), 0.1);
    }

    #[test]
    fn title_formats_two_decimals() {
        let beta = get_spec(DistributionId::Beta, Parameterization::Classic).unwrap();
        assert_eq!(beta.title(&beta.default_values()), "x ~ Beta(1.50,1.50)");
        let weibull = default_spec(DistributionId::Weibull);
        assert_eq!(
            weibull.title(&weibull.default_values()),
            "x ~ ExpWeibull(1.00,2.00,1.00)"
        );
    }

    #[test]
    fn canonical_rejects_wrong_length() {
        let normal = default_spec(DistributionId::Normal);
        assert!(normal.canonical(&[0.0]).is_empty());
        assert!(normal.density(0.0, &[0.0]).is_nan());
    }
}
