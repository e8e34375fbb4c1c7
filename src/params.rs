//! Estimation parameters
//!
//! Parameters arrive from a form layer as loosely validated numbers. They are
//! never rejected: [`EstimationParams::resolve`] clamps out-of-range values and
//! replaces non-finite ones with the documented defaults below, logging a
//! warning for every substitution.
//!
//! # Defaults
//!
//! | Input | Valid range | Fallback |
//! |---|---|---|
//! | density | `> 0` g/cm³ | [`PLA_DENSITY_G_PER_CM3`] |
//! | infill | `[0, 1]` (or `[0, 100]` %) | [`DEFAULT_INFILL_PERCENT`] |
//! | shell factor | `[0, 1]` | [`DEFAULT_SHELL_FACTOR`] |
//! | rates, fees, hours, margin | `>= 0` | `0` |

use tracing::warn;

/// Density of PLA in g/cm³, the default material
pub const PLA_DENSITY_G_PER_CM3: f64 = 1.24;

/// Density of PETG in g/cm³
pub const PETG_DENSITY_G_PER_CM3: f64 = 1.27;

/// Density of ABS in g/cm³
pub const ABS_DENSITY_G_PER_CM3: f64 = 1.04;

/// Infill used when the input is not a finite number
pub const DEFAULT_INFILL_PERCENT: f64 = 20.0;

/// Always-solid fraction used when the input is not a finite number
pub const DEFAULT_SHELL_FACTOR: f64 = 0.35;

/// Solid fraction contributed by each perimeter
pub const SHELL_FACTOR_PER_PERIMETER: f64 = 0.05;

/// Upper bound of a perimeter-derived shell factor
pub const MAX_PERIMETER_SHELL_FACTOR: f64 = 0.4;

/// Markup applied by the storefront preset
pub const DEFAULT_MARGIN_FRACTION: f64 = 0.25;

/// Filament material, selecting a density
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Material {
    /// Polylactic acid
    #[default]
    Pla,
    /// Polyethylene terephthalate glycol
    Petg,
    /// Acrylonitrile butadiene styrene
    Abs,
    /// Any other material with an operator-supplied density
    Custom {
        /// Density in g/cm³
        density_g_per_cm3: f64,
    },
}

impl Material {
    /// Look up a material by its common name (`"PLA"`, `"PETG"`, `"ABS"`)
    ///
    /// Matching is case-insensitive.
    ///
    /// # Example
    /// ```
    /// use printquote::Material;
    ///
    /// assert_eq!(Material::from_name("petg"), Some(Material::Petg));
    /// assert_eq!(Material::from_name("nylon"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_uppercase().as_str() {
            "PLA" => Some(Material::Pla),
            "PETG" => Some(Material::Petg),
            "ABS" => Some(Material::Abs),
            _ => None,
        }
    }

    /// Human-readable name
    pub fn as_str(&self) -> &'static str {
        match self {
            Material::Pla => "PLA",
            Material::Petg => "PETG",
            Material::Abs => "ABS",
            Material::Custom { .. } => "Custom",
        }
    }

    /// Density in g/cm³ as configured, before validation
    pub fn density(&self) -> f64 {
        match self {
            Material::Pla => PLA_DENSITY_G_PER_CM3,
            Material::Petg => PETG_DENSITY_G_PER_CM3,
            Material::Abs => ABS_DENSITY_G_PER_CM3,
            Material::Custom { density_g_per_cm3 } => *density_g_per_cm3,
        }
    }

    fn resolved_density(&self) -> f64 {
        let density = self.density();
        if density.is_finite() && density > 0.0 {
            density
        } else {
            warn!(
                "Invalid density {} g/cm³, falling back to PLA ({} g/cm³)",
                density, PLA_DENSITY_G_PER_CM3
            );
            PLA_DENSITY_G_PER_CM3
        }
    }
}

/// Interior fill density
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Infill {
    /// Percentage in `[0, 100]`
    Percent(f64),
    /// Fraction in `[0, 1]`
    Fraction(f64),
}

impl Default for Infill {
    fn default() -> Self {
        Infill::Percent(DEFAULT_INFILL_PERCENT)
    }
}

impl Infill {
    /// Infill as a fraction clamped to `[0, 1]`
    ///
    /// # Example
    /// ```
    /// use printquote::Infill;
    ///
    /// assert_eq!(Infill::Percent(150.0).fraction(), 1.0);
    /// assert_eq!(Infill::Percent(-10.0).fraction(), 0.0);
    /// assert_eq!(Infill::Fraction(0.2).fraction(), 0.2);
    /// ```
    pub fn fraction(&self) -> f64 {
        let raw = match *self {
            Infill::Percent(p) => p / 100.0,
            Infill::Fraction(f) => f,
        };
        if !raw.is_finite() {
            warn!(
                "Invalid infill {:?}, falling back to {}%",
                self, DEFAULT_INFILL_PERCENT
            );
            return DEFAULT_INFILL_PERCENT / 100.0;
        }
        clamp_unit(raw, "infill")
    }
}

/// Portion of the volume treated as always solid because of perimeter walls
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ShellFactor {
    /// Fraction in `[0, 1]`
    Fraction(f64),
    /// Derived from a perimeter count: `min(n * 0.05, 0.4)`
    Perimeters(u32),
}

impl Default for ShellFactor {
    fn default() -> Self {
        ShellFactor::Fraction(DEFAULT_SHELL_FACTOR)
    }
}

impl ShellFactor {
    /// Shell factor clamped to `[0, 1]`
    pub fn fraction(&self) -> f64 {
        match *self {
            ShellFactor::Fraction(f) if !f.is_finite() => {
                warn!(
                    "Invalid shell factor {}, falling back to {}",
                    f, DEFAULT_SHELL_FACTOR
                );
                DEFAULT_SHELL_FACTOR
            }
            ShellFactor::Fraction(f) => clamp_unit(f, "shell factor"),
            ShellFactor::Perimeters(n) => {
                (f64::from(n) * SHELL_FACTOR_PER_PERIMETER).min(MAX_PERIMETER_SHELL_FACTOR)
            }
        }
    }
}

/// Material cost rate
///
/// Price per gram is the canonical unit; per-kilogram prices are divided by 1000.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum MaterialRate {
    /// Price per gram of filament
    PerGram(f64),
    /// Price per kilogram of filament
    PerKilogram(f64),
}

impl Default for MaterialRate {
    fn default() -> Self {
        MaterialRate::PerKilogram(0.0)
    }
}

impl MaterialRate {
    /// Price per gram, non-negative
    pub fn per_gram(&self) -> f64 {
        match *self {
            MaterialRate::PerGram(price) => non_negative(price, "price per gram"),
            MaterialRate::PerKilogram(price) => non_negative(price, "price per kg") / 1000.0,
        }
    }
}

/// How machine time is priced
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimeMode {
    /// No time estimate and no time cost
    #[default]
    None,
    /// Operator-supplied print duration; authoritative when present
    Explicit {
        /// Print duration in hours
        hours: f64,
        /// Price per hour of machine time
        hourly_rate: f64,
    },
    /// Rough estimate from geometry alone
    Derived {
        /// Number of perimeters, which slows printing down
        perimeters: u32,
        /// Price per hour of machine time
        hourly_rate: f64,
    },
}

/// Markup applied on top of material and time cost
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Markup {
    /// Total equals subtotal
    #[default]
    None,
    /// Fixed fee added to the subtotal
    ServiceFee(f64),
    /// Proportional markup, e.g. `0.25` for 25 %
    Margin(f64),
    /// Fixed fee plus proportional markup on the subtotal
    FeeAndMargin {
        /// Fixed fee
        fee: f64,
        /// Proportional markup
        margin: f64,
    },
}

/// User-tunable estimation parameters
///
/// # Example
///
/// ```
/// use printquote::{EstimationParams, Infill, Markup, Material, MaterialRate};
///
/// let params = EstimationParams::new()
///     .with_material(Material::Petg)
///     .with_infill(Infill::Percent(15.0))
///     .with_material_rate(MaterialRate::PerKilogram(28.0))
///     .with_markup(Markup::ServiceFee(2.5));
///
/// let resolved = params.resolve();
/// assert_eq!(resolved.density_g_per_cm3, 1.27);
/// assert_eq!(resolved.infill_fraction, 0.15);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EstimationParams {
    /// Material, selecting the density
    pub material: Material,
    /// Interior fill density
    pub infill: Infill,
    /// Always-solid wall fraction
    pub shell: ShellFactor,
    /// Material cost rate
    pub material_rate: MaterialRate,
    /// Time pricing mode
    pub time: TimeMode,
    /// Markup strategy
    pub markup: Markup,
}

impl EstimationParams {
    /// Create parameters with PLA, 20 % infill, 0.35 shell factor and no pricing
    pub fn new() -> Self {
        Self::default()
    }

    /// Quote page with per-kilogram material price, operator-entered print
    /// hours and a 25 % margin
    pub fn storefront() -> Self {
        Self {
            material: Material::Pla,
            infill: Infill::Percent(DEFAULT_INFILL_PERCENT),
            shell: ShellFactor::Fraction(0.35),
            material_rate: MaterialRate::PerKilogram(0.0),
            time: TimeMode::Explicit {
                hours: 0.0,
                hourly_rate: 0.0,
            },
            markup: Markup::Margin(DEFAULT_MARGIN_FRACTION),
        }
    }

    /// Workshop page with a per-gram price and a fixed service fee
    pub fn workshop() -> Self {
        Self {
            material: Material::Pla,
            infill: Infill::Percent(DEFAULT_INFILL_PERCENT),
            shell: ShellFactor::Fraction(0.3),
            material_rate: MaterialRate::PerGram(0.18),
            time: TimeMode::None,
            markup: Markup::ServiceFee(0.0),
        }
    }

    /// Color planner page: shell factor and print time derived from the
    /// perimeter count, material priced per color spool
    pub fn planner(perimeters: u32) -> Self {
        Self {
            material: Material::Pla,
            infill: Infill::Percent(DEFAULT_INFILL_PERCENT),
            shell: ShellFactor::Perimeters(perimeters),
            material_rate: MaterialRate::PerKilogram(22.0),
            time: TimeMode::Derived {
                perimeters,
                hourly_rate: 0.0,
            },
            markup: Markup::None,
        }
    }

    /// Set the material
    pub fn with_material(mut self, material: Material) -> Self {
        self.material = material;
        self
    }

    /// Set the infill
    pub fn with_infill(mut self, infill: Infill) -> Self {
        self.infill = infill;
        self
    }

    /// Set the shell factor
    pub fn with_shell(mut self, shell: ShellFactor) -> Self {
        self.shell = shell;
        self
    }

    /// Set the material cost rate
    pub fn with_material_rate(mut self, rate: MaterialRate) -> Self {
        self.material_rate = rate;
        self
    }

    /// Set the time pricing mode
    pub fn with_time(mut self, time: TimeMode) -> Self {
        self.time = time;
        self
    }

    /// Set the markup strategy
    pub fn with_markup(mut self, markup: Markup) -> Self {
        self.markup = markup;
        self
    }

    /// Validate and clamp every parameter
    pub fn resolve(&self) -> ResolvedParams {
        let time = match self.time {
            TimeMode::None => ResolvedTime::None,
            TimeMode::Explicit { hours, hourly_rate } => ResolvedTime::Explicit {
                hours: non_negative(hours, "print hours"),
                hourly_rate: non_negative(hourly_rate, "hourly rate"),
            },
            TimeMode::Derived {
                perimeters,
                hourly_rate,
            } => ResolvedTime::Derived {
                perimeters,
                hourly_rate: non_negative(hourly_rate, "hourly rate"),
            },
        };

        let (service_fee, margin_fraction) = match self.markup {
            Markup::None => (0.0, 0.0),
            Markup::ServiceFee(fee) => (non_negative(fee, "service fee"), 0.0),
            Markup::Margin(margin) => (0.0, non_negative(margin, "margin")),
            Markup::FeeAndMargin { fee, margin } => (
                non_negative(fee, "service fee"),
                non_negative(margin, "margin"),
            ),
        };

        ResolvedParams {
            density_g_per_cm3: self.material.resolved_density(),
            infill_fraction: self.infill.fraction(),
            shell_factor: self.shell.fraction(),
            cost_per_gram: self.material_rate.per_gram(),
            time,
            service_fee,
            margin_fraction,
        }
    }
}

/// Time pricing after validation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResolvedTime {
    /// No time cost
    None,
    /// Operator-supplied duration
    Explicit {
        /// Print duration in hours, `>= 0`
        hours: f64,
        /// Price per hour, `>= 0`
        hourly_rate: f64,
    },
    /// Geometry-derived duration
    Derived {
        /// Perimeter count
        perimeters: u32,
        /// Price per hour, `>= 0`
        hourly_rate: f64,
    },
}

/// Parameters after clamping and default substitution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedParams {
    /// Density in g/cm³, `> 0`
    pub density_g_per_cm3: f64,
    /// Infill fraction in `[0, 1]`
    pub infill_fraction: f64,
    /// Shell factor in `[0, 1]`
    pub shell_factor: f64,
    /// Material price per gram, `>= 0`
    pub cost_per_gram: f64,
    /// Time pricing
    pub time: ResolvedTime,
    /// Fixed fee, `>= 0`
    pub service_fee: f64,
    /// Proportional markup, `>= 0`
    pub margin_fraction: f64,
}

/// Clamp a finite value to `[0, 1]`, logging when it was out of range
fn clamp_unit(value: f64, name: &str) -> f64 {
    let clamped = value.clamp(0.0, 1.0);
    if clamped != value {
        warn!("Clamped {} from {} to {}", name, value, clamped);
    }
    clamped
}

/// Replace negative or non-finite values with 0
pub(crate) fn non_negative(value: f64, name: &str) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        warn!("Invalid {} {}, using 0", name, value);
        0.0
    }
}
