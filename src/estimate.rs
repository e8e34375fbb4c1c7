//! Weight, cost and time estimation
//!
//! The model is a pure function of a raw volume and an [`EstimationParams`]
//! record:
//!
//! ```text
//! effective = raw * (shell + (1 - shell) * infill)
//! weight    = effective / 1000 * density
//! material  = weight * price_per_gram
//! subtotal  = material + time_cost
//! total     = subtotal + service_fee + subtotal * margin
//! ```
//!
//! This is a rough linear estimate, not a slicer. Every call recomputes from
//! scratch; identical inputs give bit-identical results.

use crate::color_split::ColorSplit;
use crate::error::Result;
use crate::mesh::TriangleMesh;
use crate::mesh_ops::compute_mesh_volume;
use crate::params::{EstimationParams, ResolvedParams, ResolvedTime};
use std::fmt;
use tracing::{debug, warn};

/// Cubic millimetres of raw volume printed per base minute
pub const DERIVED_TIME_BASE_DIVISOR: f64 = 5000.0;

/// Constant term of the infill time factor (`0.6 + infill`)
pub const INFILL_TIME_OFFSET: f64 = 0.6;

/// Speed penalty per perimeter
pub const SPEED_PENALTY_PER_PERIMETER: f64 = 0.05;

/// Lowest speed factor a perimeter count can produce
pub const MIN_SPEED_FACTOR: f64 = 0.4;

/// Estimation result
///
/// All masses are grams, volumes mm³ (with cm³ copies for display) and costs
/// are in the operator's currency.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Estimation {
    /// `false` when no mesh was loaded; every number is then zero
    pub available: bool,
    /// Enclosed mesh volume in mm³
    pub raw_volume_mm3: f64,
    /// Enclosed mesh volume in cm³
    pub volume_cm3: f64,
    /// Volume actually consuming material, in mm³
    pub effective_volume_mm3: f64,
    /// Volume actually consuming material, in cm³
    pub effective_volume_cm3: f64,
    /// Estimated filament weight
    pub weight_grams: f64,
    /// Cost of the filament
    pub material_cost: f64,
    /// Estimated print time, when a time mode is configured
    pub print_time_minutes: Option<f64>,
    /// Cost of machine time
    pub time_cost: f64,
    /// Material plus time cost
    pub subtotal: f64,
    /// Fixed fee added to the subtotal
    pub service_fee: f64,
    /// Proportional markup fraction used
    pub margin_fraction: f64,
    /// Markup amount (`subtotal * margin_fraction`)
    pub margin: f64,
    /// Final price
    pub total_cost: f64,
    /// Infill fraction used
    pub infill_fraction: f64,
    /// Shell factor used
    pub shell_factor: f64,
    /// Density used, in g/cm³
    pub density_g_per_cm3: f64,
}

impl Estimation {
    /// Result reported before any mesh has been loaded
    pub fn unavailable() -> Self {
        Self {
            available: false,
            raw_volume_mm3: 0.0,
            volume_cm3: 0.0,
            effective_volume_mm3: 0.0,
            effective_volume_cm3: 0.0,
            weight_grams: 0.0,
            material_cost: 0.0,
            print_time_minutes: None,
            time_cost: 0.0,
            subtotal: 0.0,
            service_fee: 0.0,
            margin_fraction: 0.0,
            margin: 0.0,
            total_cost: 0.0,
            infill_fraction: 0.0,
            shell_factor: 0.0,
            density_g_per_cm3: 0.0,
        }
    }

    /// Print time, if estimated
    pub fn print_duration(&self) -> Option<PrintDuration> {
        self.print_time_minutes.map(PrintDuration::from_minutes)
    }

    /// Replace the material cost with the per-color total of `split`
    ///
    /// Subtotal, markup and total are recomputed; everything else is kept.
    /// An unavailable estimation is returned unchanged.
    pub fn with_color_split(&self, split: &ColorSplit) -> Self {
        if !self.available {
            return self.clone();
        }
        let mut priced = self.clone();
        priced.material_cost = split.total_cost;
        priced.subtotal = priced.material_cost + priced.time_cost;
        priced.margin = priced.subtotal * priced.margin_fraction;
        priced.total_cost = priced.subtotal + priced.service_fee + priced.margin;
        priced
    }
}

impl Default for Estimation {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// Everything the model needs for one recomputation
///
/// `volume_mm3` is `None` until a mesh has been loaded.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EstimationInput {
    /// Raw mesh volume in mm³, if a mesh is loaded
    pub volume_mm3: Option<f64>,
    /// Estimation parameters
    pub params: EstimationParams,
}

impl EstimationInput {
    /// Create an input for a known volume
    pub fn new(volume_mm3: f64, params: EstimationParams) -> Self {
        Self {
            volume_mm3: Some(volume_mm3),
            params,
        }
    }

    /// Create an input for the given mesh
    pub fn from_mesh(mesh: &TriangleMesh, params: EstimationParams) -> Result<Self> {
        Ok(Self::new(compute_mesh_volume(mesh)?, params))
    }

    /// Run the estimation, or report [`Estimation::unavailable`] without a mesh
    pub fn estimate(&self) -> Estimation {
        match self.volume_mm3 {
            Some(volume) => estimate(volume, &self.params),
            None => Estimation::unavailable(),
        }
    }
}

/// Estimate weight, cost and time for a raw volume in mm³
///
/// Never fails: a negative or non-finite volume is treated as 0 and parameters
/// are clamped by [`EstimationParams::resolve`].
///
/// # Example
/// ```
/// use printquote::{estimate, EstimationParams, Infill, MaterialRate, ShellFactor};
///
/// let params = EstimationParams::new()
///     .with_infill(Infill::Fraction(0.2))
///     .with_shell(ShellFactor::Fraction(0.35))
///     .with_material_rate(MaterialRate::PerKilogram(20.0));
///
/// let result = estimate(2000.0, &params);
/// assert!((result.effective_volume_mm3 - 960.0).abs() < 1e-9);
/// assert!((result.weight_grams - 1.1904).abs() < 1e-12);
/// ```
pub fn estimate(volume_mm3: f64, params: &EstimationParams) -> Estimation {
    let resolved = params.resolve();
    let raw_volume_mm3 = if volume_mm3.is_finite() && volume_mm3 >= 0.0 {
        volume_mm3
    } else {
        warn!("Invalid volume {} mm³, estimating for 0", volume_mm3);
        0.0
    };
    estimate_resolved(raw_volume_mm3, &resolved)
}

/// Compute the volume of `mesh` and estimate from it
///
/// # Errors
/// Propagates malformed-mesh errors from the volume extraction.
pub fn estimate_mesh(mesh: &TriangleMesh, params: &EstimationParams) -> Result<Estimation> {
    Ok(estimate(compute_mesh_volume(mesh)?, params))
}

fn estimate_resolved(raw_volume_mm3: f64, params: &ResolvedParams) -> Estimation {
    let solid_ratio = params.shell_factor + (1.0 - params.shell_factor) * params.infill_fraction;
    let effective_volume_mm3 = raw_volume_mm3 * solid_ratio;
    let effective_volume_cm3 = effective_volume_mm3 / 1000.0;
    let weight_grams = effective_volume_cm3 * params.density_g_per_cm3;
    let material_cost = weight_grams * params.cost_per_gram;

    let (print_time_minutes, time_cost) = match params.time {
        ResolvedTime::None => (None, 0.0),
        ResolvedTime::Explicit { hours, hourly_rate } => (Some(hours * 60.0), hours * hourly_rate),
        ResolvedTime::Derived {
            perimeters,
            hourly_rate,
        } => {
            let minutes =
                derived_print_minutes(raw_volume_mm3, params.infill_fraction, perimeters);
            (Some(minutes), minutes / 60.0 * hourly_rate)
        }
    };

    let subtotal = material_cost + time_cost;
    let margin = subtotal * params.margin_fraction;
    let total_cost = subtotal + params.service_fee + margin;

    debug!(
        "Estimated {:.3} g from {:.3} mm³ (solid ratio {:.3}), total {:.4}",
        weight_grams, raw_volume_mm3, solid_ratio, total_cost
    );

    Estimation {
        available: true,
        raw_volume_mm3,
        volume_cm3: raw_volume_mm3 / 1000.0,
        effective_volume_mm3,
        effective_volume_cm3,
        weight_grams,
        material_cost,
        print_time_minutes,
        time_cost,
        subtotal,
        service_fee: params.service_fee,
        margin_fraction: params.margin_fraction,
        margin,
        total_cost,
        infill_fraction: params.infill_fraction,
        shell_factor: params.shell_factor,
        density_g_per_cm3: params.density_g_per_cm3,
    }
}

/// Rough print time in minutes from geometry alone
///
/// `minutes = raw / 5000 * (0.6 + infill) / max(0.4, 1 - perimeters * 0.05)`
pub fn derived_print_minutes(raw_volume_mm3: f64, infill_fraction: f64, perimeters: u32) -> f64 {
    let base = raw_volume_mm3 / DERIVED_TIME_BASE_DIVISOR;
    let infill_factor = INFILL_TIME_OFFSET + infill_fraction;
    let speed_factor =
        (1.0 - f64::from(perimeters) * SPEED_PENALTY_PER_PERIMETER).max(MIN_SPEED_FACTOR);
    base * infill_factor / speed_factor
}

/// A print duration in minutes
///
/// Displays as `"-"` when zero, `"N min"` under an hour and `"H h M min"`
/// otherwise. Minutes are rounded before splitting into hours.
///
/// # Example
/// ```
/// use printquote::PrintDuration;
///
/// assert_eq!(PrintDuration::from_minutes(45.2).to_string(), "45 min");
/// assert_eq!(PrintDuration::from_minutes(125.0).to_string(), "2 h 5 min");
/// assert_eq!(PrintDuration::from_minutes(0.0).to_string(), "-");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrintDuration(f64);

impl PrintDuration {
    /// Wrap a duration in minutes
    pub fn from_minutes(minutes: f64) -> Self {
        Self(minutes)
    }

    /// Duration in minutes
    pub fn minutes(&self) -> f64 {
        self.0
    }

    /// Whole hours and remaining minutes after rounding to the nearest minute
    pub fn hours_and_minutes(&self) -> (u64, u64) {
        if !self.0.is_finite() || self.0 <= 0.0 {
            return (0, 0);
        }
        let total = self.0.round() as u64;
        (total / 60, total % 60)
    }
}

impl fmt::Display for PrintDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.0.is_finite() || self.0 <= 0.0 {
            return write!(f, "-");
        }
        match self.hours_and_minutes() {
            (0, minutes) => write!(f, "{} min", minutes),
            (hours, minutes) => write!(f, "{} h {} min", hours, minutes),
        }
    }
}
