//! Multi-color planning
//!
//! A color plan is a list of [`ColorSegment`]s, each claiming a percentage of
//! the printed weight. Percentages need not add up to 100: they are normalized
//! by their sum, and a zero sum gives every color a zero share.
//!
//! Prices come from a [`FilamentPricing`] source. [`FilamentInventory`] is the
//! in-memory implementation; stock levels are informational only and never
//! checked against the plan.

use crate::params::{Material, non_negative};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Tolerance when comparing a percentage total against 100
const PERCENT_TOLERANCE: f64 = 1e-9;

/// One entry of a color plan
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorSegment {
    /// Name of the stock color
    pub color: String,
    /// Share of the total weight, in percent
    pub percent: f64,
}

impl ColorSegment {
    /// Create a new color segment
    pub fn new(color: impl Into<String>, percent: f64) -> Self {
        Self {
            color: color.into(),
            percent,
        }
    }
}

/// Source of per-color filament prices
pub trait FilamentPricing {
    /// Price per gram of `color`, or `None` if the color is unknown
    fn price_per_gram(&self, color: &str) -> Option<f64>;
}

/// Prices per gram keyed by color name
impl FilamentPricing for HashMap<String, f64> {
    fn price_per_gram(&self, color: &str) -> Option<f64> {
        self.get(color).copied()
    }
}

/// A spool of filament in stock
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Filament {
    /// Color name, used as the lookup key
    pub name: String,
    /// Display color as `#rrggbb`
    pub hex: String,
    /// Filament material
    pub material: Material,
    /// Grams available
    pub grams: f64,
    /// Price per kilogram
    pub price_per_kg: f64,
}

impl Filament {
    /// Create a new filament entry
    pub fn new(
        name: impl Into<String>,
        hex: impl Into<String>,
        material: Material,
        grams: f64,
        price_per_kg: f64,
    ) -> Self {
        Self {
            name: name.into(),
            hex: hex.into(),
            material,
            grams,
            price_per_kg,
        }
    }

    /// Whether any filament is left on the spool
    pub fn in_stock(&self) -> bool {
        self.grams > 0.0
    }

    /// Price per gram, non-negative
    pub fn price_per_gram(&self) -> f64 {
        non_negative(self.price_per_kg, "price per kg") / 1000.0
    }
}

/// In-memory filament stock
///
/// Names are matched exactly. When several entries share a name the first one
/// wins.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilamentInventory {
    filaments: Vec<Filament>,
}

impl FilamentInventory {
    /// Create an empty inventory
    pub fn new() -> Self {
        Self::default()
    }

    /// Starter stock of four spools
    pub fn default_stock() -> Self {
        Self {
            filaments: vec![
                Filament::new("PLA Blanco", "#f5f5f5", Material::Pla, 720.0, 22.0),
                Filament::new("PLA Negro", "#222222", Material::Pla, 540.0, 22.0),
                Filament::new("PLA Rojo", "#e53e3e", Material::Pla, 320.0, 24.0),
                Filament::new("PETG Transparente", "#d1f5ff", Material::Petg, 900.0, 28.0),
            ],
        }
    }

    /// Add a filament
    pub fn add(&mut self, filament: Filament) {
        self.filaments.push(filament);
    }

    /// Remove the first filament named `name`, returning it
    pub fn remove(&mut self, name: &str) -> Option<Filament> {
        let position = self.filaments.iter().position(|f| f.name == name)?;
        Some(self.filaments.remove(position))
    }

    /// Find a filament by name
    pub fn get(&self, name: &str) -> Option<&Filament> {
        self.filaments.iter().find(|f| f.name == name)
    }

    /// Find a filament by name for editing
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Filament> {
        self.filaments.iter_mut().find(|f| f.name == name)
    }

    /// All filaments in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Filament> {
        self.filaments.iter()
    }

    /// Number of filaments
    pub fn len(&self) -> usize {
        self.filaments.len()
    }

    /// Check whether the inventory is empty
    pub fn is_empty(&self) -> bool {
        self.filaments.is_empty()
    }

    /// Filaments with grams left
    pub fn in_stock(&self) -> impl Iterator<Item = &Filament> {
        self.filaments.iter().filter(|f| f.in_stock())
    }

    /// The `n` best-stocked filaments, most grams first
    pub fn top_by_stock(&self, n: usize) -> Vec<&Filament> {
        let mut sorted: Vec<&Filament> = self.filaments.iter().collect();
        sorted.sort_by(|a, b| b.grams.total_cmp(&a.grams));
        sorted.truncate(n);
        sorted
    }
}

impl FilamentPricing for FilamentInventory {
    fn price_per_gram(&self, color: &str) -> Option<f64> {
        self.get(color).map(Filament::price_per_gram)
    }
}

/// Whether the plan's percentages add up to 100
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PercentStatus {
    /// Less than 100 %
    Under,
    /// Exactly 100 %
    Complete,
    /// More than 100 %
    Over,
}

/// One color's part of the split
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorShare {
    /// Color name
    pub color: String,
    /// Percentage after sanitizing
    pub percent: f64,
    /// Normalized share in `[0, 1]`
    pub fraction: f64,
    /// Grams of this color
    pub grams: f64,
    /// Price per gram, if the color is known
    pub price_per_gram: Option<f64>,
    /// Cost of this color, if the color is known
    pub cost: Option<f64>,
}

/// Per-color weight and cost breakdown
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColorSplit {
    /// Shares in plan order
    pub shares: Vec<ColorShare>,
    /// Sum of all percentages
    pub total_percent: f64,
    /// Sum of per-color grams
    pub total_grams: f64,
    /// Sum of the costs of priced colors
    pub total_cost: f64,
}

impl ColorSplit {
    /// Compare the percentage total against 100
    pub fn status(&self) -> PercentStatus {
        if (self.total_percent - 100.0).abs() <= PERCENT_TOLERANCE {
            PercentStatus::Complete
        } else if self.total_percent > 100.0 {
            PercentStatus::Over
        } else {
            PercentStatus::Under
        }
    }

    /// Shares whose color has no price
    pub fn unpriced(&self) -> impl Iterator<Item = &ColorShare> {
        self.shares.iter().filter(|s| s.price_per_gram.is_none())
    }
}

/// Split `weight_grams` across a color plan and price each part
///
/// `fraction_i = percent_i / Σ percent`, `grams_i = weight * fraction_i`,
/// `cost_i = grams_i * price_per_gram(color_i)`. Negative or non-finite
/// percentages count as 0. Each share is rounded down by at most one ulp of
/// `weight_grams` and the last non-zero share takes the remainder, so the
/// grams add up to exactly `weight_grams`. Colors without a price contribute
/// no cost.
///
/// # Example
/// ```
/// use printquote::{ColorSegment, FilamentInventory, split_by_color};
///
/// let plan = [
///     ColorSegment::new("PLA Blanco", 30.0),
///     ColorSegment::new("PLA Rojo", 70.0),
/// ];
/// let split = split_by_color(100.0, &plan, &FilamentInventory::default_stock());
/// assert_eq!(split.total_grams, 100.0);
/// assert!((split.total_cost - (30.0 * 0.022 + 70.0 * 0.024)).abs() < 1e-12);
/// ```
pub fn split_by_color(
    weight_grams: f64,
    segments: &[ColorSegment],
    pricing: &impl FilamentPricing,
) -> ColorSplit {
    let weight_grams = non_negative(weight_grams, "weight");
    let percents: Vec<f64> = segments
        .iter()
        .map(|s| {
            if s.percent.is_finite() && s.percent >= 0.0 {
                s.percent
            } else {
                warn!("Invalid percentage {} for '{}', using 0", s.percent, s.color);
                0.0
            }
        })
        .collect();
    let total_percent: f64 = percents.iter().sum();
    let last_nonzero = percents.iter().rposition(|&p| p > 0.0);

    // Shares are snapped to the spacing of floats just below the weight, so
    // every partial sum is exact and the remainder closes the total exactly
    let grid = weight_grams - weight_grams.next_down();

    let mut shares = Vec::with_capacity(segments.len());
    let mut assigned = 0.0_f64;
    for (i, (segment, &percent)) in segments.iter().zip(&percents).enumerate() {
        let fraction = if total_percent > 0.0 {
            percent / total_percent
        } else {
            0.0
        };
        let grams = if Some(i) == last_nonzero {
            weight_grams - assigned
        } else {
            ((weight_grams * fraction / grid).floor() * grid).min(weight_grams - assigned)
        };
        assigned += grams;

        let price_per_gram = pricing
            .price_per_gram(&segment.color)
            .map(|p| non_negative(p, "price per gram"));
        if price_per_gram.is_none() {
            debug!("No price for color '{}'", segment.color);
        }

        shares.push(ColorShare {
            color: segment.color.clone(),
            percent,
            fraction,
            grams,
            price_per_gram,
            cost: price_per_gram.map(|p| grams * p),
        });
    }

    let total_grams = shares.iter().map(|s| s.grams).sum();
    let total_cost = shares.iter().filter_map(|s| s.cost).sum();

    ColorSplit {
        shares,
        total_percent,
        total_grams,
        total_cost,
    }
}
