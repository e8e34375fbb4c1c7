//! Integration tests for splitting weight and cost across a color plan

use printquote::{
    ColorSegment, Filament, FilamentInventory, FilamentPricing, Material, PercentStatus,
    split_by_color,
};

/// Pricing source that charges the same for every color
struct FlatPrice(f64);

impl FilamentPricing for FlatPrice {
    fn price_per_gram(&self, _color: &str) -> Option<f64> {
        Some(self.0)
    }
}

#[test]
fn test_grams_sum_to_weight() {
    let plan = [
        ColorSegment::new("PLA Blanco", 30.0),
        ColorSegment::new("PLA Negro", 70.0),
    ];
    for weight in [1.1904, 12.5, 37.2, 3.3, 100.0] {
        let split = split_by_color(weight, &plan, &FilamentInventory::default_stock());
        let sum: f64 = split.shares.iter().map(|s| s.grams).sum();
        assert_eq!(sum, weight, "Grams for {} do not add up", weight);
        assert_eq!(split.total_grams, weight);
    }
}

#[test]
fn test_thirty_seventy_grams_are_exact_for_many_weights() {
    let plan = [
        ColorSegment::new("PLA Blanco", 30.0),
        ColorSegment::new("PLA Negro", 70.0),
    ];
    let inventory = FilamentInventory::default_stock();
    for i in 1..20_000 {
        let weight = i as f64 * 0.0137;
        let split = split_by_color(weight, &plan, &inventory);
        let sum: f64 = split.shares.iter().map(|s| s.grams).sum();
        assert_eq!(sum, weight, "Grams for {} do not add up", weight);
        assert!(split.shares.iter().all(|s| s.grams >= 0.0));
    }
}

#[test]
fn test_uneven_plan_grams_are_exact() {
    let plan = [
        ColorSegment::new("a", 13.0),
        ColorSegment::new("b", 0.0),
        ColorSegment::new("c", 41.7),
        ColorSegment::new("d", 29.9),
        ColorSegment::new("e", 0.0),
    ];
    for weight in [0.0959, 1e-300, 7.77, 4321.123, f64::MAX] {
        let split = split_by_color(weight, &plan, &FlatPrice(0.01));
        assert_eq!(split.total_grams, weight);
        assert_eq!(split.shares[1].grams, 0.0);
        assert_eq!(split.shares[4].grams, 0.0);
        // Shares stay proportional up to rounding
        let exact = weight * (13.0 / 84.6);
        assert!((split.shares[0].grams - exact).abs() <= exact * 1e-12);
    }
}

#[test]
fn test_zero_percent_plan_has_no_nan() {
    let plan = [
        ColorSegment::new("PLA Blanco", 0.0),
        ColorSegment::new("PLA Negro", 0.0),
    ];
    let split = split_by_color(42.0, &plan, &FilamentInventory::default_stock());

    for share in &split.shares {
        assert_eq!(share.grams, 0.0);
        assert!(!share.fraction.is_nan());
        assert!(!share.cost.unwrap().is_nan());
    }
    assert_eq!(split.total_cost, 0.0);
}

#[test]
fn test_shares_need_not_sum_to_hundred() {
    let plan = [ColorSegment::new("a", 10.0), ColorSegment::new("b", 30.0)];
    let split = split_by_color(8.0, &plan, &FlatPrice(0.5));

    assert_eq!(split.total_percent, 40.0);
    assert_eq!(split.status(), PercentStatus::Under);
    assert_eq!(split.shares[0].grams, 2.0);
    assert_eq!(split.shares[1].grams, 6.0);
    assert_eq!(split.total_cost, 4.0);
}

#[test]
fn test_cost_uses_each_spool_price() {
    let mut inventory = FilamentInventory::new();
    inventory.add(Filament::new("cheap", "#ffffff", Material::Pla, 500.0, 10.0));
    inventory.add(Filament::new("fancy", "#c0c0c0", Material::Petg, 200.0, 60.0));

    let plan = [
        ColorSegment::new("cheap", 75.0),
        ColorSegment::new("fancy", 25.0),
    ];
    let split = split_by_color(200.0, &plan, &inventory);

    assert_eq!(split.shares[0].cost, Some(150.0 * 0.01));
    assert_eq!(split.shares[1].cost, Some(50.0 * 0.06));
    assert!((split.total_cost - 4.5).abs() < 1e-12);
    assert_eq!(split.status(), PercentStatus::Complete);
}

#[test]
fn test_missing_color_is_reported() {
    let plan = [
        ColorSegment::new("PLA Rojo", 60.0),
        ColorSegment::new("Dorado", 40.0),
    ];
    let split = split_by_color(10.0, &plan, &FilamentInventory::default_stock());

    let unpriced: Vec<&str> = split.unpriced().map(|s| s.color.as_str()).collect();
    assert_eq!(unpriced, ["Dorado"]);
    assert!((split.total_cost - 6.0 * 0.024).abs() < 1e-12);
}

#[test]
fn test_out_of_stock_colors_still_priced() {
    let mut inventory = FilamentInventory::default_stock();
    inventory.get_mut("PLA Rojo").unwrap().grams = 0.0;

    let plan = [ColorSegment::new("PLA Rojo", 100.0)];
    let split = split_by_color(10.0, &plan, &inventory);
    assert!(split.shares[0].cost.is_some());
    assert_eq!(inventory.in_stock().count(), 3);
}
