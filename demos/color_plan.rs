//! Example splitting a quote across a multi-color plan
//!
//! Prices a 30 cm³ part printed in three colors from the starter stock.

use printquote::{
    ColorSegment, EstimationInput, EstimationParams, FilamentInventory, PercentStatus,
    split_by_color,
};

fn main() {
    println!("=== Color Plan Example ===\n");

    let inventory = FilamentInventory::default_stock();
    println!("Best-stocked spools:");
    for filament in inventory.top_by_stock(4) {
        println!(
            "  {} ({}) {:.0} g at {:.3}/g",
            filament.name,
            filament.hex,
            filament.grams,
            filament.price_per_gram()
        );
    }
    println!();

    let quote = EstimationInput::new(30_000.0, EstimationParams::planner(3)).estimate();

    let plan = [
        ColorSegment::new("PLA Blanco", 50.0),
        ColorSegment::new("PLA Rojo", 30.0),
        ColorSegment::new("PETG Transparente", 20.0),
    ];
    let split = split_by_color(quote.weight_grams, &plan, &inventory);

    match split.status() {
        PercentStatus::Complete => {}
        PercentStatus::Under => println!("Warning: plan covers only {}%", split.total_percent),
        PercentStatus::Over => println!("Warning: plan covers {}%", split.total_percent),
    }

    for share in &split.shares {
        match share.cost {
            Some(cost) => println!("  {}: {:.2} g, {:.4}", share.color, share.grams, cost),
            None => println!("  {}: {:.2} g, not in stock", share.color, share.grams),
        }
    }

    let priced = quote.with_color_split(&split);
    println!();
    println!("Weight:     {:.2} g", priced.weight_grams);
    if let Some(duration) = priced.print_duration() {
        println!("Print time: {}", duration);
    }
    println!("Total:      {:.4}", priced.total_cost);
}
