#![no_main]

use libfuzzer_sys::fuzz_target;
use printquote::{
    ColorSegment, EstimationParams, FilamentInventory, Infill, Markup, MaterialRate, ShellFactor,
    TimeMode, estimate, split_by_color,
};

const COLORS: [&str; 5] = [
    "PLA Blanco",
    "PLA Negro",
    "PLA Rojo",
    "PETG Transparente",
    "Dorado",
];

fuzz_target!(|data: (f64, f64, f64, f64, f64, f64, u8, Vec<(u8, f64)>)| {
    let (volume, infill, shell, rate, hours, margin, perimeters, plan) = data;

    let time = if perimeters % 2 == 0 {
        TimeMode::Explicit {
            hours,
            hourly_rate: rate,
        }
    } else {
        TimeMode::Derived {
            perimeters: u32::from(perimeters),
            hourly_rate: rate,
        }
    };
    let params = EstimationParams::new()
        .with_infill(Infill::Percent(infill))
        .with_shell(ShellFactor::Fraction(shell))
        .with_material_rate(MaterialRate::PerKilogram(rate))
        .with_time(time)
        .with_markup(Markup::FeeAndMargin { fee: hours, margin });

    // Any input yields a result and clamping keeps the weight in range
    let result = estimate(volume, &params);
    assert!(result.weight_grams.is_finite());
    assert!(result.weight_grams >= 0.0);
    assert!(result.effective_volume_mm3 <= result.raw_volume_mm3);

    let segments: Vec<ColorSegment> = plan
        .into_iter()
        .take(16)
        .map(|(color, percent)| ColorSegment::new(COLORS[color as usize % COLORS.len()], percent))
        .collect();
    let split = split_by_color(result.weight_grams, &segments, &FilamentInventory::default_stock());
    let _ = result.with_color_split(&split);
});
