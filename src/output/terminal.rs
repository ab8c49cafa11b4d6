//! Terminal output formatting with colors and box drawing.

use colored::Colorize;

use crate::result::{EffectPattern, ScreeningResult};

/// Format a ScreeningResult for human-readable terminal output.
///
/// Each output gets one table with inputs ranked by decreasing μ*.
pub fn format_result(result: &ScreeningResult) -> String {
    let mut output = String::new();
    let sep = "\u{2500}".repeat(62);
    let stats = &result.statistics;

    output.push_str("morris-screening\n");
    output.push_str(&sep);
    output.push('\n');
    output.push('\n');

    output.push_str(&format!(
        "  Trajectories: {} ({} evaluations)\n",
        result.metadata.trajectories,
        result.input_design.nrows()
    ));
    output.push_str(&format!(
        "  Inputs: {}   Outputs: {}\n",
        stats.input_dimension, stats.output_dimension
    ));
    if let Some(seed) = result.metadata.seed {
        output.push_str(&format!("  Seed: {}\n", seed));
    }
    output.push_str(&format!("  Runtime: {:.3} s\n", result.metadata.runtime_secs));

    for marginal in 0..stats.output_dimension {
        output.push('\n');
        if stats.output_dimension > 1 {
            output.push_str(&format!("  {}\n", format!("Output {}", marginal).bold()));
        }
        output.push_str(&format!(
            "    {:<8}{:>12}{:>12}{:>12}  {}\n",
            "input", "mu", "mu*", "sigma", "pattern"
        ));

        let order = match stats.ranking(marginal) {
            Ok(order) => order,
            Err(_) => continue,
        };
        for input in order {
            let pattern = stats
                .pattern(marginal, input)
                .unwrap_or(EffectPattern::Negligible);
            output.push_str(&format!(
                "    {:<8}{:>12.4}{:>12.4}{:>12.4}  {}\n",
                format!("x{}", input),
                stats.mean[(marginal, input)],
                stats.mean_absolute[(marginal, input)],
                stats.standard_deviation[(marginal, input)],
                format_pattern(pattern)
            ));
        }
    }

    output.push('\n');
    output.push_str(&sep);
    output.push('\n');
    output.push_str("Note: Patterns are read from sigma/mu* and are a heuristic.\n");

    output
}

/// Format EffectPattern for display.
fn format_pattern(pattern: EffectPattern) -> String {
    match pattern {
        EffectPattern::Negligible => "Negligible".dimmed().to_string(),
        EffectPattern::Linear => "Linear".green().to_string(),
        EffectPattern::Monotonic => "Monotonic".green().to_string(),
        EffectPattern::AlmostMonotonic => "Almost monotonic".yellow().to_string(),
        EffectPattern::NonLinear => "Non-linear".red().to_string(),
    }
}
