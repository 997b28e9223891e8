//! Output formatting for CLI

use crate::pipeline::{EvaluationResult, TrainingResult};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

fn percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

/// Print self-play outcome tallies
pub fn print_training(result: &TrainingResult, table_sizes: (usize, usize)) {
    print_section("Self-Play Training");
    print_kv("Episodes", &format_number(result.episodes));
    print_kv("X wins", &format_number(result.x_wins));
    print_kv("O wins", &format_number(result.o_wins));
    print_kv(
        "Draws",
        &format!("{} ({})", format_number(result.draws), percent(result.draw_rate())),
    );
    print_kv("X table entries", &format_number(table_sizes.0));
    print_kv("O table entries", &format_number(table_sizes.1));
}

/// Print evaluation tallies against the random opponent
pub fn print_evaluation(result: &EvaluationResult) {
    print_section("Evaluation vs Random");
    println!("Out of {} games:", result.total_games);
    println!("Wins: {} ({})", result.wins, percent(result.win_rate()));
    println!("Losses: {} ({})", result.losses, percent(result.loss_rate()));
    println!("Ties: {} ({})", result.ties, percent(result.tie_rate()));
}
