//! List rules command implementation.

use fla_lint_rules::all_rules;
use fla_lint_ts::Accelerator;
use std::sync::Arc;

/// Runs the list-rules command.
pub fn run() {
    println!("Available rules:\n");
    println!("{:<8} {:<26} {:<6} Description", "Code", "Name", "Kind");
    println!("{}", "-".repeat(100));

    for rule in all_rules(Arc::new(Accelerator::disabled())) {
        println!(
            "{:<8} {:<26} {:<6} {}",
            rule.id(),
            rule.name(),
            rule.kind().to_string(),
            rule.description()
        );
    }

    println!("\nDisable a rule in fla-lint.config.json, e.g.:");
    println!("  {{ \"rules\": {{ \"FLA006\": {{ \"enabled\": false }} }} }}");
}
