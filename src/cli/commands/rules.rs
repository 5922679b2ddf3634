//! Rules command implementation
//!
//! Lists the redaction rules that are active in a mode, grouped by category.

use crate::sanitizer::{Mode, RuleCategory, RuleEngine};
use clap::Args;

/// Arguments for the rules command
#[derive(Args, Debug)]
pub struct RulesArgs {
    /// Mode to list rules for
    #[arg(short, long, default_value_t = Mode::Aggressive)]
    pub mode: Mode,

    /// Restrict the listing to one category label (e.g. "credentials")
    #[arg(long)]
    pub category: Option<String>,
}

const CATEGORIES: [RuleCategory; 6] = [
    RuleCategory::Credentials,
    RuleCategory::Crypto,
    RuleCategory::Network,
    RuleCategory::Identity,
    RuleCategory::System,
    RuleCategory::Cloud,
];

impl RulesArgs {
    /// Execute the rules command
    pub fn execute(&self) -> anyhow::Result<i32> {
        let engine = RuleEngine::new(self.mode);

        if let Some(wanted) = &self.category {
            if !CATEGORIES
                .iter()
                .any(|c| c.label().eq_ignore_ascii_case(wanted))
            {
                anyhow::bail!("Unknown rule category: {wanted}");
            }
        }

        println!("Rules active in {} mode:", self.mode);
        for category in CATEGORIES {
            if let Some(wanted) = &self.category {
                if !category.label().eq_ignore_ascii_case(wanted) {
                    continue;
                }
            }
            let rules = engine.get_rules_by_category(category);
            if rules.is_empty() {
                continue;
            }
            println!();
            println!("{category}:");
            for rule in rules {
                println!("  {:<24} {}", rule.name, rule.description);
            }
        }
        Ok(0)
    }
}
