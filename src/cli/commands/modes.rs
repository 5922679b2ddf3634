//! Modes command implementation

use crate::sanitizer::{Mode, RuleEngine};
use clap::Args;

/// Arguments for the modes command
#[derive(Args, Debug)]
pub struct ModesArgs {}

impl ModesArgs {
    /// Execute the modes command
    pub fn execute(&self) -> anyhow::Result<i32> {
        println!("Available sanitization modes:");
        println!();
        for mode in Mode::all() {
            let active = RuleEngine::new(mode).get_active_rules().len();
            let marker = if mode == Mode::default() { " (default)" } else { "" };
            println!("  {:<11} {} [{active} rules]{marker}", mode.as_str(), mode.description());
        }
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_execute() {
        assert_eq!(ModesArgs {}.execute().unwrap(), 0);
    }
}
