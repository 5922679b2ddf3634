//! Sanitize command implementation
//!
//! Reads one XML document, writes its sanitized copy and optionally the
//! mapping report. The output is only written once the whole document has
//! been rewritten, so a parse error never leaves a truncated file behind.

use crate::config::SanitizerConfig;
use crate::sanitizer::{Mode, Sanitizer};
use anyhow::Context;
use clap::Args;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

/// Arguments for the sanitize command
#[derive(Args, Debug)]
pub struct SanitizeArgs {
    /// Sanitization mode (aggressive, moderate, minimal); overrides the config file
    #[arg(short, long)]
    pub mode: Option<Mode>,

    /// Input XML file (`-` or omitted for stdin)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (`-` or omitted for stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the mapping report to this file; overrides the config file
    #[arg(long)]
    pub mapping_report: Option<PathBuf>,

    /// Print run statistics as JSON to stderr
    #[arg(long)]
    pub stats: bool,
}

impl SanitizeArgs {
    /// Execute the sanitize command
    pub fn execute(&self, config: &SanitizerConfig) -> anyhow::Result<i32> {
        let mode = self.mode.unwrap_or(config.sanitizer.mode);
        tracing::info!(mode = %mode, "Sanitizing document");

        let input = read_input(self.input.as_deref())?;

        let mut sanitizer = Sanitizer::new(mode);
        let mut output = Vec::with_capacity(input.len());
        sanitizer
            .sanitize_xml(input.as_slice(), &mut output)
            .context("Failed to sanitize document")?;

        write_output(self.output.as_deref(), &output)?;

        let report_path = self
            .mapping_report
            .as_ref()
            .or(config.sanitizer.mapping_report.as_ref());
        if let Some(path) = report_path {
            sanitizer
                .mapping_report()
                .write_to_file(path, config.report.pretty)
                .with_context(|| format!("Failed to write mapping report {}", path.display()))?;
        }

        let stats = sanitizer.stats();
        if self.stats {
            eprintln!("{}", serde_json::to_string_pretty(&stats)?);
        }
        tracing::info!(
            total_fields = stats.total_fields,
            redacted_fields = stats.redacted_fields,
            "Sanitization finished"
        );

        Ok(0)
    }
}

fn is_stdio(path: Option<&Path>) -> bool {
    path.map_or(true, |p| p.as_os_str() == "-")
}

fn read_input(path: Option<&Path>) -> anyhow::Result<Vec<u8>> {
    let mut buffer = Vec::new();
    match path {
        Some(p) if !is_stdio(Some(p)) => {
            File::open(p)
                .and_then(|mut f| f.read_to_end(&mut buffer))
                .with_context(|| format!("Failed to read input {}", p.display()))?;
        }
        _ => {
            io::stdin()
                .lock()
                .read_to_end(&mut buffer)
                .context("Failed to read stdin")?;
        }
    }
    Ok(buffer)
}

fn write_output(path: Option<&Path>, data: &[u8]) -> anyhow::Result<()> {
    match path {
        Some(p) if !is_stdio(Some(p)) => {
            std::fs::write(p, data).with_context(|| format!("Failed to write output {}", p.display()))
        }
        _ => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(data)
                .and_then(|()| stdout.flush())
                .context("Failed to write stdout")
        }
    }
}
