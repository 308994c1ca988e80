//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,

    /// Overwrite an existing file
    #[arg(long)]
    pub force: bool,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        if self.output.exists() && !self.force {
            anyhow::bail!(
                "{} already exists (use --force to overwrite)",
                self.output.display()
            );
        }

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, self.generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Next steps:");
        println!("1. Edit the weights and constants to match your workloads");
        println!("2. Use it for selection:");
        println!(
            "   iterselect select -n 100000 --platform server --config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Generate template configuration content
    fn generate_template(&self) -> String {
        r#"# iterselect configuration
#
# Every key is optional; missing keys keep the values shown here.

[engine]
# Cost of visiting one element at low CPU efficiency (nanoseconds)
per_element_cost_ns = 10.0
# Bytes touched per element at low memory efficiency
bytes_per_element = 64
# Extra memory per parallel worker (bytes)
worker_memory_overhead_bytes = 65536
# Fraction of the parallel speedup lost below a strategy's optimal range
small_data_parallel_overhead = 0.5
# Time multiplier for IO-bound work on strategies without async support
io_bound_penalty = 2.0
# Time budget when a request carries no timeout (milliseconds)
default_max_time_ms = 30000
# Confidence inside / outside a strategy's optimal data size range
confidence_in_range = 0.85
confidence_out_of_range = 0.55
# Score multiplier outside the optimal range
out_of_range_score_factor = 0.8

# Composite score weights; must sum to 1.0
[engine.weights]
speed = 0.4
memory = 0.3
scalability = 0.3

# Time multiplier per CPU efficiency level
[engine.cpu_multipliers]
low = 1.0
medium = 0.6
high = 0.3
excellent = 0.15

# Memory multiplier per memory efficiency level
[engine.memory_multipliers]
low = 1.0
medium = 0.6
high = 0.3
excellent = 0.15

# Normalized value of each scalability level
[engine.scalability_values]
low = 0.25
medium = 0.5
high = 0.75
excellent = 1.0

[output]
# "text" or "json"
default_format = "text"
pretty_json = true
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_matches_defaults() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("iterselect.toml"),
            force: false,
        };
        let parsed = CliConfig::from_toml_str(&args.generate_template()).unwrap();
        assert_eq!(parsed, CliConfig::default());
    }

    #[test]
    fn test_execute_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("iterselect.toml");

        let args = GenerateConfigArgs {
            output: output_path.clone(),
            force: false,
        };

        assert!(args.execute().is_ok());
        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("[engine.weights]"));

        // Second run without --force refuses to overwrite
        assert!(args.execute().is_err());
    }
}
