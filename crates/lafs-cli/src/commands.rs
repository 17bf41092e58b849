//! Subcommand handlers.

use std::path::Path;
use std::time::Instant;

use anyhow::Context;
use colored::Colorize;
use lafs_core::{DataGenerator, DatasetWriter, GeneratorConfig};

/// Loads and validates `path`, applying `LAFS_` environment overrides.
pub fn load_config(path: &Path) -> anyhow::Result<GeneratorConfig> {
    GeneratorConfig::load(path)
        .with_context(|| format!("failed to load configuration from {}", path.display()))
}

/// Generates a dataset and writes it to the configured directory.
pub fn generate(config: &GeneratorConfig) -> anyhow::Result<()> {
    match config.seed {
        Some(seed) => tracing::info!(seed, "Using seeded random source"),
        None => tracing::warn!("No seed configured; output will not be reproducible"),
    }

    let start = Instant::now();
    let dataset = DataGenerator::from_optional_seed(config.seed)
        .generate(&config.parameters)
        .context("generation failed")?;
    let written = DatasetWriter::new(config.output.clone())
        .write(&dataset)
        .with_context(|| format!("failed to write {}", config.output.dir.display()))?;

    let summary = dataset.summary();
    println!(
        "{} Generated {} users, {} items, {} ratings in {:.2?}",
        "✓".green(),
        summary.users,
        summary.items,
        summary.ratings,
        start.elapsed()
    );
    for path in written {
        println!("  - {}", path.display().to_string().green());
    }
    Ok(())
}

/// Reports a valid configuration, optionally dumping its parameters.
pub fn validate(config: &GeneratorConfig, json: bool) -> anyhow::Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(&config.parameters)
            .context("failed to serialize parameters")?;
        println!("{rendered}");
        return Ok(());
    }

    let params = &config.parameters;
    println!("{} Configuration is valid", "✓".green());
    println!("  Users:       {}", params.num_users());
    println!("  Items:       {}", params.num_items);
    println!(
        "  Factors:     {} ({} agent)",
        params.num_factors, params.num_agents
    );
    println!(
        "  Lists:       {} candidates -> {} delivered",
        params.initial_list_size,
        params.kept_list_len()
    );
    Ok(())
}
