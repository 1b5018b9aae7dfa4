//! Chitra CLI - Photo Filter Engine
//!
//! A thin command-line boundary around the Chitra library: it decodes files,
//! validates strength, calls the filter engine and encodes the result.

use anyhow::{bail, Context, Result};
use chitra::prelude::*;
use std::path::{Path, PathBuf};

fn main() {
    let mut args: Vec<String> = std::env::args().collect();
    let program = args.first().cloned().unwrap_or_else(|| "chitra".to_string());

    let config_path = match take_option(&mut args, "--config") {
        Ok(path) => path.map(PathBuf::from),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(2);
        }
    };

    let config = match Config::discover(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: failed to load configuration: {}", e);
            std::process::exit(2);
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();
    log::debug!("Loaded configuration: {:?}", config);

    if args.len() < 2 {
        print_usage(&program);
        return;
    }

    let result = match args[1].as_str() {
        "list" => list_filters_cmd(args.iter().any(|a| a == "--json")),
        "info" => match args.get(2) {
            Some(filter) => filter_info(filter),
            None => Err(anyhow::anyhow!("Please specify a filter ID")),
        },
        "apply" => apply_cmd(&config, &args[2..]),
        "preview" => preview_cmd(&config, &args[2..]),
        "batch" => batch_cmd(&config, &args[2..]),
        "help" | "--help" | "-h" => {
            print_usage(&program);
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {}", other);
            print_usage(&program);
            std::process::exit(2);
        }
    };

    if let Err(e) = result {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn print_usage(program: &str) {
    println!("🎨 Chitra - Photo Filter Engine v{}", chitra::VERSION);
    println!();
    println!("Usage: {} [--config <path>] <command> [options]", program);
    println!();
    println!("Commands:");
    println!("  list [--json]                          List all available filters");
    println!("  info <filter>                          Show detailed info about a filter");
    println!("  apply <in> <out|outdir> <filter> [--strength <s>]");
    println!("                                         Filter one image");
    println!("  preview <filter> <out.jpg> [--strength <s>]");
    println!("                                         Render a filter on the sample image");
    println!("  batch <pattern> <outdir> <filter> [--strength <s>]");
    println!("                                         Filter every file matching a glob");
    println!("  help                                   Show this help message");
    println!();
    println!("Strength is between {} and {} (default from config, normally {}).",
        Strength::MIN, Strength::MAX, DEFAULT_STRENGTH);
}

fn list_filters_cmd(json: bool) -> Result<()> {
    let registry = FilterRegistry::global();

    if json {
        let listing: indexmap::IndexMap<_, _> =
            [("available_filters", registry.descriptions())].into_iter().collect();
        println!("{}", serde_json::to_string_pretty(&listing)?);
        return Ok(());
    }

    println!("Available filters ({} total):", registry.len());
    println!();

    for (category, filters) in registry.grouped_by_category() {
        println!("  📁 {}", category.display_name());
        for info in filters {
            println!("      • {} - {}", info.id, info.description);
        }
        println!();
    }
    Ok(())
}

fn filter_info(filter_id: &str) -> Result<()> {
    let registry = FilterRegistry::global();
    let entry = registry
        .resolve(filter_id)
        .map_err(FilterError::from)
        .context("Use 'list' to see available filters")?;
    let info = &entry.info;

    println!("Filter: {}", info.name);
    println!("ID: {}", info.id);
    println!("Category: {}", info.category.display_name());
    println!();
    println!("Description:");
    println!("  {}", info.description);
    println!();
    match &info.strength_effect {
        Some(effect) => println!("Strength: {}", effect),
        None => println!("Strength: ignored"),
    }
    Ok(())
}

/// Remove `--name <value>` from `args`, returning the value.
fn take_option(args: &mut Vec<String>, name: &str) -> Result<Option<String>> {
    let Some(index) = args.iter().position(|a| a == name) else {
        return Ok(None);
    };
    if index + 1 >= args.len() {
        bail!("{} requires a value", name);
    }
    let value = args.remove(index + 1);
    args.remove(index);
    Ok(Some(value))
}

fn parse_strength(args: &mut Vec<String>, config: &Config) -> Result<Strength> {
    match take_option(args, "--strength")? {
        Some(raw) => {
            let value: f32 = raw
                .parse()
                .with_context(|| format!("Invalid strength '{}'", raw))?;
            Ok(Strength::new(value)?)
        }
        None => Ok(config.strength()),
    }
}

fn apply_cmd(config: &Config, args: &[String]) -> Result<()> {
    let mut args = args.to_vec();
    let strength = parse_strength(&mut args, config)?;
    let [input, output, filter] = args.as_slice() else {
        bail!("Usage: apply <input> <output|outdir> <filter> [--strength <s>]");
    };

    let kind: FilterKind = filter.parse().map_err(FilterError::from)?;
    let image = chitra::io::load_image(input)
        .with_context(|| format!("Failed to load {}", input))?;

    // a directory output gets the standard filtered_<filter>_<stem> name
    let output = Path::new(output);
    let output = if output.is_dir() {
        output.join(chitra::io::output_file_name_for(kind, Path::new(input)))
    } else {
        output.to_path_buf()
    };

    println!("⚙️  Applying {} (strength {}) to {}", kind, strength, input);
    let filtered = apply_filter(&image, kind, strength.value())?;
    let format = chitra::io::save_image(&filtered, &output, config.jpeg_quality)
        .with_context(|| format!("Failed to save {}", output.display()))?;

    log::info!("{} -> {} ({})", input, output.display(), format.mime_type());
    println!("✅ Image saved to: {}", output.display());
    Ok(())
}

fn preview_cmd(config: &Config, args: &[String]) -> Result<()> {
    let mut args = args.to_vec();
    let strength = parse_strength(&mut args, config)?;
    let [filter, output] = args.as_slice() else {
        bail!("Usage: preview <filter> <output.jpg> [--strength <s>]");
    };

    let renderer = PreviewRenderer::new(config)?;
    let bytes = renderer.render(filter, strength)?;
    std::fs::write(output, bytes.as_slice())
        .with_context(|| format!("Failed to write {}", output))?;

    println!("✅ Preview of {} saved to: {}", filter, output);
    Ok(())
}

fn batch_cmd(config: &Config, args: &[String]) -> Result<()> {
    let mut args = args.to_vec();
    let strength = parse_strength(&mut args, config)?;
    let [pattern, output_dir, filter] = args.as_slice() else {
        bail!("Usage: batch <pattern> <outdir> <filter> [--strength <s>]");
    };

    let kind: FilterKind = filter.parse().map_err(FilterError::from)?;
    let output_dir = Path::new(output_dir);
    if !output_dir.exists() {
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    }

    let job = BatchJob::from_pattern(
        pattern,
        output_dir,
        kind,
        strength.value(),
        config.jpeg_quality,
    )?;
    println!("⚙️  Processing {} file(s) with {}", job.inputs.len(), kind);

    let report = job.run(FilterRegistry::global(), config.batch.parallel)?;
    for failure in &report.failed {
        eprintln!("⚠️  {}", failure);
    }
    println!("✅ {}", report.summary());

    if !report.is_success() {
        bail!("{} file(s) failed", report.failed.len());
    }
    Ok(())
}
