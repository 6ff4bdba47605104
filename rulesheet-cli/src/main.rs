use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

// Import from rulesheet-core
use rulesheet_core::{Ruleset, RulesheetConfig, RulesheetProcessor};

// Import CLI utilities
use rulesheet::paths::{clean_filters, ensure_existing_output_dir, ensure_output_dir, ensure_ruleset_dir};

#[derive(Parser)]
#[command(name = "rulesheet")]
#[command(about = "Export migration rulesets to a spreadsheet and flag Spring-specific rules")]
struct Args {
    /// Path to custom config file (YAML format)
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Log more detail to stderr (-v debug, -vv trace). RUST_LOG also works.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Export every ruleset under a directory to a workbook, one sheet each
    Extract {
        /// Directory whose subdirectories are rulesets
        #[arg(long)]
        ruleset_path: PathBuf,

        /// Directory the workbook is written to (created if missing)
        #[arg(long)]
        output_path: PathBuf,

        /// Only export ruleset directories whose name contains one of these
        #[arg(long, value_delimiter = ',')]
        filters: Vec<String>,

        /// Also write the extracted rulesets to this JSON file
        #[arg(long)]
        dump_rules: Option<PathBuf>,

        /// Run the Spring classification right after the export
        #[arg(long)]
        analyze: bool,
    },

    /// Add or refresh the Spring-specific column of an exported workbook
    AnalyzeSpring {
        /// Directory holding a previously exported workbook
        #[arg(long)]
        output_path: PathBuf,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    println!("🦀 Rulesheet");

    let config = RulesheetConfig::load_with_fallback(args.config.as_deref());
    if let Some(config_path) = &args.config {
        println!("📋 Loaded config from: {}", config_path);
    } else {
        println!("📋 Using default config");
    }
    let processor = RulesheetProcessor::new(config);

    let outcome = match &args.command {
        Command::Extract {
            ruleset_path,
            output_path,
            filters,
            dump_rules,
            analyze,
        } => run_extract(
            &processor,
            ruleset_path,
            output_path,
            &clean_filters(filters),
            dump_rules.as_deref(),
            *analyze,
        ),
        Command::AnalyzeSpring { output_path } => run_analyze(&processor, output_path),
    };

    if let Err(e) = outcome {
        eprintln!("❌ {e:#}");
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(log_filter(verbose, std::env::var("RUST_LOG").ok().as_deref()))
        .init();
}

/// `RUST_LOG` when set, `warn` otherwise. `-v`/`-vv` raise the global level on top.
fn log_filter(verbose: u8, rust_log: Option<&str>) -> EnvFilter {
    let filter = rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new("warn"));
    match verbose {
        0 => filter,
        1 => filter.add_directive(tracing::Level::DEBUG.into()),
        _ => filter.add_directive(tracing::Level::TRACE.into()),
    }
}

fn run_extract(
    processor: &RulesheetProcessor,
    ruleset_path: &Path,
    output_path: &Path,
    filters: &[String],
    dump_rules: Option<&Path>,
    analyze: bool,
) -> Result<()> {
    ensure_ruleset_dir(ruleset_path)?;
    if ensure_output_dir(output_path)? {
        println!("📁 Created output directory: {}", output_path.display());
    }

    println!("📄 Reading rulesets from: {}", ruleset_path.display());
    if !filters.is_empty() {
        println!("🔍 Filters: {}", filters.join(", "));
    }

    let rulesets = processor.extract(ruleset_path, Some(filters))?;
    println!("✅ Found {} rulesets", rulesets.len());

    if let Some(dump_path) = dump_rules {
        save_rulesets(&rulesets, dump_path)?;
    }

    let summary = processor.export_rulesets(&rulesets, output_path)?;
    println!("📊 Workbook metrics:");
    println!("   - Sheets: {}", summary.sheets.len());
    println!("   - Rules: {}", summary.total_rules());
    for sheet in &summary.sheets {
        println!("     {} ({} rules)", sheet.name, sheet.rules);
    }
    println!("💾 Workbook saved to: {}", summary.workbook_path.display());

    if analyze {
        run_analyze(processor, output_path)?;
    }

    Ok(())
}

fn run_analyze(processor: &RulesheetProcessor, output_path: &Path) -> Result<()> {
    ensure_existing_output_dir(output_path)?;
    println!("🔬 Classifying: {}", processor.workbook_path(output_path).display());

    let summary = processor.classify(output_path)?;
    for sheet in &summary.sheets {
        let column_note = if sheet.column_added { " (new column)" } else { "" };
        println!(
            "   - {}: {} specific, {} not{}",
            sheet.name, sheet.yes, sheet.no, column_note
        );
    }
    println!(
        "✅ Classified {} sheets: {} specific, {} not",
        summary.sheets.len(),
        summary.total_yes(),
        summary.total_no()
    );
    println!("💾 Workbook updated: {}", summary.workbook_path.display());

    Ok(())
}

#[derive(Serialize)]
struct RuleDump<'a> {
    generated_at: chrono::DateTime<chrono::Utc>,
    ruleset_count: usize,
    rule_count: usize,
    rulesets: &'a [Ruleset],
}

fn save_rulesets(rulesets: &[Ruleset], output_path: &Path) -> Result<()> {
    let dump = RuleDump {
        generated_at: chrono::Utc::now(),
        ruleset_count: rulesets.len(),
        rule_count: rulesets.iter().map(|r| r.rules.len()).sum(),
        rulesets,
    };
    let json = serde_json::to_string_pretty(&dump)?;
    std::fs::write(output_path, json)
        .with_context(|| format!("Failed to write rule dump {}", output_path.display()))?;
    println!("💾 Rules dumped to: {} ({} rules)", output_path.display(), dump.rule_count);
    Ok(())
}
