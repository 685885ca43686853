// Copyright 2026 Hypermesh Foundation. All rights reserved.
// DePIN Acceptance Diagnostics - Acceptance Snapshot Runner
//
// Usage:
//   cargo run --release --bin acceptance -- --input run.json          # Answer a saved run
//   cargo run --release --bin acceptance -- --synthetic --seed 42     # Seeded demo run
//   cargo run --release --bin acceptance -- --synthetic --strict      # Raw grades only
//   cargo run --release --bin acceptance -- --input run.json --json   # Also dump answers as JSON

mod synthetic;

use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use tracing_subscriber::EnvFilter;

use depin_diagnostics::{
    evaluate_all_questions, standard_registry, summarize_coverage, validate_registry_coverage, AcceptanceReport,
    AnswerContext, DiagnosticError, PromotionPolicy, QuestionAnswer, Result,
};

// ─── CLI Parsing ────────────────────────────────────────────────────────────

struct CliArgs {
    input: Option<PathBuf>,
    synthetic: bool,
    seed: u64,
    weeks: u32,
    output_dir: PathBuf,
    as_of_date: Option<String>,
    strict: bool,
    promotion_threshold: Option<Decimal>,
    json: bool,
    verbose: bool,
}

fn parse_args() -> CliArgs {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let mut cli = CliArgs {
        input: None,
        synthetic: false,
        seed: 42,
        weeks: 26,
        output_dir: PathBuf::from("output/spreadsheet"),
        as_of_date: None,
        strict: false,
        promotion_threshold: None,
        json: false,
        verbose: false,
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--input" => {
                i += 1;
                if i < args.len() {
                    cli.input = Some(PathBuf::from(&args[i]));
                }
            }
            "--synthetic" => {
                cli.synthetic = true;
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    cli.seed = args[i].parse().unwrap_or(42);
                }
            }
            "--weeks" => {
                i += 1;
                if i < args.len() {
                    cli.weeks = args[i].parse().unwrap_or(26);
                }
            }
            "--output-dir" => {
                i += 1;
                if i < args.len() {
                    cli.output_dir = PathBuf::from(&args[i]);
                }
            }
            "--as-of-date" => {
                i += 1;
                if i < args.len() {
                    cli.as_of_date = Some(args[i].clone());
                }
            }
            "--strict" => {
                cli.strict = true;
            }
            "--promotion-threshold" => {
                i += 1;
                if i < args.len() {
                    cli.promotion_threshold = Decimal::from_str(&args[i]).ok();
                }
            }
            "--json" => {
                cli.json = true;
            }
            "--verbose" | "-v" => {
                cli.verbose = true;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    cli
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

// ─── Pipeline ───────────────────────────────────────────────────────────────

fn load_context(cli: &CliArgs) -> Result<AnswerContext> {
    match (&cli.input, cli.synthetic) {
        (Some(path), _) => {
            let json = std::fs::read_to_string(path)?;
            AnswerContext::from_json(&json)
        }
        (None, true) => Ok(synthetic::synthetic_context(cli.seed, cli.weeks.max(1))),
        (None, false) => Err(DiagnosticError::Io(std::io::Error::new(
            std::io::ErrorKind::InvalidInput,
            "either --input PATH or --synthetic is required",
        ))),
    }
}

fn promotion_policy(cli: &CliArgs) -> PromotionPolicy {
    let policy = match cli.promotion_threshold {
        Some(threshold) => PromotionPolicy::with_threshold(threshold),
        None => PromotionPolicy::default(),
    };
    if cli.strict {
        PromotionPolicy { enabled: false, ..policy }
    } else {
        policy
    }
}

fn date_tag(cli: &CliArgs) -> Result<String> {
    match &cli.as_of_date {
        Some(date) => NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map(|d| d.format("%Y-%m-%d").to_string())
            .map_err(|e| {
                DiagnosticError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("invalid --as-of-date {}: {}", date, e),
                ))
            }),
        None => Ok(Utc::now().format("%Y-%m-%d").to_string()),
    }
}

fn write_answers_json(dir: &Path, date_tag: &str, answers: &[QuestionAnswer]) -> Result<PathBuf> {
    let path = dir.join(format!("dashboard_acceptance_answers_{}.json", date_tag));
    let json = serde_json::to_string_pretty(answers)?;
    std::fs::write(&path, json)?;
    info!(path = %path.display(), "Wrote answer dump");
    Ok(path)
}

fn run(cli: &CliArgs) -> Result<bool> {
    let registry = standard_registry();
    let drift = validate_registry_coverage(registry);
    if !drift.valid {
        eprintln!(
            "Registry drift: missing [{}] unexpected [{}]",
            drift.missing.join(", "),
            drift.unexpected.join(", ")
        );
    }

    let ctx = load_context(cli)?;
    let tag = date_tag(cli)?;
    let policy = promotion_policy(cli);

    println!("\n  DePIN Acceptance Snapshot");
    println!(
        "  Run: {} | Weeks: {} | Baseline: {} | Date: {}",
        ctx.run_id,
        ctx.aggregated.len(),
        if ctx.baseline().is_some() { "yes" } else { "no" },
        tag
    );

    let answers = evaluate_all_questions(&ctx, registry);
    let coverage = summarize_coverage(&answers);
    let report = AcceptanceReport::build(&answers, registry, policy)?;
    let paths = report.write_to(&cli.output_dir, &tag)?;
    if cli.json {
        let path = write_answers_json(&cli.output_dir, &tag, &answers)?;
        println!("  Answer dump: {}", path.display());
    }

    // ─── Summary ────────────────────────────────────────────────────────

    println!("  {}", "-".repeat(72));
    println!("  {:<24} {:>4} {:>4} {:>4} {:>4} {:>10} {:>10}", "Section", "Qs", "Y", "P", "N", "Direct%", "Practical%");
    for row in &report.coverage {
        println!(
            "  {:<24} {:>4} {:>4} {:>4} {:>4} {:>9.1}% {:>9.1}%  {}",
            row.section,
            row.questions,
            row.y,
            row.p,
            row.n,
            row.direct_coverage_pct,
            row.practical_coverage_pct,
            if row.passes() { "PASS" } else { "FAIL" }
        );
    }
    println!("  {}", "-".repeat(72));

    let operational = report.operational_counts();
    let raw = report.raw_counts();
    println!(
        "  Rows: {} (operational Y={}, P={}, N={}; raw Y={}, P={}, N={}; promoted={})",
        report.rows.len(),
        operational.y,
        operational.p,
        operational.n,
        raw.y,
        raw.p,
        raw.n,
        report.promoted()
    );
    if policy.enabled {
        println!("  Operational promotion: enabled (threshold={:.2})", policy.threshold);
    } else {
        println!("  Operational promotion: disabled");
    }
    println!("  Raw practical coverage: {:.1}%", coverage.total.practical_coverage_pct);
    println!("  Coverage summary: {}", paths.coverage.display());
    println!("  Answer snapshot: {}", paths.answers.display());
    println!("  Missing snapshot: {}\n", paths.missing.display());

    Ok(drift.valid)
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() {
    let cli = parse_args();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(true) => {}
        Ok(false) => std::process::exit(2),
        Err(err) => {
            eprintln!("  Acceptance snapshot failed: {}", err);
            std::process::exit(1);
        }
    }
}
