use std::path::PathBuf;
use std::process;

use appearances_core::config::EditConfig;
use appearances_core::pipeline::{RunOptions, audit_file, run};
use appearances_render::{
    JsonStyle, TextRenderOptions, render_audit_json, render_audit_text, render_report_json,
    render_report_text,
};
use clap::{ArgAction, Parser};
use serde_json::Value as JsonValue;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    #[arg(value_name = "APPEARANCES.DAT")]
    input: PathBuf,
    /// Where the patched catalog is written.
    #[arg(long, short, value_name = "PATH")]
    output: Option<PathBuf>,
    /// TOML file with `[[edit]]` tables.
    #[arg(long, short, value_name = "EDITS.TOML")]
    config: Option<PathBuf>,
    #[arg(long)]
    json: bool,
    #[arg(long = "dry-run")]
    dry_run: bool,
    /// Decode and report unknown fields only.
    #[arg(
        long = "audit-only",
        conflicts_with = "output",
        conflicts_with = "config",
        conflicts_with = "dry_run"
    )]
    audit_only: bool,
    /// -v lists every unknown field and logs progress, -vv adds per-edit detail.
    #[arg(long, short, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_json(value: &JsonValue) {
    let rendered = serde_json::to_string_pretty(value).unwrap_or_else(|e| {
        eprintln!("Error rendering JSON output: {e}");
        process::exit(1);
    });
    println!("{rendered}");
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let text_options = TextRenderOptions {
        verbose: cli.verbose > 0,
    };

    if cli.audit_only {
        let report = audit_file(&cli.input).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        });
        if cli.json {
            print_json(&render_audit_json(&report, JsonStyle::CanonicalV1));
        } else {
            print!("{}", render_audit_text(&report, text_options));
        }
        return;
    }

    let Some(output) = cli.output.as_deref() else {
        eprintln!("--output <PATH> is required unless --audit-only is given");
        process::exit(2);
    };

    let edits = match cli.config.as_deref() {
        Some(path) => {
            EditConfig::load(path)
                .unwrap_or_else(|e| {
                    eprintln!("Error: {e}");
                    process::exit(1);
                })
                .edit
        }
        None => Vec::new(),
    };
    tracing::debug!(edits = edits.len(), "loaded edits");

    let options = RunOptions {
        dry_run: cli.dry_run,
    };
    let report = run(&cli.input, output, &edits, options).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });

    if cli.json {
        print_json(&render_report_json(&report, JsonStyle::CanonicalV1));
    } else {
        print!("{}", render_report_text(&report, text_options));
    }
}
