mod input;
mod render;
mod telemetry;

use std::fs;
use std::process;

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use gs1_toolchain_ai_tables::AI_TABLE;
use gs1_toolchain_config::{ParserConfig, load_config_from_str};
use gs1_toolchain_core::{
    DateConversion, Mode, ParseOptions, ParseResult, convert_date, gtin_check_digit_ok,
    parse_barcode, parse_with_options,
};
use gs1_toolchain_diagnostics::{self as diag, Diagnostic, codes};
use tracing::{debug, info};

use crate::input::{Barcode, read_barcodes};
use crate::render::{Format, print_ai_table, print_fields, print_summary, render_diagnostics};

// ── CLI definition ──────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(
    name = "gs1",
    version,
    about = "GS1 toolchain: split and validate GS1 application identifier barcodes"
)]
struct Cli {
    /// Output mode: "pretty" for coloured terminal output, "json" for
    /// machine-readable JSON. Defaults to "pretty" when stdout is a TTY,
    /// "json" otherwise.
    #[arg(long, global = true, value_parser = ["pretty", "json"])]
    output: Option<String>,

    /// Log more (-v debug, -vv trace). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Cmd,
}

/// Barcode sources and parser settings shared by `parse` and `check`.
#[derive(Args, Debug)]
struct ParseArgs {
    /// Barcode strings. `-` reads one barcode per line from stdin.
    barcodes: Vec<String>,

    /// Read barcodes from a file, one per line.
    #[arg(long)]
    file: Option<String>,

    /// Stop at the first problem and report the rest as unparsed.
    #[arg(long, conflicts_with = "lenient")]
    strict: bool,

    /// Skip past problems and keep scanning (the default).
    #[arg(long)]
    lenient: bool,

    /// FNC1 separator: "GS", "FNC1", or a single ASCII character.
    #[arg(long)]
    fnc1: Option<String>,

    /// Parser configuration file (JSON or JSONC). Flags override it.
    #[arg(long, env = "GS1_CONFIG")]
    config: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Parse barcodes and print the extracted fields.
    Parse {
        #[command(flatten)]
        args: ParseArgs,
        /// Print flat records (gtin, expiryDate, batchNumber, ...) as JSON.
        /// Always lenient without a separator, so parser settings are refused.
        #[arg(long, conflicts_with_all = ["strict", "lenient", "fnc1", "config"])]
        compat: bool,
    },

    /// Check barcodes and report problems only (exit 1 on errors).
    Check {
        #[command(flatten)]
        args: ParseArgs,
    },

    /// Convert a YYMMDD date to YYYY-MM-DD.
    Date { yymmdd: String },

    /// List the supported application identifiers.
    Ais,

    /// Explain a diagnostic ID (e.g. GS1201). Lists every ID when omitted.
    Explain { id: Option<String> },
}

impl ParseArgs {
    /// Resolve options: flags over the config file over defaults.
    fn options(&self) -> Result<ParseOptions> {
        let file_layer = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file '{path}'"))?;
                load_config_from_str(&text)
                    .with_context(|| format!("invalid config file '{path}'"))?
            }
            None => ParserConfig::default(),
        };

        let mode = if self.strict {
            Some(Mode::Strict)
        } else if self.lenient {
            Some(Mode::Lenient)
        } else {
            None
        };
        let flags = ParserConfig {
            mode,
            fnc1: self.fnc1.clone(),
        };

        let merged = file_layer.overlay(flags);
        debug!(?merged, "resolved parser config");
        merged.to_options().context("invalid parser options")
    }
}

// ── Main ────────────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();
    telemetry::init_tracing(cli.verbose);
    let format = Format::resolve_or_detect(cli.output.as_deref());

    if let Err(err) = run(cli.cmd, format) {
        report_failure(&err, format);
        process::exit(1);
    }
}

fn run(cmd: Cmd, format: Format) -> Result<()> {
    match cmd {
        Cmd::Parse { args, compat } => cmd_parse(&args, compat, format),
        Cmd::Check { args } => cmd_check(&args, format),
        Cmd::Date { yymmdd } => cmd_date(&yymmdd, format),
        Cmd::Ais => cmd_ais(format),
        Cmd::Explain { id } => cmd_explain(id.as_deref(), format),
    }
}

/// Print a command failure: a JSON envelope on stdout, or a message on stderr.
fn report_failure(err: &anyhow::Error, format: Format) {
    match format {
        Format::Json => {
            let out = serde_json::json!({
                "success": false,
                "error": "command_failed",
                "message": format!("{err:#}"),
            });
            println!("{out:#}");
        }
        Format::Pretty => eprintln!("error: {err:#}"),
    }
}

// ── Commands ────────────────────────────────────────────────────────────

fn parse_all(args: &ParseArgs) -> Result<Vec<(Barcode, ParseResult)>> {
    let options = args.options()?;
    let barcodes = read_barcodes(&args.barcodes, args.file.as_deref())?;
    info!(count = barcodes.len(), mode = ?options.mode, "parsing barcodes");
    Ok(barcodes
        .into_iter()
        .map(|b| {
            let result = parse_with_options(&b.text, &options);
            (b, result)
        })
        .collect())
}

fn cmd_parse(args: &ParseArgs, compat: bool, format: Format) -> Result<()> {
    if compat {
        let barcodes = read_barcodes(&args.barcodes, args.file.as_deref())?;
        let records: Vec<_> = barcodes.iter().map(|b| parse_barcode(&b.text)).collect();
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    let parsed = parse_all(args)?;
    let diagnostics: Vec<Diagnostic> = parsed.iter().flat_map(|(_, r)| r.diagnostics()).collect();

    match format {
        Format::Json => {
            let results: Vec<_> = parsed
                .iter()
                .map(|(b, r)| {
                    serde_json::json!({
                        "source": b.label,
                        "input": b.text,
                        "result": r,
                        "gtin_check_digit_ok": r.primary_gtin.as_deref().map(gtin_check_digit_ok),
                    })
                })
                .collect();
            let out = serde_json::json!({
                "ok": !has_errors(&diagnostics),
                "results": results,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Fields to stdout, diagnostics to stderr.
            for (b, r) in &parsed {
                print_fields(&b.label, r);
                render_diagnostics(&r.raw, &b.label, &r.diagnostics());
            }
            print_summary(parsed.len(), &diagnostics);
        }
    }

    exit_on_errors(&diagnostics);
    Ok(())
}

fn cmd_check(args: &ParseArgs, format: Format) -> Result<()> {
    let parsed = parse_all(args)?;
    let diagnostics: Vec<Diagnostic> = parsed.iter().flat_map(|(_, r)| r.diagnostics()).collect();

    match format {
        Format::Json => {
            let results: Vec<_> = parsed
                .iter()
                .map(|(b, r)| {
                    serde_json::json!({
                        "source": b.label,
                        "ok": r.is_clean(),
                        "diagnostics": r.diagnostics(),
                    })
                })
                .collect();
            let out = serde_json::json!({
                "ok": !has_errors(&diagnostics),
                "results": results,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            for (b, r) in &parsed {
                render_diagnostics(&r.raw, &b.label, &r.diagnostics());
            }
            print_summary(parsed.len(), &diagnostics);
        }
    }

    exit_on_errors(&diagnostics);
    Ok(())
}

fn cmd_date(yymmdd: &str, format: Format) -> Result<()> {
    let conversion = DateConversion::from(convert_date(yymmdd));

    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(&conversion)?),
        Format::Pretty => match &conversion.error {
            None => println!("{}", conversion.date),
            Some(e) => eprintln!("invalid date {yymmdd:?}: {e}"),
        },
    }

    if !conversion.valid {
        process::exit(1);
    }
    Ok(())
}

fn cmd_ais(format: Format) -> Result<()> {
    match format {
        Format::Json => println!("{}", serde_json::to_string_pretty(AI_TABLE)?),
        Format::Pretty => print_ai_table(AI_TABLE),
    }
    Ok(())
}

fn cmd_explain(id: Option<&str>, format: Format) -> Result<()> {
    let Some(id) = id else {
        return list_codes(format);
    };

    match format {
        Format::Json => {
            let out = serde_json::json!({
                "id": id,
                "severity": diag::default_severity(id),
                "explanation": diag::explain(id),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            // Explanation is the expected output: stdout, not stderr.
            if let Some(text) = diag::explain(id) {
                use ariadne::Fmt;
                println!("{}: {}", id.fg(ariadne::Color::Cyan), text);
            } else {
                println!("{id}: (no explanation available)");
            }
        }
    }
    Ok(())
}

fn list_codes(format: Format) -> Result<()> {
    match format {
        Format::Json => {
            let out: Vec<_> = codes::ALL
                .iter()
                .map(|id| {
                    serde_json::json!({
                        "id": id,
                        "severity": diag::default_severity(id),
                        "explanation": diag::explain(id),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Format::Pretty => {
            for id in codes::ALL {
                println!("{id}  {}", diag::explain(id).unwrap_or_default());
            }
        }
    }
    Ok(())
}

// ── Helpers ─────────────────────────────────────────────────────────────

fn has_errors(diagnostics: &[Diagnostic]) -> bool {
    diagnostics.iter().any(Diagnostic::is_error)
}

/// Exit with code 1 if any diagnostic is an error.
/// Warnings and info do not cause a non-zero exit.
fn exit_on_errors(diagnostics: &[Diagnostic]) {
    if has_errors(diagnostics) {
        process::exit(1);
    }
}
