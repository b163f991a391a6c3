//! Pretty output using ariadne.
//!
//! Converts parser findings into ariadne [`Report`]s drawn over the cleaned
//! barcode, and prints extracted fields as an aligned listing. JSON output
//! is produced directly by the commands in `main.rs`.

use std::io::{self, IsTerminal};

use ariadne::{Color, Config, Fmt, Label, Report, ReportKind, Source};
use gs1_toolchain_ai_tables::{self as tables, AiSpec, LengthKind, ai};
use gs1_toolchain_core::{ParseResult, gtin_check_digit_ok};
use gs1_toolchain_diagnostics::{Diagnostic, Severity};

// ── Output format ───────────────────────────────────────────────────────

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    /// Coloured, source-annotated output (ariadne).
    Pretty,
    /// Machine-readable JSON.
    Json,
}

impl Format {
    /// Use the explicit choice, or detect from whether stdout is a TTY.
    pub(crate) fn resolve_or_detect(explicit: Option<&str>) -> Self {
        match explicit {
            Some("json") => Format::Json,
            Some("pretty") => Format::Pretty,
            // Default: pretty for interactive terminals, JSON for pipes
            _ => {
                if io::stdout().is_terminal() {
                    Format::Pretty
                } else {
                    Format::Json
                }
            }
        }
    }
}

// ── Severity mapping ────────────────────────────────────────────────────

fn report_kind(severity: Severity) -> ReportKind<'static> {
    match severity {
        Severity::Error => ReportKind::Error,
        Severity::Warn => ReportKind::Warning,
        Severity::Info => ReportKind::Advice,
        _ => ReportKind::Warning,
    }
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Error => Color::Red,
        Severity::Warn => Color::Yellow,
        Severity::Info => Color::Blue,
        _ => Color::White,
    }
}

// ── Diagnostics ─────────────────────────────────────────────────────────

/// Render diagnostics against `source` (the cleaned barcode) to stderr.
pub(crate) fn render_diagnostics(source: &str, name: &str, diagnostics: &[Diagnostic]) {
    if diagnostics.is_empty() {
        return;
    }

    let config = Config::default().with_compact(false);
    let mut cache = (name, Source::from(source));

    for diag in diagnostics {
        let Some(span) = &diag.span else {
            eprintln!("error[{}]: {}", diag.id, diag.message);
            continue;
        };
        // Clamp so a fragment at the very end still has something to point at.
        let start = span.start.min(source.len());
        let end = span.end.min(source.len()).max(start);

        let mut builder = Report::build(report_kind(diag.severity), (name, start..end))
            .with_code(diag.id.as_ref())
            .with_message(&diag.message)
            .with_config(config)
            .with_label(
                Label::new((name, start..end))
                    .with_message(label_message(diag))
                    .with_color(severity_color(diag.severity)),
            );

        if let Some(explanation) = diag.explain() {
            builder = builder.with_help(explanation);
        }

        builder.finish().eprint(&mut cache).ok();
    }
}

/// Short label from the context map, falling back to the message.
fn label_message(diag: &Diagnostic) -> String {
    match diag.context.as_ref().and_then(|ctx| ctx.get("ai")) {
        Some(code) => match tables::lookup(code) {
            Some(spec) => format!("AI {code} ({})", spec.name),
            None => format!("read {code:?} here"),
        },
        None => diag.message.clone(),
    }
}

// ── Fields ──────────────────────────────────────────────────────────────

/// Print the extracted segments of one barcode to stdout.
pub(crate) fn print_fields(label: &str, result: &ParseResult) {
    println!("{}", label.fg(Color::Cyan));
    if result.segments.is_empty() {
        println!("  (no fields)");
    }
    for seg in &result.segments {
        let name = tables::lookup(&seg.ai).map_or("?", |spec| spec.name);
        let note = if seg.ai == ai::GTIN && !gtin_check_digit_ok(&seg.value) {
            format!("  {}", "check digit mismatch".fg(Color::Yellow))
        } else {
            String::new()
        };
        println!("  ({}) {name:<10} {}{note}", seg.ai, seg.value);
    }
    if let Some(tail) = &result.raw_tail {
        println!("  {} {tail}", "unparsed:".fg(Color::Red));
    }
}

/// Print the AI dictionary as a table.
pub(crate) fn print_ai_table(specs: &[AiSpec]) {
    println!("{:<4} {:<10} {:<14} {:<13} date", "AI", "name", "length", "type");
    for spec in specs {
        let length = match spec.length {
            LengthKind::Fixed { length } => format!("fixed {length}"),
            LengthKind::Variable { max_length } => format!("up to {max_length}"),
        };
        let date = if spec.is_date { "yes" } else { "" };
        println!(
            "{:<4} {:<10} {:<14} {:<13} {date}",
            spec.code,
            spec.name,
            length,
            spec.data_type.as_str()
        );
    }
}

// ── Summary line ────────────────────────────────────────────────────────

/// Print a coloured summary line to stderr.
///
/// Example: `3 barcodes, 2 errors`
pub(crate) fn print_summary(barcodes: usize, diagnostics: &[Diagnostic]) {
    let (mut errors, mut warnings) = (0usize, 0usize);
    for d in diagnostics {
        match d.severity {
            Severity::Error => errors += 1,
            _ => warnings += 1,
        }
    }

    let s = if barcodes == 1 { "" } else { "s" };
    let mut parts = vec![format!("{barcodes} barcode{s}")];
    if errors > 0 {
        let s = if errors == 1 { "" } else { "s" };
        parts.push(format!("{}", format!("{errors} error{s}").fg(Color::Red)));
    }
    if warnings > 0 {
        let s = if warnings == 1 { "" } else { "s" };
        parts.push(format!(
            "{}",
            format!("{warnings} warning{s}").fg(Color::Yellow)
        ));
    }
    if errors + warnings == 0 {
        parts.push(format!("{}", "ok".fg(Color::Green)));
    }
    eprintln!("{}", parts.join(", "));
}
