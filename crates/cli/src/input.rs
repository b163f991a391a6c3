//! Barcode sources: positional arguments, `--file`, and stdin.

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result, bail};

/// One barcode and where it came from.
#[derive(Debug, Clone)]
pub(crate) struct Barcode {
    /// Source label used in diagnostics (e.g. `codes.txt:3`).
    pub(crate) label: String,
    /// The barcode text as read, before cleaning.
    pub(crate) text: String,
}

/// Collect barcodes from arguments (`-` = stdin) and an optional file.
///
/// Files and stdin hold one barcode per line; blank lines are skipped.
pub(crate) fn read_barcodes(args: &[String], file: Option<&str>) -> Result<Vec<Barcode>> {
    let mut out = Vec::new();

    for (i, arg) in args.iter().enumerate() {
        if arg == "-" {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("failed to read barcodes from stdin")?;
            push_lines(&mut out, "<stdin>", &text);
        } else {
            out.push(Barcode {
                label: format!("arg {}", i + 1),
                text: arg.clone(),
            });
        }
    }

    if let Some(path) = file {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read barcode file '{path}'"))?;
        push_lines(&mut out, path, &text);
    }

    if out.is_empty() {
        bail!("no barcodes given; pass them as arguments, with --file, or `-` for stdin");
    }
    Ok(out)
}

fn push_lines(out: &mut Vec<Barcode>, source: &str, text: &str) {
    for (n, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        out.push(Barcode {
            label: format!("{source}:{}", n + 1),
            text: line.to_string(),
        });
    }
}
