//! JSONC normalisation for the diagnostics table and parser config files.
//!
//! Handles:
//! - `//` line comments and `/* ... */` block comments
//! - trailing commas before `}` or `]`
//! - string literals (including escapes) are left untouched

/// Turn JSONC text into plain JSON that `serde_json` accepts.
///
/// Comments are removed first, then commas that are followed only by
/// whitespace and a closing bracket are dropped.
#[must_use]
pub fn strip_jsonc(input: &str) -> String {
    drop_trailing_commas(&strip_comments(input))
}

/// Remove `//` and `/* */` comments, keeping string contents verbatim.
#[must_use]
pub fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    let mut in_str = false;

    while let Some(c) = chars.next() {
        if in_str {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_str = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_str = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                // Keep the newline so line numbers in serde errors stay accurate.
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
            }
            _ => out.push(c),
        }
    }
    out
}

/// Drop commas that directly precede a closing `}` or `]`.
///
/// Expects comment-free input.
#[must_use]
pub fn drop_trailing_commas(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len());
    let mut in_str = false;
    let mut i = 0usize;

    while i < chars.len() {
        let c = chars[i];
        if in_str {
            out.push(c);
            if c == '\\' && i + 1 < chars.len() {
                i += 1;
                out.push(chars[i]);
            } else if c == '"' {
                in_str = false;
            }
            i += 1;
            continue;
        }
        if c == '"' {
            in_str = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|ch| !ch.is_whitespace());
            if matches!(next, Some('}') | Some(']')) {
                i += 1;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_line_and_block_comments() {
        let input = r#"
{
  // parser mode
  "mode": "strict", /* separator */ "fnc1": "GS"
}
"#;
        let stripped = strip_jsonc(input);
        assert!(!stripped.contains("parser mode"));
        assert!(!stripped.contains("separator"));
        assert!(stripped.contains("\"mode\": \"strict\""));
        assert!(stripped.contains("\"fnc1\": \"GS\""));
    }

    #[test]
    fn preserves_comment_like_text_in_strings() {
        let input = r#"{ "url": "http://example.com/*x*/", "note":"//keep" }"#;
        let stripped = strip_jsonc(input);
        assert!(stripped.contains("http://example.com/*x*/"));
        assert!(stripped.contains("\"note\":\"//keep\""));
    }

    #[test]
    fn drops_trailing_commas() {
        let input = "{ \"a\": [1, 2, ], \"b\": 3,\n}";
        assert_eq!(strip_jsonc(input), "{ \"a\": [1, 2 ], \"b\": 3\n}");
    }

    #[test]
    fn keeps_commas_inside_strings() {
        let input = r#"{ "fnc1": ",]" }"#;
        assert_eq!(strip_jsonc(input), input);
    }

    #[test]
    fn escaped_quote_does_not_end_string() {
        let input = r#"{ "a": "say \"hi\" // not a comment" }"#;
        assert_eq!(strip_jsonc(input), input);
    }

    #[test]
    fn comment_lines_keep_line_count() {
        let input = "{\n// one\n/* two\nthree */\n\"a\": 1\n}";
        assert_eq!(strip_jsonc(input).lines().count(), input.lines().count());
    }
}
