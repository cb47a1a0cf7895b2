//! Jira wiki markup to terminal escapes for issue descriptions.

use regex::Regex;
use tracing::warn;

const BOLD: &str = "\x1b[1m$1\x1b[22m";
const RED: &str = "\x1b[31m";
const DEFAULT_COLOR: &str = "\x1b[39m";
const FRAMED: &str = "\x1b[51m$1\x1b[54m";

/// Renders `*bold*` (within a single line), `{color:red}...{color}` and
/// `{quote}...{quote}` as ANSI escapes. Other markup is left as is.
pub fn format_description(text: &str) -> String {
    let mut result = match compile(r"\*([^*\n]*)\*") {
        Some(bold) => bold.replace_all(text, BOLD).into_owned(),
        None => text.to_string(),
    };
    result = result
        .replace("{color:red}", RED)
        .replace("{color}", DEFAULT_COLOR);
    if let Some(quote) = compile(r"(?s)\{quote\}(.*)\{quote\}") {
        result = quote.replace_all(&result, FRAMED).into_owned();
    }
    result
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(re) => Some(re),
        Err(e) => {
            warn!("Failed to compile regex pattern '{}': {}", pattern, e);
            None
        }
    }
}
