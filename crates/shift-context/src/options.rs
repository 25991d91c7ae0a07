// SPDX-FileCopyrightText: 2026 Shift Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Response post-processing: numbered-list extraction and choice resolution.
//!
//! When a reply contains a numbered list, the entries become selectable
//! options; a purely numeric follow-up message resolves against the prior
//! option list to recover the chosen text.

use std::sync::OnceLock;

use regex::Regex;

fn numbered_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d+)\.\s*(.*)$").unwrap())
}

fn contains_numbered_item(text: &str) -> bool {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+\.").unwrap())
        .is_match(text)
}

fn numeric_reply_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[1-9]\d*$").unwrap())
}

/// Extracts numbered-list entries from a reply, prefix stripped, in order.
///
/// Returns an empty vec when the reply carries no numbered list at all.
pub fn parse_options(text: &str) -> Vec<String> {
    if !contains_numbered_item(text) {
        return Vec::new();
    }

    text.lines()
        .filter_map(|line| {
            numbered_line_re()
                .captures(line)
                .map(|caps| caps[2].trim().to_string())
        })
        .collect()
}

/// Resolves a purely numeric reply against the prior option list.
///
/// `"2"` against three options picks the second; out-of-range numbers and
/// non-numeric replies resolve to `None` (the option list is never consulted
/// for the latter).
pub fn resolve_choice(options: &[String], reply: &str) -> Option<String> {
    let trimmed = reply.trim();
    if !numeric_reply_re().is_match(trimmed) {
        return None;
    }
    let index = trimmed.parse::<usize>().ok()?.checked_sub(1)?;
    options.get(index).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_reply_parses_into_options() {
        let reply = "1. Go for a walk\n2. Call a friend\n3. Write in journal";
        assert_eq!(
            parse_options(reply),
            vec![
                "Go for a walk".to_string(),
                "Call a friend".to_string(),
                "Write in journal".to_string(),
            ]
        );
    }

    #[test]
    fn plain_reply_yields_no_options() {
        assert!(parse_options("Take it one step at a time.").is_empty());
    }

    #[test]
    fn surrounding_prose_is_ignored() {
        let reply = "Here are some ideas:\n1. Stretch\n2. Hydrate\nPick whichever feels right.";
        assert_eq!(
            parse_options(reply),
            vec!["Stretch".to_string(), "Hydrate".to_string()]
        );
    }

    #[test]
    fn indented_numbered_lines_still_parse() {
        let reply = "  1. First\n  2. Second";
        assert_eq!(
            parse_options(reply),
            vec!["First".to_string(), "Second".to_string()]
        );
    }

    #[test]
    fn numeric_reply_resolves_to_option_text() {
        let options = vec![
            "Go for a walk".to_string(),
            "Call a friend".to_string(),
            "Write in journal".to_string(),
        ];
        assert_eq!(
            resolve_choice(&options, "2"),
            Some("Call a friend".to_string())
        );
    }

    #[test]
    fn out_of_range_number_leaves_choice_unset() {
        let options = vec!["a".to_string(), "b".to_string(), "c".to_string()];
        assert_eq!(resolve_choice(&options, "5"), None);
        assert_eq!(resolve_choice(&options, "0"), None);
    }

    #[test]
    fn non_numeric_reply_never_consults_options() {
        let options = vec!["a".to_string()];
        assert_eq!(resolve_choice(&options, "the first one"), None);
        assert_eq!(resolve_choice(&options, "1a"), None);
        assert_eq!(resolve_choice(&options, ""), None);
    }

    #[test]
    fn numeric_reply_with_whitespace_resolves() {
        let options = vec!["a".to_string(), "b".to_string()];
        assert_eq!(resolve_choice(&options, " 1 "), Some("a".to_string()));
    }
}
