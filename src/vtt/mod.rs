//! WebVTT caption-file cleanup.

use regex::Regex;
use std::sync::OnceLock;

/// Matches inline cue markup like `<c>`, `<b>` or `<00:00:01.319>`.
fn inline_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]+>").expect("inline tag pattern is valid"))
}

/// Reduce a WebVTT caption file to its cue text as plain text.
///
/// Header, metadata, timing and cue-index lines are dropped; inline markup on
/// surviving lines is replaced with spaces. Always succeeds and may return an
/// empty string for degenerate input.
pub fn clean_vtt(raw: &str) -> String {
    let mut kept = Vec::new();

    for line in raw.lines() {
        let stripped = line.trim();
        if stripped.is_empty() {
            continue;
        }
        if stripped.eq_ignore_ascii_case("WEBVTT") {
            continue;
        }
        if stripped.contains("-->") {
            continue;
        }
        // Bare cue index
        if stripped.bytes().all(|b| b.is_ascii_digit()) {
            continue;
        }
        let lower = stripped.to_ascii_lowercase();
        if lower.starts_with("kind:") || lower.starts_with("language:") {
            continue;
        }
        kept.push(inline_tag_re().replace_all(stripped, " ").into_owned());
    }

    kept.join(" ").replace("  ", " ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cleans_a_minimal_cue() {
        let raw = "WEBVTT\n\n1\n00:00:00.000 --> 00:00:02.000\nHello <b>world</b>\n";
        assert_eq!(clean_vtt(raw), "Hello world");
    }

    #[test]
    fn drops_header_metadata_and_timing_lines() {
        let raw = "webvtt\nKind: captions\nLanguage: en\n\n00:00:01.000 --> 00:00:03.000\nfirst line\n2\n00:00:03.000 --> 00:00:05.000\nsecond line\n";
        assert_eq!(clean_vtt(raw), "first line second line");
    }

    #[test]
    fn strips_inline_tags() {
        let raw = "<c.colorE5E5E5>styled</c> and <00:00:01.319>timed";
        assert_eq!(clean_vtt(raw), "styled and timed");
    }

    #[test]
    fn is_idempotent_on_cleaned_output() {
        let raw = "WEBVTT\n\n1\n00:00:00.000 --> 00:00:02.000\nHello <b>world</b>\n";
        let cleaned = clean_vtt(raw);
        assert_eq!(clean_vtt(&cleaned), cleaned);
    }

    #[test]
    fn keeps_lines_mixing_digits_and_text() {
        assert_eq!(clean_vtt("route 66"), "route 66");
    }

    #[test]
    fn degenerate_input_yields_empty_string() {
        assert_eq!(clean_vtt(""), "");
        assert_eq!(clean_vtt("WEBVTT\n\n\n"), "");
        assert_eq!(clean_vtt("1\n2\n3\n"), "");
    }
}
