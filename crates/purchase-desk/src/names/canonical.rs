//! Canonical rendering of free-text names.
//!
//! Cleanup happens before parsing: runs of whitespace collapse to single
//! spaces, ASCII digits disappear, and ASCII punctuation other than comma,
//! period, and hyphen is dropped. The apostrophe is not in the preserved set
//! ("O'Brien" canonicalizes to "OBRIEN") while the hyphen survives
//! ("Mary-Jane" stays joined).

use super::parser::{HeuristicNameParser, NameParser, ParsedName};

/// Canonical uppercase form: `"LAST, FIRST MIDDLE SUFFIX"`. Titles are
/// dropped; names without a recognized surname render their remaining parts
/// without the comma.
pub fn normalize(raw: &str) -> String {
    normalize_with(&HeuristicNameParser, raw)
}

/// [`normalize`] with an explicit parsing engine.
pub fn normalize_with(parser: &dyn NameParser, raw: &str) -> String {
    render_canonical(&parser.parse(&scrub(raw)))
}

/// `"FIRST LAST"` only, uppercase. Titles, middle names, and suffixes are
/// ignored.
pub fn first_last(raw: &str) -> String {
    first_last_with(&HeuristicNameParser, raw)
}

/// [`first_last`] with an explicit parsing engine.
pub fn first_last_with(parser: &dyn NameParser, raw: &str) -> String {
    let parsed = parser.parse(&scrub(raw));
    format!(
        "{} {}",
        parsed.first.to_uppercase(),
        parsed.last.to_uppercase()
    )
}

/// Collapse whitespace runs, then drop ASCII digits and every ASCII
/// punctuation character except comma, period, and hyphen.
fn scrub(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .chars()
        .filter(|ch| {
            !ch.is_ascii_digit() && (!ch.is_ascii_punctuation() || matches!(ch, ',' | '.' | '-'))
        })
        .collect()
}

fn render_canonical(parsed: &ParsedName) -> String {
    let given = [
        parsed.first.as_str(),
        parsed.middle.as_str(),
        parsed.suffix.as_str(),
    ]
    .iter()
    .filter(|part| !part.is_empty())
    .copied()
    .collect::<Vec<_>>()
    .join(" ");

    let rendered = if parsed.last.is_empty() {
        given
    } else if given.is_empty() {
        parsed.last.clone()
    } else {
        format!("{}, {}", parsed.last, given)
    };

    rendered.to_uppercase()
}
