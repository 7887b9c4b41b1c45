//! Heuristic human-name parsing behind a narrow, swappable interface.
//!
//! The engine understands the comma-reversed form ("Last, First"), honorific
//! titles, generational and professional suffixes, and compound surnames
//! joined by particles ("van", "de la", "Mac"). Parsing never fails: input
//! that defies the heuristics degrades to a best-effort split.

/// Structured name components. Absent parts are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedName {
    pub title: String,
    pub first: String,
    pub middle: String,
    pub last: String,
    pub suffix: String,
}

/// Parsing seam so the heuristic engine stays swappable without touching
/// call sites.
pub trait NameParser: Send + Sync {
    fn parse(&self, input: &str) -> ParsedName;
}

const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "miss", "mx", "dr", "prof", "professor", "rev", "hon", "sir", "dame",
    "capt", "captain", "lt", "sgt", "col", "maj", "gen",
];

const SUFFIXES: &[&str] = &[
    "jr", "sr", "ii", "iii", "iv", "v", "esq", "phd", "md", "dds", "dvm", "do", "jd", "cpa",
];

const SURNAME_PARTICLES: &[&str] = &[
    "van", "von", "de", "del", "della", "der", "den", "di", "da", "do", "dos", "du", "la", "le",
    "mac", "mc", "st", "bin", "ibn", "al", "el",
];

/// Default heuristic engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicNameParser;

impl NameParser for HeuristicNameParser {
    fn parse(&self, input: &str) -> ParsedName {
        if input.contains(',') {
            parse_comma_form(input)
        } else {
            parse_natural_order(input)
        }
    }
}

/// Case-insensitive token key with any trailing period removed, so "Jr.",
/// "jr" and "JR" classify identically.
fn fold(token: &str) -> String {
    token.trim_end_matches('.').to_ascii_lowercase()
}

fn is_title(token: &str) -> bool {
    TITLES.contains(&fold(token).as_str())
}

fn is_suffix(token: &str) -> bool {
    SUFFIXES.contains(&fold(token).as_str())
}

fn is_particle(token: &str) -> bool {
    SURNAME_PARTICLES.contains(&fold(token).as_str())
}

/// "Last, First ...": everything before the first comma is the surname; a
/// later segment made entirely of suffix tokens ("Public, John, Jr.") joins
/// the suffix instead of the given names.
fn parse_comma_form(input: &str) -> ParsedName {
    let mut segments = input
        .split(',')
        .map(str::trim)
        .filter(|segment| !segment.is_empty());

    let last = match segments.next() {
        Some(segment) => segment.to_string(),
        None => return ParsedName::default(),
    };

    let mut parsed = ParsedName {
        last,
        ..ParsedName::default()
    };

    let mut suffixes: Vec<&str> = Vec::new();
    for segment in segments {
        let tokens: Vec<&str> = segment.split_whitespace().collect();
        if !tokens.is_empty() && tokens.iter().all(|token| is_suffix(token)) {
            suffixes.extend(tokens);
        } else if parsed.first.is_empty() {
            apply_given_names(&mut parsed, tokens);
        }
    }
    if !suffixes.is_empty() {
        let tail = suffixes.join(" ");
        if parsed.suffix.is_empty() {
            parsed.suffix = tail;
        } else {
            parsed.suffix = format!("{} {}", parsed.suffix, tail);
        }
    }

    parsed
}

fn parse_natural_order(input: &str) -> ParsedName {
    let mut tokens: Vec<&str> = input.split_whitespace().collect();
    let mut parsed = ParsedName::default();

    let mut titles: Vec<&str> = Vec::new();
    while tokens.first().is_some_and(|token| is_title(token)) {
        titles.push(tokens.remove(0));
    }
    parsed.title = titles.join(" ");

    let mut suffixes: Vec<&str> = Vec::new();
    while tokens.len() > 1 && tokens.last().is_some_and(|token| is_suffix(token)) {
        suffixes.insert(0, tokens.pop().expect("checked non-empty"));
    }
    if tokens.len() == 1 && is_suffix(tokens[0]) && !parsed.title.is_empty() {
        suffixes.insert(0, tokens.pop().expect("checked non-empty"));
    }
    parsed.suffix = suffixes.join(" ");

    match tokens.len() {
        0 => {}
        1 => parsed.first = tokens[0].to_string(),
        len => {
            // Pull the surname left through particles: "Ludwig van Beethoven"
            // keeps "van Beethoven" together.
            let mut last_start = len - 1;
            while last_start > 1 && is_particle(tokens[last_start - 1]) {
                last_start -= 1;
            }
            parsed.first = tokens[0].to_string();
            parsed.middle = tokens[1..last_start].join(" ");
            parsed.last = tokens[last_start..].join(" ");
        }
    }

    parsed
}

/// Title / first / middle / trailing-suffix split for the given-names part of
/// a comma-reversed name.
fn apply_given_names(parsed: &mut ParsedName, mut tokens: Vec<&str>) {
    let mut titles: Vec<&str> = Vec::new();
    while tokens.first().is_some_and(|token| is_title(token)) {
        titles.push(tokens.remove(0));
    }
    if parsed.title.is_empty() {
        parsed.title = titles.join(" ");
    }

    let mut suffixes: Vec<&str> = Vec::new();
    while tokens.len() > 1 && tokens.last().is_some_and(|token| is_suffix(token)) {
        suffixes.insert(0, tokens.pop().expect("checked non-empty"));
    }
    parsed.suffix = suffixes.join(" ");

    if let Some((first, middle)) = tokens.split_first() {
        parsed.first = first.to_string();
        parsed.middle = middle.join(" ");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> ParsedName {
        HeuristicNameParser.parse(input)
    }

    #[test]
    fn natural_order_first_last() {
        let parsed = parse("john smith");
        assert_eq!(parsed.first, "john");
        assert_eq!(parsed.last, "smith");
        assert!(parsed.middle.is_empty());
    }

    #[test]
    fn comma_reversed_form() {
        let parsed = parse("Smith, John Quincy");
        assert_eq!(parsed.last, "Smith");
        assert_eq!(parsed.first, "John");
        assert_eq!(parsed.middle, "Quincy");
    }

    #[test]
    fn titles_and_suffixes_are_recognized() {
        let parsed = parse("Dr. Jane Q. Public III");
        assert_eq!(parsed.title, "Dr.");
        assert_eq!(parsed.first, "Jane");
        assert_eq!(parsed.middle, "Q.");
        assert_eq!(parsed.last, "Public");
        assert_eq!(parsed.suffix, "III");
    }

    #[test]
    fn suffix_segment_after_second_comma() {
        let parsed = parse("Public, John Quincy, Jr.");
        assert_eq!(parsed.last, "Public");
        assert_eq!(parsed.first, "John");
        assert_eq!(parsed.middle, "Quincy");
        assert_eq!(parsed.suffix, "Jr.");
    }

    #[test]
    fn surname_particles_stay_with_the_surname() {
        let parsed = parse("Ludwig van Beethoven");
        assert_eq!(parsed.first, "Ludwig");
        assert_eq!(parsed.last, "van Beethoven");

        let parsed = parse("Oscar de la Renta");
        assert_eq!(parsed.first, "Oscar");
        assert_eq!(parsed.last, "de la Renta");
    }

    #[test]
    fn single_token_is_a_given_name() {
        let parsed = parse("Cher");
        assert_eq!(parsed.first, "Cher");
        assert!(parsed.last.is_empty());
    }

    #[test]
    fn empty_input_parses_to_empty_parts() {
        assert_eq!(parse(""), ParsedName::default());
        assert_eq!(parse("   "), ParsedName::default());
    }

    #[test]
    fn lone_comma_degrades_gracefully() {
        assert_eq!(parse(","), ParsedName::default());
        let parsed = parse("Smith,");
        assert_eq!(parsed.last, "Smith");
        assert!(parsed.first.is_empty());
    }
}
