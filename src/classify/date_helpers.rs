//! Month-name tables, tokenization, and boundary checks shared by the date
//! cascade and the fallback resolver.

use chrono::NaiveDate;
use regex::{Match, Regex};

use crate::constants::dates::{MAX_YEAR, MIN_YEAR};

/// Convert a lowercase month token to a month number (1-12).
pub fn month_token_to_number(token: &str) -> Option<u32> {
    match token {
        "jan" | "january" => Some(1),
        "feb" | "february" => Some(2),
        "mar" | "march" => Some(3),
        "apr" | "april" => Some(4),
        "may" => Some(5),
        "jun" | "june" => Some(6),
        "jul" | "july" => Some(7),
        "aug" | "august" => Some(8),
        "sep" | "sept" | "september" => Some(9),
        "oct" | "october" => Some(10),
        "nov" | "november" => Some(11),
        "dec" | "december" => Some(12),
        _ => None,
    }
}

/// Case-insensitive variant of [`month_token_to_number`].
pub fn month_number(token: &str) -> Option<u32> {
    month_token_to_number(&token.to_lowercase())
}

/// Parse a four-digit year inside the accepted range.
pub fn parse_year(value: &str) -> Option<i32> {
    if value.len() != 4 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year = value.parse::<i32>().ok()?;
    (MIN_YEAR..=MAX_YEAR).contains(&year).then_some(year)
}

/// Parse a one- or two-digit month or day field.
pub fn parse_small_field(value: &str) -> Option<u32> {
    if value.is_empty() || value.len() > 2 || !value.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    value.parse::<u32>().ok()
}

/// Build a calendar date, rejecting out-of-range years and invalid days.
pub fn meeting_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Split text into alphanumeric tokens.
///
/// Breaks on non-alphanumeric characters, letter/digit transitions, and
/// camel-case humps, so `EBAgenda_March2024` yields `EB`, `Agenda`, `March`,
/// `2024`.
pub fn word_tokens(text: &str) -> Vec<&str> {
    word_token_spans(text)
        .into_iter()
        .map(|(start, end)| &text[start..end])
        .collect()
}

/// Byte ranges of the tokens produced by [`word_tokens`].
pub fn word_token_spans(text: &str) -> Vec<(usize, usize)> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;
    for (pos, &(idx, ch)) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if let Some(begin) = start.take() {
                spans.push((begin, idx));
            }
            continue;
        }
        match start {
            None => start = Some(idx),
            Some(begin) => {
                let prev = chars[pos - 1].1;
                let next = chars.get(pos + 1).map(|&(_, c)| c);
                if is_token_break(prev, ch, next) {
                    spans.push((begin, idx));
                    start = Some(idx);
                }
            }
        }
    }
    if let Some(begin) = start {
        spans.push((begin, text.len()));
    }
    spans
}

fn is_token_break(prev: char, ch: char, next: Option<char>) -> bool {
    prev.is_ascii_digit() != ch.is_ascii_digit()
        || (prev.is_lowercase() && ch.is_uppercase())
        || (prev.is_uppercase() && ch.is_uppercase() && next.is_some_and(char::is_lowercase))
}

/// True if the token at `start..end` is not glued to neighbouring characters.
///
/// Digit edges must not continue a longer digit run. Letter edges (month
/// names) must start and end a word, where a camel-case hump counts as a word
/// edge (`AgendaMarch2024` and `EBMarch2024` are accepted, `Grammar2024` is
/// not). An all-caps month glued to the following digits is accepted after
/// any uppercase letter (`EBMARCH2024`), but not before a separator
/// (`EBMARCH_2024`).
pub fn is_token_bounded(text: &str, start: usize, end: usize) -> bool {
    let Some(token) = text.get(start..end) else {
        return false;
    };
    let (Some(first), Some(last)) = (token.chars().next(), token.chars().next_back()) else {
        return false;
    };
    let prev = text[..start].chars().next_back();
    let next = text[end..].chars().next();

    let leading = if first.is_ascii_digit() {
        !prev.is_some_and(|c| c.is_ascii_digit())
    } else {
        match prev {
            None => true,
            Some(p) if !p.is_alphabetic() => true,
            Some(p) => {
                first.is_uppercase()
                    && (p.is_lowercase()
                        || token.chars().nth(1).is_some_and(char::is_lowercase)
                        || is_caps_word_before_digits(token))
            }
        }
    };
    let trailing = if last.is_ascii_digit() {
        !next.is_some_and(|c| c.is_ascii_digit())
    } else {
        next.is_none_or(|n| !n.is_alphabetic() || (n.is_uppercase() && last.is_lowercase()))
    };
    leading && trailing
}

// `MARCH2024` glued after a code (`EBMARCH2024`) still starts a date.
fn is_caps_word_before_digits(token: &str) -> bool {
    let word_end = token
        .find(|c: char| !c.is_alphabetic())
        .unwrap_or(token.len());
    token[..word_end].chars().all(char::is_uppercase)
        && token[word_end..].starts_with(|c: char| c.is_ascii_digit())
}

/// Scan `text` for the first bounded match of `pattern` that `parse` accepts.
///
/// Rejected matches restart the scan one character later, so overlapping
/// candidates are still considered.
pub fn first_bounded_match<'t, T>(
    pattern: &Regex,
    text: &'t str,
    mut parse: impl FnMut(&str) -> Option<T>,
) -> Option<(&'t str, T)> {
    first_bounded_match_with(pattern, text, |found| parse(found.as_str()))
}

/// Like [`first_bounded_match`], but `accept` sees the match position too.
pub fn first_bounded_match_with<'t, T>(
    pattern: &Regex,
    text: &'t str,
    mut accept: impl FnMut(&Match<'t>) -> Option<T>,
) -> Option<(&'t str, T)> {
    let mut start = 0;
    while start <= text.len() {
        let found = pattern.find_at(text, start)?;
        if is_token_bounded(text, found.start(), found.end())
            && let Some(value) = accept(&found)
        {
            return Some((found.as_str(), value));
        }
        start = next_char_boundary(text, found.start());
    }
    None
}

fn next_char_boundary(text: &str, pos: usize) -> usize {
    pos + text[pos..].chars().next().map_or(1, char::len_utf8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_tokens_cover_names_and_abbreviations() {
        assert_eq!(month_token_to_number("jan"), Some(1));
        assert_eq!(month_token_to_number("february"), Some(2));
        assert_eq!(month_token_to_number("sept"), Some(9));
        assert_eq!(month_token_to_number("may"), Some(5));
        assert_eq!(month_token_to_number("dec"), Some(12));
        assert_eq!(month_token_to_number("Dec"), None);
        assert_eq!(month_number("SEPT"), Some(9));
        assert_eq!(month_number("October"), Some(10));
        assert_eq!(month_number("decision"), None);
    }

    #[test]
    fn year_and_field_parsing_enforce_ranges() {
        assert_eq!(parse_year("2024"), Some(2024));
        assert_eq!(parse_year("2099"), Some(2099));
        assert_eq!(parse_year("1999"), None);
        assert_eq!(parse_year("2100"), None);
        assert_eq!(parse_year("20245"), None);
        assert_eq!(parse_small_field("07"), Some(7));
        assert_eq!(parse_small_field("7"), Some(7));
        assert_eq!(parse_small_field("007"), None);
        assert_eq!(parse_small_field("x7"), None);
    }

    #[test]
    fn meeting_date_rejects_calendar_invalid_days() {
        assert_eq!(meeting_date(2024, 2, 29), NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(meeting_date(2023, 2, 29), None);
        assert_eq!(meeting_date(2024, 4, 31), None);
        assert_eq!(meeting_date(2024, 13, 1), None);
        assert_eq!(meeting_date(1999, 1, 1), None);
    }

    #[test]
    fn word_tokens_split_on_separators_case_and_digits() {
        assert_eq!(
            word_tokens("EBAgenda_March2024"),
            vec!["EB", "Agenda", "March", "2024"]
        );
        assert_eq!(word_tokens("14March2024"), vec!["14", "March", "2024"]);
        assert_eq!(word_tokens("2024-03-14"), vec!["2024", "03", "14"]);
        assert_eq!(word_tokens("randomnotes_2024"), vec!["randomnotes", "2024"]);
        assert_eq!(word_tokens("OC Minutes  (Final)"), vec!["OC", "Minutes", "Final"]);
        assert!(word_tokens("--__..").is_empty());
        assert_eq!(word_tokens("OCTranscript_x"), vec!["OC", "Transcript", "x"]);
        assert_eq!(word_token_spans("OCT_2024"), vec![(0, 3), (4, 8)]);
    }

    #[test]
    fn bounded_tokens_reject_longer_digit_runs_and_mid_word_months() {
        let text = "document12345";
        assert!(!is_token_bounded(text, 9, 13));
        assert!(is_token_bounded("x_2024_y", 2, 6));
        assert!(!is_token_bounded("x_20245", 2, 6));
        assert!(!is_token_bounded("120240314", 1, 9));

        // "mar2024" inside "Grammar2024" is glued to a lowercase word.
        assert!(!is_token_bounded("Grammar2024", 4, 11));
        // Camel-case hump starts a new word.
        assert!(is_token_bounded("AgendaMarch2024", 6, 15));
        assert!(is_token_bounded("EBMarch2024", 2, 11));
        assert!(is_token_bounded("EBMARCH2024", 2, 11));
        assert!(!is_token_bounded("EBMARCH_2024", 2, 12));
        assert!(!is_token_bounded("EBmarch2024", 2, 11));
        assert!(is_token_bounded("2024_14_Mar", 0, 11));
        assert!(!is_token_bounded("2024_14_Marathon", 0, 11));
    }

    #[test]
    fn first_bounded_match_skips_rejected_candidates() {
        let pattern = Regex::new("20[0-9]{2}").unwrap();
        let found = first_bounded_match(&pattern, "v120245_notes_2023", parse_year);
        assert_eq!(found, Some(("2023", 2023)));

        let none = first_bounded_match(&pattern, "document12345", parse_year);
        assert_eq!(none, None);

        let unicode = first_bounded_match(&pattern, "réunion_é2022", parse_year);
        assert_eq!(unicode, Some(("2022", 2022)));
    }
}
