//! Month/year recovery for paths the cascade could not date.
//!
//! Step one looks for a month written next to a year (`March2024`,
//! `2024-03`). Step two looks for a bare year and a bare month name
//! independently. Either way the day defaults to the 1st.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::classify::cascade::MonthStyle;
use crate::classify::date_helpers::{
    first_bounded_match, first_bounded_match_with, meeting_date, month_number, parse_small_field,
    parse_year, word_tokens,
};
use crate::constants::dates::{
    FALLBACK_DAY, MONTH_NAME_PATTERN, MONTH_PATTERN, SEPARATOR_PATTERN, YEAR_PATTERN,
};
use crate::data::DateSource;
use crate::types::DateToken;

/// A combined month+year pattern.
pub struct MonthYearRule {
    pattern: Regex,
    year_first: bool,
    month_style: MonthStyle,
}

impl MonthYearRule {
    fn new(year_first: bool, month_style: MonthStyle) -> Result<Self, regex::Error> {
        let source = match (month_style, year_first) {
            (MonthStyle::Text, false) => {
                format!("(?i){MONTH_NAME_PATTERN}{SEPARATOR_PATTERN}?{YEAR_PATTERN}")
            }
            (MonthStyle::Text, true) => {
                format!("(?i){YEAR_PATTERN}{SEPARATOR_PATTERN}?{MONTH_NAME_PATTERN}")
            }
            (MonthStyle::Numeric, false) => {
                format!("{MONTH_PATTERN}{SEPARATOR_PATTERN}{YEAR_PATTERN}")
            }
            (MonthStyle::Numeric, true) => {
                format!("{YEAR_PATTERN}{SEPARATOR_PATTERN}{MONTH_PATTERN}")
            }
        };
        Ok(Self {
            pattern: Regex::new(&source)?,
            year_first,
            month_style,
        })
    }

    /// First bounded month+year token in `text`.
    pub fn find(&self, text: &str) -> Option<(DateToken, NaiveDate)> {
        first_bounded_match_with(&self.pattern, text, |found| {
            if !self.month_side_isolated(text, found.start(), found.end()) {
                return None;
            }
            self.parse_token(found.as_str())
        })
        .map(|(token, date)| (token.to_string(), date))
    }

    /// Parse a matched token into the 1st of its month.
    pub fn parse_token(&self, token: &str) -> Option<NaiveDate> {
        let pieces = word_tokens(token);
        let [first, second] = pieces.as_slice() else {
            return None;
        };
        let (year, month) = if self.year_first {
            (*first, *second)
        } else {
            (*second, *first)
        };
        let month = match self.month_style {
            MonthStyle::Text => month_number(month)?,
            MonthStyle::Numeric => parse_small_field(month).filter(|m| (1..=12).contains(m))?,
        };
        meeting_date(parse_year(year)?, month, FALLBACK_DAY)
    }

    // Numeric months are weak evidence: `v2_2024` or `2024_2nd` must not
    // read as February.
    fn month_side_isolated(&self, text: &str, start: usize, end: usize) -> bool {
        if self.month_style == MonthStyle::Text {
            return true;
        }
        let neighbour = if self.year_first {
            text[end..].chars().next()
        } else {
            text[..start].chars().next_back()
        };
        !neighbour.is_some_and(char::is_alphabetic)
    }
}

/// A month/year-granularity date.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackMatch {
    /// Substring the month/year was read from.
    pub token: DateToken,
    /// First day of the recovered month.
    pub date: NaiveDate,
    /// Fallback step that matched.
    pub source: DateSource,
}

/// Two-step month/year resolver.
pub struct FallbackResolver {
    month_year_rules: Vec<MonthYearRule>,
    bare_year: Regex,
}

static STANDARD_FALLBACK: LazyLock<FallbackResolver> = LazyLock::new(|| {
    FallbackResolver::new().expect("built-in month/year patterns must compile")
});

impl FallbackResolver {
    /// Compile the month+year rules (text months first) and the bare-year pattern.
    pub fn new() -> Result<Self, regex::Error> {
        let month_year_rules = vec![
            MonthYearRule::new(false, MonthStyle::Text)?,
            MonthYearRule::new(true, MonthStyle::Text)?,
            MonthYearRule::new(false, MonthStyle::Numeric)?,
            MonthYearRule::new(true, MonthStyle::Numeric)?,
        ];
        Ok(Self {
            month_year_rules,
            bare_year: Regex::new(YEAR_PATTERN)?,
        })
    }

    /// Shared, lazily compiled resolver.
    pub fn standard() -> &'static FallbackResolver {
        &STANDARD_FALLBACK
    }

    /// Step one then step two over `sources` (filename first, then directory).
    pub fn resolve(&self, sources: &[&str]) -> Option<FallbackMatch> {
        self.resolve_month_year(sources)
            .or_else(|| self.resolve_split(sources))
    }

    /// Step one: first combined month+year token, searching each source in turn.
    pub fn resolve_month_year(&self, sources: &[&str]) -> Option<FallbackMatch> {
        sources.iter().find_map(|text| {
            self.month_year_rules
                .iter()
                .find_map(|rule| rule.find(text))
                .map(|(token, date)| FallbackMatch {
                    token,
                    date,
                    source: DateSource::MonthYearToken,
                })
        })
    }

    /// Step two: a bare year and a bare month name, each taken from the first
    /// source that has one.
    pub fn resolve_split(&self, sources: &[&str]) -> Option<FallbackMatch> {
        let (year_token, year) = sources.iter().find_map(|text| self.bare_year(text))?;
        let (month_token, month) = sources.iter().find_map(|text| bare_month(text))?;
        let date = meeting_date(year, month, FALLBACK_DAY)?;
        Some(FallbackMatch {
            token: format!("{month_token} {year_token}"),
            date,
            source: DateSource::SplitTokens,
        })
    }

    /// First digit-bounded year in range.
    pub fn bare_year<'t>(&self, text: &'t str) -> Option<(&'t str, i32)> {
        first_bounded_match(&self.bare_year, text, parse_year)
    }
}

/// First standalone month name or abbreviation in `text`.
pub fn bare_month(text: &str) -> Option<(&str, u32)> {
    word_tokens(text)
        .into_iter()
        .find_map(|token| month_number(token).map(|month| (token, month)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    #[test]
    fn month_year_tokens_resolve_to_first_of_month() {
        let resolver = FallbackResolver::standard();
        let cases = [
            ("EBAgenda_March2024.docx", "March2024", date(2024, 3)),
            ("OC_minutes_2024-Sept.docx", "2024-Sept", date(2024, 9)),
            ("EB agenda 03_2024.docx", "03_2024", date(2024, 3)),
            ("TPB minutes 2024.11.docx", "2024.11", date(2024, 11)),
            ("GMPB Dec 2023 agenda.pdf", "Dec 2023", date(2023, 12)),
        ];
        for (text, token, expected) in cases {
            let found = resolver.resolve_month_year(&[text]).unwrap();
            assert_eq!(found.token, token, "{text}");
            assert_eq!(found.date, expected, "{text}");
            assert_eq!(found.source, DateSource::MonthYearToken);
        }
    }

    #[test]
    fn numeric_months_glued_to_words_are_ignored() {
        let resolver = FallbackResolver::standard();
        assert_eq!(resolver.resolve_month_year(&["EB_agenda_v2_2024.docx"]), None);
        assert_eq!(resolver.resolve_month_year(&["EB_2024_2nd_meeting.docx"]), None);
        assert_eq!(resolver.resolve_month_year(&["EB_agenda_13_2024.docx"]), None);
        assert_eq!(resolver.resolve_month_year(&["Grammar2024.docx"]), None);
    }

    #[test]
    fn combined_tokens_prefer_filename_over_directory() {
        let resolver = FallbackResolver::standard();
        let found = resolver
            .resolve(&["EB_agenda_Feb2024.docx", "S:/Boards/EB/Jan 2024"])
            .unwrap();
        assert_eq!(found.date, date(2024, 2));

        let found = resolver
            .resolve(&["EB_agenda.docx", "S:/Boards/EB/Jan 2024"])
            .unwrap();
        assert_eq!(found.date, date(2024, 1));
        assert_eq!(found.token, "Jan 2024");
    }

    #[test]
    fn split_tokens_combine_year_and_month_from_any_source() {
        let resolver = FallbackResolver::standard();
        let found = resolver
            .resolve(&["EB_agenda_v2_2024.docx", "S:/Boards/EB/2024/March"])
            .unwrap();
        assert_eq!(found.date, date(2024, 3));
        assert_eq!(found.source, DateSource::SplitTokens);
        assert_eq!(found.token, "March 2024");

        let found = resolver
            .resolve(&["OC May minutes.docx", "S:/Boards/OC/FY2023"])
            .unwrap();
        assert_eq!(found.date, date(2023, 5));
    }

    #[test]
    fn year_without_month_stays_unresolved() {
        let resolver = FallbackResolver::standard();
        assert_eq!(resolver.resolve(&["randomnotes_2024.docx"]), None);
        assert_eq!(
            resolver.bare_year("randomnotes_2024.docx"),
            Some(("2024", 2024))
        );
        assert_eq!(bare_month("randomnotes_2024.docx"), None);
        assert_eq!(resolver.resolve(&["document12345.docx"]), None);
        assert_eq!(resolver.bare_year("document20123.docx"), None);
    }

    #[test]
    fn bare_month_requires_a_whole_word() {
        assert_eq!(bare_month("EB_Decision_summary"), None);
        assert_eq!(bare_month("EBAgendaJune"), Some(("June", 6)));
        assert_eq!(bare_month("oc-sept-notes"), Some(("sept", 9)));
    }
}
