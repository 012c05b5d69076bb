//! Ordered full-date grammar.
//!
//! The cascade is a table of [`DateRule`]s, one per format family. Text-month
//! families come before numeric families, and each family tries its compact
//! pattern before its delimited one. The first rule that yields a bounded,
//! calendar-valid token wins.

use std::fmt;
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::classify::date_helpers::{
    first_bounded_match, meeting_date, month_number, parse_small_field, parse_year, word_tokens,
};
use crate::constants::dates::{
    DAY_COMPACT_PATTERN, DAY_PATTERN, MONTH_COMPACT_PATTERN, MONTH_NAME_PATTERN, MONTH_PATTERN,
    SEPARATOR_PATTERN, YEAR_PATTERN,
};
use crate::types::DateToken;

/// Order in which year, month, and day appear in a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldOrder {
    /// `2024-03-14`
    YearMonthDay,
    /// `2024-14-03`
    YearDayMonth,
    /// `03-14-2024`
    MonthDayYear,
    /// `14-03-2024`
    DayMonthYear,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Year,
    Month,
    Day,
}

impl FieldOrder {
    /// All orders, in cascade priority.
    pub const ALL: [FieldOrder; 4] = [
        FieldOrder::YearMonthDay,
        FieldOrder::YearDayMonth,
        FieldOrder::MonthDayYear,
        FieldOrder::DayMonthYear,
    ];

    const fn fields(self) -> [Field; 3] {
        match self {
            FieldOrder::YearMonthDay => [Field::Year, Field::Month, Field::Day],
            FieldOrder::YearDayMonth => [Field::Year, Field::Day, Field::Month],
            FieldOrder::MonthDayYear => [Field::Month, Field::Day, Field::Year],
            FieldOrder::DayMonthYear => [Field::Day, Field::Month, Field::Year],
        }
    }

    /// Rearrange three fields given in token order into `(year, month, day)`.
    pub fn arrange<T: Copy>(self, fields: [T; 3]) -> (T, T, T) {
        let [a, b, c] = fields;
        match self {
            FieldOrder::YearMonthDay => (a, b, c),
            FieldOrder::YearDayMonth => (a, c, b),
            FieldOrder::MonthDayYear => (c, a, b),
            FieldOrder::DayMonthYear => (c, b, a),
        }
    }

    /// True when the year is written before the day.
    pub const fn year_precedes_day(self) -> bool {
        matches!(self, FieldOrder::YearMonthDay | FieldOrder::YearDayMonth)
    }

    const fn label(self) -> &'static str {
        match self {
            FieldOrder::YearMonthDay => "year-month-day",
            FieldOrder::YearDayMonth => "year-day-month",
            FieldOrder::MonthDayYear => "month-day-year",
            FieldOrder::DayMonthYear => "day-month-year",
        }
    }
}

/// How the month is spelled inside a token.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MonthStyle {
    /// Month name or abbreviation (`March`, `Sept`).
    Text,
    /// One- or two-digit month number.
    Numeric,
}

/// A field ordering paired with a month spelling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DateFamily {
    /// Field order of the token.
    pub order: FieldOrder,
    /// Numeric or named month.
    pub month_style: MonthStyle,
}

impl DateFamily {
    /// The eight families in cascade priority.
    pub fn prioritized() -> Vec<DateFamily> {
        [MonthStyle::Text, MonthStyle::Numeric]
            .into_iter()
            .flat_map(|month_style| {
                FieldOrder::ALL
                    .into_iter()
                    .map(move |order| DateFamily { order, month_style })
            })
            .collect()
    }
}

impl fmt::Display for DateFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = match self.month_style {
            MonthStyle::Text => "text",
            MonthStyle::Numeric => "numeric",
        };
        write!(f, "{}-{}", self.order.label(), style)
    }
}

/// Pattern shape within a family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PatternVariant {
    /// Fields written back to back (`20240314`, `14March2024`).
    Compact,
    /// One separator between fields (`2024-03-14`, `14 March 2024`).
    Delimited,
}

/// Pure token parser: matched substring plus field order to a calendar date.
pub type DateParser = fn(&str, FieldOrder) -> Option<NaiveDate>;

/// One cascade entry: a family, its priority, both pattern variants, and its parser.
pub struct DateRule {
    family: DateFamily,
    priority: usize,
    compact: Regex,
    delimited: Regex,
    parse: DateParser,
}

impl DateRule {
    /// Compile both pattern variants for `family`.
    pub fn new(family: DateFamily, priority: usize) -> Result<Self, regex::Error> {
        let parse: DateParser = match family.month_style {
            MonthStyle::Text => parse_text_token,
            MonthStyle::Numeric => parse_numeric_token,
        };
        Ok(Self {
            family,
            priority,
            compact: Regex::new(&build_pattern(family, PatternVariant::Compact))?,
            delimited: Regex::new(&build_pattern(family, PatternVariant::Delimited))?,
            parse,
        })
    }

    /// Family this rule recognizes.
    pub fn family(&self) -> DateFamily {
        self.family
    }

    /// Position in the cascade; lower runs first.
    pub fn priority(&self) -> usize {
        self.priority
    }

    /// Compiled regex for `variant`.
    pub fn pattern(&self, variant: PatternVariant) -> &Regex {
        match variant {
            PatternVariant::Compact => &self.compact,
            PatternVariant::Delimited => &self.delimited,
        }
    }

    /// Parse an already-matched token with this rule's field order.
    pub fn parse_token(&self, token: &str) -> Option<NaiveDate> {
        (self.parse)(token, self.family.order)
    }

    /// First bounded, calendar-valid token in `text`, compact variant first.
    pub fn find(&self, text: &str) -> Option<CascadeMatch> {
        [PatternVariant::Compact, PatternVariant::Delimited]
            .into_iter()
            .find_map(|variant| {
                first_bounded_match(self.pattern(variant), text, |token| {
                    self.parse_token(token)
                })
                .map(|(token, date)| CascadeMatch {
                    token: token.to_string(),
                    date,
                    family: self.family,
                    variant,
                })
            })
    }
}

/// A full date recovered by the cascade.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CascadeMatch {
    /// Matched substring.
    pub token: DateToken,
    /// Parsed calendar date.
    pub date: NaiveDate,
    /// Family of the matching rule.
    pub family: DateFamily,
    /// Compact or delimited form.
    pub variant: PatternVariant,
}

/// Ordered rule table, short-circuiting on the first success.
pub struct DateCascade {
    rules: Vec<DateRule>,
}

static STANDARD_CASCADE: LazyLock<DateCascade> =
    LazyLock::new(|| DateCascade::new().expect("built-in date patterns must compile"));

impl DateCascade {
    /// Build the eight-family cascade.
    pub fn new() -> Result<Self, regex::Error> {
        let rules = DateFamily::prioritized()
            .into_iter()
            .enumerate()
            .map(|(priority, family)| DateRule::new(family, priority))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { rules })
    }

    /// Shared, lazily compiled cascade.
    pub fn standard() -> &'static DateCascade {
        &STANDARD_CASCADE
    }

    /// Rules in priority order.
    pub fn rules(&self) -> &[DateRule] {
        &self.rules
    }

    /// Run the rules in priority order and return the first match.
    pub fn extract(&self, text: &str) -> Option<CascadeMatch> {
        self.rules.iter().find_map(|rule| rule.find(text))
    }
}

fn build_pattern(family: DateFamily, variant: PatternVariant) -> String {
    let parts: Vec<&str> = family
        .order
        .fields()
        .into_iter()
        .map(|field| match (field, family.month_style, variant) {
            (Field::Year, _, _) => YEAR_PATTERN,
            (Field::Month, MonthStyle::Text, _) => MONTH_NAME_PATTERN,
            (Field::Month, MonthStyle::Numeric, PatternVariant::Compact) => MONTH_COMPACT_PATTERN,
            (Field::Month, MonthStyle::Numeric, PatternVariant::Delimited) => MONTH_PATTERN,
            (Field::Day, MonthStyle::Numeric, PatternVariant::Compact) => DAY_COMPACT_PATTERN,
            (Field::Day, _, _) => DAY_PATTERN,
        })
        .collect();
    let joined = match variant {
        PatternVariant::Compact => parts.concat(),
        PatternVariant::Delimited => parts.join(SEPARATOR_PATTERN),
    };
    match family.month_style {
        MonthStyle::Text => format!("(?i){joined}"),
        MonthStyle::Numeric => joined,
    }
}

/// Parse a token carrying a month name, e.g. `14 March 2024` or `Mar142024`.
///
/// When day and year are written back to back, the year is the four digits
/// on the side `order` puts it.
pub fn parse_text_token(token: &str, order: FieldOrder) -> Option<NaiveDate> {
    let mut month = None;
    let mut digits: Vec<&str> = Vec::with_capacity(2);
    for piece in word_tokens(token) {
        if piece.starts_with(|c: char| c.is_ascii_digit()) {
            digits.push(piece);
        } else if month.is_none() {
            month = Some(month_number(piece)?);
        } else {
            return None;
        }
    }
    let month = month?;
    let (year, day) = match digits.as_slice() {
        [first, second] if order.year_precedes_day() => (*first, *second),
        [first, second] => (*second, *first),
        [run] if run.len() > 4 && order.year_precedes_day() => run.split_at(4),
        [run] if run.len() > 4 => {
            let (day, year) = run.split_at(run.len() - 4);
            (year, day)
        }
        _ => return None,
    };
    meeting_date(parse_year(year)?, month, parse_small_field(day)?)
}

/// Parse an all-digit token, e.g. `2024-03-14` or `03142024`.
pub fn parse_numeric_token(token: &str, order: FieldOrder) -> Option<NaiveDate> {
    let pieces = word_tokens(token);
    let fields: [&str; 3] = match pieces.as_slice() {
        [a, b, c] => [*a, *b, *c],
        [compact] if compact.len() == 8 && compact.bytes().all(|b| b.is_ascii_digit()) => {
            if order.year_precedes_day() {
                [&compact[..4], &compact[4..6], &compact[6..]]
            } else {
                [&compact[..2], &compact[2..4], &compact[4..]]
            }
        }
        _ => return None,
    };
    let (year, month, day) = order.arrange(fields);
    meeting_date(
        parse_year(year)?,
        parse_small_field(month)?,
        parse_small_field(day)?,
    )
}
