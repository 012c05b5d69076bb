use chrono::{Datelike, NaiveDate};

use meeting_trios::classify::{DateCascade, PatternVariant};
use meeting_trios::{CorrelatorConfig, DateGranularity, DateSource, classify_path, classify_paths};

fn every_day_of(year: i32) -> impl Iterator<Item = NaiveDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .unwrap()
        .iter_days()
        .take_while(move |day| day.year() == year)
}

#[test]
fn every_compact_numeric_date_is_extracted_exactly() {
    let config = CorrelatorConfig::default();
    let templates = ["EB_{}_agenda.docx", "{}.vtt", "OC minutes {} final.pdf"];
    for year in [2000, 2024, 2025, 2099] {
        for day in every_day_of(year) {
            let compact = day.format("%Y%m%d").to_string();
            for template in templates {
                let filename = template.replace("{}", &compact);
                let record = classify_path(0, &filename, &config);
                assert_eq!(record.meeting_date, Some(day), "{filename}");
                assert_eq!(record.date_granularity, DateGranularity::Full, "{filename}");
                assert_eq!(record.date_token.as_deref(), Some(compact.as_str()));
                assert_eq!(record.date_source, Some(DateSource::Cascade));
            }
        }
    }
}

#[test]
fn compact_tokens_use_the_compact_variant() {
    let found = DateCascade::standard()
        .extract("TPB_transcript_20231107.srt")
        .unwrap();
    assert_eq!(found.variant, PatternVariant::Compact);
    assert_eq!(found.family.to_string(), "year-month-day-numeric");
}

#[test]
fn digit_runs_longer_than_a_date_are_not_dates() {
    let config = CorrelatorConfig::default();
    let records = classify_paths(
        &[
            "document12345.docx",
            "S:/Boards/EB/document12345.docx",
            "EB_scan_120240314.pdf",
            "EB_agenda_202403145.docx",
        ],
        &config,
    );
    for record in records {
        assert_eq!(record.meeting_date, None, "{}", record.raw_path);
        assert_eq!(record.date_granularity, DateGranularity::Unresolved);
    }
}

#[test]
fn calendar_invalid_tokens_fall_through() {
    let config = CorrelatorConfig::default();
    let record = classify_path(0, "EB_agenda_2023-02-29_rev_2023-03-01.docx", &config);
    assert_eq!(record.meeting_date, NaiveDate::from_ymd_opt(2023, 3, 1));
    assert_eq!(record.date_token.as_deref(), Some("2023-03-01"));

    let record = classify_path(0, "EB_agenda_2023-04-31.docx", &config);
    assert_eq!(record.date_granularity, DateGranularity::MonthYear);
    assert_eq!(record.meeting_date, NaiveDate::from_ymd_opt(2023, 4, 1));
}

#[test]
fn text_month_families_outrank_numeric_ones() {
    let config = CorrelatorConfig::default();
    let record = classify_path(0, "2024-01-02_OC_minutes_5 June 2024.docx", &config);
    assert_eq!(record.meeting_date, NaiveDate::from_ymd_opt(2024, 6, 5));
    assert_eq!(record.date_token.as_deref(), Some("5 June 2024"));
}
