use chrono::NaiveDate;
use meditrack_schedule::{ExpansionWindow, PrescriptionSeries, expand_refills};

pub struct RefillCase {
    pub name: &'static str,
    pub refill_on: &'static str,
    pub schedule: &'static str,
    pub end_date: Option<&'static str>,
    pub from: &'static str,
    pub to: &'static str,
    pub expected: &'static [&'static str],
}

#[expect(clippy::too_many_lines)]
pub fn refill_cases() -> Vec<RefillCase> {
    vec![
        RefillCase {
            name: "every_30_days_basic",
            refill_on: "2024-01-01",
            schedule: "every_30_days",
            end_date: None,
            from: "2024-01-01",
            to: "2024-04-01",
            expected: &["2024-01-01", "2024-01-31", "2024-03-01", "2024-03-31"],
        },
        RefillCase {
            name: "every_30_days_spaced_token",
            refill_on: "2024-01-01",
            schedule: "Every 30 Days",
            end_date: None,
            from: "2024-02-01",
            to: "2024-04-01",
            expected: &["2024-03-01", "2024-03-31"],
        },
        RefillCase {
            name: "weekly_basic",
            refill_on: "2024-03-04",
            schedule: "weekly",
            end_date: None,
            from: "2024-03-01",
            to: "2024-03-25",
            expected: &["2024-03-04", "2024-03-11", "2024-03-18"],
        },
        RefillCase {
            name: "weekly_upper_bound_exclusive",
            refill_on: "2024-03-04",
            schedule: "weekly",
            end_date: None,
            from: "2024-03-01",
            to: "2024-03-18",
            expected: &["2024-03-04", "2024-03-11"],
        },
        RefillCase {
            name: "monthly_from_31st",
            refill_on: "2023-12-31",
            schedule: "monthly",
            end_date: None,
            from: "2024-01-01",
            to: "2024-07-01",
            expected: &[
                "2024-01-31",
                "2024-02-29",
                "2024-03-31",
                "2024-04-30",
                "2024-05-31",
                "2024-06-30",
            ],
        },
        RefillCase {
            name: "monthly_non_leap_february",
            refill_on: "2023-01-30",
            schedule: "MONTHLY",
            end_date: None,
            from: "2023-01-01",
            to: "2023-04-01",
            expected: &["2023-01-30", "2023-02-28", "2023-03-30"],
        },
        RefillCase {
            name: "quarterly_basic",
            refill_on: "2024-01-15",
            schedule: "quarterly",
            end_date: None,
            from: "2024-01-01",
            to: "2025-01-01",
            expected: &["2024-01-15", "2024-04-15", "2024-07-15", "2024-10-15"],
        },
        RefillCase {
            name: "quarterly_anchor_long_ago",
            refill_on: "2015-05-31",
            schedule: "quarterly",
            end_date: None,
            from: "2024-01-01",
            to: "2024-12-31",
            expected: &["2024-02-29", "2024-05-31", "2024-08-31", "2024-11-30"],
        },
        RefillCase {
            name: "end_date_on_occurrence",
            refill_on: "2024-01-01",
            schedule: "weekly",
            end_date: Some("2024-01-15"),
            from: "2024-01-01",
            to: "2024-12-31",
            expected: &["2024-01-01", "2024-01-08", "2024-01-15"],
        },
        RefillCase {
            name: "end_date_between_occurrences",
            refill_on: "2024-01-01",
            schedule: "weekly",
            end_date: Some("2024-01-14"),
            from: "2024-01-01",
            to: "2024-12-31",
            expected: &["2024-01-01", "2024-01-08"],
        },
        RefillCase {
            name: "end_date_before_anchor",
            refill_on: "2024-01-01",
            schedule: "monthly",
            end_date: Some("2023-12-01"),
            from: "2023-01-01",
            to: "2024-12-31",
            expected: &[],
        },
        RefillCase {
            name: "unrecognized_single",
            refill_on: "2024-06-01",
            schedule: "prn",
            end_date: None,
            from: "2024-01-01",
            to: "2030-01-01",
            expected: &["2024-06-01"],
        },
        RefillCase {
            name: "unrecognized_outside_window",
            refill_on: "2024-06-01",
            schedule: "prn",
            end_date: None,
            from: "2024-06-02",
            to: "2030-01-01",
            expected: &[],
        },
        RefillCase {
            name: "empty_window",
            refill_on: "2024-01-01",
            schedule: "weekly",
            end_date: None,
            from: "2024-01-08",
            to: "2024-01-08",
            expected: &[],
        },
        RefillCase {
            name: "inverted_window",
            refill_on: "2024-01-01",
            schedule: "weekly",
            end_date: None,
            from: "2024-02-01",
            to: "2024-01-01",
            expected: &[],
        },
        RefillCase {
            name: "anchor_after_window",
            refill_on: "2025-01-01",
            schedule: "weekly",
            end_date: None,
            from: "2024-01-01",
            to: "2024-12-31",
            expected: &[],
        },
    ]
}

pub fn assert_case(case: &RefillCase) {
    let mut series =
        PrescriptionSeries::new(case.name, "Test", parse_date(case.refill_on), case.schedule);
    if let Some(end_date) = case.end_date {
        series = series.with_end_date(parse_date(end_date));
    }
    let window = ExpansionWindow::new(parse_date(case.from), parse_date(case.to));

    let refills = expand_refills(&[series], &window)
        .unwrap_or_else(|err| panic!("Failed to expand {}: {}", case.name, err));
    let actual: Vec<NaiveDate> = refills.iter().map(|refill| refill.refill_date).collect();
    let expected: Vec<NaiveDate> = case.expected.iter().map(|value| parse_date(value)).collect();

    assert_eq!(actual, expected, "Case {} did not match", case.name);
}

fn parse_date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .unwrap_or_else(|err| panic!("Failed to parse date {value}: {err}"))
}
