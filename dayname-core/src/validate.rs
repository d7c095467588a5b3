//! Sequence validation and year-typo repair.
//!
//! The page lists one event per day, so in date mode every accepted date must
//! be exactly one day after the previous one. The only corruption seen in the
//! wild is a single mistyped year ("3/15/23" between two 2024 dates, or a
//! January date still carrying the old year), which the two repair tiers fix.
//! Anything else aborts the whole batch.

use chrono::{Datelike, Duration, NaiveDate};

use crate::constants::DEFAULT_TOLERANCE_DAYS;
use crate::error::{DataInconsistency, DaynameError, DaynameResult};
use crate::event::{RawEventRecord, Temporal, ValidatedEvent};
use crate::title::TitleRules;
use crate::tokenize::Strategy;

#[derive(Debug, Clone)]
pub struct Validator {
    strategy: Strategy,
    tolerance_days: i64,
    titles: TitleRules,
}

impl Validator {
    pub fn new(strategy: Strategy, tolerance_days: i64, titles: TitleRules) -> Self {
        Validator {
            strategy,
            tolerance_days,
            titles,
        }
    }

    /// Validate the records in page order, returning all of them or none.
    pub fn validate(
        &self,
        records: Vec<RawEventRecord>,
        now: NaiveDate,
    ) -> DaynameResult<Vec<ValidatedEvent>> {
        if records.is_empty() {
            return Err(DaynameError::EmptyResult);
        }

        match self.strategy {
            Strategy::Weekday => Ok(records
                .into_iter()
                .map(|record| self.accept(record.temporal, &record.name))
                .collect()),
            Strategy::MonthDayYear => self.validate_dates(records, now),
        }
    }

    fn validate_dates(
        &self,
        records: Vec<RawEventRecord>,
        now: NaiveDate,
    ) -> DaynameResult<Vec<ValidatedEvent>> {
        let mut events = Vec::with_capacity(records.len());
        let mut last_accepted: Option<NaiveDate> = None;

        for record in records {
            let candidate = match record.temporal {
                Temporal::Date(date) => date,
                // Tokenizer only yields dates in this mode
                Temporal::Weekday(_) => {
                    return Err(DaynameError::StrategyMismatch(record.name));
                }
            };

            let accepted = match last_accepted {
                None => candidate,
                Some(previous) => repair(previous, candidate)
                    .ok_or(DataInconsistency::NotConsecutive {
                        previous,
                        candidate,
                    })?,
            };

            if accepted != candidate {
                tracing::warn!(
                    "Repaired year of '{}': {} -> {}",
                    record.name,
                    candidate,
                    accepted
                );
            }

            if (accepted - now).num_days().abs() > self.tolerance_days {
                return Err(DataInconsistency::OutOfTolerance {
                    date: accepted,
                    now,
                    tolerance_days: self.tolerance_days,
                }
                .into());
            }

            events.push(self.accept(Temporal::Date(accepted), &record.name));
            last_accepted = Some(accepted);
        }

        Ok(events)
    }

    fn accept(&self, temporal: Temporal, name: &str) -> ValidatedEvent {
        ValidatedEvent {
            temporal,
            display_name: self.titles.canonicalize(name),
        }
    }
}

impl Default for Validator {
    fn default() -> Self {
        Validator::new(
            Strategy::MonthDayYear,
            DEFAULT_TOLERANCE_DAYS,
            TitleRules::default(),
        )
    }
}

/// Find the date `candidate` was meant to be, given the previous accepted date.
///
/// Tried in order: as written, with the previous year, with the year after.
fn repair(previous: NaiveDate, candidate: NaiveDate) -> Option<NaiveDate> {
    let expected = previous + Duration::days(1);

    [
        Some(candidate),
        candidate.with_year(previous.year()),
        candidate.with_year(previous.year() + 1),
    ]
    .into_iter()
    .flatten()
    .find(|date| *date == expected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn records(dates: &[NaiveDate]) -> Vec<RawEventRecord> {
        dates
            .iter()
            .enumerate()
            .map(|(i, d)| RawEventRecord::new(Temporal::Date(*d), format!("Day {}", i)))
            .collect()
    }

    fn dates(events: &[ValidatedEvent]) -> Vec<NaiveDate> {
        events.iter().filter_map(|e| e.temporal.as_date()).collect()
    }

    #[test]
    fn test_consecutive_dates_pass_unchanged() {
        let input = [date(2024, 3, 14), date(2024, 3, 15), date(2024, 3, 16)];

        let events = Validator::default()
            .validate(records(&input), date(2024, 3, 10))
            .unwrap();

        assert_eq!(dates(&events), input.to_vec());
        assert_eq!(events[0].display_name, "IYD: Day 0");
    }

    #[test]
    fn test_mistyped_year_is_repaired() {
        let input = [date(2024, 3, 14), date(2023, 3, 15), date(2024, 3, 16)];

        let events = Validator::default()
            .validate(records(&input), date(2024, 3, 14))
            .unwrap();

        assert_eq!(
            dates(&events),
            vec![date(2024, 3, 14), date(2024, 3, 15), date(2024, 3, 16)]
        );
        assert_eq!(events[1].display_name, "IYD: Day 1", "Names stay attached");
    }

    #[test]
    fn test_year_rollover_is_repaired() {
        // January entries still carrying the old year
        let input = [date(2023, 12, 31), date(2023, 1, 1), date(2024, 1, 2)];

        let events = Validator::default()
            .validate(records(&input), date(2024, 1, 1))
            .unwrap();

        assert_eq!(
            dates(&events),
            vec![date(2023, 12, 31), date(2024, 1, 1), date(2024, 1, 2)]
        );
    }

    #[test]
    fn test_real_gap_fails_with_both_dates() {
        let input = [date(2024, 3, 14), date(2024, 3, 20)];

        let err = Validator::default()
            .validate(records(&input), date(2024, 3, 14))
            .unwrap_err();

        match err {
            DaynameError::DataInconsistency(DataInconsistency::NotConsecutive {
                previous,
                candidate,
            }) => {
                assert_eq!(previous, date(2024, 3, 14));
                assert_eq!(candidate, date(2024, 3, 20));
            }
            other => panic!("Expected NotConsecutive, got {:?}", other),
        }
    }

    #[test]
    fn test_unrepaired_candidate_is_reported() {
        // Tier 1 would make this 2024-03-20, but the date as written is reported
        let input = [date(2024, 3, 14), date(2021, 3, 20)];

        let err = Validator::default()
            .validate(records(&input), date(2024, 3, 14))
            .unwrap_err();

        assert!(
            matches!(
                err,
                DaynameError::DataInconsistency(DataInconsistency::NotConsecutive { candidate, .. })
                    if candidate == date(2021, 3, 20)
            ),
            "Got {:?}",
            err
        );
    }

    #[test]
    fn test_duplicate_date_fails() {
        let input = [date(2024, 3, 14), date(2024, 3, 14)];

        let err = Validator::default()
            .validate(records(&input), date(2024, 3, 14))
            .unwrap_err();

        assert!(matches!(
            err,
            DaynameError::DataInconsistency(DataInconsistency::NotConsecutive { .. })
        ));
    }

    #[test]
    fn test_single_date_outside_tolerance_fails() {
        let err = Validator::default()
            .validate(records(&[date(2023, 3, 14)]), date(2024, 3, 14))
            .unwrap_err();

        match err {
            DaynameError::DataInconsistency(DataInconsistency::OutOfTolerance {
                date: got,
                tolerance_days,
                ..
            }) => {
                assert_eq!(got, date(2023, 3, 14));
                assert_eq!(tolerance_days, DEFAULT_TOLERANCE_DAYS);
            }
            other => panic!("Expected OutOfTolerance, got {:?}", other),
        }
    }

    #[test]
    fn test_tolerance_boundary_is_inclusive() {
        let now = date(2024, 3, 14);
        let validator = Validator::new(Strategy::MonthDayYear, 10, TitleRules::default());

        assert!(validator.validate(records(&[date(2024, 3, 24)]), now).is_ok());
        assert!(validator.validate(records(&[date(2024, 3, 4)]), now).is_ok());
        assert!(validator.validate(records(&[date(2024, 3, 25)]), now).is_err());
    }

    #[test]
    fn test_empty_input_fails() {
        for strategy in [Strategy::MonthDayYear, Strategy::Weekday] {
            let validator = Validator::new(strategy, 45, TitleRules::default());
            let err = validator.validate(vec![], date(2024, 3, 14)).unwrap_err();
            assert!(
                matches!(err, DaynameError::EmptyResult),
                "Expected EmptyResult for {:?}, got {:?}",
                strategy,
                err
            );
        }
    }

    #[test]
    fn test_weekdays_pass_through_in_order() {
        let input = vec![
            RawEventRecord::new(Temporal::Weekday(Weekday::Fri), "Fish Fry"),
            RawEventRecord::new(Temporal::Weekday(Weekday::Mon), "Gourmet Night"),
            RawEventRecord::new(Temporal::Weekday(Weekday::Fri), "Fish Fry"),
        ];

        let events = Validator::new(Strategy::Weekday, 45, TitleRules::default())
            .validate(input, date(2024, 3, 14))
            .unwrap();

        let rendered: Vec<String> = events.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            rendered,
            vec![
                "Friday - IYD: Fish Fry",
                "Monday - FP Gourmet Night",
                "Friday - IYD: Fish Fry",
            ]
        );
    }
}
